mod null_renderer;
mod spec;

pub use null_renderer::{NullHandle, NullRenderer};
pub use spec::{
    CONSTANT_LINE_COLOR, CONSTANT_LINE_WIDTH, PLOT_LINE_COLORS, PlotLine, PlotPoint, RenderSeries,
    RenderSpec, TOGGLED_LINE_WIDTH, plot_line_color,
};

use indexmap::IndexMap;

use crate::error::GraphResult;

/// Contract implemented by any charting backend.
///
/// Backends receive a fully materialized, deterministic [`RenderSpec`] and
/// return a handle the dashboard uses for incremental updates between full
/// redraws.
pub trait GraphRenderer {
    type Handle: RenderHandle;

    fn render(&mut self, spec: &RenderSpec) -> GraphResult<Self::Handle>;
}

/// Live chart object returned by a render; replaced wholesale on the next
/// full redraw of the same view.
pub trait RenderHandle {
    /// Draws or updates a horizontal value-axis marker. Idempotent per id.
    fn set_plot_line(&mut self, line: &PlotLine);

    /// Removes a marker if present.
    fn remove_plot_line(&mut self, id: &str);

    /// Current per-series visibility, keyed by series name. Carried over to
    /// the next redraw so user toggles survive data refreshes.
    fn series_visibility(&self) -> IndexMap<String, bool>;

    fn set_series_visible(&mut self, name: &str, visible: bool);
}
