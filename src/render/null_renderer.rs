use indexmap::IndexMap;

use crate::error::GraphResult;
use crate::render::{GraphRenderer, PlotLine, RenderHandle, RenderSpec};

/// No-op renderer used by tests and headless dashboard usage.
///
/// It still validates the spec so tests can catch malformed render input
/// before a real backend is introduced, and records enough state to assert
/// on visibility carry-over and plot-line bookkeeping.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub render_count: usize,
    pub last_spec: Option<RenderSpec>,
}

impl GraphRenderer for NullRenderer {
    type Handle = NullHandle;

    fn render(&mut self, spec: &RenderSpec) -> GraphResult<Self::Handle> {
        spec.validate()?;
        self.render_count += 1;
        self.last_spec = Some(spec.clone());

        let visibility = spec
            .series
            .iter()
            .map(|series| (series.name.clone(), series.visible))
            .collect();

        Ok(NullHandle {
            visibility,
            plot_lines: IndexMap::new(),
        })
    }
}

/// Handle produced by [`NullRenderer`]; tracks per-series visibility and the
/// active plot lines the way a live chart object would.
#[derive(Debug, Default)]
pub struct NullHandle {
    visibility: IndexMap<String, bool>,
    plot_lines: IndexMap<String, PlotLine>,
}

impl NullHandle {
    #[must_use]
    pub fn plot_lines(&self) -> &IndexMap<String, PlotLine> {
        &self.plot_lines
    }
}

impl RenderHandle for NullHandle {
    fn set_plot_line(&mut self, line: &PlotLine) {
        self.plot_lines.insert(line.id.clone(), line.clone());
    }

    fn remove_plot_line(&mut self, id: &str) {
        self.plot_lines.shift_remove(id);
    }

    fn series_visibility(&self) -> IndexMap<String, bool> {
        self.visibility.clone()
    }

    fn set_series_visible(&mut self, name: &str, visible: bool) {
        if let Some(entry) = self.visibility.get_mut(name) {
            *entry = visible;
        }
    }
}
