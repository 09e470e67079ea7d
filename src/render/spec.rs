use serde::{Deserialize, Serialize};

use crate::core::{GraphKind, StackMode, UnitType};
use crate::error::{GraphError, GraphResult};

/// One renderable sample: epoch milliseconds and an optional value, `None`
/// marking a gap in the series.
pub type PlotPoint = (i64, Option<f64>);

/// Fully materialized description of one chart draw.
///
/// Backends receive the spec after every scheduling, ordering, and
/// transformation decision has been made, so drawing code stays isolated
/// from option-merge and queueing logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSpec {
    pub kind: GraphKind,
    pub stack_mode: StackMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_type: Option<UnitType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_legend: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub axis_start_ms: i64,
    pub axis_end_ms: i64,
    /// Graphical x-range selection enabled.
    pub zoomable: bool,
    /// Mouse tracking and controls; disabled for inline previews.
    pub interactive: bool,
    pub legend_enabled: bool,
    pub legend_rows: usize,
    /// Signed container-height adjustment compensating a legend toggle.
    pub height_delta: i32,
    pub series: Vec<RenderSeries>,
}

impl RenderSpec {
    pub fn validate(&self) -> GraphResult<()> {
        if self.axis_start_ms >= self.axis_end_ms {
            return Err(GraphError::Render(format!(
                "axis bounds must be ordered: start={}, end={}",
                self.axis_start_ms, self.axis_end_ms
            )));
        }
        if self.series.iter().any(|series| series.name.is_empty()) {
            return Err(GraphError::Render("series name must not be empty".to_owned()));
        }
        Ok(())
    }
}

/// One ordered series inside a [`RenderSpec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSeries {
    pub name: String,
    /// Series sharing a stack key render as one cumulative stack.
    pub stack_key: String,
    pub points: Vec<PlotPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub visible: bool,
    /// Position in the average-descending draw order; later means on top.
    pub z_index: usize,
}

/// Horizontal marker pinned to the value axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotLine {
    pub id: String,
    pub value: f64,
    pub color: String,
    pub width: f64,
}

/// Palette cycled over interactively toggled plot lines, in insertion order.
pub const PLOT_LINE_COLORS: [&str; 8] = [
    "#16a085", "#27ae60", "#2980b9", "#8e44ad", "#2c3e50", "#f39c12", "#d35400", "#c0392b",
];

/// Color of the fixed plot lines drawn for `constants` options.
pub const CONSTANT_LINE_COLOR: &str = "#d00";

pub const TOGGLED_LINE_WIDTH: f64 = 1.5;
pub const CONSTANT_LINE_WIDTH: f64 = 1.0;

/// Picks the palette color for the `index`-th created plot line.
#[must_use]
pub fn plot_line_color(index: usize) -> &'static str {
    PLOT_LINE_COLORS[index % PLOT_LINE_COLORS.len()]
}

#[cfg(test)]
mod tests {
    use super::{PLOT_LINE_COLORS, RenderSeries, RenderSpec, plot_line_color};
    use crate::core::{GraphKind, StackMode};

    fn minimal_spec() -> RenderSpec {
        RenderSpec {
            kind: GraphKind::Line,
            stack_mode: StackMode::None,
            unit_type: None,
            unit_legend: None,
            title: None,
            subtitle: None,
            axis_start_ms: 0,
            axis_end_ms: 1_000,
            zoomable: true,
            interactive: true,
            legend_enabled: false,
            legend_rows: 0,
            height_delta: 0,
            series: Vec::new(),
        }
    }

    #[test]
    fn validate_rejects_inverted_axis_bounds() {
        let mut spec = minimal_spec();
        spec.axis_end_ms = spec.axis_start_ms;
        assert!(spec.validate().is_err());
    }

    #[test]
    fn validate_rejects_unnamed_series() {
        let mut spec = minimal_spec();
        spec.series.push(RenderSeries {
            name: String::new(),
            stack_key: "stack0".to_owned(),
            points: Vec::new(),
            color: None,
            visible: true,
            z_index: 0,
        });
        assert!(spec.validate().is_err());
    }

    #[test]
    fn palette_cycles_by_insertion_order() {
        assert_eq!(plot_line_color(0), PLOT_LINE_COLORS[0]);
        assert_eq!(plot_line_color(7), PLOT_LINE_COLORS[7]);
        assert_eq!(plot_line_color(8), PLOT_LINE_COLORS[0]);
        assert_eq!(plot_line_color(11), PLOT_LINE_COLORS[3]);
    }
}
