//! Per-view state owned by the dashboard.

use indexmap::IndexMap;
use serde_json::Value;
use smallvec::SmallVec;

use super::plots_contract::SeriesOptions;
use super::timers::Debounce;
use crate::core::GraphOptions;

/// What a view fetches: a saved graph by id, or an inline preview
/// specification forwarded verbatim to the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotTarget {
    Saved(String),
    Preview(Value),
}

impl PlotTarget {
    /// Name used by failure placeholders when the options carry no title.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Saved(id) => id,
            Self::Preview(_) => "preview",
        }
    }
}

/// Placeholder text shown in place of (or on top of) the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    Hidden,
    Loading,
    /// Informational notice; controls stay usable.
    Info(String),
    /// Warning state; interactive controls are disabled.
    Warning(String),
}

/// Axis bounds of the last rendered response, in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisBounds {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl AxisBounds {
    #[must_use]
    pub const fn span_ms(self) -> i64 {
        self.end_ms - self.start_ms
    }
}

/// Legend/summary table row for one series.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTableEntry {
    pub summary: IndexMap<String, f64>,
    pub options: SeriesOptions,
}

pub(super) struct ViewState<H> {
    pub(super) target: PlotTarget,
    pub(super) options: GraphOptions,
    /// Replaced wholesale on each full redraw, never mutated in place.
    pub(super) handle: Option<H>,
    pub(super) refresh: Debounce,
    /// The next redraw must compensate container height for a legend toggle.
    pub(super) toggled_legend: bool,
    /// Stale-response guard: only the latest generation may apply.
    pub(super) generation: u64,
    pub(super) controls_enabled: bool,
    pub(super) placeholder: Placeholder,
    pub(super) last_axis: Option<AxisBounds>,
    /// Interactively toggled plot lines, in insertion order.
    pub(super) plot_lines: SmallVec<[(String, f64); 4]>,
    pub(super) summary_table: IndexMap<String, SummaryTableEntry>,
}

impl<H> ViewState<H> {
    pub(super) fn new(target: PlotTarget, options: GraphOptions) -> Self {
        Self {
            target,
            options,
            handle: None,
            refresh: Debounce::default(),
            toggled_legend: false,
            generation: 0,
            controls_enabled: true,
            placeholder: Placeholder::Hidden,
            last_axis: None,
            plot_lines: SmallVec::new(),
            summary_table: IndexMap::new(),
        }
    }
}
