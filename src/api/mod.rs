mod actions;
mod fetch;
mod plots_contract;
mod scheduler;
mod series_projection;
mod timers;
mod view;

pub use actions::StepDirection;
pub use fetch::{EMPTY_SERIES_MESSAGE, FetchOutcome, classify};
pub use plots_contract::{
    FetchError, PlotPayload, PlotRequest, PlotResponse, SeriesOptions, SeriesPayload,
};
pub use scheduler::DrawRequest;
pub use series_projection::{build_summary_table, order_for_z_index, stack_key, to_plot_points};
pub use view::{AxisBounds, Placeholder, PlotTarget, SummaryTableEntry};

use indexmap::IndexMap;
use tracing::debug;

use crate::core::{ContainerId, DEFAULT_RANGE, GraphOptions, ViewId};
use crate::error::{GraphError, GraphResult};
use crate::render::{GraphRenderer, PlotLine, RenderHandle, TOGGLED_LINE_WIDTH, plot_line_color};
use crate::viewport::ViewportProbe;

use timers::{Debounce, TimerKind, TimerQueue};
use view::ViewState;

/// Scheduling and presentation constants; defaults match the stock
/// dashboard behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Coalescing window for queue-evaluation passes.
    pub debounce_ms: u64,
    /// Spacing between dispatches of a forced flush.
    pub stagger_ms: u64,
    /// Range applied when neither anchor nor range is configured.
    pub default_range: String,
    /// Pixel height of one legend table row.
    pub legend_row_height: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 200,
            stagger_ms: 250,
            default_range: DEFAULT_RANGE.to_owned(),
            legend_row_height: 24,
        }
    }
}

impl DashboardConfig {
    #[must_use]
    pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    #[must_use]
    pub fn with_stagger_ms(mut self, stagger_ms: u64) -> Self {
        self.stagger_ms = stagger_ms;
        self
    }

    #[must_use]
    pub fn with_default_range(mut self, default_range: impl Into<String>) -> Self {
        self.default_range = default_range.into();
        self
    }
}

/// Instruction emitted for the host to execute.
///
/// The dashboard owns scheduling decisions but not their side effects:
/// hosts drain this queue, perform the transport or listener work, and feed
/// fetch results back through [`Dashboard::complete_fetch`].
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Issue the plot-data request and report the result with the same
    /// view/generation pair.
    FetchPlots {
        view: ViewId,
        generation: u64,
        request: PlotRequest,
    },
    /// Start forwarding scroll events of this container to
    /// [`Dashboard::notify_scroll`].
    WatchScroll { container: ContainerId },
    /// Stop forwarding; the container's queue drained.
    UnwatchScroll { container: ContainerId },
}

/// Orchestration facade owning every graph view of one dashboard page.
///
/// Decides when each view fetches and redraws: immediate draws for visible
/// graphs, per-scroll-container queues for hidden ones, debounced queue
/// re-evaluation, and refresh timers. Multiple dashboards are fully
/// independent; no state is shared between instances.
pub struct Dashboard<R: GraphRenderer, P: ViewportProbe> {
    renderer: R,
    viewport: P,
    config: DashboardConfig,
    views: IndexMap<ViewId, ViewState<R::Handle>>,
    queues: IndexMap<ContainerId, Vec<Option<ViewId>>>,
    flush_debounce: Debounce,
    timers: TimerQueue,
    effects: Vec<Effect>,
    next_view_id: u64,
    clock_ms: u64,
}

impl<R: GraphRenderer, P: ViewportProbe> Dashboard<R, P> {
    #[must_use]
    pub fn new(renderer: R, viewport: P, config: DashboardConfig) -> Self {
        Self {
            renderer,
            viewport,
            config,
            views: IndexMap::new(),
            queues: IndexMap::new(),
            flush_debounce: Debounce::default(),
            timers: TimerQueue::default(),
            effects: Vec::new(),
            next_view_id: 0,
            clock_ms: 0,
        }
    }

    /// Registers a graph placeholder and returns its view identity.
    pub fn bind_view(&mut self, target: PlotTarget, options: GraphOptions) -> ViewId {
        let view = ViewId::new(self.next_view_id);
        self.next_view_id += 1;
        debug!(view = view.raw(), "bind graph view");
        self.views.insert(view, ViewState::new(target, options));
        view
    }

    /// Tears a view down: cancels its timers and nulls any queue entry.
    pub fn destroy_view(&mut self, view: ViewId) -> GraphResult<()> {
        let Some(mut state) = self.views.shift_remove(&view) else {
            return Err(GraphError::UnknownView(view));
        };
        state.refresh.cancel(&mut self.timers);
        self.timers.cancel_view(view);
        for queue in self.queues.values_mut() {
            for slot in queue.iter_mut() {
                if *slot == Some(view) {
                    *slot = None;
                }
            }
        }
        debug!(view = view.raw(), "destroy graph view");
        Ok(())
    }

    /// Fires every timer due at or before `now_ms`, in deadline order.
    pub fn run_until(&mut self, now_ms: u64) {
        let now = self.observe(now_ms);
        while let Some(entry) = self.timers.pop_due(now) {
            let at = entry.deadline_ms;
            match entry.kind {
                TimerKind::Flush { force } => {
                    self.flush_debounce.acknowledge(entry.id);
                    self.flush_pass(force, at);
                }
                TimerKind::Draw { view } => self.dispatch_draw(view, at),
                TimerKind::Refresh { view } => {
                    if let Some(state) = self.views.get_mut(&view) {
                        state.refresh.acknowledge(entry.id);
                    }
                    let postpone = !self.viewport.is_visible(view);
                    let _ = self.request_draw(view, DrawRequest { postpone, delay_ms: 0 }, at);
                }
            }
        }
    }

    /// Drains the pending host instructions.
    #[must_use]
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Earliest pending timer deadline, for host wakeup scheduling.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Applies an options patch without triggering a redraw.
    pub fn update_options(
        &mut self,
        view: ViewId,
        patch: crate::core::OptionsPatch,
    ) -> GraphResult<()> {
        let state = self.view_state_mut(view)?;
        state.options = state.options.merge(patch);
        Ok(())
    }

    #[must_use]
    pub fn view_options(&self, view: ViewId) -> Option<&GraphOptions> {
        self.views.get(&view).map(|state| &state.options)
    }

    #[must_use]
    pub fn view_placeholder(&self, view: ViewId) -> Option<&Placeholder> {
        self.views.get(&view).map(|state| &state.placeholder)
    }

    #[must_use]
    pub fn controls_enabled(&self, view: ViewId) -> bool {
        self.views
            .get(&view)
            .map(|state| state.controls_enabled)
            .unwrap_or(false)
    }

    #[must_use]
    pub fn last_axis(&self, view: ViewId) -> Option<AxisBounds> {
        self.views.get(&view).and_then(|state| state.last_axis)
    }

    /// Legend/summary table of the last successful render.
    #[must_use]
    pub fn summary_table(&self, view: ViewId) -> Option<&IndexMap<String, SummaryTableEntry>> {
        self.views.get(&view).map(|state| &state.summary_table)
    }

    #[must_use]
    pub fn render_handle(&self, view: ViewId) -> Option<&R::Handle> {
        self.views.get(&view).and_then(|state| state.handle.as_ref())
    }

    #[must_use]
    pub fn view_ids(&self) -> Vec<ViewId> {
        self.views.keys().copied().collect()
    }

    /// Containers with a live draw queue, in creation order.
    #[must_use]
    pub fn watched_containers(&self) -> Vec<ContainerId> {
        self.queues.keys().copied().collect()
    }

    /// Whether the view currently sits undispatched in a draw queue.
    #[must_use]
    pub fn is_queued(&self, view: ViewId) -> bool {
        self.queues
            .values()
            .any(|queue| queue.iter().any(|slot| *slot == Some(view)))
    }

    /// Toggles a value-axis marker on the view's live chart.
    ///
    /// Newly created markers take the next palette color by insertion order.
    /// Returns whether the marker is active after the call; `Ok(false)`
    /// without change when the view has no live chart.
    pub fn toggle_plot_line(
        &mut self,
        view: ViewId,
        name: &str,
        value: f64,
    ) -> GraphResult<bool> {
        let state = self.view_state_mut(view)?;
        let Some(handle) = state.handle.as_mut() else {
            return Ok(false);
        };

        if let Some(position) = state.plot_lines.iter().position(|(id, _)| id == name) {
            state.plot_lines.remove(position);
            handle.remove_plot_line(name);
            Ok(false)
        } else {
            let color = plot_line_color(state.plot_lines.len()).to_owned();
            state.plot_lines.push((name.to_owned(), value));
            handle.set_plot_line(&PlotLine {
                id: name.to_owned(),
                value,
                color,
                width: TOGGLED_LINE_WIDTH,
            });
            Ok(true)
        }
    }

    /// Forwards a legend visibility toggle to the view's live chart; the
    /// state persists across redraws keyed by series name.
    pub fn set_series_visible(
        &mut self,
        view: ViewId,
        name: &str,
        visible: bool,
    ) -> GraphResult<()> {
        let state = self.view_state_mut(view)?;
        if let Some(handle) = state.handle.as_mut() {
            handle.set_series_visible(name, visible);
        }
        Ok(())
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn viewport_mut(&mut self) -> &mut P {
        &mut self.viewport
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Advances the monotonic clock high-water mark and returns it.
    fn observe(&mut self, now_ms: u64) -> u64 {
        self.clock_ms = self.clock_ms.max(now_ms);
        self.clock_ms
    }

    fn view_state_mut(&mut self, view: ViewId) -> GraphResult<&mut ViewState<R::Handle>> {
        self.views
            .get_mut(&view)
            .ok_or(GraphError::UnknownView(view))
    }
}
