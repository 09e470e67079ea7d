//! Plot-data fetching: request build, outcome classification, and applying
//! results to the view.
//!
//! The dashboard emits fetch effects; the host performs the transport and
//! reports back through [`Dashboard::complete_fetch`]. Responses are
//! stamped with a per-view generation so a stale result can never overwrite
//! a newer fetch.

use tracing::{debug, warn};

use crate::core::{GraphOptions, StackMode, ViewId, format_time_display};
use crate::error::GraphResult;
use crate::render::{
    CONSTANT_LINE_COLOR, CONSTANT_LINE_WIDTH, GraphRenderer, PlotLine, RenderHandle, RenderSeries,
    RenderSpec, TOGGLED_LINE_WIDTH, plot_line_color,
};
use crate::viewport::ViewportProbe;

use super::plots_contract::{FetchError, PlotPayload, PlotRequest, PlotResponse};
use super::series_projection::{build_summary_table, order_for_z_index, stack_key, to_plot_points};
use super::timers::TimerKind;
use super::view::{AxisBounds, Placeholder, PlotTarget};
use super::{Dashboard, Effect};

/// Placeholder text for a well-formed response carrying no series.
pub const EMPTY_SERIES_MESSAGE: &str = "no series to display";

/// Classified result of one plot-data fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Renderable payload with at least one series.
    Rendered(PlotPayload),
    /// Well-formed response, zero series.
    EmptySeries,
    /// Server-provided message shown verbatim as the placeholder.
    ServerMessage(String),
    /// Transport or decode failure.
    Failed(FetchError),
}

/// Classifies a transport result into the outcome the view reacts to.
#[must_use]
pub fn classify(result: Result<PlotResponse, FetchError>) -> FetchOutcome {
    let response = match result {
        Ok(response) => response,
        Err(err) => return FetchOutcome::Failed(err),
    };

    if let Some(message) = response.message {
        return FetchOutcome::ServerMessage(message);
    }

    let series = match response.series {
        Some(series) if !series.is_empty() => series,
        _ => return FetchOutcome::EmptySeries,
    };

    let (Some(kind), Some(start), Some(end)) = (response.kind, response.start, response.end)
    else {
        return FetchOutcome::Failed(FetchError::Decode(
            "response with series is missing type or axis bounds".to_owned(),
        ));
    };

    FetchOutcome::Rendered(PlotPayload {
        kind,
        stack_mode: response.stack_mode.unwrap_or(StackMode::None),
        unit_type: response.unit_type,
        unit_legend: response.unit_legend,
        title: response.title,
        name: response.name,
        start,
        end,
        series,
    })
}

fn build_plot_request(options: &GraphOptions, target: &PlotTarget) -> PlotRequest {
    let (id, graph) = match target {
        PlotTarget::Saved(id) => (Some(id.clone()), None),
        PlotTarget::Preview(spec) => (None, Some(spec.clone())),
    };

    PlotRequest {
        time: options.time,
        range: options.range.clone(),
        sample: options.sample,
        percentiles: options.percentiles.clone(),
        id,
        graph,
    }
}

impl<R: GraphRenderer, P: ViewportProbe> Dashboard<R, P> {
    /// Immediate-draw entry: normalizes the view's options, bumps the fetch
    /// generation, and emits the fetch effect.
    pub(super) fn dispatch_draw(&mut self, view: ViewId, _now_ms: u64) {
        let default_range = self.config.default_range.clone();
        let Some(state) = self.views.get_mut(&view) else {
            debug!(view = view.raw(), "skipping draw of destroyed view");
            return;
        };

        state.refresh.cancel(&mut self.timers);
        state.placeholder = Placeholder::Loading;

        let mut options = state.options.normalized(&default_range);
        if matches!(state.target, PlotTarget::Preview(_)) {
            options.legend = Some(false);
        }
        state.options = options;
        state.generation += 1;

        let request = build_plot_request(&state.options, &state.target);
        let generation = state.generation;
        debug!(view = view.raw(), generation, "issuing plot fetch");
        self.effects.push(Effect::FetchPlots {
            view,
            generation,
            request,
        });
    }

    /// Reports a fetch result back to the owning view.
    ///
    /// A result whose generation no longer matches the view's latest fetch
    /// is discarded. Classification failures never propagate: they resolve
    /// into view-local placeholder/controls state.
    pub fn complete_fetch(
        &mut self,
        view: ViewId,
        generation: u64,
        result: Result<PlotResponse, FetchError>,
        now_ms: u64,
    ) -> GraphResult<()> {
        let now = self.observe(now_ms);
        let Some(state) = self.views.get_mut(&view) else {
            debug!(view = view.raw(), "dropping response for destroyed view");
            return Ok(());
        };
        if state.generation != generation {
            debug!(
                view = view.raw(),
                generation,
                latest = state.generation,
                "discarding stale plot response"
            );
            return Ok(());
        }

        match classify(result) {
            FetchOutcome::Rendered(payload) => self.apply_payload(view, payload, now),
            FetchOutcome::EmptySeries => {
                state.controls_enabled = true;
                state.handle = None;
                state.summary_table.clear();
                state.placeholder = Placeholder::Info(EMPTY_SERIES_MESSAGE.to_owned());
                Ok(())
            }
            FetchOutcome::ServerMessage(message) => {
                state.controls_enabled = false;
                state.handle = None;
                state.summary_table.clear();
                state.placeholder = Placeholder::Warning(message);
                Ok(())
            }
            FetchOutcome::Failed(err) => {
                let name = state
                    .options
                    .title
                    .clone()
                    .unwrap_or_else(|| state.target.display_name().to_owned());
                warn!(view = view.raw(), error = %err, "plot fetch failed");
                state.controls_enabled = false;
                state.placeholder =
                    Placeholder::Warning(format!("failed to load graph data for {name}"));
                Ok(())
            }
        }
    }

    fn apply_payload(&mut self, view: ViewId, payload: PlotPayload, now_ms: u64) -> GraphResult<()> {
        let legend_row_height = i32::try_from(self.config.legend_row_height).unwrap_or(24);
        let Some(state) = self.views.get_mut(&view) else {
            return Ok(());
        };

        let previous_visibility = state
            .handle
            .as_ref()
            .map(|handle| handle.series_visibility())
            .unwrap_or_default();

        let ordered = order_for_z_index(&payload.series);
        let series: Vec<RenderSeries> = payload
            .series
            .iter()
            .map(|entry| RenderSeries {
                name: entry.name.clone(),
                stack_key: stack_key(entry.stack_id),
                points: to_plot_points(&entry.plots),
                color: entry
                    .options
                    .as_ref()
                    .and_then(|options| options.color.clone()),
                visible: previous_visibility
                    .get(&entry.name)
                    .copied()
                    .unwrap_or(true),
                z_index: ordered
                    .iter()
                    .position(|name| *name == entry.name)
                    .unwrap_or(0),
            })
            .collect();

        let legend_enabled = state.options.legend.unwrap_or(false);
        let expand = state.options.expand.unwrap_or(true);
        let rows = series.len();
        let mut height_delta = 0;
        if state.toggled_legend && expand {
            let legend_height = rows as i32 * legend_row_height;
            height_delta = if legend_enabled {
                legend_height
            } else {
                -legend_height
            };
            state.toggled_legend = false;
        }

        let interactive = matches!(state.target, PlotTarget::Saved(_));
        let axis = AxisBounds {
            start_ms: payload.start.timestamp_millis(),
            end_ms: payload.end.timestamp_millis(),
        };

        let spec = RenderSpec {
            kind: payload.kind,
            stack_mode: payload.stack_mode,
            unit_type: payload.unit_type,
            unit_legend: payload.unit_legend.clone(),
            title: interactive
                .then(|| payload.title.clone().or_else(|| payload.name.clone()))
                .flatten(),
            subtitle: interactive.then(|| {
                format!(
                    "{} — {}",
                    format_time_display(payload.start),
                    format_time_display(payload.end)
                )
            }),
            axis_start_ms: axis.start_ms,
            axis_end_ms: axis.end_ms,
            zoomable: state.options.zoom.unwrap_or(true) && interactive,
            interactive,
            legend_enabled,
            legend_rows: rows,
            height_delta,
            series,
        };

        let carried_lines = state.plot_lines.clone();
        let constants = state.options.constants.clone().unwrap_or_default();
        let refresh_interval = state.options.refresh_interval;
        let summary_table = build_summary_table(&payload.series);

        let mut handle = self.renderer.render(&spec)?;

        for (index, (name, value)) in carried_lines.iter().enumerate() {
            handle.set_plot_line(&PlotLine {
                id: name.clone(),
                value: *value,
                color: plot_line_color(index).to_owned(),
                width: TOGGLED_LINE_WIDTH,
            });
        }
        for (index, constant) in constants.iter().enumerate() {
            handle.set_plot_line(&PlotLine {
                id: format!("constant{index}"),
                value: *constant,
                color: CONSTANT_LINE_COLOR.to_owned(),
                width: CONSTANT_LINE_WIDTH,
            });
        }

        let Some(state) = self.views.get_mut(&view) else {
            return Ok(());
        };
        state.handle = Some(handle);
        state.last_axis = Some(axis);
        state.summary_table = summary_table;
        state.controls_enabled = true;
        state.placeholder = Placeholder::Hidden;

        if let Some(interval) = refresh_interval {
            let deadline = now_ms + u64::from(interval) * 1_000;
            state
                .refresh
                .schedule(&mut self.timers, deadline, TimerKind::Refresh { view });
            debug!(view = view.raw(), deadline, "refresh armed");
        }

        Ok(())
    }
}
