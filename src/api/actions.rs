//! Toolbar and chart-interaction actions.
//!
//! Each action merges an options patch into the view and requests an
//! immediate redraw. While a view's controls are disabled only refresh and
//! reset remain available; every other action is a gated no-op.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::core::{OptionsPatch, Patch, ViewId, duration_to_range, millis_to_datetime};
use crate::error::{GraphError, GraphResult};
use crate::render::GraphRenderer;
use crate::viewport::ViewportProbe;

use super::scheduler::DrawRequest;
use super::view::AxisBounds;
use super::Dashboard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Backward,
    Forward,
}

impl<R: GraphRenderer, P: ViewportProbe> Dashboard<R, P> {
    /// Redraws with the current options. Available while controls are
    /// disabled, so a failed view can recover.
    pub fn refresh(&mut self, view: ViewId, now_ms: u64) -> GraphResult<()> {
        self.request_draw(view, DrawRequest::immediate(), now_ms)
    }

    /// Clears the time anchor and range so defaults re-apply. Available
    /// while controls are disabled.
    pub fn reset(&mut self, view: ViewId, now_ms: u64) -> GraphResult<()> {
        self.update_options(
            view,
            OptionsPatch {
                time: Patch::Clear,
                range: Patch::Clear,
                ..OptionsPatch::default()
            },
        )?;
        self.request_draw(view, DrawRequest::immediate(), now_ms)
    }

    /// Switches to a relative range anchored at now.
    pub fn set_range(&mut self, view: ViewId, range: &str, now_ms: u64) -> GraphResult<bool> {
        if !self.action_allowed(view)? {
            return Ok(false);
        }
        self.update_options(
            view,
            OptionsPatch {
                time: Patch::Clear,
                range: Patch::Set(range.to_owned()),
                ..OptionsPatch::default()
            },
        )?;
        self.request_draw(view, DrawRequest::immediate(), now_ms)?;
        Ok(true)
    }

    /// Anchors the view at an explicit instant with the given range.
    pub fn set_time(
        &mut self,
        view: ViewId,
        time: DateTime<Utc>,
        range: &str,
        now_ms: u64,
    ) -> GraphResult<bool> {
        if !self.action_allowed(view)? {
            return Ok(false);
        }
        self.update_options(
            view,
            OptionsPatch {
                time: Patch::Set(time),
                range: Patch::Set(range.to_owned()),
                ..OptionsPatch::default()
            },
        )?;
        self.request_draw(view, DrawRequest::immediate(), now_ms)?;
        Ok(true)
    }

    /// Shifts the window a quarter span backward or forward.
    pub fn step(
        &mut self,
        view: ViewId,
        direction: StepDirection,
        now_ms: u64,
    ) -> GraphResult<bool> {
        if !self.action_allowed(view)? {
            return Ok(false);
        }
        let Some(axis) = self.last_axis(view) else {
            return Ok(false);
        };

        let span = axis.span_ms();
        let delta = match direction {
            StepDirection::Backward => -(span / 4),
            StepDirection::Forward => span / 4,
        };
        let Some(time) = millis_to_datetime(axis.start_ms + delta) else {
            return Ok(false);
        };
        let range = self.unsigned_range(view, axis);

        self.apply_window(view, time, range, now_ms)?;
        Ok(true)
    }

    /// Halves the window around its center.
    pub fn zoom_in(&mut self, view: ViewId, now_ms: u64) -> GraphResult<bool> {
        if !self.action_allowed(view)? {
            return Ok(false);
        }
        let Some(axis) = self.last_axis(view) else {
            return Ok(false);
        };

        let span = axis.span_ms();
        let Some(time) = millis_to_datetime(axis.start_ms + span / 4) else {
            return Ok(false);
        };
        self.apply_window(view, time, duration_to_range(span / 2), now_ms)?;
        Ok(true)
    }

    /// Doubles the window around its center.
    pub fn zoom_out(&mut self, view: ViewId, now_ms: u64) -> GraphResult<bool> {
        if !self.action_allowed(view)? {
            return Ok(false);
        }
        let Some(axis) = self.last_axis(view) else {
            return Ok(false);
        };

        let span = axis.span_ms();
        let Some(time) = millis_to_datetime(axis.start_ms - span / 2) else {
            return Ok(false);
        };
        self.apply_window(view, time, duration_to_range(span * 2), now_ms)?;
        Ok(true)
    }

    /// Applies a graphical x-range selection as the new window. Ignored
    /// when zooming is disabled for the view or the selection is empty.
    pub fn apply_zoom_selection(
        &mut self,
        view: ViewId,
        start_ms: i64,
        end_ms: i64,
        now_ms: u64,
    ) -> GraphResult<bool> {
        if !self.action_allowed(view)? {
            return Ok(false);
        }
        let zoomable = self
            .view_options(view)
            .map(|options| options.zoom.unwrap_or(true))
            .unwrap_or(true);
        if !zoomable || end_ms <= start_ms {
            return Ok(false);
        }
        let Some(time) = millis_to_datetime(start_ms) else {
            return Ok(false);
        };

        self.apply_window(view, time, duration_to_range(end_ms - start_ms), now_ms)?;
        Ok(true)
    }

    /// Flips legend visibility; the next redraw compensates the container
    /// height for the added or removed rows.
    pub fn toggle_legend(&mut self, view: ViewId, now_ms: u64) -> GraphResult<bool> {
        if !self.action_allowed(view)? {
            return Ok(false);
        }

        let state = self.view_state_mut(view)?;
        state.toggled_legend = true;
        let legend = !state.options.legend.unwrap_or(false);
        state.options = state.options.merge(OptionsPatch {
            legend: Patch::Set(legend),
            ..OptionsPatch::default()
        });
        debug!(view = view.raw(), legend, "legend toggled");

        self.request_draw(view, DrawRequest::immediate(), now_ms)?;
        Ok(true)
    }

    /// Copies this view's window onto every other bound view and redraws
    /// them lazily, then redraws this view.
    pub fn reframe_all(&mut self, view: ViewId, now_ms: u64) -> GraphResult<bool> {
        if !self.action_allowed(view)? {
            return Ok(false);
        }
        let source = self
            .view_options(view)
            .ok_or(GraphError::UnknownView(view))?;
        let time = source.time;
        let range = source.range.clone();

        let others: Vec<ViewId> = self
            .view_ids()
            .into_iter()
            .filter(|other| *other != view)
            .collect();
        for other in others {
            self.update_options(
                other,
                OptionsPatch {
                    time: Patch::from(time),
                    range: Patch::from(range.clone()),
                    ..OptionsPatch::default()
                },
            )?;
            self.draw_lazy(other, now_ms)?;
        }

        self.request_draw(view, DrawRequest::immediate(), now_ms)?;
        Ok(true)
    }

    fn apply_window(
        &mut self,
        view: ViewId,
        time: DateTime<Utc>,
        range: String,
        now_ms: u64,
    ) -> GraphResult<()> {
        self.update_options(
            view,
            OptionsPatch {
                time: Patch::Set(time),
                range: Patch::Set(range),
                ..OptionsPatch::default()
            },
        )?;
        self.request_draw(view, DrawRequest::immediate(), now_ms)
    }

    /// Stored range without its sign, falling back to the last axis span.
    fn unsigned_range(&self, view: ViewId, axis: AxisBounds) -> String {
        self.view_options(view)
            .and_then(|options| options.range.clone())
            .map(|range| range.trim_start_matches('-').to_owned())
            .unwrap_or_else(|| duration_to_range(axis.span_ms()))
    }

    fn action_allowed(&self, view: ViewId) -> GraphResult<bool> {
        let enabled = self
            .views
            .get(&view)
            .map(|state| state.controls_enabled)
            .ok_or(GraphError::UnknownView(view))?;
        if !enabled {
            debug!(view = view.raw(), "action ignored while controls disabled");
        }
        Ok(enabled)
    }
}
