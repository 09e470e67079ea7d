//! Draw queueing: immediate vs. deferred execution by viewport membership.
//!
//! Hidden views enqueue under their nearest scrollable ancestor; a scroll,
//! resize, or explicit flush re-evaluates queued entries through one
//! debounced pass. Dispatched entries are tombstoned in place so indices
//! stay stable while a pass iterates, and a fully drained queue is dropped
//! together with its scroll listener.

use tracing::{debug, trace};

use crate::core::{ContainerId, ViewId};
use crate::error::GraphResult;
use crate::render::GraphRenderer;
use crate::viewport::ViewportProbe;

use super::Dashboard;
use super::timers::TimerKind;

/// How a redraw request should execute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawRequest {
    /// Defer until the view scrolls into the viewport or a flush forces it.
    pub postpone: bool,
    /// Delay before the immediate path runs; used to stagger batches.
    pub delay_ms: u64,
}

impl DrawRequest {
    #[must_use]
    pub fn immediate() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn postponed() -> Self {
        Self {
            postpone: true,
            delay_ms: 0,
        }
    }
}

impl<R: GraphRenderer, P: ViewportProbe> Dashboard<R, P> {
    /// Requests a redraw of one view.
    ///
    /// Any pending refresh timer is cancelled up front regardless of path,
    /// so overlapping causes cannot double-fetch from the same timer. A
    /// postponed view with no resolvable scroll container draws immediately.
    pub fn request_draw(
        &mut self,
        view: ViewId,
        request: DrawRequest,
        now_ms: u64,
    ) -> GraphResult<()> {
        let now = self.observe(now_ms);
        let Some(state) = self.views.get_mut(&view) else {
            return Err(crate::error::GraphError::UnknownView(view));
        };
        state.refresh.cancel(&mut self.timers);

        if request.postpone {
            if let Some(container) = self.viewport.scroll_container(view) {
                self.enqueue(view, container);
                return Ok(());
            }
            trace!(
                view = view.raw(),
                "no scroll container resolvable; drawing immediately"
            );
        }

        self.draw_after(view, request.delay_ms, now);
        Ok(())
    }

    /// Draws now when the view is visible, otherwise enqueues it.
    pub fn draw_lazy(&mut self, view: ViewId, now_ms: u64) -> GraphResult<()> {
        let postpone = !self.viewport.is_visible(view);
        self.request_draw(
            view,
            DrawRequest {
                postpone,
                delay_ms: 0,
            },
            now_ms,
        )
    }

    /// Schedules a debounced queue-evaluation pass.
    ///
    /// Calls within one debounce window coalesce into a single pass; the
    /// last caller's `force` flag wins. A forced pass skips visibility
    /// tests and staggers dispatches so every queued view renders.
    pub fn flush(&mut self, force: bool, now_ms: u64) {
        let now = self.observe(now_ms);
        let deadline = now + self.config.debounce_ms;
        self.flush_debounce
            .schedule(&mut self.timers, deadline, TimerKind::Flush { force });
        trace!(force, deadline, "flush scheduled");
    }

    /// Scroll notification from a watched container.
    pub fn notify_scroll(&mut self, container: ContainerId, now_ms: u64) {
        trace!(
            container = container.raw(),
            watched = self.queues.contains_key(&container),
            "scroll notification"
        );
        self.flush(false, now_ms);
    }

    /// Window resize notification; layout may have moved views into the
    /// viewport.
    pub fn notify_resize(&mut self, now_ms: u64) {
        self.flush(false, now_ms);
    }

    fn enqueue(&mut self, view: ViewId, container: ContainerId) {
        let queue = match self.queues.entry(container) {
            indexmap::map::Entry::Occupied(entry) => entry.into_mut(),
            indexmap::map::Entry::Vacant(entry) => {
                self.effects.push(super::Effect::WatchScroll { container });
                debug!(container = container.raw(), "watch scroll container");
                entry.insert(Vec::new())
            }
        };

        if !queue.iter().any(|slot| *slot == Some(view)) {
            queue.push(Some(view));
            trace!(
                view = view.raw(),
                container = container.raw(),
                depth = queue.len(),
                "draw postponed"
            );
        }
    }

    /// One queue-evaluation pass, run when the flush debounce fires.
    pub(super) fn flush_pass(&mut self, force: bool, now_ms: u64) {
        let mut dispatch = Vec::new();
        for queue in self.queues.values_mut() {
            for slot in queue.iter_mut() {
                if let Some(view) = *slot {
                    if force || self.viewport.is_visible(view) {
                        *slot = None;
                        dispatch.push(view);
                    }
                }
            }
        }

        let drained: Vec<ContainerId> = self
            .queues
            .iter()
            .filter(|(_, queue)| queue.iter().all(Option::is_none))
            .map(|(container, _)| *container)
            .collect();
        for container in drained {
            self.queues.shift_remove(&container);
            self.effects.push(super::Effect::UnwatchScroll { container });
            debug!(container = container.raw(), "unwatch scroll container");
        }

        debug!(force, dispatched = dispatch.len(), "flush pass");

        let mut delay = 0;
        for view in dispatch {
            self.draw_after(view, delay, now_ms);
            if force {
                delay += self.config.stagger_ms;
            }
        }
    }

    pub(super) fn draw_after(&mut self, view: ViewId, delay_ms: u64, now_ms: u64) {
        if delay_ms == 0 {
            self.dispatch_draw(view, now_ms);
        } else {
            self.timers
                .arm(now_ms + delay_ms, TimerKind::Draw { view });
        }
    }
}
