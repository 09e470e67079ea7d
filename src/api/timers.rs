//! Deterministic timer queue driving all deferred work.
//!
//! The dashboard never reads a wall clock: hosts pass a monotonic
//! millisecond timestamp into every temporal entry point and timers fire
//! from [`Dashboard::run_until`](super::Dashboard::run_until) in deadline
//! order. Equal deadlines fire in arming order.

use crate::core::ViewId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) struct TimerId(u64);

/// What to do when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TimerKind {
    /// Debounced queue-evaluation pass.
    Flush { force: bool },
    /// Staggered or delayed immediate draw.
    Draw { view: ViewId },
    /// Recurring per-view refresh.
    Refresh { view: ViewId },
}

#[derive(Debug, Clone, Copy)]
pub(super) struct TimerEntry {
    pub(super) id: TimerId,
    pub(super) deadline_ms: u64,
    pub(super) kind: TimerKind,
}

#[derive(Debug, Default)]
pub(super) struct TimerQueue {
    next_id: u64,
    entries: Vec<TimerEntry>,
}

impl TimerQueue {
    pub(super) fn arm(&mut self, deadline_ms: u64, kind: TimerKind) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(TimerEntry {
            id,
            deadline_ms,
            kind,
        });
        id
    }

    pub(super) fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Drops every timer owned by a view; used when the view is destroyed.
    pub(super) fn cancel_view(&mut self, view: ViewId) {
        self.entries.retain(|entry| {
            !matches!(
                entry.kind,
                TimerKind::Draw { view: owner } | TimerKind::Refresh { view: owner }
                if owner == view
            )
        });
    }

    /// Earliest pending deadline; hosts use it to schedule the next
    /// `run_until` call.
    #[must_use]
    pub(super) fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|entry| entry.deadline_ms).min()
    }

    /// Removes and returns the earliest due entry, breaking deadline ties by
    /// arming order.
    pub(super) fn pop_due(&mut self, now_ms: u64) -> Option<TimerEntry> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.deadline_ms <= now_ms)
            .min_by_key(|(_, entry)| (entry.deadline_ms, entry.id.0))
            .map(|(index, _)| index)?;
        Some(self.entries.remove(index))
    }

    #[cfg(test)]
    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Single-slot timer: scheduling always cancels the previous occupant.
///
/// Backs both flush coalescing and per-view refresh arming, which share the
/// invariant of at most one pending timer per purpose.
#[derive(Debug, Default)]
pub(super) struct Debounce {
    pending: Option<TimerId>,
}

impl Debounce {
    pub(super) fn schedule(
        &mut self,
        timers: &mut TimerQueue,
        deadline_ms: u64,
        kind: TimerKind,
    ) -> TimerId {
        if let Some(previous) = self.pending.take() {
            timers.cancel(previous);
        }
        let id = timers.arm(deadline_ms, kind);
        self.pending = Some(id);
        id
    }

    pub(super) fn cancel(&mut self, timers: &mut TimerQueue) {
        if let Some(pending) = self.pending.take() {
            timers.cancel(pending);
        }
    }

    /// Clears the slot when its timer has fired.
    pub(super) fn acknowledge(&mut self, id: TimerId) {
        if self.pending == Some(id) {
            self.pending = None;
        }
    }

    #[cfg(test)]
    #[must_use]
    pub(super) fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}
