//! Injected layout capability: scroll-container resolution and visibility.
//!
//! The scheduler never walks a real layout tree; hosts answer the two
//! questions it needs so queueing logic stays testable without a layout
//! engine.

use indexmap::IndexMap;

use crate::core::{ContainerId, ViewId};

/// Capability answering viewport-membership queries for graph views.
pub trait ViewportProbe {
    /// Whether the view's bounding box intersects the current scroll
    /// viewport.
    fn is_visible(&self, view: ViewId) -> bool;

    /// Nearest ancestor establishing a scrolling context for the view's
    /// element. `None` means the view is treated as always visible.
    fn scroll_container(&self, view: ViewId) -> Option<ContainerId>;
}

/// Map-backed probe for headless hosts and tests.
#[derive(Debug, Default)]
pub struct StaticViewport {
    entries: IndexMap<ViewId, Placement>,
}

#[derive(Debug, Clone, Copy)]
struct Placement {
    container: Option<ContainerId>,
    visible: bool,
}

impl StaticViewport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or updates a view's placement.
    pub fn place(&mut self, view: ViewId, container: Option<ContainerId>, visible: bool) {
        self.entries.insert(view, Placement { container, visible });
    }

    /// Flips only the visibility of an already-placed view.
    pub fn set_visible(&mut self, view: ViewId, visible: bool) {
        if let Some(placement) = self.entries.get_mut(&view) {
            placement.visible = visible;
        }
    }

    pub fn remove(&mut self, view: ViewId) {
        self.entries.shift_remove(&view);
    }
}

impl ViewportProbe for StaticViewport {
    fn is_visible(&self, view: ViewId) -> bool {
        self.entries
            .get(&view)
            .map(|placement| placement.visible)
            .unwrap_or(true)
    }

    fn scroll_container(&self, view: ViewId) -> Option<ContainerId> {
        self.entries
            .get(&view)
            .and_then(|placement| placement.container)
    }
}
