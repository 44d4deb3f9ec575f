#![forbid(unsafe_code)]

//! Point-in-time pane assignment.

use serde::{Deserialize, Serialize};

use paneflow_core::KeyId;

/// A renderable position: one of the indexed panes, or the overlay that
/// floats above all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    Pane(usize),
    Overlay,
}

/// Which entry sits in each slot at one instant.
///
/// Snapshots are the states a transition animates between; equality is
/// exact so an unchanged assignment never restarts an animation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaneSnapshot {
    pane_keys: Vec<Option<KeyId>>,
    overlay_key: Option<KeyId>,
    size: usize,
}

impl PaneSnapshot {
    /// The snapshot of no entries at all. Backing all the way out of a
    /// session previews to this.
    pub const EMPTY: Self = Self {
        pane_keys: Vec::new(),
        overlay_key: None,
        size: 0,
    };

    /// Assemble a snapshot directly. Engine code goes through
    /// [`resolve_session_value`]; this is for hosts replaying persisted
    /// assignments.
    ///
    /// [`resolve_session_value`]: crate::resolve::resolve_session_value
    #[must_use]
    pub fn new(
        pane_keys: Vec<Option<KeyId>>,
        overlay_key: Option<KeyId>,
        size: usize,
    ) -> Self {
        Self {
            pane_keys,
            overlay_key,
            size,
        }
    }

    /// The entry occupying `slot`, if any.
    #[must_use]
    pub fn get(&self, slot: Slot) -> Option<KeyId> {
        match slot {
            Slot::Pane(index) => self.pane_keys.get(index).copied().flatten(),
            Slot::Overlay => self.overlay_key,
        }
    }

    /// Number of pane slots this snapshot was resolved for.
    #[must_use]
    pub fn pane_count(&self) -> usize {
        self.pane_keys.len()
    }

    /// Depth of the session stack the snapshot was taken from. Transitions
    /// compare sizes to tell a pop from a forward navigation.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}
