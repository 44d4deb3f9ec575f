#![forbid(unsafe_code)]

//! Predictive back-gesture handling.
//!
//! The host feeds raw gesture events; the adapter scrubs a
//! [`SharedTransition`] against the scene's back preview so the previous
//! state is visible mid-gesture, and reports how many history steps to
//! commit when the gesture completes.

use std::time::Duration;

use paneflow_scene::{PaneSnapshot, Scene};

use crate::transition::{SharedTransition, SwipeEdge};

/// One event of a back gesture, as reported by the host platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// The finger moved; `fraction` is overall progress in [0, 1].
    Progress { fraction: f32, edge: SwipeEdge },
    /// The gesture was released past the threshold: go back.
    Completed,
    /// The gesture was released early or interrupted: stay put.
    Cancelled,
}

/// Couples a gesture stream to one transition.
#[derive(Debug, Clone)]
pub struct GestureAdapter {
    transition: SharedTransition,
    /// How long the settle-back animation runs after a cancel.
    settle: Duration,
}

impl GestureAdapter {
    #[must_use]
    pub fn new(transition: SharedTransition, settle: Duration) -> Self {
        Self { transition, settle }
    }

    /// Whether a back gesture may start at all: backing out of an empty
    /// preview means leaving the app, which the host decides on its own.
    #[must_use]
    pub fn back_enabled(scene: &Scene) -> bool {
        scene.back_preview().snapshot != PaneSnapshot::EMPTY
    }

    /// Apply one gesture event against `scene`. Returns the number of
    /// `back()` steps the caller must now perform (non-zero only for a
    /// completed gesture).
    pub fn handle(&self, scene: &Scene, event: GestureEvent) -> usize {
        let preview = scene.back_preview();
        match event {
            GestureEvent::Progress { fraction, edge } => {
                self.transition.seek_to(fraction, preview.snapshot, edge);
                0
            }
            GestureEvent::Cancelled => {
                // Glide back to where the session actually is.
                self.transition.animate_to(scene.session_value(), self.settle);
                0
            }
            GestureEvent::Completed => {
                tracing::debug!(steps = preview.back_steps, "back gesture committed");
                self.transition.snap_to(preview.snapshot);
                preview.back_steps
            }
        }
    }
}
