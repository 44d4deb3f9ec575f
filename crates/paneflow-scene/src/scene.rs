#![forbid(unsafe_code)]

//! A resolved scene: one session rendered through one layout.

use paneflow_core::{Constraint, Key, Session};

use crate::layout::SceneLayout;
use crate::resolve::resolve_session_value;
use crate::snapshot::PaneSnapshot;

/// What one back step would look like, computed ahead of time so a
/// predictive gesture can preview it before committing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackPreview {
    /// Pane assignment after the step. [`PaneSnapshot::EMPTY`] means the
    /// step leaves the session, and backing out should exit instead.
    pub snapshot: PaneSnapshot,
    /// How many `back()` calls committing the gesture must issue.
    pub back_steps: usize,
}

/// The active session bound to the layout that renders it.
#[derive(Debug, Clone)]
pub struct Scene {
    key: String,
    constraint: Constraint,
    layout: SceneLayout,
    active_session: Session,
    session_keys: Vec<Key>,
    all_keys: Vec<Key>,
}

impl Scene {
    pub(crate) fn new(
        strategy_name: &str,
        constraint: Constraint,
        layout: SceneLayout,
        active_session: Session,
        session_keys: Vec<Key>,
        all_keys: Vec<Key>,
    ) -> Self {
        let key = format!(
            "{} of {} - {}",
            constraint.id(),
            strategy_name,
            active_session.identifier()
        );
        Self {
            key,
            constraint,
            layout,
            active_session,
            session_keys,
            all_keys,
        }
    }

    /// Stable identity of the scene: constraint, strategy and session.
    /// While the key is unchanged a host can animate within the scene
    /// instead of swapping it out.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }

    #[must_use]
    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    #[must_use]
    pub fn active_session(&self) -> &Session {
        &self.active_session
    }

    /// Entries of the active session, in stack order.
    #[must_use]
    pub fn session_keys(&self) -> &[Key] {
        &self.session_keys
    }

    /// Every live entry, all sessions included.
    #[must_use]
    pub fn all_keys(&self) -> &[Key] {
        &self.all_keys
    }

    /// Current pane assignment for this scene.
    #[must_use]
    pub fn session_value(&self) -> PaneSnapshot {
        resolve_session_value(&self.session_keys, &self.constraint, self.layout.pane_count())
    }

    /// Pane assignment after one back step, for predictive previews.
    #[must_use]
    pub fn back_preview(&self) -> BackPreview {
        let remaining = &self.session_keys[..self.session_keys.len().saturating_sub(1)];
        let snapshot = if remaining.is_empty() {
            PaneSnapshot::EMPTY
        } else {
            resolve_session_value(remaining, &self.constraint, self.layout.pane_count())
        };
        BackPreview {
            snapshot,
            back_steps: if self.all_keys.is_empty() { 0 } else { 1 },
        }
    }
}
