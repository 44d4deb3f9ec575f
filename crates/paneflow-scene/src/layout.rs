#![forbid(unsafe_code)]

//! Layout declarations and display capabilities.

use serde::{Deserialize, Serialize};

/// One way to render a constraint: how many pane slots it fills and which
/// strategies may pick it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneLayout {
    constraint_id: String,
    strategy_names: Vec<String>,
    pane_count: usize,
}

impl SceneLayout {
    #[must_use]
    pub fn new(
        constraint_id: &str,
        strategy_names: &[&str],
        pane_count: usize,
    ) -> Self {
        Self {
            constraint_id: constraint_id.to_owned(),
            strategy_names: strategy_names.iter().map(|s| (*s).to_owned()).collect(),
            pane_count,
        }
    }

    #[must_use]
    pub fn constraint_id(&self) -> &str {
        &self.constraint_id
    }

    /// How many pane slots this layout renders.
    #[must_use]
    pub fn pane_count(&self) -> usize {
        self.pane_count
    }

    /// Whether this layout serves `constraint_id` under `strategy_name`.
    #[must_use]
    pub fn matches(&self, constraint_id: &str, strategy_name: &str) -> bool {
        self.constraint_id == constraint_id
            && self.strategy_names.iter().any(|name| name == strategy_name)
    }
}

/// What the host display can currently offer, fed to strategies so they
/// can decline when the screen is too small for their layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutCapability {
    /// Horizontal pane partitions the display fits side by side.
    pub partitions: usize,
}

impl LayoutCapability {
    #[must_use]
    pub fn new(partitions: usize) -> Self {
        Self { partitions }
    }
}
