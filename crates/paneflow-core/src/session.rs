#![forbid(unsafe_code)]

//! Session identity: the unit of history isolation.
//!
//! Every entry in the back stack belongs to exactly one session, and all
//! stack algorithms treat entries of different sessions as belonging to
//! independent histories. Three kinds exist:
//!
//! - [`Session::Specific`] — a named singleton whose whole history is parked
//!   (not deleted) when its root is popped, so a later navigation restores
//!   the exact prior sequence.
//! - [`Session::Managed`] — a named singleton without the parking behavior;
//!   popping its root deletes the history.
//! - [`Session::General`] — an ephemeral one-shot scope with a generated
//!   name; every [`Session::general`] call mints a distinct session.
//!
//! # Invariants
//!
//! 1. `identifier()` uniquely determines session equality: two sessions are
//!    equal iff their identifiers are equal.
//! 2. Identifiers follow the registry grammar `"<type>:<name>"` with
//!    `type ∈ {specific, managed, general}`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Separator between the session type tag and the session name.
pub const IDENTIFIER_SEPARATOR: char = ':';

/// Type tag for [`Session::Specific`].
pub const KIND_SPECIFIC: &str = "specific";
/// Type tag for [`Session::Managed`].
pub const KIND_MANAGED: &str = "managed";
/// Type tag for [`Session::General`].
pub const KIND_GENERAL: &str = "general";

/// An independent, isolated navigation history scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum Session {
    /// Named singleton, poppable-to-inactive and restorable.
    Specific(String),
    /// Named singleton, not restorable.
    Managed(String),
    /// Ephemeral one-shot scope with a generated name.
    General(String),
}

impl Session {
    /// Create a fresh ephemeral session with a generated unique name.
    #[must_use]
    pub fn general() -> Self {
        Self::General(Uuid::new_v4().to_string())
    }

    /// The session's name component.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Specific(name) | Self::Managed(name) | Self::General(name) => name,
        }
    }

    /// The session's type tag (`"specific"`, `"managed"` or `"general"`).
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Specific(_) => KIND_SPECIFIC,
            Self::Managed(_) => KIND_MANAGED,
            Self::General(_) => KIND_GENERAL,
        }
    }

    /// The full identifier, `"<type>:<name>"`.
    ///
    /// Equality on sessions is equivalent to equality on identifiers.
    #[must_use]
    pub fn identifier(&self) -> String {
        format!("{}{}{}", self.kind(), IDENTIFIER_SEPARATOR, self.name())
    }
}
