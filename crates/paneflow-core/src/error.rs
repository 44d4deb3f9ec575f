#![forbid(unsafe_code)]

//! Configuration errors: wiring mistakes by the integrator.
//!
//! Everything in this enum is fail-fast and unrecoverable at runtime — an
//! unbound argument type, an unknown constraint id, a malformed registry
//! identifier. Runtime state-transition rejections (a navigate that violates
//! adjacency, a double pop) are deliberately *not* errors; those surface as
//! silent status enums on the stack operations.

use std::fmt;

/// A wiring mistake detected while resolving configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An argument type has no constraint binding and no default exists.
    UnboundArgType {
        /// Debug rendering of the offending argument.
        arg: String,
    },
    /// A constraint id was requested that no one registered.
    UnknownConstraint { id: String },
    /// A role or pane name is absent from the constraint tree.
    RoleNotFound { name: String, constraint_id: String },
    /// Two nodes in one constraint tree share a name.
    DuplicatePaneName { name: String, constraint_id: String },
    /// A registry identifier nobody registered.
    UnknownIdentifier { identifier: String },
    /// An identifier that does not follow the `"<type>:<name>"` grammar.
    MalformedIdentifier { identifier: String },
    /// An identifier whose type tag is not `specific`, `managed` or
    /// `general`.
    UnknownSessionType { kind: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnboundArgType { arg } => {
                write!(f, "no constraint bound for argument {arg} and no default provided")
            }
            Self::UnknownConstraint { id } => write!(f, "no constraint registered for id {id:?}"),
            Self::RoleNotFound { name, constraint_id } => {
                write!(f, "role {name:?} not found in constraint {constraint_id:?}")
            }
            Self::DuplicatePaneName { name, constraint_id } => {
                write!(f, "pane name {name:?} declared twice in constraint {constraint_id:?}")
            }
            Self::UnknownIdentifier { identifier } => {
                write!(f, "unknown registry identifier {identifier:?}")
            }
            Self::MalformedIdentifier { identifier } => {
                write!(
                    f,
                    "identifier {identifier:?} does not match \"<type>:<name>\""
                )
            }
            Self::UnknownSessionType { kind } => {
                write!(f, "unknown session type {kind:?} (expected specific, managed or general)")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
