#![forbid(unsafe_code)]

//! Paneflow public facade crate.
//!
//! Paneflow is a navigation engine for applications whose screen layout
//! adapts to the display: the same logical history renders as one pane on
//! a small surface and several panes side by side on a large one. This
//! crate re-exports the stable surface of the internal crates and offers a
//! lightweight prelude for day-to-day usage.
//!
//! The moving parts, bottom up:
//!
//! - a [`Constraint`] tree describes which panes a layout *can* show;
//! - the [`BackStack`] is the logical history, placing entries by session
//!   and [`Role`] rather than as a flat list;
//! - a [`StrategyChain`] picks the [`Scene`] that renders the active
//!   session, and [`resolve_session_value`] maps its entries onto pane
//!   slots;
//! - the [`Navigator`] drives all of it and keeps the [`Messenger`] in
//!   sync with the history.

// --- Core re-exports -------------------------------------------------------

pub use paneflow_core::{
    Caller, ConfigError, Connect, Constraint, ConstraintBuilder, ConstraintNode,
    ConstraintResolver, Context, Key, KeyId, Metadata, MetadataBuilder, NavAction, NavArg,
    Registry, Role, Session,
};

// --- History re-exports ----------------------------------------------------

pub use paneflow_stack::{BackStack, NavOutcome, PopOutcome};

// --- Scene re-exports ------------------------------------------------------

pub use paneflow_scene::{
    BackPreview, LayoutCapability, PaneSnapshot, Scene, SceneLayout, SceneStrategy, Slot,
    StrategyChain, resolve_session_value,
};

// --- Messaging re-exports --------------------------------------------------

pub use paneflow_messenger::{
    BoardGuard, MailboxGuard, Messenger, NavMessage, NavResult,
};

// --- Runtime re-exports ----------------------------------------------------

pub use paneflow_runtime::{
    GestureAdapter, GestureEvent, Navigator, SharedTransition, SwipeEdge, TransitionState,
    TransitionType,
};

/// Standard result type for paneflow configuration APIs.
pub type Result<T> = std::result::Result<T, ConfigError>;

pub mod prelude {
    pub use crate::{
        BackStack, ConfigError, Connect, Constraint, ConstraintResolver, Context, Key,
        LayoutCapability, NavAction, NavArg, NavOutcome, Navigator, PaneSnapshot, PopOutcome,
        Registry, Result, Role, Scene, SceneLayout, SceneStrategy, Session, Slot, StrategyChain,
    };

    pub use crate::{core, messenger, runtime, scene, stack};
}

pub use paneflow_core as core;
pub use paneflow_messenger as messenger;
pub use paneflow_runtime as runtime;
pub use paneflow_scene as scene;
pub use paneflow_stack as stack;
