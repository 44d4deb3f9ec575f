#![forbid(unsafe_code)]

//! Pane placement for paneflow.
//!
//! The stack crate decides *what* is alive; this crate decides *where* it
//! shows. [`resolve::resolve_session_value`] maps one session's entries
//! onto a fixed number of pane slots, collapsing overflow roles into the
//! deepest slot. [`StrategyChain`] picks which registered strategy (and
//! therefore which [`SceneLayout`]) handles the current stack, producing a
//! [`Scene`] the host renders from.

pub mod layout;
pub mod resolve;
pub mod scene;
pub mod snapshot;
pub mod strategy;

pub use layout::{LayoutCapability, SceneLayout};
pub use resolve::resolve_session_value;
pub use scene::{BackPreview, Scene};
pub use snapshot::{PaneSnapshot, Slot};
pub use strategy::{SceneStrategy, StrategyChain};
