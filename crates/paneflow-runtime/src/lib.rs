#![forbid(unsafe_code)]

//! Runtime layer of paneflow.
//!
//! [`Navigator`] ties the engine together: it owns the back stack, the
//! messenger, the constraint resolver and the registry, and exposes the
//! operations screens actually call. [`TransitionState`] animates between
//! pane snapshots, and the [`gesture`] module drives it from a predictive
//! back gesture.

pub mod gesture;
pub mod navigator;
pub mod transition;

pub use gesture::{GestureAdapter, GestureEvent};
pub use navigator::Navigator;
pub use transition::{SharedTransition, SwipeEdge, TransitionState, TransitionType};
