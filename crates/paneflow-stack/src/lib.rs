#![forbid(unsafe_code)]

//! Logical navigation history for paneflow.
//!
//! [`BackStack`] holds the ordered list of live entries plus a parking area
//! for suspended sessions. It knows nothing about layout: entries are placed
//! and removed purely by their session and role, and the scene layer reads
//! the resulting order to decide what is visible.
//!
//! # Invariants
//!
//! - Every mutation reports its outcome; a `Rejected` outcome means the
//!   stack was not touched at all.
//! - A role-root entry owns its descendants: removing it removes every
//!   entry of the same session whose role sits below it.
//! - Only `Specific` sessions are parked; parked chains keep their internal
//!   order and are restored verbatim.

pub mod stack;

pub use stack::{BackStack, NavOutcome, PopOutcome};
