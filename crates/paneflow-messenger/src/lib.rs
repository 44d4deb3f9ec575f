#![forbid(unsafe_code)]

//! Screen-to-screen messaging for paneflow.
//!
//! Two channels, both addressed by context ident rather than by reference,
//! so neither side ever holds the other alive:
//!
//! - **mailbox**: one-shot results posted back to the [`Caller`] that
//!   opened a screen. The last unconsumed message is buffered, so a result
//!   sent while the caller is parked is delivered when it returns.
//! - **board**: a screen publishes its current state; any screen watching
//!   that ident observes the latest value and every change.
//!
//! [`Messenger::sync`] drops everything owned by idents that left the
//! stack; the navigator calls it after each history mutation.
//!
//! [`Caller`]: paneflow_core::Caller

pub mod message;
pub mod messenger;

pub use message::{NavMessage, NavResult};
pub use messenger::{BoardGuard, MailboxGuard, Messenger};
