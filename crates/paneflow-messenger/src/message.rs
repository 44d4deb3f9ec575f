#![forbid(unsafe_code)]

//! Message traits for the mailbox channel.

use std::any::Any;
use std::fmt;

/// A concrete message delivered to a mailbox. Receivers downcast to the
/// message type they asked for; other types stay buffered for someone else.
pub trait NavMessage: Any + fmt::Debug {}

/// A result kind a screen can post back to its caller. Implementations
/// bundle the caller's payload into their message type, so the receiver
/// gets both what happened and the request data it attached.
pub trait NavResult {
    fn create_message(&self, payload: Option<String>) -> Box<dyn NavMessage>;
}
