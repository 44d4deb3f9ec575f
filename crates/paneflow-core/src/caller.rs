#![forbid(unsafe_code)]

//! Return addresses for one-shot results.
//!
//! A [`Caller`] records which context started the current screen, so a
//! result can be posted back through the messenger without either side
//! holding a reference to the other. [`Caller::EMPTY`] (hash 0) means "no
//! return path" and makes `send` a no-op.

use serde::{Deserialize, Serialize};

/// The return address a screen uses to receive one-shot messages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Caller {
    /// Identity hash of the calling context; 0 for no return path.
    pub hash: u64,
    /// Opaque data the caller attached (request id, originating button, ...).
    /// Echoed back inside the result message.
    pub payload: Option<String>,
}

impl Caller {
    /// The empty caller: no return path, `send` targeting it is a no-op.
    pub const EMPTY: Caller = Caller {
        hash: 0,
        payload: None,
    };

    /// A return address for the context with identity `hash`.
    #[must_use]
    pub fn new(hash: u64, payload: Option<String>) -> Self {
        Self { hash, payload }
    }

    /// Whether this caller carries a usable return path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hash == 0
    }
}

impl Default for Caller {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_caller_has_no_return_path() {
        assert!(Caller::EMPTY.is_empty());
        assert!(!Caller::new(42, None).is_empty());
        assert_eq!(Caller::default(), Caller::EMPTY);
    }
}
