#![forbid(unsafe_code)]

//! History keys: an argument value bound to a context.
//!
//! A [`Key`] is the unit of history. The same argument shown twice — say,
//! a detail view on the left pane and again on the right — yields two keys
//! distinguished purely by their contexts. Keys are immutable once created.
//!
//! Identity ([`KeyId`]) derives from the context: `previous` links make each
//! stack position structurally unique, so the argument value does not
//! participate.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::context::Context;

/// A screen argument: the data a screen is opened with.
///
/// Implemented by the hosting application's per-screen argument types. The
/// `Any` supertrait is what lets the [`ConstraintResolver`] dispatch on the
/// concrete type and messenger listeners filter by subtype.
///
/// [`ConstraintResolver`]: crate::resolver::ConstraintResolver
pub trait NavArg: Any + fmt::Debug {}

/// Stable identity of a key, derived from its context.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct KeyId(u64);

impl KeyId {
    /// Wrap a raw identity value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw identity value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// The unit of history: an argument plus the context it lives in.
#[derive(Clone)]
pub struct Key {
    arg: Arc<dyn NavArg>,
    context: Context,
}

impl Key {
    /// Bind an argument to a freshly computed context.
    #[must_use]
    pub fn new(arg: Arc<dyn NavArg>, context: Context) -> Self {
        Self { arg, context }
    }

    /// Convenience constructor taking the argument by value.
    #[must_use]
    pub fn of(arg: impl NavArg, context: Context) -> Self {
        Self::new(Arc::new(arg), context)
    }

    /// The screen argument.
    #[must_use]
    pub fn arg(&self) -> &dyn NavArg {
        &*self.arg
    }

    /// Shared handle to the argument, for re-binding under a new context.
    #[must_use]
    pub fn arg_handle(&self) -> Arc<dyn NavArg> {
        Arc::clone(&self.arg)
    }

    /// The key's logical situation.
    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Identity for snapshots and messenger addressing.
    #[must_use]
    pub fn id(&self) -> KeyId {
        KeyId(self.context.ident())
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("arg", &self.arg)
            .field("context", &self.context)
            .finish()
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.context == other.context
    }
}

impl Eq for Key {}
