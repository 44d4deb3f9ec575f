#![forbid(unsafe_code)]

//! Per-screen provenance: session, role, constraint and predecessor link.
//!
//! A [`Context`] proves where a screen came from and where it stands. It is
//! immutable: stack mutation always replaces whole keys, never edits a
//! context in place. Successor contexts are derived with [`Context::next`]
//! or, at the intent level, [`Context::apply`].
//!
//! # Invariants
//!
//! 1. `is_root() ⇔ previous == role ident` — this is the sole marker of
//!    "first entry for this role in this session".
//! 2. The factory constructors always produce Base roots.
//! 3. `next` with a role switch mints a root of the new role; without one it
//!    chains `previous` to this context's identity.

use serde::{Deserialize, Serialize};

use crate::caller::Caller;
use crate::error::ConfigError;
use crate::hash::fx_hash64;
use crate::resolver::ConstraintResolver;
use crate::role::Role;
use crate::session::Session;

/// The provenance record of one screen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Context {
    /// The history scope this screen belongs to.
    pub session: Session,
    /// The structural position this screen occupies.
    pub role: Role,
    /// Id of the constraint governing this screen.
    pub constraint_id: String,
    /// Identity of the predecessor context, or of `role` itself when this
    /// context is the role's first entry.
    pub previous: u64,
    /// Return address for one-shot results; [`Caller::EMPTY`] if none.
    pub caller: Caller,
}

impl Context {
    /// Root context for a restorable named session.
    #[must_use]
    pub fn specific(name: &str, constraint_id: &str) -> Self {
        Self::root(Session::Specific(name.to_owned()), constraint_id, Caller::EMPTY)
    }

    /// Root context for a non-restorable named session.
    #[must_use]
    pub fn managed(name: &str, constraint_id: &str) -> Self {
        Self::root(Session::Managed(name.to_owned()), constraint_id, Caller::EMPTY)
    }

    /// Root context for a fresh ephemeral session, optionally carrying a
    /// return address.
    #[must_use]
    pub fn general(constraint_id: &str, caller: Option<Caller>) -> Self {
        Self::root(
            Session::general(),
            constraint_id,
            caller.unwrap_or(Caller::EMPTY),
        )
    }

    fn root(session: Session, constraint_id: &str, caller: Caller) -> Self {
        Self {
            session,
            role: Role::Base,
            constraint_id: constraint_id.to_owned(),
            previous: Role::Base.ident(),
            caller,
        }
    }

    /// Structural 64-bit identity of this context. Successors chain to it
    /// and the messenger addresses mailboxes by it.
    #[must_use]
    pub fn ident(&self) -> u64 {
        fx_hash64(self)
    }

    /// Whether this context is the first entry for its role in its session.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.previous == self.role.ident()
    }

    /// The role this context is the root of, if any.
    #[must_use]
    pub fn root_role(&self) -> Option<&Role> {
        self.is_root().then_some(&self.role)
    }

    /// Derive the successor context.
    ///
    /// Switching roles mints a root of the new role; staying in-role chains
    /// `previous` to this context's identity. The caller defaults to
    /// [`Caller::EMPTY`].
    #[must_use]
    pub fn next(&self, role: Option<Role>, caller: Option<Caller>) -> Self {
        let caller = caller.unwrap_or(Caller::EMPTY);
        match role {
            Some(role) => Self {
                session: self.session.clone(),
                previous: role.ident(),
                role,
                constraint_id: self.constraint_id.clone(),
                caller,
            },
            None => Self {
                session: self.session.clone(),
                role: self.role.clone(),
                constraint_id: self.constraint_id.clone(),
                previous: self.ident(),
                caller,
            },
        }
    }

    /// Translate a navigation intent into the successor context.
    ///
    /// `Expand` consults the governing constraint (a configuration lookup
    /// that can fail); every other action is pure.
    pub fn apply(
        &self,
        action: NavAction,
        resolver: &ConstraintResolver,
        connect: Option<Connect>,
    ) -> Result<Self, ConfigError> {
        let caller = connect.map(|connect| Caller::new(self.ident(), connect.payload));
        Ok(match action {
            NavAction::Stack => self.next(None, caller),
            NavAction::Expand { priority } => {
                let expanded = if self.is_root() {
                    let constraint = resolver.get(&self.constraint_id)?;
                    self.role.expand(constraint, priority)
                } else {
                    None
                };
                self.next(expanded, caller)
            }
            NavAction::Overlay => {
                if matches!(self.role, Role::Overlay) {
                    self.next(None, caller)
                } else {
                    self.next(Some(Role::Overlay), caller)
                }
            }
            NavAction::Replace => self.clone(),
        })
    }
}

/// A navigation intent, translated by [`Context::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// Push onto the current role's chain.
    Stack,
    /// Open a deeper pane at (up to) the given sibling priority; falls back
    /// to in-role stacking when the tree cannot expand.
    Expand { priority: u32 },
    /// Show as the overlay (or stack within it when already there).
    Overlay,
    /// Reuse the current context unchanged.
    Replace,
}

/// The connection a caller attaches when expecting a result back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Connect {
    /// Opaque data echoed back inside the result message.
    pub payload: Option<String>,
}

impl Connect {
    /// A connection carrying the given payload.
    #[must_use]
    pub fn with_payload(payload: &str) -> Self {
        Self {
            payload: Some(payload.to_owned()),
        }
    }
}
