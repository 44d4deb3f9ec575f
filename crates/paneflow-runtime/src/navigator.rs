#![forbid(unsafe_code)]

//! The navigator: one object owning the whole engine state.
//!
//! Screens never touch the back stack or the messenger directly. Every
//! operation here takes the acting screen's [`Key`] as its viewpoint,
//! derives successor contexts from it, and keeps the messenger in sync
//! with the stack after each mutation so state owned by removed screens
//! is reclaimed immediately.
//!
//! The navigator is single-writer: the host serializes calls to it, and
//! nothing here locks.

use paneflow_core::{
    Caller, ConfigError, Connect, ConstraintResolver, Context, Key, NavAction, NavArg,
    Registry, Role, Session,
};
use paneflow_messenger::{BoardGuard, MailboxGuard, Messenger, NavMessage, NavResult};
use paneflow_stack::{BackStack, NavOutcome, PopOutcome};

/// Owns the stack, the messenger and the configuration, and mediates every
/// operation between them.
#[derive(Debug)]
pub struct Navigator {
    stack: BackStack,
    messenger: Messenger,
    resolver: ConstraintResolver,
    registry: Registry,
}

impl Navigator {
    #[must_use]
    pub fn new(resolver: ConstraintResolver, registry: Registry) -> Self {
        Self {
            stack: BackStack::new(),
            messenger: Messenger::new(),
            resolver,
            registry,
        }
    }

    #[must_use]
    pub fn stack(&self) -> &BackStack {
        &self.stack
    }

    #[must_use]
    pub fn messenger(&self) -> &Messenger {
        &self.messenger
    }

    #[must_use]
    pub fn resolver(&self) -> &ConstraintResolver {
        &self.resolver
    }

    /// Navigate to a registered entry point by its identifier.
    pub fn start_registered(&mut self, identifier: &str) -> Result<NavOutcome, ConfigError> {
        let key = self.registry.resolve(identifier, &self.resolver)?;
        let outcome = self.stack_navigate(key);
        Ok(self.finish(outcome))
    }

    /// Start a fresh `General` session showing `arg`. With a [`Connect`],
    /// the new session carries a return path to `from`.
    pub fn start_session(
        &mut self,
        from: &Key,
        arg: impl NavArg,
        connect: Option<Connect>,
    ) -> Result<NavOutcome, ConfigError> {
        let constraint_id = self.resolver.resolve_id(&arg)?.to_owned();
        let caller =
            connect.map(|connect| Caller::new(from.context().ident(), connect.payload));
        let context = Context::general(&constraint_id, caller);
        let outcome = self.stack_navigate(Key::of(arg, context));
        Ok(self.finish(outcome))
    }

    /// Navigate from `from` to `arg`, placed according to `action`.
    pub fn navigate(
        &mut self,
        from: &Key,
        arg: impl NavArg,
        action: NavAction,
        connect: Option<Connect>,
    ) -> Result<NavOutcome, ConfigError> {
        let context = from.context().apply(action, &self.resolver, connect)?;
        let outcome = self.stack_navigate(Key::of(arg, context));
        Ok(self.finish(outcome))
    }

    /// Re-navigate a key that is (or was) already in the stack, restarting
    /// its role subtree when it is a role root.
    pub fn reset(&mut self, key: &Key) -> NavOutcome {
        let outcome = self.stack_navigate(key.clone());
        self.finish(outcome)
    }

    /// Remove `key`'s entry (with its role subtree when it is a root).
    pub fn pop(&mut self, key: &Key) -> PopOutcome {
        let outcome = self.stack.pop(key.context());
        self.finish(outcome)
    }

    /// Pop the top entry. `None` signals an empty stack; the host should
    /// exit or ignore.
    pub fn back(&mut self) -> Option<PopOutcome> {
        let outcome = self.stack.back();
        if outcome.is_some() {
            self.sync_messenger();
        }
        outcome
    }

    /// Reset all history onto the registered entry `identifier`.
    pub fn rebase(&mut self, identifier: &str) -> Result<bool, ConfigError> {
        let key = self.registry.resolve(identifier, &self.resolver)?;
        let rebased = self.stack.rebase(key);
        self.sync_messenger();
        Ok(rebased)
    }

    /// Remove a role subtree from the active session without popping
    /// through it.
    pub fn exclude_role(&mut self, session: &Session, role: &Role) -> bool {
        let removed = self.stack.exclude_role(session, role);
        if removed {
            self.sync_messenger();
        }
        removed
    }

    /// Post `result` back to whoever opened `from`. A no-op when the
    /// screen was opened without a [`Connect`].
    pub fn send(&self, from: &Key, result: &dyn NavResult) {
        self.messenger.send(&from.context().caller, result);
    }

    /// Listen for results addressed to `own`.
    #[must_use]
    pub fn receive<M, F>(&self, own: &Key, handler: F) -> MailboxGuard
    where
        M: NavMessage,
        F: Fn(&M) -> bool + 'static,
    {
        self.messenger.receive(own.context().ident(), handler)
    }

    /// Publish `state` on `own`'s board.
    pub fn publish<T>(&self, own: &Key, state: T)
    where
        T: std::any::Any + PartialEq,
    {
        self.messenger.publish(own.context().ident(), state);
    }

    /// Observe the board of the screen `own` was opened from. Typically
    /// paired with [`Navigator::publish`] on the opener's side.
    #[must_use]
    pub fn subscribe<T, F>(&self, own: &Key, handler: F) -> BoardGuard
    where
        T: std::any::Any,
        F: Fn(&T) + 'static,
    {
        self.messenger.subscribe(own.context().caller.hash, handler)
    }

    fn stack_navigate(&mut self, key: Key) -> NavOutcome {
        self.stack.navigate(key)
    }

    fn finish<O>(&mut self, outcome: O) -> O {
        self.sync_messenger();
        outcome
    }

    fn sync_messenger(&self) {
        self.messenger.sync(&self.stack.live_idents());
    }
}
