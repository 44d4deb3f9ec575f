#![forbid(unsafe_code)]

//! Back-stack reconciliation.
//!
//! `navigate` places a new entry according to its session and role rather
//! than blindly appending: root entries of known `Specific` sessions are
//! restored from the parking area, already-live sessions are brought to the
//! front, and pane entries are spliced in next to the sibling or parent
//! they extend. `pop` is the inverse, with an adjacency guard that refuses
//! to orphan an entry pushed directly on top of the target.

use rustc_hash::FxHashSet;

use paneflow_core::{Context, Key, Role, Session};

/// What `navigate` did with the submitted key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// The key was placed into the stack at its computed position.
    Inserted,
    /// A parked `Specific` session chain was moved back, key discarded.
    Restored,
    /// A live session chain was moved to the top, key discarded.
    BroughtToFront,
    /// An existing role subtree was removed and the key pushed fresh.
    Restarted,
    /// The key had no valid position; the stack is unchanged.
    Rejected,
}

/// What `pop` did with the targeted entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopOutcome {
    /// The entry (and any role descendants) left the stack.
    Removed,
    /// A `Specific` session chain was moved to the parking area.
    Parked,
    /// The target was missing, shadowed, or guarded; nothing changed.
    Rejected,
}

/// Ordered logical history plus a parking area for suspended sessions.
#[derive(Debug, Default)]
pub struct BackStack {
    active: Vec<Key>,
    inactive: Vec<Key>,
}

impl BackStack {
    /// An empty stack. Seed it with [`BackStack::rebase`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A stack rooted at `root`, which must be a `Base` role-root.
    #[must_use]
    pub fn rooted(root: Key) -> Self {
        let mut stack = Self::new();
        stack.rebase(root);
        stack
    }

    /// Live entries, bottom first.
    #[must_use]
    pub fn active(&self) -> &[Key] {
        &self.active
    }

    /// Parked entries, in parking order.
    #[must_use]
    pub fn inactive(&self) -> &[Key] {
        &self.inactive
    }

    /// Session of the topmost live entry.
    #[must_use]
    pub fn active_session(&self) -> Option<&Session> {
        self.active.last().map(|key| &key.context().session)
    }

    /// Context idents of every entry, live or parked. The messenger uses
    /// this set to drop state owned by screens that no longer exist.
    #[must_use]
    pub fn live_idents(&self) -> FxHashSet<u64> {
        self.active
            .iter()
            .chain(self.inactive.iter())
            .map(|key| key.context().ident())
            .collect()
    }

    /// Drop all history and start over from `root`. Rejects anything that
    /// is not a `Base` role-root.
    pub fn rebase(&mut self, root: Key) -> bool {
        if root.context().root_role() != Some(&Role::Base) {
            return false;
        }
        tracing::debug!(
            session = %root.context().session.identifier(),
            "rebase"
        );
        self.active.clear();
        self.inactive.clear();
        self.active.push(root);
        true
    }

    /// Place `key` into the stack.
    pub fn navigate(&mut self, key: Key) -> NavOutcome {
        let context = key.context().clone();
        let session = &context.session;

        // Root entries of named sessions resume existing history instead
        // of duplicating it.
        if matches!(session, Session::Specific(_) | Session::Managed(_))
            && context.root_role() == Some(&Role::Base)
        {
            if matches!(session, Session::Specific(_)) {
                let parked =
                    drain_matching(&mut self.inactive, |k| k.context().session == *session);
                if !parked.is_empty() {
                    tracing::debug!(
                        session = %session.identifier(),
                        entries = parked.len(),
                        "navigate: restored parked session"
                    );
                    self.active.extend(parked);
                    return NavOutcome::Restored;
                }
            }

            let live = drain_matching(&mut self.active, |k| k.context().session == *session);
            if !live.is_empty() {
                tracing::debug!(
                    session = %session.identifier(),
                    entries = live.len(),
                    "navigate: brought session to front"
                );
                self.active.extend(live);
                return NavOutcome::BroughtToFront;
            }
        }

        let same_session_top = self
            .active
            .last()
            .is_some_and(|last| last.context().session == *session);

        if !same_session_top {
            // A fresh session only starts at its base root.
            if context.root_role() == Some(&Role::Base) {
                tracing::debug!(session = %session.identifier(), "navigate: new session");
                self.active.push(key);
                return NavOutcome::Inserted;
            }
            return NavOutcome::Rejected;
        }

        let role_last = self.active.iter().rposition(|k| {
            k.context().session == *session && k.context().role == context.role
        });

        match role_last {
            None => self.insert_role_root(key, &context),
            Some(index) => {
                if context.is_root() {
                    // Restarting a role: its whole subtree goes first.
                    self.active.retain(|k| {
                        !(k.context().session == *session
                            && k.context().role.is_self_or_descendant_of(&context.role))
                    });
                    tracing::debug!(
                        session = %session.identifier(),
                        role = ?context.role,
                        "navigate: restarted role subtree"
                    );
                    self.active.push(key);
                    NavOutcome::Restarted
                } else if self.active[index].context().ident() == context.previous {
                    // Linear continuation of that role's chain.
                    self.active.insert(index + 1, key);
                    NavOutcome::Inserted
                } else {
                    NavOutcome::Rejected
                }
            }
        }
    }

    /// First entry of a role within the active session. `Base` and
    /// `Overlay` roots go on top; a `Pane` root is spliced in after the
    /// subtree of the sibling or parent it extends.
    fn insert_role_root(&mut self, key: Key, context: &Context) -> NavOutcome {
        if !context.is_root() {
            return NavOutcome::Rejected;
        }

        let (priority, chain) = match &context.role {
            Role::Base | Role::Overlay => {
                self.active.push(key);
                return NavOutcome::Inserted;
            }
            Role::Pane { priority, chain } => (*priority, chain.clone()),
        };

        let session = &context.session;
        let session_roles = || {
            self.active
                .iter()
                .filter(|k| k.context().session == *session)
                .map(|k| &k.context().role)
        };

        // A pane anchors after its highest lower-priority sibling, or
        // after its parent when it is the first child.
        let anchor = session_roles()
            .filter(|role| role.priority_chain() == chain && role.priority() < priority)
            .max_by_key(|role| role.priority())
            .or_else(|| session_roles().find(|role| role.priority_path() == chain))
            .cloned();

        let Some(anchor) = anchor else {
            return NavOutcome::Rejected;
        };

        let Some(anchor_end) = self
            .active
            .iter()
            .rposition(|k| k.context().role.is_self_or_descendant_of(&anchor))
        else {
            return NavOutcome::Rejected;
        };

        self.active.insert(anchor_end + 1, key);
        NavOutcome::Inserted
    }

    /// Remove the entry for `context`, and with a role-root its whole
    /// subtree. A root `Specific` base entry parks its session instead.
    pub fn pop(&mut self, context: &Context) -> PopOutcome {
        let session_id = context.session.identifier();

        let top_matches = self
            .active
            .last()
            .is_some_and(|last| last.context().session.identifier() == session_id);
        if !top_matches {
            return PopOutcome::Rejected;
        }

        if context.is_root() {
            if matches!(context.session, Session::Specific(_))
                && context.root_role() == Some(&Role::Base)
            {
                let chain = drain_matching(&mut self.active, |k| {
                    k.context().session.identifier() == session_id
                });
                if !chain.is_empty() {
                    tracing::debug!(
                        session = %session_id,
                        entries = chain.len(),
                        "pop: parked session"
                    );
                    self.inactive.extend(chain);
                    return PopOutcome::Parked;
                }
            }

            let before = self.active.len();
            self.active.retain(|k| {
                !(k.context().session.identifier() == session_id
                    && k.context().role.is_self_or_descendant_of(&context.role))
            });
            if self.active.len() < before {
                tracing::debug!(
                    session = %session_id,
                    removed = before - self.active.len(),
                    "pop: removed role subtree"
                );
                PopOutcome::Removed
            } else {
                PopOutcome::Rejected
            }
        } else {
            let Some(target) = self.active.iter().rposition(|k| k.context() == context) else {
                return PopOutcome::Rejected;
            };

            // Never remove an entry the one above it was opened from.
            if let Some(next) = self.active.get(target + 1) {
                if next.context().previous == context.ident() {
                    return PopOutcome::Rejected;
                }
            }

            self.active.remove(target);
            PopOutcome::Removed
        }
    }

    /// Pop the topmost entry. `None` means the stack is already empty and
    /// the host should take over (typically by exiting).
    pub fn back(&mut self) -> Option<PopOutcome> {
        let context = self.active.last()?.context().clone();
        Some(self.pop(&context))
    }

    /// Force out a role and its descendants from the active session.
    /// `Base` cannot be excluded; use [`BackStack::pop`] on the root.
    pub fn exclude_role(&mut self, session: &Session, role: &Role) -> bool {
        if *role == Role::Base {
            return false;
        }
        let top_matches = self
            .active
            .last()
            .is_some_and(|last| last.context().session == *session);
        if !top_matches {
            return false;
        }

        let session_id = session.identifier();
        let before = self.active.len();
        self.active.retain(|k| {
            !(k.context().session.identifier() == session_id
                && k.context().role.is_self_or_descendant_of(role))
        });
        let removed = self.active.len() < before;
        if removed {
            tracing::debug!(session = %session_id, role = ?role, "excluded role");
        }
        removed
    }
}

fn drain_matching(entries: &mut Vec<Key>, pred: impl Fn(&Key) -> bool) -> Vec<Key> {
    let mut taken = Vec::new();
    let mut index = 0;
    while index < entries.len() {
        if pred(&entries[index]) {
            taken.push(entries.remove(index));
        } else {
            index += 1;
        }
    }
    taken
}
