#![forbid(unsafe_code)]

//! The messaging hub.
//!
//! Handlers run outside the internal borrow, so a handler may call back
//! into the messenger (publish from inside a subscription, for example)
//! without deadlocking on the shared state.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rustc_hash::{FxHashMap, FxHashSet};

use paneflow_core::Caller;

use crate::message::{NavMessage, NavResult};

type ReceiverFn = dyn Fn(&dyn NavMessage) -> Option<bool>;
type SubscriberFn = dyn Fn(&dyn Any);

#[derive(Default)]
struct Mailbox {
    buffered: Option<Rc<dyn NavMessage>>,
    receivers: Vec<(u64, Rc<ReceiverFn>)>,
}

#[derive(Default)]
struct Board {
    current: Option<Rc<dyn Any>>,
    subscribers: Vec<(u64, Rc<SubscriberFn>)>,
}

#[derive(Default)]
struct Inner {
    mailboxes: FxHashMap<u64, Mailbox>,
    boards: FxHashMap<u64, FxHashMap<TypeId, Board>>,
    next_guard: u64,
}

impl Inner {
    fn guard_id(&mut self) -> u64 {
        self.next_guard += 1;
        self.next_guard
    }
}

/// Hub for both messaging channels. Cloning shares the same hub.
#[derive(Clone, Default)]
pub struct Messenger {
    inner: Rc<RefCell<Inner>>,
}

impl Messenger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Post a one-shot result to `caller`'s mailbox. A no-op for
    /// [`Caller::EMPTY`]. The message stays buffered (latest wins) until a
    /// receiver consumes it.
    pub fn send(&self, caller: &Caller, result: &dyn NavResult) {
        if caller.is_empty() {
            return;
        }
        let message: Rc<dyn NavMessage> =
            Rc::from(result.create_message(caller.payload.clone()));

        let receivers = {
            let mut inner = self.inner.borrow_mut();
            let mailbox = inner.mailboxes.entry(caller.hash).or_default();
            mailbox.buffered = Some(Rc::clone(&message));
            mailbox.receivers.clone()
        };

        tracing::debug!(target_hash = caller.hash, message = ?message, "send");
        // Every receiver sees the message; consumption only decides
        // whether the buffer is cleared afterwards.
        let mut consumed = false;
        for (_, receiver) in &receivers {
            consumed |= receiver(&*message) == Some(true);
        }
        if consumed {
            let mut inner = self.inner.borrow_mut();
            if let Some(mailbox) = inner.mailboxes.get_mut(&caller.hash) {
                mailbox.buffered = None;
            }
        }
    }

    /// Listen on the mailbox at `hash` for messages of type `M`. A handler
    /// returning `true` consumes the buffered message; `false` leaves it
    /// for another receiver. A buffered unconsumed message is replayed
    /// immediately.
    #[must_use]
    pub fn receive<M, F>(&self, hash: u64, handler: F) -> MailboxGuard
    where
        M: NavMessage,
        F: Fn(&M) -> bool + 'static,
    {
        let receiver: Rc<ReceiverFn> = Rc::new(move |message: &dyn NavMessage| {
            let any: &dyn Any = message;
            any.downcast_ref::<M>().map(&handler)
        });

        let (id, replay) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.guard_id();
            let mailbox = inner.mailboxes.entry(hash).or_default();
            mailbox.receivers.push((id, Rc::clone(&receiver)));
            (id, mailbox.buffered.clone())
        };

        if let Some(message) = replay {
            if receiver(&*message) == Some(true) {
                let mut inner = self.inner.borrow_mut();
                if let Some(mailbox) = inner.mailboxes.get_mut(&hash) {
                    mailbox.buffered = None;
                }
            }
        }

        MailboxGuard {
            inner: Rc::downgrade(&self.inner),
            hash,
            id,
        }
    }

    /// Post `state` as the current value of the board at `hash`. Equal
    /// values are suppressed so subscribers only see changes.
    pub fn publish<T>(&self, hash: u64, state: T)
    where
        T: Any + PartialEq,
    {
        let (value, subscribers) = {
            let mut inner = self.inner.borrow_mut();
            let board = inner
                .boards
                .entry(hash)
                .or_default()
                .entry(TypeId::of::<T>())
                .or_default();

            let unchanged = board
                .current
                .as_deref()
                .and_then(<dyn Any>::downcast_ref::<T>)
                == Some(&state);
            if unchanged {
                return;
            }

            let value: Rc<dyn Any> = Rc::new(state);
            board.current = Some(Rc::clone(&value));
            (value, board.subscribers.clone())
        };

        for (_, subscriber) in &subscribers {
            subscriber(&*value);
        }
    }

    /// Observe the board at `hash` for values of type `T`. The current
    /// value, if any, is delivered immediately; afterwards the handler
    /// fires on every change.
    #[must_use]
    pub fn subscribe<T, F>(&self, hash: u64, handler: F) -> BoardGuard
    where
        T: Any,
        F: Fn(&T) + 'static,
    {
        let subscriber: Rc<SubscriberFn> = Rc::new(move |value: &dyn Any| {
            if let Some(state) = value.downcast_ref::<T>() {
                handler(state);
            }
        });

        let type_id = TypeId::of::<T>();
        let (id, current) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.guard_id();
            let board = inner
                .boards
                .entry(hash)
                .or_default()
                .entry(type_id)
                .or_default();
            board.subscribers.push((id, Rc::clone(&subscriber)));
            (id, board.current.clone())
        };

        if let Some(value) = current {
            subscriber(&*value);
        }

        BoardGuard {
            inner: Rc::downgrade(&self.inner),
            hash,
            type_id,
            id,
        }
    }

    /// Drop every mailbox and board whose owner is not in `live`. Called
    /// after each history mutation with the stack's live idents.
    pub fn sync(&self, live: &FxHashSet<u64>) {
        let mut inner = self.inner.borrow_mut();
        let before = inner.mailboxes.len() + inner.boards.len();
        inner.mailboxes.retain(|hash, _| live.contains(hash));
        inner.boards.retain(|hash, _| live.contains(hash));
        let dropped = before - (inner.mailboxes.len() + inner.boards.len());
        if dropped > 0 {
            tracing::debug!(dropped, "messenger sync");
        }
    }
}

impl std::fmt::Debug for Messenger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Messenger")
            .field("mailboxes", &inner.mailboxes.len())
            .field("boards", &inner.boards.len())
            .finish()
    }
}

/// Keeps one mailbox receiver registered; dropping it unregisters. The
/// buffered message, if any, stays for other receivers.
#[must_use = "the receiver is unregistered when the guard drops"]
#[derive(Debug)]
pub struct MailboxGuard {
    inner: Weak<RefCell<Inner>>,
    hash: u64,
    id: u64,
}

impl Drop for MailboxGuard {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            let mut inner = inner.borrow_mut();
            if let Some(mailbox) = inner.mailboxes.get_mut(&self.hash) {
                mailbox.receivers.retain(|(id, _)| *id != self.id);
            }
        }
    }
}

/// Keeps one board subscriber registered; dropping it unregisters.
#[must_use = "the subscription ends when the guard drops"]
#[derive(Debug)]
pub struct BoardGuard {
    inner: Weak<RefCell<Inner>>,
    hash: u64,
    type_id: TypeId,
    id: u64,
}

impl Drop for BoardGuard {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            let mut inner = inner.borrow_mut();
            if let Some(board) = inner
                .boards
                .get_mut(&self.hash)
                .and_then(|boards| boards.get_mut(&self.type_id))
            {
                board.subscribers.retain(|(id, _)| *id != self.id);
            }
        }
    }
}
