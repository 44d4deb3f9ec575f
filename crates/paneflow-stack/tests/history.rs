//! End-to-end history scenarios across several sessions.

use paneflow_core::{Context, Key, NavArg, Role, Session};
use paneflow_stack::{BackStack, NavOutcome, PopOutcome};

use proptest::prelude::*;

#[derive(Debug)]
struct Screen(&'static str);
impl NavArg for Screen {}

fn specific_root(name: &str) -> Key {
    Key::of(Screen("root"), Context::specific(name, "Main"))
}

fn chained(stack: &BackStack, name: &'static str) -> Key {
    let top = stack.active().last().expect("non-empty").context().clone();
    Key::of(Screen(name), top.next(None, None))
}

fn pane(stack: &BackStack, priority: u32) -> Key {
    let top = stack.active().last().expect("non-empty").context().clone();
    let role = Role::Pane {
        priority,
        chain: vec![0],
    };
    Key::of(Screen("pane"), top.next(Some(role), None))
}

#[test]
fn two_sessions_park_restore_and_unwind() {
    let mut stack = BackStack::rooted(specific_root("mail"));
    assert_eq!(stack.navigate(chained(&stack, "inbox")), NavOutcome::Inserted);
    assert_eq!(stack.navigate(chained(&stack, "thread")), NavOutcome::Inserted);

    // Switch to a second session: its base root starts alongside.
    assert_eq!(stack.navigate(specific_root("settings")), NavOutcome::Inserted);
    assert_eq!(stack.navigate(chained(&stack, "account")), NavOutcome::Inserted);
    assert_eq!(stack.active().len(), 5);

    // Back out of the settings detail, then park the settings session.
    assert_eq!(stack.back(), Some(PopOutcome::Removed));
    assert_eq!(stack.back(), Some(PopOutcome::Parked));
    assert_eq!(stack.active().len(), 3);
    assert_eq!(stack.inactive().len(), 1);
    assert_eq!(
        stack.active_session().map(Session::identifier),
        Some("specific:mail".to_owned())
    );

    // The mail session is intact where we left it.
    assert_eq!(stack.back(), Some(PopOutcome::Removed));
    assert_eq!(stack.back(), Some(PopOutcome::Removed));

    // Returning to settings restores the parked root.
    assert_eq!(stack.navigate(specific_root("settings")), NavOutcome::Restored);
    assert_eq!(
        stack.active_session().map(Session::identifier),
        Some("specific:settings".to_owned())
    );

    // Unwind everything.
    assert_eq!(stack.back(), Some(PopOutcome::Parked));
    assert_eq!(stack.back(), Some(PopOutcome::Parked));
    assert!(stack.active().is_empty());
    assert_eq!(stack.back(), None);
}

#[test]
fn pane_subtree_falls_with_its_root() {
    let mut stack = BackStack::rooted(specific_root("mail"));
    assert_eq!(stack.navigate(pane(&stack, 0)), NavOutcome::Inserted);
    assert_eq!(stack.navigate(chained(&stack, "pane-detail")), NavOutcome::Inserted);
    assert_eq!(stack.navigate(pane(&stack, 1)), NavOutcome::Inserted);
    assert_eq!(stack.active().len(), 4);

    // Popping pane 0's root removes its chain but leaves pane 1.
    let pane0_root = stack.active()[1].context().clone();
    assert_eq!(stack.pop(&pane0_root), PopOutcome::Removed);
    assert_eq!(stack.active().len(), 2);
    assert_eq!(stack.active()[1].context().role.priority(), 1);
}

#[test]
fn parked_chains_restore_in_original_order() {
    let root = specific_root("mail");
    let mut stack = BackStack::rooted(root.clone());
    assert_eq!(stack.navigate(chained(&stack, "inbox")), NavOutcome::Inserted);
    assert_eq!(stack.navigate(chained(&stack, "thread")), NavOutcome::Inserted);
    let order: Vec<u64> = stack
        .active()
        .iter()
        .map(|k| k.context().ident())
        .collect();

    // One root pop parks the whole three-entry chain at once.
    assert_eq!(stack.navigate(specific_root("settings")), NavOutcome::Inserted);
    assert_eq!(stack.navigate(specific_root("mail")), NavOutcome::BroughtToFront);
    assert_eq!(stack.pop(root.context()), PopOutcome::Parked);
    assert_eq!(stack.inactive().len(), 3);

    // Restoring puts it back verbatim, idents and all.
    assert_eq!(stack.navigate(specific_root("mail")), NavOutcome::Restored);
    let restored: Vec<u64> = stack
        .active()
        .iter()
        .skip(1)
        .map(|k| k.context().ident())
        .collect();
    assert_eq!(restored, order);
}

#[test]
fn live_idents_cover_parked_entries() {
    let mut stack = BackStack::rooted(specific_root("mail"));
    let parked_ident = stack.active()[0].context().ident();

    assert_eq!(stack.navigate(specific_root("settings")), NavOutcome::Inserted);
    let settings = stack.active().last().expect("entry").context().clone();
    assert_eq!(stack.navigate(specific_root("mail")), NavOutcome::BroughtToFront);
    assert_eq!(stack.pop(&settings), PopOutcome::Rejected);

    // Park mail under settings' nose.
    let mail_root = stack.active().last().expect("entry").context().clone();
    assert_eq!(stack.pop(&mail_root), PopOutcome::Parked);

    let idents = stack.live_idents();
    assert!(idents.contains(&parked_ident));
    assert!(idents.contains(&settings.ident()));
}

proptest! {
    /// Every linear push is undone by exactly one back().
    #[test]
    fn linear_pushes_are_locally_invertible(depth in 1usize..12) {
        let mut stack = BackStack::rooted(specific_root("mail"));
        for _ in 0..depth {
            let snapshot: Vec<u64> =
                stack.active().iter().map(|k| k.context().ident()).collect();

            let key = chained(&stack, "step");
            prop_assert_eq!(stack.navigate(key), NavOutcome::Inserted);
            prop_assert_eq!(stack.back(), Some(PopOutcome::Removed));

            let restored: Vec<u64> =
                stack.active().iter().map(|k| k.context().ident()).collect();
            prop_assert_eq!(snapshot, restored);

            // Re-apply the push to keep descending.
            let key = chained(&stack, "step");
            prop_assert_eq!(stack.navigate(key), NavOutcome::Inserted);
        }
        prop_assert_eq!(stack.active().len(), depth + 1);
    }
}
