//! Slot assignment over linear pane chains of arbitrary depth.

use paneflow_core::{Constraint, Context, Key, NavArg, PaneBuilder, Role};
use paneflow_scene::{Slot, resolve_session_value};

use proptest::prelude::*;

#[derive(Debug)]
struct Screen(usize);
impl NavArg for Screen {}

/// A constraint whose panes form a single chain `main > pane1 > pane2 > ...`
/// of `depth` nested positions under the base.
fn chain_constraint(depth: usize) -> Constraint {
    fn nest(pane: PaneBuilder, remaining: usize, level: usize) -> PaneBuilder {
        if remaining == 0 {
            pane
        } else {
            pane.pane(&format!("pane{level}"), |child| {
                nest(child, remaining - 1, level + 1)
            })
        }
    }
    Constraint::builder("Chain", "main", "dialog")
        .pane("pane1", |pane| nest(pane, depth - 1, 2))
        .build()
        .expect("valid fixture")
}

/// One session walking the chain: the base plus `count - 1` nested panes.
fn walk(constraint: &Constraint, count: usize) -> Vec<Key> {
    let mut context = Context::specific("home", constraint.id());
    let mut keys = vec![Key::of(Screen(0), context.clone())];
    for depth in 1..count {
        let role = Role::Pane {
            priority: 0,
            chain: vec![0; depth],
        };
        context = context.next(Some(role), None);
        keys.push(Key::of(Screen(depth), context.clone()));
    }
    keys
}

proptest! {
    /// Whatever the grid width, the deepest screen the session reached is
    /// always on display: either in its own slot or collapsed into the
    /// last one. Shallower screens keep their slots, unreached roles stay
    /// empty, and the overlay slot is untouched.
    #[test]
    fn deepest_screen_is_always_visible(
        depth in 1usize..6,
        panes in 1usize..5,
        reached in 1usize..7,
    ) {
        let constraint = chain_constraint(depth);
        let roles = depth + 1;
        let reached = reached.min(roles);
        let keys = walk(&constraint, reached);

        let snapshot = resolve_session_value(&keys, &constraint, panes);
        let shown = panes.min(roles);
        prop_assert_eq!(snapshot.pane_count(), shown);
        prop_assert_eq!(snapshot.size(), reached);

        let deepest_slot = reached.min(shown) - 1;
        prop_assert_eq!(
            snapshot.get(Slot::Pane(deepest_slot)),
            Some(keys[reached - 1].id())
        );
        for slot in 0..deepest_slot {
            prop_assert_eq!(snapshot.get(Slot::Pane(slot)), Some(keys[slot].id()));
        }
        for slot in reached.min(shown)..shown {
            prop_assert_eq!(snapshot.get(Slot::Pane(slot)), None);
        }
        prop_assert_eq!(snapshot.get(Slot::Overlay), None);
    }
}
