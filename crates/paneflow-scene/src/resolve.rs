#![forbid(unsafe_code)]

//! Mapping a logical session stack onto physical pane slots.

use rustc_hash::{FxHashMap, FxHashSet};

use paneflow_core::{
    Constraint, Key, KeyId, Role, sort_by_seek_order, sort_by_visible_order,
};

use crate::snapshot::PaneSnapshot;

/// Compute which entry fills each of `pane_count` slots.
///
/// Roles are laid out in visible order and the first `pane_count` of them
/// each claim a slot. Roles that do not fit are collapsed into the slot of
/// their parent, where the deepest content wins: those roles are looked up
/// through the whole subtree in seek order, so the slot always shows the
/// most specific screen the session has reached. The overlay is assigned
/// independently of the pane grid.
#[must_use]
pub fn resolve_session_value(
    entries: &[Key],
    constraint: &Constraint,
    pane_count: usize,
) -> PaneSnapshot {
    let mut visible = constraint.flat_roles(&Role::Base);
    sort_by_visible_order(&mut visible);

    let shown = pane_count.min(visible.len());
    if shown == 0 {
        return PaneSnapshot::EMPTY;
    }
    let (pane_order, overflow) = visible.split_at(shown);
    let last = &pane_order[shown - 1];

    // Overflow roles sharing the last slot's parent fold into that slot.
    let drops: Vec<Role> = overflow
        .iter()
        .filter(|role| role.priority_chain() == last.priority_chain())
        .cloned()
        .collect();

    let seek_roles: FxHashSet<&Role> = drops.iter().chain(Some(last)).collect();

    // The slot holding the collapsed group's parent also hosts the drops.
    let parent_index = pane_order
        .iter()
        .rposition(|role| role.priority_path() == last.priority_chain());

    // Latest entry wins per role.
    let mut latest: FxHashMap<&Role, KeyId> = FxHashMap::default();
    for key in entries {
        latest.insert(&key.context().role, key.id());
    }

    let lookup = |role: &Role| -> Option<KeyId> {
        if seek_roles.contains(role) {
            let mut subtree = constraint.flat_roles(role);
            sort_by_seek_order(&mut subtree);
            subtree.iter().find_map(|candidate| latest.get(candidate).copied())
        } else {
            latest.get(role).copied()
        }
    };

    let pane_keys: Vec<Option<KeyId>> = pane_order
        .iter()
        .enumerate()
        .map(|(index, role)| {
            if parent_index == Some(index) {
                drops
                    .iter()
                    .chain(Some(role))
                    .find_map(|candidate| lookup(candidate))
            } else {
                lookup(role)
            }
        })
        .collect();

    let overlay_key = latest.get(&Role::Overlay).copied();

    PaneSnapshot::new(pane_keys, overlay_key, entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Slot;
    use paneflow_core::{Context, NavArg};

    #[derive(Debug)]
    struct Screen(&'static str);
    impl NavArg for Screen {}

    /// `Main` is `main > support > extra` with overlay `dialog`.
    fn constraint() -> Constraint {
        Constraint::builder("Main", "main", "dialog")
            .pane("support", |support| support.leaf("extra"))
            .build()
            .expect("valid fixture")
    }

    fn entry_chain(constraint: &Constraint) -> Vec<Key> {
        let base = Context::specific("home", constraint.id());
        let support = base.next(
            Some(Role::Pane {
                priority: 0,
                chain: vec![0],
            }),
            None,
        );
        let extra = support.next(
            Some(Role::Pane {
                priority: 0,
                chain: vec![0, 0],
            }),
            None,
        );
        vec![
            Key::of(Screen("main"), base),
            Key::of(Screen("support"), support),
            Key::of(Screen("extra"), extra),
        ]
    }

    #[test]
    fn three_panes_spread_the_session_out() {
        let constraint = constraint();
        let entries = entry_chain(&constraint);

        let snapshot = resolve_session_value(&entries, &constraint, 3);
        assert_eq!(snapshot.get(Slot::Pane(0)), Some(entries[0].id()));
        assert_eq!(snapshot.get(Slot::Pane(1)), Some(entries[1].id()));
        assert_eq!(snapshot.get(Slot::Pane(2)), Some(entries[2].id()));
        assert_eq!(snapshot.size(), 3);
    }

    #[test]
    fn two_panes_collapse_the_support_subtree() {
        let constraint = constraint();
        let entries = entry_chain(&constraint);

        // Slots: main, then support; extra does not fit, so the support
        // slot shows the most specific screen of its subtree.
        let snapshot = resolve_session_value(&entries, &constraint, 2);
        assert_eq!(snapshot.get(Slot::Pane(0)), Some(entries[0].id()));
        assert_eq!(snapshot.get(Slot::Pane(1)), Some(entries[2].id()));
        assert_eq!(snapshot.get(Slot::Pane(2)), None);
    }

    #[test]
    fn single_pane_shows_only_the_deepest_screen() {
        let constraint = constraint();
        let entries = entry_chain(&constraint);

        let snapshot = resolve_session_value(&entries, &constraint, 1);
        assert_eq!(snapshot.get(Slot::Pane(0)), Some(entries[2].id()));
        assert_eq!(snapshot.pane_count(), 1);
    }

    #[test]
    fn overlay_rides_above_the_grid() {
        let constraint = constraint();
        let mut entries = entry_chain(&constraint);
        let overlay_context = entries[2]
            .context()
            .clone()
            .next(Some(Role::Overlay), None);
        entries.push(Key::of(Screen("dialog"), overlay_context));

        let snapshot = resolve_session_value(&entries, &constraint, 1);
        assert_eq!(snapshot.get(Slot::Overlay), Some(entries[3].id()));
        // The overlay never displaces pane content.
        assert_eq!(snapshot.get(Slot::Pane(0)), Some(entries[2].id()));
    }

    /// `Sibling` is `main > [support, extra]` with overlay `dialog`: both
    /// panes sit directly under the base, so past-capacity siblings fold
    /// into the base slot rather than a nested parent.
    fn sibling_constraint() -> Constraint {
        Constraint::builder("Sibling", "main", "dialog")
            .leaf("support")
            .leaf("extra")
            .build()
            .expect("valid fixture")
    }

    fn sibling_entries(constraint: &Constraint) -> Vec<Key> {
        let base = Context::specific("home", constraint.id());
        let support = base.next(
            Some(Role::Pane {
                priority: 0,
                chain: vec![0],
            }),
            None,
        );
        let extra = support.next(
            Some(Role::Pane {
                priority: 1,
                chain: vec![0],
            }),
            None,
        );
        vec![
            Key::of(Screen("main"), base),
            Key::of(Screen("support"), support),
            Key::of(Screen("extra"), extra),
        ]
    }

    #[test]
    fn three_panes_give_each_sibling_a_slot() {
        let constraint = sibling_constraint();
        let entries = sibling_entries(&constraint);

        let snapshot = resolve_session_value(&entries, &constraint, 3);
        assert_eq!(snapshot.get(Slot::Pane(0)), Some(entries[0].id()));
        assert_eq!(snapshot.get(Slot::Pane(1)), Some(entries[1].id()));
        assert_eq!(snapshot.get(Slot::Pane(2)), Some(entries[2].id()));
    }

    #[test]
    fn overflowing_sibling_folds_into_the_base_slot() {
        let constraint = sibling_constraint();
        let entries = sibling_entries(&constraint);

        // Slots: main, support. The dropped extra shares support's parent,
        // so the base slot hosts the collapsed candidates [extra, main].
        let snapshot = resolve_session_value(&entries, &constraint, 2);
        assert_eq!(snapshot.get(Slot::Pane(0)), Some(entries[2].id()));
        assert_eq!(snapshot.get(Slot::Pane(1)), Some(entries[1].id()));

        // With no live extra entry the base slot falls back to main.
        let snapshot = resolve_session_value(&entries[..2], &constraint, 2);
        assert_eq!(snapshot.get(Slot::Pane(0)), Some(entries[0].id()));
        assert_eq!(snapshot.get(Slot::Pane(1)), Some(entries[1].id()));
    }

    #[test]
    fn single_pane_shows_the_highest_priority_sibling() {
        let constraint = sibling_constraint();
        let entries = sibling_entries(&constraint);

        let snapshot = resolve_session_value(&entries, &constraint, 1);
        assert_eq!(snapshot.get(Slot::Pane(0)), Some(entries[2].id()));

        let snapshot = resolve_session_value(&entries[..2], &constraint, 1);
        assert_eq!(snapshot.get(Slot::Pane(0)), Some(entries[1].id()));
    }

    #[test]
    fn missing_roles_leave_empty_slots() {
        let constraint = constraint();
        let entries = entry_chain(&constraint);

        let snapshot = resolve_session_value(&entries[..1], &constraint, 3);
        assert_eq!(snapshot.get(Slot::Pane(0)), Some(entries[0].id()));
        assert_eq!(snapshot.get(Slot::Pane(1)), None);
        assert_eq!(snapshot.get(Slot::Pane(2)), None);
    }
}
