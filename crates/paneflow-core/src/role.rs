#![forbid(unsafe_code)]

//! Structural roles: where a screen sits inside a constraint tree.
//!
//! A [`Role`] locates a screen among the positions a [`Constraint`] declares:
//! the base screen, a nested pane, or the overlay. Pane positions are
//! addressed by a *priority path* — the sequence of sibling priorities
//! walked from the base node down to the pane's own node.
//!
//! # Invariants
//!
//! 1. `priority_path() == priority_chain() + [priority()]`.
//! 2. Sibling panes declared under one parent carry strictly increasing
//!    priorities starting at 0 in declaration order (enforced by the
//!    constraint builder).
//! 3. The overlay never acts as an ancestor, and nothing descends from it;
//!    its `usize::MAX` level makes it sort behind every pane in visible
//!    order and ahead in seek order.
//!
//! # Failure Modes
//!
//! [`Role::expand`] returns `None` (not an error) when the tree offers no
//! child at or below the requested priority — callers degrade gracefully to
//! in-role stacking.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::constraint::Constraint;
use crate::error::ConfigError;
use crate::hash::fx_hash64;

/// A screen's structural position within a constraint tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Role {
    /// The root position of a session. Priority 0, empty chain, level 0.
    Base,
    /// A nested pane position addressed by its ancestor priorities.
    Pane {
        /// Sibling priority of this pane under its parent.
        priority: u32,
        /// Priorities of the ancestors, from the base node downward.
        chain: Vec<u32>,
    },
    /// The single overlay position. Fixed chain `[0]`, infinite depth.
    Overlay,
}

impl Role {
    /// The role's own sibling priority.
    #[must_use]
    pub fn priority(&self) -> u32 {
        match self {
            Self::Base | Self::Overlay => 0,
            Self::Pane { priority, .. } => *priority,
        }
    }

    /// Ancestor priorities from the base node down to this role's parent.
    #[must_use]
    pub fn priority_chain(&self) -> Vec<u32> {
        match self {
            Self::Base => Vec::new(),
            Self::Pane { chain, .. } => chain.clone(),
            Self::Overlay => vec![0],
        }
    }

    /// Full tree address: the chain followed by the role's own priority.
    #[must_use]
    pub fn priority_path(&self) -> Vec<u32> {
        let mut path = self.priority_chain();
        path.push(self.priority());
        path
    }

    /// Tree depth. Base is 0, panes count their ancestors, the overlay is
    /// `usize::MAX` so it always sorts last in visible order.
    #[must_use]
    pub fn level(&self) -> usize {
        match self {
            Self::Base => 0,
            Self::Pane { chain, .. } => chain.len(),
            Self::Overlay => usize::MAX,
        }
    }

    /// Structural 64-bit identity of this role.
    #[must_use]
    pub fn ident(&self) -> u64 {
        fx_hash64(self)
    }

    /// Whether `other` is a strict ancestor of this role.
    ///
    /// The overlay's path descends from the base, so overlay entries are
    /// removed together with their session root; nothing ever descends from
    /// the overlay itself.
    #[must_use]
    pub fn is_descendant_of(&self, other: &Role) -> bool {
        if matches!(other, Role::Overlay) {
            return false;
        }
        let own = self.priority_path();
        let ancestor = other.priority_path();
        own.len() > ancestor.len() && own[..ancestor.len()] == ancestor[..]
    }

    /// Whether this role is a strict ancestor of `other`.
    #[must_use]
    pub fn is_ancestor_of(&self, other: &Role) -> bool {
        if matches!(self, Role::Overlay) {
            return false;
        }
        other.is_descendant_of(self)
    }

    /// Equality or strict descent.
    #[must_use]
    pub fn is_self_or_descendant_of(&self, other: &Role) -> bool {
        self == other || self.is_descendant_of(other)
    }

    /// Equality or strict ancestry.
    #[must_use]
    pub fn is_self_or_ancestor_of(&self, other: &Role) -> bool {
        self == other || self.is_ancestor_of(other)
    }

    /// Extend this role one level deeper within `constraint`.
    ///
    /// Selects the child with the greatest priority `<= requested` — the
    /// floor match that lets "add two extra panes" degrade to one extra pane
    /// on a narrower tree. Returns `None` if the node has no children or
    /// none satisfies the bound.
    #[must_use]
    pub fn expand(&self, constraint: &Constraint, requested: u32) -> Option<Role> {
        let node = constraint.find_tree(self)?;
        let best = node
            .children
            .iter()
            .filter(|child| child.priority <= requested)
            .max_by_key(|child| child.priority)?;
        Some(Role::Pane {
            priority: best.priority,
            chain: self.priority_path(),
        })
    }

    /// Resolve the logical pane name this role occupies in `constraint`.
    pub fn constraint_name<'c>(&self, constraint: &'c Constraint) -> Result<&'c str, ConfigError> {
        match self {
            Self::Overlay => Ok(constraint.overlay_name()),
            _ => constraint
                .find_tree(self)
                .map(|node| node.name.as_str())
                .ok_or_else(|| ConfigError::RoleNotFound {
                    name: format!("{self:?}"),
                    constraint_id: constraint.id().to_owned(),
                }),
        }
    }
}

/// Priority at the first point where the two paths diverge; 0 when one path
/// is a prefix of the other.
fn diverging_priority_cmp(a: &Role, b: &Role) -> Ordering {
    let path_a = a.priority_path();
    let path_b = b.priority_path();
    let common = path_a
        .iter()
        .zip(path_b.iter())
        .take_while(|(x, y)| x == y)
        .count();
    let pa = path_a.get(common).copied().unwrap_or(0);
    let pb = path_b.get(common).copied().unwrap_or(0);
    pa.cmp(&pb)
}

/// Visual stacking comparator: deeper and higher-priority roles are in
/// front. Orders by `(level asc, first-diverging priority asc)`.
#[must_use]
pub fn visible_order_cmp(a: &Role, b: &Role) -> Ordering {
    a.level()
        .cmp(&b.level())
        .then_with(|| diverging_priority_cmp(a, b))
}

/// Seek comparator: the reverse of visible order over one constraint's role
/// set. Orders by `(first-diverging priority desc, level desc)`; used when
/// searching for the most relevant live descendant of a collapsed slot.
#[must_use]
pub fn seek_order_cmp(a: &Role, b: &Role) -> Ordering {
    diverging_priority_cmp(a, b)
        .reverse()
        .then_with(|| a.level().cmp(&b.level()).reverse())
}

/// Stable-sort roles into visual stacking order.
pub fn sort_by_visible_order(roles: &mut [Role]) {
    roles.sort_by(visible_order_cmp);
}

/// Stable-sort roles into seek (fallback resolution) order.
pub fn sort_by_seek_order(roles: &mut [Role]) {
    roles.sort_by(seek_order_cmp);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pane(priority: u32, chain: &[u32]) -> Role {
        Role::Pane {
            priority,
            chain: chain.to_vec(),
        }
    }

    #[test]
    fn priority_paths() {
        assert_eq!(Role::Base.priority_path(), vec![0]);
        assert_eq!(Role::Overlay.priority_path(), vec![0, 0]);
        assert_eq!(pane(1, &[0]).priority_path(), vec![0, 1]);
        assert_eq!(pane(2, &[0, 1]).priority_path(), vec![0, 1, 2]);
    }

    #[test]
    fn ancestry_is_strict_prefix() {
        let support = pane(0, &[0]);
        let extra = pane(0, &[0, 0]);

        assert!(support.is_descendant_of(&Role::Base));
        assert!(extra.is_descendant_of(&support));
        assert!(extra.is_descendant_of(&Role::Base));
        assert!(Role::Base.is_ancestor_of(&extra));

        assert!(!support.is_descendant_of(&support));
        assert!(support.is_self_or_descendant_of(&support));
        assert!(!support.is_descendant_of(&extra));
    }

    #[test]
    fn overlay_sits_outside_the_lattice() {
        let support = pane(0, &[0]);

        // Nothing descends from the overlay, and it is never an ancestor.
        assert!(!support.is_descendant_of(&Role::Overlay));
        assert!(!Role::Overlay.is_ancestor_of(&support));
        assert!(!Role::Overlay.is_ancestor_of(&Role::Base));

        // The overlay itself still dies with the session base.
        assert!(Role::Overlay.is_descendant_of(&Role::Base));
    }

    #[test]
    fn visible_order_depth_then_priority() {
        let mut roles = vec![pane(1, &[0]), Role::Overlay, pane(0, &[0]), Role::Base];
        sort_by_visible_order(&mut roles);
        assert_eq!(
            roles,
            vec![Role::Base, pane(0, &[0]), pane(1, &[0]), Role::Overlay]
        );
    }

    #[test]
    fn seek_order_reverses_visible_order() {
        let mut visible = vec![
            Role::Base,
            pane(0, &[0]),
            pane(1, &[0]),
            pane(0, &[0, 1]),
            pane(1, &[0, 1]),
        ];
        let mut seek = visible.clone();
        sort_by_visible_order(&mut visible);
        sort_by_seek_order(&mut seek);
        visible.reverse();
        assert_eq!(visible, seek);
    }

    proptest! {
        /// Seek order is the exact reverse of visible order over any role
        /// set a constraint tree can declare: sibling fans at each level,
        /// with deeper nesting extending the highest-priority sibling (the
        /// same shape the overflow collapse in scene resolution assumes).
        #[test]
        fn sort_orders_are_reverses(fans in proptest::collection::vec(1u32..4, 1..4)) {
            let mut roles = vec![Role::Base];
            let mut chain = vec![0u32];
            for fan in fans {
                for priority in 0..fan {
                    roles.push(Role::Pane { priority, chain: chain.clone() });
                }
                chain.push(fan - 1);
            }

            let mut visible = roles.clone();
            let mut seek = roles;
            sort_by_visible_order(&mut visible);
            sort_by_seek_order(&mut seek);
            visible.reverse();
            prop_assert_eq!(visible, seek);
        }
    }
}
