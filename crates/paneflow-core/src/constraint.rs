#![forbid(unsafe_code)]

//! Constraint trees: the declared skeleton of allowed screen positions.
//!
//! A [`Constraint`] is the logical structure a class of screens obeys: a
//! finite tree of named pane positions rooted at the base, plus one
//! designated overlay name. It is pure data — physical layouts with fewer
//! panes than the tree has positions collapse the excess at scene-resolution
//! time, the tree itself never changes.
//!
//! Trees are built through [`Constraint::builder`], which assigns sibling
//! priorities by declaration order, so the order panes appear in code *is*
//! their logical priority.
//!
//! # Invariants
//!
//! 1. Node names are unique within one constraint, and distinct from the
//!    overlay name (validated by `build`).
//! 2. Sibling priorities are `0..n` in declaration order.
//! 3. The tree is finite and acyclic by construction.
//!
//! # Failure Modes
//!
//! `build()` fails with [`ConfigError::DuplicatePaneName`]; lookups of
//! absent names fail with [`ConfigError::RoleNotFound`]. Both are wiring
//! mistakes, not runtime conditions.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::role::Role;

/// One node of a constraint tree. Empty `children` means a leaf pane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintNode {
    /// Logical pane name, unique within the constraint.
    pub name: String,
    /// Sibling priority under the parent node.
    pub priority: u32,
    /// Child positions in declaration order.
    pub children: Vec<ConstraintNode>,
}

/// A declared tree of allowed roles plus its overlay name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    id: String,
    tree: ConstraintNode,
    overlay: String,
}

impl Constraint {
    /// Start building a constraint with the given id, base pane name and
    /// overlay name.
    #[must_use]
    pub fn builder(id: &str, base: &str, overlay: &str) -> ConstraintBuilder {
        ConstraintBuilder {
            id: id.to_owned(),
            overlay: overlay.to_owned(),
            root: ConstraintNode {
                name: base.to_owned(),
                priority: 0,
                children: Vec::new(),
            },
        }
    }

    /// The constraint's id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The designated overlay pane name.
    #[must_use]
    pub fn overlay_name(&self) -> &str {
        &self.overlay
    }

    /// The tree rooted at the base position.
    #[must_use]
    pub fn tree(&self) -> &ConstraintNode {
        &self.tree
    }

    /// Resolve a logical pane name to its [`Role`] within this constraint.
    ///
    /// Depth-first search accumulating the priority path. The overlay and
    /// base names short-circuit to their fixed roles.
    pub fn find_role(&self, name: &str) -> Result<Role, ConfigError> {
        if name == self.overlay {
            return Ok(Role::Overlay);
        }
        if name == self.tree.name {
            return Ok(Role::Base);
        }
        find_path(&self.tree, &[], name)
            .and_then(|path| {
                let (priority, chain) = path.split_last()?;
                Some(Role::Pane {
                    priority: *priority,
                    chain: chain.to_vec(),
                })
            })
            .ok_or_else(|| ConfigError::RoleNotFound {
                name: name.to_owned(),
                constraint_id: self.id.clone(),
            })
    }

    /// Descend the tree along a role's priority path.
    ///
    /// Returns `None` for the overlay (it sits outside the tree) and for
    /// paths that leave the declared structure.
    #[must_use]
    pub fn find_tree(&self, role: &Role) -> Option<&ConstraintNode> {
        match role {
            Role::Overlay => None,
            Role::Base => Some(&self.tree),
            Role::Pane { .. } => {
                let path = role.priority_path();
                let mut node = &self.tree;
                for priority in &path[1..] {
                    node = node
                        .children
                        .iter()
                        .find(|child| child.priority == *priority)?;
                }
                Some(node)
            }
        }
    }

    /// The role plus all its declared descendants, in declaration
    /// (pre-)order. Empty when the role has no node in the tree.
    #[must_use]
    pub fn flat_roles(&self, role: &Role) -> Vec<Role> {
        let Some(node) = self.find_tree(role) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        collect_roles(node, &role.priority_chain(), &mut out);
        out
    }
}

fn find_path(node: &ConstraintNode, chain: &[u32], name: &str) -> Option<Vec<u32>> {
    let mut path = chain.to_vec();
    path.push(node.priority);
    if node.name == name {
        return Some(path);
    }
    node.children
        .iter()
        .find_map(|child| find_path(child, &path, name))
}

fn collect_roles(node: &ConstraintNode, chain: &[u32], out: &mut Vec<Role>) {
    let mut path = chain.to_vec();
    path.push(node.priority);
    let role = match path.split_last() {
        Some((priority, chain)) if !chain.is_empty() => Role::Pane {
            priority: *priority,
            chain: chain.to_vec(),
        },
        _ => Role::Base,
    };
    out.push(role);
    for child in &node.children {
        collect_roles(child, &path, out);
    }
}

/// Builds a [`Constraint`], assigning sibling priorities by declaration
/// order.
#[derive(Debug)]
pub struct ConstraintBuilder {
    id: String,
    overlay: String,
    root: ConstraintNode,
}

impl ConstraintBuilder {
    /// Declare a pane directly under the base, with nested children.
    #[must_use]
    pub fn pane(mut self, name: &str, nest: impl FnOnce(PaneBuilder) -> PaneBuilder) -> Self {
        let priority = self.root.children.len() as u32;
        let child = nest(PaneBuilder::new(name, priority));
        self.root.children.push(child.node);
        self
    }

    /// Declare a childless pane directly under the base.
    #[must_use]
    pub fn leaf(self, name: &str) -> Self {
        self.pane(name, |pane| pane)
    }

    /// Validate and produce the immutable constraint.
    pub fn build(self) -> Result<Constraint, ConfigError> {
        let mut seen = vec![self.overlay.clone()];
        check_unique(&self.root, &mut seen, &self.id)?;
        Ok(Constraint {
            id: self.id,
            tree: self.root,
            overlay: self.overlay,
        })
    }
}

/// Builds one nested pane subtree.
#[derive(Debug)]
pub struct PaneBuilder {
    node: ConstraintNode,
}

impl PaneBuilder {
    fn new(name: &str, priority: u32) -> Self {
        Self {
            node: ConstraintNode {
                name: name.to_owned(),
                priority,
                children: Vec::new(),
            },
        }
    }

    /// Declare a child pane, with nested children.
    #[must_use]
    pub fn pane(mut self, name: &str, nest: impl FnOnce(PaneBuilder) -> PaneBuilder) -> Self {
        let priority = self.node.children.len() as u32;
        let child = nest(PaneBuilder::new(name, priority));
        self.node.children.push(child.node);
        self
    }

    /// Declare a childless child pane.
    #[must_use]
    pub fn leaf(self, name: &str) -> Self {
        self.pane(name, |pane| pane)
    }
}

fn check_unique(
    node: &ConstraintNode,
    seen: &mut Vec<String>,
    constraint_id: &str,
) -> Result<(), ConfigError> {
    if seen.iter().any(|name| name == &node.name) {
        return Err(ConfigError::DuplicatePaneName {
            name: node.name.clone(),
            constraint_id: constraint_id.to_owned(),
        });
    }
    seen.push(node.name.clone());
    for child in &node.children {
        check_unique(child, seen, constraint_id)?;
    }
    Ok(())
}
