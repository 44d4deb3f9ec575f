#![forbid(unsafe_code)]

//! Hierarchical screen metadata.
//!
//! A flat store keyed by `"constraint:role:identifier"` strings with a
//! four-step fallback on lookup:
//!
//! 1. the exact constraint + role entry,
//! 2. the constraint's default scope,
//! 3. the global default scope,
//! 4. the bare identifier.
//!
//! Role scopes can inherit from one another at build time, so shared
//! settings are declared once. Values are stored type-erased and retrieved
//! by downcast; a type mismatch simply falls through to the next candidate.

use std::any::Any;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::constraint::Constraint;
use crate::error::ConfigError;
use crate::role::Role;

/// Scope name for app-wide settings.
pub const GLOBAL: &str = "global";
/// Scope name for per-constraint defaults.
pub const DEFAULT: &str = "default";

const SEPARATOR: char = ':';

fn entry_key(constraint: &str, role: &str, identifier: &str) -> String {
    format!("{constraint}{SEPARATOR}{role}{SEPARATOR}{identifier}")
}

/// Type-erased hierarchical metadata.
#[derive(Default)]
pub struct Metadata {
    data: FxHashMap<String, Rc<dyn Any>>,
}

impl Metadata {
    /// Start building a metadata store.
    #[must_use]
    pub fn builder() -> MetadataBuilder {
        MetadataBuilder {
            data: FxHashMap::default(),
        }
    }

    /// Look up `identifier` for a role name within a constraint, walking the
    /// fallback chain until a value of type `T` is found.
    #[must_use]
    pub fn get<T: Any>(&self, identifier: &str, role_name: &str, constraint_id: &str) -> Option<&T> {
        let candidates = [
            entry_key(constraint_id, role_name, identifier),
            entry_key(constraint_id, DEFAULT, identifier),
            entry_key(GLOBAL, DEFAULT, identifier),
            identifier.to_owned(),
        ];
        candidates
            .iter()
            .filter_map(|key| self.data.get(key))
            .find_map(|value| value.downcast_ref::<T>())
    }

    /// Look up `identifier` for a [`Role`], resolving its pane name first.
    pub fn get_for_role<'m, T: Any>(
        &'m self,
        identifier: &str,
        role: &Role,
        constraint: &Constraint,
    ) -> Result<Option<&'m T>, ConfigError> {
        let role_name = role.constraint_name(constraint)?;
        Ok(self.get(identifier, role_name, constraint.id()))
    }
}

impl std::fmt::Debug for Metadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metadata")
            .field("entries", &self.data.len())
            .finish()
    }
}

/// Builder for [`Metadata`] with scope inheritance.
pub struct MetadataBuilder {
    data: FxHashMap<String, Rc<dyn Any>>,
}

impl MetadataBuilder {
    /// Populate the global default scope.
    #[must_use]
    pub fn defaults(mut self, fill: impl FnOnce(&mut RoleScope<'_>)) -> Self {
        fill(&mut RoleScope {
            data: &mut self.data,
            constraint_id: GLOBAL.to_owned(),
            role_name: DEFAULT.to_owned(),
        });
        self
    }

    /// Populate scopes for one constraint.
    #[must_use]
    pub fn constraint(mut self, constraint_id: &str, fill: impl FnOnce(&mut ConstraintScope<'_>)) -> Self {
        fill(&mut ConstraintScope {
            data: &mut self.data,
            constraint_id: constraint_id.to_owned(),
        });
        self
    }

    /// Produce the immutable store.
    #[must_use]
    pub fn build(self) -> Metadata {
        Metadata { data: self.data }
    }
}

impl std::fmt::Debug for MetadataBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataBuilder")
            .field("entries", &self.data.len())
            .finish()
    }
}

/// Scopes within one constraint.
pub struct ConstraintScope<'a> {
    data: &'a mut FxHashMap<String, Rc<dyn Any>>,
    constraint_id: String,
}

impl ConstraintScope<'_> {
    /// The constraint's default scope, seeded from the global defaults.
    pub fn defaults(&mut self, fill: impl FnOnce(&mut RoleScope<'_>)) {
        let mut scope = RoleScope {
            data: &mut *self.data,
            constraint_id: self.constraint_id.clone(),
            role_name: DEFAULT.to_owned(),
        };
        scope.inherit_from(GLOBAL, DEFAULT);
        fill(&mut scope);
    }

    /// The constraint's default scope without global inheritance.
    pub fn reset_defaults(&mut self, fill: impl FnOnce(&mut RoleScope<'_>)) {
        fill(&mut RoleScope {
            data: &mut *self.data,
            constraint_id: self.constraint_id.clone(),
            role_name: DEFAULT.to_owned(),
        });
    }

    /// A role scope, seeded from this constraint's defaults (or the global
    /// defaults when the constraint declared none).
    pub fn role(&mut self, name: &str, fill: impl FnOnce(&mut RoleScope<'_>)) {
        let source = if self.has_constraint_default() {
            (self.constraint_id.clone(), DEFAULT.to_owned())
        } else {
            (GLOBAL.to_owned(), DEFAULT.to_owned())
        };
        self.role_inner(name, &source.0, &source.1, fill);
    }

    /// A role scope seeded from another role of this constraint.
    pub fn role_from(&mut self, name: &str, source: &str, fill: impl FnOnce(&mut RoleScope<'_>)) {
        self.role_inner(name, &self.constraint_id.clone(), source, fill);
    }

    fn role_inner(
        &mut self,
        name: &str,
        source_constraint: &str,
        source_role: &str,
        fill: impl FnOnce(&mut RoleScope<'_>),
    ) {
        let mut scope = RoleScope {
            data: &mut *self.data,
            constraint_id: self.constraint_id.clone(),
            role_name: name.to_owned(),
        };
        scope.inherit_from(source_constraint, source_role);
        fill(&mut scope);
    }

    fn has_constraint_default(&self) -> bool {
        let prefix = format!("{}{SEPARATOR}{DEFAULT}{SEPARATOR}", self.constraint_id);
        self.data.keys().any(|key| key.starts_with(&prefix))
    }
}

/// One scope accepting key/value entries.
pub struct RoleScope<'a> {
    data: &'a mut FxHashMap<String, Rc<dyn Any>>,
    constraint_id: String,
    role_name: String,
}

impl RoleScope<'_> {
    /// Set a value under this scope.
    pub fn set(&mut self, identifier: &str, value: impl Any) {
        self.data.insert(
            entry_key(&self.constraint_id, &self.role_name, identifier),
            Rc::new(value),
        );
    }

    /// Copy every entry of another scope into this one.
    pub fn inherit_from(&mut self, source_constraint: &str, source_role: &str) {
        let from = format!("{source_constraint}{SEPARATOR}{source_role}{SEPARATOR}");
        let to = format!(
            "{}{SEPARATOR}{}{SEPARATOR}",
            self.constraint_id, self.role_name
        );
        let copied: Vec<(String, Rc<dyn Any>)> = self
            .data
            .iter()
            .filter(|(key, _)| key.starts_with(&from))
            .map(|(key, value)| (key.replacen(&from, &to, 1), Rc::clone(value)))
            .collect();
        self.data.extend(copied);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Metadata {
        Metadata::builder()
            .defaults(|scope| {
                scope.set("top_bar", true);
                scope.set("title", "app".to_owned());
            })
            .constraint("Main", |constraint| {
                constraint.defaults(|scope| scope.set("title", "main".to_owned()));
                constraint.role("support", |scope| scope.set("top_bar", false));
                constraint.role_from("extra", "support", |scope| {
                    scope.set("title", "extra".to_owned());
                });
            })
            .build()
    }

    #[test]
    fn lookup_walks_the_fallback_chain() {
        let store = store();

        // Exact role entry wins.
        assert_eq!(store.get::<bool>("top_bar", "support", "Main"), Some(&false));
        // Constraint default next.
        assert_eq!(
            store.get::<String>("title", "support", "Main").map(String::as_str),
            Some("main")
        );
        // Global default last.
        assert_eq!(store.get::<bool>("top_bar", "main", "Other"), Some(&true));
        // Nothing anywhere.
        assert_eq!(store.get::<u32>("missing", "main", "Main"), None);
    }

    #[test]
    fn role_inheritance_copies_then_overrides() {
        let store = store();

        // "extra" inherited support's top_bar=false, then set its own title.
        assert_eq!(store.get::<bool>("top_bar", "extra", "Main"), Some(&false));
        assert_eq!(
            store.get::<String>("title", "extra", "Main").map(String::as_str),
            Some("extra")
        );
    }

    #[test]
    fn type_mismatch_falls_through() {
        let store = Metadata::builder()
            .defaults(|scope| scope.set("limit", 10u32))
            .constraint("Main", |constraint| {
                constraint.defaults(|scope| scope.set("limit", "ten".to_owned()));
            })
            .build();

        // The constraint default holds a String; asking for u32 falls back
        // to the global default.
        assert_eq!(store.get::<u32>("limit", "main", "Main"), Some(&10));
    }
}
