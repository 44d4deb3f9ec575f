#![forbid(unsafe_code)]

//! Argument-type to constraint mapping.
//!
//! The [`ConstraintResolver`] is the compass supplied by the hosting
//! application: it decides which declared structure governs a screen, based
//! on the concrete type of its argument. Unbound types fall back to a single
//! designated default; if neither exists the lookup is a configuration
//! error, never a runtime condition.

use std::any::{Any, TypeId};

use rustc_hash::FxHashMap;

use crate::constraint::Constraint;
use crate::error::ConfigError;
use crate::key::NavArg;

/// Maps argument types to the constraint that governs them.
#[derive(Debug)]
pub struct ConstraintResolver {
    bindings: FxHashMap<TypeId, String>,
    constraints: FxHashMap<String, Constraint>,
    default_id: Option<String>,
}

impl ConstraintResolver {
    /// Start building a resolver.
    #[must_use]
    pub fn builder() -> ConstraintResolverBuilder {
        ConstraintResolverBuilder {
            bindings: FxHashMap::default(),
            constraints: FxHashMap::default(),
            default_id: None,
        }
    }

    /// Resolve the constraint id governing `arg`.
    ///
    /// Falls back to the default constraint when the concrete type has no
    /// explicit binding.
    pub fn resolve_id(&self, arg: &dyn NavArg) -> Result<&str, ConfigError> {
        let any: &dyn Any = arg;
        self.bindings
            .get(&any.type_id())
            .map(String::as_str)
            .or(self.default_id.as_deref())
            .ok_or_else(|| ConfigError::UnboundArgType {
                arg: format!("{arg:?}"),
            })
    }

    /// Look up a constraint by id.
    pub fn get(&self, id: &str) -> Result<&Constraint, ConfigError> {
        self.constraints
            .get(id)
            .ok_or_else(|| ConfigError::UnknownConstraint { id: id.to_owned() })
    }
}

/// Builder binding argument types to constraints.
#[derive(Debug)]
pub struct ConstraintResolverBuilder {
    bindings: FxHashMap<TypeId, String>,
    constraints: FxHashMap<String, Constraint>,
    default_id: Option<String>,
}

impl ConstraintResolverBuilder {
    /// Bind a concrete argument type to `constraint`.
    #[must_use]
    pub fn bind<T: NavArg>(mut self, constraint: Constraint) -> Self {
        self.bindings
            .insert(TypeId::of::<T>(), constraint.id().to_owned());
        self.constraints
            .insert(constraint.id().to_owned(), constraint);
        self
    }

    /// Designate the fallback constraint for unbound argument types.
    #[must_use]
    pub fn otherwise(mut self, constraint: Constraint) -> Self {
        self.default_id = Some(constraint.id().to_owned());
        self.constraints
            .insert(constraint.id().to_owned(), constraint);
        self
    }

    /// Produce the immutable resolver.
    #[must_use]
    pub fn build(self) -> ConstraintResolver {
        ConstraintResolver {
            bindings: self.bindings,
            constraints: self.constraints,
            default_id: self.default_id,
        }
    }
}
