#![forbid(unsafe_code)]

//! Name-based screen registry.
//!
//! Maps identifier strings to screen arguments, so navigation targets like a
//! bottom bar or side menu can be declared by name. The identifier grammar
//! is `"<type>:<name>"` with `type ∈ {specific, managed, general}`; the type
//! decides which session kind the resolved key starts.
//!
//! # Failure Modes
//!
//! Unknown identifiers, grammar violations and unknown session types are all
//! [`ConfigError`]s — misconfiguration, not runtime conditions.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::context::Context;
use crate::error::ConfigError;
use crate::key::{Key, NavArg};
use crate::resolver::ConstraintResolver;
use crate::session::{IDENTIFIER_SEPARATOR, KIND_GENERAL, KIND_MANAGED, KIND_SPECIFIC};

/// Registered named navigation targets.
#[derive(Debug)]
pub struct Registry {
    definitions: FxHashMap<String, Arc<dyn NavArg>>,
}

impl Registry {
    /// Start building a registry.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder {
            definitions: FxHashMap::default(),
        }
    }

    /// Resolve an identifier to a session-root [`Key`].
    ///
    /// The identifier's type tag picks the session kind; `general` targets
    /// mint a fresh ephemeral session on every resolution.
    pub fn resolve(
        &self,
        identifier: &str,
        resolver: &ConstraintResolver,
    ) -> Result<Key, ConfigError> {
        let arg = self
            .definitions
            .get(identifier)
            .ok_or_else(|| ConfigError::UnknownIdentifier {
                identifier: identifier.to_owned(),
            })?;
        let constraint_id = resolver.resolve_id(&**arg)?.to_owned();

        let (kind, name) = identifier.split_once(IDENTIFIER_SEPARATOR).ok_or_else(|| {
            ConfigError::MalformedIdentifier {
                identifier: identifier.to_owned(),
            }
        })?;

        let context = match kind.to_ascii_lowercase().as_str() {
            KIND_SPECIFIC => Context::specific(name, &constraint_id),
            KIND_MANAGED => Context::managed(name, &constraint_id),
            KIND_GENERAL => Context::general(&constraint_id, None),
            other => {
                return Err(ConfigError::UnknownSessionType {
                    kind: other.to_owned(),
                });
            }
        };
        Ok(Key::new(Arc::clone(arg), context))
    }
}

/// Builder collecting identifier → argument definitions.
#[derive(Debug)]
pub struct RegistryBuilder {
    definitions: FxHashMap<String, Arc<dyn NavArg>>,
}

impl RegistryBuilder {
    /// Register an argument under an identifier.
    #[must_use]
    pub fn register(mut self, identifier: &str, arg: impl NavArg) -> Self {
        self.definitions.insert(identifier.to_owned(), Arc::new(arg));
        self
    }

    /// Produce the immutable registry.
    #[must_use]
    pub fn build(self) -> Registry {
        Registry {
            definitions: self.definitions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Constraint;
    use crate::session::Session;

    #[derive(Debug)]
    struct Home;
    impl NavArg for Home {}

    fn resolver() -> ConstraintResolver {
        let constraint = Constraint::builder("Main", "main", "dialog")
            .leaf("support")
            .build()
            .expect("valid constraint");
        ConstraintResolver::builder().otherwise(constraint).build()
    }

    fn registry() -> Registry {
        Registry::builder()
            .register("specific:home", Home)
            .register("managed:settings", Home)
            .register("general:picker", Home)
            .register("nocolon", Home)
            .register("cosmic:home", Home)
            .build()
    }

    #[test]
    fn resolves_each_session_kind() {
        let resolver = resolver();
        let registry = registry();

        let home = registry.resolve("specific:home", &resolver).unwrap();
        assert_eq!(home.context().session, Session::Specific("home".into()));
        assert!(home.context().is_root());

        let settings = registry.resolve("managed:settings", &resolver).unwrap();
        assert_eq!(
            settings.context().session,
            Session::Managed("settings".into())
        );

        // General targets are one-shot: two resolutions, two sessions.
        let first = registry.resolve("general:picker", &resolver).unwrap();
        let second = registry.resolve("general:picker", &resolver).unwrap();
        assert_ne!(first.context().session, second.context().session);
    }

    #[test]
    fn grammar_violations_fail_fast() {
        let resolver = resolver();
        let registry = registry();

        assert!(matches!(
            registry.resolve("specific:missing", &resolver),
            Err(ConfigError::UnknownIdentifier { .. })
        ));
        assert!(matches!(
            registry.resolve("nocolon", &resolver),
            Err(ConfigError::MalformedIdentifier { .. })
        ));
        assert!(matches!(
            registry.resolve("cosmic:home", &resolver),
            Err(ConfigError::UnknownSessionType { .. })
        ));
    }
}
