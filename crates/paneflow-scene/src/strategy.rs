#![forbid(unsafe_code)]

//! Scene strategy selection.

use paneflow_core::{ConfigError, ConstraintResolver, Key};

use crate::layout::{LayoutCapability, SceneLayout};
use crate::scene::Scene;

/// Decides whether its layouts should handle the current stack.
///
/// A strategy typically gates on the display capability ("two panes fit")
/// or on a property of the top entry. It never builds the scene itself:
/// when it accepts, the chain looks up the layout registered for the
/// active constraint under the strategy's name.
pub trait SceneStrategy {
    /// Logical name, matched against [`SceneLayout::matches`].
    fn name(&self) -> &str;

    /// Whether this strategy wants the current stack.
    fn accepts(&self, capability: &LayoutCapability, entries: &[Key]) -> bool;
}

/// Ordered list of strategies. Registration order is precedence order:
/// strategies registered later are asked first, so a host layers specific
/// strategies over general fallbacks.
#[derive(Default)]
pub struct StrategyChain {
    strategies: Vec<Box<dyn SceneStrategy>>,
}

impl StrategyChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, strategy: impl SceneStrategy + 'static) {
        self.strategies.push(Box::new(strategy));
    }

    /// Resolve the scene for the current stack, or `None` when no strategy
    /// accepts or no layout matches the accepted one.
    pub fn resolve(
        &self,
        entries: &[Key],
        capability: &LayoutCapability,
        resolver: &ConstraintResolver,
        layouts: &[SceneLayout],
    ) -> Result<Option<Scene>, ConfigError> {
        let Some(top) = entries.last() else {
            return Ok(None);
        };
        let top_context = top.context();
        let constraint_id = top_context.constraint_id.as_str();

        for strategy in self.strategies.iter().rev() {
            if !strategy.accepts(capability, entries) {
                continue;
            }

            let Some(layout) = layouts
                .iter()
                .find(|layout| layout.matches(constraint_id, strategy.name()))
            else {
                continue;
            };

            let active_session = top_context.session.clone();
            let session_keys: Vec<Key> = entries
                .iter()
                .filter(|key| key.context().session == active_session)
                .cloned()
                .collect();

            let constraint = resolver.get(constraint_id)?.clone();

            tracing::debug!(
                strategy = strategy.name(),
                constraint = constraint_id,
                panes = layout.pane_count(),
                "scene resolved"
            );

            return Ok(Some(Scene::new(
                strategy.name(),
                constraint,
                layout.clone(),
                active_session,
                session_keys,
                entries.to_vec(),
            )));
        }

        Ok(None)
    }
}

impl std::fmt::Debug for StrategyChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyChain")
            .field("strategies", &self.strategies.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paneflow_core::{Constraint, Context, NavArg};

    #[derive(Debug)]
    struct Screen;
    impl NavArg for Screen {}

    struct MinPartitions {
        name: &'static str,
        needs: usize,
    }

    impl SceneStrategy for MinPartitions {
        fn name(&self) -> &str {
            self.name
        }

        fn accepts(&self, capability: &LayoutCapability, _entries: &[Key]) -> bool {
            capability.partitions >= self.needs
        }
    }

    fn fixture() -> (ConstraintResolver, Vec<SceneLayout>, Vec<Key>) {
        let constraint = Constraint::builder("Main", "main", "dialog")
            .pane("support", |support| support.leaf("extra"))
            .build()
            .expect("valid fixture");
        let resolver = ConstraintResolver::builder()
            .otherwise(constraint)
            .build();

        let layouts = vec![
            SceneLayout::new("Main", &["compact"], 1),
            SceneLayout::new("Main", &["wide"], 2),
        ];

        let entries = vec![Key::of(Screen, Context::specific("home", "Main"))];
        (resolver, layouts, entries)
    }

    fn chain() -> StrategyChain {
        let mut chain = StrategyChain::new();
        // Fallback first, preferred strategy last.
        chain.register(MinPartitions {
            name: "compact",
            needs: 0,
        });
        chain.register(MinPartitions {
            name: "wide",
            needs: 2,
        });
        chain
    }

    #[test]
    fn later_registration_wins_when_it_accepts() {
        let (resolver, layouts, entries) = fixture();
        let chain = chain();

        let scene = chain
            .resolve(&entries, &LayoutCapability::new(3), &resolver, &layouts)
            .expect("config ok")
            .expect("scene");
        assert_eq!(scene.layout().pane_count(), 2);
        assert_eq!(scene.key(), "Main of wide - specific:home");
    }

    #[test]
    fn declined_strategies_fall_through() {
        let (resolver, layouts, entries) = fixture();
        let chain = chain();

        let scene = chain
            .resolve(&entries, &LayoutCapability::new(1), &resolver, &layouts)
            .expect("config ok")
            .expect("scene");
        assert_eq!(scene.layout().pane_count(), 1);
    }

    #[test]
    fn empty_stack_has_no_scene() {
        let (resolver, layouts, _) = fixture();
        let chain = chain();

        let scene = chain
            .resolve(&[], &LayoutCapability::new(3), &resolver, &layouts)
            .expect("config ok");
        assert!(scene.is_none());
    }

    #[test]
    fn missing_layout_skips_the_strategy() {
        let (resolver, _, entries) = fixture();
        let chain = chain();

        // Only a compact layout is registered; "wide" accepts but cannot
        // find one and the chain falls back.
        let layouts = vec![SceneLayout::new("Main", &["compact"], 1)];
        let scene = chain
            .resolve(&entries, &LayoutCapability::new(3), &resolver, &layouts)
            .expect("config ok")
            .expect("scene");
        assert_eq!(scene.layout().pane_count(), 1);
    }
}
