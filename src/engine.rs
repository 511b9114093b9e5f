//! Prioritized rule chain.
//!
//! Mirrors a first-hit-wins strategy chain: rules run in ascending priority
//! order (declaration order on ties) and the first suggestion returned ends
//! the search. A rule that fails is logged and skipped so one broken
//! strategy, or an author-environment outage, does not hide the others.
//! When every rule comes back empty the result is a `NOT_FOUND` suggestion.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::client::AemAuthorClient;
use crate::config::RuleConfig;
use crate::domain::Suggestion;
use crate::index::PathIndex;
use crate::rules::{LocaleFallbackRule, ParentFolderRule, PublishRule, Rule, SimilarPathRule};

/// An ordered chain of repair rules.
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleEngine {
    /// Build a chain from `rules`, sorted by priority. The sort is stable.
    pub fn new(mut rules: Vec<Box<dyn Rule>>) -> Self {
        rules.sort_by_key(|rule| rule.priority());
        Self { rules }
    }

    /// The standard chain. [`ParentFolderRule`] is only included when an
    /// author client is available.
    pub fn with_default_rules(
        config: &RuleConfig,
        aem_author_client: Option<Arc<dyn AemAuthorClient>>,
    ) -> Self {
        let mut rules: Vec<Box<dyn Rule>> = vec![
            Box::new(PublishRule::new(config.publish_priority, aem_author_client.clone())),
            Box::new(
                LocaleFallbackRule::new(config.locale_priority, aem_author_client.clone())
                    .with_fallback_locales(config.fallback_locales.clone()),
            ),
            Box::new(
                SimilarPathRule::new(config.similar_priority, aem_author_client.clone())
                    .with_max_relative_distance(config.max_relative_distance),
            ),
        ];
        if aem_author_client.is_some() {
            rules.push(Box::new(
                ParentFolderRule::new(config.parent_folder_priority, aem_author_client)
                    .with_limits(config.max_segment_distance, config.max_ancestor_depth),
            ));
        }
        Self::new(rules)
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Find a repair for one broken path.
    pub async fn suggest(&self, broken_path: &str, index: &PathIndex) -> Suggestion {
        for rule in &self.rules {
            match rule.apply(broken_path, index).await {
                Ok(Some(suggestion)) => {
                    debug!(rule = rule.name(), path = broken_path, "suggestion found");
                    return suggestion;
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(rule = rule.name(), path = broken_path, error = %e, "rule failed, trying next");
                }
            }
        }

        debug!(path = broken_path, "no rule produced a suggestion");
        Suggestion::not_found(broken_path)
    }

    /// Find repairs for many broken paths. Duplicates are answered once, in
    /// order of first appearance.
    pub async fn suggest_all<I, S>(&self, broken_paths: I, index: &PathIndex) -> Vec<Suggestion>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut suggestions = Vec::new();
        for path in broken_paths {
            let path = path.as_ref();
            if !seen.insert(path.to_owned()) {
                continue;
            }
            suggestions.push(self.suggest(path, index).await);
        }

        let fixed = suggestions.iter().filter(|s| s.is_fix()).count();
        info!(total = suggestions.len(), fixed, "broken paths processed");
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::client::StaticAemAuthorClient;
    use crate::domain::{ContentPath, ContentStatus, SuggestionType};
    use crate::error::{RepairError, RepairResult};
    use crate::rules::BaseRule;

    /// Always suggests `target`, tagged with its own label.
    struct Fixed {
        label: &'static str,
        priority: i32,
        target: Option<&'static str>,
    }

    #[async_trait]
    impl Rule for Fixed {
        fn name(&self) -> &'static str {
            self.label
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        async fn apply_rule(&self, broken_path: &str, _index: &PathIndex) -> RepairResult<Option<Suggestion>> {
            Ok(self
                .target
                .map(|t| Suggestion::similar(broken_path, t).with_rule(self.label)))
        }
    }

    struct Failing;

    #[async_trait]
    impl Rule for Failing {
        fn name(&self) -> &'static str {
            "Failing"
        }

        fn priority(&self) -> i32 {
            0
        }

        async fn apply_rule(&self, broken_path: &str, _index: &PathIndex) -> RepairResult<Option<Suggestion>> {
            Err(RepairError::client(broken_path, "author instance unavailable"))
        }
    }

    fn fixed(label: &'static str, priority: i32, target: Option<&'static str>) -> Box<dyn Rule> {
        Box::new(Fixed {
            label,
            priority,
            target,
        })
    }

    #[test]
    fn test_rules_sorted_by_priority_stably() {
        let engine = RuleEngine::new(vec![
            fixed("c", 3, None),
            fixed("a1", 1, None),
            fixed("b", 2, None),
            fixed("a2", 1, None),
        ]);
        assert_eq!(engine.rule_names(), vec!["a1", "a2", "b", "c"]);
    }

    #[tokio::test]
    async fn test_first_suggestion_wins() {
        let engine = RuleEngine::new(vec![
            fixed("late", 5, Some("/late")),
            fixed("empty", 1, None),
            fixed("early", 2, Some("/early")),
        ]);
        let s = engine.suggest("/broken", &PathIndex::new()).await;
        assert_eq!(s.rule.as_deref(), Some("early"));
        assert_eq!(s.suggested_path.as_deref(), Some("/early"));
    }

    #[tokio::test]
    async fn test_errors_are_skipped() {
        let engine = RuleEngine::new(vec![
            Box::new(Failing),
            Box::new(BaseRule::new(1, None)),
            fixed("fallback", 9, Some("/ok")),
        ]);
        let s = engine.suggest("/broken", &PathIndex::new()).await;
        assert_eq!(s.rule.as_deref(), Some("fallback"));
    }

    #[tokio::test]
    async fn test_not_found_when_nothing_matches() {
        let engine = RuleEngine::new(vec![fixed("none", 1, None)]);
        let s = engine.suggest("/broken", &PathIndex::new()).await;
        assert_eq!(s.suggestion_type, SuggestionType::NotFound);
        assert_eq!(s.requested_path, "/broken");
    }

    #[test]
    fn test_default_chain_without_client() {
        let engine = RuleEngine::with_default_rules(&RuleConfig::default(), None);
        assert_eq!(
            engine.rule_names(),
            vec!["PublishRule", "LocaleFallbackRule", "SimilarPathRule"]
        );
    }

    #[test]
    fn test_default_chain_honors_configured_priorities() {
        let client: Arc<dyn AemAuthorClient> = Arc::new(StaticAemAuthorClient::default());
        let config = RuleConfig {
            parent_folder_priority: -1,
            publish_priority: 10,
            ..RuleConfig::default()
        };
        let engine = RuleEngine::with_default_rules(&config, Some(client));
        assert_eq!(
            engine.rule_names(),
            vec!["ParentFolderRule", "LocaleFallbackRule", "SimilarPathRule", "PublishRule"]
        );
    }

    #[tokio::test]
    async fn test_suggest_all_dedupes_in_order() {
        let mut index = PathIndex::new();
        index.insert("/content/dam/en-US/a.jpg", ContentStatus::Draft, None);
        let engine = RuleEngine::with_default_rules(&RuleConfig::default(), None);

        let out = engine
            .suggest_all(
                ["/content/dam/en-US/a.jpg", "/zzz", "/content/dam/en-US/a.jpg"],
                &index,
            )
            .await;
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].suggestion_type, SuggestionType::Publish);
        assert_eq!(out[1].requested_path, "/zzz");
    }

    #[tokio::test]
    async fn test_locale_rule_precedes_similar_rule() {
        let index: PathIndex = ["/content/dam/en-US/a.jpg", "/content/dam/fr-FR/b.jpg"]
            .into_iter()
            .map(|p| ContentPath::new(p, ContentStatus::Published, None))
            .collect();
        let engine = RuleEngine::with_default_rules(&RuleConfig::default(), None);

        let s = engine.suggest("/content/dam/en-US/b.jpg", &index).await;
        assert_eq!(s.suggestion_type, SuggestionType::Locale);
        assert_eq!(s.suggested_path.as_deref(), Some("/content/dam/fr-FR/b.jpg"));
    }
}
