//! Locale substitution.
//!
//! A reference to `/content/dam/en-GB/a.jpg` that does not exist may still
//! resolve under another locale folder next to `en-GB`. Candidates are
//! tried in this order:
//!
//! 1. sibling locales with the same language (`en-US`, `en-AU`, ...)
//! 2. configured fallback locales
//! 3. every other sibling locale
//!
//! Within groups 1 and 3 codes are sorted so results do not depend on the
//! order the index was loaded in. Deleted and archived copies are skipped.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::{Rule, RuleBase};
use crate::client::AemAuthorClient;
use crate::domain::{ContentPath, Locale, Suggestion};
use crate::error::RepairResult;
use crate::index::PathIndex;
use crate::util::path;

#[derive(Debug, Clone, Default)]
pub struct LocaleFallbackRule {
    base: RuleBase,
    fallback_locales: Vec<String>,
}

impl LocaleFallbackRule {
    pub fn new(priority: i32, aem_author_client: Option<Arc<dyn AemAuthorClient>>) -> Self {
        Self {
            base: RuleBase::new(priority, aem_author_client),
            fallback_locales: Vec::new(),
        }
    }

    /// Locale codes to try after same-language siblings.
    #[must_use]
    pub fn with_fallback_locales(mut self, codes: Vec<String>) -> Self {
        self.fallback_locales = codes;
        self
    }

    fn candidate_codes(&self, locale: &Locale, broken_path: &str, index: &PathIndex) -> Vec<String> {
        let siblings: Vec<Locale> = locale
            .root_in_path(broken_path)
            .map(|root| index.child_names(path::parent(root).unwrap_or("/")))
            .unwrap_or_default()
            .into_iter()
            .filter_map(Locale::from_code)
            .filter(|sibling| sibling.code() != locale.code())
            .collect();

        let (mut same_language, mut others): (Vec<&Locale>, Vec<&Locale>) =
            siblings.iter().partition(|sibling| locale.same_language(sibling));
        same_language.sort_by(|a, b| a.code().cmp(b.code()));
        others.sort_by(|a, b| a.code().cmp(b.code()));

        let mut codes: Vec<String> = Vec::new();
        let ordered = same_language
            .into_iter()
            .map(Locale::code)
            .chain(self.fallback_locales.iter().map(String::as_str))
            .chain(others.into_iter().map(Locale::code));
        for code in ordered {
            if code != locale.code() && !codes.iter().any(|c| c == code) {
                codes.push(code.to_owned());
            }
        }
        codes
    }
}

#[async_trait]
impl Rule for LocaleFallbackRule {
    fn name(&self) -> &'static str {
        "LocaleFallbackRule"
    }

    fn priority(&self) -> i32 {
        self.base.priority()
    }

    async fn apply_rule(&self, broken_path: &str, index: &PathIndex) -> RepairResult<Option<Suggestion>> {
        let Some(locale) = Locale::from_path(broken_path) else {
            debug!(path = broken_path, "no locale in path");
            return Ok(None);
        };

        for code in self.candidate_codes(&locale, broken_path, index) {
            let candidate = locale.replace_in_path(broken_path, &code);
            let usable = index.find(&candidate).is_some_and(ContentPath::is_suggestible);
            if candidate != broken_path && usable {
                return Ok(Some(
                    Suggestion::locale(broken_path, candidate)
                        .with_rule(self.name())
                        .with_reason(format!("found under locale {code} instead of {locale}")),
                ));
            }
        }

        Ok(None)
    }
}
