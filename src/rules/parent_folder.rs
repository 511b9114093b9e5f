//! Misspelled-folder repair through live author listings.
//!
//! Walks up from the broken path's parent. At each ancestor the author
//! environment lists the real children, and any child whose name is within
//! `max_segment_distance` edits of the broken path's segment at that level
//! is tried: the rest of the broken path is re-attached below it and the
//! result is kept if the author environment says it exists.
//!
//! ```text
//! broken:    /content/dam/en-US/prodcuts/widget.jpg
//! ancestor:  /content/dam/en-US            lists  products/, news/
//! candidate: /content/dam/en-US/products/widget.jpg   (is_available ✓)
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::{Rule, RuleBase};
use crate::client::AemAuthorClient;
use crate::domain::{ContentPath, Suggestion};
use crate::error::RepairResult;
use crate::index::PathIndex;
use crate::levenshtein;
use crate::util::path;

pub const DEFAULT_MAX_SEGMENT_DISTANCE: usize = 2;
pub const DEFAULT_MAX_ANCESTOR_DEPTH: usize = 3;

#[derive(Debug, Clone)]
pub struct ParentFolderRule {
    base: RuleBase,
    max_segment_distance: usize,
    max_ancestor_depth: usize,
}

impl ParentFolderRule {
    pub fn new(priority: i32, aem_author_client: Option<Arc<dyn AemAuthorClient>>) -> Self {
        Self {
            base: RuleBase::new(priority, aem_author_client),
            max_segment_distance: DEFAULT_MAX_SEGMENT_DISTANCE,
            max_ancestor_depth: DEFAULT_MAX_ANCESTOR_DEPTH,
        }
    }

    #[must_use]
    pub fn with_limits(mut self, max_segment_distance: usize, max_ancestor_depth: usize) -> Self {
        self.max_segment_distance = max_segment_distance;
        self.max_ancestor_depth = max_ancestor_depth;
        self
    }
}

#[async_trait]
impl Rule for ParentFolderRule {
    fn name(&self) -> &'static str {
        "ParentFolderRule"
    }

    fn priority(&self) -> i32 {
        self.base.priority()
    }

    async fn apply_rule(&self, broken_path: &str, _index: &PathIndex) -> RepairResult<Option<Suggestion>> {
        let client = self.base.aem_author_client()?;
        let segments: Vec<&str> = broken_path.split('/').filter(|s| !s.is_empty()).collect();

        for level in (1..segments.len()).rev().take(self.max_ancestor_depth) {
            let ancestor = format!("/{}", segments[..level].join("/"));
            let wanted = segments[level].to_lowercase();
            let rest = segments[level + 1..].join("/");

            let mut near: Vec<(usize, String)> = client
                .get_children_from_path(&ancestor)
                .await?
                .into_iter()
                .filter(ContentPath::is_suggestible)
                .filter_map(|child| {
                    let distance = levenshtein::distance(&wanted, &child.name().to_lowercase());
                    (distance > 0 && distance <= self.max_segment_distance)
                        .then_some((distance, child.path))
                })
                .collect();
            near.sort_by_key(|(distance, _)| *distance);

            for (distance, child_path) in near {
                let candidate = if rest.is_empty() {
                    child_path
                } else {
                    path::join(&child_path, &rest)
                };
                if client.is_available(&candidate).await? {
                    return Ok(Some(
                        Suggestion::parent_folder(broken_path, candidate)
                            .with_rule(self.name())
                            .with_reason(format!(
                                "segment {:?} under {ancestor} is {distance} edit(s) away",
                                segments[level]
                            )),
                    ));
                }
                debug!(candidate, "candidate not available");
            }
        }

        Ok(None)
    }
}
