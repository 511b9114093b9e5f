//! Populate a [`PathIndex`] by crawling the author environment.
//!
//! Folders are listed breadth-first starting at each root. An entry whose
//! own listing comes back empty is treated as content and stored; anything
//! with children is a folder and is only descended into.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, info, warn};

use crate::client::AemAuthorClient;
use crate::config::IndexConfig;
use crate::domain::{ContentPath, ContentStatus};
use crate::error::RepairResult;
use crate::index::PathIndex;

/// Crawl `roots` through `client` and build the index.
///
/// Stops descending at `config.max_depth` levels below a root and stops
/// storing once `config.max_paths` entries are indexed. Paths matching any
/// `config.exclude` glob are skipped along with their subtrees. A failed
/// listing aborts the crawl.
pub async fn load_index(
    client: &dyn AemAuthorClient,
    roots: &[String],
    config: &IndexConfig,
) -> RepairResult<PathIndex> {
    let excluded = config.exclude_set()?;

    let mut index = PathIndex::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<(ContentPath, usize)> = roots
        .iter()
        .map(|root| (ContentPath::new(root.clone(), ContentStatus::Unknown, None), 0))
        .collect();

    while let Some((entry, depth)) = queue.pop_front() {
        if index.len() >= config.max_paths {
            warn!(max_paths = config.max_paths, "path limit reached, index truncated");
            break;
        }
        if !seen.insert(entry.path.clone()) || excluded.is_match(&entry.path) {
            continue;
        }

        let children = client.get_children_from_path(&entry.path).await?;
        if children.is_empty() {
            if depth > 0 {
                index.insert_content_path(ContentPath::new(entry.path, entry.status, entry.locale));
            }
            continue;
        }

        if depth >= config.max_depth {
            debug!(path = %entry.path, depth, "max depth reached");
            continue;
        }
        queue.extend(children.into_iter().map(|child| (child, depth + 1)));
    }

    info!(paths = index.len(), roots = roots.len(), "path index loaded");
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::StaticAemAuthorClient;

    fn client(paths: &[(&str, ContentStatus)]) -> StaticAemAuthorClient {
        StaticAemAuthorClient::new(
            paths
                .iter()
                .map(|(p, status)| ContentPath::new(*p, *status, None)),
        )
    }

    fn roots(r: &[&str]) -> Vec<String> {
        r.iter().map(|s| (*s).to_owned()).collect()
    }

    #[tokio::test]
    async fn test_loads_leaves_with_status() {
        let client = client(&[
            ("/content/dam/en-US/a.jpg", ContentStatus::Published),
            ("/content/dam/en-US/sub/b.jpg", ContentStatus::Draft),
            ("/content/dam/fr-FR/a.jpg", ContentStatus::Published),
        ]);
        let index = load_index(&client, &roots(&["/content/dam"]), &IndexConfig::default())
            .await
            .expect("load");

        assert_eq!(index.len(), 3);
        assert!(!index.contains("/content/dam/en-US"));
        assert_eq!(
            index.find("/content/dam/en-US/sub/b.jpg").map(|cp| cp.status),
            Some(ContentStatus::Draft)
        );
        assert_eq!(
            index
                .find("/content/dam/fr-FR/a.jpg")
                .and_then(|cp| cp.locale.as_deref()),
            Some("fr-FR")
        );
    }

    #[tokio::test]
    async fn test_respects_exclusions() {
        let client = client(&[
            ("/content/dam/en-US/a.jpg", ContentStatus::Published),
            ("/content/dam/en-US/renditions/a.png", ContentStatus::Published),
        ]);
        let config = IndexConfig {
            exclude: vec!["**/renditions".to_owned()],
            ..IndexConfig::default()
        };
        let index = load_index(&client, &roots(&["/content/dam"]), &config)
            .await
            .expect("load");
        assert_eq!(index.len(), 1);
        assert!(index.contains("/content/dam/en-US/a.jpg"));
    }

    #[tokio::test]
    async fn test_respects_depth_and_count_limits() {
        let client = client(&[
            ("/r/a.jpg", ContentStatus::Published),
            ("/r/deep/deeper/b.jpg", ContentStatus::Published),
            ("/r/c.jpg", ContentStatus::Published),
        ]);

        let shallow = IndexConfig {
            max_depth: 1,
            ..IndexConfig::default()
        };
        let index = load_index(&client, &roots(&["/r"]), &shallow).await.expect("load");
        assert!(index.contains("/r/a.jpg"));
        assert!(index.contains("/r/c.jpg"));
        assert!(!index.contains("/r/deep/deeper/b.jpg"));

        let capped = IndexConfig {
            max_paths: 1,
            ..IndexConfig::default()
        };
        let index = load_index(&client, &roots(&["/r"]), &capped).await.expect("load");
        assert_eq!(index.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_root_yields_empty_index() {
        let client = client(&[("/r/a.jpg", ContentStatus::Published)]);
        let index = load_index(&client, &roots(&["/missing"]), &IndexConfig::default())
            .await
            .expect("load");
        assert!(index.is_empty());
    }
}
