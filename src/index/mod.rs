//! Segment-keyed trie over known content paths.
//!
//! Paths are split on `/` and each non-empty segment becomes one level of
//! the trie. Nodes live in a single arena (`Vec<Node>`) and refer to each
//! other by index, so there are no owning parent/child pointers to untangle
//! on delete. A node that carries a [`ContentPath`] is an *end node*; every
//! other node only exists as a prefix of longer stored paths.
//!
//! # Layout
//!
//! ```text
//! root ── content ── dam ─┬─ en-US ── a.jpg*
//!                         └─ fr-FR ── a.jpg*
//! ```
//!
//! Leading, trailing and doubled slashes do not create segments, so
//! `/a/b`, `a/b/` and `/a//b` address the same node. The stored
//! `ContentPath` keeps the path text it was inserted with.

pub mod loader;

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{ContentPath, ContentStatus};

pub use loader::load_index;

type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Default)]
struct Node {
    parent: Option<NodeId>,
    segment: String,
    /// Segment → child lookup.
    children: HashMap<String, NodeId>,
    /// Children in insertion order.
    order: Vec<NodeId>,
    content: Option<ContentPath>,
}

/// Trie of content paths for one audit run.
#[derive(Debug)]
pub struct PathIndex {
    nodes: Vec<Node>,
    /// Arena slots released by pruning, reused before growing.
    free: Vec<NodeId>,
    len: usize,
}

impl Default for PathIndex {
    fn default() -> Self {
        Self::new()
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

impl PathIndex {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            free: Vec::new(),
            len: 0,
        }
    }

    /// Number of stored paths.
    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Store `path`; see [`insert_content_path`](Self::insert_content_path).
    pub fn insert(&mut self, path: impl Into<String>, status: ContentStatus, locale: Option<String>) {
        self.insert_content_path(ContentPath::new(path, status, locale));
    }

    /// Store a content path. Invalid (empty) paths are ignored; inserting a
    /// path that is already stored replaces its `ContentPath`.
    pub fn insert_content_path(&mut self, content_path: ContentPath) {
        if !content_path.is_valid() {
            debug!("ignoring invalid content path");
            return;
        }

        let mut node = ROOT;
        for segment in segments(&content_path.path) {
            let existing = self.nodes[node].children.get(segment).copied();
            node = match existing {
                Some(child) => child,
                None => self.add_child(node, segment),
            };
        }

        if self.nodes[node].content.replace(content_path).is_none() {
            self.len += 1;
        }
    }

    fn add_child(&mut self, parent: NodeId, segment: &str) -> NodeId {
        let child = Node {
            parent: Some(parent),
            segment: segment.to_owned(),
            ..Node::default()
        };
        let id = if let Some(id) = self.free.pop() {
            self.nodes[id] = child;
            id
        } else {
            self.nodes.push(child);
            self.nodes.len() - 1
        };

        let parent_node = &mut self.nodes[parent];
        parent_node.children.insert(segment.to_owned(), id);
        parent_node.order.push(id);
        id
    }

    /// Node addressed by `path`, whether or not it is an end node.
    fn locate(&self, path: &str) -> Option<NodeId> {
        segments(path).try_fold(ROOT, |node, segment| {
            self.nodes[node].children.get(segment).copied()
        })
    }

    pub fn contains(&self, path: &str) -> bool {
        self.find(path).is_some()
    }

    /// Stored entry for exactly `path`. Paths that only exist as a prefix of
    /// other stored paths are not found.
    pub fn find(&self, path: &str) -> Option<&ContentPath> {
        if path.is_empty() {
            return None;
        }
        self.locate(path)
            .and_then(|node| self.nodes[node].content.as_ref())
    }

    /// Remove a stored path.
    ///
    /// Returns `false`, leaving the trie untouched, for empty or unknown
    /// paths and for paths that are only a prefix of stored paths. On success,
    /// ancestors left with neither content nor children are pruned.
    pub fn delete(&mut self, path: &str) -> bool {
        if path.is_empty() {
            return false;
        }
        let Some(node) = self.locate(path) else {
            return false;
        };
        if self.nodes[node].content.take().is_none() {
            return false;
        }
        self.len -= 1;
        self.prune(node);
        true
    }

    fn prune(&mut self, mut node: NodeId) {
        while node != ROOT
            && self.nodes[node].content.is_none()
            && self.nodes[node].order.is_empty()
        {
            let Some(parent) = self.nodes[node].parent else {
                break;
            };
            let segment = std::mem::take(&mut self.nodes[node].segment);
            let parent_node = &mut self.nodes[parent];
            parent_node.children.remove(&segment);
            parent_node.order.retain(|&child| child != node);

            self.nodes[node] = Node::default();
            self.free.push(node);
            node = parent;
        }
    }

    /// Stored paths exactly one segment below `parent_path`, in insertion
    /// order. Deeper descendants are not included.
    pub fn find_children(&self, parent_path: &str) -> Vec<&ContentPath> {
        let Some(parent) = self.locate(parent_path) else {
            return Vec::new();
        };
        self.nodes[parent]
            .order
            .iter()
            .filter_map(|&child| self.nodes[child].content.as_ref())
            .collect()
    }

    /// Names of every node one segment below `parent_path`, stored or not,
    /// in insertion order.
    pub fn child_names(&self, parent_path: &str) -> Vec<&str> {
        let Some(parent) = self.locate(parent_path) else {
            return Vec::new();
        };
        self.nodes[parent]
            .order
            .iter()
            .map(|&child| self.nodes[child].segment.as_str())
            .collect()
    }

    /// Every stored path under `prefix`. An empty prefix returns all stored
    /// paths.
    ///
    /// Matching is per segment, with the same slash normalization as
    /// [`find`](Self::find). Unless `prefix` ends with `/`, its last segment
    /// is matched as text, so `/content/dam/en` also matches
    /// `/content/dam/en-US/...`.
    pub fn find_paths_with_prefix(&self, prefix: &str) -> Vec<&ContentPath> {
        if prefix.is_empty() {
            return self.paths();
        }

        let mut complete: Vec<&str> = segments(prefix).collect();
        let partial = if prefix.ends_with('/') {
            None
        } else {
            complete.pop()
        };

        let Some(base) = complete.iter().try_fold(ROOT, |node, segment| {
            self.nodes[node].children.get(*segment).copied()
        }) else {
            return Vec::new();
        };

        let starts: Vec<NodeId> = match partial {
            Some(partial) => self.nodes[base]
                .order
                .iter()
                .copied()
                .filter(|&child| self.nodes[child].segment.starts_with(partial))
                .collect(),
            None => vec![base],
        };

        let mut out = Vec::new();
        for start in starts {
            self.collect_subtree(start, &mut out);
        }
        out
    }

    /// All stored paths, depth-first in insertion order.
    pub fn paths(&self) -> Vec<&ContentPath> {
        let mut out = Vec::with_capacity(self.len);
        self.collect_subtree(ROOT, &mut out);
        out
    }

    fn collect_subtree<'a>(&'a self, start: NodeId, out: &mut Vec<&'a ContentPath>) {
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            let node = &self.nodes[node];
            if let Some(content) = &node.content {
                out.push(content);
            }
            stack.extend(node.order.iter().rev());
        }
    }
}

impl Extend<ContentPath> for PathIndex {
    fn extend<I: IntoIterator<Item = ContentPath>>(&mut self, iter: I) {
        for content_path in iter {
            self.insert_content_path(content_path);
        }
    }
}

impl FromIterator<ContentPath> for PathIndex {
    fn from_iter<I: IntoIterator<Item = ContentPath>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}
