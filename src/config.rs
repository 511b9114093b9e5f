//! Repair configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! yields the standard rule chain.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Deserialize;

use crate::error::{RepairError, RepairResult};
use crate::rules::similar_path::DEFAULT_MAX_RELATIVE_DISTANCE;

/// Priority a rule gets when none is configured for it.
pub const DEFAULT_RULE_PRIORITY: i32 = 42;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepairConfig {
    pub rules: RuleConfig,
    pub index: IndexConfig,
}

/// Rule chain settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleConfig {
    pub publish_priority: i32,
    pub locale_priority: i32,
    pub similar_priority: i32,
    pub parent_folder_priority: i32,
    /// Locale codes tried after same-language siblings, in order.
    pub fallback_locales: Vec<String>,
    /// Largest accepted edit distance for a similar path, as a fraction of
    /// the length of the compared part (file name within a folder).
    pub max_relative_distance: f64,
    /// Largest accepted edit distance between a misspelled folder name and
    /// its replacement.
    pub max_segment_distance: usize,
    /// How many ancestor folders the parent-folder rule walks up.
    pub max_ancestor_depth: usize,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            publish_priority: 1,
            locale_priority: 2,
            similar_priority: 3,
            parent_folder_priority: 4,
            fallback_locales: Vec::new(),
            max_relative_distance: DEFAULT_MAX_RELATIVE_DISTANCE,
            max_segment_distance: 2,
            max_ancestor_depth: 3,
        }
    }
}

/// Index crawl settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// Folder levels below each root the loader descends.
    pub max_depth: usize,
    /// Stop loading after this many stored paths.
    pub max_paths: usize,
    /// Glob patterns for paths the loader skips, e.g. `**/renditions/**`.
    pub exclude: Vec<String>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_depth: 16,
            max_paths: 100_000,
            exclude: Vec::new(),
        }
    }
}

impl IndexConfig {
    /// Compile the exclusion patterns.
    pub fn exclude_set(&self) -> Result<GlobSet, globset::Error> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude {
            builder.add(Glob::new(pattern)?);
        }
        builder.build()
    }
}

impl RepairConfig {
    /// Load and validate a JSON configuration file.
    pub fn load(path: &Path) -> RepairResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| RepairError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|e| invalid(path, e))?;
        config.validate().map_err(|reason| invalid(path, reason))?;
        Ok(config)
    }

    /// Check value ranges and glob syntax.
    pub fn validate(&self) -> Result<(), String> {
        let rules = &self.rules;
        if !(0.0..=1.0).contains(&rules.max_relative_distance) {
            return Err(format!(
                "rules.max_relative_distance must be within 0..=1, got {}",
                rules.max_relative_distance
            ));
        }
        if rules.max_segment_distance == 0 {
            return Err("rules.max_segment_distance must be at least 1".to_owned());
        }
        if self.index.max_paths == 0 {
            return Err("index.max_paths must be at least 1".to_owned());
        }
        self.index
            .exclude_set()
            .map_err(|e| format!("index.exclude: {e}"))?;
        Ok(())
    }
}

fn invalid(path: &Path, reason: impl std::fmt::Display) -> RepairError {
    RepairError::Config {
        path: PathBuf::from(path),
        reason: reason.to_string(),
    }
}
