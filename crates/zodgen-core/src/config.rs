//! Configuration file loading for zodgen.
//!
//! Reads `zodgen.config.json` from the project root. The file holds either a
//! single entry object or an array of named entries; each entry describes one
//! input file and how to generate validators for it. A missing file yields an
//! empty configuration; a malformed one is an error.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

use crate::naming::{self, SchemaNamer};

/// Name of the configuration file looked up in the project root.
pub const CONFIG_FILE: &str = "zodgen.config.json";

/// Default round ceiling for the dependency resolver.
pub const DEFAULT_MAX_RUN: u32 = 10;

/// One generation target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub input: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_test: Option<String>,
    #[serde(default = "default_max_run")]
    pub max_run: u32,
    #[serde(default)]
    pub keep_comments: bool,
    #[serde(default, rename = "skipParseJSDoc")]
    pub skip_parse_jsdoc: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub schema_name_prefix: String,
    #[serde(default = "default_suffix")]
    pub schema_name_suffix: String,
}

fn default_max_run() -> u32 {
    DEFAULT_MAX_RUN
}
fn default_suffix() -> String {
    naming::DEFAULT_SUFFIX.to_string()
}

impl EntryConfig {
    /// An entry for `input` with every option at its default.
    pub fn for_input(input: &str) -> Self {
        Self {
            name: None,
            input: input.to_string(),
            output: None,
            with_test: None,
            max_run: DEFAULT_MAX_RUN,
            keep_comments: false,
            skip_parse_jsdoc: false,
            include: vec![],
            exclude: vec![],
            schema_name_prefix: String::new(),
            schema_name_suffix: default_suffix(),
        }
    }

    /// Label used in diagnostics: the entry name, or its input path.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.input)
    }

    /// Build the declaration-name filter from `include`/`exclude` globs.
    pub fn name_filter(&self) -> Result<NameFilter, ConfigError> {
        NameFilter::new(&self.include, &self.exclude)
    }

    /// Build the validator naming function from prefix and suffix.
    pub fn schema_namer(&self) -> SchemaNamer {
        if self.schema_name_prefix.is_empty() && self.schema_name_suffix == naming::DEFAULT_SUFFIX
        {
            Box::new(naming::default_schema_name)
        } else {
            naming::affix_namer(&self.schema_name_prefix, &self.schema_name_suffix)
        }
    }

    /// Resolve `input`, `output`, and `with_test` against `root`.
    pub fn resolve_paths(&self, root: &Path) -> (PathBuf, Option<PathBuf>, Option<PathBuf>) {
        let join = |p: &str| {
            let path = Path::new(p);
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                root.join(path)
            }
        };
        (
            join(&self.input),
            self.output.as_deref().map(join),
            self.with_test.as_deref().map(join),
        )
    }
}

/// Declaration-name filter built from glob patterns.
///
/// An empty include list accepts everything; exclude always wins.
#[derive(Debug, Clone)]
pub struct NameFilter {
    include: Option<GlobSet>,
    exclude: Option<GlobSet>,
}

impl NameFilter {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self, ConfigError> {
        Ok(Self {
            include: build_globset(include)?,
            exclude: build_globset(exclude)?,
        })
    }

    /// A filter that accepts every name.
    pub fn accept_all() -> Self {
        Self {
            include: None,
            exclude: None,
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        if self.exclude.as_ref().is_some_and(|set| set.is_match(name)) {
            return false;
        }
        self.include.as_ref().map_or(true, |set| set.is_match(name))
    }
}

fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>, ConfigError> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| ConfigError::Pattern {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map(Some)
        .map_err(|e| ConfigError::Pattern {
            pattern: patterns.join(", "),
            message: e.to_string(),
        })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawConfig {
    Many(Vec<EntryConfig>),
    Single(EntryConfig),
}

/// Top-level zodgen configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZodgenConfig {
    pub entries: Vec<EntryConfig>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("entries in a multi-entry config must be named (entry for {input} has no name)")]
    UnnamedEntry { input: String },

    #[error("duplicate config entry name: {0}")]
    DuplicateEntry(String),

    #[error("invalid name pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },
}

impl ZodgenConfig {
    /// Load configuration from `zodgen.config.json` inside `root`.
    /// Returns an empty configuration if the file doesn't exist.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let config_path = root.join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: config_path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    /// Parse configuration text and validate entry names.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(content).map_err(|e| ConfigError::Parse {
            path: CONFIG_FILE.to_string(),
            message: e.to_string(),
        })?;
        let entries = match raw {
            RawConfig::Single(entry) => vec![entry],
            RawConfig::Many(entries) => entries,
        };

        if entries.len() > 1 {
            let mut seen = std::collections::HashSet::new();
            for entry in &entries {
                let name = entry.name.as_deref().ok_or_else(|| ConfigError::UnnamedEntry {
                    input: entry.input.clone(),
                })?;
                if !seen.insert(name) {
                    return Err(ConfigError::DuplicateEntry(name.to_string()));
                }
            }
        }
        Ok(Self { entries })
    }

    /// Serialize back to the on-disk JSON shape.
    pub fn to_json(&self) -> String {
        let raw = if self.entries.len() == 1 {
            RawConfig::Single(self.entries[0].clone())
        } else {
            RawConfig::Many(self.entries.clone())
        };
        serde_json::to_string_pretty(&raw).unwrap_or_default()
    }

    /// Look up an entry by name.
    pub fn entry(&self, name: &str) -> Option<&EntryConfig> {
        self.entries.iter().find(|e| e.name.as_deref() == Some(name))
    }
}
