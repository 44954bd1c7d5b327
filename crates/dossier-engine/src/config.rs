//! Engine configuration and doctrine loading
//!
//! Both the engine settings and the doctrine table are plain data, loadable
//! from TOML (doctrines also from JSON). Nothing is read from the
//! environment; callers pass everything explicitly.

use crate::key::DedupScope;
use dossier_domain::{Doctrine, FOUNDATION_CATEGORY};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Smallest cap the engine will apply
pub const MIN_MAX_ITEMS: usize = 4;

/// Largest cap the engine will apply
pub const MAX_MAX_ITEMS: usize = 128;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("Failed to read {path}: {source}")]
    FileRead {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("Failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Failed to parse JSON
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// File extension is neither `.toml` nor `.json`
    #[error("Unsupported doctrine format: {0}")]
    UnsupportedFormat(PathBuf),

    /// A setting has an invalid value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Rules for rejecting placeholder and junk items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderRules {
    /// Titles that mark scaffold content (case-insensitive, trimmed)
    pub scaffold_titles: Vec<String>,

    /// Hosts that are never real evidence; subdomains match too
    pub denied_hosts: Vec<String>,

    /// Source types that need no URL or id anchor, only a title or summary
    pub urlless_source_types: Vec<String>,
}

impl Default for PlaceholderRules {
    fn default() -> Self {
        Self {
            scaffold_titles: strings(&[
                "product",
                "placeholder",
                "lorem ipsum",
                "untitled",
                "tbd",
                "title",
                "sample title",
            ]),
            denied_hosts: strings(&[
                "example.com",
                "example.org",
                "example.net",
                "localhost",
                "127.0.0.1",
                "yourcompany.com",
                "yourdomain.com",
                "vendor.com",
                "supplier.com",
                "company.com",
            ]),
            urlless_source_types: strings(&[
                FOUNDATION_CATEGORY,
                "csv_signal",
                "supplier_profile",
                "competitor_profile",
                "coverage_summary",
            ]),
        }
    }
}

/// A tier group downstream synthesis expects to see
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessRequirement {
    /// Name reported in `readiness.requirements`
    pub name: String,

    /// Categories that satisfy the requirement (any one is enough)
    pub categories: Vec<String>,

    /// Whether an unmet requirement makes synthesis unsafe
    #[serde(default)]
    pub blocking: bool,
}

impl ReadinessRequirement {
    /// Create a requirement
    pub fn new(name: &str, categories: &[&str], blocking: bool) -> Self {
        Self {
            name: name.to_string(),
            categories: strings(categories),
            blocking,
        }
    }
}

fn default_requirements() -> Vec<ReadinessRequirement> {
    vec![
        ReadinessRequirement::new(
            "strategic_markdown",
            &["markdown_strategic", "markdown_industry_drivers"],
            true,
        ),
        ReadinessRequirement::new("supplier_profile", &["supplier_profile"], true),
        ReadinessRequirement::new("coverage_summary", &["coverage_summary"], false),
        ReadinessRequirement::new("case_studies", &["case_study"], false),
    ]
}

fn default_max_items() -> usize {
    64
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Configuration for the evidence engine
///
/// # Examples
///
/// ```
/// use dossier_engine::{DedupScope, EngineConfig};
///
/// let config = EngineConfig::from_toml(r#"
///     max_items = 24
///     dedup_scope = "per_source"
/// "#).unwrap();
///
/// assert_eq!(config.max_items, 24);
/// assert_eq!(config.dedup_scope, DedupScope::PerSource);
/// assert_eq!(config.readiness.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Requested cap on published claims; clamped to `4..=128`
    #[serde(default = "default_max_items")]
    pub max_items: usize,

    /// Whether URL/title dedup spans source types
    #[serde(default)]
    pub dedup_scope: DedupScope,

    /// Placeholder filter rules
    #[serde(default)]
    pub placeholder: PlaceholderRules,

    /// Expected tier groups
    #[serde(default = "default_requirements")]
    pub readiness: Vec<ReadinessRequirement>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_items: default_max_items(),
            dedup_scope: DedupScope::CrossSource,
            placeholder: PlaceholderRules::default(),
            readiness: default_requirements(),
        }
    }
}

impl EngineConfig {
    /// Compact preset: at most 16 claims, e.g. for email-sized briefs
    pub fn compact() -> Self {
        Self {
            max_items: 16,
            ..Self::default()
        }
    }

    /// Strict preset: per-source dedup, more denied hosts, every
    /// requirement blocking
    pub fn strict() -> Self {
        let mut config = Self {
            dedup_scope: DedupScope::PerSource,
            ..Self::default()
        };
        config.placeholder.denied_hosts.extend(strings(&[
            "placeholder.com",
            "domain.com",
            "website.com",
            "test",
            "invalid",
        ]));
        for requirement in &mut config.readiness {
            requirement.blocking = true;
        }
        config
    }

    /// Replace the requested cap
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Cap actually applied after clamping to `4..=128`
    pub fn effective_max_items(&self) -> usize {
        self.max_items.clamp(MIN_MAX_ITEMS, MAX_MAX_ITEMS)
    }

    /// Drop readiness requirements that no doctrine category can satisfy
    ///
    /// Used when pairing the default requirements with a custom doctrine.
    pub fn retain_requirements_for(mut self, doctrine: &Doctrine) -> Self {
        for requirement in &mut self.readiness {
            requirement.categories.retain(|c| doctrine.contains(c));
        }
        self.readiness.retain(|r| !r.categories.is_empty());
        self
    }

    /// Validate settings that do not depend on a doctrine
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut names = HashSet::new();
        for requirement in &self.readiness {
            if requirement.name.trim().is_empty() {
                return Err(ConfigError::Invalid("readiness requirement name must not be empty".to_string()));
            }
            if requirement.name == FOUNDATION_CATEGORY {
                return Err(ConfigError::Invalid(format!(
                    "readiness requirement name '{}' is reserved",
                    FOUNDATION_CATEGORY
                )));
            }
            if !names.insert(requirement.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate readiness requirement '{}'",
                    requirement.name
                )));
            }
            if requirement.categories.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "readiness requirement '{}' lists no categories",
                    requirement.name
                )));
            }
        }
        if self.placeholder.denied_hosts.iter().any(|h| h.trim().is_empty()) {
            return Err(ConfigError::Invalid("denied_hosts must not contain empty entries".to_string()));
        }
        Ok(())
    }

    /// Validate settings against the doctrine they will run with
    pub fn validate_for(&self, doctrine: &Doctrine) -> Result<(), ConfigError> {
        self.validate()?;
        for requirement in &self.readiness {
            if let Some(unknown) = requirement.categories.iter().find(|c| !doctrine.contains(c)) {
                return Err(ConfigError::Invalid(format!(
                    "readiness requirement '{}' names category '{}' missing from doctrine '{}'",
                    requirement.name,
                    unknown,
                    doctrine.version()
                )));
            }
        }
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_toml(&read(path.as_ref())?)
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a doctrine table from TOML
///
/// ```
/// let doctrine = dossier_engine::doctrine_from_toml(r#"
///     version = "tiering-v2"
///
///     [[entries]]
///     category = "csv_summary"
///     tier = 0
///     rank = 0
/// "#).unwrap();
///
/// assert_eq!(doctrine.version(), "tiering-v2");
/// ```
pub fn doctrine_from_toml(toml_str: &str) -> Result<Doctrine, ConfigError> {
    Ok(toml::from_str(toml_str)?)
}

/// Parse a doctrine table from JSON
pub fn doctrine_from_json(json_str: &str) -> Result<Doctrine, ConfigError> {
    Ok(serde_json::from_str(json_str)?)
}

/// Load a doctrine table, choosing the format by file extension
pub fn load_doctrine<P: AsRef<Path>>(path: P) -> Result<Doctrine, ConfigError> {
    let path = path.as_ref();
    let contents = read(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => doctrine_from_toml(&contents),
        Some("json") => doctrine_from_json(&contents),
        _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    }
}
