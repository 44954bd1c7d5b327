//! Doctrine table - the versioned mapping from category to tier and rank
//!
//! A doctrine is configuration, not code: changing which categories exist or
//! how they are prioritised means publishing a new version string. The table
//! is validated whenever it is constructed or deserialized, so a malformed
//! table can never reach the engine.

use crate::Tier;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Category of the single foundational (tier 0) item every run must publish
pub const FOUNDATION_CATEGORY: &str = "csv_summary";

/// Errors raised while validating a doctrine table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DoctrineError {
    /// Version string is blank
    #[error("Doctrine version must not be empty")]
    EmptyVersion,

    /// Table has no entries
    #[error("Doctrine '{0}' has no entries")]
    NoEntries(String),

    /// An entry has a blank category
    #[error("Doctrine entry with rank {rank} has an empty category")]
    EmptyCategory {
        /// Rank of the offending entry
        rank: u32,
    },

    /// Category listed twice
    #[error("Duplicate doctrine category: {0}")]
    DuplicateCategory(String),

    /// Two categories share a rank, which would break the total order
    #[error("Doctrine rank {rank} is shared by '{first}' and '{second}'")]
    DuplicateRank {
        /// The shared rank
        rank: u32,
        /// First category holding the rank
        first: String,
        /// Second category holding the rank
        second: String,
    },

    /// A higher tier is ranked ahead of a lower one
    #[error("Category '{higher}' (tier {higher_tier}) is ranked ahead of '{lower}' (tier {lower_tier})")]
    RankTierInversion {
        /// Category ranked first
        higher: String,
        /// Its tier
        higher_tier: Tier,
        /// Category ranked after it
        lower: String,
        /// Its tier
        lower_tier: Tier,
    },

    /// The foundation category is absent
    #[error("Doctrine is missing the foundation category 'csv_summary'")]
    MissingFoundation,

    /// Tier 0 is reserved for the foundation category
    #[error("Tier 0 is reserved for 'csv_summary', found '{category}' at tier {tier}")]
    FoundationTier {
        /// Category that violates the rule
        category: String,
        /// Its tier
        tier: Tier,
    },
}

/// One row of the doctrine table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctrineEntry {
    /// Semantic category (also the published `tier_group`)
    pub category: String,

    /// Coarse priority bucket
    pub tier: Tier,

    /// Unique total-order key; lower sorts first
    pub rank: u32,
}

impl DoctrineEntry {
    /// Create a new entry
    pub fn new(category: impl Into<String>, tier: Tier, rank: u32) -> Self {
        Self {
            category: category.into(),
            tier,
            rank,
        }
    }
}

/// Wire shape of a doctrine table: `{version, entries: [...]}`
///
/// Unvalidated; convert with `Doctrine::try_from`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctrineTable {
    /// Version string
    pub version: String,
    /// Rows in any order
    pub entries: Vec<DoctrineEntry>,
}

/// A validated, versioned doctrine table
///
/// Entries are held in rank order.
///
/// # Examples
///
/// ```
/// use dossier_domain::{Doctrine, DoctrineEntry, Tier};
///
/// let doctrine = Doctrine::new("custom-1", vec![
///     DoctrineEntry::new("case_study", Tier::new(5).unwrap(), 50),
///     DoctrineEntry::new("csv_summary", Tier::FOUNDATION, 0),
/// ]).unwrap();
///
/// assert_eq!(doctrine.ordered_tiers(), vec!["csv_summary", "case_study"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DoctrineTable", into = "DoctrineTable")]
pub struct Doctrine {
    version: String,
    entries: Vec<DoctrineEntry>,
    index: HashMap<String, usize>,
}

impl Doctrine {
    /// Build a doctrine, validating every invariant eagerly
    pub fn new(version: impl Into<String>, entries: Vec<DoctrineEntry>) -> Result<Self, DoctrineError> {
        let version = version.into();
        validate(&version, &entries)?;
        Ok(Self::assemble(version, entries))
    }

    /// The built-in `tiering-v1` doctrine
    pub fn builtin_v1() -> Self {
        let rows: [(&str, u8, u32); 15] = [
            (FOUNDATION_CATEGORY, 0, 0),
            ("markdown_industry_drivers", 1, 10),
            ("markdown_industry_risk", 1, 11),
            ("markdown_industry_opportunity", 1, 12),
            ("markdown_strategic", 2, 20),
            ("markdown_buyer_persona", 2, 21),
            ("supplier_profile", 3, 30),
            ("competitor_profile", 3, 31),
            ("coverage_summary", 4, 40),
            ("csv_signal", 4, 41),
            ("case_study", 5, 50),
            ("site_page", 6, 60),
            ("site_product", 6, 61),
            ("linkedin", 7, 70),
            ("web_reference", 7, 71),
        ];
        let entries = rows
            .iter()
            .map(|&(category, tier, rank)| DoctrineEntry::new(category, Tier(tier), rank))
            .collect();
        Self::assemble("tiering-v1".to_string(), entries)
    }

    /// Sort by rank and index by category; callers have already validated
    fn assemble(version: String, mut entries: Vec<DoctrineEntry>) -> Self {
        entries.sort_by_key(|e| e.rank);
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.category.clone(), i))
            .collect();
        Self {
            version,
            entries,
            index,
        }
    }

    /// Version string recorded in every bundle
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Entries in rank order
    pub fn entries(&self) -> &[DoctrineEntry] {
        &self.entries
    }

    /// Look up the entry for a category
    pub fn lookup(&self, category: &str) -> Option<&DoctrineEntry> {
        self.index.get(category).map(|&i| &self.entries[i])
    }

    /// Whether the category is known
    pub fn contains(&self, category: &str) -> bool {
        self.index.contains_key(category)
    }

    /// Categories in priority order
    pub fn ordered_tiers(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.category.as_str()).collect()
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty (never true for a validated doctrine)
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<DoctrineTable> for Doctrine {
    type Error = DoctrineError;

    fn try_from(table: DoctrineTable) -> Result<Self, Self::Error> {
        Doctrine::new(table.version, table.entries)
    }
}

impl From<Doctrine> for DoctrineTable {
    fn from(doctrine: Doctrine) -> Self {
        DoctrineTable {
            version: doctrine.version,
            entries: doctrine.entries,
        }
    }
}

fn validate(version: &str, entries: &[DoctrineEntry]) -> Result<(), DoctrineError> {
    if version.trim().is_empty() {
        return Err(DoctrineError::EmptyVersion);
    }
    if entries.is_empty() {
        return Err(DoctrineError::NoEntries(version.to_string()));
    }

    let mut categories: HashSet<&str> = HashSet::new();
    let mut ranks: HashMap<u32, &str> = HashMap::new();
    for entry in entries {
        if entry.category.trim().is_empty() {
            return Err(DoctrineError::EmptyCategory { rank: entry.rank });
        }
        if !categories.insert(entry.category.as_str()) {
            return Err(DoctrineError::DuplicateCategory(entry.category.clone()));
        }
        if let Some(first) = ranks.insert(entry.rank, entry.category.as_str()) {
            return Err(DoctrineError::DuplicateRank {
                rank: entry.rank,
                first: first.to_string(),
                second: entry.category.clone(),
            });
        }
        if entry.tier.is_foundation() && entry.category != FOUNDATION_CATEGORY {
            return Err(DoctrineError::FoundationTier {
                category: entry.category.clone(),
                tier: entry.tier,
            });
        }
        if entry.category == FOUNDATION_CATEGORY && !entry.tier.is_foundation() {
            return Err(DoctrineError::FoundationTier {
                category: entry.category.clone(),
                tier: entry.tier,
            });
        }
    }
    if !categories.contains(FOUNDATION_CATEGORY) {
        return Err(DoctrineError::MissingFoundation);
    }

    // Rank order must never contradict tier order
    let mut by_rank: Vec<&DoctrineEntry> = entries.iter().collect();
    by_rank.sort_by_key(|e| e.rank);
    for pair in by_rank.windows(2) {
        if pair[0].tier > pair[1].tier {
            return Err(DoctrineError::RankTierInversion {
                higher: pair[0].category.clone(),
                higher_tier: pair[0].tier,
                lower: pair[1].category.clone(),
                lower_tier: pair[1].tier,
            });
        }
    }

    Ok(())
}
