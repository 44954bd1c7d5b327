//! Stable keys - the deterministic identity used for dedup and tie-breaking

use dossier_domain::Candidate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How URL/title keys treat the source type
///
/// Keys derived from a markdown id or upstream claim id are unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupScope {
    /// Identical URL and title collapse even across source types
    #[default]
    CrossSource,

    /// Identical URL and title collapse only within one source type
    PerSource,
}

/// Deterministic identity of an evidence item
///
/// Ordering is byte-wise (`String`'s `Ord`), never locale-aware, so sorting
/// by key gives the same result on every platform.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StableKey(String);

impl StableKey {
    /// Derive the key for a candidate
    ///
    /// In priority order:
    /// 1. `md:<markdown_id>`
    /// 2. `cid:<upstream_claim_id>`
    /// 3. `u:<url>||t:<title>` (lower-cased, trimmed)
    /// 4. `x:<serialized candidate>`
    ///
    /// # Examples
    ///
    /// ```
    /// use dossier_domain::Candidate;
    /// use dossier_engine::{DedupScope, StableKey};
    ///
    /// let candidate = Candidate::new("site_page")
    ///     .with_url(" https://Acme.io/Pricing ")
    ///     .with_title("Pricing");
    /// let key = StableKey::derive(&candidate, DedupScope::CrossSource);
    /// assert_eq!(key.as_str(), "u:https://acme.io/pricing||t:pricing");
    /// ```
    pub fn derive(candidate: &Candidate, scope: DedupScope) -> Self {
        if let Some(id) = candidate.markdown_ref() {
            return Self(format!("md:{}", id));
        }
        if let Some(id) = candidate.upstream_ref() {
            return Self(format!("cid:{}", id));
        }

        let url = candidate.url_text().to_lowercase();
        let title = candidate.title_text().to_lowercase();
        if !url.is_empty() || !title.is_empty() {
            let key = match scope {
                DedupScope::CrossSource => format!("u:{}||t:{}", url, title),
                DedupScope::PerSource => {
                    format!("u:{}||t:{}||s:{}", url, title, candidate.source_type)
                }
            };
            return Self(key);
        }

        let structural = serde_json::to_string(candidate)
            .unwrap_or_else(|_| format!("{:?}", candidate));
        Self(format!("x:{}", structural))
    }

    /// The key text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
