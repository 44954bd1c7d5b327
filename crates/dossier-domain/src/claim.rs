//! Claim module - the published form of an evidence item

use crate::{StampedItem, Tier};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

const CLAIM_PREFIX: &str = "CLM-";

/// Dense, presentation-layer claim identifier (`CLM-001`, `CLM-002`, ...)
///
/// Ids are assigned by position in the final ordered bundle, so they are
/// only meaningful within one bundle. The upstream id is kept separately as
/// provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClaimId(NonZeroU32);

impl ClaimId {
    /// The first id of every bundle, `CLM-001`
    pub const FIRST: ClaimId = ClaimId(NonZeroU32::MIN);

    /// The id following this one
    pub fn successor(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Id for a 1-based position
    ///
    /// # Examples
    ///
    /// ```
    /// use dossier_domain::ClaimId;
    ///
    /// assert_eq!(ClaimId::from_position(3).unwrap().to_string(), "CLM-003");
    /// assert!(ClaimId::from_position(0).is_none());
    /// ```
    pub fn from_position(position: usize) -> Option<Self> {
        u32::try_from(position).ok().and_then(NonZeroU32::new).map(Self)
    }

    /// The 1-based position
    pub fn position(&self) -> u32 {
        self.0.get()
    }

    /// Parse a `CLM-nnn` string
    ///
    /// # Examples
    ///
    /// ```
    /// use dossier_domain::ClaimId;
    ///
    /// let id = ClaimId::parse("CLM-012").unwrap();
    /// assert_eq!(id.position(), 12);
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        let digits = s
            .strip_prefix(CLAIM_PREFIX)
            .ok_or_else(|| format!("Invalid claim id '{}': missing {} prefix", s, CLAIM_PREFIX))?;
        if digits.len() < 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("Invalid claim id '{}': expected at least 3 digits", s));
        }
        let value: u32 = digits
            .parse()
            .map_err(|e| format!("Invalid claim id '{}': {}", s, e))?;
        NonZeroU32::new(value)
            .map(Self)
            .ok_or_else(|| format!("Invalid claim id '{}': positions start at 1", s))
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", CLAIM_PREFIX, self.0.get())
    }
}

impl TryFrom<String> for ClaimId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ClaimId> for String {
    fn from(id: ClaimId) -> Self {
        id.to_string()
    }
}

/// A validated, tiered, deduplicated, renumbered claim
///
/// Created once at renumbering time and never changed afterward. Text fields
/// the collector left out are published as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// Dense display id
    pub claim_id: ClaimId,

    /// Upstream claim id, kept for provenance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_id_orig: Option<String>,

    /// Collector-level origin
    pub source_type: String,

    /// Headline
    #[serde(default)]
    pub title: String,

    /// Citation URL
    #[serde(default)]
    pub url: String,

    /// Narrative body
    #[serde(default)]
    pub summary: String,

    /// Verbatim quotation
    #[serde(default)]
    pub quote: String,

    /// Collector tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Markdown section id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown_id: Option<String>,

    /// Doctrine tier
    pub tier: Tier,

    /// Doctrine category
    pub tier_group: String,
}

impl EvidenceItem {
    /// Publish a stamped item under the given id
    pub fn publish(claim_id: ClaimId, item: StampedItem) -> Self {
        let (candidate, tier, tier_group) = item.into_parts();
        Self {
            claim_id,
            claim_id_orig: candidate.upstream_claim_id,
            source_type: candidate.source_type,
            title: candidate.title.unwrap_or_default(),
            url: candidate.url.unwrap_or_default(),
            summary: candidate.summary.unwrap_or_default(),
            quote: candidate.quote.unwrap_or_default(),
            tag: candidate.tag,
            markdown_id: candidate.markdown_id,
            tier,
            tier_group,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Candidate, DoctrineEntry};

    #[test]
    fn test_claim_id_display() {
        assert_eq!(ClaimId::from_position(1).unwrap().to_string(), "CLM-001");
        assert_eq!(ClaimId::from_position(42).unwrap().to_string(), "CLM-042");
        assert_eq!(ClaimId::from_position(1234).unwrap().to_string(), "CLM-1234");
    }

    #[test]
    fn test_claim_id_sequence() {
        let second = ClaimId::FIRST.successor();
        assert_eq!(ClaimId::FIRST.to_string(), "CLM-001");
        assert_eq!(second.to_string(), "CLM-002");
        assert!(ClaimId::FIRST < second);
    }

    #[test]
    fn test_claim_id_invalid_string() {
        assert!(ClaimId::parse("CLM-000").is_err());
        assert!(ClaimId::parse("CLM-1").is_err());
        assert!(ClaimId::parse("clm-001").is_err());
        assert!(ClaimId::parse("CLM-00a").is_err());
        assert!(ClaimId::parse("").is_err());
    }

    #[test]
    fn test_publish_keeps_provenance() {
        let entry = DoctrineEntry::new("site_page", Tier::new(6).unwrap(), 60);
        let candidate = Candidate::new("site_page")
            .with_title("Pricing")
            .with_url("https://acme.io/pricing")
            .with_upstream_claim_id("CLM-019");
        let item = EvidenceItem::publish(
            ClaimId::from_position(2).unwrap(),
            StampedItem::stamp(candidate, &entry),
        );

        assert_eq!(item.claim_id.to_string(), "CLM-002");
        assert_eq!(item.claim_id_orig.as_deref(), Some("CLM-019"));
        assert_eq!(item.summary, "");
        assert_eq!(item.tier_group, "site_page");
    }

    #[test]
    fn test_serialized_shape() {
        let entry = DoctrineEntry::new("csv_summary", Tier::FOUNDATION, 0);
        let item = EvidenceItem::publish(
            ClaimId::from_position(1).unwrap(),
            StampedItem::stamp(Candidate::new("csv_summary").with_title("CSV Pop"), &entry),
        );
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["claim_id"], "CLM-001");
        assert_eq!(json["tier"], 0);
        assert_eq!(json["url"], "");
        assert!(json.get("claim_id_orig").is_none());
        assert!(json.get("markdown_id").is_none());
    }
}
