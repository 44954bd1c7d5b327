//! Evidence bundle - the single artifact a build publishes

use crate::diagnostics::RunDiagnostics;
use crate::validator::Readiness;
use dossier_domain::{ClaimId, Doctrine, EvidenceItem, Tier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Claim counts and readiness flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleCounts {
    /// Claims per tier; every tier `0..=7` is present, zero or not
    pub by_tier: BTreeMap<Tier, usize>,

    /// Readiness for downstream synthesis
    pub readiness: Readiness,
}

impl BundleCounts {
    /// Count claims per tier
    pub fn tally(claims: &[EvidenceItem], readiness: Readiness) -> Self {
        let mut by_tier: BTreeMap<Tier, usize> = Tier::all().map(|t| (t, 0)).collect();
        for claim in claims {
            *by_tier.entry(claim.tier).or_insert(0) += 1;
        }
        Self { by_tier, readiness }
    }
}

/// Doctrine the bundle was built against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctrineStamp {
    /// Doctrine version
    pub version: String,

    /// Categories in rank order
    pub ordered_tiers: Vec<String>,
}

impl From<&Doctrine> for DoctrineStamp {
    fn from(doctrine: &Doctrine) -> Self {
        Self {
            version: doctrine.version().to_string(),
            ordered_tiers: doctrine
                .ordered_tiers()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Ordered, validated claims plus the metadata downstream consumers need
///
/// Serializes to the same bytes for the same input, doctrine and
/// configuration; nothing run-specific (ids, timestamps) is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceBundle {
    /// Claims in canonical order, numbered from `CLM-001`
    pub claims: Vec<EvidenceItem>,

    /// Per-tier counts and readiness
    pub counts: BundleCounts,

    /// Doctrine version and ordering
    pub doctrine: DoctrineStamp,

    /// What happened during the build
    #[serde(default)]
    pub diagnostics: RunDiagnostics,
}

impl EvidenceBundle {
    /// Assemble a bundle from validated claims
    pub fn assemble(
        claims: Vec<EvidenceItem>,
        readiness: Readiness,
        doctrine: &Doctrine,
        diagnostics: RunDiagnostics,
    ) -> Self {
        let counts = BundleCounts::tally(&claims, readiness);
        Self {
            claims,
            counts,
            doctrine: DoctrineStamp::from(doctrine),
            diagnostics,
        }
    }

    /// Look up a claim by its display id
    pub fn claim(&self, id: ClaimId) -> Option<&EvidenceItem> {
        let index = usize::try_from(id.position()).ok()?.checked_sub(1)?;
        self.claims.get(index).filter(|c| c.claim_id == id)
    }

    /// The foundational claim, if present
    pub fn foundation(&self) -> Option<&EvidenceItem> {
        self.claims.iter().find(|c| c.tier.is_foundation())
    }

    /// Whether downstream synthesis may run at full confidence
    pub fn synthesis_safe(&self) -> bool {
        self.counts.readiness.synthesis_safe
    }

    /// Serialize to compact JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to indented JSON
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a persisted bundle
    ///
    /// Only the shape is checked; run the claims through
    /// [`crate::IntegrityValidator`] to re-check invariants.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
