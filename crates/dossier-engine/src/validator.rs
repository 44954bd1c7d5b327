//! Integrity validator - the last gate before a bundle is published

use crate::config::ReadinessRequirement;
use crate::error::IntegrityError;
use dossier_domain::{ClaimId, Doctrine, EvidenceItem, StampedItem, FOUNDATION_CATEGORY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whether enough tier groups are present for synthesis to proceed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readiness {
    /// Foundation present and every blocking requirement met
    pub synthesis_safe: bool,

    /// Requirement name (plus `csv_summary`) to whether it was met
    pub requirements: BTreeMap<String, bool>,
}

impl Readiness {
    /// Whether a named requirement was met; unknown names are unmet
    pub fn is_met(&self, name: &str) -> bool {
        self.requirements.get(name).copied().unwrap_or(false)
    }

    /// Names of unmet requirements, sorted
    pub fn unmet(&self) -> Vec<&str> {
        self.requirements
            .iter()
            .filter(|(_, met)| !**met)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Checks published claims against the doctrine and readiness requirements
///
/// Hard failures return [`IntegrityError`]; unmet requirements only show up
/// in the returned [`Readiness`].
pub struct IntegrityValidator<'a> {
    doctrine: &'a Doctrine,
    requirements: &'a [ReadinessRequirement],
}

impl<'a> IntegrityValidator<'a> {
    /// Create a validator
    pub fn new(doctrine: &'a Doctrine, requirements: &'a [ReadinessRequirement]) -> Self {
        Self {
            doctrine,
            requirements,
        }
    }

    /// Validate claims in published order
    ///
    /// Checks, in order: tier metadata on every claim, exactly one
    /// foundation claim, non-decreasing doctrine rank, dense claim ids.
    pub fn validate(&self, claims: &[EvidenceItem]) -> Result<Readiness, IntegrityError> {
        let mut ranks = Vec::with_capacity(claims.len());
        for claim in claims {
            ranks.push(self.check_metadata(claim)?);
        }

        let found = claims
            .iter()
            .filter(|c| c.tier_group == FOUNDATION_CATEGORY)
            .count();
        if found != 1 {
            return Err(IntegrityError::FoundationCount { found });
        }

        for (i, pair) in ranks.windows(2).enumerate() {
            if pair[1] < pair[0] {
                let claim = &claims[i + 1];
                return Err(IntegrityError::OutOfOrder {
                    claim_id: claim.claim_id,
                    tier_group: claim.tier_group.clone(),
                });
            }
        }

        let mut expected = ClaimId::FIRST;
        for claim in claims {
            if claim.claim_id != expected {
                return Err(IntegrityError::NonSequentialClaimId {
                    expected,
                    found: claim.claim_id,
                });
            }
            expected = expected.successor();
        }

        Ok(self.readiness(claims))
    }

    /// Require exactly one foundation item among freshly stamped candidates
    ///
    /// Runs before filtering and dedup, so a duplicated or placeholder
    /// foundation fails the build instead of being dropped.
    pub fn check_stamped(&self, items: &[StampedItem]) -> Result<(), IntegrityError> {
        let found = items
            .iter()
            .filter(|i| i.tier_group() == FOUNDATION_CATEGORY)
            .count();
        if found != 1 {
            return Err(IntegrityError::FoundationCount { found });
        }
        Ok(())
    }

    fn check_metadata(&self, claim: &EvidenceItem) -> Result<u32, IntegrityError> {
        // Doctrine categories are never empty, so a blank group misses here too
        let Some(entry) = self.doctrine.lookup(&claim.tier_group) else {
            return Err(IntegrityError::MissingTierMetadata {
                claim_id: claim.claim_id,
                tier_group: claim.tier_group.clone(),
            });
        };
        if entry.tier != claim.tier {
            return Err(IntegrityError::TierMismatch {
                claim_id: claim.claim_id,
                tier_group: claim.tier_group.clone(),
                expected: entry.tier,
                found: claim.tier,
            });
        }
        Ok(entry.rank)
    }

    fn readiness(&self, claims: &[EvidenceItem]) -> Readiness {
        let present = |category: &str| claims.iter().any(|c| c.tier_group == category);

        let foundation = present(FOUNDATION_CATEGORY);
        let mut requirements = BTreeMap::new();
        requirements.insert(FOUNDATION_CATEGORY.to_string(), foundation);

        let mut synthesis_safe = foundation;
        for requirement in self.requirements {
            let met = requirement.categories.iter().any(|c| present(c));
            if requirement.blocking && !met {
                synthesis_safe = false;
            }
            requirements.insert(requirement.name.clone(), met);
        }

        Readiness {
            synthesis_safe,
            requirements,
        }
    }
}
