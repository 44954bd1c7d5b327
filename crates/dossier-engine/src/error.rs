//! Engine error types
//!
//! Every variant here is fatal: the run is abandoned and no bundle is
//! produced. Non-fatal conditions are reported through
//! [`crate::RunDiagnostics`] instead.

use crate::config::ConfigError;
use crate::diagnostics::Phase;
use dossier_domain::{ClaimId, DoctrineError, Tier};
use thiserror::Error;

/// A candidate whose category is not in the doctrine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory {
    /// Position of the candidate in the input
    pub index: usize,
    /// The unrecognised category
    pub category: String,
}

fn describe(unknown: &[UnknownCategory]) -> String {
    unknown
        .iter()
        .map(|u| format!("#{} '{}'", u.index, u.category))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Candidates declared categories the doctrine does not know
///
/// Raised for the whole batch; no fallback tier is ever assigned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown categories for doctrine '{doctrine_version}': {}", describe(.unknown))]
pub struct ClassificationError {
    /// Doctrine the batch was stamped against
    pub doctrine_version: String,
    /// Every offending candidate, in input order
    pub unknown: Vec<UnknownCategory>,
}

/// Published items violate an invariant downstream synthesis relies on
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    /// Tier group is empty or not part of the doctrine
    #[error("Claim {claim_id} is missing tier metadata (tier_group '{tier_group}')")]
    MissingTierMetadata {
        /// Offending claim
        claim_id: ClaimId,
        /// Tier group as published
        tier_group: String,
    },

    /// Tier disagrees with the doctrine entry for its group
    #[error("Claim {claim_id} in '{tier_group}' has tier {found}, doctrine says {expected}")]
    TierMismatch {
        /// Offending claim
        claim_id: ClaimId,
        /// Tier group as published
        tier_group: String,
        /// Tier from the doctrine
        expected: Tier,
        /// Tier as published
        found: Tier,
    },

    /// Not exactly one foundational item
    #[error("Expected exactly one csv_summary claim, found {found}")]
    FoundationCount {
        /// Number of csv_summary claims
        found: usize,
    },

    /// A claim is ranked ahead of its predecessor
    #[error("Claim {claim_id} ('{tier_group}') is out of doctrine order")]
    OutOfOrder {
        /// Offending claim
        claim_id: ClaimId,
        /// Its tier group
        tier_group: String,
    },

    /// Claim ids are not dense and sequential
    #[error("Expected claim id {expected}, found {found}")]
    NonSequentialClaimId {
        /// Id the position calls for
        expected: ClaimId,
        /// Id as published
        found: ClaimId,
    },
}

/// Errors that abort a build
#[derive(Error, Debug)]
pub enum EngineError {
    /// Stamping failed
    #[error(transparent)]
    Classification(#[from] ClassificationError),

    /// Validation failed
    #[error(transparent)]
    Integrity(#[from] IntegrityError),

    /// Doctrine table is malformed
    #[error("Doctrine error: {0}")]
    Doctrine(#[from] DoctrineError),

    /// Engine configuration is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// Phase that failed, for errors raised during a build
    pub fn phase(&self) -> Option<Phase> {
        match self {
            EngineError::Classification(_) => Some(Phase::Stamp),
            EngineError::Integrity(_) => Some(Phase::Validate),
            EngineError::Doctrine(_) | EngineError::Config(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_message_lists_every_category() {
        let err = ClassificationError {
            doctrine_version: "tiering-v1".to_string(),
            unknown: vec![
                UnknownCategory { index: 0, category: "podcast".to_string() },
                UnknownCategory { index: 3, category: "tweet".to_string() },
            ],
        };
        let message = err.to_string();
        assert!(message.contains("tiering-v1"));
        assert!(message.contains("#0 'podcast'"));
        assert!(message.contains("#3 'tweet'"));
    }

    #[test]
    fn test_phase_mapping() {
        let err = EngineError::from(IntegrityError::FoundationCount { found: 0 });
        assert_eq!(err.phase(), Some(Phase::Validate));
        assert_eq!(err.to_string(), "Expected exactly one csv_summary claim, found 0");

        let err = EngineError::from(DoctrineError::EmptyVersion);
        assert_eq!(err.phase(), None);
    }
}
