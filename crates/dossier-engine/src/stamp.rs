//! Tier stamper - attaches doctrine tiers to candidates

use crate::error::{ClassificationError, UnknownCategory};
use dossier_domain::{Candidate, Doctrine, StampedItem};

/// Maps each candidate's category to its doctrine tier
///
/// Fails closed: a single unknown category rejects the whole batch. There
/// is no fallback tier.
pub struct TierStamper<'d> {
    doctrine: &'d Doctrine,
}

impl<'d> TierStamper<'d> {
    /// Create a stamper for a doctrine
    pub fn new(doctrine: &'d Doctrine) -> Self {
        Self { doctrine }
    }

    /// Stamp every candidate, or report every unknown category
    pub fn stamp(&self, candidates: Vec<Candidate>) -> Result<Vec<StampedItem>, ClassificationError> {
        let unknown: Vec<UnknownCategory> = candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| !self.doctrine.contains(&c.category))
            .map(|(index, c)| UnknownCategory {
                index,
                category: c.category.clone(),
            })
            .collect();

        if !unknown.is_empty() {
            return Err(ClassificationError {
                doctrine_version: self.doctrine.version().to_string(),
                unknown,
            });
        }

        Ok(candidates
            .into_iter()
            .filter_map(|candidate| {
                let entry = self.doctrine.lookup(&candidate.category)?;
                Some(StampedItem::stamp(candidate, entry))
            })
            .collect())
    }
}
