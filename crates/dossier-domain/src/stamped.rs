//! Candidates with tier metadata attached

use crate::{Candidate, DoctrineEntry, Tier};

/// A candidate stamped with its doctrine tier
///
/// Tier metadata is attached exactly once, from a doctrine entry, and the
/// fields are private so no later phase can alter it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampedItem {
    candidate: Candidate,
    tier: Tier,
    tier_group: String,
    rank: u32,
}

impl StampedItem {
    /// Attach the entry's tier, group and rank to a candidate
    pub fn stamp(candidate: Candidate, entry: &DoctrineEntry) -> Self {
        Self {
            candidate,
            tier: entry.tier,
            tier_group: entry.category.clone(),
            rank: entry.rank,
        }
    }

    /// The underlying candidate
    pub fn candidate(&self) -> &Candidate {
        &self.candidate
    }

    /// Doctrine tier
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Doctrine category this item was stamped under
    pub fn tier_group(&self) -> &str {
        &self.tier_group
    }

    /// Doctrine rank of the tier group
    pub fn rank(&self) -> u32 {
        self.rank
    }

    /// Release the candidate, e.g. when building the published form
    pub fn into_parts(self) -> (Candidate, Tier, String) {
        (self.candidate, self.tier, self.tier_group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamp_copies_entry() {
        let entry = DoctrineEntry::new("case_study", Tier::new(5).unwrap(), 50);
        let item = StampedItem::stamp(Candidate::new("case_study").with_title("Win"), &entry);

        assert_eq!(item.tier().value(), 5);
        assert_eq!(item.tier_group(), "case_study");
        assert_eq!(item.rank(), 50);
        assert_eq!(item.candidate().title_text(), "Win");
    }
}
