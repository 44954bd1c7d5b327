//! Canonical ordering by doctrine rank, then stable key

use crate::key::{DedupScope, StableKey};
use dossier_domain::StampedItem;

/// Sorts items into the published order
///
/// Primary key is the doctrine rank of the tier group (ascending), secondary
/// the stable key compared byte-wise. Once items are deduplicated no two
/// share a key, so the order is total and independent of input order.
pub struct CanonicalOrderer {
    scope: DedupScope,
}

impl CanonicalOrderer {
    /// Create an orderer; the scope must match the one used for dedup
    pub fn new(scope: DedupScope) -> Self {
        Self { scope }
    }

    /// Sort items into canonical order
    pub fn order(&self, mut items: Vec<StampedItem>) -> Vec<StampedItem> {
        items.sort_by_cached_key(|item| (item.rank(), StableKey::derive(item.candidate(), self.scope)));
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossier_domain::{Candidate, Doctrine};

    fn stamp(candidate: Candidate) -> StampedItem {
        let doctrine = Doctrine::builtin_v1();
        let entry = doctrine.lookup(&candidate.category).unwrap().clone();
        StampedItem::stamp(candidate, &entry)
    }

    fn groups(items: &[StampedItem]) -> Vec<&str> {
        items.iter().map(|i| i.tier_group()).collect()
    }

    #[test]
    fn test_rank_is_primary() {
        let items = vec![
            stamp(Candidate::new("linkedin").with_url("https://linkedin.com/in/a")),
            stamp(Candidate::new("markdown_industry_risk").with_markdown_id("r1")),
            stamp(Candidate::new("csv_summary").with_title("CSV Pop")),
            stamp(Candidate::new("markdown_industry_drivers").with_markdown_id("d1")),
        ];

        let ordered = CanonicalOrderer::new(DedupScope::CrossSource).order(items);
        assert_eq!(
            groups(&ordered),
            vec!["csv_summary", "markdown_industry_drivers", "markdown_industry_risk", "linkedin"]
        );
    }

    #[test]
    fn test_stable_key_breaks_ties_bytewise() {
        let items = vec![
            stamp(Candidate::new("case_study").with_url("https://b.io").with_title("b")),
            stamp(Candidate::new("case_study").with_markdown_id("z9")),
            stamp(Candidate::new("case_study").with_upstream_claim_id("CLM-002")),
            stamp(Candidate::new("case_study").with_url("https://a.io").with_title("a")),
        ];

        let ordered = CanonicalOrderer::new(DedupScope::CrossSource).order(items);
        let keys: Vec<String> = ordered
            .iter()
            .map(|i| StableKey::derive(i.candidate(), DedupScope::CrossSource).to_string())
            .collect();
        assert_eq!(
            keys,
            vec![
                "cid:CLM-002",
                "md:z9",
                "u:https://a.io||t:a",
                "u:https://b.io||t:b",
            ]
        );
    }

    #[test]
    fn test_order_ignores_input_order() {
        let a = stamp(Candidate::new("site_page").with_url("https://acme.io/a").with_title("A"));
        let b = stamp(Candidate::new("site_page").with_url("https://acme.io/b").with_title("B"));
        let c = stamp(Candidate::new("case_study").with_markdown_id("c"));

        let orderer = CanonicalOrderer::new(DedupScope::CrossSource);
        let first = orderer.order(vec![a.clone(), b.clone(), c.clone()]);
        let second = orderer.order(vec![b, c, a]);
        assert_eq!(first, second);
    }
}
