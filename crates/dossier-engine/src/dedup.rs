//! Stable-key deduplication

use crate::key::{DedupScope, StableKey};
use dossier_domain::StampedItem;
use std::collections::HashSet;

/// Result of a dedup pass
#[derive(Debug, Clone, Default)]
pub struct DedupOutcome {
    /// First occurrence of every key, in input order
    pub kept: Vec<StampedItem>,
    /// Keys of the items that were dropped, in input order
    pub dropped: Vec<StableKey>,
}

/// Collapses items with byte-equal stable keys, first occurrence wins
///
/// Owns its seen-set, so build one per run; nothing is shared between runs.
///
/// # Examples
///
/// ```
/// use dossier_domain::{Candidate, Doctrine, StampedItem};
/// use dossier_engine::{DedupScope, Deduper};
///
/// let doctrine = Doctrine::builtin_v1();
/// let entry = doctrine.lookup("case_study").unwrap();
/// let items = vec![
///     StampedItem::stamp(Candidate::new("case_study").with_markdown_id("m1").with_title("First"), entry),
///     StampedItem::stamp(Candidate::new("case_study").with_markdown_id("m1").with_title("Second"), entry),
/// ];
///
/// let outcome = Deduper::new(DedupScope::CrossSource).dedupe(items);
/// assert_eq!(outcome.kept.len(), 1);
/// assert_eq!(outcome.kept[0].candidate().title_text(), "First");
/// ```
#[derive(Debug)]
pub struct Deduper {
    scope: DedupScope,
    seen: HashSet<StableKey>,
}

impl Deduper {
    /// Create an empty deduper
    pub fn new(scope: DedupScope) -> Self {
        Self {
            scope,
            seen: HashSet::new(),
        }
    }

    /// Record the item's key, or return it if it was already seen
    pub fn admit(&mut self, item: &StampedItem) -> Result<(), StableKey> {
        let key = StableKey::derive(item.candidate(), self.scope);
        if self.seen.contains(&key) {
            return Err(key);
        }
        self.seen.insert(key);
        Ok(())
    }

    /// Drop every item whose key was already seen
    pub fn dedupe(mut self, items: Vec<StampedItem>) -> DedupOutcome {
        let mut outcome = DedupOutcome::default();
        for item in items {
            match self.admit(&item) {
                Ok(()) => outcome.kept.push(item),
                Err(key) => {
                    tracing::debug!(key = key.as_str(), "duplicate dropped");
                    outcome.dropped.push(key);
                }
            }
        }
        outcome
    }
}
