//! Capacity capping and renumbering
//!
//! Both run on the final canonical order. Capping is plain prefix
//! truncation: tier priority is already encoded in the order, so no per-tier
//! quota is needed. Renumbering must run after capping so ids reflect final
//! positions.

use dossier_domain::{ClaimId, EvidenceItem, StampedItem};

/// Result of a cap pass
#[derive(Debug, Clone, Default)]
pub struct CapOutcome {
    /// The retained prefix
    pub kept: Vec<StampedItem>,
    /// How many items were cut
    pub dropped: usize,
}

/// Keep the first `max_items` items
pub fn cap(mut items: Vec<StampedItem>, max_items: usize) -> CapOutcome {
    let dropped = items.len().saturating_sub(max_items);
    items.truncate(max_items);
    CapOutcome {
        kept: items,
        dropped,
    }
}

/// Assign `CLM-001`, `CLM-002`, ... in order, keeping upstream ids as provenance
pub fn renumber(items: Vec<StampedItem>) -> Vec<EvidenceItem> {
    let mut next = ClaimId::FIRST;
    items
        .into_iter()
        .map(|item| {
            let id = next;
            next = next.successor();
            EvidenceItem::publish(id, item)
        })
        .collect()
}
