//! Dossier Domain Layer
//!
//! Value types shared by every stage of evidence assembly. Nothing in this
//! crate performs I/O; collectors produce [`Candidate`]s, the engine turns them
//! into [`EvidenceItem`]s, and the [`Doctrine`] decides how they are tiered.
//!
//! ## Key Concepts
//!
//! - **Candidate**: an unvalidated evidence item tagged with a semantic category
//! - **Tier**: coarse priority bucket, 0 (foundational) through 7
//! - **Doctrine**: versioned mapping from category to `(tier, rank)`
//! - **StampedItem**: a candidate with its tier metadata attached, never altered afterward
//! - **EvidenceItem**: a published claim with a dense display id (`CLM-001`)
//!
//! ## Lifecycle
//!
//! ```text
//! Candidate → StampedItem → EvidenceItem
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod candidate;
pub mod claim;
pub mod doctrine;
pub mod stamped;
pub mod tier;

// Re-exports for convenience
pub use candidate::Candidate;
pub use claim::{ClaimId, EvidenceItem};
pub use doctrine::{Doctrine, DoctrineEntry, DoctrineError, DoctrineTable, FOUNDATION_CATEGORY};
pub use stamped::StampedItem;
pub use tier::{Tier, TierError};
