//! Dossier Engine
//!
//! Turns best-effort evidence candidates into a deterministic, tiered,
//! validated evidence bundle.
//!
//! A build runs these phases in order, each consuming the whole list:
//! - Stamp: attach doctrine tier and group, failing on unknown categories
//! - Filter: drop placeholder, empty and junk-URL items
//! - Dedup: collapse items with equal stable keys, first occurrence wins
//! - Order: sort by doctrine rank, then stable key
//! - Cap: keep the first `max_items`
//! - Renumber: assign `CLM-001`, `CLM-002`, ...
//! - Validate: enforce integrity and compute readiness
//!
//! # Examples
//!
//! ```
//! use dossier_domain::{Candidate, Doctrine};
//!
//! let candidates = vec![
//!     Candidate::new("markdown_industry_risk").with_title("Risk A"),
//!     Candidate::new("csv_summary").with_title("CSV Pop"),
//!     Candidate::new("markdown_industry_risk").with_title("Risk A").with_markdown_id("m1"),
//! ];
//!
//! let bundle = dossier_engine::build(candidates, &Doctrine::builtin_v1(), 10).unwrap();
//! assert_eq!(bundle.claims.len(), 2);
//! assert_eq!(bundle.claims[0].tier_group, "csv_summary");
//! assert_eq!(bundle.claims[1].markdown_id.as_deref(), Some("m1"));
//! ```

#![warn(missing_docs)]

mod bundle;
mod cap;
mod config;
mod dedup;
mod diagnostics;
mod engine;
mod error;
mod filter;
mod key;
mod order;
mod stamp;
mod validator;

pub use bundle::{BundleCounts, DoctrineStamp, EvidenceBundle};
pub use cap::{cap, renumber, CapOutcome};
pub use config::{
    doctrine_from_json, doctrine_from_toml, load_doctrine, ConfigError, EngineConfig,
    PlaceholderRules, ReadinessRequirement, MAX_MAX_ITEMS, MIN_MAX_ITEMS,
};
pub use dedup::{DedupOutcome, Deduper};
pub use diagnostics::{Phase, PhaseCount, RunDiagnostics, Warning};
pub use engine::{build, EvidenceEngine};
pub use error::{ClassificationError, EngineError, IntegrityError, UnknownCategory};
pub use filter::{FilterOutcome, PlaceholderFilter, Rejection, RejectionReason};
pub use key::{DedupScope, StableKey};
pub use order::CanonicalOrderer;
pub use stamp::TierStamper;
pub use validator::{IntegrityValidator, Readiness};
