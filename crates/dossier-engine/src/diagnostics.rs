//! Run-level diagnostics
//!
//! Collected while a build runs and published inside the bundle, so callers
//! can tell "published with warnings" from "published clean" without reading
//! logs. Every collection is ordered to keep serialized output identical
//! across runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Phases of a build, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Tier stamping
    Stamp,
    /// Placeholder filtering
    Filter,
    /// Stable-key deduplication
    Dedup,
    /// Canonical ordering
    Order,
    /// Capacity capping
    Cap,
    /// Claim renumbering
    Renumber,
    /// Integrity validation
    Validate,
}

impl Phase {
    /// Phase name as used in logs and diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Stamp => "stamp",
            Phase::Filter => "filter",
            Phase::Dedup => "dedup",
            Phase::Order => "order",
            Phase::Cap => "cap",
            Phase::Renumber => "renumber",
            Phase::Validate => "validate",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Item counts entering and leaving one phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseCount {
    /// Which phase
    pub phase: Phase,
    /// Items handed to the phase
    pub items_in: usize,
    /// Items the phase produced
    pub items_out: usize,
}

/// Non-fatal conditions recorded during a build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// The capper dropped items
    Capacity {
        /// Items dropped
        dropped: usize,
        /// Effective cap
        max_items: usize,
    },

    /// An expected tier group produced no items
    EmptyTier {
        /// Readiness requirement that went unmet
        requirement: String,
        /// Whether the requirement gates synthesis
        blocking: bool,
    },

    /// Requested max items was outside the allowed range
    MaxItemsClamped {
        /// Value the caller asked for
        requested: usize,
        /// Value actually used
        effective: usize,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::Capacity { dropped, max_items } => {
                write!(f, "capacity: dropped {} item(s) beyond max {}", dropped, max_items)
            }
            Warning::EmptyTier { requirement, blocking } => {
                let kind = if *blocking { "blocking" } else { "advisory" };
                write!(f, "empty tier: no items for {} requirement '{}'", kind, requirement)
            }
            Warning::MaxItemsClamped { requested, effective } => {
                write!(f, "max items {} clamped to {}", requested, effective)
            }
        }
    }
}

/// Diagnostics for one build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunDiagnostics {
    /// Candidates handed to the engine
    pub candidates: usize,

    /// Per-phase item counts, in execution order
    pub phases: Vec<PhaseCount>,

    /// Placeholder rejections by reason
    pub rejected_by_reason: BTreeMap<String, usize>,

    /// Items collapsed by deduplication
    pub duplicates_dropped: usize,

    /// Effective cap after clamping
    pub max_items: usize,

    /// Non-fatal conditions, in the order they were raised
    pub warnings: Vec<Warning>,
}

impl RunDiagnostics {
    /// Start diagnostics for a batch of candidates
    pub fn new(candidates: usize) -> Self {
        Self {
            candidates,
            ..Self::default()
        }
    }

    /// Record a phase's input and output sizes
    pub fn record_phase(&mut self, phase: Phase, items_in: usize, items_out: usize) {
        tracing::debug!(phase = phase.as_str(), items_in, items_out, "phase complete");
        self.phases.push(PhaseCount {
            phase,
            items_in,
            items_out,
        });
    }

    /// Record one placeholder rejection
    pub fn record_rejection(&mut self, reason: &str) {
        *self.rejected_by_reason.entry(reason.to_string()).or_insert(0) += 1;
    }

    /// Record a warning and log it
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// Whether any warning was raised
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Total placeholder rejections
    pub fn total_rejected(&self) -> usize {
        self.rejected_by_reason.values().sum()
    }

    /// Counts for one phase, if it ran
    pub fn phase(&self, phase: Phase) -> Option<&PhaseCount> {
        self.phases.iter().find(|p| p.phase == phase)
    }

    /// Human-readable report
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Evidence Build Summary".to_string(),
            "======================".to_string(),
            format!("Candidates: {}", self.candidates),
            format!("Max items: {}", self.max_items),
            String::new(),
        ];

        if !self.phases.is_empty() {
            lines.push("Phases:".to_string());
            for p in &self.phases {
                lines.push(format!("  {:<9} {:>4} -> {:>4}", p.phase.as_str(), p.items_in, p.items_out));
            }
            lines.push(String::new());
        }

        if !self.rejected_by_reason.is_empty() {
            lines.push("Rejected placeholders:".to_string());
            for (reason, count) in &self.rejected_by_reason {
                lines.push(format!("  {}: {}", reason, count));
            }
            lines.push(format!("  Total: {}", self.total_rejected()));
            lines.push(String::new());
        }

        lines.push(format!("Duplicates dropped: {}", self.duplicates_dropped));

        if !self.warnings.is_empty() {
            lines.push(String::new());
            lines.push("Warnings:".to_string());
            for warning in &self.warnings {
                lines.push(format!("  {}", warning));
            }
        }

        lines.join("\n")
    }
}
