//! Evidence engine - drives one build through every phase

use crate::bundle::EvidenceBundle;
use crate::cap::{cap, renumber};
use crate::config::EngineConfig;
use crate::dedup::Deduper;
use crate::diagnostics::{Phase, RunDiagnostics, Warning};
use crate::error::EngineError;
use crate::filter::PlaceholderFilter;
use crate::order::CanonicalOrderer;
use crate::stamp::TierStamper;
use crate::validator::IntegrityValidator;
use dossier_domain::{Candidate, Doctrine};
use uuid::Uuid;

/// Turns collector candidates into a published [`EvidenceBundle`]
///
/// Holds no state between builds; each call to [`EvidenceEngine::build`]
/// owns its candidates and its deduper, so one engine can serve concurrent
/// callers through a shared reference.
///
/// # Examples
///
/// ```
/// use dossier_domain::Candidate;
/// use dossier_engine::EvidenceEngine;
///
/// let engine = EvidenceEngine::with_defaults();
/// let bundle = engine
///     .build(vec![
///         Candidate::new("case_study").with_title("Win").with_url("https://acme.io/win"),
///         Candidate::new("csv_summary").with_title("CSV Pop"),
///     ])
///     .unwrap();
///
/// assert_eq!(bundle.claims[0].tier_group, "csv_summary");
/// assert_eq!(bundle.claims[1].claim_id.to_string(), "CLM-002");
/// ```
#[derive(Debug, Clone)]
pub struct EvidenceEngine {
    doctrine: Doctrine,
    config: EngineConfig,
}

impl EvidenceEngine {
    /// Create an engine, checking the configuration against the doctrine
    pub fn new(doctrine: Doctrine, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate_for(&doctrine)?;
        Ok(Self { doctrine, config })
    }

    /// Engine with the built-in doctrine and default configuration
    pub fn with_defaults() -> Self {
        Self {
            doctrine: Doctrine::builtin_v1(),
            config: EngineConfig::default(),
        }
    }

    /// Doctrine in use
    pub fn doctrine(&self) -> &Doctrine {
        &self.doctrine
    }

    /// Configuration in use
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run every phase and publish a bundle, or fail without one
    pub fn build(&self, candidates: Vec<Candidate>) -> Result<EvidenceBundle, EngineError> {
        let run_id = Uuid::now_v7();
        let span = tracing::info_span!(
            "evidence_build",
            %run_id,
            doctrine_version = self.doctrine.version()
        );
        let _guard = span.enter();

        tracing::info!("Building evidence bundle from {} candidates", candidates.len());

        let mut diagnostics = RunDiagnostics::new(candidates.len());
        let max_items = self.config.effective_max_items();
        diagnostics.max_items = max_items;
        if max_items != self.config.max_items {
            diagnostics.warn(Warning::MaxItemsClamped {
                requested: self.config.max_items,
                effective: max_items,
            });
        }

        let items_in = candidates.len();
        let stamped = TierStamper::new(&self.doctrine)
            .stamp(candidates)
            .inspect_err(|e| tracing::error!("Stamp failed: {}", e))?;
        diagnostics.record_phase(Phase::Stamp, items_in, stamped.len());

        let validator = IntegrityValidator::new(&self.doctrine, &self.config.readiness);
        validator
            .check_stamped(&stamped)
            .inspect_err(|e| tracing::error!("Foundation check failed, no bundle published: {}", e))?;

        let items_in = stamped.len();
        let filtered = PlaceholderFilter::new(&self.config.placeholder).filter(stamped);
        for rejection in &filtered.rejected {
            diagnostics.record_rejection(rejection.reason.kind());
        }
        diagnostics.record_phase(Phase::Filter, items_in, filtered.kept.len());

        let items_in = filtered.kept.len();
        let deduped = Deduper::new(self.config.dedup_scope).dedupe(filtered.kept);
        diagnostics.duplicates_dropped = deduped.dropped.len();
        diagnostics.record_phase(Phase::Dedup, items_in, deduped.kept.len());

        let items_in = deduped.kept.len();
        let ordered = CanonicalOrderer::new(self.config.dedup_scope).order(deduped.kept);
        diagnostics.record_phase(Phase::Order, items_in, ordered.len());

        let items_in = ordered.len();
        let capped = cap(ordered, max_items);
        if capped.dropped > 0 {
            diagnostics.warn(Warning::Capacity {
                dropped: capped.dropped,
                max_items,
            });
        }
        diagnostics.record_phase(Phase::Cap, items_in, capped.kept.len());

        let items_in = capped.kept.len();
        let claims = renumber(capped.kept);
        diagnostics.record_phase(Phase::Renumber, items_in, claims.len());

        let readiness = validator
            .validate(&claims)
            .inspect_err(|e| tracing::error!("Validation failed, no bundle published: {}", e))?;
        diagnostics.record_phase(Phase::Validate, claims.len(), claims.len());

        for requirement in &self.config.readiness {
            if !readiness.is_met(&requirement.name) {
                diagnostics.warn(Warning::EmptyTier {
                    requirement: requirement.name.clone(),
                    blocking: requirement.blocking,
                });
            }
        }

        tracing::info!(
            claims = claims.len(),
            synthesis_safe = readiness.synthesis_safe,
            warnings = diagnostics.warnings.len(),
            "Evidence bundle published"
        );

        Ok(EvidenceBundle::assemble(claims, readiness, &self.doctrine, diagnostics))
    }
}

/// Build a bundle with default rules, a given doctrine and a cap
///
/// Readiness requirements naming categories the doctrine lacks are dropped
/// rather than rejected, so any valid doctrine works here.
pub fn build(
    candidates: Vec<Candidate>,
    doctrine: &Doctrine,
    max_items: usize,
) -> Result<EvidenceBundle, EngineError> {
    let config = EngineConfig::default()
        .with_max_items(max_items)
        .retain_requirements_for(doctrine);
    EvidenceEngine::new(doctrine.clone(), config)?.build(candidates)
}
