//! Integration tests for dossier-engine
//!
//! These tests drive full builds through the public API.

use dossier_domain::{Candidate, Doctrine, Tier};
use dossier_engine::{
    build, doctrine_from_toml, DedupScope, EngineConfig, EngineError, EvidenceBundle,
    EvidenceEngine, IntegrityError, IntegrityValidator, Phase, Warning,
};

fn csv() -> Candidate {
    Candidate::new("csv_summary").with_title("CSV Pop")
}

#[test]
fn test_concrete_scenario() {
    let candidates = vec![
        Candidate::new("markdown_industry_risk").with_title("Risk A"),
        csv(),
        Candidate::new("markdown_industry_risk")
            .with_title("Risk A")
            .with_markdown_id("m1"),
    ];

    let bundle = build(candidates, &Doctrine::builtin_v1(), 10).unwrap();

    assert_eq!(bundle.claims.len(), 2);

    let first = &bundle.claims[0];
    assert_eq!(first.claim_id.to_string(), "CLM-001");
    assert_eq!(first.tier, Tier::FOUNDATION);
    assert_eq!(first.tier_group, "csv_summary");

    let second = &bundle.claims[1];
    assert_eq!(second.claim_id.to_string(), "CLM-002");
    assert_eq!(second.tier_group, "markdown_industry_risk");
    assert_eq!(second.markdown_id.as_deref(), Some("m1"));

    // The unanchored copy never reaches dedup
    assert_eq!(bundle.diagnostics.rejected_by_reason["unanchored"], 1);
    assert_eq!(bundle.diagnostics.duplicates_dropped, 0);
}

#[test]
fn test_markdown_id_dedup_keeps_first() {
    let candidates = vec![
        csv(),
        Candidate::new("markdown_strategic")
            .with_title("First")
            .with_markdown_id("s1"),
        Candidate::new("markdown_strategic")
            .with_title("Second")
            .with_summary("more detail")
            .with_markdown_id("s1"),
    ];

    let bundle = build(candidates, &Doctrine::builtin_v1(), 10).unwrap();

    assert_eq!(bundle.claims.len(), 2);
    assert_eq!(bundle.claims[1].title, "First");
    assert_eq!(bundle.claims[1].summary, "");
    assert_eq!(bundle.diagnostics.duplicates_dropped, 1);
}

#[test]
fn test_unknown_category_fails_closed() {
    let candidates = vec![
        csv(),
        Candidate::new("case_study").with_title("Win").with_url("https://acme.io/win"),
        Candidate::new("podcast").with_title("Ep 4").with_url("https://pod.io/4"),
    ];

    let err = build(candidates, &Doctrine::builtin_v1(), 10).unwrap_err();
    match err {
        EngineError::Classification(e) => {
            assert_eq!(e.unknown.len(), 1);
            assert_eq!(e.unknown[0].index, 2);
            assert_eq!(e.unknown[0].category, "podcast");
        }
        other => panic!("expected classification error, got {:?}", other),
    }
}

#[test]
fn test_foundation_required_exactly_once() {
    let none = vec![Candidate::new("case_study").with_title("Win").with_url("https://acme.io/win")];
    let err = build(none, &Doctrine::builtin_v1(), 10).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Integrity(IntegrityError::FoundationCount { found: 0 })
    ));

    let two = vec![csv(), Candidate::new("csv_summary").with_title("CSV Pop, refreshed")];
    let err = build(two, &Doctrine::builtin_v1(), 10).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Integrity(IntegrityError::FoundationCount { found: 2 })
    ));
}

#[test]
fn test_identical_foundations_fail_before_dedup() {
    let err = build(vec![csv(), csv()], &Doctrine::builtin_v1(), 10).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Integrity(IntegrityError::FoundationCount { found: 2 })
    ));
}

#[test]
fn test_placeholder_second_foundation_still_fails() {
    let candidates = vec![
        csv(),
        Candidate::new("csv_summary").with_title("Placeholder"),
        Candidate::new("case_study").with_title("Win").with_url("https://acme.io/win"),
    ];

    let err = build(candidates, &Doctrine::builtin_v1(), 10).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Integrity(IntegrityError::FoundationCount { found: 2 })
    ));
}

#[test]
fn test_foundation_always_first() {
    let candidates = vec![
        Candidate::new("linkedin").with_title("Jane").with_url("https://linkedin.com/in/jane"),
        Candidate::new("site_page").with_title("About").with_url("https://acme.io/about"),
        csv(),
    ];

    let bundle = build(candidates, &Doctrine::builtin_v1(), 10).unwrap();
    assert!(bundle.claims[0].tier.is_foundation());
    assert_eq!(bundle.foundation().map(|c| c.title.as_str()), Some("CSV Pop"));
}

#[test]
fn test_capacity_prefix_truncation() {
    let mut candidates = vec![csv()];
    for i in 0..10 {
        candidates.push(
            Candidate::new("site_page")
                .with_title(format!("Page {:02}", i))
                .with_url(format!("https://acme.io/p{:02}", i)),
        );
    }
    candidates.push(Candidate::new("supplier_profile").with_summary("Regional MSP"));

    let bundle = build(candidates, &Doctrine::builtin_v1(), 5).unwrap();

    assert_eq!(bundle.claims.len(), 5);
    let groups: Vec<&str> = bundle.claims.iter().map(|c| c.tier_group.as_str()).collect();
    assert_eq!(groups, vec!["csv_summary", "supplier_profile", "site_page", "site_page", "site_page"]);
    assert_eq!(bundle.claims[2].title, "Page 00");
    assert_eq!(bundle.claims[4].claim_id.to_string(), "CLM-005");
    assert!(bundle
        .diagnostics
        .warnings
        .contains(&Warning::Capacity { dropped: 7, max_items: 5 }));
}

#[test]
fn test_url_title_collapse_across_source_types() {
    // Deliberate: the same URL and title from two source types is one claim
    let page = Candidate::new("site_page")
        .with_title("Pricing")
        .with_url("https://acme.io/pricing");
    let reference = Candidate::new("web_reference")
        .with_source_type("crawler")
        .with_title("Pricing")
        .with_url("https://acme.io/pricing");

    let bundle = build(vec![csv(), page.clone(), reference.clone()], &Doctrine::builtin_v1(), 10).unwrap();
    assert_eq!(bundle.claims.len(), 2);
    assert_eq!(bundle.claims[1].source_type, "site_page");

    let config = EngineConfig {
        dedup_scope: DedupScope::PerSource,
        ..EngineConfig::default()
    };
    let engine = EvidenceEngine::new(Doctrine::builtin_v1(), config).unwrap();
    let bundle = engine.build(vec![csv(), page, reference]).unwrap();
    assert_eq!(bundle.claims.len(), 3);
}

#[test]
fn test_upstream_ids_kept_as_provenance() {
    let candidates = vec![
        Candidate::new("case_study")
            .with_title("Win")
            .with_upstream_claim_id("CLM-017"),
        csv(),
    ];

    let bundle = build(candidates, &Doctrine::builtin_v1(), 10).unwrap();
    assert_eq!(bundle.claims[1].claim_id.to_string(), "CLM-002");
    assert_eq!(bundle.claims[1].claim_id_orig.as_deref(), Some("CLM-017"));
}

#[test]
fn test_output_is_byte_identical() {
    let candidates = vec![
        Candidate::new("case_study").with_title("Win").with_url("https://acme.io/win"),
        Candidate::new("supplier_profile").with_summary("Regional MSP"),
        csv(),
        Candidate::new("linkedin").with_title("Jane").with_url("https://linkedin.com/in/jane"),
        Candidate::new("site_product").with_title("Placeholder").with_url("https://acme.io/x"),
    ];
    let mut reversed = candidates.clone();
    reversed.reverse();

    let engine = EvidenceEngine::with_defaults();
    let a = engine.build(candidates).unwrap().to_json().unwrap();
    let b = engine.build(reversed).unwrap().to_json().unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_persisted_bundle_revalidates() {
    let engine = EvidenceEngine::with_defaults();
    let bundle = engine
        .build(vec![
            csv(),
            Candidate::new("markdown_strategic").with_title("Plan").with_markdown_id("s1"),
            Candidate::new("supplier_profile").with_summary("Regional MSP"),
        ])
        .unwrap();
    let json = bundle.to_json_pretty().unwrap();

    let parsed = EvidenceBundle::from_json(&json).unwrap();
    assert_eq!(parsed, bundle);

    let validator = IntegrityValidator::new(engine.doctrine(), &engine.config().readiness);
    let readiness = validator.validate(&parsed.claims).unwrap();
    assert_eq!(readiness, bundle.counts.readiness);
    assert!(readiness.synthesis_safe);

    let mut tampered = parsed;
    tampered.claims.swap(1, 2);
    assert!(matches!(
        validator.validate(&tampered.claims),
        Err(IntegrityError::OutOfOrder { .. })
    ));
}

#[test]
fn test_custom_doctrine_from_toml() {
    let doctrine = doctrine_from_toml(
        r#"
        version = "tiering-v2"

        [[entries]]
        category = "csv_summary"
        tier = 0
        rank = 0

        [[entries]]
        category = "linkedin"
        tier = 2
        rank = 5

        [[entries]]
        category = "case_study"
        tier = 5
        rank = 50
        "#,
    )
    .unwrap();

    let candidates = vec![
        Candidate::new("case_study").with_title("Win").with_url("https://acme.io/win"),
        Candidate::new("linkedin").with_title("Jane").with_url("https://linkedin.com/in/jane"),
        csv(),
    ];

    let bundle = build(candidates, &doctrine, 10).unwrap();
    let groups: Vec<&str> = bundle.claims.iter().map(|c| c.tier_group.as_str()).collect();
    assert_eq!(groups, vec!["csv_summary", "linkedin", "case_study"]);
    assert_eq!(bundle.claims[1].tier, Tier::new(2).unwrap());
    assert_eq!(bundle.doctrine.version, "tiering-v2");
}

#[test]
fn test_diagnostics_summary() {
    let candidates = vec![
        csv(),
        Candidate::new("case_study").with_title("Story").with_url("https://example.com/story"),
        Candidate::new("site_page").with_title("Home").with_url("http://acme.io"),
        Candidate::new("site_page"),
    ];

    let bundle = build(candidates, &Doctrine::builtin_v1(), 10).unwrap();
    let diagnostics = &bundle.diagnostics;

    assert_eq!(diagnostics.candidates, 4);
    assert_eq!(diagnostics.total_rejected(), 3);
    assert_eq!(diagnostics.phase(Phase::Filter).map(|p| p.items_out), Some(1));

    let summary = diagnostics.summary();
    assert!(summary.contains("denied_host: 1"));
    assert!(summary.contains("insecure_url: 1"));
    assert!(summary.contains("empty: 1"));
}

#[test]
fn test_build_with_subscriber_installed() {
    let subscriber = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let bundle = EvidenceEngine::with_defaults().build(vec![csv()]).unwrap();
        assert_eq!(bundle.claims.len(), 1);
    });
}
