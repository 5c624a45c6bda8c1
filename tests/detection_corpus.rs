//! Detection correctness corpus tests
//!
//! Each case in tests/fixtures/detection_corpus/corpus.json is a tuple of
//! (evidence, expected profile, expected reason).

mod fixtures;

use fixtures::DetectionCorpus;
use lintlayer::{detect, explain, Evidence, ProjectType};

#[test]
fn test_corpus_loads() {
    let corpus = DetectionCorpus::load().expect("load detection corpus");
    assert_eq!(corpus.schema_version, 1);
    assert!(!corpus.test_cases.is_empty());
}

#[test]
fn test_corpus_cases() {
    let corpus = DetectionCorpus::load().expect("load detection corpus");

    for case in &corpus.test_cases {
        let detection = explain(&case.evidence);
        let expected: ProjectType = case
            .expected
            .profile
            .parse()
            .unwrap_or_else(|e| panic!("case {}: {}", case.id, e));

        assert_eq!(
            detection.profile, expected,
            "case {} ({}): wrong profile",
            case.id, case.description
        );
        assert_eq!(
            detection.reason.to_machine_string(),
            case.expected.reason,
            "case {} ({}): wrong reason",
            case.id,
            case.description
        );
        assert_eq!(detect(&case.evidence), detection.profile);
    }
}

#[test]
fn test_corpus_covers_every_profile() {
    let corpus = DetectionCorpus::load().expect("load detection corpus");

    for profile in ProjectType::ALL {
        assert!(
            corpus
                .test_cases
                .iter()
                .any(|c| c.expected.profile == profile.as_str()),
            "no corpus case detects {}",
            profile
        );
    }
}

#[test]
fn test_builder_evidence_detects() {
    let evidence = Evidence::default().with_dependencies(["react-native"]);
    assert_eq!(detect(&evidence), ProjectType::ReactNative);
}

#[test]
fn test_extension_hints_are_normalized() {
    let evidence = Evidence::default().with_extension_hints(["VUE"]);
    assert_eq!(detect(&evidence), ProjectType::Vue);
}
