//! Test fixtures for golden-file assertions
//!
//! This module provides:
//! - Detection corpus (evidence → expected profile and reason)
//! - On-disk project layouts for end-to-end pipeline tests

#![allow(dead_code)]

use lintlayer::Evidence;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Path to the detection corpus fixture
pub fn detection_corpus_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/detection_corpus/corpus.json")
}

/// Detection test case from corpus.json
#[derive(Debug, Clone, serde::Deserialize)]
pub struct DetectionTestCase {
    pub id: String,
    pub description: String,
    pub evidence: Evidence,
    pub expected: DetectionExpectation,
}

/// Expected detection result
#[derive(Debug, Clone, serde::Deserialize)]
pub struct DetectionExpectation {
    pub profile: String,
    /// Machine string of the reason, e.g. "dependency:react"
    pub reason: String,
}

/// Full detection corpus
#[derive(Debug, Clone, serde::Deserialize)]
pub struct DetectionCorpus {
    pub schema_version: u32,
    pub description: String,
    pub test_cases: Vec<DetectionTestCase>,
}

impl DetectionCorpus {
    /// Load corpus from the fixture file
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = detection_corpus_path();
        let content = fs::read_to_string(&path)?;
        let corpus: DetectionCorpus = serde_json::from_str(&content)?;
        Ok(corpus)
    }
}

/// A throwaway project directory
pub struct ProjectFixture {
    pub dir: TempDir,
}

impl ProjectFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root, creating parents
    pub fn write(&self, relative: &str, contents: &str) -> &Self {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, contents).expect("write fixture file");
        self
    }

    /// Write a package.json with the given runtime and dev dependencies
    pub fn manifest(&self, dependencies: &[&str], dev_dependencies: &[&str]) -> &Self {
        let table = |names: &[&str]| -> serde_json::Value {
            names
                .iter()
                .map(|n| (n.to_string(), serde_json::json!("*")))
                .collect::<serde_json::Map<_, _>>()
                .into()
        };
        let manifest = serde_json::json!({
            "name": "fixture",
            "dependencies": table(dependencies),
            "devDependencies": table(dev_dependencies),
        });
        self.write("package.json", &manifest.to_string())
    }
}
