use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Result;

/// Sentinel test name for markers that disable a whole class, or that
/// close before any method declaration has been seen.
pub const ALL_METHODS: &str = "All methods";

/// Sentinel class name used until the first class declaration is seen.
pub const UNKNOWN_CLASS: &str = "UnknownClass";

/// One disabling marker found on one test method or class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisabledTest {
    /// Enclosing method name, or `All methods` for class-level markers
    pub test_name: String,

    /// Enclosing class name at the time the marker block closed
    pub class_name: String,

    /// The marker's name, e.g. `Disabled` or `DisabledOnOs`
    pub annotation_type: String,

    /// Human-readable justification, when one was recoverable
    pub reason: Option<String>,

    /// Link to a tracked issue, when one was recoverable
    pub issue_link: Option<String>,

    /// Source file path within the repository
    pub file_path: String,

    /// True iff the linked issue is already closed on the tracker
    pub can_be_reenabled: bool,
}

/// All disabled tests found on one branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchAnalysisResult {
    pub branch_name: String,
    pub disabled_tests: Vec<DisabledTest>,
}

/// Downstream consumer of the finished report.
pub trait ReportSink {
    fn persist(&self, results: &[BranchAnalysisResult]) -> Result<()>;
}

/// Writes the report as a JSON file.
pub struct JsonFileSink {
    path: PathBuf,
    pretty: bool,
}

impl JsonFileSink {
    pub fn new(path: PathBuf, pretty: bool) -> Self {
        Self { path, pretty }
    }
}

impl ReportSink for JsonFileSink {
    fn persist(&self, results: &[BranchAnalysisResult]) -> Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(results)?
        } else {
            serde_json::to_string(results)?
        };
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> BranchAnalysisResult {
        BranchAnalysisResult {
            branch_name: "main".to_string(),
            disabled_tests: vec![DisabledTest {
                test_name: "validateReturnValue".to_string(),
                class_name: "SampleTest".to_string(),
                annotation_type: "Disabled".to_string(),
                reason: None,
                issue_link: Some("https://github.com/org/repo/issues/42".to_string()),
                file_path: "src/test/java/SampleTest.java".to_string(),
                can_be_reenabled: true,
            }],
        }
    }

    #[test]
    fn report_uses_stable_field_names() {
        let value = serde_json::to_value(vec![sample_result()]).unwrap();

        let branch = &value[0];
        assert!(branch.get("branch_name").is_some());
        let test = &branch["disabled_tests"][0];
        for key in [
            "test_name",
            "class_name",
            "annotation_type",
            "reason",
            "issue_link",
            "file_path",
            "can_be_reenabled",
        ] {
            assert!(test.get(key).is_some(), "missing field {}", key);
        }
        // absent reason serializes as an explicit null
        assert!(test["reason"].is_null());
    }

    #[test]
    fn sink_writes_parseable_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        let sink = JsonFileSink::new(path.clone(), true);
        sink.persist(&[sample_result()]).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<BranchAnalysisResult> = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, vec![sample_result()]);
    }
}
