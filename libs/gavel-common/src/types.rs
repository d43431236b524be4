use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Languages accepted for submission. Wire names match the sandbox
/// service's runtime identifiers ("c++", not "cpp").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,
    #[serde(rename = "c++")]
    Cpp,
    Go,
    Python,
    Java,
    Javascript,
}

impl Language {
    pub fn from_str(s: &str) -> Option<Language> {
        match s {
            "c" => Some(Language::C),
            "c++" => Some(Language::Cpp),
            "go" => Some(Language::Go),
            "python" => Some(Language::Python),
            "java" => Some(Language::Java),
            "javascript" => Some(Language::Javascript),
            _ => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Language::C => "c",
            Language::Cpp => "c++",
            Language::Go => "go",
            Language::Python => "python",
            Language::Java => "java",
            Language::Javascript => "javascript",
        };
        f.write_str(name)
    }
}

/// Classification assigned to a single test-case execution.
///
/// `MemoryLimitExceeded` and `SegmentationFault` are reserved: the
/// classifier has no rule that produces them until the sandbox response
/// surfaces exit-code/signal detail distinguishing those cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Accepted,
    #[serde(rename = "Wrong Answer")]
    WrongAnswer,
    #[serde(rename = "Runtime Error")]
    RuntimeError,
    #[serde(rename = "Time Limit Exceeded")]
    TimeLimitExceeded,
    #[serde(rename = "Compile Error")]
    CompileError,
    #[serde(rename = "Memory Limit Exceeded")]
    MemoryLimitExceeded,
    #[serde(rename = "Segmentation Fault")]
    SegmentationFault,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Verdict::Accepted => "Accepted",
            Verdict::WrongAnswer => "Wrong Answer",
            Verdict::RuntimeError => "Runtime Error",
            Verdict::TimeLimitExceeded => "Time Limit Exceeded",
            Verdict::CompileError => "Compile Error",
            Verdict::MemoryLimitExceeded => "Memory Limit Exceeded",
            Verdict::SegmentationFault => "Segmentation Fault",
        };
        f.write_str(name)
    }
}

/// Lifecycle of a single judging run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Pending,
    Running,
    Completed,
    Aborted,
}

/// Submission-level result: Accepted iff every evaluated outcome was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallResult {
    Accepted,
    #[serde(rename = "Not Accepted")]
    NotAccepted,
}

impl std::fmt::Display for OverallResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverallResult::Accepted => f.write_str("Accepted"),
            OverallResult::NotAccepted => f.write_str("Not Accepted"),
        }
    }
}

/// One test case of a problem. Immutable during a judging run; snapshots
/// are ordered by `created_at` ascending (ties broken by id) so "first
/// failure" is stable across runs for a fixed set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub id: i64,
    pub problem_id: i64,
    pub input: String,
    pub expected_output: String,
    pub is_sample: bool,
    pub created_at: DateTime<Utc>,
}

/// Full submission evaluates until the first failure; SampleOnly runs
/// every sample test case regardless of individual verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JudgeMode {
    Full,
    SampleOnly,
}

/// Ephemeral input to one judging run. Never persisted.
#[derive(Debug, Clone)]
pub struct JudgeRequest {
    pub code: String,
    pub language: Language,
    pub test_cases: Vec<TestCase>,
    pub mode: JudgeMode,
}

/// Per-test-case result as persisted: all three text fields are stored
/// in display-truncated form, never the raw comparison form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCaseOutcome {
    pub test_case_id: Option<i64>,
    pub input: String,
    pub expected_output: String,
    pub user_output: String,
    pub verdict: Verdict,
}

/// Aggregate handed to the result sink, built exactly once per completed
/// run. Aborted runs never produce one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub code: String,
    pub language: Language,
    pub overall: OverallResult,
    pub outcomes: Vec<TestCaseOutcome>,
}

/// Persisted form of a submission. The sink assigns the id; the record
/// and its outcomes are written as one unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: Uuid,
    pub code: String,
    pub language: Language,
    pub result: OverallResult,
    pub outcomes: Vec<TestCaseOutcome>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_wire_names() {
        assert_eq!(serde_json::to_string(&Language::Cpp).unwrap(), "\"c++\"");
        assert_eq!(
            serde_json::to_string(&Language::Javascript).unwrap(),
            "\"javascript\""
        );
        assert_eq!(
            serde_json::from_str::<Language>("\"c++\"").unwrap(),
            Language::Cpp
        );
        assert_eq!(Language::from_str("python"), Some(Language::Python));
        assert_eq!(Language::from_str("ruby"), None);
    }

    #[test]
    fn test_verdict_wire_names() {
        assert_eq!(
            serde_json::to_string(&Verdict::WrongAnswer).unwrap(),
            "\"Wrong Answer\""
        );
        assert_eq!(
            serde_json::to_string(&Verdict::TimeLimitExceeded).unwrap(),
            "\"Time Limit Exceeded\""
        );
        assert_eq!(Verdict::Accepted.to_string(), "Accepted");
    }

    #[test]
    fn test_overall_wire_names() {
        assert_eq!(
            serde_json::to_string(&OverallResult::NotAccepted).unwrap(),
            "\"Not Accepted\""
        );
    }
}
