/// Judging Orchestrator - the only component with cross-call state.
///
/// **Core Responsibility:**
/// Drive one run: iterate the test-case snapshot in order, pace the
/// sandbox calls, classify each response, apply the early-stop policy,
/// and hand the aggregate to the result sink.
///
/// **Run lifecycle:** Pending -> Running -> {Completed, Aborted}.
/// Terminal states are final; retrying means a fresh request.
///
/// **Partial-failure semantics:**
/// - Precondition violations reject before the first sandbox call.
/// - A transport/service error at any point aborts the run and discards
///   every accumulated outcome; nothing reaches the sink.
/// - Only a completed run produces a SubmissionResult, exactly once.
use gavel_common::types::{
    JudgeMode, JudgeRequest, Language, OverallResult, RunStatus, SubmissionResult, TestCaseOutcome,
    Verdict,
};
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::JudgeError;
use crate::languages::LanguageRegistry;
use crate::metrics;
use crate::normalize::{truncate_for_display, DISPLAY_MAX_LEN};
use crate::persist::{ResultSink, TestCaseSource};
use crate::sandbox::Sandbox;
use crate::verdict::classify;

pub struct JudgePipeline<'a, S: Sandbox> {
    sandbox: &'a S,
    languages: &'a LanguageRegistry,
    pacing: Duration,
}

impl<'a, S: Sandbox> JudgePipeline<'a, S> {
    pub fn new(sandbox: &'a S, languages: &'a LanguageRegistry, pacing: Duration) -> Self {
        Self {
            sandbox,
            languages,
            pacing,
        }
    }

    /// Evaluate one run. Test cases are evaluated strictly sequentially:
    /// ordering decides which failure stops a Full run, and the pacing
    /// sleep serializes calls against the provider's rate limit.
    pub async fn run(&self, request: &JudgeRequest) -> Result<Vec<TestCaseOutcome>, JudgeError> {
        let version = self
            .languages
            .version(request.language)
            .ok_or_else(|| {
                JudgeError::Validation(format!("Unsupported language: {}", request.language))
            })?;

        if request.code.trim().is_empty() {
            return Err(JudgeError::Validation(
                "Code cannot be an empty field".to_string(),
            ));
        }
        if request.test_cases.is_empty() {
            // Zero evidence must not become a vacuous Accepted
            return Err(JudgeError::Validation(
                "No test cases configured for this problem".to_string(),
            ));
        }

        info!(
            status = ?RunStatus::Running,
            language = %request.language,
            mode = ?request.mode,
            test_cases = request.test_cases.len(),
            "Judging run started"
        );

        let mut outcomes = Vec::new();

        for (idx, test_case) in request.test_cases.iter().enumerate() {
            if idx != 0 {
                tokio::time::sleep(self.pacing).await;
            }

            let raw = match self
                .sandbox
                .execute(request.language, version, &request.code, &test_case.input)
                .await
            {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(
                        status = ?RunStatus::Aborted,
                        test_case_id = test_case.id,
                        evaluated = outcomes.len(),
                        "Run aborted on sandbox failure; outcomes discarded"
                    );
                    return Err(e);
                }
            };

            let (verdict, user_output) = classify(&raw, &test_case.expected_output);
            metrics::VERDICTS_TOTAL
                .with_label_values(&[verdict.to_string().as_str()])
                .inc();
            debug!(
                test_case_id = test_case.id,
                test_num = idx + 1,
                verdict = %verdict,
                "Test case judged"
            );

            outcomes.push(TestCaseOutcome {
                test_case_id: Some(test_case.id),
                input: truncate_for_display(&test_case.input, DISPLAY_MAX_LEN),
                expected_output: truncate_for_display(&test_case.expected_output, DISPLAY_MAX_LEN),
                user_output: truncate_for_display(&user_output, DISPLAY_MAX_LEN),
                verdict,
            });

            // Full mode stops at the first failure: bounds cost and keeps
            // later test cases from leaking once one has failed.
            if request.mode == JudgeMode::Full && verdict != Verdict::Accepted {
                break;
            }
        }

        info!(
            status = ?RunStatus::Completed,
            evaluated = outcomes.len(),
            "Judging run completed"
        );
        Ok(outcomes)
    }

    /// Full submission: pull the complete snapshot, run to completion or
    /// first failure, aggregate, persist. Returns the sink-assigned id.
    pub async fn submit(
        &self,
        source: &dyn TestCaseSource,
        sink: &dyn ResultSink,
        code: String,
        language: Language,
        problem_id: i64,
    ) -> Result<Uuid, JudgeError> {
        info!(status = ?RunStatus::Pending, problem_id, language = %language, "Submission received");

        let test_cases = source.for_problem(problem_id, false).await?;
        let request = JudgeRequest {
            code,
            language,
            test_cases,
            mode: JudgeMode::Full,
        };

        let outcomes = self.run(&request).await?;
        let overall = overall_result(&outcomes);
        metrics::SUBMISSIONS_TOTAL
            .with_label_values(&[overall.to_string().as_str()])
            .inc();
        info!(problem_id, overall = %overall, "Submission judged");

        let result = SubmissionResult {
            code: request.code,
            language,
            overall,
            outcomes,
        };
        sink.persist(&result).await
    }

    /// Sample run: every sample test case is evaluated regardless of
    /// individual verdicts, outcomes go straight back to the caller and
    /// nothing is persisted.
    pub async fn run_samples(
        &self,
        source: &dyn TestCaseSource,
        code: String,
        language: Language,
        problem_id: i64,
    ) -> Result<Vec<TestCaseOutcome>, JudgeError> {
        let test_cases = source.for_problem(problem_id, true).await?;
        let request = JudgeRequest {
            code,
            language,
            test_cases,
            mode: JudgeMode::SampleOnly,
        };

        let outcomes = self.run(&request).await?;
        info!(problem_id, evaluated = outcomes.len(), "Sample run completed");
        Ok(outcomes)
    }
}

/// Accepted iff at least one outcome exists and every one is Accepted.
/// The empty set never reaches here - it is rejected up front.
pub fn overall_result(outcomes: &[TestCaseOutcome]) -> OverallResult {
    if !outcomes.is_empty() && outcomes.iter().all(|o| o.verdict == Verdict::Accepted) {
        OverallResult::Accepted
    } else {
        OverallResult::NotAccepted
    }
}
