/// Verdict Classifier
///
/// **Core Responsibility:**
/// Map one raw sandbox response plus the expected output to exactly one
/// verdict and the string that should be shown to the user.
///
/// **Critical Properties:**
/// - Knows nothing about HTTP or the sandbox wire format
/// - Knows nothing about persistence or truncation
/// - Total function: every response shape classifies, nothing errors
///
/// **Rule order matters** - the first matching rule wins, which breaks
/// ties when several conditions hold at once (a compile error beats a
/// SIGKILL on the same response):
/// 1. compile stderr non-empty        -> CompileError
/// 2. run stderr non-empty            -> RuntimeError
/// 3. run signal SIGKILL              -> TimeLimitExceeded
/// 4. normalized output equality      -> Accepted
/// 5. everything else                 -> WrongAnswer
///
/// No rule produces `MemoryLimitExceeded` or `SegmentationFault`; those
/// verdicts stay reserved until the sandbox response carries enough
/// signal/exit-code detail to tell them apart. The default branch means
/// a run that produced no output at all is still a WrongAnswer.
use crate::normalize::normalize;
use crate::sandbox::SandboxResult;
use gavel_common::types::Verdict;

/// Signal the sandbox reports when it killed the run at the time limit.
const TIME_LIMIT_SIGNAL: &str = "SIGKILL";

/// Classify one execution. Returns the verdict and the raw display
/// source for it (compile stderr, run stderr, or run stdout) - the
/// caller owns display truncation.
pub fn classify(result: &SandboxResult, expected_output: &str) -> (Verdict, String) {
    let compile_stderr = result.compile_stderr.as_deref().unwrap_or("");
    let run_stdout = result.run_stdout.as_deref().unwrap_or("");
    let run_stderr = result.run_stderr.as_deref().unwrap_or("");

    if !compile_stderr.is_empty() {
        return (Verdict::CompileError, compile_stderr.to_string());
    }
    if !run_stderr.is_empty() {
        return (Verdict::RuntimeError, run_stderr.to_string());
    }
    if result.signal.as_deref() == Some(TIME_LIMIT_SIGNAL) {
        return (Verdict::TimeLimitExceeded, run_stdout.to_string());
    }
    if normalize(expected_output) == normalize(run_stdout) {
        return (Verdict::Accepted, run_stdout.to_string());
    }
    (Verdict::WrongAnswer, run_stdout.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_run(stdout: &str) -> SandboxResult {
        SandboxResult {
            compile_stderr: None,
            run_stdout: Some(stdout.to_string()),
            run_stderr: None,
            signal: None,
        }
    }

    #[test]
    fn test_accepted_on_exact_match() {
        let (verdict, output) = classify(&clean_run("42"), "42");
        assert_eq!(verdict, Verdict::Accepted);
        assert_eq!(output, "42");
    }

    #[test]
    fn test_accepted_after_normalization() {
        // Trailing newline on stdout must not cost the verdict
        let (verdict, _) = classify(&clean_run("5\n"), "5");
        assert_eq!(verdict, Verdict::Accepted);

        let (verdict, _) = classify(&clean_run("a b\r\n"), "a b");
        assert_eq!(verdict, Verdict::Accepted);
    }

    #[test]
    fn test_wrong_answer_on_mismatch() {
        let (verdict, output) = classify(&clean_run("41"), "42");
        assert_eq!(verdict, Verdict::WrongAnswer);
        assert_eq!(output, "41");
    }

    #[test]
    fn test_compile_error_uses_compile_stderr() {
        let result = SandboxResult {
            compile_stderr: Some("main.cpp:3: expected ';'".to_string()),
            run_stdout: None,
            run_stderr: None,
            signal: None,
        };
        let (verdict, output) = classify(&result, "42");
        assert_eq!(verdict, Verdict::CompileError);
        assert_eq!(output, "main.cpp:3: expected ';'");
    }

    #[test]
    fn test_runtime_error_uses_run_stderr() {
        let result = SandboxResult {
            compile_stderr: None,
            run_stdout: Some("partial".to_string()),
            run_stderr: Some("Traceback (most recent call last)".to_string()),
            signal: None,
        };
        let (verdict, output) = classify(&result, "42");
        assert_eq!(verdict, Verdict::RuntimeError);
        assert_eq!(output, "Traceback (most recent call last)");
    }

    #[test]
    fn test_sigkill_is_time_limit_exceeded() {
        let result = SandboxResult {
            compile_stderr: None,
            run_stdout: Some("1 2 3".to_string()),
            run_stderr: None,
            signal: Some("SIGKILL".to_string()),
        };
        let (verdict, output) = classify(&result, "1 2 3");
        assert_eq!(verdict, Verdict::TimeLimitExceeded);
        assert_eq!(output, "1 2 3");
    }

    #[test]
    fn test_other_signals_fall_through() {
        let result = SandboxResult {
            compile_stderr: None,
            run_stdout: Some("42".to_string()),
            run_stderr: None,
            signal: Some("SIGSEGV".to_string()),
        };
        // No SIGSEGV rule exists; output equality still decides
        let (verdict, _) = classify(&result, "42");
        assert_eq!(verdict, Verdict::Accepted);
    }

    #[test]
    fn test_compile_error_wins_over_sigkill() {
        let result = SandboxResult {
            compile_stderr: Some("undefined reference".to_string()),
            run_stdout: Some("42".to_string()),
            run_stderr: Some("killed".to_string()),
            signal: Some("SIGKILL".to_string()),
        };
        let (verdict, output) = classify(&result, "42");
        assert_eq!(verdict, Verdict::CompileError);
        assert_eq!(output, "undefined reference");
    }

    #[test]
    fn test_run_stderr_wins_over_sigkill() {
        let result = SandboxResult {
            compile_stderr: None,
            run_stdout: None,
            run_stderr: Some("out of memory".to_string()),
            signal: Some("SIGKILL".to_string()),
        };
        let (verdict, _) = classify(&result, "42");
        assert_eq!(verdict, Verdict::RuntimeError);
    }

    #[test]
    fn test_missing_output_defaults_to_wrong_answer() {
        let result = SandboxResult {
            compile_stderr: None,
            run_stdout: None,
            run_stderr: None,
            signal: None,
        };
        let (verdict, output) = classify(&result, "42");
        assert_eq!(verdict, Verdict::WrongAnswer);
        assert_eq!(output, "");
    }

    #[test]
    fn test_empty_expected_and_empty_stdout_accepts() {
        let (verdict, _) = classify(&clean_run("\n"), "");
        assert_eq!(verdict, Verdict::Accepted);
    }
}
