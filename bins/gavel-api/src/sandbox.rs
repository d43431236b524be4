/// Sandbox Client - one execution request to the remote code-execution
/// service.
///
/// **Critical Architectural Boundary:**
/// - Client knows HOW to reach the sandbox (wire shape, endpoint, limits)
/// - Client does NOT classify results or decide retry/abort policy;
///   the orchestrator owns both (policy today: no retries, abort the run)
///
/// Resource limits are fixed by contract: 10s compile, 3s run, memory
/// ceilings delegated to the service's own enforcement (-1).
use async_trait::async_trait;
use gavel_common::config::Config;
use gavel_common::types::Language;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, error};

use crate::error::{JudgeError, GENERIC_FAILURE};
use crate::metrics;

/// Raw execution artifacts for one sandbox call. Scoped to a single
/// pipeline iteration and discarded after classification.
#[derive(Debug, Clone, Default)]
pub struct SandboxResult {
    pub compile_stderr: Option<String>,
    pub run_stdout: Option<String>,
    pub run_stderr: Option<String>,
    pub signal: Option<String>,
}

/// Execution seam. The orchestrator only ever sees this trait, so tests
/// substitute scripted responses for the live service.
#[async_trait]
pub trait Sandbox: Send + Sync {
    async fn execute(
        &self,
        language: Language,
        version: &str,
        code: &str,
        stdin: &str,
    ) -> Result<SandboxResult, JudgeError>;
}

#[derive(Debug, Serialize)]
struct ExecuteRequest<'a> {
    language: String,
    version: &'a str,
    files: Vec<FileEntry<'a>>,
    stdin: &'a str,
    args: Vec<String>,
    compile_timeout: u64,
    run_timeout: u64,
    compile_memory_limit: i64,
    run_memory_limit: i64,
}

#[derive(Debug, Serialize)]
struct FileEntry<'a> {
    content: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct StageOutput {
    #[serde(default)]
    stdout: String,
    #[serde(default)]
    stderr: String,
    #[serde(default)]
    signal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExecuteResponse {
    compile: Option<StageOutput>,
    run: Option<StageOutput>,
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    message: Option<String>,
}

/// Client for a Piston-compatible execution service.
pub struct PistonClient {
    http: reqwest::Client,
    url: String,
    compile_timeout_ms: u64,
    run_timeout_ms: u64,
}

impl PistonClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // Request timeout comfortably above compile + run budgets so the
        // service's own limits fire first.
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            url: config.sandbox_url.clone(),
            compile_timeout_ms: config.compile_timeout_ms,
            run_timeout_ms: config.run_timeout_ms,
        })
    }
}

#[async_trait]
impl Sandbox for PistonClient {
    async fn execute(
        &self,
        language: Language,
        version: &str,
        code: &str,
        stdin: &str,
    ) -> Result<SandboxResult, JudgeError> {
        let body = ExecuteRequest {
            language: language.to_string(),
            version,
            files: vec![FileEntry { content: code }],
            stdin,
            args: Vec::new(),
            compile_timeout: self.compile_timeout_ms,
            run_timeout: self.run_timeout_ms,
            compile_memory_limit: -1,
            run_memory_limit: -1,
        };

        metrics::SANDBOX_REQUESTS_TOTAL.inc();
        let started = Instant::now();

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Sandbox request failed");
                JudgeError::Sandbox(GENERIC_FAILURE.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            // Prefer the service's own message when the body carries one
            let message = response
                .json::<ServiceError>()
                .await
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            error!(status = %status, message = %message, "Sandbox rejected execution");
            return Err(JudgeError::Sandbox(message));
        }

        let parsed: ExecuteResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Sandbox response did not parse");
            JudgeError::Sandbox(GENERIC_FAILURE.to_string())
        })?;

        metrics::SANDBOX_REQUEST_SECONDS.observe(started.elapsed().as_secs_f64());
        debug!(
            language = %language,
            version = version,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Sandbox call complete"
        );

        let signal = parsed.run.as_ref().and_then(|r| r.signal.clone());
        Ok(SandboxResult {
            compile_stderr: parsed.compile.map(|c| c.stderr),
            run_stdout: parsed.run.as_ref().map(|r| r.stdout.clone()),
            run_stderr: parsed.run.map(|r| r.stderr),
            signal,
        })
    }
}
