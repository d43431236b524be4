// Application configuration, sourced from environment with defaults.

/// Sandbox resource limits are fixed by the remote service contract:
/// 10s compile, 3s run, memory enforcement delegated to the service.
pub const DEFAULT_COMPILE_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_RUN_TIMEOUT_MS: u64 = 3_000;

/// Inter-call wait that keeps us under the sandbox provider's rate
/// limit. Not a correctness mechanism, but skipping it gets subsequent
/// calls throttled or rejected.
pub const DEFAULT_PACING_DELAY_MS: u64 = 250;

#[derive(Debug, Clone)]
pub struct Config {
    pub redis_url: String,
    pub bind_addr: String,
    pub sandbox_url: String,
    pub languages_path: String,
    pub pacing_delay_ms: u64,
    pub compile_timeout_ms: u64,
    pub run_timeout_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            redis_url: env_or("REDIS_URL", "redis://127.0.0.1:6379"),
            bind_addr: env_or("BIND_ADDR", "0.0.0.0:3000"),
            sandbox_url: env_or("SANDBOX_URL", "https://emkc.org/api/v2/piston/execute"),
            languages_path: env_or("LANGUAGES_PATH", "config/languages.json"),
            pacing_delay_ms: env_or_parsed("PACING_DELAY_MS", DEFAULT_PACING_DELAY_MS),
            compile_timeout_ms: env_or_parsed("COMPILE_TIMEOUT_MS", DEFAULT_COMPILE_TIMEOUT_MS),
            run_timeout_ms: env_or_parsed("RUN_TIMEOUT_MS", DEFAULT_RUN_TIMEOUT_MS),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_or_parsed(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
