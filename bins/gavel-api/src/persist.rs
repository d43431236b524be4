// External collaborators of the judging pipeline: where test cases come
// from and where finished results go. Both are traits so the pipeline
// tests run against in-memory substitutes.

use async_trait::async_trait;
use chrono::Utc;
use gavel_common::redis as store;
use gavel_common::types::{SubmissionRecord, SubmissionResult, TestCase};
use redis::aio::ConnectionManager;
use tracing::info;
use uuid::Uuid;

use crate::error::JudgeError;

/// Ordered-by-creation snapshot of a problem's test cases. The ordering
/// is the contract for which test case is "first"; `sample_only` filters
/// to the user-visible subset for run (not submit) requests.
#[async_trait]
pub trait TestCaseSource: Send + Sync {
    async fn for_problem(
        &self,
        problem_id: i64,
        sample_only: bool,
    ) -> Result<Vec<TestCase>, JudgeError>;
}

/// Persists one completed run. The sink assigns the submission identity
/// and writes the record with its outcomes as a single unit.
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn persist(&self, result: &SubmissionResult) -> Result<Uuid, JudgeError>;
}

/// Snapshot ordering: `created_at` ascending, ties broken by id, so the
/// sequence is reproducible for a fixed test-case set.
pub fn ordered_by_creation(mut test_cases: Vec<TestCase>) -> Vec<TestCase> {
    test_cases.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    test_cases
}

/// Redis-backed store implementing both collaborator seams. Test-case
/// writes belong to the CRUD layer; this side only reads them.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    pub async fn get_submission(&self, id: &Uuid) -> Result<Option<SubmissionRecord>, JudgeError> {
        let mut conn = self.conn.clone();
        Ok(store::get_submission(&mut conn, id).await?)
    }
}

#[async_trait]
impl TestCaseSource for RedisStore {
    async fn for_problem(
        &self,
        problem_id: i64,
        sample_only: bool,
    ) -> Result<Vec<TestCase>, JudgeError> {
        let mut conn = self.conn.clone();
        let mut test_cases = store::fetch_test_cases(&mut conn, problem_id).await?;
        if sample_only {
            test_cases.retain(|tc| tc.is_sample);
        }
        Ok(ordered_by_creation(test_cases))
    }
}

#[async_trait]
impl ResultSink for RedisStore {
    async fn persist(&self, result: &SubmissionResult) -> Result<Uuid, JudgeError> {
        let record = SubmissionRecord {
            id: Uuid::new_v4(),
            code: result.code.clone(),
            language: result.language,
            result: result.overall,
            outcomes: result.outcomes.clone(),
            created_at: Utc::now(),
        };

        let mut conn = self.conn.clone();
        store::store_submission(&mut conn, &record).await?;
        info!(submission_id = %record.id, result = %record.result, "Submission persisted");
        Ok(record.id)
    }
}
