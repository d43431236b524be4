use crate::types::{SubmissionRecord, TestCase};
use redis::{AsyncCommands, RedisResult};

/// Redis key semantics - defines only semantics, not runtime logic.
/// Keeps handlers and the store implementation from drifting and makes
/// every key deterministic.

pub const SUBMISSION_PREFIX: &str = "gavel:submission";
pub const TESTCASE_PREFIX: &str = "gavel:testcases";

/// Generate the key holding a persisted submission record
pub fn submission_key(id: &uuid::Uuid) -> String {
    format!("{}:{}", SUBMISSION_PREFIX, id)
}

/// Generate the key holding a problem's test-case set
pub fn test_cases_key(problem_id: i64) -> String {
    format!("{}:{}", TESTCASE_PREFIX, problem_id)
}

fn serde_err(e: serde_json::Error, what: &'static str) -> redis::RedisError {
    redis::RedisError::from((redis::ErrorKind::TypeError, what, e.to_string()))
}

/// Store a submission record with its outcomes as a single SET, so a
/// reader never observes the record without its outcomes.
pub async fn store_submission(
    conn: &mut redis::aio::ConnectionManager,
    record: &SubmissionRecord,
) -> RedisResult<()> {
    let key = submission_key(&record.id);
    let payload =
        serde_json::to_string(record).map_err(|e| serde_err(e, "serialization error"))?;

    // Store record with 24-hour TTL
    let _: () = conn.set_ex(&key, payload, 86400).await?;
    Ok(())
}

/// Retrieve a persisted submission record
pub async fn get_submission(
    conn: &mut redis::aio::ConnectionManager,
    id: &uuid::Uuid,
) -> RedisResult<Option<SubmissionRecord>> {
    let key = submission_key(id);
    let payload: Option<String> = conn.get(&key).await?;

    match payload {
        Some(data) => {
            let record: SubmissionRecord =
                serde_json::from_str(&data).map_err(|e| serde_err(e, "deserialization error"))?;
            Ok(Some(record))
        }
        None => Ok(None),
    }
}

/// Replace a problem's test-case set. Writing test cases is the CRUD
/// layer's job; this helper exists for that layer and for seeding in
/// integration tests.
pub async fn store_test_cases(
    conn: &mut redis::aio::ConnectionManager,
    problem_id: i64,
    test_cases: &[TestCase],
) -> RedisResult<()> {
    let key = test_cases_key(problem_id);
    let payload =
        serde_json::to_string(test_cases).map_err(|e| serde_err(e, "serialization error"))?;

    let _: () = conn.set(&key, payload).await?;
    Ok(())
}

/// Fetch a problem's test cases. Returns them as stored; ordering is the
/// caller's concern.
pub async fn fetch_test_cases(
    conn: &mut redis::aio::ConnectionManager,
    problem_id: i64,
) -> RedisResult<Vec<TestCase>> {
    let key = test_cases_key(problem_id);
    let payload: Option<String> = conn.get(&key).await?;

    match payload {
        Some(data) => {
            let test_cases: Vec<TestCase> =
                serde_json::from_str(&data).map_err(|e| serde_err(e, "deserialization error"))?;
            Ok(test_cases)
        }
        None => Ok(Vec::new()),
    }
}
