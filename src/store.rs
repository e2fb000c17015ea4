//! SQLite persistence
//!
//! Profile, programs, active state and sessions are stored as JSON
//! documents so every field round-trips. The profile and the active state
//! are single-row tables; at most one program is active at a time.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use crate::error::PlannerError;
use crate::models::{TrainingProgram, UserProfile, WorkoutSession};
use crate::progression::ActiveProgramState;

/// Fixed-width UTC timestamps so text ordering matches time ordering
fn timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ---------------------------------------------------------------------------
/// Profile
// ---------------------------------------------------------------------------

pub async fn save_profile(
    pool: &SqlitePool,
    profile: &UserProfile,
    now: DateTime<Utc>,
) -> Result<(), PlannerError> {
    profile.validate()?;
    let data = serde_json::to_string(profile)?;

    sqlx::query(
        r#"
        INSERT INTO user_profile (id, data, updated_at)
        VALUES (1, ?1, ?2)
        ON CONFLICT(id) DO UPDATE SET
            data = excluded.data,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(data)
    .bind(timestamp(now))
    .execute(pool)
    .await?;

    debug!("Saved user profile");
    Ok(())
}

pub async fn load_profile(pool: &SqlitePool) -> Result<Option<UserProfile>, PlannerError> {
    let data: Option<String> = sqlx::query_scalar("SELECT data FROM user_profile WHERE id = 1")
        .fetch_optional(pool)
        .await?;

    data.map(|d| serde_json::from_str(&d))
        .transpose()
        .map_err(PlannerError::from)
}

// ---------------------------------------------------------------------------
/// Programs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredProgram {
    pub id: i64,
    pub program: TrainingProgram,
    pub created_at: String,
}

/// Insert a program and make it the active one. Returns its id.
pub async fn save_program(
    pool: &SqlitePool,
    program: &TrainingProgram,
    now: DateTime<Utc>,
) -> Result<i64, PlannerError> {
    let data = serde_json::to_string(program)?;
    let mut tx = pool.begin().await?;

    sqlx::query("UPDATE programs SET is_active = 0 WHERE is_active = 1")
        .execute(&mut *tx)
        .await?;

    let id = sqlx::query(
        r#"
        INSERT INTO programs (data, is_active, created_at, updated_at)
        VALUES (?1, 1, ?2, ?2)
        "#,
    )
    .bind(data)
    .bind(timestamp(now))
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    tx.commit().await?;

    info!(program_id = id, weeks = program.total_weeks, "Saved new active program");
    Ok(id)
}

/// Overwrite a stored program after adjustments
pub async fn update_program(
    pool: &SqlitePool,
    id: i64,
    program: &TrainingProgram,
    now: DateTime<Utc>,
) -> Result<(), PlannerError> {
    let data = serde_json::to_string(program)?;
    let result = sqlx::query("UPDATE programs SET data = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(data)
        .bind(timestamp(now))
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(PlannerError::NotFound(format!("program {}", id)));
    }
    Ok(())
}

pub async fn load_active_program(pool: &SqlitePool) -> Result<Option<StoredProgram>, PlannerError> {
    let row = sqlx::query(
        "SELECT id, data, created_at FROM programs WHERE is_active = 1 ORDER BY id DESC LIMIT 1",
    )
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    let data: String = row.get("data");

    Ok(Some(StoredProgram {
        id: row.get("id"),
        program: serde_json::from_str(&data)?,
        created_at: row.get("created_at"),
    }))
}

// ---------------------------------------------------------------------------
/// Active state
// ---------------------------------------------------------------------------

pub async fn save_active_state(
    pool: &SqlitePool,
    program_id: i64,
    state: &ActiveProgramState,
    now: DateTime<Utc>,
) -> Result<(), PlannerError> {
    let data = serde_json::to_string(state)?;

    sqlx::query(
        r#"
        INSERT INTO active_program_state (id, program_id, data, updated_at)
        VALUES (1, ?1, ?2, ?3)
        ON CONFLICT(id) DO UPDATE SET
            program_id = excluded.program_id,
            data = excluded.data,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(program_id)
    .bind(data)
    .bind(timestamp(now))
    .execute(pool)
    .await?;

    Ok(())
}

/// State for the given program; a fresh state if none was saved for it
pub async fn load_active_state(
    pool: &SqlitePool,
    program_id: i64,
) -> Result<ActiveProgramState, PlannerError> {
    let data: Option<String> = sqlx::query_scalar(
        "SELECT data FROM active_program_state WHERE id = 1 AND program_id = ?1",
    )
    .bind(program_id)
    .fetch_optional(pool)
    .await?;

    match data {
        Some(d) => Ok(serde_json::from_str(&d)?),
        None => Ok(ActiveProgramState::new()),
    }
}

// ---------------------------------------------------------------------------
/// Sessions
// ---------------------------------------------------------------------------

/// Insert or update an open session. Closed sessions are immutable and
/// further writes to them are ignored.
pub async fn save_session(pool: &SqlitePool, session: &WorkoutSession) -> Result<(), PlannerError> {
    let data = serde_json::to_string(session)?;

    sqlx::query(
        r#"
        INSERT INTO workout_sessions (id, started_at, ended_at, data)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT(id) DO UPDATE SET
            ended_at = excluded.ended_at,
            data = excluded.data
        WHERE workout_sessions.ended_at IS NULL
        "#,
    )
    .bind(&session.id)
    .bind(timestamp(session.started_at))
    .bind(session.ended_at.map(timestamp))
    .bind(data)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn load_session(pool: &SqlitePool, id: &str) -> Result<Option<WorkoutSession>, PlannerError> {
    let data: Option<String> = sqlx::query_scalar("SELECT data FROM workout_sessions WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    data.map(|d| serde_json::from_str(&d))
        .transpose()
        .map_err(PlannerError::from)
}

/// Set `ended_at` on an open session. Closing twice keeps the first end time.
pub async fn close_session(
    pool: &SqlitePool,
    id: &str,
    ended_at: DateTime<Utc>,
) -> Result<WorkoutSession, PlannerError> {
    let mut session = load_session(pool, id)
        .await?
        .ok_or_else(|| PlannerError::NotFound(format!("session {}", id)))?;

    if session.is_closed() {
        return Ok(session);
    }
    session.ended_at = Some(ended_at);
    save_session(pool, &session).await?;

    info!(session_id = %id, exercises = session.completed_exercises.len(), "Closed workout session");
    Ok(session)
}

/// Sessions started after `since` (all when `None`), newest first
pub async fn load_sessions(
    pool: &SqlitePool,
    since: Option<DateTime<Utc>>,
) -> Result<Vec<WorkoutSession>, PlannerError> {
    let rows: Vec<String> = match since {
        Some(since) => {
            sqlx::query_scalar(
                "SELECT data FROM workout_sessions WHERE started_at > ?1 ORDER BY started_at DESC",
            )
            .bind(timestamp(since))
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_scalar("SELECT data FROM workout_sessions ORDER BY started_at DESC")
                .fetch_all(pool)
                .await?
        }
    };

    rows.iter()
        .map(|d| serde_json::from_str(d).map_err(PlannerError::from))
        .collect()
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ExerciseCatalog;
    use crate::config::GeneratorConfig;
    use crate::generator::generate;
    use crate::test_utils::{
        fixed_now, mock_feedback, mock_profile, mock_session, setup_test_db, teardown_test_db,
    };
    use chrono::Duration;

    #[tokio::test]
    async fn test_profile_round_trip() {
        let pool = setup_test_db().await;
        assert!(load_profile(&pool).await.unwrap().is_none());

        let mut profile = mock_profile();
        save_profile(&pool, &profile, fixed_now()).await.unwrap();
        assert_eq!(load_profile(&pool).await.unwrap(), Some(profile.clone()));

        // singleton row is overwritten
        profile.days_per_week = 3;
        save_profile(&pool, &profile, fixed_now()).await.unwrap();
        assert_eq!(load_profile(&pool).await.unwrap().unwrap().days_per_week, 3);

        teardown_test_db(pool).await;
    }

    #[tokio::test]
    async fn test_invalid_profile_rejected() {
        let pool = setup_test_db().await;
        let mut profile = mock_profile();
        profile.days_per_week = 9;

        let result = save_profile(&pool, &profile, fixed_now()).await;
        assert!(matches!(result, Err(PlannerError::InvalidProfile(_))));
        assert!(load_profile(&pool).await.unwrap().is_none());

        teardown_test_db(pool).await;
    }

    #[tokio::test]
    async fn test_new_program_replaces_active() {
        let pool = setup_test_db().await;
        let program = generate(
            Some(&mock_profile()),
            &ExerciseCatalog::default(),
            &GeneratorConfig::default(),
        )
        .unwrap();

        let first = save_program(&pool, &program, fixed_now()).await.unwrap();
        let second = save_program(&pool, &program, fixed_now()).await.unwrap();
        assert_ne!(first, second);

        let active = load_active_program(&pool).await.unwrap().unwrap();
        assert_eq!(active.id, second);
        assert_eq!(active.program, program);

        let active_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM programs WHERE is_active = 1")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(active_count, 1);

        teardown_test_db(pool).await;
    }

    #[tokio::test]
    async fn test_update_missing_program_is_not_found() {
        let pool = setup_test_db().await;
        let program = generate(
            Some(&mock_profile()),
            &ExerciseCatalog::default(),
            &GeneratorConfig::default(),
        )
        .unwrap();

        let result = update_program(&pool, 404, &program, fixed_now()).await;
        assert!(matches!(result, Err(PlannerError::NotFound(_))));

        teardown_test_db(pool).await;
    }

    #[tokio::test]
    async fn test_active_state_scoped_to_program() {
        let pool = setup_test_db().await;
        let program = generate(
            Some(&mock_profile()),
            &ExerciseCatalog::default(),
            &GeneratorConfig::default(),
        )
        .unwrap();
        let id = save_program(&pool, &program, fixed_now()).await.unwrap();

        let mut state = ActiveProgramState::new();
        state.complete_day(&program, Some(mock_feedback(2, 2, 2)));
        save_active_state(&pool, id, &state, fixed_now()).await.unwrap();
        assert_eq!(load_active_state(&pool, id).await.unwrap(), state);

        // a different program starts fresh
        let other = save_program(&pool, &program, fixed_now()).await.unwrap();
        assert_eq!(load_active_state(&pool, other).await.unwrap(), ActiveProgramState::new());

        teardown_test_db(pool).await;
    }

    #[tokio::test]
    async fn test_sessions_newest_first_and_since_filter() {
        let pool = setup_test_db().await;
        let now = fixed_now();
        for days_ago in [10, 1, 5] {
            let session = mock_session(now, days_ago, &[("barbell_bench_press", 3)]);
            save_session(&pool, &session).await.unwrap();
        }

        let all = load_sessions(&pool, None).await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].started_at > w[1].started_at));

        let recent = load_sessions(&pool, Some(now - Duration::days(7))).await.unwrap();
        assert_eq!(recent.len(), 2);

        teardown_test_db(pool).await;
    }

    #[tokio::test]
    async fn test_closed_sessions_are_immutable() {
        let pool = setup_test_db().await;
        let now = fixed_now();
        let mut session = mock_session(now, 0, &[("barbell_bench_press", 3)]);
        session.ended_at = None;
        save_session(&pool, &session).await.unwrap();

        let closed = close_session(&pool, &session.id, now).await.unwrap();
        assert_eq!(closed.ended_at, Some(now));

        // second close keeps the first end time
        let again = close_session(&pool, &session.id, now + Duration::hours(2)).await.unwrap();
        assert_eq!(again.ended_at, Some(now));

        // writes after close are ignored
        let mut edited = closed.clone();
        edited.completed_exercises.clear();
        save_session(&pool, &edited).await.unwrap();
        let stored = load_session(&pool, &session.id).await.unwrap().unwrap();
        assert_eq!(stored.completed_exercises.len(), 1);

        let missing = close_session(&pool, "nope", now).await;
        assert!(matches!(missing, Err(PlannerError::NotFound(_))));

        teardown_test_db(pool).await;
    }
}
