//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Mock data factories
//! - Helper assertions

use crate::catalog::ExerciseCatalog;
use crate::classifier::ExerciseCategory;
use crate::config::PlannerConfig;
use crate::db::AppState;
use crate::models::{
  CompletedExercise, CompletedSet, EquipmentSetup, Experience, Goal, Muscle, ProgramExercise,
  SessionFeedback, Sex, UserProfile, WorkoutSession,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use sqlx::SqlitePool;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Plugin state over a fresh in-memory database with default config
pub async fn test_app_state() -> AppState {
  AppState {
    db: setup_test_db().await,
    config: PlannerConfig::default(),
    catalog: ExerciseCatalog::default(),
  }
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// Intermediate lifter, 4 days, full gym, 80 kg male, no priorities
pub fn mock_profile() -> UserProfile {
  UserProfile {
    goal: Goal::BuildMuscle,
    experience: Experience::Intermediate,
    days_per_week: 4,
    sex: Sex::Male,
    bodyweight_kg: 80.0,
    height_cm: Some(180.0),
    age: Some(30),
    equipment: EquipmentSetup::FullGym,
    priority_muscles: Vec::new(),
  }
}

/// Closed one-hour session `days_ago` days before `now`, with the given
/// number of effective (completed, RIR 2) sets per exercise
pub fn mock_session(now: DateTime<Utc>, days_ago: i64, exercises: &[(&str, u32)]) -> WorkoutSession {
  let started_at = now - Duration::days(days_ago);
  WorkoutSession {
    id: format!("session-{}", started_at.timestamp_millis()),
    started_at,
    ended_at: Some(started_at + Duration::hours(1)),
    week_day_key: None,
    completed_exercises: exercises
      .iter()
      .map(|(exercise_id, sets)| CompletedExercise {
        exercise_id: (*exercise_id).to_string(),
        sets: (0..*sets)
          .map(|_| CompletedSet {
            reps: 10,
            weight_kg: 50.0,
            completed: true,
            rir: Some(2),
          })
          .collect(),
      })
      .collect(),
  }
}

pub fn mock_feedback(pump: u8, soreness: u8, performance: u8) -> SessionFeedback {
  SessionFeedback {
    pump,
    soreness,
    performance,
    joint_pain: false,
  }
}

/// Chest machine press with originals equal to the current values
pub fn mock_program_exercise(
  sets: u32,
  weight_kg: Option<f64>,
  rest_seconds: u32,
  target_rir: u8,
) -> ProgramExercise {
  ProgramExercise {
    exercise_id: "machine_chest_press".to_string(),
    name: "Machine Chest Press".to_string(),
    target: Muscle::Chest,
    category: ExerciseCategory::MachineCompound,
    sets,
    rep_min: 10,
    rep_max: 15,
    target_rir,
    rest_seconds,
    suggested_weight_kg: weight_kg,
    original_sets: sets,
    original_target_rir: target_rir,
    original_rest_seconds: rest_seconds,
    original_suggested_weight_kg: weight_kg,
  }
}

/// ---------------------------------------------------------------------------
/// Time Helpers
/// ---------------------------------------------------------------------------

/// Fixed reference instant so window boundaries are reproducible
pub fn fixed_now() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
    .single()
    .expect("valid fixed timestamp")
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr) => {
    $crate::assert_approx_eq!($left, $right, 1e-9)
  };
  ($left:expr, $right:expr, $tolerance:expr) => {{
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  }};
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('user_profile', 'programs', 'active_program_state', 'workout_sessions')"
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 4, "Expected 4 tables, got {}", tables.len());

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_mock_profile_is_valid() {
    assert!(mock_profile().validate().is_ok());
  }

  #[test]
  fn test_mock_session_sets_are_effective() {
    let session = mock_session(fixed_now(), 2, &[("leg_press", 4)]);
    assert!(session.is_closed());
    assert_eq!(session.completed_exercises[0].effective_sets(), 4);
  }
}
