use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tauri::State;
use tracing::info;

use super::load_active;
use crate::db::AppState;
use crate::error::PlannerError;
use crate::models::{ProgramExercise, ReadinessCheck};
use crate::readiness::{
  apply_adjustments_to_exercises, compute_session_adjustments, ReadinessRecord, SessionAdjustments,
};
use crate::store;

#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResult {
  pub record: ReadinessRecord,
  pub adjustments: SessionAdjustments,
  /// Today's exercises with the adjustments applied; empty without an active day
  pub exercises: Vec<ProgramExercise>,
}

/// Score a pre-session check and project today's prescription through it.
/// The stored program is not modified.
#[tauri::command]
pub async fn submit_readiness(
  state: State<'_, Arc<AppState>>,
  check: ReadinessCheck,
) -> Result<ReadinessResult, String> {
  submit_readiness_inner(&state, check).await.map_err(|e| e.to_string())
}

pub(crate) async fn submit_readiness_inner(
  app: &AppState,
  check: ReadinessCheck,
) -> Result<ReadinessResult, PlannerError> {
  let now = Utc::now();
  let record = ReadinessRecord::new(check, now);
  let adjustments = compute_session_adjustments(record.score);
  info!(score = record.score, level = record.level.as_str(), "Readiness check submitted");

  let mut exercises = Vec::new();
  if let Some(mut active) = load_active(app).await? {
    if let Some(day) = active.state.current_day(&active.stored.program) {
      exercises = apply_adjustments_to_exercises(&day.exercises, &adjustments);
    }
    active.state.record_readiness(record.clone());
    store::save_active_state(&app.db, active.stored.id, &active.state, now).await?;
  }

  Ok(ReadinessResult {
    record,
    adjustments,
    exercises,
  })
}
