use chrono::{Duration, Utc};
use serde::Serialize;
use std::sync::Arc;
use tauri::State;
use tracing::debug;

use super::load_active;
use crate::db::AppState;
use crate::error::PlannerError;
use crate::models::{CompletedExercise, SessionFeedback, WorkoutSession};
use crate::progression::ActiveProgramState;
use crate::store;

/// Open a session, tagged with the current program day when there is one
#[tauri::command]
pub async fn start_workout(state: State<'_, Arc<AppState>>) -> Result<WorkoutSession, String> {
  start_workout_inner(&state).await.map_err(|e| e.to_string())
}

pub(crate) async fn start_workout_inner(app: &AppState) -> Result<WorkoutSession, PlannerError> {
  let now = Utc::now();
  let week_day_key = load_active(app)
    .await?
    .filter(|a| !a.state.is_finished(&a.stored.program))
    .map(|a| a.state.current_key());

  let session = WorkoutSession {
    id: format!("session-{}", now.timestamp_micros()),
    started_at: now,
    ended_at: None,
    week_day_key,
    completed_exercises: Vec::new(),
  };
  store::save_session(&app.db, &session).await?;
  debug!(session_id = %session.id, "Started workout session");
  Ok(session)
}

/// Record (or replace) one exercise's sets on an open session
#[tauri::command]
pub async fn log_exercise(
  state: State<'_, Arc<AppState>>,
  session_id: String,
  exercise: CompletedExercise,
) -> Result<WorkoutSession, String> {
  log_exercise_inner(&state, &session_id, exercise)
    .await
    .map_err(|e| e.to_string())
}

pub(crate) async fn log_exercise_inner(
  app: &AppState,
  session_id: &str,
  exercise: CompletedExercise,
) -> Result<WorkoutSession, PlannerError> {
  let mut session = store::load_session(&app.db, session_id)
    .await?
    .ok_or_else(|| PlannerError::NotFound(format!("session {}", session_id)))?;
  if session.is_closed() {
    return Err(PlannerError::Program(format!("session {} is already finished", session_id)));
  }

  match session
    .completed_exercises
    .iter_mut()
    .find(|e| e.exercise_id == exercise.exercise_id)
  {
    Some(existing) => *existing = exercise,
    None => session.completed_exercises.push(exercise),
  }
  store::save_session(&app.db, &session).await?;
  Ok(session)
}

#[derive(Debug, Clone, Serialize)]
pub struct FinishWorkoutResult {
  pub session: WorkoutSession,
  /// Updated progression state when the session trained the current program day
  pub program_state: Option<ActiveProgramState>,
}

/// Close a session and, if it trained the current program day, advance the program
#[tauri::command]
pub async fn finish_workout(
  state: State<'_, Arc<AppState>>,
  session_id: String,
  feedback: Option<SessionFeedback>,
) -> Result<FinishWorkoutResult, String> {
  finish_workout_inner(&state, &session_id, feedback)
    .await
    .map_err(|e| e.to_string())
}

pub(crate) async fn finish_workout_inner(
  app: &AppState,
  session_id: &str,
  feedback: Option<SessionFeedback>,
) -> Result<FinishWorkoutResult, PlannerError> {
  let now = Utc::now();
  let session = store::close_session(&app.db, session_id, now).await?;

  let mut program_state = None;
  if let Some(mut active) = load_active(app).await? {
    let trained_current_day = session.week_day_key.as_deref() == Some(active.state.current_key().as_str());
    if trained_current_day && active.state.complete_day(&active.stored.program, feedback) {
      store::save_active_state(&app.db, active.stored.id, &active.state, now).await?;
      program_state = Some(active.state);
    }
  }

  Ok(FinishWorkoutResult {
    session,
    program_state,
  })
}

/// Sessions from the last `days` days (all when omitted), newest first
#[tauri::command]
pub async fn get_sessions(
  state: State<'_, Arc<AppState>>,
  days: Option<i64>,
) -> Result<Vec<WorkoutSession>, String> {
  let since = days.map(|d| Utc::now() - Duration::days(d));
  store::load_sessions(&state.db, since)
    .await
    .map_err(|e| format!("Failed to load sessions: {}", e))
}
