use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tauri::State;

use super::{load_active, require_active};
use crate::db::AppState;
use crate::error::PlannerError;
use crate::generator;
use crate::models::{ProgramExercise, TrainingProgram, UserProfile};
use crate::progression::ActiveProgramState;
use crate::readiness::{adjustments_for, apply_adjustments_to_exercises, ReadinessLevel};
use crate::store;

/// Generate a program from `profile`, store it as active and start it fresh
pub(crate) async fn regenerate(
  app: &AppState,
  profile: &UserProfile,
) -> Result<TrainingProgram, PlannerError> {
  let program = generator::generate(Some(profile), &app.catalog, &app.config.generator)
    .ok_or_else(|| PlannerError::InvalidProfile("profile cannot produce a program".into()))?;

  let now = Utc::now();
  let id = store::save_program(&app.db, &program, now).await?;
  store::save_active_state(&app.db, id, &ActiveProgramState::new(), now).await?;
  Ok(program)
}

#[tauri::command]
pub async fn generate_program(state: State<'_, Arc<AppState>>) -> Result<TrainingProgram, String> {
  let profile = store::load_profile(&state.db)
    .await
    .map_err(|e| e.to_string())?
    .ok_or_else(|| PlannerError::NoProfile.to_string())?;

  regenerate(&state, &profile).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_program(state: State<'_, Arc<AppState>>) -> Result<Option<TrainingProgram>, String> {
  store::load_active_program(&state.db)
    .await
    .map(|p| p.map(|stored| stored.program))
    .map_err(|e| format!("Failed to load program: {}", e))
}

#[tauri::command]
pub async fn get_program_state(
  state: State<'_, Arc<AppState>>,
) -> Result<Option<ActiveProgramState>, String> {
  load_active(&state)
    .await
    .map(|active| active.map(|a| a.state))
    .map_err(|e| e.to_string())
}

#[derive(Debug, Clone, Serialize)]
pub struct TodaysWorkout {
  pub week: u32,
  pub day_index: usize,
  pub week_day_key: String,
  pub day_name: String,
  pub is_deload: bool,
  /// Prescribed exercises, adjusted when today's readiness called for it
  pub exercises: Vec<ProgramExercise>,
  pub readiness_level: Option<ReadinessLevel>,
}

/// The next program day to train, or `None` when no program is active or
/// it is finished
#[tauri::command]
pub async fn get_todays_workout(
  state: State<'_, Arc<AppState>>,
) -> Result<Option<TodaysWorkout>, String> {
  todays_workout(&state).await.map_err(|e| e.to_string())
}

pub(crate) async fn todays_workout(app: &AppState) -> Result<Option<TodaysWorkout>, PlannerError> {
  let Some(active) = load_active(app).await? else {
    return Ok(None);
  };
  let program = &active.stored.program;
  let (Some(week), Some(day)) = (
    program.week(active.state.current_week),
    active.state.current_day(program),
  ) else {
    return Ok(None);
  };

  // readiness only applies on the day it was checked
  let today = Utc::now().date_naive();
  let readiness_level = active
    .state
    .last_readiness
    .as_ref()
    .filter(|r| r.checked_at.date_naive() == today)
    .map(|r| r.level);

  let exercises = match readiness_level {
    Some(level) => apply_adjustments_to_exercises(&day.exercises, &adjustments_for(level)),
    None => day.exercises.clone(),
  };

  Ok(Some(TodaysWorkout {
    week: week.week_number,
    day_index: day.day_index,
    week_day_key: active.state.current_key(),
    day_name: day.name.clone(),
    is_deload: week.is_deload,
    exercises,
    readiness_level,
  }))
}

/// Restart the active program from week 1, day 1
#[tauri::command]
pub async fn restart_program(state: State<'_, Arc<AppState>>) -> Result<ActiveProgramState, String> {
  let mut active = require_active(&state).await.map_err(|e| e.to_string())?;
  active.state.reset();
  store::save_active_state(&state.db, active.stored.id, &active.state, Utc::now())
    .await
    .map_err(|e| e.to_string())?;
  Ok(active.state)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::{mock_profile, test_app_state};

  #[tokio::test]
  async fn test_no_program_no_workout() {
    let app = test_app_state().await;
    assert!(todays_workout(&app).await.unwrap().is_none());
  }

  #[tokio::test]
  async fn test_todays_workout_is_first_day() {
    let app = test_app_state().await;
    let program = regenerate(&app, &mock_profile()).await.unwrap();

    let today = todays_workout(&app).await.unwrap().unwrap();
    assert_eq!(today.week, 1);
    assert_eq!(today.day_index, 0);
    assert_eq!(today.week_day_key, "1-0");
    assert_eq!(today.exercises, program.weeks[0].days[0].exercises);
    assert!(today.readiness_level.is_none());
  }
}
