use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tauri::State;

use super::require_active;
use crate::classifier::{classify_id, ExerciseCategory};
use crate::db::AppState;
use crate::deload::{
  self, check_deload_status, get_muscles_above_mrv, DeloadStatus, MrvOverflow, MuscleVolume,
  LOOKBACK_WEEKS,
};
use crate::error::PlannerError;
use crate::feedback::{compute_feedback_adjustments, VolumeAdjustment};
use crate::landmarks::{self, landmarks_for, VolumeLandmarks, VolumeZone};
use crate::models::{Muscle, TrainingProgram, WorkoutSession};
use crate::progression::{self, day_muscle_map};
use crate::store;

/// Sessions inside the deload lookback, anchored at `now`
async fn recent_history(app: &AppState, now: DateTime<Utc>) -> Result<Vec<WorkoutSession>, PlannerError> {
  let since = now - Duration::weeks(LOOKBACK_WEEKS as i64);
  store::load_sessions(&app.db, Some(since)).await
}

/// Sessions reaching back to the start of the week at `week_offset`
async fn history_for_week(
  app: &AppState,
  now: DateTime<Utc>,
  week_offset: i32,
) -> Result<Vec<WorkoutSession>, PlannerError> {
  match deload::week_window(now, week_offset) {
    Some((start, _)) => store::load_sessions(&app.db, Some(start)).await,
    None => Ok(Vec::new()),
  }
}

/// ---------------------------------------------------------------------------
/// Volume Monitoring
/// ---------------------------------------------------------------------------

#[tauri::command]
pub async fn get_deload_status(state: State<'_, Arc<AppState>>) -> Result<DeloadStatus, String> {
  let now = Utc::now();
  let history = recent_history(&state, now).await.map_err(|e| e.to_string())?;
  Ok(check_deload_status(&history, &state.catalog, now))
}

#[tauri::command]
pub async fn get_muscles_over_mrv(
  state: State<'_, Arc<AppState>>,
  week_offset: Option<i32>,
) -> Result<Vec<MrvOverflow>, String> {
  muscles_over_mrv(&state, Utc::now(), week_offset.unwrap_or(0))
    .await
    .map_err(|e| e.to_string())
}

pub(crate) async fn muscles_over_mrv(
  app: &AppState,
  now: DateTime<Utc>,
  week_offset: i32,
) -> Result<Vec<MrvOverflow>, PlannerError> {
  let history = history_for_week(app, now, week_offset).await?;
  Ok(get_muscles_above_mrv(&history, &app.catalog, now, week_offset))
}

#[tauri::command]
pub async fn get_volume_report(
  state: State<'_, Arc<AppState>>,
  week_offset: Option<i32>,
) -> Result<Vec<MuscleVolume>, String> {
  volume_report(&state, Utc::now(), week_offset.unwrap_or(0))
    .await
    .map_err(|e| e.to_string())
}

pub(crate) async fn volume_report(
  app: &AppState,
  now: DateTime<Utc>,
  week_offset: i32,
) -> Result<Vec<MuscleVolume>, PlannerError> {
  let history = history_for_week(app, now, week_offset).await?;
  Ok(deload::volume_report(&history, &app.catalog, now, week_offset))
}

/// ---------------------------------------------------------------------------
/// Feedback Adaptation
/// ---------------------------------------------------------------------------

/// Most recently finished week, if any
fn last_completed_week(current_week: u32) -> Option<u32> {
  current_week.checked_sub(1).filter(|&w| w > 0)
}

/// Proposed next-week changes from a week's feedback (default: the last
/// finished week)
#[tauri::command]
pub async fn get_feedback_adjustments(
  state: State<'_, Arc<AppState>>,
  week: Option<u32>,
) -> Result<Vec<VolumeAdjustment>, String> {
  feedback_adjustments(&state, week).await.map_err(|e| e.to_string())
}

pub(crate) async fn feedback_adjustments(
  app: &AppState,
  week: Option<u32>,
) -> Result<Vec<VolumeAdjustment>, PlannerError> {
  let active = require_active(app).await?;
  let Some(week) = week.or_else(|| last_completed_week(active.state.current_week)) else {
    return Ok(Vec::new());
  };

  let feedback = active.state.week_feedbacks(week);
  let day_muscles = day_muscle_map(&active.stored.program, week);
  Ok(compute_feedback_adjustments(&feedback, &day_muscles))
}

/// Apply a finished week's feedback to the week after it
#[tauri::command]
pub async fn apply_feedback_adjustments(
  state: State<'_, Arc<AppState>>,
  week: Option<u32>,
) -> Result<TrainingProgram, String> {
  apply_feedback_inner(&state, week).await.map_err(|e| e.to_string())
}

pub(crate) async fn apply_feedback_inner(
  app: &AppState,
  week: Option<u32>,
) -> Result<TrainingProgram, PlannerError> {
  let mut active = require_active(app).await?;
  let source_week = week
    .or_else(|| last_completed_week(active.state.current_week))
    .ok_or_else(|| PlannerError::Program("no finished week to adapt from".into()))?;

  let feedback = active.state.week_feedbacks(source_week);
  let day_muscles = day_muscle_map(&active.stored.program, source_week);
  let adjustments = compute_feedback_adjustments(&feedback, &day_muscles);

  progression::apply_volume_adjustments(
    &mut active.stored.program,
    source_week + 1,
    &adjustments,
    &app.config.generator,
  )?;
  store::update_program(&app.db, active.stored.id, &active.stored.program, Utc::now()).await?;
  Ok(active.stored.program)
}

/// Convert a week (default: the current one) into a deload week
#[tauri::command]
pub async fn force_deload_week(
  state: State<'_, Arc<AppState>>,
  week: Option<u32>,
) -> Result<TrainingProgram, String> {
  force_deload_inner(&state, week).await.map_err(|e| e.to_string())
}

pub(crate) async fn force_deload_inner(
  app: &AppState,
  week: Option<u32>,
) -> Result<TrainingProgram, PlannerError> {
  let mut active = require_active(app).await?;
  let week = week.unwrap_or(active.state.current_week);
  progression::force_deload(&mut active.stored.program, week, &app.config.generator)?;
  store::update_program(&app.db, active.stored.id, &active.stored.program, Utc::now()).await?;
  Ok(active.stored.program)
}

/// ---------------------------------------------------------------------------
/// Lookups
/// ---------------------------------------------------------------------------

#[tauri::command]
pub fn classify_exercise(state: State<'_, Arc<AppState>>, exercise_id: String) -> ExerciseCategory {
  classify_id(&state.catalog, &exercise_id)
}

#[tauri::command]
pub fn get_volume_landmarks(muscle: Muscle) -> Option<VolumeLandmarks> {
  landmarks_for(muscle)
}

/// Zone for a weekly set count; `None` for muscles without landmarks
#[tauri::command]
pub fn get_volume_zone(muscle: Muscle, sets: u32) -> Option<VolumeZone> {
  landmarks_for(muscle).map(|l| landmarks::get_volume_zone(sets, &l))
}
