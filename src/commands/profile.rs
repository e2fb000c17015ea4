use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tauri::State;
use tracing::info;

use super::program::regenerate;
use crate::db::AppState;
use crate::error::PlannerError;
use crate::models::{TrainingProgram, UserProfile};
use crate::store;

#[derive(Debug, Clone, Serialize)]
pub struct SaveProfileResult {
  pub profile: UserProfile,
  /// Set when the edit changed anything the generator reads
  pub regenerated_program: Option<TrainingProgram>,
}

#[tauri::command]
pub async fn get_profile(state: State<'_, Arc<AppState>>) -> Result<Option<UserProfile>, String> {
  store::load_profile(&state.db)
    .await
    .map_err(|e| format!("Failed to load profile: {}", e))
}

/// Save the profile; a first profile or a material edit regenerates the program
#[tauri::command]
pub async fn save_profile(
  state: State<'_, Arc<AppState>>,
  profile: UserProfile,
) -> Result<SaveProfileResult, String> {
  save_profile_inner(&state, profile).await.map_err(|e| e.to_string())
}

pub(crate) async fn save_profile_inner(
  app: &AppState,
  profile: UserProfile,
) -> Result<SaveProfileResult, PlannerError> {
  let previous = store::load_profile(&app.db).await?;
  store::save_profile(&app.db, &profile, Utc::now()).await?;

  let needs_program = match &previous {
    None => true,
    Some(prev) => prev.materially_differs(&profile),
  };

  let regenerated_program = if needs_program {
    info!("Profile changed materially, regenerating program");
    Some(regenerate(app, &profile).await?)
  } else {
    None
  };

  Ok(SaveProfileResult {
    profile,
    regenerated_program,
  })
}
