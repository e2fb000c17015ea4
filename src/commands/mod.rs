pub mod profile;
pub mod program;
pub mod readiness;
pub mod session;
pub mod volume;

use crate::db::AppState;
use crate::error::PlannerError;
use crate::progression::ActiveProgramState;
use crate::store::{self, StoredProgram};

/// ---------------------------------------------------------------------------
/// Shared Helpers
/// ---------------------------------------------------------------------------

/// Active program plus its progression state
pub(crate) struct ActiveProgram {
  pub stored: StoredProgram,
  pub state: ActiveProgramState,
}

pub(crate) async fn load_active(app: &AppState) -> Result<Option<ActiveProgram>, PlannerError> {
  let Some(stored) = store::load_active_program(&app.db).await? else {
    return Ok(None);
  };
  let state = store::load_active_state(&app.db, stored.id).await?;
  Ok(Some(ActiveProgram { stored, state }))
}

pub(crate) async fn require_active(app: &AppState) -> Result<ActiveProgram, PlannerError> {
  load_active(app)
    .await?
    .ok_or_else(|| PlannerError::NotFound("active program".into()))
}
