use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tauri::Manager;
use tracing::info;

use crate::catalog::ExerciseCatalog;
use crate::config::PlannerConfig;
use crate::error::PlannerError;

pub type DbPool = SqlitePool;

/// Plugin state shared by every command
pub struct AppState {
  pub db: DbPool,
  pub config: PlannerConfig,
  pub catalog: ExerciseCatalog,
}

/// Database file inside the host app's data directory
fn get_db_path<R: tauri::Runtime>(
  app: &tauri::AppHandle<R>,
  config: &PlannerConfig,
) -> Result<PathBuf, PlannerError> {
  let data_dir = app
    .path()
    .app_data_dir()
    .map_err(|e| PlannerError::Database(format!("Failed to get app data dir: {}", e)))?;

  fs::create_dir_all(&data_dir)
    .map_err(|e| PlannerError::Database(format!("Failed to create {}: {}", data_dir.display(), e)))?;

  Ok(data_dir.join(&config.database_file))
}

/// Open (creating if needed) the database at `path` and run migrations
pub async fn connect(path: &Path) -> Result<DbPool, PlannerError> {
  let db_url = format!("sqlite://{}?mode=rwc", path.display());
  info!(path = %path.display(), "Initializing database");

  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(&db_url)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  info!("Database initialized successfully");
  Ok(pool)
}

/// Initialize the database connection pool for the running app
pub async fn initialize_db<R: tauri::Runtime>(
  app: &tauri::AppHandle<R>,
  config: &PlannerConfig,
) -> Result<DbPool, PlannerError> {
  let db_path = get_db_path(app, config)?;
  connect(&db_path).await
}
