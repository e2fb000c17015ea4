//! Training-program periodization and adaptation engine, packaged as a
//! Tauri plugin.
//!
//! The engine modules (`landmarks`, `classifier`, `generator`, `deload`,
//! `readiness`, `feedback`, `progression`) are synchronous and pure; the
//! plugin layer adds SQLite persistence and IPC commands on top.

pub mod catalog;
pub mod classifier;
mod commands;
pub mod config;
pub mod db;
pub mod deload;
pub mod error;
pub mod feedback;
pub mod generator;
pub mod landmarks;
pub mod logging;
pub mod models;
pub mod progression;
pub mod readiness;
pub mod store;

#[cfg(test)]
pub mod test_utils;

pub use catalog::ExerciseCatalog;
pub use config::{GeneratorConfig, PlannerConfig};
pub use error::PlannerError;

use db::AppState;
use std::sync::Arc;
use tauri::{
  plugin::{Builder, TauriPlugin},
  Manager, Runtime,
};
use tracing::{error, info};

/// Build the plugin. Configuration comes from `PERIODIZATION_*` variables
/// (or `.env`); the database lives in the host app's data directory.
pub fn init<R: Runtime>() -> TauriPlugin<R> {
  Builder::new("periodization")
    .setup(|app, _api| {
      let config = PlannerConfig::from_env();
      logging::init(&config.log_filter);

      let app_handle = app.clone();
      tauri::async_runtime::block_on(async move {
        match db::initialize_db(&app_handle, &config).await {
          Ok(pool) => {
            let state = Arc::new(AppState {
              db: pool,
              config,
              catalog: ExerciseCatalog::default(),
            });
            app_handle.manage(state);
            info!("Periodization plugin ready");
          }
          Err(e) => {
            error!(error = %e, "Failed to initialize database");
          }
        }
      });
      Ok(())
    })
    .invoke_handler(tauri::generate_handler![
      // Profile
      commands::profile::get_profile,
      commands::profile::save_profile,
      // Program
      commands::program::generate_program,
      commands::program::get_program,
      commands::program::get_program_state,
      commands::program::get_todays_workout,
      commands::program::restart_program,
      // Sessions
      commands::session::start_workout,
      commands::session::log_exercise,
      commands::session::finish_workout,
      commands::session::get_sessions,
      // Readiness
      commands::readiness::submit_readiness,
      // Volume & adaptation
      commands::volume::get_deload_status,
      commands::volume::get_muscles_over_mrv,
      commands::volume::get_volume_report,
      commands::volume::get_feedback_adjustments,
      commands::volume::apply_feedback_adjustments,
      commands::volume::force_deload_week,
      commands::volume::classify_exercise,
      commands::volume::get_volume_landmarks,
      commands::volume::get_volume_zone,
    ])
    .build()
}
