use serde::{Deserialize, Serialize};

use crate::models::ProfileError;
use crate::progression::ProgressionError;

/// Errors surfaced by the storage layer and the command surface.
/// The engine itself never fails; it returns safe defaults instead.
#[derive(Debug, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum PlannerError {
  #[error("Database error: {0}")]
  Database(String),

  #[error("Serialization error: {0}")]
  Serialization(String),

  #[error("Not found: {0}")]
  NotFound(String),

  #[error("Invalid profile: {0}")]
  InvalidProfile(String),

  #[error("No user profile saved")]
  NoProfile,

  #[error("Program error: {0}")]
  Program(String),
}

impl From<sqlx::Error> for PlannerError {
  fn from(e: sqlx::Error) -> Self {
    match e {
      sqlx::Error::RowNotFound => PlannerError::NotFound("row".into()),
      other => PlannerError::Database(other.to_string()),
    }
  }
}

impl From<sqlx::migrate::MigrateError> for PlannerError {
  fn from(e: sqlx::migrate::MigrateError) -> Self {
    PlannerError::Database(e.to_string())
  }
}

impl From<serde_json::Error> for PlannerError {
  fn from(e: serde_json::Error) -> Self {
    PlannerError::Serialization(e.to_string())
  }
}

impl From<ProfileError> for PlannerError {
  fn from(e: ProfileError) -> Self {
    PlannerError::InvalidProfile(e.to_string())
  }
}

impl From<ProgressionError> for PlannerError {
  fn from(e: ProgressionError) -> Self {
    PlannerError::Program(e.to_string())
  }
}
