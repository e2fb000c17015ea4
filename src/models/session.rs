use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Highest RIR that still counts a set toward trained volume
pub const MAX_EFFECTIVE_RIR: u8 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedSet {
  pub reps: u32,
  pub weight_kg: f64,
  pub completed: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub rir: Option<u8>,
}

impl CompletedSet {
  /// Completed and not logged as too easy (unlogged RIR counts)
  pub fn is_effective(&self) -> bool {
    self.completed && self.rir.is_none_or(|r| r <= MAX_EFFECTIVE_RIR)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedExercise {
  pub exercise_id: String,
  pub sets: Vec<CompletedSet>,
}

impl CompletedExercise {
  pub fn effective_sets(&self) -> u32 {
    self.sets.iter().filter(|s| s.is_effective()).count() as u32
  }
}

/// Append-only record of one training session; closed once `ended_at` is set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSession {
  pub id: String,
  pub started_at: DateTime<Utc>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub ended_at: Option<DateTime<Utc>>,
  /// "week-day" key of the program day this session trained, if any
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub week_day_key: Option<String>,
  #[serde(default)]
  pub completed_exercises: Vec<CompletedExercise>,
}

impl WorkoutSession {
  pub fn is_closed(&self) -> bool {
    self.ended_at.is_some()
  }
}

/// Post-session subjective scores, each 1 (low) to 3 (high)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionFeedback {
  pub pump: u8,
  pub soreness: u8,
  pub performance: u8,
  #[serde(default)]
  pub joint_pain: bool,
}

/// Pre-session check, each score 1 (poor) to 3 (great)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessCheck {
  pub sleep: u8,
  pub energy: u8,
  pub stress: u8,
  pub soreness: u8,
}
