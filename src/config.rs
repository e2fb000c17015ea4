//! Plugin configuration
//!
//! Everything the engine reads is passed in explicitly; these structs are
//! built once at plugin setup (defaults, overridden by `PERIODIZATION_*`
//! environment variables or a `.env` file) and handed to each call.

use serde::{Deserialize, Serialize};
use std::env;

/// Knobs the program generator and the adjustment helpers read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
  /// Total mesocycle length including the deload week; `None` picks by experience
  pub mesocycle_weeks: Option<u32>,
  /// Extra weekly sets for each priority muscle
  pub priority_bonus_sets: u32,
  pub max_sets_per_exercise: u32,
  /// Weekly sets for muscles without landmarks (halved on deload weeks)
  pub default_sets_without_landmarks: u32,
  /// Suggested weights are rounded to this increment
  pub weight_increment_kg: f64,
}

impl GeneratorConfig {
  pub const MIN_MESOCYCLE_WEEKS: u32 = 3;
  pub const MAX_MESOCYCLE_WEEKS: u32 = 8;
}

impl Default for GeneratorConfig {
  fn default() -> Self {
    Self {
      mesocycle_weeks: None,
      priority_bonus_sets: 2,
      max_sets_per_exercise: 5,
      default_sets_without_landmarks: 4,
      weight_increment_kg: 2.5,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
  pub generator: GeneratorConfig,
  /// SQLite file name inside the app data directory
  pub database_file: String,
  /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
  pub log_filter: String,
}

impl Default for PlannerConfig {
  fn default() -> Self {
    Self {
      generator: GeneratorConfig::default(),
      database_file: "periodization.db".to_string(),
      log_filter: "info,periodization_lib=debug".to_string(),
    }
  }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
  env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

impl PlannerConfig {
  /// Load configuration from the environment, reading `.env` first.
  /// Unset or unparsable variables keep their defaults.
  pub fn from_env() -> Self {
    dotenvy::dotenv().ok();
    Self::from_current_env()
  }

  fn from_current_env() -> Self {
    let defaults = Self::default();
    let generator_defaults = defaults.generator;

    let mesocycle_weeks = env_parse::<u32>("PERIODIZATION_MESOCYCLE_WEEKS").map(|w| {
      w.clamp(
        GeneratorConfig::MIN_MESOCYCLE_WEEKS,
        GeneratorConfig::MAX_MESOCYCLE_WEEKS,
      )
    });

    Self {
      generator: GeneratorConfig {
        mesocycle_weeks: mesocycle_weeks.or(generator_defaults.mesocycle_weeks),
        priority_bonus_sets: env_parse("PERIODIZATION_PRIORITY_BONUS_SETS")
          .unwrap_or(generator_defaults.priority_bonus_sets),
        max_sets_per_exercise: env_parse::<u32>("PERIODIZATION_MAX_SETS_PER_EXERCISE")
          .filter(|&n| n > 0)
          .unwrap_or(generator_defaults.max_sets_per_exercise),
        default_sets_without_landmarks: env_parse("PERIODIZATION_DEFAULT_SETS")
          .unwrap_or(generator_defaults.default_sets_without_landmarks),
        weight_increment_kg: env_parse::<f64>("PERIODIZATION_WEIGHT_INCREMENT_KG")
          .filter(|&w| w.is_finite() && w > 0.0)
          .unwrap_or(generator_defaults.weight_increment_kg),
      },
      database_file: env::var("PERIODIZATION_DATABASE_FILE").unwrap_or(defaults.database_file),
      log_filter: env::var("PERIODIZATION_LOG").unwrap_or(defaults.log_filter),
    }
  }
}
