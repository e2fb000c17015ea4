use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::exercise::Muscle;
use crate::classifier::ExerciseCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitType {
  FullBody,
  UpperLower,
  PushPullLegs,
}

/// Which day template a program day was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayFocus {
  FullBodyA,
  FullBodyB,
  UpperA,
  UpperB,
  LowerA,
  LowerB,
  Push,
  Pull,
  Legs,
}

impl DayFocus {
  pub fn label(&self) -> &'static str {
    match self {
      DayFocus::FullBodyA => "Full Body A",
      DayFocus::FullBodyB => "Full Body B",
      DayFocus::UpperA => "Upper A",
      DayFocus::UpperB => "Upper B",
      DayFocus::LowerA => "Lower A",
      DayFocus::LowerB => "Lower B",
      DayFocus::Push => "Push",
      DayFocus::Pull => "Pull",
      DayFocus::Legs => "Legs",
    }
  }
}

/// A prescribed exercise. The `original_*` fields are written once by the
/// generator and are the baseline every later adjustment is relative to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramExercise {
  pub exercise_id: String,
  pub name: String,
  pub target: Muscle,
  pub category: ExerciseCategory,
  pub sets: u32,
  pub rep_min: u32,
  pub rep_max: u32,
  /// Reps in reserve, 0 (failure) to 4 (easy)
  pub target_rir: u8,
  pub rest_seconds: u32,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub suggested_weight_kg: Option<f64>,
  pub original_sets: u32,
  pub original_target_rir: u8,
  pub original_rest_seconds: u32,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub original_suggested_weight_kg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramDay {
  pub day_index: usize,
  pub name: String,
  pub focus: DayFocus,
  pub exercises: Vec<ProgramExercise>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramWeek {
  /// 1-based
  pub week_number: u32,
  pub is_deload: bool,
  pub target_rir: u8,
  pub volume_targets: BTreeMap<Muscle, u32>,
  /// Targets as generated; feedback deltas are applied against these
  #[serde(default)]
  pub original_volume_targets: BTreeMap<Muscle, u32>,
  pub days: Vec<ProgramDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingProgram {
  pub split: SplitType,
  pub total_weeks: u32,
  pub weeks: Vec<ProgramWeek>,
}

impl TrainingProgram {
  pub fn week(&self, week_number: u32) -> Option<&ProgramWeek> {
    self.weeks.iter().find(|w| w.week_number == week_number)
  }

  pub fn week_mut(&mut self, week_number: u32) -> Option<&mut ProgramWeek> {
    self.weeks.iter_mut().find(|w| w.week_number == week_number)
  }

  pub fn days_per_week(&self) -> usize {
    self.weeks.first().map(|w| w.days.len()).unwrap_or(0)
  }
}
