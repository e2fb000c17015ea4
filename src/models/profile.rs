use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::exercise::{Equipment, Muscle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
  BuildMuscle,
  GetStronger,
  LoseFat,
  GeneralFitness,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Experience {
  Beginner,
  Intermediate,
  Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
  Male,
  Female,
}

/// What the user has access to when training
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSetup {
  FullGym,
  DumbbellsOnly,
  BodyweightOnly,
}

impl EquipmentSetup {
  pub fn allows(&self, equipment: Equipment) -> bool {
    match self {
      EquipmentSetup::FullGym => true,
      EquipmentSetup::DumbbellsOnly => matches!(
        equipment,
        Equipment::Dumbbell | Equipment::Kettlebell | Equipment::BodyWeight | Equipment::Band
      ),
      EquipmentSetup::BodyweightOnly => {
        matches!(equipment, Equipment::BodyWeight | Equipment::Band)
      }
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
  #[error("Training days per week must be 3-6, got {0}")]
  DaysPerWeek(u8),

  #[error("Bodyweight must be positive, got {0} kg")]
  Bodyweight(String),

  #[error("At most 2 priority muscles allowed, got {0}")]
  TooManyPriorities(usize),
}

/// Onboarding profile the program is generated from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
  pub goal: Goal,
  pub experience: Experience,
  pub days_per_week: u8,
  pub sex: Sex,
  pub bodyweight_kg: f64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub height_cm: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub age: Option<u8>,
  pub equipment: EquipmentSetup,
  #[serde(default)]
  pub priority_muscles: Vec<Muscle>,
}

impl UserProfile {
  pub fn validate(&self) -> Result<(), ProfileError> {
    if !(3..=6).contains(&self.days_per_week) {
      return Err(ProfileError::DaysPerWeek(self.days_per_week));
    }
    if !(self.bodyweight_kg.is_finite() && self.bodyweight_kg > 0.0) {
      return Err(ProfileError::Bodyweight(self.bodyweight_kg.to_string()));
    }
    if self.priority_muscles.len() > 2 {
      return Err(ProfileError::TooManyPriorities(self.priority_muscles.len()));
    }
    Ok(())
  }

  /// Whether an edit changes anything the generator reads.
  /// Height and age are informational only.
  pub fn materially_differs(&self, other: &UserProfile) -> bool {
    self.goal != other.goal
      || self.experience != other.experience
      || self.days_per_week != other.days_per_week
      || self.sex != other.sex
      || self.bodyweight_kg != other.bodyweight_kg
      || self.equipment != other.equipment
      || self.priority_muscles != other.priority_muscles
  }
}
