use serde::{Deserialize, Serialize};

/// Muscle groups tracked by the volume landmark table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Muscle {
  Chest,
  Lats,
  UpperBack,
  Shoulders,
  Biceps,
  Triceps,
  Forearms,
  Quads,
  Hamstrings,
  Glutes,
  Calves,
  Abs,
  Traps,
}

impl Muscle {
  /// Canonical iteration order (also the tie-break order for sorted reports)
  pub const ALL: [Muscle; 13] = [
    Muscle::Chest,
    Muscle::Lats,
    Muscle::UpperBack,
    Muscle::Shoulders,
    Muscle::Biceps,
    Muscle::Triceps,
    Muscle::Forearms,
    Muscle::Quads,
    Muscle::Hamstrings,
    Muscle::Glutes,
    Muscle::Calves,
    Muscle::Abs,
    Muscle::Traps,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Muscle::Chest => "chest",
      Muscle::Lats => "lats",
      Muscle::UpperBack => "upper_back",
      Muscle::Shoulders => "shoulders",
      Muscle::Biceps => "biceps",
      Muscle::Triceps => "triceps",
      Muscle::Forearms => "forearms",
      Muscle::Quads => "quads",
      Muscle::Hamstrings => "hamstrings",
      Muscle::Glutes => "glutes",
      Muscle::Calves => "calves",
      Muscle::Abs => "abs",
      Muscle::Traps => "traps",
    }
  }

  /// Human-readable label used in advisory messages
  pub fn label(&self) -> &'static str {
    match self {
      Muscle::Chest => "Chest",
      Muscle::Lats => "Lats",
      Muscle::UpperBack => "Upper back",
      Muscle::Shoulders => "Shoulders",
      Muscle::Biceps => "Biceps",
      Muscle::Triceps => "Triceps",
      Muscle::Forearms => "Forearms",
      Muscle::Quads => "Quads",
      Muscle::Hamstrings => "Hamstrings",
      Muscle::Glutes => "Glutes",
      Muscle::Calves => "Calves",
      Muscle::Abs => "Abs",
      Muscle::Traps => "Traps",
    }
  }
}

impl std::fmt::Display for Muscle {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl std::str::FromStr for Muscle {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Muscle::ALL
      .iter()
      .copied()
      .find(|m| m.as_str() == s)
      .ok_or_else(|| format!("Unknown muscle: {}", s))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
  Barbell,
  EzBarbell,
  TrapBar,
  SmithMachine,
  Dumbbell,
  Kettlebell,
  BodyWeight,
  Band,
  Cable,
  LeverageMachine,
  SledMachine,
}

impl Equipment {
  pub fn is_machine_or_cable(&self) -> bool {
    matches!(
      self,
      Equipment::Cable | Equipment::LeverageMachine | Equipment::SledMachine
    )
  }

  /// Equipment with no external load to prescribe
  pub fn is_unloaded(&self) -> bool {
    matches!(self, Equipment::BodyWeight | Equipment::Band)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
  Chest,
  Back,
  Shoulders,
  UpperArms,
  LowerArms,
  UpperLegs,
  LowerLegs,
  Waist,
}

/// One entry of the read-only exercise catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogExercise {
  pub id: String,
  pub name: String,
  pub equipment: Equipment,
  pub target: Muscle,
  pub body_part: BodyPart,
}
