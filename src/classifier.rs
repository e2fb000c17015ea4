//! Exercise tiering
//!
//! Maps a catalog exercise to one of six prescription tiers. The tier drives
//! rep range, rest and the bodyweight multiplier used to estimate
//! a starting load.

use serde::{Deserialize, Serialize};

use crate::catalog::ExerciseCatalog;
use crate::models::{CatalogExercise, Equipment, Muscle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseCategory {
    HeavyBarbellCompound,
    DumbbellCompound,
    MachineCompound,
    Isolation,
    MachineIsolation,
    AbsCalves,
}

/// Default prescription for a tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierPrescription {
    pub rep_min: u32,
    pub rep_max: u32,
    pub rest_seconds: u32,
    /// Starting load as a fraction of bodyweight
    pub bodyweight_multiplier: f64,
}

impl ExerciseCategory {
    pub fn prescription(&self) -> TierPrescription {
        let (rep_min, rep_max, rest_seconds, bodyweight_multiplier) = match self {
            Self::HeavyBarbellCompound => (5, 8, 180, 0.60),
            Self::DumbbellCompound => (8, 12, 120, 0.20),
            Self::MachineCompound => (10, 15, 90, 0.50),
            Self::Isolation => (10, 15, 75, 0.10),
            Self::MachineIsolation => (12, 15, 60, 0.25),
            Self::AbsCalves => (12, 20, 60, 0.30),
        };
        TierPrescription {
            rep_min,
            rep_max,
            rest_seconds,
            bodyweight_multiplier,
        }
    }

    pub fn is_compound(&self) -> bool {
        matches!(
            self,
            Self::HeavyBarbellCompound | Self::DumbbellCompound | Self::MachineCompound
        )
    }
}

fn is_compound_target(target: Muscle) -> bool {
    matches!(
        target,
        Muscle::Chest
            | Muscle::Lats
            | Muscle::UpperBack
            | Muscle::Shoulders
            | Muscle::Quads
            | Muscle::Hamstrings
            | Muscle::Glutes
    )
}

/// Tier for a catalog exercise; first matching rule wins
pub fn classify(exercise: &CatalogExercise) -> ExerciseCategory {
    if matches!(exercise.target, Muscle::Abs | Muscle::Calves) {
        return ExerciseCategory::AbsCalves;
    }

    let compound = is_compound_target(exercise.target);
    let equipment = exercise.equipment;

    if compound
        && matches!(
            equipment,
            Equipment::Barbell | Equipment::TrapBar | Equipment::SmithMachine
        )
    {
        ExerciseCategory::HeavyBarbellCompound
    } else if compound && matches!(equipment, Equipment::Dumbbell | Equipment::BodyWeight) {
        ExerciseCategory::DumbbellCompound
    } else if compound && equipment.is_machine_or_cable() {
        ExerciseCategory::MachineCompound
    } else if equipment.is_machine_or_cable() {
        ExerciseCategory::MachineIsolation
    } else {
        ExerciseCategory::Isolation
    }
}

/// Tier by catalog id; unknown ids fall back to isolation
pub fn classify_id(catalog: &ExerciseCatalog, exercise_id: &str) -> ExerciseCategory {
    catalog
        .get(exercise_id)
        .map(classify)
        .unwrap_or(ExerciseCategory::Isolation)
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BodyPart;

    fn exercise(equipment: Equipment, target: Muscle) -> CatalogExercise {
        CatalogExercise {
            id: "test".to_string(),
            name: "Test".to_string(),
            equipment,
            target,
            body_part: BodyPart::Chest,
        }
    }

    #[test]
    fn test_abs_and_calves_win_regardless_of_equipment() {
        assert_eq!(
            classify(&exercise(Equipment::Barbell, Muscle::Calves)),
            ExerciseCategory::AbsCalves
        );
        assert_eq!(
            classify(&exercise(Equipment::Cable, Muscle::Abs)),
            ExerciseCategory::AbsCalves
        );
    }

    #[test]
    fn test_heavy_barbell_compound() {
        for equipment in [Equipment::Barbell, Equipment::TrapBar, Equipment::SmithMachine] {
            assert_eq!(
                classify(&exercise(equipment, Muscle::Quads)),
                ExerciseCategory::HeavyBarbellCompound
            );
        }
    }

    #[test]
    fn test_dumbbell_and_bodyweight_compound() {
        assert_eq!(
            classify(&exercise(Equipment::Dumbbell, Muscle::Chest)),
            ExerciseCategory::DumbbellCompound
        );
        assert_eq!(
            classify(&exercise(Equipment::BodyWeight, Muscle::Lats)),
            ExerciseCategory::DumbbellCompound
        );
    }

    #[test]
    fn test_machine_compound_and_isolation() {
        assert_eq!(
            classify(&exercise(Equipment::SledMachine, Muscle::Quads)),
            ExerciseCategory::MachineCompound
        );
        assert_eq!(
            classify(&exercise(Equipment::Cable, Muscle::Triceps)),
            ExerciseCategory::MachineIsolation
        );
    }

    #[test]
    fn test_isolation_fallthrough() {
        // barbell on a non-compound target
        assert_eq!(
            classify(&exercise(Equipment::Barbell, Muscle::Biceps)),
            ExerciseCategory::Isolation
        );
        // kettlebell is neither barbell, dumbbell nor machine
        assert_eq!(
            classify(&exercise(Equipment::Kettlebell, Muscle::Glutes)),
            ExerciseCategory::Isolation
        );
    }

    #[test]
    fn test_unknown_id_is_isolation() {
        let catalog = ExerciseCatalog::default();
        assert_eq!(classify_id(&catalog, "not_an_exercise"), ExerciseCategory::Isolation);
        assert_eq!(
            classify_id(&catalog, "barbell_back_squat"),
            ExerciseCategory::HeavyBarbellCompound
        );
    }

    #[test]
    fn test_heavier_tiers_prescribe_fewer_reps_and_longer_rest() {
        let heavy = ExerciseCategory::HeavyBarbellCompound.prescription();
        let isolation = ExerciseCategory::MachineIsolation.prescription();
        assert!(heavy.rep_max < isolation.rep_min);
        assert!(heavy.rest_seconds > isolation.rest_seconds);
    }
}
