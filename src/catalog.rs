//! Read-only exercise catalog
//!
//! The built-in list covers every trained muscle for each equipment setup
//! (full gym, dumbbells, bodyweight). Hosts may supply their own list; order
//! is significant because the generator breaks ties by catalog position.

use crate::models::BodyPart as B;
use crate::models::Equipment as E;
use crate::models::Muscle as M;
use crate::models::{BodyPart, CatalogExercise, Equipment, Muscle};

const BUILT_IN: &[(&str, &str, Equipment, Muscle, BodyPart)] = &[
    // Chest
    ("barbell_bench_press", "Barbell Bench Press", E::Barbell, M::Chest, B::Chest),
    ("dumbbell_bench_press", "Dumbbell Bench Press", E::Dumbbell, M::Chest, B::Chest),
    ("incline_dumbbell_press", "Incline Dumbbell Press", E::Dumbbell, M::Chest, B::Chest),
    ("machine_chest_press", "Machine Chest Press", E::LeverageMachine, M::Chest, B::Chest),
    ("cable_fly", "Cable Fly", E::Cable, M::Chest, B::Chest),
    ("push_up", "Push-Up", E::BodyWeight, M::Chest, B::Chest),
    ("deficit_push_up", "Deficit Push-Up", E::BodyWeight, M::Chest, B::Chest),
    // Lats
    ("lat_pulldown", "Lat Pulldown", E::Cable, M::Lats, B::Back),
    ("pull_up", "Pull-Up", E::BodyWeight, M::Lats, B::Back),
    ("dumbbell_pullover", "Dumbbell Pullover", E::Dumbbell, M::Lats, B::Back),
    ("band_lat_pulldown", "Band Lat Pulldown", E::Band, M::Lats, B::Back),
    // Upper back
    ("barbell_row", "Barbell Row", E::Barbell, M::UpperBack, B::Back),
    ("dumbbell_row", "One-Arm Dumbbell Row", E::Dumbbell, M::UpperBack, B::Back),
    ("seated_cable_row", "Seated Cable Row", E::Cable, M::UpperBack, B::Back),
    ("inverted_row", "Inverted Row", E::BodyWeight, M::UpperBack, B::Back),
    ("band_pull_apart", "Band Pull-Apart", E::Band, M::UpperBack, B::Back),
    // Shoulders
    ("barbell_overhead_press", "Barbell Overhead Press", E::Barbell, M::Shoulders, B::Shoulders),
    ("dumbbell_shoulder_press", "Dumbbell Shoulder Press", E::Dumbbell, M::Shoulders, B::Shoulders),
    ("machine_shoulder_press", "Machine Shoulder Press", E::LeverageMachine, M::Shoulders, B::Shoulders),
    ("dumbbell_lateral_raise", "Dumbbell Lateral Raise", E::Dumbbell, M::Shoulders, B::Shoulders),
    ("cable_lateral_raise", "Cable Lateral Raise", E::Cable, M::Shoulders, B::Shoulders),
    ("pike_push_up", "Pike Push-Up", E::BodyWeight, M::Shoulders, B::Shoulders),
    // Biceps
    ("ez_bar_curl", "EZ-Bar Curl", E::EzBarbell, M::Biceps, B::UpperArms),
    ("dumbbell_curl", "Dumbbell Curl", E::Dumbbell, M::Biceps, B::UpperArms),
    ("hammer_curl", "Hammer Curl", E::Dumbbell, M::Biceps, B::UpperArms),
    ("cable_curl", "Cable Curl", E::Cable, M::Biceps, B::UpperArms),
    ("band_curl", "Band Curl", E::Band, M::Biceps, B::UpperArms),
    // Triceps
    ("close_grip_bench_press", "Close-Grip Bench Press", E::Barbell, M::Triceps, B::UpperArms),
    ("dumbbell_overhead_extension", "Dumbbell Overhead Extension", E::Dumbbell, M::Triceps, B::UpperArms),
    ("cable_pushdown", "Cable Pushdown", E::Cable, M::Triceps, B::UpperArms),
    ("bench_dip", "Bench Dip", E::BodyWeight, M::Triceps, B::UpperArms),
    ("band_pushdown", "Band Pushdown", E::Band, M::Triceps, B::UpperArms),
    // Forearms
    ("dumbbell_wrist_curl", "Dumbbell Wrist Curl", E::Dumbbell, M::Forearms, B::LowerArms),
    ("dead_hang", "Dead Hang", E::BodyWeight, M::Forearms, B::LowerArms),
    // Quads
    ("barbell_back_squat", "Barbell Back Squat", E::Barbell, M::Quads, B::UpperLegs),
    ("smith_machine_squat", "Smith Machine Squat", E::SmithMachine, M::Quads, B::UpperLegs),
    ("leg_press", "Leg Press", E::SledMachine, M::Quads, B::UpperLegs),
    ("hack_squat", "Hack Squat", E::SledMachine, M::Quads, B::UpperLegs),
    ("leg_extension", "Leg Extension", E::LeverageMachine, M::Quads, B::UpperLegs),
    ("goblet_squat", "Goblet Squat", E::Dumbbell, M::Quads, B::UpperLegs),
    ("bulgarian_split_squat", "Bulgarian Split Squat", E::Dumbbell, M::Quads, B::UpperLegs),
    ("bodyweight_squat", "Bodyweight Squat", E::BodyWeight, M::Quads, B::UpperLegs),
    ("walking_lunge", "Walking Lunge", E::BodyWeight, M::Quads, B::UpperLegs),
    // Hamstrings
    ("romanian_deadlift", "Romanian Deadlift", E::Barbell, M::Hamstrings, B::UpperLegs),
    ("trap_bar_deadlift", "Trap Bar Deadlift", E::TrapBar, M::Hamstrings, B::UpperLegs),
    ("lying_leg_curl", "Lying Leg Curl", E::LeverageMachine, M::Hamstrings, B::UpperLegs),
    ("dumbbell_romanian_deadlift", "Dumbbell Romanian Deadlift", E::Dumbbell, M::Hamstrings, B::UpperLegs),
    ("nordic_curl", "Nordic Curl", E::BodyWeight, M::Hamstrings, B::UpperLegs),
    ("single_leg_hip_hinge", "Single-Leg Hip Hinge", E::BodyWeight, M::Hamstrings, B::UpperLegs),
    // Glutes
    ("barbell_hip_thrust", "Barbell Hip Thrust", E::Barbell, M::Glutes, B::UpperLegs),
    ("dumbbell_hip_thrust", "Dumbbell Hip Thrust", E::Dumbbell, M::Glutes, B::UpperLegs),
    ("cable_pull_through", "Cable Pull-Through", E::Cable, M::Glutes, B::UpperLegs),
    ("glute_bridge", "Glute Bridge", E::BodyWeight, M::Glutes, B::UpperLegs),
    // Calves
    ("standing_calf_raise", "Standing Calf Raise", E::LeverageMachine, M::Calves, B::LowerLegs),
    ("dumbbell_calf_raise", "Dumbbell Calf Raise", E::Dumbbell, M::Calves, B::LowerLegs),
    ("bodyweight_calf_raise", "Bodyweight Calf Raise", E::BodyWeight, M::Calves, B::LowerLegs),
    // Abs
    ("cable_crunch", "Cable Crunch", E::Cable, M::Abs, B::Waist),
    ("hanging_leg_raise", "Hanging Leg Raise", E::BodyWeight, M::Abs, B::Waist),
    ("crunch", "Crunch", E::BodyWeight, M::Abs, B::Waist),
    // Traps
    ("barbell_shrug", "Barbell Shrug", E::Barbell, M::Traps, B::Back),
    ("dumbbell_shrug", "Dumbbell Shrug", E::Dumbbell, M::Traps, B::Back),
    ("band_shrug", "Band Shrug", E::Band, M::Traps, B::Back),
];

#[derive(Debug, Clone)]
pub struct ExerciseCatalog {
    exercises: Vec<CatalogExercise>,
}

impl ExerciseCatalog {
    pub fn new(exercises: Vec<CatalogExercise>) -> Self {
        Self { exercises }
    }

    pub fn get(&self, id: &str) -> Option<&CatalogExercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogExercise> {
        self.exercises.iter()
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Target muscle for a logged exercise id
    pub fn target_of(&self, id: &str) -> Option<Muscle> {
        self.get(id).map(|e| e.target)
    }
}

impl Default for ExerciseCatalog {
    fn default() -> Self {
        let exercises = BUILT_IN
            .iter()
            .map(|(id, name, equipment, target, body_part)| CatalogExercise {
                id: (*id).to_string(),
                name: (*name).to_string(),
                equipment: *equipment,
                target: *target,
                body_part: *body_part,
            })
            .collect();
        Self { exercises }
    }
}
