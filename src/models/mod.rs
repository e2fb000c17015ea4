pub mod exercise;
pub mod profile;
pub mod program;
pub mod session;

pub use exercise::{BodyPart, CatalogExercise, Equipment, Muscle};
pub use profile::{EquipmentSetup, Experience, Goal, ProfileError, Sex, UserProfile};
pub use program::{DayFocus, ProgramDay, ProgramExercise, ProgramWeek, SplitType, TrainingProgram};
pub use session::{
  CompletedExercise, CompletedSet, ReadinessCheck, SessionFeedback, WorkoutSession,
};
