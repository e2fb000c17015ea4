//! Program progression
//!
//! Tracks where the athlete is in a generated mesocycle and applies the
//! engine's proposals (feedback deltas, forced deloads) to future weeks.
//!
//! Key rules:
//! - Days advance in order; the week rolls over after its last day
//! - Only upcoming, non-deload weeks take feedback deltas
//! - `original_*` prescription fields are never modified here

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::GeneratorConfig;
use crate::feedback::{DayMuscleMap, VolumeAdjustment};
use crate::generator::{distribute_sets, DELOAD_RIR};
use crate::landmarks::landmarks_for;
use crate::models::{ProgramDay, SessionFeedback, TrainingProgram};
use crate::readiness::ReadinessRecord;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ProgressionError {
    #[error("Week {0} is not part of this program")]
    UnknownWeek(u32),

    #[error("Week {0} is a deload week")]
    DeloadWeek(u32),
}

// ---------------------------------------------------------------------------
/// Active program state
// ---------------------------------------------------------------------------

/// Position within the active program plus what was recorded along the way
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveProgramState {
    /// 1-based; `total_weeks + 1` once the program is finished
    pub current_week: u32,
    pub current_day_index: usize,
    #[serde(default)]
    pub completed_days: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_readiness: Option<ReadinessRecord>,
    /// Keyed by week-day key
    #[serde(default)]
    pub session_feedback: BTreeMap<String, SessionFeedback>,
}

impl Default for ActiveProgramState {
    fn default() -> Self {
        Self::new()
    }
}

impl ActiveProgramState {
    pub fn new() -> Self {
        Self {
            current_week: 1,
            current_day_index: 0,
            completed_days: BTreeSet::new(),
            last_readiness: None,
            session_feedback: BTreeMap::new(),
        }
    }

    /// Stable key for a program day, e.g. `"2-1"` for week 2, second day
    pub fn week_day_key(week: u32, day_index: usize) -> String {
        format!("{}-{}", week, day_index)
    }

    fn parse_week(key: &str) -> Option<u32> {
        key.split_once('-').and_then(|(week, _)| week.parse().ok())
    }

    pub fn current_key(&self) -> String {
        Self::week_day_key(self.current_week, self.current_day_index)
    }

    pub fn current_day<'p>(&self, program: &'p TrainingProgram) -> Option<&'p ProgramDay> {
        program
            .week(self.current_week)?
            .days
            .get(self.current_day_index)
    }

    pub fn is_finished(&self, program: &TrainingProgram) -> bool {
        program.days_per_week() == 0 || self.current_week > program.total_weeks
    }

    /// Mark the current day done and advance. Returns `false` (and changes
    /// nothing) when the program is already finished.
    pub fn complete_day(&mut self, program: &TrainingProgram, feedback: Option<SessionFeedback>) -> bool {
        if self.is_finished(program) {
            return false;
        }

        let key = self.current_key();
        if let Some(feedback) = feedback {
            self.session_feedback.insert(key.clone(), feedback);
        }
        self.completed_days.insert(key);

        self.current_day_index += 1;
        if self.current_day_index >= program.days_per_week() {
            self.current_day_index = 0;
            self.current_week += 1;
            debug!(week = self.current_week, "Advanced to next week");
        }
        true
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn record_readiness(&mut self, record: ReadinessRecord) {
        self.last_readiness = Some(record);
    }

    /// Feedback recorded for a week's days, in day order
    pub fn week_feedbacks(&self, week: u32) -> Vec<SessionFeedback> {
        self.session_feedback
            .iter()
            .filter(|(key, _)| Self::parse_week(key) == Some(week))
            .map(|(_, feedback)| *feedback)
            .collect()
    }
}

// ---------------------------------------------------------------------------
/// Applying proposals
// ---------------------------------------------------------------------------

/// Muscles trained on each day of a week, keyed by week-day key
pub fn day_muscle_map(program: &TrainingProgram, week: u32) -> DayMuscleMap {
    let Some(program_week) = program.week(week) else {
        return DayMuscleMap::new();
    };

    program_week
        .days
        .iter()
        .map(|day| {
            let mut muscles = Vec::new();
            for exercise in &day.exercises {
                if !muscles.contains(&exercise.target) {
                    muscles.push(exercise.target);
                }
            }
            (ActiveProgramState::week_day_key(week, day.day_index), muscles)
        })
        .collect()
}

/// Set a week's volume targets to its generated baseline plus the feedback
/// deltas (kept within [MV, MRV]) and redistribute its sets. Applying the
/// same deltas again leaves the week unchanged.
pub fn apply_volume_adjustments(
    program: &mut TrainingProgram,
    week: u32,
    adjustments: &[VolumeAdjustment],
    config: &GeneratorConfig,
) -> Result<(), ProgressionError> {
    let program_week = program
        .week_mut(week)
        .ok_or(ProgressionError::UnknownWeek(week))?;
    if program_week.is_deload {
        return Err(ProgressionError::DeloadWeek(week));
    }

    // programs stored before baselines were kept
    if program_week.original_volume_targets.is_empty() {
        program_week.original_volume_targets = program_week.volume_targets.clone();
    }

    for adjustment in adjustments {
        let Some(landmarks) = landmarks_for(adjustment.muscle) else {
            continue;
        };
        let Some(&baseline) = program_week.original_volume_targets.get(&adjustment.muscle) else {
            continue;
        };
        let Some(target) = program_week.volume_targets.get_mut(&adjustment.muscle) else {
            continue;
        };
        let adjusted = (baseline as i64 + adjustment.delta as i64).max(0) as u32;
        *target = landmarks.clamp_to_recoverable(adjusted);
    }

    distribute_sets(program_week, config);
    info!(week, adjustments = adjustments.len(), "Applied volume adjustments");
    Ok(())
}

/// Turn a week into a deload: targets drop to MV and every exercise goes to RIR 4
pub fn force_deload(
    program: &mut TrainingProgram,
    week: u32,
    config: &GeneratorConfig,
) -> Result<(), ProgressionError> {
    let program_week = program
        .week_mut(week)
        .ok_or(ProgressionError::UnknownWeek(week))?;

    program_week.is_deload = true;
    program_week.target_rir = DELOAD_RIR;
    for (muscle, target) in program_week.volume_targets.iter_mut() {
        if let Some(landmarks) = landmarks_for(*muscle) {
            *target = landmarks.mv;
        }
    }
    for exercise in program_week.days.iter_mut().flat_map(|d| d.exercises.iter_mut()) {
        exercise.target_rir = DELOAD_RIR;
    }

    distribute_sets(program_week, config);
    info!(week, "Forced deload week");
    Ok(())
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
