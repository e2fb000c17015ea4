//! Deload detection from completed-session history
//!
//! Weeks are rolling 7-day windows anchored at `now`: offset 0 covers
//! `(now - 7d, now]`, offset -1 the seven days before that, and so on.
//! Only closed sessions and effective sets count. History order does not
//! matter.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::ExerciseCatalog;
use crate::landmarks::{get_volume_zone, landmarks_for, VolumeLandmarks, VolumeZone};
use crate::models::{Muscle, WorkoutSession};

/// How many weeks back (including the current one) a streak may reach
pub const LOOKBACK_WEEKS: u32 = 4;
/// Consecutive weeks above MRV before a muscle is flagged
pub const WARNING_STREAK: u32 = 3;
pub const URGENT_STREAK: u32 = 4;

// ---------------------------------------------------------------------------
/// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeloadSeverity {
    None,
    Warning,
    Urgent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlaggedMuscle {
    pub muscle: Muscle,
    /// Unbroken weeks above MRV ending at the current week
    pub consecutive_weeks: u32,
    pub current_sets: u32,
    pub mrv: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeloadStatus {
    pub severity: DeloadSeverity,
    /// Sorted by descending streak
    pub flagged_muscles: Vec<FlaggedMuscle>,
    pub message: Option<String>,
}

impl DeloadStatus {
    pub fn needs_deload(&self) -> bool {
        self.severity != DeloadSeverity::None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MrvOverflow {
    pub muscle: Muscle,
    pub sets: u32,
    pub mrv: u32,
    pub overflow: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuscleVolume {
    pub muscle: Muscle,
    pub sets: u32,
    pub zone: VolumeZone,
    pub landmarks: VolumeLandmarks,
}

// ---------------------------------------------------------------------------
/// Weekly volume
// ---------------------------------------------------------------------------

/// `(start, end]` of the week at `week_offset`. `None` for future weeks
/// and offsets outside the representable date range.
pub fn week_window(now: DateTime<Utc>, week_offset: i32) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    if week_offset > 0 {
        return None;
    }
    let back = Duration::try_days(7 * i64::from(week_offset.unsigned_abs()))?;
    let end = now.checked_sub_signed(back)?;
    let start = end.checked_sub_signed(Duration::days(7))?;
    Some((start, end))
}

/// Effective sets per muscle for the week at `week_offset` (0 = current,
/// -1 = previous). Future or out-of-range offsets yield nothing.
pub fn weekly_effective_sets(
    history: &[WorkoutSession],
    catalog: &ExerciseCatalog,
    now: DateTime<Utc>,
    week_offset: i32,
) -> BTreeMap<Muscle, u32> {
    let mut totals = BTreeMap::new();
    let Some((start, end)) = week_window(now, week_offset) else {
        return totals;
    };

    for session in history
        .iter()
        .filter(|s| s.is_closed() && s.started_at > start && s.started_at <= end)
    {
        for exercise in &session.completed_exercises {
            let Some(muscle) = catalog.target_of(&exercise.exercise_id) else {
                debug!(exercise_id = %exercise.exercise_id, "Logged exercise not in catalog");
                continue;
            };
            let sets = exercise.effective_sets();
            if sets > 0 {
                *totals.entry(muscle).or_insert(0) += sets;
            }
        }
    }

    totals
}

/// Current-week sets, zone and landmarks for every muscle with landmarks
pub fn volume_report(
    history: &[WorkoutSession],
    catalog: &ExerciseCatalog,
    now: DateTime<Utc>,
    week_offset: i32,
) -> Vec<MuscleVolume> {
    let totals = weekly_effective_sets(history, catalog, now, week_offset);
    Muscle::ALL
        .into_iter()
        .filter_map(|muscle| {
            let landmarks = landmarks_for(muscle)?;
            let sets = totals.get(&muscle).copied().unwrap_or(0);
            Some(MuscleVolume {
                muscle,
                sets,
                zone: get_volume_zone(sets, &landmarks),
                landmarks,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
/// Detection
// ---------------------------------------------------------------------------

fn streak_above_mrv(weeks: &[BTreeMap<Muscle, u32>], muscle: Muscle, landmarks: &VolumeLandmarks) -> u32 {
    weeks
        .iter()
        .map(|week| week.get(&muscle).copied().unwrap_or(0))
        .take_while(|&sets| get_volume_zone(sets, landmarks) == VolumeZone::AboveMrv)
        .count() as u32
}

/// Unbroken weeks above MRV for one muscle, counted back from the current
/// week. `None` when the muscle has no landmarks.
pub fn consecutive_weeks_above_mrv(
    history: &[WorkoutSession],
    catalog: &ExerciseCatalog,
    now: DateTime<Utc>,
    muscle: Muscle,
) -> Option<u32> {
    let landmarks = landmarks_for(muscle)?;
    let weeks = recent_weeks(history, catalog, now);
    Some(streak_above_mrv(&weeks, muscle, &landmarks))
}

fn recent_weeks(
    history: &[WorkoutSession],
    catalog: &ExerciseCatalog,
    now: DateTime<Utc>,
) -> Vec<BTreeMap<Muscle, u32>> {
    (0..LOOKBACK_WEEKS)
        .map(|weeks_ago| weekly_effective_sets(history, catalog, now, -(weeks_ago as i32)))
        .collect()
}

fn render_message(severity: DeloadSeverity, flagged: &[FlaggedMuscle]) -> Option<String> {
    let names = flagged
        .iter()
        .map(|f| format!("{} ({} weeks)", f.muscle.label(), f.consecutive_weeks))
        .collect::<Vec<_>>()
        .join(", ");
    match severity {
        DeloadSeverity::None => None,
        DeloadSeverity::Warning => Some(format!(
            "{} above maximum recoverable volume for {}+ consecutive weeks. Plan a deload week soon.",
            names, WARNING_STREAK
        )),
        DeloadSeverity::Urgent => Some(format!(
            "{} above maximum recoverable volume for {}+ consecutive weeks. Take a deload week now.",
            names, URGENT_STREAK
        )),
    }
}

/// Flag muscles that have stayed above MRV for 3+ consecutive weeks
pub fn check_deload_status(
    history: &[WorkoutSession],
    catalog: &ExerciseCatalog,
    now: DateTime<Utc>,
) -> DeloadStatus {
    let weeks = recent_weeks(history, catalog, now);

    let mut flagged: Vec<FlaggedMuscle> = Muscle::ALL
        .into_iter()
        .filter_map(|muscle| {
            let landmarks = landmarks_for(muscle)?;
            let streak = streak_above_mrv(&weeks, muscle, &landmarks);
            (streak >= WARNING_STREAK).then(|| FlaggedMuscle {
                muscle,
                consecutive_weeks: streak,
                current_sets: weeks[0].get(&muscle).copied().unwrap_or(0),
                mrv: landmarks.mrv,
            })
        })
        .collect();
    // stable: equal streaks keep canonical muscle order
    flagged.sort_by(|a, b| b.consecutive_weeks.cmp(&a.consecutive_weeks));

    let severity = match flagged.first() {
        None => DeloadSeverity::None,
        Some(worst) if worst.consecutive_weeks >= URGENT_STREAK => DeloadSeverity::Urgent,
        Some(_) => DeloadSeverity::Warning,
    };

    if severity != DeloadSeverity::None {
        warn!(
            severity = ?severity,
            muscles = flagged.len(),
            "Sustained volume above MRV detected"
        );
    }

    let message = render_message(severity, &flagged);
    DeloadStatus {
        severity,
        flagged_muscles: flagged,
        message,
    }
}

/// Muscles over MRV in a single week, largest overflow first. No streak
/// requirement.
pub fn get_muscles_above_mrv(
    history: &[WorkoutSession],
    catalog: &ExerciseCatalog,
    now: DateTime<Utc>,
    week_offset: i32,
) -> Vec<MrvOverflow> {
    let totals = weekly_effective_sets(history, catalog, now, week_offset);
    let mut over: Vec<MrvOverflow> = totals
        .into_iter()
        .filter_map(|(muscle, sets)| {
            let landmarks = landmarks_for(muscle)?;
            let overflow = landmarks.overflow(sets);
            (overflow > 0).then_some(MrvOverflow {
                muscle,
                sets,
                mrv: landmarks.mrv,
                overflow,
            })
        })
        .collect();
    over.sort_by(|a, b| b.overflow.cmp(&a.overflow));
    over
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
