//! Pre-session readiness scoring and per-session load adjustments
//!
//! Adjustments are a projection: the stored program is never touched, the
//! adjusted exercises are returned for display and logging.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::generator::DELOAD_RIR;
use crate::models::{ProgramExercise, ReadinessCheck};

/// Sum of all four check scores at their maximum
const MAX_CHECK_TOTAL: f64 = 12.0;

// ---------------------------------------------------------------------------
/// Score & level
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessLevel {
    Peak,
    Good,
    Moderate,
    Low,
}

impl ReadinessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Peak => "peak",
            Self::Good => "good",
            Self::Moderate => "moderate",
            Self::Low => "low",
        }
    }
}

/// 0-100 score from a 4-question check
pub fn compute_readiness_score(check: &ReadinessCheck) -> u8 {
    let total = check.sleep as f64 + check.energy as f64 + check.stress as f64 + check.soreness as f64;
    (total / MAX_CHECK_TOTAL * 100.0).round().clamp(0.0, 100.0) as u8
}

pub fn get_readiness_level(score: u8) -> ReadinessLevel {
    match score {
        86.. => ReadinessLevel::Peak,
        66..=85 => ReadinessLevel::Good,
        42..=65 => ReadinessLevel::Moderate,
        _ => ReadinessLevel::Low,
    }
}

/// A scored check as stored on the active program state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessRecord {
    pub check: ReadinessCheck,
    pub score: u8,
    pub level: ReadinessLevel,
    pub checked_at: DateTime<Utc>,
}

impl ReadinessRecord {
    pub fn new(check: ReadinessCheck, checked_at: DateTime<Utc>) -> Self {
        let score = compute_readiness_score(&check);
        Self {
            check,
            score,
            level: get_readiness_level(score),
            checked_at,
        }
    }
}

// ---------------------------------------------------------------------------
/// Adjustments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionAdjustments {
    pub volume_multiplier: f64,
    pub weight_multiplier: f64,
    pub rest_multiplier: f64,
    pub rir_delta: u8,
}

impl SessionAdjustments {
    pub const NONE: Self = Self {
        volume_multiplier: 1.0,
        weight_multiplier: 1.0,
        rest_multiplier: 1.0,
        rir_delta: 0,
    };

    pub fn is_noop(&self) -> bool {
        *self == Self::NONE
    }
}

pub fn adjustments_for(level: ReadinessLevel) -> SessionAdjustments {
    match level {
        ReadinessLevel::Peak | ReadinessLevel::Good => SessionAdjustments::NONE,
        ReadinessLevel::Moderate => SessionAdjustments {
            volume_multiplier: 0.85,
            weight_multiplier: 0.95,
            rest_multiplier: 1.2,
            rir_delta: 1,
        },
        ReadinessLevel::Low => SessionAdjustments {
            volume_multiplier: 0.70,
            weight_multiplier: 0.90,
            rest_multiplier: 1.3,
            rir_delta: 2,
        },
    }
}

pub fn compute_session_adjustments(score: u8) -> SessionAdjustments {
    adjustments_for(get_readiness_level(score))
}

fn adjust_weight(weight_kg: f64, multiplier: f64) -> f64 {
    if weight_kg == 0.0 {
        return 0.0;
    }
    // nearest 0.5 kg
    (weight_kg * multiplier * 2.0).round() / 2.0
}

/// Adjusted copies of a day's exercises. `original_*` fields pass through.
pub fn apply_adjustments_to_exercises(
    exercises: &[ProgramExercise],
    adjustments: &SessionAdjustments,
) -> Vec<ProgramExercise> {
    if adjustments.is_noop() {
        return exercises.to_vec();
    }

    debug!(
        exercises = exercises.len(),
        volume = adjustments.volume_multiplier,
        rir_delta = adjustments.rir_delta,
        "Applying readiness adjustments"
    );

    exercises
        .iter()
        .map(|exercise| ProgramExercise {
            sets: ((exercise.sets as f64 * adjustments.volume_multiplier).round() as u32).max(1),
            suggested_weight_kg: exercise
                .suggested_weight_kg
                .map(|w| adjust_weight(w, adjustments.weight_multiplier)),
            rest_seconds: (exercise.rest_seconds as f64 * adjustments.rest_multiplier).round() as u32,
            target_rir: exercise
                .target_rir
                .saturating_add(adjustments.rir_delta)
                .min(DELOAD_RIR),
            ..exercise.clone()
        })
        .collect()
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
