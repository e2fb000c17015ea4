//! Week-level volume proposals from post-session feedback
//!
//! Feedback is averaged across the week's sessions and the resulting
//! verdict is applied to every muscle trained that week.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::{Muscle, SessionFeedback};

/// Day key -> muscles trained on that day
pub type DayMuscleMap = BTreeMap<String, Vec<Muscle>>;

/// Largest change to a muscle's weekly target in one step
pub const MAX_WEEKLY_DELTA: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentReason {
    OverReached,
    HighFatigue,
    UnderStimulated,
}

impl AdjustmentReason {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::OverReached => "High soreness with poor performance",
            Self::HighFatigue => "High soreness with flat performance",
            Self::UnderStimulated => "Low pump and soreness with strong performance",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeAdjustment {
    pub muscle: Muscle,
    /// Change in weekly sets, never zero, within +/-2
    pub delta: i32,
    pub reason: AdjustmentReason,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekFeedbackSummary {
    pub sessions: usize,
    pub avg_pump: f64,
    pub avg_soreness: f64,
    pub avg_performance: f64,
    pub joint_pain_sessions: usize,
}

fn mean(feedback: &[SessionFeedback], score: impl Fn(&SessionFeedback) -> u8) -> f64 {
    feedback.iter().map(|s| score(s) as f64).sum::<f64>() / feedback.len() as f64
}

pub fn summarize_week(feedback: &[SessionFeedback]) -> Option<WeekFeedbackSummary> {
    if feedback.is_empty() {
        return None;
    }

    Some(WeekFeedbackSummary {
        sessions: feedback.len(),
        avg_pump: mean(feedback, |s| s.pump),
        avg_soreness: mean(feedback, |s| s.soreness),
        avg_performance: mean(feedback, |s| s.performance),
        joint_pain_sessions: feedback.iter().filter(|s| s.joint_pain).count(),
    })
}

/// First matching rule wins
fn verdict(summary: &WeekFeedbackSummary) -> Option<(i32, AdjustmentReason)> {
    let WeekFeedbackSummary {
        avg_pump: pump,
        avg_soreness: soreness,
        avg_performance: performance,
        ..
    } = *summary;

    if soreness >= 2.5 && performance <= 1.5 {
        Some((-2, AdjustmentReason::OverReached))
    } else if soreness >= 2.5 && performance <= 2.0 {
        Some((-1, AdjustmentReason::HighFatigue))
    } else if pump <= 1.5 && soreness <= 1.5 && performance >= 2.5 {
        Some((1, AdjustmentReason::UnderStimulated))
    } else {
        None
    }
}

/// Proposed weekly set changes for every muscle in `day_muscles`, in
/// muscle order. Muscles with no change are omitted.
pub fn compute_feedback_adjustments(
    feedback: &[SessionFeedback],
    day_muscles: &DayMuscleMap,
) -> Vec<VolumeAdjustment> {
    let Some(summary) = summarize_week(feedback) else {
        return Vec::new();
    };
    let Some((delta, reason)) = verdict(&summary) else {
        return Vec::new();
    };
    let delta = delta.clamp(-MAX_WEEKLY_DELTA, MAX_WEEKLY_DELTA);

    let muscles: BTreeSet<Muscle> = day_muscles.values().flatten().copied().collect();
    let adjustments: Vec<VolumeAdjustment> = muscles
        .into_iter()
        .map(|muscle| VolumeAdjustment {
            muscle,
            delta,
            reason,
        })
        .collect();

    info!(
        sessions = summary.sessions,
        delta,
        reason = ?reason,
        muscles = adjustments.len(),
        "Feedback adjustments proposed"
    );
    adjustments
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
