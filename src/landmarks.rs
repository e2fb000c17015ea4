//! Volume landmarks: per-muscle weekly set thresholds
//!
//! MV (maintenance), MEV (minimum effective), MAV (maximum adaptive, a
//! low/high band) and MRV (maximum recoverable). Zones classify a weekly set
//! count against one muscle's landmarks.

use serde::{Deserialize, Serialize};

use crate::models::Muscle;

// ---------------------------------------------------------------------------
/// Landmarks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeLandmarks {
    pub mv: u32,
    pub mev: u32,
    pub mav_low: u32,
    pub mav_high: u32,
    pub mrv: u32,
}

impl VolumeLandmarks {
    /// Build landmarks, rejecting a non-monotone set of thresholds
    pub fn new(mv: u32, mev: u32, mav_low: u32, mav_high: u32, mrv: u32) -> Option<Self> {
        let landmarks = Self {
            mv,
            mev,
            mav_low,
            mav_high,
            mrv,
        };
        landmarks.is_valid().then_some(landmarks)
    }

    pub fn is_valid(&self) -> bool {
        self.mv <= self.mev
            && self.mev <= self.mav_low
            && self.mav_low <= self.mav_high
            && self.mav_high <= self.mrv
    }

    /// Sets above MRV (0 when at or below)
    pub fn overflow(&self, sets: u32) -> u32 {
        sets.saturating_sub(self.mrv)
    }

    pub fn clamp_to_recoverable(&self, sets: u32) -> u32 {
        sets.clamp(self.mv, self.mrv)
    }
}

const fn lm(mv: u32, mev: u32, mav_low: u32, mav_high: u32, mrv: u32) -> VolumeLandmarks {
    VolumeLandmarks {
        mv,
        mev,
        mav_low,
        mav_high,
        mrv,
    }
}

/// Static landmark table. Forearms get no landmarks: they are trained but
/// never volume-checked.
pub fn landmarks_for(muscle: Muscle) -> Option<VolumeLandmarks> {
    match muscle {
        Muscle::Chest => Some(lm(4, 8, 12, 20, 22)),
        Muscle::Lats => Some(lm(6, 10, 14, 22, 25)),
        Muscle::UpperBack => Some(lm(6, 8, 12, 20, 25)),
        Muscle::Shoulders => Some(lm(6, 8, 16, 22, 26)),
        Muscle::Biceps => Some(lm(4, 8, 14, 20, 26)),
        Muscle::Triceps => Some(lm(4, 6, 10, 14, 18)),
        Muscle::Forearms => None,
        Muscle::Quads => Some(lm(6, 8, 12, 18, 20)),
        Muscle::Hamstrings => Some(lm(3, 4, 10, 16, 20)),
        Muscle::Glutes => Some(lm(0, 0, 4, 12, 16)),
        Muscle::Calves => Some(lm(6, 8, 12, 16, 20)),
        Muscle::Abs => Some(lm(0, 0, 16, 20, 25)),
        Muscle::Traps => Some(lm(0, 0, 12, 20, 26)),
    }
}

// ---------------------------------------------------------------------------
/// Zones
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeZone {
    BelowMv,
    MvMev,
    MevMav,
    MavMrv,
    AboveMrv,
}

impl VolumeZone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BelowMv => "below_mv",
            Self::MvMev => "mv_mev",
            Self::MevMav => "mev_mav",
            Self::MavMrv => "mav_mrv",
            Self::AboveMrv => "above_mrv",
        }
    }
}

impl std::fmt::Display for VolumeZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify a weekly set count. `mev..=mav_high` is one zone: the gap
/// between `mav_low` and `mav_high` is not split.
pub fn get_volume_zone(sets: u32, landmarks: &VolumeLandmarks) -> VolumeZone {
    if sets < landmarks.mv {
        VolumeZone::BelowMv
    } else if sets < landmarks.mev {
        VolumeZone::MvMev
    } else if sets <= landmarks.mav_high {
        VolumeZone::MevMav
    } else if sets <= landmarks.mrv {
        VolumeZone::MavMrv
    } else {
        VolumeZone::AboveMrv
    }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VolumeLandmarks {
        VolumeLandmarks {
            mv: 8,
            mev: 10,
            mav_low: 12,
            mav_high: 20,
            mrv: 22,
        }
    }

    #[test]
    fn test_zone_boundaries() {
        let l = sample();
        assert_eq!(get_volume_zone(7, &l), VolumeZone::BelowMv);
        assert_eq!(get_volume_zone(8, &l), VolumeZone::MvMev);
        assert_eq!(get_volume_zone(9, &l), VolumeZone::MvMev);
        assert_eq!(get_volume_zone(10, &l), VolumeZone::MevMav);
        assert_eq!(get_volume_zone(20, &l), VolumeZone::MevMav);
        assert_eq!(get_volume_zone(21, &l), VolumeZone::MavMrv);
        assert_eq!(get_volume_zone(22, &l), VolumeZone::MavMrv);
        assert_eq!(get_volume_zone(23, &l), VolumeZone::AboveMrv);
    }

    #[test]
    fn test_zones_are_contiguous_and_ordered() {
        let l = sample();
        let zones: Vec<VolumeZone> = (0..40).map(|s| get_volume_zone(s, &l)).collect();
        let rank = |z: &VolumeZone| match z {
            VolumeZone::BelowMv => 0,
            VolumeZone::MvMev => 1,
            VolumeZone::MevMav => 2,
            VolumeZone::MavMrv => 3,
            VolumeZone::AboveMrv => 4,
        };
        for pair in zones.windows(2) {
            assert!(rank(&pair[1]) >= rank(&pair[0]));
            assert!(rank(&pair[1]) - rank(&pair[0]) <= 1);
        }
    }

    #[test]
    fn test_zero_mv_skips_below_mv() {
        let glutes = landmarks_for(Muscle::Glutes).unwrap();
        assert_eq!(get_volume_zone(0, &glutes), VolumeZone::MevMav);
    }

    #[test]
    fn test_table_is_monotone() {
        for muscle in Muscle::ALL {
            if let Some(l) = landmarks_for(muscle) {
                assert!(l.is_valid(), "{} landmarks not monotone", muscle);
            }
        }
    }

    #[test]
    fn test_forearms_have_no_landmarks() {
        assert!(landmarks_for(Muscle::Forearms).is_none());
    }

    #[test]
    fn test_new_rejects_non_monotone() {
        assert!(VolumeLandmarks::new(8, 10, 12, 20, 22).is_some());
        assert!(VolumeLandmarks::new(8, 6, 12, 20, 22).is_none());
    }

    #[test]
    fn test_overflow() {
        let l = sample();
        assert_eq!(l.overflow(22), 0);
        assert_eq!(l.overflow(25), 3);
    }
}
