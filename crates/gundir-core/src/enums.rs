//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Target category, ordered by how strongly the radar sees its motion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetCategory {
    /// Stationary object (balloon, structure). Weakest Doppler return.
    Static,
    /// Slow mover (helicopter, drone).
    #[default]
    Slow,
    /// Fast mover (jet, cruise missile). Strongest Doppler return.
    Fast,
}

impl TargetCategory {
    /// Nominal radar cross-section in square meters.
    pub fn rcs_m2(&self) -> f64 {
        match self {
            TargetCategory::Static => 0.8,
            TargetCategory::Slow => 2.5,
            TargetCategory::Fast => 5.0,
        }
    }

    /// Doppler detectability factor for the simplified signal heuristic.
    /// Static < Slow < Fast.
    pub fn doppler_factor(&self) -> f64 {
        match self {
            TargetCategory::Static => 0.5,
            TargetCategory::Slow => 0.75,
            TargetCategory::Fast => 1.0,
        }
    }
}

/// Lock-on slot phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockPhase {
    /// No target selected.
    #[default]
    NoTarget,
    /// Tracking a target, lock strength ramping up.
    Tracking,
    /// Full weapon lock achieved.
    LockedOn,
}

/// Which signal-strength model the tracker runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalModel {
    /// Full radar-equation physics: SNR margin over the detection
    /// threshold, normalized to [0, 1].
    #[default]
    RadarEquation,
    /// Simplified heuristic: distance falloff x category Doppler factor
    /// x speed boost.
    Heuristic,
}
