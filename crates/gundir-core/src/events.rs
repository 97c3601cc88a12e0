//! Events emitted by the engine for UI and audio feedback.

use serde::{Deserialize, Serialize};

/// Per-tick feedback events, drained into each snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FcEvent {
    /// New track initiated.
    NewContact { track_number: u32, bearing_deg: f64 },
    /// Track dropped (timeout or eviction).
    ContactLost { track_number: u32 },
    /// Full weapon lock achieved.
    LockAcquired { track_number: u32 },
    /// Lock lost (target destroyed, out of band, or track pruned).
    LockBroken { track_number: u32 },
    /// Round fired.
    ShotFired {
        round_id: u32,
        azimuth_deg: f64,
        elevation_deg: f64,
    },
    /// Projectile destroyed a target. The track number is absent when
    /// the victim was not currently tracked.
    TargetDestroyed {
        round_id: u32,
        track_number: Option<u32>,
    },
    /// Projectile reached the ground or exceeded its flight time.
    RoundExpended { round_id: u32 },
    /// Solver exhausted its iteration budget without converging.
    SolutionExhausted { error_m: f64 },
}
