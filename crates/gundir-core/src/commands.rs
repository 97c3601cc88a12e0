//! Operator commands sent to the fire-control engine.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All operator actions the engine accepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FcCommand {
    /// Slew the radar boresight.
    PointRadar {
        azimuth_deg: f64,
        elevation_deg: f64,
    },
    /// Begin tracking the given track. Fails (state unchanged) if the
    /// track does not exist or lies outside the lock distance band.
    StartTracking { track_number: u32 },
    /// Begin tracking whichever track currently scores best.
    TrackBestTarget,
    /// Promote the current track to a full lock immediately.
    CommandLock,
    /// Release the lock but keep tracking if the track is still valid.
    ReleaseLock,
    /// Drop the lock slot back to no-target.
    Reset,
    /// Fire one round along the current solution (or boresight when
    /// no solution is available).
    Fire,
    /// Set the jamming/noise scalar applied to the radar noise floor.
    SetJamming { factor: f64 },
}
