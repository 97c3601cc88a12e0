//! Fire-control state snapshot — the complete visible output produced
//! each tick for scope rendering, HUD, and aim-assist overlays.

use serde::{Deserialize, Serialize};

use crate::enums::{LockPhase, TargetCategory};
use crate::events::FcEvent;
use crate::types::{AimAngles, Position, SimTime, Velocity};

/// Complete engine output for one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FcSnapshot {
    pub time: SimTime,
    /// Radar boresight at snapshot time.
    pub boresight: AimAngles,
    /// All currently detected tracks, sorted by track number.
    pub tracks: Vec<TrackView>,
    /// Lock slot state.
    pub lock: LockView,
    /// Highest-scoring lockable track, if any.
    pub best_target: Option<u32>,
    /// Current lead solution while locked.
    pub solution: Option<LeadSolution>,
    /// Live projectiles, sorted by round id.
    pub projectiles: Vec<ProjectileView>,
    /// Events emitted during this tick.
    pub events: Vec<FcEvent>,
}

/// A detected track as seen on the scope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackView {
    pub track_number: u32,
    /// Range from the platform (m).
    pub range: f64,
    /// Bearing from the platform (degrees, [0, 360)).
    pub bearing_deg: f64,
    /// Elevation from the platform (degrees, signed).
    pub elevation_deg: f64,
    /// Finite-differenced velocity estimate (m/s).
    pub velocity_estimate: Velocity,
    /// Normalized signal strength [0, 1].
    pub signal_strength: f64,
    /// Simulation time of first detection (s).
    pub first_seen: f64,
    /// Simulation time of most recent detection (s).
    pub last_seen: f64,
    pub category: TargetCategory,
    /// Recent positions, newest last, bounded by the configured
    /// history length.
    pub history: Vec<Position>,
}

/// Lock slot state for the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LockView {
    pub phase: LockPhase,
    /// Track number of the tracked/locked target, if any.
    pub track_number: Option<u32>,
    /// Normalized lock progress [0, 1].
    pub strength: f64,
    /// Simulation time tracking began (s), if tracking.
    pub since: Option<f64>,
}

/// Result of one lead-angle solver invocation. Immutable; produced
/// fresh on every call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadSolution {
    /// Gun azimuth (degrees, [0, 360)).
    pub azimuth_deg: f64,
    /// Gun elevation (degrees, [-90, 90]).
    pub elevation_deg: f64,
    /// Projectile flight time to the predicted intercept (s).
    pub flight_time: f64,
    /// Predicted target position at projectile arrival.
    pub predicted_target: Position,
    /// Predicted projectile impact point.
    pub predicted_impact: Position,
    /// Final miss distance between the two predictions (m).
    pub error_m: f64,
    /// Whether the search converged within tolerance.
    pub converged: bool,
    /// Iterations actually used.
    pub iterations: u32,
}

/// A projectile in flight, for rendering and collision checks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectileView {
    pub round_id: u32,
    pub position: Position,
    pub velocity: Velocity,
    /// Seconds since launch.
    pub age: f64,
}
