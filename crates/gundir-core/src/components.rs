//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Fire-control logic lives in the engine and its systems, not here.

use serde::{Deserialize, Serialize};

use crate::enums::TargetCategory;
use crate::types::AimAngles;

/// Marks an entity as a candidate target for the radar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Target;

/// Marks a target as destroyed by a projectile hit. The tracker skips
/// destroyed targets; the owning world layer decides when to despawn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Destroyed;

/// Radar echo strength of a target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RadarEcho {
    /// Radar cross-section in square meters. Smaller = harder to detect.
    pub rcs_m2: f64,
}

/// Target motion category, kept alongside the echo for the simplified
/// signal heuristic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Category(pub TargetCategory);

/// Marks an entity as the gun/radar platform.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Platform;

/// Radar pointing and interference state, attached to the platform.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RadarState {
    /// Antenna boresight direction.
    pub boresight: AimAngles,
    /// Jamming/noise scalar multiplying the thermal noise floor.
    /// 1.0 = no jamming.
    pub jamming: f64,
}

impl Default for RadarState {
    fn default() -> Self {
        Self {
            boresight: AimAngles::default(),
            jamming: 1.0,
        }
    }
}

/// A live projectile in flight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    /// Round id assigned at launch, creation-ordered.
    pub round_id: u32,
    /// Simulation time at launch (s).
    pub launched_at: f64,
}
