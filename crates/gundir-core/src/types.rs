//! Fundamental geometric and simulation types.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// 3D position in simulation space (meters, Cartesian).
/// x = East, y = North, z = Up (altitude).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// 3D velocity in simulation space (m/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Simulation time tracking. Advanced only by explicit delta-time —
/// the engine never reads a wall clock.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Range to another position in meters (3D distance).
    pub fn range_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Horizontal range (ignoring altitude).
    pub fn horizontal_range_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Bearing to another position in degrees, [0, 360)
    /// (0 = North, clockwise toward East).
    pub fn bearing_deg_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx.atan2(dy).rem_euclid(std::f64::consts::TAU).to_degrees()
    }

    /// Elevation angle to another position in degrees, signed.
    /// Positive when the other position is above this one.
    pub fn elevation_deg_to(&self, other: &Position) -> f64 {
        let horiz = self.horizontal_range_to(other);
        let dz = other.z - self.z;
        dz.atan2(horiz).to_degrees()
    }

    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }
}

impl From<DVec3> for Position {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Speed magnitude (m/s).
    pub fn speed(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Horizontal speed (ignoring vertical component).
    pub fn horizontal_speed(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }
}

impl From<DVec3> for Velocity {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// A pointing direction as azimuth/elevation angles in degrees.
/// Azimuth follows the bearing convention (0 = North, clockwise);
/// elevation is signed, positive above the horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AimAngles {
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
}

impl AimAngles {
    pub fn new(azimuth_deg: f64, elevation_deg: f64) -> Self {
        Self {
            azimuth_deg: azimuth_deg.rem_euclid(360.0),
            elevation_deg: elevation_deg.clamp(-90.0, 90.0),
        }
    }

    /// Unit direction vector in the East/North/Up frame.
    pub fn direction(&self) -> DVec3 {
        let az = self.azimuth_deg.to_radians();
        let el = self.elevation_deg.to_radians();
        DVec3::new(az.sin() * el.cos(), az.cos() * el.cos(), el.sin())
    }

    /// Angle between this direction and another position as seen from
    /// `origin`, in degrees. Used as the off-boresight angle for the
    /// antenna gain pattern. Zero range yields zero angle.
    pub fn angle_off_deg(&self, origin: &Position, target: &Position) -> f64 {
        let los = target.to_dvec3() - origin.to_dvec3();
        let range = los.length();
        if range <= f64::EPSILON {
            return 0.0;
        }
        let cos = (self.direction().dot(los) / range).clamp(-1.0, 1.0);
        cos.acos().to_degrees()
    }
}
