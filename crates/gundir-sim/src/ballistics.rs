//! Ballistic integrator.
//!
//! Advances a projectile state under gravity, quadratic drag, and the
//! Coriolis force from Earth's rotation. Integration is semi-implicit
//! Euler (velocity first, then position with the updated velocity),
//! which keeps long trajectories stable at the fixed timesteps used
//! here. The integrator knows nothing about targets or collisions;
//! both live rounds and the solver's forward simulation reuse it.

use glam::DVec3;

use gundir_core::config::BallisticsParams;
use gundir_core::types::AimAngles;

/// Physical state of a projectile in the East/North/Up frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileState {
    pub position: DVec3,
    pub velocity: DVec3,
}

impl ProjectileState {
    /// State at the muzzle for a shot from `origin` along `aim`.
    pub fn at_launch(origin: DVec3, aim: &AimAngles, muzzle_velocity: f64) -> Self {
        Self {
            position: origin,
            velocity: aim.direction() * muzzle_velocity,
        }
    }
}

/// Earth angular velocity vector in the local East/North/Up frame at
/// the configured latitude.
fn earth_rotation(params: &BallisticsParams) -> DVec3 {
    let lat = params.latitude_deg.to_radians();
    DVec3::new(0.0, lat.cos(), lat.sin()) * params.earth_angular_velocity
}

/// Net acceleration on the projectile: gravity, quadratic drag opposing
/// velocity, and Coriolis.
pub fn acceleration(state: &ProjectileState, params: &BallisticsParams) -> DVec3 {
    let gravity = DVec3::new(0.0, 0.0, -params.gravity);

    let speed = state.velocity.length();
    let drag = if speed > 0.0 {
        let magnitude = 0.5
            * params.air_density
            * params.drag_coefficient
            * params.cross_section_area
            * speed
            * speed
            / params.projectile_mass;
        -state.velocity * (magnitude / speed)
    } else {
        DVec3::ZERO
    };

    let coriolis = -2.0 * earth_rotation(params).cross(state.velocity);

    gravity + drag + coriolis
}

/// Advance one fixed timestep: v' = v + a*dt, x' = x + v'*dt.
pub fn step(state: &ProjectileState, params: &BallisticsParams, dt: f64) -> ProjectileState {
    let velocity = state.velocity + acceleration(state, params) * dt;
    ProjectileState {
        position: state.position + velocity * dt,
        velocity,
    }
}

/// Outcome of a bounded forward simulation.
#[derive(Debug, Clone, Copy)]
pub struct FlightResult {
    pub state: ProjectileState,
    /// Simulated time actually flown (s).
    pub elapsed: f64,
    /// Whether the projectile reached ground level before `max_time`.
    pub grounded: bool,
}

/// Step the state until `max_time` elapses or the projectile descends
/// to ground level (z <= 0). Always bounded.
pub fn simulate(
    start: ProjectileState,
    params: &BallisticsParams,
    dt: f64,
    max_time: f64,
) -> FlightResult {
    let mut state = start;
    let mut elapsed = 0.0;

    while elapsed < max_time {
        state = step(&state, params, dt);
        elapsed += dt;
        if state.position.z <= 0.0 {
            return FlightResult {
                state,
                elapsed,
                grounded: true,
            };
        }
    }

    FlightResult {
        state,
        elapsed,
        grounded: false,
    }
}
