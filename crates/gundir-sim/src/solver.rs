//! Lead-angle solver.
//!
//! Searches for the gun azimuth/elevation that lands a projectile on a
//! moving target's predicted future position, using the ballistic
//! integrator as the forward model. The search is a bounded fixed-point
//! iteration: forward-simulate the candidate trajectory, measure the
//! miss against the linearly extrapolated target, correct each angle
//! with a damped forward-difference Newton step, and refresh the
//! flight-time estimate from the simulated average speed. The iteration
//! cap is a hard contract; exhaustion returns the best solution found
//! with `converged = false`. No randomness anywhere.

use glam::DVec3;
use tracing::debug;

use gundir_core::config::{BallisticsParams, SolverConfig};
use gundir_core::constants::{
    DEFAULT_MAX_FLIGHT_TIME, SOLVER_FALLBACK_MAX_ELEVATION, SOLVER_FALLBACK_MIN_ELEVATION,
};
use gundir_core::state::LeadSolution;
use gundir_core::types::{AimAngles, Position, Velocity};

use crate::ballistics::{self, ProjectileState};

/// Solve for the firing angles that intercept a target at
/// `target_pos` moving with `target_vel`, firing from `gun_pos`.
pub fn solve(
    gun_pos: &Position,
    target_pos: &Position,
    target_vel: &Velocity,
    ballistics: &BallisticsParams,
    cfg: &SolverConfig,
) -> LeadSolution {
    let gun = gun_pos.to_dvec3();
    let target = target_pos.to_dvec3();
    let vel = target_vel.to_dvec3();

    let mut azimuth_deg = gun_pos.bearing_deg_to(target_pos);
    let mut elevation_deg = initial_elevation(gun_pos, target_pos, ballistics);

    let horizontal = gun_pos.horizontal_range_to(target_pos);
    let mut flight_time = estimate_flight_time(
        horizontal,
        elevation_deg,
        ballistics.muzzle_velocity,
    );

    let mut best = LeadSolution {
        azimuth_deg,
        elevation_deg,
        flight_time,
        predicted_target: *target_pos,
        predicted_impact: *gun_pos,
        error_m: f64::INFINITY,
        converged: false,
        iterations: 0,
    };

    for iteration in 1..=cfg.max_iterations {
        // Linear extrapolation of the target over the flight time.
        let predicted = target + vel * flight_time;

        let flight = fly(gun, azimuth_deg, elevation_deg, ballistics, cfg, flight_time);
        let impact = flight.state.position;
        let error_vec = predicted - impact;
        let error_m = error_vec.length();

        if error_m < best.error_m {
            // Keep the flight-time the prediction was made with, so
            // predicted_target == target + velocity * flight_time holds
            // exactly; a grounded trajectory reports the shorter time
            // actually flown.
            let reported_time = if flight.grounded {
                flight.elapsed
            } else {
                flight_time
            };
            best = LeadSolution {
                azimuth_deg: azimuth_deg.rem_euclid(360.0),
                elevation_deg: elevation_deg.clamp(-90.0, 90.0),
                flight_time: reported_time,
                predicted_target: Position::from(predicted),
                predicted_impact: Position::from(impact),
                error_m,
                converged: false,
                iterations: iteration,
            };
        }

        if error_m <= cfg.tolerance {
            best.converged = true;
            best.iterations = iteration;
            return best;
        }

        // Forward-difference Jacobian of the impact point with respect
        // to each angle, then a damped per-axis Newton correction.
        let step = cfg.jacobian_step_deg;
        let impact_daz = fly(
            gun,
            azimuth_deg + step,
            elevation_deg,
            ballistics,
            cfg,
            flight_time,
        )
        .state
        .position;
        let impact_del = fly(
            gun,
            azimuth_deg,
            elevation_deg + step,
            ballistics,
            cfg,
            flight_time,
        )
        .state
        .position;

        let d_az = (impact_daz - impact) / step;
        let d_el = (impact_del - impact) / step;

        azimuth_deg += cfg.damping * newton_delta(error_vec, d_az);
        elevation_deg = (elevation_deg + cfg.damping * newton_delta(error_vec, d_el))
            .clamp(-89.0, 89.0);

        // Refresh the flight-time estimate from the measured average
        // horizontal speed of the simulated trajectory.
        let flown = (impact - gun).truncate().length();
        let horiz_to_target = (predicted - gun).truncate().length();
        if flown > 1.0 && flight.elapsed > 0.0 {
            let avg_speed = flown / flight.elapsed;
            flight_time = (horiz_to_target / avg_speed).clamp(cfg.timestep, DEFAULT_MAX_FLIGHT_TIME);
        }
    }

    debug!(error_m = best.error_m, "solver exhausted iteration budget");
    best.iterations = cfg.max_iterations;
    best
}

/// Per-axis Newton step: the angle change (degrees) that moves the
/// impact point toward the target along this axis' response direction.
fn newton_delta(error_vec: DVec3, d_impact: DVec3) -> f64 {
    let response = d_impact.length_squared();
    if response < 1e-9 {
        return 0.0;
    }
    error_vec.dot(d_impact) / response
}

/// Closed-form no-drag elevation guess: line-of-sight elevation plus
/// the flat-ground ballistic correction sin(2a) = g*d/v0^2. A negative
/// discriminant (target unreachable under idealized physics) falls back
/// to a clamped heuristic angle.
fn initial_elevation(gun_pos: &Position, target_pos: &Position, params: &BallisticsParams) -> f64 {
    let horizontal = gun_pos.horizontal_range_to(target_pos);
    let los = gun_pos.elevation_deg_to(target_pos);

    let discriminant = params.gravity * horizontal
        / (params.muzzle_velocity * params.muzzle_velocity);
    if discriminant > 1.0 {
        return (los + SOLVER_FALLBACK_MAX_ELEVATION)
            .clamp(SOLVER_FALLBACK_MIN_ELEVATION, SOLVER_FALLBACK_MAX_ELEVATION);
    }

    let ballistic = 0.5 * discriminant.asin().to_degrees();
    (los + ballistic).clamp(-89.0, 89.0)
}

/// Initial flight-time estimate: horizontal distance over the
/// horizontal component of muzzle velocity.
fn estimate_flight_time(horizontal: f64, elevation_deg: f64, muzzle_velocity: f64) -> f64 {
    let cos_el = elevation_deg.to_radians().cos().max(0.05);
    (horizontal / (muzzle_velocity * cos_el)).clamp(0.01, DEFAULT_MAX_FLIGHT_TIME)
}

/// Forward-simulate one candidate trajectory for up to `flight_time`.
fn fly(
    gun: DVec3,
    azimuth_deg: f64,
    elevation_deg: f64,
    params: &BallisticsParams,
    cfg: &SolverConfig,
    flight_time: f64,
) -> ballistics::FlightResult {
    let aim = AimAngles::new(azimuth_deg, elevation_deg);
    let start = ProjectileState::at_launch(gun, &aim, params.muzzle_velocity);
    ballistics::simulate(start, params, cfg.timestep, flight_time)
}
