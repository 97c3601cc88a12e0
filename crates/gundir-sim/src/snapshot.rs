//! Snapshot builder: reads the world, store, and lock slot and
//! assembles a complete `FcSnapshot`. Never modifies anything.

use hecs::World;

use gundir_core::components::Projectile;
use gundir_core::config::FireControlConfig;
use gundir_core::events::FcEvent;
use gundir_core::state::{FcSnapshot, LeadSolution, LockView, ProjectileView, TrackView};
use gundir_core::types::{AimAngles, Position, SimTime, Velocity};

use crate::tracker::{LockSlot, TrackStore};

/// Build the complete per-tick output view.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    config: &FireControlConfig,
    store: &TrackStore,
    lock: &LockSlot,
    best_target: Option<u32>,
    solution: Option<LeadSolution>,
    boresight: AimAngles,
    events: Vec<FcEvent>,
) -> FcSnapshot {
    FcSnapshot {
        time: *time,
        boresight,
        tracks: build_tracks(store, config),
        lock: build_lock(store, lock),
        best_target,
        solution,
        projectiles: build_projectiles(world, time),
        events,
    }
}

fn build_tracks(store: &TrackStore, config: &FireControlConfig) -> Vec<TrackView> {
    store
        .iter()
        .map(|track| TrackView {
            track_number: track.track_number,
            range: track.range,
            bearing_deg: track.bearing_deg,
            elevation_deg: track.elevation_deg,
            velocity_estimate: track.velocity_estimate(config.tracker.sample_interval),
            signal_strength: track.signal_strength,
            first_seen: track.first_seen,
            last_seen: track.last_seen,
            category: track.category,
            history: track.history.iter().map(|s| s.position).collect(),
        })
        .collect()
}

fn build_lock(store: &TrackStore, lock: &LockSlot) -> LockView {
    let track_number = lock
        .target
        .and_then(|t| store.get(t))
        .map(|t| t.track_number);
    LockView {
        phase: lock.phase,
        track_number,
        strength: lock.strength,
        since: lock.target.map(|_| lock.started_at),
    }
}

fn build_projectiles(world: &World, time: &SimTime) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&Projectile, &Position, &Velocity)>()
        .iter()
        .map(|(_, (projectile, pos, vel))| ProjectileView {
            round_id: projectile.round_id,
            position: *pos,
            velocity: *vel,
            age: time.elapsed_secs - projectile.launched_at,
        })
        .collect();

    projectiles.sort_by_key(|p| p.round_id);
    projectiles
}
