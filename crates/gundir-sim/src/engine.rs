//! Fire-control engine — the core of the simulation.
//!
//! `FireControlEngine` owns the hecs world (targets, projectiles, and
//! the gun platform), processes operator commands, runs the radar scan,
//! track store, lock slot, solver, and projectile flight each tick, and
//! produces `FcSnapshot`s. Completely headless and single-threaded;
//! every tick takes an explicit delta-time, so identical command and
//! dt sequences replay identically.

use std::collections::VecDeque;

use hecs::{Entity, World};
use tracing::{debug, info};

use gundir_core::commands::FcCommand;
use gundir_core::components::{
    Category, Destroyed, Platform, Projectile, RadarEcho, RadarState, Target,
};
use gundir_core::config::{ConfigError, FireControlConfig};
use gundir_core::constants::{DEFAULT_LETHAL_RADIUS, DEFAULT_MAX_FLIGHT_TIME};
use gundir_core::enums::{LockPhase, TargetCategory};
use gundir_core::events::FcEvent;
use gundir_core::state::{FcSnapshot, LeadSolution};
use gundir_core::types::{AimAngles, Position, SimTime, Velocity};

use crate::ballistics::{self, ProjectileState};
use crate::radar::RadarModel;
use crate::snapshot;
use crate::solver;
use crate::tracker::{LockSlot, TrackStore};

/// The fire-control engine. Owns the world and all mutable state.
pub struct FireControlEngine {
    world: World,
    time: SimTime,
    config: FireControlConfig,
    radar: RadarModel,
    store: TrackStore,
    lock: LockSlot,
    solution: Option<LeadSolution>,
    command_queue: VecDeque<FcCommand>,
    events: Vec<FcEvent>,
    despawn_buffer: Vec<Entity>,
    next_round_id: u32,
    platform: Entity,
}

impl FireControlEngine {
    /// Build an engine from a validated configuration. The gun/radar
    /// platform is spawned at the origin.
    pub fn new(config: FireControlConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut world = World::new();
        let platform = world.spawn((Platform, Position::default(), RadarState::default()));

        Ok(Self {
            radar: RadarModel::new(config.radar),
            world,
            time: SimTime::default(),
            config,
            store: TrackStore::new(),
            lock: LockSlot::default(),
            solution: None,
            command_queue: VecDeque::new(),
            events: Vec::new(),
            despawn_buffer: Vec::new(),
            next_round_id: 0,
            platform,
        })
    }

    /// Queue an operator command for the next tick boundary.
    pub fn queue_command(&mut self, command: FcCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = FcCommand>) {
        self.command_queue.extend(commands);
    }

    /// Spawn a target into the owned world. The world layer remains
    /// responsible for target motion policy; the engine only
    /// integrates `position += velocity * dt` each tick.
    pub fn spawn_target(
        &mut self,
        position: Position,
        velocity: Velocity,
        category: TargetCategory,
    ) -> Entity {
        self.world.spawn((
            Target,
            position,
            velocity,
            RadarEcho {
                rcs_m2: category.rcs_m2(),
            },
            Category(category),
        ))
    }

    /// Advance the simulation by `dt` seconds and return the snapshot.
    pub fn tick(&mut self, dt: f64) -> FcSnapshot {
        self.process_commands();
        self.time.advance(dt);
        let now = self.time.elapsed_secs;

        self.move_targets(dt);
        self.scan(now);
        self.lock
            .update(&self.world, &self.store, now, &self.config.tracker, &mut self.events);
        self.refresh_solution();
        self.fly_projectiles(dt, now);
        self.evaluate_impacts();
        self.cleanup();

        let events = std::mem::take(&mut self.events);
        snapshot::build_snapshot(
            &self.world,
            &self.time,
            &self.config,
            &self.store,
            &self.lock,
            self.best_target_number(),
            self.solution,
            self.radar_state().boresight,
            events,
        )
    }

    /// Current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// The engine's configuration (immutable for its lifetime).
    pub fn config(&self) -> &FireControlConfig {
        &self.config
    }

    /// Read-only access to the world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access for the owning world layer (spawning, scripted
    /// target motion, despawning destroyed wrecks).
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Current lock slot state.
    pub fn lock(&self) -> &LockSlot {
        &self.lock
    }

    /// Current track store.
    pub fn store(&self) -> &TrackStore {
        &self.store
    }

    /// Most recent lead solution, if locked.
    pub fn solution(&self) -> Option<&LeadSolution> {
        self.solution.as_ref()
    }

    fn platform_position(&self) -> Position {
        self.world
            .get::<&Position>(self.platform)
            .map(|p| *p)
            .unwrap_or_default()
    }

    fn radar_state(&self) -> RadarState {
        self.world
            .get::<&RadarState>(self.platform)
            .map(|r| *r)
            .unwrap_or_default()
    }

    fn best_target_number(&self) -> Option<u32> {
        self.store
            .best_target(&self.config.tracker)
            .map(|t| t.track_number)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: FcCommand) {
        let now = self.time.elapsed_secs;
        match command {
            FcCommand::PointRadar {
                azimuth_deg,
                elevation_deg,
            } => {
                if let Ok(mut radar) = self.world.get::<&mut RadarState>(self.platform) {
                    radar.boresight = AimAngles::new(azimuth_deg, elevation_deg);
                }
            }
            FcCommand::StartTracking { track_number } => {
                let accepted =
                    self.lock
                        .start_tracking(&self.store, track_number, now, &self.config.tracker);
                if !accepted {
                    debug!(track = track_number, "start tracking denied");
                }
            }
            FcCommand::TrackBestTarget => {
                if let Some(best) = self.store.best_target(&self.config.tracker) {
                    let track_number = best.track_number;
                    self.lock
                        .start_tracking(&self.store, track_number, now, &self.config.tracker);
                }
            }
            FcCommand::CommandLock => {
                let accepted = self.lock.command_lock(&self.store, &mut self.events);
                if !accepted {
                    debug!("lock command denied, nothing tracked");
                }
            }
            FcCommand::ReleaseLock => {
                self.lock.release(&self.store, &mut self.events);
                self.solution = None;
            }
            FcCommand::Reset => {
                self.lock.reset();
                self.solution = None;
            }
            FcCommand::Fire => self.fire(now),
            FcCommand::SetJamming { factor } => {
                if let Ok(mut radar) = self.world.get::<&mut RadarState>(self.platform) {
                    radar.jamming = factor.max(1.0);
                }
            }
        }
    }

    /// Fire one round along the current solution, falling back to the
    /// boresight when no solution is available.
    fn fire(&mut self, now: f64) {
        let aim = self
            .solution
            .map(|s| AimAngles::new(s.azimuth_deg, s.elevation_deg))
            .unwrap_or(self.radar_state().boresight);

        let start = ProjectileState::at_launch(
            self.platform_position().to_dvec3(),
            &aim,
            self.config.ballistics.muzzle_velocity,
        );

        let round_id = self.next_round_id;
        self.next_round_id += 1;

        self.world.spawn((
            Projectile {
                round_id,
                launched_at: now,
            },
            Position::from(start.position),
            Velocity::from(start.velocity),
        ));

        info!(round = round_id, azimuth = aim.azimuth_deg, elevation = aim.elevation_deg, "round fired");
        self.events.push(FcEvent::ShotFired {
            round_id,
            azimuth_deg: aim.azimuth_deg,
            elevation_deg: aim.elevation_deg,
        });
    }

    /// Integrate target motion: position += velocity * dt.
    fn move_targets(&mut self, dt: f64) {
        for (_entity, (pos, vel, _target)) in
            self.world.query_mut::<(&mut Position, &Velocity, &Target)>()
        {
            pos.x += vel.x * dt;
            pos.y += vel.y * dt;
            pos.z += vel.z * dt;
        }
    }

    /// Run the radar scan and refresh the track store.
    fn scan(&mut self, now: f64) {
        let radar_pos = self.platform_position();
        let state = self.radar_state();
        self.store.update(
            &self.world,
            &self.radar,
            &radar_pos,
            &state.boresight,
            state.jamming,
            now,
            &self.config.tracker,
            &mut self.events,
        );
    }

    /// Recompute the lead solution while locked on.
    fn refresh_solution(&mut self) {
        if self.lock.phase != LockPhase::LockedOn {
            self.solution = None;
            return;
        }
        let Some(track) = self.lock.target.and_then(|t| self.store.get(t)) else {
            self.solution = None;
            return;
        };

        let Some(sample) = track.history.back() else {
            self.solution = None;
            return;
        };
        let velocity = track.velocity_estimate(self.config.tracker.sample_interval);

        let fresh = solver::solve(
            &self.platform_position(),
            &sample.position,
            &velocity,
            &self.config.ballistics,
            &self.config.solver,
        );

        // Report exhaustion once per losing streak, not every tick.
        let was_converged = self.solution.map(|s| s.converged).unwrap_or(true);
        if !fresh.converged && was_converged {
            self.events.push(FcEvent::SolutionExhausted {
                error_m: fresh.error_m,
            });
        }
        self.solution = Some(fresh);
    }

    /// Advance live rounds under full ballistics; expire grounded or
    /// overdue rounds.
    fn fly_projectiles(&mut self, dt: f64, now: f64) {
        for (entity, (projectile, pos, vel)) in
            self.world
                .query_mut::<(&Projectile, &mut Position, &mut Velocity)>()
        {
            let state = ProjectileState {
                position: pos.to_dvec3(),
                velocity: vel.to_dvec3(),
            };
            let next = ballistics::step(&state, &self.config.ballistics, dt);
            *pos = Position::from(next.position);
            *vel = Velocity::from(next.velocity);

            let age = now - projectile.launched_at;
            if pos.z <= 0.0 || age > DEFAULT_MAX_FLIGHT_TIME {
                self.events.push(FcEvent::RoundExpended {
                    round_id: projectile.round_id,
                });
                self.despawn_buffer.push(entity);
            }
        }
    }

    /// Proximity check: a round passing within the lethal radius of a
    /// live target destroys it.
    fn evaluate_impacts(&mut self) {
        let rounds: Vec<(Entity, u32, Position)> = self
            .world
            .query::<(&Projectile, &Position)>()
            .iter()
            .map(|(e, (p, pos))| (e, p.round_id, *pos))
            .collect();
        if rounds.is_empty() {
            return;
        }

        let mut hits: Vec<(Entity, Entity, u32)> = Vec::new();
        for (target, (_t, pos)) in self.world.query::<(&Target, &Position)>().iter() {
            if self.world.satisfies::<&Destroyed>(target).unwrap_or(false) {
                continue;
            }
            for (round_entity, round_id, round_pos) in &rounds {
                if self.despawn_buffer.contains(round_entity) {
                    continue;
                }
                if round_pos.range_to(pos) <= DEFAULT_LETHAL_RADIUS {
                    hits.push((target, *round_entity, *round_id));
                    break;
                }
            }
        }

        for (target, round_entity, round_id) in hits {
            let track_number = self.store.get(target).map(|t| t.track_number);
            info!(round = round_id, ?track_number, "target destroyed");
            let _ = self.world.insert_one(target, Destroyed);
            self.despawn_buffer.push(round_entity);
            self.events.push(FcEvent::TargetDestroyed {
                round_id,
                track_number,
            });
        }
    }

    /// Despawn everything queued for removal this tick.
    fn cleanup(&mut self) {
        for entity in self.despawn_buffer.drain(..) {
            let _ = self.world.despawn(entity);
        }
    }
}
