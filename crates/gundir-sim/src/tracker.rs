//! Target track store and lock-on state machine.
//!
//! The store holds one `DetectedTrack` per currently detected target,
//! keyed by the target's entity id (a back-reference into the hecs
//! world — never an owning pointer). Tracks are created on the first
//! qualifying detection, refreshed every frame the target stays
//! detectable, and dropped once `lost_target_timeout` passes without a
//! re-detection. The single `LockSlot` rides on top of the store.
//!
//! All entry points take explicit simulation time; nothing here reads
//! a wall clock.

use std::collections::VecDeque;

use hecs::{Entity, World};
use tracing::{debug, info};

use gundir_core::components::{Category, Destroyed, RadarEcho, Target};
use gundir_core::config::TrackerConfig;
use gundir_core::constants::{BEST_TARGET_SPEED_REF, SIGNAL_DYNAMIC_RANGE_DB};
use gundir_core::enums::{LockPhase, SignalModel, TargetCategory};
use gundir_core::events::FcEvent;
use gundir_core::types::{AimAngles, Position, Velocity};

use crate::radar::RadarModel;

/// One recorded detection sample.
#[derive(Debug, Clone, Copy)]
pub struct TrackSample {
    pub time: f64,
    pub position: Position,
}

/// A tracked target.
#[derive(Debug, Clone)]
pub struct DetectedTrack {
    /// Back-reference into the world. Resolved against the current
    /// frame's targets on every update; never dereferenced blindly.
    pub target: Entity,
    /// Stable creation-ordered number, used for deterministic
    /// tie-breaking and operator commands.
    pub track_number: u32,
    pub range: f64,
    pub bearing_deg: f64,
    pub elevation_deg: f64,
    /// Normalized signal strength [0, 1].
    pub signal_strength: f64,
    pub first_seen: f64,
    pub last_seen: f64,
    pub category: TargetCategory,
    /// Bounded FIFO of recent samples, oldest first.
    pub history: VecDeque<TrackSample>,
}

impl DetectedTrack {
    /// Finite-difference velocity estimate from the two most recent
    /// history samples. Zero with fewer than two samples. The divisor
    /// is the actual sample spacing, falling back to the configured
    /// nominal interval when the spacing is degenerate.
    pub fn velocity_estimate(&self, nominal_interval: f64) -> Velocity {
        let n = self.history.len();
        if n < 2 {
            return Velocity::default();
        }
        let prev = &self.history[n - 2];
        let last = &self.history[n - 1];
        let mut dt = last.time - prev.time;
        if dt <= f64::EPSILON {
            dt = nominal_interval;
        }
        Velocity::new(
            (last.position.x - prev.position.x) / dt,
            (last.position.y - prev.position.y) / dt,
            (last.position.z - prev.position.z) / dt,
        )
    }

    fn push_sample(&mut self, sample: TrackSample, capacity: usize) {
        if self.history.len() >= capacity {
            self.history.pop_front();
        }
        self.history.push_back(sample);
    }
}

/// Simplified signal-strength heuristic: linear distance falloff times
/// the category's Doppler factor times a speed boost, clamped to [0, 1].
/// Closer and faster always scores at least as high as farther/slower.
pub fn signal_heuristic(
    range: f64,
    category: TargetCategory,
    speed: f64,
    max_range: f64,
) -> f64 {
    let distance_factor = (1.0 - range / max_range).max(0.0);
    let speed_boost = 0.5 + 0.5 * (speed / BEST_TARGET_SPEED_REF).min(1.0);
    (distance_factor * category.doppler_factor() * speed_boost).clamp(0.0, 1.0)
}

/// Normalize an SNR margin over the detection threshold to [0, 1].
fn signal_from_snr(snr_db: f64, threshold_db: f64) -> f64 {
    ((snr_db - threshold_db) / SIGNAL_DYNAMIC_RANGE_DB).clamp(0.0, 1.0)
}

/// The bounded track store.
#[derive(Debug, Default)]
pub struct TrackStore {
    tracks: Vec<DetectedTrack>,
    next_track_number: u32,
}

impl TrackStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Tracks in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &DetectedTrack> {
        self.tracks.iter()
    }

    pub fn get(&self, target: Entity) -> Option<&DetectedTrack> {
        self.tracks.iter().find(|t| t.target == target)
    }

    pub fn get_by_number(&self, track_number: u32) -> Option<&DetectedTrack> {
        self.tracks.iter().find(|t| t.track_number == track_number)
    }

    /// Run one radar scan over the world and refresh the store.
    ///
    /// Every live, non-destroyed target inside the detection range gets
    /// a detection verdict; qualifying targets are created or updated,
    /// and anything unseen past the timeout is pruned.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        world: &World,
        model: &RadarModel,
        radar_pos: &Position,
        boresight: &AimAngles,
        jamming: f64,
        now: f64,
        cfg: &TrackerConfig,
        events: &mut Vec<FcEvent>,
    ) {
        let mut query = world.query::<(&Target, &Position, &RadarEcho, &Category)>();
        for (entity, (_target, pos, echo, category)) in query.iter() {
            if world.satisfies::<&Destroyed>(entity).unwrap_or(false) {
                continue;
            }

            let range = radar_pos.range_to(pos);
            if range > cfg.max_detection_range {
                continue;
            }

            let speed = world
                .get::<&Velocity>(entity)
                .map(|v| v.speed())
                .unwrap_or(0.0);

            let signal = match cfg.signal_model {
                SignalModel::RadarEquation => {
                    let scan = model.scan(radar_pos, boresight, pos, echo.rcs_m2, jamming);
                    if !scan.detected {
                        continue;
                    }
                    signal_from_snr(scan.snr_db, model.params().detection_threshold_db)
                }
                SignalModel::Heuristic => {
                    let signal =
                        signal_heuristic(range, category.0, speed, cfg.max_detection_range);
                    if signal < cfg.min_signal_strength {
                        continue;
                    }
                    signal
                }
            };

            self.observe(entity, pos, range, radar_pos, signal, category.0, now, cfg, events);
        }

        self.prune(now, cfg, events);
    }

    /// Record one qualifying detection for a target.
    #[allow(clippy::too_many_arguments)]
    fn observe(
        &mut self,
        entity: Entity,
        pos: &Position,
        range: f64,
        radar_pos: &Position,
        signal: f64,
        category: TargetCategory,
        now: f64,
        cfg: &TrackerConfig,
        events: &mut Vec<FcEvent>,
    ) {
        let bearing_deg = radar_pos.bearing_deg_to(pos);
        let elevation_deg = radar_pos.elevation_deg_to(pos);
        let sample = TrackSample {
            time: now,
            position: *pos,
        };

        if let Some(track) = self.tracks.iter_mut().find(|t| t.target == entity) {
            track.range = range;
            track.bearing_deg = bearing_deg;
            track.elevation_deg = elevation_deg;
            track.signal_strength = signal;
            track.last_seen = now;
            track.push_sample(sample, cfg.history_length);
            return;
        }

        let track_number = self.next_track_number;
        self.next_track_number += 1;

        let mut track = DetectedTrack {
            target: entity,
            track_number,
            range,
            bearing_deg,
            elevation_deg,
            signal_strength: signal,
            first_seen: now,
            last_seen: now,
            category,
            history: VecDeque::with_capacity(cfg.history_length),
        };
        track.push_sample(sample, cfg.history_length);
        self.tracks.push(track);

        if self.tracks.len() > cfg.max_tracked_targets {
            // Capacity overflow: drop the globally weakest signal,
            // which may be the newcomer itself.
            let weakest_idx = self
                .tracks
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| {
                    a.signal_strength
                        .partial_cmp(&b.signal_strength)
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then(b.track_number.cmp(&a.track_number))
                })
                .map(|(idx, _)| idx)
                .unwrap_or(0);
            let evicted = self.tracks.remove(weakest_idx);

            if evicted.track_number == track_number {
                // Newcomer lost the comparison; no contact events.
                return;
            }
            debug!(
                track = evicted.track_number,
                signal = evicted.signal_strength,
                "evicting weakest track at capacity"
            );
            events.push(FcEvent::ContactLost {
                track_number: evicted.track_number,
            });
        }

        debug!(track = track_number, bearing_deg, range, "new contact");
        events.push(FcEvent::NewContact {
            track_number,
            bearing_deg,
        });
    }

    /// Drop tracks unseen for longer than the lost-target timeout.
    fn prune(&mut self, now: f64, cfg: &TrackerConfig, events: &mut Vec<FcEvent>) {
        self.tracks.retain(|track| {
            let alive = now - track.last_seen <= cfg.lost_target_timeout;
            if !alive {
                debug!(track = track.track_number, "track lost to timeout");
                events.push(FcEvent::ContactLost {
                    track_number: track.track_number,
                });
            }
            alive
        });
    }

    /// Highest-scoring lockable track: 0.4 distance + 0.4 signal + 0.2
    /// speed, restricted to the lock distance band. Ties resolve to the
    /// earliest-created track.
    pub fn best_target(&self, cfg: &TrackerConfig) -> Option<&DetectedTrack> {
        let mut best: Option<(&DetectedTrack, f64)> = None;
        for track in &self.tracks {
            if track.range < cfg.min_lock_distance || track.range > cfg.max_lock_distance {
                continue;
            }
            let speed = track.velocity_estimate(cfg.sample_interval).speed();
            let score = 0.4 * (1.0 - track.range / cfg.max_lock_distance)
                + 0.4 * track.signal_strength
                + 0.2 * (speed / BEST_TARGET_SPEED_REF).min(1.0);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((track, score)),
            }
        }
        best.map(|(track, _)| track)
    }
}

/// The single lock-on slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct LockSlot {
    pub phase: LockPhase,
    /// Tracked target's entity id, if any.
    pub target: Option<Entity>,
    /// Simulation time tracking began (s).
    pub started_at: f64,
    /// Normalized lock progress [0, 1]. Non-decreasing while the same
    /// target stays tracked; reset on target change or release.
    pub strength: f64,
}

impl LockSlot {
    /// Begin tracking a known track. Fails (state unchanged) when the
    /// track does not exist or lies outside the lock distance band.
    pub fn start_tracking(
        &mut self,
        store: &TrackStore,
        track_number: u32,
        now: f64,
        cfg: &TrackerConfig,
    ) -> bool {
        let Some(track) = store.get_by_number(track_number) else {
            return false;
        };
        if track.range < cfg.min_lock_distance || track.range > cfg.max_lock_distance {
            return false;
        }
        if self.target == Some(track.target) {
            // Already tracking this target; keep accumulated progress.
            return true;
        }

        info!(track = track_number, "tracking started");
        self.phase = LockPhase::Tracking;
        self.target = Some(track.target);
        self.started_at = now;
        self.strength = 0.0;
        true
    }

    /// Promote the current track to a full lock immediately. Fails when
    /// nothing is being tracked or the track has disappeared.
    pub fn command_lock(&mut self, store: &TrackStore, events: &mut Vec<FcEvent>) -> bool {
        let Some(target) = self.target else {
            return false;
        };
        let Some(track) = store.get(target) else {
            return false;
        };
        if self.phase != LockPhase::LockedOn {
            info!(track = track.track_number, "lock commanded");
            self.phase = LockPhase::LockedOn;
            self.strength = 1.0;
            events.push(FcEvent::LockAcquired {
                track_number: track.track_number,
            });
        }
        true
    }

    /// Explicit release: back to no-target, progress discarded.
    pub fn release(&mut self, store: &TrackStore, events: &mut Vec<FcEvent>) {
        if self.phase == LockPhase::LockedOn {
            if let Some(track) = self.target.and_then(|t| store.get(t)) {
                events.push(FcEvent::LockBroken {
                    track_number: track.track_number,
                });
            }
        }
        self.reset();
    }

    /// Unconditional return to no-target.
    pub fn reset(&mut self) {
        self.phase = LockPhase::NoTarget;
        self.target = None;
        self.started_at = 0.0;
        self.strength = 0.0;
    }

    /// Per-frame maintenance: validate the tracked target, ramp lock
    /// strength, and run the phase transitions.
    pub fn update(
        &mut self,
        world: &World,
        store: &TrackStore,
        now: f64,
        cfg: &TrackerConfig,
        events: &mut Vec<FcEvent>,
    ) {
        let Some(target) = self.target else {
            return;
        };

        let destroyed = world.satisfies::<&Destroyed>(target).unwrap_or(true);
        let track = store.get(target);

        // Track pruned or target destroyed: the slot empties.
        let Some(track) = track else {
            self.break_lock(None, events);
            return;
        };
        if destroyed {
            self.break_lock(Some(track.track_number), events);
            return;
        }

        let in_band =
            track.range >= cfg.min_lock_distance && track.range <= cfg.max_lock_distance;

        match self.phase {
            LockPhase::NoTarget => {}
            LockPhase::Tracking => {
                // Linear ramp over the configured lock time. Strength
                // never decreases while the target is unchanged.
                let elapsed = (now - self.started_at).max(0.0);
                let ramp = if cfg.lock_required_time > 0.0 {
                    (elapsed / cfg.lock_required_time).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                self.strength = self.strength.max(ramp);

                if self.strength >= 1.0 && in_band {
                    info!(track = track.track_number, "lock acquired");
                    self.phase = LockPhase::LockedOn;
                    events.push(FcEvent::LockAcquired {
                        track_number: track.track_number,
                    });
                }
            }
            LockPhase::LockedOn => {
                if !in_band {
                    // Target slid out of the lock band but the track
                    // survives: demote to tracking, keep progress.
                    info!(track = track.track_number, "lock demoted, out of band");
                    self.phase = LockPhase::Tracking;
                    events.push(FcEvent::LockBroken {
                        track_number: track.track_number,
                    });
                }
            }
        }
    }

    fn break_lock(&mut self, track_number: Option<u32>, events: &mut Vec<FcEvent>) {
        if self.phase == LockPhase::LockedOn {
            if let Some(track_number) = track_number {
                events.push(FcEvent::LockBroken { track_number });
            }
        }
        self.reset();
    }
}
