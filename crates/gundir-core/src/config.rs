//! Fire-control configuration.
//!
//! All tuning is collected into immutable structs constructed once and
//! handed to the engine. Overrides go through `with_*` builder methods
//! rather than ad hoc field patching after the fact.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::enums::SignalModel;

/// Configuration validation failure.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("radar parameter {name} must be positive, got {value}")]
    NonPositiveRadarParam { name: &'static str, value: f64 },
    #[error("ballistics parameter {name} must be positive, got {value}")]
    NonPositiveBallisticsParam { name: &'static str, value: f64 },
    #[error("lock distance band is empty: min {min} >= max {max}")]
    EmptyLockBand { min: f64, max: f64 },
    #[error("tracker capacity must be at least 1")]
    ZeroTrackCapacity,
    #[error("solver iteration cap must be at least 1")]
    ZeroIterationCap,
}

/// Radar hardware parameters. Immutable after engine construction;
/// derived quantities (wavelength, linear gain/loss, noise floor) are
/// computed once by the detection model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarParams {
    /// Transmit power (W).
    pub transmit_power_w: f64,
    /// Operating frequency (Hz).
    pub frequency_hz: f64,
    /// Peak antenna gain (dB).
    pub antenna_gain_db: f64,
    /// Full beam width between -3 dB points (degrees).
    pub beam_width_deg: f64,
    /// Receiver bandwidth (Hz).
    pub bandwidth_hz: f64,
    /// Receiver noise figure (dB).
    pub noise_figure_db: f64,
    /// Combined system losses (dB).
    pub system_loss_db: f64,
    /// Detection threshold (dB SNR), inclusive.
    pub detection_threshold_db: f64,
}

impl Default for RadarParams {
    fn default() -> Self {
        Self {
            transmit_power_w: DEFAULT_TRANSMIT_POWER_W,
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            antenna_gain_db: DEFAULT_ANTENNA_GAIN_DB,
            beam_width_deg: DEFAULT_BEAM_WIDTH_DEG,
            bandwidth_hz: DEFAULT_BANDWIDTH_HZ,
            noise_figure_db: DEFAULT_NOISE_FIGURE_DB,
            system_loss_db: DEFAULT_SYSTEM_LOSS_DB,
            detection_threshold_db: DEFAULT_DETECTION_THRESHOLD_DB,
        }
    }
}

impl RadarParams {
    pub fn with_transmit_power_w(mut self, w: f64) -> Self {
        self.transmit_power_w = w;
        self
    }

    pub fn with_beam_width_deg(mut self, deg: f64) -> Self {
        self.beam_width_deg = deg;
        self
    }

    pub fn with_detection_threshold_db(mut self, db: f64) -> Self {
        self.detection_threshold_db = db;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("transmit_power_w", self.transmit_power_w),
            ("frequency_hz", self.frequency_hz),
            ("beam_width_deg", self.beam_width_deg),
            ("bandwidth_hz", self.bandwidth_hz),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositiveRadarParam { name, value });
            }
        }
        Ok(())
    }
}

/// Track store and lock-on tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Maximum detection range (m).
    pub max_detection_range: f64,
    /// Minimum normalized signal strength for the heuristic model.
    pub min_signal_strength: f64,
    /// Time tracked before full lock (s).
    pub lock_required_time: f64,
    /// Bounded position-history length per track.
    pub history_length: usize,
    /// Maximum simultaneously tracked targets.
    pub max_tracked_targets: usize,
    /// Seconds without re-detection before a track is dropped.
    pub lost_target_timeout: f64,
    /// Minimum lock distance (m).
    pub min_lock_distance: f64,
    /// Maximum lock distance (m).
    pub max_lock_distance: f64,
    /// Nominal sample interval for velocity differencing when the
    /// recorded timestamps are degenerate (s).
    pub sample_interval: f64,
    /// Which signal-strength model to run.
    pub signal_model: SignalModel,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_detection_range: DEFAULT_MAX_DETECTION_RANGE,
            min_signal_strength: DEFAULT_MIN_SIGNAL_STRENGTH,
            lock_required_time: DEFAULT_LOCK_REQUIRED_TIME,
            history_length: DEFAULT_HISTORY_LENGTH,
            max_tracked_targets: DEFAULT_MAX_TRACKED_TARGETS,
            lost_target_timeout: DEFAULT_LOST_TARGET_TIMEOUT,
            min_lock_distance: DEFAULT_MIN_LOCK_DISTANCE,
            max_lock_distance: DEFAULT_MAX_LOCK_DISTANCE,
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
            signal_model: SignalModel::default(),
        }
    }
}

impl TrackerConfig {
    pub fn with_max_detection_range(mut self, m: f64) -> Self {
        self.max_detection_range = m;
        self
    }

    pub fn with_lock_required_time(mut self, secs: f64) -> Self {
        self.lock_required_time = secs;
        self
    }

    pub fn with_lost_target_timeout(mut self, secs: f64) -> Self {
        self.lost_target_timeout = secs;
        self
    }

    pub fn with_max_tracked_targets(mut self, n: usize) -> Self {
        self.max_tracked_targets = n;
        self
    }

    pub fn with_history_length(mut self, n: usize) -> Self {
        self.history_length = n;
        self
    }

    pub fn with_lock_band(mut self, min: f64, max: f64) -> Self {
        self.min_lock_distance = min;
        self.max_lock_distance = max;
        self
    }

    pub fn with_signal_model(mut self, model: SignalModel) -> Self {
        self.signal_model = model;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_tracked_targets == 0 {
            return Err(ConfigError::ZeroTrackCapacity);
        }
        if self.min_lock_distance >= self.max_lock_distance {
            return Err(ConfigError::EmptyLockBand {
                min: self.min_lock_distance,
                max: self.max_lock_distance,
            });
        }
        Ok(())
    }
}

/// Projectile ballistics parameters. Configuration, not identity:
/// a fresh set may be supplied per solver call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallisticsParams {
    /// Muzzle velocity (m/s).
    pub muzzle_velocity: f64,
    /// Projectile mass (kg).
    pub projectile_mass: f64,
    /// Drag coefficient (dimensionless).
    pub drag_coefficient: f64,
    /// Cross-sectional area (m²).
    pub cross_section_area: f64,
    /// Air density (kg/m³).
    pub air_density: f64,
    /// Gravitational acceleration (m/s²).
    pub gravity: f64,
    /// Earth angular velocity (rad/s).
    pub earth_angular_velocity: f64,
    /// Firing site latitude (degrees).
    pub latitude_deg: f64,
}

impl Default for BallisticsParams {
    fn default() -> Self {
        Self {
            muzzle_velocity: DEFAULT_MUZZLE_VELOCITY,
            projectile_mass: DEFAULT_PROJECTILE_MASS,
            drag_coefficient: DEFAULT_DRAG_COEFFICIENT,
            cross_section_area: DEFAULT_CROSS_SECTION_AREA,
            air_density: SEA_LEVEL_AIR_DENSITY,
            gravity: STANDARD_GRAVITY,
            earth_angular_velocity: EARTH_ANGULAR_VELOCITY,
            latitude_deg: DEFAULT_LATITUDE_DEG,
        }
    }
}

impl BallisticsParams {
    pub fn with_muzzle_velocity(mut self, mps: f64) -> Self {
        self.muzzle_velocity = mps;
        self
    }

    pub fn with_drag_coefficient(mut self, cd: f64) -> Self {
        self.drag_coefficient = cd;
        self
    }

    pub fn with_latitude_deg(mut self, deg: f64) -> Self {
        self.latitude_deg = deg;
        self
    }

    /// Drag-free variant, useful for closed-form comparisons.
    pub fn without_drag(mut self) -> Self {
        self.drag_coefficient = 0.0;
        self
    }

    /// Variant with Earth rotation disabled.
    pub fn without_coriolis(mut self) -> Self {
        self.earth_angular_velocity = 0.0;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("muzzle_velocity", self.muzzle_velocity),
            ("projectile_mass", self.projectile_mass),
            ("gravity", self.gravity),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositiveBallisticsParam { name, value });
            }
        }
        Ok(())
    }
}

/// Lead-angle solver tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Convergence tolerance on miss distance (m).
    pub tolerance: f64,
    /// Hard iteration cap.
    pub max_iterations: u32,
    /// Forward-simulation timestep (s).
    pub timestep: f64,
    /// Angle perturbation for the forward-difference Jacobian (degrees).
    pub jacobian_step_deg: f64,
    /// Damping on each per-axis angle correction.
    pub damping: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_SOLVER_TOLERANCE,
            max_iterations: DEFAULT_SOLVER_MAX_ITERATIONS,
            timestep: DEFAULT_SOLVER_TIMESTEP,
            jacobian_step_deg: DEFAULT_SOLVER_JACOBIAN_STEP_DEG,
            damping: DEFAULT_SOLVER_DAMPING,
        }
    }
}

impl SolverConfig {
    pub fn with_tolerance(mut self, m: f64) -> Self {
        self.tolerance = m;
        self
    }

    pub fn with_max_iterations(mut self, n: u32) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterationCap);
        }
        Ok(())
    }
}

/// Complete fire-control configuration handed to the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FireControlConfig {
    pub radar: RadarParams,
    pub tracker: TrackerConfig,
    pub ballistics: BallisticsParams,
    pub solver: SolverConfig,
}

impl FireControlConfig {
    pub fn with_radar(mut self, radar: RadarParams) -> Self {
        self.radar = radar;
        self
    }

    pub fn with_tracker(mut self, tracker: TrackerConfig) -> Self {
        self.tracker = tracker;
        self
    }

    pub fn with_ballistics(mut self, ballistics: BallisticsParams) -> Self {
        self.ballistics = ballistics;
        self
    }

    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.radar.validate()?;
        self.tracker.validate()?;
        self.ballistics.validate()?;
        self.solver.validate()
    }
}
