//! Physical constants and default tuning parameters.

// --- Physics ---

/// Boltzmann constant (J/K).
pub const BOLTZMANN: f64 = 1.380_649e-23;

/// Reference noise temperature (K).
pub const NOISE_REFERENCE_TEMP_K: f64 = 290.0;

/// Speed of light (m/s).
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Earth angular velocity (rad/s).
pub const EARTH_ANGULAR_VELOCITY: f64 = 7.292_115_9e-5;

/// Standard gravitational acceleration (m/s²).
pub const STANDARD_GRAVITY: f64 = 9.806_65;

/// Sea-level air density (kg/m³).
pub const SEA_LEVEL_AIR_DENSITY: f64 = 1.225;

// --- Radar defaults (X-band gun-laying set) ---

/// Transmit power (W).
pub const DEFAULT_TRANSMIT_POWER_W: f64 = 25_000.0;

/// Operating frequency (Hz) — X-band.
pub const DEFAULT_FREQUENCY_HZ: f64 = 10.0e9;

/// Peak antenna gain (dB).
pub const DEFAULT_ANTENNA_GAIN_DB: f64 = 35.0;

/// Full beam width between -3 dB points (degrees).
pub const DEFAULT_BEAM_WIDTH_DEG: f64 = 6.0;

/// Receiver bandwidth (Hz).
pub const DEFAULT_BANDWIDTH_HZ: f64 = 1.0e6;

/// Receiver noise figure (dB).
pub const DEFAULT_NOISE_FIGURE_DB: f64 = 3.0;

/// Combined system losses (dB).
pub const DEFAULT_SYSTEM_LOSS_DB: f64 = 3.0;

/// Detection threshold (dB SNR).
pub const DEFAULT_DETECTION_THRESHOLD_DB: f64 = 13.0;

// --- Tracker defaults ---

/// Maximum detection range (m).
pub const DEFAULT_MAX_DETECTION_RANGE: f64 = 20_000.0;

/// Minimum normalized signal strength for the heuristic model.
pub const DEFAULT_MIN_SIGNAL_STRENGTH: f64 = 0.05;

/// Time tracked before a full lock is achieved (s).
pub const DEFAULT_LOCK_REQUIRED_TIME: f64 = 2.5;

/// Bounded position-history length per track.
pub const DEFAULT_HISTORY_LENGTH: usize = 16;

/// Maximum simultaneously tracked targets.
pub const DEFAULT_MAX_TRACKED_TARGETS: usize = 12;

/// Seconds without re-detection before a track is dropped.
pub const DEFAULT_LOST_TARGET_TIMEOUT: f64 = 3.0;

/// Minimum lock distance (m).
pub const DEFAULT_MIN_LOCK_DISTANCE: f64 = 200.0;

/// Maximum lock distance (m).
pub const DEFAULT_MAX_LOCK_DISTANCE: f64 = 12_000.0;

/// Nominal history sample interval when timestamps are degenerate (s).
pub const DEFAULT_SAMPLE_INTERVAL: f64 = 1.0 / 60.0;

/// Reference speed that saturates the best-target speed term (m/s).
pub const BEST_TARGET_SPEED_REF: f64 = 100.0;

/// SNR margin above the detection threshold that maps to full signal
/// strength (dB).
pub const SIGNAL_DYNAMIC_RANGE_DB: f64 = 30.0;

// --- Ballistics defaults (40 mm class gun) ---

/// Muzzle velocity (m/s).
pub const DEFAULT_MUZZLE_VELOCITY: f64 = 1_000.0;

/// Projectile mass (kg).
pub const DEFAULT_PROJECTILE_MASS: f64 = 0.96;

/// Drag coefficient (dimensionless).
pub const DEFAULT_DRAG_COEFFICIENT: f64 = 0.30;

/// Projectile cross-sectional area (m²).
pub const DEFAULT_CROSS_SECTION_AREA: f64 = 1.26e-3;

/// Firing site latitude (degrees).
pub const DEFAULT_LATITUDE_DEG: f64 = 45.0;

/// Radius within which a projectile destroys a target (m).
pub const DEFAULT_LETHAL_RADIUS: f64 = 20.0;

/// Maximum projectile flight time before removal (s).
pub const DEFAULT_MAX_FLIGHT_TIME: f64 = 60.0;

// --- Solver defaults ---

/// Convergence tolerance on miss distance (m).
pub const DEFAULT_SOLVER_TOLERANCE: f64 = 10.0;

/// Hard iteration cap for the lead-angle search.
pub const DEFAULT_SOLVER_MAX_ITERATIONS: u32 = 15;

/// Forward-simulation timestep inside the solver (s).
pub const DEFAULT_SOLVER_TIMESTEP: f64 = 0.01;

/// Angle perturbation for the forward-difference Jacobian (degrees).
pub const DEFAULT_SOLVER_JACOBIAN_STEP_DEG: f64 = 0.1;

/// Damping applied to each per-axis angle correction.
pub const DEFAULT_SOLVER_DAMPING: f64 = 0.5;

/// Fallback elevation bounds when the no-drag solution does not exist
/// (degrees).
pub const SOLVER_FALLBACK_MIN_ELEVATION: f64 = 5.0;
pub const SOLVER_FALLBACK_MAX_ELEVATION: f64 = 45.0;
