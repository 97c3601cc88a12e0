//! Radar detection model.
//!
//! Monostatic radar equation with a Gaussian-approximated antenna gain
//! pattern and a thermal noise floor. Derived constants (wavelength,
//! linear gain and loss, noise floor) are computed once at construction;
//! the model itself is immutable and carries no other state.

use gundir_core::config::RadarParams;
use gundir_core::constants::{BOLTZMANN, NOISE_REFERENCE_TEMP_K, SPEED_OF_LIGHT};
use gundir_core::types::{AimAngles, Position};

/// Cube of 4*pi, the monostatic radar equation denominator constant.
const FOUR_PI_CUBED: f64 = 1984.4017075391884;

/// The detection model. Construct once per radar configuration.
#[derive(Debug, Clone)]
pub struct RadarModel {
    params: RadarParams,
    /// Wavelength (m), c / frequency.
    wavelength: f64,
    /// Peak antenna gain, linear.
    gain_linear: f64,
    /// System loss, linear (>= 1).
    loss_linear: f64,
    /// Thermal noise floor k*T0*B*F (W), before jamming.
    noise_floor_w: f64,
}

impl RadarModel {
    pub fn new(params: RadarParams) -> Self {
        let wavelength = SPEED_OF_LIGHT / params.frequency_hz;
        let gain_linear = db_to_linear(params.antenna_gain_db);
        let loss_linear = db_to_linear(params.system_loss_db);
        let noise_figure_linear = db_to_linear(params.noise_figure_db);
        let noise_floor_w =
            BOLTZMANN * NOISE_REFERENCE_TEMP_K * params.bandwidth_hz * noise_figure_linear;

        Self {
            params,
            wavelength,
            gain_linear,
            loss_linear,
            noise_floor_w,
        }
    }

    pub fn params(&self) -> &RadarParams {
        &self.params
    }

    /// One-way effective antenna gain (linear) at `theta_deg` off
    /// boresight. Gaussian beam shape calibrated so that the gain is
    /// exactly -3 dB (factor 0.5) at half the configured beam width.
    pub fn effective_gain(&self, theta_deg: f64) -> f64 {
        let half_beam = self.params.beam_width_deg / 2.0;
        let ratio = theta_deg / half_beam;
        self.gain_linear * (-std::f64::consts::LN_2 * ratio * ratio).exp()
    }

    /// Received power (W) for a target of cross-section `rcs_m2` at
    /// `target_pos`, with the antenna at `radar_pos` pointing along
    /// `boresight`. Zero range returns zero power.
    pub fn received_power(
        &self,
        radar_pos: &Position,
        boresight: &AimAngles,
        target_pos: &Position,
        rcs_m2: f64,
    ) -> f64 {
        let range = radar_pos.range_to(target_pos);
        if range <= 0.0 {
            return 0.0;
        }

        let theta = boresight.angle_off_deg(radar_pos, target_pos);
        let g = self.effective_gain(theta);
        let range_4 = range * range * range * range;

        self.params.transmit_power_w * g * g * self.wavelength * self.wavelength * rcs_m2
            / (FOUR_PI_CUBED * range_4 * self.loss_linear)
    }

    /// Signal-to-noise ratio in dB for a received power, with the
    /// jamming scalar inflating the noise floor. Non-positive power
    /// maps to negative infinity rather than NaN.
    pub fn snr_db(&self, received_power_w: f64, jamming: f64) -> f64 {
        if received_power_w <= 0.0 {
            return f64::NEG_INFINITY;
        }
        let noise = self.noise_floor_w * jamming.max(1.0);
        10.0 * (received_power_w / noise).log10()
    }

    /// Detection verdict. The threshold boundary is inclusive.
    pub fn is_detected(&self, snr_db: f64) -> bool {
        snr_db >= self.params.detection_threshold_db
    }

    /// Full scan of one target: received power, SNR, verdict.
    pub fn scan(
        &self,
        radar_pos: &Position,
        boresight: &AimAngles,
        target_pos: &Position,
        rcs_m2: f64,
        jamming: f64,
    ) -> Detection {
        let power_w = self.received_power(radar_pos, boresight, target_pos, rcs_m2);
        let snr_db = self.snr_db(power_w, jamming);
        Detection {
            power_w,
            snr_db,
            detected: self.is_detected(snr_db),
        }
    }

    /// Thermal noise floor before jamming (W).
    pub fn noise_floor_w(&self) -> f64 {
        self.noise_floor_w
    }
}

/// Result of scanning a single target.
#[derive(Debug, Clone, Copy)]
pub struct Detection {
    pub power_w: f64,
    pub snr_db: f64,
    pub detected: bool,
}

fn db_to_linear(db: f64) -> f64 {
    10.0f64.powf(db / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gundir_core::enums::TargetCategory;

    fn model() -> RadarModel {
        RadarModel::new(RadarParams::default())
    }

    fn boresight_at(target: &Position) -> AimAngles {
        let origin = Position::default();
        AimAngles::new(
            origin.bearing_deg_to(target),
            origin.elevation_deg_to(target),
        )
    }

    #[test]
    fn test_inverse_fourth_power_law() {
        let m = model();
        let origin = Position::default();
        let near = Position::new(0.0, 2_000.0, 0.0);
        let far = Position::new(0.0, 4_000.0, 0.0);
        let aim = AimAngles::new(0.0, 0.0);

        let p_near = m.received_power(&origin, &aim, &near, 1.0);
        let p_far = m.received_power(&origin, &aim, &far, 1.0);

        // Doubling range cuts received power by exactly 16x.
        let ratio = p_near / p_far;
        assert!(
            (ratio - 16.0).abs() < 1e-9 * 16.0,
            "expected 16x falloff, got {ratio}"
        );
    }

    #[test]
    fn test_power_linear_in_cross_section() {
        let m = model();
        let origin = Position::default();
        let target = Position::new(3_000.0, 4_000.0, 500.0);
        let aim = boresight_at(&target);

        let p1 = m.received_power(&origin, &aim, &target, 1.0);
        let p10 = m.received_power(&origin, &aim, &target, 10.0);

        let ratio = p10 / p1;
        assert!(
            (ratio - 10.0).abs() < 1e-9 * 10.0,
            "expected 10x with 10x RCS, got {ratio}"
        );
    }

    #[test]
    fn test_gain_minus_3db_at_half_beamwidth() {
        let m = model();
        let half_beam = m.params().beam_width_deg / 2.0;

        let on_axis = m.effective_gain(0.0);
        let at_edge = m.effective_gain(half_beam);

        // One-way gain factor exactly 0.5 at the -3 dB point.
        assert!(((at_edge / on_axis) - 0.5).abs() < 1e-12);

        // Two-way power ratio 0.25 versus boresight at equal range.
        let origin = Position::default();
        let range = 5_000.0;
        let ahead = Position::new(0.0, range, 0.0);
        let aim_on = AimAngles::new(0.0, 0.0);
        let aim_off = AimAngles::new(half_beam, 0.0);

        let p_on = m.received_power(&origin, &aim_on, &ahead, 1.0);
        let p_off = m.received_power(&origin, &aim_off, &ahead, 1.0);
        assert!(((p_off / p_on) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_zero_range_returns_zero_power() {
        let m = model();
        let origin = Position::default();
        let aim = AimAngles::new(0.0, 0.0);

        let p = m.received_power(&origin, &aim, &origin, 5.0);
        assert_eq!(p, 0.0);

        // And the SNR stays finite-comparable (never NaN).
        let snr = m.snr_db(p, 1.0);
        assert!(snr.is_infinite() && snr < 0.0);
        assert!(!m.is_detected(snr));
    }

    #[test]
    fn test_detection_threshold_inclusive() {
        let m = model();
        let threshold = m.params().detection_threshold_db;

        assert!(m.is_detected(threshold));
        assert!(m.is_detected(threshold + 0.1));
        assert!(!m.is_detected(threshold - 0.1));
    }

    #[test]
    fn test_jamming_degrades_snr() {
        let m = model();
        let origin = Position::default();
        let target = Position::new(0.0, 8_000.0, 200.0);
        let aim = boresight_at(&target);

        let p = m.received_power(&origin, &aim, &target, 2.5);
        let clean = m.snr_db(p, 1.0);
        let jammed = m.snr_db(p, 100.0);

        // 100x noise = exactly 20 dB of SNR loss.
        assert!((clean - jammed - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_scenario_target_in_beam_detected() {
        // Radar at origin, large stationary target 5 km north at 100 m
        // altitude, beam pointed straight at it.
        let m = model();
        let origin = Position::default();
        let target = Position::new(0.0, 5_000.0, 100.0);
        let rcs = TargetCategory::Fast.rcs_m2();

        let aim = boresight_at(&target);
        let hit = m.scan(&origin, &aim, &target, rcs, 1.0);
        assert!(
            hit.detected,
            "expected detection, snr was {:.1} dB",
            hit.snr_db
        );
        assert!(hit.snr_db > m.params().detection_threshold_db);

        // Same target with the beam rotated 90 degrees away: gone.
        let aim_away = AimAngles::new(aim.azimuth_deg + 90.0, aim.elevation_deg);
        let miss = m.scan(&origin, &aim_away, &target, rcs, 1.0);
        assert!(!miss.detected);
    }
}
