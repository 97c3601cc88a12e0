#[cfg(test)]
mod tests {
    use crate::commands::FcCommand;
    use crate::config::{
        BallisticsParams, ConfigError, FireControlConfig, RadarParams, SolverConfig, TrackerConfig,
    };
    use crate::enums::*;
    use crate::events::FcEvent;
    use crate::state::{FcSnapshot, LeadSolution};
    use crate::types::{AimAngles, Position, SimTime, Velocity};

    /// Verify all enums round-trip through serde_json.
    #[test]
    fn test_enum_serde_round_trips() {
        let categories = vec![
            TargetCategory::Static,
            TargetCategory::Slow,
            TargetCategory::Fast,
        ];
        for v in categories {
            let json = serde_json::to_string(&v).unwrap();
            let back: TargetCategory = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }

        let phases = vec![LockPhase::NoTarget, LockPhase::Tracking, LockPhase::LockedOn];
        for v in phases {
            let json = serde_json::to_string(&v).unwrap();
            let back: LockPhase = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }

        let models = vec![SignalModel::RadarEquation, SignalModel::Heuristic];
        for v in models {
            let json = serde_json::to_string(&v).unwrap();
            let back: SignalModel = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    /// Verify FcCommand round-trips through serde (tagged union).
    #[test]
    fn test_command_serde() {
        let commands = vec![
            FcCommand::PointRadar {
                azimuth_deg: 45.0,
                elevation_deg: 10.0,
            },
            FcCommand::StartTracking { track_number: 3 },
            FcCommand::TrackBestTarget,
            FcCommand::CommandLock,
            FcCommand::ReleaseLock,
            FcCommand::Reset,
            FcCommand::Fire,
            FcCommand::SetJamming { factor: 4.0 },
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: FcCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    /// Verify FcEvent round-trips through serde.
    #[test]
    fn test_event_serde() {
        let events = vec![
            FcEvent::NewContact {
                track_number: 1,
                bearing_deg: 90.0,
            },
            FcEvent::ContactLost { track_number: 1 },
            FcEvent::LockAcquired { track_number: 2 },
            FcEvent::LockBroken { track_number: 2 },
            FcEvent::ShotFired {
                round_id: 0,
                azimuth_deg: 12.0,
                elevation_deg: 4.0,
            },
            FcEvent::TargetDestroyed {
                round_id: 0,
                track_number: Some(2),
            },
            FcEvent::RoundExpended { round_id: 0 },
            FcEvent::SolutionExhausted { error_m: 42.0 },
        ];
        for ev in &events {
            let json = serde_json::to_string(ev).unwrap();
            let back: FcEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    #[test]
    fn test_snapshot_serde_default() {
        let snap = FcSnapshot::default();
        let json = serde_json::to_string(&snap).unwrap();
        let back: FcSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(json, serde_json::to_string(&back).unwrap());
    }

    #[test]
    fn test_lead_solution_serde() {
        let solution = LeadSolution {
            azimuth_deg: 87.5,
            elevation_deg: 6.2,
            flight_time: 1.31,
            predicted_target: Position::new(1065.0, 0.0, 100.0),
            predicted_impact: Position::new(1064.0, 0.5, 99.0),
            error_m: 1.5,
            converged: true,
            iterations: 4,
        };
        let json = serde_json::to_string(&solution).unwrap();
        let back: LeadSolution = serde_json::from_str(&json).unwrap();
        assert_eq!(solution, back);
    }

    // ---- Geometry ----

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = Position::default();
        let north = Position::new(0.0, 1000.0, 0.0);
        let east = Position::new(1000.0, 0.0, 0.0);
        let south = Position::new(0.0, -1000.0, 0.0);
        let west = Position::new(-1000.0, 0.0, 0.0);

        assert!((origin.bearing_deg_to(&north) - 0.0).abs() < 1e-9);
        assert!((origin.bearing_deg_to(&east) - 90.0).abs() < 1e-9);
        assert!((origin.bearing_deg_to(&south) - 180.0).abs() < 1e-9);
        assert!((origin.bearing_deg_to(&west) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_elevation_angle() {
        let origin = Position::default();
        let level = Position::new(1000.0, 0.0, 0.0);
        let above = Position::new(1000.0, 0.0, 1000.0);
        let below = Position::new(1000.0, 0.0, -1000.0);

        assert!(origin.elevation_deg_to(&level).abs() < 1e-9);
        assert!((origin.elevation_deg_to(&above) - 45.0).abs() < 1e-9);
        assert!((origin.elevation_deg_to(&below) + 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_aim_angles_direction() {
        let north = AimAngles::new(0.0, 0.0).direction();
        assert!(north.x.abs() < 1e-12);
        assert!((north.y - 1.0).abs() < 1e-12);

        let east_up = AimAngles::new(90.0, 45.0).direction();
        assert!((east_up.x - (0.5f64).sqrt()).abs() < 1e-12);
        assert!((east_up.z - (0.5f64).sqrt()).abs() < 1e-12);

        // Off-boresight angle: boresight north, target east => 90 degrees.
        let aim = AimAngles::new(0.0, 0.0);
        let off = aim.angle_off_deg(&Position::default(), &Position::new(1000.0, 0.0, 0.0));
        assert!((off - 90.0).abs() < 1e-9);

        // Degenerate zero-range target never produces NaN.
        let zero = aim.angle_off_deg(&Position::default(), &Position::default());
        assert_eq!(zero, 0.0);
    }

    #[test]
    fn test_aim_angles_normalization() {
        let a = AimAngles::new(370.0, 95.0);
        assert!((a.azimuth_deg - 10.0).abs() < 1e-9);
        assert!((a.elevation_deg - 90.0).abs() < 1e-9);

        let b = AimAngles::new(-90.0, -100.0);
        assert!((b.azimuth_deg - 270.0).abs() < 1e-9);
        assert!((b.elevation_deg + 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut t = SimTime::default();
        for _ in 0..30 {
            t.advance(1.0 / 30.0);
        }
        assert_eq!(t.tick, 30);
        assert!((t.elapsed_secs - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_velocity_speed() {
        let v = Velocity::new(3.0, 4.0, 0.0);
        assert!((v.speed() - 5.0).abs() < 1e-12);
        assert!((v.horizontal_speed() - 5.0).abs() < 1e-12);
    }

    // ---- Configuration ----

    #[test]
    fn test_config_defaults_validate() {
        let config = FireControlConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder_overrides() {
        let config = FireControlConfig::default()
            .with_radar(RadarParams::default().with_beam_width_deg(3.0))
            .with_tracker(TrackerConfig::default().with_lock_band(100.0, 8000.0))
            .with_ballistics(BallisticsParams::default().with_muzzle_velocity(800.0))
            .with_solver(SolverConfig::default().with_max_iterations(25));

        assert!((config.radar.beam_width_deg - 3.0).abs() < 1e-12);
        assert!((config.tracker.min_lock_distance - 100.0).abs() < 1e-12);
        assert!((config.ballistics.muzzle_velocity - 800.0).abs() < 1e-12);
        assert_eq!(config.solver.max_iterations, 25);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_bad_values() {
        let bad_radar = RadarParams::default().with_transmit_power_w(0.0);
        assert!(matches!(
            bad_radar.validate(),
            Err(ConfigError::NonPositiveRadarParam { .. })
        ));

        let bad_band = TrackerConfig::default().with_lock_band(5000.0, 500.0);
        assert!(matches!(
            bad_band.validate(),
            Err(ConfigError::EmptyLockBand { .. })
        ));

        let bad_cap = TrackerConfig::default().with_max_tracked_targets(0);
        assert_eq!(bad_cap.validate(), Err(ConfigError::ZeroTrackCapacity));

        let bad_solver = SolverConfig::default().with_max_iterations(0);
        assert_eq!(bad_solver.validate(), Err(ConfigError::ZeroIterationCap));
    }

    #[test]
    fn test_category_ordering_factors() {
        // Doppler detectability must be strictly ordered static < slow < fast.
        assert!(TargetCategory::Static.doppler_factor() < TargetCategory::Slow.doppler_factor());
        assert!(TargetCategory::Slow.doppler_factor() < TargetCategory::Fast.doppler_factor());
    }
}
