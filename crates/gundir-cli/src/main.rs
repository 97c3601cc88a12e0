//! Headless fire-control demo runner.
//!
//! Spawns a seeded wave of inbound targets, runs a simple auto-engage
//! policy (track best, lock, fire on converged solutions), and emits
//! one JSON snapshot line per sample interval.

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gundir_core::commands::FcCommand;
use gundir_core::config::FireControlConfig;
use gundir_core::enums::{LockPhase, TargetCategory};
use gundir_sim::{world_setup, FireControlEngine};

#[derive(Parser, Debug)]
#[command(name = "gundir", about = "Radar fire-control loop demo", version)]
struct Args {
    /// RNG seed for the spawned scenario. Same seed, same run.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of simulation ticks to run.
    #[arg(long, default_value_t = 3_000)]
    ticks: u32,

    /// Simulated seconds per tick.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// Number of inbound targets to spawn.
    #[arg(long, default_value_t = 4)]
    targets: usize,

    /// Emit a snapshot every N ticks (0 = final snapshot only).
    #[arg(long, default_value_t = 60)]
    sample_every: u32,

    /// Jamming/noise factor applied to the radar noise floor.
    #[arg(long, default_value_t = 1.0)]
    jamming: f64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut engine = match FireControlEngine::new(FireControlConfig::default()) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("configuration rejected: {e}");
            std::process::exit(1);
        }
    };

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    world_setup::spawn_inbound_wave(engine.world_mut(), &mut rng, args.targets, TargetCategory::Fast);
    info!(seed = args.seed, targets = args.targets, "scenario spawned");

    if args.jamming > 1.0 {
        engine.queue_command(FcCommand::SetJamming {
            factor: args.jamming,
        });
    }

    let mut fired_rounds = 0u32;
    for tick in 0..args.ticks {
        // Auto-engage policy: keep a target tracked, lock when ready,
        // fire whenever the solution has converged.
        match engine.lock().phase {
            LockPhase::NoTarget => engine.queue_command(FcCommand::TrackBestTarget),
            LockPhase::Tracking => engine.queue_command(FcCommand::CommandLock),
            LockPhase::LockedOn => {
                if engine.solution().map(|s| s.converged).unwrap_or(false) && tick % 30 == 0 {
                    engine.queue_command(FcCommand::Fire);
                    fired_rounds += 1;
                }
            }
        }

        // Sweep the radar while idle so contacts off the initial
        // boresight still get painted; once tracking, keep the beam
        // on the target.
        let beam = if engine.lock().phase == LockPhase::NoTarget {
            Some(((tick as f64 * args.dt * 90.0) % 360.0, 2.0))
        } else {
            engine
                .lock()
                .target
                .and_then(|t| engine.store().get(t))
                .map(|track| (track.bearing_deg, track.elevation_deg))
        };
        if let Some((azimuth_deg, elevation_deg)) = beam {
            engine.queue_command(FcCommand::PointRadar {
                azimuth_deg,
                elevation_deg,
            });
        }

        let snapshot = engine.tick(args.dt);

        let emit = args.sample_every != 0 && (tick + 1) % args.sample_every == 0;
        if emit || tick + 1 == args.ticks {
            match serde_json::to_string(&snapshot) {
                Ok(line) => println!("{line}"),
                Err(e) => {
                    eprintln!("snapshot serialization failed: {e}");
                    std::process::exit(1);
                }
            }
        }
    }

    info!(
        ticks = args.ticks,
        rounds = fired_rounds,
        "run complete"
    );
}
