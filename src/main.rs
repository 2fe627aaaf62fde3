use vgsim::{bench_broad_phase, bench_step_curve};
use vgsim::{ScenarioConfig, Simulation};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Headless runner for the Verlet circle sandbox")]
struct Args {
    /// Scenario file, either a path or a name under `scenarios/`
    #[arg(short, long, default_value = "default.yaml")]
    file_name: String,

    /// Simulated render frame duration in seconds
    #[arg(long, default_value_t = 1.0 / 144.0)]
    frame_time: f64,

    /// Ticks between state reports
    #[arg(long, default_value_t = 60)]
    report_every: u64,

    /// Run the broad-phase and step benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let direct = PathBuf::from(file_name);
    let config_path = if direct.exists() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    let scenario_cfg = ScenarioConfig::load(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;
    Ok(scenario_cfg)
}

fn report(sim: &Simulation, ticks: u64) {
    info!(
        "tick {ticks:6} t = {:8.3} s, kinetic energy = {:10.4}",
        sim.world.t,
        sim.world.kinetic_energy()
    );
    for (i, b) in sim.world.bodies.iter().enumerate() {
        log::debug!(
            "  #{i} pos = ({:8.3}, {:8.3}) vel = ({:8.3}, {:8.3})",
            b.position.x,
            b.position.y,
            b.velocity.x,
            b.velocity.y
        );
    }
}

fn main() -> Result<()> {
    let env = Env::default().filter_or("LOG_LEVEL", "info").write_style_or("LOG_STYLE", "auto");
    env_logger::init_from_env(env);

    let args = Args::parse();

    if args.bench {
        bench_broad_phase();
        bench_step_curve();
        return Ok(());
    }

    if !(args.frame_time > 0.0) {
        anyhow::bail!("--frame-time must be positive, got {}", args.frame_time);
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut sim = Simulation::build(&scenario_cfg)?;
    info!(
        "running {} bodies for {} s at dt = {}",
        sim.world.len(),
        sim.parameters.t_end,
        sim.world.fixed_dt
    );

    let report_every = args.report_every.max(1);
    let mut ticks: u64 = 0;
    report(&sim, ticks);

    while !sim.is_finished() {
        let before = ticks;
        ticks += sim.advance(args.frame_time) as u64;
        if before / report_every != ticks / report_every {
            report(&sim, ticks);
        }
    }

    report(&sim, ticks);
    info!("done after {ticks} ticks");
    Ok(())
}
