//! Slipstick friction model CLI.
//!
//! Provides four modes of operation:
//! - `eval`: Evaluate one sample and print the parameter/sample dumps
//! - `sweep`: Print the force over a velocity sweep as CSV
//! - `replay`: Drive a sinusoidal velocity profile through the model as CSV
//! - `info`: Print crate version and the available presets

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use slipstick_models::diagnostics::{ParameterReport, SampleReport, trace_sample};
use slipstick_models::prelude::*;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Friction force evaluation for transmission contacts.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// TOML model configuration. Defaults to the classical model with
    /// default coefficients.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured model variant.
    #[arg(short, long, global = true, value_parser = parse_model)]
    model: Option<ModelKind>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single sample.
    Eval {
        /// Moving point velocity.
        #[arg(short, long, default_value_t = 0.01, allow_negative_numbers = true)]
        velocity: f64,

        /// Normal contact force.
        #[arg(short, long, default_value_t = 20.0)]
        normal_force: f64,

        /// Externally applied force.
        #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
        external_force: f64,

        /// Contact displacement.
        #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
        displacement: f64,

        /// Sample time.
        #[arg(short, long, default_value_t = 0.0)]
        time: f64,
    },

    /// Sweep velocity and print `velocity,force` CSV.
    Sweep {
        /// Start velocity.
        #[arg(long, default_value_t = -0.05, allow_negative_numbers = true)]
        from: f64,

        /// End velocity.
        #[arg(long, default_value_t = 0.05, allow_negative_numbers = true)]
        to: f64,

        /// Number of points.
        #[arg(short, long, default_value_t = 101)]
        steps: u32,

        /// Normal contact force.
        #[arg(short, long, default_value_t = 20.0)]
        normal_force: f64,
    },

    /// Replay `v(t) = amplitude·sin(2πt/period)` and print
    /// `time,velocity,regime,force` CSV.
    Replay {
        /// Sample period (s).
        #[arg(long, default_value_t = 0.001)]
        dt: f64,

        /// Number of samples.
        #[arg(short, long, default_value_t = 2000)]
        steps: u32,

        /// Velocity amplitude.
        #[arg(short, long, default_value_t = 0.02)]
        amplitude: f64,

        /// Oscillation period (s).
        #[arg(short, long, default_value_t = 1.0)]
        period: f64,

        /// Normal contact force.
        #[arg(short, long, default_value_t = 20.0)]
        normal_force: f64,
    },

    /// Print crate information.
    Info,
}

fn parse_model(s: &str) -> Result<ModelKind, String> {
    match s {
        "coulomb" => Ok(ModelKind::Coulomb),
        "classical" => Ok(ModelKind::Classical),
        "dynamic" => Ok(ModelKind::Dynamic),
        other => Err(format!(
            "unknown model '{other}' (expected coulomb, classical or dynamic)"
        )),
    }
}

// ---------------------------------------------------------------------------
// Mode implementations
// ---------------------------------------------------------------------------

fn load_config(
    path: Option<&PathBuf>,
    model: Option<ModelKind>,
) -> Result<FrictionConfig, ConfigError> {
    let mut config = match path {
        Some(path) => FrictionConfig::from_file(path)?,
        None => FrictionConfig::default(),
    };
    if let Some(model) = model {
        config.model = model;
    }
    Ok(config)
}

fn run_eval(config: &FrictionConfig, sample: &InputData) -> Result<(), FrictionError> {
    let mut model = config.build()?;
    let params = model.parameters();

    println!("{}\n", ParameterReport(&params));
    println!("{}\n", SampleReport(sample));

    let force = model.compute(sample)?;
    println!("friction force");
    println!("--------------");
    println!("{}: {force}", model.name());
    Ok(())
}

fn run_sweep(
    config: &FrictionConfig,
    from: f64,
    to: f64,
    steps: u32,
    normal_force: f64,
) -> Result<(), FrictionError> {
    let mut model = config.build()?;
    let steps = steps.max(2);
    let dv = (to - from) / f64::from(steps - 1);

    println!("velocity,force");
    for i in 0..steps {
        let velocity = dv.mul_add(f64::from(i), from);
        // Fresh history per point: the sweep is a steady-state curve.
        model.reset();
        let sample = InputData::at(0.0)
            .with_velocity(velocity)
            .with_normal_force(normal_force);
        trace_sample(&sample);
        let force = model.compute(&sample)?;
        println!("{velocity},{force}");
    }
    Ok(())
}

fn run_replay(
    config: &FrictionConfig,
    dt: f64,
    steps: u32,
    amplitude: f64,
    period: f64,
    normal_force: f64,
) -> Result<(), FrictionError> {
    let mut model = config.build()?;
    let omega = std::f64::consts::TAU / period;
    let mut position = 0.0;

    println!("time,velocity,regime,force");
    for i in 0..steps {
        let time = f64::from(i) * dt;
        let velocity = amplitude * (omega * time).sin();
        let sample = InputData::at(time)
            .with_velocity(velocity)
            .with_normal_force(normal_force)
            .with_positions(0.0, position);
        position += velocity * dt;

        trace_sample(&sample);
        let force = model.compute(&sample)?;
        let regime = match &model {
            FrictionModelType::Dynamic(m) => match m.regime() {
                Regime::Stuck => "stuck",
                Regime::Sliding => "sliding",
            },
            _ => "-",
        };
        println!("{time},{velocity},{regime},{force}");
    }
    Ok(())
}

fn run_info() {
    println!("slipstick v{}", env!("CARGO_PKG_VERSION"));
    println!("\nmodels: coulomb, classical, dynamic");
    println!("presets:");
    for name in presets::NAMES {
        println!("  {name}");
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Info);
    if matches!(command, Commands::Info) {
        run_info();
        return ExitCode::SUCCESS;
    }

    let config = match load_config(cli.config.as_ref(), cli.model) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let result = match command {
        Commands::Eval {
            velocity,
            normal_force,
            external_force,
            displacement,
            time,
        } => {
            let sample = InputData::at(time)
                .with_velocity(velocity)
                .with_normal_force(normal_force)
                .with_external_force(external_force)
                .with_displacement(displacement);
            run_eval(&config, &sample)
        }
        Commands::Sweep {
            from,
            to,
            steps,
            normal_force,
        } => run_sweep(&config, from, to, steps, normal_force),
        Commands::Replay {
            dt,
            steps,
            amplitude,
            period,
            normal_force,
        } => run_replay(&config, dt, steps, amplitude, period, normal_force),
        Commands::Info => {
            run_info();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
