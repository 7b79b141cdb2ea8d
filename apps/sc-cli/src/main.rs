use clap::{Parser, Subcommand};
use sc_controls::{
    ControlError, ControllerBuilder, LineActuator, SignalController, TraceActuator, WorkerPhase,
};
use sc_core::{CoreError, Mode};
use sc_project::{ProjectError, StationConfig};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "sc-cli")]
#[command(about = "Signal controller CLI - drive a transmitter line in ON/OFF modes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a station file
    Validate {
        /// Path to the station YAML file
        config_path: PathBuf,
    },
    /// Toggle between OFF and ON on every Enter; `q` or EOF quits
    Run {
        /// Path to the station YAML file
        config_path: PathBuf,
        /// Log pulses instead of driving the configured line
        #[arg(long)]
        dry_run: bool,
    },
    /// Hold one mode for a fixed time, then stop
    Hold {
        /// Path to the station YAML file
        config_path: PathBuf,
        /// Mode to hold (on/off)
        #[arg(long, default_value = "on")]
        mode: Mode,
        /// How long to hold the mode, in seconds
        #[arg(long)]
        seconds: f64,
        /// Log pulses instead of driving the configured line
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Control(#[from] ControlError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Run {
            config_path,
            dry_run,
        } => cmd_run(&config_path, dry_run),
        Commands::Hold {
            config_path,
            mode,
            seconds,
            dry_run,
        } => cmd_hold(&config_path, mode, seconds, dry_run),
    }
}

fn cmd_validate(config_path: &Path) -> CliResult<()> {
    println!("Validating station: {}", config_path.display());
    let station = sc_project::load_yaml(config_path)?;
    let config = station.controller_config()?;
    println!("✓ Station is valid");
    println!(
        "  {} - on code {}, off code {}, ping every {:?} via {:?}",
        station.name, config.on_code, config.off_code, config.ping_interval, station.actuator
    );
    Ok(())
}

fn start_controller(
    config_path: &Path,
    dry_run: bool,
) -> CliResult<SignalController<Box<dyn LineActuator>>> {
    let station: StationConfig = sc_project::load_yaml(config_path)?;
    let config = station.controller_config()?;
    let actuator: Box<dyn LineActuator> = if dry_run {
        Box::new(TraceActuator::new(station.name.clone()))
    } else {
        station.build_actuator()?
    };
    let controller = ControllerBuilder::new(config)
        .thread_name(format!("signal-{}", station.name.replace('\0', "")))
        .spawn(actuator)?;
    info!(
        station = %station.name,
        dry_run,
        interval_ms = controller.config().ping_interval.as_millis() as u64,
        "controller started"
    );
    Ok(controller)
}

fn cmd_run(config_path: &Path, dry_run: bool) -> CliResult<()> {
    let controller = start_controller(config_path, dry_run)?;
    let mut mode = Mode::Off;
    announce(mode)?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().eq_ignore_ascii_case("q") {
            break;
        }
        mode = mode.toggled();
        controller.request_mode(mode)?;
        announce(mode)?;
    }

    println!("Stopping...");
    controller.stop()?;
    print_counts(&controller);
    Ok(())
}

fn cmd_hold(config_path: &Path, mode: Mode, seconds: f64, dry_run: bool) -> CliResult<()> {
    let hold = sc_core::interval_from_secs(seconds)?;
    let controller = start_controller(config_path, dry_run)?;
    controller.request_mode(mode)?;

    let phase = if mode.is_on() {
        WorkerPhase::RunningOn
    } else {
        WorkerPhase::RunningOff
    };
    if !controller.wait_for_phase(phase, Duration::from_secs(1)) {
        tracing::warn!(%mode, "worker did not report the requested mode within 1s");
    }
    announce(mode)?;
    std::thread::sleep(hold);

    controller.stop()?;
    print_counts(&controller);
    Ok(())
}

fn announce(mode: Mode) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    writeln!(
        stdout,
        ">>> Sending {} signal <<<",
        mode.to_string().to_uppercase()
    )?;
    stdout.flush()?;
    Ok(())
}

fn print_counts<A: LineActuator>(controller: &SignalController<A>) {
    let counts = controller.stats();
    println!(
        "✓ Stopped: {} on pulses, {} off pulses, {} failures",
        counts.on_pulses, counts.off_pulses, counts.failures
    );
}
