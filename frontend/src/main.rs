use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use retroport_core::input::controller::ControllerClass;
use retroport_core::session::{Session, SessionConfig};
use retroport_machines::registry;
use thiserror::Error;

use crate::config::{Config, ConfigError, Resolution, Standard};

mod config;
mod emulator;
mod host;
mod input;
mod overlay;
mod video;

/// Amiga input and video glue with an SDL2 host.
#[derive(Parser, Debug, Clone)]
#[command(name = "retroport", version)]
struct Args {
    /// Machine to run (see --list); defaults to `machine` in the config.
    machine: Option<String>,

    /// Configuration file [default: <config dir>/retroport/retroport.toml].
    #[arg(long)]
    config: Option<PathBuf>,

    /// Window scale factor.
    #[arg(long)]
    scale: Option<u32>,

    /// Video standard at startup.
    #[arg(long, value_enum)]
    standard: Option<Standard>,

    /// Start in low resolution.
    #[arg(long)]
    lores: bool,

    /// Whether refresh-rate changes are pushed to the host.
    #[arg(long, value_name = "BOOL")]
    allow_hz_change: Option<bool>,

    /// Controller class for a port, e.g. `--port 1=cd32`. Repeatable.
    #[arg(long = "port", value_name = "N=CLASS", value_parser = parse_port)]
    ports: Vec<(usize, String)>,

    /// Hide the port status line.
    #[arg(long)]
    no_status: bool,

    /// List available machines and controller classes, then exit.
    #[arg(long)]
    list: bool,
}

/// Parse `N=CLASS` with N a 1-based port number.
fn parse_port(value: &str) -> Result<(usize, String), String> {
    let (port, class) = value
        .split_once('=')
        .ok_or_else(|| format!("expected N=CLASS, got {value:?}"))?;
    let port: usize = port
        .trim()
        .parse()
        .map_err(|_| format!("invalid port number {port:?}"))?;
    if !(1..=4).contains(&port) {
        return Err(format!("port must be 1-4, got {port}"));
    }
    Ok((port - 1, class.trim().to_string()))
}

impl Args {
    /// Apply command-line overrides on top of the file configuration.
    fn apply(&self, config: &mut Config) {
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        if let Some(standard) = self.standard {
            config.video.standard = standard;
        }
        if self.lores {
            config.video.resolution = Resolution::Lores;
        }
        if let Some(allow) = self.allow_hz_change {
            config.video.allow_hz_change = allow;
        }
        for (port, class) in &self.ports {
            if let Some(slot) = config.ports.get_mut(*port) {
                *slot = class.clone();
            }
        }
    }

    /// Read the configuration file and apply the overrides.
    fn load_config(&self) -> Result<Config, ConfigError> {
        let mut config = config::load(self.config.as_deref())?;
        self.apply(&mut config);
        Ok(config)
    }
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("unknown machine {name:?} (available: {available})")]
    UnknownMachine { name: String, available: String },
    #[error("no machine given (available: {0})")]
    NoMachine(String),
}

fn machine_names() -> String {
    let names: Vec<_> = registry::all().iter().map(|e| e.name).collect();
    names.join(", ")
}

fn list() {
    println!("Machines:");
    for entry in registry::all() {
        println!("  {:<16} {}", entry.name, entry.description);
    }
    println!("Controller classes:");
    for class in ControllerClass::ALL {
        println!("  {:<16} {}", class.name(), class.description());
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    let config = args.load_config()?;
    let session_config: SessionConfig = config.session_config()?;

    let name = args
        .machine
        .clone()
        .or(config.machine.clone())
        .ok_or_else(|| AppError::NoMachine(machine_names()))?;
    let entry = registry::find(&name).ok_or_else(|| AppError::UnknownMachine {
        name: name.clone(),
        available: machine_names(),
    })?;

    info!("starting {} ({})", entry.name, entry.description);
    let mut machine = (entry.create)();
    let mut session = Session::new(&session_config);

    let options = emulator::RunOptions {
        scale: config.scale,
        show_status: !args.no_status,
    };
    emulator::run(
        &mut session,
        machine.as_mut(),
        input::default_key_map(),
        &options,
        || {
            let config = args.load_config()?;
            config.session_config()
        },
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if args.list {
        list();
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
