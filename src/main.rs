mod cli;

use crate::cli::app::App;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use offline_launcher::settings::{MAX_MEMORY_GIB, MIN_MEMORY_GIB};
use offline_launcher::{LaunchOutcome, LaunchReport, Launcher, LauncherConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "offline-launcher", version)]
#[command(about = "Remembers a player name and memory allocation and starts the game client")]
struct Cli {
    /// Settings file (relative paths are resolved against the working directory)
    #[arg(long, env = "LAUNCHER_SETTINGS", global = true)]
    settings: Option<PathBuf>,

    /// Command template file instead of the bundled one
    #[arg(long, env = "LAUNCHER_TEMPLATE", global = true)]
    template: Option<PathBuf>,

    /// Game directory, substituted for %cd% [default: current directory]
    #[arg(long, global = true)]
    workdir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the client without the interactive form
    Launch(LaunchArgs),
    /// Print the command that would be started, without saving anything
    Render(LaunchArgs),
    /// Print the stored preferences
    Show {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct LaunchArgs {
    /// Player name [default: stored value]
    #[arg(long)]
    username: Option<String>,

    /// Memory allocation in GiB [default: stored value]
    #[arg(
        long,
        value_parser = clap::value_parser!(u32)
            .range(i64::from(MIN_MEMORY_GIB)..=i64::from(MAX_MEMORY_GIB))
    )]
    memory: Option<u32>,
}

fn main() -> ExitCode {
    init_logging();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("offline_launcher=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = build_config(&cli)?;
    let mut launcher = Launcher::open(config).context("Invalid launcher configuration")?;

    match cli.command {
        None => {
            let prefs = launcher.preferences()?;
            let request = App::new(&prefs).run().context("Terminal UI failed")?;
            match request {
                Some(request) => Ok(finish(launcher.launch(&request.username, request.memory_gib))),
                None => Ok(ExitCode::SUCCESS),
            }
        }
        Some(Command::Launch(args)) => {
            let (username, memory_gib) = resolve_args(&mut launcher, args)?;
            Ok(finish(launcher.launch(&username, memory_gib)))
        }
        Some(Command::Render(args)) => {
            let (username, memory_gib) = resolve_args(&mut launcher, args)?;
            let command = launcher.render(&username, memory_gib)?;
            println!("{}", command);
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Show { json }) => {
            let prefs = launcher.preferences()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&prefs)?);
            } else {
                println!("settings: {}", launcher.store().path().display());
                println!("username: {}", prefs.username);
                println!("memory:   {} GB", prefs.memory_gib);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_config(cli: &Cli) -> Result<LauncherConfig> {
    let mut config = match &cli.workdir {
        Some(dir) => LauncherConfig::new(dir),
        None => LauncherConfig::from_current_dir()?,
    };
    if let Some(path) = &cli.settings {
        config = config.settings_path(path);
    }
    if let Some(path) = &cli.template {
        config = config.template_file(path);
    }
    Ok(config)
}

/// Fill in omitted arguments from the stored preferences.
fn resolve_args(launcher: &mut Launcher, args: LaunchArgs) -> Result<(String, u32)> {
    let prefs = launcher.preferences()?;
    Ok((
        args.username.unwrap_or(prefs.username),
        args.memory.unwrap_or(prefs.memory_gib),
    ))
}

fn finish(report: LaunchReport) -> ExitCode {
    if !report.settings_saved {
        eprintln!("warning: preferences could not be saved");
    }
    match report.outcome {
        LaunchOutcome::Started => ExitCode::SUCCESS,
        LaunchOutcome::NotStarted(err) => {
            eprintln!("could not start the client: {}", err);
            ExitCode::FAILURE
        }
    }
}
