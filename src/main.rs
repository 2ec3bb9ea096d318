// src/main.rs
// BatchPatch - Generates distribution-ready patches for batch media releases

use clap::{Parser, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

use batchpatch::config::{
    default_output_folder, default_xdelta_location, DiffVerbosity, PatchConfig,
};
use batchpatch::infrastructure::list_file_names;
use batchpatch::integrations::XdeltaClient;
use batchpatch::services::script_service::write_windows_script;
use batchpatch::services::{PairingService, DEFAULT_PATCH_NAME_TEMPLATE};
use batchpatch::{AppError, AppResult};

#[derive(Parser)]
#[command(
    name = "batchpatch",
    version,
    about = "Generates distribution ready patches for anime batch releases"
)]
struct Cli {
    /// The path to the folder with the old files
    #[arg(short, long, value_name = "directory")]
    old: PathBuf,

    /// The path to the folder with the new files
    #[arg(short, long, value_name = "directory")]
    new: PathBuf,

    /// The path where the output should be written to; defaults to a date
    /// stamped subfolder under the current working directory
    #[arg(short, long, value_name = "directory")]
    target: Option<PathBuf>,

    /// The desired verbosity level; messages with the same or higher level
    /// than the chosen one are displayed
    #[arg(short, long, value_name = "level", default_value = "notice")]
    loglevel: LogLevelArg,

    /// An alternative location for the xdelta3 executable to use instead of
    /// the program directory
    #[arg(short, long, value_name = "path")]
    xdelta: Option<PathBuf>,

    /// Naming template for the generated patch files
    #[arg(long, value_name = "template", default_value = DEFAULT_PATCH_NAME_TEMPLATE)]
    template: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevelArg {
    Debug,
    Notice,
    Warning,
    Error,
    Silent,
}

impl LogLevelArg {
    fn filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Notice => log::LevelFilter::Info,
            LogLevelArg::Warning => log::LevelFilter::Warn,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Silent => log::LevelFilter::Off,
        }
    }

    /// The diff tool mirrors the console verbosity: chatty at notice and
    /// below, quiet when everything else is silenced too
    fn diff_verbosity(self) -> DiffVerbosity {
        match self {
            LogLevelArg::Debug | LogLevelArg::Notice => DiffVerbosity::Verbose,
            LogLevelArg::Warning | LogLevelArg::Error => DiffVerbosity::Normal,
            LogLevelArg::Silent => DiffVerbosity::Quiet,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.loglevel.filter())
        .format_timestamp(None)
        .init();

    // Printed even at the quieter levels, but not on silent, and without
    // the log prefix
    if cli.loglevel != LogLevelArg::Silent {
        println!(
            "{} version {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        );
    }

    let config = PatchConfig {
        patch_name_template: cli.template.clone(),
        xdelta_location: cli
            .xdelta
            .clone()
            .unwrap_or_else(default_xdelta_location),
        diff_verbosity: cli.loglevel.diff_verbosity(),
    };
    let target_dir = cli.target.clone().unwrap_or_else(default_output_folder);

    run(&cli, &config, &target_dir)?;
    Ok(())
}

fn run(cli: &Cli, config: &PatchConfig, target_dir: &Path) -> AppResult<()> {
    check_directories(&cli.old, &cli.new, target_dir)?;

    let xdelta = XdeltaClient::new(config.xdelta_location.clone(), config.diff_verbosity);
    xdelta.verify()?;

    let old_listing = list_file_names(&cli.old)?;
    let new_listing = list_file_names(&cli.new)?;

    log::debug!("Identifying potential file pairs for patching.");
    let pairing = PairingService::new(config);
    let pairs = pairing.resolve(&cli.old, &old_listing, &cli.new, &new_listing)?;

    if pairs.is_empty() {
        log::info!("No files to generate patches for.");
        return Ok(());
    }

    log::debug!("Generating patches for {} file pairs.", pairs.len());
    for pair in &pairs {
        xdelta.create_patch(pair, target_dir)?;
    }

    write_windows_script(target_dir, &pairs, &xdelta.executable_name())?;
    xdelta.copy_to(target_dir)?;

    log::info!("Done.");
    Ok(())
}

fn check_directories(old: &Path, new: &Path, target: &Path) -> AppResult<()> {
    log::debug!("Checking prerequisites.");

    for dir in [old, new] {
        if !dir.is_dir() {
            return Err(AppError::Config(format!(
                "'{}' is not a valid directory",
                dir.display()
            )));
        }
    }

    if target.exists() {
        if !target.is_dir() {
            return Err(AppError::Config(format!(
                "'{}' exists and is not a directory",
                target.display()
            )));
        }
    } else {
        log::info!("Creating output directory '{}'.", target.display());
        fs::create_dir_all(target)?;
    }

    Ok(())
}
