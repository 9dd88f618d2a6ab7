//! CLI entry point for drive mounts (dmounts).

use std::error::Error;
use std::process::ExitCode;

use drive_mounts::cli::{Cli, Command};
use drive_mounts::config::{resolve_config, MountsConfig};
use drive_mounts::drive::drive_index_to_letter;
use drive_mounts::manager::{get_mounts_mapping, MountsManager};
use drive_mounts::utils::{expand_home, init_logging};
use drive_mounts::MountsError;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    let debug = init_logging(cli.debug);

    let config = match resolve_config(cli.explicit_settings_path()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Error loading config from {:?}: {}",
                cli.get_settings_path(),
                e
            );
            return ExitCode::from(1);
        }
    };

    match run(cli.command, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if debug {
                let mut source = e.source();
                while let Some(cause) = source {
                    eprintln!("  caused by: {}", cause);
                    source = cause.source();
                }
            }
            ExitCode::from(1)
        }
    }
}

fn run(command: Command, config: MountsConfig) -> Result<(), MountsError> {
    match command {
        Command::Init => {
            if MountsManager::initialize_mounts_file(&config)? {
                println!("Created {}", config.mounts_file().display());
            } else {
                println!("{} already exists", config.mounts_file().display());
            }
        }
        Command::List { json } => {
            let entries = MountsManager::load(config)?.entries();
            if json {
                println!("{}", to_json(&entries)?);
            } else {
                for entry in entries {
                    println!("{} {} ({})", entry.drive, entry.local_path, entry.identifier);
                }
            }
        }
        Command::Set { paths } => {
            let manager = MountsManager::load(config)?;
            let paths: Vec<String> = paths.iter().map(|p| expand_home(p)).collect();
            manager.set_mounts(paths.as_slice())?;
            for entry in manager.entries() {
                println!("{} {}", entry.drive, entry.local_path);
            }
        }
        Command::Resolve { sandbox_path } => {
            let manager = MountsManager::load(config)?;
            println!("{}", manager.convert_to_local_path(&sandbox_path)?.display());
        }
        Command::Live { json } => {
            let mapping = get_mounts_mapping(&config.live_mounts_dir())?;
            if json {
                println!("{}", to_json(&mapping)?);
            } else {
                for (real_path, drive) in mapping {
                    println!("{} {}", drive, real_path.display());
                }
            }
        }
        Command::Letter { index } => {
            println!("{}", drive_index_to_letter(index)?);
        }
    }

    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, MountsError> {
    Ok(serde_json::to_string_pretty(value).map_err(std::io::Error::from)?)
}
