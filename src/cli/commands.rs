//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::{HierarchyService, DEFAULT_TREE_LABEL};
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, OutputFormat, Settings};
use crate::domain::DelimitedPath;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let dir = local_dir(cli)?;
    let settings = load_settings(cli, &dir)?;
    let service = HierarchyService::new(settings);

    match command {
        Commands::List { file, format } => {
            let format = format.unwrap_or(service.settings().format);
            _render_file(&service, file.as_deref(), format)
        }
        Commands::Tree { file } => _render_file(&service, file.as_deref(), OutputFormat::Tree),
        Commands::Leaves { file } => {
            _render_file(&service, file.as_deref(), OutputFormat::Leaves)
        }
        Commands::Scan { dir, ext, format } => {
            let format = format.unwrap_or(service.settings().format);
            _scan(&service, dir, ext.as_deref(), format)
        }
        Commands::Config { command } => _config(&service, command, &dir),
        Commands::Completion { .. } => Ok(()),
    }
}

fn local_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.workdir {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir()
            .with_path_context("resolve working directory", Path::new("."))
            .map_err(CliError::from),
    }
}

fn load_settings(cli: &Cli, dir: &Path) -> CliResult<Settings> {
    let mut settings = Settings::load(Some(dir))?;
    if let Some(delimiter) = &cli.delimiter {
        if delimiter.is_empty() {
            return Err(CliError::InvalidArgs(
                "--delimiter must not be empty".to_string(),
            ));
        }
        settings.delimiter = delimiter.clone();
    }
    debug!(?settings, "effective settings");
    Ok(settings)
}

fn read_input(service: &HierarchyService, file: Option<&Path>) -> ApplicationResult<Vec<DelimitedPath>> {
    match file {
        None => service.read_stdin(),
        Some(path) if path == Path::new("-") => service.read_stdin(),
        Some(path) => service.read_file(path),
    }
}

#[instrument(skip(service))]
fn _render_file(service: &HierarchyService, file: Option<&Path>, format: OutputFormat) -> CliResult<()> {
    let paths = read_input(service, file)?;
    for line in service.render(&paths, format, DEFAULT_TREE_LABEL)? {
        output::info(&line);
    }
    Ok(())
}

#[instrument(skip(service))]
fn _scan(service: &HierarchyService, dir: &Path, ext: Option<&str>, format: OutputFormat) -> CliResult<()> {
    let paths = service.scan_directory(dir, ext)?;
    let label = dir.display().to_string();
    for line in service.render(&paths, format, &label)? {
        output::info(&line);
    }
    Ok(())
}

fn _config(service: &HierarchyService, command: &ConfigCommands, dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&service.settings().to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<unavailable>".to_string());
            output::action("global", &global);
            output::action("local", &local_config_path(dir).display());
            Ok(())
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| ApplicationError::Config {
                    message: "cannot determine global config directory".to_string(),
                })?
            } else {
                local_config_path(dir)
            };
            if path.exists() {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).with_path_context("create config dir", parent)?;
            }
            std::fs::write(&path, Settings::template()).with_path_context("write config", &path)?;
            output::success(&format!("created {}", path.display()));
            Ok(())
        }
    }
}
