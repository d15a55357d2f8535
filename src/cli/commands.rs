//! CLI commands and argument parsing
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, their arguments and their execution.

use crate::config::{
    get_config_path, init_default_config, ConfigLoader, JsfProperties, PROPERTY_PREFIX,
};
use crate::error::{InitParamsError, Result};
use crate::export::{
    describe_schema, ExportOptions, ParameterExporter, ParameterSet, ParameterSink,
};
use crate::utils::format::{env_var_name, OutputFormat, TableFormatter};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "initparams")]
#[command(about = "Export bound configuration properties as context init-parameters")]
#[command(version, author)]
pub struct Cli {
    /// Configuration file (toml, yaml or json)
    #[arg(long, short, global = true, env = "INITPARAMS_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Skip the user configuration file
    #[arg(long, global = true)]
    pub no_user_config: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bind configuration and print the exported parameters
    Export {
        /// Export empty strings instead of treating them as unset
        #[arg(long)]
        keep_empty: bool,
        /// Write the output to a file instead of stdout
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// List every property with its export key, type and value
    Describe {
        /// Show bound values instead of built-in defaults
        #[arg(long)]
        current: bool,
    },
    /// Run a command with the exported parameters in its environment
    Exec {
        /// Export empty strings instead of treating them as unset
        #[arg(long)]
        keep_empty: bool,
        /// Rename keys to portable variable names (primefaces.THEME -> PRIMEFACES_THEME)
        #[arg(long)]
        env_names: bool,
        /// Command and arguments
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
    /// Write the default configuration file
    Init {
        /// Target path (defaults to the user configuration file)
        #[arg(long, value_name = "FILE")]
        path: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the bound configuration tree
    Show,
}

impl Cli {
    /// Configuration loader for the global options
    pub fn loader(&self) -> ConfigLoader {
        let mut loader = if self.no_user_config {
            ConfigLoader::isolated()
        } else {
            ConfigLoader::new()
        };
        if let Some(path) = &self.config {
            loader = loader.with_config_file(path);
        }
        loader
    }

    /// Run the command and return the process exit code
    pub async fn execute(self) -> Result<i32> {
        let loader = self.loader();
        let formatter = TableFormatter::new(self.format, self.no_color);

        match self.command {
            Commands::Export { keep_empty, output } => {
                execute_export(&loader, &formatter, keep_empty, output).await?;
                Ok(0)
            }
            Commands::Describe { current } => {
                execute_describe(&loader, &formatter, current).await?;
                Ok(0)
            }
            Commands::Exec {
                keep_empty,
                env_names,
                command,
            } => execute_exec(&loader, keep_empty, env_names, command).await,
            Commands::Init { path, force } => {
                execute_init(path, force).await?;
                Ok(0)
            }
            Commands::Show => {
                let properties = loader.load_no_validation().await?;
                println!("{}", formatter.format_properties(&properties)?);
                Ok(0)
            }
        }
    }
}

fn exporter(keep_empty: bool) -> ParameterExporter {
    ParameterExporter::with_options(ExportOptions {
        empty_is_unset: !keep_empty,
    })
}

/// Bind and export in one step
pub async fn export_parameters(loader: &ConfigLoader, keep_empty: bool) -> Result<ParameterSet> {
    let properties = loader.load().await?;
    exporter(keep_empty).export(&properties)
}

async fn execute_export(
    loader: &ConfigLoader,
    formatter: &TableFormatter,
    keep_empty: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let parameters = export_parameters(loader, keep_empty).await?;
    let rendered = formatter.format_parameters(&parameters)?;

    match output {
        Some(path) => {
            tokio::fs::write(&path, format!("{}\n", rendered)).await?;
            info!(
                "Wrote {} parameter(s) to {}",
                parameters.len(),
                path.display()
            );
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

async fn execute_describe(
    loader: &ConfigLoader,
    formatter: &TableFormatter,
    current: bool,
) -> Result<()> {
    let properties = if current {
        loader.load().await?
    } else {
        JsfProperties::default()
    };

    let entries = describe_schema(&properties, PROPERTY_PREFIX)?;
    println!("{}", formatter.format_schema(&entries)?);
    Ok(())
}

/// Sets parameters on a child process under portable variable names
struct EnvNameSink<'a> {
    command: &'a mut std::process::Command,
}

impl ParameterSink for EnvNameSink<'_> {
    fn set_parameter(&mut self, key: &str, value: &str) -> bool {
        self.command.env(env_var_name(key), value);
        true
    }
}

async fn execute_exec(
    loader: &ConfigLoader,
    keep_empty: bool,
    env_names: bool,
    command: Vec<String>,
) -> Result<i32> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| InitParamsError::invalid_argument("No command given"))?;

    let parameters = export_parameters(loader, keep_empty).await?;

    let mut child = std::process::Command::new(program);
    child.args(args);
    let report = if env_names {
        parameters.install_into(&mut EnvNameSink {
            command: &mut child,
        })
    } else {
        parameters.install_into(&mut child)
    };
    debug!(
        "Installed {} parameter(s) into the environment of '{}'",
        report.installed.len(),
        program
    );

    let status = tokio::process::Command::from(child).status().await?;
    Ok(status.code().unwrap_or(1))
}

async fn execute_init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => get_config_path()?,
    };

    if init_default_config(&path, force).await? {
        println!("Wrote default configuration to {}", path.display());
    } else {
        println!(
            "Configuration already exists at {} (use --force to overwrite)",
            path.display()
        );
    }
    Ok(())
}
