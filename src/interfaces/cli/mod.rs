//! CLI interface module
//!
//! 直接访问存储，不需要服务器在运行。

mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands};
use crate::runtime::lifetime::startup::prepare_cli_storage;

pub use commands::{config_generate, embed_url, list_owner, owner_metrics, remove_link};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::SmartlinkError> for CliError {
    fn from(err: crate::errors::SmartlinkError) -> Self {
        match err {
            crate::errors::SmartlinkError::DateParse(msg)
            | crate::errors::SmartlinkError::Validation(msg) => CliError::ParseError(msg),
            crate::errors::SmartlinkError::NotFound(msg) => CliError::CommandError(msg),
            other => CliError::StorageError(other.to_string()),
        }
    }
}

/// Run a CLI command from clap-parsed input
///
/// `Serve` 由 main 处理。
pub async fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    // 不需要数据库的命令
    match cmd {
        Commands::Embed { url } => return embed_url(&url),
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => return config_generate(output_path, force),
        Commands::Serve => {
            return Err(CliError::CommandError(
                "serve is handled by the server runtime".to_string(),
            ));
        }
        _ => {}
    }

    let storage = prepare_cli_storage()
        .await
        .map_err(|e| CliError::StorageError(format!("{:#}", e)))?;

    match cmd {
        Commands::List { owner } => list_owner(storage, &owner).await,
        Commands::Remove { id } => remove_link(storage, &id).await,
        Commands::Metrics { owner, since } => {
            owner_metrics(storage, &owner, since.as_deref()).await
        }
        Commands::Serve | Commands::Embed { .. } | Commands::Config { .. } => {
            unreachable!("handled above")
        }
    }
}
