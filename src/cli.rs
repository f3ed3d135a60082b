//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// smartlink - smart link and pre-save pages for musicians
#[derive(Parser)]
#[command(name = "smartlink")]
#[command(version)]
#[command(about = "Smart link and pre-save pages for musicians", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default when no command is given)
    Serve,

    /// List smart links and presaves of an owner
    List {
        /// Owner (profile) id
        #[arg(long)]
        owner: String,
    },

    /// Remove a smart link by id
    Remove {
        /// Smart link id
        id: String,
    },

    /// Resolve the Spotify embed URL for a track, album or playlist link
    Embed {
        /// Spotify URL
        url: String,
    },

    /// Show view / click metrics for an owner
    Metrics {
        /// Owner (profile) id
        #[arg(long)]
        owner: String,

        /// Window start (RFC3339 or relative like "7d", "24h", "1M")
        #[arg(long)]
        since: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.toml)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_means_serve() {
        let cli = Cli::try_parse_from(["smartlink"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_metrics_args() {
        let cli =
            Cli::try_parse_from(["smartlink", "metrics", "--owner", "o1", "--since", "7d"])
                .unwrap();
        match cli.command {
            Some(Commands::Metrics { owner, since }) => {
                assert_eq!(owner, "o1");
                assert_eq!(since.as_deref(), Some("7d"));
            }
            _ => panic!("expected metrics command"),
        }
    }

    #[test]
    fn test_list_requires_owner() {
        assert!(Cli::try_parse_from(["smartlink", "list"]).is_err());
    }

    #[test]
    fn test_config_generate_path() {
        let cli = Cli::try_parse_from(["smartlink", "config", "generate", "out.toml"]).unwrap();
        match cli.command {
            Some(Commands::Config {
                action: ConfigCommands::Generate { output_path, force },
            }) => {
                assert_eq!(output_path.as_deref(), Some("out.toml"));
                assert!(!force);
            }
            _ => panic!("expected config generate"),
        }
    }
}
