//! Command definitions and structures for the CLI
//!
//! This module contains all the clap-based command line argument definitions,
//! including the main CLI structure and all subcommands.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure
#[derive(Parser)]
#[command(name = "bark")]
#[command(about = "Send push notifications through a Bark gateway")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the configuration file
    #[arg(long, global = true, env = "BARK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Send a notification
    Send(SendArgs),

    /// Write a default configuration file
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Configure settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments for `bark send`
#[derive(Args, Debug, Clone, Default)]
pub struct SendArgs {
    /// Notification body
    pub body: String,

    /// Notification title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Notification subtitle (only used together with a title in GET mode)
    #[arg(short, long)]
    pub subtitle: Option<String>,

    /// URL opened when the notification is tapped
    #[arg(short, long)]
    pub url: Option<String>,

    /// Group the notification is filed under
    #[arg(short, long)]
    pub group: Option<String>,

    /// Custom icon URL
    #[arg(long)]
    pub icon: Option<String>,

    /// Notification sound
    #[arg(long)]
    pub sound: Option<String>,

    /// Repeat the sound like an incoming call
    #[arg(long)]
    pub call: bool,

    /// Level: active, timeSensitive, passive or critical
    #[arg(short, long)]
    pub level: Option<String>,

    /// Archive the notification on the device
    #[arg(long)]
    pub archive: bool,

    /// Text copied to the clipboard when the notification is opened
    #[arg(long)]
    pub copy: Option<String>,

    /// Pre-encrypted notification payload
    #[arg(long)]
    pub ciphertext: Option<String>,

    /// Send as a JSON POST instead of a GET
    #[arg(long)]
    pub post: bool,

    /// Validate and print the request without sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Device key (overrides the configuration file)
    #[arg(short, long, env = "BARK_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Gateway base URL (overrides the configuration file)
    #[arg(long, env = "BARK_SERVER")]
    pub server: Option<String>,

    /// Request timeout in seconds (at least 1)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}

/// Configuration management actions
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Set configuration value
    Set {
        /// Configuration key (e.g., bark.server_url)
        key: String,
        /// Value to set (empty clears optional values)
        value: String,
    },

    /// Get configuration value
    Get {
        /// Configuration key
        key: String,
    },
}
