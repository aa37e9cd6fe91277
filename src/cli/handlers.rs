//! Command handlers for all CLI operations
//!
//! This module routes parsed commands to their handlers, keeping CLI parsing
//! separate from the work each command does.

pub mod config;
pub mod send;

use super::{CliContext, Commands};
use anyhow::Result;

use config::ConfigHandler;
use send::SendHandler;

/// Coordinates all command handling operations with dependency injection via CliContext
pub struct CommandHandler {
    context: CliContext,
}

impl CommandHandler {
    pub fn new(context: CliContext) -> Self {
        Self { context }
    }

    /// Route commands to their appropriate handlers
    pub async fn handle_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Send(args) => SendHandler::new(&self.context).handle_send(args).await,
            Commands::Init { force } => ConfigHandler::new(&self.context).handle_init(force),
            Commands::Config { action } => ConfigHandler::new(&self.context).handle_config(action),
        }
    }
}
