//! Configuration management handler
//!
//! Handles `bark init` and the `bark config` subcommands.

use super::super::{CliContext, ConfigAction};
use anyhow::{Context, Result};
use bark_client::config::ConfigManager;

/// Handler for configuration operations
pub struct ConfigHandler<'a> {
    context: &'a CliContext,
}

impl<'a> ConfigHandler<'a> {
    pub fn new(context: &'a CliContext) -> Self {
        Self { context }
    }

    /// Handle configuration initialization
    pub fn handle_init(&self, force: bool) -> Result<()> {
        let config_path = self.context.config_manager.config_path().to_path_buf();

        if config_path.exists() && !force {
            println!("Configuration already initialized at: {}", config_path.display());
            println!("Use --force to overwrite");
            return Ok(());
        }

        ConfigManager::init(Some(config_path.clone()), force)
            .context("Failed to initialize configuration")?;
        println!("Configuration initialized successfully at: {}", config_path.display());
        println!("Set your device key with: bark config set bark.key <KEY>");

        Ok(())
    }

    /// Handle configuration management
    pub fn handle_config(&self, action: ConfigAction) -> Result<()> {
        let config_manager = &self.context.config_manager;

        match action {
            ConfigAction::Show => {
                println!("# {}", config_manager.config_path().display());
                println!("{}", toml::to_string_pretty(config_manager.config())?);
            }
            ConfigAction::Path => {
                println!("{}", config_manager.config_path().display());
            }
            ConfigAction::Set { key, value } => {
                // Reload so the write starts from what is on disk
                let mut config_manager =
                    ConfigManager::load(Some(config_manager.config_path().to_path_buf()))?;
                config_manager.config_mut().set_value(&key, &value)?;
                config_manager.save()?;
                println!("Configuration updated: {key} = {value}");
            }
            ConfigAction::Get { key } => {
                let value = config_manager.config().get_value(&key)?;
                println!("{value}");
            }
        }

        Ok(())
    }
}
