//! CLI Context for dependency injection and shared state
//!
//! This module provides the CliContext abstraction that centralizes
//! configuration loading and logging setup for CLI handlers.

use anyhow::{Context, Result};
use bark_client::config::ConfigManager;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// CLI execution context containing shared dependencies and configuration
#[derive(Clone)]
pub struct CliContext {
    pub config_path: Option<PathBuf>,
    pub verbose: bool,
    pub config_manager: Arc<ConfigManager>,
}

impl CliContext {
    /// Create a new CLI context, loading configuration from `config_path` or the default location
    pub fn new(config_path: Option<PathBuf>, verbose: bool) -> Result<Self> {
        let config_manager = Arc::new(
            ConfigManager::load(config_path.clone()).context("Failed to load configuration")?,
        );

        Ok(Self {
            config_path,
            verbose,
            config_manager,
        })
    }

    /// Initialize logging based on verbosity and configuration.
    ///
    /// Console output goes to stderr so command output on stdout stays clean.
    /// When `logging.log_path` is set, records are also appended to that file;
    /// the returned guard must be held until exit to flush it.
    pub fn init_logging(&self) -> Result<Option<WorkerGuard>> {
        let logging = &self.config_manager.config().logging;
        let log_level = if self.verbose {
            "debug"
        } else {
            logging.log_level.as_str()
        };

        let env_filter = EnvFilter::from_default_env().add_directive(
            log_level
                .parse()
                .unwrap_or_else(|_| tracing::Level::WARN.into()),
        );

        let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

        let (file_layer, guard) = match &logging.log_path {
            Some(log_path) => {
                let log_path = PathBuf::from(log_path);
                let log_dir = log_path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or_else(|| Path::new("."));
                std::fs::create_dir_all(log_dir).context("Failed to create log directory")?;

                let file_appender = tracing_appender::rolling::never(
                    log_dir,
                    log_path.file_name().unwrap_or_else(|| OsStr::new("bark.log")),
                );
                let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
                let layer = tracing_subscriber::fmt::layer()
                    .with_writer(file_writer)
                    .with_ansi(false);
                (Some(layer), Some(guard))
            }
            None => (None, None),
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()
            .context("Failed to initialize logging")?;

        if self.verbose {
            tracing::debug!("Verbose logging enabled");
            tracing::debug!("Config path: {:?}", self.config_manager.config_path());
        }

        Ok(guard)
    }
}
