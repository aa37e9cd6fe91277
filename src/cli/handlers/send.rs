//! Notification sending handler

use super::super::{CliContext, SendArgs};
use anyhow::{Context, Result};
use bark_client::config::{Config, DefaultsConfig};
use bark_client::{BarkClient, ClientConfig, NotificationRequest, TransportStrategy};
use std::time::Duration;
use tracing::debug;

/// Handler for `bark send`
pub struct SendHandler<'a> {
    context: &'a CliContext,
}

impl<'a> SendHandler<'a> {
    pub fn new(context: &'a CliContext) -> Self {
        Self { context }
    }

    pub async fn handle_send(&self, args: SendArgs) -> Result<()> {
        let config = self.context.config_manager.config();

        let client_config = client_config(&args, config);
        let request = build_request(&args, &config.defaults);
        let strategy = if args.post {
            TransportStrategy::Post
        } else {
            TransportStrategy::Get
        };

        let client = BarkClient::new(client_config).context("Failed to create Bark client")?;
        debug!(?client, %strategy, "client ready");

        if args.dry_run {
            let prepared = client
                .prepare(strategy, &request)
                .context("Notification is not valid")?;
            println!("Dry run - would send {} {}", prepared.method, prepared.url);
            if let Some(body) = &prepared.json_body {
                println!("{body}");
            }
            return Ok(());
        }

        let response = client
            .send_with(strategy, &request)
            .await
            .context("Failed to send notification")?;

        println!("Notification sent: {} {}", response.code, response.message);
        if let Some(handled_at) = response.handled_at() {
            println!("Handled at: {}", handled_at.to_rfc3339());
        }

        Ok(())
    }
}

/// Command-line values win over the configuration file
fn client_config(args: &SendArgs, config: &Config) -> ClientConfig {
    let key = args
        .key
        .clone()
        .filter(|k| !k.is_empty())
        .unwrap_or_else(|| config.bark.key.clone());

    let mut client_config = ClientConfig::from(&config.bark);
    client_config.key = key;

    if let Some(server) = &args.server {
        client_config = client_config.with_server_url(server.clone());
    }
    if let Some(timeout) = args.timeout {
        client_config = client_config.with_timeout(Duration::from_secs(timeout));
    }

    client_config
}

/// Build the request, filling unset fields from the configured defaults
fn build_request(args: &SendArgs, defaults: &DefaultsConfig) -> NotificationRequest {
    let pick = |arg: &Option<String>, default: &Option<String>| {
        arg.clone().or_else(|| default.clone()).unwrap_or_default()
    };

    NotificationRequest::builder(args.body.clone())
        .title(args.title.clone().unwrap_or_default())
        .subtitle(args.subtitle.clone().unwrap_or_default())
        .url(args.url.clone().unwrap_or_default())
        .group(pick(&args.group, &defaults.group))
        .icon(pick(&args.icon, &defaults.icon))
        .sound(pick(&args.sound, &defaults.sound))
        .call(args.call)
        .level(pick(&args.level, &defaults.level))
        .archive(args.archive)
        .copy(args.copy.clone().unwrap_or_default())
        .ciphertext(args.ciphertext.clone().unwrap_or_default())
        .build()
}
