use std::sync::Arc;

use a2w_gateway::RelayServerConfig;
use a2w_segment::{SegmentHeader, SegmentLimits};
use a2w_templates::TemplateCatalog;
use a2w_wecom::WecomOutboundConfig;
use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::{Cli, CliLogLevel};

pub fn init_tracing(level: CliLogLevel) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from(level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

/// Loads the template catalog and assembles the immutable server config.
pub fn build_relay_config(cli: &Cli) -> Result<RelayServerConfig> {
    let catalog = TemplateCatalog::load_dir(&cli.template).with_context(|| {
        format!(
            "failed to load notification templates from {}",
            cli.template.display()
        )
    })?;
    Ok(RelayServerConfig {
        bind: cli.addr.clone(),
        catalog: Arc::new(catalog),
        outbound: WecomOutboundConfig {
            webhook_base: cli.webhook_base.clone(),
            http_timeout_ms: cli.http_timeout_ms,
        },
        limits: SegmentLimits::new(
            cli.max_message_bytes,
            SegmentHeader::new(cli.segment_header.clone()),
        ),
    })
}
