use std::path::PathBuf;

use a2w_segment::{DEFAULT_SEGMENT_HEADER_TEMPLATE, MARKDOWN_MAX_BYTES};
use a2w_wecom::WECOM_WEBHOOK_BASE;
use clap::Parser;

use crate::CliLogLevel;

fn parse_positive_usize(value: &str) -> Result<usize, String> {
    let parsed = value
        .parse::<usize>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

#[derive(Debug, Parser)]
#[command(
    name = "a2w",
    about = "Relay Prometheus Alertmanager webhooks to WeCom group bots as markdown",
    version
)]
/// Public struct `Cli` used across a2w components.
pub struct Cli {
    #[arg(
        long = "log-level",
        env = "A2W_LOG_LEVEL",
        value_enum,
        default_value_t = CliLogLevel::Info,
        help = "Default log verbosity; RUST_LOG directives take precedence"
    )]
    pub log_level: CliLogLevel,

    #[arg(
        long,
        env = "A2W_ADDR",
        default_value = ":5001",
        help = "Listen address; ':port' binds every interface"
    )]
    pub addr: String,

    #[arg(
        long,
        env = "A2W_TEMPLATE",
        default_value = "./templates",
        help = "Directory scanned once at startup for *.tmpl notification templates"
    )]
    pub template: PathBuf,

    #[arg(
        long = "webhook-base",
        env = "A2W_WEBHOOK_BASE",
        default_value = WECOM_WEBHOOK_BASE,
        help = "WeCom webhook URL prefix the request 'key' is appended to"
    )]
    pub webhook_base: String,

    #[arg(
        long = "http-timeout-ms",
        env = "A2W_HTTP_TIMEOUT_MS",
        default_value_t = 10_000,
        value_parser = parse_positive_u64,
        help = "Timeout for each outbound webhook POST in milliseconds"
    )]
    pub http_timeout_ms: u64,

    #[arg(
        long = "max-message-bytes",
        env = "A2W_MAX_MESSAGE_BYTES",
        default_value_t = MARKDOWN_MAX_BYTES,
        value_parser = parse_positive_usize,
        help = "Byte ceiling for each delivered markdown segment"
    )]
    pub max_message_bytes: usize,

    #[arg(
        long = "segment-header",
        env = "A2W_SEGMENT_HEADER",
        default_value = DEFAULT_SEGMENT_HEADER_TEMPLATE,
        help = "Header prepended to each segment of a split message; {index} and {count} are substituted"
    )]
    pub segment_header: String,
}
