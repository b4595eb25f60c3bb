//! Relay server state, router wiring, and request handlers.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use a2w_segment::{build_mention_suffix, segment_message, SegmentLimits};
use a2w_templates::{
    parse_notification, render_notification, resolve_template_name, TemplateCatalog,
};
use a2w_wecom::{WecomOutboundConfig, WecomOutboundDispatcher};
use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::extract::{Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

mod access_log;
mod send_handler;
mod server_bootstrap;
mod types;


use access_log::log_request;
use send_handler::{handle_health, handle_send};
use types::{RelayApiError, RelaySendResponse, SendParams};

pub use server_bootstrap::{normalize_bind_addr, run_relay_server};

pub const HEALTH_ENDPOINT: &str = "/";
pub const SEND_ENDPOINT: &str = "/send";

#[derive(Debug, Clone)]
/// Public struct `RelayServerConfig` used across a2w components.
pub struct RelayServerConfig {
    pub bind: String,
    pub catalog: Arc<TemplateCatalog>,
    pub outbound: WecomOutboundConfig,
    pub limits: SegmentLimits,
}

#[derive(Debug)]
/// Shared, read-only state handed to every request.
pub struct RelayServerState {
    config: RelayServerConfig,
    dispatcher: WecomOutboundDispatcher,
}

impl RelayServerState {
    pub fn new(config: RelayServerConfig) -> Result<Self> {
        let dispatcher = WecomOutboundDispatcher::new(config.outbound.clone())
            .context("failed to initialize wecom dispatcher")?;
        Ok(Self { config, dispatcher })
    }

    pub fn config(&self) -> &RelayServerConfig {
        &self.config
    }
}

pub fn build_relay_router(state: Arc<RelayServerState>) -> Router {
    Router::new()
        .route(HEALTH_ENDPOINT, get(handle_health))
        .route(SEND_ENDPOINT, post(handle_send))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
