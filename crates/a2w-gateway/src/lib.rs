//! HTTP relay from Alertmanager webhooks to WeCom group bots.

pub mod relay_server;

pub use relay_server::{
    build_relay_router, normalize_bind_addr, run_relay_server, RelayServerConfig,
    RelayServerState, HEALTH_ENDPOINT, SEND_ENDPOINT,
};
