//! Command-line surface of the a2w relay.

pub mod bootstrap_helpers;
pub mod cli_args;
pub mod cli_types;

pub use bootstrap_helpers::{build_relay_config, init_tracing};
pub use cli_args::Cli;
pub use cli_types::CliLogLevel;
