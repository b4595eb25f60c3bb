//! Foundational low-level utilities shared across a2w crates.
//!
//! Provides the timestamp and elapsed-duration helpers that templates call
//! while rendering Alertmanager notifications.

pub mod time_utils;

pub use time_utils::{
    duration_between, duration_from_now, format_duration, format_timestamp_local,
    TIMESTAMP_FORMAT,
};
