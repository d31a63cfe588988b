//! Shared utilities for signal-desk
//!
//! This crate provides common functionality used across the signal-desk workspace,
//! including logging setup and environment-driven configuration helpers.

pub mod config;
pub mod logging;

pub use config::{AppInfo, EnvError, env_opt, env_or, env_parse};
pub use logging::{LogFormat, init_tracing, init_tracing_with};
