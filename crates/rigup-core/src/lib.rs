//! Core types and configuration for rigup.
//!
//! This crate defines the resolved per-invocation record ([`RunConfig`]),
//! the optional `rigup.toml` defaults layer ([`FileDefaults`]), and shared
//! error types.

pub mod config;
pub mod error;

pub use config::{FileDefaults, LogLevel, RunConfig};
pub use error::{Error, Result};
