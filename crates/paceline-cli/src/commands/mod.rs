//! Subcommand implementations, one module per endpoint group.

pub mod auth;
pub mod exercise;
pub mod export;
pub mod plan;
pub mod video;
