//! Command implementations for the CLI
//!
//! - start: Start the HTTP API server
//! - test: Test configuration validity
//! - config: Configuration display and validation
//! - estimate: One-shot estimate printed as JSON

pub mod config;
pub mod estimate;
pub mod start;
