//! File Census - inventory a directory tree by file type
//!
//! This crate provides functionality for:
//! - Extracting per-file metadata, including platform-specific timestamps
//! - Filtering and classifying files (unused, zero-byte)
//! - Aggregating a file type distribution report
//! - Exporting scans as JSON and CSV

pub mod classifier;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod scanner;
pub mod stats;

// Re-export commonly used types
pub use config::Config;
pub use error::{CensusError, Result};
