//! # FilterFlix Common Library
//!
//! Shared code for the FilterFlix timestamp tooling including:
//! - Error types
//! - `HH:MM:SS` time codec
//! - Content category enum and section mapping table
//! - Configuration loading
//! - Clock utilities

pub mod config;
pub mod content;
pub mod error;
pub mod time;
pub mod timecode;

pub use content::ContentType;
pub use error::{Error, Result};
