//! Shared utilities: logging, timestamps, text normalization.

pub mod logger;
pub mod normalize;
pub mod time;
