//! Data model: output records and pipeline configuration.

pub mod config;
pub mod record;
