//! Ambient services for the Zoom client binary: configuration and logging.

pub mod config;
pub mod logging;
