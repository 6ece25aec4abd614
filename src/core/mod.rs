//! Core scene module
//!
//! Contains configuration, errors and telemetry text

mod config;
mod error;
mod telemetry;

pub use config::SceneConfig;
pub use error::SceneError;
pub use telemetry::{Telemetry, orientation_line, position_line};
