pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod report;
pub mod telemetry;

pub use config::Config;
pub use error::{InspectError, InspectResult};
