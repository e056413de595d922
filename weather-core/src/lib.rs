//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration handling and built-in location defaults
//! - A fail-soft HTTP client for the wttr.in endpoint
//! - The forecast and alert operations exposed to callers
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or
//! tool-invoking hosts.

pub mod alerts;
pub mod client;
pub mod config;
pub mod forecast;
pub mod model;
pub mod region;

pub use alerts::get_alerts;
pub use client::{ReportFormat, WeatherApi, WttrClient};
pub use config::Config;
pub use forecast::get_forecast;
pub use region::Region;
