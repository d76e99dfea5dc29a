//! Core library for the home dashboard.
//!
//! This crate defines:
//! - Weather, air-quality and date/time classification and formatting
//! - Selection of the hourly forecast strip
//! - Backend payload models and per-widget render views
//! - UI state with pluggable preference storage
//! - Configuration and the HTTP data source
//!
//! It is used by `dashboard-cli`, but the pure modules (`weather`,
//! `air_quality`, `time_format`, `hourly`, `render`) carry no I/O and can be
//! reused by any rendering layer.

pub mod air_quality;
pub mod config;
pub mod dashboard;
pub mod hourly;
pub mod model;
pub mod render;
pub mod source;
pub mod state;
pub mod time_format;
pub mod weather;

pub use air_quality::{AirQualityBand, Badge};
pub use config::{Config, RefreshIntervals};
pub use dashboard::{Dashboard, Widget};
pub use hourly::{TargetDay, select_day};
pub use source::{DashboardSource, HttpSource};
pub use state::{DashboardState, FileStore, MemoryStore, PreferenceStore, StoreError, WeatherTab};
