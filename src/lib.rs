pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::Cli;

pub use adapters::LocalStorage;
pub use config::ToolshedConfig;
pub use domain::ports::{Prober, Storage};
pub use utils::error::{Result, ToolError};
