pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod web;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::toml_config::{LoadedConfig, TomlConfig};

pub use adapters::{FixtureSetupRouter, HttpSetupRouter, LocalStorage, LogStore};
pub use core::{gallery::get_setups, like::LikeButton, submission::submit_setup};
pub use utils::error::{AppError, Result};
pub use web::{build_router, start_server, state::AppState};
