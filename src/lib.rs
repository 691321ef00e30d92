pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::clock::{FixedClock, SystemClock};
pub use adapters::webhook::{handle_request, ActionRequest, ActionResponse};
pub use crate::core::engine::ActionEngine;
pub use utils::error::{ActionError, Result};
