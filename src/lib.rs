pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliArgs;

#[cfg(feature = "sns")]
pub use crate::adapters::alert::SnsAlertChannel;

pub use crate::adapters::{alert::LogAlertChannel, csv_store::CsvTaskStore, tequila::TequilaClient};
pub use crate::config::WatchConfig;
pub use crate::core::{dispatcher::FanOutDispatcher, engine::WatchEngine};
pub use crate::domain::model::{Alert, PriceQuote, RunSummary, TaskOutcome, WatchTask};
pub use crate::utils::error::{Result, WatchError};
