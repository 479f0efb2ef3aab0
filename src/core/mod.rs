pub mod dispatcher;
pub mod engine;

pub use crate::domain::model::{PriceQuote, RunSummary, TaskOutcome, WatchTask};
pub use crate::domain::ports::{AlertChannel, PriceQuoteClient, WatchTaskStore};
pub use crate::utils::error::Result;
