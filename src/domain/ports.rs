use crate::domain::model::{PriceQuote, WatchTask};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait WatchTaskStore: Send + Sync {
    /// Load every usable task. Malformed rows are skipped; an unreadable
    /// source is an error.
    async fn load(&self) -> Result<Vec<WatchTask>>;
}

#[async_trait]
pub trait PriceQuoteClient: Send + Sync {
    /// One request, one outcome. Failures come back as an invalid quote.
    async fn quote(&self, task: &WatchTask) -> PriceQuote;
}

#[async_trait]
pub trait AlertChannel: Send + Sync {
    async fn send(&self, message: &str) -> Result<()>;
}
