use crate::core::dispatcher::FanOutDispatcher;
use crate::domain::model::RunSummary;
use crate::domain::ports::{AlertChannel, PriceQuoteClient, WatchTaskStore};
use crate::utils::error::Result;
use std::time::Instant;

/// One batch pass: load tasks, fan out, wait, summarise.
pub struct WatchEngine<S: WatchTaskStore, Q: PriceQuoteClient, A: AlertChannel> {
    store: S,
    dispatcher: FanOutDispatcher<Q, A>,
}

impl<S, Q, A> WatchEngine<S, Q, A>
where
    S: WatchTaskStore,
    Q: PriceQuoteClient + 'static,
    A: AlertChannel + 'static,
{
    pub fn new(store: S, quotes: Q, alerts: A) -> Self {
        Self {
            store,
            dispatcher: FanOutDispatcher::new(quotes, alerts),
        }
    }

    /// 只有載入失敗會回傳錯誤，個別任務的失敗都在 dispatcher 內處理
    pub async fn run(&self) -> Result<RunSummary> {
        let started = Instant::now();
        tracing::info!("🚀 Starting flight watch run");

        let tasks = self.store.load().await?;
        if tasks.is_empty() {
            tracing::warn!("No usable watch tasks, nothing to check");
            return Ok(RunSummary::default());
        }

        tracing::info!("Checking {} route(s)...", tasks.len());
        let summary = self.dispatcher.run(tasks).await;

        tracing::info!(
            "✅ Run finished in {:?}: {} checked, {} alert(s) sent, {} suppressed, {} without quote, {} delivery failure(s), {} aborted",
            started.elapsed(),
            summary.dispatched,
            summary.alerts_sent,
            summary.suppressed,
            summary.quote_failures,
            summary.delivery_failures,
            summary.aborted
        );
        Ok(summary)
    }
}
