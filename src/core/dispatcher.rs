use crate::domain::model::{RunSummary, TaskOutcome, WatchTask};
use crate::domain::ports::{AlertChannel, PriceQuoteClient};
use crate::domain::rules;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Launches one unit of work per watch task and waits for all of them.
///
/// Fan-out is unbounded: N tasks means N requests in flight. Units share the
/// quote client and the alert channel but no mutable state.
pub struct FanOutDispatcher<Q: PriceQuoteClient, A: AlertChannel> {
    quotes: Arc<Q>,
    alerts: Arc<A>,
}

impl<Q, A> FanOutDispatcher<Q, A>
where
    Q: PriceQuoteClient + 'static,
    A: AlertChannel + 'static,
{
    pub fn new(quotes: Q, alerts: A) -> Self {
        Self {
            quotes: Arc::new(quotes),
            alerts: Arc::new(alerts),
        }
    }

    pub fn from_shared(quotes: Arc<Q>, alerts: Arc<A>) -> Self {
        Self { quotes, alerts }
    }

    /// Returns only after every launched unit has finished.
    pub async fn run(&self, tasks: Vec<WatchTask>) -> RunSummary {
        let mut summary = RunSummary {
            dispatched: tasks.len(),
            ..Default::default()
        };

        let mut units = JoinSet::new();
        for task in tasks {
            let quotes = Arc::clone(&self.quotes);
            let alerts = Arc::clone(&self.alerts);
            units.spawn(async move { check_task(quotes.as_ref(), alerts.as_ref(), &task).await });
        }

        while let Some(joined) = units.join_next().await {
            match joined {
                Ok(outcome) => summary.record(outcome),
                Err(e) => {
                    tracing::error!("❌ Watch task aborted before completing: {}", e);
                    summary.aborted += 1;
                }
            }
        }

        summary
    }
}

/// Quote, compare, and alert for a single task.
pub async fn check_task<Q, A>(quotes: &Q, alerts: &A, task: &WatchTask) -> TaskOutcome
where
    Q: PriceQuoteClient + ?Sized,
    A: AlertChannel + ?Sized,
{
    let quote = quotes.quote(task).await;
    if !quote.valid {
        return TaskOutcome::NoQuote;
    }

    let Some(alert) = rules::evaluate(task, &quote) else {
        tracing::debug!(
            "No drop for {}: {:.2} (threshold {:.2})",
            task.destination_label,
            quote.observed_price,
            task.threshold_price
        );
        return TaskOutcome::Suppressed;
    };

    tracing::info!("✈️ {}", alert);
    match alerts.send(&alert.message).await {
        Ok(()) => TaskOutcome::AlertSent,
        Err(e) => {
            tracing::error!(
                "❌ Alert for {} not delivered: {}",
                task.destination_label,
                e
            );
            TaskOutcome::DeliveryFailed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PriceQuote;
    use crate::utils::error::{Result, WatchError};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Mutex;

    /// Quotes keyed by location code; unknown codes yield an invalid quote.
    struct ScriptedQuotes {
        prices: HashMap<String, f64>,
        delay: Duration,
        finished: AtomicUsize,
    }

    impl ScriptedQuotes {
        fn new(prices: &[(&str, f64)]) -> Self {
            Self {
                prices: prices
                    .iter()
                    .map(|(code, price)| (code.to_string(), *price))
                    .collect(),
                delay: Duration::ZERO,
                finished: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PriceQuoteClient for ScriptedQuotes {
        async fn quote(&self, task: &WatchTask) -> PriceQuote {
            tokio::time::sleep(self.delay).await;
            self.finished.fetch_add(1, Ordering::SeqCst);
            match self.prices.get(&task.location_code) {
                Some(price) => PriceQuote::found(task.threshold_price, *price),
                None => PriceQuote::invalid(task.threshold_price),
            }
        }
    }

    #[derive(Default)]
    struct RecordingChannel {
        sent: Mutex<Vec<String>>,
        reject_containing: Option<&'static str>,
    }

    #[async_trait]
    impl AlertChannel for RecordingChannel {
        async fn send(&self, message: &str) -> Result<()> {
            if let Some(needle) = self.reject_containing {
                if message.contains(needle) {
                    return Err(WatchError::DeliveryError {
                        message: "rejected".to_string(),
                    });
                }
            }
            self.sent.lock().await.push(message.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_lower_price_sends_alert() {
        let quotes = ScriptedQuotes::new(&[("LIS", 350.0)]);
        let channel = RecordingChannel::default();

        let outcome = check_task(&quotes, &channel, &WatchTask::new("Lisbon", "LIS", 400.0)).await;

        assert_eq!(outcome, TaskOutcome::AlertSent);
        let sent = channel.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("Lisbon"));
        assert!(sent[0].contains("400"));
        assert!(sent[0].contains("350"));
    }

    #[tokio::test]
    async fn test_equal_price_is_suppressed() {
        let quotes = ScriptedQuotes::new(&[("LIS", 400.0)]);
        let channel = RecordingChannel::default();

        let outcome = check_task(&quotes, &channel, &WatchTask::new("Lisbon", "LIS", 400.0)).await;

        assert_eq!(outcome, TaskOutcome::Suppressed);
        assert!(channel.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_quote_never_alerts() {
        let quotes = ScriptedQuotes::new(&[]);
        let channel = RecordingChannel::default();

        let outcome = check_task(&quotes, &channel, &WatchTask::new("Lisbon", "LIS", 400.0)).await;

        assert_eq!(outcome, TaskOutcome::NoQuote);
        assert!(channel.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_run_waits_for_every_task() {
        let mut quotes = ScriptedQuotes::new(&[("LIS", 350.0), ("PAR", 900.0), ("OSL", 100.0)]);
        quotes.delay = Duration::from_millis(50);
        let quotes = Arc::new(quotes);
        let channel = Arc::new(RecordingChannel {
            reject_containing: Some("Oslo"),
            ..Default::default()
        });
        let dispatcher = FanOutDispatcher::from_shared(Arc::clone(&quotes), Arc::clone(&channel));

        let tasks = vec![
            WatchTask::new("Lisbon", "LIS", 400.0),
            WatchTask::new("Paris", "PAR", 500.0),
            WatchTask::new("Rome", "ROM", 300.0),
            WatchTask::new("Oslo", "OSL", 200.0),
        ];
        let summary = dispatcher.run(tasks).await;

        assert_eq!(quotes.finished.load(Ordering::SeqCst), 4);
        assert_eq!(
            summary,
            RunSummary {
                dispatched: 4,
                alerts_sent: 1,
                suppressed: 1,
                quote_failures: 1,
                delivery_failures: 1,
                aborted: 0,
            }
        );
        assert_eq!(channel.sent.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_run_with_no_tasks() {
        let dispatcher = FanOutDispatcher::new(ScriptedQuotes::new(&[]), RecordingChannel::default());
        let summary = dispatcher.run(Vec::new()).await;
        assert_eq!(summary, RunSummary::default());
    }

    struct PanickingQuotes;

    #[async_trait]
    impl PriceQuoteClient for PanickingQuotes {
        async fn quote(&self, task: &WatchTask) -> PriceQuote {
            if task.location_code == "BAD" {
                panic!("provider client bug");
            }
            PriceQuote::found(task.threshold_price, task.threshold_price - 1.0)
        }
    }

    #[tokio::test]
    async fn test_panicking_unit_does_not_affect_others() {
        let dispatcher = FanOutDispatcher::new(PanickingQuotes, RecordingChannel::default());
        let summary = dispatcher
            .run(vec![
                WatchTask::new("Broken", "BAD", 100.0),
                WatchTask::new("Lisbon", "LIS", 400.0),
            ])
            .await;

        assert_eq!(summary.dispatched, 2);
        assert_eq!(summary.aborted, 1);
        assert_eq!(summary.alerts_sent, 1);
    }
}
