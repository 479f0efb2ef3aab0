use std::fmt;

/// A watched route: destination plus the price it has to drop under.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchTask {
    pub destination_label: String,
    /// Provider-specific airport / city code (IATA for Tequila).
    pub location_code: String,
    pub threshold_price: f64,
}

impl WatchTask {
    pub fn new(
        destination_label: impl Into<String>,
        location_code: impl Into<String>,
        threshold_price: f64,
    ) -> Self {
        Self {
            destination_label: destination_label.into(),
            location_code: location_code.into(),
            threshold_price,
        }
    }
}

/// Result of one provider query. `valid == false` means "no usable result";
/// `observed_price` carries no meaning in that case.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
    pub tracked_threshold: f64,
    pub observed_price: f64,
    pub valid: bool,
}

impl PriceQuote {
    pub fn found(tracked_threshold: f64, observed_price: f64) -> Self {
        Self {
            tracked_threshold,
            observed_price,
            valid: true,
        }
    }

    pub fn invalid(tracked_threshold: f64) -> Self {
        Self {
            tracked_threshold,
            observed_price: 0.0,
            valid: false,
        }
    }

    /// 只有在報價有效時才回傳價格，避免把無效報價當成 0 元
    pub fn price(&self) -> Option<f64> {
        self.valid.then_some(self.observed_price)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub message: String,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// What happened to a single dispatched watch task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    AlertSent,
    Suppressed,
    NoQuote,
    DeliveryFailed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub dispatched: usize,
    pub alerts_sent: usize,
    pub suppressed: usize,
    pub quote_failures: usize,
    pub delivery_failures: usize,
    /// Units that panicked before reporting an outcome.
    pub aborted: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::AlertSent => self.alerts_sent += 1,
            TaskOutcome::Suppressed => self.suppressed += 1,
            TaskOutcome::NoQuote => self.quote_failures += 1,
            TaskOutcome::DeliveryFailed => self.delivery_failures += 1,
        }
    }

    pub fn completed(&self) -> usize {
        self.alerts_sent + self.suppressed + self.quote_failures + self.delivery_failures
    }
}
