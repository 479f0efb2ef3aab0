use crate::domain::model::{Alert, PriceQuote, WatchTask};

/// Alert iff a valid quote is strictly lower than the tracked threshold.
/// An observed price equal to the threshold is not a drop.
pub fn price_dropped(threshold: f64, observed: f64) -> bool {
    observed < threshold
}

pub fn evaluate(task: &WatchTask, quote: &PriceQuote) -> Option<Alert> {
    let observed = quote.price()?;
    if !price_dropped(task.threshold_price, observed) {
        return None;
    }

    Some(Alert {
        message: format_alert(task, observed),
    })
}

pub fn format_alert(task: &WatchTask, observed: f64) -> String {
    format!(
        "New lower price found for {} ({}): {:.2} below threshold {:.2}",
        task.destination_label, task.location_code, observed, task.threshold_price
    )
}
