use crate::config::ProviderConfig;
use crate::domain::model::{PriceQuote, WatchTask};
use crate::domain::ports::PriceQuoteClient;
use crate::utils::error::{Result, WatchError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const API_KEY_HEADER: &str = "apiKey";

/// Only `data[0].price` is read. Later itineraries are kept untyped so a
/// partial or odd entry further down the list cannot fail the decode.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<serde_json::Value>,
}

/// Flight search client for the Tequila `/v2/search` endpoint.
///
/// One `reqwest::Client` is shared by every concurrent quote; it is cheap to
/// clone and pools connections internally.
#[derive(Debug, Clone)]
pub struct TequilaClient {
    client: Client,
    config: ProviderConfig,
    api_key: Option<String>,
}

impl TequilaClient {
    /// 從環境變數讀取 API key
    pub fn new(config: ProviderConfig) -> Self {
        let api_key = std::env::var(&config.api_key_env).ok();
        if api_key.is_none() {
            tracing::warn!(
                "⚠️ {} is not set, provider requests will be unauthenticated",
                config.api_key_env
            );
        }
        Self::with_api_key(config, api_key)
    }

    pub fn with_api_key(config: ProviderConfig, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            config,
            api_key,
        }
    }

    pub fn query_params(&self, task: &WatchTask) -> Vec<(&'static str, String)> {
        vec![
            ("fly_from", self.config.fly_from.clone()),
            ("date_from", self.config.date_from.clone()),
            ("date_to", self.config.date_to.clone()),
            ("fly_to", task.location_code.clone()),
            ("price_to", price_ceiling(task.threshold_price).to_string()),
            ("limit", "1".to_string()),
        ]
    }

    async fn fetch_lowest_price(&self, task: &WatchTask) -> Result<f64> {
        let mut request = self
            .client
            .get(&self.config.endpoint)
            .query(&self.query_params(task));
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        tracing::debug!(
            "Making API request to: {} (fly_to={})",
            self.config.endpoint,
            task.location_code
        );
        let response = request.send().await?;
        tracing::debug!("API response status: {}", response.status());

        let body: SearchResponse = response.error_for_status()?.json().await?;
        first_price(body)
    }
}

#[async_trait]
impl PriceQuoteClient for TequilaClient {
    async fn quote(&self, task: &WatchTask) -> PriceQuote {
        match self.fetch_lowest_price(task).await {
            Ok(price) => {
                tracing::debug!(
                    "Found {:.2} for {} ({})",
                    price,
                    task.destination_label,
                    task.location_code
                );
                PriceQuote::found(task.threshold_price, price)
            }
            Err(e) => {
                tracing::warn!(
                    "⚠️ No quote for {} ({}): {}",
                    task.destination_label,
                    task.location_code,
                    e
                );
                PriceQuote::invalid(task.threshold_price)
            }
        }
    }
}

/// The provider takes whole currency units as the price ceiling.
fn price_ceiling(threshold: f64) -> u64 {
    threshold.trunc() as u64
}

/// 只取第一筆結果，不假設服務端一定遵守 price_to
fn first_price(body: SearchResponse) -> Result<f64> {
    let first = body.data.first().ok_or_else(|| WatchError::QuoteError {
        message: "provider returned no results".to_string(),
    })?;

    let price = first
        .get("price")
        .and_then(serde_json::Value::as_f64)
        .ok_or_else(|| WatchError::QuoteError {
            message: format!("first result has no numeric price: {}", first),
        })?;

    if !price.is_finite() || price < 0.0 {
        return Err(WatchError::QuoteError {
            message: format!("provider returned an unusable price {}", price),
        });
    }
    Ok(price)
}
