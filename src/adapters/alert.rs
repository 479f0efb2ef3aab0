use crate::domain::ports::AlertChannel;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Writes alerts to the log only. Used for dry runs and builds without SNS.
#[derive(Debug, Clone, Default)]
pub struct LogAlertChannel;

#[async_trait]
impl AlertChannel for LogAlertChannel {
    async fn send(&self, message: &str) -> Result<()> {
        tracing::info!("📣 [dry-run] {}", message);
        Ok(())
    }
}

#[cfg(feature = "sns")]
pub use sns::SnsAlertChannel;

#[cfg(feature = "sns")]
mod sns {
    use crate::config::AlertConfig;
    use crate::domain::ports::AlertChannel;
    use crate::utils::error::{Result, WatchError};
    use async_trait::async_trait;
    use aws_config::BehaviorVersion;
    use aws_sdk_sns::config::Region;
    use aws_sdk_sns::error::DisplayErrorContext;
    use aws_sdk_sns::Client as SnsClient;
    use tokio::sync::OnceCell;

    /// 全程序共用的 SNS client，第一次發送時建立；建立失敗時保持 None
    static SNS_CLIENT: OnceCell<Option<SnsClient>> = OnceCell::const_new();

    #[derive(Debug, Clone)]
    pub struct SnsAlertChannel {
        config: AlertConfig,
        handle: &'static OnceCell<Option<SnsClient>>,
    }

    impl SnsAlertChannel {
        pub fn new(config: AlertConfig) -> Self {
            Self {
                config,
                handle: &SNS_CLIENT,
            }
        }

        #[cfg(test)]
        fn with_handle(config: AlertConfig, handle: &'static OnceCell<Option<SnsClient>>) -> Self {
            Self { config, handle }
        }

        async fn client(&self) -> Option<&SnsClient> {
            self.handle
                .get_or_init(|| build_client(self.config.region.clone()))
                .await
                .as_ref()
        }
    }

    async fn build_client(region: Option<String>) -> Option<SnsClient> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        let sdk_config = loader.load().await;

        if sdk_config.region().is_none() {
            tracing::error!("❌ No AWS region configured, SNS alerts are disabled for this run");
            return None;
        }

        tracing::debug!("SNS client ready (region {:?})", sdk_config.region());
        Some(SnsClient::new(&sdk_config))
    }

    #[async_trait]
    impl AlertChannel for SnsAlertChannel {
        async fn send(&self, message: &str) -> Result<()> {
            let client = self.client().await.ok_or_else(|| WatchError::DeliveryError {
                message: "SNS client is unavailable".to_string(),
            })?;

            client
                .publish()
                .topic_arn(&self.config.topic_arn)
                .message(message)
                .send()
                .await
                .map_err(|e| WatchError::DeliveryError {
                    message: DisplayErrorContext(&e).to_string(),
                })?;

            Ok(())
        }
    }

}
