#[cfg(feature = "cli")]
pub mod cli;

use crate::utils::error::{Result, WatchError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_TASKS_FILE: &str = "./data/flight-task.csv";
pub const DEFAULT_ENDPOINT: &str = "https://tequila-api.kiwi.com/v2/search";
pub const DEFAULT_API_KEY_ENV: &str = "TEQUILA_API_KEY";
pub const DEFAULT_TOPIC_ARN: &str = "arn:aws:sns:us-east-1:228850758643:flight-deal-found";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub tasks_file: String,
    pub provider: ProviderConfig,
    pub alert: AlertConfig,
}

/// 出發地與日期區間對所有任務都相同
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub endpoint: String,
    pub fly_from: String,
    pub date_from: String,
    pub date_to: String,
    pub api_key_env: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    pub topic_arn: String,
    pub region: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            fly_from: "CUU".to_string(),
            date_from: "30/01/2022".to_string(),
            date_to: "07/02/2022".to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            topic_arn: DEFAULT_TOPIC_ARN.to_string(),
            region: None,
        }
    }
}

impl WatchConfig {
    pub fn new() -> Self {
        Self {
            tasks_file: DEFAULT_TASKS_FILE.to_string(),
            ..Default::default()
        }
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| WatchError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，缺少的欄位使用預設值
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        let mut config: Self =
            toml::from_str(&processed_content).map_err(|e| WatchError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;

        if config.tasks_file.is_empty() {
            config.tasks_file = DEFAULT_TASKS_FILE.to_string();
        }
        Ok(config)
    }

    /// 替換環境變數 (例如 ${TEQUILA_ENDPOINT})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::{Captures, Regex};
        use std::sync::OnceLock;

        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex")
        });

        re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }
}

impl Validate for WatchConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("tasks_file", &self.tasks_file)?;
        validation::validate_url("provider.endpoint", &self.provider.endpoint)?;
        validation::validate_non_empty_string("provider.fly_from", &self.provider.fly_from)?;
        validation::validate_non_empty_string("provider.api_key_env", &self.provider.api_key_env)?;
        validation::validate_date_window(&self.provider.date_from, &self.provider.date_to)?;
        validation::validate_non_empty_string("alert.topic_arn", &self.alert.topic_arn)?;

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}
