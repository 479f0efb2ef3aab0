use crate::config::WatchConfig;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "flight-watch")]
#[command(about = "Check watched routes once and alert on airfare drops")]
pub struct CliArgs {
    /// Path to TOML configuration file (optional, defaults are used otherwise)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the watch task CSV path
    #[arg(short, long)]
    pub tasks: Option<String>,

    /// Log alerts instead of publishing them
    #[arg(long)]
    pub dry_run: bool,

    /// Emit JSON log lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliArgs {
    /// 合併配置檔與命令列覆蓋設定
    pub fn resolve_config(&self) -> Result<WatchConfig> {
        let mut config = match &self.config {
            Some(path) => WatchConfig::from_file(path)?,
            None => WatchConfig::new(),
        };

        if let Some(tasks) = &self.tasks {
            config.tasks_file = tasks.clone();
        }
        Ok(config)
    }
}
