use clap::Parser;
use flight_watch::core::AlertChannel;
use flight_watch::utils::logger::{self, LogFormat};
use flight_watch::utils::validation::Validate;
use flight_watch::{CliArgs, CsvTaskStore, LogAlertChannel, TequilaClient, WatchConfig, WatchEngine};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    // 初始化日誌
    let format = if args.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(format, args.verbose);

    let config = match args.resolve_config().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    if args.verbose {
        tracing::debug!("Config: {:?}", config);
    }

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - alerts are logged, not published");
        run(config, LogAlertChannel).await;
        return;
    }

    #[cfg(feature = "sns")]
    {
        let alerts = flight_watch::SnsAlertChannel::new(config.alert.clone());
        run(config, alerts).await;
    }

    #[cfg(not(feature = "sns"))]
    {
        tracing::warn!("Built without SNS support, alerts are logged only");
        run(config, LogAlertChannel).await;
    }
}

async fn run<A: AlertChannel + 'static>(config: WatchConfig, alerts: A) {
    let store = CsvTaskStore::new(&config.tasks_file);
    let quotes = TequilaClient::new(config.provider);
    let engine = WatchEngine::new(store, quotes, alerts);

    if let Err(e) = engine.run().await {
        tracing::error!("❌ Run aborted: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }
}
