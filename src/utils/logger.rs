use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    /// One JSON object per line, for CloudWatch-style collectors.
    Json,
}

/// Directive used when `RUST_LOG` is not set.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "flight_watch=debug,info"
    } else {
        "flight_watch=info,warn"
    }
}

/// 初始化全域 subscriber，只能呼叫一次
pub fn init_logger(format: LogFormat, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Compact => registry.with(layer.compact()).init(),
        LogFormat::Json => registry.with(layer.json()).init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_parses() {
        for verbose in [false, true] {
            let directive = default_directive(verbose);
            assert!(directive.starts_with("flight_watch="));
            assert!(EnvFilter::try_new(directive).is_ok());
        }
        assert!(default_directive(true).contains("debug"));
    }
}
