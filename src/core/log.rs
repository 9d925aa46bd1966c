use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

/// Filter for a `RUST_LOG` value, falling back to debug logs for this crate
/// when `verbose` and to nothing otherwise.
pub fn build_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    if let Some(directives) = rust_log.filter(|d| !d.trim().is_empty()) {
        match EnvFilter::try_new(directives) {
            Ok(filter) => return filter,
            Err(e) => eprintln!("Ignoring invalid RUST_LOG ({e})"),
        }
    }

    if verbose {
        EnvFilter::new(format!("{}=debug", env!("CARGO_CRATE_NAME")))
    } else {
        EnvFilter::new("off")
    }
}

/// Installs the global subscriber. Logs go to stderr so they never mix with
/// conversion output on stdout; `RUST_LOG` takes precedence over `verbose`.
pub fn init_logging(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(rust_log.as_deref(), verbose);

    let layer = fmt::layer()
        .pretty()
        .without_time()
        .with_ansi(console::colors_enabled_stderr())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry().with(layer).with(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    fn enabled_with(filter: EnvFilter, level: Level) -> bool {
        let subscriber = tracing_subscriber::registry().with(filter);
        tracing::subscriber::with_default(subscriber, || match level {
            Level::DEBUG => tracing::enabled!(target: "fxcalc::core::store", Level::DEBUG),
            _ => tracing::enabled!(target: "fxcalc::core::store", Level::WARN),
        })
    }

    #[test]
    fn test_rust_log_enables_logs_without_verbose() {
        assert!(enabled_with(build_filter(Some("debug"), false), Level::DEBUG));
        assert!(enabled_with(build_filter(Some("fxcalc=warn"), false), Level::WARN));
        assert!(!enabled_with(build_filter(Some("fxcalc=warn"), false), Level::DEBUG));
    }

    #[test]
    fn test_verbose_flag_without_rust_log() {
        assert!(enabled_with(build_filter(None, true), Level::DEBUG));
        assert!(!enabled_with(build_filter(None, false), Level::WARN));
        assert!(!enabled_with(build_filter(Some("  "), false), Level::WARN));
    }

    #[test]
    fn test_invalid_rust_log_falls_back_to_verbose() {
        assert!(enabled_with(build_filter(Some("fxcalc=loud"), true), Level::DEBUG));
    }
}
