//! Structured logging for the helmet tools.
//!
//! Console output goes through `tracing-subscriber`; the settings library
//! reports through the `log` facade, which the subscriber picks up. Debug
//! builds can additionally write JSON lines to `helmet.log`.

use std::path::Path;

use helmet_config::CliArgs;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor `--log-level` is given.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file written in debug builds.
pub const LOG_FILE_NAME: &str = "helmet.log";

/// Filter directives for `args`, falling back to [`DEFAULT_FILTER`].
#[must_use]
pub fn filter_directives(args: Option<&CliArgs>) -> String {
    match args.and_then(|a| a.log_level.as_deref()) {
        Some(level) if !level.trim().is_empty() => level.trim().to_string(),
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins over `--log-level`. When `debug_build` is set and
/// `log_dir` can be created, events are also written there as JSON.
///
/// ```no_run
/// use helmet_log::init_logging;
///
/// init_logging(Some(std::path::Path::new("./logs")), true, None);
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, args: Option<&CliArgs>) {
    let directives = filter_directives(args);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directives));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE_NAME))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// An `EnvFilter` built from [`DEFAULT_FILTER`].
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_default_log_level() {
        let filter = default_env_filter();
        assert_eq!(format!("{filter}"), "info");
        assert_eq!(filter_directives(None), "info");
    }

    #[test]
    fn test_cli_log_level_is_used() {
        let args = CliArgs {
            log_level: Some(" debug,helmet_config=trace ".to_string()),
            ..CliArgs::default()
        };
        assert_eq!(filter_directives(Some(&args)), "debug,helmet_config=trace");
    }

    #[test]
    fn test_blank_cli_log_level_falls_back() {
        let args = CliArgs {
            log_level: Some("   ".to_string()),
            ..CliArgs::default()
        };
        assert_eq!(filter_directives(Some(&args)), DEFAULT_FILTER);
        assert_eq!(filter_directives(Some(&CliArgs::default())), DEFAULT_FILTER);
    }

    #[test]
    fn test_env_filter_parsing() {
        let valid_filters = ["info", "debug,helmet_config=trace", "warn", "error"];
        for filter_str in &valid_filters {
            let result = EnvFilter::try_from(*filter_str);
            assert!(result.is_ok(), "Failed to parse filter: {filter_str}");
        }
    }

    #[test]
    fn test_json_lines_are_parseable() {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_writer(move || writer.clone())
                .with_ansi(false)
                .json(),
        );

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(line = 3, "invalid hudscale value");
        });

        let output = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let first = output.lines().next().unwrap();
        let event: serde_json::Value = serde_json::from_str(first).unwrap();
        assert_eq!(event["level"], "WARN");
        assert_eq!(event["fields"]["message"], "invalid hudscale value");
        assert_eq!(event["fields"]["line"], 3);
    }

    #[test]
    fn test_log_file_location() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_dir = temp_dir.path().join("logs");
        std::fs::create_dir_all(&log_dir).unwrap();
        let path = log_dir.join(LOG_FILE_NAME);
        assert_eq!(path.file_name().unwrap(), "helmet.log");
        assert!(path.starts_with(temp_dir.path()));
    }
}
