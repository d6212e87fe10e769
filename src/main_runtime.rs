use cardiorisk::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Full logging: env filter, optional daily log file, optional console.
///
/// The terminal form passes `console = false` so log lines never land on
/// the screen; its logs go to the file only.
pub fn init_logging(logging: &LoggingConfig, console: bool) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{},cardiorisk=debug",
            logging.level.to_ascii_lowercase()
        ))
    });

    // Prefer CARDIO_LOG_DIR, then logging.dir; no directory means no file.
    let log_dir = std::env::var("CARDIO_LOG_DIR")
        .ok()
        .or_else(|| logging.dir.as_ref().map(|d| d.display().to_string()));

    // `tracing_appender::rolling::daily` panics if it can't create the
    // initial log file, so preflight writability.
    let file_layer = log_dir.as_deref().and_then(|log_dir| {
        if std::fs::create_dir_all(log_dir).is_err() {
            eprintln!(
                "Warning: Could not create log directory {}, file logging disabled",
                log_dir
            );
            return None;
        }
        let test_path = std::path::Path::new(log_dir).join(".cardiorisk_write_test");
        match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&test_path)
        {
            Ok(_) => {
                let _ = std::fs::remove_file(&test_path);

                let file_appender = tracing_appender::rolling::daily(log_dir, "cardiorisk.log");
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

                // Keep the guard alive for the life of the process
                Box::leak(Box::new(guard));

                Some(
                    tracing_subscriber::fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(false)
                        .with_target(true),
                )
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not write to log directory {} ({}), file logging disabled",
                    log_dir, e
                );
                None
            }
        }
    });

    // Console layer, plain or JSON
    let (console_layer, json_layer) = match (console, logging.json) {
        (false, _) => (None, None),
        (true, false) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            ),
            None,
        ),
        (true, true) => (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(false),
            ),
        ),
    };

    let file_logging_enabled = file_layer.is_some();
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .with(file_layer)
        .try_init();

    if file_logging_enabled && console {
        if let Some(dir) = log_dir {
            eprintln!("Logging to: {}/cardiorisk.log", dir);
        }
    }
}

/// Minimal logging for startup failures before configuration is known
pub fn init_logging_simple() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .try_init();
}
