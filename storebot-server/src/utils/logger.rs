//! Logging setup.

use tracing::level_filters::LevelFilter;

/// Console logging with defaults; fine for tests and local runs.
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Console logging, plus daily-rotated files when `log_dir` is given.
/// Unparseable levels fall back to `info`.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level: LevelFilter = log_level
        .unwrap_or("info")
        .parse()
        .unwrap_or(LevelFilter::INFO);

    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let path = std::path::Path::new(dir);
        if !path.exists()
            && let Err(e) = std::fs::create_dir_all(path)
        {
            eprintln!("failed to create log directory {dir}: {e}");
            builder.init();
            return;
        }
        let appender = tracing_appender::rolling::daily(dir, "storebot-server.log");
        builder.with_writer(appender).with_ansi(false).init();
    } else {
        builder.init();
    }
}
