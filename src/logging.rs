use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "klok=debug"). Output goes to `path` so it never lands on the alternate
/// screen; without a path nothing is logged.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub path: Option<PathBuf>,
}

static INIT: Once = Once::new();

/// Initializes the global logger once. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let Some(path) = config.path else {
            return;
        };
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return;
            }
        }
        let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
            return;
        };

        let mut builder = env_logger::Builder::new();
        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Warn);
        }

        builder
            .target(env_logger::Target::Pipe(Box::new(file)))
            .write_style(env_logger::WriteStyle::Never);

        if builder.try_init().is_ok() {
            log::debug!("logging initialized at {}", path.display());
        }
    });
}
