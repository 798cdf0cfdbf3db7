//! Logger setup for binaries built on the rasterizer

use std::sync::Once;

/// `filter` uses `env_logger` syntax ("info", "scanfill=debug"). Without one, `RUST_LOG`
/// is consulted, then `default_level`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    pub default_level: log::LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            default_level: log::LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

static INIT: Once = Once::new();

/// Install the global logger. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(config.default_level);
            }
        }
        builder.write_style(config.write_style);

        // tests may have installed a logger already
        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
