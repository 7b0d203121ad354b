use std::sync::Once;

/// Filter used when neither the config nor `RUST_LOG` provide one.
///
/// wgpu and naga are noisy at `info`; keep them at `warn` unless asked.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Logger configuration.
///
/// `env_filter` uses the `env_logger` syntax, e.g. `"debug"` or
/// `"bloom_engine=debug,bloom_flora=trace"`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl LoggingConfig {
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Later calls are ignored.
///
/// Filter precedence: `config.env_filter`, then `RUST_LOG`, then
/// [`DEFAULT_FILTER`].
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config
            .env_filter
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter);
        builder.write_style(config.write_style);

        // A test harness or embedding host may already own the logger.
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized ({filter})");
    });
}
