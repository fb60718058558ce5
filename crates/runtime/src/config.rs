//! Runtime configuration structures and loaders.
use std::env;
use std::path::PathBuf;

/// Configuration for a simulation host.
///
/// Gameplay tuning lives in the content directory (`game.toml`).
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Capacity of each event bus topic channel.
    pub event_buffer_size: usize,
    /// Directory with `game.toml` and `skills.ron`. Builtin content when unset.
    pub content_dir: Option<PathBuf>,
    pub logging: LoggingConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            content_dir: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `EVENT_BUFFER_SIZE`
    /// - `CONTENT_DIR`
    /// - `LOG_FILTER` / `LOG_DIR` / `LOG_TO_FILE`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(capacity) = read_env::<usize>("EVENT_BUFFER_SIZE") {
            config.event_buffer_size = capacity.max(1);
        }

        if let Some(dir) = read_env::<PathBuf>("CONTENT_DIR") {
            config.content_dir = Some(dir);
        }

        if let Some(filter) = read_env::<String>("LOG_FILTER") {
            config.logging.filter = filter;
        }

        if let Some(dir) = read_env::<PathBuf>("LOG_DIR") {
            config.logging.directory = Some(dir);
        }

        if let Some(to_file) = read_env_bool("LOG_TO_FILE") {
            config.logging.to_file = to_file;
        }

        config
    }
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, e.g. `info,runtime=debug`.
    pub filter: String,
    /// Log directory. Falls back to the platform cache directory.
    pub directory: Option<PathBuf>,
    pub to_file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
            directory: None,
            to_file: false,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    parse_bool(&env::var(key).ok()?)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
