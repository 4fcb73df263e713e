//! Runtime configuration derived from CLI arguments

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;
use url::Url;

use crate::cache::{FileStore, KeyValueStore, MemoryStore};
use crate::cli::Cli;

/// Error types for configuration validation
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Backend URL does not parse
    #[error("Invalid backend URL '{url}': {source}")]
    InvalidBackendUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Backend URL is not http or https
    #[error("Backend URL must use http or https, got '{0}'")]
    UnsupportedScheme(String),

    /// A duration flag was zero
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

/// How the binary presents the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Full-screen terminal view
    Interactive,
    /// Print all sections as text and exit
    Text,
    /// Print the dashboard as JSON and exit
    Json,
    /// Print only the devotional reading and exit
    Devotional,
}

/// Settings for one run of the application
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: Url,
    /// Explicit cache directory; the XDG default is used when `None`
    pub cache_dir: Option<PathBuf>,
    pub deadline: Duration,
    pub request_timeout: Duration,
    pub force_refresh: bool,
    pub verbose: bool,
    pub output: OutputMode,
}

impl Config {
    /// Validates CLI arguments into a `Config`
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let backend_url =
            Url::parse(&cli.backend_url).map_err(|source| ConfigError::InvalidBackendUrl {
                url: cli.backend_url.clone(),
                source,
            })?;
        if !matches!(backend_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(backend_url.scheme().to_string()));
        }

        if cli.deadline_ms == 0 {
            return Err(ConfigError::ZeroDuration("--deadline-ms"));
        }
        if cli.timeout_secs == 0 {
            return Err(ConfigError::ZeroDuration("--timeout-secs"));
        }

        let output = match (cli.print, cli.json, cli.devotional) {
            (false, _, _) => OutputMode::Interactive,
            (true, true, _) => OutputMode::Json,
            (true, false, true) => OutputMode::Devotional,
            (true, false, false) => OutputMode::Text,
        };

        Ok(Self {
            backend_url,
            cache_dir: cli.cache_dir.clone(),
            deadline: Duration::from_millis(cli.deadline_ms),
            request_timeout: Duration::from_secs(cli.timeout_secs),
            force_refresh: cli.refresh,
            verbose: cli.verbose,
            output,
        })
    }

    /// Resolved cache directory, if one can be determined
    pub fn resolved_cache_dir(&self) -> Option<PathBuf> {
        match &self.cache_dir {
            Some(dir) => Some(dir.clone()),
            None => FileStore::new().map(|store| store.dir().to_path_buf()),
        }
    }

    /// Opens the persisted cache
    ///
    /// Falls back to an in-memory store when no cache directory is known, so
    /// the dashboard still works but is refetched on every start.
    pub fn cache_store(&self) -> Arc<dyn KeyValueStore> {
        match self.resolved_cache_dir() {
            Some(dir) => Arc::new(FileStore::with_dir(dir)),
            None => {
                warn!("no cache directory available, dashboard will not persist");
                Arc::new(MemoryStore::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config_from(args: &[&str]) -> Result<Config, ConfigError> {
        let mut argv = vec!["ayumi"];
        argv.extend_from_slice(args);
        Config::from_cli(&Cli::parse_from(argv))
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&["--backend-url", "http://localhost:8001"]).unwrap();
        assert_eq!(config.backend_url.as_str(), "http://localhost:8001/");
        assert_eq!(config.deadline, Duration::from_millis(1500));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.output, OutputMode::Interactive);
        assert!(!config.force_refresh);
    }

    #[test]
    fn test_output_modes() {
        let text = config_from(&["--print"]).unwrap();
        assert_eq!(text.output, OutputMode::Text);

        let json = config_from(&["--print", "--json"]).unwrap();
        assert_eq!(json.output, OutputMode::Json);

        let devotional = config_from(&["--print", "--devotional"]).unwrap();
        assert_eq!(devotional.output, OutputMode::Devotional);
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let err = config_from(&["--backend-url", "not a url"]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBackendUrl { .. }));
        assert!(err.to_string().contains("not a url"));
    }

    #[test]
    fn test_non_http_scheme_is_rejected() {
        let err = config_from(&["--backend-url", "ftp://example.org"]).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme(ref s) if s == "ftp"));
    }

    #[test]
    fn test_zero_deadline_is_rejected() {
        let err = config_from(&["--deadline-ms", "0"]).unwrap_err();
        assert!(err.to_string().contains("--deadline-ms"));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = config_from(&["--timeout-secs", "0"]).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroDuration("--timeout-secs")));
    }

    #[test]
    fn test_explicit_cache_dir_is_used() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let dir = temp_dir.path().to_str().unwrap();
        let config = config_from(&["--cache-dir", dir]).unwrap();

        assert_eq!(config.resolved_cache_dir(), Some(temp_dir.path().to_path_buf()));

        let store = config.cache_store();
        store.set("marker", "ok").unwrap();
        assert!(temp_dir.path().join("marker.cache").exists());
    }
}
