//! Service configuration
//!
//! Every setting comes from the command line with an environment override,
//! and is passed as an explicit [`Config`] value into the constructors that
//! need it. Nothing reads the environment after startup.
//!
//! | Flag                  | Environment                       | Default            |
//! |-----------------------|-----------------------------------|--------------------|
//! | `--cache-dir`         | `F1_CACHE_DIR`                    | `{tmp}/f1_cache`   |
//! | `--bind`              | `TIMING_TOWER_BIND`               | `127.0.0.1:8000`   |
//! | `--load-timeout-secs` | `TIMING_TOWER_LOAD_TIMEOUT_SECS`  | `60` (`0` = none)  |
//! | `--strict-status`     | `TIMING_TOWER_STRICT_STATUS`      | `false`            |
//! | `--cors-origins`      | `TIMING_TOWER_CORS_ORIGINS`       | `*`                |
//! | `--log-level`         | `RUST_LOG` takes precedence       | `info`             |

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::http::ErrorMode;

/// Timing Tower - motorsport session data over HTTP
#[derive(Parser, Debug, Clone)]
#[command(name = "timing-tower", version, about, long_about = None)]
pub struct Config {
    /// Timing-data cache directory
    #[arg(long, env = "F1_CACHE_DIR", default_value_os_t = default_cache_dir())]
    pub cache_dir: PathBuf,

    /// Address to listen on
    #[arg(long, env = "TIMING_TOWER_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Upper bound for one session load, in seconds (0 waits indefinitely)
    #[arg(long, env = "TIMING_TOWER_LOAD_TIMEOUT_SECS", default_value_t = 60)]
    pub load_timeout_secs: u64,

    /// Report failures with HTTP status codes instead of 200 + error body
    #[arg(long, env = "TIMING_TOWER_STRICT_STATUS")]
    pub strict_status: bool,

    /// Allowed CORS origins, comma separated; `*` allows any
    #[arg(long, env = "TIMING_TOWER_CORS_ORIGINS", value_delimiter = ',', default_value = "*")]
    pub cors_origins: Vec<String>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// `{tmp}/f1_cache`, the provider's conventional cache location.
pub fn default_cache_dir() -> PathBuf {
    std::env::temp_dir().join("f1_cache")
}

impl Config {
    /// Defaults with an explicit cache directory, ignoring the environment.
    pub fn with_cache_dir(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
            load_timeout_secs: 60,
            strict_status: false,
            cors_origins: vec!["*".to_string()],
            log_level: "info".to_string(),
        }
    }

    pub fn load_timeout(&self) -> Option<Duration> {
        (self.load_timeout_secs > 0).then(|| Duration::from_secs(self.load_timeout_secs))
    }

    pub fn error_mode(&self) -> ErrorMode {
        if self.strict_status { ErrorMode::Strict } else { ErrorMode::Legacy }
    }
}
