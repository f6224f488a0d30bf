//! Configuration schema definitions.

use std::time::Duration;

use serde::Deserialize;

/// Default bounded-shutdown deadline.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Optional TOML config file.
///
/// Every field here can also be set on the command line, and the flags win.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Port specification, same grammar as `--ports`.
    pub ports: Option<String>,

    /// Graceful-shutdown deadline in seconds.
    pub shutdown_timeout_secs: Option<u64>,
}

/// Fully resolved runtime configuration handed to the lifecycle driver.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port specification; `None` when neither a flag nor the config file
    /// provided one, which the driver treats as fatal.
    pub ports: Option<String>,

    /// Deadline for the shutdown join.
    pub shutdown_timeout: Duration,

    /// Compile-time build identity.
    pub build: BuildInfo,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ports: None,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
            build: BuildInfo::current(),
        }
    }
}

/// Version information resolved at compile time. No runtime globals: the
/// values travel inside the config passed to the driver.
#[derive(Debug, Clone, Copy)]
pub struct BuildInfo {
    /// Crate version from Cargo.
    pub version: &'static str,
    /// Commit hash injected through the `PORTSQUAT_COMMIT` build-time
    /// environment variable.
    pub commit: &'static str,
}

impl BuildInfo {
    /// The values baked into this binary.
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            commit: option_env!("PORTSQUAT_COMMIT").unwrap_or("unknown"),
        }
    }
}
