//! Structured logging setup.
//!
//! Level resolution: `RUST_LOG` when set, otherwise the `--level` flag,
//! otherwise debug when `--debug` or `PORTSQUAT_DEBUG` is present,
//! otherwise info. `NO_COLOR=1` disables ANSI escapes in the output.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Environment variable enabling debug level when set to anything
/// non-empty.
pub const ENV_DEBUG: &str = "PORTSQUAT_DEBUG";

/// Initialize the global tracing subscriber from the CLI flags and the
/// environment.
pub fn init(debug: bool, level_flag: Option<&str>) {
    let (level, invalid) = resolve_level(debug, level_flag);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    let ansi = std::env::var("NO_COLOR").map_or(true, |v| v != "1");

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_ansi(ansi))
        .init();

    if let Some(input) = invalid {
        tracing::warn!(input = %input, "Invalid log level, using default");
    }
}

/// Pick the level from the flags and environment. Returns the unrecognized
/// flag value, if any, so the caller can warn about it once logging is up.
fn resolve_level(debug: bool, level_flag: Option<&str>) -> (LevelFilter, Option<String>) {
    if let Some(flag) = level_flag {
        return match flag.to_ascii_lowercase().as_str() {
            "debug" => (LevelFilter::DEBUG, None),
            "info" => (LevelFilter::INFO, None),
            "warn" | "warning" => (LevelFilter::WARN, None),
            "error" => (LevelFilter::ERROR, None),
            _ => (LevelFilter::INFO, Some(flag.to_string())),
        };
    }

    let env_debug = std::env::var(ENV_DEBUG).map_or(false, |v| !v.is_empty());
    if debug || env_debug {
        (LevelFilter::DEBUG, None)
    } else {
        (LevelFilter::INFO, None)
    }
}
