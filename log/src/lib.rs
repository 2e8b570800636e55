//! Logging setup for Wren with file output and optional stdout.
//!
//! Logs always go to a file at `warn` level (or higher if a filter is set).
//! Stdout logging is enabled when `WREN_LOG` or `RUST_LOG` is set, or in debug builds.
//!
//! ## Environment Variables
//!
//! 1. **`WREN_LOG`** (highest priority) - Wren-specific logging control
//! 2. **`RUST_LOG`** - Standard tracing environment variable
//! 3. **Default** - `warn` globally, `info` for wren crates
//!
//! ## Log File Location
//!
//! Default: `<data_local_dir>/wren/logs/wren-<pid>.log`
//!
//! Override with `--log-file <path>`.

use std::{
    env,
    path::{Path, PathBuf},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const WREN_CRATES: &[&str] = &[
    "wren",
    "wren_bin",
    "wren_text",
    "wren_language",
    "wren_config",
];

/// Returned from [`init`]; must be held alive to ensure log file flushing.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

#[derive(Debug, Default)]
pub struct LogConfig {
    pub log_file_path: Option<PathBuf>,
}

/// Initialize logging.
///
/// Filter priority is `WREN_LOG` > `RUST_LOG` > defaults, see the module docs.
///
/// The returned [`LogGuard`] must be held for the lifetime of the program --
/// dropping it flushes and stops the background file writer.
pub fn init(config: LogConfig) -> Result<LogGuard, BoxError> {
    let (log_dir, filename) = resolve_log_path(config.log_file_path);

    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, &filename);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(create_file_filter());

    let stdout_enabled =
        env::var("WREN_LOG").is_ok() || env::var("RUST_LOG").is_ok() || cfg!(debug_assertions);

    let stdout_layer = stdout_enabled.then(|| fmt::layer().with_filter(create_filter()));

    Registry::default()
        .with(file_layer)
        .with(stdout_layer)
        .try_init()?;

    Ok(LogGuard {
        _file_guard: file_guard,
        log_file: log_dir.join(filename),
    })
}

/// Initialize logging for tests.
///
/// Stdout-only (no file output). Will not crash if called multiple times or
/// if logging is already initialized by another test.
pub fn test() {
    let _ = fmt()
        .with_env_filter(create_filter())
        .with_test_writer()
        .try_init();
}

fn resolve_log_path(override_path: Option<PathBuf>) -> (PathBuf, String) {
    let filename = format!("wren-{}.log", std::process::id());

    if let Some(path) = override_path {
        if path.extension().is_some() {
            let dir = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or(filename);
            return (dir, name);
        }
        return (path, filename);
    }

    let dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wren")
        .join("logs");

    (dir, filename)
}

/// File filter: uses the user-specified filter if set, otherwise `warn`.
fn create_file_filter() -> EnvFilter {
    if env::var("WREN_LOG").is_ok() || env::var("RUST_LOG").is_ok() {
        return create_filter();
    }
    EnvFilter::new("warn")
}

fn create_filter() -> EnvFilter {
    if let Ok(wren_log) = env::var("WREN_LOG") {
        return expand_wren_log(&wren_log);
    }

    if let Ok(rust_log) = env::var("RUST_LOG") {
        return EnvFilter::new(rust_log);
    }

    EnvFilter::new(crate_directives("info"))
}

/// Expand `WREN_LOG` values into full tracing filter strings.
///
/// - `WREN_LOG=debug` becomes `warn,wren=debug,wren_text=debug,...`
/// - `WREN_LOG=wren_text=trace,wren=debug` is used as-is
fn expand_wren_log(wren_log: &str) -> EnvFilter {
    if wren_log.contains('=') || wren_log.contains(':') || wren_log.contains(',') {
        return EnvFilter::new(wren_log);
    }
    EnvFilter::new(crate_directives(wren_log))
}

fn crate_directives(level: &str) -> String {
    let mut directives = String::from("warn");
    for name in WREN_CRATES {
        directives.push_str(&format!(",{name}={level}"));
    }
    directives
}
