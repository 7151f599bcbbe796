//! Logging setup for armature with file output and optional stdout.
//!
//! Logs always go to a file at `warn` level (or higher if configured).
//! Stdout logging is enabled when `ARMATURE_LOG` or `RUST_LOG` is set, or in
//! debug builds.
//!
//! ## Environment Variables
//!
//! 1. **`ARMATURE_LOG`** (highest priority) - armature-specific logging control
//! 2. **`RUST_LOG`** - Standard tracing environment variable
//! 3. **Default** - `warn` globally, `info` for armature crates
//!
//! ## Log File Location
//!
//! Default: `<data_local_dir>/armature/logs/armature-<pid>.log`
//! - macOS: `~/Library/Application Support/armature/logs/armature-12345.log`
//! - Linux: `~/.local/share/armature/logs/armature-12345.log`
//!
//! Override by passing a path in [`LogConfig`] or via `ARMATURE_LOG_FILE`.

use std::{env, path::PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Returned from [`init`]; must be held alive to ensure log file flushing.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

#[derive(Default)]
pub struct LogConfig {
    pub log_file_path: Option<PathBuf>,
}

/// Initialize logging.
///
/// This function respects the environment variable priority described in the
/// module docs: `ARMATURE_LOG` > `RUST_LOG` > default settings.
///
/// The returned [`LogGuard`] must be held for the lifetime of the program --
/// dropping it flushes and stops the background file writer.
///
/// Safe to call multiple times -- will not crash if logging is already
/// initialized.
pub fn init(config: LogConfig) -> Result<LogGuard, Box<dyn std::error::Error + Send + Sync>> {
    let (log_dir, filename) = resolve_log_path(config.log_file_path);

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::never(&log_dir, &filename);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_filter = create_file_filter();
    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(file_filter);

    let stdout_enabled =
        env::var("ARMATURE_LOG").is_ok() || env::var("RUST_LOG").is_ok() || cfg!(debug_assertions);

    let stdout_layer = if stdout_enabled {
        Some(fmt::layer().with_filter(create_filter()))
    } else {
        None
    };

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
/// Identical to [`init`] but stdout-only (no file output), with a name that
/// makes it clear this is safe for test usage. Will not crash if called
/// multiple times or if logging is already initialized by another test.
pub fn test() {
    let _ = fmt().with_env_filter(create_filter()).try_init();
}

fn resolve_log_path(override_path: Option<PathBuf>) -> (PathBuf, String) {
    let filename = format!("armature-{}.log", std::process::id());

    let override_path =
        override_path.or_else(|| env::var("ARMATURE_LOG_FILE").ok().map(PathBuf::from));
    if let Some(path) = override_path {
        if path.extension().is_some() {
            let dir = path
                .parent()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
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
        .join("armature")
        .join("logs");

    (dir, filename)
}

/// File filter: uses user-specified level if set, otherwise defaults to `warn`.
fn create_file_filter() -> EnvFilter {
    if env::var("ARMATURE_LOG").is_ok() || env::var("RUST_LOG").is_ok() {
        return create_filter();
    }
    EnvFilter::new("warn")
}

/// Create the appropriate [`EnvFilter`] based on environment variables.
///
/// Implements the priority system: `ARMATURE_LOG` > `RUST_LOG` > defaults.
fn create_filter() -> EnvFilter {
    // Priority order:
    // 1. ARMATURE_LOG - if set, expand it to armature namespaces (highest priority)
    // 2. RUST_LOG (standard tracing env var) - if set, use it directly
    // 3. Default - warn globally, info for armature crates

    if let Ok(armature_log) = env::var("ARMATURE_LOG") {
        return expand_armature_log(&armature_log);
    }

    if let Ok(rust_log) = env::var("RUST_LOG") {
        return EnvFilter::new(rust_log);
    }

    // Default: warn globally, info for armature crates
    EnvFilter::new("warn,armature_patch=info,armature_vfs=info")
}

/// Expand `ARMATURE_LOG` values into full tracing filter strings.
///
/// This function provides the user-friendly experience where:
/// - `ARMATURE_LOG=debug` becomes `warn,armature_patch=debug,armature_vfs=debug`
/// - `ARMATURE_LOG=armature_patch=trace` is used as-is (advanced syntax)
fn expand_armature_log(armature_log: &str) -> EnvFilter {
    // If the value contains module-specific syntax (contains '=', ':', or ','),
    // use it as-is to allow advanced usage like
    // ARMATURE_LOG=armature_patch=debug,armature_vfs=trace
    if armature_log.contains('=') || armature_log.contains(':') || armature_log.contains(',') {
        return EnvFilter::new(armature_log);
    }

    EnvFilter::new(format!(
        "warn,armature_patch={armature_log},armature_vfs={armature_log}"
    ))
}
