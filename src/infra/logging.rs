use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::infra::config::Config;

pub const OPERATIONS_LOG: &str = "operations.log";
pub const PROVIDER_LOG: &str = "provider-debug.log";

/// Targets that belong in the provider debug log rather than the operations log.
const PROVIDER_TARGETS: &[&str] = &["reqwest", "hyper", "hyper_util", "h2", "rustls"];
const PROVIDER_CLIENT_TARGET: &str = "pair_mcp_gateway::clients::openrouter";

/// Install the process-wide subscriber once. Later calls are no-ops.
///
/// Everything goes to stderr (stdout belongs to the stdio transport). When the
/// per-user log directory is usable, two append-only files are added there:
/// the operations log and the provider-library debug log.
pub fn init(cfg: &Config) {
    let level = if cfg.debug { LevelFilter::DEBUG } else { LevelFilter::INFO };
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::default().add_directive(level.into()));

    let stderr = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(env_filter);

    let dir = cfg.resolved_log_dir();
    let ops_file = dir.as_deref().and_then(|d| open_append(d, OPERATIONS_LOG));
    let provider_file = dir.as_deref().and_then(|d| open_append(d, PROVIDER_LOG));

    let ops = ops_file.map(|f| {
        let mut targets = Targets::new().with_default(level);
        for t in PROVIDER_TARGETS {
            targets = targets.with_target(*t, LevelFilter::OFF);
        }
        fmt::layer()
            .with_writer(Mutex::new(f))
            .with_ansi(false)
            .with_filter(targets)
    });

    let provider_level = if cfg.debug { LevelFilter::DEBUG } else { LevelFilter::WARN };
    let provider = provider_file.map(|f| {
        let mut targets = Targets::new().with_target(PROVIDER_CLIENT_TARGET, provider_level);
        for t in PROVIDER_TARGETS {
            targets = targets.with_target(*t, provider_level);
        }
        fmt::layer()
            .with_writer(Mutex::new(f))
            .with_ansi(false)
            .with_filter(targets)
    });

    let _ = tracing_subscriber::registry()
        .with(stderr)
        .with(ops)
        .with(provider)
        .try_init();
}

fn open_append(dir: &Path, name: &str) -> Option<File> {
    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!("log directory {} unavailable: {e}", dir.display());
        return None;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(name))
        .map_err(|e| eprintln!("cannot open {name}: {e}"))
        .ok()
}

/// Route panics through tracing so they land in the operations log with a backtrace.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        tracing::error!(panic = %info, backtrace = %backtrace, "unexpected panic");
    }));
}

/// Helper to log a metrics-like line alongside the `metrics` facade.
pub fn log_metric(tool: &'static str, metric: &'static str, value: f64) {
    tracing::debug!(tool = tool, metric = metric, value = value, "metric");
    metrics::histogram!(metric, "tool" => tool).record(value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::config::{Mode, ProviderConfig};

    fn test_config(dir: &Path) -> Config {
        Config {
            mode: Mode::Stdio,
            port: 8080,
            api_key: None,
            provider: ProviderConfig::default(),
            log_dir: Some(dir.to_path_buf()),
            debug: true,
        }
    }

    #[test]
    fn init_is_idempotent_and_creates_log_files() {
        let dir = std::env::temp_dir().join(format!("pair-mcp-gateway-logs-{}", std::process::id()));
        let cfg = test_config(&dir);
        super::init(&cfg);
        super::init(&cfg);
        assert!(dir.join(OPERATIONS_LOG).exists());
        assert!(dir.join(PROVIDER_LOG).exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unusable_directory_is_skipped() {
        let file = std::env::temp_dir().join(format!("pair-mcp-gateway-not-a-dir-{}", std::process::id()));
        std::fs::write(&file, b"x").unwrap();
        assert!(open_append(&file, OPERATIONS_LOG).is_none());
        let _ = std::fs::remove_file(&file);
    }
}
