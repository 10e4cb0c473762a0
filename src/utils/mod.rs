pub mod build_info;

use std::path::PathBuf;
use std::sync::Once;

use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Installs the global subscriber. `RUST_LOG` overrides the default filter;
/// output goes to stderr so it never mixes with prompts.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy();

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

/// Replaces a leading `~` with the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}
