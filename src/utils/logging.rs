//! Diagnostic logging to stderr.
//!
//! Directives come from `RUST_LOG` first, then the `log-filter` config
//! value, then [`DEFAULT_FILTER`]. Stdout stays reserved for rendered
//! output so logs never interleave with replies.

use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

pub const DEFAULT_FILTER: &str = "warn";

fn select_filter(env: Option<&str>, configured: Option<&str>) -> EnvFilter {
    [env, configured]
        .into_iter()
        .flatten()
        .filter(|directives| !directives.trim().is_empty())
        .find_map(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_logging(configured: Option<&str>) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = select_filter(env.as_deref(), configured);

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_wins_over_config() {
        let filter = select_filter(Some("debug"), Some("error"));
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn config_used_when_env_missing_or_blank() {
        assert_eq!(select_filter(None, Some("info")).to_string(), "info");
        assert_eq!(select_filter(Some("  "), Some("info")).to_string(), "info");
    }

    #[test]
    fn falls_back_to_default() {
        assert_eq!(select_filter(None, None).to_string(), DEFAULT_FILTER);
    }

    #[test]
    fn scoped_directives_are_kept() {
        let filter = select_filter(None, Some("warn,resdeck::core::chat=debug"));
        let text = filter.to_string();
        assert!(text.contains("resdeck::core::chat=debug"), "{text}");
    }
}
