// Tracing setup. Logs go to stderr; stdout carries only the report.

use anyhow::Context;
use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str =
    "scouty=info,scouty_core=info,scouty_analysis=info,scouty_cli=info,warn";

/// Filter directives when `RUST_LOG` is unset: verbosity flags first, then
/// the config file, then the built-in default.
pub fn fallback_filter(verbosity: u8, configured: Option<&str>) -> String {
    let level = match verbosity {
        0 => None,
        1 => Some("debug"),
        _ => Some("trace"),
    };
    match (level, configured) {
        (Some(level), _) => format!(
            "scouty={level},scouty_core={level},scouty_analysis={level},scouty_cli={level},warn"
        ),
        (None, Some(filter)) => filter.to_string(),
        (None, None) => DEFAULT_FILTER.to_string(),
    }
}

pub fn init_tracing(verbosity: u8, configured: Option<&str>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback_filter(verbosity, configured)))
        .context("invalid log filter")?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_beats_config() {
        assert!(fallback_filter(1, Some("warn")).starts_with("scouty=debug"));
        assert!(fallback_filter(3, None).contains("scouty_core=trace"));
    }

    #[test]
    fn config_beats_default() {
        assert_eq!(fallback_filter(0, Some("scouty_core=debug")), "scouty_core=debug");
        assert_eq!(fallback_filter(0, None), DEFAULT_FILTER);
    }
}
