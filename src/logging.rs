use anyhow::{Result, anyhow};
use tracing::warn;
use tracing_subscriber::EnvFilter;

const DEFAULT_LEVEL: &str = "info";

fn crate_directive(level: &str) -> String {
    format!("{}={level}", env!("CARGO_PKG_NAME").replace('-', "_"))
}

/// Filter for `level`, else `RUST_LOG`, else the crate at `info`. An unparseable `level` is
/// handed back so the caller can report it once logging is up.
fn build_filter(level: Option<&str>) -> (EnvFilter, Option<String>) {
    if let Some(level) = level {
        match EnvFilter::try_new(crate_directive(level)) {
            Ok(filter) => return (filter, None),
            Err(_) => {
                let fallback = EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(crate_directive(DEFAULT_LEVEL)));
                return (fallback, Some(level.to_string()));
            }
        }
    }
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(crate_directive(DEFAULT_LEVEL)));
    (filter, None)
}

/// Installs the global subscriber.
pub fn init(level: Option<&str>) -> Result<()> {
    let (filter, rejected) = build_filter(level);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!("failed to install log subscriber: {err}"))?;

    if let Some(level) = rejected {
        warn!("unknown log level {level:?}, using the default filter");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn valid_level_is_scoped_to_this_crate() {
        let (filter, rejected) = build_filter(Some("debug"));
        assert_eq!(rejected, None);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn unknown_level_falls_back_instead_of_failing() {
        let (_filter, rejected) = build_filter(Some("verbose"));
        assert_eq!(rejected.as_deref(), Some("verbose"));
    }

    #[test]
    fn default_directive_names_the_crate() {
        assert_eq!(crate_directive(DEFAULT_LEVEL), "focus_mode=info");
    }
}
