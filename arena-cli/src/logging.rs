use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

const VERBOSE_DIRECTIVES: &str = "arena_cli=debug,arena_client=debug,arena_core=debug";

/// Фильтр логов: `--verbose` важнее `RUST_LOG`, тот важнее `LOG_LEVEL`.
fn build_filter(default_level: &str, verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new(VERBOSE_DIRECTIVES);
    }
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

pub(crate) fn init_logging(default_level: &str, verbose: bool) -> Result<()> {
    // stdout занят результатами команд
    fmt()
        .with_env_filter(build_filter(default_level, verbose))
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_enables_crate_debug() {
        let filter = build_filter("warn", true);
        assert!(filter.to_string().contains("arena_client=debug"));
    }
}
