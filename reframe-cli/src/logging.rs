// ============================================================================
// reframe-cli/src/logging.rs
// ============================================================================
//
// LOGGING: env_logger setup shared by both binaries
//
// USAGE:
// - default: info level
// - --verbose: debug level (includes ffmpeg command lines and releases)
// - RUST_LOG, when set, overrides both (e.g. RUST_LOG=ffmpeg_log=trace)

use log::LevelFilter;

/// Returns the level used when RUST_LOG is not set.
#[must_use]
pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initializes env_logger once. Later calls are ignored.
pub fn init_logging(verbose: bool) {
    let result = env_logger::Builder::new()
        .filter_level(default_level(verbose))
        .parse_default_env()
        .format_timestamp(None)
        .format_target(verbose)
        .try_init();
    if result.is_err() {
        log::debug!("Logger already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_level() {
        assert_eq!(default_level(false), LevelFilter::Info);
        assert_eq!(default_level(true), LevelFilter::Debug);
    }
}
