//! Logging setup for the `dmounts` binary.

use tracing_subscriber::EnvFilter;

/// Setting this variable (to anything) turns on debug output.
pub const DMOUNTS_DEBUG_ENV: &str = "DMOUNTS_DEBUG";

/// Full filter override, e.g. `DMOUNTS_LOG=drive_mounts=trace`.
pub const DMOUNTS_LOG_ENV: &str = "DMOUNTS_LOG";

/// Filter directives used when `DMOUNTS_LOG` is not set.
fn default_directives(debug: bool) -> &'static str {
    if debug {
        "drive_mounts=debug,dmounts=debug,warn"
    } else {
        "drive_mounts=info,dmounts=info,warn"
    }
}

/// Install the stderr subscriber and return whether debug output is on.
///
/// Debug is on when `--debug` was passed or `DMOUNTS_DEBUG` is set.
pub fn init_logging(debug_flag: bool) -> bool {
    let debug = debug_flag || std::env::var_os(DMOUNTS_DEBUG_ENV).is_some();

    let filter = EnvFilter::try_from_env(DMOUNTS_LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directives(debug)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(debug)
        .try_init()
        .ok();

    debug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_parse() {
        for debug in [false, true] {
            assert!(default_directives(debug).parse::<EnvFilter>().is_ok());
        }
        assert!(default_directives(true).starts_with("drive_mounts=debug"));
    }
}
