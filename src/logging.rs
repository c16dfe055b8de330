//! Diagnostic logging on stderr.
//!
//! Filtered by the `I18N_CHECK_LOG` environment variable (`EnvFilter` syntax,
//! e.g. `I18N_CHECK_LOG=i18n_check=trace`). Without it, only warnings are
//! shown, or this crate's debug events when `--verbose` is given.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "I18N_CHECK_LOG";

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "warn,i18n_check=debug" } else { "warn" }
}

pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "warn");
        assert_eq!(default_directive(true), "warn,i18n_check=debug");
    }
}
