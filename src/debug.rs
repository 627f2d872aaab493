//! Leveled debug output and the contract-assertion facility.
//!
//! Both are driven by a [`DebugConfig`] carried by the owning store instead of
//! process-wide state.

use std::panic::Location;
use std::path::Path;

use crate::config::DebugConfig;

/// Logs a `Vix:`-prefixed debug message if `$level` is within the configured
/// spew level. Compiles to nothing without the `logging` feature.
macro_rules! spew {
    ($debug:expr, $level:expr, $($arg:tt)+) => {
        #[cfg(feature = "logging")]
        {
            if $debug.enabled($level) {
                log::debug!("Vix: {}", format_args!($($arg)+));
            }
        }
    };
}

pub(crate) use spew;

/// Returns the final component of a source path.
pub fn file_base_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

/// Checks programming contracts during development.
///
/// Disabled by default. A failed check is logged at `error` level, and panics
/// when `panic_on_assert` is set. Callers still return their ordinary error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Assertions {
    config: DebugConfig,
}

impl Assertions {
    /// Creates an assertion checker for the given settings.
    pub fn new(config: DebugConfig) -> Self {
        Self { config }
    }

    /// Returns true if checks are evaluated at all.
    pub fn is_enabled(&self) -> bool {
        self.config.assertions_enabled
    }

    /// Evaluates `cond`, reporting `what` on failure. Returns `cond`.
    #[track_caller]
    pub fn check(&self, cond: bool, what: &str) -> bool {
        if cond || !self.config.assertions_enabled {
            return cond;
        }

        let location = Location::caller();
        let file = file_base_name(location.file());

        #[cfg(feature = "logging")]
        log::error!(
            "Vix: [{}:{}]: assertion failed: {}",
            file,
            location.line(),
            what
        );

        if self.config.panic_on_assert {
            panic!(
                "Vix assertion failed at {}:{}: {}",
                file,
                location.line(),
                what
            );
        }

        cond
    }
}
