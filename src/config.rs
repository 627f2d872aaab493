use serde::{Deserialize, Serialize};

/// Preference holding the debug spew level.
pub const DEBUG_PREFERENCE_NAME: &str = "vix.debugLevel";

/// Preference enabling the assertion facility.
pub const ASSERT_PREFERENCE_NAME: &str = "vix.doAssert";

/// Default number of records accepted from one buffer.
const DEFAULT_MAX_RECORDS: usize = 65_536;

/// Default largest string or blob payload accepted from one buffer.
const DEFAULT_MAX_PAYLOAD_SIZE: usize = 64 * 1024 * 1024; // 64 MB

/// Bounds applied while decoding a buffer from a peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeLimits {
    /// Maximum number of records in one buffer.
    ///
    /// Default: 65536
    pub max_records: usize,

    /// Maximum declared length of a single string or blob payload.
    ///
    /// Default: 64 MB
    pub max_payload_size: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_records: DEFAULT_MAX_RECORDS,
            max_payload_size: DEFAULT_MAX_PAYLOAD_SIZE,
        }
    }
}

/// Debug output and assertion settings.
///
/// These are ordinarily read from the [`DEBUG_PREFERENCE_NAME`] and
/// [`ASSERT_PREFERENCE_NAME`] preferences by the owning process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Messages tagged with a level at or below this are logged. 0 is silent.
    pub level: u32,

    /// Evaluate contract assertions.
    pub assertions_enabled: bool,

    /// Panic, rather than only log, when an enabled assertion fails.
    pub panic_on_assert: bool,
}

impl DebugConfig {
    /// Returns true if a message tagged `level` should be emitted.
    pub fn enabled(&self, level: u32) -> bool {
        self.level != 0 && level <= self.level
    }
}

/// Configuration supplied when a property list is constructed.
///
/// # Example
///
/// ```
/// use proplist::{PropertyListConfig, PropertyStore};
///
/// let config = PropertyListConfig::new().max_records(128).debug_level(2);
/// let store = PropertyStore::with_config(config);
/// assert_eq!(store.config().limits.max_records, 128);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyListConfig {
    /// Bounds for decoding.
    pub limits: DecodeLimits,

    /// Debug spew and assertions.
    pub debug: DebugConfig,

    /// Leave Pointer entries out of serialized buffers instead of failing.
    ///
    /// Default: false
    pub omit_local_values: bool,
}

impl PropertyListConfig {
    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the decode limits.
    #[must_use]
    pub fn with_limits(mut self, limits: DecodeLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Sets the maximum number of records accepted from one buffer.
    #[must_use]
    pub fn max_records(mut self, max_records: usize) -> Self {
        self.limits.max_records = max_records;
        self
    }

    /// Sets the maximum string or blob length accepted from one buffer.
    #[must_use]
    pub fn max_payload_size(mut self, max_payload_size: usize) -> Self {
        self.limits.max_payload_size = max_payload_size;
        self
    }

    /// Replaces the debug settings.
    #[must_use]
    pub fn with_debug(mut self, debug: DebugConfig) -> Self {
        self.debug = debug;
        self
    }

    /// Sets the debug spew level.
    #[must_use]
    pub fn debug_level(mut self, level: u32) -> Self {
        self.debug.level = level;
        self
    }

    /// Enables assertions, optionally panicking on failure.
    #[must_use]
    pub fn assertions(mut self, panic_on_assert: bool) -> Self {
        self.debug.assertions_enabled = true;
        self.debug.panic_on_assert = panic_on_assert;
        self
    }

    /// Silently drops Pointer entries when serializing.
    #[must_use]
    pub fn omit_local_values(mut self, omit: bool) -> Self {
        self.omit_local_values = omit;
        self
    }
}
