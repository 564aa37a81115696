//! Persistence configuration.

/// Default upper bound for a single encoded record (64 MiB).
pub const DEFAULT_MAX_RECORD_BYTES: usize = 64 * 1024 * 1024;

/// Change-log persistence configuration.
#[derive(Debug, Clone)]
pub struct PersistConfig {
    /// Largest length prefix accepted when reading a record
    pub max_record_bytes: usize,
}

impl Default for PersistConfig {
    fn default() -> Self {
        Self {
            max_record_bytes: DEFAULT_MAX_RECORD_BYTES,
        }
    }
}
