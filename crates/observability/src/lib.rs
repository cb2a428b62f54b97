//! Tracing/logging setup shared by binaries and tests.

/// Initialize process-wide tracing with JSON output.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::Json);
}

/// Tracing configuration (filters, formats).
pub mod tracing;

pub use self::tracing::LogFormat;
