// Ingest boundary errors

use thiserror::Error;

/// Failure to decode a provider payload. The engine itself never errors on
/// snapshot content; only the wire decode can reject, and it rejects the
/// single offending payload without touching accumulated state.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid snapshot JSON: {0}")]
    Decode(#[from] serde_json::Error),
}
