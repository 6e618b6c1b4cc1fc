//! Error type for fallible pad operations.

use signature_config::ConfigError;

/// Errors surfaced by the signature pad.
///
/// Stroke intake never fails; only configuration and decoding of
/// externally supplied point data can.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("Invalid options: {0}")]
    Config(#[from] ConfigError),
    #[error("Malformed point data: {0}")]
    Json(#[from] serde_json::Error),
}
