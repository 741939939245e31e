pub mod classify;
pub mod columns;
pub mod error;
pub mod model;
pub mod normalize;
pub mod reconcile;
pub mod report;
pub mod state;
pub mod transport;
pub mod upload;
pub mod view;

use error::CheckpixError;
use model::ReconciliationResponse;
use std::path::Path;

/// Parse a response body (as returned by the service or saved by `submit`).
///
/// Any JSON document is accepted; unexpected shapes read as empty buckets.
pub fn parse_response(json_bytes: &[u8]) -> Result<ReconciliationResponse, CheckpixError> {
    let value: serde_json::Value = serde_json::from_slice(json_bytes)?;
    Ok(ReconciliationResponse::from(value))
}

/// Load a previously saved response.
///
/// Returns `Ok(None)` when the file does not exist, so callers can treat it
/// like "no response received yet".
pub fn load_response(path: &Path) -> Result<Option<ReconciliationResponse>, CheckpixError> {
    match std::fs::read(path) {
        Ok(bytes) => parse_response(&bytes).map(Some),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(CheckpixError::FileRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}
