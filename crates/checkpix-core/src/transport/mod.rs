pub mod http;

use crate::error::TransportError;
use crate::model::ReconciliationResponse;
use crate::upload::UploadSet;

/// Remote service that matches receipts against statement transfers.
pub trait ValidationService {
    /// Send one upload set and wait for the service's verdict.
    fn submit(&self, upload: &UploadSet) -> Result<ReconciliationResponse, TransportError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
