//! Single-owner application state and its transitions.

use crate::error::CheckpixError;
use crate::model::ReconciliationResponse;
use crate::report::{build_document, Document};
use crate::transport::ValidationService;
use crate::upload::{SourceKey, SourcePolicy, UploadFile, UploadSet};
use crate::view::{render, ResultView};

/// Selected files, the latest response and the busy flag.
#[derive(Debug, Default)]
pub struct AppState {
    upload: UploadSet,
    response: Option<ReconciliationResponse>,
    loading: bool,
    policy: SourcePolicy,
}

/// Holds the busy flag for the duration of one exchange and clears it on
/// drop, whatever the outcome.
struct LoadingGuard<'a> {
    flag: &'a mut bool,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(flag: &'a mut bool) -> Result<Self, CheckpixError> {
        if *flag {
            return Err(CheckpixError::Busy);
        }
        *flag = true;
        Ok(LoadingGuard { flag })
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}

impl AppState {
    pub fn new(policy: SourcePolicy) -> Self {
        AppState {
            policy,
            ..Default::default()
        }
    }

    pub fn upload(&self) -> &UploadSet {
        &self.upload
    }

    pub fn set_files(&mut self, upload: UploadSet) {
        self.upload = upload;
    }

    pub fn set_comprovantes(&mut self, files: Vec<UploadFile>) {
        self.upload.set_comprovantes(files);
    }

    pub fn set_source(&mut self, key: SourceKey, file: Option<UploadFile>) {
        self.upload.set_source(key, file);
    }

    pub fn response(&self) -> Option<&ReconciliationResponse> {
        self.response.as_ref()
    }

    /// Replace the current response wholesale.
    pub fn set_response(&mut self, response: ReconciliationResponse) {
        self.response = Some(response);
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Validate the selection, send it and store the answer.
    ///
    /// The selection is consumed once the request is attempted. On failure the
    /// previous response is kept.
    pub fn submit(
        &mut self,
        service: &dyn ValidationService,
    ) -> Result<&ReconciliationResponse, CheckpixError> {
        let _busy = LoadingGuard::acquire(&mut self.loading)?;
        self.upload.validate(self.policy)?;

        let upload = std::mem::take(&mut self.upload);
        tracing::debug!(backend = service.backend_name(), "starting submission");

        match service.submit(&upload) {
            Ok(response) => {
                let stored: &ReconciliationResponse = self.response.insert(response);
                Ok(stored)
            }
            Err(e) => {
                tracing::warn!(error = %e, "submission failed, keeping previous response");
                Err(e.into())
            }
        }
    }

    /// The interactive projection of the current response, if any.
    pub fn view(&self) -> Option<ResultView> {
        self.response.as_ref().map(render)
    }

    /// The exportable projection. Refused when no response was received.
    pub fn export(&self) -> Result<Document, CheckpixError> {
        self.response
            .as_ref()
            .map(build_document)
            .ok_or(CheckpixError::ExportPrecondition)
    }
}
