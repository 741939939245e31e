use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use std::time::Duration;

use crate::error::TransportError;
use crate::model::ReconciliationResponse;
use crate::transport::ValidationService;
use crate::upload::{UploadFile, UploadSet, COMPROVANTES_FORM_KEY};

pub const DEFAULT_ENDPOINT: &str = "https://checkpixapi.awpsoft.com.br/carregar";

/// Upper bound for one exchange. The service itself sets none.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Validation backend reached with a multipart POST.
///
/// Receipts go out under the repeated `comprovantes` key, statements under
/// their source key. Any non-2xx status is a failure; a 2xx body must be JSON
/// but its shape is not checked here.
pub struct HttpValidationService {
    client: Client,
    endpoint: String,
}

impl HttpValidationService {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(HttpValidationService {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn file_part(file: &UploadFile) -> Part {
    Part::bytes(file.bytes.clone()).file_name(file.file_name.clone())
}

fn build_form(upload: &UploadSet) -> Form {
    let form = upload
        .comprovantes()
        .iter()
        .fold(Form::new(), |form, file| {
            form.part(COMPROVANTES_FORM_KEY, file_part(file))
        });
    upload
        .sources()
        .fold(form, |form, (key, file)| form.part(key.form_key(), file_part(file)))
}

impl ValidationService for HttpValidationService {
    fn submit(&self, upload: &UploadSet) -> Result<ReconciliationResponse, TransportError> {
        let sources: Vec<&str> = upload.sources().map(|(key, _)| key.form_key()).collect();
        tracing::info!(
            endpoint = %self.endpoint,
            comprovantes = upload.comprovantes().len(),
            sources = ?sources,
            "submitting upload set"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(build_form(upload))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "validation service rejected the upload");
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = response.bytes()?;
        let value: serde_json::Value =
            serde_json::from_slice(&body).map_err(TransportError::Decode)?;
        let parsed = ReconciliationResponse::from(value);
        tracing::info!(
            validos = parsed.validos.len(),
            invalidos = parsed.invalidos.len(),
            "validation response received"
        );
        Ok(parsed)
    }

    fn backend_name(&self) -> &str {
        "http"
    }
}
