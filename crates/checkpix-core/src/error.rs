use std::path::PathBuf;

use crate::upload::SourceKey;

/// Pre-flight problems with the selected files. Raised before any network call.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Você deve selecionar pelo menos 1 comprovante.")]
    NoComprovantes,

    #[error("Você deve selecionar o extrato {0}.")]
    MissingSource(SourceKey),
}

/// Failures of the exchange with the validation service.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("server answered with HTTP status {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("response body is not JSON: {0}")]
    Decode(#[source] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum CheckpixError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Erro ao enviar os arquivos.")]
    Transport(#[from] TransportError),

    #[error("Sem dados para gerar relatório.")]
    ExportPrecondition,

    #[error("Já existe um envio em andamento.")]
    Busy,

    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
