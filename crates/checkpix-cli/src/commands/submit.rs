use checkpix_core::error::CheckpixError;
use checkpix_core::state::AppState;
use checkpix_core::transport::http::HttpValidationService;
use checkpix_core::upload::{SourceKey, SourcePolicy, UploadFile, UploadSet};
use std::path::PathBuf;
use std::time::Duration;

use crate::commands::export;
use crate::output;
use crate::settings::Settings;

/// Files picked on the command line.
pub struct Selection {
    pub comprovantes: Vec<PathBuf>,
    pub corpx: Option<PathBuf>,
    pub itau: Option<PathBuf>,
    pub digital: Option<PathBuf>,
    pub generico: Option<PathBuf>,
    pub strict_sources: bool,
}

impl Selection {
    fn source(&self, key: SourceKey) -> Option<&PathBuf> {
        match key {
            SourceKey::Corpx => self.corpx.as_ref(),
            SourceKey::Itau => self.itau.as_ref(),
            SourceKey::Digital => self.digital.as_ref(),
            SourceKey::Generico => self.generico.as_ref(),
        }
    }

    /// Read every picked file from disk.
    fn load(&self) -> Result<UploadSet, CheckpixError> {
        let mut upload = UploadSet::default();
        let comprovantes = self
            .comprovantes
            .iter()
            .map(|path| UploadFile::from_path(path))
            .collect::<Result<Vec<_>, _>>()?;
        upload.set_comprovantes(comprovantes);

        for key in SourceKey::ALL {
            if let Some(path) = self.source(key) {
                upload.set_source(key, Some(UploadFile::from_path(path)?));
            }
        }
        Ok(upload)
    }
}

pub fn run(
    settings: &Settings,
    selection: Selection,
    save: Option<PathBuf>,
    report: Option<PathBuf>,
    output_format: &str,
) -> Result<(), CheckpixError> {
    let policy = if selection.strict_sources {
        SourcePolicy::RequireAll
    } else {
        SourcePolicy::Optional
    };
    let mut state = AppState::new(policy);
    state.set_files(selection.load()?);

    let service = HttpValidationService::new(
        settings.endpoint.as_str(),
        Duration::from_secs(settings.timeout_secs),
    )?;

    if !state.upload().comprovantes().is_empty() {
        eprintln!(
            "Enviando {} comprovante(s) para {}...",
            state.upload().comprovantes().len(),
            service.endpoint()
        );
    }
    let response = state.submit(&service)?;

    if let Some(path) = &save {
        let json = serde_json::to_string_pretty(response)?;
        std::fs::write(path, json)?;
        eprintln!("Resposta salva em {}", path.display());
    }

    if let Some(view) = state.view() {
        output::print_view(&view, output_format)?;
    }

    if let Some(path) = report {
        let document = state.export()?;
        export::write_document(&document, &path)?;
    }

    Ok(())
}
