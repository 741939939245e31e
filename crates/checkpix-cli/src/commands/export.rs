use checkpix_core::error::CheckpixError;
use checkpix_core::report::Document;
use checkpix_core::state::AppState;
use std::path::{Path, PathBuf};

use crate::output::html;
use crate::settings::Settings;

pub fn run(
    settings: &Settings,
    response_file: &Path,
    out: Option<PathBuf>,
) -> Result<(), CheckpixError> {
    let mut state = AppState::default();
    if let Some(response) = checkpix_core::load_response(response_file)? {
        state.set_response(response);
    }

    // Refused before anything touches the output path.
    let document = state.export()?;
    let path = out.unwrap_or_else(|| settings.report_file.clone());
    write_document(&document, &path)
}

pub fn write_document(document: &Document, path: &Path) -> Result<(), CheckpixError> {
    std::fs::write(path, html::render(document))?;
    tracing::info!(path = %path.display(), rows = document.row_count(), "report written");
    eprintln!(
        "Relatório com {} linha(s) gravado em {}",
        document.row_count(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(report_file: PathBuf) -> Settings {
        Settings {
            endpoint: "http://localhost/carregar".into(),
            timeout_secs: 5,
            report_file,
        }
    }

    #[test]
    fn test_missing_response_writes_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("relatorio.html");
        let fallback = dir.path().join("padrao.html");

        let err = run(
            &settings(fallback.clone()),
            &dir.path().join("resposta.json"),
            Some(out.clone()),
        )
        .unwrap_err();

        assert!(matches!(err, CheckpixError::ExportPrecondition));
        assert!(!out.exists());
        assert!(!fallback.exists());
    }

    #[test]
    fn test_saved_response_is_written_as_html() {
        let dir = tempfile::tempdir().unwrap();
        let response_file = dir.path().join("resposta.json");
        std::fs::write(
            &response_file,
            r#"{"validos": [{"comprovante": {"a": {"nome": "Bob", "valor": "50"}},
                             "transferencia": {"x": {"nome": "Bob", "banco": "Itaú"}}}],
                "invalidos": []}"#,
        )
        .unwrap();
        let out = dir.path().join("relatorio.html");

        run(&settings(PathBuf::from("nao-usado.html")), &response_file, Some(out.clone())).unwrap();

        let html = std::fs::read_to_string(&out).unwrap();
        assert!(html.contains("<h2>Válidos</h2>"));
        assert!(html.contains("<td>Itaú</td>"));
        assert!(!html.contains("Inválidos"));
    }

    #[test]
    fn test_output_defaults_to_configured_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let response_file = dir.path().join("resposta.json");
        std::fs::write(&response_file, r#"{"invalidos": [{"comprovante": {"a": {"nome": "Ana"}}}]}"#)
            .unwrap();
        let report_file = dir.path().join("padrao.html");

        run(&settings(report_file.clone()), &response_file, None).unwrap();

        assert!(report_file.exists());
    }
}
