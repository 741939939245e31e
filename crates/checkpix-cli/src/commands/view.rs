use checkpix_core::error::CheckpixError;
use checkpix_core::state::AppState;
use std::path::Path;

use crate::output;

pub fn run(response_file: &Path, output_format: &str) -> Result<(), CheckpixError> {
    let mut state = AppState::default();
    if let Some(response) = checkpix_core::load_response(response_file)? {
        state.set_response(response);
    }

    match state.view() {
        Some(view) => output::print_view(&view, output_format),
        None => {
            eprintln!("Nenhuma resposta em {}", response_file.display());
            Ok(())
        }
    }
}
