pub mod html;
pub mod json;
pub mod table;

use checkpix_core::error::CheckpixError;
use checkpix_core::view::ResultView;

pub fn print_view(view: &ResultView, output_format: &str) -> Result<(), CheckpixError> {
    match output_format {
        "json" => json::print(view),
        _ => {
            table::print(view);
            Ok(())
        }
    }
}
