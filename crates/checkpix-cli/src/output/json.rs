use checkpix_core::error::CheckpixError;
use checkpix_core::view::ResultView;

pub fn print(view: &ResultView) -> Result<(), CheckpixError> {
    let json = serde_json::to_string_pretty(view)?;
    println!("{json}");
    Ok(())
}
