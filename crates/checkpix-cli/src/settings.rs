use checkpix_core::error::CheckpixError;
use checkpix_core::report::REPORT_FILE_NAME;
use checkpix_core::transport::http::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout. Not part of the service contract; kept bounded so a
    /// hung server cannot block the CLI forever.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_report_file")]
    pub report_file: PathBuf,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_report_file() -> PathBuf {
    PathBuf::from(REPORT_FILE_NAME)
}

/// Layer the optional TOML file and `CHECKPIX_*` environment variables
/// (`CHECKPIX_ENDPOINT`, `CHECKPIX_TIMEOUT_SECS`, `CHECKPIX_REPORT_FILE`).
///
/// An explicit `--config` file must exist; the implicit `checkpix.toml` may not.
pub fn load(config_file: Option<&Path>) -> Result<Settings, CheckpixError> {
    build(config_file, None)
}

fn build(
    config_file: Option<&Path>,
    env: Option<config::Map<String, String>>,
) -> Result<Settings, CheckpixError> {
    let file = match config_file {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("checkpix").required(false),
    };

    config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix("CHECKPIX")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        )
        .build()
        .and_then(|c| c.try_deserialize::<Settings>())
        .map_err(|e| CheckpixError::Config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let mut tmp = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(tmp, "endpoint = \"http://localhost:8000/carregar\"").unwrap();
        writeln!(tmp, "timeout_secs = 30").unwrap();
        let settings = load(Some(tmp.path())).unwrap();
        assert_eq!(settings.endpoint, "http://localhost:8000/carregar");
        assert_eq!(settings.timeout_secs, 30);
        assert_eq!(settings.report_file, PathBuf::from(REPORT_FILE_NAME));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = load(Some(Path::new("/nao/existe/checkpix.toml"))).unwrap_err();
        assert!(matches!(err, CheckpixError::Config(_)));
    }

    fn env(vars: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut tmp = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(tmp, "endpoint = \"http://arquivo/carregar\"").unwrap();
        writeln!(tmp, "timeout_secs = 30").unwrap();
        let settings = build(
            Some(tmp.path()),
            env(&[
                ("CHECKPIX_ENDPOINT", "http://ambiente/carregar"),
                ("CHECKPIX_TIMEOUT_SECS", "45"),
                ("CHECKPIX_REPORT_FILE", "saida.html"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.endpoint, "http://ambiente/carregar");
        assert_eq!(settings.timeout_secs, 45);
        assert_eq!(settings.report_file, PathBuf::from("saida.html"));
    }

    #[test]
    fn test_unprefixed_variables_are_ignored() {
        let settings = build(None, env(&[("ENDPOINT", "http://outro/carregar")])).unwrap();
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.timeout_secs, DEFAULT_TIMEOUT.as_secs());
    }

    #[test]
    fn test_bad_timeout_is_a_config_error() {
        let err = build(None, env(&[("CHECKPIX_TIMEOUT_SECS", "logo")])).unwrap_err();
        assert!(matches!(err, CheckpixError::Config(_)));
    }
}
