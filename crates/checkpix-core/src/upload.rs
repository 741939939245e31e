use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::error::{CheckpixError, ValidationError};

/// Multipart form key under which every receipt file is sent.
pub const COMPROVANTES_FORM_KEY: &str = "comprovantes";

/// Bank statement sources accepted next to the receipts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKey {
    Corpx,
    Itau,
    Digital,
    Generico,
}

impl SourceKey {
    pub const ALL: [SourceKey; 4] = [
        SourceKey::Corpx,
        SourceKey::Itau,
        SourceKey::Digital,
        SourceKey::Generico,
    ];

    pub fn form_key(&self) -> &'static str {
        match self {
            SourceKey::Corpx => "corpx",
            SourceKey::Itau => "itau",
            SourceKey::Digital => "digital",
            SourceKey::Generico => "generico",
        }
    }
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.form_key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        UploadFile {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, CheckpixError> {
        let bytes = std::fs::read(path).map_err(|source| CheckpixError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "arquivo".into());
        Ok(UploadFile { file_name, bytes })
    }
}

/// Whether statement sources may be left out of a submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourcePolicy {
    #[default]
    Optional,
    RequireAll,
}

/// Files selected for one submission: at most one file per statement source
/// and the ordered list of receipts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSet {
    sources: BTreeMap<SourceKey, UploadFile>,
    comprovantes: Vec<UploadFile>,
}

impl UploadSet {
    pub fn set_source(&mut self, key: SourceKey, file: Option<UploadFile>) {
        match file {
            Some(file) => {
                self.sources.insert(key, file);
            }
            None => {
                self.sources.remove(&key);
            }
        }
    }

    pub fn source(&self, key: SourceKey) -> Option<&UploadFile> {
        self.sources.get(&key)
    }

    /// Selected sources in [`SourceKey::ALL`] order.
    pub fn sources(&self) -> impl Iterator<Item = (SourceKey, &UploadFile)> {
        self.sources.iter().map(|(key, file)| (*key, file))
    }

    pub fn set_comprovantes(&mut self, files: Vec<UploadFile>) {
        self.comprovantes = files;
    }

    pub fn comprovantes(&self) -> &[UploadFile] {
        &self.comprovantes
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty() && self.comprovantes.is_empty()
    }

    /// Pre-flight check run before anything is sent.
    pub fn validate(&self, policy: SourcePolicy) -> Result<(), ValidationError> {
        if self.comprovantes.is_empty() {
            return Err(ValidationError::NoComprovantes);
        }
        if policy == SourcePolicy::RequireAll {
            if let Some(missing) = SourceKey::ALL
                .iter()
                .find(|key| !self.sources.contains_key(*key))
            {
                return Err(ValidationError::MissingSource(*missing));
            }
        }
        Ok(())
    }
}
