//! The normalized ambitions document: the single JSON artifact the viewer
//! and the API serve from.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::data::model::{Ambition, FamilyClass, Nation};

/// Default document location for `serve` and `validate`: the conventional
/// extraction output directory is `viewer/`, and `extract` places the
/// document at `<out>/data/ambitions.json`.
pub const DEFAULT_DATASET_PATH: &str = "viewer/data/ambitions.json";

/// Complete normalized dataset. Map sections are BTreeMaps so repeated runs
/// over identical inputs serialize byte-identically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmbitionDataset {
    pub ambitions: Vec<Ambition>,
    pub nations: BTreeMap<String, Nation>,
    pub family_classes: BTreeMap<String, FamilyClass>,
    /// Keyed by class id; JSON object keys are the ids as strings.
    pub ambition_classes: BTreeMap<u32, String>,
}

#[derive(Debug)]
pub enum DatasetLoadError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for DatasetLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "unable to read dataset: {err}"),
            Self::Parse(err) => write!(f, "dataset is not valid JSON: {err}"),
        }
    }
}

impl std::error::Error for DatasetLoadError {}

/// Serialize the dataset as pretty-printed JSON with a trailing newline.
pub fn render_dataset(dataset: &AmbitionDataset) -> String {
    let mut out = serde_json::to_string_pretty(dataset)
        .unwrap_or_else(|_| "{}".to_string());
    out.push('\n');
    out
}

/// Write the dataset to `path`, creating parent directories as needed.
pub fn store_dataset(dataset: &AmbitionDataset, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_dataset(dataset))
}

pub fn load_dataset(path: &Path) -> Result<AmbitionDataset, DatasetLoadError> {
    let raw = fs::read_to_string(path).map_err(DatasetLoadError::Io)?;
    serde_json::from_str(&raw).map_err(DatasetLoadError::Parse)
}
