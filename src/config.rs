//! Project configuration loader describing where the dataset and images live.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::Deserialize;

use crate::error::ReconcileError;

const DEFAULT_CONFIG_FILE: &str = "reconcile.config.json";

/// Discoverable project configuration describing file locations and matching knobs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
  /// Path, relative to the project root, of the JSON record list.
  pub dataset_path: String,
  /// Path, relative to the project root, of the directory holding the images.
  pub assets_dir: String,
  /// Canonical public path that corrected references are rebuilt under.
  pub public_prefix: String,
  /// Minimum similarity ratio accepted by the similarity-ranked strategy.
  pub similarity_cutoff: f64,
  /// Maximum number of candidates listed per image in suggestion mode.
  pub suggestion_limit: usize,
  /// Record attribute used to locate the re-casing anchor.
  pub anchor_field: String,
  /// Maximum number of applied changes echoed in the console report.
  pub report_sample_limit: usize,
}

impl Default for ReconcileConfig {
  fn default() -> Self {
    Self {
      dataset_path: "src/data/cards.json".into(),
      assets_dir: "public/assets/cards".into(),
      public_prefix: "/assets/cards".into(),
      similarity_cutoff: 0.5,
      suggestion_limit: 5,
      anchor_field: "name".into(),
      report_sample_limit: 20,
    }
  }
}

impl ReconcileConfig {
  /// Attempt to load configuration from the provided project root.
  ///
  /// When the configuration file does not exist we fallback to default values so a bare
  /// checkout still works with the conventional layout. A file that exists but cannot be
  /// read is reported before falling back.
  pub fn discover(project_root: &Path) -> Self {
    let candidate = project_root.join(DEFAULT_CONFIG_FILE);
    if !candidate.exists() {
      return Self::default();
    }
    match Self::load(&candidate) {
      Ok(config) => config,
      Err(err) => {
        warn!("{err}; using default configuration");
        Self::default()
      }
    }
  }

  /// Read configuration from a specific JSON file.
  pub fn from_path(path: &Path) -> Option<Self> {
    Self::load(path).ok()
  }

  /// Read configuration from a specific JSON file, keeping the failure reason.
  pub fn load(path: &Path) -> Result<Self, ReconcileError> {
    let content = fs::read_to_string(path).map_err(|err| ReconcileError::Io {
      path: path.to_path_buf(),
      source: err,
    })?;
    serde_json::from_str(&content).map_err(|err| ReconcileError::Parse {
      path: path.to_path_buf(),
      source: err,
    })
  }

  /// Reject settings the matching strategies cannot work with.
  pub fn validate(&self) -> Result<(), ReconcileError> {
    if !(0.0..=1.0).contains(&self.similarity_cutoff) {
      return Err(ReconcileError::InvalidConfig {
        setting: "similarity_cutoff",
        reason: format!("{} is outside [0, 1]", self.similarity_cutoff),
      });
    }
    if self.public_prefix.trim_matches('/').is_empty() {
      return Err(ReconcileError::InvalidConfig {
        setting: "public_prefix",
        reason: "must name a directory".into(),
      });
    }
    Ok(())
  }

  /// Absolute location of the dataset for the given project root.
  pub fn dataset_file(&self, project_root: &Path) -> PathBuf {
    project_root.join(&self.dataset_path)
  }

  /// Absolute location of the image directory for the given project root.
  pub fn assets_path(&self, project_root: &Path) -> PathBuf {
    project_root.join(&self.assets_dir)
  }
}
