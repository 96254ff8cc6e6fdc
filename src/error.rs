//! Error type shared by the dataset driver, the runner and the re-casing mode.

use std::path::PathBuf;

/// Which input a [`ReconcileError::MissingInput`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
  /// The JSON record list.
  Dataset,
  /// The directory holding the image files.
  AssetDirectory,
}

/// Errors that abort a run before anything is written.
#[derive(Debug)]
pub enum ReconcileError {
  /// The dataset file or the asset directory does not exist.
  MissingInput {
    /// Which input is missing.
    kind: InputKind,
    /// Path that was looked up.
    path: PathBuf,
  },
  /// Reading or writing a file failed.
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// A JSON document could not be parsed or serialised.
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },
  /// The dataset parsed, but its top level is not a list.
  NotAList {
    /// Path of the offending dataset.
    path: PathBuf,
  },
  /// The re-casing anchor record is absent from the dataset.
  AnchorNotFound {
    /// Record attribute that was searched.
    field: String,
    /// Value the attribute was expected to hold.
    value: String,
  },
  /// The backup destination resolves to the dataset file itself.
  BackupCollision {
    /// Offending backup path.
    path: PathBuf,
  },
  /// A configuration value is out of range.
  InvalidConfig {
    /// Name of the offending setting.
    setting: &'static str,
    /// Human readable explanation.
    reason: String,
  },
}

impl std::fmt::Display for InputKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Dataset => f.write_str("dataset"),
      Self::AssetDirectory => f.write_str("asset directory"),
    }
  }
}

impl std::fmt::Display for ReconcileError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::MissingInput { kind, path } => {
        write!(f, "{} not found at {}", kind, path.display())
      }
      Self::Io { path, source } => {
        write!(f, "failed to access {}: {}", path.display(), source)
      }
      Self::Parse { path, source } => {
        write!(f, "failed to parse {}: {}", path.display(), source)
      }
      Self::NotAList { path } => {
        write!(f, "{} does not contain a JSON list of records", path.display())
      }
      Self::AnchorNotFound { field, value } => {
        write!(f, "start entry with {field} \"{value}\" not found, no changes made")
      }
      Self::BackupCollision { path } => {
        write!(f, "backup path {} is the dataset itself", path.display())
      }
      Self::InvalidConfig { setting, reason } => {
        write!(f, "invalid {setting}: {reason}")
      }
    }
  }
}

impl std::error::Error for ReconcileError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io { source, .. } => Some(source),
      Self::Parse { source, .. } => Some(source),
      _ => None,
    }
  }
}
