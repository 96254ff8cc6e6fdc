//! Filesystem collaborators: loading the record list, listing images, writing results.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use same_file::is_same_file;
use serde_json::Value;

use crate::error::{InputKind, ReconcileError};
use crate::pool::AssetPool;

/// Load the JSON record list from `path`.
pub fn load_records(path: &Path) -> Result<Vec<Value>, ReconcileError> {
  let content = match fs::read_to_string(path) {
    Ok(content) => content,
    Err(err) if err.kind() == ErrorKind::NotFound => {
      return Err(ReconcileError::MissingInput {
        kind: InputKind::Dataset,
        path: path.to_path_buf(),
      });
    }
    Err(err) => {
      return Err(ReconcileError::Io {
        path: path.to_path_buf(),
        source: err,
      });
    }
  };

  let document: Value = serde_json::from_str(&content).map_err(|err| ReconcileError::Parse {
    path: path.to_path_buf(),
    source: err,
  })?;

  match document {
    Value::Array(records) => Ok(records),
    _ => Err(ReconcileError::NotAList {
      path: path.to_path_buf(),
    }),
  }
}

/// Snapshot the regular files directly inside `dir`, sorted by name.
///
/// Subdirectories are not descended into and names that are not valid UTF-8 are skipped,
/// since no dataset reference could spell them.
pub fn list_asset_pool(dir: &Path) -> Result<AssetPool, ReconcileError> {
  let entries = fs::read_dir(dir).map_err(|err| match err.kind() {
    ErrorKind::NotFound | ErrorKind::NotADirectory => ReconcileError::MissingInput {
      kind: InputKind::AssetDirectory,
      path: dir.to_path_buf(),
    },
    _ => ReconcileError::Io {
      path: dir.to_path_buf(),
      source: err,
    },
  })?;

  let mut names = Vec::new();
  for entry in entries {
    let entry = entry.map_err(|err| ReconcileError::Io {
      path: dir.to_path_buf(),
      source: err,
    })?;
    if !entry.path().is_file() {
      continue;
    }
    if let Ok(name) = entry.file_name().into_string() {
      names.push(name);
    }
  }
  names.sort();

  Ok(AssetPool::new(names))
}

/// Write `records` as two-space indented JSON, leaving non-ASCII text unescaped.
pub fn write_records(path: &Path, records: &[Value]) -> Result<(), ReconcileError> {
  let encoded = serde_json::to_string_pretty(records).map_err(|err| ReconcileError::Parse {
    path: path.to_path_buf(),
    source: err,
  })?;
  fs::write(path, encoded).map_err(|err| ReconcileError::Io {
    path: path.to_path_buf(),
    source: err,
  })
}

/// Backup location for `dataset`, tagged with the workflow that produced it.
///
/// `src/data/cards.json` with tag `reconcile` becomes `src/data/cards.reconcile.bak`.
pub fn backup_path_for(dataset: &Path, tag: &str) -> PathBuf {
  let stem = dataset
    .file_stem()
    .map(|stem| stem.to_string_lossy().into_owned())
    .unwrap_or_else(|| "dataset".into());
  dataset.with_file_name(format!("{stem}.{tag}.bak"))
}

/// Persist the untouched `records` to `backup` before the dataset is overwritten.
pub fn write_backup(dataset: &Path, backup: &Path, records: &[Value]) -> Result<(), ReconcileError> {
  let collides = backup == dataset
    || (backup.exists()
      && is_same_file(dataset, backup).map_err(|err| ReconcileError::Io {
        path: backup.to_path_buf(),
        source: err,
      })?);
  if collides {
    return Err(ReconcileError::BackupCollision {
      path: backup.to_path_buf(),
    });
  }
  write_records(backup, records)
}
