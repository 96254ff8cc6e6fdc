//! Read-only snapshot of the filenames present in the image directory.

use std::collections::HashSet;

use crate::image_paths::normalize_name;

/// One filename in the pool, with its comparison forms precomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetName {
  name: String,
  lower: String,
  normalized: String,
}

impl AssetName {
  fn new(name: String) -> Self {
    let lower = name.to_lowercase();
    let normalized = normalize_name(&name);
    Self {
      name,
      lower,
      normalized,
    }
  }

  /// Filename as stored on disk.
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Lower-cased filename.
  pub fn lower(&self) -> &str {
    &self.lower
  }

  /// Filename reduced to lower-case letters, digits and dots.
  pub fn normalized(&self) -> &str {
    &self.normalized
  }
}

/// Ordered set of distinct filenames.
///
/// Enumeration order is insertion order; strategies that break ties positionally rely on
/// it. Duplicate names keep their first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetPool {
  entries: Vec<AssetName>,
  exact: HashSet<String>,
}

impl AssetPool {
  /// Build a pool from filenames in enumeration order.
  pub fn new<I, S>(names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let mut pool = Self::default();
    for name in names {
      let name = name.into();
      if pool.exact.insert(name.clone()) {
        pool.entries.push(AssetName::new(name));
      }
    }
    pool
  }

  /// Case-sensitive membership test.
  pub fn contains(&self, filename: &str) -> bool {
    self.exact.contains(filename)
  }

  /// Entries in enumeration order.
  pub fn iter(&self) -> std::slice::Iter<'_, AssetName> {
    self.entries.iter()
  }

  /// First entry whose lower-cased form equals `lower`.
  pub fn first_with_lower(&self, lower: &str) -> Option<&AssetName> {
    self.entries.iter().find(|entry| entry.lower == lower)
  }

  /// Number of distinct filenames.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Returns `true` when the directory held no files.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl<'a> IntoIterator for &'a AssetPool {
  type Item = &'a AssetName;
  type IntoIter = std::slice::Iter<'a, AssetName>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}
