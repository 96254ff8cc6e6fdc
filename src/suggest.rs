//! Suggestion-only mode: list likely files for drifted references without rewriting.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::image_paths::{normalize_name, split_image_path};
use crate::models::{Suggestion, record_image};
use crate::pool::{AssetName, AssetPool};
use crate::similarity::close_matches;

/// Propose up to `limit` pool filenames for each distinct reference not present verbatim.
///
/// Similarity candidates at or above `cutoff` come first; when there are none the first
/// normalised-containment hits in pool order are offered instead.
pub fn suggest(records: &[Value], pool: &AssetPool, limit: usize, cutoff: f64) -> Vec<Suggestion> {
  let mut seen = BTreeSet::new();
  let mut suggestions = Vec::new();

  for image in records.iter().filter_map(record_image) {
    let filename = split_image_path(image).filename;
    if pool.contains(filename) || !seen.insert(image.to_string()) {
      continue;
    }

    let mut candidates = similar_names(filename, pool, limit, cutoff);
    if candidates.is_empty() {
      candidates = containing_names(filename, pool, limit);
    }

    suggestions.push(Suggestion {
      image: image.to_string(),
      candidates,
    });
  }

  suggestions
}

fn similar_names(filename: &str, pool: &AssetPool, limit: usize, cutoff: f64) -> Vec<String> {
  let target = filename.to_lowercase();
  let mut names = Vec::new();
  for (_, lower) in close_matches(&target, pool.iter().map(AssetName::lower), limit, cutoff) {
    if let Some(entry) = pool.first_with_lower(lower) {
      if !names.iter().any(|name| name == entry.name()) {
        names.push(entry.name().to_string());
      }
    }
  }
  names
}

fn containing_names(filename: &str, pool: &AssetPool, limit: usize) -> Vec<String> {
  let target = normalize_name(filename);
  if target.is_empty() {
    return Vec::new();
  }
  pool
    .iter()
    .filter(|entry| entry.normalized().contains(target.as_str()))
    .take(limit)
    .map(|entry| entry.name().to_string())
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn pool() -> AssetPool {
    AssetPool::new([
      "Dark Magician.png",
      "Dark Magician Girl.png",
      "Summoned Skull Legendary Collection.png",
      "Kuriboh.png",
    ])
  }

  #[test]
  fn ranks_similar_names_best_first() {
    let records = vec![json!({"image": "/x/dark-magician.png"})];
    let suggestions = suggest(&records, &pool(), 5, 0.5);

    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].candidates[..2], [
      "Dark Magician.png".to_string(),
      "Dark Magician Girl.png".to_string()
    ]);
  }

  #[test]
  fn falls_back_to_containment() {
    let records = vec![json!({"image": "/x/Skull"})];
    let suggestions = suggest(&records, &pool(), 5, 0.5);
    assert_eq!(suggestions[0].candidates, vec![
      "Summoned Skull Legendary Collection.png".to_string()
    ]);
  }

  #[test]
  fn reports_each_image_once_and_skips_exact_ones() {
    let records = vec![
      json!({"image": "/x/zzz.gif"}),
      json!({"image": "/x/zzz.gif"}),
      json!({"image": "/assets/cards/Kuriboh.png"}),
      json!({"name": "no image"}),
    ];
    let suggestions = suggest(&records, &pool(), 5, 0.5);
    assert_eq!(suggestions, vec![Suggestion {
      image: "/x/zzz.gif".into(),
      candidates: Vec::new(),
    }]);
  }

  #[test]
  fn honours_limit() {
    let records = vec![json!({"image": "/x/dark magician.png"})];
    let suggestions = suggest(&records, &pool(), 1, 0.0);
    assert_eq!(suggestions[0].candidates, vec!["Dark Magician.png".to_string()]);
  }
}
