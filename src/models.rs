//! Data structures produced while reconciling image references.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Record attribute holding the image reference.
pub const IMAGE_FIELD: &str = "image";

/// Image reference of a record, when the record is an object with a string `image`.
pub fn record_image(record: &Value) -> Option<&str> {
  record.get(IMAGE_FIELD).and_then(Value::as_str)
}

/// Replace the image reference of a record, leaving every other field untouched.
///
/// Non-object records are returned as they are.
pub fn set_record_image(record: &mut Value, image: String) {
  if let Some(fields) = record.as_object_mut() {
    fields.insert(IMAGE_FIELD.to_string(), Value::String(image));
  }
}

/// How a drifted reference was tied to an actual file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
  /// Filename present verbatim.
  ///
  /// Reserved for reporting: the reconciler counts verbatim hits as already correct
  /// instead of producing a match for them.
  Exact,
  /// Filename equal once both sides are lower-cased.
  CaseInsensitive,
  /// Filename equal once both sides keep only letters, digits and dots.
  Normalized,
  /// Best candidate by sequence similarity above the cutoff.
  SimilarityRanked,
  /// Normalised filename found inside a normalised candidate.
  NormalizedContainment,
}

impl MatchMethod {
  /// Short label used in console output.
  pub fn label(self) -> &'static str {
    match self {
      Self::Exact => "exact",
      Self::CaseInsensitive => "case-insensitive",
      Self::Normalized => "normalized",
      Self::SimilarityRanked => "similarity",
      Self::NormalizedContainment => "containment",
    }
  }
}

/// Outcome of running the strategy chain for one filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
  /// No strategy produced a candidate.
  NoMatch,
  /// A strategy chose `candidate` from the pool.
  Matched {
    /// Actual filename in the asset pool.
    candidate: String,
    /// Strategy that produced the candidate.
    method: MatchMethod,
  },
}

/// A reference rewritten by the reconciler.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppliedChange {
  /// Position of the record in the dataset.
  pub index: usize,
  /// Reference before correction.
  pub old: String,
  /// Reference after correction.
  pub new: String,
  /// Strategy that justified the change.
  pub method: MatchMethod,
}

/// A reference for which no candidate was found.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UnresolvedImage {
  /// Position of the record in the dataset.
  pub index: usize,
  /// Reference left untouched.
  pub image: String,
}

/// Summary of one reconciliation pass, consumed by the console reporter.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ReconcileReport {
  /// Number of records in the dataset, including skipped ones.
  pub total_records: usize,
  /// Records whose filename already exists verbatim.
  pub already_correct: usize,
  /// Records without a string image reference.
  pub skipped: usize,
  /// Rewritten references in dataset order.
  pub applied: Vec<AppliedChange>,
  /// References without any candidate, in dataset order.
  pub unresolved: Vec<UnresolvedImage>,
}

/// A reference rewritten by the basename re-casing mode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RecaseChange {
  /// Position of the record in the dataset.
  pub index: usize,
  /// Reference before re-casing.
  pub old: String,
  /// Reference after re-casing.
  pub new: String,
}

/// Summary of one re-casing pass.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RecaseReport {
  /// Index of the anchor record.
  pub start_index: usize,
  /// Records considered, from the anchor to the end of the dataset.
  pub processed: usize,
  /// Rewritten references in dataset order.
  pub changed: Vec<RecaseChange>,
}

/// Candidate filenames proposed for a reference that is not present verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Suggestion {
  /// Reference as found in the dataset.
  pub image: String,
  /// Pool filenames, best first. Empty when nothing came close.
  pub candidates: Vec<String>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn reads_string_images_only() {
    assert_eq!(record_image(&json!({"image": "/a/b.png"})), Some("/a/b.png"));
    assert_eq!(record_image(&json!({"image": 7})), None);
    assert_eq!(record_image(&json!({"name": "x"})), None);
    assert_eq!(record_image(&json!("bare string")), None);
  }

  #[test]
  fn replacing_image_keeps_field_order() {
    let mut record = json!({"name": "A", "image": "/x/a.png", "atk": 1200});
    set_record_image(&mut record, "/assets/cards/A.png".into());
    let keys: Vec<&String> = record.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["name", "image", "atk"]);
    assert_eq!(record["image"], "/assets/cards/A.png");
  }

  #[test]
  fn methods_serialise_in_snake_case() {
    let encoded = serde_json::to_string(&MatchMethod::SimilarityRanked).unwrap();
    assert_eq!(encoded, "\"similarity_ranked\"");
  }
}
