//! Anchor-scoped basename re-casing.
//!
//! Starting at a designated record and running to the end of the dataset, references
//! whose basename carries upper-case letters are rewritten to a capitalised basename with
//! a lower-case extension. The asset pool is not consulted.

use log::debug;
use serde_json::Value;

use crate::error::ReconcileError;
use crate::image_paths::recase_filename;
use crate::models::{RecaseChange, RecaseReport, record_image, set_record_image};

/// Identifies the record re-casing starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
  /// Record attribute to compare.
  pub field: String,
  /// Exact value the attribute must hold.
  pub value: String,
}

impl Anchor {
  /// Anchor on `field == value`.
  pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
    Self {
      field: field.into(),
      value: value.into(),
    }
  }

  /// Index of the first record matching the anchor.
  pub fn locate(&self, records: &[Value]) -> Option<usize> {
    records.iter().position(|record| {
      record
        .get(&self.field)
        .and_then(Value::as_str)
        .is_some_and(|value| value == self.value)
    })
  }
}

/// Re-cased records together with the report describing what changed.
#[derive(Debug, Clone)]
pub struct Recasing {
  /// Records in input order.
  pub records: Vec<Value>,
  /// Counts and details of the pass.
  pub report: RecaseReport,
}

/// Re-case basenames from the anchor record onwards.
///
/// Fails without producing any records when the anchor is absent, so a caller never ends
/// up with a half-processed dataset.
pub fn recase_from_anchor(records: &[Value], anchor: &Anchor) -> Result<Recasing, ReconcileError> {
  let start_index = anchor
    .locate(records)
    .ok_or_else(|| ReconcileError::AnchorNotFound {
      field: anchor.field.clone(),
      value: anchor.value.clone(),
    })?;

  let mut recased = records.to_vec();
  let mut changed = Vec::new();

  for (index, record) in recased.iter_mut().enumerate().skip(start_index) {
    let Some(image) = record_image(record).map(str::to_owned) else {
      continue;
    };
    let Some((prefix, filename)) = image.rsplit_once('/') else {
      continue;
    };
    let Some(new_filename) = recase_filename(filename) else {
      continue;
    };

    let new_path = format!("{prefix}/{new_filename}");
    if new_path == image {
      continue;
    }
    debug!("{image} -> {new_path}");
    set_record_image(record, new_path.clone());
    changed.push(RecaseChange {
      index,
      old: image,
      new: new_path,
    });
  }

  Ok(Recasing {
    records: recased,
    report: RecaseReport {
      start_index,
      processed: records.len() - start_index,
      changed,
    },
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn dataset() -> Vec<Value> {
    (0..10)
      .map(|index| {
        let name = if index == 5 {
          "SCARSTECH CRUSADER".to_string()
        } else {
          format!("CARD {index}")
        };
        json!({"name": name, "image": format!("/assets/cards/CARD-{index}.PNG")})
      })
      .collect()
  }

  #[test]
  fn rewrites_only_from_the_anchor_onwards() {
    let records = dataset();
    let outcome = recase_from_anchor(&records, &Anchor::new("name", "SCARSTECH CRUSADER")).unwrap();

    assert_eq!(outcome.records[..5], records[..5]);
    assert_eq!(outcome.records[5]["image"], "/assets/cards/Card-5.png");
    assert_eq!(outcome.records[9]["image"], "/assets/cards/Card-9.png");
    assert_eq!(outcome.report.start_index, 5);
    assert_eq!(outcome.report.processed, 5);
    assert_eq!(outcome.report.changed.len(), 5);
  }

  #[test]
  fn missing_anchor_fails_without_changes() {
    let records = dataset();
    let err = recase_from_anchor(&records, &Anchor::new("name", "BLUE-EYES")).unwrap_err();
    assert!(matches!(err, ReconcileError::AnchorNotFound { .. }));
  }

  #[test]
  fn transforms_shouting_filenames() {
    let records = vec![
      json!({"name": "start", "image": "/assets/cards/DARK-MAGICIAN.PNG"}),
      json!({"name": "lower", "image": "/assets/cards/kuriboh.PNG"}),
      json!({"name": "done", "image": "/assets/cards/Kuriboh.png"}),
    ];
    let outcome = recase_from_anchor(&records, &Anchor::new("name", "start")).unwrap();

    assert_eq!(outcome.records[0]["image"], "/assets/cards/Dark-magician.png");
    // No upper-case letter in the basename, so the extension is not touched either.
    assert_eq!(outcome.records[1]["image"], "/assets/cards/kuriboh.PNG");
    assert_eq!(outcome.records[2]["image"], "/assets/cards/Kuriboh.png");
    assert_eq!(outcome.report.changed, vec![RecaseChange {
      index: 0,
      old: "/assets/cards/DARK-MAGICIAN.PNG".into(),
      new: "/assets/cards/Dark-magician.png".into(),
    }]);
  }

  #[test]
  fn skips_references_without_prefix_or_extension() {
    let records = vec![
      json!({"name": "start", "image": "DARK.PNG"}),
      json!({"image": "/assets/cards/NOEXT"}),
      json!({"image": 3}),
    ];
    let outcome = recase_from_anchor(&records, &Anchor::new("name", "start")).unwrap();
    assert_eq!(outcome.records, records);
    assert!(outcome.report.changed.is_empty());
    assert_eq!(outcome.report.processed, 3);
  }

  #[test]
  fn anchor_matches_string_values_exactly() {
    let records = vec![json!({"name": "scarstech crusader"}), json!({"name": 5})];
    assert_eq!(Anchor::new("name", "SCARSTECH CRUSADER").locate(&records), None);
    assert_eq!(Anchor::new("name", "scarstech crusader").locate(&records), Some(0));
  }
}
