//! The filename reconciler: ties every record's image reference to an actual file.

use log::debug;
use serde_json::Value;

use crate::image_paths::{join_public_path, split_image_path};
use crate::models::{
  AppliedChange, MatchResult, ReconcileReport, UnresolvedImage, record_image, set_record_image,
};
use crate::pool::AssetPool;
use crate::strategy::StrategyChain;

/// Corrected records together with the report describing what changed.
#[derive(Debug, Clone)]
pub struct Reconciliation {
  /// Records in input order, with drifted references rewritten.
  pub records: Vec<Value>,
  /// Counts and details of the pass.
  pub report: ReconcileReport,
}

/// Pure reconciler over an immutable record slice and asset pool.
#[derive(Debug)]
pub struct Reconciler {
  public_prefix: String,
  chain: StrategyChain,
}

impl Reconciler {
  /// Reconciler rebuilding corrected references under `public_prefix`.
  pub fn new(public_prefix: impl Into<String>, chain: StrategyChain) -> Self {
    Self {
      public_prefix: public_prefix.into(),
      chain,
    }
  }

  /// Canonical prefix corrected references are rebuilt under.
  pub fn public_prefix(&self) -> &str {
    &self.public_prefix
  }

  /// Reconcile `records` against `pool` without touching either.
  pub fn reconcile(&self, records: &[Value], pool: &AssetPool) -> Reconciliation {
    let mut corrected = records.to_vec();
    let mut report = ReconcileReport {
      total_records: records.len(),
      ..ReconcileReport::default()
    };

    for (index, record) in corrected.iter_mut().enumerate() {
      let Some(image) = record_image(record).map(str::to_owned) else {
        report.skipped += 1;
        continue;
      };

      let filename = split_image_path(&image).filename;
      if pool.contains(filename) {
        report.already_correct += 1;
        continue;
      }

      match self.chain.resolve(filename, pool) {
        MatchResult::Matched { candidate, method } => {
          let new_path = join_public_path(&self.public_prefix, &candidate);
          if new_path == image {
            continue;
          }
          debug!("{image} -> {new_path} ({})", method.label());
          set_record_image(record, new_path.clone());
          report.applied.push(AppliedChange {
            index,
            old: image,
            new: new_path,
            method,
          });
        }
        MatchResult::NoMatch => {
          debug!("no candidate for {image}");
          report.unresolved.push(UnresolvedImage { index, image });
        }
      }
    }

    Reconciliation {
      records: corrected,
      report,
    }
  }
}

impl Default for Reconciler {
  fn default() -> Self {
    Self::new("/assets/cards", StrategyChain::default())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::MatchMethod;
  use crate::strategy::StrategyPreset;
  use serde_json::json;

  fn single(image: &str, pool: &[&str]) -> Reconciliation {
    let records = vec![json!({"name": "card", "image": image})];
    Reconciler::default().reconcile(&records, &AssetPool::new(pool.iter().copied()))
  }

  #[test]
  fn exact_filenames_are_left_alone() {
    let outcome = single("/legacy/path/Card-A.png", &["Card-A.png"]);
    assert_eq!(outcome.records[0]["image"], "/legacy/path/Card-A.png");
    assert_eq!(outcome.report.already_correct, 1);
    assert!(outcome.report.applied.is_empty());
  }

  #[test]
  fn resolves_case_only_drift() {
    let outcome = single("/x/card-a.PNG", &["Card-A.png"]);
    assert_eq!(outcome.records[0]["image"], "/assets/cards/Card-A.png");
    assert_eq!(outcome.report.applied[0].method, MatchMethod::CaseInsensitive);
  }

  #[test]
  fn resolves_separator_drift() {
    let outcome = single("/x/blue-eyes.jpg", &["Blue_Eyes.jpg"]);
    assert_eq!(outcome.records[0]["image"], "/assets/cards/Blue_Eyes.jpg");
    assert_eq!(outcome.report.applied[0].method, MatchMethod::Normalized);
  }

  #[test]
  fn falls_back_to_similarity() {
    let outcome = single("/x/DarkMagicianGrl.png", &["Dark Magician Girl.png"]);
    assert_eq!(outcome.records[0]["image"], "/assets/cards/Dark Magician Girl.png");
    assert_eq!(outcome.report.applied[0].method, MatchMethod::SimilarityRanked);
    assert_eq!(outcome.report.applied[0].old, "/x/DarkMagicianGrl.png");
  }

  #[test]
  fn falls_back_to_containment_below_cutoff() {
    let outcome = single(
      "/x/Skull",
      &["Kuriboh.png", "Summoned Skull Legendary Collection.png"],
    );
    assert_eq!(
      outcome.records[0]["image"],
      "/assets/cards/Summoned Skull Legendary Collection.png"
    );
    assert_eq!(outcome.report.applied[0].method, MatchMethod::NormalizedContainment);
  }

  #[test]
  fn leaves_unmatched_references_and_reports_them() {
    let outcome = single("/x/xyz123.png", &["Totally Unrelated.png"]);
    assert_eq!(outcome.records[0]["image"], "/x/xyz123.png");
    assert_eq!(outcome.report.unresolved, vec![UnresolvedImage {
      index: 0,
      image: "/x/xyz123.png".into(),
    }]);
  }

  #[test]
  fn skips_records_without_string_images() {
    let records = vec![json!({"name": "a"}), json!({"image": null}), json!(42)];
    let outcome = Reconciler::default().reconcile(&records, &AssetPool::new(["a.png"]));
    assert_eq!(outcome.records, records);
    assert_eq!(outcome.report.skipped, 3);
    assert_eq!(outcome.report.total_records, 3);
    assert_eq!(outcome.report.already_correct, 0);
  }

  #[test]
  fn bare_filenames_gain_the_public_prefix() {
    let outcome = single("card-a.png", &["Card-A.png"]);
    assert_eq!(outcome.records[0]["image"], "/assets/cards/Card-A.png");
  }

  #[test]
  fn second_pass_changes_nothing() {
    let pool = AssetPool::new([
      "Card-A.png",
      "Blue_Eyes.jpg",
      "Dark Magician Girl.png",
      "Summoned Skull.png",
    ]);
    let records = vec![
      json!({"image": "/x/card-a.PNG"}),
      json!({"image": "/x/blue-eyes.jpg"}),
      json!({"image": "/x/DarkMagicianGrl.png"}),
      json!({"image": "/x/xyz123.png"}),
      json!({"name": "no image"}),
    ];
    let reconciler = Reconciler::default();

    let first = reconciler.reconcile(&records, &pool);
    let second = reconciler.reconcile(&first.records, &pool);

    assert_eq!(second.records, first.records);
    assert!(second.report.applied.is_empty());
    assert_eq!(second.report.already_correct, 3);
    assert_eq!(second.report.unresolved.len(), 1);
  }

  #[test]
  fn inputs_are_not_modified() {
    let pool = AssetPool::new(["Card-A.png"]);
    let pool_before = pool.clone();
    let records = vec![json!({"image": "/x/card-a.png"})];
    let records_before = records.clone();

    let outcome = Reconciler::default().reconcile(&records, &pool);

    assert_eq!(pool, pool_before);
    assert_eq!(records, records_before);
    assert_ne!(outcome.records, records);
  }

  #[test]
  fn preserves_untouched_fields() {
    let records = vec![json!({"name": "Card A", "image": "/x/card-a.png", "level": 4})];
    let outcome = Reconciler::default().reconcile(&records, &AssetPool::new(["Card-A.png"]));
    assert_eq!(
      outcome.records[0],
      json!({"name": "Card A", "image": "/assets/cards/Card-A.png", "level": 4})
    );
  }

  #[test]
  fn honours_custom_prefix_and_preset() {
    let reconciler = Reconciler::new(
      "/img/",
      StrategyChain::from_preset(StrategyPreset::Normalized, 0.5),
    );
    let records = vec![
      json!({"image": "/x/card-a.png"}),
      json!({"image": "/x/DarkMagicianGrl.png"}),
    ];
    let pool = AssetPool::new(["Card-A.png", "Dark Magician Girl.png"]);
    let outcome = reconciler.reconcile(&records, &pool);
    assert_eq!(outcome.records[0]["image"], "/img/Card-A.png");
    assert_eq!(outcome.report.unresolved.len(), 1);
  }
}
