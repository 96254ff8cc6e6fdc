//! Run orchestrator: loads inputs, runs one workflow and persists its result.
//!
//! Every input is loaded and validated before the first write. A real run writes the
//! untouched records to a backup file first and only then replaces the dataset, so an
//! aborted run leaves nothing half-written behind.

use std::path::{Path, PathBuf};

use log::info;
use serde_json::Value;

use crate::config::ReconcileConfig;
use crate::dataset::{backup_path_for, list_asset_pool, load_records, write_backup, write_records};
use crate::error::ReconcileError;
use crate::models::{RecaseReport, ReconcileReport, Suggestion};
use crate::pool::AssetPool;
use crate::recase::{Anchor, recase_from_anchor};
use crate::reconcile::Reconciler;
use crate::strategy::{StrategyChain, StrategyPreset};
use crate::suggest::suggest;

/// Result type used by every workflow.
pub type RunResult<T> = Result<T, ReconcileError>;

/// Resolved locations and knobs for one run.
#[derive(Debug, Clone)]
pub struct RunContext {
  /// JSON record list to read and rewrite.
  pub dataset_path: PathBuf,
  /// Directory whose files form the asset pool.
  pub assets_dir: PathBuf,
  /// Canonical public prefix for corrected references.
  pub public_prefix: String,
  /// Similarity cutoff for ranked matching and suggestions.
  pub similarity_cutoff: f64,
  /// Maximum candidates per suggestion.
  pub suggestion_limit: usize,
}

impl RunContext {
  /// Resolve the configured paths against `project_root`.
  pub fn from_config(project_root: &Path, config: &ReconcileConfig) -> Self {
    Self {
      dataset_path: config.dataset_file(project_root),
      assets_dir: config.assets_path(project_root),
      public_prefix: config.public_prefix.clone(),
      similarity_cutoff: config.similarity_cutoff,
      suggestion_limit: config.suggestion_limit,
    }
  }
}

/// What a workflow produced and where it was persisted.
#[derive(Debug, Clone)]
pub struct RunOutcome<R> {
  /// Workflow-specific report.
  pub report: R,
  /// Number of files in the asset pool, when the workflow consulted it.
  pub assets_scanned: Option<usize>,
  /// Location of the pre-run backup, when one was written.
  pub backup_path: Option<PathBuf>,
  /// Whether the dataset was rewritten.
  pub written: bool,
}

/// High-level helper running the reconciliation workflows against one dataset.
pub struct ReconcileRunner {
  context: RunContext,
}

impl ReconcileRunner {
  /// Create a runner for the provided context.
  pub fn new(context: RunContext) -> Self {
    Self { context }
  }

  /// Resolve drifted references with the strategies of `preset`.
  pub fn reconcile(&self, preset: StrategyPreset, dry_run: bool) -> RunResult<RunOutcome<ReconcileReport>> {
    let (records, pool) = self.load_inputs()?;

    let reconciler = Reconciler::new(
      self.context.public_prefix.as_str(),
      StrategyChain::from_preset(preset, self.context.similarity_cutoff),
    );
    let reconciliation = reconciler.reconcile(&records, &pool);
    info!(
      "{} updated, {} unresolved, {} already correct",
      reconciliation.report.applied.len(),
      reconciliation.report.unresolved.len(),
      reconciliation.report.already_correct
    );

    let backup_path = self.persist(&records, &reconciliation.records, "reconcile", dry_run)?;
    Ok(RunOutcome {
      report: reconciliation.report,
      assets_scanned: Some(pool.len()),
      written: backup_path.is_some(),
      backup_path,
    })
  }

  /// Re-case basenames from the record matching `anchor` onwards.
  pub fn recase(&self, anchor: &Anchor, dry_run: bool) -> RunResult<RunOutcome<RecaseReport>> {
    let records = load_records(&self.context.dataset_path)?;
    info!("loaded {} records from {}", records.len(), self.context.dataset_path.display());

    let recasing = recase_from_anchor(&records, anchor)?;
    let backup_path = self.persist(&records, &recasing.records, "recase", dry_run)?;
    Ok(RunOutcome {
      report: recasing.report,
      assets_scanned: None,
      written: backup_path.is_some(),
      backup_path,
    })
  }

  /// List candidate files for drifted references without rewriting anything.
  pub fn suggest(&self) -> RunResult<RunOutcome<Vec<Suggestion>>> {
    let (records, pool) = self.load_inputs()?;
    let suggestions = suggest(
      &records,
      &pool,
      self.context.suggestion_limit,
      self.context.similarity_cutoff,
    );

    Ok(RunOutcome {
      report: suggestions,
      assets_scanned: Some(pool.len()),
      backup_path: None,
      written: false,
    })
  }

  fn load_inputs(&self) -> RunResult<(Vec<Value>, AssetPool)> {
    let records = load_records(&self.context.dataset_path)?;
    let pool = list_asset_pool(&self.context.assets_dir)?;
    info!(
      "loaded {} records from {} and {} files from {}",
      records.len(),
      self.context.dataset_path.display(),
      pool.len(),
      self.context.assets_dir.display()
    );
    Ok((records, pool))
  }

  fn persist(
    &self,
    original: &[Value],
    updated: &[Value],
    tag: &str,
    dry_run: bool,
  ) -> RunResult<Option<PathBuf>> {
    if dry_run {
      info!("dry run, {} left untouched", self.context.dataset_path.display());
      return Ok(None);
    }

    let dataset = &self.context.dataset_path;
    let backup = backup_path_for(dataset, tag);
    write_backup(dataset, &backup, original)?;
    info!("backup written to {}", backup.display());

    write_records(dataset, updated)?;
    info!("wrote {} records to {}", updated.len(), dataset.display());
    Ok(Some(backup))
  }
}
