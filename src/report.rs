//! Plain-text rendering of run reports for the console.

use std::fmt::Write as _;

use crate::models::{RecaseReport, ReconcileReport, Suggestion};

/// Render a reconciliation report, echoing at most `sample_limit` applied changes.
pub fn render_reconcile_report(report: &ReconcileReport, pool_size: usize, sample_limit: usize) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "Assets scanned: {pool_size}");
  let _ = writeln!(out, "Records processed: {}", report.total_records);
  let _ = writeln!(out, "Already correct: {}", report.already_correct);
  let _ = writeln!(out, "Updated image paths: {}", report.applied.len());

  if !report.applied.is_empty() {
    let shown = report.applied.len().min(sample_limit);
    if shown < report.applied.len() {
      let _ = writeln!(out, "\nSample updates ({shown} of {}):", report.applied.len());
    } else {
      let _ = writeln!(out, "\nUpdates:");
    }
    for change in report.applied.iter().take(shown) {
      let _ = writeln!(out, "  {} -> {} ({})", change.old, change.new, change.method.label());
    }
  }

  if report.unresolved.is_empty() {
    let _ = writeln!(out, "\nAll image paths matched to files.");
  } else {
    let _ = writeln!(out, "\nUnresolved image paths: {}", report.unresolved.len());
    for entry in &report.unresolved {
      let _ = writeln!(out, "  {}", entry.image);
    }
  }

  out
}

/// Render a re-casing report.
pub fn render_recase_report(report: &RecaseReport) -> String {
  let mut out = String::new();
  let _ = writeln!(
    out,
    "Processed {} entries starting at index {}.",
    report.processed, report.start_index
  );
  let _ = writeln!(out, "Updated image paths: {}", report.changed.len());
  for change in &report.changed {
    let _ = writeln!(out, "  {} -> {}", change.old, change.new);
  }
  out
}

/// Render suggestion lists, one block per unmatched reference.
pub fn render_suggestions(suggestions: &[Suggestion]) -> String {
  let mut out = String::from("Unmatched entries with suggestions:\n");
  for suggestion in suggestions {
    let _ = writeln!(out, "\n {}", suggestion.image);
    if suggestion.candidates.is_empty() {
      let _ = writeln!(out, "    No suggestions");
    }
    for candidate in &suggestion.candidates {
      let _ = writeln!(out, "    {candidate}");
    }
  }
  let _ = writeln!(out, "\nTotal unmatched: {}", suggestions.len());
  out
}
