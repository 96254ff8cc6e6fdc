use std::path::PathBuf;

use anyhow::{Context, Result};
use card_image_fix::report::{render_recase_report, render_reconcile_report, render_suggestions};
use card_image_fix::{Anchor, ReconcileConfig, ReconcileRunner, RunContext, StrategyPreset};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(
  name = "card-image-fix",
  version,
  about = "Repair dataset image references against the files on disk"
)]
struct Cli {
  #[command(flatten)]
  shared: SharedArgs,

  #[command(subcommand)]
  command: Command,
}

#[derive(Args, Debug)]
struct SharedArgs {
  /// Project root the configured paths are relative to
  #[arg(long, global = true, value_name = "DIR", default_value = ".")]
  root: PathBuf,
  /// Configuration file (default: `<root>/reconcile.config.json`)
  #[arg(long, global = true, value_name = "FILE")]
  config: Option<PathBuf>,
  /// Dataset to reconcile, overriding the configured path
  #[arg(long, global = true, value_name = "FILE")]
  dataset: Option<PathBuf>,
  /// Image directory, overriding the configured path
  #[arg(long, global = true, value_name = "DIR")]
  assets: Option<PathBuf>,
  /// Public prefix corrected references are rebuilt under
  #[arg(long, global = true)]
  prefix: Option<String>,
  /// Minimum similarity ratio for fuzzy matches
  #[arg(long, global = true)]
  cutoff: Option<f64>,
  /// Print the report as JSON instead of text
  #[arg(long, global = true)]
  json: bool,
  /// Log every applied change
  #[arg(short, long, global = true)]
  verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Rewrite drifted image references to the files that exist
  Reconcile {
    /// Which matching strategies to try
    #[arg(long, value_enum, default_value_t = StrategyPreset::Full)]
    preset: StrategyPreset,
    /// Only report what would change
    #[arg(long)]
    dry_run: bool,
  },

  /// Capitalise shouting basenames from an anchor record onwards
  Recase {
    /// Value identifying the first record to re-case
    #[arg(long, value_name = "NAME")]
    anchor: String,
    /// Record attribute the anchor is matched against
    #[arg(long)]
    field: Option<String>,
    /// Only report what would change
    #[arg(long)]
    dry_run: bool,
  },

  /// List likely files for drifted references without rewriting
  Suggest {
    /// Maximum candidates per reference
    #[arg(long)]
    limit: Option<usize>,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let mut clog = colog::default_builder();
  clog.filter(
    None,
    if cli.shared.verbose {
      log::LevelFilter::Debug
    } else {
      log::LevelFilter::Info
    },
  );
  clog.init();

  let mut config = load_config(&cli.shared)?;
  if let Command::Suggest { limit: Some(limit) } = &cli.command {
    config.suggestion_limit = *limit;
  }
  config.validate().context("invalid configuration")?;

  let mut context = RunContext::from_config(&cli.shared.root, &config);
  if let Some(dataset) = &cli.shared.dataset {
    context.dataset_path = dataset.clone();
  }
  if let Some(assets) = &cli.shared.assets {
    context.assets_dir = assets.clone();
  }
  let runner = ReconcileRunner::new(context);

  match cli.command {
    Command::Reconcile { preset, dry_run } => {
      let outcome = runner.reconcile(preset, dry_run).context("reconciliation aborted")?;
      if cli.shared.json {
        print_json(&outcome.report)?;
      } else {
        print!(
          "{}",
          render_reconcile_report(
            &outcome.report,
            outcome.assets_scanned.unwrap_or(0),
            config.report_sample_limit
          )
        );
      }
      if let Some(backup) = outcome.backup_path {
        println!("Backup written to {}", backup.display());
      }
    }

    Command::Recase {
      anchor,
      field,
      dry_run,
    } => {
      let anchor = Anchor::new(field.unwrap_or_else(|| config.anchor_field.clone()), anchor);
      let outcome = runner.recase(&anchor, dry_run).context("re-casing aborted")?;
      if cli.shared.json {
        print_json(&outcome.report)?;
      } else {
        print!("{}", render_recase_report(&outcome.report));
      }
      if let Some(backup) = outcome.backup_path {
        println!("Backup written to {}", backup.display());
      }
    }

    Command::Suggest { .. } => {
      let outcome = runner.suggest().context("suggestion run aborted")?;
      if cli.shared.json {
        print_json(&outcome.report)?;
      } else {
        print!("{}", render_suggestions(&outcome.report));
      }
    }
  }

  Ok(())
}

fn load_config(args: &SharedArgs) -> Result<ReconcileConfig> {
  let mut config = match &args.config {
    Some(path) => ReconcileConfig::from_path(path)
      .with_context(|| format!("failed to read configuration {}", path.display()))?,
    None => ReconcileConfig::discover(&args.root),
  };

  if let Some(prefix) = &args.prefix {
    config.public_prefix = prefix.clone();
  }
  if let Some(cutoff) = args.cutoff {
    config.similarity_cutoff = cutoff;
  }
  Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
  let encoded = serde_json::to_string_pretty(value).context("failed to encode report")?;
  println!("{encoded}");
  Ok(())
}
