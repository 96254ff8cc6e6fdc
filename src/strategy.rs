//! Ordered chain of filename matching strategies.
//!
//! Each strategy inspects the pool on its own terms and either names one winner or
//! passes. The chain stops at the first strategy that names a winner, so cheap and
//! confident comparisons run before loose ones.

use crate::image_paths::normalize_name;
use crate::models::{MatchMethod, MatchResult};
use crate::pool::{AssetName, AssetPool};
use crate::similarity::close_matches;

/// Default similarity cutoff for [`SimilarityRanked`].
pub const DEFAULT_SIMILARITY_CUTOFF: f64 = 0.5;

/// A single way of tying a filename to a pool entry.
pub trait MatchStrategy {
  /// Method reported for winners of this strategy.
  fn method(&self) -> MatchMethod;

  /// Pick at most one pool entry for `filename`.
  fn attempt<'p>(&self, filename: &str, pool: &'p AssetPool) -> Option<&'p AssetName>;
}

/// Lower-cased equality; the first pool entry wins on collisions.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseInsensitive;

impl MatchStrategy for CaseInsensitive {
  fn method(&self) -> MatchMethod {
    MatchMethod::CaseInsensitive
  }

  fn attempt<'p>(&self, filename: &str, pool: &'p AssetPool) -> Option<&'p AssetName> {
    pool.first_with_lower(&filename.to_lowercase())
  }
}

/// Equality of normalised forms; the first pool entry wins on collisions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalized;

impl MatchStrategy for Normalized {
  fn method(&self) -> MatchMethod {
    MatchMethod::Normalized
  }

  fn attempt<'p>(&self, filename: &str, pool: &'p AssetPool) -> Option<&'p AssetName> {
    let target = normalize_name(filename);
    pool.iter().find(|entry| entry.normalized() == target)
  }
}

/// Highest sequence similarity over lower-cased names, at or above `cutoff`.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityRanked {
  cutoff: f64,
}

impl SimilarityRanked {
  /// Strategy accepting candidates whose ratio is at least `cutoff`.
  pub fn new(cutoff: f64) -> Self {
    Self { cutoff }
  }
}

impl Default for SimilarityRanked {
  fn default() -> Self {
    Self::new(DEFAULT_SIMILARITY_CUTOFF)
  }
}

impl MatchStrategy for SimilarityRanked {
  fn method(&self) -> MatchMethod {
    MatchMethod::SimilarityRanked
  }

  fn attempt<'p>(&self, filename: &str, pool: &'p AssetPool) -> Option<&'p AssetName> {
    let target = filename.to_lowercase();
    let best = close_matches(&target, pool.iter().map(AssetName::lower), 1, self.cutoff);
    let (_, lower) = best.first()?;
    pool.first_with_lower(lower)
  }
}

/// Normalised filename contained in a normalised pool entry; first entry wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedContainment;

impl MatchStrategy for NormalizedContainment {
  fn method(&self) -> MatchMethod {
    MatchMethod::NormalizedContainment
  }

  fn attempt<'p>(&self, filename: &str, pool: &'p AssetPool) -> Option<&'p AssetName> {
    let target = normalize_name(filename);
    if target.is_empty() {
      return None;
    }
    pool
      .iter()
      .find(|entry| entry.normalized().contains(target.as_str()))
  }
}

/// Named strategy orderings, one per cleanup workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum StrategyPreset {
  /// Case-insensitive, normalised, similarity, then containment.
  #[default]
  Full,
  /// Case-insensitive and normalised equality only; never guesses.
  Normalized,
  /// Similarity ranking, then containment.
  Fuzzy,
}

/// Strategies tried in order until one names a winner.
pub struct StrategyChain {
  strategies: Vec<Box<dyn MatchStrategy>>,
}

impl StrategyChain {
  /// Chain over an explicit list of strategies.
  pub fn new(strategies: Vec<Box<dyn MatchStrategy>>) -> Self {
    Self { strategies }
  }

  /// Chain for a preset, using `cutoff` for the similarity step.
  pub fn from_preset(preset: StrategyPreset, cutoff: f64) -> Self {
    let strategies: Vec<Box<dyn MatchStrategy>> = match preset {
      StrategyPreset::Full => vec![
        Box::new(CaseInsensitive),
        Box::new(Normalized),
        Box::new(SimilarityRanked::new(cutoff)),
        Box::new(NormalizedContainment),
      ],
      StrategyPreset::Normalized => vec![Box::new(CaseInsensitive), Box::new(Normalized)],
      StrategyPreset::Fuzzy => vec![
        Box::new(SimilarityRanked::new(cutoff)),
        Box::new(NormalizedContainment),
      ],
    };
    Self::new(strategies)
  }

  /// Run the strategies in order for `filename`.
  pub fn resolve(&self, filename: &str, pool: &AssetPool) -> MatchResult {
    self
      .strategies
      .iter()
      .find_map(|strategy| {
        strategy
          .attempt(filename, pool)
          .map(|entry| MatchResult::Matched {
            candidate: entry.name().to_string(),
            method: strategy.method(),
          })
      })
      .unwrap_or(MatchResult::NoMatch)
  }

  /// Methods in the order they are tried.
  pub fn methods(&self) -> Vec<MatchMethod> {
    self.strategies.iter().map(|strategy| strategy.method()).collect()
  }
}

impl Default for StrategyChain {
  fn default() -> Self {
    Self::from_preset(StrategyPreset::Full, DEFAULT_SIMILARITY_CUTOFF)
  }
}

impl std::fmt::Debug for StrategyChain {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StrategyChain")
      .field("methods", &self.methods())
      .finish()
  }
}
