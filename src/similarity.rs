//! Sequence similarity based on longest matching blocks.
//!
//! The ratio of two sequences is `2 * M / T`, where `T` is the combined length and `M`
//! the number of elements covered by matching blocks. Blocks are found by taking the
//! longest common contiguous run, then recursing into the pieces to its left and right.
//! Among equally long runs the one starting earliest in `a`, then earliest in `b`, wins.

use std::cmp::Ordering;
use std::collections::HashMap;

/// Similarity ratio of two strings, in `[0, 1]`, counted over Unicode scalar values.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
  SimilarityScorer::new(b).ratio(a)
}

/// Scores many candidate strings against one fixed target.
///
/// The target's character index is built once, so scoring a pool of candidates only pays
/// for the candidates themselves.
#[derive(Debug, Clone)]
pub struct SimilarityScorer {
  target: Vec<char>,
  positions: HashMap<char, Vec<usize>>,
  counts: HashMap<char, usize>,
}

impl SimilarityScorer {
  /// Index the target string.
  pub fn new(target: &str) -> Self {
    let target: Vec<char> = target.chars().collect();
    let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
    let mut counts: HashMap<char, usize> = HashMap::new();
    for (index, ch) in target.iter().enumerate() {
      positions.entry(*ch).or_default().push(index);
      *counts.entry(*ch).or_default() += 1;
    }

    Self {
      target,
      positions,
      counts,
    }
  }

  /// Full longest-matching-blocks ratio of `candidate` against the target.
  pub fn ratio(&self, candidate: &str) -> f64 {
    let candidate: Vec<char> = candidate.chars().collect();
    let matched = self.matched_len(&candidate);
    ratio_of(matched, candidate.len() + self.target.len())
  }

  /// Upper bound on [`Self::ratio`] from the character multisets alone.
  pub fn quick_ratio(&self, candidate: &str) -> f64 {
    let mut available: HashMap<char, usize> = HashMap::new();
    let mut matches = 0;
    let mut length = 0;
    for ch in candidate.chars() {
      length += 1;
      let remaining = available
        .entry(ch)
        .or_insert_with(|| self.counts.get(&ch).copied().unwrap_or(0));
      if *remaining > 0 {
        *remaining -= 1;
        matches += 1;
      }
    }
    ratio_of(matches, length + self.target.len())
  }

  /// Upper bound on [`Self::quick_ratio`] from the lengths alone.
  pub fn real_quick_ratio(&self, candidate: &str) -> f64 {
    let length = candidate.chars().count();
    ratio_of(length.min(self.target.len()), length + self.target.len())
  }

  fn matched_len(&self, candidate: &[char]) -> usize {
    let mut total = 0;
    let mut pending = vec![(0, candidate.len(), 0, self.target.len())];

    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
      let (i, j, size) = self.longest_match(candidate, a_lo, a_hi, b_lo, b_hi);
      if size == 0 {
        continue;
      }
      total += size;
      if a_lo < i && b_lo < j {
        pending.push((a_lo, i, b_lo, j));
      }
      if i + size < a_hi && j + size < b_hi {
        pending.push((i + size, a_hi, j + size, b_hi));
      }
    }

    total
  }

  fn longest_match(
    &self,
    candidate: &[char],
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
  ) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (a_lo, b_lo, 0);
    // Length of the run ending at target index `j` for the previous candidate position.
    let mut run_ending: HashMap<usize, usize> = HashMap::new();

    for (i, ch) in candidate.iter().enumerate().take(a_hi).skip(a_lo) {
      let mut next_run: HashMap<usize, usize> = HashMap::new();
      if let Some(positions) = self.positions.get(ch) {
        for &j in positions {
          if j < b_lo {
            continue;
          }
          if j >= b_hi {
            break;
          }
          let previous = j
            .checked_sub(1)
            .and_then(|prev| run_ending.get(&prev))
            .copied()
            .unwrap_or(0);
          let size = previous + 1;
          next_run.insert(j, size);
          if size > best_size {
            best_i = i + 1 - size;
            best_j = j + 1 - size;
            best_size = size;
          }
        }
      }
      run_ending = next_run;
    }

    (best_i, best_j, best_size)
  }
}

fn ratio_of(matches: usize, length: usize) -> f64 {
  if length == 0 {
    1.0
  } else {
    2.0 * matches as f64 / length as f64
  }
}

/// Rank `possibilities` by similarity to `word`, keeping those scoring at least `cutoff`.
///
/// Results are ordered by score, highest first. Equal scores are ordered by candidate
/// text, greatest first, which keeps the ranking total and independent of input order.
/// At most `limit` entries are returned.
pub fn close_matches<'p, I>(word: &str, possibilities: I, limit: usize, cutoff: f64) -> Vec<(f64, &'p str)>
where
  I: IntoIterator<Item = &'p str>,
{
  if limit == 0 {
    return Vec::new();
  }

  let scorer = SimilarityScorer::new(word);
  let mut scored: Vec<(f64, &'p str)> = possibilities
    .into_iter()
    .filter(|candidate| {
      scorer.real_quick_ratio(candidate) >= cutoff && scorer.quick_ratio(candidate) >= cutoff
    })
    .filter_map(|candidate| {
      let score = scorer.ratio(candidate);
      (score >= cutoff).then_some((score, candidate))
    })
    .collect();

  scored.sort_by(|left, right| rank_descending(*left, *right));
  scored.truncate(limit);
  scored
}

fn rank_descending(left: (f64, &str), right: (f64, &str)) -> Ordering {
  right
    .0
    .partial_cmp(&left.0)
    .unwrap_or(Ordering::Equal)
    .then_with(|| right.1.cmp(left.1))
}
