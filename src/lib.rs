#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod dataset;
pub mod error;
pub mod image_paths;
pub mod models;
pub mod pool;
pub mod recase;
pub mod reconcile;
pub mod report;
pub mod runner;
pub mod similarity;
pub mod strategy;
pub mod suggest;

pub use config::ReconcileConfig;
pub use error::{InputKind, ReconcileError};
pub use models::{MatchMethod, MatchResult, ReconcileReport};
pub use pool::{AssetName, AssetPool};
pub use recase::{Anchor, recase_from_anchor};
pub use reconcile::{Reconciler, Reconciliation};
pub use runner::{ReconcileRunner, RunContext, RunOutcome};
pub use strategy::{MatchStrategy, StrategyChain, StrategyPreset};
