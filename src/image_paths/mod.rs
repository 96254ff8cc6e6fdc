//! Helpers for taking apart and rebuilding image references.
//!
//! Splitting a reference into prefix and filename, normalising filenames for loose
//! comparison, and re-casing basenames are kept in separate submodules so each string
//! transform can be tested on its own. None of them touch the filesystem.

mod casing;
mod normalize;
mod split;

pub use casing::recase_filename;
pub use normalize::normalize_name;
pub use split::{ImagePath, join_public_path, split_image_path};
