//! Data models for artsearch.

mod asset;
mod candidate;

pub use asset::{AssetKind, NormalizedAsset};
pub use candidate::{AssetQuery, SearchCandidate};
