//! Icons Module - Marker icon contract and caching
//!
//! - [`IconGenerator`] - supplies icons for clusters and single items
//! - [`CachedIconGenerator`] - builds each size bucket / item category once

mod cache;
mod generator;

pub use cache::*;
pub use generator::*;
