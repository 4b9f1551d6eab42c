//! Shared [`MaskBundle`] cache.
//!
//! Deriving a bundle costs `O(D·W·(W + D))` bit operations, which adds up
//! when many components instantiate the same register (every port of a
//! switch computing CRC-32 over a 64-bit bus, say). [`MaskCache`] memoizes
//! bundles per [`Config`] behind an [`Arc`].
//!
//! Bundles are computed outside the map's locks. When two threads miss on
//! the same config concurrently, both compute and the first insert wins; the
//! loser's bundle is dropped and it returns the winner's `Arc`.

use std::sync::{Arc, OnceLock};

use dashmap::DashMap;

use crate::{
  config::Config,
  mask::{MaskBundle, compute_masks},
};

/// Concurrent `Config -> Arc<MaskBundle>` map.
#[derive(Debug, Default)]
pub struct MaskCache {
  map: DashMap<Config, Arc<MaskBundle>>,
}

impl MaskCache {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Return the bundle for `config`, computing it on first use.
  pub fn get_or_compute(&self, config: &Config) -> Arc<MaskBundle> {
    if let Some(hit) = self.map.get(config) {
      return Arc::clone(hit.value());
    }

    log::debug!(target: "lfsr::cache", "miss: {config}");
    let bundle = Arc::new(compute_masks(config));
    Arc::clone(self.map.entry(config.clone()).or_insert(bundle).value())
  }

  /// Number of cached bundles.
  #[must_use]
  pub fn len(&self) -> usize {
    self.map.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.map.is_empty()
  }

  /// Drop every cached bundle. Outstanding `Arc`s stay valid.
  pub fn clear(&self) {
    self.map.clear();
  }
}

/// Process-wide cache, created on first use.
pub fn global() -> &'static MaskCache {
  static GLOBAL: OnceLock<MaskCache> = OnceLock::new();
  GLOBAL.get_or_init(MaskCache::new)
}
