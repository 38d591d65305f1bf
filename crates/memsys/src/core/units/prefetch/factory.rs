//! Prefetcher construction from option identifiers.
//!
//! Unknown identifiers never fail construction: they produce the null prefetcher and a
//! warning, so a typo in a prefetcher selector degrades to "no prefetching".

use tracing::warn;

use super::{PrefetchEngine, PrefetchKind, Prefetcher};

/// Degree of the stride engine in the mid-level I/O-buffer composite.
const MLC_STRIDE_DEGREE: u32 = 8;

/// Builds [`Prefetcher`] values from identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefetcherFactory;

impl PrefetcherFactory {
    /// Constructs the prefetcher named by `id`.
    ///
    /// # Arguments
    ///
    /// * `id` - Engine identifier, or `None` when the level has no prefetcher selected.
    ///
    /// # Returns
    ///
    /// A single-engine prefetcher with catalog defaults, or [`Prefetcher::Null`] when
    /// `id` is absent or not in the catalog.
    pub fn create(id: Option<&str>) -> Prefetcher {
        let Some(id) = id else {
            return Prefetcher::Null;
        };
        match PrefetchKind::from_name(id) {
            Some(kind) => Prefetcher::Single(PrefetchEngine::new(kind)),
            None => {
                warn!(prefetcher = id, "unknown prefetcher, prefetching disabled");
                Prefetcher::Null
            }
        }
    }

    /// Combines several engines into one prefetcher.
    ///
    /// An empty list yields the null prefetcher and a single engine is not wrapped.
    pub fn compose(engines: Vec<PrefetchEngine>) -> Prefetcher {
        match engines.len() {
            0 => Prefetcher::Null,
            1 => Prefetcher::Single(engines[0]),
            _ => Prefetcher::Multi(engines),
        }
    }

    /// Composite used when an L2 doubles as a mid-level I/O buffer.
    ///
    /// Always a stride engine (degree 8, latency 1) followed by the MLC engine.
    pub fn mlc_io_buffer() -> Prefetcher {
        Self::compose(vec![
            PrefetchEngine::new(PrefetchKind::Stride)
                .with_degree(MLC_STRIDE_DEGREE)
                .with_latency(1),
            PrefetchEngine::new(PrefetchKind::Mlc),
        ])
    }
}
