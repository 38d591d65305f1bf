//! SMT sibling pairing.
//!
//! The builder walks cores in pairs and shares one L2 per pair. Pairs are an explicit
//! input computed once by the caller; [`CorePair::consecutive`] gives the common
//! `(0, 1), (2, 3), ...` layout, with a trailing single core when the count is odd.

use serde::Serialize;

/// Two sibling cores sharing a pair-level cache, or one core on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CorePair {
    /// First core of the pair; also the MLC index of the pair L2.
    pub primary: usize,
    /// Second core, if any.
    pub sibling: Option<usize>,
}

impl CorePair {
    /// Pairs two cores.
    pub fn new(primary: usize, sibling: usize) -> Self {
        Self {
            primary,
            sibling: Some(sibling),
        }
    }

    /// A pair with a single member.
    pub fn single(primary: usize) -> Self {
        Self {
            primary,
            sibling: None,
        }
    }

    /// Members of the pair in order.
    pub fn members(&self) -> impl Iterator<Item = usize> {
        std::iter::once(self.primary).chain(self.sibling)
    }

    /// Pairs cores `0..num_cores` by consecutive index.
    pub fn consecutive(num_cores: usize) -> Vec<Self> {
        (0..num_cores)
            .step_by(2)
            .map(|i| {
                if i + 1 < num_cores {
                    Self::new(i, i + 1)
                } else {
                    Self::single(i)
                }
            })
            .collect()
    }
}
