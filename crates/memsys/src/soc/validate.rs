//! Option and input validation.
//!
//! Runs before any component is created so that a rejected configuration never leaves a
//! partial graph behind.

use std::collections::BTreeSet;

use crate::common::{BuildError, BuildResult};
use crate::config::TopologyOptions;
use crate::core::Core;
use crate::soc::pairing::CorePair;

/// Rejects forbidden option combinations and malformed builder inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopologyValidator;

impl TopologyValidator {
    /// Validates the option bundle on its own.
    ///
    /// Checks, in order: internal caches together with an external memory system, L3
    /// without L2, L2 together with elastic trace mode, a zero core count, and the cache
    /// line size.
    ///
    /// # Errors
    ///
    /// The first violated rule, as a [`BuildError`].
    pub fn validate(options: &TopologyOptions) -> BuildResult<()> {
        if options.uses_external_memory() && options.wants_internal_caches() {
            return Err(BuildError::ExternalWithInternalCaches);
        }
        if options.l3cache && !options.l2cache {
            return Err(BuildError::L3WithoutL2);
        }
        if options.l2cache && options.elastic_trace_en {
            return Err(BuildError::L2WithElasticTrace);
        }
        if options.num_cpus == 0 {
            return Err(BuildError::NoCores);
        }
        if !options.cacheline_size.is_power_of_two() {
            return Err(BuildError::InvalidCacheLineSize(options.cacheline_size));
        }
        Ok(())
    }

    /// Validates the cores and pairing handed to the builder against the options.
    ///
    /// # Errors
    ///
    /// * [`BuildError::CoreCountMismatch`] if `cores.len()` differs from `num_cpus`.
    /// * [`BuildError::CoreMismatch`] if a core is out of position or disagrees with the
    ///   ISA or SMT setting.
    /// * [`BuildError::InvalidPairing`] unless every core appears in exactly one pair.
    pub fn validate_cores(
        options: &TopologyOptions,
        cores: &[Core],
        pairs: &[CorePair],
    ) -> BuildResult<()> {
        if cores.len() != options.num_cpus {
            return Err(BuildError::CoreCountMismatch {
                expected: options.num_cpus,
                actual: cores.len(),
            });
        }

        for (position, core) in cores.iter().enumerate() {
            let reason = if core.index != position {
                Some(format!("index is {}, expected {position}", core.index))
            } else if core.isa != options.isa {
                Some(format!("ISA is {}, options target {}", core.isa, options.isa))
            } else if core.is_smt() != options.smt {
                Some(format!("core has {} hardware thread(s)", core.threads))
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(BuildError::CoreMismatch {
                    index: position,
                    reason,
                });
            }
        }

        let mut seen = BTreeSet::new();
        for pair in pairs {
            if pair.sibling == Some(pair.primary) {
                return Err(BuildError::InvalidPairing(format!(
                    "core {} is paired with itself",
                    pair.primary
                )));
            }
            for member in pair.members() {
                if member >= cores.len() {
                    return Err(BuildError::InvalidPairing(format!(
                        "core {member} does not exist"
                    )));
                }
                if !seen.insert(member) {
                    return Err(BuildError::InvalidPairing(format!(
                        "core {member} appears in more than one pair"
                    )));
                }
            }
        }
        if seen.len() != cores.len() {
            let missing = (0..cores.len()).find(|i| !seen.contains(i)).unwrap_or_default();
            return Err(BuildError::InvalidPairing(format!(
                "core {missing} is not in any pair"
            )));
        }
        Ok(())
    }
}
