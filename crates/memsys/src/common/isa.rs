//! Target instruction-set architecture.
//!
//! The hierarchy shape depends on two ISA properties: whether the MMU uses a hardware
//! page-table walker (which gives each core walker ports) and whether the generic cache
//! family must place a dedicated cache in front of those walkers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Instruction-set architecture the simulated cores implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetIsa {
    /// RISC-V (Sv39/Sv48 hardware walker).
    #[default]
    Riscv,
    /// x86-64 (hardware walker).
    X86,
    /// Arm AArch32/AArch64 (hardware walker).
    Arm,
    /// SPARC (software-managed TLB).
    Sparc,
    /// MIPS (software-managed TLB).
    Mips,
    /// POWER (software-managed TLB in the simulated model).
    Power,
}

impl TargetIsa {
    /// Returns `true` if the MMU walks page tables in hardware.
    ///
    /// Cores of such ISAs expose instruction and data walker ports, and external memory
    /// systems must provide walker-cache proxies for them.
    pub fn has_hw_walker(self) -> bool {
        matches!(self, Self::Riscv | Self::X86 | Self::Arm)
    }

    /// Returns `true` if the generic cache family adds a page-table walker cache.
    pub fn needs_walker_cache(self) -> bool {
        matches!(self, Self::Riscv | Self::X86)
    }
}

impl fmt::Display for TargetIsa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Riscv => "riscv",
            Self::X86 => "x86",
            Self::Arm => "arm",
            Self::Sparc => "sparc",
            Self::Mips => "mips",
            Self::Power => "power",
        };
        f.write_str(name)
    }
}
