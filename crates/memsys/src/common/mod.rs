//! Common types shared by every stage of hierarchy construction.
//!
//! 1. **Address ranges:** Declared ranges for components terminating traffic.
//! 2. **Constants:** Size units and default capacities.
//! 3. **Errors:** The construction error type and result alias.
//! 4. **ISA:** Target architecture properties that shape the hierarchy.

/// Physical address range type.
pub mod addr;

/// Size units and default capacities.
pub mod constants;

/// Construction error type.
pub mod error;

/// Target instruction-set architecture.
pub mod isa;

pub use addr::AddrRange;
pub use constants::{KIB, MIB};
pub use error::{BuildError, BuildResult};
pub use isa::TargetIsa;
