//! Size constants and unit helpers.

/// One kibibyte in bytes.
pub const KIB: u64 = 1024;

/// One mebibyte in bytes.
pub const MIB: u64 = 1024 * KIB;

/// Default cache line size in bytes.
pub const DEFAULT_CACHE_LINE: u64 = 64;

/// Capacity tracked by the system-wide snoop filter in front of the L3.
pub const L3_SNOOP_FILTER_CAPACITY: u64 = 32 * MIB;

/// Capacity tracked by a default crossbar snoop filter.
pub const DEFAULT_SNOOP_FILTER_CAPACITY: u64 = 8 * MIB;
