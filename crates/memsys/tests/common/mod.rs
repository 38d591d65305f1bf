//! Shared fixtures for hierarchy tests.

use memsys_core::common::TargetIsa;
use memsys_core::soc::graph::ports;
use memsys_core::{System, TopologyOptions};
use tracing_subscriber::EnvFilter;

/// Installs a test-writer tracing subscriber honouring `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// No caches, `num_cpus` cores of `isa`.
pub fn uncached(num_cpus: usize, isa: TargetIsa) -> TopologyOptions {
    TopologyOptions {
        num_cpus,
        isa,
        ..TopologyOptions::default()
    }
}

/// Private L1s only.
pub fn private_l1(num_cpus: usize, isa: TargetIsa) -> TopologyOptions {
    TopologyOptions {
        caches: true,
        ..uncached(num_cpus, isa)
    }
}

/// L1s plus pair L2s.
pub fn two_level(num_cpus: usize, isa: TargetIsa) -> TopologyOptions {
    TopologyOptions {
        l2cache: true,
        ..private_l1(num_cpus, isa)
    }
}

/// L1s, pair L2s, and the system L3.
pub fn three_level(num_cpus: usize, isa: TargetIsa) -> TopologyOptions {
    TopologyOptions {
        l3cache: true,
        ..two_level(num_cpus, isa)
    }
}

/// External memory system with port type `ruby`.
pub fn external(num_cpus: usize, isa: TargetIsa) -> TopologyOptions {
    TopologyOptions {
        external_memory_system: Some("ruby".to_string()),
        ..uncached(num_cpus, isa)
    }
}

/// Builds `options`, panicking with the error on failure.
pub fn build(options: &TopologyOptions) -> System {
    init_tracing();
    match System::build(options) {
        Ok(system) => system,
        Err(e) => panic!("build failed: {e}"),
    }
}

/// Paths connected to the upstream side of a crossbar.
pub fn upstream_of<'a>(system: &'a System, crossbar: &str) -> Vec<&'a str> {
    system.peers(crossbar, ports::CPU_SIDE_PORTS)
}

/// Single peer of a single port, if connected.
pub fn peer_of<'a>(system: &'a System, path: &str, port: &'static str) -> Option<&'a str> {
    let peers = system.peers(path, port);
    assert!(peers.len() <= 1, "{path}.{port} has {} peers", peers.len());
    peers.first().copied()
}
