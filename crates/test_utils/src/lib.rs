//! Shared test utilities for the portfolio engine
//!
//! Fixtures provide pre-validated identifiers, vehicles, and timestamps so
//! tests only spell out the values they actually assert on. The builders
//! construct billing schedules and single-vehicle contracts with sensible
//! defaults.

pub mod builders;
pub mod fixtures;

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

pub use builders::{ScheduleBuilder, SingleContractBuilder};
pub use fixtures::{IdFixtures, TemporalFixtures, VehicleFixtures};

static TRACING: OnceCell<()> = OnceCell::new();

/// Installs a tracing subscriber for test output, once per process
///
/// Honours `RUST_LOG`; repeated calls are no-ops.
pub fn init_tracing() {
    TRACING.get_or_init(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}
