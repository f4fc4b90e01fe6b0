//! Bluebottle drift: wind- and current-driven surface drift of bluebottles.
//!
//! The force-balance model lives in `forcebalance`, the attribute schema in `elements`, and a
//! small trajectory engine in `engine`. This crate ties them to scenario manifests so that
//! front-ends (the `bbdrift` CLI, tests) can run complete drift experiments.

pub mod scenario;

pub use bluebottle_config as config;
pub use bluebottle_core as base;
pub use bluebottle_elements as elements;
pub use bluebottle_engine as engine;
pub use bluebottle_export as export;
pub use bluebottle_forcebalance as forcebalance;

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
