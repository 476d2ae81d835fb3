//! This library is an internal component of [`tilecast`],
//! which defines some core mathematical types and functions.
//! Do not depend on this library; use only [`tilecast`] instead.
//!
//! [`tilecast`]: https://crates.io/crates/tilecast/

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]

/// Do not use this module directly; its contents are re-exported from `tilecast`.
pub mod math;

/// Do not use this module directly; its contents are re-exported from `tilecast`.
pub mod util;

// reexport for convenience of our tests
#[doc(hidden)]
pub use euclid;
