//! Tools that we could imagine being in the Rust standard library, but aren't.

pub mod log;
