//! Mathematical utilities and decisions.

mod axis;
pub use axis::*;
mod color;
pub use color::*;
mod coord;
pub use coord::*;
