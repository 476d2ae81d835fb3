//! tilecast is an engine for casting rays through worlds made of square tiles,
//! where a tile may itself be a smaller grid of tiles.
//!
//! This crate defines the world model and the hierarchical raycaster. Image output,
//! cameras, and the command-line program are kept in other crates
//! (`tilecast-render` and `tilecast-desktop`).
//!
//! ## Data model
//!
//! * A [`World`] owns an arena of grids ([`Hierarchy`]), a [`Palette`] of materials,
//!   and a [`Viewer`].
//! * Each grid is a square array of [`Cell`]s whose side length is a power of two.
//!   A cell is empty, solid with some material, or a reference to a nested grid
//!   which occupies exactly that cell.
//! * Walls are one unit tall. The space between height 0 (the ceiling) and height 1
//!   (the floor) is the only space a ray can travel through.
//!
//! ## Coordinate system
//!
//! * X and Y are horizontal; Z is height and increases downward, toward the floor.
//! * Positions are expressed in world units, in which one cell of the root grid is one
//!   unit. Each grid also has its own frame, in which one of *its* cells is one unit;
//!   see [`frame`] for the conversions.
//!
//! ## Dependencies and global state
//!
//! `tilecast` has no global state. However, it does write log messages using the [`log`]
//! crate and is therefore subject to that global configuration.
//!
//! `tilecast` depends on and re-exports [`euclid`] for vector math
//! (as `tilecast::euclid`).
//!
//! [`Cell`]: crate::grid::Cell
//! [`Hierarchy`]: crate::grid::Hierarchy
//! [`Palette`]: crate::material::Palette
//! [`Viewer`]: crate::viewer::Viewer
//! [`World`]: crate::world::World

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]
// Lenience for tests.
#![cfg_attr(test, allow(clippy::float_cmp))]

pub use tilecast_base::euclid;

pub mod math {
    //! Mathematical utilities and decisions.
    pub use tilecast_base::math::*;
}

pub mod util {
    //! Tools that we could imagine being in the Rust standard library, but aren't.
    pub use tilecast_base::util::*;
}

pub mod content;
pub mod frame;
pub mod grid;
pub mod layout;
pub mod material;
pub mod raycast;
pub mod viewer;
pub mod world;

pub use world::World;
