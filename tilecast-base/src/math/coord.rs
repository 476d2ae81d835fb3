//! Numeric types used for coordinates and related quantities.

use euclid::{Point2D, Point3D, Size2D, Vector2D, Vector3D};

/// Unit-of-measure type for coordinates in a grid of tiles.
///
/// One unit is the width of one cell of whichever grid the coordinates are relative to;
/// the vertical (Z) unit is always the height of the wall column.
#[derive(Debug)]
#[allow(clippy::exhaustive_enums)]
pub enum Tile {}

/// Coordinates that are locked to the tile grid.
pub type GridCoordinate = i32;

/// Positions of cells within a grid; the near corner of the cell.
pub type GridPoint = Point2D<GridCoordinate, Tile>;

/// Offsets between cells of a grid.
pub type GridVector = Vector2D<GridCoordinate, Tile>;

/// Coordinates that are not locked to the tile grid.
///
/// Note: Because `GridCoordinate = i32` and `FreeCoordinate = f64`, which has
/// more than 32 bits of mantissa, the infallible conversion
/// `From<GridCoordinate> for FreeCoordinate` exists, which is often convenient.
pub type FreeCoordinate = f64;

/// Positions that are not locked to the tile grid but may interact with it.
pub type FreePoint = Point3D<FreeCoordinate, Tile>;

/// Vectors that are not locked to the tile grid but may interact with it.
pub type FreeVector = Vector3D<FreeCoordinate, Tile>;

/// Horizontal-only vectors, such as a viewer's facing direction.
pub type FreeVector2 = Vector2D<FreeCoordinate, Tile>;

/// Pixel unit type for image sizes.
#[derive(Debug)]
#[allow(clippy::exhaustive_enums)]
pub enum ImagePixel {}

/// Width and height of an image in pixels.
pub type ImageSize = Size2D<u32, ImagePixel>;
