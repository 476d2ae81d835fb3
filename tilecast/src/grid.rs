//! [`Cell`]s, the square grids that contain them, and the arena of grids that makes up
//! a world.

use core::fmt;
use core::ops;

use euclid::point2;

use crate::material::MaterialId;
use crate::math::{FreeCoordinate, FreePoint, GridCoordinate, GridPoint};

/// One square of a grid.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[allow(clippy::exhaustive_enums)]
pub enum Cell {
    /// Nothing; rays pass through.
    Empty,
    /// A wall of the given material, filling the cell from height 0 to 1.
    Solid(MaterialId),
    /// A smaller grid occupying exactly this cell.
    Grid(GridId),
}

/// The side length of a square grid, which is always a power of two.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GridSide(u16);

impl GridSide {
    /// The largest allowed side length, 2<sup>15</sup>.
    pub const MAX: Self = Self(1 << 15);

    /// A grid containing a single cell.
    pub const ONE: Self = Self(1);

    /// Checks that `side` is a usable side length.
    ///
    /// ```
    /// use tilecast::grid::{GridSide, GridSizeError};
    ///
    /// assert_eq!(GridSide::new(16).map(GridSide::get), Ok(16));
    /// assert_eq!(GridSide::new(0), Err(GridSizeError::Zero));
    /// assert_eq!(GridSide::new(12), Err(GridSizeError::NotPowerOfTwo(12)));
    /// ```
    pub const fn new(side: usize) -> Result<Self, GridSizeError> {
        if side == 0 {
            Err(GridSizeError::Zero)
        } else if !side.is_power_of_two() {
            Err(GridSizeError::NotPowerOfTwo(side))
        } else if side > Self::MAX.0 as usize {
            Err(GridSizeError::TooLarge(side))
        } else {
            Ok(Self(side as u16))
        }
    }

    /// Returns the side length 2<sup>`exponent`</sup>, if it is not too large.
    pub const fn from_exponent(exponent: u8) -> Option<Self> {
        if exponent <= 15 {
            Some(Self(1 << exponent))
        } else {
            None
        }
    }

    /// Returns the side length as an integer.
    #[inline]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Returns the side length as a coordinate.
    #[inline]
    pub const fn coordinate(self) -> GridCoordinate {
        self.0 as GridCoordinate
    }

    /// Returns the side length as a free coordinate, for scaling positions.
    #[inline]
    pub fn free(self) -> FreeCoordinate {
        FreeCoordinate::from(self.0)
    }

    /// Number of cells in a grid of this side length.
    #[inline]
    pub const fn area(self) -> usize {
        self.0 as usize * self.0 as usize
    }

    /// Whether `cell` is one of the cells of a grid of this size.
    #[inline]
    pub fn contains(self, cell: GridPoint) -> bool {
        let side = self.coordinate();
        (0..side).contains(&cell.x) && (0..side).contains(&cell.y)
    }
}

impl fmt::Debug for GridSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GridSide({})", self.0)
    }
}

impl TryFrom<usize> for GridSide {
    type Error = GridSizeError;
    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Error from [`GridSide::new()`] when given an unusable side length.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum GridSizeError {
    /// Grids must have at least one cell.
    #[error("grid side length must be at least 1")]
    Zero,
    /// Grids must be subdividable evenly in halves.
    #[error("grid side length {0} is not a power of two")]
    NotPowerOfTwo(usize),
    /// Side lengths are limited to [`GridSide::MAX`].
    #[error("grid side length {0} is larger than the maximum {max}", max = GridSide::MAX.0)]
    TooLarge(usize),
}

/// Identifies a grid within a [`Hierarchy`].
///
/// Ids are only meaningful for the hierarchy that issued them.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GridId(u32);

impl GridId {
    /// The id of the root grid of every hierarchy.
    pub const ROOT: Self = Self(0);

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Where a non-root grid sits in its parent.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[allow(clippy::exhaustive_structs)]
pub struct ParentLink {
    /// The grid containing this one.
    pub grid: GridId,
    /// The cell of the parent grid which this grid occupies.
    pub offset: GridPoint,
}

/// A square array of [`Cell`]s with a link to its parent.
#[derive(Clone, Debug, PartialEq)]
pub struct GridNode {
    side: GridSide,
    /// Row-major, indexed by `y * side + x`.
    cells: Box<[Cell]>,
    parent: Option<ParentLink>,
    /// World units per cell of this grid.
    cell_extent: FreeCoordinate,
}

impl GridNode {
    /// Side length of this grid.
    #[inline]
    pub fn side(&self) -> GridSide {
        self.side
    }

    /// The grid containing this one, or [`None`] for the root.
    #[inline]
    pub fn parent(&self) -> Option<ParentLink> {
        self.parent
    }

    /// The width of one of this grid's cells, measured in world units
    /// (that is, in cells of the root grid).
    #[inline]
    pub fn cell_extent(&self) -> FreeCoordinate {
        self.cell_extent
    }

    /// Returns the cell at `cell`, or [`None`] if it is out of bounds.
    #[inline]
    pub fn get(&self, cell: impl Into<GridPoint>) -> Option<Cell> {
        let cell = cell.into();
        if self.side.contains(cell) {
            Some(self.cells[self.index(cell)])
        } else {
            None
        }
    }

    /// Iterates over all cells and their positions in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (GridPoint, Cell)> + '_ {
        let side = self.side.coordinate();
        (0..side)
            .flat_map(move |y| (0..side).map(move |x| point2(x, y)))
            .zip(self.cells.iter().copied())
    }

    #[inline]
    fn index(&self, cell: GridPoint) -> usize {
        cell.y as usize * usize::from(self.side.get()) + cell.x as usize
    }
}

/// Arena owning every grid of a world.
///
/// Grids refer to their children and parents by [`GridId`] rather than by pointer, so
/// the hierarchy is a tree stored without reference cycles. It is immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Hierarchy {
    /// Index 0 is the root.
    grids: Vec<GridNode>,
}

impl Hierarchy {
    /// Number of grids, including the root.
    #[inline]
    pub fn len(&self) -> usize {
        self.grids.len()
    }

    /// Always false; every hierarchy has a root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The root grid.
    #[inline]
    pub fn root(&self) -> &GridNode {
        &self[GridId::ROOT]
    }

    /// Returns the grid with the given id, if this hierarchy issued it.
    #[inline]
    pub fn get(&self, id: GridId) -> Option<&GridNode> {
        self.grids.get(id.index())
    }

    /// Iterates over all grids. The root comes first, and every grid comes after its parent.
    pub fn iter(&self) -> impl Iterator<Item = (GridId, &GridNode)> + '_ {
        (0u32..).map(GridId).zip(&self.grids)
    }

    /// Finds the leaf cell (not a nested grid) containing a position.
    ///
    /// `normalized` has X and Y in the unit square covering the whole root grid;
    /// positions outside it are clamped to the edge cells. Z is carried through unchanged.
    pub fn locate(&self, normalized: FreePoint) -> Located {
        let mut grid_id = GridId::ROOT;
        let mut local = normalized;
        loop {
            let grid = &self[grid_id];
            let side = grid.side.free();
            let max = grid.side.coordinate() - 1;
            let scaled_x = local.x * side;
            let scaled_y = local.y * side;
            let cell = point2(
                (scaled_x.floor() as GridCoordinate).clamp(0, max),
                (scaled_y.floor() as GridCoordinate).clamp(0, max),
            );
            local = FreePoint::new(
                scaled_x - FreeCoordinate::from(cell.x),
                scaled_y - FreeCoordinate::from(cell.y),
                local.z,
            );
            match grid.cells[grid.index(cell)] {
                Cell::Grid(child) => grid_id = child,
                leaf => {
                    return Located {
                        grid: grid_id,
                        cell,
                        leaf,
                        local,
                    };
                }
            }
        }
    }

    /// Starts a new hierarchy whose root has the given cells.
    pub(crate) fn with_root(side: GridSide, cells: Box<[Cell]>) -> Self {
        let mut hierarchy = Self { grids: Vec::new() };
        hierarchy.push(side, cells, None);
        hierarchy
    }

    /// Adds a grid and returns its id. The caller is responsible for placing a
    /// [`Cell::Grid`] at `parent.offset` afterward.
    pub(crate) fn push(
        &mut self,
        side: GridSide,
        cells: Box<[Cell]>,
        parent: Option<ParentLink>,
    ) -> GridId {
        debug_assert_eq!(cells.len(), side.area());
        let cell_extent = match parent {
            Some(link) => self[link.grid].cell_extent / side.free(),
            None => 1.0,
        };
        let id = GridId(self.grids.len() as u32);
        self.grids.push(GridNode {
            side,
            cells,
            parent,
            cell_extent,
        });
        id
    }

    pub(crate) fn set(&mut self, grid: GridId, cell: GridPoint, value: Cell) {
        let node = &mut self.grids[grid.index()];
        let index = node.index(cell);
        node.cells[index] = value;
    }
}

impl ops::Index<GridId> for Hierarchy {
    type Output = GridNode;

    /// Panics if `id` was not issued by this hierarchy.
    #[inline]
    fn index(&self, id: GridId) -> &Self::Output {
        &self.grids[id.index()]
    }
}

/// Result of [`Hierarchy::locate()`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[allow(clippy::exhaustive_structs)]
pub struct Located {
    /// Grid containing the leaf cell.
    pub grid: GridId,
    /// Position of the leaf cell in that grid.
    pub cell: GridPoint,
    /// The leaf cell itself; never [`Cell::Grid`].
    pub leaf: Cell,
    /// Position within the leaf cell's unit square.
    pub local: FreePoint,
}
