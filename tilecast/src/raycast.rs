//! The hierarchical raycaster: walking a ray through nested grids until it meets
//! something.
//!
//! The walk is a state machine with two kinds of states, which alternate:
//!
//! * A position in some grid's frame. The cell under the position is examined; the ray
//!   either stops (solid cell, floor, ceiling, or leaving the root), moves into a
//!   nested grid, moves up into the parent grid, or proceeds to cross an empty cell.
//! * A position in an empty cell's frame. The ray is advanced to the boundary of the
//!   cell, which uses up some of its length, and the exit point is handed back to the
//!   grid containing the cell.
//!
//! Each transition is a *hop*. Every crossing of an empty cell uses up a positive amount
//! of the ray's length, so the walk ends; [`MAX_HOPS`] bounds it regardless.

use euclid::{point2, vec3};

use crate::frame::{enter_grid, exit_cell, leave_grid, nudge, to_child_frame, to_parent_frame};
use crate::grid::{Cell, GridId, Hierarchy, Located};
use crate::material::MaterialId;
use crate::math::{Axis, FreeCoordinate, FreePoint, FreeVector, GridCoordinate, GridPoint};

/// Number of hops after which a ray is assumed to be stuck and reported as
/// [`Terminal::Exhausted`].
pub const MAX_HOPS: u32 = 65_536;

/// How a ray ended.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum Terminal {
    /// The ray entered a solid cell.
    Solid {
        /// Material of the cell.
        material: MaterialId,
        /// Where on the face of the cell the ray entered.
        hit: FaceHit,
    },
    /// The ray reached height 0.
    Ceiling,
    /// The ray reached height 1.
    Floor,
    /// The ray's length ran out before it reached anything.
    Exhausted,
    /// The ray left the root grid, or never was in it.
    OutOfWorld,
}

/// Texture coordinates of the point where a ray entered a solid cell.
#[derive(Clone, Copy, Debug, PartialEq)]
#[allow(clippy::exhaustive_structs)]
pub struct FaceHit {
    /// Horizontal position along the face, in `[0, 1]`.
    pub u: FreeCoordinate,
    /// Height, in `[0, 1]`; 0 is the top of the wall.
    pub v: FreeCoordinate,
}

impl FaceHit {
    /// Computes the face coordinates of a point in a cell's frame, given the axis
    /// perpendicular to the face which was crossed to get there.
    ///
    /// If the ray was already inside the cell (`entered` is [`None`]), the X coordinate
    /// is used.
    pub fn new(local: FreePoint, entered: Option<Axis>) -> Self {
        let u = match entered {
            Some(Axis::X) => local.y,
            Some(Axis::Y | Axis::Z) | None => local.x,
        };
        Self { u, v: local.z }
    }
}

/// The complete result of casting one ray.
#[derive(Clone, Copy, Debug, PartialEq)]
#[allow(clippy::exhaustive_structs)]
pub struct RayOutcome {
    /// How the ray ended.
    pub terminal: Terminal,
    /// Number of steps taken by the traversal.
    pub hops: u32,
}

impl RayOutcome {
    pub(crate) const fn immediate(terminal: Terminal) -> Self {
        Self { terminal, hops: 0 }
    }
}

#[derive(Clone, Copy, Debug)]
enum Visit {
    /// At a position in the grid's frame, which may be outside the grid.
    Grid { grid: GridId, position: FreePoint },
    /// Inside the empty cell `cell` of `grid`, at a position in the cell's frame.
    EmptyCell {
        grid: GridId,
        cell: GridPoint,
        local: FreePoint,
    },
}

/// Casts a ray which starts in the cell found by [`Hierarchy::locate()`].
///
/// `direction` is in world units; its horizontal components are converted to each
/// grid's frame as the ray passes through. `length` limits how far the ray may travel,
/// measured as a multiple of `direction` (so it is a distance if `direction` is a unit
/// vector).
pub fn cast(
    hierarchy: &Hierarchy,
    start: Located,
    direction: FreeVector,
    length: FreeCoordinate,
) -> RayOutcome {
    cast_with_hop_limit(hierarchy, start, direction, length, MAX_HOPS)
}

/// [`cast()`] with a hop limit other than [`MAX_HOPS`].
pub(crate) fn cast_with_hop_limit(
    hierarchy: &Hierarchy,
    start: Located,
    direction: FreeVector,
    length: FreeCoordinate,
    max_hops: u32,
) -> RayOutcome {
    let mut remaining = length;
    // Axis of the face most recently crossed.
    let mut entered: Option<Axis> = None;
    let mut hops: u32 = 0;

    let mut visit = match start.leaf {
        Cell::Empty => Visit::EmptyCell {
            grid: start.grid,
            cell: start.cell,
            local: start.local,
        },
        Cell::Solid(material) => {
            return RayOutcome::immediate(Terminal::Solid {
                material,
                hit: FaceHit::new(start.local, None),
            });
        }
        Cell::Grid(child) => Visit::Grid {
            grid: child,
            position: enter_grid(start.local, hierarchy[child].side().free()),
        },
    };

    loop {
        if hops >= max_hops {
            log::warn!(
                "ray stopped after {hops} hops with {remaining} length remaining; \
                direction {direction:?}"
            );
            return RayOutcome {
                terminal: Terminal::Exhausted,
                hops,
            };
        }
        hops += 1;

        let stop = |terminal| RayOutcome { terminal, hops };

        visit = match visit {
            Visit::Grid { grid: grid_id, position } => {
                let grid = &hierarchy[grid_id];
                let position = nudge(position, direction);

                // Floor and ceiling take precedence over whatever cell is here.
                if position.z <= 0.0 {
                    return stop(Terminal::Ceiling);
                }
                if position.z >= 1.0 {
                    return stop(Terminal::Floor);
                }

                // `as` saturates, so far-away positions are still outside the grid.
                let cell: GridPoint = point2(
                    position.x.floor() as GridCoordinate,
                    position.y.floor() as GridCoordinate,
                );
                match grid.get(cell) {
                    None => match grid.parent() {
                        Some(link) => Visit::Grid {
                            grid: link.grid,
                            position: leave_grid(position, grid.side().free(), link.offset),
                        },
                        None => return stop(Terminal::OutOfWorld),
                    },
                    Some(Cell::Empty) => Visit::EmptyCell {
                        grid: grid_id,
                        cell,
                        local: to_child_frame(position, cell),
                    },
                    Some(Cell::Solid(material)) => {
                        return stop(Terminal::Solid {
                            material,
                            hit: FaceHit::new(to_child_frame(position, cell), entered),
                        });
                    }
                    Some(Cell::Grid(child)) => Visit::Grid {
                        grid: child,
                        position: enter_grid(
                            to_child_frame(position, cell),
                            hierarchy[child].side().free(),
                        ),
                    },
                }
            }

            Visit::EmptyCell { grid, cell, local } => {
                let extent = hierarchy[grid].cell_extent();
                let step = vec3(direction.x / extent, direction.y / extent, direction.z);
                let exit = exit_cell(local, step);
                if exit.axis.is_none() || exit.distance > remaining {
                    return stop(Terminal::Exhausted);
                }
                remaining -= exit.distance;
                entered = exit.axis;
                Visit::Grid {
                    grid,
                    position: to_parent_frame(exit.point, cell),
                }
            }
        };
    }
}
