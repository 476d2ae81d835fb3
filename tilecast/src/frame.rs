//! Conversions between the coordinate frames of the grid hierarchy.
//!
//! There are two kinds of frame:
//!
//! * A *grid frame*, in which X and Y range over `[0, side)` and each cell of the grid
//!   is one unit wide.
//! * A *cell frame*, which is the unit square of a single cell.
//!
//! Z is the same in every frame. All functions here are pure, and each pair of
//! `to_*`/`from_*`-style functions are inverses of each other up to rounding error.

use crate::math::{Axis, FreeCoordinate, FreePoint, FreeVector, GridPoint};

/// Distance from a cell boundary within which a position is considered to be on it.
pub const EPSILON: FreeCoordinate = 1e-6;

/// Converts a position in the frame of the cell at `offset` to the frame of the grid
/// containing that cell.
#[inline]
pub fn to_parent_frame(local: FreePoint, offset: GridPoint) -> FreePoint {
    FreePoint::new(
        local.x + FreeCoordinate::from(offset.x),
        local.y + FreeCoordinate::from(offset.y),
        local.z,
    )
}

/// Converts a position in a grid's frame to the frame of its cell at `offset`.
///
/// Inverse of [`to_parent_frame()`].
#[inline]
pub fn to_child_frame(parent: FreePoint, offset: GridPoint) -> FreePoint {
    FreePoint::new(
        parent.x - FreeCoordinate::from(offset.x),
        parent.y - FreeCoordinate::from(offset.y),
        parent.z,
    )
}

/// Converts a position in the frame of a cell which contains a nested grid of side
/// length `side` to that nested grid's frame.
#[inline]
pub fn enter_grid(local: FreePoint, side: FreeCoordinate) -> FreePoint {
    FreePoint::new(local.x * side, local.y * side, local.z)
}

/// Converts a position in a nested grid's frame to the frame of the cell containing
/// it, which is at `offset` in its parent, and then to the parent grid's frame.
///
/// Inverse of [`enter_grid()`] followed by [`to_child_frame()`].
#[inline]
pub fn leave_grid(position: FreePoint, side: FreeCoordinate, offset: GridPoint) -> FreePoint {
    to_parent_frame(
        FreePoint::new(position.x / side, position.y / side, position.z),
        offset,
    )
}

/// Moves X and Y off of cell boundaries, in the direction the ray is traveling.
///
/// Each horizontal coordinate which is within [`EPSILON`] of an integer has
/// `EPSILON` added to it, with the sign of the corresponding direction component;
/// a zero component counts as negative. Z is not changed, so that the floor and
/// ceiling planes are reached exactly.
#[inline]
pub fn nudge(position: FreePoint, direction: FreeVector) -> FreePoint {
    fn nudge_1(coordinate: FreeCoordinate, direction: FreeCoordinate) -> FreeCoordinate {
        if (coordinate - coordinate.round()).abs() < EPSILON {
            if direction > 0.0 {
                coordinate + EPSILON
            } else {
                coordinate - EPSILON
            }
        } else {
            coordinate
        }
    }
    FreePoint::new(
        nudge_1(position.x, direction.x),
        nudge_1(position.y, direction.y),
        position.z,
    )
}

/// Where a ray leaves the unit cube of a cell.
#[derive(Clone, Copy, Debug, PartialEq)]
#[allow(clippy::exhaustive_structs)]
pub struct Exit {
    /// Ray parameter at which the exit happens; always nonnegative.
    pub distance: FreeCoordinate,
    /// Face through which the ray leaves.
    /// [`None`] if the ray is not moving, in which case `distance` is infinite.
    pub axis: Option<Axis>,
    /// Exit point in the cell's frame. The coordinate on `axis` is exactly 0 or 1.
    pub point: FreePoint,
}

/// Finds where a ray starting at `local` in a cell's frame leaves the cell's unit cube.
///
/// `step` is the change in the cell's frame per unit of ray parameter. For each axis,
/// the distance to the face the ray is heading toward is computed (infinite if that
/// component is zero), and the nearest face wins. Ties prefer X, then Y, then Z.
pub fn exit_cell(local: FreePoint, step: FreeVector) -> Exit {
    let mut distance = FreeCoordinate::INFINITY;
    let mut exit_axis = None;
    let mut target = 0.0;
    for axis in Axis::ALL {
        let (face, axis_distance) = if step[axis] > 0.0 {
            (1.0, (1.0 - local[axis]) / step[axis])
        } else if step[axis] < 0.0 {
            (0.0, (0.0 - local[axis]) / step[axis])
        } else {
            continue;
        };
        // A position slightly outside the cube (within rounding) must not produce a
        // negative distance.
        let axis_distance = axis_distance.max(0.0);
        if axis_distance < distance {
            distance = axis_distance;
            exit_axis = Some(axis);
            target = face;
        }
    }

    let point = match exit_axis {
        Some(axis) => {
            let mut point = local + step * distance;
            point[axis] = target;
            point
        }
        None => local,
    };
    Exit {
        distance,
        axis: exit_axis,
        point,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use euclid::{point2, vec3};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn assert_close(a: FreePoint, b: FreePoint) {
        assert!(
            (a - b).length() < 1e-9,
            "{a:?} is not close to {b:?}"
        );
    }

    #[test]
    fn parent_frame_adds_offset_only_horizontally() {
        assert_eq!(
            to_parent_frame(FreePoint::new(0.25, 0.5, 0.75), point2(3, 5)),
            FreePoint::new(3.25, 5.5, 0.75)
        );
    }

    #[rstest]
    fn parent_child_round_trip(
        #[values(FreePoint::new(0.0, 0.0, 0.5), FreePoint::new(0.999, 0.001, 0.1), FreePoint::new(0.3, 0.7, 0.9))]
        local: FreePoint,
        #[values(point2(0, 0), point2(7, 2), point2(15, 15))] offset: GridPoint,
    ) {
        assert_close(to_child_frame(to_parent_frame(local, offset), offset), local);
    }

    #[test]
    fn enter_then_leave_round_trip() {
        let local = FreePoint::new(0.3, 0.9, 0.4);
        let offset = point2(2, 6);
        let inside = enter_grid(local, 4.0);
        assert_close(inside, FreePoint::new(1.2, 3.6, 0.4));
        assert_close(leave_grid(inside, 4.0, offset), to_parent_frame(local, offset));
    }

    #[rstest]
    #[case::positive(vec3(1.0, 0.0, 0.0), 2.0 + EPSILON)]
    #[case::negative(vec3(-1.0, 0.0, 0.0), 2.0 - EPSILON)]
    #[case::zero_goes_negative(vec3(0.0, 1.0, 0.0), 2.0 - EPSILON)]
    fn nudge_on_boundary(#[case] direction: FreeVector, #[case] expected_x: FreeCoordinate) {
        let nudged = nudge(FreePoint::new(2.0, 0.5, 0.0), direction);
        assert_eq!(nudged.x, expected_x);
        assert_eq!(nudged.y, 0.5);
        assert_eq!(nudged.z, 0.0, "Z is exempt");
    }

    #[test]
    fn nudge_off_boundary_is_identity() {
        let p = FreePoint::new(2.5, 0.01, 1.0);
        assert_eq!(nudge(p, vec3(1.0, 1.0, 1.0)), p);
    }

    #[test]
    fn exit_nearest_face() {
        let exit = exit_cell(FreePoint::new(0.5, 0.75, 0.5), vec3(0.0, 1.0, 0.0));
        assert_eq!(exit.axis, Some(Axis::Y));
        assert_eq!(exit.distance, 0.25);
        assert_eq!(exit.point, FreePoint::new(0.5, 1.0, 0.5));

        let exit = exit_cell(FreePoint::new(0.5, 0.5, 0.5), vec3(-2.0, 1.0, 0.25));
        assert_eq!(exit.axis, Some(Axis::X));
        assert_eq!(exit.distance, 0.25);
        assert_close(exit.point, FreePoint::new(0.0, 0.75, 0.5625));
    }

    #[test]
    fn exit_through_floor() {
        let exit = exit_cell(FreePoint::new(0.5, 0.5, 0.5), vec3(0.1, 0.0, 1.0));
        assert_eq!(exit.axis, Some(Axis::Z));
        assert_eq!(exit.distance, 0.5);
        assert_eq!(exit.point.z, 1.0);
    }

    #[test]
    fn exit_without_motion() {
        let exit = exit_cell(FreePoint::new(0.5, 0.5, 0.5), FreeVector::zero());
        assert_eq!(exit.axis, None);
        assert_eq!(exit.distance, f64::INFINITY);
    }

    #[test]
    fn exit_distance_never_negative() {
        let exit = exit_cell(FreePoint::new(1.0 + 1e-12, 0.5, 0.5), vec3(1.0, 0.0, 0.0));
        assert_eq!(exit.distance, 0.0);
        assert_eq!(exit.point.x, 1.0);
    }
}
