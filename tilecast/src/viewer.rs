//! The point of view from which a world is seen.

use euclid::{Angle, Rotation2D, vec3};

use crate::math::{FreeCoordinate, FreePoint, FreeVector, FreeVector2, Tile};

/// A position and horizontal facing direction.
///
/// The viewer is read by cameras each frame and changed only by [`Viewer::step()`].
/// There is no collision detection; a viewer may stand inside a wall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewer {
    position: FreePoint,
    /// Always of unit length.
    direction: FreeVector2,
}

impl Viewer {
    /// Forward movement speed in world units per second.
    pub const MOVE_SPEED: FreeCoordinate = 5.0;
    /// Turning speed in radians per second.
    pub const TURN_SPEED: FreeCoordinate = 3.0;

    /// Constructs a viewer, normalizing `direction`.
    pub fn new(position: FreePoint, direction: FreeVector2) -> Result<Self, ViewerError> {
        if !(position.x.is_finite() && position.y.is_finite() && position.z.is_finite()) {
            return Err(ViewerError::Position(position));
        }
        let normalized = direction
            .try_normalize()
            .filter(|v| v.x.is_finite() && v.y.is_finite())
            .ok_or(ViewerError::Direction(direction))?;
        Ok(Self {
            position,
            direction: normalized,
        })
    }

    /// A viewer at eye height 0.5 at the given horizontal position, facing +X.
    pub fn standing_at(x: FreeCoordinate, y: FreeCoordinate) -> Self {
        Self {
            position: FreePoint::new(x, y, 0.5),
            direction: FreeVector2::new(1.0, 0.0),
        }
    }

    /// Position in world units.
    #[inline]
    pub fn position(&self) -> FreePoint {
        self.position
    }

    /// Horizontal facing direction, of unit length.
    #[inline]
    pub fn direction(&self) -> FreeVector2 {
        self.direction
    }

    /// The facing direction as a level 3D vector.
    #[inline]
    pub fn look_direction(&self) -> FreeVector {
        vec3(self.direction.x, self.direction.y, 0.0)
    }

    /// Moves and turns according to `input` held for `dt` seconds.
    ///
    /// Movement along the facing direction happens before turning.
    pub fn step(&mut self, dt: FreeCoordinate, input: MovementInput) {
        let move_step = -input.y * Self::MOVE_SPEED * dt;
        self.position += vec3(
            move_step * self.direction.x,
            move_step * self.direction.y,
            0.0,
        );

        let rotation = Rotation2D::<FreeCoordinate, Tile, Tile>::new(Angle::radians(
            input.x * Self::TURN_SPEED * dt,
        ));
        let turned = rotation.transform_vector(self.direction);
        // Renormalize so that rounding errors do not accumulate.
        if let Some(turned) = turned.try_normalize() {
            self.direction = turned;
        }
    }
}

impl Default for Viewer {
    /// Standing at (1.5, 1.5), which is just inside the corner of a world with a border,
    /// and facing +X.
    fn default() -> Self {
        Self::standing_at(1.5, 1.5)
    }
}

/// Abstract directional input, such as from arrow keys or a joystick.
///
/// Each component is nominally in the range -1 to 1.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[allow(clippy::exhaustive_structs)]
pub struct MovementInput {
    /// Turning; positive turns from +X toward +Y, which is to the right on screen.
    pub x: FreeCoordinate,
    /// Walking; negative is forward.
    pub y: FreeCoordinate,
}

impl MovementInput {
    /// Walk forward at full speed.
    pub const FORWARD: Self = Self { x: 0.0, y: -1.0 };
    /// Walk backward at full speed.
    pub const BACKWARD: Self = Self { x: 0.0, y: 1.0 };
    /// Turn right at full speed.
    pub const TURN_RIGHT: Self = Self { x: 1.0, y: 0.0 };
    /// Turn left at full speed.
    pub const TURN_LEFT: Self = Self { x: -1.0, y: 0.0 };
}

/// Error from [`Viewer::new()`].
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ViewerError {
    /// Positions must be finite.
    #[error("viewer position {0:?} is not finite")]
    Position(FreePoint),
    /// Directions must have a nonzero, finite length.
    #[error("viewer direction {0:?} cannot be normalized")]
    Direction(FreeVector2),
}
