//! Projection of image pixels and columns into ray directions.

use tilecast::euclid::{Size2D, vec2, vec3};
use tilecast::math::{FreeCoordinate, FreeVector, FreeVector2, ImageSize};

use crate::RenderError;

/// Calculate area and convert to `usize`, which is a common operation for image data lengths.
#[inline]
#[doc(hidden)] // intended as a utility for our code, not public API
pub fn area_usize<T: TryInto<usize>, U>(size: Size2D<T, U>) -> Option<usize> {
    let width = size.width.try_into().ok()?;
    let height = size.height.try_into().ok()?;
    width.checked_mul(height)
}

/// Image size and horizontal field of view, from which ray directions are derived.
///
/// The camera does not know where it is; the viewer's facing direction is passed to each
/// projection function. The camera plane is perpendicular to the facing direction, and
/// its half-width is `tan(fov / 2)`, so that the leftmost and rightmost columns of the
/// image are `fov` apart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    size: ImageSize,
    fov_degrees: FreeCoordinate,
    /// `tan(fov / 2)`, cached.
    plane_scale: FreeCoordinate,
}

impl Camera {
    /// The usual horizontal field of view, in degrees.
    pub const DEFAULT_FOV_DEGREES: FreeCoordinate = 60.0;

    /// Constructs a camera, checking that the image has a reasonable number of pixels and
    /// that the field of view is strictly between 0 and 180 degrees.
    pub fn new(size: ImageSize, fov_degrees: FreeCoordinate) -> Result<Self, RenderError> {
        match area_usize(size) {
            None => {
                return Err(RenderError::ImageTooLarge {
                    width: size.width,
                    height: size.height,
                });
            }
            Some(0) => {
                return Err(RenderError::ImageEmpty {
                    width: size.width,
                    height: size.height,
                });
            }
            Some(_) => {}
        }
        if !(fov_degrees > 0.0 && fov_degrees < 180.0) {
            return Err(RenderError::FieldOfView(fov_degrees));
        }
        Ok(Self {
            size,
            fov_degrees,
            plane_scale: (fov_degrees.to_radians() / 2.0).tan(),
        })
    }

    /// Size of the images this camera produces.
    #[inline]
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Horizontal field of view in degrees.
    #[inline]
    pub fn fov_degrees(&self) -> FreeCoordinate {
        self.fov_degrees
    }

    /// The camera plane vector for a viewer facing `direction`, which should be of
    /// unit length. It points to the right edge of the image.
    #[inline]
    pub fn plane(&self, direction: FreeVector2) -> FreeVector2 {
        vec2(-direction.y, direction.x) * self.plane_scale
    }

    /// The horizontal ray direction for image column `x`.
    ///
    /// Column 0 looks along the left edge of the field of view and the center column
    /// looks along `direction`.
    #[inline]
    pub fn column_ray(&self, direction: FreeVector2, x: u32) -> FreeVector2 {
        let horizontal =
            2.0 * FreeCoordinate::from(x) / FreeCoordinate::from(self.size.width) - 1.0;
        direction + self.plane(direction) * horizontal
    }

    /// The ray direction for pixel `(x, y)`, which is the column ray tilted up or down.
    ///
    /// The vertical component is positive (toward the floor) below the middle of the
    /// image, with the same angular scale as the horizontal.
    #[inline]
    pub fn pixel_ray(&self, direction: FreeVector2, x: u32, y: u32) -> FreeVector {
        let column = self.column_ray(direction, x);
        let width = FreeCoordinate::from(self.size.width);
        let height = FreeCoordinate::from(self.size.height);
        let vertical = 2.0 * (FreeCoordinate::from(y) + 0.5) / height - 1.0;
        vec3(
            column.x,
            column.y,
            vertical * self.plane_scale * height / width,
        )
    }

    /// Distance from the eye to the projection plane, in pixels, such that a wall of
    /// height 1 at distance 1 is this many pixels tall.
    #[inline]
    pub fn projection_distance(&self) -> FreeCoordinate {
        FreeCoordinate::from(self.size.width) / (2.0 * self.plane_scale)
    }
}
