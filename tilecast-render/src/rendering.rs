use core::fmt;
use core::ops;

use tilecast::math::ImageSize;
use tilecast::raycast::{RayOutcome, Terminal};

use crate::camera::area_usize;

/// Image produced by a [`Renderer`](crate::Renderer).
#[derive(Clone, Debug, Eq, PartialEq)]
#[allow(clippy::exhaustive_structs)]
pub struct Rendering {
    /// Width and height of the image.
    pub size: ImageSize,
    /// Image data, RGBA, 8 bits per component, in the sRGB color space, in row-major
    /// order starting at the top left.
    pub data: Vec<[u8; 4]>,
}

impl Rendering {
    /// An image of the given size with every pixel set to `pixel`.
    ///
    /// Returns [`None`] if the image would be too large to store.
    pub fn filled(size: ImageSize, pixel: [u8; 4]) -> Option<Self> {
        Some(Self {
            size,
            data: vec![pixel; area_usize(size)?],
        })
    }

    /// Returns the pixel at `(x, y)`, or [`None`] if that is outside the image.
    pub fn get(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.index(x, y).map(|i| self.data[i])
    }

    /// Sets the pixel at `(x, y)`. Out-of-bounds writes are ignored.
    pub(crate) fn set(&mut self, x: u32, y: u32, pixel: [u8; 4]) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = pixel;
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.size.width && y < self.size.height {
            Some(y as usize * self.size.width as usize + x as usize)
        } else {
            None
        }
    }
}

/// Statistics about the rays cast to produce a [`Rendering`].
///
/// The [`Default`] value is the zero value. Values from separate parts of an image may be
/// combined with `+` or [`Iterator::sum()`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub struct RenderInfo {
    /// Number of rays cast.
    pub rays: usize,
    /// Total number of traversal steps taken by all rays.
    pub hops: u64,
    /// Rays which hit a wall.
    pub solid: usize,
    /// Rays which reached the floor.
    pub floor: usize,
    /// Rays which reached the ceiling.
    pub ceiling: usize,
    /// Rays which ran out of length or steps.
    pub exhausted: usize,
    /// Rays which left the world.
    pub out_of_world: usize,
}

impl RenderInfo {
    /// Statistics for a single ray with the given outcome.
    pub fn from_outcome(outcome: &RayOutcome) -> Self {
        let mut info = Self {
            rays: 1,
            hops: u64::from(outcome.hops),
            ..Self::default()
        };
        match outcome.terminal {
            Terminal::Solid { .. } => info.solid = 1,
            Terminal::Floor => info.floor = 1,
            Terminal::Ceiling => info.ceiling = 1,
            Terminal::OutOfWorld => info.out_of_world = 1,
            // Exhausted, and any future kind of ending which did not see anything.
            _ => info.exhausted = 1,
        }
        info
    }
}

impl ops::Add for RenderInfo {
    type Output = Self;
    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl ops::AddAssign for RenderInfo {
    fn add_assign(&mut self, other: Self) {
        let Self {
            rays,
            hops,
            solid,
            floor,
            ceiling,
            exhausted,
            out_of_world,
        } = other;
        self.rays += rays;
        self.hops += hops;
        self.solid += solid;
        self.floor += floor;
        self.ceiling += ceiling;
        self.exhausted += exhausted;
        self.out_of_world += out_of_world;
    }
}

impl core::iter::Sum for RenderInfo {
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = Self>,
    {
        iter.fold(Self::default(), |sum, part| sum + part)
    }
}

impl fmt::Display for RenderInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let &Self {
            rays,
            hops,
            solid,
            floor,
            ceiling,
            exhausted,
            out_of_world,
        } = self;
        write!(
            f,
            "{rays} rays, {hops} hops; hit {solid} walls, {floor} floor, {ceiling} ceiling; \
            {exhausted} exhausted, {out_of_world} out of world"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rendering_pixel_access() {
        let mut image = Rendering::filled(ImageSize::new(3, 2), [0, 0, 0, 255]).unwrap();
        image.set(2, 1, [1, 2, 3, 255]);
        image.set(3, 0, [9, 9, 9, 9]);
        assert_eq!(image.get(2, 1), Some([1, 2, 3, 255]));
        assert_eq!(image.data[5], [1, 2, 3, 255]);
        assert_eq!(image.get(3, 0), None);
        assert_eq!(image.get(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn info_sum() {
        let floor = RenderInfo::from_outcome(&RayOutcome {
            terminal: Terminal::Floor,
            hops: 3,
        });
        let out = RenderInfo::from_outcome(&RayOutcome {
            terminal: Terminal::OutOfWorld,
            hops: 0,
        });
        let total: RenderInfo = [floor, floor, out].into_iter().sum();
        assert_eq!(
            total,
            RenderInfo {
                rays: 3,
                hops: 6,
                floor: 2,
                out_of_world: 1,
                ..RenderInfo::default()
            }
        );
        assert_eq!(
            total.to_string(),
            "3 rays, 6 hops; hit 0 walls, 2 floor, 0 ceiling; 0 exhausted, 1 out of world"
        );
    }
}
