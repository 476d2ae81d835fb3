#[cfg(feature = "auto-threads")]
use rayon::iter::{IntoParallelIterator as _, ParallelIterator as _};

use tilecast::World;
use tilecast::math::FreeCoordinate;

use crate::camera::Camera;
use crate::{RenderError, RenderInfo, Renderer, Rendering};

/// Renders a [`World`] by casting one ray per pixel through the full grid hierarchy.
///
/// Walls, floor, and ceiling all come from [`World::trace()`], so nested grids are
/// drawn at their true size and the floor and ceiling are seen in perspective.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HierarchyRenderer {
    camera: Camera,
    max_length: FreeCoordinate,
}

impl HierarchyRenderer {
    /// The default maximum ray length, in world units.
    pub const DEFAULT_MAX_LENGTH: FreeCoordinate = 64.0;

    /// Constructs a renderer using [`Self::DEFAULT_MAX_LENGTH`].
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            max_length: Self::DEFAULT_MAX_LENGTH,
        }
    }

    /// Sets how far rays travel before giving up, measured in multiples of each pixel's
    /// ray direction (whose horizontal part is at least of unit length).
    pub fn with_max_length(self, max_length: FreeCoordinate) -> Result<Self, RenderError> {
        if max_length > 0.0 {
            Ok(Self { max_length, ..self })
        } else {
            Err(RenderError::MaxLength(max_length))
        }
    }

    /// The camera which determines image size and field of view.
    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Maximum ray length.
    #[inline]
    pub fn max_length(&self) -> FreeCoordinate {
        self.max_length
    }

    fn trace_pixel(&self, world: &World, x: u32, y: u32) -> ([u8; 4], RenderInfo) {
        let viewer = world.viewer();
        let ray = self.camera.pixel_ray(viewer.direction(), x, y);
        let outcome = world.trace(viewer.position(), ray, self.max_length);
        (
            world.color_of(&outcome.terminal).to_srgba8(),
            RenderInfo::from_outcome(&outcome),
        )
    }
}

impl Renderer for HierarchyRenderer {
    #[cfg(feature = "auto-threads")]
    fn render(&self, world: &World) -> (Rendering, RenderInfo) {
        use crate::rayon_util::ParExtSum;

        let size = self.camera.size();
        let (data, info): (Vec<[u8; 4]>, ParExtSum<RenderInfo>) = (0..size.height)
            .into_par_iter()
            .flat_map(|y| {
                (0..size.width)
                    .into_par_iter()
                    .map(move |x| self.trace_pixel(world, x, y))
            })
            .unzip();
        let info = info.into_inner();
        log::debug!("rendered {}×{}: {info}", size.width, size.height);
        (Rendering { size, data }, info)
    }

    #[cfg(not(feature = "auto-threads"))]
    fn render(&self, world: &World) -> (Rendering, RenderInfo) {
        let size = self.camera.size();
        let mut data = Vec::with_capacity(size.width as usize * size.height as usize);
        let mut info = RenderInfo::default();
        for y in 0..size.height {
            for x in 0..size.width {
                let (pixel, pixel_info) = self.trace_pixel(world, x, y);
                data.push(pixel);
                info += pixel_info;
            }
        }
        log::debug!("rendered {}×{}: {info}", size.width, size.height);
        (Rendering { size, data }, info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tilecast::layout::Layout;
    use tilecast::material::Palette;
    use tilecast::math::{ImageSize, Rgb};
    use tilecast::viewer::Viewer;

    fn empty_world() -> World {
        World::new(
            &Layout::from_ids([[0u16; 4]; 4]),
            Palette::placeholder(),
            Viewer::standing_at(2.0, 2.0),
        )
        .unwrap()
    }

    #[test]
    fn rejects_nonpositive_max_length() {
        let renderer = HierarchyRenderer::new(Camera::new(ImageSize::new(4, 4), 60.0).unwrap());
        assert_eq!(
            renderer.with_max_length(0.0),
            Err(RenderError::MaxLength(0.0))
        );
        assert!(renderer.with_max_length(f64::NAN).is_err());
        assert_eq!(renderer.with_max_length(3.0).unwrap().max_length(), 3.0);
    }

    #[test]
    fn empty_world_is_ceiling_above_floor() {
        let renderer = HierarchyRenderer::new(Camera::new(ImageSize::new(8, 6), 60.0).unwrap());
        let world = empty_world();
        let (image, info) = renderer.render(&world);

        assert_eq!(image.data.len(), 48);
        assert_eq!(info.rays, 48);
        for x in 0..8 {
            assert_eq!(image.get(x, 0), Some(Rgb::CORNFLOWER_BLUE.to_srgba8()));
            assert_eq!(image.get(x, 5), Some(Rgb::SADDLE_BROWN.to_srgba8()));
        }
        // Without walls, every ray reaches the floor or ceiling before leaving a 4×4
        // world except those nearly level, which may leave it.
        assert_eq!(info.solid, 0);
        assert_eq!(info.floor + info.ceiling + info.out_of_world, 48);
    }
}
