//! The flat column renderer: one DDA walk through the root grid per image column.

use tilecast::World;
use tilecast::euclid::{point2, vec2};
use tilecast::grid::Cell;
use tilecast::material::{Appearance, MaterialId};
use tilecast::math::{
    Axis, FreeCoordinate, FreePoint, FreeVector2, GridPoint, GridVector, Rgb,
};

use crate::camera::Camera;
use crate::{RenderInfo, Renderer, Rendering};

/// Number of cell boundaries a column ray crosses before it is assumed to have missed.
pub const MAX_DDA_STEPS: u32 = 100;

/// Brightness of walls facing the Y axis, relative to walls facing the X axis.
const Y_SIDE_SHADE: f32 = 0.667;

/// Texture side length assumed for flat-colored materials. Only affects rounding.
const FLAT_TEXTURE_SIDE: u32 = 64;

/// Where a column ray met a wall.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub struct ColumnHit {
    /// The solid root cell which was hit.
    pub cell: GridPoint,
    /// Material of that cell.
    pub material: MaterialId,
    /// Which kind of grid line was crossed to enter the cell: [`Axis::X`] for a wall
    /// facing along X, [`Axis::Y`] for one facing along Y.
    pub side: Axis,
    /// Distance from the camera plane to the wall, in multiples of the ray direction.
    /// This is not the Euclidean distance, which would produce fisheye distortion.
    pub perpendicular_distance: FreeCoordinate,
    /// Horizontal position of the hit along the wall face, in `[0, 1)`.
    pub wall_x: FreeCoordinate,
    /// Number of cell boundaries crossed, including the one entering the wall.
    pub steps: u32,
}

/// Walks a horizontal ray from `origin` through the root grid of `world` until it enters a
/// solid cell.
///
/// The cell containing `origin` is never considered a hit. Cells outside the grid and
/// nested grids are passed through as if empty. Returns [`None`] if no wall was entered
/// within [`MAX_DDA_STEPS`] steps, including when `origin` is too far from the grid for
/// that many steps to reach it.
pub fn trace_column(world: &World, origin: FreePoint, ray: FreeVector2) -> Option<ColumnHit> {
    let root = world.hierarchy().root();

    // Each step moves one cell, so this also keeps the tile coordinates from overflowing.
    let reach = FreeCoordinate::from(MAX_DDA_STEPS);
    let upper = root.side().free() + reach;
    if !(origin.x > -reach && origin.x < upper && origin.y > -reach && origin.y < upper) {
        return None;
    }

    // A zero component would give a zero or NaN boundary distance with an infinite
    // delta; the largest finite value keeps the arithmetic ordinary.
    let delta = |c: FreeCoordinate| if c == 0.0 { f64::MAX } else { c.recip().abs() };
    let delta = FreeVector2::new(delta(ray.x), delta(ray.y));
    let step = |c: FreeCoordinate| if c < 0.0 { -1 } else { 1 };
    let step: GridVector = vec2(step(ray.x), step(ray.y));
    let mut tile: GridPoint = point2(origin.x.floor() as i32, origin.y.floor() as i32);
    let mut side_dist = FreeVector2::new(
        if ray.x < 0.0 {
            (origin.x - FreeCoordinate::from(tile.x)) * delta.x
        } else {
            (FreeCoordinate::from(tile.x) + 1.0 - origin.x) * delta.x
        },
        if ray.y < 0.0 {
            (origin.y - FreeCoordinate::from(tile.y)) * delta.y
        } else {
            (FreeCoordinate::from(tile.y) + 1.0 - origin.y) * delta.y
        },
    );

    for steps in 1..=MAX_DDA_STEPS {
        let side = if side_dist.x < side_dist.y {
            side_dist.x += delta.x;
            tile.x += step.x;
            Axis::X
        } else {
            side_dist.y += delta.y;
            tile.y += step.y;
            Axis::Y
        };

        let Some(Cell::Solid(material)) = root.get(tile) else {
            continue;
        };

        let (tile_coord, origin_coord, step_coord, ray_coord) = match side {
            Axis::X => (tile.x, origin.x, step.x, ray.x),
            _ => (tile.y, origin.y, step.y, ray.y),
        };
        let perpendicular_distance = (FreeCoordinate::from(tile_coord) - origin_coord
            + FreeCoordinate::from(1 - step_coord) / 2.0)
            / ray_coord;
        let wall_x = match side {
            Axis::X => perpendicular_distance.mul_add(ray.y, origin.y),
            _ => perpendicular_distance.mul_add(ray.x, origin.x),
        };
        return Some(ColumnHit {
            cell: tile,
            material,
            side,
            perpendicular_distance,
            wall_x: wall_x - wall_x.floor(),
            steps,
        });
    }
    None
}

/// A renderer which draws untextured floor and ceiling halves and, for each column, one
/// vertical wall slice found by [`trace_column()`].
///
/// Only the root grid is consulted, so nested grids are invisible and the viewer's
/// height is ignored. Walls are always drawn centered on the middle row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnRenderer {
    camera: Camera,
}

impl ColumnRenderer {
    /// Constructs a renderer drawing with the given camera.
    pub fn new(camera: Camera) -> Self {
        Self { camera }
    }

    /// The camera which determines image size and field of view.
    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Draws the wall slice for `hit`, found by casting `ray`, into column `x` of `image`.
    fn draw_slice(
        &self,
        world: &World,
        image: &mut Rendering,
        x: u32,
        ray: FreeVector2,
        hit: &ColumnHit,
    ) {
        let height = i64::from(self.camera.size().height);
        let projected = (self.camera.projection_distance() / hit.perpendicular_distance)
            .min(FreeCoordinate::from(i32::MAX));
        // Truncation toward zero, and saturation of infinities and NaN, are intended.
        let line_height = projected as i64;
        let draw_start = (-line_height / 2 + height / 2).max(0);
        let draw_end = (line_height / 2 + height / 2).min(height - 1);

        let appearance = world.palette().get(hit.material);
        let texture_side = match appearance {
            Some(Appearance::Texture(texture)) => texture.side(),
            _ => FLAT_TEXTURE_SIDE,
        };
        let mut tex_x = ((hit.wall_x * FreeCoordinate::from(texture_side)) as u32)
            .min(texture_side - 1);
        // Mirror so that textures are not reversed on walls seen from the +X or -Y side.
        let flip = match hit.side {
            Axis::X => ray.x > 0.0,
            _ => ray.y < 0.0,
        };
        if flip {
            tex_x = texture_side - tex_x - 1;
        }

        let tex_step = FreeCoordinate::from(texture_side) / line_height as FreeCoordinate;
        let mut tex_pos = (draw_start - height / 2 + line_height / 2) as FreeCoordinate * tex_step;
        for y in draw_start..=draw_end {
            let tex_y = (tex_pos as u32).min(texture_side - 1);
            tex_pos += tex_step;
            let mut color = match appearance {
                Some(Appearance::Texture(texture)) => texture.texel(tex_x, tex_y),
                Some(appearance) => appearance.color_at(hit.wall_x, 0.0),
                None => Rgb::MAGENTA,
            };
            if hit.side == Axis::Y {
                color = color.scale(Y_SIDE_SHADE);
            }
            image.set(x, y as u32, color.to_srgba8());
        }
    }
}

impl Renderer for ColumnRenderer {
    fn render(&self, world: &World) -> (Rendering, RenderInfo) {
        let size = self.camera.size();
        let colors = world.scene_colors();
        let ceiling = colors.ceiling.to_srgba8();
        let floor = colors.floor.to_srgba8();
        let mut image = Rendering {
            size,
            data: (0..size.height)
                .flat_map(|y| {
                    let pixel = if y < size.height / 2 { ceiling } else { floor };
                    (0..size.width).map(move |_| pixel)
                })
                .collect(),
        };

        let viewer = world.viewer();
        let mut info = RenderInfo::default();
        for x in 0..size.width {
            let ray = self.camera.column_ray(viewer.direction(), x);
            info.rays += 1;
            match trace_column(world, viewer.position(), ray) {
                Some(hit) => {
                    info.hops += u64::from(hit.steps);
                    info.solid += 1;
                    self.draw_slice(world, &mut image, x, ray, &hit);
                }
                None => {
                    info.hops += u64::from(MAX_DDA_STEPS);
                    info.exhausted += 1;
                }
            }
        }
        log::debug!("rendered {}×{} columns: {info}", size.width, size.height);
        (image, info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tilecast::layout::Layout;
    use tilecast::material::Palette;
    use tilecast::math::ImageSize;
    use tilecast::viewer::Viewer;

    fn corridor() -> World {
        // Material 1 at (5, 1) ahead of the default viewer, 2 at (1, 0) beside it.
        let mut ids = [[0u16; 8]; 8];
        ids[1][5] = 1;
        ids[0][1] = 2;
        World::new(
            &Layout::from_ids(ids),
            Palette::placeholder(),
            Viewer::default(),
        )
        .unwrap()
    }

    #[test]
    fn trace_straight_ahead() {
        let world = corridor();
        let hit = trace_column(&world, FreePoint::new(1.5, 1.5, 0.5), FreeVector2::new(1.0, 0.0))
            .unwrap();
        assert_eq!(
            hit,
            ColumnHit {
                cell: point2(5, 1),
                material: MaterialId::new(1).unwrap(),
                side: Axis::X,
                perpendicular_distance: 3.5,
                wall_x: 0.5,
                steps: 4,
            }
        );
    }

    #[test]
    fn trace_y_side() {
        let world = corridor();
        let hit = trace_column(&world, FreePoint::new(1.5, 1.5, 0.5), FreeVector2::new(0.0, -1.0))
            .unwrap();
        assert_eq!(hit.cell, point2(1, 0));
        assert_eq!(hit.side, Axis::Y);
        assert_eq!(hit.perpendicular_distance, 0.5);
        assert_eq!(hit.steps, 1);
    }

    #[test]
    fn trace_miss_leaves_map() {
        let world = corridor();
        assert_eq!(
            trace_column(&world, FreePoint::new(1.5, 1.5, 0.5), FreeVector2::new(-1.0, 0.0)),
            None
        );
    }

    #[test]
    fn far_away_origin_misses() {
        let world = corridor();
        for origin in [
            FreePoint::new(3e9, 1.5, 0.5),
            FreePoint::new(-3e9, 1.5, 0.5),
            FreePoint::new(1.5, f64::MAX, 0.5),
        ] {
            assert_eq!(trace_column(&world, origin, FreeVector2::new(1.0, 0.0)), None);
            assert_eq!(trace_column(&world, origin, FreeVector2::new(-1.0, -1.0)), None);
        }
    }

    #[test]
    fn far_away_viewer_sees_floor_and_ceiling() {
        use tilecast::euclid::point3;
        let world = World::new(
            &Layout::from_ids([[0u16; 2]; 2]),
            Palette::placeholder(),
            Viewer::new(point3(3e9, 0.5, 0.5), vec2(1.0, 0.0)).unwrap(),
        )
        .unwrap();
        let renderer = ColumnRenderer::new(Camera::new(ImageSize::new(4, 4), 60.0).unwrap());
        let (image, info) = renderer.render(&world);
        assert_eq!(info.rays, 4);
        assert_eq!(info.exhausted, 4);
        let colors = world.scene_colors();
        for x in 0..4 {
            assert_eq!(image.get(x, 0), Some(colors.ceiling.to_srgba8()));
            assert_eq!(image.get(x, 3), Some(colors.floor.to_srgba8()));
        }
    }

    #[test]
    fn nested_cells_are_transparent() {
        use tilecast::layout::LayoutCell;
        let mut rows = vec![vec![LayoutCell::Empty; 4]; 4];
        rows[0][1] = LayoutCell::Nested(Layout::from_ids([[1u16; 2]; 2]));
        rows[0][3] = LayoutCell::Solid(3);
        let world = World::new(&Layout::new(rows), Palette::placeholder(), Viewer::default())
            .unwrap();
        let hit = trace_column(&world, FreePoint::new(0.5, 0.5, 0.5), FreeVector2::new(1.0, 0.0))
            .unwrap();
        assert_eq!(hit.cell, point2(3, 0));
        assert_eq!(hit.material, MaterialId::new(3).unwrap());
    }
}
