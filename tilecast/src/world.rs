//! [`World`], the container of everything a ray can see.

use crate::grid::{GridSide, Hierarchy};
use crate::layout::{Layout, LayoutPath};
use crate::material::{MaterialId, Palette, SceneColors};
use crate::math::{FreeCoordinate, FreePoint, FreeVector, Rgb};
use crate::raycast::{self, RayOutcome, Terminal};
use crate::viewer::Viewer;

/// A grid hierarchy, the materials its cells refer to, and a viewer.
///
/// The hierarchy and palette are immutable once the world is built. Casting rays only
/// reads the world, so it may be done from many threads at once.
#[derive(Clone, Debug)]
pub struct World {
    hierarchy: Hierarchy,
    palette: Palette,
    colors: SceneColors,
    viewer: Viewer,
}

impl World {
    /// Builds a world from a layout, checking that the layout is well-formed and uses only
    /// materials present in `palette`.
    pub fn new(layout: &Layout, palette: Palette, viewer: Viewer) -> Result<Self, WorldError> {
        let hierarchy = layout.build(&palette)?;
        log::debug!(
            "built world with root side {} and {} grids",
            hierarchy.root().side().get(),
            hierarchy.len(),
        );
        Ok(Self {
            hierarchy,
            palette,
            colors: SceneColors::DEFAULT,
            viewer,
        })
    }

    /// Replaces the colors used for rays which do not hit a solid cell.
    #[must_use]
    pub fn with_scene_colors(mut self, colors: SceneColors) -> Self {
        self.colors = colors;
        self
    }

    /// The grids of this world.
    #[inline]
    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    /// Side length of the root grid, which is also the size of the world in world units.
    #[inline]
    pub fn side(&self) -> GridSide {
        self.hierarchy.root().side()
    }

    /// The materials of this world.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Colors used for rays which do not hit a solid cell.
    #[inline]
    pub fn scene_colors(&self) -> SceneColors {
        self.colors
    }

    /// The current point of view.
    #[inline]
    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    /// Mutable access to the point of view, for applying movement.
    #[inline]
    pub fn viewer_mut(&mut self) -> &mut Viewer {
        &mut self.viewer
    }

    /// Casts a ray and returns the color it sees.
    ///
    /// `position` is in world units. `direction` need not be normalized; `max_length`
    /// is measured in multiples of it.
    pub fn cast_ray(
        &self,
        position: FreePoint,
        direction: FreeVector,
        max_length: FreeCoordinate,
    ) -> Rgb {
        self.color_of(&self.trace(position, direction, max_length).terminal)
    }

    /// Casts a ray and returns how it ended, without resolving a color.
    pub fn trace(
        &self,
        position: FreePoint,
        direction: FreeVector,
        max_length: FreeCoordinate,
    ) -> RayOutcome {
        let side = self.side().free();
        // Written so that NaN counts as outside.
        if !((0.0..side).contains(&position.x) && (0.0..side).contains(&position.y)) {
            return RayOutcome::immediate(Terminal::OutOfWorld);
        }

        if direction.x == 0.0 && direction.y == 0.0 {
            return RayOutcome::immediate(vertical(position.z, direction.z, max_length));
        }

        let start = self
            .hierarchy
            .locate(FreePoint::new(position.x / side, position.y / side, position.z));
        raycast::cast(&self.hierarchy, start, direction, max_length)
    }

    /// Returns the color corresponding to a ray outcome.
    pub fn color_of(&self, terminal: &Terminal) -> Rgb {
        match *terminal {
            Terminal::Solid { material, hit } => match self.palette.get(material) {
                Some(appearance) => appearance.color_at(hit.u, hit.v),
                // Unreachable, since construction checked every material.
                None => Rgb::MAGENTA,
            },
            Terminal::Ceiling => self.colors.ceiling,
            Terminal::Floor => self.colors.floor,
            Terminal::Exhausted => self.colors.exhausted,
            Terminal::OutOfWorld => self.colors.out_of_world,
        }
    }
}

/// A ray that moves only vertically never crosses a cell boundary, so it can only
/// reach the floor or ceiling, regardless of what is in the cell.
fn vertical(z: FreeCoordinate, dz: FreeCoordinate, max_length: FreeCoordinate) -> Terminal {
    let (plane, terminal) = if dz > 0.0 {
        (1.0, Terminal::Floor)
    } else if dz < 0.0 {
        (0.0, Terminal::Ceiling)
    } else {
        return Terminal::Exhausted;
    };
    let distance = ((plane - z) / dz).max(0.0);
    if distance > max_length {
        Terminal::Exhausted
    } else {
        terminal
    }
}

/// Errors from [`World::new()`] describing what is wrong with the [`Layout`].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum WorldError {
    /// A grid's side length is unusable.
    #[error("grid at {path} has an invalid size")]
    GridSize {
        /// Which grid.
        path: LayoutPath,
        /// What is wrong with the size.
        source: crate::grid::GridSizeError,
    },

    /// A row has a different number of cells than the grid has rows.
    #[error(
        "row {row} of the grid at {path} has {actual} cells, but the grid is {expected} cells wide"
    )]
    RaggedRow {
        /// Which grid.
        path: LayoutPath,
        /// Which row, counting from 0.
        row: usize,
        /// Number of rows in the grid.
        expected: usize,
        /// Number of cells in the row.
        actual: usize,
    },

    /// A cell used the reserved material number 0.
    #[error("cell {cell:?} of the grid at {path} uses material 0, which is reserved")]
    ZeroMaterial {
        /// Which grid.
        path: LayoutPath,
        /// Position of the cell in that grid.
        cell: [usize; 2],
    },

    /// A cell used a material which is not in the palette.
    #[error(
        "cell {cell:?} of the grid at {path} uses material {number}, which is not in the palette",
        number = .material.get()
    )]
    UnknownMaterial {
        /// Which grid.
        path: LayoutPath,
        /// Position of the cell in that grid.
        cell: [usize; 2],
        /// The missing material.
        material: MaterialId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutCell;
    use euclid::vec3;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn scenario_world() -> World {
        World::new(
            &Layout::from_ids([[1u16, 0], [0, 0]]),
            Palette::placeholder(),
            Viewer::default(),
        )
        .unwrap()
    }

    #[test]
    fn out_of_world_start_takes_no_hops() {
        let world = scenario_world();
        assert_eq!(
            world.trace(FreePoint::new(-1.0, 0.0, 0.5), vec3(1.0, 0.0, 0.0), 10.0),
            RayOutcome {
                terminal: Terminal::OutOfWorld,
                hops: 0
            }
        );
        assert_eq!(
            world.cast_ray(FreePoint::new(0.5, 2.0, 0.5), vec3(0.0, -1.0, 0.0), 10.0),
            Rgb::BLACK
        );
        assert_eq!(
            world.trace(FreePoint::new(f64::NAN, 0.5, 0.5), vec3(1.0, 0.0, 0.0), 10.0),
            RayOutcome::immediate(Terminal::OutOfWorld)
        );
    }

    #[rstest]
    #[case::down(0.5, 1.0, 10.0, Terminal::Floor)]
    #[case::up(0.5, -1.0, 10.0, Terminal::Ceiling)]
    #[case::too_short(0.5, 1.0, 0.25, Terminal::Exhausted)]
    #[case::just_enough(0.25, -0.5, 0.5, Terminal::Ceiling)]
    #[case::still(0.5, 0.0, 10.0, Terminal::Exhausted)]
    fn vertical_rays(
        #[case] z: FreeCoordinate,
        #[case] dz: FreeCoordinate,
        #[case] max_length: FreeCoordinate,
        #[case] expected: Terminal,
    ) {
        let world = scenario_world();
        // Both a solid and an empty cell, to show contents do not matter.
        for (x, y) in [(0.5, 0.5), (1.5, 1.5)] {
            assert_eq!(
                world
                    .trace(FreePoint::new(x, y, z), vec3(0.0, 0.0, dz), max_length)
                    .terminal,
                expected
            );
        }
    }

    #[test]
    fn scene_colors_are_configurable() {
        let colors = SceneColors {
            floor: Rgb::WHITE,
            ..SceneColors::DEFAULT
        };
        let world = scenario_world().with_scene_colors(colors);
        assert_eq!(world.scene_colors(), colors);
        assert_eq!(
            world.cast_ray(FreePoint::new(1.5, 1.5, 0.5), vec3(0.0, 0.0, 1.0), 10.0),
            Rgb::WHITE
        );
    }

    #[test]
    fn new_rejects_unknown_material() {
        let error = World::new(
            &Layout::new(vec![vec![LayoutCell::Solid(5)]]),
            Palette::placeholder(),
            Viewer::default(),
        )
        .unwrap_err();
        assert_eq!(
            error.to_string(),
            "cell [0, 0] of the grid at root uses material 5, which is not in the palette"
        );
    }

    #[test]
    fn grid_size_error_has_source() {
        let error = World::new(
            &Layout::from_ids([[0u16; 3]; 3]),
            Palette::placeholder(),
            Viewer::default(),
        )
        .unwrap_err();
        assert_eq!(error.to_string(), "grid at root has an invalid size");
        assert_eq!(
            std::error::Error::source(&error).map(ToString::to_string),
            Some("grid side length 3 is not a power of two".to_owned())
        );
    }
}
