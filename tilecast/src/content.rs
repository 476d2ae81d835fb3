//! Procedurally generated demonstration worlds.

use rand::{Rng as _, SeedableRng as _};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::layout::{Layout, LayoutCell};
use crate::material::Palette;
use crate::viewer::Viewer;
use crate::world::{World, WorldError};

/// Side length of the root grid of demo worlds.
pub const DEMO_SIDE: usize = 16;

/// Side length of nested grids in [`DemoTemplate::Nested`] worlds.
pub const DEMO_NESTED_SIDE: usize = 4;

/// Which kind of demo world to generate.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum DemoTemplate {
    /// Only solid and empty cells.
    #[default]
    Flat,
    /// Some interior cells are grids of smaller cells.
    Nested,
}

/// Generates a demo layout.
///
/// Border cells are randomly solid, as are cells in an interior block from 3 to 12 on
/// both axes. The cells in between are left empty, so a viewer starting at (1.5, 1.5)
/// has room to look around. Solid cells use the materials of
/// [`Palette::placeholder()`].
///
/// The same seed always produces the same layout.
pub fn demo_layout(template: DemoTemplate, seed: u64) -> Layout {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let last = DEMO_SIDE - 1;
    let material_count = Palette::PLACEHOLDER_COLORS.len() as u16;
    let random_material = |rng: &mut Xoshiro256PlusPlus| {
        if rng.random_bool(0.5) {
            LayoutCell::Solid(rng.random_range(1..=material_count))
        } else {
            LayoutCell::Empty
        }
    };

    Layout::from_fn(DEMO_SIDE, |x, y| {
        let border = x == 0 || y == 0 || x == last || y == last;
        let interior = (3..=last - 3).contains(&x) && (3..=last - 3).contains(&y);
        if border {
            random_material(&mut rng)
        } else if interior {
            if template == DemoTemplate::Nested && rng.random_bool(0.25) {
                LayoutCell::Nested(Layout::from_fn(DEMO_NESTED_SIDE, |_, _| {
                    if rng.random_bool(0.3) {
                        LayoutCell::Solid(rng.random_range(1..=material_count))
                    } else {
                        LayoutCell::Empty
                    }
                }))
            } else {
                random_material(&mut rng)
            }
        } else {
            LayoutCell::Empty
        }
    })
}

/// Generates a demo world with the default viewer.
///
/// `palette` must contain at least the materials of [`Palette::placeholder()`].
pub fn demo_world(template: DemoTemplate, seed: u64, palette: Palette) -> Result<World, WorldError> {
    World::new(&demo_layout(template, seed), palette, Viewer::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deterministic() {
        assert_eq!(
            demo_layout(DemoTemplate::Nested, 1234),
            demo_layout(DemoTemplate::Nested, 1234)
        );
        assert_ne!(
            demo_layout(DemoTemplate::Flat, 1),
            demo_layout(DemoTemplate::Flat, 2)
        );
    }

    #[test]
    fn free_ring_around_start() {
        for seed in 0..20 {
            let layout = demo_layout(DemoTemplate::Nested, seed);
            for i in 1..DEMO_SIDE - 1 {
                for (x, y) in [(i, 1), (i, 2), (1, i), (2, i)] {
                    assert_eq!(
                        layout.get(x, y),
                        Some(&LayoutCell::Empty),
                        "seed {seed} cell ({x}, {y})"
                    );
                }
            }
        }
    }

    #[test]
    fn flat_has_no_nested_grids() {
        let world = demo_world(DemoTemplate::Flat, 7, Palette::placeholder()).unwrap();
        assert_eq!(world.hierarchy().len(), 1);
        assert_eq!(world.side().get(), 16);
    }

    #[test]
    fn nested_builds() {
        // With 100 interior cells each nested with probability 1/4, there is
        // essentially no chance of none.
        let world = demo_world(DemoTemplate::Nested, 7, Palette::textured_placeholder()).unwrap();
        assert!(world.hierarchy().len() > 1);
        for (_, grid) in world.hierarchy().iter().skip(1) {
            assert_eq!(usize::from(grid.side().get()), DEMO_NESTED_SIDE);
            assert_eq!(grid.cell_extent(), 0.25);
        }
    }
}
