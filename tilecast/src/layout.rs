//! Descriptions of world contents, from which [`World`]s are built.
//!
//! A [`Layout`] is plain data with no invariants of its own; it is checked when it is
//! turned into a [`Hierarchy`] by [`World::new()`].
//!
//! [`World`]: crate::World
//! [`World::new()`]: crate::World::new

use core::fmt;

use euclid::point2;

use crate::grid::{Cell, GridId, GridSide, Hierarchy, ParentLink};
use crate::material::{MaterialId, Palette};
use crate::math::GridCoordinate;
use crate::world::WorldError;

/// What one cell of a [`Layout`] contains.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[allow(clippy::exhaustive_enums)]
pub enum LayoutCell {
    /// Nothing.
    Empty,
    /// A wall of the given material number. 0 is not a valid material.
    Solid(u16),
    /// A smaller grid filling this cell.
    Nested(Layout),
}

impl LayoutCell {
    /// Interprets integer map notation: 0 is empty and any other number is that material.
    #[inline]
    pub fn from_id(id: u16) -> Self {
        if id == 0 {
            LayoutCell::Empty
        } else {
            LayoutCell::Solid(id)
        }
    }
}

/// A square arrangement of [`LayoutCell`]s, stored as rows.
///
/// Row `y` holds the cells with Y coordinate `y`; within a row, the cell at index `x` has
/// X coordinate `x`.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Layout {
    rows: Vec<Vec<LayoutCell>>,
}

impl Layout {
    /// Constructs a layout from rows of cells. The side length is the number of rows.
    pub fn new(rows: Vec<Vec<LayoutCell>>) -> Self {
        Self { rows }
    }

    /// Constructs a layout from rows of material numbers, where 0 means empty.
    ///
    /// ```
    /// use tilecast::layout::{Layout, LayoutCell};
    ///
    /// let layout = Layout::from_ids([[1u16, 0], [0, 0]]);
    /// assert_eq!(layout.get(0, 0), Some(&LayoutCell::Solid(1)));
    /// assert_eq!(layout.get(1, 0), Some(&LayoutCell::Empty));
    /// ```
    pub fn from_ids<R: AsRef<[u16]>>(rows: impl IntoIterator<Item = R>) -> Self {
        Self::new(
            rows.into_iter()
                .map(|row| row.as_ref().iter().copied().map(LayoutCell::from_id).collect())
                .collect(),
        )
    }

    /// Constructs a `side`×`side` layout by calling `f` with the X and Y of each cell.
    pub fn from_fn(side: usize, mut f: impl FnMut(usize, usize) -> LayoutCell) -> Self {
        Self::new(
            (0..side)
                .map(|y| (0..side).map(|x| f(x, y)).collect())
                .collect(),
        )
    }

    /// Number of rows.
    #[inline]
    pub fn side(&self) -> usize {
        self.rows.len()
    }

    /// The rows of cells.
    #[inline]
    pub fn rows(&self) -> &[Vec<LayoutCell>] {
        &self.rows
    }

    /// Returns the cell at `(x, y)`, if there is one.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<&LayoutCell> {
        self.rows.get(y)?.get(x)
    }

    /// Checks this layout and converts it to a [`Hierarchy`].
    pub(crate) fn build(&self, palette: &Palette) -> Result<Hierarchy, WorldError> {
        let mut path = LayoutPath::default();
        let side = self.checked_side(&path)?;
        let mut hierarchy = Hierarchy::with_root(side, vec![Cell::Empty; side.area()].into());
        self.fill(&mut hierarchy, GridId::ROOT, palette, &mut path)?;
        Ok(hierarchy)
    }

    fn checked_side(&self, path: &LayoutPath) -> Result<GridSide, WorldError> {
        let side = GridSide::new(self.side()).map_err(|source| WorldError::GridSize {
            path: path.clone(),
            source,
        })?;
        for (y, row) in self.rows.iter().enumerate() {
            if row.len() != self.side() {
                return Err(WorldError::RaggedRow {
                    path: path.clone(),
                    row: y,
                    expected: self.side(),
                    actual: row.len(),
                });
            }
        }
        Ok(side)
    }

    /// Stores the cells of `self` into `grid`, which must already have the right size.
    /// Nested layouts are added to the hierarchy as they are found, depth first.
    fn fill(
        &self,
        hierarchy: &mut Hierarchy,
        grid: GridId,
        palette: &Palette,
        path: &mut LayoutPath,
    ) -> Result<(), WorldError> {
        for (y, row) in self.rows.iter().enumerate() {
            for (x, layout_cell) in row.iter().enumerate() {
                // Cannot overflow since `checked_side()` bounded the side length.
                let position = point2(x as GridCoordinate, y as GridCoordinate);
                let cell = match *layout_cell {
                    LayoutCell::Empty => Cell::Empty,
                    LayoutCell::Solid(number) => {
                        let Some(material) = MaterialId::new(number) else {
                            return Err(WorldError::ZeroMaterial {
                                path: path.clone(),
                                cell: [x, y],
                            });
                        };
                        if !palette.contains(material) {
                            return Err(WorldError::UnknownMaterial {
                                path: path.clone(),
                                cell: [x, y],
                                material,
                            });
                        }
                        Cell::Solid(material)
                    }
                    LayoutCell::Nested(ref nested) => {
                        path.0.push([x, y]);
                        let side = nested.checked_side(path)?;
                        let child = hierarchy.push(
                            side,
                            vec![Cell::Empty; side.area()].into(),
                            Some(ParentLink {
                                grid,
                                offset: position,
                            }),
                        );
                        nested.fill(hierarchy, child, palette, path)?;
                        path.0.pop();
                        Cell::Grid(child)
                    }
                };
                hierarchy.set(grid, position, cell);
            }
        }
        Ok(())
    }
}

/// Identifies a nested layout by the cells leading to it from the root.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct LayoutPath(pub Vec<[usize; 2]>);

impl fmt::Display for LayoutPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("root")?;
        for [x, y] in &self.0 {
            write!(f, "/({x}, {y})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridSizeError;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_ids_maps_zero_to_empty() {
        let layout = Layout::from_ids([[0u16, 3], [4, 0]]);
        assert_eq!(
            layout.rows(),
            &[
                vec![LayoutCell::Empty, LayoutCell::Solid(3)],
                vec![LayoutCell::Solid(4), LayoutCell::Empty],
            ]
        );
        assert_eq!(layout.get(1, 0), Some(&LayoutCell::Solid(3)));
        assert_eq!(layout.get(2, 0), None);
    }

    #[test]
    fn build_nested() {
        let inner = Layout::from_ids([[1u16, 0], [0, 2]]);
        let layout = Layout::new(vec![
            vec![LayoutCell::Solid(3), LayoutCell::Nested(inner)],
            vec![LayoutCell::Empty, LayoutCell::Empty],
        ]);
        let hierarchy = layout.build(&Palette::placeholder()).unwrap();

        assert_eq!(hierarchy.len(), 2);
        let (child_id, child) = hierarchy.iter().nth(1).unwrap();
        assert_eq!(hierarchy.root().get([1, 0]), Some(Cell::Grid(child_id)));
        assert_eq!(child.parent().map(|link| link.offset), Some(point2(1, 0)));
        assert_eq!(
            child.get([1, 1]),
            Some(Cell::Solid(MaterialId::new(2).unwrap()))
        );
    }

    #[test]
    fn build_rejects_bad_size() {
        let error = Layout::from_ids([[0u16; 3]; 3])
            .build(&Palette::placeholder())
            .unwrap_err();
        assert_eq!(
            error,
            WorldError::GridSize {
                path: LayoutPath::default(),
                source: GridSizeError::NotPowerOfTwo(3)
            }
        );
        assert_eq!(
            Layout::default().build(&Palette::placeholder()),
            Err(WorldError::GridSize {
                path: LayoutPath::default(),
                source: GridSizeError::Zero
            })
        );
    }

    #[test]
    fn build_rejects_ragged_nested_row() {
        let inner = Layout::new(vec![
            vec![LayoutCell::Empty, LayoutCell::Empty],
            vec![LayoutCell::Empty],
        ]);
        let layout = Layout::new(vec![vec![LayoutCell::Nested(inner)]]);
        let error = layout.build(&Palette::placeholder()).unwrap_err();
        assert_eq!(
            error,
            WorldError::RaggedRow {
                path: LayoutPath(vec![[0, 0]]),
                row: 1,
                expected: 2,
                actual: 1,
            }
        );
        assert_eq!(
            error.to_string(),
            "row 1 of the grid at root/(0, 0) has 1 cells, but the grid is 2 cells wide"
        );
    }

    #[test]
    fn build_rejects_materials() {
        let palette = Palette::placeholder();
        assert_eq!(
            Layout::new(vec![vec![LayoutCell::Solid(0)]]).build(&palette),
            Err(WorldError::ZeroMaterial {
                path: LayoutPath::default(),
                cell: [0, 0]
            })
        );
        assert_eq!(
            Layout::from_ids([[0u16, 0], [0, 9]]).build(&palette),
            Err(WorldError::UnknownMaterial {
                path: LayoutPath::default(),
                cell: [1, 1],
                material: MaterialId::new(9).unwrap(),
            })
        );
    }
}
