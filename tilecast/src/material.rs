//! Materials: what a solid cell looks like.

use core::fmt;
use core::num::NonZeroU16;
use std::sync::Arc;

use crate::math::{FreeCoordinate, Rgb};

/// Identifies a material in a [`Palette`].
///
/// The value 0 is reserved (it means “empty” in integer layouts) and cannot be
/// represented.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct MaterialId(NonZeroU16);

impl MaterialId {
    /// Returns the id with the given number, or [`None`] if it is 0.
    #[inline]
    pub const fn new(id: u16) -> Option<Self> {
        match NonZeroU16::new(id) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    /// Returns the number of this id, which is never 0.
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl fmt::Debug for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MaterialId({})", self.0)
    }
}

impl TryFrom<u16> for MaterialId {
    type Error = ZeroMaterialId;

    #[inline]
    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ZeroMaterialId)
    }
}

/// Error from [`MaterialId::try_from()`] when given 0.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("material id 0 is reserved for empty cells")]
#[non_exhaustive]
pub struct ZeroMaterialId;

/// A square image which may be applied to the faces of solid cells.
///
/// Texels are stored in rows; row 0 is at the top of a wall (height 0) and column 0
/// is at the start of the face.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Texture {
    side: u32,
    texels: Box<[Rgb]>,
}

impl Texture {
    /// Side length of the placeholder textures, and of textures in classic column renderers.
    pub const DEFAULT_SIDE: u32 = 64;

    /// Constructs a texture from its texels in row-major order.
    pub fn new(side: u32, texels: Vec<Rgb>) -> Result<Self, TextureError> {
        if !side.is_power_of_two() {
            return Err(TextureError::SideNotPowerOfTwo(side));
        }
        let expected = side as usize * side as usize;
        if texels.len() != expected {
            return Err(TextureError::WrongTexelCount {
                expected,
                actual: texels.len(),
            });
        }
        Ok(Self {
            side,
            texels: texels.into_boxed_slice(),
        })
    }

    /// Constructs a texture by calling `f` with the column and row of each texel.
    pub fn from_fn(side: u32, f: impl FnMut(u32, u32) -> Rgb) -> Result<Self, TextureError> {
        if !side.is_power_of_two() {
            return Err(TextureError::SideNotPowerOfTwo(side));
        }
        Ok(Self::generate(side, f))
    }

    /// Generates a brick-like pattern tinted with `base`.
    ///
    /// This stands in for texture images, which are not loaded by this crate.
    pub fn placeholder(base: Rgb) -> Self {
        let side = Self::DEFAULT_SIDE;
        let brick_height = side / 4;
        let brick_width = side / 2;
        Self::generate(side, |column, row| {
            let course = row / brick_height;
            let shifted = column + (course % 2) * (brick_width / 2);
            if row % brick_height == 0 || shifted % brick_width == 0 {
                // mortar
                base.scale(0.45)
            } else if (column / 4 + row / 4) % 2 == 0 {
                base
            } else {
                base.scale(0.85)
            }
        })
    }

    /// `side` must already be known to be a power of two.
    fn generate(side: u32, mut f: impl FnMut(u32, u32) -> Rgb) -> Self {
        Self {
            side,
            texels: (0..side)
                .flat_map(|row| (0..side).map(move |column| (column, row)))
                .map(|(column, row)| f(column, row))
                .collect(),
        }
    }

    /// Side length in texels.
    #[inline]
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Returns the texel at the given column and row, wrapping coordinates that are out of
    /// bounds.
    #[inline]
    pub fn texel(&self, column: u32, row: u32) -> Rgb {
        let mask = self.side - 1;
        self.texels[((row & mask) * self.side + (column & mask)) as usize]
    }

    /// Samples the texture at `(u, v)` in the unit square with nearest-neighbor
    /// filtering. Coordinates outside `[0, 1]` are clamped.
    pub fn sample(&self, u: FreeCoordinate, v: FreeCoordinate) -> Rgb {
        let max = self.side - 1;
        let to_texel = |c: FreeCoordinate| -> u32 {
            // `as` saturates at 0 and maps NaN to 0.
            ((c * FreeCoordinate::from(self.side)).floor() as u32).min(max)
        };
        self.texel(to_texel(u), to_texel(v))
    }
}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Texel data is far too long to be useful in debug output.
        f.debug_struct("Texture")
            .field("side", &self.side)
            .finish_non_exhaustive()
    }
}

/// Errors from constructing a [`Texture`].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum TextureError {
    /// The side length must be a power of two.
    #[error("texture side length {0} is not a power of two")]
    SideNotPowerOfTwo(u32),

    /// The number of texels did not match the side length.
    #[error("texture should have {expected} texels but {actual} were given")]
    WrongTexelCount {
        /// Side length squared.
        expected: usize,
        /// Length of the given data.
        actual: usize,
    },
}

/// How a material looks.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Appearance {
    /// The same color everywhere on every face.
    Flat(Rgb),
    /// A texture stretched over each face, one copy per cell.
    Texture(Arc<Texture>),
}

impl Appearance {
    /// The color at face coordinate `(u, v)`, both in the unit square.
    /// `v` is the height, 0 at the top of the wall.
    #[inline]
    pub fn color_at(&self, u: FreeCoordinate, v: FreeCoordinate) -> Rgb {
        match self {
            Appearance::Flat(color) => *color,
            Appearance::Texture(texture) => texture.sample(u, v),
        }
    }
}

impl From<Rgb> for Appearance {
    fn from(value: Rgb) -> Self {
        Appearance::Flat(value)
    }
}

impl From<Texture> for Appearance {
    fn from(value: Texture) -> Self {
        Appearance::Texture(Arc::new(value))
    }
}

/// Maps [`MaterialId`]s to [`Appearance`]s.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Palette {
    /// Indexed by `id - 1`.
    entries: Vec<Option<Appearance>>,
}

impl Palette {
    /// The colors of the placeholder materials 1 through 4.
    pub const PLACEHOLDER_COLORS: [Rgb; 4] = [Rgb::BLUE, Rgb::GREEN, Rgb::RED, Rgb::YELLOW];

    /// Constructs an empty palette.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// A palette of flat colors: 1 blue, 2 green, 3 red, 4 yellow.
    pub fn placeholder() -> Self {
        Self::placeholder_with(Appearance::Flat)
    }

    /// Like [`Palette::placeholder()`], but each material has a generated texture
    /// in its color.
    pub fn textured_placeholder() -> Self {
        Self::placeholder_with(|color| Texture::placeholder(color).into())
    }

    fn placeholder_with(mut f: impl FnMut(Rgb) -> Appearance) -> Self {
        let mut palette = Self::new();
        for (id, color) in (1..).zip(Self::PLACEHOLDER_COLORS) {
            if let Some(id) = MaterialId::new(id) {
                palette.insert(id, f(color));
            }
        }
        palette
    }

    /// Adds or replaces the appearance of `id`, returning the previous one.
    pub fn insert(&mut self, id: MaterialId, appearance: impl Into<Appearance>) -> Option<Appearance> {
        let index = usize::from(id.get() - 1);
        if self.entries.len() <= index {
            self.entries.resize(index + 1, None);
        }
        self.entries[index].replace(appearance.into())
    }

    /// Returns the appearance of `id`, if it has one.
    #[inline]
    pub fn get(&self, id: MaterialId) -> Option<&Appearance> {
        self.entries
            .get(usize::from(id.get() - 1))
            .and_then(Option::as_ref)
    }

    /// Whether `id` has an appearance.
    #[inline]
    pub fn contains(&self, id: MaterialId) -> bool {
        self.get(id).is_some()
    }

    /// Iterates over the ids which have appearances, in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = (MaterialId, &Appearance)> + '_ {
        (1..=u16::MAX).zip(&self.entries).filter_map(|(id, entry)| {
            Some((MaterialId::new(id)?, entry.as_ref()?))
        })
    }
}

/// Colors seen by rays which do not end at a solid cell.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SceneColors {
    /// Seen by rays that reach height 0.
    pub ceiling: Rgb,
    /// Seen by rays that reach height 1.
    pub floor: Rgb,
    /// Seen by rays that run out of length first.
    pub exhausted: Rgb,
    /// Seen by rays that leave the root grid, or start outside it.
    pub out_of_world: Rgb,
}

impl SceneColors {
    /// Cornflower blue ceiling, saddle brown floor, and black otherwise.
    pub const DEFAULT: Self = Self {
        ceiling: Rgb::CORNFLOWER_BLUE,
        floor: Rgb::SADDLE_BROWN,
        exhausted: Rgb::BLACK,
        out_of_world: Rgb::BLACK,
    };
}

impl Default for SceneColors {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn material_id_zero_is_rejected() {
        assert_eq!(MaterialId::new(0), None);
        assert_eq!(MaterialId::try_from(0), Err(ZeroMaterialId));
        assert_eq!(MaterialId::try_from(7).map(MaterialId::get), Ok(7));
    }

    #[test]
    fn texture_errors() {
        assert_eq!(
            Texture::new(3, vec![Rgb::BLACK; 9]),
            Err(TextureError::SideNotPowerOfTwo(3))
        );
        assert_eq!(
            Texture::new(2, vec![Rgb::BLACK; 3]),
            Err(TextureError::WrongTexelCount {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn texture_sample_nearest_and_clamped() {
        let texture = Texture::from_fn(2, |column, row| match (column, row) {
            (0, 0) => Rgb::RED,
            (1, 0) => Rgb::GREEN,
            (0, 1) => Rgb::BLUE,
            _ => Rgb::WHITE,
        })
        .unwrap();
        assert_eq!(texture.sample(0.1, 0.1), Rgb::RED);
        assert_eq!(texture.sample(0.9, 0.1), Rgb::GREEN);
        assert_eq!(texture.sample(0.1, 0.6), Rgb::BLUE);
        assert_eq!(texture.sample(1.0, 1.0), Rgb::WHITE);
        assert_eq!(texture.sample(-3.0, 5.0), Rgb::BLUE);
        assert_eq!(texture.sample(f64::NAN, 0.0), Rgb::RED);
    }

    #[test]
    fn placeholder_texture_is_tinted() {
        let texture = Texture::placeholder(Rgb::RED);
        assert_eq!(texture.side(), Texture::DEFAULT_SIDE);
        // Top row is mortar.
        assert_eq!(texture.texel(5, 0), Rgb::RED.scale(0.45));
        assert_eq!(texture.texel(1, 1), Rgb::RED);
    }

    #[test]
    fn placeholder_palette() {
        let palette = Palette::placeholder();
        let ids: Vec<u16> = palette.iter().map(|(id, _)| id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(
            palette.get(MaterialId::new(1).unwrap()),
            Some(&Appearance::Flat(Rgb::BLUE))
        );
        assert_eq!(palette.get(MaterialId::new(5).unwrap()), None);
        assert_eq!(palette.get(MaterialId::new(900).unwrap()), None);
    }

    #[test]
    fn palette_insert_replaces() {
        let id = MaterialId::new(3).unwrap();
        let mut palette = Palette::new();
        assert_eq!(palette.insert(id, Rgb::WHITE), None);
        assert_eq!(
            palette.insert(id, Rgb::BLACK),
            Some(Appearance::Flat(Rgb::WHITE))
        );
        assert!(!palette.contains(MaterialId::new(1).unwrap()));
        assert!(palette.contains(id));
    }

    #[test]
    fn flat_appearance_ignores_coordinates() {
        let appearance = Appearance::from(Rgb::YELLOW);
        assert_eq!(appearance.color_at(0.0, 0.0), Rgb::YELLOW);
        assert_eq!(appearance.color_at(0.7, 0.3), Rgb::YELLOW);
    }
}
