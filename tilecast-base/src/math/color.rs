//! Color data types. This module is private but reexported by its parent.

use core::fmt;
use core::ops::Mul;

/// An 8-bit-per-channel sRGB color, as stored in textures and written to images.
///
/// All colors in this system are already in display space; blending is limited to
/// [`Rgb::scale()`], which is applied directly to the encoded values the same way
/// classic column renderers darken wall sides.
#[derive(Clone, Copy, Eq, Hash, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(transparent)]
pub struct Rgb([u8; 3]);

impl Rgb {
    /// Black, `#000000`.
    pub const BLACK: Rgb = Rgb::from_srgb8([0, 0, 0]);
    /// White, `#FFFFFF`.
    pub const WHITE: Rgb = Rgb::from_srgb8([255, 255, 255]);
    /// Blue, `#0000FF`.
    pub const BLUE: Rgb = Rgb::from_srgb8([0, 0, 255]);
    /// Green, `#008000` (the CSS named color, not full-intensity green).
    pub const GREEN: Rgb = Rgb::from_srgb8([0, 128, 0]);
    /// Red, `#FF0000`.
    pub const RED: Rgb = Rgb::from_srgb8([255, 0, 0]);
    /// Yellow, `#FFFF00`.
    pub const YELLOW: Rgb = Rgb::from_srgb8([255, 255, 0]);
    /// Magenta, `#FF00FF`.
    pub const MAGENTA: Rgb = Rgb::from_srgb8([255, 0, 255]);
    /// The CSS named color “cornflowerblue”, `#6495ED`.
    pub const CORNFLOWER_BLUE: Rgb = Rgb::from_srgb8([100, 149, 237]);
    /// The CSS named color “saddlebrown”, `#8B4513`.
    pub const SADDLE_BROWN: Rgb = Rgb::from_srgb8([139, 69, 19]);

    /// Constructs a color from 8-bit sRGB components.
    #[inline]
    pub const fn from_srgb8(rgb: [u8; 3]) -> Self {
        Self(rgb)
    }

    /// Returns the 8-bit sRGB components.
    #[inline]
    pub const fn to_srgb8(self) -> [u8; 3] {
        self.0
    }

    /// Returns the 8-bit sRGB components with an opaque alpha appended.
    #[inline]
    pub const fn to_srgba8(self) -> [u8; 4] {
        let [r, g, b] = self.0;
        [r, g, b, 255]
    }

    /// Multiplies each component by `factor`, rounding to nearest and clamping to the
    /// valid range. NaN factors produce black.
    #[inline]
    #[must_use]
    pub fn scale(self, factor: f32) -> Self {
        Self(self.0.map(|c| {
            let scaled = (f32::from(c) * factor).round();
            // `as` saturates, and maps NaN to 0.
            scaled as u8
        }))
    }
}

impl Mul<f32> for Rgb {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self::Output {
        self.scale(rhs)
    }
}

impl From<[u8; 3]> for Rgb {
    #[inline]
    fn from(value: [u8; 3]) -> Self {
        Self(value)
    }
}

impl From<Rgb> for [u8; 3] {
    #[inline]
    fn from(value: Rgb) -> Self {
        value.0
    }
}

impl fmt::Debug for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "Rgb(#{r:02X}{g:02X}{b:02X})")
    }
}
