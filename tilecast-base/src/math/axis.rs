use core::ops;

/// Enumeration of the axes of three-dimensional space.
///
/// X and Y are the horizontal axes along which grids are subdivided; Z is height,
/// which is the same in every grid's frame.
///
/// Points and vectors may be indexed by axis.
#[allow(clippy::exhaustive_enums)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, exhaust::Exhaust)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    /// All three axes in the standard order, [X, Y, Z].
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Position of this axis in [`Axis::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

macro_rules! index_by_axis {
    ($type:ident) => {
        impl<T, U> ops::Index<Axis> for euclid::$type<T, U> {
            type Output = T;

            #[inline]
            fn index(&self, axis: Axis) -> &T {
                match axis {
                    Axis::X => &self.x,
                    Axis::Y => &self.y,
                    Axis::Z => &self.z,
                }
            }
        }

        impl<T, U> ops::IndexMut<Axis> for euclid::$type<T, U> {
            #[inline]
            fn index_mut(&mut self, axis: Axis) -> &mut T {
                match axis {
                    Axis::X => &mut self.x,
                    Axis::Y => &mut self.y,
                    Axis::Z => &mut self.z,
                }
            }
        }
    };
}
index_by_axis!(Vector3D);
index_by_axis!(Point3D);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{FreePoint, FreeVector};
    use exhaust::Exhaust as _;

    #[test]
    fn all_in_order() {
        assert_eq!(Axis::exhaust().collect::<Vec<_>>(), Axis::ALL.to_vec());
        for axis in Axis::ALL {
            assert_eq!(Axis::ALL[axis.index()], axis);
        }
    }

    #[test]
    fn index_euclid() {
        let mut p = FreePoint::new(1.0, 2.0, 3.0);
        p[Axis::Y] = 5.0;
        assert_eq!(p, FreePoint::new(1.0, 5.0, 3.0));
        let v = FreeVector::new(4.0, 5.0, 6.0);
        assert_eq!(Axis::ALL.map(|axis| v[axis]), [4.0, 5.0, 6.0]);
    }
}
