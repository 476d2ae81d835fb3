use core::iter::Sum;
use core::ops::AddAssign;

use rayon::iter::{IntoParallelIterator, ParallelExtend, ParallelIterator as _};

/// Accumulates a total instead of collecting, so that [`ParallelIterator::unzip`] can
/// produce pixels and statistics in one pass.
///
/// [`ParallelIterator::unzip`]: rayon::iter::ParallelIterator::unzip
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ParExtSum<T>(T);

impl<T> ParExtSum<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> ParallelExtend<T> for ParExtSum<T>
where
    T: Sum + AddAssign + Send,
{
    fn par_extend<I>(&mut self, par_iter: I)
    where
        I: IntoParallelIterator<Item = T>,
    {
        self.0 += par_iter.into_par_iter().sum::<T>();
    }
}
