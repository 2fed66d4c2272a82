//! Row-parallel pixel loops using Rayon.
//!
//! Work is split by image row. Per-pixel maps write disjoint rows, and
//! reductions fold each row locally before merging, so results match the
//! serial loops exactly.

use inverter_core::{Image, PixelFormat, CHANNELS};
use rayon::prelude::*;

/// Applies `f` to every `[R, G, B, A]` chunk of `image` in place.
pub fn for_each_pixel<T, F>(image: &mut Image<T>, f: &F)
where
    T: PixelFormat,
    F: Fn(&mut [T]) + Send + Sync,
{
    image
        .par_rows_mut()
        .for_each(|row| row.chunks_exact_mut(CHANNELS).for_each(f));
}

/// Folds each row with `fold` and merges the row results with `merge`.
pub fn fold_pixels<T, A, F, M>(image: &Image<T>, init: A, fold: &F, merge: &M) -> A
where
    T: PixelFormat,
    A: Copy + Send + Sync,
    F: Fn(A, &[T]) -> A + Send + Sync,
    M: Fn(A, A) -> A + Send + Sync,
{
    image
        .par_rows()
        .map(|row| row.chunks_exact(CHANNELS).fold(init, fold))
        .reduce(|| init, merge)
}
