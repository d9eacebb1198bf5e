//! Lazy `chunks` and `slices` over any iterator.
//!
//! ```
//! use chunks_slices::{chunks, slices};
//!
//! let windows = chunks(1..=8, 3)?.map(|w| w.to_vec()).collect::<Vec<_>>();
//! assert_eq!(windows, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8]]);
//!
//! let windows = slices([1, 2, 3, 4], 2)?.map(|w| w.to_vec()).collect::<Vec<_>>();
//! assert_eq!(windows, vec![vec![1, 2], vec![2, 3], vec![3, 4]]);
//! # Ok::<(), chunks_slices::WindowError>(())
//! ```

pub mod commands;
pub mod dynamic;
pub mod error;
pub mod size;
pub mod stream;
pub mod window;
pub mod windowing;

#[cfg(test)]
mod testing;

pub use dynamic::{make, ValueIter};
pub use error::{WindowError, WindowResult};
pub use size::WindowSize;
pub use window::Window;
pub use windowing::{
    IteratorWindowExt, Mode, TryIteratorWindowExt, TryWindowIterator, WindowIterator,
};

/// Splits `source` into consecutive windows of `n` elements. The last window
/// holds whatever is left and may be shorter.
///
/// Fails with [`WindowError::ValueConstraint`] when `n` is not positive.
pub fn chunks<S, N>(source: S, n: N) -> WindowResult<WindowIterator<S::IntoIter>>
where
    S: IntoIterator,
    N: TryInto<WindowSize>,
    WindowError: From<<N as TryInto<WindowSize>>::Error>,
{
    source.into_iter().chunked(n)
}

/// Every window of `n` consecutive elements of `source`. Sources shorter than
/// `n` produce no windows at all.
pub fn slices<S, N>(source: S, n: N) -> WindowResult<WindowIterator<S::IntoIter>>
where
    S: IntoIterator,
    N: TryInto<WindowSize>,
    WindowError: From<<N as TryInto<WindowSize>>::Error>,
{
    source.into_iter().sliding(n)
}
