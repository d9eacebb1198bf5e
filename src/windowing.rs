use std::{
    collections::VecDeque, convert::Infallible, fmt, iter::FusedIterator, rc::Rc, str::FromStr,
};

use tracing::{debug, trace};

use crate::{
    error::{WindowError, WindowResult},
    size::WindowSize,
    window::Window,
};

mod chunks;
mod slices;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Disjoint windows, the last one may be short.
    Chunking,
    /// Every full window at every offset.
    Sliding,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Self::Chunking => "chunks",
            Self::Sliding => "slices",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = WindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chunks" => Ok(Self::Chunking),
            "slices" => Ok(Self::Sliding),
            other => Err(WindowError::Argument(format!(
                "unknown mode {other:?}, expected \"chunks\" or \"slices\""
            ))),
        }
    }
}

/// Everything a window iterator tracks apart from its source.
///
/// The source is pulled through a closure so the same state machine serves
/// both plain iterators and iterators of `Result`.
struct WindowState<T> {
    mode: Mode,
    size: WindowSize,
    buffer: VecDeque<Rc<T>>,
    exhausted: bool,
}

impl<T> WindowState<T> {
    fn new(mode: Mode, size: WindowSize) -> Self {
        debug!(%mode, %size, "window iterator bound to a source");
        Self {
            mode,
            size,
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }

    fn advance<E>(
        &mut self,
        pull: impl FnMut() -> Result<Option<T>, E>,
    ) -> Result<Option<Window<T>>, E> {
        if self.exhausted {
            return Ok(None);
        }
        let window = match self.mode {
            Mode::Chunking => chunks::advance(self, pull)?,
            Mode::Sliding => slices::advance(self, pull)?,
        };
        match &window {
            Some(window) => trace!(mode = %self.mode, len = window.len(), "window emitted"),
            None => trace!(mode = %self.mode, "source exhausted"),
        }
        Ok(window)
    }

    /// Pulls until the buffer holds a full window. Returns `false` when the
    /// source ran out first, which also marks the state exhausted.
    fn fill<E>(&mut self, mut pull: impl FnMut() -> Result<Option<T>, E>) -> Result<bool, E> {
        while self.buffer.len() < self.size.get() {
            match pull()? {
                Some(item) => self.buffer.push_back(Rc::new(item)),
                None => {
                    self.exhausted = true;
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    /// Moves the buffered elements out into a window.
    fn take(&mut self) -> Window<T> {
        Window::from_shared(self.buffer.drain(..).collect())
    }

    /// A window sharing the buffered elements.
    fn snapshot(&self) -> Window<T> {
        Window::from_shared(self.buffer.iter().cloned().collect())
    }

    fn size_hint(&self, (lower, upper): (usize, Option<usize>)) -> (usize, Option<usize>) {
        if self.exhausted {
            return (0, Some(0));
        }
        let n = self.size.get();
        let buffered = self.buffer.len();
        let windows = |count: usize| match self.mode {
            Mode::Chunking => count.div_ceil(n),
            Mode::Sliding => count.saturating_sub(n - 1),
        };
        match self.mode {
            // a full sliding buffer has already been emitted, every further
            // element produces exactly one window
            Mode::Sliding if buffered == n => (lower, upper),
            _ => (
                windows(lower.saturating_add(buffered)),
                upper.and_then(|upper| upper.checked_add(buffered)).map(windows),
            ),
        }
    }
}

/// Lazy windows over an owned source iterator.
///
/// Built by [`crate::chunks`], [`crate::slices`] or the [`IteratorWindowExt`]
/// methods. The source is only pulled from inside [`Iterator::next`], and
/// never again once it has reported its end.
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
pub struct WindowIterator<I: Iterator> {
    source: I,
    state: WindowState<I::Item>,
}

impl<I: Iterator> WindowIterator<I> {
    pub fn new(source: I, mode: Mode, size: WindowSize) -> Self {
        Self {
            source,
            state: WindowState::new(mode, size),
        }
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn size(&self) -> WindowSize {
        self.state.size
    }

    pub fn is_exhausted(&self) -> bool {
        self.state.exhausted
    }

    /// Number of source elements currently retained by the iterator.
    pub fn buffered(&self) -> usize {
        self.state.buffer.len()
    }
}

impl<I: Iterator> Iterator for WindowIterator<I> {
    type Item = Window<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let source = &mut self.source;
        match self.state.advance(|| Ok::<_, Infallible>(source.next())) {
            Ok(window) => window,
            Err(never) => match never {},
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.state.size_hint(self.source.size_hint())
    }
}

impl<I: Iterator> FusedIterator for WindowIterator<I> {}

impl<I: ExactSizeIterator> ExactSizeIterator for WindowIterator<I> {}

impl<I: Iterator + fmt::Debug> fmt::Debug for WindowIterator<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?}, {})", self.state.mode, self.source, self.state.size)
    }
}

/// Like [`WindowIterator`], for sources that yield `Result`s.
///
/// A source error is handed to the caller as is. Elements pulled before the
/// error stay buffered, so advancing again resumes without losing any.
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
pub struct TryWindowIterator<I, T> {
    source: I,
    state: WindowState<T>,
}

impl<I, T, E> TryWindowIterator<I, T>
where
    I: Iterator<Item = Result<T, E>>,
{
    pub fn new(source: I, mode: Mode, size: WindowSize) -> Self {
        Self {
            source,
            state: WindowState::new(mode, size),
        }
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn size(&self) -> WindowSize {
        self.state.size
    }

    pub fn is_exhausted(&self) -> bool {
        self.state.exhausted
    }

    pub fn buffered(&self) -> usize {
        self.state.buffer.len()
    }
}

impl<I, T, E> Iterator for TryWindowIterator<I, T>
where
    I: Iterator<Item = Result<T, E>>,
{
    type Item = Result<Window<T>, E>;

    fn next(&mut self) -> Option<Self::Item> {
        let source = &mut self.source;
        self.state.advance(|| source.next().transpose()).transpose()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.state.exhausted {
            return (0, Some(0));
        }
        // any pulled item may be an error, which is passed through on its own
        let (_, upper) = self.source.size_hint();
        let (_, windows) = self.state.size_hint((0, upper));
        (
            0,
            windows
                .zip(upper)
                .and_then(|(windows, errors)| windows.checked_add(errors)),
        )
    }
}

impl<I, T, E> FusedIterator for TryWindowIterator<I, T> where I: Iterator<Item = Result<T, E>> {}

impl<I: fmt::Debug, T> fmt::Debug for TryWindowIterator<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?}, {})", self.state.mode, self.source, self.state.size)
    }
}

fn window_size<N>(n: N) -> WindowResult<WindowSize>
where
    N: TryInto<WindowSize>,
    WindowError: From<<N as TryInto<WindowSize>>::Error>,
{
    Ok(n.try_into()?)
}

#[extension_traits::extension(pub trait IteratorWindowExt)]
impl<I: Iterator> I {
    /// Disjoint windows of `n` elements; the last one holds the remainder.
    fn chunked<N>(self, n: N) -> WindowResult<WindowIterator<I>>
    where
        N: TryInto<WindowSize>,
        WindowError: From<<N as TryInto<WindowSize>>::Error>,
    {
        Ok(WindowIterator::new(self, Mode::Chunking, window_size(n)?))
    }

    /// Every window of `n` consecutive elements.
    fn sliding<N>(self, n: N) -> WindowResult<WindowIterator<I>>
    where
        N: TryInto<WindowSize>,
        WindowError: From<<N as TryInto<WindowSize>>::Error>,
    {
        Ok(WindowIterator::new(self, Mode::Sliding, window_size(n)?))
    }
}

#[extension_traits::extension(pub trait TryIteratorWindowExt)]
impl<T, E, I: Iterator<Item = Result<T, E>>> I {
    fn try_chunked<N>(self, n: N) -> WindowResult<TryWindowIterator<I, T>>
    where
        N: TryInto<WindowSize>,
        WindowError: From<<N as TryInto<WindowSize>>::Error>,
    {
        Ok(TryWindowIterator::new(self, Mode::Chunking, window_size(n)?))
    }

    fn try_sliding<N>(self, n: N) -> WindowResult<TryWindowIterator<I, T>>
    where
        N: TryInto<WindowSize>,
        WindowError: From<<N as TryInto<WindowSize>>::Error>,
    {
        Ok(TryWindowIterator::new(self, Mode::Sliding, window_size(n)?))
    }
}
