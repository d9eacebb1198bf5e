//! Test doubles for watching what a window iterator holds on to.

use std::{cell::Cell, rc::Rc};

/// Counts live [`Tracked`] values, the way a refcount would.
#[derive(Debug, Clone, Default)]
pub struct DropCounter {
    alive: Rc<Cell<usize>>,
}

impl DropCounter {
    pub fn track<T>(&self, value: T) -> Tracked<T> {
        self.alive.set(self.alive.get() + 1);
        Tracked {
            value,
            counter: self.clone(),
        }
    }

    pub fn alive(&self) -> usize {
        self.alive.get()
    }

    /// Wraps `inner` so that the returned iterator itself counts as alive.
    pub fn guard<I: Iterator>(&self, inner: I) -> Guarded<I> {
        Guarded {
            inner,
            _guard: self.track(()),
        }
    }
}

#[derive(Debug)]
pub struct Tracked<T> {
    pub value: T,
    counter: DropCounter,
}

impl<T> Drop for Tracked<T> {
    fn drop(&mut self) {
        let alive = &self.counter.alive;
        alive.set(alive.get() - 1);
    }
}

#[derive(Debug)]
pub struct Guarded<I> {
    inner: I,
    _guard: Tracked<()>,
}

impl<I: Iterator> Iterator for Guarded<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// A source that counts pulls and panics when pulled again after its end.
#[derive(Debug)]
pub struct StrictSource<I> {
    inner: I,
    pulls: Rc<Cell<usize>>,
    finished: bool,
}

impl<I: Iterator> StrictSource<I> {
    pub fn new(inner: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            inner: inner.into_iter(),
            pulls: Default::default(),
            finished: false,
        }
    }

    pub fn pulls(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.pulls)
    }
}

impl<I: Iterator> Iterator for StrictSource<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        assert!(!self.finished, "source pulled after it reported its end");
        self.pulls.set(self.pulls.get() + 1);
        let item = self.inner.next();
        self.finished = item.is_none();
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
