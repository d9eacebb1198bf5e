use super::WindowState;
use crate::window::Window;

/// Pulls up to `n` fresh elements. A short final chunk is emitted as is.
pub(super) fn advance<T, E>(
    state: &mut WindowState<T>,
    pull: impl FnMut() -> Result<Option<T>, E>,
) -> Result<Option<Window<T>>, E> {
    state.fill(pull)?;
    if state.buffer.is_empty() {
        return Ok(None);
    }
    Ok(Some(state.take()))
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::{
        chunks,
        testing::{DropCounter, StrictSource},
        IteratorWindowExt, TryIteratorWindowExt,
    };

    fn collect_chunks(values: &[i32], n: usize) -> Vec<Vec<i32>> {
        chunks(values.to_vec(), n)
            .unwrap()
            .map(|window| window.to_vec())
            .collect_vec()
    }

    #[test]
    fn test_simple() {
        let lst = [1, 2, 3, 4, 5, 6, 7, 8];
        assert_eq!(
            collect_chunks(&lst, 1),
            vec![vec![1], vec![2], vec![3], vec![4], vec![5], vec![6], vec![7], vec![8]]
        );
        assert_eq!(
            collect_chunks(&lst, 2),
            vec![vec![1, 2], vec![3, 4], vec![5, 6], vec![7, 8]]
        );
        assert_eq!(
            collect_chunks(&lst, 3),
            vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8]]
        );
        assert_eq!(
            collect_chunks(&lst, 5),
            vec![vec![1, 2, 3, 4, 5], vec![6, 7, 8]]
        );
        assert_eq!(collect_chunks(&lst, 8), vec![lst.to_vec()]);
        assert_eq!(collect_chunks(&lst, 9), vec![lst.to_vec()]);
    }

    #[test]
    fn test_empty_source() {
        assert!(collect_chunks(&[], 1).is_empty());
        assert!(collect_chunks(&[], 4).is_empty());
    }

    #[test]
    fn test_stop_is_sticky() {
        let mut it = StrictSource::new(vec![1, 2, 3, 4, 5, 6]).chunked(3).unwrap();
        assert_eq!(it.next().unwrap(), [1, 2, 3]);
        assert_eq!(it.next().unwrap(), [4, 5, 6]);
        assert!(it.next().is_none());
        assert!(it.is_exhausted());
        // a second pull from the strict source would panic
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }

    #[test]
    fn test_partial_chunk_then_stop() {
        let mut it = StrictSource::new(vec![1, 2, 3]).chunked(2).unwrap();
        assert_eq!(it.next().unwrap(), [1, 2]);
        assert_eq!(it.next().unwrap(), [3]);
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }

    #[test]
    fn test_pulls_only_what_the_window_needs() {
        let source = StrictSource::new(1..=10);
        let pulls = source.pulls();
        let mut it = source.chunked(4).unwrap();
        assert_eq!(pulls.get(), 0);
        it.next();
        assert_eq!(pulls.get(), 4);
        it.next();
        assert_eq!(pulls.get(), 8);
    }

    #[test]
    fn test_item_refleak() {
        let counter = DropCounter::default();
        let items = (0..3).map(|_| counter.track(())).collect_vec();
        let mut it = items.into_iter().chunked(2).unwrap();
        assert_eq!(counter.alive(), 3);
        let item = it.next().unwrap();
        assert_eq!(it.buffered(), 0);
        drop(item);
        // the third one is still inside the source
        assert_eq!(counter.alive(), 1);
        let item = it.next().unwrap();
        assert_eq!(item.len(), 1);
        drop(item);
        assert_eq!(counter.alive(), 0);
        assert!(it.next().is_none());
        assert_eq!(counter.alive(), 0);
    }

    #[test]
    fn test_lazy_generator_source() {
        let counter = DropCounter::default();
        let mut it = (0..3).map(|i| counter.track(i)).chunked(2).unwrap();
        assert_eq!(counter.alive(), 0);
        let item = it.next().unwrap();
        assert_eq!(counter.alive(), 2);
        assert_eq!(item.iter().map(|tracked| tracked.value).collect_vec(), [0, 1]);
        drop(item);
        assert_eq!(counter.alive(), 0);
    }

    #[test]
    fn test_size_hint() {
        let it = chunks(vec![0; 8], 3).unwrap();
        assert_eq!(it.size_hint(), (3, Some(3)));
        assert_eq!(it.len(), 3);
        let mut it = chunks(vec![0; 6], 3).unwrap();
        assert_eq!(it.len(), 2);
        it.next();
        assert_eq!(it.len(), 1);
        it.next();
        assert_eq!(it.len(), 0);
        assert_eq!(chunks(Vec::<i32>::new(), 3).unwrap().len(), 0);
        assert_eq!(chunks((0..).filter(|x| x % 2 == 0), 3).unwrap().size_hint(), (0, None));
    }

    #[test]
    fn test_source_error_is_passed_through() {
        let source = vec![Ok(1), Ok(2), Err("boom"), Ok(3), Ok(4)];
        let mut it = source.into_iter().try_chunked(3).unwrap();
        assert_eq!(it.next(), Some(Err("boom")));
        assert_eq!(it.buffered(), 2);
        assert!(!it.is_exhausted());
        // nothing pulled before the error is lost
        assert_eq!(it.next().unwrap().unwrap(), [1, 2, 3]);
        assert_eq!(it.next().unwrap().unwrap(), [4]);
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }
}
