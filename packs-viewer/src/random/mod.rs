//! Injectable random selection
//!
//! The composer never touches a global RNG. It asks a [`RandomSource`] for an
//! index, which lets tests swap in [`SequenceRandom`] (or a mock) and get the
//! same page every time.

use crate::error::{ViewerError, ViewerResult};
use parking_lot::Mutex;
use rand::Rng;
use std::collections::VecDeque;

/// Source of uniformly distributed indices
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource: Send + Sync {
    /// Return an index in `0..len`
    ///
    /// Callers guarantee `len > 0`.
    fn index(&self, len: usize) -> usize;
}

/// Pick one element of a slice through a random source
///
/// # Errors
///
/// Returns [`ViewerError::Selection`] when `items` is empty; `what` names the
/// collection in the error message.
pub fn pick_one<'a, T>(
    source: &dyn RandomSource,
    items: &'a [T],
    what: &str,
) -> ViewerResult<&'a T> {
    if items.is_empty() {
        return Err(ViewerError::Selection(format!("no {what} to choose from")));
    }

    // clamp rather than trust the source
    let index = source.index(items.len()).min(items.len() - 1);
    Ok(&items[index])
}

/// Non-cryptographic thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Replays a fixed sequence of indices, then keeps returning `0`
///
/// Each value is reduced modulo the requested length.
#[derive(Debug, Default)]
pub struct SequenceRandom {
    queue: Mutex<VecDeque<usize>>,
}

impl SequenceRandom {
    /// Create a source that yields `indices` in order
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            queue: Mutex::new(indices.into_iter().collect()),
        }
    }

    /// Always pick the first element
    #[must_use]
    pub fn first() -> Self {
        Self::default()
    }
}

impl RandomSource for SequenceRandom {
    fn index(&self, len: usize) -> usize {
        self.queue.lock().pop_front().unwrap_or(0) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    #[test]
    fn test_pick_one_empty_is_selection_error() {
        let items: Vec<String> = Vec::new();
        let err = pick_one(&ThreadRandom, &items, "footer categories").unwrap_err();
        assert!(matches!(err, ViewerError::Selection(_)));
        assert_eq!(
            err.to_string(),
            "Nothing to select: no footer categories to choose from"
        );
    }

    #[test]
    fn test_pick_one_uses_source_index() {
        let mut source = MockRandomSource::new();
        source.expect_index().with(eq(3)).times(1).return_const(2_usize);

        let items = ["a", "b", "c"];
        assert_eq!(*pick_one(&source, &items, "letters").unwrap(), "c");
    }

    #[test]
    fn test_pick_one_clamps_out_of_range_index() {
        let mut source = MockRandomSource::new();
        source.expect_index().return_const(99_usize);

        let items = ["a", "b"];
        assert_eq!(*pick_one(&source, &items, "letters").unwrap(), "b");
    }

    #[test]
    fn test_thread_random_stays_in_range() {
        let source = ThreadRandom;
        for len in 1..50 {
            assert!(source.index(len) < len);
        }
    }

    #[test]
    fn test_sequence_random_replays_then_defaults() {
        let source = SequenceRandom::new([1, 5, 2]);
        assert_eq!(source.index(3), 1);
        assert_eq!(source.index(3), 2); // 5 % 3
        assert_eq!(source.index(10), 2);
        assert_eq!(source.index(10), 0);
    }
}
