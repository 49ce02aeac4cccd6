// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::iter::RemovingIterator;
use crate::StackError;

/// An iterator wrapper which refuses to remove elements.
///
/// It passes iteration through to the wrapped iterator unchanged, but its
/// [`RemovingIterator::remove()`][remove] always fails with
/// [`StackError::Unsupported`][Unsupported]. Use it to hand out iteration over
/// a collection you don't want modified.
///
/// # Examples
///
/// ```rust
/// # use string_stack::{RemovingIterator, StackError, Unmodifiable};
/// let mut iter = Unmodifiable::new(0..3);
/// assert_eq!(Some(0), iter.next());
/// assert_eq!(Err(StackError::Unsupported), iter.remove());
/// assert_eq!(vec![1, 2], iter.collect::<Vec<_>>());
/// ```
///
/// [remove]: trait.RemovingIterator.html#tymethod.remove
/// [Unsupported]: enum.StackError.html#variant.Unsupported
#[derive(Debug, Clone)]
pub struct Unmodifiable<I> {
    iter: I,
}

impl<I> Unmodifiable<I>
where
    I: Iterator,
{
    /// Wrap an iterator.
    pub fn new(iter: I) -> Self {
        Self { iter }
    }

    /// Unwrap the iterator.
    pub fn into_inner(self) -> I {
        self.iter
    }
}

impl<I> Iterator for Unmodifiable<I>
where
    I: Iterator,
{
    type Item = I::Item;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<I> RemovingIterator for Unmodifiable<I>
where
    I: Iterator,
{
    fn remove(&mut self) -> Result<(), StackError> {
        Err(StackError::Unsupported)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::StringStack;

    #[test]
    fn iterates_like_the_wrapped_iterator() {
        let numbers: Vec<usize> = (0..=10).collect();
        let wrapped: Vec<usize> = Unmodifiable::new(numbers.iter().copied()).collect();
        assert_eq!(numbers, wrapped);
    }

    #[test]
    fn refuses_to_remove_from_a_stack() {
        let stack: StringStack = vec![Some("a"), Some("b")].into_iter().collect();
        let mut iter = stack.iter_unmodifiable();
        assert_eq!(Some(Ok(Some("b".to_string()))), iter.next());
        assert_eq!(Err(StackError::Unsupported), iter.remove());
        assert_eq!(2, stack.len());
        assert_eq!("ab", &*stack.render());
    }

    #[test]
    fn still_fails_fast() {
        let mut stack: StringStack = vec![Some("a")].into_iter().collect();
        let mut iter = stack.iter_unmodifiable();
        stack.push(Some("b"));
        assert_eq!(
            Some(Err(StackError::ConcurrentModification)),
            iter.next()
        );
    }

    #[test]
    fn into_inner_gives_back_a_removing_iterator() {
        let stack: StringStack = vec![Some("a"), Some("b")].into_iter().collect();
        let mut iter = stack.iter_unmodifiable().into_inner();
        iter.try_next().unwrap();
        assert_eq!(Ok(()), iter.remove());
        assert_eq!("a", &*stack.render());
    }
}
