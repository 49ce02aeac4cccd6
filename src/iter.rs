// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::cell::{Ref, RefMut};
use std::rc::Rc;

use log::{debug, trace};

use crate::counter::Counter;
use crate::inner::StackInner;
use crate::types::{InnerPointer, WeakPointer};
use crate::{StackError, StringStack};

/// An iterator which can remove the element it last yielded from the
/// collection it's iterating over.
pub trait RemovingIterator: Iterator {
    /// Remove the element most recently returned by `next()`.
    fn remove(&mut self) -> Result<(), StackError>;
}

/// A fail fast iterator over a [`StringStack`][StringStack], top of the stack
/// first.
///
/// The iterator holds a weak handle to the stack rather than a borrow, so the
/// stack can still be modified while the iterator is alive. Each step checks
/// the stack's modification count against the one the iterator expects, and
/// fails with [`StackError::ConcurrentModification`][ConcurrentModification]
/// if anything other than this iterator changed the stack in the meantime.
///
/// [StringStack]: struct.StringStack.html
/// [ConcurrentModification]: enum.StackError.html#variant.ConcurrentModification
#[derive(Debug)]
pub struct Iter {
    stack: WeakPointer,
    cursor: usize,
    expected_count: usize,
    can_remove: bool,
}

impl Iter {
    pub(crate) fn new(stack: &StringStack) -> Self {
        let pointer = stack.pointer();
        let inner = pointer.borrow();
        Self {
            stack: Rc::downgrade(pointer),
            cursor: inner.len(),
            expected_count: inner.mod_count.count(),
            can_remove: false,
        }
    }

    fn upgrade(&self) -> Result<InnerPointer, StackError> {
        self.stack.upgrade().ok_or_else(|| {
            debug!("iterator outlived its stack");
            StackError::ConcurrentModification
        })
    }

    fn check(&self, inner: &StackInner) -> Result<(), StackError> {
        if inner.mod_count.is_stale(self.expected_count) {
            debug!(
                "stale iterator: expected modification count {}, found {}",
                self.expected_count,
                inner.mod_count.count()
            );
            Err(StackError::ConcurrentModification)
        } else {
            Ok(())
        }
    }

    /// Test whether there are elements left to visit.
    pub fn has_next(&self) -> bool {
        self.cursor > 0
    }

    /// Advance to the next element down the stack and return a copy of it.
    ///
    /// Fails with [`StackError::NoMoreElements`][NoMoreElements] once the
    /// bottom of the stack has been reached.
    ///
    /// [NoMoreElements]: enum.StackError.html#variant.NoMoreElements
    pub fn try_next(&mut self) -> Result<Option<String>, StackError> {
        if !self.has_next() {
            return Err(StackError::NoMoreElements);
        }
        let pointer = self.upgrade()?;
        let inner: Ref<'_, StackInner> = pointer
            .try_borrow()
            .map_err(|_| StackError::ConcurrentModification)?;
        self.check(&inner)?;
        self.cursor -= 1;
        self.can_remove = true;
        Ok(inner.get(self.cursor).map(str::to_owned))
    }

    /// Remove the element most recently returned by
    /// [`try_next()`][try_next] from the stack.
    ///
    /// Any present elements above it in the stack are moved down in the
    /// buffer to close the gap. The iterator can carry on afterwards, but
    /// any other iterators over the same stack are invalidated.
    ///
    /// [try_next]: #method.try_next
    pub fn remove(&mut self) -> Result<(), StackError> {
        if !self.can_remove {
            return Err(StackError::IllegalState);
        }
        let pointer = self.upgrade()?;
        let mut inner: RefMut<'_, StackInner> = pointer
            .try_borrow_mut()
            .map_err(|_| StackError::ConcurrentModification)?;
        self.check(&inner)?;
        let removed = inner.remove_at(self.cursor);
        trace!(
            "removed element {} ({} bytes) through iterator",
            self.cursor,
            removed.as_ref().map_or(0, String::len)
        );
        self.expected_count = inner.mod_count.count();
        self.can_remove = false;
        Ok(())
    }
}

impl Iterator for Iter {
    type Item = Result<Option<String>, StackError>;

    /// Yields `None` when the stack is exhausted. If the stack was modified
    /// behind the iterator's back, yields the error once and then stops.
    fn next(&mut self) -> Option<Self::Item> {
        if !self.has_next() {
            return None;
        }
        let result = self.try_next();
        if result.is_err() {
            self.cursor = 0;
            self.can_remove = false;
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.cursor))
    }
}

impl RemovingIterator for Iter {
    fn remove(&mut self) -> Result<(), StackError> {
        Iter::remove(self)
    }
}
