// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Errors reported by [`StringStack`][StringStack] and its iterators.
///
/// Every error is a contract violation by the caller. The operation that
/// reports it has not changed the stack.
///
/// [StringStack]: struct.StringStack.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum StackError {
    /// `peek()` or `pop()` was called on a stack with no elements.
    #[error("the stack is empty")]
    Empty,
    /// An iterator was advanced past its last element.
    #[error("the iterator has no more elements")]
    NoMoreElements,
    /// The stack was structurally modified, or dropped, behind an
    /// iterator's back.
    #[error("the stack was modified outside of this iterator")]
    ConcurrentModification,
    /// `remove()` was called on an iterator without a preceding `next()`.
    #[error("remove() called without a preceding next()")]
    IllegalState,
    /// The iterator doesn't allow removal.
    #[error("operation not supported")]
    Unsupported,
}
