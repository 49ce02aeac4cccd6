// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// A version stamp bumped on every structural change to a stack.
///
/// Iterators capture the stamp when they're created and compare it on every
/// step, so the only property that matters is that two stamps taken either
/// side of a modification are never equal.
pub(crate) trait Counter: Default {
    fn inc(&mut self);
    fn count(&self) -> usize;
    fn is_stale(&self, expected: usize) -> bool {
        self.count() != expected
    }
}

impl Counter for usize {
    #[inline(always)]
    fn inc(&mut self) {
        *self = self.wrapping_add(1);
    }

    #[inline(always)]
    fn count(&self) -> usize {
        *self
    }
}
