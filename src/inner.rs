// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::counter::Counter;

/// The packed storage behind a `StringStack`.
///
/// `buffer` holds the text of every present element in push order.
/// `offsets[i]` is the byte position in `buffer` where element `i` starts, or
/// `None` if element `i` is absent. An element ends where the next present
/// element starts, or at the end of the buffer.
pub(crate) struct StackInner {
    pub(crate) buffer: String,
    pub(crate) offsets: Vec<Option<usize>>,
    pub(crate) mod_count: usize,
}

impl StackInner {
    pub(crate) fn with_capacity(elements: usize, bytes: usize) -> Self {
        Self {
            buffer: String::with_capacity(bytes),
            offsets: Vec::with_capacity(elements),
            mod_count: Default::default(),
        }
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.offsets.len()
    }

    pub(crate) fn push(&mut self, value: Option<&str>) {
        let start = value.map(|text| {
            let start = self.buffer.len();
            self.buffer.push_str(text);
            start
        });
        self.offsets.push(start);
        self.mod_count.inc();
    }

    pub(crate) fn pop(&mut self) -> Option<Option<String>> {
        let start = self.offsets.pop()?;
        self.mod_count.inc();
        Some(start.map(|start| self.buffer.split_off(start)))
    }

    pub(crate) fn top(&self) -> Option<Option<&str>> {
        let start = *self.offsets.last()?;
        Some(start.map(|start| &self.buffer[start..]))
    }

    pub(crate) fn clear(&mut self) {
        self.buffer.clear();
        self.offsets.clear();
        self.mod_count.inc();
    }

    /// Where element `index` ends: the start of the next present element
    /// above it, or the end of the buffer.
    pub(crate) fn end_of(&self, index: usize) -> usize {
        self.offsets[index + 1..]
            .iter()
            .find_map(|start| *start)
            .unwrap_or_else(|| self.buffer.len())
    }

    pub(crate) fn get(&self, index: usize) -> Option<&str> {
        self.offsets[index].map(|start| &self.buffer[start..self.end_of(index)])
    }

    /// Walk the elements top to bottom, paired with their table index.
    ///
    /// This tracks the end of each element as it goes, so a full walk is
    /// linear even with long runs of absent elements.
    pub(crate) fn elements(&self) -> impl Iterator<Item = (usize, Option<&str>)> + '_ {
        let buffer = self.buffer.as_str();
        let mut end = buffer.len();
        self.offsets
            .iter()
            .enumerate()
            .rev()
            .map(move |(index, start)| match *start {
                Some(start) => {
                    let text = &buffer[start..end];
                    end = start;
                    (index, Some(text))
                }
                None => (index, None),
            })
    }

    /// Remove element `index` from anywhere in the stack.
    ///
    /// Every present element above it has its start shifted down by the
    /// length of the removed text.
    pub(crate) fn remove_at(&mut self, index: usize) -> Option<String> {
        let end = self.end_of(index);
        let start = self.offsets.remove(index);
        self.mod_count.inc();
        let start = start?;
        let removed_len = end - start;
        if removed_len > 0 {
            for offset in self.offsets[index..].iter_mut().flatten() {
                *offset -= removed_len;
            }
        }
        Some(self.buffer.drain(start..end).collect())
    }

    pub(crate) fn reserve(&mut self, elements: usize, bytes: usize) {
        self.offsets.reserve(elements);
        self.buffer.reserve(bytes);
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.offsets.shrink_to_fit();
        self.buffer.shrink_to_fit();
    }

    /// Check that present elements tile the buffer exactly.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let mut expected_start = 0;
        for start in self.offsets.iter().flatten() {
            assert!(*start >= expected_start, "offsets out of order");
            expected_start = *start;
        }
        if let Some(first) = self.offsets.iter().flatten().next() {
            assert_eq!(0, *first, "gap before the first element");
        } else {
            assert!(self.buffer.is_empty(), "buffer text with no present elements");
        }
        let total: usize = self
            .elements()
            .filter_map(|(_, text)| text)
            .map(str::len)
            .sum();
        assert_eq!(self.buffer.len(), total);
    }
}

impl Clone for StackInner {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
            offsets: self.offsets.clone(),
            mod_count: Default::default(),
        }
    }
}

impl PartialEq for StackInner {
    fn eq(&self, other: &Self) -> bool {
        self.buffer == other.buffer && self.offsets == other.offsets
    }
}

impl Eq for StackInner {}
