// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::cell::{Ref, RefCell};
use std::fmt::{Debug, Display, Error, Formatter};
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::rc::Rc;

use log::trace;

use crate::inner::StackInner;
use crate::iter::Iter;
use crate::types::InnerPointer;
use crate::unmodifiable::Unmodifiable;
use crate::StackError;

/// A LIFO stack of optional strings, packed into a single buffer.
///
/// Elements are `Option<&str>` going in and `Option<String>` coming out:
/// `None` is an absent element, which is distinct from the empty string.
///
/// # Examples
///
/// ```rust
/// # use string_stack::StringStack;
/// let mut stack = StringStack::new();
/// stack.push(Some("usr"));
/// stack.push(Some("/"));
/// stack.push(None);
/// stack.push(Some("lib"));
/// assert_eq!("usr/lib", &*stack.render());
///
/// assert_eq!(Ok(Some("lib".to_string())), stack.pop());
/// assert_eq!(Ok(None), stack.pop());
/// assert_eq!("usr/", stack.to_string());
/// ```
pub struct StringStack {
    inner: InnerPointer,
}

impl StringStack {
    /// Construct an empty stack.
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Construct an empty stack with room for `elements` entries holding a
    /// total of `bytes` bytes of text before it needs to reallocate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use string_stack::StringStack;
    /// let mut stack = StringStack::with_capacity(16, 256);
    /// stack.push(Some("home"));
    /// assert_eq!(1, stack.len());
    /// ```
    pub fn with_capacity(elements: usize, bytes: usize) -> Self {
        Self {
            inner: Rc::new(RefCell::new(StackInner::with_capacity(elements, bytes))),
        }
    }

    pub(crate) fn pointer(&self) -> &InnerPointer {
        &self.inner
    }

    fn state(&self) -> Ref<'_, StackInner> {
        self.inner.borrow()
    }

    /// Push an element on top of the stack, returning it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use string_stack::StringStack;
    /// let mut stack = StringStack::new();
    /// assert_eq!(Some("a"), stack.push(Some("a")));
    /// assert_eq!(None, stack.push(None));
    /// assert_eq!(2, stack.len());
    /// ```
    pub fn push<'a>(&mut self, value: Option<&'a str>) -> Option<&'a str> {
        self.inner.borrow_mut().push(value);
        value
    }

    /// Push an element, `Collection` style. This always succeeds.
    pub fn add(&mut self, value: Option<&str>) -> bool {
        self.push(value);
        true
    }

    /// Remove and return the element on top of the stack.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use string_stack::{StackError, StringStack};
    /// let mut stack = StringStack::new();
    /// stack.push(Some("a"));
    /// assert_eq!(Ok(Some("a".to_string())), stack.pop());
    /// assert_eq!(Err(StackError::Empty), stack.pop());
    /// ```
    pub fn pop(&mut self) -> Result<Option<String>, StackError> {
        self.inner.borrow_mut().pop().ok_or(StackError::Empty)
    }

    /// Return a copy of the element on top of the stack without removing it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use string_stack::{StackError, StringStack};
    /// let mut stack = StringStack::new();
    /// assert_eq!(Err(StackError::Empty), stack.peek());
    /// stack.push(Some(""));
    /// assert_eq!(Ok(Some(String::new())), stack.peek());
    /// assert_eq!(1, stack.len());
    /// ```
    pub fn peek(&self) -> Result<Option<String>, StackError> {
        self.state()
            .top()
            .map(|top| top.map(str::to_owned))
            .ok_or(StackError::Empty)
    }

    /// Get the number of elements on the stack, absent ones included.
    pub fn len(&self) -> usize {
        self.state().len()
    }

    /// Test whether the stack has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        trace!("clearing stack of {} elements", self.len());
        self.inner.borrow_mut().clear();
    }

    /// Reserve room for at least `elements` more entries and `bytes` more
    /// bytes of text.
    pub fn reserve(&mut self, elements: usize, bytes: usize) {
        self.inner.borrow_mut().reserve(elements, bytes);
    }

    /// Release any capacity beyond what the current elements need.
    pub fn shrink_to_fit(&mut self) {
        self.inner.borrow_mut().shrink_to_fit();
    }

    /// Get the text of every present element, bottom to top, with nothing in
    /// between.
    ///
    /// This is a view of the stack's own buffer, so it costs nothing to
    /// produce. Use `to_string()` if you need to keep it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use string_stack::StringStack;
    /// let stack: StringStack = vec![Some("a"), Some("b"), None, Some(""), Some("c")]
    ///     .into_iter()
    ///     .collect();
    /// assert_eq!("abc", &*stack.render());
    /// ```
    pub fn render(&self) -> Ref<'_, str> {
        Ref::map(self.state(), |inner| inner.buffer.as_str())
    }

    /// Test whether an element equal to `value` is on the stack.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use string_stack::StringStack;
    /// let mut stack = StringStack::new();
    /// stack.push(Some("ab"));
    /// stack.push(None);
    /// assert!(stack.contains(Some("ab")));
    /// assert!(stack.contains(None));
    /// assert!(!stack.contains(Some("a")));
    /// assert!(!stack.contains(Some("")));
    /// ```
    pub fn contains(&self, value: Option<&str>) -> bool {
        self.state().elements().any(|(_, element)| element == value)
    }

    /// Test whether every one of `values` is on the stack.
    pub fn contains_all<I, S>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        values
            .into_iter()
            .all(|value| self.contains(value.as_ref().map(AsRef::as_ref)))
    }

    /// Push every one of `values` in order, so that the last one ends up on
    /// top. Returns `true` if anything was pushed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use string_stack::StringStack;
    /// let mut stack = StringStack::new();
    /// assert!(stack.add_all(vec![Some("a"), Some("b"), Some("c")]));
    /// assert_eq!(Ok(Some("c".to_string())), stack.pop());
    /// ```
    pub fn add_all<I, S>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let mut changed = false;
        for value in values {
            changed |= self.add(value.as_ref().map(AsRef::as_ref));
        }
        changed
    }

    /// Remove the topmost element equal to `value`. Returns `true` if one was
    /// found.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use string_stack::StringStack;
    /// let mut stack: StringStack = vec![Some("a"), Some("b"), Some("a")].into_iter().collect();
    /// assert!(stack.remove(Some("a")));
    /// assert_eq!("ab", &*stack.render());
    /// assert!(!stack.remove(None));
    /// ```
    pub fn remove(&mut self, value: Option<&str>) -> bool {
        let mut inner = self.inner.borrow_mut();
        let found = inner
            .elements()
            .find(|(_, element)| *element == value)
            .map(|(index, _)| index);
        match found {
            Some(index) => {
                inner.remove_at(index);
                true
            }
            None => false,
        }
    }

    /// Keep only the elements for which `keep` returns `true`, visiting them
    /// top to bottom. Returns `true` if anything was removed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use string_stack::StringStack;
    /// let mut stack: StringStack = vec![Some("a"), None, Some("bc"), Some("")]
    ///     .into_iter()
    ///     .collect();
    /// assert!(stack.retain(|element| element.map_or(false, |text| !text.is_empty())));
    /// assert_eq!(2, stack.len());
    /// assert_eq!("abc", &*stack.render());
    /// ```
    pub fn retain<F>(&mut self, mut keep: F) -> bool
    where
        F: FnMut(Option<&str>) -> bool,
    {
        let mut inner = self.inner.borrow_mut();
        let mut changed = false;
        for index in (0..inner.len()).rev() {
            if !keep(inner.get(index)) {
                inner.remove_at(index);
                changed = true;
            }
        }
        changed
    }

    /// Remove every element equal to any of `values`. Returns `true` if
    /// anything was removed.
    pub fn remove_all<I, S>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let values: Vec<Option<S>> = values.into_iter().collect();
        self.retain(|element| {
            !values
                .iter()
                .any(|value| value.as_ref().map(AsRef::as_ref) == element)
        })
    }

    /// Remove every element not equal to one of `values`. Returns `true` if
    /// anything was removed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use string_stack::StringStack;
    /// let mut stack: StringStack = vec![Some("a"), None, Some("b")].into_iter().collect();
    /// assert!(stack.retain_all(vec![Some("b"), None]));
    /// assert_eq!(vec![Some("b".to_string()), None], stack.to_vec());
    /// ```
    pub fn retain_all<I, S>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let values: Vec<Option<S>> = values.into_iter().collect();
        self.retain(|element| {
            values
                .iter()
                .any(|value| value.as_ref().map(AsRef::as_ref) == element)
        })
    }

    /// Copy every element out into a `Vec`, top of the stack first.
    pub fn to_vec(&self) -> Vec<Option<String>> {
        self.state()
            .elements()
            .map(|(_, element)| element.map(str::to_owned))
            .collect()
    }

    /// Get an iterator over the elements, top of the stack first.
    ///
    /// The iterator doesn't borrow the stack. If the stack is modified by
    /// anything other than the iterator itself, the iterator's next step
    /// fails with [`StackError::ConcurrentModification`][ConcurrentModification].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use string_stack::{StackError, StringStack};
    /// let mut stack: StringStack = vec![Some("a"), Some("b"), Some("c")].into_iter().collect();
    /// let mut iter = stack.iter();
    /// assert_eq!(Ok(Some("c".to_string())), iter.try_next());
    /// assert_eq!(Ok(Some("b".to_string())), iter.try_next());
    /// iter.remove()?;
    /// assert_eq!("ac", &*stack.render());
    ///
    /// stack.push(Some("d"));
    /// assert_eq!(Err(StackError::ConcurrentModification), iter.try_next());
    /// # Ok::<(), StackError>(())
    /// ```
    ///
    /// [ConcurrentModification]: enum.StackError.html#variant.ConcurrentModification
    pub fn iter(&self) -> Iter {
        Iter::new(self)
    }

    /// Get an iterator over the elements which refuses to remove them.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use string_stack::{RemovingIterator, StackError, StringStack};
    /// let stack: StringStack = vec![Some("a")].into_iter().collect();
    /// let mut iter = stack.iter_unmodifiable();
    /// assert_eq!(Some(Ok(Some("a".to_string()))), iter.next());
    /// assert_eq!(Err(StackError::Unsupported), iter.remove());
    /// ```
    pub fn iter_unmodifiable(&self) -> Unmodifiable<Iter> {
        Unmodifiable::new(self.iter())
    }
}

impl Default for StringStack {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for StringStack {
    /// Make a deep copy of the stack.
    ///
    /// The copy shares nothing with the original, and iterators over one
    /// aren't affected by changes to the other.
    fn clone(&self) -> Self {
        Self {
            inner: Rc::new(RefCell::new(self.state().clone())),
        }
    }
}

impl PartialEq for StringStack {
    /// Two stacks are equal if their rendered text and their element
    /// boundaries are the same, absent elements included.
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner) || *self.state() == *other.state()
    }
}

impl Eq for StringStack {}

impl Hash for StringStack {
    fn hash<H: Hasher>(&self, hasher: &mut H) {
        let inner = self.state();
        inner.buffer.hash(hasher);
        inner.offsets.hash(hasher);
    }
}

impl Display for StringStack {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        f.write_str(&self.render())
    }
}

impl Debug for StringStack {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let inner = self.state();
        f.debug_struct("StringStack")
            .field("buffer", &inner.buffer)
            .field("offsets", &inner.offsets)
            .finish()
    }
}

impl<S> FromIterator<Option<S>> for StringStack
where
    S: AsRef<str>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
    {
        let mut stack = Self::new();
        stack.add_all(iter);
        stack
    }
}

impl<S> Extend<Option<S>> for StringStack
where
    S: AsRef<str>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = Option<S>>,
    {
        self.add_all(iter);
    }
}

impl<'a> IntoIterator for &'a StringStack {
    type Item = Result<Option<String>, StackError>;
    type IntoIter = Iter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(stack: &StringStack) -> u64 {
        let mut hasher = DefaultHasher::new();
        stack.hash(&mut hasher);
        hasher.finish()
    }

    fn sample() -> StringStack {
        vec![Some("a"), Some("b"), None, Some(""), Some("c")]
            .into_iter()
            .collect()
    }

    #[test]
    fn peek_and_pop_in_lifo_order() {
        let mut stack = sample();
        let expected = [Some("c"), Some(""), None, Some("b"), Some("a")];
        for value in expected.iter() {
            let value = value.map(str::to_owned);
            assert_eq!(Ok(value.clone()), stack.peek());
            assert_eq!(Ok(value), stack.pop());
        }
        assert!(stack.is_empty());
        assert_eq!(Err(StackError::Empty), stack.peek());
        assert_eq!(Err(StackError::Empty), stack.pop());
    }

    #[test]
    fn render_skips_absent_and_empty() {
        let stack = sample();
        assert_eq!("abc", &*stack.render());
        assert_eq!("abc", stack.to_string());
        stack.state().check_invariants();
    }

    #[test]
    fn peek_changes_nothing() {
        let stack = sample();
        let before = stack.state().mod_count;
        assert_eq!(Ok(Some("c".to_string())), stack.peek());
        assert_eq!(5, stack.len());
        assert_eq!("abc", &*stack.render());
        assert_eq!(before, stack.state().mod_count);
    }

    #[test]
    fn push_then_pop_round_trips() {
        let mut stack = sample();
        let before = stack.clone();
        stack.push(Some("xyz"));
        assert_ne!(before, stack);
        assert_eq!(Ok(Some("xyz".to_string())), stack.pop());
        assert_eq!(before, stack);
        assert_eq!(hash_of(&before), hash_of(&stack));
    }

    #[test]
    fn clone_is_independent() {
        let mut original: StringStack = vec![Some("a"), Some("b"), Some("c"), Some("d")]
            .into_iter()
            .collect();
        let mut copy = original.clone();
        assert_eq!(original, copy);
        assert_eq!(original.to_vec(), copy.to_vec());

        copy.push(Some("e"));
        assert_eq!(Ok(Some("d".to_string())), original.pop());
        assert_eq!("abc", &*original.render());
        assert_eq!("abcde", &*copy.render());
    }

    #[test]
    fn clone_does_not_disturb_iterators() {
        let stack = sample();
        let mut iter = stack.iter();
        let mut copy = stack.clone();
        copy.clear();
        assert_eq!(Ok(Some("c".to_string())), iter.try_next());
    }

    #[test]
    fn equality_is_structural() {
        let ab: StringStack = vec![Some("a"), Some("b")].into_iter().collect();
        let joined: StringStack = vec![Some("ab")].into_iter().collect();
        let with_absent: StringStack = vec![Some("a"), None, Some("b")].into_iter().collect();
        assert_eq!(&*ab.render(), &*joined.render());
        assert_ne!(ab, joined);
        assert_ne!(ab, with_absent);
        assert_eq!(ab, ab.clone());
        assert_eq!(StringStack::new(), StringStack::default());
    }

    #[test]
    fn construct_from_sequence_puts_last_on_top() {
        let mut stack: StringStack = vec!["a", "b", "c"].into_iter().map(Some).collect();
        assert_eq!(Ok(Some("c".to_string())), stack.pop());
        assert_eq!(Ok(Some("b".to_string())), stack.pop());
        assert_eq!(Ok(Some("a".to_string())), stack.pop());
    }

    #[test]
    fn extend_with_owned_strings() {
        let mut stack = StringStack::new();
        stack.extend(vec![Some("x".to_string()), None]);
        assert_eq!(vec![None, Some("x".to_string())], stack.to_vec());
        assert!(!stack.add_all(Vec::<Option<String>>::new()));
    }

    #[test]
    fn contains_tells_absent_from_empty() {
        let stack: StringStack = vec![Some("a"), Some("")].into_iter().collect();
        assert!(stack.contains(Some("")));
        assert!(!stack.contains(None));
        assert!(stack.contains_all(vec![Some("a"), Some("")]));
        assert!(!stack.contains_all(vec![Some("a"), None]));
        assert!(stack.contains_all(Vec::<Option<&str>>::new()));
    }

    #[test]
    fn remove_takes_topmost_match() {
        let mut stack: StringStack = vec![Some("ab"), Some("cd"), Some("ab"), Some("e")]
            .into_iter()
            .collect();
        assert!(stack.remove(Some("ab")));
        assert_eq!("abcde", &*stack.render());
        assert_eq!(
            vec![Some("e".to_string()), Some("cd".to_string()), Some("ab".to_string())],
            stack.to_vec()
        );
        stack.state().check_invariants();
        assert!(!stack.remove(Some("zz")));
    }

    #[test]
    fn remove_all_removes_every_occurrence() {
        let mut stack: StringStack = vec![Some("a"), None, Some("b"), Some("a"), None]
            .into_iter()
            .collect();
        assert!(stack.remove_all(vec![Some("a"), None]));
        assert_eq!(vec![Some("b".to_string())], stack.to_vec());
        assert!(!stack.remove_all(vec![Some("a")]));
        stack.state().check_invariants();
    }

    #[test]
    fn retain_all_keeps_only_listed() {
        let mut stack: StringStack = vec![Some("a"), Some("b"), Some(""), Some("c")]
            .into_iter()
            .collect();
        assert!(stack.retain_all(vec![Some("c"), Some("a")]));
        assert_eq!("ac", &*stack.render());
        assert_eq!(2, stack.len());
        assert!(!stack.retain_all(vec![Some("c"), Some("a")]));
        stack.state().check_invariants();
    }

    #[test]
    fn clear_bumps_counter_once() {
        let mut stack = sample();
        let before = stack.state().mod_count;
        stack.clear();
        assert!(stack.is_empty());
        assert_eq!("", &*stack.render());
        assert_eq!(before + 1, stack.state().mod_count);
    }

    #[test]
    fn capacity_tuning_keeps_contents() {
        let mut stack = StringStack::with_capacity(4, 8);
        stack.push(Some("abc"));
        stack.reserve(100, 1000);
        stack.shrink_to_fit();
        assert_eq!(Ok(Some("abc".to_string())), stack.peek());
    }

    #[test]
    fn debug_shows_layout() {
        let stack: StringStack = vec![Some("a"), None].into_iter().collect();
        assert_eq!(
            "StringStack { buffer: \"a\", offsets: [Some(0), None] }",
            format!("{:?}", stack)
        );
    }

    #[test]
    fn unicode_text_keeps_boundaries() {
        let mut stack: StringStack = vec![Some("añ"), Some("日本"), Some("ü")].into_iter().collect();
        assert!(stack.remove(Some("日本")));
        assert_eq!("añü", &*stack.render());
        assert_eq!(Ok(Some("ü".to_string())), stack.pop());
        assert_eq!(Ok(Some("añ".to_string())), stack.pop());
    }
}
