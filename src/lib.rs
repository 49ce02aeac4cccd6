// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A stack of strings optimised for rendering the whole stack as one string.
//!
//! [`StringStack`][StringStack] is useful when walking tree shaped data such
//! as XML, JSON or a file system, where you need to track the current path
//! and render it often.
//!
//! # Layout
//!
//! Instead of storing each element as its own `String`, the stack keeps the
//! text of every element in one contiguous buffer, in push order, along with
//! a table holding the offset where each element starts:
//!
//! ```text
//! pushed:   "usr"  "/"   None  ""   "lib"
//! buffer:   [u s r / l i b]
//! offsets:  [Some(0), Some(3), None, Some(4), Some(4)]
//! ```
//!
//! An element ends where the next present element starts, or at the end of
//! the buffer, so element lengths are never stored. This makes
//! [`render()`][render] free: it's just a view of the buffer. Pushing appends
//! to the buffer, popping truncates it.
//!
//! # Absent elements
//!
//! Elements are `Option<&str>`. `None` is an absent element, which renders as
//! nothing but is still counted, popped and iterated like any other, and is
//! distinct from `Some("")`.
//!
//! # Iteration
//!
//! [`StringStack::iter()`][iter] visits elements top of the stack first, the
//! same order you'd get by popping repeatedly. The iterator doesn't borrow
//! the stack. It can remove the element it last visited, and it fails fast
//! with [`StackError::ConcurrentModification`][ConcurrentModification] if the
//! stack was changed by anything else since.
//!
//! # Thread Safety
//!
//! `StringStack` is strictly thread local. It does no locking of its own, and
//! the fail fast check on iterators is only there to catch mistakes.
//!
//! # Example
//!
//! ```rust
//! # use string_stack::{StackError, StringStack};
//! let mut path = StringStack::new();
//! path.push(Some("/home"));
//! path.push(Some("/user"));
//! path.push(Some("/src"));
//! assert_eq!("/home/user/src", &*path.render());
//!
//! // Leave the directory we're in.
//! assert_eq!(Ok(Some("/src".to_string())), path.pop());
//! assert_eq!("/home/user", path.to_string());
//!
//! // Drop an element from the middle while iterating.
//! let mut iter = path.iter();
//! iter.try_next()?;
//! iter.try_next()?;
//! iter.remove()?;
//! assert_eq!("/user", &*path.render());
//! # Ok::<(), StackError>(())
//! ```
//!
//! [StringStack]: struct.StringStack.html
//! [render]: struct.StringStack.html#method.render
//! [iter]: struct.StringStack.html#method.iter
//! [ConcurrentModification]: enum.StackError.html#variant.ConcurrentModification

#![forbid(rust_2018_idioms)]
#![deny(nonstandard_style)]
#![warn(unreachable_pub, missing_docs, missing_debug_implementations)]

mod counter;
mod error;
mod inner;
mod iter;
mod stack;
mod types;
mod unmodifiable;

pub use self::error::StackError;
pub use self::iter::{Iter, RemovingIterator};
pub use self::stack::StringStack;
pub use self::unmodifiable::Unmodifiable;
