use crate::inner::StackInner;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub(crate) type InnerPointer = Rc<RefCell<StackInner>>;
pub(crate) type WeakPointer = Weak<RefCell<StackInner>>;
