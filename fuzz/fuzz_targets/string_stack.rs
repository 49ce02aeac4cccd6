#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use string_stack::{StackError, StringStack};

#[derive(Arbitrary, Debug)]
enum Action {
    Push(Option<String>),
    Pop,
    Peek,
    Clear,
    RemoveAt(usize),
    RemoveValue(Option<String>),
    Copy,
}

use self::Action::*;

fuzz_target!(|actions: Vec<Action>| {
    let mut stack = StringStack::new();
    let mut model: Vec<Option<String>> = Vec::new();
    for action in actions {
        match action {
            Push(value) => {
                stack.push(value.as_deref());
                model.push(value);
            }
            Pop => {
                assert_eq!(model.pop().ok_or(StackError::Empty), stack.pop());
            }
            Peek => {
                assert_eq!(model.last().cloned().ok_or(StackError::Empty), stack.peek());
            }
            Clear => {
                stack.clear();
                model.clear();
            }
            RemoveAt(depth) => {
                if !model.is_empty() {
                    let depth = depth % model.len();
                    let mut iter = stack.iter();
                    for _ in 0..=depth {
                        iter.try_next().unwrap();
                    }
                    iter.remove().unwrap();
                    model.remove(model.len() - 1 - depth);
                }
            }
            RemoveValue(value) => {
                let found = model.iter().rposition(|element| *element == value);
                assert_eq!(found.is_some(), stack.remove(value.as_deref()));
                if let Some(index) = found {
                    model.remove(index);
                }
            }
            Copy => {
                let copy = stack.clone();
                assert_eq!(copy, stack);
                stack = copy;
            }
        }
        let rendered: String = model.iter().flatten().map(String::as_str).collect();
        assert_eq!(rendered, &*stack.render());
        assert_eq!(model.len(), stack.len());
    }
    let mut expected = model;
    expected.reverse();
    assert_eq!(expected, stack.to_vec());
});
