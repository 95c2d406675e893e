//! Ready-made [`Item`]s for common value types. None of them do anything on update so inserting
//! an equal value twice leaves the tree as it was.

use std::cmp::Ordering;

use crate::item::Item;

/// A string that compares either exactly or ignoring case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Text {
    value: String,
    ignore_case: bool,
}

impl Text {
    /// Wraps `value`. With `ignore_case` set, comparisons lowercase both sides first.
    pub fn new(value: impl Into<String>, ignore_case: bool) -> Self {
        Self {
            value: value.into(),
            ignore_case,
        }
    }
}

impl Item for Text {
    type Value = String;

    fn compare(&self, other: &String) -> Ordering {
        if self.ignore_case {
            self.value.to_lowercase().cmp(&other.to_lowercase())
        } else {
            self.value.as_str().cmp(other.as_str())
        }
    }

    fn value(&self) -> &String {
        &self.value
    }

    fn update(&mut self, _with: &String) {}
}

/// An integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Int(pub i64);

impl Item for Int {
    type Value = i64;

    fn compare(&self, other: &i64) -> Ordering {
        self.0.cmp(other)
    }

    fn value(&self) -> &i64 {
        &self.0
    }

    fn update(&mut self, _with: &i64) {}
}

/// A float. Uses the IEEE 754 total order so `NaN`s have a place in the tree too.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Float(pub f64);

impl Item for Float {
    type Value = f64;

    fn compare(&self, other: &f64) -> Ordering {
        self.0.total_cmp(other)
    }

    fn value(&self) -> &f64 {
        &self.0
    }

    fn update(&mut self, _with: &f64) {}
}
