//! The contract a type has to satisfy to be stored in a [`Tree`][crate::Tree], plus a wrapper
//! that builds one out of plain closures.
//!
//! # Examples
//!
//! ```
//! use comparable_bst::{Generic, Item};
//! use std::cmp::Ordering;
//!
//! // The comparator only has to get the sign right.
//! let item = Generic::new(10_i64, |this, to| (this - to) * 1000);
//!
//! assert_eq!(item.compare(&3), Ordering::Greater);
//! assert_eq!(item.compare(&10), Ordering::Equal);
//! assert_eq!(item.value(), &10);
//! ```

use std::cmp::Ordering;
use std::fmt;

/// Anything that can live in a [`Tree`][crate::Tree].
///
/// The tree never looks at a stored value directly. It asks the item to compare itself against
/// another value, reads the value back out for lookups and traversals, and hands the item an
/// incoming value when an equal item is inserted a second time.
pub trait Item {
    /// The value the item carries around.
    type Value;

    /// Compares this item's value against `other`. [`Ordering::Less`] means this item sorts
    /// before `other`.
    fn compare(&self, other: &Self::Value) -> Ordering;

    /// The current value of this item.
    fn value(&self) -> &Self::Value;

    /// Called on the item already in the tree when an equal item is inserted, with the incoming
    /// item's value. Doing nothing is a perfectly good implementation.
    ///
    /// If the update changes how the item compares, the tree moves it to its new position.
    fn update(&mut self, with: &Self::Value);
}

/// Lets one tree hold different kinds of items behind `Box<dyn Item<Value = V>>`.
impl<T> Item for Box<T>
where
    T: Item + ?Sized,
{
    type Value = T::Value;

    fn compare(&self, other: &Self::Value) -> Ordering {
        (**self).compare(other)
    }

    fn value(&self) -> &Self::Value {
        (**self).value()
    }

    fn update(&mut self, with: &Self::Value) {
        (**self).update(with)
    }
}

/// Turns the signed magnitude a raw comparator returns into an [`Ordering`].
pub fn sign(raw: i64) -> Ordering {
    raw.cmp(&0)
}

/// A boxed comparator. Any negative number means "less than", zero means "equal" and any positive
/// number means "greater than".
pub type CompareFn<T> = Box<dyn Fn(&T, &T) -> i64>;

/// A boxed updater. It receives the current value and the incoming one and returns the new value.
pub type UpdateFn<T> = Box<dyn Fn(&T, &T) -> T>;

/// An [`Item`] whose behavior is entirely defined by the closures it was built with.
pub struct Generic<T> {
    value: T,
    comparer: CompareFn<T>,
    updater: Option<UpdateFn<T>>,
}

impl<T> Generic<T> {
    /// Wraps `value` with the given comparator and no updater, making [`Item::update`] a no-op.
    pub fn new<C>(value: T, comparer: C) -> Self
    where
        C: Fn(&T, &T) -> i64 + 'static,
    {
        Self {
            value,
            comparer: Box::new(comparer),
            updater: None,
        }
    }

    /// Starts building a `Generic` around `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use comparable_bst::{Generic, Item};
    ///
    /// let mut counter = Generic::builder(0_i64)
    ///     .comparer(|this, to| this - to)
    ///     .updater(|this, _| this + 1)
    ///     .build();
    ///
    /// counter.update(&0);
    /// assert_eq!(counter.value(), &1);
    /// ```
    pub fn builder(value: T) -> GenericBuilder<T> {
        GenericBuilder {
            value,
            comparer: None,
            updater: None,
        }
    }

    /// Replaces the updater.
    pub fn with_updater<U>(mut self, updater: U) -> Self
    where
        U: Fn(&T, &T) -> T + 'static,
    {
        self.updater = Some(Box::new(updater));
        self
    }
}

impl<T> Item for Generic<T> {
    type Value = T;

    fn compare(&self, other: &T) -> Ordering {
        sign((self.comparer)(&self.value, other))
    }

    fn value(&self) -> &T {
        &self.value
    }

    fn update(&mut self, with: &T) {
        if let Some(updater) = &self.updater {
            self.value = updater(&self.value, with);
        }
    }
}

impl<T> fmt::Debug for Generic<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generic")
            .field("value", &self.value)
            .field("updater", &self.updater.is_some())
            .finish()
    }
}

/// Builder for [`Generic`]. A comparator is required.
pub struct GenericBuilder<T> {
    value: T,
    comparer: Option<CompareFn<T>>,
    updater: Option<UpdateFn<T>>,
}

impl<T> GenericBuilder<T> {
    /// Sets the comparator.
    pub fn comparer<C>(mut self, comparer: C) -> Self
    where
        C: Fn(&T, &T) -> i64 + 'static,
    {
        self.comparer = Some(Box::new(comparer));
        self
    }

    /// Sets the updater. Optional.
    pub fn updater<U>(mut self, updater: U) -> Self
    where
        U: Fn(&T, &T) -> T + 'static,
    {
        self.updater = Some(Box::new(updater));
        self
    }

    /// Builds the item.
    ///
    /// ## Panics
    ///
    /// When no comparator was given. A tree can't order items it can't compare.
    pub fn build(self) -> Generic<T> {
        let Some(comparer) = self.comparer else {
            panic!("you must provide a comparer function");
        };

        Generic {
            value: self.value,
            comparer,
            updater: self.updater,
        }
    }
}
