// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observable values: the read side ([`Observable`]) and the settable store ([`ObservableValue`]).

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use tracing::trace;

use crate::autorun::{Observer, Reader};
use crate::transaction::Transaction;

/// A value that can be peeked at or read with dependency tracking.
///
/// Implementations must make [`get`](Observable::get) and [`read`](Observable::read)
/// return the same value at any given moment; the only difference is that `read`
/// subscribes the running autorun to future changes.
pub trait Observable<T> {
    /// Return the current value without recording a dependency.
    fn get(&self) -> T;

    /// Return the current value and record this observable as a dependency of `reader`.
    fn read(&self, reader: &mut Reader<'_>) -> T;
}

impl<T, O: Observable<T> + ?Sized> Observable<T> for Rc<O> {
    fn get(&self) -> T {
        (**self).get()
    }

    fn read(&self, reader: &mut Reader<'_>) -> T {
        (**self).read(reader)
    }
}

/// Subscription side of an observable, as seen by a [`Reader`].
pub(crate) trait Dependency {
    fn add_observer(&self, observer: Weak<dyn Observer>);
    fn remove_observer(&self, observer: *const ());
}

pub(crate) fn observer_key(observer: &Weak<dyn Observer>) -> *const () {
    observer.as_ptr().cast::<()>()
}

struct ValueInner<T> {
    name: &'static str,
    value: RefCell<T>,
    observers: RefCell<Vec<Weak<dyn Observer>>>,
}

impl<T> ValueInner<T> {
    fn notify(&self, tx: &Transaction) {
        // Collect first: marking an observer stale must not hold our borrow.
        let observers: Vec<Rc<dyn Observer>> = self
            .observers
            .borrow()
            .iter()
            .filter_map(Weak::upgrade)
            .collect();
        for observer in observers {
            tx.mark_stale(observer);
        }
    }
}

impl<T> Dependency for ValueInner<T> {
    fn add_observer(&self, observer: Weak<dyn Observer>) {
        let key = observer_key(&observer);
        let mut observers = self.observers.borrow_mut();
        observers.retain(|o| o.strong_count() > 0);
        if !observers.iter().any(|o| observer_key(o) == key) {
            observers.push(observer);
        }
    }

    fn remove_observer(&self, observer: *const ()) {
        self.observers
            .borrow_mut()
            .retain(|o| observer_key(o) != observer);
    }
}

/// A settable observable value.
///
/// `ObservableValue` is a handle: clones share the same storage and observers.
///
/// ## Panics
///
/// [`set`](Self::set) panics if called from inside a [`with`](Self::with) closure on the same value.
pub struct ObservableValue<T> {
    inner: Rc<ValueInner<T>>,
}

impl<T> Clone for ObservableValue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("ObservableValue");
        s.field("name", &self.inner.name);
        match self.inner.value.try_borrow() {
            Ok(v) => s.field("value", &*v),
            Err(_) => s.field("value", &"<borrowed>"),
        };
        s.field("observers", &self.observer_count()).finish()
    }
}

impl<T: Default> Default for ObservableValue<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> ObservableValue<T> {
    /// Create an unnamed observable value.
    pub fn new(value: T) -> Self {
        Self::named("value", value)
    }

    /// Create an observable value with a name used in log output.
    pub fn named(name: &'static str, value: T) -> Self {
        Self {
            inner: Rc::new(ValueInner {
                name,
                value: RefCell::new(value),
                observers: RefCell::new(Vec::new()),
            }),
        }
    }

    /// The name given at construction.
    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    /// Peek at the current value by reference, without recording a dependency.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.inner.value.borrow())
    }

    /// Replace the value and notify observers.
    ///
    /// The new value is visible to [`get`](Observable::get) as soon as this returns.
    /// Observers run when `tx` commits; with no transaction, they run before this returns.
    pub fn set(&self, value: T, tx: Option<&Transaction>) {
        *self.inner.value.borrow_mut() = value;
        trace!(observable = self.inner.name, "value set");
        match tx {
            Some(tx) => self.inner.notify(tx),
            None => {
                let tx = Transaction::new();
                self.inner.notify(&tx);
                tx.commit();
            }
        }
    }

    /// Number of live observers currently subscribed.
    pub fn observer_count(&self) -> usize {
        self.inner
            .observers
            .borrow()
            .iter()
            .filter(|o| o.strong_count() > 0)
            .count()
    }
}

impl<T: PartialEq> ObservableValue<T> {
    /// Like [`set`](Self::set), but skips notification when `value` equals the current value.
    ///
    /// Returns whether the value changed.
    pub fn set_if_changed(&self, value: T, tx: Option<&Transaction>) -> bool {
        if self.with(|current| *current == value) {
            return false;
        }
        self.set(value, tx);
        true
    }
}

impl<T: Clone + 'static> Observable<T> for ObservableValue<T> {
    fn get(&self) -> T {
        self.with(T::clone)
    }

    fn read(&self, reader: &mut Reader<'_>) -> T {
        reader.track(self.inner.clone());
        self.get()
    }
}

/// An observable that never changes.
///
/// Reading it records no dependency.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConstObservable<T>(T);

/// Wrap `value` in an observable that never changes.
pub fn const_observable<T>(value: T) -> ConstObservable<T> {
    ConstObservable(value)
}

impl<T: Clone> Observable<T> for ConstObservable<T> {
    fn get(&self) -> T {
        self.0.clone()
    }

    fn read(&self, _reader: &mut Reader<'_>) -> T {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autorun::autorun;
    use core::cell::Cell;

    // Peeking never subscribes.
    #[test]
    fn get_does_not_subscribe() {
        let v = ObservableValue::new(1_u32);
        assert_eq!(v.get(), 1);
        assert_eq!(v.with(|x| *x + 1), 2);
        assert_eq!(v.observer_count(), 0);
    }

    // Clones share storage.
    #[test]
    fn clones_share_value() {
        let a = ObservableValue::named("a", 1_u32);
        let b = a.clone();
        b.set(5, None);
        assert_eq!(a.get(), 5);
        assert_eq!(a.name(), "a");
    }

    // Equal values do not re-run observers.
    #[test]
    fn set_if_changed_skips_equal() {
        let v = ObservableValue::new(3_u32);
        let runs = Rc::new(Cell::new(0));
        let _a = autorun({
            let (v, runs) = (v.clone(), runs.clone());
            move |r| {
                let _ = v.read(r);
                runs.set(runs.get() + 1);
            }
        });
        assert!(!v.set_if_changed(3, None));
        assert_eq!(runs.get(), 1);
        assert!(v.set_if_changed(4, None));
        assert_eq!(runs.get(), 2);
    }

    // Plain `set` notifies even when the value is equal.
    #[test]
    fn set_always_notifies() {
        let v = ObservableValue::new(3_u32);
        let runs = Rc::new(Cell::new(0));
        let _a = autorun({
            let (v, runs) = (v.clone(), runs.clone());
            move |r| {
                let _ = v.read(r);
                runs.set(runs.get() + 1);
            }
        });
        v.set(3, None);
        assert_eq!(runs.get(), 2);
    }

    // Constants never register a dependency.
    #[test]
    fn const_observable_is_untracked() {
        let c = const_observable(7_i32);
        let seen = Rc::new(Cell::new(0));
        let a = autorun({
            let seen = seen.clone();
            move |r| seen.set(c.read(r))
        });
        assert_eq!(seen.get(), 7);
        assert_eq!(a.dependency_count(), 0);
    }

    // Shared trait objects forward to the underlying value.
    #[test]
    fn rc_dyn_forwards() {
        let v = ObservableValue::new(2_u32);
        let shared: Rc<dyn Observable<u32>> = Rc::new(v.clone());
        v.set(9, None);
        assert_eq!(shared.get(), 9);
    }
}
