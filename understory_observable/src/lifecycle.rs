// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Disposal: releasing subscriptions, listeners, and host registrations together.
//!
//! ## Semantics
//!
//! - [`Disposable::dispose`] is idempotent.
//! - A [`DisposableStore`] disposes its items once, in insertion order, on [`DisposableStore::dispose`] or on drop.
//! - Adding to a store that is already disposed disposes the new item immediately.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use tracing::warn;

/// A resource released by an explicit call.
pub trait Disposable {
    /// Release the resource. Calling this more than once has no further effect.
    fn dispose(&self);
}

impl<D: Disposable + ?Sized> Disposable for Box<D> {
    fn dispose(&self) {
        (**self).dispose();
    }
}

impl<D: Disposable + ?Sized> Disposable for Rc<D> {
    fn dispose(&self) {
        (**self).dispose();
    }
}

/// A one-shot teardown closure. See [`to_disposable`].
pub struct DisposeFn {
    f: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl fmt::Debug for DisposeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisposeFn")
            .field("disposed", &self.f.borrow().is_none())
            .finish()
    }
}

/// Wrap a teardown closure. It runs on the first [`dispose`](Disposable::dispose) only.
pub fn to_disposable(f: impl FnOnce() + 'static) -> DisposeFn {
    DisposeFn {
        f: RefCell::new(Some(Box::new(f))),
    }
}

impl Disposable for DisposeFn {
    fn dispose(&self) {
        let f = self.f.borrow_mut().take();
        if let Some(f) = f {
            f();
        }
    }
}

/// A group of resources acquired together and released together.
#[derive(Default)]
pub struct DisposableStore {
    items: RefCell<Vec<Box<dyn Disposable>>>,
    disposed: Cell<bool>,
}

impl fmt::Debug for DisposableStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisposableStore")
            .field("items", &self.items.borrow().len())
            .field("disposed", &self.disposed.get())
            .finish()
    }
}

impl DisposableStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `item`; it is disposed with the store.
    pub fn add<D: Disposable + 'static>(&self, item: D) {
        if self.disposed.get() {
            warn!("resource added to a disposed store; disposing it now");
            item.dispose();
            return;
        }
        self.items.borrow_mut().push(Box::new(item));
    }

    /// Number of resources held.
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    /// Whether the store holds no resources.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether [`dispose`](Self::dispose) has been called.
    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    /// Dispose every held resource, in insertion order.
    pub fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        let items = core::mem::take(&mut *self.items.borrow_mut());
        for item in &items {
            item.dispose();
        }
    }
}

impl Disposable for DisposableStore {
    fn dispose(&self) {
        Self::dispose(self);
    }
}

impl Drop for DisposableStore {
    fn drop(&mut self) {
        self.dispose();
    }
}
