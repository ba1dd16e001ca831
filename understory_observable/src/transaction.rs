// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transactions: batch several writes into one propagation pass.

use alloc::collections::VecDeque;
use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

use crate::autorun::Observer;

/// A batch of writes whose observers run once, at commit.
///
/// Every [`ObservableValue::set`](crate::ObservableValue::set) given this transaction
/// stores its value immediately and marks dependent autoruns stale.
/// [`commit`](Self::commit) (or dropping the transaction) runs each stale autorun once,
/// in the order it was first marked.
#[derive(Default)]
pub struct Transaction {
    pending: RefCell<VecDeque<Rc<dyn Observer>>>,
}

impl fmt::Debug for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transaction")
            .field("pending", &self.pending.borrow().len())
            .finish()
    }
}

impl Transaction {
    /// Open a new transaction.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn mark_stale(&self, observer: Rc<dyn Observer>) {
        if observer.mark_stale() {
            self.pending.borrow_mut().push_back(observer);
        }
    }

    /// Run every observer made stale by this transaction.
    pub fn commit(self) {
        // Flushed by `Drop`.
    }

    fn flush(&self) {
        loop {
            let next = self.pending.borrow_mut().pop_front();
            match next {
                Some(observer) => observer.run_if_stale(),
                None => break,
            }
        }
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        self.flush();
    }
}

/// Run `f` inside a new transaction and commit it.
///
/// ```
/// use understory_observable::{Observable, ObservableValue, transaction};
///
/// let x = ObservableValue::new(0);
/// let y = ObservableValue::new(0);
/// transaction(|tx| {
///     x.set(1, Some(tx));
///     y.set(2, Some(tx));
/// });
/// assert_eq!((x.get(), y.get()), (1, 2));
/// ```
pub fn transaction<R>(f: impl FnOnce(&Transaction) -> R) -> R {
    let tx = Transaction::new();
    let out = f(&tx);
    tx.commit();
    out
}
