// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Observable: single-threaded reactive values for UI state.
//!
//! ## Overview
//!
//! This crate provides the small reactive core that widgets use to project host state onto visuals.
//!
//! - [`ObservableValue`] holds a value, hands out fresh reads with [`Observable::get`], and notifies observers on [`ObservableValue::set`].
//! - [`autorun`] runs a closure immediately and again whenever any observable it read through its [`Reader`] changes.
//! - [`Transaction`] groups several writes so that every dependent autorun re-runs exactly once, after all writes are visible.
//! - [`DisposableStore`] ties autoruns, listeners, and host registrations together so they are released by a single call.
//!
//! ## Reads: tracked and untracked
//!
//! There are two ways to look at an observable.
//! [`Observable::read`] is used inside an autorun and records a dependency.
//! [`Observable::get`] peeks at the current value without subscribing; use it in event handlers, where the value must be the one current at event time and not the one seen at subscription time.
//!
//! ## Propagation
//!
//! Writes update the stored value immediately.
//! Observers are only marked stale; they run when the transaction commits, in the order in which they were first marked.
//! Because all writes of a transaction land before any observer runs, an autorun reading several observables never sees a mix of old and new values.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use understory_observable::{Observable, ObservableValue, autorun, transaction};
//!
//! let width = ObservableValue::named("width", 10.0_f64);
//! let height = ObservableValue::named("height", 4.0_f64);
//! let runs = Rc::new(Cell::new(0));
//!
//! let _area = autorun({
//!     let (width, height, runs) = (width.clone(), height.clone(), runs.clone());
//!     move |reader| {
//!         let _ = width.read(reader) * height.read(reader);
//!         runs.set(runs.get() + 1);
//!     }
//! });
//! assert_eq!(runs.get(), 1);
//!
//! transaction(|tx| {
//!     width.set(20.0, Some(tx));
//!     height.set(8.0, Some(tx));
//! });
//! assert_eq!(runs.get(), 2);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod autorun;
pub mod lifecycle;
pub mod observable;
pub mod transaction;

pub use autorun::{Autorun, Reader, autorun, autorun_named};
pub use lifecycle::{Disposable, DisposableStore, DisposeFn, to_disposable};
pub use observable::{ConstObservable, Observable, ObservableValue, const_observable};
pub use transaction::{Transaction, transaction};
