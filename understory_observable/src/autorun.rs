// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Autoruns: closures that re-run when the observables they read change.
//!
//! An autorun collects its dependencies afresh on every run.
//! A branch that stops reading an observable also stops being woken by it.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_observable::{Observable, ObservableValue, autorun};
//!
//! let name = ObservableValue::new("a");
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let run = autorun({
//!     let (name, log) = (name.clone(), log.clone());
//!     move |reader| log.borrow_mut().push(name.read(reader))
//! });
//! name.set("b", None);
//! run.dispose();
//! name.set("c", None);
//! assert_eq!(*log.borrow(), ["a", "b"]);
//! ```

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use tracing::trace;

use crate::lifecycle::Disposable;
use crate::observable::{Dependency, observer_key};

/// Something that is woken when a dependency changes.
pub(crate) trait Observer {
    /// Mark as needing a re-run. Returns `true` on the fresh-to-stale transition.
    fn mark_stale(&self) -> bool;
    /// Re-run if still stale.
    fn run_if_stale(&self);
}

/// Dependency recorder handed to an autorun's closure.
///
/// Pass it to [`Observable::read`](crate::Observable::read) for every value the closure depends on.
pub struct Reader<'a> {
    observer: &'a Weak<dyn Observer>,
    deps: &'a mut Vec<Rc<dyn Dependency>>,
}

impl fmt::Debug for Reader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reader")
            .field("dependencies", &self.deps.len())
            .finish_non_exhaustive()
    }
}

impl Reader<'_> {
    pub(crate) fn track(&mut self, dep: Rc<dyn Dependency>) {
        let key = Rc::as_ptr(&dep).cast::<()>();
        if self.deps.iter().any(|d| Rc::as_ptr(d).cast::<()>() == key) {
            return;
        }
        dep.add_observer(self.observer.clone());
        self.deps.push(dep);
    }
}

type RunFn = Box<dyn FnMut(&mut Reader<'_>)>;

struct AutorunInner {
    name: &'static str,
    this: Weak<dyn Observer>,
    run: RefCell<RunFn>,
    deps: RefCell<Vec<Rc<dyn Dependency>>>,
    stale: Cell<bool>,
    running: Cell<bool>,
    disposed: Cell<bool>,
}

impl AutorunInner {
    fn unsubscribe(&self, deps: &mut Vec<Rc<dyn Dependency>>) {
        let key = observer_key(&self.this);
        for dep in deps.drain(..) {
            dep.remove_observer(key);
        }
    }

    fn execute(&self) {
        if self.disposed.get() || self.running.replace(true) {
            // A nested wake-up leaves `stale` set; the outer loop picks it up.
            return;
        }
        loop {
            self.stale.set(false);
            let mut deps = core::mem::take(&mut *self.deps.borrow_mut());
            self.unsubscribe(&mut deps);
            trace!(autorun = self.name, "run");
            {
                let mut run = self.run.borrow_mut();
                let mut reader = Reader {
                    observer: &self.this,
                    deps: &mut deps,
                };
                (*run)(&mut reader);
            }
            if self.disposed.get() {
                self.unsubscribe(&mut deps);
                break;
            }
            *self.deps.borrow_mut() = deps;
            if !self.stale.get() {
                break;
            }
        }
        self.running.set(false);
        if self.disposed.get() {
            self.release_closure();
        }
    }

    fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        trace!(autorun = self.name, "dispose");
        let mut deps = core::mem::take(&mut *self.deps.borrow_mut());
        self.unsubscribe(&mut deps);
        if !self.running.get() {
            self.release_closure();
        }
    }

    fn release_closure(&self) {
        // Drops whatever the closure captured.
        *self.run.borrow_mut() = Box::new(|_: &mut Reader<'_>| {});
    }
}

impl Observer for AutorunInner {
    fn mark_stale(&self) -> bool {
        if self.disposed.get() {
            return false;
        }
        !self.stale.replace(true)
    }

    fn run_if_stale(&self) {
        if self.stale.get() {
            self.execute();
        }
    }
}

/// Handle to a running autorun.
///
/// Dropping the handle disposes the autorun.
pub struct Autorun {
    inner: Rc<AutorunInner>,
}

impl fmt::Debug for Autorun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Autorun")
            .field("name", &self.inner.name)
            .field("dependencies", &self.dependency_count())
            .field("disposed", &self.inner.disposed.get())
            .finish()
    }
}

/// Run `f` now and again whenever an observable it read changes.
pub fn autorun(f: impl FnMut(&mut Reader<'_>) + 'static) -> Autorun {
    autorun_named("autorun", f)
}

/// Like [`autorun`], with a name used in log output.
pub fn autorun_named(name: &'static str, f: impl FnMut(&mut Reader<'_>) + 'static) -> Autorun {
    let inner = Rc::new_cyclic(|weak: &Weak<AutorunInner>| {
        let this: Weak<dyn Observer> = weak.clone();
        AutorunInner {
            name,
            this,
            run: RefCell::new(Box::new(f)),
            deps: RefCell::new(Vec::new()),
            stale: Cell::new(true),
            running: Cell::new(false),
            disposed: Cell::new(false),
        }
    });
    inner.execute();
    Autorun { inner }
}

impl Autorun {
    /// The name given at construction.
    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    /// Number of observables read during the latest run.
    pub fn dependency_count(&self) -> usize {
        self.inner.deps.borrow().len()
    }

    /// Unsubscribe from all dependencies. The closure never runs again.
    ///
    /// Safe to call from inside the autorun's own closure.
    pub fn dispose(&self) {
        self.inner.dispose();
    }

    /// Whether [`dispose`](Self::dispose) has been called.
    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.get()
    }
}

impl Disposable for Autorun {
    fn dispose(&self) {
        Self::dispose(self);
    }
}

impl Drop for Autorun {
    fn drop(&mut self) {
        self.inner.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observable::{Observable, ObservableValue};
    use crate::transaction::transaction;

    fn counter() -> Rc<Cell<u32>> {
        Rc::new(Cell::new(0))
    }

    // Runs once on creation, once per change.
    #[test]
    fn runs_immediately_and_on_change() {
        let v = ObservableValue::new(0_u32);
        let runs = counter();
        let a = autorun({
            let (v, runs) = (v.clone(), runs.clone());
            move |r| {
                let _ = v.read(r);
                runs.set(runs.get() + 1);
            }
        });
        assert_eq!(runs.get(), 1);
        v.set(1, None);
        v.set(2, None);
        assert_eq!(runs.get(), 3);
        assert_eq!(a.dependency_count(), 1);
        assert_eq!(v.observer_count(), 1);
    }

    // Two sources changed in one transaction: one run, both new values seen.
    #[test]
    fn transaction_coalesces_multi_source_changes() {
        let a = ObservableValue::new(1_i32);
        let b = ObservableValue::new(10_i32);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _run = autorun({
            let (a, b, seen) = (a.clone(), b.clone(), seen.clone());
            move |r| seen.borrow_mut().push((a.read(r), b.read(r)))
        });
        transaction(|tx| {
            a.set(2, Some(tx));
            b.set(20, Some(tx));
            // Nothing ran yet; values are already visible.
            assert_eq!(seen.borrow().len(), 1);
            assert_eq!(a.get(), 2);
        });
        assert_eq!(*seen.borrow(), [(1, 10), (2, 20)]);
    }

    // Dependencies follow the latest run.
    #[test]
    fn dynamic_dependencies() {
        let gate = ObservableValue::new(false);
        let inner = ObservableValue::new(0_u32);
        let runs = counter();
        let a = autorun({
            let (gate, inner, runs) = (gate.clone(), inner.clone(), runs.clone());
            move |r| {
                runs.set(runs.get() + 1);
                if gate.read(r) {
                    let _ = inner.read(r);
                }
            }
        });
        inner.set(1, None);
        assert_eq!(runs.get(), 1);
        assert_eq!(a.dependency_count(), 1);

        gate.set(true, None);
        assert_eq!(runs.get(), 2);
        assert_eq!(a.dependency_count(), 2);
        inner.set(2, None);
        assert_eq!(runs.get(), 3);

        gate.set(false, None);
        assert_eq!(inner.observer_count(), 0);
        inner.set(3, None);
        assert_eq!(runs.get(), 4);
    }

    // Reading the same value twice subscribes once.
    #[test]
    fn repeated_reads_track_once() {
        let v = ObservableValue::new(1_u32);
        let a = autorun({
            let v = v.clone();
            move |r| {
                let _ = v.read(r) + v.read(r);
            }
        });
        assert_eq!(a.dependency_count(), 1);
        assert_eq!(v.observer_count(), 1);
    }

    // Disposed autoruns never run again and release their subscriptions.
    #[test]
    fn dispose_stops_runs() {
        let v = ObservableValue::new(0_u32);
        let runs = counter();
        let a = autorun({
            let (v, runs) = (v.clone(), runs.clone());
            move |r| {
                let _ = v.read(r);
                runs.set(runs.get() + 1);
            }
        });
        a.dispose();
        assert!(a.is_disposed());
        assert_eq!(v.observer_count(), 0);
        v.set(1, None);
        assert_eq!(runs.get(), 1);
    }

    // Dropping the handle disposes.
    #[test]
    fn drop_disposes() {
        let v = ObservableValue::new(0_u32);
        let runs = counter();
        drop(autorun({
            let (v, runs) = (v.clone(), runs.clone());
            move |r| {
                let _ = v.read(r);
                runs.set(runs.get() + 1);
            }
        }));
        v.set(1, None);
        assert_eq!(runs.get(), 1);
        assert_eq!(v.observer_count(), 0);
    }

    // Disposed inside the same transaction that woke it: the pending run is skipped.
    #[test]
    fn dispose_before_commit_skips_pending_run() {
        let v = ObservableValue::new(0_u32);
        let runs = counter();
        let a = autorun({
            let (v, runs) = (v.clone(), runs.clone());
            move |r| {
                let _ = v.read(r);
                runs.set(runs.get() + 1);
            }
        });
        transaction(|tx| {
            v.set(1, Some(tx));
            a.dispose();
        });
        assert_eq!(runs.get(), 1);
    }

    // Writing a dependency from inside the run re-runs after, not during, the current run.
    #[test]
    fn self_write_reruns_without_recursion() {
        let v = ObservableValue::new(0_u32);
        let depth = counter();
        let max_depth = counter();
        let _a = autorun({
            let (v, depth, max_depth) = (v.clone(), depth.clone(), max_depth.clone());
            move |r| {
                depth.set(depth.get() + 1);
                max_depth.set(max_depth.get().max(depth.get()));
                let x = v.read(r);
                if x < 3 {
                    v.set(x + 1, None);
                }
                depth.set(depth.get() - 1);
            }
        });
        assert_eq!(v.get(), 3);
        assert_eq!(max_depth.get(), 1);
    }

    // One autorun writing another's input propagates within the same pass.
    #[test]
    fn chained_autoruns() {
        let src = ObservableValue::new(1_u32);
        let doubled = ObservableValue::new(0_u32);
        let _d = autorun({
            let (src, doubled) = (src.clone(), doubled.clone());
            move |r| doubled.set(src.read(r) * 2, None)
        });
        let seen = counter();
        let _s = autorun({
            let (doubled, seen) = (doubled.clone(), seen.clone());
            move |r| seen.set(doubled.read(r))
        });
        assert_eq!(seen.get(), 2);
        src.set(5, None);
        assert_eq!(seen.get(), 10);
    }
}
