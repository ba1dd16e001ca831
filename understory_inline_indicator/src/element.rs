// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The indicator's visual tree: a root, an icon, and a text label.
//!
//! [`IndicatorElement`] is a retained description of what the host should draw.
//! The indicator mutates it from its autoruns; the host reads it (or takes a
//! [`snapshot`](IndicatorElement::snapshot)) when rendering and forwards clicks
//! with [`click`](IndicatorElement::click).
//!
//! Root style is fixed: absolutely positioned, overflow visible, pointer cursor.

use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use understory_observable::Disposable;

use crate::placement::Placement;
use crate::types::{IndicatorClasses, Visibility};

/// Class of the root node.
pub const ROOT_CLASS: &str = "inline-edits-view-indicator";
/// Class of the icon child.
pub const ICON_CLASS: &str = "icon";
/// Class of the label child.
pub const LABEL_CLASS: &str = "label";

/// Icon drawn before the label.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Icon {
    /// Left-pointing arrow.
    #[default]
    ArrowLeft,
}

/// Point-in-time copy of everything a host needs to draw the indicator.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementSnapshot {
    /// Root visibility.
    pub visibility: Visibility,
    /// State classes on the root (in addition to [`ROOT_CLASS`]).
    pub classes: IndicatorClasses,
    /// Offset from the top of the editor, in pixels.
    pub top: f64,
    /// Offset from the right edge of the editor, in pixels.
    pub right: f64,
    /// Icon child.
    pub icon: Icon,
    /// Label text.
    pub label: String,
}

type ClickHandler = Rc<dyn Fn()>;

/// Retained visual tree of the indicator.
pub struct IndicatorElement {
    visibility: Cell<Visibility>,
    classes: Cell<IndicatorClasses>,
    top: Cell<f64>,
    right: Cell<f64>,
    icon: Icon,
    label: RefCell<String>,
    epoch: Cell<u64>,
    listeners: RefCell<Vec<(u64, ClickHandler)>>,
    next_listener: Cell<u64>,
}

impl fmt::Debug for IndicatorElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndicatorElement")
            .field("visibility", &self.visibility.get())
            .field("classes", &self.classes.get())
            .field("top", &self.top.get())
            .field("right", &self.right.get())
            .field("label", &*self.label.borrow())
            .field("epoch", &self.epoch.get())
            .field("listeners", &self.listeners.borrow().len())
            .finish_non_exhaustive()
    }
}

impl Default for IndicatorElement {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorElement {
    /// Create a visible element with no classes, zero offsets, and an empty label.
    pub fn new() -> Self {
        Self {
            visibility: Cell::new(Visibility::Visible),
            classes: Cell::new(IndicatorClasses::empty()),
            top: Cell::new(0.0),
            right: Cell::new(0.0),
            icon: Icon::ArrowLeft,
            label: RefCell::new(String::new()),
            epoch: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
        }
    }

    /// Root visibility.
    pub fn visibility(&self) -> Visibility {
        self.visibility.get()
    }

    /// State classes on the root.
    pub fn classes(&self) -> IndicatorClasses {
        self.classes.get()
    }

    /// All classes on the root, starting with [`ROOT_CLASS`].
    pub fn class_list(&self) -> Vec<&'static str> {
        core::iter::once(ROOT_CLASS)
            .chain(self.classes.get().class_names())
            .collect()
    }

    /// Offset from the top of the editor, in pixels.
    pub fn top(&self) -> f64 {
        self.top.get()
    }

    /// Offset from the right edge of the editor, in pixels.
    pub fn right(&self) -> f64 {
        self.right.get()
    }

    /// Icon child.
    pub fn icon(&self) -> Icon {
        self.icon
    }

    /// Label text.
    pub fn label(&self) -> String {
        self.label.borrow().clone()
    }

    /// Counter advanced on every mutation pass. Hosts compare it to skip redundant redraws.
    pub fn epoch(&self) -> u64 {
        self.epoch.get()
    }

    /// Copy the current visual state.
    pub fn snapshot(&self) -> ElementSnapshot {
        ElementSnapshot {
            visibility: self.visibility.get(),
            classes: self.classes.get(),
            top: self.top.get(),
            right: self.right.get(),
            icon: self.icon,
            label: self.label(),
        }
    }

    pub(crate) fn set_label(&self, text: &str) {
        {
            let mut label = self.label.borrow_mut();
            label.clear();
            label.push_str(text);
        }
        self.bump();
    }

    pub(crate) fn hide(&self) {
        self.visibility.set(Visibility::Hidden);
        self.bump();
    }

    pub(crate) fn show_at(&self, placement: &Placement) {
        self.visibility.set(Visibility::Visible);
        self.classes.set(placement.classes);
        self.top.set(placement.top);
        self.right.set(placement.right);
        self.bump();
    }

    fn bump(&self) {
        self.epoch.set(self.epoch.get().wrapping_add(1));
    }

    /// Register a click handler on the root. Disposing the returned handle removes it.
    pub fn add_click_listener(self: &Rc<Self>, handler: impl Fn() + 'static) -> ClickListener {
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        let handler: ClickHandler = Rc::new(handler);
        self.listeners.borrow_mut().push((id, handler));
        ClickListener {
            element: Rc::downgrade(self),
            id,
        }
    }

    /// Number of registered click handlers.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Deliver a click on the root to every registered handler, in registration order.
    pub fn click(&self) {
        // Handlers may remove listeners; run over a copy.
        let handlers: Vec<ClickHandler> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, h)| h.clone())
            .collect();
        for handler in handlers {
            (*handler)();
        }
    }
}

/// Registration handle returned by [`IndicatorElement::add_click_listener`].
#[derive(Debug)]
pub struct ClickListener {
    element: Weak<IndicatorElement>,
    id: u64,
}

impl Disposable for ClickListener {
    fn dispose(&self) {
        if let Some(element) = self.element.upgrade() {
            element.listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}
