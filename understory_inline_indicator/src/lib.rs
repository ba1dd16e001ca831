// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Inline Indicator: an overlay badge for pending inline edits.
//!
//! ## Overview
//!
//! When a suggestion engine has an inline edit ready, the edit may be scrolled out of
//! view or may simply need a nudge ("Tab to jump", "Tab to accept").
//! [`InlineEditsIndicator`] is the small overlay that says so.
//! It sits against the right edge of the text area, clamped into the visible band, and
//! forwards a click to the suggestion model.
//!
//! ## Inputs
//!
//! - An [`EditorSurface`]: the editor's [`LayoutInfo`] as an observable, plus overlay registration.
//! - An observable `Option<`[`IndicatorState`]`>`: where the edit is, whether to force the badge visible, and which action Tab performs. `None` hides the badge.
//! - An observable `Option<Rc<M>>` where `M:` [`SuggestionModel`]: the model to call on click. It is only peeked at click time.
//!
//! ## Outputs
//!
//! An [`IndicatorElement`] the host draws: visibility, state classes
//! ([`IndicatorClasses`]), `top` and `right` pixel offsets, an icon, and a label.
//! Two autoruns keep it current:
//!
//! - the label, from the state alone (see [`label_text`]);
//! - visibility and placement, from the state and the layout together (see [`Placement`]).
//!
//! Writes made in one [`Transaction`](understory_observable::Transaction) are projected once.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use understory_inline_indicator::{
//!     EditorSurface, IndicatorAction, IndicatorState, InlineEditsIndicator, LayoutInfo,
//!     OverlayWidget, Point, SuggestionModel, Visibility,
//! };
//! use understory_observable::{Disposable, Observable, ObservableValue, to_disposable};
//!
//! struct Editor(ObservableValue<LayoutInfo>);
//! impl EditorSurface for Editor {
//!     fn layout_info(&self) -> Rc<dyn Observable<LayoutInfo>> {
//!         Rc::new(self.0.clone())
//!     }
//!     fn create_overlay_widget(&self, _w: OverlayWidget) -> Box<dyn Disposable> {
//!         Box::new(to_disposable(|| {}))
//!     }
//! }
//!
//! struct Model;
//! impl SuggestionModel for Model {
//!     type Editor = ();
//!     fn editor(&self) -> &() { &() }
//!     fn jump(&self) {}
//!     fn accept(&self, _editor: &()) {}
//! }
//!
//! let editor = Editor(ObservableValue::new(LayoutInfo { height: 400.0, ..Default::default() }));
//! let state = ObservableValue::new(None::<IndicatorState>);
//! let model = ObservableValue::new(Some(Rc::new(Model)));
//! let indicator = InlineEditsIndicator::new(&editor, state.clone(), model);
//! assert_eq!(indicator.element().visibility(), Visibility::Hidden);
//!
//! state.set(
//!     Some(IndicatorState {
//!         edit_top_left: Point::new(40.0, -120.0),
//!         show_always: false,
//!         action: Some(IndicatorAction::TabToJump),
//!     }),
//!     None,
//! );
//! assert_eq!(indicator.element().label(), "Tab to jump");
//! assert_eq!(indicator.element().top(), 0.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod editor;
pub mod element;
pub mod indicator;
pub mod placement;
pub mod range;
pub mod types;

pub use editor::{EditorSurface, OverlayPreference, OverlayWidget, SuggestionModel};
pub use element::{ClickListener, ElementSnapshot, Icon, IndicatorElement};
pub use indicator::{InlineEditsIndicator, dispatch_click};
pub use placement::{IndicatorConfig, Placement, label_text, visible_band};
pub use range::PixelRange;
pub use types::{
    IndicatorAction, IndicatorClasses, IndicatorState, LayoutInfo, MinimapLayout, Visibility,
};

// Re-export so hosts build `IndicatorState` without naming kurbo themselves.
pub use kurbo::Point;
