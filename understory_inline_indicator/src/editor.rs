// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator interfaces: the editor host and the suggestion model.
//!
//! The indicator owns neither. It reads the host's layout, registers one overlay
//! with it, and calls into the model on click.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::fmt;

use understory_observable::{Disposable, Observable};

use crate::element::IndicatorElement;
use crate::types::LayoutInfo;

/// Anchor preference for an overlay widget.
///
/// `None` in [`OverlayWidget::position`] means the widget positions itself.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum OverlayPreference {
    /// Top-right corner of the editor.
    TopRightCorner,
    /// Bottom-right corner of the editor.
    BottomRightCorner,
    /// Centered along the top edge.
    TopCenter,
}

/// Registration request for a fixed (non-scrolling) overlay.
pub struct OverlayWidget {
    /// The node to attach.
    pub node: Rc<IndicatorElement>,
    /// Anchor preference; `None` leaves positioning to the node's own offsets.
    pub position: Rc<dyn Observable<Option<OverlayPreference>>>,
    /// Whether the node may render outside the editor's bounds.
    pub allow_editor_overflow: bool,
    /// Minimum width the editor content must keep for this overlay, in pixels.
    pub min_content_width: Rc<dyn Observable<f64>>,
}

impl fmt::Debug for OverlayWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayWidget")
            .field("node", &self.node)
            .field("position", &self.position.get())
            .field("allow_editor_overflow", &self.allow_editor_overflow)
            .field("min_content_width", &self.min_content_width.get())
            .finish()
    }
}

/// What the indicator needs from the editor that hosts it.
pub trait EditorSurface {
    /// Current layout, pushed on every change.
    fn layout_info(&self) -> Rc<dyn Observable<LayoutInfo>>;

    /// Attach `widget` as an overlay. Disposing the returned handle detaches it.
    fn create_overlay_widget(&self, widget: OverlayWidget) -> Box<dyn Disposable>;
}

/// The suggestion model the indicator forwards clicks to.
pub trait SuggestionModel {
    /// Editor reference passed back to [`accept`](Self::accept).
    type Editor;

    /// The editor this model belongs to.
    fn editor(&self) -> &Self::Editor;

    /// Move the cursor to the pending edit.
    fn jump(&self);

    /// Accept the pending edit in `editor`.
    fn accept(&self, editor: &Self::Editor);
}
