// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the indicator: edit state, editor layout, and CSS state classes.

use kurbo::Point;

/// The keyboard affordance the indicator currently advertises.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum IndicatorAction {
    /// Tab moves the cursor to the edit.
    TabToJump,
    /// Tab accepts the edit.
    TabToAccept,
}

/// State of the pending inline edit, as produced by the suggestion view.
///
/// The indicator observes an `Option<IndicatorState>`; `None` means there is
/// no active inline edit and the indicator is hidden.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IndicatorState {
    /// Top-left of the edit, in editor-relative pixels.
    pub edit_top_left: Point,
    /// Force the `visible` class regardless of where the edit is.
    pub show_always: bool,
    /// Affordance to advertise, if any.
    pub action: Option<IndicatorAction>,
}

/// Minimap part of [`LayoutInfo`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MinimapLayout {
    /// Width of the minimap gutter in pixels.
    pub minimap_width: f64,
}

/// Editor layout, in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LayoutInfo {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
    /// Minimap gutter.
    pub minimap: MinimapLayout,
    /// Width of the vertical scrollbar gutter.
    pub vertical_scrollbar_width: f64,
}

bitflags::bitflags! {
    /// State classes on the indicator root.
    ///
    /// These are not exclusive; all four are recomputed together on every placement pass.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct IndicatorClasses: u8 {
        /// Edit lies above the visible band.
        const TOP       = 0b0000_0001;
        /// Edit lies below the visible band.
        const BOTTOM    = 0b0000_0010;
        /// Indicator is forced visible.
        const VISIBLE   = 0b0000_0100;
        /// Edit lies inside the visible band.
        const CONTAINED = 0b0000_1000;
    }
}

impl IndicatorClasses {
    /// CSS class names for the set flags, in declaration order.
    pub fn class_names(self) -> impl Iterator<Item = &'static str> {
        [
            (Self::TOP, "top"),
            (Self::BOTTOM, "bottom"),
            (Self::VISIBLE, "visible"),
            (Self::CONTAINED, "contained"),
        ]
        .into_iter()
        .filter(move |(flag, _)| self.contains(*flag))
        .map(|(_, name)| name)
    }
}

/// Whether the indicator root is shown.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Visibility {
    /// Rendered.
    #[default]
    Visible,
    /// Laid out but not rendered.
    Hidden,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn class_names_follow_flags() {
        let c = IndicatorClasses::CONTAINED | IndicatorClasses::TOP;
        assert_eq!(c.class_names().collect::<Vec<_>>(), ["top", "contained"]);
        assert_eq!(IndicatorClasses::empty().class_names().count(), 0);
    }
}
