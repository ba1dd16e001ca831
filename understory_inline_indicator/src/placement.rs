// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure projections from edit state and layout to what the indicator shows.
//!
//! ## Placement
//!
//! The visible band is `[0, height - bottom_margin)`. For an edit at `y`:
//!
//! | class       | set when                         |
//! |-------------|----------------------------------|
//! | `top`       | `y < 0`                          |
//! | `bottom`    | `y > height - bottom_margin`     |
//! | `contained` | `0 <= y < height - bottom_margin`|
//! | `visible`   | `show_always`                    |
//!
//! `bottom` uses a strict comparison against the band's exclusive end, so an edit
//! exactly at `height - bottom_margin` carries none of the three position classes.
//!
//! The top offset is `y` clipped into the band (see [`PixelRange::clip`]); the right
//! offset clears the minimap and the vertical scrollbar.

use crate::range::PixelRange;
use crate::types::{IndicatorAction, IndicatorClasses, IndicatorState, LayoutInfo};

/// Tunables for the indicator.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IndicatorConfig {
    /// Pixels reserved at the bottom of the viewport; the indicator never sits inside them.
    pub bottom_margin: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            bottom_margin: 30.0,
        }
    }
}

/// Classes and offsets for a visible indicator.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// State classes.
    pub classes: IndicatorClasses,
    /// Offset from the top of the editor.
    pub top: f64,
    /// Offset from the right edge of the editor.
    pub right: f64,
}

impl Placement {
    /// Project `state` into the visible band of `layout`.
    pub fn compute(state: &IndicatorState, layout: &LayoutInfo, config: &IndicatorConfig) -> Self {
        let band = visible_band(layout, config);
        let y = state.edit_top_left.y;

        let mut classes = IndicatorClasses::empty();
        classes.set(IndicatorClasses::TOP, y < band.start());
        classes.set(IndicatorClasses::BOTTOM, y > band.end_exclusive());
        classes.set(IndicatorClasses::VISIBLE, state.show_always);
        classes.set(IndicatorClasses::CONTAINED, band.contains(y));

        Self {
            classes,
            top: band.clip(y),
            right: layout.minimap.minimap_width + layout.vertical_scrollbar_width,
        }
    }
}

/// The band of top offsets the indicator may occupy.
pub fn visible_band(layout: &LayoutInfo, config: &IndicatorConfig) -> PixelRange {
    PixelRange::new(0.0, layout.height - config.bottom_margin)
}

/// Label text for the given state. Empty when there is no state.
pub fn label_text(state: Option<&IndicatorState>) -> &'static str {
    match state {
        None => "",
        Some(s) => match s.action {
            Some(IndicatorAction::TabToJump) => "Tab to jump",
            Some(IndicatorAction::TabToAccept) => "Tab to accept",
            None => "Inline Edit",
        },
    }
}
