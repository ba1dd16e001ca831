// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inline edit indicator driven by a fake editor host.
//!
//! The host owns the layout and the overlay list; the suggestion view owns the
//! indicator state; the model records clicks. The example scrolls an edit above,
//! into, and below the viewport, resizes the editor, and clicks the badge.
//!
//! Run:
//! - `cargo run -p understory_demos --example inline_indicator_basics`
//! - `RUST_LOG=trace cargo run -p understory_demos --example inline_indicator_basics`

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing_subscriber::EnvFilter;
use understory_inline_indicator::element::{ICON_CLASS, LABEL_CLASS, ROOT_CLASS};
use understory_inline_indicator::{
    EditorSurface, IndicatorAction, IndicatorElement, IndicatorState, InlineEditsIndicator,
    LayoutInfo, MinimapLayout, OverlayWidget, Point, SuggestionModel,
};
use understory_observable::{Disposable, Observable, ObservableValue, to_disposable, transaction};

struct Host {
    layout: ObservableValue<LayoutInfo>,
    overlays: Rc<RefCell<Vec<Rc<IndicatorElement>>>>,
}

impl EditorSurface for Host {
    fn layout_info(&self) -> Rc<dyn Observable<LayoutInfo>> {
        Rc::new(self.layout.clone())
    }

    fn create_overlay_widget(&self, widget: OverlayWidget) -> Box<dyn Disposable> {
        let node = widget.node;
        self.overlays.borrow_mut().push(node.clone());
        let overlays = self.overlays.clone();
        Box::new(to_disposable(move || {
            overlays.borrow_mut().retain(|n| !Rc::ptr_eq(n, &node));
        }))
    }
}

struct Model {
    editor: &'static str,
    jumps: Cell<u32>,
    accepts: Cell<u32>,
}

impl SuggestionModel for Model {
    type Editor = &'static str;

    fn editor(&self) -> &&'static str {
        &self.editor
    }

    fn jump(&self) {
        println!("  jump to edit in {}", self.editor);
        self.jumps.set(self.jumps.get() + 1);
    }

    fn accept(&self, editor: &&'static str) {
        println!("  accept in {editor}");
        self.accepts.set(self.accepts.get() + 1);
    }
}

fn print_overlays(step: &str, host: &Host) {
    println!("{step}");
    for node in host.overlays.borrow().iter() {
        let s = node.snapshot();
        println!(
            "  {:?} classes={:?} top={} right={} label={:?}",
            s.visibility,
            node.class_list(),
            s.top,
            s.right,
            s.label
        );
    }
}

fn layout(height: f64) -> LayoutInfo {
    LayoutInfo {
        width: 900.0,
        height,
        minimap: MinimapLayout {
            minimap_width: 80.0,
        },
        vertical_scrollbar_width: 14.0,
    }
}

fn edit_at(y: f64, action: Option<IndicatorAction>) -> Option<IndicatorState> {
    Some(IndicatorState {
        edit_top_left: Point::new(64.0, y),
        show_always: false,
        action,
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let host = Host {
        layout: ObservableValue::named("layout", layout(600.0)),
        overlays: Rc::new(RefCell::new(Vec::new())),
    };
    let state = ObservableValue::named("indicator_state", None::<IndicatorState>);
    let model = Rc::new(Model {
        editor: "main.rs",
        jumps: Cell::new(0),
        accepts: Cell::new(0),
    });
    let model_slot = ObservableValue::named("model", Some(model.clone()));

    let indicator = InlineEditsIndicator::new(&host, state.clone(), model_slot.clone());
    println!(
        "tree: .{ROOT_CLASS} > .{ICON_CLASS} ({:?}) + .{LABEL_CLASS}",
        indicator.element().icon()
    );
    print_overlays("no edit", &host);

    state.set(edit_at(-300.0, Some(IndicatorAction::TabToJump)), None);
    print_overlays("edit above the viewport", &host);
    indicator.element().click();

    state.set(edit_at(240.0, Some(IndicatorAction::TabToAccept)), None);
    print_overlays("edit in view", &host);
    indicator.element().click();

    transaction(|tx| {
        host.layout.set(layout(200.0), Some(tx));
        state.set(edit_at(900.0, None), Some(tx));
    });
    print_overlays("editor shrunk, edit below", &host);

    model_slot.set(None, None);
    indicator.element().click();

    println!("jumps={} accepts={}", model.jumps.get(), model.accepts.get());

    indicator.dispose();
    println!("overlays after dispose: {}", host.overlays.borrow().len());
}
