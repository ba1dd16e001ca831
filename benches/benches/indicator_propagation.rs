// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use understory_inline_indicator::{
    EditorSurface, IndicatorAction, IndicatorConfig, IndicatorState, InlineEditsIndicator,
    LayoutInfo, MinimapLayout, OverlayWidget, Placement, Point, SuggestionModel,
};
use understory_observable::{Disposable, Observable, ObservableValue, to_disposable, transaction};

struct Host(ObservableValue<LayoutInfo>);

impl EditorSurface for Host {
    fn layout_info(&self) -> Rc<dyn Observable<LayoutInfo>> {
        Rc::new(self.0.clone())
    }

    fn create_overlay_widget(&self, _widget: OverlayWidget) -> Box<dyn Disposable> {
        Box::new(to_disposable(|| {}))
    }
}

struct Model;

impl SuggestionModel for Model {
    type Editor = ();

    fn editor(&self) -> &() {
        &()
    }

    fn jump(&self) {}

    fn accept(&self, _editor: &()) {}
}

fn layout(height: f64) -> LayoutInfo {
    LayoutInfo {
        width: 1200.0,
        height,
        minimap: MinimapLayout {
            minimap_width: 90.0,
        },
        vertical_scrollbar_width: 14.0,
    }
}

fn state(y: f64) -> Option<IndicatorState> {
    Some(IndicatorState {
        edit_top_left: Point::new(80.0, y),
        show_always: false,
        action: Some(IndicatorAction::TabToJump),
    })
}

fn bench_placement(c: &mut Criterion) {
    let cfg = IndicatorConfig::default();
    let l = layout(800.0);
    let s = state(400.0).unwrap();
    c.bench_function("placement_compute", |b| {
        b.iter(|| Placement::compute(black_box(&s), black_box(&l), &cfg));
    });
}

fn bench_propagation(c: &mut Criterion) {
    let host = Host(ObservableValue::new(layout(800.0)));
    let st = ObservableValue::new(state(0.0));
    let model = ObservableValue::new(Some(Rc::new(Model)));
    let indicator = InlineEditsIndicator::new(&host, st.clone(), model);

    let mut y = 0.0;
    c.bench_function("state_push", |b| {
        b.iter(|| {
            y = (y + 17.0) % 2000.0 - 500.0;
            st.set(state(y), None);
            black_box(indicator.element().top())
        });
    });

    let mut h = 800.0;
    c.bench_function("layout_push", |b| {
        b.iter(|| {
            h = if h > 1200.0 { 200.0 } else { h + 7.0 };
            host.0.set(layout(h), None);
            black_box(indicator.element().top())
        });
    });

    c.bench_function("joint_push", |b| {
        b.iter(|| {
            y = (y + 17.0) % 2000.0 - 500.0;
            h = if h > 1200.0 { 200.0 } else { h + 7.0 };
            transaction(|tx| {
                st.set(state(y), Some(tx));
                host.0.set(layout(h), Some(tx));
            });
            black_box(indicator.element().top())
        });
    });
}

criterion_group!(benches, bench_placement, bench_propagation);
criterion_main!(benches);
