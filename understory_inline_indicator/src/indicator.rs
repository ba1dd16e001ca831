// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The indicator widget: wiring observables to the element and clicks to the model.

use alloc::rc::Rc;

use tracing::{debug, trace};
use understory_observable::{DisposableStore, Observable, autorun_named, const_observable};

use crate::editor::{EditorSurface, OverlayPreference, OverlayWidget, SuggestionModel};
use crate::element::IndicatorElement;
use crate::placement::{IndicatorConfig, Placement, label_text};
use crate::types::{IndicatorAction, IndicatorState};

/// Overlay badge pointing at a pending inline edit.
///
/// Created once per editor and disposed with it. Everything it acquires (the click
/// listener, two autoruns, and the overlay registration) is released by
/// [`dispose`](Self::dispose) or on drop. The autoruns stop before anything else is
/// released, so host callbacks fired during teardown never reach the element.
#[derive(Debug)]
pub struct InlineEditsIndicator {
    element: Rc<IndicatorElement>,
    projections: DisposableStore,
    disposables: DisposableStore,
}

impl InlineEditsIndicator {
    /// Create the indicator with the default [`IndicatorConfig`].
    pub fn new<E, S, O, M>(editor: &E, state: S, model: O) -> Self
    where
        E: EditorSurface + ?Sized,
        S: Observable<Option<IndicatorState>> + 'static,
        O: Observable<Option<Rc<M>>> + 'static,
        M: SuggestionModel + 'static,
    {
        Self::with_config(editor, state, model, IndicatorConfig::default())
    }

    /// Create the indicator.
    ///
    /// `state` drives label and placement. `model` is only peeked at when the
    /// indicator is clicked, so it may come and go freely.
    pub fn with_config<E, S, O, M>(editor: &E, state: S, model: O, config: IndicatorConfig) -> Self
    where
        E: EditorSurface + ?Sized,
        S: Observable<Option<IndicatorState>> + 'static,
        O: Observable<Option<Rc<M>>> + 'static,
        M: SuggestionModel + 'static,
    {
        let state: Rc<dyn Observable<Option<IndicatorState>>> = Rc::new(state);
        let element = Rc::new(IndicatorElement::new());
        let projections = DisposableStore::new();
        let disposables = DisposableStore::new();

        disposables.add(element.add_click_listener({
            let state = state.clone();
            move || {
                let Some(state) = state.get() else {
                    return;
                };
                let model = model.get();
                let invoked = dispatch_click(&state, model.as_deref());
                debug!(?invoked, "inline edit indicator clicked");
            }
        }));

        projections.add(autorun_named("inline_edits_indicator.label", {
            let state = state.clone();
            let element = element.clone();
            move |reader| {
                let state = state.read(reader);
                element.set_label(label_text(state.as_ref()));
            }
        }));

        disposables.add(editor.create_overlay_widget(OverlayWidget {
            node: element.clone(),
            position: Rc::new(const_observable(None::<OverlayPreference>)),
            allow_editor_overflow: false,
            min_content_width: Rc::new(const_observable(0.0_f64)),
        }));

        let layout = editor.layout_info();
        projections.add(autorun_named("inline_edits_indicator.placement", {
            let element = element.clone();
            move |reader| {
                let Some(state) = state.read(reader) else {
                    element.hide();
                    return;
                };
                let layout = layout.read(reader);
                let placement = Placement::compute(&state, &layout, &config);
                trace!(
                    top = placement.top,
                    right = placement.right,
                    classes = ?placement.classes,
                    "inline edit indicator placed"
                );
                element.show_at(&placement);
            }
        }));

        Self {
            element,
            projections,
            disposables,
        }
    }

    /// The visual tree registered with the editor.
    pub fn element(&self) -> &Rc<IndicatorElement> {
        &self.element
    }

    /// Detach from the editor and stop reacting to state and layout.
    pub fn dispose(&self) {
        if !self.disposables.is_disposed() {
            debug!("inline edit indicator disposed");
        }
        self.projections.dispose();
        self.disposables.dispose();
    }

    /// Whether [`dispose`](Self::dispose) has been called.
    pub fn is_disposed(&self) -> bool {
        self.disposables.is_disposed()
    }
}

impl Drop for InlineEditsIndicator {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Forward a click to `model` according to `state`'s action.
///
/// Returns the action invoked, or `None` when there is no action or no model.
pub fn dispatch_click<M: SuggestionModel + ?Sized>(
    state: &IndicatorState,
    model: Option<&M>,
) -> Option<IndicatorAction> {
    let action = state.action?;
    let model = model?;
    match action {
        IndicatorAction::TabToJump => model.jump(),
        IndicatorAction::TabToAccept => model.accept(model.editor()),
    }
    Some(action)
}
