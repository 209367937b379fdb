// Copyright 2025 the Pathbender Authors
// SPDX-License-Identifier: Apache-2.0

//! Xilem View wrapper for FieldCanvasWidget

use super::{FieldCanvasWidget, FieldUpdate};
use crate::field::FieldSession;
use std::marker::PhantomData;
use std::sync::Arc;
use xilem::core::{MessageContext, MessageResult, Mut, View, ViewMarker};
use xilem::{Pod, ViewCtx};

/// Create a field canvas view with a callback for path edits.
///
/// The callback receives the widget's session after every pointer edit
/// (select, add, delete, drag).
pub fn field_canvas_view<State, F>(
    session: Arc<FieldSession>,
    on_update: F,
) -> FieldCanvasView<State, F>
where
    F: Fn(&mut State, FieldSession),
{
    FieldCanvasView {
        session,
        on_update,
        phantom: PhantomData,
    }
}

/// The Xilem View for FieldCanvasWidget
#[must_use = "View values do nothing unless provided to Xilem."]
pub struct FieldCanvasView<State, F> {
    session: Arc<FieldSession>,
    on_update: F,
    phantom: PhantomData<fn() -> State>,
}

impl<State, F> ViewMarker for FieldCanvasView<State, F> {}

impl<State: 'static, F: Fn(&mut State, FieldSession) + 'static> View<State, (), ViewCtx>
    for FieldCanvasView<State, F>
{
    type Element = Pod<FieldCanvasWidget>;
    type ViewState = ();

    fn build(&self, ctx: &mut ViewCtx, _app_state: &mut State) -> (Self::Element, Self::ViewState) {
        let widget = FieldCanvasWidget::new(self.session.clone());
        let pod = ctx.create_pod(widget);
        ctx.record_action(pod.new_widget.id());
        (pod, ())
    }

    fn rebuild(
        &self,
        prev: &Self,
        _view_state: &mut Self::ViewState,
        _ctx: &mut ViewCtx,
        mut element: Mut<'_, Self::Element>,
        _app_state: &mut State,
    ) {
        // State-driven changes (new trajectory, robot stepped, file load)
        // arrive as a fresh session Arc; adopt it. The widget's transient
        // drag flag lives outside the session and survives untouched.
        if !Arc::ptr_eq(&self.session, &prev.session) {
            let mut widget = element.downcast::<FieldCanvasWidget>();
            widget.widget.session = (*self.session).clone();
            widget.ctx.request_render();
        }
    }

    fn teardown(
        &self,
        _view_state: &mut Self::ViewState,
        _ctx: &mut ViewCtx,
        _element: Mut<'_, Self::Element>,
    ) {
        // No cleanup needed
    }

    fn message(
        &self,
        _view_state: &mut Self::ViewState,
        message: &mut MessageContext,
        _element: Mut<'_, Self::Element>,
        app_state: &mut State,
    ) -> MessageResult<()> {
        match message.take_message::<FieldUpdate>() {
            Some(update) => {
                (self.on_update)(app_state, update.session);
                // Propagate to the root so the sidebar readouts rebuild
                MessageResult::Action(())
            }
            None => MessageResult::Stale,
        }
    }
}
