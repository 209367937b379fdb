// Copyright 2025 the Pathbender Authors
// SPDX-License-Identifier: Apache-2.0

//! Field canvas widget - the main canvas for drawing and animating paths
//!
//! Pointer editing follows a small state machine over the single selection:
//!
//! - primary press on a point: select it and start dragging
//! - primary press on empty field: add a point there and select it
//! - secondary press on a point: delete it
//! - move while dragging: the selected point follows the pointer, clamped
//!   to the field
//! - release: dragging ends, the selection stays
//!
//! Every edit flows back to `AppState` as a [`FieldUpdate`] action, which
//! triggers trajectory regeneration.

mod drawing;
mod paint;
mod view;

pub use view::field_canvas_view;

use crate::field::{FieldMapper, FieldSession};
use masonry::accesskit::{Node, Role};
use masonry::core::{
    AccessCtx, BoxConstraints, ChildrenIds, EventCtx, LayoutCtx, PaintCtx, PointerButton,
    PointerButtonEvent, PointerEvent, PointerState, PointerUpdate, PropertiesMut, PropertiesRef,
    RegisterCtx, Update, UpdateCtx, Widget,
};
use masonry::kurbo::Size;
use masonry::vello::Scene;
use std::sync::Arc;

/// The field canvas widget
pub struct FieldCanvasWidget {
    /// The field session (mutable copy for editing)
    pub session: FieldSession,

    /// Whether a point is currently being dragged
    dragging: bool,

    /// Canvas size from the last layout pass
    size: Size,
}

impl FieldCanvasWidget {
    pub fn new(session: Arc<FieldSession>) -> Self {
        Self {
            session: (*session).clone(),
            dragging: false,
            size: Size::new(600.0, 600.0),
        }
    }

    /// Mapper for the current canvas square. Rebuilt per event and per
    /// paint so a resize can never leave a stale mapping behind.
    fn mapper(&self) -> FieldMapper {
        FieldMapper::new(self.size.width.min(self.size.height))
    }

    fn emit_update(&self, ctx: &mut EventCtx<'_>) {
        ctx.submit_action::<FieldUpdate>(FieldUpdate {
            session: self.session.clone(),
        });
    }

    fn handle_primary_down(&mut self, ctx: &mut EventCtx<'_>, state: &PointerState) {
        ctx.capture_pointer();

        let local_pos = ctx.local_position(state.position);
        let mapper = self.mapper();

        match self.session.path.hit_test(local_pos, &mapper) {
            Some(index) => {
                self.session.path.select(Some(index));
                self.dragging = true;
            }
            None => {
                self.session.path.add_point(mapper.to_field(local_pos));
            }
        }

        self.emit_update(ctx);
        ctx.request_render();
    }

    fn handle_secondary_down(&mut self, ctx: &mut EventCtx<'_>, state: &PointerState) {
        let local_pos = ctx.local_position(state.position);
        let Some(index) = self.session.path.hit_test(local_pos, &self.mapper()) else {
            return;
        };

        self.session.path.remove(index);
        self.emit_update(ctx);
        ctx.request_render();
    }

    fn handle_pointer_move(&mut self, ctx: &mut EventCtx<'_>, state: &PointerState) {
        if !self.dragging {
            return;
        }

        let local_pos = ctx.local_position(state.position);
        let field_pos = self.mapper().to_field(local_pos);
        if self.session.path.move_selected(field_pos) {
            // Every move regenerates downstream state; stale responses are
            // discarded by sequence number on the state side
            self.emit_update(ctx);
            ctx.request_render();
        }
    }
}

/// Action emitted by the canvas whenever the user edits the path
#[derive(Debug, Clone)]
pub struct FieldUpdate {
    pub session: FieldSession,
}

impl Widget for FieldCanvasWidget {
    type Action = FieldUpdate;

    fn register_children(&mut self, _ctx: &mut RegisterCtx<'_>) {
        // Leaf widget - no children
    }

    fn update(
        &mut self,
        _ctx: &mut UpdateCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        _event: &Update,
    ) {
        // State flows in through the view's rebuild
    }

    fn layout(
        &mut self,
        _ctx: &mut LayoutCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        bc: &BoxConstraints,
    ) -> Size {
        // Use all available space; painting happens in the largest square
        // that fits
        let size = bc.max();
        self.size = size;
        size
    }

    fn paint(&mut self, ctx: &mut PaintCtx<'_>, _props: &PropertiesRef<'_>, scene: &mut Scene) {
        let canvas_size = ctx.size();
        self.size = canvas_size;
        self.paint_scene(scene, canvas_size);
    }

    fn on_pointer_event(
        &mut self,
        ctx: &mut EventCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        event: &PointerEvent,
    ) {
        match event {
            PointerEvent::Down(PointerButtonEvent {
                button: Some(PointerButton::Primary),
                state,
                ..
            }) => {
                self.handle_primary_down(ctx, state);
            }

            PointerEvent::Down(PointerButtonEvent {
                button: Some(PointerButton::Secondary),
                state,
                ..
            }) => {
                self.handle_secondary_down(ctx, state);
            }

            PointerEvent::Move(PointerUpdate { current, .. }) => {
                self.handle_pointer_move(ctx, current);
            }

            PointerEvent::Up(PointerButtonEvent {
                button: Some(PointerButton::Primary),
                ..
            }) => {
                self.dragging = false;
            }

            PointerEvent::Cancel(_) => {
                self.dragging = false;
            }

            _ => {
                // Ignore other pointer events
            }
        }
    }

    fn accessibility_role(&self) -> Role {
        Role::Canvas
    }

    fn accessibility(
        &mut self,
        _ctx: &mut AccessCtx<'_>,
        _props: &PropertiesRef<'_>,
        node: &mut Node,
    ) {
        node.set_label(format!(
            "Path editor: {} control points",
            self.session.path.len()
        ));
    }

    fn children_ids(&self) -> ChildrenIds {
        ChildrenIds::new()
    }
}
