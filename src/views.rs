// Copyright 2025 the Pathbender Authors
// SPDX-License-Identifier: Apache-2.0

//! Main workbench layout: sidebar, field canvas, profile graph

use std::sync::Arc;

use masonry::properties::types::AsUnit;
use xilem::WidgetView;
use xilem::view::{FlexExt, flex_col, flex_row, sized_box};

use crate::components::{control_panel, field_canvas_view, profile_graph_view};
use crate::data::AppState;

/// Height of the profile graph strip under the canvas
const GRAPH_HEIGHT: f64 = 180.0;

/// The single workbench view: controls on the left, the field canvas
/// filling the rest, with the motion profile graph along the bottom.
pub fn workbench(state: &mut AppState) -> impl WidgetView<AppState> + use<> {
    let session = Arc::new(state.session.clone());
    let graph = Arc::clone(&state.graph);

    let canvas = field_canvas_view(session, |state: &mut AppState, session| {
        state.update_field_session(session);
    });

    flex_row((
        control_panel(state),
        flex_col((
            canvas.flex(1.0),
            sized_box(profile_graph_view(graph)).height(GRAPH_HEIGHT.px()),
        ))
        .flex(1.0),
    ))
}
