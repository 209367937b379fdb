// Copyright 2025 the Pathbender Authors
// SPDX-License-Identifier: Apache-2.0

//! UI components (canvas widget, graph widget, sidebar views)

mod control_panel;
mod field_canvas;
mod profile_graph;

pub use control_panel::control_panel;
pub use field_canvas::field_canvas_view;
pub use profile_graph::profile_graph_view;
