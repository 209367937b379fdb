// Copyright 2025 the Pathbender Authors
// SPDX-License-Identifier: Apache-2.0

//! Sidebar control panel
//!
//! Numeric inputs for the controller gains and lookahead, the robot
//! footprint, and the selected point; profile limit rows with live value
//! labels and a profile-type selector; simulation start/reset; file
//! actions; and the per-tick telemetry readouts. All of it reads from
//! `AppState` and writes back through its methods, so the editing core
//! never sees a concrete control.

use masonry::properties::types::AsUnit;
use xilem::WidgetView;
use xilem::core::one_of::Either;
use xilem::style::Style;
use xilem::view::{CrossAxisAlignment, button, flex_col, flex_row, label, sized_box};

use crate::data::AppState;
use crate::model::ProfileKind;
use crate::theme;

/// Width of the sidebar panel
pub const CONTROL_PANEL_WIDTH: f64 = 300.0;

mod layout {
    pub const INPUT_WIDTH: f64 = 64.0;
    pub const ROW_GAP: f64 = 4.0;
    pub const SECTION_GAP: f64 = 12.0;
    pub const CONTENT_PADDING: f64 = 10.0;
    pub const BORDER_WIDTH: f64 = 1.5;
    pub const CORNER_RADIUS: f64 = 8.0;
}

// ============================================================================
// BUILDING BLOCKS
// ============================================================================

fn section_header(text: &'static str) -> impl WidgetView<AppState> {
    label(text).text_size(12.0).color(theme::text::SECONDARY)
}

/// A numeric text input that commits on every parseable edit.
fn numeric_input<F>(value: String, on_commit: F) -> impl WidgetView<AppState>
where
    F: Fn(&mut AppState, f64) + Send + Sync + 'static,
{
    sized_box(
        xilem::view::text_input(value, move |state: &mut AppState, text: String| {
            if let Ok(v) = text.trim().parse::<f64>() {
                on_commit(state, v);
            }
        })
        .text_alignment(parley::Alignment::Center),
    )
    .width(layout::INPUT_WIDTH.px())
}

/// `name: [value]` input row.
fn numeric_row<F>(name: &'static str, value: String, on_commit: F) -> impl WidgetView<AppState>
where
    F: Fn(&mut AppState, f64) + Send + Sync + 'static,
{
    flex_row((
        label(name).text_size(13.0).color(theme::text::PRIMARY),
        numeric_input(value, on_commit),
    ))
    .gap(layout::ROW_GAP.px())
    .cross_axis_alignment(CrossAxisAlignment::Center)
}

/// A read-only `name: value` line.
fn readout(name: &'static str, value: String) -> impl WidgetView<AppState> {
    flex_row((
        label(name).text_size(13.0).color(theme::text::SECONDARY),
        label(value).text_size(13.0).color(theme::text::PRIMARY),
    ))
    .gap(layout::ROW_GAP.px())
}

// ============================================================================
// SECTIONS
// ============================================================================

fn path_section(state: &AppState) -> impl WidgetView<AppState> + use<> {
    let point_count = state.session.path.len();
    let path_length = state.path_length;

    // The coordinate editor binds to the selection; without one it shows
    // blanks and edits go nowhere
    let selected = state.session.path.selected_point();
    let (x_value, y_value) = match selected {
        Some(pt) => (format!("{:.1}", pt.x), format!("{:.1}", pt.y)),
        None => (String::new(), String::new()),
    };

    flex_col((
        section_header("PATH"),
        readout("Points", format!("{point_count}")),
        readout("Length", format!("{path_length:.1}")),
        flex_row((
            label("Point").text_size(13.0).color(theme::text::PRIMARY),
            numeric_input(x_value, |state: &mut AppState, v| {
                if let Some(pt) = state.session.path.selected_point() {
                    state.edit_selected_point(v, pt.y);
                }
            }),
            numeric_input(y_value, |state: &mut AppState, v| {
                if let Some(pt) = state.session.path.selected_point() {
                    state.edit_selected_point(pt.x, v);
                }
            }),
        ))
        .gap(layout::ROW_GAP.px())
        .cross_axis_alignment(CrossAxisAlignment::Center),
        button(
            label("Clear Path").text_size(13.0).color(theme::text::PRIMARY),
            |state: &mut AppState| state.clear_path(),
        ),
    ))
    .gap(layout::ROW_GAP.px())
    .cross_axis_alignment(CrossAxisAlignment::Start)
}

fn controller_section(state: &AppState) -> impl WidgetView<AppState> + use<> {
    let params = state.params;
    flex_col((
        section_header("CONTROLLER"),
        numeric_row("kx", format!("{}", params.kx), |state: &mut AppState, v| {
            state.params.kx = v;
        }),
        numeric_row("ky", format!("{}", params.ky), |state: &mut AppState, v| {
            state.params.ky = v;
        }),
        numeric_row(
            "ktheta",
            format!("{}", params.ktheta),
            |state: &mut AppState, v| {
                state.params.ktheta = v;
            },
        ),
        numeric_row(
            "Start Angle",
            format!("{}", params.start_angle_deg),
            |state: &mut AppState, v| {
                state.params.start_angle_deg = v;
            },
        ),
        numeric_row(
            "Min Lookahead",
            format!("{}", params.min_lookahead),
            |state: &mut AppState, v| {
                state.params.min_lookahead = v;
            },
        ),
        numeric_row(
            "Lookahead Gain",
            format!("{}", params.lookahead_gain),
            |state: &mut AppState, v| {
                state.params.lookahead_gain = v;
            },
        ),
    ))
    .gap(layout::ROW_GAP.px())
    .cross_axis_alignment(CrossAxisAlignment::Start)
}

fn robot_section(state: &AppState) -> impl WidgetView<AppState> + use<> {
    let (width, height) = state.session.robot_size;
    flex_col((
        section_header("ROBOT"),
        numeric_row("Width", format!("{width}"), |state: &mut AppState, v| {
            if v > 0.0 {
                state.session.robot_size.0 = v;
            }
        }),
        numeric_row("Height", format!("{height}"), |state: &mut AppState, v| {
            if v > 0.0 {
                state.session.robot_size.1 = v;
            }
        }),
    ))
    .gap(layout::ROW_GAP.px())
    .cross_axis_alignment(CrossAxisAlignment::Start)
}

fn profile_kind_button(
    kind: ProfileKind,
    name: &'static str,
    selected: bool,
) -> impl WidgetView<AppState> {
    let background = if selected {
        theme::panel::OUTLINE
    } else {
        theme::panel::BACKGROUND
    };
    button(
        label(name).text_size(13.0).color(theme::text::PRIMARY),
        move |state: &mut AppState| state.set_profile_kind(kind),
    )
    .background_color(background)
}

fn profile_section(state: &AppState) -> impl WidgetView<AppState> + use<> {
    let config = state.profile_config;
    flex_col((
        section_header("MOTION PROFILE"),
        flex_row((
            profile_kind_button(
                ProfileKind::Trapezoidal,
                "Trapezoidal",
                config.kind == ProfileKind::Trapezoidal,
            ),
            profile_kind_button(ProfileKind::SCurve, "S-Curve", config.kind == ProfileKind::SCurve),
        ))
        .gap(layout::ROW_GAP.px()),
        numeric_row(
            "Max Vel",
            format!("{:.1}", config.max_vel),
            |state: &mut AppState, v| state.set_profile_limit(|c, v2| c.max_vel = v2, v),
        ),
        numeric_row(
            "Max Accel",
            format!("{:.1}", config.max_accel),
            |state: &mut AppState, v| state.set_profile_limit(|c, v2| c.max_accel = v2, v),
        ),
        numeric_row(
            "Max Decel",
            format!("{:.1}", config.max_decel),
            |state: &mut AppState, v| state.set_profile_limit(|c, v2| c.max_decel = v2, v),
        ),
        numeric_row(
            "Max Jerk",
            format!("{:.1}", config.max_jerk),
            |state: &mut AppState, v| state.set_profile_limit(|c, v2| c.max_jerk = v2, v),
        ),
    ))
    .gap(layout::ROW_GAP.px())
    .cross_axis_alignment(CrossAxisAlignment::Start)
}

fn simulation_section(state: &AppState) -> impl WidgetView<AppState> + use<> {
    let start_text = if state.controller.is_running() {
        "Running..."
    } else {
        "Start Sim"
    };

    let telemetry = state.telemetry.unwrap_or_default();
    let (velocity, acceleration, x, y) = if state.telemetry.is_some() {
        (
            format!("{:.2}", telemetry.velocity),
            format!("{:.2}", telemetry.acceleration),
            format!("{:.1}", telemetry.x),
            format!("{:.1}", telemetry.y),
        )
    } else {
        ("--".into(), "--".into(), "--".into(), "--".into())
    };

    flex_col((
        section_header("SIMULATION"),
        flex_row((
            button(
                label(start_text).text_size(13.0).color(theme::text::PRIMARY),
                |state: &mut AppState| state.start_simulation(),
            ),
            button(
                label("Reset").text_size(13.0).color(theme::text::PRIMARY),
                |state: &mut AppState| state.reset_simulation(),
            ),
        ))
        .gap(layout::ROW_GAP.px()),
        readout("Velocity", velocity),
        readout("Accel", acceleration),
        readout("X", x),
        readout("Y", y),
    ))
    .gap(layout::ROW_GAP.px())
    .cross_axis_alignment(CrossAxisAlignment::Start)
}

fn file_section(state: &AppState) -> impl WidgetView<AppState> + use<> {
    let saved_line = match &state.last_saved {
        Some(time) => Either::A(
            label(format!("Saved {time}"))
                .text_size(12.0)
                .color(theme::text::SECONDARY),
        ),
        None => Either::B(label("")),
    };

    let error_line = match &state.error_message {
        Some(error) => Either::A(
            label(error.clone()).text_size(12.0).color(theme::text::ERROR),
        ),
        None => Either::B(label("")),
    };

    flex_col((
        section_header("FILE"),
        flex_row((
            button(
                label("Save").text_size(13.0).color(theme::text::PRIMARY),
                |state: &mut AppState| state.save_path_dialog(),
            ),
            button(
                label("Load").text_size(13.0).color(theme::text::PRIMARY),
                |state: &mut AppState| state.load_path_dialog(),
            ),
            button(
                label("Image").text_size(13.0).color(theme::text::PRIMARY),
                |state: &mut AppState| state.load_background_dialog(),
            ),
        ))
        .gap(layout::ROW_GAP.px()),
        saved_line,
        error_line,
    ))
    .gap(layout::ROW_GAP.px())
    .cross_axis_alignment(CrossAxisAlignment::Start)
}

// ============================================================================
// PANEL
// ============================================================================

/// The complete sidebar
pub fn control_panel(state: &AppState) -> impl WidgetView<AppState> + use<> {
    let content = flex_col((
        path_section(state),
        controller_section(state),
        robot_section(state),
        profile_section(state),
        simulation_section(state),
        file_section(state),
    ))
    .gap(layout::SECTION_GAP.px())
    .cross_axis_alignment(CrossAxisAlignment::Start);

    sized_box(content)
        .width(CONTROL_PANEL_WIDTH.px())
        .padding(layout::CONTENT_PADDING)
        .background_color(theme::panel::BACKGROUND)
        .border_color(theme::panel::OUTLINE)
        .border_width(layout::BORDER_WIDTH)
        .corner_radius(layout::CORNER_RADIUS)
}
