// Copyright 2025 the Pathbender Authors
// SPDX-License-Identifier: Apache-2.0

//! Theme colors and constants
//!
//! All colors use hexadecimal format: Color::from_rgb8(0xRR, 0xGG, 0xBB)

use masonry::vello::peniko::Color;

// ============================================================================
// BASE COLORS -- Generic colors for UI, a dark to light gradient by default
// ============================================================================
const BASE_A: Color = Color::from_rgb8(0x12, 0x12, 0x16);
const BASE_B: Color = Color::from_rgb8(0x1c, 0x1c, 0x22);
const BASE_C: Color = Color::from_rgb8(0x26, 0x26, 0x2e);
const BASE_F: Color = Color::from_rgb8(0x50, 0x50, 0x5c);
const BASE_I: Color = Color::from_rgb8(0x94, 0x94, 0xa0);
const BASE_N: Color = Color::from_rgb8(0xe6, 0xe6, 0xf0);

// ============================================================================
// ACCENT COLORS
// ============================================================================
const ACCENT_PURPLE: Color = Color::from_rgb8(0x80, 0x52, 0xff);
const ACCENT_PURPLE_DIM: Color = Color::from_rgb8(0x66, 0x42, 0xcc);
const ACCENT_BLUE: Color = Color::from_rgb8(0x2d, 0xad, 0xdf);
const ACCENT_ORANGE: Color = Color::from_rgb8(0xff, 0x90, 0x45);
const ACCENT_PINK: Color = Color::from_rgb8(0xff, 0x33, 0x66);
const ACCENT_PINK_DEEP: Color = Color::from_rgb8(0xff, 0x00, 0x44);
const ACCENT_GREEN: Color = Color::from_rgb8(0x00, 0xff, 0xaa);

/// Field canvas colors
pub mod canvas {
    use super::*;

    pub const BACKGROUND: Color = BASE_A;

    /// Faint grid lines at every grid step
    pub const GRID_LINE: Color = Color::from_rgba8(0xff, 0xff, 0xff, 0x1a);

    /// Slightly stronger axis lines through the field origin
    pub const AXIS_LINE: Color = Color::from_rgba8(0xff, 0xff, 0xff, 0x33);
}

/// Control point colors
pub mod point {
    use super::*;

    pub const ANCHOR: Color = ACCENT_PURPLE;
    pub const HANDLE: Color = ACCENT_PURPLE_DIM;
    pub const SELECTED_OUTLINE: Color = Color::WHITE;

    /// Dashed polyline connecting consecutive control points
    pub const CONNECTOR: Color = Color::from_rgba8(0xff, 0xff, 0xff, 0x33);
}

/// Trajectory and robot trace colors
pub mod trajectory {
    use super::*;

    pub const LINE: Color = ACCENT_BLUE;
    pub const TRACE: Color = Color::from_rgba8(0xff, 0x64, 0x32, 0x99);
}

/// Robot body colors
pub mod robot {
    use super::*;

    pub const BODY: Color = ACCENT_PINK;
    pub const OUTLINE: Color = ACCENT_PINK_DEEP;
    pub const HEADING: Color = ACCENT_GREEN;
}

/// Profile graph colors
pub mod graph {
    use super::*;

    pub const BACKGROUND: Color = BASE_B;
    pub const AXIS: Color = BASE_F;
    pub const VELOCITY: Color = ACCENT_BLUE;
    pub const ACCELERATION: Color = ACCENT_ORANGE;
    pub const JERK: Color = ACCENT_PINK;
}

/// Sidebar panel colors
pub mod panel {
    use super::*;

    pub const BACKGROUND: Color = BASE_C;
    pub const OUTLINE: Color = BASE_F;
}

/// UI text colors
pub mod text {
    use super::*;

    pub const PRIMARY: Color = BASE_N;
    pub const SECONDARY: Color = BASE_I;
    pub const ERROR: Color = ACCENT_PINK;
}

/// Marker sizes and stroke widths
pub mod size {
    /// Anchor point radius (every third control point)
    pub const ANCHOR_RADIUS: f64 = 6.0;

    /// Handle point radius
    pub const HANDLE_RADIUS: f64 = 4.0;

    /// Outline width around the selected point
    pub const SELECTED_OUTLINE_WIDTH: f64 = 2.0;

    pub const GRID_LINE_WIDTH: f64 = 1.0;
    pub const AXIS_LINE_WIDTH: f64 = 2.0;
    pub const CONNECTOR_WIDTH: f64 = 1.0;
    pub const TRAJECTORY_WIDTH: f64 = 3.0;
    pub const TRACE_WIDTH: f64 = 2.0;
    pub const ROBOT_OUTLINE_WIDTH: f64 = 2.0;
    pub const ROBOT_HEADING_WIDTH: f64 = 3.0;
    pub const GRAPH_LINE_WIDTH: f64 = 1.5;
    pub const GRAPH_VELOCITY_WIDTH: f64 = 2.0;

    /// Dash pattern for the control point connector [dash, gap]
    pub const CONNECTOR_DASH: [f64; 2] = [5.0, 5.0];
    pub const CONNECTOR_DASH_OFFSET: f64 = 0.0;
}
