// Copyright 2025 the Pathbender Authors
// SPDX-License-Identifier: Apache-2.0

//! Application settings and configuration constants.
//!
//! This module holds non-visual settings. Visual styling (colors, marker
//! sizes) belongs in `theme.rs`.

// ============================================================================
// FIELD SETTINGS
// ============================================================================
/// Lower bound of the field coordinate space (field units)
const FIELD_MIN: f64 = -72.0;

/// Upper bound of the field coordinate space (field units)
const FIELD_MAX: f64 = 72.0;

/// Grid line spacing (field units)
const FIELD_GRID_SPACING: f64 = 24.0;

// ============================================================================
// EDITOR SETTINGS
// ============================================================================
/// Hit radius for picking a control point (screen pixels)
const HIT_RADIUS: f64 = 10.0;

/// Default robot footprint (field units)
const ROBOT_WIDTH: f64 = 15.0;
const ROBOT_HEIGHT: f64 = 15.0;

// ============================================================================
// SIMULATION SETTINGS
// ============================================================================
/// Nominal animation tick rate (ticks per second)
const SIM_TICK_HZ: u64 = 60;

// ============================================================================
// PROFILE GRAPH SETTINGS
// ============================================================================
/// Point budget for the profile graph; longer profiles are downsampled
const GRAPH_MAX_POINTS: usize = 200;

// ============================================================================
// MOTION PROFILE DEFAULTS
// ============================================================================
const MAX_VEL: f64 = 60.0;
const MAX_ACCEL: f64 = 100.0;
const MAX_DECEL: f64 = 100.0;
const MAX_JERK: f64 = 500.0;

// ============================================================================
// CONTROLLER DEFAULTS
// ============================================================================
const KX: f64 = 1.5;
const KY: f64 = 3.0;
const KTHETA: f64 = 2.0;
const START_ANGLE_DEG: f64 = 0.0;
const MIN_LOOKAHEAD: f64 = 10.0;
const LOOKAHEAD_GAIN: f64 = 0.1;

// ============================================================================
// SERVER SETTINGS
// ============================================================================
/// Environment variable overriding the path service base URL
const SERVER_ENV_VAR: &str = "PATHBENDER_SERVER";

/// Default base URL of the path service
const SERVER_DEFAULT_URL: &str = "http://127.0.0.1:8000";

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Field coordinate space (square, Y up)
pub mod field {
    /// Lower bound of both axes (field units)
    pub const MIN: f64 = super::FIELD_MIN;

    /// Upper bound of both axes (field units)
    pub const MAX: f64 = super::FIELD_MAX;

    /// Side length of the field
    pub const SIZE: f64 = MAX - MIN;

    /// Grid line spacing
    pub const GRID_SPACING: f64 = super::FIELD_GRID_SPACING;
}

/// Editor interaction settings
pub mod editor {
    /// Hit radius for picking a control point (screen pixels)
    pub const HIT_RADIUS: f64 = super::HIT_RADIUS;
}

/// Robot footprint defaults (field units)
pub mod robot {
    pub const WIDTH: f64 = super::ROBOT_WIDTH;
    pub const HEIGHT: f64 = super::ROBOT_HEIGHT;
}

/// Simulation animation settings
pub mod sim {
    /// Nominal tick rate of the animation loop
    pub const TICK_HZ: u64 = super::SIM_TICK_HZ;
}

/// Profile graph settings
pub mod graph {
    /// Maximum number of points fed to the graph per series
    pub const MAX_POINTS: usize = super::GRAPH_MAX_POINTS;
}

/// Motion profile limit defaults; also the per-field fallbacks when loading
/// legacy path files
pub mod profile {
    pub const MAX_VEL: f64 = super::MAX_VEL;
    pub const MAX_ACCEL: f64 = super::MAX_ACCEL;
    pub const MAX_DECEL: f64 = super::MAX_DECEL;
    pub const MAX_JERK: f64 = super::MAX_JERK;
}

/// Controller gain and lookahead defaults
pub mod controller {
    pub const KX: f64 = super::KX;
    pub const KY: f64 = super::KY;
    pub const KTHETA: f64 = super::KTHETA;
    pub const START_ANGLE_DEG: f64 = super::START_ANGLE_DEG;
    pub const MIN_LOOKAHEAD: f64 = super::MIN_LOOKAHEAD;
    pub const LOOKAHEAD_GAIN: f64 = super::LOOKAHEAD_GAIN;
}

/// Path service location
pub mod server {
    /// Environment variable overriding the base URL
    pub const ENV_VAR: &str = super::SERVER_ENV_VAR;

    /// Default base URL
    pub const DEFAULT_URL: &str = super::SERVER_DEFAULT_URL;
}
