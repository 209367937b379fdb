// Copyright 2025 the Pathbender Authors
// SPDX-License-Identifier: Apache-2.0

//! Core data types shared across the editor, the remote client, and the
//! persistence codec.
//!
//! Serde field names follow the wire format of the path service and the
//! path-file schemas, which is why some structs mix snake_case and
//! camelCase.

use crate::settings;
use serde::{Deserialize, Serialize};

/// A user-placed control point in field units.
///
/// Every third point (index `i % 3 == 0`) is an anchor of the composite
/// curve; the points in between act as Bezier-style shape handles. That is
/// a rendering and editing convention only, nothing structural.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub x: f64,
    pub y: f64,
}

impl ControlPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates clamped independently to the field extent.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(settings::field::MIN, settings::field::MAX),
            y: self.y.clamp(settings::field::MIN, settings::field::MAX),
        }
    }

    pub fn to_point(self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }
}

impl From<kurbo::Point> for ControlPoint {
    fn from(p: kurbo::Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// One sample of the service-generated trajectory.
///
/// The service omits `velocity` (and leaves `curvature` zero at the ends),
/// so both default when absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
    pub distance: f64,
    #[serde(default)]
    pub velocity: f64,
    #[serde(default)]
    pub curvature: f64,
}

/// One sample of the service-generated motion profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    pub time: f64,
    #[serde(default)]
    pub velocity: f64,
    #[serde(default)]
    pub acceleration: f64,
    #[serde(default)]
    pub jerk: f64,
}

/// Robot pose on the field, theta in radians (0 = field "up").
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RobotPose {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
}

impl RobotPose {
    pub const ORIGIN: RobotPose = RobotPose {
        x: 0.0,
        y: 0.0,
        theta: 0.0,
    };
}

impl Default for RobotPose {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// Shape of the motion profile the service should generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileKind {
    #[serde(rename = "trapezoidal")]
    Trapezoidal,
    #[serde(rename = "s-curve")]
    SCurve,
}

impl ProfileKind {
    /// Wire name, also used in saved files.
    pub fn as_str(self) -> &'static str {
        match self {
            ProfileKind::Trapezoidal => "trapezoidal",
            ProfileKind::SCurve => "s-curve",
        }
    }

    /// Parse a wire name, falling back to trapezoidal for anything
    /// unrecognized (legacy files carry free-form strings here).
    pub fn parse_lossy(s: &str) -> Self {
        match s {
            "s-curve" => ProfileKind::SCurve,
            _ => ProfileKind::Trapezoidal,
        }
    }
}

impl Default for ProfileKind {
    fn default() -> Self {
        ProfileKind::Trapezoidal
    }
}

/// Motion profile limits, mutated by the sidebar and persisted in path
/// files. Field names match the new path-file schema.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(rename = "type")]
    pub kind: ProfileKind,
    #[serde(rename = "maxVel")]
    pub max_vel: f64,
    #[serde(rename = "maxAccel")]
    pub max_accel: f64,
    #[serde(rename = "maxDecel")]
    pub max_decel: f64,
    #[serde(rename = "maxJerk")]
    pub max_jerk: f64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            kind: ProfileKind::default(),
            max_vel: settings::profile::MAX_VEL,
            max_accel: settings::profile::MAX_ACCEL,
            max_decel: settings::profile::MAX_DECEL,
            max_jerk: settings::profile::MAX_JERK,
        }
    }
}

/// Tracking controller gains and lookahead parameters, passed verbatim to
/// the simulation service and persisted in the new path-file schema.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerParams {
    pub kx: f64,
    pub ky: f64,
    pub ktheta: f64,
    #[serde(rename = "startAngle")]
    pub start_angle_deg: f64,
    #[serde(default = "default_min_lookahead")]
    pub min_lookahead: f64,
    #[serde(default = "default_lookahead_gain")]
    pub lookahead_gain: f64,
}

fn default_min_lookahead() -> f64 {
    settings::controller::MIN_LOOKAHEAD
}

fn default_lookahead_gain() -> f64 {
    settings::controller::LOOKAHEAD_GAIN
}

impl ControllerParams {
    /// Configured start heading in radians.
    pub fn start_heading(&self) -> f64 {
        self.start_angle_deg.to_radians()
    }
}

impl Default for ControllerParams {
    fn default() -> Self {
        Self {
            kx: settings::controller::KX,
            ky: settings::controller::KY,
            ktheta: settings::controller::KTHETA,
            start_angle_deg: settings::controller::START_ANGLE_DEG,
            min_lookahead: settings::controller::MIN_LOOKAHEAD,
            lookahead_gain: settings::controller::LOOKAHEAD_GAIN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_stays_inside_field() {
        let pt = ControlPoint::new(-500.0, 90.0).clamped();
        assert_eq!(pt.x, settings::field::MIN);
        assert_eq!(pt.y, settings::field::MAX);

        let inside = ControlPoint::new(10.0, -3.5).clamped();
        assert_eq!(inside, ControlPoint::new(10.0, -3.5));
    }

    #[test]
    fn profile_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&ProfileKind::SCurve).unwrap(),
            "\"s-curve\""
        );
        assert_eq!(ProfileKind::parse_lossy("s-curve"), ProfileKind::SCurve);
        assert_eq!(
            ProfileKind::parse_lossy("garbage"),
            ProfileKind::Trapezoidal
        );
    }

    #[test]
    fn controller_params_wire_names() {
        let params = ControllerParams {
            start_angle_deg: 90.0,
            ..Default::default()
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["startAngle"], 90.0);
        assert_eq!(json["min_lookahead"], 10.0);
        assert!((params.start_heading() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn trajectory_point_velocity_defaults() {
        let pt: TrajectoryPoint = serde_json::from_str(
            r#"{"x":1.0,"y":2.0,"theta":0.5,"distance":3.0,"curvature":0.0}"#,
        )
        .unwrap();
        assert_eq!(pt.velocity, 0.0);
    }
}
