// Copyright 2025 the Pathbender Authors
// SPDX-License-Identifier: Apache-2.0

//! Path-file codec.
//!
//! Two schemas exist in the wild. The original desktop tool wrote
//! `control_points` (snake_case) with an optional `motion_profile` block;
//! a later tool generation wrote `controlPoints` (camelCase) with whole
//! `params` / `profileConfig` objects. Loading branches on which marker
//! field is present; saving always emits the rich snake_case schema.
//!
//! Legacy `motion_profile` blocks default field-by-field. New-schema
//! `params` / `profileConfig` replace the in-memory state wholesale when
//! present and leave it untouched when absent.

use crate::model::{
    ControlPoint, ControllerParams, ProfileConfig, ProfileKind, ProfilePoint, TrajectoryPoint,
};
use crate::settings;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Version string stamped into saved files. Not interpreted on load.
const FILE_VERSION: &str = "1.2";

#[derive(Debug, Error)]
pub enum PersistError {
    /// Neither schema's marker field was found.
    #[error("unrecognized path file format")]
    UnknownFormat,
    #[error("malformed path file: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Complete editor state written on save.
#[derive(Debug, Clone, PartialEq)]
pub struct PathDocument {
    pub control_points: Vec<ControlPoint>,
    pub trajectory: Vec<TrajectoryPoint>,
    pub profile: Vec<ProfilePoint>,
    pub path_length: f64,
    pub profile_config: ProfileConfig,
    pub params: ControllerParams,
}

/// What a load produces. `profile_config` / `params` are `None` when the
/// file's schema does not carry them; the caller keeps its current values.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub control_points: Vec<ControlPoint>,
    pub trajectory: Vec<TrajectoryPoint>,
    pub profile: Vec<ProfilePoint>,
    pub profile_config: Option<ProfileConfig>,
    pub params: Option<ControllerParams>,
}

// ============================================================================
// SAVE SCHEMA
// ============================================================================

#[derive(Serialize)]
struct FileMetadata<'a> {
    version: &'a str,
    path_length: f64,
    profile_type: &'a str,
}

#[derive(Serialize)]
struct MotionProfileOut<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    max_speed: f64,
    max_acceleration: f64,
    max_deceleration: f64,
    max_jerk: f64,
    profile_points: &'a [ProfilePoint],
}

#[derive(Serialize)]
struct FileOut<'a> {
    metadata: FileMetadata<'a>,
    control_points: &'a [ControlPoint],
    trajectory: &'a [TrajectoryPoint],
    motion_profile: MotionProfileOut<'a>,
    params: &'a ControllerParams,
}

/// Serialize a document to the canonical schema, human-indented.
pub fn encode(doc: &PathDocument) -> Result<String, PersistError> {
    let config = &doc.profile_config;
    let out = FileOut {
        metadata: FileMetadata {
            version: FILE_VERSION,
            path_length: doc.path_length,
            profile_type: config.kind.as_str(),
        },
        control_points: &doc.control_points,
        trajectory: &doc.trajectory,
        motion_profile: MotionProfileOut {
            kind: config.kind.as_str(),
            max_speed: config.max_vel,
            max_acceleration: config.max_accel,
            max_deceleration: config.max_decel,
            max_jerk: config.max_jerk,
            profile_points: &doc.profile,
        },
        params: &doc.params,
    };
    Ok(serde_json::to_string_pretty(&out)?)
}

// ============================================================================
// LOAD SCHEMAS
// ============================================================================

#[derive(Deserialize)]
struct LegacyFile {
    control_points: Vec<ControlPoint>,
    #[serde(default)]
    trajectory: Vec<TrajectoryPoint>,
    #[serde(default)]
    motion_profile: Option<LegacyMotionProfile>,
}

#[derive(Deserialize)]
struct LegacyMotionProfile {
    #[serde(rename = "type")]
    kind: Option<String>,
    max_speed: Option<f64>,
    max_acceleration: Option<f64>,
    max_deceleration: Option<f64>,
    max_jerk: Option<f64>,
    #[serde(default)]
    profile_points: Vec<ProfilePoint>,
}

#[derive(Deserialize)]
struct CurrentFile {
    #[serde(rename = "controlPoints")]
    control_points: Vec<ControlPoint>,
    #[serde(default)]
    params: Option<ControllerParams>,
    #[serde(rename = "profileConfig", default)]
    profile_config: Option<ProfileConfig>,
}

/// Decode either schema into a canonical document.
pub fn decode(json: &str) -> Result<LoadedDocument, PersistError> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    if value.get("control_points").is_some() {
        let file: LegacyFile = serde_json::from_value(value)?;
        tracing::info!("Loaded legacy path file format");
        return Ok(decode_legacy(file));
    }

    if value.get("controlPoints").is_some() {
        let file: CurrentFile = serde_json::from_value(value)?;
        return Ok(LoadedDocument {
            control_points: file.control_points,
            trajectory: Vec::new(),
            profile: Vec::new(),
            profile_config: file.profile_config,
            params: file.params,
        });
    }

    Err(PersistError::UnknownFormat)
}

fn decode_legacy(file: LegacyFile) -> LoadedDocument {
    let (profile_config, profile) = match file.motion_profile {
        Some(mp) => {
            let config = ProfileConfig {
                kind: mp
                    .kind
                    .as_deref()
                    .map(ProfileKind::parse_lossy)
                    .unwrap_or_default(),
                max_vel: mp.max_speed.unwrap_or(settings::profile::MAX_VEL),
                max_accel: mp.max_acceleration.unwrap_or(settings::profile::MAX_ACCEL),
                max_decel: mp.max_deceleration.unwrap_or(settings::profile::MAX_DECEL),
                max_jerk: mp.max_jerk.unwrap_or(settings::profile::MAX_JERK),
            };
            (Some(config), mp.profile_points)
        }
        None => (None, Vec::new()),
    };

    LoadedDocument {
        control_points: file.control_points,
        trajectory: file.trajectory,
        profile,
        profile_config,
        // This schema never carried controller params
        params: None,
    }
}

// ============================================================================
// FILE HELPERS
// ============================================================================

pub fn save_to_file(path: &Path, doc: &PathDocument) -> Result<(), PersistError> {
    std::fs::write(path, encode(doc)?)?;
    Ok(())
}

pub fn load_from_file(path: &Path) -> Result<LoadedDocument, PersistError> {
    decode(&std::fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> PathDocument {
        PathDocument {
            control_points: vec![
                ControlPoint::new(0.0, 0.0),
                ControlPoint::new(10.0, 0.0),
                ControlPoint::new(20.0, 10.0),
                ControlPoint::new(30.0, 10.0),
            ],
            trajectory: vec![
                TrajectoryPoint {
                    x: 0.0,
                    y: 0.0,
                    theta: 1.1,
                    distance: 0.0,
                    velocity: 0.0,
                    curvature: 0.0,
                },
                TrajectoryPoint {
                    x: 30.0,
                    y: 10.0,
                    theta: 1.2,
                    distance: 30.0,
                    velocity: 0.0,
                    curvature: 0.02,
                },
            ],
            profile: vec![ProfilePoint {
                time: 0.0,
                velocity: 0.0,
                acceleration: 100.0,
                jerk: 0.0,
            }],
            path_length: 30.0,
            profile_config: ProfileConfig {
                kind: ProfileKind::SCurve,
                max_vel: 48.0,
                max_accel: 90.0,
                max_decel: 80.0,
                max_jerk: 400.0,
            },
            params: ControllerParams {
                kx: 2.0,
                ..Default::default()
            },
        }
    }

    #[test]
    fn save_then_load_round_trips_through_the_legacy_branch() {
        let doc = sample_document();
        let loaded = decode(&encode(&doc).unwrap()).unwrap();

        assert_eq!(loaded.control_points, doc.control_points);
        assert_eq!(loaded.trajectory, doc.trajectory);
        assert_eq!(loaded.profile, doc.profile);
        assert_eq!(loaded.profile_config, Some(doc.profile_config));
        // The emitted schema's marker is `control_points`, and that branch
        // never restores controller params
        assert_eq!(loaded.params, None);
    }

    #[test]
    fn output_is_indented() {
        let text = encode(&sample_document()).unwrap();
        assert!(text.contains('\n'));
        assert!(text.contains("\"metadata\""));
        assert!(text.contains("\"profile_type\": \"s-curve\""));
        assert!(text.contains("\"max_speed\": 48.0"));
    }

    #[test]
    fn legacy_motion_profile_defaults_missing_fields() {
        let json = r#"{
            "control_points": [{"x": 1.0, "y": 2.0}],
            "motion_profile": {
                "type": "trapezoidal",
                "max_speed": 42.0
            }
        }"#;
        let loaded = decode(json).unwrap();
        let config = loaded.profile_config.unwrap();
        assert_eq!(config.max_vel, 42.0);
        assert_eq!(config.max_accel, 100.0);
        assert_eq!(config.max_decel, 100.0);
        assert_eq!(config.max_jerk, 500.0);
        assert_eq!(config.kind, ProfileKind::Trapezoidal);
    }

    #[test]
    fn legacy_without_motion_profile_keeps_config_unset() {
        let json = r#"{"control_points": [{"x": 0.0, "y": 0.0}]}"#;
        let loaded = decode(json).unwrap();
        assert_eq!(loaded.profile_config, None);
        assert_eq!(loaded.params, None);
        assert!(loaded.trajectory.is_empty());
    }

    #[test]
    fn current_schema_replaces_wholesale() {
        let json = r#"{
            "controlPoints": [{"x": -5.0, "y": 5.0}],
            "params": {
                "kx": 9.0, "ky": 8.0, "ktheta": 7.0, "startAngle": 45.0,
                "min_lookahead": 12.0, "lookahead_gain": 0.2
            },
            "profileConfig": {
                "type": "s-curve", "maxVel": 10.0, "maxAccel": 20.0,
                "maxDecel": 30.0, "maxJerk": 40.0
            }
        }"#;
        let loaded = decode(json).unwrap();
        assert_eq!(loaded.control_points, vec![ControlPoint::new(-5.0, 5.0)]);
        let params = loaded.params.unwrap();
        assert_eq!(params.kx, 9.0);
        assert_eq!(params.start_angle_deg, 45.0);
        let config = loaded.profile_config.unwrap();
        assert_eq!(config.kind, ProfileKind::SCurve);
        assert_eq!(config.max_jerk, 40.0);
    }

    #[test]
    fn current_schema_without_params_leaves_them_alone() {
        let json = r#"{"controlPoints": [{"x": 0.0, "y": 0.0}]}"#;
        let loaded = decode(json).unwrap();
        assert_eq!(loaded.params, None);
        assert_eq!(loaded.profile_config, None);
    }

    #[test]
    fn unknown_format_is_an_error() {
        let err = decode(r#"{"points": []}"#).unwrap_err();
        assert!(matches!(err, PersistError::UnknownFormat));
    }

    #[test]
    fn garbage_is_a_json_error() {
        let err = decode("not json at all").unwrap_err();
        assert!(matches!(err, PersistError::Json(_)));
    }
}
