// Copyright 2025 the Pathbender Authors
// SPDX-License-Identifier: Apache-2.0

//! Client for the network-resident path service.
//!
//! Curve generation, motion-profile shaping, and simulation stepping all
//! happen on the server; this module is the complete request/response
//! surface the rest of the app sees. Everything goes through the
//! [`PathService`] trait so the controller and session logic can be tested
//! against stubs with no transport underneath.

use crate::model::{
    ControlPoint, ControllerParams, ProfileConfig, ProfileKind, ProfilePoint, TrajectoryPoint,
};
use crate::settings;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Transport or protocol failure talking to the path service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("path service request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

// ============================================================================
// WIRE TYPES
// ============================================================================

#[derive(Debug, Serialize)]
struct PathRequest<'a> {
    control_points: &'a [ControlPoint],
}

/// Trajectory produced from the current control points.
#[derive(Debug, Clone, Deserialize)]
pub struct PathResponse {
    pub trajectory: Vec<TrajectoryPoint>,
    pub length: f64,
}

/// Inputs to motion-profile generation.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileRequest {
    pub path_length: f64,
    #[serde(rename = "type")]
    pub kind: ProfileKind,
    pub max_vel: f64,
    pub max_accel: f64,
    pub max_decel: f64,
    pub max_jerk: f64,
}

impl ProfileRequest {
    pub fn new(path_length: f64, config: &ProfileConfig) -> Self {
        Self {
            path_length,
            kind: config.kind,
            max_vel: config.max_vel,
            max_accel: config.max_accel,
            max_decel: config.max_decel,
            max_jerk: config.max_jerk,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    pub profile: Vec<ProfilePoint>,
}

/// Everything the simulation needs to begin a run.
#[derive(Debug, Clone, Serialize)]
pub struct SimStartRequest {
    pub trajectory: Vec<TrajectoryPoint>,
    pub profile: Vec<ProfilePoint>,
    pub path_length: f64,
    pub params: ControllerParams,
    /// `[x, y, theta_rad]`
    pub start_pose: [f64; 3],
}

/// Instantaneous robot state reported by a simulation step.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SimState {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
    #[serde(default)]
    pub velocity: f64,
    #[serde(default)]
    pub acceleration: f64,
    #[serde(default)]
    pub jerk: f64,
    #[serde(default)]
    pub time: f64,
}

/// One step response; `state` is absent once the run has finished.
#[derive(Debug, Clone, Deserialize)]
pub struct SimStepResponse {
    pub running: bool,
    #[serde(default)]
    pub state: Option<SimState>,
}

impl SimStepResponse {
    /// The synthetic terminal response substituted for a failed step.
    pub fn terminal() -> Self {
        Self {
            running: false,
            state: None,
        }
    }
}

// ============================================================================
// SERVICE TRAIT
// ============================================================================

/// The full remote contract, abstract over transport.
pub trait PathService: Send + Sync {
    fn generate_path(&self, points: &[ControlPoint]) -> Result<PathResponse, ServiceError>;

    fn generate_profile(&self, request: &ProfileRequest) -> Result<ProfileResponse, ServiceError>;

    fn start_sim(&self, request: &SimStartRequest) -> Result<(), ServiceError>;

    fn step_sim(&self) -> Result<SimStepResponse, ServiceError>;

    fn reset_sim(&self) -> Result<(), ServiceError>;
}

// ============================================================================
// HTTP CLIENT
// ============================================================================

/// Blocking HTTP client for the path service. Always driven from worker
/// tasks, never the UI thread.
pub struct HttpPathService {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpPathService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    /// Base URL from `PATHBENDER_SERVER`, falling back to localhost.
    pub fn from_env() -> Self {
        let base_url = std::env::var(settings::server::ENV_VAR)
            .unwrap_or_else(|_| settings::server::DEFAULT_URL.to_string());
        tracing::info!("Path service: {}", base_url);
        Self::new(base_url)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

impl PathService for HttpPathService {
    fn generate_path(&self, points: &[ControlPoint]) -> Result<PathResponse, ServiceError> {
        let response = self
            .client
            .post(self.url("/api/path/generate"))
            .json(&PathRequest {
                control_points: points,
            })
            .send()?
            .error_for_status()?;
        Ok(response.json()?)
    }

    fn generate_profile(&self, request: &ProfileRequest) -> Result<ProfileResponse, ServiceError> {
        let response = self
            .client
            .post(self.url("/api/motion/profile"))
            .json(request)
            .send()?
            .error_for_status()?;
        Ok(response.json()?)
    }

    fn start_sim(&self, request: &SimStartRequest) -> Result<(), ServiceError> {
        self.client
            .post(self.url("/api/sim/start"))
            .json(request)
            .send()?
            .error_for_status()?;
        Ok(())
    }

    fn step_sim(&self) -> Result<SimStepResponse, ServiceError> {
        let response = self
            .client
            .post(self.url("/api/sim/step"))
            .send()?
            .error_for_status()?;
        Ok(response.json()?)
    }

    fn reset_sim(&self) -> Result<(), ServiceError> {
        self.client
            .post(self.url("/api/sim/reset"))
            .send()?
            .error_for_status()?;
        Ok(())
    }
}
