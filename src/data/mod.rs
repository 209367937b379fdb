// Copyright 2025 the Pathbender Authors
// SPDX-License-Identifier: Apache-2.0

//! Central application state (`AppState`) that drives the Xilem reactive UI.
//!
//! `AppState` owns the profile configuration, the controller parameters, the
//! generated trajectory and motion profile, and the simulation state
//! machine. Every UI rebuild reads from `AppState`; mutations happen in
//! event callbacks and propagate through the Xilem view tree. Network
//! results arrive as tagged events from the background tasks and anything
//! stale is discarded here, so the drag-vs-response races of the original
//! tool become an explicit, testable rule: last issued wins.

mod file_io;

use crate::field::FieldSession;
use crate::graph::ProfileSeries;
use crate::model::{
    ControlPoint, ControllerParams, ProfileConfig, ProfileKind, ProfilePoint, RobotPose,
};
use crate::remote::{HttpPathService, PathService, ProfileRequest, SimStartRequest};
use crate::sim::{SimulationController, StepDisposition};
use crate::tasks::{GenEvent, GenRequest, SimCommand, SimEvent};
use std::sync::{Arc, Mutex};
use xilem::WindowId;
use xilem::tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

/// Receiver parked until the matching background task takes it at build
/// time (the task closure only gets cloned captures, so the receiver rides
/// along behind a mutex).
pub type TaskInbox<T> = Arc<Mutex<Option<UnboundedReceiver<T>>>>;

/// Per-tick readouts shown in the sidebar.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Telemetry {
    pub velocity: f64,
    pub acceleration: f64,
    pub x: f64,
    pub y: f64,
}

/// Main application state
pub struct AppState {
    /// Everything the field canvas renders.
    pub session: FieldSession,

    /// Arc length of the current trajectory, as reported by the service.
    pub path_length: f64,

    /// Latest generated motion profile; replaced wholesale.
    pub profile: Vec<ProfilePoint>,

    /// Downsampled graph buffers derived from `profile`.
    pub graph: Arc<ProfileSeries>,

    /// Motion profile limits (sidebar sliders).
    pub profile_config: ProfileConfig,

    /// Controller gains and lookahead parameters (sidebar inputs).
    pub params: ControllerParams,

    /// Simulation run state machine.
    pub controller: SimulationController,

    /// Live readouts while a run is active.
    pub telemetry: Option<Telemetry>,

    /// Error message to display, if any
    pub error_message: Option<String>,

    /// When the file was last saved (formatted time string for UI)
    pub last_saved: Option<String>,

    /// Whether the app should keep running
    pub running: bool,

    /// Main window ID (stable across rebuilds to prevent window
    /// recreation)
    pub main_window_id: WindowId,

    /// Shared transport used by the background tasks.
    pub service: Arc<dyn PathService>,

    /// Inboxes the forked tasks take on first build.
    pub gen_inbox: TaskInbox<GenRequest>,
    pub sim_inbox: TaskInbox<SimCommand>,

    gen_tx: UnboundedSender<GenRequest>,
    sim_tx: UnboundedSender<SimCommand>,

    /// Latest issued sequence number per generation call class. Responses
    /// carrying anything older are stale and dropped.
    path_seq: u64,
    profile_seq: u64,
}

impl AppState {
    /// Create the application state talking to the configured service.
    pub fn new() -> Self {
        Self::with_service(Arc::new(HttpPathService::from_env()))
    }

    /// Create the application state over an arbitrary service (tests use
    /// stubs here).
    pub fn with_service(service: Arc<dyn PathService>) -> Self {
        let (gen_tx, gen_rx) = unbounded_channel();
        let (sim_tx, sim_rx) = unbounded_channel();
        Self {
            session: FieldSession::new(),
            path_length: 0.0,
            profile: Vec::new(),
            graph: Arc::new(ProfileSeries::default()),
            profile_config: ProfileConfig::default(),
            params: ControllerParams::default(),
            controller: SimulationController::new(),
            telemetry: None,
            error_message: None,
            last_saved: None,
            running: true,
            main_window_id: WindowId::next(),
            service,
            gen_inbox: Arc::new(Mutex::new(Some(gen_rx))),
            sim_inbox: Arc::new(Mutex::new(Some(sim_rx))),
            gen_tx,
            sim_tx,
            path_seq: 0,
            profile_seq: 0,
        }
    }

    // ========================================================================
    // PATH EDITING
    // ========================================================================

    /// Adopt the canvas widget's session after a pointer edit and kick off
    /// regeneration.
    pub fn update_field_session(&mut self, session: FieldSession) {
        self.session = session;
        self.path_changed();
    }

    /// The control points changed; regenerate everything derived from them.
    ///
    /// With fewer than two points there is nothing to generate: the
    /// trajectory is dropped and no request goes out.
    pub fn path_changed(&mut self) {
        if self.session.path.len() < 2 {
            self.session.set_trajectory(Vec::new());
            self.path_length = 0.0;
            return;
        }

        self.path_seq += 1;
        let request = GenRequest::Path {
            seq: self.path_seq,
            points: self.session.path.points().to_vec(),
        };
        if self.gen_tx.send(request).is_err() {
            tracing::error!("Generation worker is gone");
        }
    }

    /// Regenerate the motion profile for the current path length. Skipped
    /// silently while there is no path to profile.
    pub fn request_profile(&mut self) {
        if self.path_length <= 0.0 {
            tracing::debug!("No path length yet, profile generation skipped");
            return;
        }

        self.profile_seq += 1;
        let request = GenRequest::Profile {
            seq: self.profile_seq,
            request: ProfileRequest::new(self.path_length, &self.profile_config),
        };
        if self.gen_tx.send(request).is_err() {
            tracing::error!("Generation worker is gone");
        }
    }

    /// Apply a generation result, discarding anything stale.
    pub fn apply_gen_event(&mut self, event: GenEvent) {
        match event {
            GenEvent::Path { seq, result } => {
                if seq != self.path_seq {
                    tracing::debug!("Discarding stale path response (seq {seq})");
                    return;
                }
                match result {
                    Ok(response) => {
                        self.session.set_trajectory(response.trajectory);
                        self.path_length = response.length;
                        self.request_profile();
                    }
                    Err(e) => tracing::error!("Failed to generate path: {e}"),
                }
            }
            GenEvent::Profile { seq, result } => {
                if seq != self.profile_seq {
                    tracing::debug!("Discarding stale profile response (seq {seq})");
                    return;
                }
                match result {
                    Ok(response) => {
                        self.profile = response.profile;
                        self.graph = Arc::new(ProfileSeries::from_profile(&self.profile));
                    }
                    Err(e) => tracing::error!("Failed to generate profile: {e}"),
                }
            }
        }
    }

    /// Write the selected point from the sidebar coordinate editor.
    pub fn edit_selected_point(&mut self, x: f64, y: f64) {
        let Some(index) = self.session.path.selected() else {
            return;
        };
        self.session.path.set_point(index, ControlPoint::new(x, y));
        self.path_changed();
    }

    /// Drop the drawn path and everything derived from it.
    pub fn clear_path(&mut self) {
        self.session.clear();
        self.path_changed();
    }

    // ========================================================================
    // PROFILE CONFIG
    // ========================================================================

    pub fn set_profile_kind(&mut self, kind: ProfileKind) {
        self.profile_config.kind = kind;
        self.request_profile();
    }

    /// Profile limits must stay positive; anything else is ignored.
    pub fn set_profile_limit(&mut self, set: impl Fn(&mut ProfileConfig, f64), value: f64) {
        if value > 0.0 {
            set(&mut self.profile_config, value);
            self.request_profile();
        }
    }

    // ========================================================================
    // SIMULATION
    // ========================================================================

    /// Where a run starts: the first control point (or the field origin)
    /// with the configured start heading.
    pub fn start_pose(&self) -> RobotPose {
        let (x, y) = match self.session.path.first() {
            Some(pt) => (pt.x, pt.y),
            None => (0.0, 0.0),
        };
        RobotPose {
            x,
            y,
            theta: self.params.start_heading(),
        }
    }

    /// Begin a simulation run. A no-op while one is running or when there
    /// is no trajectory to follow.
    pub fn start_simulation(&mut self) {
        let have_trajectory = !self.session.trajectory.is_empty();
        let Some(run_id) = self.controller.try_begin(have_trajectory) else {
            return;
        };

        let start = self.start_pose();
        let request = SimStartRequest {
            trajectory: (*self.session.trajectory).clone(),
            profile: self.profile.clone(),
            path_length: self.path_length,
            params: self.params,
            start_pose: [start.x, start.y, start.theta],
        };

        tracing::info!("Starting simulation run {run_id}");
        let command = SimCommand::Start {
            run_id,
            request: Box::new(request),
        };
        if self.sim_tx.send(command).is_err() {
            tracing::error!("Simulation ticker is gone");
            self.controller.cancel();
        }
    }

    /// Apply one event from the ticker task.
    pub fn apply_sim_event(&mut self, event: SimEvent) {
        match event {
            SimEvent::Started { run_id } => {
                if self.controller.is_current(run_id) && self.controller.is_running() {
                    self.session.clear_trace();
                }
            }
            SimEvent::StartFailed { run_id, error } => {
                self.controller.start_failed(run_id);
                tracing::error!("Simulation start failed: {error}");
                self.error_message = Some(format!("Failed to start simulation: {error}"));
            }
            SimEvent::Step { run_id, response } => {
                match self.controller.apply_step(run_id, &response) {
                    StepDisposition::Stale => {}
                    StepDisposition::Finished => {
                        tracing::info!("Simulation run {run_id} finished");
                    }
                    StepDisposition::Advanced(state) => {
                        self.session.set_robot_pose(RobotPose {
                            x: state.x,
                            y: state.y,
                            theta: state.theta,
                        });
                        self.telemetry = Some(Telemetry {
                            velocity: state.velocity,
                            acceleration: state.acceleration,
                            x: state.x,
                            y: state.y,
                        });
                    }
                }
            }
        }
    }

    /// Stop any run, reset the remote simulation, and re-pose the robot at
    /// the start of the path.
    pub fn reset_simulation(&mut self) {
        self.controller.cancel();
        if self.sim_tx.send(SimCommand::Reset).is_err() {
            tracing::error!("Simulation ticker is gone");
        }
        self.session.clear_trace();
        self.telemetry = None;
        self.session.robot_pose = self.start_pose();
    }
}

/// Implement the Xilem AppState trait
impl xilem::AppState for AppState {
    fn keep_running(&self) -> bool {
        self.running
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TrajectoryPoint;
    use crate::remote::{
        PathResponse, PathService, ProfileResponse, ServiceError, SimStepResponse,
    };
    use crate::sim::SimPhase;

    /// Stub transport; state tests route everything through channels, so
    /// none of these methods are ever reached.
    struct StubService;

    impl PathService for StubService {
        fn generate_path(
            &self,
            _points: &[ControlPoint],
        ) -> Result<PathResponse, ServiceError> {
            unreachable!("state tests never call the service directly")
        }

        fn generate_profile(
            &self,
            _request: &ProfileRequest,
        ) -> Result<ProfileResponse, ServiceError> {
            unreachable!()
        }

        fn start_sim(&self, _request: &SimStartRequest) -> Result<(), ServiceError> {
            unreachable!()
        }

        fn step_sim(&self) -> Result<SimStepResponse, ServiceError> {
            unreachable!()
        }

        fn reset_sim(&self) -> Result<(), ServiceError> {
            unreachable!()
        }
    }

    fn state() -> AppState {
        AppState::with_service(Arc::new(StubService))
    }

    fn take_gen_request(state: &AppState) -> Option<GenRequest> {
        state
            .gen_inbox
            .lock()
            .unwrap()
            .as_mut()
            .and_then(|rx| rx.try_recv().ok())
    }

    fn take_sim_command(state: &AppState) -> Option<SimCommand> {
        state
            .sim_inbox
            .lock()
            .unwrap()
            .as_mut()
            .and_then(|rx| rx.try_recv().ok())
    }

    fn four_point_path(state: &mut AppState) {
        for &(x, y) in &[(0.0, 0.0), (10.0, 0.0), (20.0, 10.0), (30.0, 10.0)] {
            state.session.path.add_point(kurbo::Point::new(x, y));
        }
    }

    fn two_point_trajectory() -> Vec<TrajectoryPoint> {
        vec![
            TrajectoryPoint {
                x: 0.0,
                y: 0.0,
                theta: 0.0,
                distance: 0.0,
                velocity: 0.0,
                curvature: 0.0,
            },
            TrajectoryPoint {
                x: 30.0,
                y: 10.0,
                theta: 0.3,
                distance: 30.0,
                velocity: 0.0,
                curvature: 0.0,
            },
        ]
    }

    #[test]
    fn path_generation_feeds_profile_generation() {
        let mut state = state();
        four_point_path(&mut state);
        state.path_changed();

        let Some(GenRequest::Path { seq, points }) = take_gen_request(&state) else {
            panic!("expected a path request");
        };
        assert_eq!(points.len(), 4);

        state.apply_gen_event(GenEvent::Path {
            seq,
            result: Ok(PathResponse {
                trajectory: two_point_trajectory(),
                length: 30.0,
            }),
        });

        assert_eq!(state.path_length, 30.0);
        assert_eq!(state.session.trajectory.len(), 2);

        let Some(GenRequest::Profile { request, .. }) = take_gen_request(&state) else {
            panic!("expected a profile request");
        };
        assert_eq!(request.path_length, 30.0);
    }

    #[test]
    fn stale_path_responses_are_discarded() {
        let mut state = state();
        four_point_path(&mut state);
        state.path_changed();
        let first_seq = match take_gen_request(&state) {
            Some(GenRequest::Path { seq, .. }) => seq,
            other => panic!("unexpected request {other:?}"),
        };
        state.path_changed();
        let second_seq = match take_gen_request(&state) {
            Some(GenRequest::Path { seq, .. }) => seq,
            other => panic!("unexpected request {other:?}"),
        };
        assert!(second_seq > first_seq);

        // The slow, older response resolves after the newer one
        state.apply_gen_event(GenEvent::Path {
            seq: second_seq,
            result: Ok(PathResponse {
                trajectory: two_point_trajectory(),
                length: 30.0,
            }),
        });
        state.apply_gen_event(GenEvent::Path {
            seq: first_seq,
            result: Ok(PathResponse {
                trajectory: Vec::new(),
                length: 99.0,
            }),
        });

        assert_eq!(state.path_length, 30.0);
        assert_eq!(state.session.trajectory.len(), 2);
    }

    #[test]
    fn short_paths_clear_the_trajectory_without_a_request() {
        let mut state = state();
        state.session.set_trajectory(two_point_trajectory());
        state.path_length = 30.0;
        state.session.path.add_point(kurbo::Point::new(0.0, 0.0));

        state.path_changed();

        assert!(state.session.trajectory.is_empty());
        assert_eq!(state.path_length, 0.0);
        assert!(take_gen_request(&state).is_none());
    }

    #[test]
    fn profile_generation_needs_a_path_length() {
        let mut state = state();
        state.request_profile();
        assert!(take_gen_request(&state).is_none());
    }

    #[test]
    fn generation_failure_aborts_the_chain() {
        let mut state = state();
        four_point_path(&mut state);
        state.path_changed();
        let seq = match take_gen_request(&state) {
            Some(GenRequest::Path { seq, .. }) => seq,
            other => panic!("unexpected request {other:?}"),
        };

        state.apply_gen_event(GenEvent::Path {
            seq,
            result: Err("connection refused".into()),
        });

        assert_eq!(state.path_length, 0.0);
        assert!(take_gen_request(&state).is_none());
    }

    #[test]
    fn start_needs_a_trajectory() {
        let mut state = state();
        state.start_simulation();
        assert_eq!(state.controller.phase(), SimPhase::Idle);
        assert!(take_sim_command(&state).is_none());
    }

    #[test]
    fn start_sends_one_command_per_run() {
        let mut state = state();
        four_point_path(&mut state);
        state.session.set_trajectory(two_point_trajectory());
        state.path_length = 30.0;

        state.start_simulation();
        assert!(state.controller.is_running());
        let Some(SimCommand::Start { request, .. }) = take_sim_command(&state) else {
            panic!("expected a start command");
        };
        assert_eq!(request.path_length, 30.0);
        assert_eq!(request.start_pose[0], 0.0);

        // Starting again while running is rejected, not queued
        state.start_simulation();
        assert!(take_sim_command(&state).is_none());
    }

    #[test]
    fn steps_drive_pose_trace_and_telemetry() {
        let mut state = state();
        four_point_path(&mut state);
        state.session.set_trajectory(two_point_trajectory());
        state.start_simulation();
        let run_id = match take_sim_command(&state) {
            Some(SimCommand::Start { run_id, .. }) => run_id,
            other => panic!("unexpected command {other:?}"),
        };

        state.apply_sim_event(SimEvent::Started { run_id });
        assert!(state.session.robot_trace.is_empty());

        state.apply_sim_event(SimEvent::Step {
            run_id,
            response: SimStepResponse {
                running: true,
                state: Some(crate::remote::SimState {
                    x: 5.0,
                    y: 6.0,
                    theta: 0.2,
                    velocity: 12.0,
                    acceleration: 3.0,
                    jerk: 0.0,
                    time: 0.5,
                }),
            },
        });

        assert_eq!(state.session.robot_pose.x, 5.0);
        assert_eq!(state.session.robot_trace.len(), 1);
        let telemetry = state.telemetry.unwrap();
        assert_eq!(telemetry.velocity, 12.0);

        // Terminal response ends the run
        state.apply_sim_event(SimEvent::Step {
            run_id,
            response: SimStepResponse::terminal(),
        });
        assert_eq!(state.controller.phase(), SimPhase::Idle);
    }

    #[test]
    fn reset_reposes_the_robot_at_the_path_start() {
        let mut state = state();
        four_point_path(&mut state);
        state.session.set_trajectory(two_point_trajectory());
        state.params.start_angle_deg = 90.0;
        state.start_simulation();

        state.reset_simulation();

        assert_eq!(state.controller.phase(), SimPhase::Idle);
        assert!(state.session.robot_trace.is_empty());
        assert!(state.telemetry.is_none());
        assert_eq!(state.session.robot_pose.x, 0.0);
        assert!((state.session.robot_pose.theta - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        // Start command, then the reset command
        assert!(matches!(
            take_sim_command(&state),
            Some(SimCommand::Start { .. })
        ));
        assert!(matches!(take_sim_command(&state), Some(SimCommand::Reset)));
    }

    #[test]
    fn profile_limits_reject_non_positive_values() {
        let mut state = state();
        state.path_length = 30.0;
        state.set_profile_limit(|c, v| c.max_vel = v, -5.0);
        assert_eq!(state.profile_config.max_vel, 60.0);
        assert!(take_gen_request(&state).is_none());

        state.set_profile_limit(|c, v| c.max_vel = v, 45.0);
        assert_eq!(state.profile_config.max_vel, 45.0);
        assert!(matches!(
            take_gen_request(&state),
            Some(GenRequest::Profile { .. })
        ));
    }
}
