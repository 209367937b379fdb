// Copyright 2025 the Pathbender Authors
// SPDX-License-Identifier: Apache-2.0

//! Simulation run state machine.
//!
//! The controller lives on the UI loop and decides what every simulation
//! event means; the 60 Hz ticker task (`tasks::simulation_ticker`) only does
//! transport. Each run gets a fresh id, every event carries the id of the
//! run that produced it, and anything tagged with a stale id is discarded.
//! That makes cancellation race-free: a step request already in flight when
//! the user hits reset completes normally, and its event dies at the id
//! check. The ticker reads the shared current-run counter to stop looping
//! promptly.

use crate::remote::{SimState, SimStepResponse};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Animation loop state. Starting is rejected while Running, never queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimPhase {
    Idle,
    Running,
}

/// What a step event means for the caller.
#[derive(Debug, Clone, Copy)]
pub enum StepDisposition {
    /// From a cancelled or superseded run; ignore entirely.
    Stale,
    /// The run ended (terminal response or transport trouble downgraded to
    /// one). The loop must not issue further steps.
    Finished,
    /// The run continues; render this pose and telemetry.
    Advanced(SimState),
}

#[derive(Debug)]
pub struct SimulationController {
    phase: SimPhase,
    /// Id of the run the ticker should currently be serving. Bumped on
    /// every start and cancel so orphaned events can be recognized.
    current_run: Arc<AtomicU64>,
}

impl SimulationController {
    pub fn new() -> Self {
        Self {
            phase: SimPhase::Idle,
            current_run: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SimPhase::Running
    }

    /// Shared counter handed to the ticker task; the task exits its loop as
    /// soon as the counter moves past the run it was started for.
    pub fn run_handle(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.current_run)
    }

    /// Begin a run if the controller is Idle and there is a trajectory to
    /// follow. Returns the new run id, or None for the silent no-op cases.
    pub fn try_begin(&mut self, have_trajectory: bool) -> Option<u64> {
        if self.phase == SimPhase::Running {
            tracing::debug!("Simulation already running, start ignored");
            return None;
        }
        if !have_trajectory {
            tracing::debug!("No trajectory, start ignored");
            return None;
        }
        let run_id = self.current_run.fetch_add(1, Ordering::SeqCst) + 1;
        self.phase = SimPhase::Running;
        Some(run_id)
    }

    /// The start request for `run_id` failed before any tick happened.
    pub fn start_failed(&mut self, run_id: u64) {
        if self.is_current(run_id) && self.phase == SimPhase::Running {
            self.phase = SimPhase::Idle;
        }
    }

    /// Classify one step result. Transport failures arrive here already
    /// downgraded to the synthetic terminal response: a flaky link stops
    /// the animation instead of leaving it spinning.
    pub fn apply_step(
        &mut self,
        run_id: u64,
        response: &SimStepResponse,
    ) -> StepDisposition {
        if !self.is_current(run_id) || self.phase != SimPhase::Running {
            return StepDisposition::Stale;
        }
        if !response.running {
            self.phase = SimPhase::Idle;
            return StepDisposition::Finished;
        }
        match response.state {
            Some(state) => StepDisposition::Advanced(state),
            None => {
                // A running response with no state is a protocol violation;
                // treat it like a terminal one.
                tracing::warn!("Step response running=true with no state");
                self.phase = SimPhase::Idle;
                StepDisposition::Finished
            }
        }
    }

    /// Force Idle and orphan whatever the ticker still has in flight.
    pub fn cancel(&mut self) {
        self.current_run.fetch_add(1, Ordering::SeqCst);
        self.phase = SimPhase::Idle;
    }

    /// Whether `run_id` is the run the controller currently serves.
    pub fn is_current(&self, run_id: u64) -> bool {
        self.current_run.load(Ordering::SeqCst) == run_id
    }
}

impl Default for SimulationController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_response() -> SimStepResponse {
        SimStepResponse {
            running: true,
            state: Some(SimState {
                x: 1.0,
                y: 2.0,
                theta: 0.0,
                velocity: 10.0,
                acceleration: 0.0,
                jerk: 0.0,
                time: 0.1,
            }),
        }
    }

    #[test]
    fn start_requires_a_trajectory() {
        let mut controller = SimulationController::new();
        assert!(controller.try_begin(false).is_none());
        assert_eq!(controller.phase(), SimPhase::Idle);
    }

    #[test]
    fn start_while_running_is_rejected() {
        let mut controller = SimulationController::new();
        let first = controller.try_begin(true);
        assert!(first.is_some());
        assert!(controller.try_begin(true).is_none());
    }

    #[test]
    fn terminal_response_stops_the_run() {
        let mut controller = SimulationController::new();
        let run_id = controller.try_begin(true).unwrap();
        assert!(matches!(
            controller.apply_step(run_id, &SimStepResponse::terminal()),
            StepDisposition::Finished
        ));
        assert_eq!(controller.phase(), SimPhase::Idle);

        // Late events from the finished run are stale, not re-applied
        assert!(matches!(
            controller.apply_step(run_id, &running_response()),
            StepDisposition::Stale
        ));
    }

    #[test]
    fn running_response_advances() {
        let mut controller = SimulationController::new();
        let run_id = controller.try_begin(true).unwrap();
        match controller.apply_step(run_id, &running_response()) {
            StepDisposition::Advanced(state) => assert_eq!(state.x, 1.0),
            other => panic!("expected Advanced, got {other:?}"),
        }
        assert!(controller.is_running());
    }

    #[test]
    fn cancel_orphans_in_flight_steps() {
        let mut controller = SimulationController::new();
        let run_id = controller.try_begin(true).unwrap();
        controller.cancel();
        assert_eq!(controller.phase(), SimPhase::Idle);
        // A response issued before the cancel resolves afterwards
        assert!(matches!(
            controller.apply_step(run_id, &running_response()),
            StepDisposition::Stale
        ));
        // And a new run is permitted
        assert!(controller.try_begin(true).is_some());
    }

    #[test]
    fn start_failure_returns_to_idle() {
        let mut controller = SimulationController::new();
        let run_id = controller.try_begin(true).unwrap();
        controller.start_failed(run_id);
        assert_eq!(controller.phase(), SimPhase::Idle);
    }

    #[test]
    fn run_handle_tracks_cancellation() {
        let mut controller = SimulationController::new();
        let handle = controller.run_handle();
        let run_id = controller.try_begin(true).unwrap();
        assert_eq!(handle.load(std::sync::atomic::Ordering::SeqCst), run_id);
        controller.cancel();
        assert_ne!(handle.load(std::sync::atomic::Ordering::SeqCst), run_id);
    }
}
