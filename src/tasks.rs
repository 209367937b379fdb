// Copyright 2025 the Pathbender Authors
// SPDX-License-Identifier: Apache-2.0

//! Background tasks that talk to the path service.
//!
//! The UI thread never blocks on the network. Two long-lived tasks are
//! forked off the view tree and fed over channels:
//!
//! - the **generation worker** serves path/profile generation requests, one
//!   at a time, each tagged with the sequence number the UI issued it under;
//! - the **simulation ticker** runs the 60 Hz animation loop for one run at
//!   a time, tagged with the run id.
//!
//! Results come back through the Xilem `MessageProxy`; the UI side discards
//! anything whose tag is no longer current. Blocking reqwest calls are
//! pushed onto the blocking pool so the tokio workers stay responsive.

use crate::model::ControlPoint;
use crate::remote::{
    PathResponse, PathService, ProfileRequest, ProfileResponse, SimStartRequest, SimStepResponse,
};
use crate::settings;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use xilem::core::MessageProxy;
use xilem::tokio;
use xilem::tokio::sync::mpsc::UnboundedReceiver;

// ============================================================================
// GENERATION WORKER
// ============================================================================

/// A queued generation request, tagged with its call-class sequence number.
#[derive(Debug)]
pub enum GenRequest {
    Path {
        seq: u64,
        points: Vec<ControlPoint>,
    },
    Profile {
        seq: u64,
        request: ProfileRequest,
    },
}

/// Outcome of a generation request. Errors travel as display strings; the
/// UI only logs them and aborts the update chain at that stage.
#[derive(Debug)]
pub enum GenEvent {
    Path {
        seq: u64,
        result: Result<PathResponse, String>,
    },
    Profile {
        seq: u64,
        result: Result<ProfileResponse, String>,
    },
}

/// Drain generation requests until the channel or the proxy closes.
pub async fn generation_worker(
    proxy: MessageProxy<GenEvent>,
    service: Arc<dyn PathService>,
    mut rx: UnboundedReceiver<GenRequest>,
) {
    while let Some(request) = rx.recv().await {
        let event = match request {
            GenRequest::Path { seq, points } => {
                let service = Arc::clone(&service);
                let result = run_blocking(move || service.generate_path(&points)).await;
                GenEvent::Path { seq, result }
            }
            GenRequest::Profile { seq, request } => {
                let service = Arc::clone(&service);
                let result = run_blocking(move || service.generate_profile(&request)).await;
                GenEvent::Profile { seq, result }
            }
        };

        if proxy.message(event).is_err() {
            break;
        }
    }
}

/// Run a blocking service call on the blocking pool, flattening the join
/// and transport errors into one display string.
async fn run_blocking<T, F>(call: F) -> Result<T, String>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, crate::remote::ServiceError> + Send + 'static,
{
    match tokio::task::spawn_blocking(call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(e.to_string()),
        Err(e) => Err(format!("worker task failed: {e}")),
    }
}

// ============================================================================
// SIMULATION TICKER
// ============================================================================

/// Commands from the UI to the ticker task.
#[derive(Debug)]
pub enum SimCommand {
    /// Issue the start request, then tick until the run ends.
    Start {
        run_id: u64,
        request: Box<SimStartRequest>,
    },
    /// Fire a reset request at the service. The animation itself is already
    /// stopped by the time this is sent.
    Reset,
}

/// Events from the ticker back to the UI, all tagged with their run id.
#[derive(Debug)]
pub enum SimEvent {
    /// The start request succeeded; the run is live.
    Started { run_id: u64 },
    /// The start request failed; the run never began.
    StartFailed { run_id: u64, error: String },
    /// One step response (transport failures arrive as the synthetic
    /// terminal response).
    Step {
        run_id: u64,
        response: SimStepResponse,
    },
}

/// Serve simulation commands until the channel or the proxy closes.
///
/// `current_run` is the controller's shared run counter: the tick loop
/// checks it every period and exits as soon as the run is superseded, so
/// cancellation never waits on the service.
pub async fn simulation_ticker(
    proxy: MessageProxy<SimEvent>,
    service: Arc<dyn PathService>,
    mut rx: UnboundedReceiver<SimCommand>,
    current_run: Arc<AtomicU64>,
) {
    while let Some(command) = rx.recv().await {
        match command {
            SimCommand::Reset => {
                let service = Arc::clone(&service);
                if let Err(e) = run_blocking(move || service.reset_sim()).await {
                    tracing::warn!("Simulation reset request failed: {e}");
                }
            }
            SimCommand::Start { run_id, request } => {
                if !run_simulation(&proxy, &service, &current_run, run_id, *request).await {
                    return;
                }
            }
        }
    }
}

/// Run one simulation from start request to terminal step.
///
/// Returns false when the proxy is gone and the whole task should exit.
async fn run_simulation(
    proxy: &MessageProxy<SimEvent>,
    service: &Arc<dyn PathService>,
    current_run: &Arc<AtomicU64>,
    run_id: u64,
    request: SimStartRequest,
) -> bool {
    let start_service = Arc::clone(service);
    if let Err(error) = run_blocking(move || start_service.start_sim(&request)).await {
        tracing::error!("Failed to start simulation: {error}");
        return proxy.message(SimEvent::StartFailed { run_id, error }).is_ok();
    }

    if proxy.message(SimEvent::Started { run_id }).is_err() {
        return false;
    }

    let period = Duration::from_secs_f64(1.0 / settings::sim::TICK_HZ as f64);
    let mut ticker = tokio::time::interval(period);

    loop {
        ticker.tick().await;

        // Cancelled or superseded: stop issuing steps immediately
        if current_run.load(Ordering::SeqCst) != run_id {
            tracing::debug!("Run {run_id} superseded, ticker stopping");
            return true;
        }

        let step_service = Arc::clone(service);
        let response = match run_blocking(move || step_service.step_sim()).await {
            Ok(response) => response,
            Err(e) => {
                // Fail-safe: a flaky transport ends the run cleanly
                // instead of leaving the animation spinning
                tracing::warn!("Simulation step failed, stopping run: {e}");
                SimStepResponse::terminal()
            }
        };

        let terminal = !response.running;
        if proxy
            .message(SimEvent::Step { run_id, response })
            .is_err()
        {
            return false;
        }
        if terminal {
            return true;
        }
    }
}
