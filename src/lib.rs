// Copyright 2025 the Pathbender Authors
// SPDX-License-Identifier: Apache-2.0

//! Pathbender: a robot path planning workbench built with Xilem
//!
//! The user sketches a composite curve on a 2D field by placing and
//! dragging control points; a network-resident service turns the points
//! into a trajectory and a motion profile, and a simulated robot drives the
//! result live on the canvas. This crate is the editor, renderer, and
//! animator; the curve/profile/simulation math lives behind the
//! [`remote::PathService`] contract.

use std::sync::Arc;

use winit::dpi::LogicalSize;
use winit::error::EventLoopError;
use xilem::core::fork;
use xilem::{EventLoopBuilder, WidgetView, WindowView, Xilem, window};

mod components;
mod data;
mod field;
mod graph;
mod model;
mod persistence;
mod remote;
mod settings;
mod sim;
mod tasks;
mod theme;
mod views;

use data::AppState;

/// Entry point for the Pathbender application
pub fn run(event_loop: EventLoopBuilder) -> Result<(), EventLoopError> {
    // Initialize tracing subscriber (can be controlled via RUST_LOG env var)
    // Filter out noisy wgpu/naga shader compilation logs
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pathbender=info".parse().unwrap())
                .add_directive("wgpu=warn".parse().unwrap())
                .add_directive("naga=warn".parse().unwrap())
                .add_directive("wgpu_core=warn".parse().unwrap())
                .add_directive("wgpu_hal=warn".parse().unwrap()),
        )
        .init();

    let initial_state = AppState::new();

    let app = Xilem::new(initial_state, app_logic);
    app.run_in(event_loop)?;
    Ok(())
}

/// Build the single-window UI.
fn app_logic(state: &mut AppState) -> impl Iterator<Item = WindowView<AppState>> + use<> {
    let content = workbench_with_tasks(state);

    let window_size = LogicalSize::new(1280.0, 800.0);
    let window_view = window(state.main_window_id, "Pathbender", content);
    let window_with_options = window_view.with_options(|options| {
        options
            .with_initial_inner_size(window_size)
            .on_close(|state: &mut AppState| state.running = false)
    });

    std::iter::once(window_with_options)
}

/// The workbench view with the two background tasks forked alongside it.
///
/// The generation worker serves path/profile requests; the simulation
/// ticker runs the 60 Hz animation loop. Each takes its inbox out of
/// `AppState` on first build and feeds results back through its proxy
/// callback, where stale ones are discarded.
fn workbench_with_tasks(state: &mut AppState) -> impl WidgetView<AppState> + use<> {
    let gen_service = Arc::clone(&state.service);
    let gen_inbox = Arc::clone(&state.gen_inbox);
    let sim_service = Arc::clone(&state.service);
    let sim_inbox = Arc::clone(&state.sim_inbox);
    let current_run = state.controller.run_handle();

    let content = views::workbench(state);

    let gen_task = xilem::view::task_raw(
        move |proxy| {
            let service = Arc::clone(&gen_service);
            let inbox = Arc::clone(&gen_inbox);
            async move {
                let rx = inbox.lock().unwrap().take();
                if let Some(rx) = rx {
                    tasks::generation_worker(proxy, service, rx).await;
                }
            }
        },
        |state: &mut AppState, event: tasks::GenEvent| {
            state.apply_gen_event(event);
        },
    );

    let sim_task = xilem::view::task_raw(
        move |proxy| {
            let service = Arc::clone(&sim_service);
            let inbox = Arc::clone(&sim_inbox);
            let current_run = Arc::clone(&current_run);
            async move {
                let rx = inbox.lock().unwrap().take();
                if let Some(rx) = rx {
                    tasks::simulation_ticker(proxy, service, rx, current_run).await;
                }
            }
        },
        |state: &mut AppState, event: tasks::SimEvent| {
            state.apply_sim_event(event);
        },
    );

    fork(fork(content, gen_task), sim_task)
}
