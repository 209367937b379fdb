// Copyright 2025 the Pathbender Authors
// SPDX-License-Identifier: Apache-2.0

//! Pathbender: a robot path planning workbench built with Xilem

use xilem::{EventLoop, winit::error::EventLoopError};

fn main() -> Result<(), EventLoopError> {
    pathbender::run(EventLoop::with_user_event())
}
