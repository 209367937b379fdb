// Copyright 2025 the Pathbender Authors
// SPDX-License-Identifier: Apache-2.0

//! Field coordinate model and the headless editing core

pub mod background;
pub mod mapper;
pub mod path;
pub mod session;

pub use background::BackgroundImage;
pub use mapper::FieldMapper;
pub use path::PathModel;
pub use session::FieldSession;
