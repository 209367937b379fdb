// Copyright 2025 the Pathbender Authors
// SPDX-License-Identifier: Apache-2.0

//! File I/O operations for AppState (save, load, background image)

use super::AppState;
use crate::field::BackgroundImage;
use crate::graph::ProfileSeries;
use crate::persistence::{self, PathDocument, PersistError};
use chrono::Local;
use std::sync::Arc;

impl AppState {
    /// Snapshot the complete editor state for saving.
    pub fn document(&self) -> PathDocument {
        PathDocument {
            control_points: self.session.path.points().to_vec(),
            trajectory: (*self.session.trajectory).clone(),
            profile: self.profile.clone(),
            path_length: self.path_length,
            profile_config: self.profile_config,
            params: self.params,
        }
    }

    /// Open a save dialog and write the current path file.
    ///
    /// Cancelling the dialog is not an error; nothing happens.
    pub fn save_path_dialog(&mut self) {
        self.error_message = None;

        let path = rfd::FileDialog::new()
            .set_title("Save Path")
            .add_filter("Path Files", &["json"])
            .set_file_name("path_data.json")
            .save_file();

        let Some(path) = path else {
            tracing::debug!("Save cancelled");
            return;
        };

        match persistence::save_to_file(&path, &self.document()) {
            Ok(()) => {
                tracing::info!("Saved: {}", path.display());
                self.last_saved = Some(Local::now().format("%I:%M %p").to_string());
            }
            Err(e) => {
                let error = format!("Failed to save path: {e}");
                tracing::error!("{}", error);
                self.error_message = Some(error);
            }
        }
    }

    /// Open a load dialog and adopt the selected path file.
    ///
    /// A file matching neither schema leaves the editor untouched and
    /// surfaces the problem to the user.
    pub fn load_path_dialog(&mut self) {
        self.error_message = None;

        let path = rfd::FileDialog::new()
            .set_title("Load Path")
            .add_filter("Path Files", &["json"])
            .pick_file();

        let Some(path) = path else {
            tracing::debug!("Load cancelled");
            return;
        };

        match persistence::load_from_file(&path) {
            Ok(doc) => {
                tracing::info!("Loaded: {}", path.display());
                self.adopt_loaded(doc);
            }
            Err(e @ PersistError::UnknownFormat) => {
                let error = format!("{e}: {}", path.display());
                tracing::error!("{}", error);
                self.error_message = Some(error);
            }
            Err(e) => {
                let error = format!("Failed to load path: {e}");
                tracing::error!("{}", error);
                self.error_message = Some(error);
            }
        }
    }

    /// Adopt a decoded path file, then resynchronize everything derived
    /// from it as if the user had just edited the path.
    pub fn adopt_loaded(&mut self, doc: persistence::LoadedDocument) {
        self.session.path.set_points(doc.control_points);
        self.session.set_trajectory(doc.trajectory);
        self.session.clear_trace();
        self.profile = doc.profile;
        self.graph = Arc::new(ProfileSeries::from_profile(&self.profile));
        if let Some(config) = doc.profile_config {
            self.profile_config = config;
        }
        if let Some(params) = doc.params {
            self.params = params;
        }

        // Regenerate trajectory and profile against the live service
        self.path_changed();
    }

    /// Open a file dialog and load a background reference image.
    pub fn load_background_dialog(&mut self) {
        self.error_message = None;

        let path = rfd::FileDialog::new()
            .set_title("Background Image")
            .add_filter("Images", &["png", "jpg", "jpeg"])
            .pick_file();

        let Some(path) = path else {
            return;
        };

        match BackgroundImage::load(&path) {
            Ok(image) => {
                tracing::info!("Background image: {}", path.display());
                self.session.background = Some(image);
            }
            Err(e) => {
                let error = format!("Failed to load image: {e}");
                tracing::error!("{}", error);
                self.error_message = Some(error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ControlPoint, ControllerParams, ProfileConfig, ProfileKind};
    use crate::persistence::LoadedDocument;
    use crate::remote::{
        PathResponse, PathService, ProfileRequest, ProfileResponse, ServiceError,
        SimStartRequest, SimStepResponse,
    };
    use crate::tasks::GenRequest;

    struct StubService;

    impl PathService for StubService {
        fn generate_path(
            &self,
            _points: &[ControlPoint],
        ) -> Result<PathResponse, ServiceError> {
            unreachable!()
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

    #[test]
    fn adopt_loaded_replaces_state_and_resyncs() {
        let mut state = AppState::with_service(Arc::new(StubService));
        let doc = LoadedDocument {
            control_points: vec![ControlPoint::new(0.0, 0.0), ControlPoint::new(20.0, 20.0)],
            trajectory: Vec::new(),
            profile: Vec::new(),
            profile_config: Some(ProfileConfig {
                kind: ProfileKind::SCurve,
                max_vel: 33.0,
                max_accel: 44.0,
                max_decel: 55.0,
                max_jerk: 66.0,
            }),
            params: Some(ControllerParams {
                kx: 4.5,
                ..Default::default()
            }),
        };

        state.adopt_loaded(doc);

        assert_eq!(state.session.path.len(), 2);
        assert_eq!(state.profile_config.max_vel, 33.0);
        assert_eq!(state.params.kx, 4.5);

        // The resync regenerates the path
        let request = state
            .gen_inbox
            .lock()
            .unwrap()
            .as_mut()
            .and_then(|rx| rx.try_recv().ok());
        assert!(matches!(request, Some(GenRequest::Path { .. })));
    }

    #[test]
    fn adopt_loaded_keeps_config_when_the_file_has_none() {
        let mut state = AppState::with_service(Arc::new(StubService));
        state.profile_config.max_vel = 48.0;
        state.params.ky = 7.0;

        state.adopt_loaded(LoadedDocument {
            control_points: vec![ControlPoint::new(1.0, 1.0)],
            trajectory: Vec::new(),
            profile: Vec::new(),
            profile_config: None,
            params: None,
        });

        assert_eq!(state.profile_config.max_vel, 48.0);
        assert_eq!(state.params.ky, 7.0);
    }
}
