// Copyright 2025 the Pathbender Authors
// SPDX-License-Identifier: Apache-2.0

//! Everything the field canvas renders, bundled as one cloneable value.
//!
//! `FieldSession` travels between `AppState` and the canvas widget: the
//! view layer hands the widget an `Arc<FieldSession>`, pointer edits mutate
//! the widget's copy and flow back through an action, and state-driven
//! changes (trajectory replaced, robot stepped) flow forward on rebuild.
//! Heavyweight members sit behind `Arc` so the clones stay cheap.

use crate::field::{BackgroundImage, PathModel};
use crate::model::{ControlPoint, RobotPose, TrajectoryPoint};
use crate::settings;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct FieldSession {
    /// The control points the user has drawn.
    pub path: PathModel,

    /// Latest service-generated trajectory; replaced wholesale.
    pub trajectory: Arc<Vec<TrajectoryPoint>>,

    /// Where the simulated robot currently is.
    pub robot_pose: RobotPose,

    /// Path the robot has actually driven this run.
    pub robot_trace: Arc<Vec<ControlPoint>>,

    /// Robot footprint (width, height) in field units.
    pub robot_size: (f64, f64),

    /// Optional reference image painted behind everything.
    pub background: Option<BackgroundImage>,
}

impl FieldSession {
    pub fn new() -> Self {
        Self {
            path: PathModel::new(),
            trajectory: Arc::new(Vec::new()),
            robot_pose: RobotPose::ORIGIN,
            robot_trace: Arc::new(Vec::new()),
            robot_size: (settings::robot::WIDTH, settings::robot::HEIGHT),
            background: None,
        }
    }

    pub fn set_trajectory(&mut self, trajectory: Vec<TrajectoryPoint>) {
        self.trajectory = Arc::new(trajectory);
    }

    /// Move the robot and extend its trace.
    pub fn set_robot_pose(&mut self, pose: RobotPose) {
        self.robot_pose = pose;
        Arc::make_mut(&mut self.robot_trace).push(ControlPoint::new(pose.x, pose.y));
    }

    /// Forget the driven trace (simulation start/reset).
    pub fn clear_trace(&mut self) {
        self.robot_trace = Arc::new(Vec::new());
    }

    /// Drop the drawn path along with everything derived from it.
    pub fn clear(&mut self) {
        self.path.clear();
        self.trajectory = Arc::new(Vec::new());
        self.clear_trace();
    }
}

impl Default for FieldSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_updates_append_to_the_trace() {
        let mut session = FieldSession::new();
        session.set_robot_pose(RobotPose {
            x: 1.0,
            y: 2.0,
            theta: 0.0,
        });
        session.set_robot_pose(RobotPose {
            x: 3.0,
            y: 4.0,
            theta: 0.5,
        });
        assert_eq!(session.robot_trace.len(), 2);
        assert_eq!(session.robot_trace[1], ControlPoint::new(3.0, 4.0));
    }

    #[test]
    fn clear_drops_path_trajectory_and_trace() {
        let mut session = FieldSession::new();
        session.path.add_point(kurbo::Point::new(0.0, 0.0));
        session.set_trajectory(vec![TrajectoryPoint {
            x: 0.0,
            y: 0.0,
            theta: 0.0,
            distance: 0.0,
            velocity: 0.0,
            curvature: 0.0,
        }]);
        session.set_robot_pose(RobotPose::ORIGIN);
        session.clear();
        assert!(session.path.is_empty());
        assert!(session.trajectory.is_empty());
        assert!(session.robot_trace.is_empty());
    }
}
