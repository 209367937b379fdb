// Copyright 2025 the Pathbender Authors
// SPDX-License-Identifier: Apache-2.0

//! Paint pipeline for the field canvas
//!
//! Every frame is a full clear-and-repaint in a fixed order: background
//! image, grid, robot trace, trajectory, control points, robot. Canvas
//! sizes are small enough that partial invalidation would buy nothing.

use super::FieldCanvasWidget;
use super::drawing;
use crate::field::{BackgroundImage, FieldMapper};
use crate::theme;
use kurbo::{Affine, Rect};
use masonry::kurbo::Size;
use masonry::util::fill_color;
use masonry::vello::Scene;
use masonry::vello::peniko::Brush;

impl FieldCanvasWidget {
    pub(super) fn paint_scene(&mut self, scene: &mut Scene, canvas_size: Size) {
        fill_color(scene, &canvas_size.to_rect(), theme::canvas::BACKGROUND);

        // The field occupies the largest square that fits
        let side = canvas_size.width.min(canvas_size.height);
        let mapper = FieldMapper::new(side);

        if let Some(background) = &self.session.background {
            draw_background(scene, background, side);
        }

        drawing::draw_grid(scene, &mapper);
        drawing::draw_trace(scene, &mapper, &self.session.robot_trace);
        drawing::draw_trajectory(scene, &mapper, &self.session.trajectory);
        drawing::draw_control_points(scene, &mapper, &self.session.path);
        drawing::draw_robot(
            scene,
            &mapper,
            self.session.robot_pose,
            self.session.robot_size,
        );
    }
}

/// Stretch the reference image over the whole field square.
fn draw_background(scene: &mut Scene, background: &BackgroundImage, side: f64) {
    if background.width == 0 || background.height == 0 {
        return;
    }

    let brush = Brush::Image(peniko::ImageBrush {
        image: background.image_data.clone(),
        sampler: Default::default(),
    });
    let brush_transform = Affine::scale_non_uniform(
        side / background.width as f64,
        side / background.height as f64,
    );
    scene.fill(
        peniko::Fill::NonZero,
        Affine::IDENTITY,
        &brush,
        Some(brush_transform),
        &Rect::new(0.0, 0.0, side, side),
    );
}
