// Copyright 2025 the Pathbender Authors
// SPDX-License-Identifier: Apache-2.0

//! Standalone drawing helper functions for the field canvas

use crate::field::path::PointRole;
use crate::field::{FieldMapper, PathModel};
use crate::model::{ControlPoint, RobotPose, TrajectoryPoint};
use crate::settings::field;
use crate::theme;
use kurbo::{Affine, BezPath, Circle, Line, Point, Rect, Stroke};
use masonry::util::fill_color;
use masonry::vello::Scene;
use masonry::vello::peniko::Brush;

/// Build an open polyline through pixel-space points.
fn polyline(points: impl IntoIterator<Item = Point>) -> BezPath {
    let mut path = BezPath::new();
    for (i, pt) in points.into_iter().enumerate() {
        if i == 0 {
            path.move_to(pt);
        } else {
            path.line_to(pt);
        }
    }
    path
}

/// Draw grid lines at every grid step across the field, then the two axis
/// lines through the origin on top.
pub(crate) fn draw_grid(scene: &mut Scene, mapper: &FieldMapper) {
    let grid_stroke = Stroke::new(theme::size::GRID_LINE_WIDTH);
    let grid_brush = Brush::Solid(theme::canvas::GRID_LINE);

    let steps = (field::MAX / field::GRID_SPACING).floor() as i64;
    for i in -steps..=steps {
        let coord = i as f64 * field::GRID_SPACING;

        let vertical = Line::new(
            mapper.to_pixel(Point::new(coord, field::MIN)),
            mapper.to_pixel(Point::new(coord, field::MAX)),
        );
        scene.stroke(&grid_stroke, Affine::IDENTITY, &grid_brush, None, &vertical);

        let horizontal = Line::new(
            mapper.to_pixel(Point::new(field::MIN, coord)),
            mapper.to_pixel(Point::new(field::MAX, coord)),
        );
        scene.stroke(&grid_stroke, Affine::IDENTITY, &grid_brush, None, &horizontal);
    }

    let axis_stroke = Stroke::new(theme::size::AXIS_LINE_WIDTH);
    let axis_brush = Brush::Solid(theme::canvas::AXIS_LINE);

    let y_axis = Line::new(
        mapper.to_pixel(Point::new(0.0, field::MIN)),
        mapper.to_pixel(Point::new(0.0, field::MAX)),
    );
    scene.stroke(&axis_stroke, Affine::IDENTITY, &axis_brush, None, &y_axis);

    let x_axis = Line::new(
        mapper.to_pixel(Point::new(field::MIN, 0.0)),
        mapper.to_pixel(Point::new(field::MAX, 0.0)),
    );
    scene.stroke(&axis_stroke, Affine::IDENTITY, &axis_brush, None, &x_axis);
}

/// Draw the path the robot has actually driven this run.
pub(crate) fn draw_trace(scene: &mut Scene, mapper: &FieldMapper, trace: &[ControlPoint]) {
    if trace.len() < 2 {
        return;
    }

    let path = polyline(trace.iter().map(|pt| mapper.to_pixel(pt.to_point())));
    let stroke = Stroke::new(theme::size::TRACE_WIDTH);
    let brush = Brush::Solid(theme::trajectory::TRACE);
    scene.stroke(&stroke, Affine::IDENTITY, &brush, None, &path);
}

/// Draw the service-generated trajectory.
pub(crate) fn draw_trajectory(
    scene: &mut Scene,
    mapper: &FieldMapper,
    trajectory: &[TrajectoryPoint],
) {
    if trajectory.len() < 2 {
        return;
    }

    let path = polyline(
        trajectory
            .iter()
            .map(|pt| mapper.to_pixel(Point::new(pt.x, pt.y))),
    );
    let stroke = Stroke::new(theme::size::TRAJECTORY_WIDTH);
    let brush = Brush::Solid(theme::trajectory::LINE);
    scene.stroke(&stroke, Affine::IDENTITY, &brush, None, &path);
}

/// Draw the control polyline and the point markers.
///
/// Anchors (every third point) render larger and brighter than handles;
/// the selected point gets a white outline on top of its fill.
pub(crate) fn draw_control_points(scene: &mut Scene, mapper: &FieldMapper, path: &PathModel) {
    let pixels: Vec<Point> = path
        .points()
        .iter()
        .map(|pt| mapper.to_pixel(pt.to_point()))
        .collect();

    // Dashed connector through consecutive points, whatever their role
    if pixels.len() >= 2 {
        let connector = polyline(pixels.iter().copied());
        let stroke = Stroke::new(theme::size::CONNECTOR_WIDTH).with_dashes(
            theme::size::CONNECTOR_DASH_OFFSET,
            theme::size::CONNECTOR_DASH,
        );
        let brush = Brush::Solid(theme::point::CONNECTOR);
        scene.stroke(&stroke, Affine::IDENTITY, &brush, None, &connector);
    }

    for (i, &pixel) in pixels.iter().enumerate() {
        let (radius, color) = match PointRole::of_index(i) {
            PointRole::Anchor => (theme::size::ANCHOR_RADIUS, theme::point::ANCHOR),
            PointRole::Handle => (theme::size::HANDLE_RADIUS, theme::point::HANDLE),
        };

        let marker = Circle::new(pixel, radius);
        fill_color(scene, &marker, color);

        if path.selected() == Some(i) {
            let stroke = Stroke::new(theme::size::SELECTED_OUTLINE_WIDTH);
            let brush = Brush::Solid(theme::point::SELECTED_OUTLINE);
            scene.stroke(&stroke, Affine::IDENTITY, &brush, None, &marker);
        }
    }
}

/// Draw the robot: a rotated rectangle centered on the pose with a tick
/// toward its heading.
pub(crate) fn draw_robot(
    scene: &mut Scene,
    mapper: &FieldMapper,
    pose: RobotPose,
    robot_size: (f64, f64),
) {
    let center = mapper.to_pixel(Point::new(pose.x, pose.y));
    let scale = mapper.scale();
    let pixel_w = robot_size.0 * scale;
    let pixel_h = robot_size.1 * scale;

    let transform = Affine::translate(center.to_vec2()) * Affine::rotate(pose.theta);

    let body = Rect::new(-pixel_w / 2.0, -pixel_h / 2.0, pixel_w / 2.0, pixel_h / 2.0);
    scene.fill(
        peniko::Fill::NonZero,
        transform,
        &Brush::Solid(theme::robot::BODY),
        None,
        &body,
    );
    scene.stroke(
        &Stroke::new(theme::size::ROBOT_OUTLINE_WIDTH),
        transform,
        &Brush::Solid(theme::robot::OUTLINE),
        None,
        &body,
    );

    // Heading tick from center toward the front edge (pixel Y points down,
    // so "up" is negative)
    let heading = Line::new(Point::ZERO, Point::new(0.0, -pixel_h / 2.0));
    scene.stroke(
        &Stroke::new(theme::size::ROBOT_HEADING_WIDTH),
        transform,
        &Brush::Solid(theme::robot::HEADING),
        None,
        &heading,
    );
}
