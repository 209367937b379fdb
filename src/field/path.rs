// Copyright 2025 the Pathbender Authors
// SPDX-License-Identifier: Apache-2.0

//! The ordered control-point sequence and its single selection.
//!
//! `PathModel` is the authoritative record of what the user has drawn.
//! Every mutation clamps to the field extent, so a stored point is never
//! out of range no matter where the pointer went.

use crate::field::FieldMapper;
use crate::model::ControlPoint;
use crate::settings;
use kurbo::Point;

/// Rendering role of a control point, derived from its index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointRole {
    Anchor,
    Handle,
}

impl PointRole {
    /// Every third point is an anchor; the rest shape the segment.
    pub fn of_index(index: usize) -> Self {
        if index % 3 == 0 {
            PointRole::Anchor
        } else {
            PointRole::Handle
        }
    }
}

/// Ordered control points plus the current selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathModel {
    points: Vec<ControlPoint>,
    selected: Option<usize>,
}

impl PathModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<ControlPoint> {
        self.points.first().copied()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_point(&self) -> Option<ControlPoint> {
        self.selected.and_then(|i| self.points.get(i).copied())
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.points.len());
    }

    /// Find the control point under a pixel position, if any.
    ///
    /// Scan order decides ties: the first point within the hit radius wins,
    /// which is always the lowest index.
    pub fn hit_test(&self, pixel_pos: Point, mapper: &FieldMapper) -> Option<usize> {
        self.points.iter().position(|pt| {
            mapper.to_pixel(pt.to_point()).distance(pixel_pos) < settings::editor::HIT_RADIUS
        })
    }

    /// Append a new point at the clamped field position and select it.
    pub fn add_point(&mut self, field_pos: Point) -> usize {
        self.points.push(ControlPoint::from(field_pos).clamped());
        let index = self.points.len() - 1;
        self.selected = Some(index);
        index
    }

    /// Overwrite the selected point with the clamped field position.
    ///
    /// Returns false when nothing is selected.
    pub fn move_selected(&mut self, field_pos: Point) -> bool {
        let Some(index) = self.selected else {
            return false;
        };
        self.points[index] = ControlPoint::from(field_pos).clamped();
        true
    }

    /// Directly set a point's coordinates (the sidebar coordinate editor
    /// writes through here). Clamped like every other mutation.
    pub fn set_point(&mut self, index: usize, point: ControlPoint) {
        if let Some(slot) = self.points.get_mut(index) {
            *slot = point.clamped();
        }
    }

    /// Remove a point; the selection is cleared regardless of which point
    /// was removed.
    pub fn remove(&mut self, index: usize) {
        if index < self.points.len() {
            self.points.remove(index);
            self.selected = None;
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.selected = None;
    }

    /// Replace the whole sequence (file load). Points are clamped on the
    /// way in and the selection is dropped.
    pub fn set_points(&mut self, points: Vec<ControlPoint>) {
        self.points = points.into_iter().map(ControlPoint::clamped).collect();
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> FieldMapper {
        FieldMapper::new(144.0)
    }

    #[test]
    fn roles_follow_every_third_convention() {
        assert_eq!(PointRole::of_index(0), PointRole::Anchor);
        assert_eq!(PointRole::of_index(1), PointRole::Handle);
        assert_eq!(PointRole::of_index(2), PointRole::Handle);
        assert_eq!(PointRole::of_index(3), PointRole::Anchor);
        assert_eq!(PointRole::of_index(6), PointRole::Anchor);
    }

    #[test]
    fn add_point_clamps_and_selects() {
        let mut path = PathModel::new();
        let index = path.add_point(Point::new(500.0, -500.0));
        assert_eq!(index, 0);
        assert_eq!(path.selected(), Some(0));
        assert_eq!(path.points()[0], ControlPoint::new(72.0, -72.0));
    }

    #[test]
    fn drag_outside_pins_to_the_boundary() {
        let mut path = PathModel::new();
        path.add_point(Point::new(0.0, 0.0));
        path.add_point(Point::new(10.0, 10.0));
        path.select(Some(1));

        // Pixel (0, 0) on a 144px canvas is the field's top-left corner
        let field_pos = mapper().to_field(Point::new(0.0, 0.0));
        assert!(path.move_selected(field_pos));
        assert_eq!(path.points()[1], ControlPoint::new(-72.0, 72.0));

        // Further outside clamps to the same corner
        let field_pos = mapper().to_field(Point::new(-250.0, -9000.0));
        assert!(path.move_selected(field_pos));
        assert_eq!(path.points()[1], ControlPoint::new(-72.0, 72.0));
    }

    #[test]
    fn move_without_selection_is_rejected() {
        let mut path = PathModel::new();
        path.add_point(Point::new(0.0, 0.0));
        path.select(None);
        assert!(!path.move_selected(Point::new(1.0, 1.0)));
    }

    #[test]
    fn hit_test_prefers_the_lowest_index() {
        let mut path = PathModel::new();
        // Two points within the 10px radius of the same press location
        path.add_point(Point::new(0.0, 0.0));
        path.add_point(Point::new(4.0, 0.0)); // 4 field units = 4 px at 144px canvas
        let press = mapper().to_pixel(Point::new(2.0, 0.0));
        assert_eq!(path.hit_test(press, &mapper()), Some(0));
    }

    #[test]
    fn hit_test_misses_outside_the_radius() {
        let mut path = PathModel::new();
        path.add_point(Point::new(0.0, 0.0));
        let press = mapper().to_pixel(Point::new(30.0, 30.0));
        assert_eq!(path.hit_test(press, &mapper()), None);
    }

    #[test]
    fn remove_clears_the_selection() {
        let mut path = PathModel::new();
        path.add_point(Point::new(0.0, 0.0));
        path.add_point(Point::new(10.0, 0.0));
        path.select(Some(0));
        path.remove(1);
        assert_eq!(path.selected(), None);
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn set_points_clamps_loaded_data() {
        let mut path = PathModel::new();
        path.set_points(vec![
            ControlPoint::new(0.0, 0.0),
            ControlPoint::new(999.0, -1.0),
        ]);
        assert_eq!(path.points()[1], ControlPoint::new(72.0, -1.0));
        assert_eq!(path.selected(), None);
    }
}
