// Copyright 2025 the Pathbender Authors
// SPDX-License-Identifier: Apache-2.0

//! Bidirectional mapping between field space and canvas pixels.
//!
//! The field is a fixed square (`settings::field`) with Y pointing up; the
//! canvas is a square of pixels with Y pointing down, so the mapping inverts
//! Y. A `FieldMapper` is a throwaway value derived from the canvas side
//! length at the moment of use (paint or pointer event), which is what keeps
//! it correct across resizes: there is no cached mapping to go stale.

use crate::settings::field;
use kurbo::Point;

/// Affine mapping between the field square and a square canvas of side
/// `canvas_size` pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldMapper {
    canvas_size: f64,
}

impl FieldMapper {
    pub fn new(canvas_size: f64) -> Self {
        Self { canvas_size }
    }

    /// Pixels per field unit.
    pub fn scale(&self) -> f64 {
        self.canvas_size / field::SIZE
    }

    /// Field position to canvas pixels (Y flipped).
    pub fn to_pixel(&self, field_pos: Point) -> Point {
        let norm_x = (field_pos.x - field::MIN) / field::SIZE;
        let norm_y = (field_pos.y - field::MIN) / field::SIZE;
        Point::new(
            norm_x * self.canvas_size,
            self.canvas_size - norm_y * self.canvas_size,
        )
    }

    /// Canvas pixels to field position; exact inverse of `to_pixel`.
    pub fn to_field(&self, pixel_pos: Point) -> Point {
        let norm_x = pixel_pos.x / self.canvas_size;
        let norm_y = (self.canvas_size - pixel_pos.y) / self.canvas_size;
        Point::new(
            field::MIN + norm_x * field::SIZE,
            field::MIN + norm_y * field::SIZE,
        )
    }
}
