// Copyright 2025 the Pathbender Authors
// SPDX-License-Identifier: Apache-2.0

//! Background reference image for the field canvas.
//!
//! Users load a field drawing (competition field PNG, hand sketch) behind
//! the path. The image is session-only, never persisted in path files, and
//! is stretched to the canvas square when painted.

use peniko::{Blob, ImageData, ImageFormat};
use std::path::Path;

/// A decoded background image ready for Vello rendering.
#[derive(Debug, Clone)]
pub struct BackgroundImage {
    /// Decoded RGBA8 pixel data.
    pub image_data: ImageData,
    /// Original pixel width.
    pub width: u32,
    /// Original pixel height.
    pub height: u32,
}

impl BackgroundImage {
    /// Load and decode an image file to RGBA8 pixels.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let img = image::open(path)?;
        let rgba = img.to_rgba8();
        let width = rgba.width();
        let height = rgba.height();
        let pixels: Vec<u8> = rgba.into_raw();

        let image_data = ImageData {
            data: Blob::from(pixels),
            format: ImageFormat::Rgba8,
            alpha_type: peniko::ImageAlphaType::Alpha,
            width,
            height,
        };

        Ok(Self {
            image_data,
            width,
            height,
        })
    }
}
