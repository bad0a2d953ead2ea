use image::error::{ParameterError, ParameterErrorKind};
use image::imageops::FilterType;
use image::{DynamicImage, ImageError};
use tracing::debug;

use crate::error::DecodeError;
use crate::preprocess::bounds::{fit_dimensions, PreprocessConfig};
use crate::preprocess::buffer::PixelBuffer;

/// Turns an uploaded image blob into a `[1, height, width, 3]` pixel buffer.
#[derive(Debug, Clone, Default)]
pub struct ImagePreprocessor {
    pub config: PreprocessConfig,
}

impl ImagePreprocessor {
    pub fn new(config: PreprocessConfig) -> Self {
        ImagePreprocessor { config }
    }

    /// Decodes `bytes`, shrinks the bitmap to fit the configured bounds, draws
    /// it onto an RGB surface and returns the surface's channel data with a
    /// batch dimension of 1.
    pub fn preprocess(&self, bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
        let img = image::load_from_memory(bytes)?;
        self.preprocess_image(&img)
    }

    /// Same as [`preprocess`](Self::preprocess) for an already decoded bitmap.
    pub fn preprocess_image(&self, img: &DynamicImage) -> Result<PixelBuffer, DecodeError> {
        let (w0, h0) = (img.width(), img.height());
        let (width, height) = fit_dimensions(w0, h0, &self.config);
        debug!(w0, h0, width, height, "fitting image to surface");

        let surface = if (width, height) == (w0, h0) {
            img.to_rgb8()
        } else {
            img.resize_exact(width, height, FilterType::Triangle).to_rgb8()
        };

        PixelBuffer::from_rgb(width, height, surface.into_raw()).ok_or_else(|| {
            DecodeError(ImageError::Parameter(ParameterError::from_kind(
                ParameterErrorKind::DimensionMismatch,
            )))
        })
    }
}
