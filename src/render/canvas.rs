//! The output canvas.

use image::RgbaImage;

use crate::types::{Colour, Palette, Point};

/// A fixed-size RGBA pixel grid that the pipeline paints into.
///
/// Created once per run with the source dimensions and never resized.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Create a fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Create a canvas holding `source` with every pixel snapped to `palette`.
    ///
    /// With an empty palette this is a plain copy.
    pub fn quantized(source: &RgbaImage, palette: &Palette) -> Self {
        let mut image = source.clone();
        if !palette.is_empty() {
            for pixel in image.pixels_mut() {
                *pixel = palette.nearest(Colour::from(*pixel)).into();
            }
        }
        Self { image }
    }

    /// Get the dimensions as (width, height).
    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Get a pixel, or `None` outside the canvas.
    pub fn get(&self, x: i32, y: i32) -> Option<Colour> {
        if x < 0 || y < 0 {
            return None;
        }
        self.image
            .get_pixel_checked(x as u32, y as u32)
            .map(|p| Colour::from(*p))
    }

    /// Write `colour` at every pixel. Points outside the canvas are skipped.
    ///
    /// Returns the number of pixels written.
    pub fn paint(&mut self, pixels: &[Point], colour: Colour) -> usize {
        let (width, height) = self.image.dimensions();
        let rgba = colour.into();
        let mut painted = 0;

        for p in pixels {
            if p.x < 0 || p.y < 0 || p.x as u32 >= width || p.y as u32 >= height {
                continue;
            }
            self.image.put_pixel(p.x as u32, p.y as u32, rgba);
            painted += 1;
        }

        painted
    }

    /// Number of pixels that are not fully transparent.
    pub fn opaque_pixels(&self) -> usize {
        self.image.pixels().filter(|p| p.0[3] != 0).count()
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}
