//! Pixel sink for the rasterizer

use crate::zbuffer::ZBuffer;
use image::{ImageFormat, Rgb, RgbImage};
use lineforge_core::{try_reserve, Color, Error, Result};
use std::path::Path;

/// Pixels visited walking from `(x0, y0)` to `(x1, y1)`, paired with their
/// fraction `t` along the segment.
///
/// The walk takes `max(|dx|, |dy|)` unit steps so consecutive pixels always
/// touch. A zero-length segment visits its single pixel with `t = 0`.
pub fn line_pixels(x0: i64, y0: i64, x1: i64, y1: i64) -> impl Iterator<Item = (i64, i64, f64)> {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let steps = dx.abs().max(dy.abs());
    (0..=steps).map(move |i| {
        if steps == 0 {
            return (x0, y0, 0.0);
        }
        let t = i as f64 / steps as f64;
        let x = x0 as f64 + t * dx as f64;
        let y = y0 as f64 + t * dy as f64;
        (x.round() as i64, y.round() as i64, t)
    })
}

/// A surface lines can be drawn on. Coordinates have their origin in the
/// bottom-left corner; pixels outside the surface are dropped.
pub trait RasterTarget {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn put_pixel(&mut self, x: i64, y: i64, color: Color);

    /// Draw a line with no depth test; later lines overdraw earlier ones
    fn draw_line(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Color) {
        for (x, y, _) in line_pixels(x0, y0, x1, y1) {
            self.put_pixel(x, y, color);
        }
    }

    /// Draw a line whose endpoints sit at eye-space depths `z0` and `z1`.
    ///
    /// `1/z` is interpolated linearly along the pixel walk and a pixel is
    /// only written when it is strictly nearer than the buffer's sample.
    #[allow(clippy::too_many_arguments)]
    fn draw_depth_tested_line(
        &mut self,
        zbuf: &mut ZBuffer,
        x0: i64,
        y0: i64,
        z0: f64,
        x1: i64,
        y1: i64,
        z1: f64,
        color: Color,
    ) {
        for (x, y, t) in line_pixels(x0, y0, x1, y1) {
            let inv_z = (1.0 - t) / z0 + t / z1;
            if zbuf.test_and_set(x, y, inv_z) {
                self.put_pixel(x, y, color);
            }
        }
    }
}

/// An RGB image with a bottom-left origin
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    /// Create a canvas filled with `background`.
    ///
    /// The pixel buffer is reserved fallibly so oversized canvases report
    /// [`Error::ResourceExhausted`].
    pub fn new(width: u32, height: u32, background: Color) -> Result<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(3))
            .ok_or_else(|| {
                Error::ResourceExhausted(format!("canvas of {}x{} pixels", width, height))
            })?;
        let mut buffer = Vec::new();
        try_reserve(&mut buffer, len)?;
        let [r, g, b] = background.to_rgb8();
        for _ in 0..len / 3 {
            buffer.extend_from_slice(&[r, g, b]);
        }
        let image = RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
            Error::Image(format!("buffer does not match a {}x{} canvas", width, height))
        })?;
        Ok(Self { image })
    }

    /// Color at `(x, y)` measured from the bottom-left corner
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.image.width() || y >= self.image.height() {
            return None;
        }
        Some(self.image.get_pixel(x, self.image.height() - 1 - y).0)
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Write the canvas as a 24-bit BMP file
    pub fn save_bmp<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.image
            .save_with_format(path.as_ref(), ImageFormat::Bmp)
            .map_err(|e| Error::Image(format!("{}: {}", path.as_ref().display(), e)))
    }
}

impl RasterTarget for Canvas {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn put_pixel(&mut self, x: i64, y: i64, color: Color) {
        let (width, height) = (self.image.width() as i64, self.image.height() as i64);
        if x < 0 || y < 0 || x >= width || y >= height {
            return;
        }
        self.image
            .put_pixel(x as u32, (height - 1 - y) as u32, Rgb(color.to_rgb8()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const RED: Color = Color::new(1.0, 0.0, 0.0);
    const BLUE: Color = Color::new(0.0, 0.0, 1.0);

    #[test]
    fn test_line_pixels_are_connected() {
        let pixels: Vec<_> = line_pixels(0, 0, 7, 3).collect();
        assert_eq!(pixels.len(), 8);
        assert_eq!((pixels[0].0, pixels[0].1), (0, 0));
        assert_eq!((pixels[7].0, pixels[7].1), (7, 3));
        for pair in pixels.windows(2) {
            assert!((pair[1].0 - pair[0].0).abs() <= 1);
            assert!((pair[1].1 - pair[0].1).abs() <= 1);
        }
    }

    #[test]
    fn test_single_pixel_line() {
        let pixels: Vec<_> = line_pixels(4, 2, 4, 2).collect();
        assert_eq!(pixels, vec![(4, 2, 0.0)]);
    }

    #[test]
    fn test_background_and_origin() {
        let mut canvas = Canvas::new(4, 3, Color::WHITE).unwrap();
        assert_eq!(canvas.pixel(3, 2), Some([255, 255, 255]));
        canvas.put_pixel(0, 0, RED);
        // Bottom-left of the canvas is the last row of the image.
        assert_eq!(canvas.image().get_pixel(0, 2).0, [255, 0, 0]);
        assert_eq!(canvas.pixel(0, 0), Some([255, 0, 0]));
    }

    #[test]
    fn test_out_of_range_pixels_are_clipped() {
        let mut canvas = Canvas::new(5, 5, Color::BLACK).unwrap();
        canvas.draw_line(-3, 2, 8, 2, RED);
        for x in 0..5 {
            assert_eq!(canvas.pixel(x, 2), Some([255, 0, 0]));
        }
        assert_eq!(canvas.pixel(0, 3), Some([0, 0, 0]));
    }

    #[test]
    fn test_later_line_wins_without_depth() {
        let mut canvas = Canvas::new(5, 5, Color::BLACK).unwrap();
        canvas.draw_line(0, 2, 4, 2, RED);
        canvas.draw_line(2, 0, 2, 4, BLUE);
        assert_eq!(canvas.pixel(2, 2), Some([0, 0, 255]));
    }

    #[test]
    fn test_nearer_line_wins_with_depth() {
        let mut canvas = Canvas::new(5, 5, Color::BLACK).unwrap();
        let mut zbuf = ZBuffer::new(5, 5).unwrap();
        canvas.draw_depth_tested_line(&mut zbuf, 0, 2, -2.0, 4, 2, -2.0, RED);
        canvas.draw_depth_tested_line(&mut zbuf, 2, 0, -9.0, 2, 4, -9.0, BLUE);
        assert_eq!(canvas.pixel(2, 2), Some([255, 0, 0]));
        assert_eq!(canvas.pixel(2, 0), Some([0, 0, 255]));
    }

    #[test]
    fn test_depth_is_interpolated_as_inverse_z() {
        // Horizontal from z = -10 to -20 crossed at its midpoint by a nearer
        // vertical line from z = -2 to -4.
        let near = 0.5 / -2.0 + 0.5 / -4.0;
        for horizontal_first in [true, false] {
            let mut canvas = Canvas::new(11, 11, Color::BLACK).unwrap();
            let mut zbuf = ZBuffer::new(11, 11).unwrap();
            let horizontal = |c: &mut Canvas, z: &mut ZBuffer| {
                c.draw_depth_tested_line(z, 0, 5, -10.0, 10, 5, -20.0, RED)
            };
            let vertical = |c: &mut Canvas, z: &mut ZBuffer| {
                c.draw_depth_tested_line(z, 5, 0, -2.0, 5, 10, -4.0, BLUE)
            };
            if horizontal_first {
                horizontal(&mut canvas, &mut zbuf);
                vertical(&mut canvas, &mut zbuf);
            } else {
                vertical(&mut canvas, &mut zbuf);
                horizontal(&mut canvas, &mut zbuf);
            }

            assert_relative_eq!(zbuf.get(5, 5).unwrap(), near, epsilon = 1e-12);
            assert_eq!(canvas.pixel(5, 5), Some([0, 0, 255]));
            // Away from the crossing the far line keeps its own depth.
            assert_relative_eq!(zbuf.get(2, 5).unwrap(), 0.8 / -10.0 + 0.2 / -20.0, epsilon = 1e-12);
            assert_eq!(canvas.pixel(2, 5), Some([255, 0, 0]));
        }
        // Interpolating z instead would have stored 1 / -3.
        assert!((near - 1.0 / -3.0_f64).abs() > 1e-3);
    }

    #[test]
    fn test_zero_length_line_is_depth_tested() {
        let mut canvas = Canvas::new(3, 3, Color::BLACK).unwrap();
        let mut zbuf = ZBuffer::new(3, 3).unwrap();
        canvas.draw_depth_tested_line(&mut zbuf, 1, 1, -1.0, 1, 1, -1.0, RED);
        canvas.draw_depth_tested_line(&mut zbuf, 1, 1, -5.0, 1, 1, -5.0, BLUE);
        assert_eq!(canvas.pixel(1, 1), Some([255, 0, 0]));
        assert_eq!(zbuf.get(1, 1), Some(-1.0));
    }
}
