//! Fitting projected lines into a canvas and drawing them

use crate::canvas::{Canvas, RasterTarget};
use crate::line::{bounds, Line2D};
use crate::zbuffer::ZBuffer;
use lineforge_core::{Color, Error, Point2d, Result};
use tracing::debug;

/// Share of the canvas the scene fills along its longer side
pub const FILL_RATIO: f64 = 0.95;

/// Uniform scale and offset that centre a line set in a canvas whose larger
/// side is `size` pixels and whose aspect matches the lines' bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub scale: f64,
    pub dx: f64,
    pub dy: f64,
}

impl Viewport {
    /// Fit `lines` into a canvas of at most `size` pixels per side.
    ///
    /// Fails with [`Error::InvalidData`] when there is nothing to fit or the
    /// lines collapse to a single point.
    pub fn fit(lines: &[Line2D], size: f64) -> Result<Self> {
        if !size.is_finite() || size <= 0.0 {
            return Err(Error::InvalidData(format!("image size must be positive, got {}", size)));
        }
        let (min, max) = bounds(lines)
            .ok_or_else(|| Error::InvalidData("scene has no lines to draw".to_string()))?;
        let x_range = max.x - min.x;
        let y_range = max.y - min.y;
        let longest = x_range.max(y_range);
        if !longest.is_finite() || longest <= 0.0 {
            return Err(Error::InvalidData(format!(
                "projected scene has degenerate extent {}x{}",
                x_range, y_range
            )));
        }

        let image_x = size * x_range / longest;
        let image_y = size * y_range / longest;
        let scale = FILL_RATIO * size / longest;
        let dx = image_x / 2.0 - scale * (min.x + max.x) / 2.0;
        let dy = image_y / 2.0 - scale * (min.y + max.y) / 2.0;

        Ok(Self {
            width: (image_x.round() as u32).max(1),
            height: (image_y.round() as u32).max(1),
            scale,
            dx,
            dy,
        })
    }

    /// Map a projected point to canvas pixel coordinates
    pub fn map(&self, p: &Point2d) -> (i64, i64) {
        (
            (p.x * self.scale + self.dx).round() as i64,
            (p.y * self.scale + self.dy).round() as i64,
        )
    }
}

/// Draw `lines` in order on `target`, depth-tested when `zbuf` is given
pub fn draw_lines<T: RasterTarget>(
    target: &mut T,
    viewport: &Viewport,
    lines: &[Line2D],
    mut zbuf: Option<&mut ZBuffer>,
) {
    for line in lines {
        let (x0, y0) = viewport.map(&line.p1);
        let (x1, y1) = viewport.map(&line.p2);
        match zbuf.as_deref_mut() {
            Some(zbuf) => {
                target.draw_depth_tested_line(zbuf, x0, y0, line.z1, x1, y1, line.z2, line.color)
            }
            None => target.draw_line(x0, y0, x1, y1, line.color),
        }
    }
}

/// Fit the lines into a fresh canvas of at most `size` pixels per side and
/// rasterize them, with a Z-buffer when `z_buffered` is set
pub fn fit_and_draw(lines: &[Line2D], size: f64, background: Color, z_buffered: bool) -> Result<Canvas> {
    let viewport = Viewport::fit(lines, size)?;
    debug!(
        width = viewport.width,
        height = viewport.height,
        scale = viewport.scale,
        z_buffered,
        "fitted viewport"
    );
    let mut canvas = Canvas::new(viewport.width, viewport.height, background)?;
    if z_buffered {
        let mut zbuf = ZBuffer::new(viewport.width, viewport.height)?;
        draw_lines(&mut canvas, &viewport, lines, Some(&mut zbuf));
    } else {
        draw_lines(&mut canvas, &viewport, lines, None);
    }
    Ok(canvas)
}
