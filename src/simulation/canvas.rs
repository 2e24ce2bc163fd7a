use crate::error::ConfigError;
use crate::simulation::{Grid, Rgb};

/// Channels per real pixel in a painted buffer (R, G, B, alpha)
pub const CHANNELS: usize = 4;

/// Scaling contract between a logical grid and a real pixel buffer.
///
/// Each cell covers `floor(real_width / width) x floor(real_height / height)`
/// pixels. When the dimensions do not divide evenly the remainder pixels at
/// the high edges are never painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    real_width: usize,
    real_height: usize,
    cell_width: usize,
    cell_height: usize,
}

impl Canvas {
    pub fn new(
        width: usize,
        height: usize,
        real_width: usize,
        real_height: usize,
    ) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }
        if width > real_width {
            return Err(ConfigError::CanvasTooSmall {
                axis: 'x',
                cells: width,
                pixels: real_width,
            });
        }
        if height > real_height {
            return Err(ConfigError::CanvasTooSmall {
                axis: 'y',
                cells: height,
                pixels: real_height,
            });
        }

        Ok(Self {
            width,
            height,
            real_width,
            real_height,
            cell_width: real_width / width,
            cell_height: real_height / height,
        })
    }

    /// Logical dimensions in cells
    pub fn cells(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Real dimensions in pixels
    pub fn real_size(&self) -> (usize, usize) {
        (self.real_width, self.real_height)
    }

    /// Pixel footprint of a single cell
    pub fn cell_size(&self) -> (usize, usize) {
        (self.cell_width, self.cell_height)
    }

    /// Length in floats of a painted buffer
    pub fn buffer_len(&self) -> usize {
        CHANNELS * self.real_width * self.real_height
    }

    /// Render `grid` into a row-major RGBA buffer, alpha fixed at 1.
    ///
    /// Pixel `(px, py)` starts at `4 * (py * real_width + px)`. Unpainted
    /// pixels, and cells whose state has no colour, stay at 0.
    pub fn paint(&self, grid: &Grid, colouring: &[Rgb]) -> Vec<f32> {
        let mut pixels = vec![0.0; self.buffer_len()];
        let width = grid.width().min(self.width);
        let height = grid.height().min(self.height);

        for x in 0..width {
            for y in 0..height {
                if let Some(colour) = colouring.get(grid[(x, y)]) {
                    self.fill_cell(&mut pixels, x, y, colour);
                }
            }
        }

        pixels
    }

    fn fill_cell(&self, pixels: &mut [f32], x: usize, y: usize, colour: &Rgb) {
        let left = x * self.cell_width;
        let bottom = y * self.cell_height;
        let rgba = [colour.r, colour.g, colour.b, 1.0];

        for py in bottom..bottom + self.cell_height {
            let row = CHANNELS * (py * self.real_width + left);
            for chunk in pixels[row..row + CHANNELS * self.cell_width].chunks_exact_mut(CHANNELS) {
                chunk.copy_from_slice(&rgba);
            }
        }
    }

    /// Cell covering real pixel `(px, py)`.
    ///
    /// Returns `None` for pixels outside the buffer and for the unpainted
    /// remainder strip.
    pub fn pixel_to_cell(&self, px: usize, py: usize) -> Option<(usize, usize)> {
        let x = px / self.cell_width;
        let y = py / self.cell_height;
        if x < self.width && y < self.height {
            Some((x, y))
        } else {
            None
        }
    }
}
