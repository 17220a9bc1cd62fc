//! Raster canvas
//!
//! A fixed-size grid of [`Color`] cells in one contiguous buffer, plus the
//! fill operations that paint it and the path it is written to.

mod dump;

pub use dump::{parse_dump, MAGIC_NUMBER};

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{Error, Result};
use crate::regions::Region;
use crate::util::RandomSource;

/// How a region is painted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Fill {
    Solid { color: Color },
    /// Vertical blend over the full canvas height
    Gradient { from: Color, to: Color },
    /// Per-cell gray noise around a base color
    Noise { color: Color },
}

/// Number of cells in a `width` x `height` grid, or None when it is empty
/// or the count overflows
pub fn cell_count(width: usize, height: usize) -> Option<usize> {
    if width == 0 || height == 0 {
        return None;
    }
    width.checked_mul(height)
}

/// Owned width x height grid of colors
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    output_path: PathBuf,
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Canvas {
    /// Allocate a black canvas. Zero-sized canvases, and sizes whose cell
    /// count overflows or cannot be allocated, are rejected.
    pub fn new(output_path: impl Into<PathBuf>, width: usize, height: usize) -> Result<Self> {
        let invalid = || Error::InvalidDimensions { width, height };
        let cells = cell_count(width, height).ok_or_else(invalid)?;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(cells).map_err(|_| invalid())?;
        pixels.resize(cells, Color::BLACK);
        Ok(Self {
            output_path: output_path.into(),
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Point subsequent writes at a different file
    pub fn set_output_path(&mut self, output_path: impl Into<PathBuf>) {
        self.output_path = output_path.into();
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Color at (`row`, `col`), or None when out of bounds
    #[inline]
    pub fn pixel(&self, row: usize, col: usize) -> Option<Color> {
        if row < self.height && col < self.width {
            Some(self.pixels[self.index(row, col)])
        } else {
            None
        }
    }

    /// Set a single cell (bounds checked, out-of-range writes are dropped)
    #[inline]
    pub fn set_pixel(&mut self, row: usize, col: usize, color: Color) {
        if row < self.height && col < self.width {
            let idx = self.index(row, col);
            self.pixels[idx] = color;
        }
    }

    /// Rows of the grid, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.pixels.chunks_exact(self.width)
    }

    /// Blend factor for `row` in a full-height vertical gradient
    #[inline]
    fn row_fraction(&self, row: usize) -> f64 {
        row as f64 / self.height as f64
    }

    // ========================================================================
    // Background fills
    // ========================================================================

    pub fn fill_solid_background(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Each row gets `from` blended towards `to` by `row / height`
    pub fn fill_gradient_background(&mut self, from: Color, to: Color) {
        for row in 0..self.height {
            let color = from.interpolate(&to, self.row_fraction(row));
            let start = self.index(row, 0);
            self.pixels[start..start + self.width].fill(color);
        }
    }

    // ========================================================================
    // Region fills
    //
    // Cells outside the region keep their previous color, so shapes layer
    // on top of whatever background or shapes were drawn before.
    // ========================================================================

    /// Paint every cell inside `region` with the color `source` yields for (row, col)
    fn fill_where(&mut self, region: &Region, mut source: impl FnMut(usize, usize) -> Color) {
        let mut painted = 0usize;
        for row in 0..self.height {
            for col in 0..self.width {
                if region.contains(row, col, self.width, self.height) {
                    let idx = self.index(row, col);
                    self.pixels[idx] = source(row, col);
                    painted += 1;
                }
            }
        }
        debug!("Filled {} cells of {:?}", painted, region);
    }

    pub fn fill_solid(&mut self, region: &Region, color: Color) {
        self.fill_where(region, |_, _| color);
    }

    /// Vertical gradient measured against the full canvas height, not the region's
    pub fn fill_gradient(&mut self, region: &Region, from: Color, to: Color) {
        let height = self.height as f64;
        self.fill_where(region, |row, _| from.interpolate(&to, row as f64 / height));
    }

    /// Independent noise draw for every interior cell
    pub fn fill_noise(&mut self, region: &Region, color: Color, rng: &mut impl RandomSource) {
        self.fill_where(region, |_, _| color.add_noise(rng));
    }

    pub fn fill_region(&mut self, region: &Region, fill: &Fill, rng: &mut impl RandomSource) {
        match *fill {
            Fill::Solid { color } => self.fill_solid(region, color),
            Fill::Gradient { from, to } => self.fill_gradient(region, from, to),
            Fill::Noise { color } => self.fill_noise(region, color, rng),
        }
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Write the pixel dump to the canvas output path
    pub fn draw(&self) -> Result<()> {
        let file = File::create(&self.output_path)?;
        let mut writer = BufWriter::new(file);
        self.write_dump(&mut writer)?;
        info!("Image drawn: {}", self.output_path.display());
        Ok(())
    }
}
