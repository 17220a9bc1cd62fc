//! Ray-direction shader
//!
//! Casts one normalized view ray per canvas cell from a camera at the
//! origin through a flat image plane at z = -1, then encodes each ray's
//! direction as a color.

use std::path::PathBuf;

use log::debug;

use crate::canvas::Canvas;
use crate::color::{Color, MAX_CHANNEL};
use crate::error::{Error, Result};
use crate::math3d::{Ray, Vec3};

/// A canvas plus one view ray per cell
pub struct RayShader {
    canvas: Canvas,
    camera: Vec3,
    rays: Vec<Ray>,
}

impl RayShader {
    pub fn new(output_path: impl Into<PathBuf>, width: usize, height: usize) -> Result<Self> {
        let canvas = Canvas::new(output_path, width, height)?;
        let cells = width * height;
        let mut rays = Vec::new();
        rays.try_reserve_exact(cells)
            .map_err(|_| Error::InvalidDimensions { width, height })?;
        rays.resize(cells, Ray::default());
        Ok(Self {
            rays,
            canvas,
            camera: Vec3::zero(),
        })
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn into_canvas(self) -> Canvas {
        self.canvas
    }

    /// Ray through the center of cell (`row`, `col`), if prepared
    pub fn ray(&self, row: usize, col: usize) -> Option<&Ray> {
        if row < self.canvas.height() && col < self.canvas.width() {
            self.rays.get(row * self.canvas.width() + col)
        } else {
            None
        }
    }

    /// Compute the normalized direction through every cell center
    pub fn prepare_rays(&mut self) {
        let width = self.canvas.width();
        let height = self.canvas.height();
        let aspect = width as f32 / height as f32;

        for row in 0..height {
            for col in 0..width {
                // Cell center, to [0, 1], then to [-1, 1] with y pointing up
                let x = (col as f32 + 0.5) / width as f32;
                let y = (row as f32 + 0.5) / height as f32;
                let x = (2.0 * x - 1.0) * aspect;
                let y = 1.0 - 2.0 * y;

                let direction = (Vec3::new(x, y, -1.0) - self.camera).normalized();
                self.rays[row * width + col] = Ray::new(self.camera, direction);
            }
        }
        debug!("Prepared {} rays ({}x{}, aspect {})", self.rays.len(), width, height, aspect);
    }

    /// Color each cell by |direction| * 255, truncated
    pub fn fill_pixels_from_rays(&mut self) {
        let width = self.canvas.width();
        for (idx, ray) in self.rays.iter().enumerate() {
            let d = ray.direction().abs() * MAX_CHANNEL as f32;
            let color = Color::new(d.x as i32, d.y as i32, d.z as i32);
            self.canvas.set_pixel(idx / width, idx % width, color);
        }
    }

    pub fn draw(&self) -> Result<()> {
        self.canvas.draw()
    }
}
