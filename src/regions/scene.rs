use super::Region;
use crate::canvas::{Canvas, Fill};
use crate::color::Color;
use crate::error::Result;
use crate::util::{RandomSource, Rng};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Background painted before any shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Background {
    Solid { color: Color },
    Gradient { from: Color, to: Color },
}

/// Region as written in a scene file. A disk without a center sits in the
/// middle of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ShapeRegion {
    Disk {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        center_x: Option<i32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        center_y: Option<i32>,
        radius: i32,
    },
    Rectangle {
        from_x: i32,
        from_y: i32,
        size_x: i32,
        size_y: i32,
    },
}

impl ShapeRegion {
    /// Concrete region on a `width` x `height` canvas
    pub fn resolve(&self, width: usize, height: usize) -> Region {
        match *self {
            ShapeRegion::Disk {
                center_x,
                center_y,
                radius,
            } => Region::disk(
                center_x.unwrap_or((width / 2) as i32),
                center_y.unwrap_or((height / 2) as i32),
                radius,
            ),
            ShapeRegion::Rectangle {
                from_x,
                from_y,
                size_x,
                size_y,
            } => Region::rectangle(from_x, from_y, size_x, size_y),
        }
    }
}

/// One filled shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    pub region: ShapeRegion,
    pub fill: Fill,
}

/// A picture described as data: canvas size, background and shapes in
/// drawing order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    pub output: PathBuf,
    pub width: usize,
    pub height: usize,
    /// Fixed seed for noise fills; the clock is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,
    #[serde(default)]
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn new(name: impl Into<String>, output: impl Into<PathBuf>, width: usize, height: usize) -> Self {
        Self {
            name: name.into(),
            output: output.into(),
            width,
            height,
            seed: None,
            background: None,
            shapes: Vec::new(),
        }
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = Some(background);
        self
    }

    pub fn add_shape(&mut self, region: ShapeRegion, fill: Fill) {
        self.shapes.push(Shape { region, fill });
    }

    /// Paint the scene with an explicit random source
    pub fn render_with(&self, rng: &mut impl RandomSource) -> Result<Canvas> {
        let mut canvas = Canvas::new(&self.output, self.width, self.height)?;
        match self.background {
            Some(Background::Solid { color }) => canvas.fill_solid_background(color),
            Some(Background::Gradient { from, to }) => canvas.fill_gradient_background(from, to),
            None => {},
        }
        for shape in &self.shapes {
            let region = shape.region.resolve(self.width, self.height);
            canvas.fill_region(&region, &shape.fill, rng);
        }
        debug!("Rendered scene '{}' with {} shapes", self.name, self.shapes.len());
        Ok(canvas)
    }

    /// Paint the scene, seeding noise from `seed` or the clock
    pub fn render(&self) -> Result<Canvas> {
        let mut rng = self.seed.map_or_else(Rng::from_clock, Rng::new);
        self.render_with(&mut rng)
    }

    /// Save scene to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load scene from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
