//! Geometry report
//!
//! Collects labelled results of vector and triangle calculations and writes
//! them to a text file in one go.

use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;

use crate::error::Result;

pub struct GeometryReport {
    output_path: PathBuf,
    lines: Vec<String>,
}

impl GeometryReport {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            lines: Vec::new(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Section heading, preceded by a blank line unless it opens the report
    pub fn heading(&mut self, title: &str) -> &mut Self {
        if !self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.lines.push(format!("{}:", title));
        self
    }

    /// `label = value` using the value's display form (vectors, triangles, scalars)
    pub fn entry(&mut self, label: &str, value: impl Display) -> &mut Self {
        self.lines.push(format!("{} = {}", label, value));
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        for line in &self.lines {
            writeln!(w, "{}", line)?;
        }
        w.flush()?;
        Ok(())
    }

    pub fn write(&self) -> Result<()> {
        let mut writer = BufWriter::new(File::create(&self.output_path)?);
        self.write_to(&mut writer)?;
        info!("Report written: {}", self.output_path.display());
        Ok(())
    }
}
