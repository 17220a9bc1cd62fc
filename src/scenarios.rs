//! Ready-made pictures and reports
//!
//! Each scenario builds its canvas (or report) from scratch, writes it, and
//! returns the in-memory result so callers and tests can inspect it.

use std::path::Path;

use log::info;

use crate::canvas::Canvas;
use crate::color::Color;
use crate::error::Result;
use crate::math3d::{Triangle, Vec3};
use crate::regions::Region;
use crate::report::GeometryReport;
use crate::shader::RayShader;
use crate::util::RandomSource;

pub const DEFAULT_WIDTH: usize = 1920;
pub const DEFAULT_HEIGHT: usize = 1080;

/// Cells per side of the noise grid
pub const GRID_CELLS: usize = 4;

const SKY_TOP: Color = Color::new(173, 216, 230);
const SKY_BOTTOM: Color = Color::new(250, 218, 221);
const SUN_TOP: Color = Color::new(255, 219, 111);
const SUN_BOTTOM: Color = Color::new(255, 127, 127);

/// Radius of the sun disk: the half short side minus a tenth of itself
pub fn sun_radius(width: usize, height: usize) -> i32 {
    let half = (width / 2).min(height / 2) as i32;
    half - half / 10
}

/// Gradient sky with a centered gradient sun
pub fn build_sun(output_path: &Path, width: usize, height: usize) -> Result<Canvas> {
    let mut canvas = Canvas::new(output_path, width, height)?;
    canvas.fill_gradient_background(SKY_TOP, SKY_BOTTOM);
    let sun = Region::centered_disk(width, height, sun_radius(width, height));
    canvas.fill_gradient(&sun, SUN_TOP, SUN_BOTTOM);
    Ok(canvas)
}

/// 4x4 grid of noisy rectangles, each around its own random base color
pub fn build_noise_grid(
    output_path: &Path,
    width: usize,
    height: usize,
    rng: &mut impl RandomSource,
) -> Result<Canvas> {
    let mut canvas = Canvas::new(output_path, width, height)?;
    let cell_x = (width / GRID_CELLS) as i32;
    let cell_y = (height / GRID_CELLS) as i32;
    for i in 0..GRID_CELLS as i32 {
        for j in 0..GRID_CELLS as i32 {
            let base = Color::new(
                rng.below(255) as i32,
                rng.below(255) as i32,
                rng.below(255) as i32,
            );
            let cell = Region::rectangle(j * cell_x, i * cell_y, cell_x, cell_y);
            canvas.fill_noise(&cell, base, rng);
        }
    }
    Ok(canvas)
}

pub fn build_rays(output_path: &Path, width: usize, height: usize) -> Result<Canvas> {
    let mut shader = RayShader::new(output_path, width, height)?;
    shader.prepare_rays();
    shader.fill_pixels_from_rays();
    Ok(shader.into_canvas())
}

/// Cross products, parallelogram areas, triangle normals and areas
pub fn build_geometry_report(output_path: &Path) -> GeometryReport {
    let mut report = GeometryReport::new(output_path);

    let pairs = [
        (Vec3::new(3.5, 0.0, 0.0), Vec3::new(1.75, 3.5, 0.0)),
        (Vec3::new(3.0, -3.0, 1.0), Vec3::new(4.0, 9.0, 3.0)),
        (Vec3::new(3.0, -3.0, 1.0), Vec3::new(-12.0, 12.0, -4.0)),
    ];
    report.heading("Cross products");
    for (a, b) in &pairs {
        report.entry(&format!("{} x {}", a, b), a.cross(b));
    }
    report.heading("Parallelogram areas");
    for (a, b) in &pairs {
        report.entry(&format!("|{} x {}|", a, b), a.parallelogram_area(b));
    }

    let triangles = [
        Triangle::new(
            Vec3::new(-1.75, -1.75, -3.0),
            Vec3::new(1.75, -1.75, -3.0),
            Vec3::new(0.0, 1.75, -3.0),
        ),
        Triangle::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ),
        Triangle::new(
            Vec3::new(-1.0, 2.0, 0.5),
            Vec3::new(3.0, 0.0, -2.0),
            Vec3::new(1.0, 4.0, 2.0),
        ),
    ];
    for (n, triangle) in triangles.iter().enumerate() {
        report.heading(&format!("Triangle {}", n + 1));
        report
            .entry("vertices", triangle)
            .entry("normal", triangle.normal())
            .entry("area", triangle.area());
    }
    report
}

// ============================================================================
// Drivers: build, then write to disk
// ============================================================================

pub fn draw_sun(output_path: &Path, width: usize, height: usize) -> Result<Canvas> {
    let canvas = build_sun(output_path, width, height)?;
    canvas.draw()?;
    Ok(canvas)
}

pub fn draw_noise_grid(
    output_path: &Path,
    width: usize,
    height: usize,
    rng: &mut impl RandomSource,
) -> Result<Canvas> {
    let canvas = build_noise_grid(output_path, width, height, rng)?;
    canvas.draw()?;
    Ok(canvas)
}

pub fn draw_rays(output_path: &Path, width: usize, height: usize) -> Result<Canvas> {
    let canvas = build_rays(output_path, width, height)?;
    canvas.draw()?;
    Ok(canvas)
}

pub fn write_geometry_report(output_path: &Path) -> Result<GeometryReport> {
    let report = build_geometry_report(output_path);
    report.write()?;
    info!("{} report lines", report.lines().len());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::Rng;
    use std::path::PathBuf;

    fn temp(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pixeldump-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_sun_radius() {
        assert_eq!(sun_radius(1920, 1080), 486);
        assert_eq!(sun_radius(40, 40), 18);
    }

    #[test]
    fn test_sun_layout() {
        let canvas = build_sun(Path::new("sun.ppm"), 40, 30).unwrap();
        // Corners stay sky
        assert_eq!(canvas.pixel(0, 0), Some(SKY_TOP));
        assert_eq!(canvas.pixel(29, 39), Some(SKY_TOP.interpolate(&SKY_BOTTOM, 29.0 / 30.0)));
        // Center is sun, blended by its row against the full height
        assert_eq!(canvas.pixel(15, 20), Some(SUN_TOP.interpolate(&SUN_BOTTOM, 0.5)));
    }

    #[test]
    fn test_noise_grid_is_reproducible() {
        let canvas = build_noise_grid(Path::new("grid.ppm"), 8, 8, &mut Rng::new(21)).unwrap();
        let again = build_noise_grid(Path::new("grid.ppm"), 8, 8, &mut Rng::new(21)).unwrap();
        assert_eq!(canvas, again);
    }

    #[test]
    fn test_noise_grid_cells_are_gray_shifted() {
        // Replay the grid's draws: three base channels per cell, then a coin
        // and a magnitude per interior cell in row-major order
        let (size, cell) = (16usize, 16 / GRID_CELLS);
        let canvas = build_noise_grid(Path::new("grid.ppm"), size, size, &mut Rng::new(21)).unwrap();
        let mut rng = Rng::new(21);
        let mut unclamped = 0;
        for i in 0..GRID_CELLS {
            for j in 0..GRID_CELLS {
                let base = Color::new(
                    rng.below(255) as i32,
                    rng.below(255) as i32,
                    rng.below(255) as i32,
                );
                for row in i * cell..(i + 1) * cell {
                    for col in j * cell..(j + 1) * cell {
                        let noisy = base.add_noise(&mut rng);
                        let p = canvas.pixel(row, col).unwrap();
                        assert_eq!(p, noisy, "({}, {})", row, col);
                        if [p.r, p.g, p.b].iter().all(|&v| v > 0 && v < 255) {
                            let shift = p.r - base.r;
                            assert_eq!(p.g - base.g, shift);
                            assert_eq!(p.b - base.b, shift);
                            unclamped += 1;
                        }
                    }
                }
            }
        }
        assert!(unclamped > 0);
    }

    #[test]
    fn test_noise_grid_leaves_remainder_black() {
        // 10 / 4 = 2 cells wide, so columns and rows 8..10 are never filled
        let canvas = build_noise_grid(Path::new("grid.ppm"), 10, 10, &mut Rng::new(3)).unwrap();
        for k in 0..10 {
            assert_eq!(canvas.pixel(k, 9), Some(Color::BLACK));
            assert_eq!(canvas.pixel(9, k), Some(Color::BLACK));
        }
    }

    #[test]
    fn test_rays_scenario_center_is_blue() {
        let canvas = build_rays(Path::new("rays.ppm"), 1, 1).unwrap();
        assert_eq!(canvas.pixel(0, 0), Some(Color::new(0, 0, 255)));
    }

    #[test]
    fn test_geometry_report_contents() {
        let report = build_geometry_report(Path::new("geometry.txt"));
        let text = report.lines().join("\n");
        assert!(text.contains("Vector(3.5, 0, 0) x Vector(1.75, 3.5, 0) = Vector(0, 0, 12.25)"));
        assert!(text.contains("area = 6.125"));
        assert!(text.contains("normal = Vector(0, 0, 1)"));
    }

    #[test]
    fn test_drivers_write_files() {
        let sun = temp("sun.ppm");
        let report = temp("geometry.txt");
        draw_sun(&sun, 12, 8).unwrap();
        write_geometry_report(&report).unwrap();
        let dump = std::fs::read_to_string(&sun).unwrap();
        let text = std::fs::read_to_string(&report).unwrap();
        let _ = std::fs::remove_file(&sun);
        let _ = std::fs::remove_file(&report);
        assert!(dump.starts_with("P3\n12 8\n255\n"));
        assert!(text.starts_with("Cross products:\n"));
    }
}
