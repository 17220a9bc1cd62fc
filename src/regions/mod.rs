mod scene;

pub use scene::{Background, Scene, Shape, ShapeRegion};

use serde::{Deserialize, Serialize};

/// Slack added to the squared radius so boundary cells count as inside
pub const DISK_EPSILON: f64 = 0.0001;

/// Which canvas cells a fill targets.
///
/// Coordinates are in cells: `x` is the column, `y` is the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Region {
    Disk {
        center_x: i32,
        center_y: i32,
        radius: i32,
    },
    Rectangle {
        from_x: i32,
        from_y: i32,
        size_x: i32,
        size_y: i32,
    },
}

impl Region {
    pub fn disk(center_x: i32, center_y: i32, radius: i32) -> Self {
        Region::Disk {
            center_x,
            center_y,
            radius,
        }
    }

    /// Disk centered on a `width` x `height` canvas
    pub fn centered_disk(width: usize, height: usize, radius: i32) -> Self {
        Self::disk((width / 2) as i32, (height / 2) as i32, radius)
    }

    pub fn rectangle(from_x: i32, from_y: i32, size_x: i32, size_y: i32) -> Self {
        Region::Rectangle {
            from_x,
            from_y,
            size_x,
            size_y,
        }
    }

    /// Membership test for the cell at (`row`, `col`) on a canvas of the given size
    pub fn contains(&self, row: usize, col: usize, width: usize, height: usize) -> bool {
        match *self {
            Region::Disk {
                center_x,
                center_y,
                radius,
            } => {
                let dx = (col as f64 - center_x as f64).powi(2);
                let dy = (row as f64 - center_y as f64).powi(2);
                let radius_squared = (radius as f64).powi(2);
                dx + dy - radius_squared < DISK_EPSILON
            },
            Region::Rectangle {
                from_x,
                from_y,
                size_x,
                size_y,
            } => {
                let (col, row) = (col as i64, row as i64);
                let end_x = (from_x as i64 + size_x as i64).min(width as i64);
                let end_y = (from_y as i64 + size_y as i64).min(height as i64);
                col >= from_x as i64 && col < end_x && row >= from_y as i64 && row < end_y
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_includes_boundary() {
        let disk = Region::disk(5, 5, 3);
        assert!(disk.contains(5, 5, 10, 10));
        assert!(disk.contains(5, 8, 10, 10)); // exactly on the radius
        assert!(disk.contains(2, 5, 10, 10));
        assert!(!disk.contains(5, 9, 10, 10));
        assert!(!disk.contains(8, 8, 10, 10)); // corner of the bounding box
    }

    #[test]
    fn test_zero_radius_disk_is_center_only() {
        let disk = Region::disk(2, 2, 0);
        assert!(disk.contains(2, 2, 5, 5));
        assert!(!disk.contains(2, 3, 5, 5));
    }

    #[test]
    fn test_centered_disk() {
        assert_eq!(Region::centered_disk(1920, 1080, 486), Region::disk(960, 540, 486));
    }

    #[test]
    fn test_rectangle_bounds() {
        let rect = Region::rectangle(1, 1, 2, 2);
        let inside: Vec<(usize, usize)> = (0..4)
            .flat_map(|i| (0..4).map(move |j| (i, j)))
            .filter(|&(i, j)| rect.contains(i, j, 4, 4))
            .collect();
        assert_eq!(inside, vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
    }

    #[test]
    fn test_rectangle_clipped_to_canvas() {
        let rect = Region::rectangle(2, 2, 100, 100);
        assert!(rect.contains(3, 3, 4, 4));
        assert!(!rect.contains(1, 3, 4, 4));
        // Cells beyond the canvas are never inside, even within the extent
        assert!(!rect.contains(4, 4, 4, 4));
    }

    #[test]
    fn test_negative_origin() {
        let rect = Region::rectangle(-2, -2, 3, 3);
        assert!(rect.contains(0, 0, 4, 4));
        assert!(!rect.contains(1, 0, 4, 4));
    }

    #[test]
    fn test_region_json() {
        let json = serde_json::to_string(&Region::rectangle(0, 1, 2, 3)).unwrap();
        assert_eq!(json, r#"{"shape":"rectangle","from_x":0,"from_y":1,"size_x":2,"size_y":3}"#);
        let back: Region = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Region::rectangle(0, 1, 2, 3));
    }
}
