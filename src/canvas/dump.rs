//! Plain-text pixel dump (PPM "P3")
//!
//! ```text
//! P3
//! <width> <height>
//! 255
//! R G B\tR G B\t...   one line per row
//! ```

use std::io::Write;
use std::path::PathBuf;

use super::Canvas;
use crate::color::{Color, MAX_CHANNEL};
use crate::error::{Error, Result};

/// Format tag on the first line of every dump
pub const MAGIC_NUMBER: &str = "P3";

impl Canvas {
    /// Serialize the grid. Every triple is followed by a tab, every row by a newline.
    pub fn write_dump<W: Write>(&self, w: &mut W) -> Result<()> {
        writeln!(w, "{}", MAGIC_NUMBER)?;
        writeln!(w, "{} {}", self.width, self.height)?;
        writeln!(w, "{}", MAX_CHANNEL)?;
        for row in self.rows() {
            for color in row {
                write!(w, "{}\t", color)?;
            }
            writeln!(w)?;
        }
        w.flush()?;
        Ok(())
    }

    /// The dump as a string
    pub fn to_dump(&self) -> Result<String> {
        let mut out = Vec::with_capacity(self.width * self.height * 12 + 16);
        self.write_dump(&mut out)?;
        String::from_utf8(out).map_err(|e| Error::MalformedDump(e.to_string()))
    }
}

fn parse_number(token: &str, what: &str) -> Result<i64> {
    token
        .parse()
        .map_err(|_| Error::MalformedDump(format!("bad {} '{}'", what, token)))
}

fn next_number<'a>(tokens: &mut impl Iterator<Item = &'a str>, what: &str) -> Result<i64> {
    let token = tokens
        .next()
        .ok_or_else(|| Error::MalformedDump(format!("missing {}", what)))?;
    parse_number(token, what)
}

/// Parse a dump back into a canvas bound to `output_path`.
///
/// Only whitespace separation is required between tokens; channel values
/// must lie within [0, max value].
pub fn parse_dump(text: &str, output_path: impl Into<PathBuf>) -> Result<Canvas> {
    let mut tokens = text.split_whitespace();

    match tokens.next() {
        Some(MAGIC_NUMBER) => {},
        Some(other) => {
            return Err(Error::MalformedDump(format!("unexpected format tag '{}'", other)));
        },
        None => return Err(Error::MalformedDump("empty input".into())),
    }

    let width = next_number(&mut tokens, "width")?;
    let height = next_number(&mut tokens, "height")?;
    let max_value = next_number(&mut tokens, "max value")?;
    if width <= 0 || height <= 0 {
        return Err(Error::InvalidDimensions {
            width: width.max(0) as usize,
            height: height.max(0) as usize,
        });
    }
    if !(1..=i64::from(MAX_CHANNEL)).contains(&max_value) {
        return Err(Error::MalformedDump(format!("unsupported max value {}", max_value)));
    }

    let (width, height) = (width as u64, height as u64);
    let expected = width
        .checked_mul(height)
        .and_then(|cells| cells.checked_mul(3))
        .ok_or_else(|| Error::MalformedDump(format!("size {}x{} is too large", width, height)))?;
    // Count before allocating so the header alone cannot size the canvas
    let values: Vec<&str> = tokens.collect();
    if values.len() as u64 != expected {
        return Err(Error::MalformedDump(format!(
            "expected {} channel values for {}x{}, found {}",
            expected,
            width,
            height,
            values.len()
        )));
    }

    let mut canvas = Canvas::new(output_path, width as usize, height as usize)?;
    for (idx, triple) in values.chunks_exact(3).enumerate() {
        let channel = |token: &str, name: &str| -> Result<i32> {
            let v = parse_number(token, name)?;
            if (0..=max_value).contains(&v) {
                Ok(v as i32)
            } else {
                Err(Error::MalformedDump(format!("{} value {} out of range", name, v)))
            }
        };
        let r = channel(triple[0], "red")?;
        let g = channel(triple[1], "green")?;
        let b = channel(triple[2], "blue")?;
        canvas.pixels[idx] = Color::new(r, g, b);
    }
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::Region;
    use crate::util::Rng;

    #[test]
    fn test_layout() {
        let mut c = Canvas::new("t.ppm", 2, 2).unwrap();
        c.fill_solid_background(Color::new(1, 2, 3));
        c.set_pixel(1, 0, Color::new(255, 0, 9));
        assert_eq!(
            c.to_dump().unwrap(),
            "P3\n2 2\n255\n1 2 3\t1 2 3\t\n255 0 9\t1 2 3\t\n"
        );
    }

    #[test]
    fn test_solid_4x4_every_triple() {
        let mut c = Canvas::new("t.ppm", 4, 4).unwrap();
        c.fill_solid_background(Color::new(10, 20, 30));
        let dump = c.to_dump().unwrap();
        let body: Vec<&str> = dump.lines().skip(3).collect();
        assert_eq!(body.len(), 4);
        for line in body {
            let triples: Vec<&str> = line.split('\t').filter(|s| !s.is_empty()).collect();
            assert_eq!(triples, vec!["10 20 30"; 4]);
        }
    }

    #[test]
    fn test_parse_recovers_grid() {
        let mut c = Canvas::new("t.ppm", 7, 5).unwrap();
        c.fill_gradient_background(Color::new(173, 216, 230), Color::new(250, 218, 221));
        c.fill_noise(&Region::rectangle(1, 1, 3, 3), Color::new(90, 10, 200), &mut Rng::new(3));
        c.fill_solid(&Region::disk(5, 3, 1), Color::new(0, 255, 0));
        let parsed = parse_dump(&c.to_dump().unwrap(), "t.ppm").unwrap();
        assert_eq!(parsed, c);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(parse_dump("", "x"), Err(Error::MalformedDump(_))));
        assert!(matches!(parse_dump("P6\n1 1\n255\n0 0 0", "x"), Err(Error::MalformedDump(_))));
        assert!(matches!(parse_dump("P3\n1 1\n255\n0 0", "x"), Err(Error::MalformedDump(_))));
        assert!(matches!(parse_dump("P3\n1 1\n255\n0 0 256", "x"), Err(Error::MalformedDump(_))));
        assert!(matches!(parse_dump("P3\n1 1\n255\n0 0 0 7", "x"), Err(Error::MalformedDump(_))));
        assert!(matches!(
            parse_dump("P3\n0 1\n255\n", "x"),
            Err(Error::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_huge_header_without_pixels() {
        assert!(matches!(
            parse_dump("P3\n4294967296 4294967296\n255\n", "x"),
            Err(Error::MalformedDump(_))
        ));
        assert!(matches!(
            parse_dump("P3\n100000 100000\n255\n0 0 0\n", "x"),
            Err(Error::MalformedDump(_))
        ));
        assert!(matches!(
            parse_dump(&format!("P3\n{} {}\n255\n", i64::MAX, i64::MAX), "x"),
            Err(Error::MalformedDump(_))
        ));
    }

    #[test]
    fn test_draw_then_read_back() {
        let path = std::env::temp_dir().join(format!("pixeldump-dump-{}.ppm", std::process::id()));
        let mut c = Canvas::new(&path, 3, 3).unwrap();
        c.fill_solid(&Region::rectangle(0, 0, 2, 1), Color::new(7, 8, 9));
        c.draw().unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(parse_dump(&text, &path).unwrap(), c);
    }
}
