//! RGB color with integer channels
//!
//! Channels are plain `i32` so that subtraction can produce the signed
//! offsets interpolation needs. Every public way of building a color clamps
//! into [0, 255]; only [`Sub`] yields an out-of-range intermediate.

use std::fmt;
use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::util::{clamp, RandomSource};

/// Largest value a channel can hold
pub const MAX_CHANNEL: i32 = 255;

/// An RGB color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i32; 3]", into = "[i32; 3]")]
pub struct Color {
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::gray(MAX_CHANNEL);

    /// Build a color, clamping each channel into [0, 255]
    pub const fn new(r: i32, g: i32, b: i32) -> Self {
        Self {
            r: clamp(r, 0, MAX_CHANNEL),
            g: clamp(g, 0, MAX_CHANNEL),
            b: clamp(b, 0, MAX_CHANNEL),
        }
    }

    /// Grayscale color (same value for R, G, B)
    pub const fn gray(v: i32) -> Self {
        Self::new(v, v, v)
    }

    /// Absolute distance of every channel from 255
    pub fn invert(&self) -> Self {
        Self {
            r: (MAX_CHANNEL - self.r).abs(),
            g: (MAX_CHANNEL - self.g).abs(),
            b: (MAX_CHANNEL - self.b).abs(),
        }
    }

    /// Linear blend towards `other`: `(other - self) * t + self`.
    ///
    /// Composed from the channel operators, so the same caps apply: the
    /// scale step saturates at 255 and the final add saturates at 255.
    pub fn interpolate(&self, other: &Color, t: f64) -> Self {
        (*other - *self) * t + *self
    }

    /// Shift all three channels by the same random gray offset.
    ///
    /// The sign comes from a coin flip, the magnitude is uniform in
    /// [0, 255). Each channel is clamped afterwards.
    pub fn add_noise(&self, rng: &mut impl RandomSource) -> Self {
        let positive = rng.coin();
        let magnitude = rng.below(MAX_CHANNEL as u32) as i32;
        let offset = if positive { magnitude } else { -magnitude };
        Self::new(self.r + offset, self.g + offset, self.b + offset)
    }

    /// Channels as an array, in R, G, B order
    pub fn to_array(self) -> [i32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Add for Color {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            r: (self.r + other.r).min(MAX_CHANNEL),
            g: (self.g + other.g).min(MAX_CHANNEL),
            b: (self.b + other.b).min(MAX_CHANNEL),
        }
    }
}

/// Channel-wise difference, left unclamped
impl Sub for Color {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            r: self.r - other.r,
            g: self.g - other.g,
            b: self.b - other.b,
        }
    }
}

/// Scale every channel, capping at 255 and truncating toward zero.
/// Negative multipliers leave the color unchanged.
impl Mul<f64> for Color {
    type Output = Self;
    #[inline]
    fn mul(self, multiplier: f64) -> Self {
        if multiplier < 0.0 {
            return self;
        }
        let scale = |c: i32| (c as f64 * multiplier).min(MAX_CHANNEL as f64) as i32;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
        }
    }
}

impl From<[i32; 3]> for Color {
    fn from([r, g, b]: [i32; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Color> for [i32; 3] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

/// Renders as a pixel-dump triple: `R G B`
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.r, self.g, self.b)
    }
}
