// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The knobs.  Every number that shapes the output has a name here,
//! and `Config::default()` reproduces the classic picture: the whole
//! set, radius 4, and a 270 frame reveal growing by 2.3% per frame.

use errors::{MandelbrotError, Result};
use planes::Region;

/// Real axis bounds of the default region.
pub const DEFAULT_REAL_RANGE: (f64, f64) = (-2.0, 1.0);

/// Imaginary axis bounds of the default region.
pub const DEFAULT_IMAGINARY_RANGE: (f64, f64) = (-1.5, 1.5);

/// An orbit whose magnitude exceeds this has escaped.
pub const DEFAULT_DIVERGENCE_RADIUS: f64 = 4.0;

/// Frame `i` of an animation runs with `round(base^(i+1))` iterations.
pub const DEFAULT_GROWTH_BASE: f64 = 1.023;

/// Number of frames in an animation.
pub const DEFAULT_FRAME_COUNT: usize = 270;

/// Delay between animation frames, in milliseconds.
pub const DEFAULT_FRAME_INTERVAL_MS: u32 = 20;

/// Iteration budget for still images.
pub const DEFAULT_THRESHOLD: u32 = 120;

/// Samples per axis for still images.
pub const DEFAULT_DENSITY: usize = 1000;

/// Samples per axis for animations.  GIF quantization is slow, so
/// animations default to something smaller.
pub const DEFAULT_ANIMATION_DENSITY: usize = 300;

/// Describes one run of the generator.  Once validated, this should
/// not change.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Config {
    /// The part of the complex plane being sampled.
    pub region: Region,
    /// Samples per axis.
    pub density: usize,
    /// Escape bound for the orbit magnitude.
    pub divergence_radius: f64,
    /// Base of the per-frame threshold curve.
    pub growth_base: f64,
    /// Frames in an animation.
    pub frame_count: usize,
    /// Milliseconds between animation frames.
    pub frame_interval_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            region: Region::default(),
            density: DEFAULT_DENSITY,
            divergence_radius: DEFAULT_DIVERGENCE_RADIUS,
            growth_base: DEFAULT_GROWTH_BASE,
            frame_count: DEFAULT_FRAME_COUNT,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
        }
    }
}

impl Config {
    /// Replace the number of samples per axis.
    pub fn with_density(self, density: usize) -> Self {
        Config { density, ..self }
    }

    /// Replace the sampled region.
    pub fn with_region(self, region: Region) -> Self {
        Config { region, ..self }
    }

    /// Replace the divergence radius.
    pub fn with_divergence_radius(self, divergence_radius: f64) -> Self {
        Config {
            divergence_radius,
            ..self
        }
    }

    /// Replace the threshold growth base.
    pub fn with_growth_base(self, growth_base: f64) -> Self {
        Config {
            growth_base,
            ..self
        }
    }

    /// Replace the number of animation frames.
    pub fn with_frame_count(self, frame_count: usize) -> Self {
        Config {
            frame_count,
            ..self
        }
    }

    /// Replace the delay between animation frames.
    pub fn with_frame_interval_ms(self, frame_interval_ms: u32) -> Self {
        Config {
            frame_interval_ms,
            ..self
        }
    }

    /// Checks everything that can be checked before any work is
    /// done.  The region validates itself on construction.
    pub fn validate(&self) -> Result<()> {
        if self.density < 1 {
            return Err(MandelbrotError::InvalidDensity {
                density: self.density,
            });
        }
        if !self.divergence_radius.is_finite() || self.divergence_radius <= 0.0 {
            return Err(MandelbrotError::InvalidRadius {
                radius: self.divergence_radius,
            });
        }
        // A base below one would round early frames down to zero
        // iterations.
        if !self.growth_base.is_finite() || self.growth_base < 1.0 {
            return Err(MandelbrotError::InvalidGrowthBase {
                base: self.growth_base,
            });
        }
        Ok(())
    }
}
