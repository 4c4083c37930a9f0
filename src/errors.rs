// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error types.  Computation errors and output errors are kept
//! apart: a bad density is the caller's problem, a full disk is
//! the renderer's.

use image::ImageError;
use std::io;

/// Everything that can go wrong before a field is computed.  All of
/// these are detected up front; once a computation starts it always
/// completes.
#[derive(Debug, Fail, PartialEq)]
pub enum MandelbrotError {
    /// The iteration budget must be at least one.
    #[fail(display = "Invalid threshold {}: must be at least 1", threshold)]
    InvalidThreshold {
        /// The rejected value.
        threshold: u32,
    },

    /// The grid must have at least one sample per axis.
    #[fail(display = "Invalid density {}: must be at least 1", density)]
    InvalidDensity {
        /// The rejected value.
        density: usize,
    },

    /// The corners of the region do not describe a rectangle.
    #[fail(display = "Invalid region: {}", reason)]
    InvalidRegion {
        /// What was wrong with it.
        reason: String,
    },

    /// The divergence radius must be a positive finite number.
    #[fail(display = "Invalid divergence radius {}", radius)]
    InvalidRadius {
        /// The rejected value.
        radius: f64,
    },

    /// The threshold growth base must be finite and at least 1.0.
    #[fail(display = "Invalid growth base {}: must be at least 1.0", base)]
    InvalidGrowthBase {
        /// The rejected value.
        base: f64,
    },

    /// Threaded generation needs at least one worker.
    #[fail(display = "Invalid thread count {}", threads)]
    InvalidThreads {
        /// The rejected value.
        threads: usize,
    },
}

/// Failures while writing a field or an animation out to disk.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// The output file could not be created or written.
    #[fail(display = "I/O error: {}", _0)]
    Io(#[cause] io::Error),

    /// The image encoder refused the data.
    #[fail(display = "Encoding error: {}", _0)]
    Image(#[cause] ImageError),
}

impl From<io::Error> for RenderError {
    fn from(err: io::Error) -> RenderError {
        RenderError::Io(err)
    }
}

impl From<ImageError> for RenderError {
    fn from(err: ImageError) -> RenderError {
        RenderError::Image(err)
    }
}

/// Result alias for computation.
pub type Result<T> = ::std::result::Result<T, MandelbrotError>;
