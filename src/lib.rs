#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot escape-time fields
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which the orbit of `z = z * z + c`, started at zero, stays
//! bounded.  Points outside the set escape, some quickly and some
//! only after many iterations, and the number of iterations it takes
//! is what gets painted.  Points that never escape within the budget
//! all share the largest count and form the black heart of the
//! picture.
//!
//! This crate computes those counts over a square grid of sample
//! points (a "field"), either once at a fixed budget for a still
//! image, or as a sequence of fields with a growing budget that,
//! played back, shows the set resolving out of a blur.  Rendering the
//! fields as PNG or GIF is kept in its own module and never touches
//! the computation.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;

#[cfg(test)]
extern crate tempfile;

pub mod config;
pub mod errors;
pub mod escape;
pub mod field;
pub mod frames;
pub mod planes;
pub mod render;

pub use config::Config;
pub use errors::{MandelbrotError, RenderError};
pub use escape::{escape_time, iterations_until_diverge};
pub use field::{generate_field, Field, FieldGenerator};
pub use frames::{frame_threshold, generate_animation_frames, Frames, ParallelFrames};
pub use planes::{Cell, Region, SampleGrid};
pub use render::{write_gif, write_png, AnimationWriter, ColorMap};
