// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Field generation.  A field is the escape count of every point in
//! a sample grid at one fixed threshold: the raw material for a still
//! image, or for one frame of an animation.
//!
//! Every cell is independent of every other, so the generator can
//! walk the grid lazily one cell at a time, or hand contiguous bands
//! of rows to worker threads.  Either way cell `[row, col]` ends up
//! holding the count for `real_axis[row] + imaginary_axis[col] * i`.

use crossbeam;
use itertools::iproduct;
use std::panic;
use std::slice::Chunks;

use config::Config;
use errors::{MandelbrotError, Result};
use escape::escape_time;
use planes::{Cell, SampleGrid};

/// A density by density matrix of escape counts, stored row-major.
/// Rows follow the real axis, columns the imaginary axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    density: usize,
    threshold: u32,
    counts: Vec<u32>,
}

impl Field {
    /// Samples per axis.
    pub fn density(&self) -> usize {
        self.density
    }

    /// The iteration budget every cell was computed with.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// The count at `[row, col]`.
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.counts[row * self.density + col]
    }

    /// All counts, row-major.
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// The field one row (one real coordinate) at a time.
    pub fn rows(&self) -> Chunks<u32> {
        self.counts.chunks(self.density)
    }

    /// Smallest and largest count in the field.
    pub fn bounds(&self) -> (u32, u32) {
        self.counts
            .iter()
            .fold((u32::max_value(), 0), |(lo, hi), &c| (lo.min(c), hi.max(c)))
    }

    /// Hands the raw buffer back.
    pub fn into_counts(self) -> Vec<u32> {
        self.counts
    }
}

/// Owns a sample grid and a divergence radius, and turns thresholds
/// into fields.  Once built, this object should not be mutable; it is
/// shared by reference across worker threads.
#[derive(Clone, Debug)]
pub struct FieldGenerator {
    grid: SampleGrid,
    radius: f64,
}

impl FieldGenerator {
    /// Validates the configuration and lays out the sample grid.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let grid = SampleGrid::new(&config.region, config.density)?;
        debug!(
            "Sample grid: {}x{} over {:?}",
            grid.density(),
            grid.density(),
            config.region
        );
        Ok(FieldGenerator {
            grid,
            radius: config.divergence_radius,
        })
    }

    /// A generator over the default region with the default radius.
    pub fn with_density(density: usize) -> Result<Self> {
        FieldGenerator::new(&Config::default().with_density(density))
    }

    /// The sample grid behind this generator.
    pub fn grid(&self) -> &SampleGrid {
        &self.grid
    }

    /// Every cell of the grid paired with its escape count, in
    /// row-major order.  Nothing is computed until the iterator is
    /// pulled, and the iterator can be cloned to start over.
    pub fn cells<'a>(
        &'a self,
        threshold: u32,
    ) -> Result<impl Iterator<Item = (Cell, u32)> + Clone + 'a> {
        check_threshold(threshold)?;
        Ok(self.walk(threshold))
    }

    fn walk<'a>(&'a self, threshold: u32) -> impl Iterator<Item = (Cell, u32)> + Clone + 'a {
        let density = self.grid.density();
        iproduct!(0..density, 0..density).map(move |(row, col)| {
            let cell = Cell(row, col);
            let count = escape_time(self.grid.cell_to_point(&cell), threshold, self.radius);
            (cell, count)
        })
    }

    /// The single-threaded field.
    pub fn field(&self, threshold: u32) -> Result<Field> {
        check_threshold(threshold)?;
        Ok(self.compute(threshold))
    }

    /// `field` without the threshold check, for callers that have
    /// already validated a whole batch of thresholds.
    pub(crate) fn compute(&self, threshold: u32) -> Field {
        let density = self.grid.density();
        let counts: Vec<u32> = self.walk(threshold).map(|(_, count)| count).collect();
        debug!("Rendered field at threshold {}", threshold);
        Field {
            density,
            threshold,
            counts,
        }
    }

    /// A multi-threaded version of `field` that takes a thread count.
    /// The rows are split into contiguous bands, one per thread, and
    /// each thread writes only to its own band.
    pub fn field_threaded(&self, threshold: u32, threads: usize) -> Result<Field> {
        check_threshold(threshold)?;
        check_threads(threads)?;
        let density = self.grid.density();
        let mut counts = vec![0 as u32; self.grid.len()];
        let rows_per_band = (density + threads - 1) / threads;

        {
            let bands: Vec<&mut [u32]> = counts.chunks_mut(rows_per_band * density).collect();
            let outcome = crossbeam::scope(|spawner| {
                for (band, region) in bands.into_iter().enumerate() {
                    spawner.spawn(move |_| {
                        let first_row = band * rows_per_band;
                        for (offset, row) in region.chunks_mut(density).enumerate() {
                            self.render_row(first_row + offset, threshold, row);
                        }
                    });
                }
            });
            if let Err(cause) = outcome {
                panic::resume_unwind(cause);
            }
        }

        debug!(
            "Rendered field at threshold {} on {} threads",
            threshold, threads
        );
        Ok(Field {
            density,
            threshold,
            counts,
        })
    }

    /// Fills one row of the field buffer.
    fn render_row(&self, row: usize, threshold: u32, buffer: &mut [u32]) {
        for (col, count) in buffer.iter_mut().enumerate() {
            let point = self.grid.cell_to_point(&Cell(row, col));
            *count = escape_time(point, threshold, self.radius);
        }
    }
}

pub(crate) fn check_threshold(threshold: u32) -> Result<()> {
    if threshold < 1 {
        return Err(MandelbrotError::InvalidThreshold { threshold });
    }
    Ok(())
}

pub(crate) fn check_threads(threads: usize) -> Result<()> {
    if threads < 1 {
        return Err(MandelbrotError::InvalidThreads { threads });
    }
    Ok(())
}

/// The escape-count matrix of the default region, [-2, 1] x
/// [-1.5i, 1.5i], at `density` samples per axis.  Both arguments are
/// checked before anything is allocated.
pub fn generate_field(threshold: u32, density: usize) -> Result<Field> {
    check_threshold(threshold)?;
    FieldGenerator::with_density(density)?.field(threshold)
}
