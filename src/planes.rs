//! Contains the Region and SampleGrid structs.  A Region is a
//! rectangle on the complex plane, defined by its leftlower and
//! rightupper corners.  A SampleGrid lays a square lattice of
//! `density` by `density` points over a Region, spaced evenly and
//! including both edges of each axis.
use num::Complex;

use config::{DEFAULT_IMAGINARY_RANGE, DEFAULT_REAL_RANGE};
use errors::{MandelbrotError, Result};

/// Describes the lower-left corner and upper-right corner of a
/// rectangle on the complex plane, treating the real part of each
/// value as the x-component and the imaginary part of each value as
/// the y-component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Region(Complex<f64>, Complex<f64>);

/// The (row, column) of a cell in a sample grid.  Rows walk the real
/// axis, columns walk the imaginary axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cell(pub usize, pub usize);

impl Region {
    /// Constructor.  Fails if the corners are not finite, or if
    /// `leftlower` is not strictly to the left of and below
    /// `rightupper`.
    pub fn new(leftlower: Complex<f64>, rightupper: Complex<f64>) -> Result<Region> {
        let corners = [leftlower.re, leftlower.im, rightupper.re, rightupper.im];
        if corners.iter().any(|c| !c.is_finite()) {
            return Err(MandelbrotError::InvalidRegion {
                reason: "The corners of the region must be finite.".to_string(),
            });
        }

        if rightupper.re <= leftlower.re {
            return Err(MandelbrotError::InvalidRegion {
                reason: "The left lower corner is not to the left of the right upper corner."
                    .to_string(),
            });
        }

        if rightupper.im <= leftlower.im {
            return Err(MandelbrotError::InvalidRegion {
                reason: "The left lower corner is not lower than the right upper corner."
                    .to_string(),
            });
        }

        Ok(Region(leftlower, rightupper))
    }

    /// The lower-left corner.
    pub fn leftlower(&self) -> Complex<f64> {
        self.0
    }

    /// The upper-right corner.
    pub fn rightupper(&self) -> Complex<f64> {
        self.1
    }
}

impl Default for Region {
    /// The whole of the Mandelbrot set: [-2, 1] x [-1.5i, 1.5i].
    fn default() -> Self {
        Region(
            Complex::new(DEFAULT_REAL_RANGE.0, DEFAULT_IMAGINARY_RANGE.0),
            Complex::new(DEFAULT_REAL_RANGE.1, DEFAULT_IMAGINARY_RANGE.1),
        )
    }
}

/// `count` evenly spaced values from `start` to `end`, both ends
/// included.  A single sample sits on `start`.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (end - start) / ((count - 1) as f64);
            let mut values: Vec<f64> = (0..count).map(|i| start + (i as f64) * step).collect();
            // Accumulated rounding must not move the far edge.
            values[count - 1] = end;
            values
        }
    }
}

/// The lattice of complex sample points laid over a region.
#[derive(Clone, Debug)]
pub struct SampleGrid {
    density: usize,
    real_axis: Vec<f64>,
    imaginary_axis: Vec<f64>,
}

impl SampleGrid {
    /// Lays `density` samples along each axis of `region`.
    pub fn new(region: &Region, density: usize) -> Result<SampleGrid> {
        if density < 1 {
            return Err(MandelbrotError::InvalidDensity { density });
        }
        Ok(SampleGrid {
            density,
            real_axis: linspace(region.0.re, region.1.re, density),
            imaginary_axis: linspace(region.0.im, region.1.im, density),
        })
    }

    /// Samples per axis.
    pub fn density(&self) -> usize {
        self.density
    }

    /// The total number of points in the grid.  Used to calculate
    /// memory needs.
    pub fn len(&self) -> usize {
        self.density * self.density
    }

    /// Never true for a grid built by `new`.
    pub fn is_empty(&self) -> bool {
        self.density == 0
    }

    /// The real coordinate of each row.
    pub fn real_axis(&self) -> &[f64] {
        &self.real_axis
    }

    /// The imaginary coordinate of each column.
    pub fn imaginary_axis(&self) -> &[f64] {
        &self.imaginary_axis
    }

    /// The complex sample point for a cell.
    pub fn cell_to_point(&self, cell: &Cell) -> Complex<f64> {
        Complex::new(self.real_axis[cell.0], self.imaginary_axis[cell.1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_fails_on_bad_shape() {
        let region = Region::new(Complex::new(-1.0, 1.0), Complex::new(1.0, -1.0));
        assert!(region.is_err());
        let region = Region::new(Complex::new(1.0, -1.0), Complex::new(-1.0, 1.0));
        assert!(region.is_err());
    }

    #[test]
    fn region_fails_on_flat_shape() {
        let region = Region::new(Complex::new(0.0, -1.0), Complex::new(0.0, 1.0));
        assert!(region.is_err());
    }

    #[test]
    fn region_fails_on_infinite_corner() {
        let region = Region::new(
            Complex::new(::std::f64::NEG_INFINITY, -1.0),
            Complex::new(1.0, 1.0),
        );
        assert!(region.is_err());
    }

    #[test]
    fn region_passes_on_good_shape() {
        let region = Region::new(Complex::new(-1.0, -1.0), Complex::new(1.0, 1.0));
        assert!(region.is_ok());
    }

    #[test]
    fn default_region_covers_the_set() {
        let region = Region::default();
        assert_eq!(region.leftlower(), Complex::new(-2.0, -1.5));
        assert_eq!(region.rightupper(), Complex::new(1.0, 1.5));
    }

    #[test]
    fn linspace_includes_both_ends() {
        assert_eq!(linspace(-2.0, 1.0, 4), vec![-2.0, -1.0, 0.0, 1.0]);
        assert_eq!(linspace(-1.5, 1.5, 3), vec![-1.5, 0.0, 1.5]);
    }

    #[test]
    fn linspace_single_sample_sits_on_start() {
        assert_eq!(linspace(-2.0, 1.0, 1), vec![-2.0]);
    }

    #[test]
    fn linspace_far_edge_is_exact() {
        let values = linspace(-2.0, 1.0, 997);
        assert_eq!(values.len(), 997);
        assert_eq!(values[0], -2.0);
        assert_eq!(values[996], 1.0);
    }

    #[test]
    fn grid_rejects_zero_density() {
        let grid = SampleGrid::new(&Region::default(), 0);
        assert_eq!(
            grid.err(),
            Some(MandelbrotError::InvalidDensity { density: 0 })
        );
    }

    #[test]
    fn cell_to_point_walks_real_by_row_and_imaginary_by_column() {
        let grid = SampleGrid::new(&Region::default(), 4).unwrap();
        assert_eq!(grid.len(), 16);
        assert_eq!(grid.real_axis(), &[-2.0, -1.0, 0.0, 1.0]);
        assert_eq!(grid.imaginary_axis(), &[-1.5, -0.5, 0.5, 1.5]);
        assert_eq!(grid.cell_to_point(&Cell(0, 0)), Complex::new(-2.0, -1.5));
        assert_eq!(grid.cell_to_point(&Cell(3, 0)), Complex::new(1.0, -1.5));
        assert_eq!(grid.cell_to_point(&Cell(0, 3)), Complex::new(-2.0, 1.5));
        assert_eq!(grid.cell_to_point(&Cell(2, 1)), Complex::new(0.0, -0.5));
    }
}
