// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time kernel.  Everything else in this crate exists to
//! call `escape_time` a great many times.

use num::Complex;

use config::DEFAULT_DIVERGENCE_RADIUS;
use errors::{MandelbrotError, Result};

/// This is our classic iterator function.  Iterates `z = z * z + c`
/// from zero and returns the index of the first iteration at which
/// the orbit's magnitude passes `radius`.  If the orbit never
/// escapes, returns `threshold - 1`: running out of budget and
/// escaping on the very last step look the same, and the color map
/// depends on that.
///
/// Unchecked: `threshold` must be at least 1.  The generators validate
/// once per batch and then call this directly.
#[inline]
pub fn escape_time(point: Complex<f64>, threshold: u32, radius: f64) -> u32 {
    let bound = radius * radius;
    let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    for i in 0..threshold {
        z = z * z + point;
        let norm = z.norm_sqr();
        // NaN compares false against everything, so an orbit that
        // overflowed would otherwise look bounded.
        if norm > bound || !norm.is_finite() {
            return i;
        }
    }
    threshold.saturating_sub(1)
}

/// Returns the number of iterations until `z = z * z + point`
/// diverges past a magnitude of 4, or `threshold - 1` if it never
/// does.  Rejects a zero threshold.
pub fn iterations_until_diverge(point: Complex<f64>, threshold: u32) -> Result<u32> {
    if threshold < 1 {
        return Err(MandelbrotError::InvalidThreshold { threshold });
    }
    Ok(escape_time(point, threshold, DEFAULT_DIVERGENCE_RADIUS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn far_points_escape_immediately() {
        for threshold in &[1, 2, 50, 1000] {
            assert_eq!(
                iterations_until_diverge(Complex::new(10.0, 0.0), *threshold),
                Ok(0)
            );
            assert_eq!(
                iterations_until_diverge(Complex::new(0.0, -5.0), *threshold),
                Ok(0)
            );
        }
    }

    #[test]
    fn origin_never_escapes() {
        for threshold in 1..200 {
            assert_eq!(
                iterations_until_diverge(Complex::new(0.0, 0.0), threshold),
                Ok(threshold - 1)
            );
        }
    }

    #[test]
    fn period_two_orbit_never_escapes() {
        assert_eq!(
            iterations_until_diverge(Complex::new(-1.0, 0.0), 1000),
            Ok(999)
        );
    }

    #[test]
    fn zero_threshold_is_rejected() {
        assert_eq!(
            iterations_until_diverge(Complex::new(0.0, 0.0), 0),
            Err(MandelbrotError::InvalidThreshold { threshold: 0 })
        );
    }

    #[test]
    fn escape_is_strictly_greater_than_the_radius() {
        // z1 = 4 lands exactly on the radius, z2 = 20 is past it.
        assert_eq!(escape_time(Complex::new(4.0, 0.0), 10, 4.0), 1);
        // z1 = 4.5 is past it at once.
        assert_eq!(escape_time(Complex::new(4.5, 0.0), 10, 4.0), 0);
    }

    #[test]
    fn outside_point_escapes_after_a_few_steps() {
        // 0.5 -> 0.75 -> 1.0625 -> 1.62890625 -> 3.15333557 -> 10.4435...
        assert_eq!(escape_time(Complex::new(0.5, 0.0), 100, 4.0), 5);
    }

    #[test]
    fn smaller_radius_escapes_sooner() {
        let point = Complex::new(0.5, 0.0);
        assert!(escape_time(point, 100, 2.0) < escape_time(point, 100, 4.0));
    }

    #[test]
    fn non_finite_points_count_as_escaped() {
        assert_eq!(escape_time(Complex::new(::std::f64::NAN, 0.0), 50, 4.0), 0);
        assert_eq!(
            escape_time(Complex::new(::std::f64::INFINITY, 0.0), 50, 4.0),
            0
        );
    }
}
