//! "Nice" axis ranges following Heckbert's loose labeling (Graphics Gems I).
//!
//! Nice numbers have the form 1×10ⁿ, 2×10ⁿ or 5×10ⁿ. An axis-labeling
//! collaborator feeds a raw data range plus a tick-count hint and receives a
//! range whose bounds and step land on such values.

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Largest step index for which `index ± 1` is still exact in `f64`.
const MAX_EXACT_STEPS: f64 = 9_007_199_254_740_992.0;

/// Range widened to nice bounds together with the resulting tick count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NiceRange {
    pub min: f64,
    pub max: f64,
    pub ticks_count: u32,
}

impl NiceRange {
    /// Distance between two adjacent ticks.
    #[must_use]
    pub fn step(self) -> f64 {
        if self.ticks_count < 2 {
            return self.max - self.min;
        }
        (self.max - self.min) / f64::from(self.ticks_count - 1)
    }

    /// Tick values from `min` to `max` inclusive.
    #[must_use]
    pub fn tick_values(self) -> Vec<f64> {
        let step = self.step();
        (0..self.ticks_count)
            .map(|index| self.min + step * f64::from(index))
            .collect()
    }
}

/// Rounds `x` to a nice number.
///
/// With `ceiling` the result is the smallest nice number `>= x`; otherwise the
/// nearest one using the 1.5 / 3 / 7 thresholds. `x` must be positive.
#[must_use]
pub fn nice_number(x: f64, ceiling: bool) -> f64 {
    let z = 10f64.powf(x.log10().floor());
    let q = x / z;

    let q = if ceiling {
        if q <= 1.0 {
            1.0
        } else if q <= 2.0 {
            2.0
        } else if q <= 5.0 {
            5.0
        } else {
            10.0
        }
    } else if q < 1.5 {
        1.0
    } else if q < 3.0 {
        2.0
    } else if q < 7.0 {
        5.0
    } else {
        10.0
    };

    q * z
}

/// Widens `[min, max]` to nice bounds for roughly `ticks_count` ticks.
///
/// The returned range always contains the input range. Ranges too narrow
/// to step through at their magnitude, or that would need more ticks than a
/// `u32` holds, are rejected.
pub fn loose_nice_numbers(min: f64, max: f64, ticks_count: u32) -> ChartResult<NiceRange> {
    if !min.is_finite() || !max.is_finite() || max <= min {
        return Err(ChartError::InvalidData(format!(
            "nice range requires finite bounds with max > min, got [{min}, {max}]"
        )));
    }
    if ticks_count < 2 {
        return Err(ChartError::InvalidData(format!(
            "nice range requires at least 2 ticks, got {ticks_count}"
        )));
    }

    let range = nice_number(max - min, true);
    let step = nice_number(range / f64::from(ticks_count - 1), false);
    let mut nice_min = (min / step).floor();
    let mut nice_max = (max / step).ceil();
    if !step.is_finite()
        || step <= 0.0
        || nice_min.abs() >= MAX_EXACT_STEPS
        || nice_max.abs() >= MAX_EXACT_STEPS
    {
        return Err(ChartError::InvalidData(format!(
            "nice range [{min}, {max}] is too narrow for its magnitude"
        )));
    }

    // Scaling back by `step` can land just inside the input range.
    while nice_min * step > min {
        nice_min -= 1.0;
    }
    while nice_max * step < max {
        nice_max += 1.0;
    }

    let steps = nice_max - nice_min;
    if steps + 1.0 > f64::from(u32::MAX) {
        return Err(ChartError::InvalidData(format!(
            "nice range for [{min}, {max}] needs {steps} steps, more than a tick count can hold"
        )));
    }

    Ok(NiceRange {
        min: nice_min * step,
        max: nice_max * step,
        ticks_count: steps as u32 + 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_number_ceiling_picks_next_candidate() {
        assert_eq!(nice_number(1.0, true), 1.0);
        assert_eq!(nice_number(1.2, true), 2.0);
        assert_eq!(nice_number(4.5, true), 5.0);
        assert_eq!(nice_number(7.0, true), 10.0);
        assert_eq!(nice_number(230.0, true), 500.0);
    }

    #[test]
    fn nice_number_rounding_uses_thresholds() {
        assert_eq!(nice_number(1.4, false), 1.0);
        assert_eq!(nice_number(1.5, false), 2.0);
        assert_eq!(nice_number(2.9, false), 2.0);
        assert_eq!(nice_number(3.0, false), 5.0);
        assert_eq!(nice_number(6.9, false), 5.0);
        assert_eq!(nice_number(7.0, false), 10.0);
    }

    #[test]
    fn rounded_bounds_are_pushed_outside_input() {
        let nice = loose_nice_numbers(-31.952, -31.2, 5).expect("valid nice input");
        assert!(nice.min <= -31.952);
        assert!(nice.max >= -31.2);
    }

    #[test]
    fn oversized_tick_counts_are_rejected() {
        assert!(matches!(
            loose_nice_numbers(0.0, 1.0, u32::MAX),
            Err(ChartError::InvalidData(_))
        ));
    }
}
