use serde::{Deserialize, Serialize};

use crate::core::primitives::{fuzzy_compare, fuzzy_is_null, sorted_pair};
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_LOG_BASE: f64 = 10.0;

/// Mapping family of one domain axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AxisScaleKind {
    /// Uniform spacing in raw value units.
    #[default]
    Value,
    /// Uniform spacing in `log(value) / log(base)` units (values must be > 0).
    Log,
}

/// Rejects bases that cannot define a logarithm.
pub fn validate_log_base(base: f64) -> ChartResult<f64> {
    if !base.is_finite() || base <= 0.0 || base == 1.0 {
        return Err(ChartError::InvalidLogBase(base));
    }
    Ok(base)
}

/// Clamps a range so that a logarithm can be taken of both ends.
///
/// A non-positive `min` becomes `1.0`; `max` is then pushed above it if needed.
#[must_use]
pub fn adjust_log_domain_ranges(min: f64, max: f64) -> (f64, f64) {
    if min > 0.0 {
        return (min, max);
    }
    let min = 1.0;
    let max = if max <= min { min + 1.0 } else { max };
    (min, max)
}

/// Log-space window cached from the value bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct LogWindow {
    pub(super) base: f64,
    pub(super) left: f64,
    pub(super) right: f64,
}

impl LogWindow {
    fn new(base: f64) -> Self {
        Self {
            base,
            left: 0.0,
            right: 1.0,
        }
    }

    fn log(self, value: f64) -> f64 {
        value.log10() / self.base.log10()
    }

    fn exp(self, exponent: f64) -> f64 {
        self.base.powf(exponent)
    }

    fn span(self) -> f64 {
        (self.right - self.left).abs()
    }

    fn refresh(&mut self, min: f64, max: f64) {
        let (left, right) = sorted_pair(self.log(min), self.log(max));
        self.left = left;
        self.right = right;
    }

    fn exp_sorted(self, left: f64, right: f64) -> (f64, f64) {
        sorted_pair(self.exp(left), self.exp(right))
    }
}

/// Per-axis payload of a domain variant.
///
/// Every conversion works on the *fraction* of the axis covered by a value:
/// `0.0` at the axis minimum, `1.0` at its maximum. The domain turns
/// fractions into pixels, degrees or radii depending on its projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum AxisScale {
    Linear,
    Log(LogWindow),
}

impl AxisScale {
    pub(super) fn new(kind: AxisScaleKind) -> Self {
        match kind {
            AxisScaleKind::Value => Self::Linear,
            AxisScaleKind::Log => Self::Log(LogWindow::new(DEFAULT_LOG_BASE)),
        }
    }

    pub(super) fn log_base(self) -> Option<f64> {
        match self {
            Self::Linear => None,
            Self::Log(window) => Some(window.base),
        }
    }

    pub(super) fn adjust_range(self, min: f64, max: f64) -> (f64, f64) {
        match self {
            Self::Linear => (min, max),
            Self::Log(_) => adjust_log_domain_ranges(min, max),
        }
    }

    pub(super) fn same_range(self, old: (f64, f64), new: (f64, f64)) -> bool {
        match self {
            Self::Linear => fuzzy_compare(old.0, new.0) && fuzzy_compare(old.1, new.1),
            Self::Log(_) => fuzzy_is_null(old.0 - new.0) && fuzzy_is_null(old.1 - new.1),
        }
    }

    pub(super) fn refresh(&mut self, min: f64, max: f64) {
        if let Self::Log(window) = self {
            window.refresh(min, max);
        }
    }

    /// Switches the logarithm base and re-derives the log window from the
    /// unchanged value bounds. Returns `false` for linear axes.
    pub(super) fn set_base(&mut self, base: f64, min: f64, max: f64) -> bool {
        match self {
            Self::Linear => false,
            Self::Log(window) => {
                window.base = base;
                window.refresh(min, max);
                true
            }
        }
    }

    /// Fraction of the axis covered by `value`, or `None` when the value has
    /// no image under this scale (non-positive under log).
    pub(super) fn fraction(self, value: f64, min: f64, max: f64) -> Option<f64> {
        match self {
            Self::Linear => Some((value - min) / (max - min)),
            Self::Log(window) => {
                if value <= 0.0 {
                    return None;
                }
                Some((window.log(value) - window.left) / window.span())
            }
        }
    }

    pub(super) fn value_at(self, fraction: f64, min: f64, max: f64) -> f64 {
        match self {
            Self::Linear => min + fraction * (max - min),
            Self::Log(window) => window.exp(window.left + fraction * window.span()),
        }
    }

    /// New bounds showing only the `[lo, hi]` fraction window of the axis.
    pub(super) fn zoom_in(self, lo: f64, hi: f64, min: f64, max: f64) -> (f64, f64) {
        match self {
            Self::Linear => sorted_pair(min + (max - min) * lo, min + (max - min) * hi),
            Self::Log(window) => {
                let span = window.right - window.left;
                window.exp_sorted(window.left + lo * span, window.left + hi * span)
            }
        }
    }

    /// New bounds for zooming out of the `[lo, hi]` fraction window.
    ///
    /// Linear axes place the current range inside that window of the new
    /// range. Log axes widen the log window around its centre by
    /// `1 / (hi - lo)`.
    pub(super) fn zoom_out(self, lo: f64, hi: f64, min: f64, max: f64) -> (f64, f64) {
        match self {
            Self::Linear => {
                let span = (max - min) / (hi - lo);
                let new_min = min - span * lo;
                (new_min, new_min + span)
            }
            Self::Log(window) => {
                let factor = 1.0 / (hi - lo);
                let half = (window.right - window.left) / 2.0;
                window.exp_sorted(
                    window.left + half * (1.0 - factor),
                    window.left + half * (1.0 + factor),
                )
            }
        }
    }

    /// New bounds after shifting the axis by `shift` of its current span.
    pub(super) fn pan(self, shift: f64, min: f64, max: f64) -> (f64, f64) {
        match self {
            Self::Linear => {
                let step = (max - min) * shift;
                (min + step, max + step)
            }
            Self::Log(window) => {
                let step = shift * window.span();
                window.exp_sorted(window.left + step, window.right + step)
            }
        }
    }
}
