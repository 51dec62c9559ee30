/// Absolute tolerance used when a compared value may be exactly zero.
const FUZZY_NULL_EPSILON: f64 = 1e-12;

/// Relative comparison with a 1e-12 tolerance.
///
/// Two zeros compare equal; a zero against a tiny non-zero value does not,
/// which matches how range bounds are compared before emitting changes.
#[must_use]
pub fn fuzzy_compare(a: f64, b: f64) -> bool {
    (a - b).abs() * 1e12 <= a.abs().min(b.abs())
}

/// Returns `true` when `value` is zero within an absolute 1e-12 tolerance.
#[must_use]
pub fn fuzzy_is_null(value: f64) -> bool {
    value.abs() <= FUZZY_NULL_EPSILON
}

/// Returns `(min, max)` of two values.
#[must_use]
pub fn sorted_pair(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}
