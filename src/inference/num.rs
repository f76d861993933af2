use serde_json::Number;

/// Whole number, the same test JS `Number.isInteger` applies: anything stored
/// as i64/u64, or a finite f64 without a fractional part (so `1e20` counts).
pub fn is_integer(n: &Number) -> bool {
    if n.is_i64() || n.is_u64() {
        return true;
    }
    n.as_f64().is_some_and(is_integral_f64)
}

pub fn is_integral_f64(f: f64) -> bool {
    f.is_finite() && f.fract() == 0.0
}
