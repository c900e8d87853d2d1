//! Fixed-point codec for positions, scales and deltas.
//!
//! Values are stored as signed 32-bit integers with 8 fractional bits:
//!
//! ```text
//! fixed(f) = trunc(f * 256)
//! ```
//!
//! No overflow check is performed. Magnitudes past `i32` wrap through an
//! `i64` intermediate, and anything past `i64` saturates. `NaN` encodes as 0.

/// Number of fractional bits in the fixed-point representation.
pub const FRACTION_BITS: u32 = 8;

/// The fixed-point encoding of `1.0`.
pub const FIXED_ONE: i32 = 1 << FRACTION_BITS;

/// Convert `f` to fixed-point, truncating toward zero.
pub fn to_fixed(f: f64) -> i32 {
    (f * FIXED_ONE as f64).trunc() as i64 as i32
}

/// Convert a relative delta to fixed-point.
///
/// The magnitude is converted first and the sign applied afterwards; zero
/// and negative inputs take the negative branch.
pub fn to_fixed_delta(f: f64) -> i32 {
    let magnitude = to_fixed(f.abs());
    if f > 0.0 {
        magnitude
    } else {
        magnitude.wrapping_neg()
    }
}

/// Convert a fixed-point value back to `f64`.
pub fn from_fixed(v: i32) -> f64 {
    v as f64 / FIXED_ONE as f64
}
