//! Q28.4 fixed-point conversions.
//!
//! Lengths, elevations and coordinates in the graph files are stored as
//! integers counting sixteenths of a metre.

/// Number of fractional bits.
const FRACTION_BITS: i32 = 4;

/// Convert an integer to Q28.4.
pub fn of_int(i: i32) -> i32 {
    i << FRACTION_BITS
}

/// Convert a Q28.4 value to `f64`.
///
/// Scaling by a power of two is exact, so no precision is lost.
pub fn as_double(q28_4: i32) -> f64 {
    q28_4 as f64 * 2f64.powi(-FRACTION_BITS)
}

/// Convert a Q28.4 value to `f32`.
pub fn as_float(q28_4: i32) -> f32 {
    q28_4 as f32 * 2f32.powi(-FRACTION_BITS)
}
