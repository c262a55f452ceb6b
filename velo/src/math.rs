//! Small numeric helpers shared by the graph and routing code.

/// Integer division rounding up.
///
/// # Panics
///
/// Panics if `y` is zero.
pub fn ceil_div(x: u32, y: u32) -> u32 {
    assert!(y > 0, "division by zero");
    x.div_ceil(y)
}

/// Linear interpolation between `y0` (at `x = 0`) and `y1` (at `x = 1`),
/// computed with a fused multiply-add.
pub fn interpolate(y0: f64, y1: f64, x: f64) -> f64 {
    (y1 - y0).mul_add(x, y0)
}

/// Clamp `v` to `[min, max]`. A NaN `v` yields `max`.
pub fn clamp(min: f64, v: f64, max: f64) -> f64 {
    debug_assert!(min <= max);
    if v < min {
        min
    } else {
        v.min(max)
    }
}

/// Clamp an integer to `[min, max]`.
pub fn clamp_int(min: i32, v: i32, max: i32) -> i32 {
    debug_assert!(min <= max);
    v.max(min).min(max)
}

/// Dot product of `u` and `v`.
pub fn dot_product(u_x: f64, u_y: f64, v_x: f64, v_y: f64) -> f64 {
    u_x.mul_add(v_x, u_y * v_y)
}

/// Euclidean norm of `u`.
pub fn norm(u_x: f64, u_y: f64) -> f64 {
    (u_x * u_x + u_y * u_y).sqrt()
}

/// Length of the projection of `p` onto the line through `a` and `b`,
/// measured from `a` towards `b`.
pub fn projection_length(a_x: f64, a_y: f64, b_x: f64, b_y: f64, p_x: f64, p_y: f64) -> f64 {
    dot_product(p_x - a_x, p_y - a_y, b_x - a_x, b_y - a_y) / norm(b_x - a_x, b_y - a_y)
}
