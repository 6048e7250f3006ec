//! Deterministic Float Helpers
//!
//! Gameplay math is single-precision with a fixed evaluation order. The
//! transcendental functions below evaluate in double precision and round once
//! to f32, which keeps results independent of the platform's `sinf`/`powf`.

/// Single-precision pi.
pub const PI: f32 = std::f32::consts::PI;

/// Single-precision 2*pi, computed the same way gameplay code does.
pub const TWO_PI: f32 = 2.0 * PI;

/// Sine rounded once to single precision.
#[inline]
pub fn sin_f32(x: f32) -> f32 {
    (x as f64).sin() as f32
}

/// Power rounded once to single precision.
#[inline]
pub fn pow_f32(base: f32, exponent: f32) -> f32 {
    (base as f64).powf(exponent as f64) as f32
}

/// Linear interpolation `a + t * (b - a)` in single precision.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Normalized progress of item `index` in a sequence of `count` items.
///
/// `0` for sequences of one or fewer items.
#[inline]
pub fn progress(index: usize, count: usize) -> f32 {
    if count <= 1 {
        0.0
    } else {
        index as f32 / (count - 1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sin_known_points() {
        assert_eq!(sin_f32(0.0), 0.0);
        assert_eq!(sin_f32(PI * 0.5), 1.0);
        assert!(sin_f32(PI).abs() < 1e-6);
    }

    #[test]
    fn test_pow_exact_cases() {
        assert_eq!(pow_f32(2.0, 0.0), 1.0);
        assert_eq!(pow_f32(2.0, -2.0), 0.25);
        assert_eq!(pow_f32(0.5, 1.0), 0.5);
    }

    #[test]
    fn test_progress() {
        assert_eq!(progress(0, 1), 0.0);
        assert_eq!(progress(0, 12), 0.0);
        assert_eq!(progress(11, 12), 1.0);
        assert_eq!(progress(1, 12).to_bits(), (1.0f32 / 11.0).to_bits());
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(200.0, 80.0, 0.0), 200.0);
        assert_eq!(lerp(200.0, 80.0, 1.0), 80.0);
    }
}
