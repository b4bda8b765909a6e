//! Three-component real vector used for positions and accumulators.

use nalgebra::Vector3;

/// A position or direction in object space, combined by value.
pub type Vec3 = Vector3<f64>;

/// True when no component is NaN or infinite.
pub fn is_finite(v: &Vec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_arithmetic() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(b / 2.0, Vec3::new(2.0, 2.5, 3.0));
    }

    #[test]
    fn test_is_finite() {
        assert!(is_finite(&Vec3::new(1.0, -2.0, 1e300)));
        assert!(!is_finite(&Vec3::new(f64::NAN, 0.0, 0.0)));
        assert!(!is_finite(&Vec3::new(0.0, f64::INFINITY, 0.0)));
    }
}
