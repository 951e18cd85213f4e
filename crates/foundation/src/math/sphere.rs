use super::Vec3;

/// Golden angle in radians: `pi * (3 - sqrt(5))`.
pub fn golden_angle() -> f64 {
    std::f64::consts::PI * (3.0 - 5f64.sqrt())
}

/// Position of sample `index` out of `total` on a Fibonacci sphere of `radius`.
///
/// Samples spiral from the north pole (`y = +radius`) to the south pole
/// (`y = -radius`). A single sample sits on the north pole.
pub fn fibonacci_sphere(index: usize, total: usize, radius: f64) -> Vec3 {
    let y = if total <= 1 {
        1.0
    } else {
        1.0 - (index as f64 / (total - 1) as f64) * 2.0
    };
    let r = (1.0 - y * y).max(0.0).sqrt();
    let theta = index as f64 * golden_angle();

    Vec3::new(theta.cos() * r, y, theta.sin() * r) * radius
}

#[cfg(test)]
mod tests {
    use super::{fibonacci_sphere, golden_angle};

    #[test]
    fn golden_angle_value() {
        assert!((golden_angle() - 2.399_963_229_728_653).abs() < 1e-12);
    }

    #[test]
    fn samples_lie_on_sphere() {
        let total = 137;
        for i in 0..total {
            let p = fibonacci_sphere(i, total, 220.0);
            assert!((p.length() - 220.0).abs() < 1e-9, "sample {i} off sphere");
        }
    }

    #[test]
    fn first_and_last_are_poles() {
        let north = fibonacci_sphere(0, 10, 1.0);
        let south = fibonacci_sphere(9, 10, 1.0);
        assert!((north.y - 1.0).abs() < 1e-12);
        assert!((south.y + 1.0).abs() < 1e-12);
    }

    #[test]
    fn single_sample_is_defined() {
        let p = fibonacci_sphere(0, 1, 5.0);
        assert!(p.x.is_finite() && p.y.is_finite() && p.z.is_finite());
        assert_eq!(p.y, 5.0);
    }
}
