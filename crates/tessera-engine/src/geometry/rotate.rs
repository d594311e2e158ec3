use crate::coords::Vec2;

/// Rotates `point` by `angle` radians around `pivot`.
#[inline]
pub fn rotate_point_around_pivot(point: Vec2, pivot: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    rotate_with(point, pivot, sin, cos)
}

/// Rotates every point in place around `pivot`, evaluating sin/cos once.
pub fn rotate_points(points: &mut [Vec2], pivot: Vec2, angle: f32) {
    let (sin, cos) = angle.sin_cos();
    for p in points {
        *p = rotate_with(*p, pivot, sin, cos);
    }
}

#[inline]
fn rotate_with(point: Vec2, pivot: Vec2, sin: f32, cos: f32) -> Vec2 {
    let d = point - pivot;
    Vec2::new(cos * d.x - sin * d.y + pivot.x, sin * d.x + cos * d.y + pivot.y)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use core::f32::consts::{FRAC_PI_2, PI};

    use super::*;

    fn assert_vec_eq(a: Vec2, b: Vec2) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-5);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-5);
    }

    #[test]
    fn quarter_turn_about_origin() {
        // +Y is down, so a positive angle turns +X towards +Y.
        let p = rotate_point_around_pivot(Vec2::new(1.0, 0.0), Vec2::zero(), FRAC_PI_2);
        assert_vec_eq(p, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn rotation_is_relative_to_pivot() {
        let pivot = Vec2::new(10.0, 10.0);
        let p = rotate_point_around_pivot(Vec2::new(12.0, 10.0), pivot, PI);
        assert_vec_eq(p, Vec2::new(8.0, 10.0));
    }

    #[test]
    fn pivot_is_a_fixed_point() {
        let pivot = Vec2::new(-3.0, 7.5);
        assert_vec_eq(rotate_point_around_pivot(pivot, pivot, 1.234), pivot);
    }

    #[test]
    fn rotate_points_matches_single_point_rotation() {
        let pivot = Vec2::new(2.0, -1.0);
        let mut pts = [Vec2::new(0.0, 0.0), Vec2::new(5.0, 3.0), Vec2::new(-4.0, 1.0)];
        let expected: Vec<Vec2> =
            pts.iter().map(|&p| rotate_point_around_pivot(p, pivot, 0.7)).collect();

        rotate_points(&mut pts, pivot, 0.7);
        for (a, b) in pts.iter().zip(expected) {
            assert_vec_eq(*a, b);
        }
    }

    #[test]
    fn rotation_preserves_distance_to_pivot() {
        let pivot = Vec2::new(1.0, 1.0);
        let p = Vec2::new(4.0, 5.0);
        let r = rotate_point_around_pivot(p, pivot, 2.1);
        assert_abs_diff_eq!((r - pivot).length(), (p - pivot).length(), epsilon = 1e-5);
    }
}
