//! Small vector helpers shared by the per-frame update steps and the
//! collision resolver.

use glam::Vec2;

/// Euclidean distance between two points.
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Rotates a velocity vector by `angle` radians using the standard 2D
/// rotation matrix. Pure; used by the collision resolver to move
/// velocities into and out of the contact-normal frame.
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    const EPS: f32 = 1e-5;

    #[test]
    fn distance_to_self_is_zero() {
        let p = Vec2::new(3.5, -7.25);
        assert_eq!(distance(p, p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(-4.0, 6.5);
        assert!((distance(a, b) - distance(b, a)).abs() < EPS);
    }

    #[test]
    fn distance_satisfies_triangle_inequality() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, -3.0);
        let c = Vec2::new(-2.5, 8.0);
        assert!(distance(a, c) <= distance(a, b) + distance(b, c) + EPS);
    }

    #[test]
    fn rotate_by_zero_is_identity() {
        let v = Vec2::new(2.0, -3.0);
        let r = rotate(v, 0.0);
        assert!((r - v).length() < EPS);
    }

    #[test]
    fn rotate_quarter_turn_maps_x_axis_to_y_axis() {
        let r = rotate(Vec2::new(1.0, 0.0), std::f32::consts::FRAC_PI_2);
        assert!((r - Vec2::new(0.0, 1.0)).length() < EPS);
    }

    #[test]
    fn rotate_roundtrip_restores_vector() {
        let v = Vec2::new(-1.5, 4.0);
        let angle = 0.73;
        let back = rotate(rotate(v, angle), -angle);
        assert!((back - v).length() < EPS);
    }

    #[test]
    fn rotate_preserves_length() {
        let v = Vec2::new(3.0, 4.0);
        let r = rotate(v, 1.234);
        assert!((r.length() - 5.0).abs() < EPS);
    }
}
