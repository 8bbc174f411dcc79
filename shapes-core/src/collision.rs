//! Pairwise elastic collision resolution for circles.
//!
//! The resolver rotates both velocities into the contact-normal frame,
//! applies the 1D elastic collision equation on the normal components,
//! and rotates back. With the default mass of 1 on every circle this is
//! the equal-mass case: the normal velocity components are exchanged
//! exactly and the tangential components pass through unchanged.

use glam::Vec2;

use crate::circle::Circle;
use crate::geometry::rotate;

/// Resolves an elastic collision between two overlapping circles,
/// mutating both velocities in place.
///
/// A pair whose relative velocity does not project toward closing the
/// gap is left untouched; without this guard a pair that has already
/// exchanged velocities but still overlaps would be re-resolved every
/// frame and stick together.
pub fn resolve(a: &mut Circle, b: &mut Circle) {
    let velocity_diff = a.velocity - b.velocity;
    let position_diff = b.pos - a.pos;

    if velocity_diff.dot(position_diff) >= 0.0 {
        // Contact angle between the two centers.
        let angle = -position_diff.y.atan2(position_diff.x);

        let m1 = a.mass;
        let m2 = b.mass;

        // Velocities in the rotated frame, where the contact normal is
        // the x axis.
        let u1 = rotate(a.velocity, angle);
        let u2 = rotate(b.velocity, angle);

        // 1D elastic collision on the normal components; tangential
        // components are carried through.
        let v1 = Vec2::new(
            u1.x * (m1 - m2) / (m1 + m2) + u2.x * 2.0 * m2 / (m1 + m2),
            u1.y,
        );
        let v2 = Vec2::new(
            u2.x * (m1 - m2) / (m1 + m2) + u1.x * 2.0 * m2 / (m1 + m2),
            u2.y,
        );

        a.velocity = rotate(v1, -angle);
        b.velocity = rotate(v2, -angle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CircleConfig;
    use glam::Vec2;

    const EPS: f32 = 1e-4;

    fn particle(x: f32, y: f32, dx: f32, dy: f32) -> Circle {
        Circle::new(CircleConfig {
            pos: Vec2::new(x, y),
            velocity: Vec2::new(dx, dy),
            radius: 10.0,
            collision: true,
            ..Default::default()
        })
    }

    #[test]
    fn head_on_equal_mass_collision_swaps_velocities() {
        let mut a = particle(0.0, 0.0, 5.0, 0.0);
        let mut b = particle(15.0, 0.0, -5.0, 0.0);

        resolve(&mut a, &mut b);

        assert!((a.velocity - Vec2::new(-5.0, 0.0)).length() < EPS);
        assert!((b.velocity - Vec2::new(5.0, 0.0)).length() < EPS);
    }

    #[test]
    fn equal_mass_collision_conserves_momentum() {
        let mut a = particle(0.0, 0.0, 3.0, 1.0);
        let mut b = particle(12.0, 9.0, -2.0, -4.0);
        let before = a.velocity + b.velocity;

        resolve(&mut a, &mut b);

        let after = a.velocity + b.velocity;
        assert!(
            (before - after).length() < EPS,
            "momentum changed: {before:?} -> {after:?}"
        );
    }

    #[test]
    fn separating_pair_is_left_untouched() {
        // b is to the right of a and both velocities point apart.
        let mut a = particle(0.0, 0.0, -5.0, 0.0);
        let mut b = particle(15.0, 0.0, 5.0, 0.0);

        resolve(&mut a, &mut b);

        assert_eq!(a.velocity, Vec2::new(-5.0, 0.0));
        assert_eq!(b.velocity, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn tangential_component_passes_through_for_equal_masses() {
        // Contact normal is the x axis; a carries a tangential (y)
        // component that must survive the exchange.
        let mut a = particle(0.0, 0.0, 4.0, 2.0);
        let mut b = particle(15.0, 0.0, 0.0, 0.0);

        resolve(&mut a, &mut b);

        assert!((a.velocity - Vec2::new(0.0, 2.0)).length() < EPS);
        assert!((b.velocity - Vec2::new(4.0, 0.0)).length() < EPS);
    }

    #[test]
    fn kinetic_energy_is_conserved_for_equal_masses() {
        let mut a = particle(0.0, 0.0, 3.0, -1.0);
        let mut b = particle(10.0, 7.0, -2.5, 0.5);
        let energy =
            |c: &Circle| 0.5 * c.mass * c.velocity.length_squared();
        let before = energy(&a) + energy(&b);

        resolve(&mut a, &mut b);

        let after = energy(&a) + energy(&b);
        assert!((before - after).abs() < 1e-3);
    }
}
