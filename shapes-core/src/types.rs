use glam::Vec2;

/// Extent of the drawing surface in pixels.
///
/// The origin is the top-left corner; x grows right and y grows down,
/// matching the surface the shapes are painted on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Current cursor state as seen by the simulation.
///
/// `pos` is `None` when the pointer has left the surface or has not moved
/// for longer than the expiry window. All range checks treat an absent
/// pointer as "far away": the within-range predicates return `false` and
/// the outside-range predicate returns `true`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pointer {
    pub pos: Option<Vec2>,
    pub range: f32,
}

impl Pointer {
    pub fn with_range(range: f32) -> Self {
        Self { pos: None, range }
    }

    /// Euclidean distance check against `center`.
    pub fn within_range(&self, center: Vec2) -> bool {
        match self.pos {
            Some(p) => crate::geometry::distance(p, center) < self.range,
            None => false,
        }
    }

    /// Per-axis check: both |dx| and |dy| strictly below `range`.
    pub fn axis_within_range(&self, center: Vec2) -> bool {
        match self.pos {
            Some(p) => (p.x - center.x).abs() < self.range && (p.y - center.y).abs() < self.range,
            None => false,
        }
    }

    /// Per-axis check: both |dx| and |dy| at or beyond `range`.
    ///
    /// Not the negation of [`Pointer::axis_within_range`]: a cursor close
    /// on one axis but far on the other fails both predicates, which is
    /// what gives the interactive shrink/grow its hysteresis band.
    pub fn axis_outside_range(&self, center: Vec2) -> bool {
        match self.pos {
            Some(p) => (p.x - center.x).abs() >= self.range && (p.y - center.y).abs() >= self.range,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn absent_pointer_counts_as_far_away() {
        let pointer = Pointer::with_range(50.0);
        let center = Vec2::new(10.0, 10.0);

        assert!(!pointer.within_range(center));
        assert!(!pointer.axis_within_range(center));
        assert!(pointer.axis_outside_range(center));
    }

    #[test]
    fn within_range_uses_euclidean_distance() {
        let pointer = Pointer {
            pos: Some(Vec2::new(0.0, 0.0)),
            range: 5.0,
        };

        // 3-4-5 triangle: distance is exactly 5, which is not < 5.
        assert!(!pointer.within_range(Vec2::new(3.0, 4.0)));
        assert!(pointer.within_range(Vec2::new(3.0, 3.0)));
    }

    #[test]
    fn axis_checks_leave_a_hysteresis_gap() {
        let pointer = Pointer {
            pos: Some(Vec2::new(0.0, 0.0)),
            range: 10.0,
        };

        // Close on x, far on y: neither within nor outside per-axis.
        let mixed = Vec2::new(2.0, 50.0);
        assert!(!pointer.axis_within_range(mixed));
        assert!(!pointer.axis_outside_range(mixed));

        assert!(pointer.axis_within_range(Vec2::new(2.0, 3.0)));
        assert!(pointer.axis_outside_range(Vec2::new(50.0, 50.0)));
    }
}
