//! Construction-time options for the shape factories.
//!
//! Every field has a documented default and is resolved at construction
//! time, never per call; missing values fall back to defaults instead of
//! erroring.

use glam::Vec2;

use crate::colour::{self, Colour};

// Driver-level defaults shared by the randomized factories.
pub const MAX_RADIUS: f32 = 100.0;
pub const MIN_RADIUS: f32 = 5.0;
pub const SHRINK_RADIUS: f32 = 5.0;
pub const SPEED: f32 = 1.0;
pub const SHRINK_RATE: f32 = 3.0;
pub const GROW_RATE: f32 = 3.0;
pub const RANGE: f32 = 50.0;
pub const AMP_SPEED: f32 = 25.0;

/// Fraction of the surface dimension used for bounds-relative rectangle
/// defaults (minimum width/height, compressed amplifier height).
pub const SURFACE_FRACTION: f32 = 0.10;

/// Options for a single circle.
#[derive(Clone, Copy, Debug)]
pub struct CircleConfig {
    pub pos: Vec2,
    /// Initial velocity; the default matches a bounce speed of 1 on each axis.
    pub velocity: Vec2,
    pub radius: f32,
    pub colour: Colour,
    pub filled: bool,
    pub animated: bool,
    pub interactive: bool,
    pub gravity: bool,
    pub collision: bool,
    pub follows_pointer: bool,
    pub min_radius: f32,
    pub max_radius: f32,
    pub shrink_rate: f32,
    pub grow_rate: f32,
    pub acceleration: f32,
    pub friction: f32,
    pub mass: f32,
}

impl Default for CircleConfig {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            velocity: Vec2::ONE,
            radius: 50.0,
            colour: colour::BLACK,
            filled: true,
            animated: false,
            interactive: false,
            gravity: false,
            collision: false,
            follows_pointer: false,
            min_radius: MIN_RADIUS,
            max_radius: MAX_RADIUS,
            shrink_rate: SHRINK_RATE,
            grow_rate: GROW_RATE,
            acceleration: 0.5,
            friction: 0.95,
            mass: 1.0,
        }
    }
}

/// Options for a single rectangle.
#[derive(Clone, Copy, Debug)]
pub struct RectConfig {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub colour: Colour,
    pub filled: bool,
    /// Compressed-height floor for the amplifier update. `None` means the
    /// rectangle's own height, which makes the update a no-op (a static
    /// rectangle).
    pub min_height: Option<f32>,
    /// Height change per frame while compressing or expanding.
    pub amp_rate: f32,
}

impl Default for RectConfig {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            width: 100.0,
            height: 100.0,
            colour: colour::BLACK,
            filled: true,
            min_height: None,
            amp_rate: 10.0,
        }
    }
}

/// Options for the random circle spawner (static, bouncing, or
/// interactive circles).
#[derive(Clone, Copy, Debug)]
pub struct CircleSpawnOptions {
    pub n: usize,
    /// Radius is drawn uniformly from `[min_radius, max_radius]`.
    pub min_radius: f32,
    pub max_radius: f32,
    /// Shrink floor handed to each circle for the interactive hysteresis.
    pub shrink_radius: f32,
    pub filled: bool,
    /// Magnitude of each velocity component for animated circles.
    pub speed: f32,
    pub shrink_rate: f32,
    pub grow_rate: f32,
    pub animated: bool,
    pub interactive: bool,
    pub palette: Option<&'static [Colour]>,
}

impl Default for CircleSpawnOptions {
    fn default() -> Self {
        Self {
            n: 50,
            min_radius: MIN_RADIUS,
            max_radius: MAX_RADIUS,
            shrink_radius: SHRINK_RADIUS,
            filled: true,
            speed: SPEED,
            shrink_rate: SHRINK_RATE,
            grow_rate: GROW_RATE,
            animated: false,
            interactive: false,
            palette: None,
        }
    }
}

/// Options for the gravity-ball spawner.
#[derive(Clone, Copy, Debug)]
pub struct GravitySpawnOptions {
    pub n: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    pub acceleration: f32,
    pub friction: f32,
    pub palette: Option<&'static [Colour]>,
}

impl Default for GravitySpawnOptions {
    fn default() -> Self {
        Self {
            n: 50,
            min_radius: MIN_RADIUS,
            max_radius: MAX_RADIUS,
            acceleration: 0.5,
            friction: 0.95,
            palette: None,
        }
    }
}

/// Options for the colliding-particle spawner.
#[derive(Clone, Copy, Debug)]
pub struct CollisionSpawnOptions {
    pub n: usize,
    /// All colliding particles share one radius.
    pub radius: f32,
    pub speed: f32,
    pub palette: Option<&'static [Colour]>,
}

impl Default for CollisionSpawnOptions {
    fn default() -> Self {
        Self {
            n: 50,
            radius: 15.0,
            speed: SPEED,
            palette: None,
        }
    }
}

/// Options for the pointer-following particle spawner.
#[derive(Clone, Copy, Debug)]
pub struct FollowSpawnOptions {
    pub n: usize,
    pub max_radius: f32,
    pub shrink_rate: f32,
    pub grow_rate: f32,
    pub palette: Option<&'static [Colour]>,
}

impl Default for FollowSpawnOptions {
    fn default() -> Self {
        Self {
            n: 300,
            max_radius: MAX_RADIUS,
            shrink_rate: 0.1,
            grow_rate: GROW_RATE,
            palette: None,
        }
    }
}

/// Options for the random static rectangle spawner. `None` extents are
/// resolved against the surface bounds at spawn time.
#[derive(Clone, Copy, Debug)]
pub struct RectSpawnOptions {
    pub n: usize,
    pub filled: bool,
    pub min_width: Option<f32>,
    pub max_width: Option<f32>,
    pub min_height: Option<f32>,
    pub max_height: Option<f32>,
    pub palette: Option<&'static [Colour]>,
}

impl Default for RectSpawnOptions {
    fn default() -> Self {
        Self {
            n: 50,
            filled: true,
            min_width: None,
            max_width: None,
            min_height: None,
            max_height: None,
            palette: None,
        }
    }
}

/// Options for the amplifier-bar spawner. `None` heights are resolved
/// against the surface bounds at spawn time.
#[derive(Clone, Copy, Debug)]
pub struct AmplifySpawnOptions {
    pub n: usize,
    pub min_height: Option<f32>,
    pub max_height: Option<f32>,
    pub compressed_height: Option<f32>,
    pub amp_rate: f32,
    pub palette: Option<&'static [Colour]>,
}

impl Default for AmplifySpawnOptions {
    fn default() -> Self {
        Self {
            n: 25,
            min_height: None,
            max_height: None,
            compressed_height: None,
            amp_rate: AMP_SPEED,
            palette: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_defaults_match_documented_values() {
        let cfg = CircleConfig::default();
        assert_eq!(cfg.pos, Vec2::ZERO);
        assert_eq!(cfg.radius, 50.0);
        assert_eq!(cfg.colour, colour::BLACK);
        assert!(cfg.filled);
        assert!(!cfg.animated && !cfg.interactive && !cfg.gravity);
        assert_eq!(cfg.min_radius, 5.0);
        assert_eq!(cfg.max_radius, 100.0);
        assert_eq!(cfg.acceleration, 0.5);
        assert_eq!(cfg.friction, 0.95);
        assert_eq!(cfg.mass, 1.0);
    }

    #[test]
    fn rect_defaults_match_documented_values() {
        let cfg = RectConfig::default();
        assert_eq!(cfg.width, 100.0);
        assert_eq!(cfg.height, 100.0);
        assert!(cfg.min_height.is_none());
        assert_eq!(cfg.amp_rate, 10.0);
    }
}
