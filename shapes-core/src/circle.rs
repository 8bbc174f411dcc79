//! The circle entity and its per-frame behaviours.
//!
//! Behaviours are independently toggleable flags, not exclusive modes;
//! every applicable behaviour runs each frame in a fixed order:
//! position update → interactivity → gravity → follow-growth. Pairwise
//! collision is a scene-level pass (see [`crate::scene::Scene::step`])
//! because it mutates two entities at once.

use glam::Vec2;

use crate::colour::Colour;
use crate::config::CircleConfig;
use crate::types::{Bounds, Pointer};

/// Per-frame opacity change for collision-mode proximity fade.
pub const OPACITY_FADE_STEP: f32 = 0.03;

/// Upper opacity bound for collision-mode proximity fade.
pub const OPACITY_CEILING: f32 = 0.8;

/// A circle on the drawing surface.
#[derive(Clone, Copy, Debug)]
pub struct Circle {
    pub pos: Vec2,
    pub velocity: Vec2,
    pub colour: Colour,
    pub filled: bool,

    /// Current radius, mutated by the interactive behaviours.
    pub radius: f32,
    /// The radius the circle was created with; the interactive hysteresis
    /// grows back toward it.
    pub original_radius: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub shrink_rate: f32,
    pub grow_rate: f32,

    // Behaviour flags.
    pub animated: bool,
    pub interactive: bool,
    pub gravity: bool,
    pub collision: bool,
    pub follows_pointer: bool,

    pub acceleration: f32,
    pub friction: f32,
    pub mass: f32,

    /// Collision-mode render opacity in [0, [`OPACITY_CEILING`]],
    /// faded by cursor proximity. Starts invisible.
    pub opacity: f32,
}

impl Circle {
    pub fn new(cfg: CircleConfig) -> Self {
        Self {
            pos: cfg.pos,
            velocity: cfg.velocity,
            colour: cfg.colour,
            filled: cfg.filled,
            radius: cfg.radius,
            original_radius: cfg.radius,
            min_radius: cfg.min_radius,
            max_radius: cfg.max_radius,
            shrink_rate: cfg.shrink_rate,
            grow_rate: cfg.grow_rate,
            animated: cfg.animated,
            interactive: cfg.interactive,
            gravity: cfg.gravity,
            collision: cfg.collision,
            follows_pointer: cfg.follows_pointer,
            acceleration: cfg.acceleration,
            friction: cfg.friction,
            mass: cfg.mass,
            opacity: 0.0,
        }
    }

    /// Runs this circle's flag-driven behaviours for one frame, in the
    /// fixed order position → interactivity → gravity → follow-growth.
    ///
    /// Collision-mode movement (pairwise resolution, wall reflection,
    /// proximity fade, integration) is driven by the scene pass instead;
    /// a circle with only the `collision` flag set is untouched here.
    pub fn update(&mut self, pointer: &Pointer, bounds: Bounds) {
        if self.animated {
            self.step_position(bounds);
        }
        if self.interactive {
            self.step_interactive(pointer);
        }
        if self.gravity {
            self.step_gravity(bounds);
        }
        if self.follows_pointer {
            self.step_follow(pointer);
        }
    }

    /// Bounce update: negate a velocity component when the circle's edge
    /// reaches the corresponding wall, then integrate.
    ///
    /// There is no positional clamp, so a circle whose radius is at least
    /// half the surface dimension can oscillate at a wall. Known
    /// limitation, kept as-is.
    pub fn step_position(&mut self, bounds: Bounds) {
        if self.pos.x + self.radius >= bounds.width || self.pos.x - self.radius <= 0.0 {
            self.velocity.x = -self.velocity.x;
        }
        if self.pos.y + self.radius >= bounds.height || self.pos.y - self.radius <= 0.0 {
            self.velocity.y = -self.velocity.y;
        }
        self.pos += self.velocity;
    }

    /// Interactive shrink/grow with a three-branch hysteresis on the
    /// per-axis cursor distance:
    ///
    /// 1. Cursor within range on both axes and radius has room above the
    ///    shrink floor → shrink by `shrink_rate`.
    /// 2. Cursor at or beyond range on both axes and radius below the
    ///    original → grow by `grow_rate`.
    /// 3. Radius overshot the original → pull back at a fixed 1 per frame.
    ///
    /// A cursor close on one axis but far on the other matches neither
    /// range branch, which holds the radius steady inside the band.
    pub fn step_interactive(&mut self, pointer: &Pointer) {
        if pointer.axis_within_range(self.pos) && self.radius >= self.min_radius + self.shrink_rate
        {
            self.radius -= self.shrink_rate;
        } else if pointer.axis_outside_range(self.pos) && self.radius < self.original_radius {
            self.radius += self.grow_rate;
        } else if self.radius > self.original_radius {
            self.radius -= 1.0;
        }
    }

    /// Gravity update: when the next downward step would cross the floor,
    /// invert and dampen the vertical velocity and dampen the horizontal
    /// velocity by `friction`; otherwise accelerate downward. Side walls
    /// invert and dampen the horizontal velocity. Then integrate.
    pub fn step_gravity(&mut self, bounds: Bounds) {
        if self.pos.y + self.radius + self.velocity.y > bounds.height {
            self.velocity.y = -self.velocity.y * self.friction;
            self.velocity.x *= self.friction;
        } else {
            self.velocity.y += self.acceleration;
        }

        if self.pos.x + self.radius >= bounds.width || self.pos.x - self.radius <= 0.0 {
            self.velocity.x = -self.velocity.x * self.friction;
        }

        self.pos += self.velocity;
    }

    /// Follow-growth update: grow toward `max_radius` while the cursor is
    /// within Euclidean range, shrink toward `min_radius` otherwise, with
    /// a hard floor at zero.
    pub fn step_follow(&mut self, pointer: &Pointer) {
        if pointer.within_range(self.pos) && self.radius < self.max_radius {
            self.radius += self.grow_rate;
        } else if self.radius > self.min_radius {
            self.radius -= self.shrink_rate;
        }
        if self.radius < 0.0 {
            self.radius = 0.0;
        }
    }

    /// Collision-mode wall reflection, proximity fade, and integration.
    /// Runs after the pairwise resolution pass each frame.
    pub fn step_collision_motion(&mut self, pointer: &Pointer, bounds: Bounds) {
        if self.pos.x - self.radius <= 0.0 || self.pos.x + self.radius >= bounds.width {
            self.velocity.x = -self.velocity.x;
        }
        if self.pos.y - self.radius <= 0.0 || self.pos.y + self.radius >= bounds.height {
            self.velocity.y = -self.velocity.y;
        }

        // Fade toward the ceiling near the cursor, toward invisible away
        // from it.
        if pointer.within_range(self.pos) {
            self.opacity = (self.opacity + OPACITY_FADE_STEP).min(OPACITY_CEILING);
        } else {
            self.opacity = (self.opacity - OPACITY_FADE_STEP).max(0.0);
        }

        self.pos += self.velocity;
    }
}
