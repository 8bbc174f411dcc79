//! The scene: the driver that owns the shape collections, the surface
//! bounds, and the pointer state, and advances everything one frame at a
//! time.
//!
//! The scene is the sole mutator of its collections — entities never add
//! or remove themselves or their peers, and regeneration always clears a
//! collection wholesale. The per-frame loop is a single [`Scene::step`]
//! call driven by the host; starting and stopping the animation is the
//! host's decision, not the scene's.

use glam::Vec2;
use rand::Rng;

use crate::circle::Circle;
use crate::collision;
use crate::colour;
use crate::config::{
    self, AmplifySpawnOptions, CircleConfig, CircleSpawnOptions, CollisionSpawnOptions,
    FollowSpawnOptions, GravitySpawnOptions, RectConfig, RectSpawnOptions,
};
use crate::geometry::distance;
use crate::rect::Rect;
use crate::types::{Bounds, Pointer};

pub struct Scene {
    pub circles: Vec<Circle>,
    pub rects: Vec<Rect>,
    pub pointer: Pointer,
    pub bounds: Bounds,
}

impl Scene {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            circles: Vec::new(),
            rects: Vec::new(),
            pointer: Pointer::with_range(config::RANGE),
            bounds,
        }
    }

    // --- Explicit factories ---

    /// Creates a circle from explicit options and appends it.
    pub fn make_circle(&mut self, cfg: CircleConfig) -> &mut Circle {
        self.circles.push(Circle::new(cfg));
        let last = self.circles.len() - 1;
        &mut self.circles[last]
    }

    /// Creates a rectangle from explicit options and appends it.
    pub fn make_rect(&mut self, cfg: RectConfig) -> &mut Rect {
        self.rects.push(Rect::new(cfg));
        let last = self.rects.len() - 1;
        &mut self.rects[last]
    }

    // --- Randomized factories ---

    /// Spawns `n` random circles: static, bouncing, or interactive
    /// depending on the option flags. Animated circles are placed fully
    /// inside the surface so the first bounce check is meaningful;
    /// velocity components come out as ±speed.
    pub fn spawn_random_circles(&mut self, opts: &CircleSpawnOptions, rng: &mut impl Rng) {
        for _ in 0..opts.n {
            let radius =
                rng.random::<f32>() * (opts.max_radius - opts.min_radius) + opts.min_radius;
            let pos = if opts.animated {
                Vec2::new(
                    rng.random::<f32>() * (self.bounds.width - radius * 2.0) + radius,
                    rng.random::<f32>() * (self.bounds.height - radius * 2.0) + radius,
                )
            } else {
                Vec2::new(
                    rng.random::<f32>() * self.bounds.width,
                    rng.random::<f32>() * self.bounds.height,
                )
            };
            let velocity = Vec2::new(
                random_axis_speed(opts.speed, rng),
                random_axis_speed(opts.speed, rng),
            );

            self.circles.push(Circle::new(CircleConfig {
                pos,
                velocity,
                radius,
                colour: colour::random_colour(opts.palette, rng),
                filled: opts.filled,
                animated: opts.animated,
                interactive: opts.interactive,
                min_radius: opts.shrink_radius,
                shrink_rate: opts.shrink_rate,
                grow_rate: opts.grow_rate,
                ..Default::default()
            }));
        }
    }

    /// Replaces the circle collection with `n` gravity balls dropped
    /// from the upper half of the surface (the click-to-regenerate
    /// scenario). Radii, positions, and velocities are drawn in whole
    /// pixels.
    pub fn spawn_gravity_circles(&mut self, opts: &GravitySpawnOptions, rng: &mut impl Rng) {
        self.circles.clear();
        for _ in 0..opts.n {
            let radius = random_int_from_range(opts.min_radius, opts.max_radius, rng);
            let pos = Vec2::new(
                random_int_from_range(radius, self.bounds.width - radius, rng),
                random_int_from_range(0.0, self.bounds.height / 2.0, rng),
            );
            let velocity = Vec2::new(
                random_int_from_range(-2.0, 2.0, rng),
                random_int_from_range(-2.0, 2.0, rng),
            );

            self.circles.push(Circle::new(CircleConfig {
                pos,
                velocity,
                radius,
                colour: colour::random_colour(opts.palette, rng),
                gravity: true,
                acceleration: opts.acceleration,
                friction: opts.friction,
                ..Default::default()
            }));
        }
    }

    /// Replaces the circle collection with `n` equal-radius colliding
    /// particles. Each new particle's position is re-rolled until it
    /// clears every particle placed before it, so the initial frame has
    /// no overlaps. A surface too crowded for `n` particles of this
    /// radius makes the placement loop spin; the caller controls both.
    pub fn spawn_colliding_circles(&mut self, opts: &CollisionSpawnOptions, rng: &mut impl Rng) {
        self.circles.clear();
        for i in 0..opts.n {
            let mut pos = self.random_collision_pos(opts.radius, rng);
            if i != 0 {
                while self
                    .circles
                    .iter()
                    .any(|c| distance(pos, c.pos) < opts.radius + c.radius)
                {
                    pos = self.random_collision_pos(opts.radius, rng);
                }
            }
            let velocity = Vec2::new(
                (rng.random::<f32>() - 0.5) * opts.speed,
                (rng.random::<f32>() - 0.5) * opts.speed,
            );

            self.circles.push(Circle::new(CircleConfig {
                pos,
                velocity,
                radius: opts.radius,
                colour: colour::random_colour(opts.palette, rng),
                collision: true,
                ..Default::default()
            }));
        }
    }

    fn random_collision_pos(&self, radius: f32, rng: &mut impl Rng) -> Vec2 {
        Vec2::new(
            random_int_from_range(radius, self.bounds.width - radius, rng),
            random_int_from_range(radius, self.bounds.height - radius, rng),
        )
    }

    /// Replaces the circle collection with `n` pointer-following
    /// particles: invisible (radius 0) until the cursor comes near, with
    /// a slow random drift.
    pub fn spawn_following_circles(&mut self, opts: &FollowSpawnOptions, rng: &mut impl Rng) {
        self.circles.clear();
        for _ in 0..opts.n {
            let pos = Vec2::new(
                random_int_from_range(0.0, self.bounds.width, rng),
                random_int_from_range(0.0, self.bounds.height, rng),
            );
            let velocity = Vec2::new(
                rng.random::<f32>() * 0.2 - 0.1,
                rng.random::<f32>() * 0.2 - 0.1,
            );

            self.circles.push(Circle::new(CircleConfig {
                pos,
                velocity,
                radius: 0.0,
                min_radius: 0.0,
                max_radius: opts.max_radius,
                shrink_rate: opts.shrink_rate,
                grow_rate: opts.grow_rate,
                colour: colour::random_colour(opts.palette, rng),
                animated: true,
                follows_pointer: true,
                ..Default::default()
            }));
        }
    }

    /// Spawns `n` random static rectangles. Unset extents default to the
    /// surface dimensions (minimums at 10 % of the surface).
    pub fn spawn_random_rects(&mut self, opts: &RectSpawnOptions, rng: &mut impl Rng) {
        let min_w = opts
            .min_width
            .unwrap_or(self.bounds.width * config::SURFACE_FRACTION);
        let max_w = opts.max_width.unwrap_or(self.bounds.width);
        let min_h = opts
            .min_height
            .unwrap_or(self.bounds.height * config::SURFACE_FRACTION);
        let max_h = opts.max_height.unwrap_or(self.bounds.height);

        for _ in 0..opts.n {
            let pos = Vec2::new(
                rng.random::<f32>() * self.bounds.width,
                rng.random::<f32>() * self.bounds.height,
            );
            self.rects.push(Rect::new(RectConfig {
                pos,
                width: rng.random::<f32>() * (max_w - min_w) + min_w,
                height: rng.random::<f32>() * (max_h - min_h) + min_h,
                colour: colour::random_colour(opts.palette, rng),
                filled: opts.filled,
                ..Default::default()
            }));
        }
    }

    /// Replaces the rectangle collection with `n` equal-width amplifier
    /// bars whose bottom edges sit on the surface floor.
    pub fn spawn_amplifier_rects(&mut self, opts: &AmplifySpawnOptions, rng: &mut impl Rng) {
        self.rects.clear();
        if opts.n == 0 {
            return;
        }

        let min_h = opts
            .min_height
            .unwrap_or(self.bounds.height * config::SURFACE_FRACTION);
        let max_h = opts.max_height.unwrap_or(self.bounds.height);
        let compressed = opts
            .compressed_height
            .unwrap_or(self.bounds.height * config::SURFACE_FRACTION);
        let width = self.bounds.width / opts.n as f32;

        for i in 0..opts.n {
            let height = rng.random::<f32>() * (max_h - min_h) + min_h;
            self.rects.push(Rect::new(RectConfig {
                pos: Vec2::new(width * i as f32, self.bounds.height - height),
                width,
                height,
                min_height: Some(compressed),
                amp_rate: opts.amp_rate,
                colour: colour::random_colour(opts.palette, rng),
                filled: true,
            }));
        }
    }

    // --- Frame update ---

    /// Advances every shape by one frame.
    ///
    /// Circles run their flag-driven behaviours first; a collision-mode
    /// circle then takes its collision turn — pairwise resolution
    /// against every peer, wall reflection, proximity fade, and
    /// integration — from its own slot in the pass. The pass is
    /// sequential, so a pair that already exchanged velocities earlier
    /// in the frame is protected by the resolver's approach guard when
    /// the second circle's turn comes around.
    pub fn step(&mut self) {
        let pointer = self.pointer;
        let bounds = self.bounds;

        for i in 0..self.circles.len() {
            self.circles[i].update(&pointer, bounds);
            if self.circles[i].collision {
                Self::collision_turn(&mut self.circles, i, &pointer, bounds);
            }
        }

        for rect in &mut self.rects {
            rect.update(&self.pointer);
        }
    }

    /// One collision-mode circle's turn. Peers are borrowed by splitting
    /// the collection around index `i`, keeping the two mutable borrows
    /// disjoint.
    fn collision_turn(circles: &mut [Circle], i: usize, pointer: &Pointer, bounds: Bounds) {
        let (head, rest) = circles.split_at_mut(i);
        let Some((me, tail)) = rest.split_first_mut() else {
            return;
        };

        for other in head.iter_mut().chain(tail.iter_mut()) {
            if distance(me.pos, other.pos) < me.radius + other.radius {
                collision::resolve(me, other);
            }
        }

        me.step_collision_motion(pointer, bounds);
    }

    // --- Pointer and lifecycle ---

    pub fn set_pointer(&mut self, pos: Vec2) {
        self.pointer.pos = Some(pos);
    }

    /// Marks the pointer absent; every range check then reads as "far
    /// away". The host calls this when the cursor leaves the surface or
    /// has been idle past the expiry window.
    pub fn expire_pointer(&mut self) {
        self.pointer.pos = None;
    }

    pub fn set_pointer_range(&mut self, range: f32) {
        self.pointer.range = range;
    }

    /// Removes every shape. Collections are only ever cleared wholesale.
    pub fn clear(&mut self) {
        self.circles.clear();
        self.rects.clear();
    }

    pub fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }
}

/// ±speed with equal probability. The draw lands in [-0.5, 0.5) and the
/// away-from-zero rounding turns it into a whole step of ±1 (a draw of
/// exactly zero keeps the component at rest).
fn random_axis_speed(speed: f32, rng: &mut impl Rng) -> f32 {
    let r = rng.random::<f32>() - 0.5;
    if r < 0.0 {
        r.floor() * speed
    } else {
        r.ceil() * speed
    }
}

/// Uniform whole-pixel draw in [min, max]. Collapses to `min` when the
/// interval is empty (a surface smaller than the shapes being placed).
fn random_int_from_range(min: f32, max: f32, rng: &mut impl Rng) -> f32 {
    let lo = min.floor() as i32;
    let hi = max.floor() as i32;
    if hi <= lo {
        return lo as f32;
    }
    rng.random_range(lo..=hi) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn scene() -> Scene {
        Scene::new(Bounds::new(800.0, 600.0))
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn make_circle_uses_documented_defaults() {
        let mut scene = scene();
        let circle = scene.make_circle(CircleConfig::default());

        assert_eq!(circle.pos, Vec2::ZERO);
        assert_eq!(circle.radius, 50.0);
        assert_eq!(circle.original_radius, 50.0);
        assert!(circle.filled);
        assert_eq!(scene.circles.len(), 1);
    }

    #[test]
    fn random_circle_spawn_respects_count_and_radius_band() {
        let mut scene = scene();
        let mut rng = rng();
        let opts = CircleSpawnOptions {
            n: 40,
            min_radius: 10.0,
            max_radius: 30.0,
            ..Default::default()
        };

        scene.spawn_random_circles(&opts, &mut rng);

        assert_eq!(scene.circles.len(), 40);
        for c in &scene.circles {
            assert!(c.radius >= 10.0 && c.radius <= 30.0);
        }
    }

    #[test]
    fn animated_spawn_places_circles_fully_inside() {
        let mut scene = scene();
        let mut rng = rng();
        let opts = CircleSpawnOptions {
            n: 60,
            animated: true,
            ..Default::default()
        };

        scene.spawn_random_circles(&opts, &mut rng);

        for c in &scene.circles {
            assert!(c.pos.x - c.radius >= 0.0 && c.pos.x + c.radius <= 800.0);
            assert!(c.pos.y - c.radius >= 0.0 && c.pos.y + c.radius <= 600.0);
            assert!(c.animated);
        }
    }

    #[test]
    fn palette_spawn_only_uses_palette_colours() {
        let mut scene = scene();
        let mut rng = rng();
        let opts = CircleSpawnOptions {
            n: 30,
            palette: Some(&colour::COLOURFUL),
            ..Default::default()
        };

        scene.spawn_random_circles(&opts, &mut rng);

        for c in &scene.circles {
            assert!(colour::COLOURFUL.contains(&c.colour));
        }
    }

    #[test]
    fn gravity_spawn_replaces_collection_and_drops_from_upper_half() {
        let mut scene = scene();
        let mut rng = rng();
        scene.make_circle(CircleConfig::default());

        scene.spawn_gravity_circles(&GravitySpawnOptions::default(), &mut rng);

        assert_eq!(scene.circles.len(), 50);
        for c in &scene.circles {
            assert!(c.gravity);
            assert!(c.pos.y <= 300.0, "gravity ball spawned below mid-height");
        }
    }

    #[test]
    fn colliding_spawn_produces_non_overlapping_particles() {
        let mut scene = scene();
        let mut rng = rng();
        let opts = CollisionSpawnOptions {
            n: 25,
            radius: 12.0,
            ..Default::default()
        };

        scene.spawn_colliding_circles(&opts, &mut rng);

        assert_eq!(scene.circles.len(), 25);
        for i in 0..scene.circles.len() {
            for j in (i + 1)..scene.circles.len() {
                let a = &scene.circles[i];
                let b = &scene.circles[j];
                assert!(
                    distance(a.pos, b.pos) >= a.radius + b.radius,
                    "particles {i} and {j} overlap at spawn"
                );
            }
        }
    }

    #[test]
    fn following_spawn_starts_invisible() {
        let mut scene = scene();
        let mut rng = rng();

        scene.spawn_following_circles(&FollowSpawnOptions::default(), &mut rng);

        for c in &scene.circles {
            assert_eq!(c.radius, 0.0);
            assert!(c.follows_pointer && c.animated);
            assert!(c.velocity.x.abs() <= 0.1 && c.velocity.y.abs() <= 0.1);
        }
    }

    #[test]
    fn amplifier_spawn_fixes_bars_to_the_floor() {
        let mut scene = scene();
        let mut rng = rng();
        let opts = AmplifySpawnOptions {
            n: 20,
            min_height: Some(100.0),
            max_height: Some(400.0),
            compressed_height: Some(25.0),
            ..Default::default()
        };

        scene.spawn_amplifier_rects(&opts, &mut rng);

        assert_eq!(scene.rects.len(), 20);
        let expected_width = 800.0 / 20.0;
        for (i, r) in scene.rects.iter().enumerate() {
            assert_eq!(r.width, expected_width);
            assert_eq!(r.pos.x, expected_width * i as f32);
            assert!((r.pos.y + r.cur_height - 600.0).abs() < 1e-3);
            assert_eq!(r.min_height, 25.0);
        }
    }

    #[test]
    fn step_advances_animated_circles() {
        let mut scene = scene();
        scene.make_circle(CircleConfig {
            pos: Vec2::new(100.0, 100.0),
            velocity: Vec2::new(3.0, -2.0),
            radius: 10.0,
            animated: true,
            ..Default::default()
        });

        scene.step();

        assert_eq!(scene.circles[0].pos, Vec2::new(103.0, 98.0));
    }

    #[test]
    fn step_resolves_head_on_collision_between_particles() {
        let mut scene = scene();
        scene.make_circle(CircleConfig {
            pos: Vec2::new(100.0, 100.0),
            velocity: Vec2::new(5.0, 0.0),
            radius: 10.0,
            collision: true,
            ..Default::default()
        });
        scene.make_circle(CircleConfig {
            pos: Vec2::new(115.0, 100.0),
            velocity: Vec2::new(-5.0, 0.0),
            radius: 10.0,
            collision: true,
            ..Default::default()
        });

        scene.step();

        // Equal masses: the overlapping head-on pair swaps velocities
        // once; the second circle's turn is blocked by the approach
        // guard, so the swap is not undone within the frame.
        assert!((scene.circles[0].velocity.x - -5.0).abs() < 1e-4);
        assert!((scene.circles[1].velocity.x - 5.0).abs() < 1e-4);
    }

    #[test]
    fn step_updates_amplifier_rects_with_pointer() {
        let mut scene = scene();
        scene.make_rect(RectConfig {
            pos: Vec2::new(100.0, 400.0),
            width: 40.0,
            height: 200.0,
            min_height: Some(50.0),
            amp_rate: 25.0,
            ..Default::default()
        });
        scene.set_pointer(Vec2::new(110.0, 0.0));
        scene.set_pointer_range(50.0);

        scene.step();

        assert_eq!(scene.rects[0].cur_height, 175.0);
    }

    #[test]
    fn clear_empties_both_collections() {
        let mut scene = scene();
        let mut rng = rng();
        scene.spawn_random_circles(&CircleSpawnOptions::default(), &mut rng);
        scene.spawn_random_rects(&RectSpawnOptions::default(), &mut rng);
        assert!(!scene.circles.is_empty() && !scene.rects.is_empty());

        scene.clear();

        assert!(scene.circles.is_empty());
        assert!(scene.rects.is_empty());
    }

    #[test]
    fn pointer_expiry_reads_as_far_away() {
        let mut scene = scene();
        scene.set_pointer(Vec2::new(10.0, 10.0));
        assert!(scene.pointer.within_range(Vec2::new(10.0, 10.0)));

        scene.expire_pointer();
        assert!(!scene.pointer.within_range(Vec2::new(10.0, 10.0)));
        assert!(scene.pointer.axis_outside_range(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn bouncing_circle_stays_inside_over_many_frames() {
        let mut scene = Scene::new(Bounds::new(100.0, 100.0));
        scene.make_circle(CircleConfig {
            pos: Vec2::new(50.0, 50.0),
            velocity: Vec2::new(5.0, 5.0),
            radius: 10.0,
            animated: true,
            ..Default::default()
        });

        for _ in 0..9 {
            scene.step();
            let c = &scene.circles[0];
            assert!(c.pos.x >= 0.0 && c.pos.x <= 100.0);
            assert!(c.pos.y >= 0.0 && c.pos.y <= 100.0);
        }

        // Started center-bound at +5/+5; a 100×100 surface forces at
        // least one reflection within 9 steps.
        let c = &scene.circles[0];
        assert!(c.velocity.x < 0.0 || c.velocity.y < 0.0);
    }
}
