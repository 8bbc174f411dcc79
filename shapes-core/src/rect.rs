//! The rectangle entity: a static block or, with a compressed-height
//! floor, an amplifier bar that reacts to the cursor's horizontal
//! position.

use glam::Vec2;

use crate::colour::Colour;
use crate::config::RectConfig;
use crate::types::Pointer;

/// A rectangle on the drawing surface. `pos` is the top-left corner.
#[derive(Clone, Copy, Debug)]
pub struct Rect {
    pub pos: Vec2,
    /// Fixed after creation; only the height is animated.
    pub width: f32,
    pub cur_height: f32,
    pub original_height: f32,
    pub min_height: f32,
    /// Height change per frame while compressing or expanding.
    pub amp_rate: f32,
    pub colour: Colour,
    pub filled: bool,
}

impl Rect {
    pub fn new(cfg: RectConfig) -> Self {
        Self {
            pos: cfg.pos,
            width: cfg.width,
            cur_height: cfg.height,
            original_height: cfg.height,
            min_height: cfg.min_height.unwrap_or(cfg.height),
            amp_rate: cfg.amp_rate,
            colour: cfg.colour,
            filled: cfg.filled,
        }
    }

    /// Amplifier update: compress while the cursor is horizontally within
    /// range of the bar's left edge, expand back otherwise. The top edge
    /// moves with the height so the bottom edge stays fixed. Only the
    /// horizontal cursor distance participates; with `min_height` equal
    /// to the original height this is a no-op.
    pub fn update(&mut self, pointer: &Pointer) {
        let near = match pointer.pos {
            Some(p) => (p.x - self.pos.x).abs() <= pointer.range,
            None => false,
        };

        if near && self.cur_height > self.min_height {
            self.cur_height -= self.amp_rate;
            self.pos.y += self.amp_rate;
        } else if !near && self.cur_height < self.original_height {
            self.cur_height += self.amp_rate;
            self.pos.y -= self.amp_rate;
        }
    }
}
