//! Escape-time fractal renderers: an interactive Julia set explorer and
//! a Mandelbrot set explorer.
//!
//! Both views are pure functions of (pixel, view state): they fill a
//! caller-provided RGBA byte buffer in one synchronous pass and keep no
//! state beyond the current pan/zoom/hue parameters. A full re-render
//! costs O(width · height · max_iterations), so the per-pixel loops stay
//! allocation-free and interactions re-render at most once.

use num_complex::Complex64;

use crate::colour::Colour;

/// Escape threshold for the Mandelbrot bailout test.
pub const MANDELBROT_BAILOUT: f64 = 5.0;

// Hand-tuned screen-space skew applied when re-centering a zoom.
const ZOOM_SKEW_X: f64 = 90.0;
const ZOOM_SKEW_Y: f64 = 50.0;

/// Interactive Julia set view.
///
/// Until the first click the constant `c` tracks the pointer (rounded to
/// two decimals), letting the user sweep through different Julia sets.
/// The first click locks `c`; every later click re-centers the view on
/// the clicked point and doubles the zoom.
#[derive(Clone, Copy, Debug)]
pub struct JuliaView {
    pub constant: Complex64,
    pub pan: Complex64,
    pub zoom: f64,
    /// Hue in degrees for the iteration-count colour ramp.
    pub hue: f32,
    pub max_iterations: u32,
    /// Set by the first click; freezes the constant.
    pub locked: bool,
}

impl Default for JuliaView {
    fn default() -> Self {
        Self {
            constant: Complex64::new(0.28, 0.01),
            pan: Complex64::new(0.0, 0.0),
            zoom: 1.0,
            hue: 0.0,
            max_iterations: 64,
            locked: false,
        }
    }
}

impl JuliaView {
    /// Maps a pixel to a point on the complex plane: the surface spans
    /// [-1, 1] on both axes with y pointing up, scaled by the zoom and
    /// offset by the pan.
    pub fn pixel_to_point(&self, x: f64, y: f64, width: f64, height: f64) -> Complex64 {
        let zx = (x / width) * 2.0 - 1.0;
        let zy = 1.0 - (y / height) * 2.0;
        Complex64::new(zx, zy) / self.zoom + self.pan
    }

    /// Iterates z ← z² + c from `z`, returning the step at which |z|
    /// left the radius-2 disc, capped at `max_iterations` for bounded
    /// orbits.
    pub fn escape_iterations(&self, mut z: Complex64) -> u32 {
        let mut i = 0;
        loop {
            z = z * z + self.constant;
            if z.norm_sqr() > 4.0 || i == self.max_iterations {
                return i;
            }
            i += 1;
        }
    }

    /// Renders the view into `pixels` as row-major RGBA, resizing the
    /// buffer to `width * height * 4`. Escape counts map to an HSL
    /// lightness ramp; bounded orbits come out white.
    pub fn render(&self, width: usize, height: usize, pixels: &mut Vec<u8>) {
        pixels.clear();
        pixels.resize(width * height * 4, 0);
        let cap = self.max_iterations.max(1) as f32;

        for y in 0..height {
            for x in 0..width {
                let point =
                    self.pixel_to_point(x as f64, y as f64, width as f64, height as f64);
                let fraction = self.escape_iterations(point) as f32 / cap;
                let colour = Colour::from_hsl(self.hue, 1.0, fraction);

                let idx = (y * width + x) * 4;
                pixels[idx] = colour.r;
                pixels[idx + 1] = colour.g;
                pixels[idx + 2] = colour.b;
                pixels[idx + 3] = 255;
            }
        }
    }

    /// Tracks the pointer into the constant while unlocked, rounded to
    /// two decimals. Returns `true` when the constant actually changed
    /// and the view needs a re-render.
    pub fn pointer_moved(&mut self, x: f64, y: f64, width: f64, height: f64) -> bool {
        if self.locked {
            return false;
        }
        let p = self.pixel_to_point(x, y, width, height);
        let rounded = Complex64::new(
            (p.re * 100.0).round() / 100.0,
            (p.im * 100.0).round() / 100.0,
        );
        if rounded != self.constant {
            self.constant = rounded;
            true
        } else {
            false
        }
    }

    /// First click locks the constant; subsequent clicks pan to the
    /// clicked point and double the zoom.
    pub fn clicked(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if !self.locked {
            self.locked = true;
            return;
        }
        self.pan = self.pixel_to_point(x, y, width, height);
        self.zoom *= 2.0;
    }
}

/// Interactive Mandelbrot set view.
#[derive(Clone, Copy, Debug)]
pub struct MandelbrotView {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
    /// Hue in degrees for the escape-fraction colour ramp.
    pub hue: f32,
    pub max_iterations: u32,
    /// Zoom multiplier per click.
    pub zoom_factor: f64,
}

impl Default for MandelbrotView {
    fn default() -> Self {
        Self {
            zoom: 150.0,
            pan_x: 1.5,
            pan_y: 1.2,
            hue: 0.0,
            max_iterations: 150,
            zoom_factor: 2.0,
        }
    }
}

impl MandelbrotView {
    /// Escape test for c = x + iy. Returns `None` when the orbit stays
    /// bounded for the full iteration budget (the point is treated as
    /// inside the set), or `Some(i)` with the iteration at which the
    /// bailout tripped.
    ///
    /// The bailout is the product test `re * im > 5`, not the
    /// conventional |z|² > 4. The colour ramp is tuned around it;
    /// swapping in the conventional test changes the rendered banding.
    pub fn escape(&self, x: f64, y: f64) -> Option<u32> {
        let mut re = x;
        let mut im = y;

        for i in 0..self.max_iterations {
            let next_re = re * re - im * im + x;
            let next_im = 2.0 * re * im + y;
            re = next_re;
            im = next_im;

            if re * im > MANDELBROT_BAILOUT {
                return Some(i);
            }
        }
        None
    }

    /// Renders the view into `pixels` as row-major RGBA, resizing the
    /// buffer to `width * height * 4`. In-set points are black; escaped
    /// points get an HSL lightness proportional to their escape
    /// fraction.
    pub fn render(&self, width: usize, height: usize, pixels: &mut Vec<u8>) {
        pixels.clear();
        pixels.resize(width * height * 4, 0);
        let cap = self.max_iterations.max(1) as f32;

        for y in 0..height {
            for x in 0..width {
                let cx = x as f64 / self.zoom - self.pan_x;
                let cy = y as f64 / self.zoom - self.pan_y;

                let colour = match self.escape(cx, cy) {
                    None => Colour::rgb(0, 0, 0),
                    Some(i) => Colour::from_hsl(self.hue, 1.0, i as f32 / cap),
                };

                let idx = (y * width + x) * 4;
                pixels[idx] = colour.r;
                pixels[idx + 1] = colour.g;
                pixels[idx + 2] = colour.b;
                pixels[idx + 3] = 255;
            }
        }
    }

    /// Re-centers and re-scales the view around the cursor. `factor` is
    /// the zoom multiplier for this interaction (1.0 pans without
    /// zooming); `zoom_in` selects the direction. The skew constants are
    /// the hand-tuned centering correction.
    pub fn zoom_at(
        &mut self,
        mouse_x: f64,
        mouse_y: f64,
        width: f64,
        height: f64,
        zoom_in: bool,
        factor: f64,
    ) {
        let offset_x = -width / 2.0;
        let offset_y = -height / 2.0;

        if zoom_in {
            self.zoom *= factor;
            let dx = -(mouse_x + offset_x + self.pan_x + ZOOM_SKEW_X * factor) / self.zoom * factor;
            let dy = -(mouse_y + offset_y + self.pan_y + ZOOM_SKEW_Y * factor) / self.zoom * factor;
            self.pan_x += dx;
            self.pan_y += dy;
        } else {
            self.zoom /= factor;
            let dx = -(mouse_x + offset_x - self.pan_x - ZOOM_SKEW_X * factor) / self.zoom;
            let dy = -(mouse_y + offset_y - self.pan_y - ZOOM_SKEW_Y * factor) / self.zoom;
            self.pan_x += dx;
            self.pan_y += dy;
        }
    }
}
