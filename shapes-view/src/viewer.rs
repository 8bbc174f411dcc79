//! Interactive 2D shapes playground built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the simulation state
//! (scene, scenario, fractal views) and implements [`eframe::App`] to
//! render and control everything through an egui UI.

use eframe::App;
use glam::Vec2;
use rand::rng;
use shapes_core::{
    colour::{self, Colour},
    config::{
        self, AmplifySpawnOptions, CircleSpawnOptions, CollisionSpawnOptions, FollowSpawnOptions,
        GravitySpawnOptions, RectSpawnOptions,
    },
    fractal::{JuliaView, MandelbrotView},
    scene::Scene,
    types::Bounds,
};

/// Seconds of pointer stillness after which the scene's pointer is
/// treated as absent, mirroring the periodic reset of the cursor state.
const POINTER_IDLE_EXPIRY: f64 = 1.0;

/// The selectable demo scenarios, one per behaviour of the shape library.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scenario {
    /// Random static circles and rectangles, drawn once.
    StaticShapes,
    /// Wall-bouncing circles.
    Bouncing,
    /// Static circles that shrink near the cursor and grow back.
    Interactive,
    /// Bouncing circles with the same cursor interactivity.
    InteractiveAnimated,
    /// Balls dropped under gravity; click to respawn.
    Gravity,
    /// Elastic particles that fade in near the cursor.
    Colliding,
    /// Invisible particles that grow when the cursor comes near.
    Following,
    /// Amplifier bars compressed by the cursor's horizontal position.
    Amplifier,
    /// Julia set explorer: move to pick the constant, click to lock,
    /// click again to zoom.
    Julia,
    /// Mandelbrot set explorer: click to zoom in, alt-click to zoom
    /// out, shift-click to pan.
    Mandelbrot,
}

impl Scenario {
    pub const ALL: [Scenario; 10] = [
        Scenario::StaticShapes,
        Scenario::Bouncing,
        Scenario::Interactive,
        Scenario::InteractiveAnimated,
        Scenario::Gravity,
        Scenario::Colliding,
        Scenario::Following,
        Scenario::Amplifier,
        Scenario::Julia,
        Scenario::Mandelbrot,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Scenario::StaticShapes => "Static shapes",
            Scenario::Bouncing => "Bouncing circles",
            Scenario::Interactive => "Interactive circles",
            Scenario::InteractiveAnimated => "Interactive + animated",
            Scenario::Gravity => "Gravity balls",
            Scenario::Colliding => "Colliding particles",
            Scenario::Following => "Following particles",
            Scenario::Amplifier => "Amplifier bars",
            Scenario::Julia => "Julia fractal",
            Scenario::Mandelbrot => "Mandelbrot fractal",
        }
    }

    pub fn is_fractal(self) -> bool {
        matches!(self, Scenario::Julia | Scenario::Mandelbrot)
    }
}

/// Palette selection for the spawn factories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaletteChoice {
    Random,
    RariSeatOrange,
    Colors02,
    ThemeSky,
    Colourful,
}

impl PaletteChoice {
    pub const ALL: [PaletteChoice; 5] = [
        PaletteChoice::Random,
        PaletteChoice::RariSeatOrange,
        PaletteChoice::Colors02,
        PaletteChoice::ThemeSky,
        PaletteChoice::Colourful,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PaletteChoice::Random => "Random RGBA",
            PaletteChoice::RariSeatOrange => "Rari seat orange",
            PaletteChoice::Colors02 => "Colors 02",
            PaletteChoice::ThemeSky => "Theme sky",
            PaletteChoice::Colourful => "Colourful",
        }
    }

    pub fn colours(self) -> Option<&'static [Colour]> {
        match self {
            PaletteChoice::Random => None,
            PaletteChoice::RariSeatOrange => Some(&colour::RARI_SEAT_ORANGE),
            PaletteChoice::Colors02 => Some(&colour::COLORS_02),
            PaletteChoice::ThemeSky => Some(&colour::COLOR_THEME_SKY),
            PaletteChoice::Colourful => Some(&colour::COLOURFUL),
        }
    }
}

/// Main application state for the interactive playground.
///
/// [`Viewer`] glues together:
/// - The simulation core: [`Scene`] plus the two fractal views.
/// - Per-scenario spawn options edited in the config panel.
/// - eframe/egui callbacks for drawing and user interaction.
///
/// The typical per-frame update is:
/// 1. Handle UI interactions / input and feed the pointer into the scene.
/// 2. If `running`, call [`Scene::step`] and request a repaint.
/// 3. Paint the shapes (or the cached fractal texture).
pub struct Viewer {
    scene: Scene,
    rng: rand::rngs::ThreadRng,

    scenario: Scenario,
    running: bool,
    needs_respawn: bool,

    // Editable spawn options, one set per scenario family.
    circle_opts: CircleSpawnOptions,
    gravity_opts: GravitySpawnOptions,
    collision_opts: CollisionSpawnOptions,
    follow_opts: FollowSpawnOptions,
    rect_opts: RectSpawnOptions,
    amplify_opts: AmplifySpawnOptions,
    palette: PaletteChoice,
    range: f32,

    julia: JuliaView,
    mandelbrot: MandelbrotView,
    fractal_pixels: Vec<u8>,
    fractal_texture: Option<egui::TextureHandle>,
    fractal_size: (usize, usize),
    fractal_dirty: bool,

    last_pointer_pos: Option<egui::Pos2>,
    last_pointer_move: f64,

    last_frame_time: f64,
    last_frame_dt: f64,
}

impl Viewer {
    /// Creates a viewer on the bouncing-circles scenario. The first
    /// central-panel frame supplies the real surface size and triggers
    /// the initial spawn.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(Bounds::new(0.0, 0.0)),
            rng: rng(),
            scenario: Scenario::Bouncing,
            running: true,
            needs_respawn: true,
            circle_opts: CircleSpawnOptions {
                max_radius: 50.0,
                min_radius: 10.0,
                speed: 3.0,
                ..Default::default()
            },
            gravity_opts: GravitySpawnOptions {
                min_radius: 10.0,
                max_radius: 20.0,
                ..Default::default()
            },
            collision_opts: CollisionSpawnOptions {
                speed: 3.0,
                ..Default::default()
            },
            follow_opts: FollowSpawnOptions {
                max_radius: 50.0,
                ..Default::default()
            },
            rect_opts: RectSpawnOptions {
                max_width: Some(150.0),
                max_height: Some(150.0),
                min_width: Some(20.0),
                min_height: Some(20.0),
                ..Default::default()
            },
            amplify_opts: AmplifySpawnOptions {
                min_height: Some(200.0),
                max_height: Some(450.0),
                compressed_height: Some(25.0),
                ..Default::default()
            },
            palette: PaletteChoice::Colourful,
            range: config::RANGE,
            julia: JuliaView::default(),
            mandelbrot: MandelbrotView::default(),
            fractal_pixels: Vec::new(),
            fractal_texture: None,
            fractal_size: (0, 0),
            fractal_dirty: true,
            last_pointer_pos: None,
            last_pointer_move: 0.0,
            last_frame_time: 0.0,
            last_frame_dt: 0.0,
        }
    }

    /// Switches to `scenario` and schedules a respawn on the next frame.
    fn switch_scenario(&mut self, scenario: Scenario) {
        log::info!("switching scenario to {:?}", scenario);
        self.scenario = scenario;
        self.needs_respawn = true;
    }

    /// Rebuilds the scene contents for the current scenario. Fractal
    /// scenarios clear the shape collections and reset their view state.
    fn respawn(&mut self) {
        self.scene.clear();
        self.scene.set_pointer_range(self.range);
        let palette = self.palette.colours();

        match self.scenario {
            Scenario::StaticShapes => {
                let opts = CircleSpawnOptions {
                    animated: false,
                    interactive: false,
                    palette,
                    ..self.circle_opts
                };
                self.scene.spawn_random_circles(&opts, &mut self.rng);
                let rect_opts = RectSpawnOptions {
                    palette,
                    ..self.rect_opts
                };
                self.scene.spawn_random_rects(&rect_opts, &mut self.rng);
            }
            Scenario::Bouncing => {
                let opts = CircleSpawnOptions {
                    animated: true,
                    interactive: false,
                    palette,
                    ..self.circle_opts
                };
                self.scene.spawn_random_circles(&opts, &mut self.rng);
            }
            Scenario::Interactive => {
                let opts = CircleSpawnOptions {
                    animated: false,
                    interactive: true,
                    palette,
                    ..self.circle_opts
                };
                self.scene.spawn_random_circles(&opts, &mut self.rng);
            }
            Scenario::InteractiveAnimated => {
                let opts = CircleSpawnOptions {
                    animated: true,
                    interactive: true,
                    palette,
                    ..self.circle_opts
                };
                self.scene.spawn_random_circles(&opts, &mut self.rng);
            }
            Scenario::Gravity => {
                let opts = GravitySpawnOptions {
                    palette,
                    ..self.gravity_opts
                };
                self.scene.spawn_gravity_circles(&opts, &mut self.rng);
            }
            Scenario::Colliding => {
                let opts = CollisionSpawnOptions {
                    palette,
                    ..self.collision_opts
                };
                self.scene.spawn_colliding_circles(&opts, &mut self.rng);
            }
            Scenario::Following => {
                let opts = FollowSpawnOptions {
                    palette,
                    ..self.follow_opts
                };
                self.scene.spawn_following_circles(&opts, &mut self.rng);
            }
            Scenario::Amplifier => {
                let opts = AmplifySpawnOptions {
                    palette,
                    ..self.amplify_opts
                };
                self.scene.spawn_amplifier_rects(&opts, &mut self.rng);
            }
            Scenario::Julia => {
                self.julia = JuliaView {
                    hue: self.julia.hue,
                    max_iterations: self.julia.max_iterations,
                    ..Default::default()
                };
                self.fractal_dirty = true;
            }
            Scenario::Mandelbrot => {
                self.mandelbrot = MandelbrotView {
                    hue: self.mandelbrot.hue,
                    max_iterations: self.mandelbrot.max_iterations,
                    ..Default::default()
                };
                self.fractal_dirty = true;
            }
        }
        self.needs_respawn = false;
    }

    /// Feeds the hovered cursor position into the scene, expiring it
    /// after [`POINTER_IDLE_EXPIRY`] seconds of stillness.
    fn track_pointer(&mut self, hover: Option<egui::Pos2>, origin: egui::Pos2, now: f64) {
        match hover {
            Some(p) => {
                if self.last_pointer_pos != Some(p) {
                    self.last_pointer_pos = Some(p);
                    self.last_pointer_move = now;
                }
                if now - self.last_pointer_move > POINTER_IDLE_EXPIRY {
                    self.scene.expire_pointer();
                } else {
                    let rel = p - origin;
                    self.scene.set_pointer(Vec2::new(rel.x, rel.y));
                }
            }
            None => {
                self.last_pointer_pos = None;
                self.scene.expire_pointer();
            }
        }
    }

    // --- UI panels ---

    /// Helper to draw a labeled `usize` [`egui::DragValue`].
    fn labeled_drag_usize(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut usize,
        range: std::ops::RangeInclusive<usize>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel UI (run controls, stepping, scenario).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                if ui.button("Step").clicked() {
                    self.scene.step();
                }

                if ui.button("Regenerate").clicked() {
                    self.needs_respawn = true;
                }

                ui.separator();

                let mut selected = self.scenario;
                egui::ComboBox::from_label("Scenario")
                    .selected_text(selected.label())
                    .show_ui(ui, |ui| {
                        for s in Scenario::ALL {
                            ui.selectable_value(&mut selected, s, s.label());
                        }
                    });
                if selected != self.scenario {
                    self.switch_scenario(selected);
                }
            });
        });
    }

    /// Builds the bottom status bar (shape counts, pointer, frame time).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("dt = {:.3} s", self.last_frame_dt));
                ui.separator();
                if self.scenario.is_fractal() {
                    let zoom = match self.scenario {
                        Scenario::Julia => self.julia.zoom,
                        _ => self.mandelbrot.zoom,
                    };
                    ui.label(format!("zoom = {zoom:.1}"));
                } else {
                    ui.label(format!("circles = {}", self.scene.circles.len()));
                    ui.label(format!("rects = {}", self.scene.rects.len()));
                }
                ui.separator();
                match self.scene.pointer.pos {
                    Some(p) => ui.label(format!("pointer = ({:.0}, {:.0})", p.x, p.y)),
                    None => ui.label("pointer = absent"),
                };
            });
        });
    }

    /// Builds the right-hand configuration panel for the current
    /// scenario's spawn parameters.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");

                ui.separator();
                let mut palette = self.palette;
                egui::ComboBox::from_label("Palette")
                    .selected_text(palette.label())
                    .show_ui(ui, |ui| {
                        for p in PaletteChoice::ALL {
                            ui.selectable_value(&mut palette, p, p.label());
                        }
                    });
                self.palette = palette;

                ui.separator();
                match self.scenario {
                    Scenario::StaticShapes => {
                        Self::labeled_drag_usize(ui, "circles:", &mut self.circle_opts.n, 1..=500, 1.0);
                        Self::labeled_drag_usize(ui, "rects:", &mut self.rect_opts.n, 1..=500, 1.0);
                        Self::labeled_drag_f32(ui, "max radius:", &mut self.circle_opts.max_radius, 1.0..=200.0, 1.0);
                    }
                    Scenario::Bouncing
                    | Scenario::Interactive
                    | Scenario::InteractiveAnimated => {
                        Self::labeled_drag_usize(ui, "n:", &mut self.circle_opts.n, 1..=500, 1.0);
                        Self::labeled_drag_f32(ui, "min radius:", &mut self.circle_opts.min_radius, 1.0..=100.0, 1.0);
                        Self::labeled_drag_f32(ui, "max radius:", &mut self.circle_opts.max_radius, 1.0..=200.0, 1.0);
                        Self::labeled_drag_f32(ui, "speed:", &mut self.circle_opts.speed, 0.0..=20.0, 0.1);
                        Self::labeled_drag_f32(ui, "shrink rate:", &mut self.circle_opts.shrink_rate, 0.0..=20.0, 0.1);
                        Self::labeled_drag_f32(ui, "grow rate:", &mut self.circle_opts.grow_rate, 0.0..=20.0, 0.1);
                        ui.add(egui::Slider::new(&mut self.range, 10.0..=300.0).text("range"));
                    }
                    Scenario::Gravity => {
                        Self::labeled_drag_usize(ui, "n:", &mut self.gravity_opts.n, 1..=500, 1.0);
                        Self::labeled_drag_f32(ui, "min radius:", &mut self.gravity_opts.min_radius, 1.0..=100.0, 1.0);
                        Self::labeled_drag_f32(ui, "max radius:", &mut self.gravity_opts.max_radius, 1.0..=200.0, 1.0);
                        Self::labeled_drag_f32(ui, "acceleration:", &mut self.gravity_opts.acceleration, 0.0..=5.0, 0.05);
                        Self::labeled_drag_f32(ui, "friction:", &mut self.gravity_opts.friction, 0.0..=1.0, 0.01);
                    }
                    Scenario::Colliding => {
                        Self::labeled_drag_usize(ui, "n:", &mut self.collision_opts.n, 1..=200, 1.0);
                        Self::labeled_drag_f32(ui, "radius:", &mut self.collision_opts.radius, 2.0..=60.0, 1.0);
                        Self::labeled_drag_f32(ui, "speed:", &mut self.collision_opts.speed, 0.0..=20.0, 0.1);
                        ui.add(egui::Slider::new(&mut self.range, 10.0..=300.0).text("range"));
                    }
                    Scenario::Following => {
                        Self::labeled_drag_usize(ui, "n:", &mut self.follow_opts.n, 1..=2000, 5.0);
                        Self::labeled_drag_f32(ui, "max radius:", &mut self.follow_opts.max_radius, 1.0..=200.0, 1.0);
                        Self::labeled_drag_f32(ui, "shrink rate:", &mut self.follow_opts.shrink_rate, 0.0..=5.0, 0.05);
                        Self::labeled_drag_f32(ui, "grow rate:", &mut self.follow_opts.grow_rate, 0.0..=20.0, 0.1);
                        ui.add(egui::Slider::new(&mut self.range, 10.0..=300.0).text("range"));
                    }
                    Scenario::Amplifier => {
                        Self::labeled_drag_usize(ui, "bars:", &mut self.amplify_opts.n, 1..=100, 1.0);
                        Self::labeled_drag_f32(ui, "amp rate:", &mut self.amplify_opts.amp_rate, 1.0..=100.0, 1.0);
                        ui.add(egui::Slider::new(&mut self.range, 10.0..=300.0).text("range"));
                    }
                    Scenario::Julia => {
                        let mut max_iterations = self.julia.max_iterations as usize;
                        Self::labeled_drag_usize(ui, "max iterations:", &mut max_iterations, 1..=1000, 1.0);
                        if max_iterations as u32 != self.julia.max_iterations {
                            self.julia.max_iterations = max_iterations as u32;
                            self.fractal_dirty = true;
                        }
                        let mut hue = self.julia.hue;
                        ui.add(egui::Slider::new(&mut hue, 0.0..=360.0).text("hue"));
                        if hue != self.julia.hue {
                            self.julia.hue = hue;
                            self.fractal_dirty = true;
                        }
                        ui.label(format!(
                            "c = {:.2} {:+.2}i{}",
                            self.julia.constant.re,
                            self.julia.constant.im,
                            if self.julia.locked { " (locked)" } else { "" }
                        ));
                    }
                    Scenario::Mandelbrot => {
                        let mut max_iterations = self.mandelbrot.max_iterations as usize;
                        Self::labeled_drag_usize(ui, "max iterations:", &mut max_iterations, 1..=1000, 1.0);
                        if max_iterations as u32 != self.mandelbrot.max_iterations {
                            self.mandelbrot.max_iterations = max_iterations as u32;
                            self.fractal_dirty = true;
                        }
                        let mut hue = self.mandelbrot.hue;
                        ui.add(egui::Slider::new(&mut hue, 0.0..=360.0).text("hue"));
                        if hue != self.mandelbrot.hue {
                            self.mandelbrot.hue = hue;
                            self.fractal_dirty = true;
                        }
                        let mut zoom_factor = self.mandelbrot.zoom_factor as f32;
                        Self::labeled_drag_f32(ui, "zoom factor:", &mut zoom_factor, 1.1..=8.0, 0.1);
                        self.mandelbrot.zoom_factor = f64::from(zoom_factor);
                    }
                }

                ui.separator();
                if ui.button("Regenerate").clicked() {
                    self.needs_respawn = true;
                }
                if ui.button("Reset config to default").clicked() {
                    self.reset_config();
                    self.needs_respawn = true;
                }
            });
    }

    /// Restores every spawn option to its preset default.
    fn reset_config(&mut self) {
        let fresh = Viewer::new();
        self.circle_opts = fresh.circle_opts;
        self.gravity_opts = fresh.gravity_opts;
        self.collision_opts = fresh.collision_opts;
        self.follow_opts = fresh.follow_opts;
        self.rect_opts = fresh.rect_opts;
        self.amplify_opts = fresh.amplify_opts;
        self.palette = fresh.palette;
        self.range = fresh.range;
    }

    /// Renders the active fractal into the cached texture if the view
    /// changed or the panel was resized.
    fn refresh_fractal_texture(&mut self, ctx: &egui::Context, width: usize, height: usize) {
        if !self.fractal_dirty && self.fractal_size == (width, height) && self.fractal_texture.is_some()
        {
            return;
        }

        let start = std::time::Instant::now();
        match self.scenario {
            Scenario::Julia => self.julia.render(width, height, &mut self.fractal_pixels),
            _ => self.mandelbrot.render(width, height, &mut self.fractal_pixels),
        }
        log::debug!(
            "rendered {:?} at {width}x{height} in {:.1} ms",
            self.scenario,
            start.elapsed().as_secs_f64() * 1000.0
        );

        let image = egui::ColorImage::from_rgba_unmultiplied([width, height], &self.fractal_pixels);
        self.fractal_texture =
            Some(ctx.load_texture("fractal", image, egui::TextureOptions::NEAREST));
        self.fractal_size = (width, height);
        self.fractal_dirty = false;
    }

    /// Builds the central panel: input handling, stepping, and painting.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);
            let now = ctx.input(|i| i.time);

            // Keep the scene's surface in sync with the panel.
            let bounds = Bounds::new(rect.width(), rect.height());
            if self.scene.bounds != bounds {
                self.scene.resize(bounds);
            }
            if self.needs_respawn {
                self.respawn();
            }

            self.track_pointer(response.hover_pos(), rect.min, now);

            if self.scenario.is_fractal() {
                self.ui_fractal(ctx, &response, rect, &painter);
                return;
            }

            // Scenario-specific click handling: gravity regenerates.
            if response.clicked() && self.scenario == Scenario::Gravity {
                self.respawn();
            }

            if self.running {
                self.scene.step();
                self.last_frame_dt = now - self.last_frame_time;
                self.last_frame_time = now;
                ctx.request_repaint();
            }

            self.paint_shapes(&painter, rect.min);
        });
    }

    /// Fractal-mode input handling and texture painting.
    fn ui_fractal(
        &mut self,
        ctx: &egui::Context,
        response: &egui::Response,
        rect: egui::Rect,
        painter: &egui::Painter,
    ) {
        let width = rect.width() as usize;
        let height = rect.height() as usize;
        if width == 0 || height == 0 {
            return;
        }

        let rel = response
            .hover_pos()
            .map(|p| (f64::from(p.x - rect.min.x), f64::from(p.y - rect.min.y)));

        match self.scenario {
            Scenario::Julia => {
                if let Some((x, y)) = rel {
                    if self.julia.pointer_moved(x, y, width as f64, height as f64) {
                        self.fractal_dirty = true;
                    }
                    if response.clicked() {
                        self.julia.clicked(x, y, width as f64, height as f64);
                        self.fractal_dirty = true;
                    }
                }
            }
            Scenario::Mandelbrot => {
                if let Some((x, y)) = rel
                    && response.clicked()
                {
                    let modifiers = ctx.input(|i| i.modifiers);
                    let factor = if modifiers.shift {
                        1.0
                    } else {
                        self.mandelbrot.zoom_factor
                    };
                    self.mandelbrot
                        .zoom_at(x, y, width as f64, height as f64, !modifiers.alt, factor);
                    self.fractal_dirty = true;
                }
            }
            _ => {}
        }

        self.refresh_fractal_texture(ctx, width, height);
        if let Some(texture) = &self.fractal_texture {
            painter.image(
                texture.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
    }

    /// Paints every circle and rectangle at its scene position, offset
    /// into the panel.
    fn paint_shapes(&self, painter: &egui::Painter, origin: egui::Pos2) {
        for c in &self.scene.circles {
            let center = origin + egui::vec2(c.pos.x, c.pos.y);
            if c.collision {
                // Collision-mode circles render with the proximity fade.
                painter.circle_filled(center, c.radius, colour_with_opacity(c.colour, c.opacity));
            } else if c.filled {
                painter.circle_filled(center, c.radius, colour32(c.colour));
            } else {
                painter.circle_stroke(
                    center,
                    c.radius,
                    egui::Stroke::new(1.0, colour32(c.colour)),
                );
            }
        }

        for r in &self.scene.rects {
            let rect = egui::Rect::from_min_size(
                origin + egui::vec2(r.pos.x, r.pos.y),
                egui::vec2(r.width, r.cur_height),
            );
            if r.filled {
                painter.rect_filled(rect, egui::CornerRadius::ZERO, colour32(r.colour));
            } else {
                painter.rect_stroke(
                    rect,
                    egui::CornerRadius::ZERO,
                    egui::Stroke::new(1.0, colour32(r.colour)),
                    egui::StrokeKind::Inside,
                );
            }
        }
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}

fn colour32(c: Colour) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

/// Applies a [0, 1] opacity on top of the colour's own alpha.
fn colour_with_opacity(c: Colour, opacity: f32) -> egui::Color32 {
    let alpha = (f32::from(c.a) * opacity.clamp(0.0, 1.0)) as u8;
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapes_core::config::CircleConfig;

    /// Gives the viewer a real surface so the spawn factories have
    /// meaningful bounds, as the first central-panel frame would.
    fn sized_viewer() -> Viewer {
        let mut viewer = Viewer::new();
        viewer.scene.resize(Bounds::new(800.0, 600.0));
        viewer
    }

    #[test]
    fn new_viewer_waits_for_first_frame_to_spawn() {
        let viewer = Viewer::new();
        assert!(viewer.needs_respawn);
        assert!(viewer.scene.circles.is_empty());
        assert!(viewer.scene.rects.is_empty());
        assert!(viewer.running);
    }

    #[test]
    fn respawn_populates_bouncing_scenario() {
        let mut viewer = sized_viewer();
        viewer.respawn();

        assert!(!viewer.needs_respawn);
        assert_eq!(viewer.scene.circles.len(), viewer.circle_opts.n);
        assert!(viewer.scene.circles.iter().all(|c| c.animated));
        assert!(viewer.scene.rects.is_empty());
    }

    #[test]
    fn switching_scenarios_replaces_the_population() {
        let mut viewer = sized_viewer();
        viewer.respawn();
        assert!(!viewer.scene.circles.is_empty());

        viewer.switch_scenario(Scenario::Amplifier);
        assert!(viewer.needs_respawn);
        viewer.respawn();

        assert!(viewer.scene.circles.is_empty());
        assert_eq!(viewer.scene.rects.len(), viewer.amplify_opts.n);
        assert!(viewer.scene.rects.iter().all(|r| r.min_height == 25.0));
    }

    #[test]
    fn fractal_scenarios_clear_shapes_and_mark_texture_dirty() {
        let mut viewer = sized_viewer();
        viewer.respawn();
        viewer.fractal_dirty = false;

        viewer.switch_scenario(Scenario::Julia);
        viewer.respawn();

        assert!(viewer.scene.circles.is_empty());
        assert!(viewer.fractal_dirty);
        assert!(!viewer.julia.locked);
    }

    #[test]
    fn respawn_keeps_fractal_colour_settings() {
        let mut viewer = sized_viewer();
        viewer.switch_scenario(Scenario::Julia);
        viewer.julia.hue = 210.0;
        viewer.julia.max_iterations = 96;
        viewer.julia.zoom = 8.0;
        viewer.julia.locked = true;

        viewer.respawn();

        // Colour controls survive a regenerate; pan/zoom/lock reset.
        assert_eq!(viewer.julia.hue, 210.0);
        assert_eq!(viewer.julia.max_iterations, 96);
        assert_eq!(viewer.julia.zoom, 1.0);
        assert!(!viewer.julia.locked);
    }

    #[test]
    fn pointer_tracking_expires_after_idle_window() {
        let mut viewer = sized_viewer();
        let origin = egui::pos2(0.0, 0.0);
        let cursor = egui::pos2(120.0, 80.0);

        viewer.track_pointer(Some(cursor), origin, 10.0);
        assert_eq!(
            viewer.scene.pointer.pos,
            Some(Vec2::new(120.0, 80.0))
        );

        // Still hovering at the same spot: past the expiry window the
        // pointer reads as absent.
        viewer.track_pointer(Some(cursor), origin, 11.5);
        assert_eq!(viewer.scene.pointer.pos, None);

        // Movement revives it.
        viewer.track_pointer(Some(egui::pos2(121.0, 80.0)), origin, 11.6);
        assert!(viewer.scene.pointer.pos.is_some());

        // Leaving the panel expires it immediately.
        viewer.track_pointer(None, origin, 11.7);
        assert_eq!(viewer.scene.pointer.pos, None);
    }

    #[test]
    fn gravity_respawn_preserves_configured_count() {
        let mut viewer = sized_viewer();
        viewer.switch_scenario(Scenario::Gravity);
        viewer.gravity_opts.n = 17;
        viewer.respawn();

        assert_eq!(viewer.scene.circles.len(), 17);
        assert!(viewer.scene.circles.iter().all(|c| c.gravity));
    }

    #[test]
    fn stepping_a_spawned_scene_keeps_population_stable() {
        let mut viewer = sized_viewer();
        viewer.respawn();
        let count = viewer.scene.circles.len();

        for _ in 0..60 {
            viewer.scene.step();
        }

        // Entities are never destroyed by the frame loop, only by
        // wholesale clears.
        assert_eq!(viewer.scene.circles.len(), count);
    }

    #[test]
    fn opacity_helper_scales_the_alpha_channel() {
        let base = Colour::rgba(10, 20, 30, 200);
        let faded = colour_with_opacity(base, 0.5);
        assert_eq!(faded, egui::Color32::from_rgba_unmultiplied(10, 20, 30, 100));

        let full = colour_with_opacity(base, 2.0);
        assert_eq!(full, egui::Color32::from_rgba_unmultiplied(10, 20, 30, 200));
    }

    #[test]
    fn explicit_factory_shapes_survive_scenario_steps() {
        let mut viewer = sized_viewer();
        viewer.scene.make_circle(CircleConfig {
            pos: Vec2::new(100.0, 100.0),
            radius: 25.0,
            ..Default::default()
        });

        viewer.scene.step();
        assert_eq!(viewer.scene.circles.len(), 1);
        // No behaviour flags: the circle is static.
        assert_eq!(viewer.scene.circles[0].pos, Vec2::new(100.0, 100.0));
    }
}
