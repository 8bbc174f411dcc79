//! Core 2-D shape animation and fractal library.
//!
//! Main components:
//! - [`types`] — shared primitives: surface bounds and pointer state.
//! - [`colour`] — RGBA colours and the named palettes.
//! - [`geometry`] — vector helpers shared by the update steps.
//! - [`config`] — construction-time options and their defaults.
//! - [`circle`] / [`rect`] — the shape entities and their per-frame
//!   behaviours.
//! - [`collision`] — pairwise elastic collision resolution.
//! - [`fractal`] — Julia and Mandelbrot escape-time renderers.
//! - [`scene`] — the driver owning the collections and the frame step.

pub mod circle;
pub mod collision;
pub mod colour;
pub mod config;
pub mod fractal;
pub mod geometry;
pub mod rect;
pub mod scene;
pub mod types;
