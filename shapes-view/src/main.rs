//! Application entry point for the 2D shapes playground.
//!
//! This binary sets up eframe/egui and delegates all interactive logic
//! and rendering to [`Viewer`] from the `viewer` module.

mod viewer;

use viewer::Viewer;

/// Starts the native eframe application.
///
/// Logging goes through the `log` facade (eframe emits records on it
/// too); run with `RUST_LOG=debug` to see scenario switches and fractal
/// render timings.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop.
fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "2D Shapes Playground",
        options,
        Box::new(|_cc| {
            // Construct the root app state for the viewer.
            Ok(Box::new(Viewer::new()))
        }),
    )
}
