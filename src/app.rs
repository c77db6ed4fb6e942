/*
 * Application Module
 *
 * This module defines the viewer's model and its per-frame update. The
 * simulation advances one tick per frame; the egui panel writes parameter and
 * rule-weight changes straight into the world, which picks them up on the
 * next tick.
 */

use nannou::prelude::*;
use nannou_egui::Egui;
use std::sync::OnceLock;
use tracing::info;

use crate::config::SimulationConfig;
use crate::debug::DebugInfo;
use crate::renderer;
use crate::ui;
use crate::world::World;

// Filled in by main before nannou starts; nannou's model fn takes no arguments
static STARTUP_CONFIG: OnceLock<SimulationConfig> = OnceLock::new();

pub fn set_startup_config(config: SimulationConfig) {
    if STARTUP_CONFIG.set(config).is_err() {
        info!("startup config already set, keeping the first one");
    }
}

// Main model for the application
pub struct Model {
    pub world: World,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub paused: bool,
    pub show_debug: bool,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    // Get the primary monitor's dimensions
    let monitor = app.primary_monitor().expect("Failed to get primary monitor");
    let monitor_size = monitor.size();

    // Calculate window size based on monitor size (80% of monitor size)
    let window_width = monitor_size.width as f32 * 0.8;
    let window_height = monitor_size.height as f32 * 0.8;

    let window_id = app
        .new_window()
        .title("Boid Hunt")
        .size(window_width as u32, window_height as u32)
        .view(renderer::view)
        .raw_event(raw_window_event)
        .build()
        .expect("Failed to build window");

    let window = app.window(window_id).expect("Window vanished after creation");
    let egui = Egui::from_window(&window);

    let config = STARTUP_CONFIG.get().cloned().unwrap_or_default();
    let world = World::from_config(&config);

    Model {
        world,
        egui,
        debug_info: DebugInfo::default(),
        paused: false,
        show_debug: true,
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let actions = ui::update_ui(
        &mut model.egui,
        &mut model.world,
        &mut model.paused,
        &mut model.show_debug,
        &model.debug_info,
    );

    if actions.reset {
        model.world.reset();
        model.debug_info.reset_counters();
    }

    if !model.paused || actions.step {
        let report = model.world.tick();
        model.debug_info.record(&report, &model.world);
    }
}

// Handle raw window events for egui
fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
