/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. Sliders write directly into the world's parameters and
 * rule set; the engine reads them again at the start of the next tick, so
 * there is no separate change detection.
 */

use nannou_egui::{egui, Egui};

use crate::agent::Species;
use crate::debug::DebugInfo;
use crate::geometry::Bounds3D;
use crate::params::SimulationParams;
use crate::world::World;

// Requests from the panel that the app has to act on
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiActions {
    pub reset: bool,
    pub step: bool,
}

pub fn update_ui(
    egui: &mut Egui,
    world: &mut World,
    paused: &mut bool,
    show_debug: &mut bool,
    debug_info: &DebugInfo,
) -> UiActions {
    let mut actions = UiActions::default();
    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.horizontal(|ui| {
                let label = if *paused { "Resume" } else { "Pause" };
                if ui.button(label).clicked() {
                    *paused = !*paused;
                }
                if ui.button("Step").clicked() {
                    actions.step = true;
                }
                if ui.button("Reset").clicked() {
                    actions.reset = true;
                }
            });

            for species in Species::ALL {
                ui.collapsing(species.label(), |ui| {
                    species_controls(ui, world.params_mut(), species);
                });
            }

            ui.collapsing("World", |ui| {
                world_controls(ui, world.params_mut());
            });

            ui.collapsing("Rule Weights", |ui| {
                for rule in world.rules_mut().iter_mut() {
                    let name = rule.name();
                    let range = rule.weight_range();
                    ui.add(egui::Slider::new(rule.weight_mut(), range).text(name));
                }
            });

            ui.collapsing("Statistics", |ui| {
                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!(
                    "Frame time: {:.2} ms",
                    debug_info.frame_time.as_secs_f64() * 1000.0
                ));
                ui.label(format!("Tick: {}", debug_info.tick));
                ui.label(format!("Seed: {:#x}", world.seed()));
                for (i, species) in Species::ALL.into_iter().enumerate() {
                    ui.label(format!(
                        "{}: {} alive, {} falling",
                        species, debug_info.live[i], debug_info.dead[i]
                    ));
                }
                ui.label(format!("Kills: {}", debug_info.total_kills));
            });

            ui.checkbox(show_debug, "Show Debug Info");
        });

    actions
}

fn species_controls(ui: &mut egui::Ui, params: &mut SimulationParams, species: Species) {
    let p = params.species_mut(species);
    ui.add(
        egui::Slider::new(&mut p.count, SimulationParams::get_count_range(species)).text("Count"),
    );
    ui.add(
        egui::Slider::new(&mut p.max_speed, SimulationParams::get_max_speed_range())
            .text("Max Speed"),
    );
    ui.add(
        egui::Slider::new(&mut p.acceleration, SimulationParams::get_acceleration_range())
            .text("Acceleration"),
    );
    ui.add(
        egui::Slider::new(&mut p.scared_surge, SimulationParams::get_scared_surge_range())
            .text("Scared Surge"),
    );
    ui.add(
        egui::Slider::new(&mut p.visibility_range, SimulationParams::get_range_range())
            .text("Visibility Range"),
    );
    if species.is_prey() {
        ui.add(
            egui::Slider::new(
                &mut p.predator_detection_range,
                SimulationParams::get_range_range(),
            )
            .text("Predator Detection"),
        );
    }
}

fn world_controls(ui: &mut egui::Ui, params: &mut SimulationParams) {
    ui.add(
        egui::Slider::new(
            &mut params.visibility_threshold,
            SimulationParams::get_visibility_range(),
        )
        .text("Visibility Threshold"),
    );
    ui.add(
        egui::Slider::new(
            &mut params.randomness_per_timestep,
            SimulationParams::get_randomness_per_timestep_range(),
        )
        .text("Randomness / Tick"),
    );
    ui.add(
        egui::Slider::new(
            &mut params.randomness_limit,
            SimulationParams::get_randomness_limit_range(),
        )
        .text("Randomness Limit"),
    );
    ui.add(
        egui::Slider::new(
            &mut params.pred_new_target_chance,
            SimulationParams::get_chance_range(),
        )
        .text("Retarget Chance"),
    );
    ui.add(
        egui::Slider::new(&mut params.hunt_range, SimulationParams::get_range_range())
            .text("Hunt Range"),
    );
    ui.add(
        egui::Slider::new(&mut params.kill_range, SimulationParams::get_kill_range_range())
            .text("Kill Range"),
    );

    ui.separator();

    // Arena edits rebuild the box around the same centre line
    let dimens = params.world_dimens;
    let (mut width, mut height, mut depth) = (dimens.x_size, dimens.y_size, dimens.z_size);
    ui.add(egui::Slider::new(&mut width, 20.0..=600.0).text("Arena Width"));
    ui.add(egui::Slider::new(&mut height, 20.0..=300.0).text("Arena Height"));
    ui.add(egui::Slider::new(&mut depth, 20.0..=600.0).text("Arena Depth"));
    if (width, height, depth) != (dimens.x_size, dimens.y_size, dimens.z_size) {
        params.world_dimens = Bounds3D::centred_xz(width, depth, height);
    }

    let spawn = params.spawn_position;
    let (mut spawn_width, mut spawn_depth) = (spawn.x_size, spawn.z_size);
    let (mut floor, mut ceiling) = (spawn.y_min, spawn.y_max);
    ui.add(egui::Slider::new(&mut spawn_width, 0.0..=600.0).text("Spawn Width"));
    ui.add(egui::Slider::new(&mut spawn_depth, 0.0..=600.0).text("Spawn Depth"));
    ui.add(egui::Slider::new(&mut floor, 0.0..=300.0).text("Spawn Floor"));
    ui.add(egui::Slider::new(&mut ceiling, 0.0..=300.0).text("Spawn Ceiling"));
    if (spawn_width, spawn_depth, floor, ceiling) != (spawn.x_size, spawn.z_size, spawn.y_min, spawn.y_max) {
        params.spawn_position = Bounds3D::new(
            -spawn_width / 2.0,
            spawn_width / 2.0,
            floor,
            ceiling,
            -spawn_depth / 2.0,
            spawn_depth / 2.0,
        );
    }

    let mut spawn_speed = params.spawn_velocity.x_max;
    ui.add(egui::Slider::new(&mut spawn_speed, 0.0..=2.0).text("Spawn Speed"));
    if spawn_speed != params.spawn_velocity.x_max {
        params.spawn_velocity = Bounds3D::symmetric(spawn_speed, spawn_speed, spawn_speed);
    }
}

// Draw debug information on the screen
pub fn draw_debug_info(draw: &nannou::Draw, debug_info: &DebugInfo, window_rect: nannou::geom::Rect) {
    let debug_texts = [
        format!("FPS: {:.1}", debug_info.fps),
        format!("Tick: {}", debug_info.tick),
        format!(
            "Boids: {} (+{} falling)",
            debug_info.live[0], debug_info.dead[0]
        ),
        format!(
            "Doibs: {} (+{} falling)",
            debug_info.live[1], debug_info.dead[1]
        ),
        format!("Predators: {}", debug_info.live[2]),
        format!("Kills: {}", debug_info.total_kills),
    ];

    // Background panel in the top-right corner, clear of the egui window
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 200.0;
    let panel_height = line_height * debug_texts.len() as f32 + margin;
    let panel_x = window_rect.right() - panel_width / 2.0;
    let panel_y = window_rect.top() - panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.right() - panel_width + margin;
    let text_y = window_rect.top() - margin;

    for (i, text) in debug_texts.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        // nannou centres text on its position, so shift right by a fixed offset
        draw.text(text)
            .x_y(text_x + 70.0, y)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
