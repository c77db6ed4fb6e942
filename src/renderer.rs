/*
 * Renderer Module
 *
 * This module draws the simulation from above: world x runs left to right and
 * world z runs bottom to top, with -z pointing up the screen so that an
 * agent's yaw is also its screen angle. Height is shown through size, with
 * agents near the ceiling drawn larger than those near the floor.
 */

use nannou::prelude::*;
use tracing::warn;

use crate::agent::{AgentSnapshot, Species};
use crate::app::Model;
use crate::geometry::Bounds3D;
use crate::ui;
use crate::AGENT_SIZE;

// Fraction of the window the arena may fill
const ARENA_FILL: f32 = 0.9;

/// Maps world x/z onto window coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TopDown {
    centre: Vec3,
    scale: f32,
    bounds: Bounds3D,
}

impl TopDown {
    pub fn fit(bounds: &Bounds3D, window_rect: Rect) -> Self {
        let sx = window_rect.w() / bounds.x_size.max(f32::EPSILON);
        let sz = window_rect.h() / bounds.z_size.max(f32::EPSILON);
        Self {
            centre: bounds.centre(),
            scale: sx.min(sz) * ARENA_FILL,
            bounds: *bounds,
        }
    }

    pub fn to_screen(&self, position: Vec3) -> Point2 {
        pt2(
            (position.x - self.centre.x) * self.scale,
            -(position.z - self.centre.z) * self.scale,
        )
    }

    pub fn arena_size(&self) -> Vec2 {
        vec2(self.bounds.x_size, self.bounds.z_size) * self.scale
    }

    // 0.6x on the floor up to 1.4x at the ceiling
    pub fn depth_scale(&self, position: Vec3) -> f32 {
        if self.bounds.y_size <= 0.0 {
            return 1.0;
        }
        let t = ((position.y - self.bounds.y_min) / self.bounds.y_size).clamp(0.0, 1.0);
        0.6 + 0.8 * t
    }
}

fn agent_color(snapshot: &AgentSnapshot) -> Srgb<u8> {
    if !snapshot.alive {
        return DIMGRAY;
    }
    match snapshot.species {
        _ if snapshot.scared => ORANGE,
        Species::Boid => YELLOW,
        Species::Doib => DEEPSKYBLUE,
        Species::Predator if snapshot.hunting => CRIMSON,
        Species::Predator => RED,
    }
}

fn draw_agent(draw: &Draw, projection: &TopDown, snapshot: &AgentSnapshot) {
    let mut size = AGENT_SIZE * projection.depth_scale(snapshot.position);
    if snapshot.species.is_predator() {
        size *= 1.5;
    }

    let points = [
        pt2(size, 0.0),
        pt2(-size, size / 2.0),
        pt2(-size, -size / 2.0),
    ];

    draw.polygon()
        .color(agent_color(snapshot))
        .points(points)
        .xy(projection.to_screen(snapshot.position))
        .rotate(snapshot.orientation.yaw);
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();
    let projection = TopDown::fit(&model.world.params().world_dimens, window_rect);

    // Arena outline
    draw.rect()
        .xy(projection.to_screen(model.world.params().world_dimens.centre()))
        .wh(projection.arena_size())
        .no_fill()
        .stroke_weight(1.0)
        .stroke(rgba(0.3, 0.3, 0.3, 1.0));

    // Corpses first so the living draw on top
    let (live, dead): (Vec<_>, Vec<_>) = model.world.snapshots().partition(|s| s.alive);
    for snapshot in dead.iter().chain(live.iter()) {
        draw_agent(&draw, &projection, snapshot);
    }

    if model.show_debug {
        ui::draw_debug_info(&draw, &model.debug_info, window_rect);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        warn!(?err, "failed to draw frame");
    }
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        warn!(?err, "failed to draw ui");
    }
}
