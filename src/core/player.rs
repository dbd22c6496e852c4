//! Player state, frame input and movement with wall sliding.
#[cfg(test)]
#[path = "./player_test.rs"]
mod player_test;

use glam::Vec2;

use crate::config::CameraConfig;
use crate::core::camera::Camera;
use crate::core::grid::Grid;
use crate::core::trig::TrigTable;

/// Per-frame input, already decoded from keys and mouse by the front end.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// -1 back .. 1 forward
    pub forward: f32,
    /// -1 left .. 1 right
    pub strafe: f32,
    /// -1 left .. 1 right
    pub turn: f32,
    pub mouse_dx: f32,
    pub fire: bool,
}

pub struct Player {
    pub camera: Camera,
    pub radius: f32,
    move_speed: f32,
    rot_speed: f32,
    mouse_sensitivity: f32,
    fire_cooldown: f32,
}

impl Player {
    pub fn new(pos: Vec2, angle: f32, conf: &CameraConfig, trig: &TrigTable) -> Self {
        Self {
            camera: Camera::new(pos, angle, conf.fov_scale, trig),
            radius: conf.collision_radius,
            move_speed: conf.move_speed,
            rot_speed: conf.rot_speed,
            mouse_sensitivity: conf.mouse_sensitivity,
            fire_cooldown: 0.0,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.camera.pos
    }

    pub fn update(&mut self, input: &FrameInput, dt: f32, grid: &Grid, trig: &TrigTable) {
        let turn = input.turn * self.rot_speed * dt + input.mouse_dx * self.mouse_sensitivity;
        self.camera.rotate(turn, trig);

        let mut wish = self.camera.dir() * input.forward + self.camera.right() * input.strafe;
        if wish.length_squared() > 1.0 {
            wish = wish.normalize();
        }
        if wish != Vec2::ZERO {
            self.try_move(wish * self.move_speed * dt, grid);
        }

        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
    }

    /// Moves by `delta`; a blocked move is retried per axis so the player slides
    /// along the wall instead of stopping dead.
    pub fn try_move(&mut self, delta: Vec2, grid: &Grid) {
        let pos = self.camera.pos;
        let target = pos + delta;
        if !is_colliding(grid, target, self.radius) {
            self.camera.pos = target;
            return;
        }
        let x_only = Vec2::new(target.x, pos.y);
        if !is_colliding(grid, x_only, self.radius) {
            self.camera.pos = x_only;
        }
        let y_only = Vec2::new(self.camera.pos.x, target.y);
        if !is_colliding(grid, y_only, self.radius) {
            self.camera.pos = y_only;
        }
    }

    /// Starts the cooldown and returns true when the weapon is ready.
    pub fn trigger_fire(&mut self, cooldown: f32) -> bool {
        if self.fire_cooldown > 0.0 {
            return false;
        }
        self.fire_cooldown = cooldown;
        true
    }
}

fn circle_hits_cell(center: Vec2, radius: f32, cx: i32, cy: i32) -> bool {
    let min = Vec2::new(cx as f32, cy as f32);
    let closest = center.clamp(min, min + Vec2::ONE);
    center.distance_squared(closest) < radius * radius
}

/// Circle against every solid cell it can touch; cells outside the grid are solid.
pub fn is_colliding(grid: &Grid, center: Vec2, radius: f32) -> bool {
    let x0 = (center.x - radius).floor() as i32;
    let x1 = (center.x + radius).floor() as i32;
    let y0 = (center.y - radius).floor() as i32;
    let y1 = (center.y + radius).floor() as i32;
    (y0..=y1).any(|y| (x0..=x1).any(|x| grid.is_solid(x, y) && circle_hits_cell(center, radius, x, y)))
}
