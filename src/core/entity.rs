//! Point entities: chasing enemies, projectiles and static decorations.
//!
//! Dead entities are dropped with `swap_remove`, so every list only ever holds live
//! entities and the sprite pass never has to skip anything.
#[cfg(test)]
#[path = "./entity_test.rs"]
mod entity_test;

use glam::Vec2;
use rand::Rng;
use tracing::info;

use crate::config::EntityConfig;
use crate::core::grid::{Grid, cell_center};
use crate::core::player::is_colliding;

/// Minimum spawn distance from the player, in cells.
const SPAWN_CLEARANCE: f32 = 3.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds left before it fizzles.
    pub ttl: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Decoration {
    pub pos: Vec2,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickEvents {
    pub fired: bool,
    pub enemies_killed: usize,
    pub player_touched: bool,
}

pub struct Entities {
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub decorations: Vec<Decoration>,
    enemy_speed: f32,
    enemy_radius: f32,
    projectile_speed: f32,
    projectile_lifetime: f32,
}

impl Entities {
    pub fn new(conf: &EntityConfig) -> Self {
        Self {
            enemies: Vec::new(),
            projectiles: Vec::new(),
            decorations: Vec::new(),
            enemy_speed: conf.enemy_speed,
            enemy_radius: conf.enemy_radius,
            projectile_speed: conf.projectile_speed,
            projectile_lifetime: conf.projectile_lifetime,
        }
    }

    /// Places enemies and decorations on random open cells away from the player.
    pub fn spawn<R: Rng>(&mut self, grid: &Grid, player_pos: Vec2, conf: &EntityConfig, rng: &mut R) {
        for _ in 0..conf.enemy_count {
            if let Some(c) = grid.random_open_cell(rng, player_pos, SPAWN_CLEARANCE) {
                self.enemies.push(Enemy {
                    pos: cell_center(c),
                    radius: self.enemy_radius,
                });
            }
        }
        for _ in 0..conf.decoration_count {
            if let Some(c) = grid.random_open_cell(rng, player_pos, 1.0) {
                self.decorations.push(Decoration { pos: cell_center(c) });
            }
        }
        info!(
            enemies = self.enemies.len(),
            decorations = self.decorations.len(),
            "entities spawned"
        );
    }

    pub fn fire(&mut self, origin: Vec2, dir: Vec2) {
        self.projectiles.push(Projectile {
            pos: origin,
            vel: dir.normalize_or_zero() * self.projectile_speed,
            ttl: self.projectile_lifetime,
        });
    }

    pub fn update(&mut self, dt: f32, grid: &Grid, player_pos: Vec2, player_radius: f32) -> TickEvents {
        let mut events = TickEvents::default();

        for enemy in &mut self.enemies {
            let to_player = player_pos - enemy.pos;
            if to_player.length() <= enemy.radius + player_radius {
                events.player_touched = true;
                continue;
            }
            let step = to_player.normalize_or_zero() * self.enemy_speed * dt;
            slide(grid, &mut enemy.pos, step, enemy.radius);
        }

        let mut i = 0;
        while i < self.projectiles.len() {
            let p = &mut self.projectiles[i];
            let from = p.pos;
            p.pos += p.vel * dt;
            p.ttl -= dt;
            let to = p.pos;
            let expired = p.ttl <= 0.0;

            // the whole step is tested so fast shots cannot skip over an enemy
            let hit = self
                .enemies
                .iter()
                .enumerate()
                .filter(|(_, e)| segment_hits_circle(from, to, e.pos, e.radius))
                .min_by(|(_, a), (_, b)| a.pos.distance_squared(from).total_cmp(&b.pos.distance_squared(from)))
                .map(|(idx, _)| idx);
            if let Some(hit) = hit {
                self.enemies.swap_remove(hit);
                self.projectiles.swap_remove(i);
                events.enemies_killed += 1;
                continue;
            }
            if expired || grid.is_solid_at(to) {
                self.projectiles.swap_remove(i);
                continue;
            }
            i += 1;
        }

        events
    }
}

/// Whether the segment `a..b` passes strictly within `radius` of `center`.
fn segment_hits_circle(a: Vec2, b: Vec2, center: Vec2, radius: f32) -> bool {
    let ab = b - a;
    let len2 = ab.length_squared();
    let t = if len2 > 0.0 {
        ((center - a).dot(ab) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (a + ab * t).distance_squared(center) < radius * radius
}

fn slide(grid: &Grid, pos: &mut Vec2, step: Vec2, radius: f32) {
    let x_only = Vec2::new(pos.x + step.x, pos.y);
    if !is_colliding(grid, x_only, radius) {
        *pos = x_only;
    }
    let y_only = Vec2::new(pos.x, pos.y + step.y);
    if !is_colliding(grid, y_only, radius) {
        *pos = y_only;
    }
}
