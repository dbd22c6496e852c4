//! Game state: world, player, entities and the renderer that draws them.
#[cfg(test)]
#[path = "./game_test.rs"]
mod game_test;

use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::config::Config;
use crate::core::entity::{Entities, TickEvents};
use crate::core::grid::{Grid, cell_center, generate};
use crate::core::player::{FrameInput, Player};
use crate::core::trig::TrigTable;
use crate::error::{Error, Result};
use crate::render::framebuffer::Framebuffer;
use crate::render::renderer::Renderer;
use crate::render::shading::Lighting;
use crate::render::textures::TextureSet;

pub struct Game {
    pub grid: Grid,
    pub player: Player,
    pub entities: Entities,
    trig: TrigTable,
    textures: TextureSet,
    renderer: Renderer,
    fire_cooldown: f32,
    kills: usize,
}

impl Game {
    /// Generates a world from `config` and spawns everything in it. With
    /// `grid.seed` set the whole world is reproducible.
    pub fn new(config: &Config) -> Result<Game> {
        config.validate()?;
        let mut rng = match config.grid.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let grid = generate(&config.grid.params(), &mut rng)?;
        let spawn = grid
            .random_open_cell(&mut rng, Vec2::ZERO, 0.0)
            .ok_or_else(|| Error::InvalidGridParams("generated grid has no open cell".to_string()))?;

        let mut game = Game::with_grid(config, grid, cell_center(spawn), 0.0);
        let player_pos = game.player.pos();
        game.entities.spawn(&game.grid, player_pos, &config.entities, &mut rng);
        info!(x = player_pos.x, y = player_pos.y, "player spawned");
        Ok(game)
    }

    /// A game on a given grid with no entities.
    pub fn with_grid(config: &Config, grid: Grid, pos: Vec2, angle: f32) -> Game {
        let trig = TrigTable::new();
        let player = Player::new(pos, angle, &config.camera, &trig);
        Game {
            grid,
            player,
            entities: Entities::new(&config.entities),
            trig,
            textures: TextureSet::procedural(),
            renderer: Renderer::new(&config.screen, Lighting::from_config(&config.lighting)),
            fire_cooldown: config.entities.fire_cooldown,
            kills: 0,
        }
    }

    pub fn set_textures(&mut self, textures: TextureSet) {
        self.textures = textures;
        self.renderer.invalidate_background();
    }

    pub fn kills(&self) -> usize {
        self.kills
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Advances the simulation by `dt` seconds.
    pub fn tick(&mut self, input: &FrameInput, dt: f32) -> TickEvents {
        self.player.update(input, dt, &self.grid, &self.trig);

        let fired = input.fire && self.player.trigger_fire(self.fire_cooldown);
        if fired {
            let cam = &self.player.camera;
            self.entities.fire(cam.pos, cam.dir());
        }

        let mut events = self
            .entities
            .update(dt, &self.grid, self.player.pos(), self.player.radius);
        events.fired = fired;
        self.kills += events.enemies_killed;
        if events.enemies_killed > 0 {
            info!(killed = events.enemies_killed, total = self.kills, "enemy down");
        }
        events
    }

    pub fn render(&mut self) -> &Framebuffer {
        self.renderer
            .render_frame(&self.player.camera, &self.grid, &self.entities, &self.textures)
    }
}
