use glam::Vec2;

use crate::config::{Config, ScreenConfig};
use crate::core::entity::Enemy;
use crate::core::grid::Grid;
use crate::core::player::FrameInput;
use crate::game::Game;

fn small_config() -> Config {
    let mut config = Config::default();
    config.screen = ScreenConfig {
        width: 64,
        height: 48,
        column_stride: 2,
    };
    config.grid.seed = Some(42);
    config
}

fn corridor() -> Grid {
    Grid::from_rows(&["#######", "#.....#", "#.....#", "#.....#", "#######"])
}

#[test]
fn test_seeded_worlds_are_identical() {
    let config = small_config();
    let mut a = Game::new(&config).expect("game a");
    let mut b = Game::new(&config).expect("game b");
    assert_eq!(a.grid, b.grid);
    assert_eq!(a.player.pos(), b.player.pos());
    assert_eq!(a.entities.enemies, b.entities.enemies);
    assert_eq!(a.entities.decorations, b.entities.decorations);
    assert!(!a.grid.is_solid_at(a.player.pos()));

    let fa = a.render().color_buffer.clone();
    let fb = b.render().color_buffer.clone();
    assert_eq!(fa, fb);
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut config = small_config();
    config.screen.column_stride = 5;
    assert!(Game::new(&config).is_err());
}

#[test]
fn test_headless_frames() {
    let config = small_config();
    let mut game = Game::new(&config).expect("game");
    let input = FrameInput {
        forward: 1.0,
        turn: 0.3,
        ..FrameInput::default()
    };
    for _ in 0..30 {
        game.tick(&input, 1.0 / 30.0);
        let frame = game.render();
        assert_eq!(frame.color_buffer.len(), 64 * 48);
        assert!(frame.color_buffer.iter().all(|p| p.a == 255));
        assert!(!game.grid.is_solid_at(game.player.pos()));
    }
    assert!(game.renderer().depth().as_slice().iter().all(|d| d.is_finite()));
}

#[test]
fn test_centre_column_in_open_room() {
    let config = small_config();
    let grid = Grid::from_rows(&["#####", "#...#", "#...#", "#...#", "#####"]);
    let mut game = Game::with_grid(&config, grid, Vec2::new(2.5, 2.5), 0.0);
    game.render();
    let d = game.renderer().depth().at_pixel(32);
    assert!((d - 1.5).abs() < 1e-6, "{}", d);
}

#[test]
fn test_projectile_kills_enemy() {
    let config = small_config();
    let mut game = Game::with_grid(&config, corridor(), Vec2::new(1.5, 2.5), 0.0);
    game.entities.enemies.push(Enemy {
        pos: Vec2::new(5.5, 2.5),
        radius: 0.3,
    });

    let fire = FrameInput {
        fire: true,
        ..FrameInput::default()
    };
    let ev = game.tick(&fire, 0.05);
    assert!(ev.fired);
    assert_eq!(game.entities.projectiles.len(), 1);

    for _ in 0..40 {
        game.tick(&FrameInput::default(), 0.05);
    }
    assert_eq!(game.kills(), 1);
    assert!(game.entities.enemies.is_empty());
    assert!(game.entities.projectiles.is_empty());
}

#[test]
fn test_fire_cooldown() {
    let config = small_config();
    let mut game = Game::with_grid(&config, corridor(), Vec2::new(1.5, 2.5), 0.0);
    let fire = FrameInput {
        fire: true,
        ..FrameInput::default()
    };
    let shots: Vec<usize> = (0..10)
        .filter(|_| game.tick(&fire, 0.1).fired)
        .collect();
    // 0.3 s cooldown at 0.1 s per tick
    assert!(shots.len() >= 3 && shots.len() <= 4, "{:?}", shots);
    assert!(shots.windows(2).all(|w| w[1] - w[0] >= 3), "{:?}", shots);
}
