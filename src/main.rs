mod audio_manager;
mod process_events;

use std::path::Path;

use raylib::core::texture::RaylibTexture2D;
use raylib::prelude::*;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use audio_manager::AudioManager;
use process_events::process_events;
use thurs::config::{AssetConfig, read_config};
use thurs::error::{Error, Result};
use thurs::game::Game;
use thurs::render::framebuffer::Rgba;
use thurs::render::textures::{Texture, TextureSet};

fn image_texture(path: &Path) -> Result<Texture> {
    let name = path
        .to_str()
        .ok_or_else(|| Error::Texture(format!("path {} is not utf-8", path.display())))?;
    let img = Image::load_image(name).map_err(|e| Error::Texture(format!("{}: {:?}", path.display(), e)))?;
    let w = img.width().max(0) as usize;
    let h = img.height().max(0) as usize;
    let px = img
        .get_image_data()
        .iter()
        .map(|c| Rgba::new(c.r, c.g, c.b, c.a))
        .collect();
    Texture::from_rgba(w, h, px)
}

fn load_or(path: Option<&Path>, fallback: Texture) -> Texture {
    let Some(path) = path else {
        return fallback;
    };
    match image_texture(path) {
        Ok(t) => {
            info!(path = %path.display(), w = t.width(), h = t.height(), "texture loaded");
            t
        }
        Err(e) => {
            warn!(error = %e, "using procedural texture");
            fallback
        }
    }
}

fn load_textures(assets: &AssetConfig) -> TextureSet {
    let fallback = TextureSet::procedural();
    TextureSet {
        wall: load_or(assets.wall.as_deref(), fallback.wall),
        floor: load_or(assets.floor.as_deref(), fallback.floor),
        ceiling: load_or(assets.ceiling.as_deref(), fallback.ceiling),
        decoration: load_or(assets.decoration.as_deref(), fallback.decoration),
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("thurs=info")))
        .init();

    let config = read_config()?;
    let mut game = Game::new(&config)?;
    let (width, height) = (config.screen.width as i32, config.screen.height as i32);

    let (mut window, raylib_thread) = raylib::init().size(width, height).title("thurs").build();
    window.set_target_fps(60);
    window.disable_cursor();

    game.set_textures(load_textures(&config.assets));

    let mut audio = AudioManager::new();
    if audio.is_none() {
        warn!("no audio device, running silent");
    }
    if let (Some(a), Some(path)) = (audio.as_mut(), config.assets.fire_sound.as_deref()) {
        a.load_fire(path);
    }

    // streaming texture the framebuffer is uploaded into every frame
    let blank = Image::gen_image_color(width, height, Color::BLACK);
    let mut screen = window.load_texture_from_image(&raylib_thread, &blank)?;

    while !window.window_should_close() {
        let (input, dt) = process_events(&window);
        let events = game.tick(&input, dt);
        if events.fired {
            if let Some(a) = &audio {
                a.play_fire();
            }
        }
        if events.player_touched {
            debug!("player touched by enemy");
        }

        let frame = game.render();
        let _ = screen.update_texture(frame.as_bytes());
        let kills = game.kills();

        let mut d = window.begin_drawing(&raylib_thread);
        d.clear_background(Color::BLACK);
        d.draw_texture(&screen, 0, 0, Color::WHITE);
        d.draw_fps(10, 10);
        d.draw_text(&format!("kills: {}", kills), 10, 36, 20, Color::WHITE);
    }
    Ok(())
}
