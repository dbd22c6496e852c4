#[cfg(test)]
#[path = "./config_test.rs"]
mod config_test;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::grid::GridParams;
use crate::error::{Error, Result};

pub const CONFIG_FILE_NAME: &str = "thurs.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub screen: ScreenConfig,
    pub grid: GridConfig,
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
    pub entities: EntityConfig,
    pub assets: AssetConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: usize,
    pub height: usize,
    /// Pixels per cast column. Walls and the depth buffer share this stride.
    pub column_stride: usize,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            column_stride: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub size: usize,
    pub wall_probability: f32,
    pub smoothing_passes: u32,
    pub wall_count_threshold: u8,
    pub min_open_ratio: f32,
    pub max_attempts: u32,
    pub seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: 32,
            wall_probability: 0.45,
            smoothing_passes: 4,
            wall_count_threshold: 4,
            min_open_ratio: 0.45,
            max_attempts: 10_000,
            seed: None,
        }
    }
}

impl GridConfig {
    pub fn params(&self) -> GridParams {
        GridParams {
            size: self.size,
            wall_probability: self.wall_probability,
            smoothing_passes: self.smoothing_passes,
            wall_count_threshold: self.wall_count_threshold,
            min_open_ratio: self.min_open_ratio,
            max_attempts: self.max_attempts,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_scale: f32,
    pub move_speed: f32,
    pub rot_speed: f32,
    pub mouse_sensitivity: f32,
    pub collision_radius: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_scale: 0.66,
            move_speed: 3.0,
            rot_speed: 2.5,
            mouse_sensitivity: 0.003,
            collision_radius: 0.2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub light_dir: [f32; 2],
    pub ambient: f32,
    pub diffuse: f32,
    pub fog_start: f32,
    pub fog_end: f32,
    pub fog_color: [u8; 3],
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            light_dir: [-0.6, -0.8],
            ambient: 0.45,
            diffuse: 0.55,
            fog_start: 4.0,
            fog_end: 14.0,
            fog_color: [20, 20, 30],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EntityConfig {
    pub enemy_count: usize,
    pub enemy_speed: f32,
    pub enemy_radius: f32,
    pub projectile_speed: f32,
    pub projectile_lifetime: f32,
    pub fire_cooldown: f32,
    pub decoration_count: usize,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            enemy_count: 6,
            enemy_speed: 1.2,
            enemy_radius: 0.3,
            projectile_speed: 8.0,
            projectile_lifetime: 1.5,
            fire_cooldown: 0.3,
            decoration_count: 10,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub wall: Option<PathBuf>,
    pub floor: Option<PathBuf>,
    pub ceiling: Option<PathBuf>,
    pub decoration: Option<PathBuf>,
    pub fire_sound: Option<PathBuf>,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        let s = &self.screen;
        if s.width == 0 || s.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "resolution {}x{} has a zero dimension",
                s.width, s.height
            )));
        }
        if s.column_stride == 0 || s.width % s.column_stride != 0 {
            return Err(Error::InvalidConfig(format!(
                "column stride {} must be non-zero and divide width {}",
                s.column_stride, s.width
            )));
        }
        let l = &self.lighting;
        if l.fog_end <= l.fog_start {
            return Err(Error::InvalidConfig(format!(
                "fog end {} must be greater than fog start {}",
                l.fog_end, l.fog_start
            )));
        }
        if self.camera.fov_scale <= 0.0 {
            return Err(Error::InvalidConfig("fov_scale must be positive".to_string()));
        }
        // a radius of half a cell or more cannot fit through a one-cell corridor
        for (name, r) in [
            ("camera.collision_radius", self.camera.collision_radius),
            ("entities.enemy_radius", self.entities.enemy_radius),
        ] {
            if !(r > 0.0 && r < 0.5) {
                return Err(Error::InvalidConfig(format!("{} {} must be in (0, 0.5)", name, r)));
            }
        }
        self.grid.params().validate()
    }
}

// Loads the config named by a `-config <path>` argument, else `thurs.toml` in the
// working directory, else the built-in defaults.
pub fn read_config() -> Result<Config> {
    if let Some(path) = check_config_env() {
        return read_config_file(Path::new(&path));
    }

    let conf_file = Path::new(CONFIG_FILE_NAME);
    if conf_file.exists() {
        read_config_file(conf_file)
    } else {
        Ok(Config::default())
    }
}

pub fn read_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|source| Error::Config {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

fn check_config_env() -> Option<String> {
    let mut args = env::args();
    while let Some(arg) = args.next() {
        if arg == "-config" {
            return args.next();
        }
    }
    None
}
