//! Directional + ambient wall lighting and linear distance fog.
#[cfg(test)]
#[path = "./shading_test.rs"]
mod shading_test;

use glam::Vec2;

use crate::config::LightingConfig;
use crate::render::framebuffer::Rgba;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Fog {
    pub start: f32,
    pub end: f32,
    pub color: Rgba,
}

impl Fog {
    /// `clamp((d - start) / (end - start), 0, 1)`
    #[inline]
    pub fn factor(&self, distance: f32) -> f32 {
        if distance <= self.start {
            return 0.0;
        }
        if distance >= self.end {
            return 1.0;
        }
        ((distance - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn apply(&self, color: Rgba, distance: f32) -> Rgba {
        self.blend(color, self.factor(distance))
    }

    #[inline]
    pub fn blend(&self, color: Rgba, factor: f32) -> Rgba {
        if factor <= 0.0 {
            color
        } else {
            color.lerp(self.color, factor)
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Lighting {
    /// Unit direction the light travels in.
    pub light_dir: Vec2,
    pub ambient: f32,
    pub diffuse: f32,
    pub fog: Fog,
}

impl Lighting {
    pub fn from_config(conf: &LightingConfig) -> Self {
        let [r, g, b] = conf.fog_color;
        Self {
            light_dir: Vec2::from(conf.light_dir).normalize_or_zero(),
            ambient: conf.ambient,
            diffuse: conf.diffuse,
            fog: Fog {
                start: conf.fog_start,
                end: conf.fog_end,
                color: Rgba::rgb(r, g, b),
            },
        }
    }

    /// Brightness of a wall face whose outward normal is `normal`.
    #[inline]
    pub fn face_intensity(&self, normal: Vec2) -> f32 {
        let lambert = (-self.light_dir).dot(normal).max(0.0);
        self.ambient + self.diffuse * lambert
    }

    /// Outward normal of the face a ray struck: `side` 0 is an x-step hit, 1 a y-step
    /// hit; the face points back against the step.
    #[inline]
    pub fn face_normal(side: u8, step_x: i32, step_y: i32) -> Vec2 {
        if side == 0 {
            Vec2::new(-step_x as f32, 0.0)
        } else {
            Vec2::new(0.0, -step_y as f32)
        }
    }
}
