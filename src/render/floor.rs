//! Floor and sky background.
//!
//! Floor rows are affine: each row starts at `pos + origin` and adds a constant
//! world step per pixel, so there is no per-pixel division. The sky is a cylinder
//! addressed by ray heading and screen row. The finished background is a pure
//! function of camera position and heading bucket and is only recomputed when one
//! of them changes.
#[cfg(test)]
#[path = "./floor_test.rs"]
mod floor_test;

use glam::Vec2;
use tracing::debug;

use crate::core::camera::Camera;
use crate::render::framebuffer::Framebuffer;
use crate::render::shading::Fog;
use crate::render::tables::GeometryTables;
use crate::render::textures::Texture;

/// Texel for a floor world coordinate, one texture repeat per cell.
/// Negative coordinates wrap like positive ones.
#[inline]
pub fn floor_texel(world: Vec2, tw: usize, th: usize) -> (usize, usize) {
    let (tw_i, th_i) = (tw as i64, th as i64);
    let u = ((world.x * tw as f32) as i64 % tw_i + tw_i) % tw_i;
    let v = ((world.y * th as f32) as i64 % th_i + th_i) % th_i;
    (u as usize, v as usize)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct CacheKey {
    pos: (u32, u32),
    bucket: usize,
    width: usize,
    height: usize,
}

impl CacheKey {
    fn new(camera: &Camera, tables: &GeometryTables) -> Self {
        Self {
            pos: (camera.pos.x.to_bits(), camera.pos.y.to_bits()),
            bucket: tables.bucket,
            width: tables.width,
            height: tables.height,
        }
    }
}

pub struct FloorCeiling {
    background: Framebuffer,
    last: Option<CacheKey>,
}

impl FloorCeiling {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            background: Framebuffer::new(width, height),
            last: None,
        }
    }

    pub fn background(&self) -> &Framebuffer {
        &self.background
    }

    /// Forces the next `render` to recompute.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Redraws the background if the camera moved or turned since the last call.
    /// Returns whether it was recomputed.
    pub fn render(
        &mut self,
        camera: &Camera,
        tables: &GeometryTables,
        floor: &Texture,
        ceiling: &Texture,
        fog: &Fog,
    ) -> bool {
        let key = CacheKey::new(camera, tables);
        if self.last == Some(key) {
            return false;
        }
        if self.background.width != tables.width || self.background.height != tables.height {
            self.background = Framebuffer::new(tables.width, tables.height);
        }

        self.render_ceiling(tables, ceiling);
        self.render_floor(camera.pos, tables, floor, fog);
        self.last = Some(key);
        debug!(x = camera.pos.x, y = camera.pos.y, bucket = key.bucket, "background recomputed");
        true
    }

    fn render_ceiling(&mut self, tables: &GeometryTables, ceiling: &Texture) {
        let (tw, th) = (ceiling.width(), ceiling.height());
        let cols: Vec<usize> = tables
            .sky_u
            .iter()
            .map(|u| ((u * tw as f32) as usize).min(tw - 1))
            .collect();
        for (y, v) in tables.sky_v.iter().enumerate() {
            let ty = ((v * th as f32) as usize).min(th - 1);
            let row = self.background.row_mut(y);
            for (px, tx) in row.iter_mut().zip(&cols) {
                let mut c = ceiling.sample(*tx, ty);
                c.a = 255;
                *px = c;
            }
        }
    }

    fn render_floor(&mut self, pos: Vec2, tables: &GeometryTables, floor: &Texture, fog: &Fog) {
        let (tw, th) = (floor.width(), floor.height());
        let horizon = tables.horizon();
        for (i, frow) in tables.floor_rows.iter().enumerate() {
            let k = fog.factor(frow.distance);
            let mut p = pos + frow.origin;
            let row = self.background.row_mut(horizon + i);
            for px in row.iter_mut() {
                let (u, v) = floor_texel(p, tw, th);
                let mut c = fog.blend(floor.sample(u, v), k);
                c.a = 255;
                *px = c;
                p += frow.step;
            }
        }
    }
}
