//! Billboards (enemies, projectiles, decorations).
//!
//! Entities are moved into camera space with the inverse camera basis, culled
//! when behind the camera, and occluded column by column against the wall depth
//! buffer. They are drawn in list order: billboards do not occlude each other.
#[cfg(test)]
#[path = "./sprites_test.rs"]
mod sprites_test;

use glam::Vec2;

use crate::core::camera::Camera;
use crate::core::entity::Entities;
use crate::render::depth::DepthBuffer;
use crate::render::framebuffer::{Framebuffer, Rgba};
use crate::render::shading::Fog;
use crate::render::textures::Texture;

/// World height of a decoration billboard, in cells.
pub const DECORATION_SIZE: f32 = 0.8;
/// World diameter of a projectile, in cells.
pub const PROJECTILE_SIZE: f32 = 0.12;

const ENEMY_COLOR: Rgba = Rgba::rgb(200, 40, 40);
const PROJECTILE_COLOR: Rgba = Rgba::rgb(255, 220, 80);
/// Texels with less alpha than this are not drawn.
const ALPHA_CUTOFF: u8 = 8;

/// Where an entity lands on screen.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScreenPlacement {
    /// Screen x of the billboard centre, may be off screen.
    pub column: f32,
    /// Camera-space forward depth.
    pub depth: f32,
    /// Camera-space lateral offset, positive to the right.
    pub lateral: f32,
    /// Billboard size in pixels.
    pub size: f32,
}

impl ScreenPlacement {
    /// In front of the wall recorded for pixel column `x`.
    #[inline]
    pub fn visible_at(&self, x: usize, depth: &DepthBuffer) -> bool {
        self.depth < depth.at_pixel(x)
    }

    /// Wall test at the centre column, clamped onto the screen.
    pub fn is_visible(&self, depth: &DepthBuffer, screen_width: usize) -> bool {
        if screen_width == 0 {
            return false;
        }
        let x = self.column.clamp(0.0, (screen_width - 1) as f32) as usize;
        self.visible_at(x, depth)
    }
}

/// `(lateral, depth)` of `pos` in camera space.
pub fn camera_space(camera: &Camera, pos: Vec2) -> Vec2 {
    let rel = pos - camera.pos;
    let dir = camera.dir();
    let plane = camera.plane();
    let inv_det = 1.0 / (plane.x * dir.y - dir.x * plane.y);
    Vec2::new(
        inv_det * (dir.y * rel.x - dir.x * rel.y),
        inv_det * (-plane.y * rel.x + plane.x * rel.y),
    )
}

/// Projects a point entity of world size `k`; `None` when it is behind the camera.
pub fn project(camera: &Camera, pos: Vec2, k: f32, screen_width: usize, screen_height: usize) -> Option<ScreenPlacement> {
    let t = camera_space(camera, pos);
    if t.y.is_nan() || t.y <= 0.0 {
        return None;
    }
    Some(ScreenPlacement {
        column: screen_width as f32 * 0.5 * (1.0 + t.x / t.y),
        depth: t.y,
        lateral: t.x,
        size: screen_height as f32 / t.y * k,
    })
}

/// Source (texture) and destination (screen) rectangles of a decoration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BillboardRects {
    pub src_y: f32,
    pub src_h: f32,
    pub dst_x: f32,
    pub dst_y: f32,
    pub dst_w: f32,
    pub dst_h: f32,
}

/// Decorations stand on the floor. When the top is above the screen both
/// rectangles lose the same fraction from the top.
pub fn decoration_rects(p: &ScreenPlacement, screen_height: usize, tex_height: usize) -> Option<BillboardRects> {
    if p.size <= 0.0 {
        return None;
    }
    let h = screen_height as f32;
    let bottom = h * 0.5 + h / p.depth * 0.5;
    let top = bottom - p.size;
    if bottom <= 0.0 {
        return None;
    }
    let th = tex_height as f32;
    let (src_y, dst_y) = if top < 0.0 {
        (th * (-top / p.size), 0.0)
    } else {
        (0.0, top)
    };
    Some(BillboardRects {
        src_y,
        src_h: th - src_y,
        dst_x: p.column - p.size * 0.5,
        dst_y,
        dst_w: p.size,
        dst_h: bottom - dst_y,
    })
}

fn draw_decoration(fb: &mut Framebuffer, depth: &DepthBuffer, p: &ScreenPlacement, tex: &Texture, fog: &Fog) {
    let (tw, th) = (tex.width(), tex.height());
    let Some(r) = decoration_rects(p, fb.height, th) else {
        return;
    };
    let x0 = r.dst_x.floor().max(0.0) as usize;
    let x1 = (r.dst_x + r.dst_w).ceil().min(fb.width as f32).max(0.0) as usize;
    let y0 = r.dst_y.max(0.0) as usize;
    let y1 = (r.dst_y + r.dst_h).ceil().min(fb.height as f32).max(0.0) as usize;
    let k = fog.factor(p.depth);

    for x in x0..x1 {
        if !p.visible_at(x, depth) {
            continue;
        }
        let u = (((x as f32 + 0.5 - r.dst_x) / r.dst_w * tw as f32) as usize).min(tw - 1);
        for y in y0..y1 {
            let v = r.src_y + (y as f32 + 0.5 - r.dst_y) / r.dst_h * r.src_h;
            let texel = tex.sample(u, (v as usize).min(th - 1));
            if texel.a < ALPHA_CUTOFF {
                continue;
            }
            fb.blend_pixel(x, y, fog.blend(texel, k));
        }
    }
}

fn draw_disc(fb: &mut Framebuffer, depth: &DepthBuffer, p: &ScreenPlacement, cy: f32, color: Rgba, fog: &Fog) {
    let color = fog.apply(color, p.depth);
    fb.fill_circle(p.column, cy, p.size * 0.5, color, |x| p.visible_at(x, depth));
}

/// Draws every entity over `fb`. Must run after the wall pass has filled `depth`.
pub fn render_billboards(
    fb: &mut Framebuffer,
    depth: &DepthBuffer,
    camera: &Camera,
    entities: &Entities,
    decoration: &Texture,
    fog: &Fog,
) {
    let (w, h) = (fb.width, fb.height);
    let half_h = h as f32 * 0.5;

    for d in &entities.decorations {
        if let Some(p) = project(camera, d.pos, DECORATION_SIZE, w, h) {
            draw_decoration(fb, depth, &p, decoration, fog);
        }
    }
    for e in &entities.enemies {
        if let Some(p) = project(camera, e.pos, e.radius * 2.0, w, h) {
            // resting on the floor
            let cy = half_h + h as f32 / p.depth * 0.5 - p.size * 0.5;
            draw_disc(fb, depth, &p, cy, ENEMY_COLOR, fog);
        }
    }
    for pr in &entities.projectiles {
        if let Some(p) = project(camera, pr.pos, PROJECTILE_SIZE, w, h) {
            draw_disc(fb, depth, &p, half_h, PROJECTILE_COLOR, fog);
        }
    }
}
