//! Wall casting: one grid DDA per cast column, textured and shaded strips, and the
//! depth buffer the sprite pass occludes against.
#[cfg(test)]
#[path = "./casters_test.rs"]
mod casters_test;

use glam::IVec2;

use crate::core::camera::Camera;
use crate::core::grid::{Cell, Grid};
use crate::render::depth::DepthBuffer;
use crate::render::framebuffer::Framebuffer;
use crate::render::shading::Lighting;
use crate::render::tables::GeometryTables;
use crate::render::textures::Texture;

/// Ray length floor; stops walls exploding when the camera is flush against them.
pub const MIN_RAY_DISTANCE: f32 = 0.05;
/// Perpendicular distance floor; keeps `height / distance` finite.
pub const MIN_PERP_DISTANCE: f32 = 0.01;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WallHit {
    pub perp_distance: f32,
    /// Fractional hit position along the struck face, in [0, 1).
    pub wall_x: f32,
    /// 0: crossed a vertical grid line (x step), 1: a horizontal one (y step).
    pub side: u8,
    pub cell: IVec2,
    pub step: IVec2,
    /// The face is seen from the side that reads the texture right to left.
    pub mirrored: bool,
}

impl WallHit {
    pub fn texture_column(&self, tex_width: usize) -> usize {
        let col = ((self.wall_x * tex_width as f32) as usize).min(tex_width.saturating_sub(1));
        if self.mirrored {
            tex_width - col - 1
        } else {
            col
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ColumnSpan {
    pub line_height: f32,
    pub draw_start: usize,
    pub draw_end: usize,
}

/// Vertical span of a wall at `perp_distance`, centred on the horizon and clipped.
pub fn project_column(perp_distance: f32, screen_height: usize) -> ColumnSpan {
    let h = screen_height as f32;
    let line_height = h / perp_distance.max(MIN_PERP_DISTANCE);
    let draw_start = (h * 0.5 - line_height * 0.5).max(0.0) as usize;
    let draw_end = (h * 0.5 + line_height * 0.5).min(h) as usize;
    ColumnSpan {
        line_height,
        draw_start,
        draw_end,
    }
}

/// Walks the grid along cast column `column` until it enters a wall cell.
/// Leaving the grid means no wall was found; the sealed border makes that a bug.
pub fn cast_column(camera: &Camera, grid: &Grid, tables: &GeometryTables, column: usize) -> Option<WallHit> {
    let ray = *tables.ray_dirs.get(column)?;
    let delta = tables.delta_dist[column];
    let pos = camera.pos;
    let mut map = IVec2::new(pos.x.floor() as i32, pos.y.floor() as i32);

    let (step_x, mut side_dist_x) = if ray.x < 0.0 {
        (-1, (pos.x - map.x as f32) * delta.x)
    } else {
        (1, (map.x as f32 + 1.0 - pos.x) * delta.x)
    };
    let (step_y, mut side_dist_y) = if ray.y < 0.0 {
        (-1, (pos.y - map.y as f32) * delta.y)
    } else {
        (1, (map.y as f32 + 1.0 - pos.y) * delta.y)
    };

    let side = loop {
        let side = if side_dist_x < side_dist_y {
            side_dist_x += delta.x;
            map.x += step_x;
            0
        } else {
            side_dist_y += delta.y;
            map.y += step_y;
            1
        };
        match grid.cell(map.x, map.y) {
            None => return None,
            Some(Cell::Wall) => break side,
            Some(Cell::Open) => {}
        }
    };

    // ray parameter at the hit; rays are not normalised
    let t = if side == 0 {
        side_dist_x - delta.x
    } else {
        side_dist_y - delta.y
    };

    let mut wall_x = if side == 0 {
        pos.y + t * ray.y
    } else {
        pos.x + t * ray.x
    };
    wall_x -= wall_x.floor();

    let ray_distance = (t * tables.ray_len[column]).max(MIN_RAY_DISTANCE);
    let perp_distance = (ray_distance * tables.cos_angle[column]).max(MIN_PERP_DISTANCE);

    Some(WallHit {
        perp_distance,
        wall_x,
        side,
        cell: map,
        step: IVec2::new(step_x, step_y),
        mirrored: (side == 0 && ray.x > 0.0) || (side == 1 && ray.y < 0.0),
    })
}

/// Casts every column, draws the wall strips over `fb` and fills `depth`.
pub fn render_walls(
    fb: &mut Framebuffer,
    depth: &mut DepthBuffer,
    camera: &Camera,
    grid: &Grid,
    tables: &GeometryTables,
    texture: &Texture,
    lighting: &Lighting,
) {
    let width = fb.width;
    let height = fb.height;
    let stride = depth.stride();
    let tw = texture.width();
    let th = texture.height();
    let half_h = height as f32 * 0.5;

    for col in 0..tables.columns() {
        let Some(hit) = cast_column(camera, grid, tables, col) else {
            depth.set(col, f32::INFINITY);
            continue;
        };
        depth.set(col, hit.perp_distance);

        let span = project_column(hit.perp_distance, height);
        let shade = lighting.face_intensity(Lighting::face_normal(hit.side, hit.step.x, hit.step.y));
        let fog = lighting.fog.factor(hit.perp_distance);
        let tex_x = hit.texture_column(tw);

        let x0 = col * stride;
        let x1 = (x0 + stride).min(width);
        let tex_step = th as f32 / span.line_height;
        let mut tex_pos = (span.draw_start as f32 - half_h + span.line_height * 0.5) * tex_step;
        for y in span.draw_start..span.draw_end {
            let tex_y = (tex_pos.max(0.0) as usize).min(th - 1);
            tex_pos += tex_step;
            let mut color = lighting.fog.blend(texture.sample(tex_x, tex_y).scale(shade), fog);
            color.a = 255;
            let row = y * width;
            fb.color_buffer[row + x0..row + x1].fill(color);
        }
    }
}
