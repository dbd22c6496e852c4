//! Per-heading geometry shared by the wall, floor and ceiling passes.
//!
//! Everything here depends only on the camera heading and plane (never on its
//! position) and on the screen size, so the tables are rebuilt on rotation or
//! resize and reused for every frame in between.
#[cfg(test)]
#[path = "./tables_test.rs"]
mod tables_test;

use std::f32::consts::TAU;

use glam::Vec2;
use tracing::debug;

use crate::core::camera::Camera;

/// Smallest ray component magnitude inverted for DDA deltas.
pub const RAY_EPSILON: f32 = 1e-6;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FloorRow {
    /// Perpendicular distance to the floor seen on this row.
    pub distance: f32,
    /// World offset of the row's leftmost sample from the camera position.
    pub origin: Vec2,
    /// World step between neighbouring pixels on the row.
    pub step: Vec2,
}

#[derive(Clone, Debug)]
pub struct GeometryTables {
    pub width: usize,
    pub height: usize,
    pub stride: usize,
    pub bucket: usize,
    pub dir: Vec2,
    pub plane: Vec2,
    /// Per cast column.
    pub ray_dirs: Vec<Vec2>,
    /// Per cast column: grid distance travelled per unit step along x and y.
    pub delta_dist: Vec<Vec2>,
    /// Per cast column: cosine of the angle between heading and ray.
    pub cos_angle: Vec<f32>,
    /// Per cast column: length of the unnormalised ray direction.
    pub ray_len: Vec<f32>,
    /// Per pixel column: horizontal sky coordinate in [0, 1).
    pub sky_u: Vec<f32>,
    /// Per ceiling row: vertical sky coordinate in [0, 1).
    pub sky_v: Vec<f32>,
    /// Rows from the horizon to the bottom of the screen.
    pub floor_rows: Vec<FloorRow>,
}

#[inline]
fn inv_abs(v: f32) -> f32 {
    1.0 / v.abs().max(RAY_EPSILON)
}

#[inline]
pub fn camera_x(x: usize, width: usize) -> f32 {
    2.0 * x as f32 / width as f32 - 1.0
}

impl GeometryTables {
    pub fn rebuild(camera: &Camera, width: usize, height: usize, stride: usize) -> Self {
        let stride = stride.max(1);
        let dir = camera.dir();
        let plane = camera.plane();
        let columns = width.div_ceil(stride);

        let mut ray_dirs = Vec::with_capacity(columns);
        let mut delta_dist = Vec::with_capacity(columns);
        let mut cos_angle = Vec::with_capacity(columns);
        let mut ray_len = Vec::with_capacity(columns);
        for col in 0..columns {
            let ray = dir + plane * camera_x(col * stride, width);
            let len = ray.length();
            ray_dirs.push(ray);
            delta_dist.push(Vec2::new(inv_abs(ray.x), inv_abs(ray.y)));
            cos_angle.push(if len > 0.0 { ray.dot(dir) / len } else { 1.0 });
            ray_len.push(len);
        }

        let sky_u = (0..width)
            .map(|x| {
                let ray = dir + plane * camera_x(x, width);
                let u = ray.y.atan2(ray.x).rem_euclid(TAU) / TAU;
                // rem_euclid can round up to TAU for tiny negative angles
                if u >= 1.0 { 0.0 } else { u }
            })
            .collect();

        let horizon = height / 2;
        let sky_v = (0..horizon).map(|y| y as f32 / horizon as f32).collect();

        let h = height as f32;
        let floor_rows = (horizon..height)
            .map(|y| {
                let denom = (2.0 * y as f32 - h).max(1.0);
                let distance = h / denom;
                FloorRow {
                    distance,
                    origin: (dir - plane) * distance,
                    step: plane * (2.0 * distance / width as f32),
                }
            })
            .collect();

        debug!(bucket = camera.bucket(), width, height, stride, "geometry tables rebuilt");

        Self {
            width,
            height,
            stride,
            bucket: camera.bucket(),
            dir,
            plane,
            ray_dirs,
            delta_dist,
            cos_angle,
            ray_len,
            sky_u,
            sky_v,
            floor_rows,
        }
    }

    /// True while the tables still describe `camera` at this resolution.
    pub fn matches(&self, camera: &Camera, width: usize, height: usize, stride: usize) -> bool {
        self.bucket == camera.bucket()
            && self.plane == camera.plane()
            && self.width == width
            && self.height == height
            && self.stride == stride.max(1)
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.ray_dirs.len()
    }

    #[inline]
    pub fn horizon(&self) -> usize {
        self.height / 2
    }
}
