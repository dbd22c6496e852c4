//! First-person camera: position, unit heading and the camera plane.
//!
//! World coordinates are grid-fractional with `y` growing downwards (row order), so
//! the plane points to the viewer's right: `plane = perp(dir) * fov_scale`.
use std::f32::consts::TAU;

use glam::Vec2;

use crate::core::trig::TrigTable;

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub pos: Vec2,
    angle: f32,
    bucket: usize,
    dir: Vec2,
    plane: Vec2,
    fov_scale: f32,
}

impl Camera {
    pub fn new(pos: Vec2, angle: f32, fov_scale: f32, trig: &TrigTable) -> Self {
        let mut cam = Self {
            pos,
            angle: 0.0,
            bucket: 0,
            dir: Vec2::X,
            plane: Vec2::ZERO,
            fov_scale,
        };
        cam.set_angle(angle, trig);
        cam
    }

    pub fn set_angle(&mut self, angle: f32, trig: &TrigTable) {
        self.angle = angle.rem_euclid(TAU);
        self.bucket = TrigTable::bucket(self.angle);
        self.dir = trig.dir(self.bucket);
        self.plane = self.dir.perp() * self.fov_scale;
    }

    /// Positive `delta` turns right.
    pub fn rotate(&mut self, delta: f32, trig: &TrigTable) {
        if delta != 0.0 {
            self.set_angle(self.angle + delta, trig);
        }
    }

    #[inline]
    pub fn dir(&self) -> Vec2 {
        self.dir
    }

    #[inline]
    pub fn plane(&self) -> Vec2 {
        self.plane
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Discretised heading; direction-derived caches are keyed on it.
    #[inline]
    pub fn bucket(&self) -> usize {
        self.bucket
    }

    #[inline]
    pub fn right(&self) -> Vec2 {
        self.dir.perp()
    }
}
