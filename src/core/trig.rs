//! Sine/cosine lookup over a fixed number of heading buckets.
use std::f32::consts::TAU;

use glam::Vec2;

pub const ANGLE_STEPS: usize = 3600;

pub struct TrigTable {
    sin: Vec<f32>,
    cos: Vec<f32>,
}

impl TrigTable {
    pub fn new() -> Self {
        let step = TAU / ANGLE_STEPS as f32;
        let (sin, cos) = (0..ANGLE_STEPS)
            .map(|i| {
                let a = i as f32 * step;
                (a.sin(), a.cos())
            })
            .unzip();
        Self { sin, cos }
    }

    /// Bucket index nearest to `angle` (radians, any range).
    #[inline]
    pub fn bucket(angle: f32) -> usize {
        let turns = angle.rem_euclid(TAU) / TAU;
        ((turns * ANGLE_STEPS as f32).round() as usize) % ANGLE_STEPS
    }

    #[inline]
    pub fn bucket_angle(bucket: usize) -> f32 {
        (bucket % ANGLE_STEPS) as f32 * TAU / ANGLE_STEPS as f32
    }

    #[inline]
    pub fn sin(&self, bucket: usize) -> f32 {
        self.sin[bucket % ANGLE_STEPS]
    }

    #[inline]
    pub fn cos(&self, bucket: usize) -> f32 {
        self.cos[bucket % ANGLE_STEPS]
    }

    /// Unit vector for the bucket.
    #[inline]
    pub fn dir(&self, bucket: usize) -> Vec2 {
        Vec2::new(self.cos(bucket), self.sin(bucket))
    }
}

impl Default for TrigTable {
    fn default() -> Self {
        Self::new()
    }
}
