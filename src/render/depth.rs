//! Per-column nearest-wall distances shared by the wall and sprite passes.
//!
//! One slot per cast column; a slot covers `stride` screen pixels. Both passes go
//! through `slot_for_pixel`, which is what keeps their indexing consistent.

#[derive(Clone, Debug)]
pub struct DepthBuffer {
    stride: usize,
    depth: Vec<f32>,
}

impl DepthBuffer {
    pub fn new(screen_width: usize, stride: usize) -> Self {
        let stride = stride.max(1);
        Self {
            stride,
            depth: vec![f32::INFINITY; screen_width.div_ceil(stride)],
        }
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.depth.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    #[inline]
    pub fn slot_for_pixel(&self, x: usize) -> usize {
        x / self.stride
    }

    #[inline]
    pub fn set(&mut self, slot: usize, d: f32) {
        if let Some(v) = self.depth.get_mut(slot) {
            *v = d;
        }
    }

    #[inline]
    pub fn get(&self, slot: usize) -> f32 {
        self.depth.get(slot).copied().unwrap_or(f32::INFINITY)
    }

    /// Depth at a screen pixel column; off-screen columns have no wall.
    #[inline]
    pub fn at_pixel(&self, x: usize) -> f32 {
        self.get(self.slot_for_pixel(x))
    }

    pub fn reset(&mut self) {
        self.depth.fill(f32::INFINITY);
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.depth
    }
}
