use bytemuck::{Pod, Zeroable};

/// RGBA8 pixel, same layout as the display texture.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Multiplies the colour channels by `k`, keeping alpha.
    #[inline]
    pub fn scale(self, k: f32) -> Rgba {
        let mul = |v: u8| -> u8 { (v as f32 * k).clamp(0.0, 255.0) as u8 };
        Rgba::new(mul(self.r), mul(self.g), mul(self.b), self.a)
    }

    /// `(1 - t) * self + t * other`, keeping alpha.
    #[inline]
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let f = |x: u8, y: u8| -> u8 { (x as f32 * (1.0 - t) + y as f32 * t).round() as u8 };
        Rgba::new(f(self.r, other.r), f(self.g, other.g), f(self.b, other.b), self.a)
    }
}

pub struct Framebuffer {
    pub color_buffer: Vec<Rgba>,
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            color_buffer: vec![Rgba::BLACK; width * height],
            width,
            height,
        }
    }

    #[inline]
    pub fn clear(&mut self, color: Rgba) {
        self.color_buffer.fill(color);
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgba) {
        if x < self.width && y < self.height {
            self.color_buffer[y * self.width + x] = color;
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.color_buffer[y * self.width + x])
        } else {
            None
        }
    }

    /// Alpha-blends `color` over the existing pixel.
    #[inline]
    pub fn blend_pixel(&mut self, x: usize, y: usize, color: Rgba) {
        if color.a == 255 {
            self.set_pixel(x, y, color);
        } else if color.a > 0 {
            if let Some(dst) = self.get_pixel(x, y) {
                let out = dst.lerp(color, color.a as f32 / 255.0);
                self.set_pixel(x, y, Rgba::new(out.r, out.g, out.b, 255));
            }
        }
    }

    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [Rgba] {
        let start = y * self.width;
        &mut self.color_buffer[start..start + self.width]
    }

    pub fn copy_from(&mut self, other: &Framebuffer) {
        if self.color_buffer.len() == other.color_buffer.len() {
            self.color_buffer.copy_from_slice(&other.color_buffer);
        }
    }

    /// Filled disc clipped to the screen; pixels whose column fails `visible` are skipped.
    pub fn fill_circle(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        color: Rgba,
        mut visible: impl FnMut(usize) -> bool,
    ) {
        if radius <= 0.0 {
            return;
        }
        let x0 = (cx - radius).floor().max(0.0) as usize;
        let x1 = (cx + radius).ceil().min(self.width as f32 - 1.0);
        let y0 = (cy - radius).floor().max(0.0) as usize;
        let y1 = (cy + radius).ceil().min(self.height as f32 - 1.0);
        if x1 < 0.0 || y1 < 0.0 {
            return;
        }
        let r2 = radius * radius;
        for x in x0..=x1 as usize {
            if !visible(x) {
                continue;
            }
            let dx = x as f32 + 0.5 - cx;
            for y in y0..=y1 as usize {
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    /// Raw RGBA8 bytes for texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.color_buffer)
    }
}
