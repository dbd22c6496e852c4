//! Read-only RGBA pixmaps and the procedural fallbacks used when an asset is missing.
use crate::error::{Error, Result};
use crate::render::framebuffer::Rgba;

#[derive(Clone, Debug)]
pub struct Texture {
    w: usize,
    h: usize,
    px: Vec<Rgba>,
}

impl Texture {
    pub fn from_rgba(w: usize, h: usize, px: Vec<Rgba>) -> Result<Self> {
        if w == 0 || h == 0 {
            return Err(Error::Texture(format!("zero-sized texture {}x{}", w, h)));
        }
        if px.len() != w * h {
            return Err(Error::Texture(format!(
                "{} pixels for a {}x{} texture",
                px.len(),
                w,
                h
            )));
        }
        Ok(Self { w, h, px })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }

    /// Wrapping sample. Every texture is at least 1x1.
    #[inline]
    pub fn sample(&self, x: usize, y: usize) -> Rgba {
        self.px[(y % self.h) * self.w + (x % self.w)]
    }

    /// Brick wall: mortar lines with an offset every other course.
    pub fn brick(w: usize, h: usize, brick: Rgba, mortar: Rgba) -> Self {
        let (w, h) = (w.max(1), h.max(1));
        let course = (h / 4).max(2);
        let brick_w = (w / 2).max(2);
        let mut px = vec![brick; w * h];
        for y in 0..h {
            let row = y / course;
            let offset = if row % 2 == 0 { 0 } else { brick_w / 2 };
            for x in 0..w {
                let i = y * w + x;
                if y % course == 0 || (x + offset) % brick_w == 0 {
                    px[i] = mortar;
                } else {
                    // faint per-brick variation so the pattern reads at a distance
                    let shade = 0.85 + 0.15 * (((x + offset) / brick_w + row) % 3) as f32 / 2.0;
                    px[i] = brick.scale(shade);
                }
            }
        }
        Self { w, h, px }
    }

    pub fn checker(w: usize, h: usize, base: Rgba, cell: usize) -> Self {
        let (w, h) = (w.max(1), h.max(1));
        let cell = cell.max(1);
        let light = base.lerp(Rgba::WHITE, 0.1);
        let px = (0..w * h)
            .map(|i| {
                let (x, y) = (i % w, i / w);
                if ((x / cell) + (y / cell)) % 2 == 0 { light } else { base }
            })
            .collect();
        Self { w, h, px }
    }

    /// Vertical gradient, wraps seamlessly around the sky cylinder.
    pub fn gradient(w: usize, h: usize, top: Rgba, bottom: Rgba) -> Self {
        let (w, h) = (w.max(1), h.max(1));
        let mut px = vec![top; w * h];
        for y in 0..h {
            let t = y as f32 / (h.max(2) - 1) as f32;
            let c = top.lerp(bottom, t);
            px[y * w..(y + 1) * w].fill(c);
        }
        Self { w, h, px }
    }

    /// Bright disc with a soft transparent halo.
    pub fn glowing_orb(w: usize, h: usize, color: Rgba) -> Self {
        let (w, h) = (w.max(1), h.max(1));
        let mut px = vec![Rgba::TRANSPARENT; w * h];
        let cx = w as f32 * 0.5;
        let cy = h as f32 * 0.5;
        let r = w.min(h) as f32 * 0.3;
        for y in 0..h {
            for x in 0..w {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let d = (dx * dx + dy * dy).sqrt();
                let i = y * w + x;
                if d <= r {
                    let t = (1.0 - d / r).clamp(0.0, 1.0);
                    let core = color.lerp(Rgba::WHITE, t * 0.85);
                    px[i] = Rgba::new(core.r, core.g, core.b, 255);
                } else {
                    let t = (1.0 - (d - r) / (r * 0.9)).clamp(0.0, 1.0);
                    if t > 0.0 {
                        px[i] = Rgba::new(color.r, color.g, color.b, (t * 180.0) as u8);
                    }
                }
            }
        }
        Self { w, h, px }
    }
}

/// The textures the renderer samples. Billboard sprite is optional upstream but always
/// present here thanks to the fallback.
pub struct TextureSet {
    pub wall: Texture,
    pub floor: Texture,
    pub ceiling: Texture,
    pub decoration: Texture,
}

impl TextureSet {
    pub fn procedural() -> Self {
        Self {
            wall: Texture::brick(64, 64, Rgba::rgb(150, 70, 50), Rgba::rgb(70, 65, 60)),
            floor: Texture::checker(64, 64, Rgba::rgb(48, 48, 52), 8),
            ceiling: Texture::gradient(256, 128, Rgba::rgb(12, 16, 26), Rgba::rgb(40, 52, 80)),
            decoration: Texture::glowing_orb(64, 64, Rgba::rgb(255, 240, 80)),
        }
    }
}

impl Default for TextureSet {
    fn default() -> Self {
        Self::procedural()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba_checks_size() {
        assert!(Texture::from_rgba(2, 2, vec![Rgba::BLACK; 4]).is_ok());
        assert!(Texture::from_rgba(2, 2, vec![Rgba::BLACK; 3]).is_err());
        assert!(Texture::from_rgba(0, 2, vec![]).is_err());
    }

    #[test]
    fn test_sample_wraps() {
        let px = vec![Rgba::BLACK, Rgba::WHITE, Rgba::rgb(1, 2, 3), Rgba::rgb(4, 5, 6)];
        let t = Texture::from_rgba(2, 2, px).expect("texture");
        assert_eq!(t.sample(1, 0), Rgba::WHITE);
        assert_eq!(t.sample(3, 2), Rgba::WHITE);
        assert_eq!(t.sample(4, 5), Rgba::rgb(1, 2, 3));
    }

    #[test]
    fn test_procedural_textures_never_empty() {
        let c = Rgba::rgb(90, 90, 90);
        let all = [
            Texture::brick(0, 0, c, Rgba::BLACK),
            Texture::checker(0, 0, c, 8),
            Texture::gradient(0, 3, c, Rgba::WHITE),
            Texture::glowing_orb(5, 0, c),
        ];
        for t in &all {
            assert!(t.width() >= 1 && t.height() >= 1);
            assert_eq!(t.px.len(), t.width() * t.height());
            let _ = t.sample(7, 9);
        }
        assert_eq!((all[2].width(), all[2].height()), (1, 3));
    }

    #[test]
    fn test_orb_is_transparent_at_corners() {
        let t = Texture::glowing_orb(64, 64, Rgba::rgb(255, 0, 0));
        assert_eq!(t.sample(0, 0).a, 0);
        assert_eq!(t.sample(32, 32).a, 255);
    }
}
