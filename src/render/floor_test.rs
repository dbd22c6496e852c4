use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::camera::Camera;
use crate::core::trig::TrigTable;
use crate::render::floor::{FloorCeiling, floor_texel};
use crate::render::framebuffer::Rgba;
use crate::render::shading::Fog;
use crate::render::tables::GeometryTables;
use crate::render::textures::Texture;

fn no_fog() -> Fog {
    Fog {
        start: 1000.0,
        end: 2000.0,
        color: Rgba::BLACK,
    }
}

fn texel_near(a: usize, b: usize, size: usize) -> bool {
    let d = a.abs_diff(b);
    d.min(size - d) <= 1
}

#[test]
fn test_floor_texel_in_range() {
    let mut rng = StdRng::seed_from_u64(5);
    for (tw, th) in [(64, 64), (17, 5), (1, 3)] {
        for _ in 0..2000 {
            let p = Vec2::new(rng.gen_range(-500.0..500.0), rng.gen_range(-500.0..500.0));
            let (u, v) = floor_texel(p, tw, th);
            assert!(u < tw && v < th, "{:?} -> ({}, {}) for {}x{}", p, u, v, tw, th);
        }
    }
    assert_eq!(floor_texel(Vec2::new(-0.25, 0.25), 64, 64), (48, 16));
    assert_eq!(floor_texel(Vec2::new(3.5, -2.0), 64, 64), (32, 0));
}

#[test]
fn test_floor_sample_matches_world_position() {
    let trig = TrigTable::new();
    let cam = Camera::new(Vec2::new(3.2, 4.7), 0.4, 0.66, &trig);
    let (w, h) = (40, 30);
    let tables = GeometryTables::rebuild(&cam, w, h, 1);
    // every texel is distinct so the sampled colour identifies the texel
    let (tw, th) = (16, 16);
    let px = (0..tw * th).map(|i| Rgba::rgb((i % tw) as u8, (i / tw) as u8, 0)).collect();
    let floor = Texture::from_rgba(tw, th, px).expect("floor");
    let sky = Texture::gradient(8, 8, Rgba::BLACK, Rgba::WHITE);
    let mut fc = FloorCeiling::new(w, h);
    assert!(fc.render(&cam, &tables, &floor, &sky, &no_fog()));

    let y = h - 3;
    let row = tables.floor_rows[y - tables.horizon()];
    for x in [0, 7, 20, 39] {
        // direct, non-incremental world position of this pixel
        let cam_x = 2.0 * x as f32 / w as f32 - 1.0;
        let world = cam.pos + (cam.dir() + cam.plane() * cam_x) * row.distance;
        let (u, v) = floor_texel(world, tw, th);
        let got = fc.background().get_pixel(x, y).expect("pixel");
        // incremental stepping may land on a neighbouring texel at a texel edge
        assert!(texel_near(got.r as usize, u, tw), "x={} got {:?} want ({}, {})", x, got, u, v);
        assert!(texel_near(got.g as usize, v, th), "x={} got {:?} want ({}, {})", x, got, u, v);
    }
}

#[test]
fn test_background_recomputed_only_when_dirty() {
    let trig = TrigTable::new();
    let mut cam = Camera::new(Vec2::new(3.5, 3.5), 0.0, 0.66, &trig);
    let (w, h) = (32, 24);
    let mut tables = GeometryTables::rebuild(&cam, w, h, 2);
    let floor = Texture::checker(16, 16, Rgba::rgb(40, 40, 40), 4);
    let sky = Texture::gradient(32, 16, Rgba::BLACK, Rgba::WHITE);
    let fog = Fog {
        start: 2.0,
        end: 8.0,
        color: Rgba::rgb(10, 10, 10),
    };
    let mut fc = FloorCeiling::new(w, h);

    assert!(fc.render(&cam, &tables, &floor, &sky, &fog));
    let first = fc.background().color_buffer.clone();
    assert!(!fc.render(&cam, &tables, &floor, &sky, &fog));
    assert_eq!(fc.background().color_buffer, first);

    cam.pos.x += 0.3;
    assert!(fc.render(&cam, &tables, &floor, &sky, &fog));
    assert!(!fc.render(&cam, &tables, &floor, &sky, &fog));

    cam.rotate(FRAC_PI_2, &trig);
    tables = GeometryTables::rebuild(&cam, w, h, 2);
    assert!(fc.render(&cam, &tables, &floor, &sky, &fog));

    fc.invalidate();
    assert!(fc.render(&cam, &tables, &floor, &sky, &fog));
}

#[test]
fn test_background_is_deterministic() {
    let trig = TrigTable::new();
    let cam = Camera::new(Vec2::new(7.25, 2.5), 1.1, 0.66, &trig);
    let tables = GeometryTables::rebuild(&cam, 48, 32, 2);
    let floor = Texture::checker(16, 16, Rgba::rgb(90, 40, 40), 4);
    let sky = Texture::gradient(32, 16, Rgba::BLACK, Rgba::WHITE);
    let mut a = FloorCeiling::new(48, 32);
    let mut b = FloorCeiling::new(48, 32);
    a.render(&cam, &tables, &floor, &sky, &no_fog());
    b.render(&cam, &tables, &floor, &sky, &no_fog());
    assert_eq!(a.background().color_buffer, b.background().color_buffer);
    assert!(a.background().color_buffer.iter().all(|p| p.a == 255));
}
