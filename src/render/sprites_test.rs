use glam::Vec2;

use crate::config::EntityConfig;
use crate::core::camera::Camera;
use crate::core::entity::{Decoration, Enemy, Entities, Projectile};
use crate::core::trig::TrigTable;
use crate::render::depth::DepthBuffer;
use crate::render::framebuffer::{Framebuffer, Rgba};
use crate::render::shading::Fog;
use crate::render::sprites::{
    DECORATION_SIZE, ScreenPlacement, camera_space, decoration_rects, project, render_billboards,
};
use crate::render::textures::Texture;

const W: usize = 64;
const H: usize = 48;

fn east_camera(trig: &TrigTable) -> Camera {
    Camera::new(Vec2::new(5.5, 5.5), 0.0, 0.66, trig)
}

fn wall_at(distance: f32) -> DepthBuffer {
    let mut depth = DepthBuffer::new(W, 2);
    for slot in 0..depth.len() {
        depth.set(slot, distance);
    }
    depth
}

fn no_fog() -> Fog {
    Fog {
        start: 100.0,
        end: 200.0,
        color: Rgba::BLACK,
    }
}

#[test]
fn test_camera_space_axes() {
    let trig = TrigTable::new();
    let cam = east_camera(&trig);
    let t = camera_space(&cam, Vec2::new(8.5, 5.5));
    assert!((t.y - 3.0).abs() < 1e-5, "{:?}", t);
    assert!(t.x.abs() < 1e-6);
    // +y is to the right when facing +x
    let t = camera_space(&cam, Vec2::new(8.5, 6.5));
    assert!((t.x - 1.0 / 0.66).abs() < 1e-4, "{:?}", t);
}

#[test]
fn test_occluded_behind_wall() {
    let trig = TrigTable::new();
    let cam = east_camera(&trig);
    let depth = wall_at(5.0);

    let far = project(&cam, Vec2::new(15.5, 5.5), 1.0, W, H).expect("in front");
    assert!((far.depth - 10.0).abs() < 1e-4);
    assert!(!far.is_visible(&depth, W));

    let near = project(&cam, Vec2::new(8.5, 5.5), 1.0, W, H).expect("in front");
    assert!(near.is_visible(&depth, W));
    assert!((near.column - W as f32 * 0.5).abs() < 1e-3);
    assert!((near.size - H as f32 / 3.0).abs() < 1e-3);
}

#[test]
fn test_behind_camera_is_culled() {
    let trig = TrigTable::new();
    let cam = east_camera(&trig);
    assert!(project(&cam, Vec2::new(2.5, 5.5), 1.0, W, H).is_none());
    assert!(project(&cam, Vec2::new(5.5, 9.5), 1.0, W, H).is_none());
    assert!(project(&cam, cam.pos, 1.0, W, H).is_none());
}

#[test]
fn test_lateral_offset_moves_column() {
    let trig = TrigTable::new();
    let cam = east_camera(&trig);
    let right = project(&cam, Vec2::new(8.5, 6.0), 1.0, W, H).expect("right");
    let left = project(&cam, Vec2::new(8.5, 5.0), 1.0, W, H).expect("left");
    assert!(right.column > W as f32 * 0.5);
    assert!(left.column < W as f32 * 0.5);
    assert!((right.column + left.column - W as f32).abs() < 1e-3);
}

#[test]
fn test_decoration_crop_is_proportional() {
    let p = ScreenPlacement {
        column: 50.0,
        depth: 0.5,
        lateral: 0.0,
        size: 100.0 / 0.5 * DECORATION_SIZE,
    };
    let r = decoration_rects(&p, 100, 64).expect("rects");
    // bottom on the floor line at 150, top at -10
    assert_eq!(r.dst_y, 0.0);
    assert!((r.dst_h - 150.0).abs() < 1e-3);
    assert!((r.src_y - 64.0 * 10.0 / 160.0).abs() < 1e-3);
    assert!((r.src_h / 64.0 - r.dst_h / p.size).abs() < 1e-5);

    let p = ScreenPlacement {
        column: 50.0,
        depth: 4.0,
        lateral: 0.0,
        size: 100.0 / 4.0 * DECORATION_SIZE,
    };
    let r = decoration_rects(&p, 100, 64).expect("rects");
    assert_eq!(r.src_y, 0.0);
    assert_eq!(r.src_h, 64.0);
    assert!((r.dst_y - 42.5).abs() < 1e-3);
    assert!((r.dst_h - p.size).abs() < 1e-3);
}

#[test]
fn test_render_respects_wall_depth() {
    let trig = TrigTable::new();
    let cam = east_camera(&trig);
    let tex = Texture::glowing_orb(16, 16, Rgba::WHITE);
    let enemy_color = Rgba::rgb(200, 40, 40);

    let mut entities = Entities::new(&EntityConfig::default());
    entities.enemies.push(Enemy {
        pos: Vec2::new(8.5, 5.5),
        radius: 0.3,
    });

    let mut fb = Framebuffer::new(W, H);
    render_billboards(&mut fb, &wall_at(5.0), &cam, &entities, &tex, &no_fog());
    // 3 cells away: 9.6 px across, resting on the floor line at y = 32
    assert_eq!(fb.get_pixel(32, 27), Some(enemy_color));
    assert_eq!(fb.get_pixel(32, 10), Some(Rgba::BLACK));

    let mut fb = Framebuffer::new(W, H);
    render_billboards(&mut fb, &wall_at(2.0), &cam, &entities, &tex, &no_fog());
    assert!(fb.color_buffer.iter().all(|p| *p == Rgba::BLACK));
}

#[test]
fn test_render_decoration_and_projectile() {
    let trig = TrigTable::new();
    let cam = east_camera(&trig);
    let green = Rgba::rgb(0, 200, 0);
    let tex = Texture::from_rgba(16, 16, vec![green; 256]).expect("texture");

    let mut entities = Entities::new(&EntityConfig::default());
    // close enough that the top is cropped
    entities.decorations.push(Decoration {
        pos: Vec2::new(6.0, 5.5),
    });
    let mut fb = Framebuffer::new(W, H);
    render_billboards(&mut fb, &wall_at(f32::INFINITY), &cam, &entities, &tex, &no_fog());
    assert_eq!(fb.get_pixel(32, 0), Some(green));
    assert_eq!(fb.get_pixel(32, H - 1), Some(green));

    entities.decorations.clear();
    entities.projectiles.push(Projectile {
        pos: Vec2::new(7.5, 5.5),
        vel: Vec2::X,
        ttl: 1.0,
    });
    let mut fb = Framebuffer::new(W, H);
    render_billboards(&mut fb, &wall_at(f32::INFINITY), &cam, &entities, &tex, &no_fog());
    assert_eq!(fb.get_pixel(32, H / 2), Some(Rgba::rgb(255, 220, 80)));
}

#[test]
fn test_fog_tints_distant_billboards() {
    let trig = TrigTable::new();
    let cam = east_camera(&trig);
    let tex = Texture::glowing_orb(16, 16, Rgba::WHITE);
    let fog = Fog {
        start: 1.0,
        end: 2.0,
        color: Rgba::rgb(20, 20, 30),
    };
    let mut entities = Entities::new(&EntityConfig::default());
    entities.enemies.push(Enemy {
        pos: Vec2::new(8.5, 5.5),
        radius: 0.3,
    });
    let mut fb = Framebuffer::new(W, H);
    render_billboards(&mut fb, &wall_at(5.0), &cam, &entities, &tex, &fog);
    assert_eq!(fb.get_pixel(32, 27), Some(Rgba::rgb(20, 20, 30)));
}
