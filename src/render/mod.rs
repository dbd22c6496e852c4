//! Software renderer.
//!
//! Re-exports:
//! - `framebuffer`: RGBA8 pixel buffer
//! - `textures`: Pixmaps with wrap sampling and procedural fallbacks
//! - `shading`: Face lighting and linear fog
//! - `tables`: Per-heading geometry tables
//! - `depth`: Per-column wall depth buffer
//! - `casters`: Grid DDA and wall strips
//! - `floor`: Floor and sky background with dirty-flag cache
//! - `sprites`: Billboard projection and occlusion
//! - `renderer`: Frame orchestration

pub mod framebuffer;
pub mod textures;
pub mod shading;
pub mod tables;
pub mod depth;
pub mod casters;
pub mod floor;
pub mod sprites;
pub mod renderer;
