//! World data and simulation (grid, camera, player, entities).
//!
//! Re-exports:
//! - `grid`: Occupancy grid and cellular-automaton generator
//! - `trig`: Sine/cosine table over heading buckets
//! - `camera`: Camera position, heading and plane
//! - `player`: Frame input, movement and collision
//! - `entity`: Enemies, projectiles and decorations

pub mod grid;
pub mod trig;
pub mod camera;
pub mod player;
pub mod entity;
