//! Occupancy grid and its cellular-automaton generator.
//!
//! Generation is a rejection loop: seed random walls, smooth, seal the border and
//! keep the result only if enough of it is open. Each attempt is independent, so the
//! loop terminates with probability one for sane parameters; `max_attempts` turns the
//! pathological case into an error instead of a hang.
#[cfg(test)]
#[path = "./grid_test.rs"]
mod grid_test;

use glam::{IVec2, Vec2};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Open,
    Wall,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

#[derive(Clone, Debug)]
pub struct GridParams {
    pub size: usize,
    pub wall_probability: f32,
    pub smoothing_passes: u32,
    pub wall_count_threshold: u8,
    pub min_open_ratio: f32,
    pub max_attempts: u32,
}

impl GridParams {
    pub fn validate(&self) -> Result<()> {
        if self.size < 3 {
            return Err(Error::InvalidGridParams(format!(
                "size {} leaves no interior",
                self.size
            )));
        }
        if !(0.0..=1.0).contains(&self.wall_probability) {
            return Err(Error::InvalidGridParams(format!(
                "wall probability {} outside [0, 1]",
                self.wall_probability
            )));
        }
        if !(0.0..=1.0).contains(&self.min_open_ratio) {
            return Err(Error::InvalidGridParams(format!(
                "min open ratio {} outside [0, 1]",
                self.min_open_ratio
            )));
        }
        if self.wall_count_threshold > 8 {
            return Err(Error::InvalidGridParams(format!(
                "threshold {} exceeds the 8 neighbours",
                self.wall_count_threshold
            )));
        }
        if self.max_attempts == 0 {
            return Err(Error::InvalidGridParams("max_attempts is 0".to_string()));
        }
        Ok(())
    }
}

impl Grid {
    pub fn filled(size: usize, cell: Cell) -> Self {
        Self {
            size,
            cells: vec![cell; size * size],
        }
    }

    /// Builds a grid from rows of `#` (wall) and anything else (open).
    /// Rows shorter than the widest row are padded with walls; the border is sealed.
    pub fn from_rows(rows: &[&str]) -> Self {
        let size = rows
            .iter()
            .map(|r| r.chars().count())
            .max()
            .unwrap_or(0)
            .max(rows.len());
        let mut grid = Grid::filled(size, Cell::Wall);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch != '#' {
                    grid.set(x, y, Cell::Open);
                }
            }
        }
        grid.seal_border();
        grid
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.size && (y as usize) < self.size
    }

    #[inline]
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        if self.in_bounds(x, y) {
            Some(self.cells[y as usize * self.size + x as usize])
        } else {
            None
        }
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.size && y < self.size {
            self.cells[y * self.size + x] = cell;
        }
    }

    /// Solid test for movement: anything outside the grid counts as wall.
    #[inline]
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.cell(x, y) != Some(Cell::Open)
    }

    #[inline]
    pub fn is_solid_at(&self, p: Vec2) -> bool {
        self.is_solid(p.x.floor() as i32, p.y.floor() as i32)
    }

    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|c| **c == Cell::Open).count()
    }

    pub fn open_ratio(&self) -> f32 {
        if self.cells.is_empty() {
            return 0.0;
        }
        self.open_count() as f32 / self.cells.len() as f32
    }

    pub fn open_cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.cells.iter().enumerate().filter_map(move |(i, c)| {
            (*c == Cell::Open).then(|| IVec2::new((i % self.size) as i32, (i / self.size) as i32))
        })
    }

    pub fn border_is_sealed(&self) -> bool {
        let last = self.size as i32 - 1;
        (0..self.size as i32).all(|i| {
            self.is_solid(i, 0) && self.is_solid(i, last) && self.is_solid(0, i) && self.is_solid(last, i)
        })
    }

    pub fn seal_border(&mut self) {
        let last = self.size.saturating_sub(1);
        for i in 0..self.size {
            self.set(i, 0, Cell::Wall);
            self.set(i, last, Cell::Wall);
            self.set(0, i, Cell::Wall);
            self.set(last, i, Cell::Wall);
        }
    }

    /// Walls among the 8 neighbours; cells past the edge count as walls.
    pub fn wall_neighbours(&self, x: usize, y: usize) -> u8 {
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if self.is_solid(x as i32 + dx, y as i32 + dy) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Random open cell whose centre is at least `min_dist` from `away_from`.
    /// Falls back to any open cell when none is far enough.
    pub fn random_open_cell<R: Rng>(&self, rng: &mut R, away_from: Vec2, min_dist: f32) -> Option<IVec2> {
        let far: Vec<IVec2> = self
            .open_cells()
            .filter(|c| cell_center(*c).distance(away_from) >= min_dist)
            .collect();
        if !far.is_empty() {
            return Some(far[rng.gen_range(0..far.len())]);
        }
        let any: Vec<IVec2> = self.open_cells().collect();
        if any.is_empty() {
            None
        } else {
            Some(any[rng.gen_range(0..any.len())])
        }
    }
}

#[inline]
pub fn cell_center(c: IVec2) -> Vec2 {
    Vec2::new(c.x as f32 + 0.5, c.y as f32 + 0.5)
}

/// One smoothing generation. Reads only `prev`, so the result does not depend on
/// the order cells are visited.
pub fn smooth_step(prev: &Grid, wall_count_threshold: u8) -> Grid {
    let mut next = Grid::filled(prev.size, Cell::Open);
    for y in 0..prev.size {
        for x in 0..prev.size {
            if prev.wall_neighbours(x, y) > wall_count_threshold {
                next.set(x, y, Cell::Wall);
            }
        }
    }
    next
}

pub fn seed_grid<R: Rng>(size: usize, wall_probability: f32, rng: &mut R) -> Grid {
    let mut grid = Grid::filled(size, Cell::Wall);
    let p = wall_probability.clamp(0.0, 1.0) as f64;
    for y in 1..size.saturating_sub(1) {
        for x in 1..size.saturating_sub(1) {
            let cell = if rng.gen_bool(p) { Cell::Wall } else { Cell::Open };
            grid.set(x, y, cell);
        }
    }
    grid
}

fn generate_once<R: Rng>(params: &GridParams, rng: &mut R) -> Grid {
    let mut grid = seed_grid(params.size, params.wall_probability, rng);
    for _ in 0..params.smoothing_passes {
        grid = smooth_step(&grid, params.wall_count_threshold);
    }
    grid.seal_border();
    grid
}

pub fn generate<R: Rng>(params: &GridParams, rng: &mut R) -> Result<Grid> {
    params.validate()?;
    for attempt in 1..=params.max_attempts {
        let grid = generate_once(params, rng);
        let ratio = grid.open_ratio();
        if ratio >= params.min_open_ratio {
            info!(attempt, ratio, size = params.size, "grid accepted");
            return Ok(grid);
        }
        debug!(attempt, ratio, "grid rejected");
        if attempt == 100 {
            warn!(
                min_open_ratio = params.min_open_ratio,
                "grid generation slow to converge, check wall probability and threshold"
            );
        }
    }
    Err(Error::GridGeneration {
        attempts: params.max_attempts,
        min_open_ratio: params.min_open_ratio,
    })
}
