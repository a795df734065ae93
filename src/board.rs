use std::fs;

use anyhow::{bail, Context};
use rand::prelude::*;

use crate::common::{Position, SearchError};

/// Terrain tag of one board cell, mapped from the board-file characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terrain {
    Walkable,
    Wall,
    Water,
    Mountain,
    Forest,
    Grassland,
    Road,
    Start,
    Goal,
}

impl Terrain {
    pub fn from_char(ch: char) -> Option<Terrain> {
        match ch {
            '.' => Some(Terrain::Walkable),
            '#' => Some(Terrain::Wall),
            'w' => Some(Terrain::Water),
            'm' => Some(Terrain::Mountain),
            'f' => Some(Terrain::Forest),
            'g' => Some(Terrain::Grassland),
            'r' => Some(Terrain::Road),
            'A' => Some(Terrain::Start),
            'B' => Some(Terrain::Goal),
            _ => None,
        }
    }

    /// Cost of stepping onto a cell of this terrain. Walls are impassable,
    /// so their cost is never charged.
    pub fn cost(self) -> usize {
        match self {
            Terrain::Walkable => 1,
            Terrain::Wall => 0,
            Terrain::Water => 100,
            Terrain::Mountain => 50,
            Terrain::Forest => 10,
            Terrain::Grassland => 5,
            Terrain::Road => 1,
            Terrain::Start => 0,
            Terrain::Goal => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub terrain: Terrain,
    pub cost: usize,
}

impl Cell {
    fn new(terrain: Terrain) -> Self {
        Cell {
            terrain,
            cost: terrain.cost(),
        }
    }

    pub fn is_passable(&self) -> bool {
        self.terrain != Terrain::Wall
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    pub grid: Vec<Vec<Cell>>,
    pub start: Position,
    pub goal: Position,
}

impl Board {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("reading board {path}"))?;
        Self::from_str(&text).with_context(|| format!("parsing board {path}"))
    }

    pub fn from_str(text: &str) -> anyhow::Result<Self> {
        let mut grid: Vec<Vec<Cell>> = Vec::new();
        let mut start = None;
        let mut goal = None;

        for (y, line) in text.lines().enumerate() {
            let mut row = Vec::with_capacity(line.len());
            for (x, ch) in line.chars().enumerate() {
                let terrain = Terrain::from_char(ch)
                    .with_context(|| format!("unknown board character {ch:?} at ({x}, {y})"))?;
                match terrain {
                    Terrain::Start => {
                        if start.replace((x, y)).is_some() {
                            bail!("board has more than one start cell");
                        }
                    }
                    Terrain::Goal => {
                        if goal.replace((x, y)).is_some() {
                            bail!("board has more than one goal cell");
                        }
                    }
                    _ => {}
                }
                row.push(Cell::new(terrain));
            }
            if !grid.is_empty() && row.len() != grid[0].len() {
                bail!(
                    "row {y} has width {}, expected {}",
                    row.len(),
                    grid[0].len()
                );
            }
            grid.push(row);
        }

        let height = grid.len();
        let width = grid.first().map_or(0, |row| row.len());
        if width == 0 || height == 0 {
            bail!("board must be at least 1x1");
        }

        let start = start.context("board has no start cell ('A')")?;
        // A 1x1 board may hold only the start; then start and goal coincide.
        let goal = match goal {
            Some(goal) => goal,
            None if width * height == 1 => start,
            None => bail!("board has no goal cell ('B')"),
        };

        Ok(Board {
            width,
            height,
            grid,
            start,
            goal,
        })
    }

    /// Generate a random terrain board with start and goal on distinct
    /// passable cells. Deterministic for a given seeded rng.
    pub fn random<R: Rng>(
        width: usize,
        height: usize,
        wall_ratio: f64,
        rng: &mut R,
    ) -> anyhow::Result<Self> {
        if width * height < 2 {
            bail!("random board needs at least two cells");
        }

        let mut grid = Vec::with_capacity(height);
        for _ in 0..height {
            let mut row = Vec::with_capacity(width);
            for _ in 0..width {
                let terrain = if rng.gen_bool(wall_ratio) {
                    Terrain::Wall
                } else {
                    match rng.gen_range(0..10) {
                        0..=4 => Terrain::Walkable,
                        5 => Terrain::Water,
                        6 => Terrain::Mountain,
                        7 => Terrain::Forest,
                        8 => Terrain::Grassland,
                        _ => Terrain::Road,
                    }
                };
                row.push(Cell::new(terrain));
            }
            grid.push(row);
        }

        let mut pick = || (rng.gen_range(0..width), rng.gen_range(0..height));
        let start = pick();
        let mut goal = pick();
        while goal == start {
            goal = pick();
        }
        grid[start.1][start.0] = Cell::new(Terrain::Start);
        grid[goal.1][goal.0] = Cell::new(Terrain::Goal);

        Ok(Board {
            width,
            height,
            grid,
            start,
            goal,
        })
    }

    pub fn in_bounds(&self, (x, y): Position) -> bool {
        x < self.width && y < self.height
    }

    pub fn cell(&self, (x, y): Position) -> Result<&Cell, SearchError> {
        if !self.in_bounds((x, y)) {
            return Err(SearchError::OutOfBounds { x, y });
        }
        Ok(&self.grid[y][x])
    }

    pub fn is_walkable(&self, (x, y): Position) -> bool {
        self.grid[y][x].is_passable()
    }

    /// Passable in-bounds neighbors in the canonical right, down, left, up
    /// expansion order.
    pub fn neighbors(&self, (x, y): Position) -> Vec<Position> {
        let directions = [(1, 0), (0, 1), (-1, 0), (0, -1)];
        let mut neighbors = Vec::new();

        for &(dx, dy) in &directions {
            let new_x = x as i64 + dx;
            let new_y = y as i64 + dy;
            if new_x >= 0
                && new_y >= 0
                && new_x < self.width as i64
                && new_y < self.height as i64
                && self.grid[new_y as usize][new_x as usize].is_passable()
            {
                neighbors.push((new_x as usize, new_y as usize));
            }
        }

        neighbors
    }
}
