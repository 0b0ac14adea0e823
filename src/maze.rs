//! Static maze model
//!
//! A maze is parsed once from a character grid. Walls and junctions never change
//! afterwards; dots and power pellets are eaten in place and only come back
//! through [`Maze::restock`].

use std::collections::HashSet;

use rand::Rng;

use crate::components::Rect;
use crate::error::LayoutError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Empty,
    Pellet,
    Power,
}

impl Tile {
    pub fn from_char(ch: char) -> Option<Tile> {
        match ch {
            '#' => Some(Tile::Wall),
            '.' => Some(Tile::Pellet),
            'o' => Some(Tile::Power),
            // '-' marks the pen door; it is open floor for everyone.
            ' ' | '-' => Some(Tile::Empty),
            _ => None,
        }
    }

    pub fn is_wall(self) -> bool {
        self == Tile::Wall
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowerPellet {
    pub rect: Rect,
    /// Decorative style, purely for drawing.
    pub variant: u32,
}

#[derive(Clone, Debug)]
pub struct Maze {
    grid: Vec<Vec<Tile>>,
    tile: i32,
    walls: Vec<Rect>,
    dots: Vec<Rect>,
    power_pellets: Vec<PowerPellet>,
    initial_dots: Vec<Rect>,
    initial_power_pellets: Vec<PowerPellet>,
    junctions: HashSet<(i32, i32)>,
}

impl Maze {
    pub fn parse<R: Rng + ?Sized>(
        layout: &[&str],
        tile: i32,
        pellet_variants: u32,
        rng: &mut R,
    ) -> Result<Maze, LayoutError> {
        let grid = parse_grid(layout)?;

        let mut walls = Vec::new();
        let mut dots = Vec::new();
        let mut power_pellets = Vec::new();
        for (row, line) in grid.iter().enumerate() {
            for (col, cell) in line.iter().enumerate() {
                let x = col as i32 * tile;
                let y = row as i32 * tile;
                match cell {
                    Tile::Wall => walls.push(Rect::new(x, y, tile, tile)),
                    Tile::Pellet => dots.push(dot_rect(x, y, tile)),
                    Tile::Power => power_pellets.push(PowerPellet {
                        rect: power_rect(x, y, tile),
                        variant: rng.gen_range(0..pellet_variants.max(1)),
                    }),
                    Tile::Empty => {}
                }
            }
        }

        let junctions = classify_junctions(&grid)
            .into_iter()
            .map(|(col, row)| (col as i32 * tile, row as i32 * tile))
            .collect();

        Ok(Maze {
            grid,
            tile,
            walls,
            initial_dots: dots.clone(),
            initial_power_pellets: power_pellets.clone(),
            dots,
            power_pellets,
            junctions,
        })
    }

    pub fn columns(&self) -> usize {
        self.grid.first().map_or(0, Vec::len)
    }

    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    pub fn tile_size(&self) -> i32 {
        self.tile
    }

    pub fn walls(&self) -> &[Rect] {
        &self.walls
    }

    pub fn dots(&self) -> &[Rect] {
        &self.dots
    }

    pub fn power_pellets(&self) -> &[PowerPellet] {
        &self.power_pellets
    }

    /// Exact match against precomputed junction cell origins.
    pub fn is_junction(&self, origin: (i32, i32)) -> bool {
        self.junctions.contains(&origin)
    }

    pub fn junction_count(&self) -> usize {
        self.junctions.len()
    }

    pub fn is_cleared(&self) -> bool {
        self.dots.is_empty() && self.power_pellets.is_empty()
    }

    /// Remove every dot touching `rect`, returning how many were eaten.
    pub fn take_dots(&mut self, rect: &Rect) -> usize {
        let before = self.dots.len();
        self.dots.retain(|dot| !rect.overlaps(dot));
        before - self.dots.len()
    }

    /// Remove every power pellet touching `rect`, returning how many were eaten.
    pub fn take_power_pellets(&mut self, rect: &Rect) -> usize {
        let before = self.power_pellets.len();
        self.power_pellets.retain(|pellet| !rect.overlaps(&pellet.rect));
        before - self.power_pellets.len()
    }

    pub fn restock(&mut self) {
        self.dots = self.initial_dots.clone();
        self.power_pellets = self.initial_power_pellets.clone();
    }
}

fn parse_grid(layout: &[&str]) -> Result<Vec<Vec<Tile>>, LayoutError> {
    let expected = layout.first().ok_or(LayoutError::Empty)?.chars().count();
    if expected == 0 {
        return Err(LayoutError::Empty);
    }
    let mut grid = Vec::with_capacity(layout.len());
    for (row, line) in layout.iter().enumerate() {
        let found = line.chars().count();
        if found != expected {
            return Err(LayoutError::Ragged {
                row,
                expected,
                found,
            });
        }
        let tiles = line
            .chars()
            .enumerate()
            .map(|(col, ch)| Tile::from_char(ch).ok_or(LayoutError::UnknownTile { ch, col, row }))
            .collect::<Result<Vec<_>, _>>()?;
        grid.push(tiles);
    }
    Ok(grid)
}

fn dot_rect(x: i32, y: i32, tile: i32) -> Rect {
    Rect::new(x + tile * 3 / 8, y + tile * 3 / 8, tile / 4, tile / 4)
}

fn power_rect(x: i32, y: i32, tile: i32) -> Rect {
    Rect::new(x + tile / 8, y + tile / 8, tile * 3 / 4, tile * 3 / 4)
}

/// Cells (column, row) with at least three open orthogonal neighbours.
/// Anything outside the grid counts as wall.
pub fn classify_junctions(grid: &[Vec<Tile>]) -> Vec<(usize, usize)> {
    let open = |col: isize, row: isize| -> bool {
        if col < 0 || row < 0 {
            return false;
        }
        grid.get(row as usize)
            .and_then(|line| line.get(col as usize))
            .is_some_and(|tile| !tile.is_wall())
    };

    let mut junctions = Vec::new();
    for (row, line) in grid.iter().enumerate() {
        for (col, tile) in line.iter().enumerate() {
            if tile.is_wall() {
                continue;
            }
            let (c, r) = (col as isize, row as isize);
            let exits = [(c - 1, r), (c + 1, r), (c, r - 1), (c, r + 1)]
                .into_iter()
                .filter(|&(nc, nr)| open(nc, nr))
                .count();
            if exits >= 3 {
                junctions.push((col, row));
            }
        }
    }
    junctions
}
