#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    /// Candidate order used when an agent enumerates its options.
    pub const ALL: [Dir; 4] = [Dir::Right, Dir::Left, Dir::Down, Dir::Up];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }
}

/// Axis-aligned box in pixel space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict overlap: boxes that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    pub fn shifted(&self, dir: Dir, distance: i32) -> Rect {
        let (dx, dy) = dir.delta();
        Rect {
            x: self.x + dx * distance,
            y: self.y + dy * distance,
            ..*self
        }
    }

    pub fn origin(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }
}

/// Spawn location in half-tile units, so agents can start between two cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnPoint {
    pub half_col: i32,
    pub half_row: i32,
}

impl SpawnPoint {
    pub const fn cell(col: i32, row: i32) -> Self {
        Self {
            half_col: col * 2,
            half_row: row * 2,
        }
    }

    pub const fn halves(half_col: i32, half_row: i32) -> Self {
        Self { half_col, half_row }
    }

    pub fn to_pixels(self, tile: i32) -> (i32, i32) {
        (self.half_col * tile / 2, self.half_row * tile / 2)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GhostColor {
    Blue,
    Black,
    Red,
    Yellow,
    Green,
}
