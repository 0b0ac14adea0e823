use crate::components::{GhostColor, SpawnPoint};

/// Region scanned, row-major, when a ghost spawn turns out to be inside a wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PenRegion {
    pub col0: i32,
    pub col1: i32,
    /// First row scanned; the scan continues to the bottom of the maze.
    pub row0: i32,
}

#[derive(Clone, Copy, Debug)]
pub struct GhostSpawn {
    pub at: SpawnPoint,
    pub color: GhostColor,
}

/// A playable layout together with where everyone starts.
#[derive(Clone, Debug)]
pub struct Level<'a> {
    pub layout: &'a [&'a str],
    pub player_spawn: SpawnPoint,
    pub ghosts: &'a [GhostSpawn],
    pub pen: PenRegion,
}

const REFERENCE_LAYOUT: [&str; 25] = [
    "############################",
    "#o...........##...........o#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.##### ## #####.######",
    "     #.##### ## #####.#     ",
    "     #.##          ##.#     ",
    "     #.## ##----## ##.#     ",
    "######.## #      # ##.######",
    "#     .   #      #   .     #",
    "######.## ###--### ##.######",
    "     #.##          ##.#     ",
    "     #.## ######## ##.#     ",
    "######.## ######## ##.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#...##....o.........#....#.#",
    "###.##.##.########.##.##.###",
    "#......##....##....##......#",
    "#.##########.##.##########.#",
    "#o........................o#",
    "############################",
];

// Three across the top of the pen, two straddling cells on the row below.
const REFERENCE_GHOSTS: [GhostSpawn; 5] = [
    GhostSpawn {
        at: SpawnPoint::cell(12, 11),
        color: GhostColor::Blue,
    },
    GhostSpawn {
        at: SpawnPoint::cell(13, 11),
        color: GhostColor::Black,
    },
    GhostSpawn {
        at: SpawnPoint::cell(14, 11),
        color: GhostColor::Red,
    },
    GhostSpawn {
        at: SpawnPoint::halves(25, 24),
        color: GhostColor::Yellow,
    },
    GhostSpawn {
        at: SpawnPoint::halves(27, 24),
        color: GhostColor::Green,
    },
];

pub const REFERENCE: Level<'static> = Level {
    layout: &REFERENCE_LAYOUT,
    player_spawn: SpawnPoint::cell(13, 23),
    ghosts: &REFERENCE_GHOSTS,
    pen: PenRegion {
        col0: 12,
        col1: 15,
        row0: 11,
    },
};
