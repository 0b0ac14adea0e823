//! Session controller
//!
//! Owns the maze, the player and the ghosts, and advances them one frame at a
//! time in a fixed order: input, player, ghosts, collisions, countdown.

use rand::Rng;

use crate::collision::{self, Event};
use crate::components::{Dir, GhostColor, Rect, SpawnPoint};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::ghost::Ghost;
use crate::input::FrameInput;
use crate::level::{Level, PenRegion};
use crate::maze::{Maze, PowerPellet};
use crate::motion::hits_wall;
use crate::player::Player;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Playing,
    Lost,
    Won,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerView {
    pub rect: Rect,
    pub facing: Option<Dir>,
    pub power_mode: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GhostView {
    pub rect: Rect,
    pub color: GhostColor,
    pub visible: bool,
    pub vulnerable: bool,
}

/// Read-only view of everything a front-end draws in one frame.
#[derive(Clone, Debug)]
pub struct Snapshot<'a> {
    pub tile_size: i32,
    pub columns: usize,
    pub rows: usize,
    pub walls: &'a [Rect],
    pub dots: &'a [Rect],
    pub power_pellets: &'a [PowerPellet],
    pub player: PlayerView,
    pub ghosts: Vec<GhostView>,
    pub score: u32,
    pub lives: u32,
    pub time_left: u32,
    pub state: SessionState,
}

pub struct Session {
    config: Config,
    maze: Maze,
    player_spawn: (i32, i32),
    player: Player,
    ghosts: Vec<Ghost>,
    state: SessionState,
    /// Clock reading at the first player move.
    started_at_ms: Option<u64>,
    time_left: u32,
}

impl Session {
    pub fn new<R: Rng + ?Sized>(level: &Level<'_>, config: Config, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let tile = config.tile_size;
        let maze = Maze::parse(level.layout, tile, config.pellet_variants, rng)?;

        let player_spawn = level.player_spawn.to_pixels(tile);
        let player = Player::new(player_spawn, tile, config.player_speed, config.starting_lives);

        let mut ghosts = Vec::with_capacity(level.ghosts.len());
        for spawn in level.ghosts {
            let home = place_ghost(&maze, level.pen, spawn.at)?;
            ghosts.push(Ghost::new(home, tile, config.ghost_speed, spawn.color));
        }

        log::info!(
            "New session: {}x{} maze, {} junctions, {} ghosts",
            maze.columns(),
            maze.rows(),
            maze.junction_count(),
            ghosts.len()
        );

        Ok(Self {
            time_left: config.game_time_secs,
            config,
            maze,
            player_spawn,
            player,
            ghosts,
            state: SessionState::Playing,
            started_at_ms: None,
        })
    }

    /// Ghosts move and the clock runs only once the player has moved.
    pub fn is_underway(&self) -> bool {
        self.player.has_moved()
    }

    pub fn tick<R: Rng + ?Sized>(&mut self, input: &FrameInput, rng: &mut R) -> Vec<Event> {
        let mut events = Vec::new();
        if self.state != SessionState::Playing {
            return events;
        }

        if let Some(dir) = input.direction {
            self.player.request(dir);
        }
        self.player.move_in(self.maze.walls());

        let underway = self.is_underway();
        if underway && self.started_at_ms.is_none() {
            self.started_at_ms = Some(input.now_ms);
            log::debug!("Clock started at {} ms", input.now_ms);
        }

        let power_mode = self.player.power_mode;
        for ghost in &mut self.ghosts {
            ghost.update(&self.maze, power_mode, underway, &self.config, rng);
        }

        if let Some(end) = collision::resolve(
            &mut self.player,
            &mut self.ghosts,
            &mut self.maze,
            &self.config,
            &mut events,
        ) {
            self.finish(end);
            return events;
        }

        self.update_clock(input.now_ms);
        if self.time_left == 0 {
            events.push(Event::TimeExpired);
            events.push(Event::Lost);
            self.finish(SessionState::Lost);
        }
        events
    }

    fn update_clock(&mut self, now_ms: u64) {
        if let Some(start) = self.started_at_ms {
            let elapsed_secs = now_ms.saturating_sub(start) / 1000;
            let elapsed_secs = u32::try_from(elapsed_secs).unwrap_or(u32::MAX);
            self.time_left = self.config.game_time_secs.saturating_sub(elapsed_secs);
        }
    }

    fn finish(&mut self, state: SessionState) {
        self.state = state;
        match state {
            SessionState::Won => log::info!("Maze cleared with score {}", self.player.score),
            SessionState::Lost => log::info!(
                "Game over with score {} ({} lives, {}s left)",
                self.player.score,
                self.player.lives,
                self.time_left
            ),
            SessionState::Playing => {}
        }
    }

    /// Start over: collectibles, positions, score, lives and clock.
    pub fn reset(&mut self) {
        self.maze.restock();
        self.player = Player::new(
            self.player_spawn,
            self.config.tile_size,
            self.config.player_speed,
            self.config.starting_lives,
        );
        for ghost in &mut self.ghosts {
            *ghost = Ghost::new(ghost.home(), self.config.tile_size, ghost.speed, ghost.color);
        }
        self.state = SessionState::Playing;
        self.started_at_ms = None;
        self.time_left = self.config.game_time_secs;
        log::info!("Session reset");
    }

    pub fn current_state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.player.score
    }

    pub fn lives(&self) -> u32 {
        self.player.lives
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            tile_size: self.maze.tile_size(),
            columns: self.maze.columns(),
            rows: self.maze.rows(),
            walls: self.maze.walls(),
            dots: self.maze.dots(),
            power_pellets: self.maze.power_pellets(),
            player: PlayerView {
                rect: self.player.rect,
                facing: self.player.direction,
                power_mode: self.player.power_mode,
            },
            ghosts: self
                .ghosts
                .iter()
                .map(|ghost| GhostView {
                    rect: ghost.rect,
                    color: ghost.color,
                    visible: ghost.visible,
                    vulnerable: ghost.is_vulnerable(),
                })
                .collect(),
            score: self.player.score,
            lives: self.player.lives,
            time_left: self.time_left,
            state: self.state,
        }
    }
}

/// Where a ghost actually starts. A spawn inside a wall moves to the first
/// free cell of the pen region, or failing that the nearest free cell anywhere.
fn place_ghost(maze: &Maze, pen: PenRegion, spawn: SpawnPoint) -> Result<(i32, i32)> {
    let tile = maze.tile_size();
    let wanted = spawn.to_pixels(tile);
    let fits = |x: i32, y: i32| !hits_wall(&Rect::new(x, y, tile, tile), maze.walls());
    if fits(wanted.0, wanted.1) {
        return Ok(wanted);
    }

    let rows = maze.rows() as i32;
    let columns = maze.columns() as i32;
    for row in pen.row0.max(0)..rows {
        for col in pen.col0.max(0)..=pen.col1.min(columns - 1) {
            let (x, y) = (col * tile, row * tile);
            if fits(x, y) {
                log::warn!("Ghost spawn {wanted:?} is inside a wall, moved to pen cell ({col}, {row})");
                return Ok((x, y));
            }
        }
    }

    let (want_col, want_row) = (wanted.0 / tile, wanted.1 / tile);
    let nearest = (0..rows)
        .flat_map(|row| (0..columns).map(move |col| (col, row)))
        .filter(|&(col, row)| fits(col * tile, row * tile))
        .min_by_key(|&(col, row)| (col - want_col).abs() + (row - want_row).abs());
    match nearest {
        Some((col, row)) => {
            log::warn!("Ghost spawn {wanted:?} is inside a wall, moved to cell ({col}, {row})");
            Ok((col * tile, row * tile))
        }
        None => Err(Error::NoFreeCell),
    }
}

/// Countdown as shown in the HUD, `m:ss`.
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
