//! Per-tick overlap resolution
//!
//! Runs after everyone has moved. Eats what the player touches, settles
//! player/ghost contacts and reports whether the round just ended.

use crate::components::GhostColor;
use crate::config::Config;
use crate::ghost::Ghost;
use crate::maze::Maze;
use crate::player::Player;
use crate::session::SessionState;

/// Something that happened during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    DotEaten,
    PowerPelletEaten,
    PowerExpired,
    GhostEaten { color: GhostColor },
    LifeLost { remaining: u32 },
    TimeExpired,
    Won,
    Lost,
}

/// Returns the state the session ends in, if this tick ended it.
pub fn resolve(
    player: &mut Player,
    ghosts: &mut [Ghost],
    maze: &mut Maze,
    config: &Config,
    events: &mut Vec<Event>,
) -> Option<SessionState> {
    // Count down before pickups so a fresh pellet starts at the full duration.
    if player.tick_power_mode() {
        events.push(Event::PowerExpired);
    }

    let dots = maze.take_dots(&player.rect);
    for _ in 0..dots {
        player.score = player.score.saturating_add(config.dot_score);
        events.push(Event::DotEaten);
    }

    let pellets = maze.take_power_pellets(&player.rect);
    if pellets > 0 {
        for _ in 0..pellets {
            player.score = player.score.saturating_add(config.power_score);
            events.push(Event::PowerPelletEaten);
        }
        player.start_power_mode(config.power_duration_ticks);
        log::debug!("Power mode for {} ticks", config.power_duration_ticks);
    }

    for idx in 0..ghosts.len() {
        if !player.rect.overlaps(&ghosts[idx].rect) {
            continue;
        }
        if player.power_mode {
            let ghost = &mut ghosts[idx];
            ghost.reset_position();
            player.score = player.score.saturating_add(config.ghost_score);
            events.push(Event::GhostEaten { color: ghost.color });
            log::debug!("Ate {:?} ghost", ghost.color);
            continue;
        }

        player.lives = player.lives.saturating_sub(1);
        events.push(Event::LifeLost {
            remaining: player.lives,
        });
        log::debug!("Caught by {:?} ghost, {} lives left", ghosts[idx].color, player.lives);
        if player.lives == 0 {
            events.push(Event::Lost);
            return Some(SessionState::Lost);
        }
        player.respawn();
        for ghost in ghosts.iter_mut() {
            ghost.reset_position();
        }
        // At most one life per tick, even if a home overlaps the spawn.
        break;
    }

    if maze.is_cleared() {
        events.push(Event::Won);
        return Some(SessionState::Won);
    }
    None
}
