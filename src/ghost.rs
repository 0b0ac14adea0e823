use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::{Dir, GhostColor, Rect};
use crate::config::Config;
use crate::maze::Maze;
use crate::motion::legal_dirs;

#[derive(Clone, Debug)]
pub struct Ghost {
    pub rect: Rect,
    home: (i32, i32),
    pub color: GhostColor,
    pub direction: Option<Dir>,
    pub speed: i32,
    pub visible: bool,
    blink_timer: u32,
    /// Mirrors the player's power mode as of the last update.
    pub power_mode: bool,
}

impl Ghost {
    pub fn new(home: (i32, i32), size: i32, speed: i32, color: GhostColor) -> Self {
        Self {
            rect: Rect::new(home.0, home.1, size, size),
            home,
            color,
            direction: None,
            speed,
            visible: true,
            blink_timer: 0,
            power_mode: false,
        }
    }

    pub fn home(&self) -> (i32, i32) {
        self.home
    }

    /// Frightened ghosts blink and can be eaten.
    pub fn is_vulnerable(&self) -> bool {
        self.power_mode
    }

    pub fn update<R: Rng + ?Sized>(
        &mut self,
        maze: &Maze,
        power_mode: bool,
        underway: bool,
        config: &Config,
        rng: &mut R,
    ) {
        self.power_mode = power_mode;
        if underway {
            self.step(maze, config, rng);
        }
        self.blink(config);
    }

    fn step<R: Rng + ?Sized>(&mut self, maze: &Maze, config: &Config, rng: &mut R) {
        let legal = legal_dirs(&self.rect, self.speed, maze.walls());
        let at_junction = maze.is_junction(self.rect.origin());
        let persistence = if at_junction {
            config.junction_persistence
        } else {
            config.corridor_persistence
        };

        self.direction = choose_direction(self.direction, &legal, at_junction, persistence, rng);
        let Some(dir) = self.direction else {
            return;
        };
        self.rect = self.rect.shifted(dir, self.speed);
    }

    fn blink(&mut self, config: &Config) {
        if self.power_mode {
            self.blink_timer = (self.blink_timer + 1) % config.blink_period;
            self.visible = self.blink_timer < config.blink_visible_ticks;
        } else {
            self.visible = true;
        }
    }

    pub fn reset_position(&mut self) {
        self.rect.x = self.home.0;
        self.rect.y = self.home.1;
        self.direction = None;
    }
}

/// Pick the next heading for a ghost currently heading `previous`.
///
/// In a corridor the ghost keeps going with probability `persistence` and
/// otherwise draws from every legal direction, reversals included. At a
/// junction a failed persistence roll always turns away from `previous`
/// when there is anywhere else to go.
pub fn choose_direction<R: Rng + ?Sized>(
    previous: Option<Dir>,
    legal: &[Dir],
    at_junction: bool,
    persistence: f64,
    rng: &mut R,
) -> Option<Dir> {
    if legal.is_empty() {
        return None;
    }
    let keep = previous.filter(|dir| legal.contains(dir));
    if let Some(dir) = keep {
        if rng.gen_bool(persistence) {
            return Some(dir);
        }
    }

    if at_junction {
        let others: Vec<Dir> = legal
            .iter()
            .copied()
            .filter(|dir| Some(*dir) != previous)
            .collect();
        others.choose(rng).copied().or(previous)
    } else {
        legal.choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const LEGAL: [Dir; 3] = [Dir::Right, Dir::Left, Dir::Down];
    // High bits fail every persistence roll, low bits pick index 0.
    const FAILING_ROLL: u64 = 0xFFFF_FFFF_0000_0000;

    fn keep_rate(at_junction: bool, persistence: f64) -> f64 {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let trials = 10_000;
        let kept = (0..trials)
            .filter(|_| {
                choose_direction(Some(Dir::Right), &LEGAL, at_junction, persistence, &mut rng)
                    == Some(Dir::Right)
            })
            .count();
        kept as f64 / trials as f64
    }

    #[test]
    fn junction_keeps_heading_about_seventy_percent() {
        let rate = keep_rate(true, 0.70);
        assert!((rate - 0.70).abs() < 0.03, "kept {rate}");
    }

    #[test]
    fn corridor_keeps_heading_about_ninety_nine_percent() {
        // A failed roll can still redraw the same heading, one time in three.
        let rate = keep_rate(false, 0.99);
        assert!(rate > 0.98, "kept {rate}");
    }

    #[test]
    fn junction_turn_never_repeats_previous() {
        let mut rng = StepRng::new(FAILING_ROLL, 0);
        for _ in 0..10 {
            let dir = choose_direction(Some(Dir::Right), &LEGAL, true, 0.7, &mut rng);
            assert_ne!(dir, Some(Dir::Right));
            assert!(dir.is_some());
        }
    }

    #[test]
    fn junction_falls_back_to_previous_when_it_is_the_only_exit() {
        let mut rng = StepRng::new(FAILING_ROLL, 0);
        let dir = choose_direction(Some(Dir::Up), &[Dir::Up], true, 0.0, &mut rng);
        assert_eq!(dir, Some(Dir::Up));
    }

    #[test]
    fn fresh_ghost_picks_any_legal_direction() {
        let mut rng = StepRng::new(0, 0);
        assert_eq!(
            choose_direction(None, &LEGAL, false, 0.99, &mut rng),
            Some(Dir::Right)
        );
        assert_eq!(choose_direction(None, &LEGAL, true, 0.7, &mut rng), Some(Dir::Right));
    }

    #[test]
    fn walled_in_ghost_holds_still() {
        let mut rng = StepRng::new(0, 0);
        assert_eq!(choose_direction(Some(Dir::Left), &[], true, 0.7, &mut rng), None);
    }

    #[test]
    fn walled_in_ghost_does_not_move() {
        let mut rng = StdRng::seed_from_u64(3);
        let maze = Maze::parse(&["###", "# #", "###"], 24, 1, &mut rng).unwrap();
        let mut ghost = Ghost::new((24, 24), 24, 3, GhostColor::Red);
        ghost.direction = Some(Dir::Up);
        ghost.update(&maze, false, true, &Config::default(), &mut rng);
        assert_eq!(ghost.rect.origin(), (24, 24));
        assert_eq!(ghost.direction, None);
    }

    #[test]
    fn frozen_until_underway() {
        let mut rng = StdRng::seed_from_u64(3);
        let maze = Maze::parse(&["#####", "#   #", "#####"], 24, 1, &mut rng).unwrap();
        let mut ghost = Ghost::new((24, 24), 24, 3, GhostColor::Blue);
        ghost.update(&maze, false, false, &Config::default(), &mut rng);
        assert_eq!(ghost.rect.origin(), (24, 24));
        ghost.update(&maze, false, true, &Config::default(), &mut rng);
        assert_eq!(ghost.rect.origin(), (27, 24));
        assert_eq!(ghost.direction, Some(Dir::Right));
    }

    #[test]
    fn crossroads_keeps_heading_at_junction_rate() {
        let mut rng = StdRng::seed_from_u64(0xc055);
        let maze = Maze::parse(
            &["#####", "## ##", "#   #", "## ##", "#####"],
            24,
            1,
            &mut rng,
        )
        .unwrap();
        let centre = (48, 48);
        assert!(maze.is_junction(centre));

        let config = Config::default();
        let trials = 10_000;
        let mut kept = 0;
        for _ in 0..trials {
            let mut ghost = Ghost::new(centre, 24, 3, GhostColor::Yellow);
            ghost.direction = Some(Dir::Right);
            ghost.update(&maze, false, true, &config, &mut rng);
            let dir = ghost.direction.unwrap();
            assert_eq!(ghost.rect.origin(), Rect::new(48, 48, 24, 24).shifted(dir, 3).origin());
            if dir == Dir::Right {
                kept += 1;
            }
        }
        let rate = kept as f64 / trials as f64;
        assert!((rate - config.junction_persistence).abs() < 0.03, "kept {rate}");
    }

    #[test]
    fn blinks_only_in_power_mode() {
        let mut rng = StdRng::seed_from_u64(3);
        let maze = Maze::parse(&["###", "# #", "###"], 24, 1, &mut rng).unwrap();
        let config = Config::default();
        let mut ghost = Ghost::new((24, 24), 24, 3, GhostColor::Green);

        let mut hidden = 0;
        for _ in 0..config.blink_period {
            ghost.update(&maze, true, false, &config, &mut rng);
            assert!(ghost.is_vulnerable());
            if !ghost.visible {
                hidden += 1;
            }
        }
        assert_eq!(hidden, config.blink_period - config.blink_visible_ticks);

        ghost.update(&maze, false, false, &config, &mut rng);
        assert!(ghost.visible);
        assert!(!ghost.is_vulnerable());
    }

    #[test]
    fn reset_returns_home_and_stops() {
        let mut ghost = Ghost::new((48, 24), 24, 3, GhostColor::Black);
        ghost.rect = ghost.rect.shifted(Dir::Left, 9);
        ghost.direction = Some(Dir::Left);
        ghost.reset_position();
        assert_eq!(ghost.rect.origin(), (48, 24));
        assert_eq!(ghost.direction, None);
    }
}
