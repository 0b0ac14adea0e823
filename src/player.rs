use crate::components::{Dir, Rect};
use crate::motion::can_move;

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    spawn: (i32, i32),
    pub direction: Option<Dir>,
    /// Last requested turn, taken as soon as it becomes legal.
    pub next_direction: Option<Dir>,
    pub speed: i32,
    pub score: u32,
    pub lives: u32,
    pub power_mode: bool,
    pub power_timer: u32,
    has_moved: bool,
}

impl Player {
    pub fn new(spawn: (i32, i32), size: i32, speed: i32, lives: u32) -> Self {
        Self {
            rect: Rect::new(spawn.0, spawn.1, size, size),
            spawn,
            direction: None,
            next_direction: None,
            speed,
            score: 0,
            lives,
            power_mode: false,
            power_timer: 0,
            has_moved: false,
        }
    }

    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    pub fn request(&mut self, dir: Dir) {
        self.next_direction = Some(dir);
        self.has_moved = true;
    }

    pub fn move_in(&mut self, walls: &[Rect]) {
        if let Some(next) = self.next_direction {
            if can_move(&self.rect, next, self.speed, walls) {
                self.direction = Some(next);
            }
        }
        if let Some(dir) = self.direction {
            if can_move(&self.rect, dir, self.speed, walls) {
                self.rect = self.rect.shifted(dir, self.speed);
            }
        }
    }

    pub fn start_power_mode(&mut self, ticks: u32) {
        self.power_mode = true;
        self.power_timer = ticks;
    }

    /// Counts power mode down one tick. Returns true on the tick it runs out.
    pub fn tick_power_mode(&mut self) -> bool {
        if !self.power_mode {
            return false;
        }
        self.power_timer = self.power_timer.saturating_sub(1);
        if self.power_timer == 0 {
            self.power_mode = false;
            return true;
        }
        false
    }

    /// Back to the spawn point after losing a life. Score, lives and
    /// power mode are left alone.
    pub fn respawn(&mut self) {
        self.rect.x = self.spawn.0;
        self.rect.y = self.spawn.1;
        self.direction = None;
        self.next_direction = None;
        self.has_moved = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_walls() -> Vec<Rect> {
        // Open 3x3 room at (24..96, 24..96) inside a wall ring.
        let mut walls = Vec::new();
        for i in 0..5 {
            walls.push(Rect::new(i * 24, 0, 24, 24));
            walls.push(Rect::new(i * 24, 96, 24, 24));
            walls.push(Rect::new(0, i * 24, 24, 24));
            walls.push(Rect::new(96, i * 24, 24, 24));
        }
        walls
    }

    #[test]
    fn request_marks_moved_even_when_blocked() {
        let walls = box_walls();
        let mut player = Player::new((24, 24), 24, 3, 3);
        player.request(Dir::Up);
        player.move_in(&walls);
        assert!(player.has_moved());
        assert_eq!(player.rect.origin(), (24, 24));
        assert_eq!(player.direction, None);
    }

    #[test]
    fn pending_turn_waits_until_legal() {
        // Corridor along y = 24, with an opening down at x = 72.
        let mut walls: Vec<Rect> = (0..6).map(|c| Rect::new(c * 24, 0, 24, 24)).collect();
        walls.extend((0..6).filter(|c| *c != 3).map(|c| Rect::new(c * 24, 48, 24, 24)));
        let mut player = Player::new((24, 24), 24, 3, 3);
        player.request(Dir::Right);
        player.move_in(&walls);
        player.request(Dir::Down);

        let mut steps = 0;
        while player.direction != Some(Dir::Down) {
            player.move_in(&walls);
            steps += 1;
            assert!(steps < 100, "never turned");
        }
        // Turned exactly on the opening's origin and moved one step down.
        assert_eq!(player.rect.origin(), (72, 27));
    }

    #[test]
    fn blocked_player_holds_position() {
        let walls = box_walls();
        let mut player = Player::new((72, 24), 24, 3, 3);
        player.request(Dir::Right);
        player.move_in(&walls);
        assert_eq!(player.rect.origin(), (72, 24));
        assert_eq!(player.direction, None);
    }

    #[test]
    fn power_mode_lasts_exactly_its_duration() {
        let mut player = Player::new((24, 24), 24, 3, 3);
        player.start_power_mode(5);
        for _ in 0..4 {
            assert!(!player.tick_power_mode());
            assert!(player.power_mode);
        }
        assert!(player.tick_power_mode());
        assert!(!player.power_mode);
        assert!(!player.tick_power_mode());
    }

    #[test]
    fn respawn_clears_motion_but_not_progress() {
        let walls = box_walls();
        let mut player = Player::new((24, 24), 24, 3, 3);
        player.score = 120;
        player.request(Dir::Right);
        player.move_in(&walls);
        player.respawn();
        assert_eq!(player.rect.origin(), (24, 24));
        assert_eq!(player.direction, None);
        assert!(!player.has_moved());
        assert_eq!(player.score, 120);
    }
}
