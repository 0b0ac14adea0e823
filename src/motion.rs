use crate::components::{Dir, Rect};

/// Whether `body` can take one step of `speed` pixels in `dir` without
/// touching a wall. Player and ghosts share this test.
pub fn can_move(body: &Rect, dir: Dir, speed: i32, walls: &[Rect]) -> bool {
    !hits_wall(&body.shifted(dir, speed), walls)
}

pub fn hits_wall(body: &Rect, walls: &[Rect]) -> bool {
    walls.iter().any(|wall| body.overlaps(wall))
}

/// Open directions from `body`, in [`Dir::ALL`] order.
pub fn legal_dirs(body: &Rect, speed: i32, walls: &[Rect]) -> Vec<Dir> {
    Dir::ALL
        .into_iter()
        .filter(|dir| can_move(body, *dir, speed, walls))
        .collect()
}
