use maze_chase::level::REFERENCE;
use maze_chase::maze::Maze;
use maze_chase::{Config, Dir, FrameInput, Session, SessionState};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn dir_strategy() -> impl Strategy<Value = Dir> {
    prop_oneof![
        Just(Dir::Up),
        Just(Dir::Down),
        Just(Dir::Left),
        Just(Dir::Right),
    ]
}

fn grid_strategy() -> impl Strategy<Value = Vec<Vec<bool>>> {
    (1usize..8, 1usize..8).prop_flat_map(|(w, h)| {
        prop::collection::vec(prop::collection::vec(any::<bool>(), w), h)
    })
}

fn open_neighbours(walls: &[Vec<bool>], col: usize, row: usize) -> usize {
    let (c, r) = (col as isize, row as isize);
    [(c - 1, r), (c + 1, r), (c, r - 1), (c, r + 1)]
        .into_iter()
        .filter(|&(nc, nr)| {
            nc >= 0
                && nr >= 0
                && walls
                    .get(nr as usize)
                    .and_then(|line| line.get(nc as usize))
                    .is_some_and(|wall| !wall)
        })
        .count()
}

proptest! {
    #[test]
    fn junctions_are_cells_with_three_exits(walls in grid_strategy()) {
        let layout: Vec<String> = walls
            .iter()
            .map(|line| line.iter().map(|w| if *w { '#' } else { ' ' }).collect())
            .collect();
        let layout: Vec<&str> = layout.iter().map(String::as_str).collect();
        let mut rng = StdRng::seed_from_u64(0);
        let maze = Maze::parse(&layout, 24, 1, &mut rng).unwrap();

        for (row, line) in walls.iter().enumerate() {
            for (col, wall) in line.iter().enumerate() {
                let expected = !wall && open_neighbours(&walls, col, row) >= 3;
                let origin = (col as i32 * 24, row as i32 * 24);
                prop_assert_eq!(maze.is_junction(origin), expected);
            }
        }
    }

    #[test]
    fn score_never_drops_and_endings_stick(
        moves in prop::collection::vec(prop::option::of(dir_strategy()), 1..400),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut session = Session::new(&REFERENCE, Config::default(), &mut rng).unwrap();
        let mut score = 0;
        let mut lives = session.lives();
        let mut ended: Option<SessionState> = None;

        for (t, direction) in moves.into_iter().enumerate() {
            session.tick(&FrameInput { direction, now_ms: t as u64 * 16 }, &mut rng);
            prop_assert!(session.score() >= score);
            prop_assert!(session.lives() <= lives);
            score = session.score();
            lives = session.lives();

            match ended {
                Some(state) => {
                    prop_assert_eq!(session.current_state(), state);
                }
                None if session.current_state() != SessionState::Playing => {
                    ended = Some(session.current_state());
                }
                None => {}
            }
        }
    }

    #[test]
    fn agents_never_enter_walls(
        moves in prop::collection::vec(prop::option::of(dir_strategy()), 1..300),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut session = Session::new(&REFERENCE, Config::default(), &mut rng).unwrap();
        for (t, direction) in moves.into_iter().enumerate() {
            session.tick(&FrameInput { direction, now_ms: t as u64 * 16 }, &mut rng);
            let walls = session.maze().walls();
            prop_assert!(!walls.iter().any(|w| w.overlaps(&session.player().rect)));
            for ghost in session.ghosts() {
                prop_assert!(!walls.iter().any(|w| w.overlaps(&ghost.rect)));
            }
        }
    }
}
