use std::io::{self, Stdout};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;

use maze_chase::level::REFERENCE;
use maze_chase::render::{self, Renderer};
use maze_chase::{Clock, Config, Dir, FrameInput, HeldKeys, MonotonicClock, Session, SessionState};

const DEFAULT_TICK_MS: u64 = 16;
const DEFAULT_RENDER_FPS: u64 = 120;
/// Terminals report presses, not releases; a key counts as held this long.
const INPUT_HOLD_MS: u64 = 160;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::from_env().context("loading config")?;
    let mut rng = rand::thread_rng();
    let session = Session::new(&REFERENCE, config, &mut rng).context("building session")?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, session);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut Stdout, mut session: Session) -> anyhow::Result<()> {
    let mut rng = rand::thread_rng();
    let clock = MonotonicClock::new();
    let mut renderer = Renderer::new(session.maze().columns(), session.maze().rows());
    let mut last_seen: [Option<Instant>; 4] = [None; 4];
    let mut last_tick = Instant::now();
    let (tick_ms, render_fps) = read_speed_settings();
    let frame_time = Duration::from_micros(1_000_000 / render_fps.max(1));

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    continue;
                }
                let dir = match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('r') if session.current_state() != SessionState::Playing => {
                        session.reset();
                        last_seen = [None; 4];
                        renderer.invalidate();
                        None
                    }
                    KeyCode::Left | KeyCode::Char('h') => Some(Dir::Left),
                    KeyCode::Right | KeyCode::Char('l') => Some(Dir::Right),
                    KeyCode::Up | KeyCode::Char('k') => Some(Dir::Up),
                    KeyCode::Down | KeyCode::Char('j') => Some(Dir::Down),
                    _ => None,
                };
                if let Some(dir) = dir {
                    last_seen[idx_for_dir(dir)] = Some(Instant::now());
                }
            }
        }

        if last_tick.elapsed() >= Duration::from_millis(tick_ms) {
            last_tick = Instant::now();
            let input = FrameInput::new(held_keys(&last_seen), clock.now_ms());
            let events = session.tick(&input, &mut rng);
            if !events.is_empty() {
                log::trace!("{:?}", events);
            }
        }
        render::render(stdout, &session.snapshot(), &mut renderer)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn read_speed_settings() -> (u64, u64) {
    let tick_ms = std::env::var("MAZE_CHASE_TICK_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_TICK_MS);
    let render_fps = std::env::var("MAZE_CHASE_FPS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_RENDER_FPS);
    (tick_ms, render_fps)
}

fn held_keys(last_seen: &[Option<Instant>; 4]) -> HeldKeys {
    let now = Instant::now();
    let mut keys = HeldKeys::default();
    for dir in [Dir::Up, Dir::Down, Dir::Left, Dir::Right] {
        let held = last_seen[idx_for_dir(dir)]
            .is_some_and(|t| now.duration_since(t) <= Duration::from_millis(INPUT_HOLD_MS));
        keys.set(dir, held);
    }
    keys
}

fn idx_for_dir(dir: Dir) -> usize {
    match dir {
        Dir::Up => 0,
        Dir::Down => 1,
        Dir::Left => 2,
        Dir::Right => 3,
    }
}
