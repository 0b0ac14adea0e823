//! Maze chase - a timed arcade maze game
//!
//! Core modules:
//! - `maze`: layout parsing, wall and collectible geometry, junctions
//! - `motion`, `player`, `ghost`: movement rules and the ghost heading policy
//! - `collision`: pickups, ghost contact, power mode, win/loss
//! - `session`: frame ordering, countdown, reset and render snapshots
//!
//! The terminal front-end in `render` only reads [`Snapshot`]s.

pub mod collision;
pub mod components;
pub mod config;
pub mod error;
pub mod ghost;
pub mod input;
pub mod level;
pub mod maze;
pub mod motion;
pub mod player;
pub mod render;
pub mod session;

pub use collision::Event;
pub use components::{Dir, GhostColor, Rect};
pub use config::Config;
pub use error::{ConfigError, Error, LayoutError};
pub use input::{Clock, FrameInput, HeldKeys, MonotonicClock};
pub use session::{format_clock, Session, SessionState, Snapshot};
