//! Deterministic rules engine
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (row-major cells, fixed neighbour order)
//! - No rendering or platform dependencies

pub mod color;
pub mod grid;
pub mod lines;
pub mod path;
pub mod state;
pub mod turn;

pub use color::{BubbleColor, Palette, generate_distinct};
pub use grid::{Board, Cell};
pub use lines::{LINE_DIRECTIONS, collect_lines, run_through};
pub use path::{find_path, reachable_from};
pub use state::{GameEvent, GamePhase, GameState, PendingBubble};
pub use turn::{
    TurnInput, apply, attempt_move, click, idle_move, mark_pending, play_idle_turn, restart,
    select_bubble,
};
