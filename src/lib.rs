//! Bubble Lines - a lines-style bubble matching puzzle
//!
//! Core modules:
//! - `sim`: Deterministic rules engine (board, paths, lines, turns)
//! - `settings`: Data-driven game rules

pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{GameEvent, GamePhase, GameState, TurnInput};

/// Default rule values
pub mod consts {
    /// Classic 9x9 board
    pub const DEFAULT_BOARD_WIDTH: u32 = 9;
    pub const DEFAULT_BOARD_HEIGHT: u32 = 9;
    /// Largest board a settings file may ask for
    pub const MAX_BOARD_CELLS: usize = 1 << 20;

    /// Bubbles announced and spawned per turn
    pub const DEFAULT_BUBBLES_SPAWNED_PER_TURN: u32 = 3;
    /// Run length that clears a line
    pub const DEFAULT_BUBBLES_PER_LINE: u32 = 5;

    /// Palette cap
    pub const DEFAULT_MAX_BUBBLE_COLORS: u32 = 9;
    /// Points per unlocked color
    pub const DEFAULT_POINTS_PER_ADDITIONAL_COLOR: u32 = 50;
}
