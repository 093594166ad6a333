//! Game state and core simulation types
//!
//! Everything a game needs to resolve turns lives here: the board, the
//! palette, announced spawns, counters and the seeded RNG.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::color::{BubbleColor, Palette};
use super::grid::Board;
use crate::settings::Settings;

/// Current phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a bubble to be selected
    Idle,
    /// A bubble is selected, waiting for a destination
    Selected,
    /// A move was accepted and the turn is being resolved
    Resolving,
    /// Board filled up; inputs are ignored until restart
    Finished,
}

/// Notifications produced while resolving inputs, drained by the front-end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// New turn number
    TurnChanged(u32),
    /// New total score
    ScoreChanged(u32),
    /// A bubble travelled along `path` (inclusive of both ends)
    BubbleMoved {
        from: IVec2,
        to: IVec2,
        path: Vec<IVec2>,
    },
    /// Announced bubbles appeared at these cells
    BubblesSpawned(Vec<IVec2>),
    /// Cells cleared by completed lines (row-major order)
    BubblesCleared(Vec<IVec2>),
    /// A new color joined the palette
    ColorUnlocked(BubbleColor),
    /// The board is full; fired once per game
    GameFinished,
}

/// A spawn announced one turn ahead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingBubble {
    pub position: IVec2,
    pub color: BubbleColor,
}

impl PendingBubble {
    pub fn new(position: IVec2, color: BubbleColor) -> Self {
        Self { position, color }
    }
}

/// Complete state of one game
#[derive(Debug, Clone)]
pub struct GameState {
    /// Rules this game was started with
    pub settings: Settings,
    /// Seed the RNG was created from (0 when injected)
    pub seed: u64,
    /// Cell storage
    pub board: Board,
    /// Colors eligible for spawning
    pub palette: Palette,
    /// Bubbles that spawn at the end of the current turn
    pub pending: Vec<PendingBubble>,
    /// Currently selected bubble
    pub selected: Option<IVec2>,
    /// Destination of the move that ended the turn
    pub last_move_destination: Option<IVec2>,
    /// Score
    pub score: u32,
    /// Turn number (1-based)
    pub turn: u32,
    /// Points left until the next color unlock
    pub score_to_next_color: i64,
    /// Current phase
    pub phase: GamePhase,
    /// Shared generator for spawn positions and colors
    pub rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create an empty game (no bubbles yet) with a seeded RNG.
    ///
    /// Call [`crate::sim::restart`] to deal the opening bubbles.
    pub fn new(settings: Settings, seed: u64) -> Self {
        let mut state = Self::with_rng(settings, Pcg32::seed_from_u64(seed));
        state.seed = seed;
        state
    }

    /// Create an empty game driven by an injected RNG
    pub fn with_rng(settings: Settings, rng: Pcg32) -> Self {
        let board = Board::new(settings.width, settings.height);
        let palette = Self::initial_palette(&settings);
        let score_to_next_color = i64::from(settings.points_per_additional_color);
        Self {
            settings,
            seed: 0,
            board,
            palette,
            pending: Vec::new(),
            selected: None,
            last_move_destination: None,
            score: 0,
            turn: 1,
            score_to_next_color,
            phase: GamePhase::Idle,
            rng,
            events: Vec::new(),
        }
    }

    /// Palette as configured at game start
    pub fn initial_palette(settings: &Settings) -> Palette {
        Palette::new(
            &settings.default_colors,
            &settings.additional_colors,
            settings.max_bubble_colors as usize,
        )
    }

    pub fn is_finished(&self) -> bool {
        self.phase == GamePhase::Finished
    }

    /// Occupied count at which the game ends
    pub fn finish_threshold(&self) -> usize {
        self.board.len().saturating_sub(1)
    }

    /// Queue an event for the front-end
    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events produced since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
