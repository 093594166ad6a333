//! Turn resolution
//!
//! Inputs drive the selection state machine. An accepted move resolves the
//! whole turn before returning: spawn announced bubbles, clear lines, score,
//! check for a full board, advance the turn and announce the next spawns.

use std::collections::HashSet;

use glam::IVec2;
use rand::Rng;

use super::lines::collect_lines;
use super::path::{find_path, reachable_from};
use super::state::{GameEvent, GamePhase, GameState, PendingBubble};

/// A single player action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnInput {
    /// Select the bubble at a cell
    Select(IVec2),
    /// Move the selected bubble to a cell
    MoveTo(IVec2),
    /// Front-end click: selects a bubble, or moves to an empty cell
    Click(IVec2),
    /// Start a new game with the same settings
    Restart,
}

/// Apply one input. Returns `true` if it changed the game.
pub fn apply(state: &mut GameState, input: &TurnInput) -> bool {
    match *input {
        TurnInput::Select(pos) => select_bubble(state, pos),
        TurnInput::MoveTo(pos) => attempt_move(state, pos),
        TurnInput::Click(pos) => click(state, pos),
        TurnInput::Restart => {
            restart(state);
            true
        }
    }
}

/// Reset the game and deal the opening bubbles
pub fn restart(state: &mut GameState) {
    state.board.clear();
    state.pending.clear();
    state.selected = None;
    state.last_move_destination = None;
    state.palette = GameState::initial_palette(&state.settings);
    state.score_to_next_color = i64::from(state.settings.points_per_additional_color);
    state.phase = GamePhase::Idle;

    state.score = 0;
    state.push_event(GameEvent::ScoreChanged(0));
    state.turn = 1;
    state.push_event(GameEvent::TurnChanged(1));

    // Deal: announce, spawn right away, then announce the first real turn
    mark_pending(state);
    let mut removal = HashSet::new();
    spawn_pending(state, &mut removal);
    clear_lines(state, removal);
    check_finished(state);
    mark_pending(state);

    log::info!(
        "New game: {}x{} board, seed {}, {} bubbles dealt",
        state.board.width(),
        state.board.height(),
        state.seed,
        state.board.occupied_count()
    );
}

/// Select the bubble at `pos`.
///
/// Ignored when the game is over or the cell holds no bubble.
pub fn select_bubble(state: &mut GameState, pos: IVec2) -> bool {
    if state.is_finished() {
        return false;
    }
    if !state.board.is_valid_position(pos) || !state.board.is_occupied(pos) {
        log::debug!("Ignoring selection of empty cell {}", pos);
        return false;
    }

    state.selected = Some(pos);
    state.phase = GamePhase::Selected;
    true
}

/// Move the selected bubble to `destination` and resolve the turn.
///
/// Returns `false` (keeping the selection) when nothing is selected or no
/// path of empty cells leads there.
pub fn attempt_move(state: &mut GameState, destination: IVec2) -> bool {
    if state.is_finished() {
        return false;
    }
    let Some(origin) = state.selected else {
        return false;
    };
    let Some(color) = state.board.color_at(origin) else {
        state.selected = None;
        state.phase = GamePhase::Idle;
        return false;
    };

    let path = find_path(&state.board, origin, destination);
    if path.is_empty() {
        log::debug!("No path from {} to {}", origin, destination);
        return false;
    }

    state.phase = GamePhase::Resolving;
    state.board.set_occupied(destination, Some(color));
    state.board.set_occupied(origin, None);
    state.selected = None;
    state.last_move_destination = Some(destination);
    log::debug!(
        "Turn {}: moved {} -> {} ({} steps)",
        state.turn,
        origin,
        destination,
        path.len() - 1
    );
    state.push_event(GameEvent::BubbleMoved {
        from: origin,
        to: destination,
        path,
    });

    let mut removal = HashSet::new();
    collect_lines(
        &state.board,
        destination,
        state.settings.bubbles_per_line as usize,
        &mut removal,
    );
    end_turn(state, removal);
    true
}

/// Front-end click: bubbles are selected, empty cells are move targets
pub fn click(state: &mut GameState, pos: IVec2) -> bool {
    if state.board.is_valid_position(pos) && state.board.is_occupied(pos) {
        select_bubble(state, pos)
    } else {
        attempt_move(state, pos)
    }
}

/// Announce the next turn's spawns.
///
/// Positions are distinct empty cells not already announced; colors come
/// uniformly from the palette. Stops with a warning when the board is full.
pub fn mark_pending(state: &mut GameState) {
    let mut candidates: Vec<IVec2> = state
        .board
        .empty_positions()
        .into_iter()
        .filter(|pos| !state.pending.iter().any(|p| p.position == *pos))
        .collect();

    for _ in 0..state.settings.bubbles_spawned_per_turn {
        if candidates.is_empty() {
            log::warn!("Board is full, cannot announce more bubbles");
            return;
        }
        let position = candidates.swap_remove(state.rng.random_range(0..candidates.len()));
        let Some(color) = state.palette.pick(&mut state.rng) else {
            log::warn!("Palette is empty, cannot announce bubbles");
            return;
        };

        state.pending.push(PendingBubble::new(position, color));
        state.board.set_indicator(position, Some(color));
    }
}

/// Pick a random legal move (autoplay/demo mode)
pub fn idle_move(state: &mut GameState) -> Option<(IVec2, IVec2)> {
    if state.is_finished() {
        return None;
    }

    let mut origins = state.board.occupied_positions();
    while !origins.is_empty() {
        let from = origins.swap_remove(state.rng.random_range(0..origins.len()));
        let targets = reachable_from(&state.board, from);
        if !targets.is_empty() {
            let to = targets[state.rng.random_range(0..targets.len())];
            return Some((from, to));
        }
    }
    None
}

/// Play one random legal move. Returns `false` if no move was possible.
pub fn play_idle_turn(state: &mut GameState) -> bool {
    let Some((from, to)) = idle_move(state) else {
        return false;
    };
    select_bubble(state, from) && attempt_move(state, to)
}

/// Everything after the moved bubble lands
fn end_turn(state: &mut GameState, mut removal: HashSet<IVec2>) {
    spawn_pending(state, &mut removal);
    clear_lines(state, removal);

    check_finished(state);
    if !state.is_finished() {
        state.phase = GamePhase::Idle;
    }

    state.turn += 1;
    state.push_event(GameEvent::TurnChanged(state.turn));
    mark_pending(state);
}

/// Realize announced bubbles, collecting any lines they complete
fn spawn_pending(state: &mut GameState, removal: &mut HashSet<IVec2>) {
    let threshold = state.settings.bubbles_per_line as usize;
    let pending = std::mem::take(&mut state.pending);
    let mut spawned = Vec::with_capacity(pending.len());

    for bubble in pending {
        // The moved bubble already sits here
        if Some(bubble.position) == state.last_move_destination
            || state.board.is_occupied(bubble.position)
        {
            continue;
        }
        state.board.set_occupied(bubble.position, Some(bubble.color));
        collect_lines(&state.board, bubble.position, threshold, removal);
        spawned.push(bubble.position);
    }

    if !spawned.is_empty() {
        state.push_event(GameEvent::BubblesSpawned(spawned));
    }
}

/// Remove every cell in `removal`, one point each
fn clear_lines(state: &mut GameState, removal: HashSet<IVec2>) {
    if removal.is_empty() {
        return;
    }

    let mut cleared: Vec<IVec2> = removal.into_iter().collect();
    cleared.sort_by_key(|p| (p.y, p.x));
    for &pos in &cleared {
        state.board.set_occupied(pos, None);
    }

    let points = cleared.len();
    state.push_event(GameEvent::BubblesCleared(cleared));
    for _ in 0..points {
        award_point(state);
    }
    log::debug!("Cleared {} bubbles, score {}", points, state.score);
    state.push_event(GameEvent::ScoreChanged(state.score));
}

/// Add one point and unlock a color whenever the threshold runs out
fn award_point(state: &mut GameState) {
    state.score += 1;
    state.score_to_next_color -= 1;
    if state.score_to_next_color > 0 {
        return;
    }

    state.score_to_next_color = i64::from(state.settings.points_per_additional_color);
    if let Some(color) = state.palette.unlock_next(&mut state.rng) {
        log::debug!(
            "Unlocked color {} ({} of {})",
            color,
            state.palette.len(),
            state.palette.max_colors()
        );
        state.push_event(GameEvent::ColorUnlocked(color));
    }
}

/// Finish the game the first time the board is (nearly) full
fn check_finished(state: &mut GameState) {
    if state.is_finished() || state.board.occupied_count() < state.finish_threshold() {
        return;
    }
    state.phase = GamePhase::Finished;
    state.selected = None;
    state.push_event(GameEvent::GameFinished);
    log::info!("Game finished on turn {} with score {}", state.turn, state.score);
}
