//! Game settings
//!
//! Board dimensions, spawn and scoring rules, and the two seed palettes.
//! Loaded from JSON; every field falls back to its default.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::BubbleColor;

/// Rules configuration for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Board ===
    /// Columns
    pub width: u32,
    /// Rows
    pub height: u32,

    // === Turn rules ===
    /// Bubbles announced and spawned each turn
    pub bubbles_spawned_per_turn: u32,
    /// Minimum run length that clears a line
    pub bubbles_per_line: u32,

    // === Palette progression ===
    /// Palette size cap
    pub max_bubble_colors: u32,
    /// Points needed to unlock one more color
    pub points_per_additional_color: u32,
    /// Colors available from the first turn
    pub default_colors: Vec<BubbleColor>,
    /// Colors unlocked first, in order, before random ones
    pub additional_colors: Vec<BubbleColor>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,

            bubbles_spawned_per_turn: DEFAULT_BUBBLES_SPAWNED_PER_TURN,
            bubbles_per_line: DEFAULT_BUBBLES_PER_LINE,

            max_bubble_colors: DEFAULT_MAX_BUBBLE_COLORS,
            points_per_additional_color: DEFAULT_POINTS_PER_ADDITIONAL_COLOR,
            default_colors: vec![
                BubbleColor::RED,
                BubbleColor::GREEN,
                BubbleColor::BLUE,
                BubbleColor::YELLOW,
                BubbleColor::PURPLE,
            ],
            additional_colors: vec![BubbleColor::CYAN, BubbleColor::ORANGE],
        }
    }
}

impl Settings {
    /// Settings for a board of the given size, other rules default
    pub fn with_board(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Check the rule values are playable
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.width >= 1 && self.height >= 1,
            "board must be at least 1x1, got {}x{}",
            self.width,
            self.height
        );
        ensure!(
            i32::try_from(self.width).is_ok() && i32::try_from(self.height).is_ok(),
            "board dimensions {}x{} are out of range",
            self.width,
            self.height
        );
        ensure!(
            self.cell_count() <= MAX_BOARD_CELLS,
            "{}x{} board exceeds {} cells",
            self.width,
            self.height,
            MAX_BOARD_CELLS
        );
        ensure!(
            self.bubbles_spawned_per_turn >= 1,
            "bubbles_spawned_per_turn must be at least 1"
        );
        ensure!(
            self.bubbles_per_line >= 2,
            "bubbles_per_line must be at least 2, got {}",
            self.bubbles_per_line
        );
        ensure!(
            self.max_bubble_colors >= 2,
            "max_bubble_colors must be at least 2, got {}",
            self.max_bubble_colors
        );
        ensure!(
            self.points_per_additional_color >= 1,
            "points_per_additional_color must be at least 1"
        );
        ensure!(
            !self.default_colors.is_empty(),
            "default_colors must contain at least one color"
        );
        ensure!(
            self.default_colors.len() <= self.max_bubble_colors as usize,
            "{} default colors exceed max_bubble_colors ({})",
            self.default_colors.len(),
            self.max_bubble_colors
        );
        Ok(())
    }

    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json).context("invalid settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        let settings = Self::from_json(&json)
            .with_context(|| format!("failed to load settings from {}", path.display()))?;
        log::info!(
            "Loaded settings from {} ({}x{} board)",
            path.display(),
            settings.width,
            settings.height
        );
        Ok(settings)
    }

    /// Serialize to pretty JSON (for writing a starter settings file)
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize settings")
    }
}
