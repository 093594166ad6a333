//! Bubble colors and the unlockable palette
//!
//! Colors are plain sRGB triples so equality is exact and cheap. The palette
//! only ever grows: colors come from a bonus queue first, then from random
//! generation that never repeats a palette color.

use std::collections::VecDeque;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Random generation attempts before falling back to a hue sweep
const MAX_RANDOM_COLOR_ATTEMPTS: u32 = 32;

/// Hue steps tried by the fallback sweep
const HUE_SWEEP_STEPS: u32 = 360;

/// A bubble color (8-bit sRGB)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BubbleColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl BubbleColor {
    pub const RED: Self = Self::rgb(220, 50, 47);
    pub const GREEN: Self = Self::rgb(64, 190, 72);
    pub const BLUE: Self = Self::rgb(38, 110, 220);
    pub const YELLOW: Self = Self::rgb(240, 200, 40);
    pub const PURPLE: Self = Self::rgb(160, 70, 200);
    pub const CYAN: Self = Self::rgb(40, 200, 210);
    pub const ORANGE: Self = Self::rgb(245, 130, 30);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from hue, saturation and value (all in `[0, 1]`)
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        let h = (h.rem_euclid(1.0)) * 6.0;
        let s = s.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);

        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let (r, g, b) = match sector as u32 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        let to_u8 = |c: f32| (c * 255.0).round() as u8;
        Self::rgb(to_u8(r), to_u8(g), to_u8(b))
    }

    /// Random fully saturated color with value in `[0.5, 1]`
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let hue = rng.random_range(0.0..1.0);
        let value = rng.random_range(0.5..=1.0);
        Self::from_hsv(hue, 1.0, value)
    }
}

impl fmt::Display for BubbleColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Pick a color that is not in `existing`.
///
/// Tries random colors first, then sweeps hues at a few brightness levels.
/// Returns `None` only if every candidate is already taken.
pub fn generate_distinct<R: Rng>(rng: &mut R, existing: &[BubbleColor]) -> Option<BubbleColor> {
    for _ in 0..MAX_RANDOM_COLOR_ATTEMPTS {
        let color = BubbleColor::random(rng);
        if !existing.contains(&color) {
            return Some(color);
        }
    }

    let offset = rng.random_range(0..HUE_SWEEP_STEPS);
    for value in [1.0, 0.75, 0.5] {
        for step in 0..HUE_SWEEP_STEPS {
            let hue = ((offset + step) % HUE_SWEEP_STEPS) as f32 / HUE_SWEEP_STEPS as f32;
            let color = BubbleColor::from_hsv(hue, 1.0, value);
            if !existing.contains(&color) {
                return Some(color);
            }
        }
    }

    None
}

/// Colors currently eligible for spawning, plus the bonus queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    colors: Vec<BubbleColor>,
    bonus: VecDeque<BubbleColor>,
    max_colors: usize,
}

impl Palette {
    /// Create a palette; duplicate seed colors are dropped.
    pub fn new(colors: &[BubbleColor], bonus: &[BubbleColor], max_colors: usize) -> Self {
        let mut palette = Self {
            colors: Vec::with_capacity(max_colors),
            bonus: VecDeque::new(),
            max_colors,
        };
        for &color in colors {
            if !palette.colors.contains(&color) {
                palette.colors.push(color);
            }
        }
        palette.bonus = bonus
            .iter()
            .copied()
            .filter(|c| !palette.colors.contains(c))
            .collect();
        palette
    }

    pub fn colors(&self) -> &[BubbleColor] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn max_colors(&self) -> usize {
        self.max_colors
    }

    /// Bonus colors still waiting to be unlocked
    pub fn pending_bonus(&self) -> impl Iterator<Item = &BubbleColor> {
        self.bonus.iter()
    }

    pub fn is_capped(&self) -> bool {
        self.colors.len() >= self.max_colors
    }

    /// Uniformly random palette color
    pub fn pick<R: Rng>(&self, rng: &mut R) -> Option<BubbleColor> {
        if self.colors.is_empty() {
            return None;
        }
        Some(self.colors[rng.random_range(0..self.colors.len())])
    }

    /// Unlock one more color, preferring the bonus queue.
    ///
    /// Returns the unlocked color, or `None` when the palette is capped.
    pub fn unlock_next<R: Rng>(&mut self, rng: &mut R) -> Option<BubbleColor> {
        if self.is_capped() {
            return None;
        }

        while let Some(color) = self.bonus.pop_front() {
            // Bonus entries can collide with generated colors unlocked earlier
            if !self.colors.contains(&color) {
                self.colors.push(color);
                return Some(color);
            }
        }

        let color = generate_distinct(rng, &self.colors)?;
        self.colors.push(color);
        Some(color)
    }
}
