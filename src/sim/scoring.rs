//! Score, multiplier and badge progression
//!
//! Awards happen in a fixed order: progress bonus, then completion bonus and
//! multiplier bump, then the champion bonus scaled by the bumped multiplier.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState};
use crate::consts::*;

/// One of the eight progression tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    Fire,
    Grass,
    Rock,
    Electric,
    Water,
    Ground,
    Psychic,
    Fairy,
}

impl Badge {
    pub const ALL: [Badge; 8] = [
        Badge::Fire,
        Badge::Grass,
        Badge::Rock,
        Badge::Electric,
        Badge::Water,
        Badge::Ground,
        Badge::Psychic,
        Badge::Fairy,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(&self) -> &'static str {
        match self {
            Badge::Fire => "Fire",
            Badge::Grass => "Grass",
            Badge::Rock => "Rock",
            Badge::Electric => "Electric",
            Badge::Water => "Water",
            Badge::Ground => "Ground",
            Badge::Psychic => "Psychic",
            Badge::Fairy => "Fairy",
        }
    }

    /// HUD color as a CSS hex string
    pub fn color(&self) -> &'static str {
        match self {
            Badge::Fire => "#ff4c40",
            Badge::Grass => "#3fc04d",
            Badge::Rock => "#b6b6b6",
            Badge::Electric => "#ffd447",
            Badge::Water => "#4dc0ff",
            Badge::Ground => "#c98b45",
            Badge::Psychic => "#c048ff",
            Badge::Fairy => "#ff93d3",
        }
    }
}

/// Per-badge counters in `0..=BADGE_MAX`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeProgress([u8; 8]);

impl BadgeProgress {
    pub fn get(&self, badge: Badge) -> u8 {
        self.0[badge.index()]
    }

    pub fn is_complete(&self, badge: Badge) -> bool {
        self.get(badge) >= BADGE_MAX
    }

    /// Advance a badge; returns the new level, or None if it was already maxed
    pub fn increment(&mut self, badge: Badge) -> Option<u8> {
        let level = &mut self.0[badge.index()];
        if *level >= BADGE_MAX {
            return None;
        }
        *level += 1;
        Some(*level)
    }

    pub fn all_complete(&self) -> bool {
        self.0.iter().all(|&level| level == BADGE_MAX)
    }

    pub fn completed_count(&self) -> usize {
        self.0.iter().filter(|&&level| level == BADGE_MAX).count()
    }

    pub fn reset(&mut self) {
        self.0 = [0; 8];
    }
}

/// Score multiplier held in tenths (1.0x to 2.0x) so scaling stays exact
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Multiplier(u32);

impl Default for Multiplier {
    fn default() -> Self {
        Self(MULTIPLIER_BASE_TENTHS)
    }
}

impl Multiplier {
    pub fn tenths(&self) -> u32 {
        self.0
    }

    pub fn as_f32(&self) -> f32 {
        self.0 as f32 / 10.0
    }

    /// +0.1x, capped at 2.0x
    pub fn bump(&mut self) {
        self.0 = (self.0 + 1).min(MULTIPLIER_MAX_TENTHS);
    }

    /// floor(base * multiplier)
    pub fn apply(&self, base: u64) -> u64 {
        base * u64::from(self.0) / 10
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}x", self.0 / 10, self.0 % 10)
    }
}

impl GameState {
    /// Add `floor(base * multiplier)` to the score; returns the points awarded
    pub fn add_score(&mut self, base: u64) -> u64 {
        let points = self.multiplier.apply(base);
        self.score += points;
        points
    }

    /// Score a shot by id and advance its badge. Unknown ids are ignored.
    pub fn register_shot(&mut self, id: &str) {
        let Some(shot) = self.shots.get(id) else {
            return;
        };
        let (base, badge) = (shot.score, shot.badge);

        let points = self.add_score(base);
        log::debug!("Shot {} scored {} ({})", id, points, self.multiplier);
        self.emit(GameEvent::ShotScored {
            shot: id.to_string(),
            points,
        });
        self.increment_badge(badge);
    }

    /// Advance a badge one step. Maxed badges are left untouched.
    pub fn increment_badge(&mut self, badge: Badge) {
        let Some(level) = self.badges.increment(badge) else {
            return;
        };
        self.add_score(PROGRESS_BONUS);

        if level < BADGE_MAX {
            self.emit(GameEvent::BadgeProgress { badge, level });
            return;
        }

        self.add_score(COMPLETE_BONUS);
        self.multiplier.bump();
        log::info!("{} badge complete, multiplier {}", badge.label(), self.multiplier);
        self.emit(GameEvent::BadgeComplete { badge });

        if self.badges.all_complete() {
            let bonus = self.multiplier.apply(CHAMPION_BONUS);
            self.score += bonus;
            self.celebration_timer = self.tuning.celebration_duration;
            log::info!("Champion! +{} (score {})", bonus, self.score);
            self.emit(GameEvent::Champion { bonus });
        }
    }
}
