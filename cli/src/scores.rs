use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use sweepgrid_core::Difficulty;

/// Best clear times in whole seconds, one slot per preset.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighScores {
    easy: Option<u64>,
    medium: Option<u64>,
    hard: Option<u64>,
}

impl HighScores {
    /// Loads scores, falling back to empty ones when the file is missing or unreadable.
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(Some(scores)) => scores,
            Ok(None) => Self::default(),
            Err(err) => {
                log::warn!("Ignoring high scores: {err:#}");
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> anyhow::Result<Option<Self>> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("reading {}", path.display()));
            }
        };
        let scores = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(scores))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).with_context(|| format!("writing {}", path.display()))
    }

    pub fn best(&self, difficulty: Difficulty) -> Option<u64> {
        *self.slot(difficulty)
    }

    /// Stores `seconds` if it beats the current best, returns whether it did.
    pub fn record(&mut self, difficulty: Difficulty, seconds: u64) -> bool {
        let slot = self.slot_mut(difficulty);
        match *slot {
            Some(best) if best <= seconds => false,
            _ => {
                *slot = Some(seconds);
                true
            }
        }
    }

    fn slot(&self, difficulty: Difficulty) -> &Option<u64> {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    fn slot_mut(&mut self, difficulty: Difficulty) -> &mut Option<u64> {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }
}
