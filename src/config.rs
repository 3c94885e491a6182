//! Game configuration supplied by the driver when a game is created.

use crate::board::Color;
use crate::constants::DEFAULT_KOMI;
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Compensation added to White's area score.
    pub komi: f64,
    /// Whether the heuristic engine plays `engine_color`.
    pub engine_enabled: bool,
    pub engine_color: Color,
    /// Seed for the engine's random tie-breaking; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            komi: DEFAULT_KOMI,
            engine_enabled: true,
            engine_color: Color::White,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.komi.is_finite() {
            return Err(ConfigError::InvalidKomi(self.komi));
        }
        Ok(())
    }

    pub fn with_komi(mut self, komi: f64) -> Self {
        self.komi = komi;
        self
    }

    pub fn with_engine(mut self, enabled: bool) -> Self {
        self.engine_enabled = enabled;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Fresh RNG for the heuristic engine.
    pub fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}
