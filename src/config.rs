use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Player;

pub const STANDARD_SIZE: usize = 8;
pub const DEFAULT_SCORE_OFFSET: i32 = 1000;
pub const DEFAULT_MAX_INVALID_ATTEMPTS: u32 = 64;
const MIN_SIZE: usize = 4;
const MAX_SIZE: usize = 16;

/// Positional weights for the standard board. Corners are prized, the
/// squares touching them are penalized.
#[rustfmt::skip]
pub const WEIGHTS_8X8: [i32; STANDARD_SIZE * STANDARD_SIZE] = [
    120, -20,  20,   5,   5,  20, -20, 120,
    -20, -40,  -5,  -5,  -5,  -5, -40, -20,
     20,  -5,  15,   3,   3,  15,  -5,  20,
      5,  -5,   3,   3,   3,   3,  -5,   5,
      5,  -5,   3,   3,   3,   3,  -5,   5,
     20,  -5,  15,   3,   3,  15,  -5,  20,
    -20, -40,  -5,  -5,  -5,  -5, -40, -20,
    120, -20,  20,   5,   5,  20, -20, 120,
];

static STANDARD: Lazy<Config> = Lazy::new(|| Config {
    size: STANDARD_SIZE,
    weights: WEIGHTS_8X8.to_vec(),
    score_offset: DEFAULT_SCORE_OFFSET,
    first_player: Player::Black,
    max_invalid_attempts: DEFAULT_MAX_INVALID_ATTEMPTS,
});

/// Immutable engine configuration, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Side length of the square grid.
    pub size: usize,
    /// Row-major positional weights, `size * size` entries.
    pub weights: Vec<i32>,
    /// Added to every candidate's weighted score so a non-candidate's 0
    /// sorts below all of them. Only ordering matters.
    pub score_offset: i32,
    /// Starts the first episode; later episodes alternate.
    pub first_player: Player,
    /// Consecutive rejected placements a runner tolerates from a policy.
    pub max_invalid_attempts: u32,
}

impl Config {
    pub fn standard() -> Self {
        STANDARD.clone()
    }

    /// A config for a `size`×`size` board. Non-standard sizes get a flat
    /// weight table.
    pub fn with_size(size: usize) -> Self {
        if size == STANDARD_SIZE {
            return Self::standard();
        }
        Self {
            size,
            weights: vec![1; size * size],
            ..Self::standard()
        }
    }

    pub fn with_weights(mut self, weights: Vec<i32>) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_score_offset(mut self, score_offset: i32) -> Self {
        self.score_offset = score_offset;
        self
    }

    pub fn with_first_player(mut self, first_player: Player) -> Self {
        self.first_player = first_player;
        self
    }

    pub fn with_max_invalid_attempts(mut self, attempts: u32) -> Self {
        self.max_invalid_attempts = attempts;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) || self.size % 2 != 0 {
            return Err(ConfigError::InvalidSize(self.size));
        }
        let expected = self.size * self.size;
        if self.weights.len() != expected {
            return Err(ConfigError::WeightTableSize {
                expected,
                actual: self.weights.len(),
            });
        }
        Ok(())
    }

    pub fn weight(&self, row: usize, col: usize) -> i32 {
        self.weights[row * self.size + col]
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_config_is_valid_and_symmetric() {
        let config = Config::standard();
        assert_eq!(config.validate(), Ok(()));

        let n = config.size;
        for row in 0..n {
            for col in 0..n {
                let w = config.weight(row, col);
                assert_eq!(w, config.weight(col, row));
                assert_eq!(w, config.weight(n - 1 - row, col));
                assert_eq!(w, config.weight(row, n - 1 - col));
            }
        }
        assert_eq!(config.weight(0, 0), 120);
        assert_eq!(config.weight(1, 1), -40);
    }

    #[test]
    fn validate_rejects_odd_or_tiny_sizes() {
        assert_eq!(
            Config::with_size(7).validate(),
            Err(ConfigError::InvalidSize(7))
        );
        assert_eq!(
            Config::with_size(2).validate(),
            Err(ConfigError::InvalidSize(2))
        );
        assert_eq!(Config::with_size(6).validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_mismatched_weight_table() {
        let config = Config::standard().with_weights(vec![0; 10]);

        assert_eq!(
            config.validate(),
            Err(ConfigError::WeightTableSize {
                expected: 64,
                actual: 10
            })
        );
    }

    #[test]
    fn partial_config_deserializes_over_defaults() {
        let config: Config = serde_json::from_str(r#"{"score_offset": 5}"#).unwrap();

        assert_eq!(config.score_offset, 5);
        assert_eq!(config.size, STANDARD_SIZE);
        assert_eq!(config.weights, WEIGHTS_8X8.to_vec());
    }
}
