use serde::{Deserialize, Serialize};

use crate::{
    ConfigError,
    core::{BLOCK_SIZE, PLAYABLE_LEFT, PLAYABLE_RIGHT},
    engine::{HighscorePolicy, InputBands},
};

/// Deepest soft-drop look-ahead accepted: the height of the tallest piece.
pub const MAX_SOFT_DROP_LOOKAHEAD: i16 = 4 * BLOCK_SIZE;

/// Anchor where new pieces appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub x: i16,
    pub y: i16,
}

impl Default for SpawnPoint {
    fn default() -> Self {
        // Fifth block column from the left wall, top row.
        Self { x: 81, y: 0 }
    }
}

/// Tunables of the console.
///
/// Every field has a default matching the shipped hardware, so a JSON file
/// only needs to name what it changes:
///
/// ```
/// use lcdtris_engine::GameConfig;
///
/// let config: GameConfig = serde_json::from_str(r#"{ "tick_seconds": 0.5 }"#).unwrap();
/// assert_eq!(config.tick_seconds, 0.5);
/// assert_eq!(config.gravity_step, 6);
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub bands: InputBands,
    /// Rows a piece falls per tick. Collision checks reach one cell past the
    /// piece, so this must be exactly one block.
    pub gravity_step: i16,
    /// Columns a piece moves per lateral input; exactly one block.
    pub lateral_step: i16,
    /// Extra rows checked below a piece before a soft drop is allowed, in
    /// whole blocks up to [`MAX_SOFT_DROP_LOOKAHEAD`].
    pub soft_drop_lookahead: i16,
    pub spawn: SpawnPoint,
    /// Length of one game tick.
    pub tick_seconds: f32,
    /// The game ends once this many pieces have locked.
    pub piece_ceiling: u32,
    pub highscore_policy: HighscorePolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            bands: InputBands::default(),
            gravity_step: BLOCK_SIZE,
            lateral_step: BLOCK_SIZE,
            soft_drop_lookahead: 2 * BLOCK_SIZE,
            spawn: SpawnPoint::default(),
            tick_seconds: 0.8,
            piece_ceiling: 1000,
            highscore_policy: HighscorePolicy::default(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("gravity_step", self.gravity_step),
            ("lateral_step", self.lateral_step),
        ] {
            if value != BLOCK_SIZE {
                return Err(ConfigError::InvalidStep { name, value });
            }
        }
        let lookahead = self.soft_drop_lookahead;
        if !(BLOCK_SIZE..=MAX_SOFT_DROP_LOOKAHEAD).contains(&lookahead)
            || lookahead % BLOCK_SIZE != 0
        {
            return Err(ConfigError::InvalidLookahead(lookahead));
        }
        if !(self.tick_seconds.is_finite() && self.tick_seconds > 0.0) {
            return Err(ConfigError::InvalidTick(self.tick_seconds));
        }
        let spawn_ok = usize::try_from(self.spawn.x)
            .is_ok_and(|x| (PLAYABLE_LEFT..=PLAYABLE_RIGHT).contains(&x));
        if !spawn_ok || (self.spawn.x - PLAYABLE_LEFT as i16) % BLOCK_SIZE != 0 {
            return Err(ConfigError::InvalidSpawn(self.spawn.x));
        }
        self.bands.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.spawn, SpawnPoint { x: 81, y: 0 });
        assert_eq!(config.piece_ceiling, 1000);
    }

    #[test]
    fn test_rejects_misaligned_steps() {
        let config = GameConfig {
            lateral_step: 4,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidStep {
                name: "lateral_step",
                value: 4
            })
        );
    }

    #[test]
    fn test_rejects_steps_longer_than_a_block() {
        let config = GameConfig {
            gravity_step: 12,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidStep {
                name: "gravity_step",
                value: 12
            })
        );

        let config = GameConfig {
            lateral_step: 12,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidStep {
                name: "lateral_step",
                ..
            })
        ));
    }

    #[test]
    fn test_soft_drop_lookahead_range() {
        for lookahead in [6, 12, 18, 24] {
            let config = GameConfig {
                soft_drop_lookahead: lookahead,
                ..GameConfig::default()
            };
            assert!(config.validate().is_ok(), "{lookahead}");
        }
        for lookahead in [0, -6, 9, 30, i16::MAX] {
            let config = GameConfig {
                soft_drop_lookahead: lookahead,
                ..GameConfig::default()
            };
            assert_eq!(
                config.validate(),
                Err(ConfigError::InvalidLookahead(lookahead))
            );
        }
    }

    #[test]
    fn test_rejects_bad_tick_and_spawn() {
        let config = GameConfig {
            tick_seconds: 0.0,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTick(_))));

        let config = GameConfig {
            spawn: SpawnPoint { x: 40, y: 0 },
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidSpawn(40)));

        let config = GameConfig {
            spawn: SpawnPoint { x: 82, y: 0 },
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidSpawn(82)));
    }

    #[test]
    fn test_json_round_trip_and_unknown_fields() {
        let config = GameConfig {
            highscore_policy: HighscorePolicy::Shift,
            ..GameConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""highscore_policy":"shift""#));
        assert_eq!(serde_json::from_str::<GameConfig>(&json).unwrap(), config);
        assert!(serde_json::from_str::<GameConfig>(r#"{ "speed": 3 }"#).is_err());
    }
}
