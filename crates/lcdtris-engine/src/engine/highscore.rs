use std::fmt;

use arrayvec::ArrayString;
use serde::{Deserialize, Serialize};

use crate::PlayerNameError;

/// Maximum length of a player name.
pub const NAME_LEN: usize = 7;
/// Number of highscore slots.
pub const HIGHSCORE_SLOTS: usize = 5;

/// A player alias of up to seven characters (`A`-`Z` and spaces).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerName(ArrayString<NAME_LEN>);

impl PlayerName {
    /// Validates and builds a name. Trailing blanks are trimmed.
    pub fn new(name: &str) -> Result<Self, PlayerNameError> {
        let name = name.trim_end();
        if name.is_empty() || name.starts_with(' ') {
            return Err(PlayerNameError::Blank);
        }
        if let Some(c) = name.chars().find(|c| !Self::is_allowed(*c)) {
            return Err(PlayerNameError::UnsupportedChar(c));
        }
        ArrayString::from(name)
            .map(Self)
            .map_err(|_| PlayerNameError::TooLong)
    }

    #[must_use]
    pub const fn is_allowed(c: char) -> bool {
        c.is_ascii_uppercase() || c == ' '
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PlayerName {
    fn default() -> Self {
        let mut name = ArrayString::new();
        name.push_str("PLAYER");
        Self(name)
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl TryFrom<String> for PlayerName {
    type Error = PlayerNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<PlayerName> for String {
    fn from(name: PlayerName) -> Self {
        name.0.to_string()
    }
}

/// How a new score enters the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighscorePolicy {
    /// Overwrite the first slot the score reaches; lower entries stay put.
    #[default]
    Overwrite,
    /// Insert at the first slot the score reaches and push lower entries down.
    Shift,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighscoreEntry {
    pub name: Option<PlayerName>,
    pub score: u32,
}

/// The top-five table, kept in memory only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighscoreTable {
    entries: [HighscoreEntry; HIGHSCORE_SLOTS],
    policy: HighscorePolicy,
}

impl HighscoreTable {
    #[must_use]
    pub fn new(policy: HighscorePolicy) -> Self {
        Self {
            entries: Default::default(),
            policy,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[HighscoreEntry; HIGHSCORE_SLOTS] {
        &self.entries
    }

    /// Records a finished game and returns the slot it landed in.
    ///
    /// The slot is the first one, from the top, whose score is not greater
    /// than `score`.
    pub fn record(&mut self, name: PlayerName, score: u32) -> Option<usize> {
        let slot = self.entries.iter().position(|entry| score >= entry.score)?;
        let entry = HighscoreEntry {
            name: Some(name),
            score,
        };
        match self.policy {
            HighscorePolicy::Overwrite => self.entries[slot] = entry,
            HighscorePolicy::Shift => {
                self.entries[slot..].rotate_right(1);
                self.entries[slot] = entry;
            }
        }
        tracing::info!(%name, score, slot, "new highscore");
        Some(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> PlayerName {
        PlayerName::new(s).unwrap()
    }

    fn scores(table: &HighscoreTable) -> Vec<u32> {
        table.entries().iter().map(|e| e.score).collect()
    }

    #[test]
    fn test_player_name_validation() {
        assert_eq!(name("ADA").as_str(), "ADA");
        assert_eq!(name("MAX    ").as_str(), "MAX");
        assert_eq!(name("ABCDEFG").as_str(), "ABCDEFG");
        assert_eq!(PlayerName::new("ABCDEFGH"), Err(PlayerNameError::TooLong));
        assert_eq!(PlayerName::new(" AB"), Err(PlayerNameError::Blank));
        assert_eq!(PlayerName::new(""), Err(PlayerNameError::Blank));
        assert_eq!(
            PlayerName::new("ab"),
            Err(PlayerNameError::UnsupportedChar('a'))
        );
    }

    #[test]
    fn test_player_name_serde() {
        let json = serde_json::to_string(&name("ZED")).unwrap();
        assert_eq!(json, r#""ZED""#);
        assert_eq!(serde_json::from_str::<PlayerName>(&json).unwrap(), name("ZED"));
        assert!(serde_json::from_str::<PlayerName>(r#""zed""#).is_err());
    }

    #[test]
    fn test_overwrite_policy_replaces_slot_in_place() {
        let mut table = HighscoreTable::new(HighscorePolicy::Overwrite);
        assert_eq!(table.record(name("A"), 500), Some(0));
        assert_eq!(table.record(name("B"), 300), Some(1));
        assert_eq!(table.record(name("C"), 400), Some(1));
        assert_eq!(scores(&table), [500, 400, 0, 0, 0]);
        assert_eq!(table.entries()[1].name, Some(name("C")));
    }

    #[test]
    fn test_shift_policy_pushes_entries_down() {
        let mut table = HighscoreTable::new(HighscorePolicy::Shift);
        table.record(name("A"), 500);
        table.record(name("B"), 300);
        assert_eq!(table.record(name("C"), 400), Some(1));
        assert_eq!(scores(&table), [500, 400, 300, 0, 0]);
        assert_eq!(table.entries()[2].name, Some(name("B")));
    }

    #[test]
    fn test_low_score_misses_full_table() {
        let mut table = HighscoreTable::new(HighscorePolicy::Shift);
        for s in [900, 800, 700, 600, 500] {
            table.record(name("P"), s);
        }
        assert_eq!(table.record(name("Q"), 100), None);
        assert_eq!(table.record(name("Q"), 500), Some(4));
        assert_eq!(scores(&table), [900, 800, 700, 600, 500]);
        assert_eq!(table.entries()[4].name, Some(name("Q")));
    }

    #[test]
    fn test_ties_take_the_higher_slot() {
        let mut table = HighscoreTable::new(HighscorePolicy::Overwrite);
        table.record(name("A"), 200);
        assert_eq!(table.record(name("B"), 200), Some(0));
    }
}
