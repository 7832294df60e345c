//! Game mode selection.

use serde::{Deserialize, Serialize};

/// Which start-game endpoint to call.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GameMode {
    /// Random past answer.
    #[default]
    Random,
    /// Today's puzzle.
    Daily,
    /// Single-mode servers that expose only `/api/start-game`.
    Standard,
}

impl GameMode {
    /// Returns the path of the start-game endpoint for this mode.
    pub fn start_path(self) -> &'static str {
        match self {
            GameMode::Random => "/api/start-game-random",
            GameMode::Daily => "/api/start-game-daily",
            GameMode::Standard => "/api/start-game",
        }
    }

    /// Returns display name.
    pub fn name(self) -> &'static str {
        match self {
            GameMode::Random => "Random",
            GameMode::Daily => "Daily",
            GameMode::Standard => "Classic",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(GameMode::from_str("Daily").unwrap(), GameMode::Daily);
        assert_eq!(GameMode::from_str("random").unwrap(), GameMode::Random);
        assert!(GameMode::from_str("weekly").is_err());
    }

    #[test]
    fn every_mode_has_an_api_path() {
        for mode in GameMode::iter() {
            assert!(mode.start_path().starts_with("/api/start-game"));
        }
    }
}
