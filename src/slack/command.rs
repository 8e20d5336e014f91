use std::str::FromStr;

use serde::Deserialize;
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// The sub-commands of the `/nba_games` slash command.
#[derive(Debug, PartialEq, Eq, EnumString, EnumIter, IntoStaticStr, Clone, Copy)]
pub enum NbaGamesCommand {
    #[strum(serialize = "today")]
    Today,
    #[strum(serialize = "tomorrow")]
    Tomorrow,
    #[strum(serialize = "help")]
    Help,
}

impl NbaGamesCommand {
    /// Parses the sub-command from the first whitespace separated word of the slash command text.
    ///
    /// Empty text is treated as a request for help, and `None` is returned when the first word is
    /// not a known sub-command.
    pub fn from_text(text: &str) -> Option<Self> {
        match text.split_whitespace().next() {
            Some(word) => Self::from_str(word).ok(),
            None => Some(Self::Help),
        }
    }

    /// Returns the keywords that users can type after the slash command.
    pub fn keywords() -> Vec<&'static str> {
        Self::iter().map(|c| c.into()).collect()
    }
}

/// A slash command request from slack.
///
/// Only `text` is needed to handle the request, the rest of the fields slack sends are kept for
/// logging.
#[derive(Debug, PartialEq, Eq, Deserialize, Clone, Default)]
#[serde(default)]
pub struct SlashCommandRequest {
    pub text: String,
    pub command: Option<String>,
    pub channel_id: Option<String>,
    pub user_id: Option<String>,
    pub response_url: Option<String>,
}

impl SlashCommandRequest {
    pub fn command(&self) -> Option<NbaGamesCommand> {
        NbaGamesCommand::from_text(&self.text)
    }
}
