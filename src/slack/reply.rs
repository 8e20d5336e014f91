use serde::Serialize;

/// Who gets to see a reply to a slash command.
#[derive(Debug, PartialEq, Eq, Serialize, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum SlackResponseType {
    /// Only the user who invoked the command.
    Ephemeral,
    /// Everyone in the channel.
    InChannel,
}

/// The JSON body of a slash command reply.
#[derive(Debug, PartialEq, Eq, Serialize, Clone)]
pub struct SlackReply {
    response_type: SlackResponseType,
    text: String,
}

impl SlackReply {
    pub fn ephemeral(text: &str) -> Self {
        Self { response_type: SlackResponseType::Ephemeral, text: text.to_string() }
    }

    pub fn in_channel(text: &str) -> Self {
        Self { response_type: SlackResponseType::InChannel, text: text.to_string() }
    }

    pub fn response_type(&self) -> SlackResponseType {
        self.response_type
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
