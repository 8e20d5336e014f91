use serde::Deserialize;

/// The inner event of an Events API callback.
#[derive(Debug, PartialEq, Eq, Deserialize, Clone, Default)]
#[serde(default)]
pub struct SlackEvent {
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub event_ts: Option<String>,
    pub user: Option<String>,
    pub text: Option<String>,
    pub channel: Option<String>,
}

/// A payload from the slack Events API.
///
/// When slack verifies the request URL of an app, it sends a `url_verification` payload whose
/// `challenge` must be echoed back as is.
#[derive(Debug, PartialEq, Eq, Deserialize, Clone, Default)]
#[serde(default)]
pub struct SlackEventsPayload {
    pub challenge: Option<String>,
    pub token: Option<String>,
    pub team_id: Option<String>,
    #[serde(rename = "type")]
    pub payload_type: Option<String>,
    pub event: Option<SlackEvent>,
    pub event_id: Option<String>,
    pub event_time: Option<i64>,
}

impl SlackEventsPayload {
    /// Returns the body to respond to this payload with.
    pub fn challenge_response(&self) -> String {
        self.challenge.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn challenge_response_echoes_challenge() {
        let json = r#"{
            "token": "Jhj5dZrVaK7ZwHHjRyZWjbDl",
            "challenge": "3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P",
            "type": "url_verification"
        }"#;
        let payload = serde_json::from_str::<SlackEventsPayload>(json).unwrap();
        assert_eq!(payload.payload_type.as_deref(), Some("url_verification"));
        assert_eq!(
            payload.challenge_response(),
            "3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P"
        )
    }

    #[test]
    fn challenge_response_is_empty_for_event_callbacks() {
        let json = r#"{
            "type": "event_callback",
            "team_id": "T061EG9R6",
            "event": { "type": "app_mention", "user": "U061F7AUR", "text": "hi", "channel": "C0LAN2Q65" },
            "event_id": "Ev0LAN670R",
            "event_time": 1515449522
        }"#;
        let payload = serde_json::from_str::<SlackEventsPayload>(json).unwrap();
        assert_eq!(payload.event.as_ref().unwrap().channel.as_deref(), Some("C0LAN2Q65"));
        assert_eq!(payload.challenge_response(), "")
    }
}
