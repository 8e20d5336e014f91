use std::{
    env::{self, VarError},
    error::Error,
    fmt::{Display, Formatter},
    future::Future,
};

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const SLACK_POST_MESSAGE_URL: &str = "https://slack.com/api/chat.postMessage";

/// A message to post to a slack channel.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SlackMessage {
    #[serde(rename = "channel")]
    channel_id: String,
    text: String,
}

impl SlackMessage {
    pub fn new(channel_id: &str, text: &str) -> Self {
        Self { channel_id: channel_id.to_string(), text: text.to_string() }
    }
}

/// A trait for sending a slack message.
pub trait SlackSendMessage {
    fn send(&self, message: &SlackMessage) -> impl Future<Output = Result<()>> + Send;
}

#[derive(Debug, Deserialize)]
struct SlackResponse {
    ok: bool,
    error: Option<String>,
}

#[derive(Debug)]
pub struct SlackMessageSendingError {
    message: String,
}

impl Display for SlackMessageSendingError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Slack Message Sending Error: {}", self.message)
    }
}

impl Error for SlackMessageSendingError {}

/// Posts messages through the `chat.postMessage` web API as a bot.
#[derive(Debug, Clone)]
pub struct SlackWebClient {
    http_client: Client,
    bot_token: String,
    url: String,
}

impl SlackWebClient {
    pub fn new(http_client: Client, bot_token: &str) -> Self {
        Self::with_url(http_client, bot_token, SLACK_POST_MESSAGE_URL)
    }

    pub fn with_url(http_client: Client, bot_token: &str, url: &str) -> Self {
        Self { http_client, bot_token: bot_token.to_string(), url: url.to_string() }
    }

    /// Creates a client with the bot token from the `SLACK_BOT_TOKEN` environment variable.
    pub fn from_env(http_client: Client) -> Result<Self> {
        Self::from_env_value(http_client, env::var("SLACK_BOT_TOKEN"))
    }

    fn from_env_value(http_client: Client, bot_token: Result<String, VarError>) -> Result<Self> {
        let bot_token = bot_token.context(
            "SLACK_BOT_TOKEN not found, you can get one from the slack app console.",
        )?;
        if bot_token.is_empty() {
            return Err(anyhow!("SLACK_BOT_TOKEN must not be empty."));
        }
        Ok(Self::new(http_client, &bot_token))
    }
}

impl SlackSendMessage for SlackWebClient {
    async fn send(&self, message: &SlackMessage) -> Result<()> {
        let slack_resp = self
            .http_client
            .post(&self.url)
            .form(message)
            .bearer_auth(&self.bot_token)
            .send()
            .await?
            .error_for_status()?
            .json::<SlackResponse>()
            .await?;
        if slack_resp.ok {
            return Ok(());
        }
        let message = slack_resp.error.unwrap_or_else(|| "unknown_error".to_string());
        log::error!("A Slack API error occured {}.", message);
        Err(anyhow::Error::new(SlackMessageSendingError { message }))
    }
}
