use std::{env, sync::Arc};

use anyhow::Result;
use log::info;
use reqwest::Client;

use crate::{
    nba::scoreboard::{NbaScoreboardClient, DEFAULT_SCOREBOARD_BASE_URL},
    slack::message::SlackWebClient,
    utils::env::NbaGamesEnvironment,
};

use super::signature::SlackSigningSecret;

/// A data type containing necessary structs for server operations.
pub struct ServerEnvironment {
    signing_secret: SlackSigningSecret,
    scoreboard: Arc<NbaScoreboardClient>,
    slack_messenger: Option<Arc<SlackWebClient>>,
    address: String,
}

impl ServerEnvironment {
    pub fn new(
        signing_secret: SlackSigningSecret,
        scoreboard_base_url: &str,
        address: &str,
    ) -> Self {
        Self {
            signing_secret,
            scoreboard: Arc::new(NbaScoreboardClient::new(Client::new(), scoreboard_base_url)),
            slack_messenger: None,
            address: address.to_string(),
        }
    }

    /// The production environment.
    pub fn prod(signing_secret: SlackSigningSecret) -> Self {
        Self::new(signing_secret, DEFAULT_SCOREBOARD_BASE_URL, "0.0.0.0:8080")
    }

    /// The development environment.
    pub fn dev(signing_secret: SlackSigningSecret) -> Self {
        Self::new(signing_secret, DEFAULT_SCOREBOARD_BASE_URL, "127.0.0.1:8082")
    }

    /// Returns the current environment.
    ///
    /// The signing secret is read from `SLACK_SS`, which must be set. `NBA_GAMES_ADDRESS` and
    /// `NBA_SCOREBOARD_BASE_URL` override the address and scoreboard of the selected environment.
    /// A slack messenger is only available when `SLACK_BOT_TOKEN` is set.
    pub fn current() -> Result<Self> {
        let signing_secret = SlackSigningSecret::from_env()?;
        let mut environment = match NbaGamesEnvironment::current() {
            NbaGamesEnvironment::Dev => {
                info!("Using dev ServerEnvironment.");
                Self::dev(signing_secret)
            }
            NbaGamesEnvironment::Prod => {
                info!("Using production ServerEnvironment.");
                Self::prod(signing_secret)
            }
        };
        if let Ok(address) = env::var("NBA_GAMES_ADDRESS") {
            environment.address = address;
        }
        if let Ok(base_url) = env::var("NBA_SCOREBOARD_BASE_URL") {
            environment.scoreboard = Arc::new(NbaScoreboardClient::new(Client::new(), &base_url));
        }
        environment.slack_messenger = match SlackWebClient::from_env(Client::new()) {
            Ok(client) => Some(Arc::new(client)),
            Err(error) => {
                info!("Slack messages are disabled: {}", error);
                None
            }
        };
        Ok(environment)
    }

    pub fn with_slack_messenger(mut self, messenger: SlackWebClient) -> Self {
        self.slack_messenger = Some(Arc::new(messenger));
        self
    }
}

impl ServerEnvironment {
    pub fn signing_secret(&self) -> SlackSigningSecret {
        self.signing_secret.clone()
    }

    pub fn scoreboard(&self) -> Arc<NbaScoreboardClient> {
        self.scoreboard.clone()
    }

    pub fn slack_messenger(&self) -> Option<Arc<SlackWebClient>> {
        self.slack_messenger.clone()
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}
