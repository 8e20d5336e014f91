use std::env;

/// An enum representing the current environment that this service is running in.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NbaGamesEnvironment {
    Dev,
    Prod,
}

impl NbaGamesEnvironment {
    /// Returns the current environment based on the `NBA_GAMES_ENV` environment variable.
    pub fn current() -> Self {
        Self::from_raw_value(env::var("NBA_GAMES_ENV").ok().as_deref())
    }

    fn from_raw_value(value: Option<&str>) -> Self {
        match value {
            Some("dev") => Self::Dev,
            _ => Self::Prod,
        }
    }
}
