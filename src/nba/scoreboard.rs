use std::future::Future;

use anyhow::{Context, Result};
use chrono::{DateTime, Days, NaiveDate, TimeZone};
use reqwest::Client;

use super::schedule::NbaSchedule;

pub const DEFAULT_SCOREBOARD_BASE_URL: &str = "http://data.nba.net/10s/prod/v1";

/// A calendar date to load the NBA schedule for.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct NbaScheduleDate {
    date: NaiveDate,
}

impl NbaScheduleDate {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// The schedule date of the calendar day that `now` falls on in its own timezone.
    pub fn today<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        Self::new(now.date_naive())
    }

    /// The schedule date of the calendar day after the one that `now` falls on.
    pub fn tomorrow<Tz: TimeZone>(now: &DateTime<Tz>) -> Result<Self> {
        let date = now
            .date_naive()
            .checked_add_days(Days::new(1))
            .with_context(|| format!("No calendar day follows {}", now.date_naive()))?;
        Ok(Self::new(date))
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the `YYYYMMDD` path segment that the scoreboard API keys schedules by.
    pub fn path_segment(&self) -> String {
        self.date.format("%Y%m%d").to_string()
    }
}

/// A trait for loading the NBA schedule of a date.
pub trait NbaScheduleLoader {
    fn load_schedule(
        &self,
        date: NbaScheduleDate,
    ) -> impl Future<Output = Result<NbaSchedule>> + Send;
}

/// Loads schedules from the public `{date}/scoreboard.json` endpoint.
#[derive(Debug, Clone)]
pub struct NbaScoreboardClient {
    http_client: Client,
    base_url: String,
}

impl NbaScoreboardClient {
    pub fn new(http_client: Client, base_url: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn scoreboard_url(&self, date: NbaScheduleDate) -> String {
        format!("{}/{}/scoreboard.json", self.base_url, date.path_segment())
    }
}

impl NbaScheduleLoader for NbaScoreboardClient {
    async fn load_schedule(&self, date: NbaScheduleDate) -> Result<NbaSchedule> {
        let url = self.scoreboard_url(date);
        log::info!("Loading NBA schedule from {}.", url);
        let schedule = self
            .http_client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?
            .error_for_status()?
            .json::<NbaSchedule>()
            .await
            .with_context(|| format!("Failed to decode the scoreboard from {}", url))?;
        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use axum::{extract::Path, http::StatusCode, response::IntoResponse, routing::get, Router};
    use chrono_tz::America::Los_Angeles;
    use serde_json::json;
    use tokio::{net::TcpListener, spawn};

    use super::*;

    #[test]
    fn today_uses_the_local_calendar_day() {
        // NB: 02:00 UTC on Feb 1st is still Jan 31st in Los Angeles.
        let now = Los_Angeles.with_ymd_and_hms(2024, 1, 31, 18, 0, 0).unwrap();
        let date = NbaScheduleDate::today(&now);
        assert_eq!(date.date(), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_eq!(date.path_segment(), "20240131")
    }

    #[test]
    fn tomorrow_rolls_over_month_and_year() {
        let now = Los_Angeles.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(NbaScheduleDate::tomorrow(&now).unwrap().path_segment(), "20240101")
    }

    #[test]
    fn path_segment_zero_pads() {
        let date = NbaScheduleDate::new(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(date.path_segment(), "20240305")
    }

    #[test]
    fn scoreboard_url_ignores_trailing_slash() {
        let client = NbaScoreboardClient::new(Client::new(), "http://localhost:1234/v1/");
        let date = NbaScheduleDate::new(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(client.scoreboard_url(date), "http://localhost:1234/v1/20240201/scoreboard.json")
    }

    #[tokio::test]
    async fn loads_schedule_for_date() {
        let base_url = serve_scoreboard().await;
        let client = NbaScoreboardClient::new(Client::new(), &base_url);
        let date = NbaScheduleDate::new(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        let schedule = client.load_schedule(date).await.unwrap();
        assert_eq!(schedule.num_games, 1);
        assert_eq!(schedule.games[0].home_team.tri_code, "LAL");
        assert_eq!(schedule.games[0].visiting_team.tri_code, "BOS")
    }

    #[tokio::test]
    async fn fails_when_scoreboard_is_missing() {
        let base_url = serve_scoreboard().await;
        let client = NbaScoreboardClient::new(Client::new(), &base_url);
        let date = NbaScheduleDate::new(NaiveDate::from_ymd_opt(1999, 2, 1).unwrap());
        assert!(client.load_schedule(date).await.is_err())
    }

    #[tokio::test]
    async fn fails_when_scoreboard_is_not_json() {
        let base_url = serve_scoreboard().await;
        let client = NbaScoreboardClient::new(Client::new(), &base_url);
        let date = NbaScheduleDate::new(NaiveDate::from_ymd_opt(2024, 2, 2).unwrap());
        assert!(client.load_schedule(date).await.is_err())
    }

    async fn serve_scoreboard() -> String {
        let router = Router::new().route("/v1/:date/scoreboard.json", get(scoreboard));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        spawn(async move { axum::serve(listener, router).await });
        format!("http://{}/v1", address)
    }

    async fn scoreboard(Path(date): Path<String>) -> impl IntoResponse {
        match date.as_str() {
            "20240201" => axum::Json(json!({
                "numGames": 1,
                "games": [
                    {
                        "startTimeUTC": "2024-02-02T00:00:00.000Z",
                        "hTeam": { "triCode": "LAL" },
                        "vTeam": { "triCode": "BOS" }
                    }
                ]
            }))
            .into_response(),
            "20240202" => "<html>maintenance</html>".into_response(),
            _ => StatusCode::NOT_FOUND.into_response(),
        }
    }
}
