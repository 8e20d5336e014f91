use std::fmt::Write;

use anyhow::{Context, Result};
use chrono::DateTime;
use chrono_tz::America::Los_Angeles;
use serde::Deserialize;

/// A team as it appears in a scoreboard game.
#[derive(Debug, PartialEq, Eq, Deserialize, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct NbaTeam {
    pub team_id: String,
    pub tri_code: String,
    pub win: String,
    pub loss: String,
}

/// A single game on the scoreboard.
#[derive(Debug, PartialEq, Eq, Deserialize, Clone, Default)]
#[serde(default)]
pub struct NbaGame {
    #[serde(rename = "startTimeUTC")]
    pub start_time_utc: String,
    #[serde(rename = "startTimeEastern")]
    pub start_time_eastern: String,
    #[serde(rename = "hTeam")]
    pub home_team: NbaTeam,
    #[serde(rename = "vTeam")]
    pub visiting_team: NbaTeam,
}

/// The games scheduled for a single date, as returned by `{date}/scoreboard.json`.
#[derive(Debug, PartialEq, Eq, Deserialize, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct NbaSchedule {
    pub num_games: u32,
    pub games: Vec<NbaGame>,
}

impl NbaSchedule {
    /// Renders this schedule as the text of a slack reply.
    ///
    /// Ex.
    /// ```text
    /// 2 games
    /// :LAL: - :BOS: @ 4:00PM PST
    /// :GSW: - :PHX: @ 7:30PM PST
    /// ```
    pub fn slack_text(&self) -> Result<String> {
        let mut text = format!("{} games\n", self.num_games);
        for game in self.games.iter() {
            let start_time = DateTime::parse_from_rfc3339(&game.start_time_utc)
                .with_context(|| format!("Invalid game start time \"{}\"", game.start_time_utc))?
                .with_timezone(&Los_Angeles);
            writeln!(
                text,
                ":{}: - :{}: @ {} PST",
                game.home_team.tri_code,
                game.visiting_team.tri_code,
                start_time.format("%-I:%M%p")
            )?;
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn deserializes_scoreboard_fields() {
        let schedule = serde_json::from_value::<NbaSchedule>(json!({
            "numGames": 1,
            "games": [
                {
                    "startTimeUTC": "2024-02-02T00:00:00.000Z",
                    "startTimeEastern": "7:00 PM ET",
                    "hTeam": { "teamId": "1610612747", "triCode": "LAL", "win": "25", "loss": "24" },
                    "vTeam": { "teamId": "1610612738", "triCode": "BOS", "win": "36", "loss": "11" },
                    "watch": {}
                }
            ]
        }))
        .unwrap();
        let game = &schedule.games[0];
        assert_eq!(schedule.num_games, 1);
        assert_eq!(game.home_team.tri_code, "LAL");
        assert_eq!(game.home_team.win, "25");
        assert_eq!(game.visiting_team.team_id, "1610612738");
        assert_eq!(game.start_time_eastern, "7:00 PM ET")
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let schedule = serde_json::from_str::<NbaSchedule>("{}").unwrap();
        assert_eq!(schedule, NbaSchedule::default())
    }

    #[test]
    fn slack_text_for_empty_schedule() {
        assert_eq!(NbaSchedule::default().slack_text().unwrap(), "0 games\n")
    }

    #[test]
    fn slack_text_lists_games_in_pacific_time() {
        let schedule = NbaSchedule {
            num_games: 2,
            games: vec![
                game("LAL", "BOS", "2024-02-02T00:00:00.000Z"),
                game("GSW", "PHX", "2024-02-02T18:30:00Z"),
            ],
        };
        assert_eq!(
            schedule.slack_text().unwrap(),
            "2 games\n:LAL: - :BOS: @ 4:00PM PST\n:GSW: - :PHX: @ 10:30AM PST\n"
        )
    }

    #[test]
    fn slack_text_keeps_pst_suffix_during_daylight_time() {
        let schedule = NbaSchedule {
            num_games: 1,
            games: vec![game("DEN", "MIA", "2023-06-02T00:30:00Z")],
        };
        assert_eq!(schedule.slack_text().unwrap(), "1 games\n:DEN: - :MIA: @ 5:30PM PST\n")
    }

    #[test]
    fn slack_text_fails_on_invalid_start_time() {
        let schedule = NbaSchedule { num_games: 1, games: vec![game("LAL", "BOS", "tonight")] };
        let error = schedule.slack_text().unwrap_err();
        assert!(error.to_string().contains("tonight"))
    }

    fn game(home: &str, visitor: &str, start_time_utc: &str) -> NbaGame {
        NbaGame {
            start_time_utc: start_time_utc.to_string(),
            home_team: NbaTeam { tri_code: home.to_string(), ..Default::default() },
            visiting_team: NbaTeam { tri_code: visitor.to_string(), ..Default::default() },
            ..Default::default()
        }
    }
}
