use anyhow::Result;
use chrono::DateTime;
use chrono_tz::Tz;

use crate::nba::scoreboard::{NbaScheduleDate, NbaScheduleLoader};

use super::{command::NbaGamesCommand, reply::SlackReply};

pub const HELP_TEXT: &str =
    "Get the nba schedule with the slash command `/nba_games today` or `/nba_games tomorrow`";

pub const NOT_UNDERSTOOD_TEXT: &str = "Hmmm, I don't understand.\n\
    Get the nba schedule with the slash command `/nba_games today` or `/nba_games tomorrow`";

/// Returns the reply to a `/nba_games` sub-command.
///
/// `now` decides which calendar days "today" and "tomorrow" refer to, so it should already be in
/// the timezone that the schedule is meant for.
pub async fn reply_for_command(
    command: Option<NbaGamesCommand>,
    now: &DateTime<Tz>,
    loader: &impl NbaScheduleLoader,
) -> Result<SlackReply> {
    match command {
        Some(NbaGamesCommand::Today) => {
            schedule_reply(NbaScheduleDate::today(now), loader).await
        }
        Some(NbaGamesCommand::Tomorrow) => {
            schedule_reply(NbaScheduleDate::tomorrow(now)?, loader).await
        }
        Some(NbaGamesCommand::Help) => Ok(SlackReply::ephemeral(HELP_TEXT)),
        None => {
            log::info!(
                "Unrecognized sub-command, expected any of {}.",
                NbaGamesCommand::keywords().join(", ")
            );
            Ok(SlackReply::ephemeral(NOT_UNDERSTOOD_TEXT))
        }
    }
}

async fn schedule_reply(
    date: NbaScheduleDate,
    loader: &impl NbaScheduleLoader,
) -> Result<SlackReply> {
    let schedule = loader.load_schedule(date).await?;
    Ok(SlackReply::in_channel(&schedule.slack_text()?))
}
