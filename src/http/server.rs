use std::sync::Arc;

use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    middleware::from_fn,
    response::IntoResponse,
    routing::post,
    serve, Form, Json, Router,
};
use chrono::Utc;
use chrono_tz::America::Los_Angeles;
use tokio::net::TcpListener;

use crate::{
    nba::scoreboard::NbaScheduleLoader,
    slack::{command::SlashCommandRequest, events::SlackEventsPayload, handler::reply_for_command},
};

use super::{
    response_result::ResponseResult,
    server_environment::ServerEnvironment,
    signature::{verify_slack_signature_middleware, SlackSigningSecret},
};

/// Runs this tool as an http server using the specified `ServerEnvironment`.
pub async fn run_http_server(environment: Arc<ServerEnvironment>) -> anyhow::Result<()> {
    let server = nba_games_server(environment.signing_secret(), environment.scoreboard());
    let listener = TcpListener::bind(environment.address()).await?;
    log::info!("Listening on {}.", listener.local_addr()?);
    Ok(serve(listener, server).await?)
}

/// Builds the router, every route of which only accepts requests signed by slack.
pub fn nba_games_server(
    signing_secret: SlackSigningSecret,
    schedule_loader: Arc<impl NbaScheduleLoader + Send + Sync + 'static>,
) -> Router<()> {
    let signature_verification = from_fn(move |req, next| {
        verify_slack_signature_middleware(req, next, signing_secret.clone())
    });
    Router::new()
        .route("/", post(post_events))
        .route("/games", post(move |form| post_games(form, schedule_loader)))
        .route_layer(signature_verification)
}

async fn post_events(
    payload: Result<Json<SlackEventsPayload>, JsonRejection>,
) -> impl IntoResponse {
    let result = payload
        .map(|Json(payload)| payload.challenge_response())
        .map_err(anyhow::Error::new);
    ResponseResult::new(result)
}

async fn post_games(
    form: Result<Form<SlashCommandRequest>, FormRejection>,
    schedule_loader: Arc<impl NbaScheduleLoader + Send + Sync>,
) -> impl IntoResponse {
    log::info!("Handling games.");
    let result = match form {
        Ok(Form(request)) => {
            log::debug!("Slash command request {:?}.", request);
            let now = Utc::now().with_timezone(&Los_Angeles);
            reply_for_command(request.command(), &now, schedule_loader.as_ref())
                .await
                .map(Json)
        }
        Err(rejection) => Err(anyhow::Error::new(rejection)),
    };
    ResponseResult::new(result)
}
