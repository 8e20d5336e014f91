use std::{
    env,
    error::Error,
    fmt::{Debug, Display, Formatter},
};

use anyhow::{anyhow, Context, Result};
use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{header::CONTENT_LENGTH, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

pub const SLACK_TIMESTAMP_HEADER: &str = "X-Slack-Request-Timestamp";
pub const SLACK_SIGNATURE_HEADER: &str = "X-Slack-Signature";

/// The oldest a signed request may be before it is rejected as a possible replay.
pub const MAX_REQUEST_AGE_SECONDS: i64 = 60 * 5;

/// The largest request body that is read to verify its signature. Slack payloads are far smaller.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

const SIGNATURE_VERSION: &str = "v0";

type HmacSha256 = Hmac<Sha256>;

/// The signing secret of the slack app, used to verify that requests were sent by slack.
#[derive(Clone)]
pub struct SlackSigningSecret {
    secret: String,
}

impl Debug for SlackSigningSecret {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackSigningSecret").field("secret", &"<redacted>").finish()
    }
}

impl SlackSigningSecret {
    pub fn new(secret: &str) -> Result<Self> {
        if secret.is_empty() {
            Err(anyhow!("The slack signing secret must not be empty."))
        } else {
            Ok(Self { secret: secret.to_string() })
        }
    }

    /// Loads the secret from the `SLACK_SS` environment variable.
    pub fn from_env() -> Result<Self> {
        let secret = env::var("SLACK_SS").context(
            "SLACK_SS not found, set it to the signing secret from the slack app console.",
        )?;
        Self::new(&secret)
    }
}

/// The parts of a request that its signature covers.
#[derive(Debug, Clone, Copy)]
pub struct SignatureContext<'a> {
    timestamp: &'a str,
    body: &'a [u8],
    signature: &'a str,
}

impl<'a> SignatureContext<'a> {
    pub fn new(timestamp: &'a str, body: &'a [u8], signature: &'a str) -> Self {
        Self { timestamp, body, signature }
    }

    /// Reads the timestamp and signature from the slack headers, missing headers are empty.
    pub fn from_headers(headers: &'a HeaderMap, body: &'a [u8]) -> Self {
        let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).unwrap_or("");
        Self::new(header(SLACK_TIMESTAMP_HEADER), body, header(SLACK_SIGNATURE_HEADER))
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SignatureRejection {
    /// The timestamp is missing or not a number of seconds.
    MalformedTimestamp,
    /// The request is older than `MAX_REQUEST_AGE_SECONDS`.
    Expired,
    /// The signature does not match the one computed from the secret.
    Mismatch,
}

impl Display for SignatureRejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedTimestamp => write!(f, "Malformed Slack Request Timestamp"),
            Self::Expired => write!(f, "Authorized Time Expired"),
            Self::Mismatch => write!(f, "Forbidden"),
        }
    }
}

impl Error for SignatureRejection {}

impl IntoResponse for SignatureRejection {
    fn into_response(self) -> Response {
        let body = match self {
            // NB: A timestamp that doesn't parse can never be within the allowed window.
            Self::MalformedTimestamp | Self::Expired => Self::Expired.to_string(),
            Self::Mismatch => Self::Mismatch.to_string(),
        };
        (StatusCode::FORBIDDEN, body).into_response()
    }
}

impl SlackSigningSecret {
    fn mac(&self, timestamp: &str, body: &[u8]) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC can take a key of any size.");
        mac.update(SIGNATURE_VERSION.as_bytes());
        mac.update(b":");
        mac.update(timestamp.as_bytes());
        mac.update(b":");
        mac.update(body);
        mac
    }

    /// Returns the `v0=<hex digest>` signature that slack would send for the timestamp and body.
    pub fn signature(&self, timestamp: &str, body: &[u8]) -> String {
        let digest = self.mac(timestamp, body).finalize().into_bytes();
        format!("{}={}", SIGNATURE_VERSION, hex::encode(digest))
    }

    /// Verifies that the request described by `context` was signed with this secret no more than
    /// `MAX_REQUEST_AGE_SECONDS` before `now`.
    ///
    /// Timestamps in the future are accepted.
    pub fn verify(
        &self,
        context: &SignatureContext,
        now: DateTime<Utc>,
    ) -> Result<(), SignatureRejection> {
        let timestamp = context
            .timestamp
            .parse::<i64>()
            .map_err(|_| SignatureRejection::MalformedTimestamp)?;
        if now.timestamp().saturating_sub(timestamp) > MAX_REQUEST_AGE_SECONDS {
            return Err(SignatureRejection::Expired);
        }
        let digest = context
            .signature
            .strip_prefix(SIGNATURE_VERSION)
            .and_then(|s| s.strip_prefix('='))
            .and_then(|hex_digest| hex::decode(hex_digest).ok())
            .ok_or(SignatureRejection::Mismatch)?;
        self.mac(context.timestamp, context.body)
            .verify_slice(&digest)
            .map_err(|_| SignatureRejection::Mismatch)
    }
}

/// Middleware to check that a request was signed by slack with the `SlackSigningSecret`.
///
/// The body has to be buffered to compute the signature, the buffered body is handed to the next
/// handler once the request is verified. Bodies over `MAX_BODY_BYTES` are rejected without being
/// buffered past the limit.
pub async fn verify_slack_signature_middleware(
    req: Request,
    next: Next,
    secret: SlackSigningSecret,
) -> Response {
    let (parts, body) = req.into_parts();
    let declared_length = parts
        .headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    if declared_length.is_some_and(|length| length > MAX_BODY_BYTES) {
        log::warn!("Rejected request to {} with a body too large.", parts.uri.path());
        return StatusCode::PAYLOAD_TOO_LARGE.into_response();
    }
    let bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(error) => {
            log::warn!("Failed to read the request body to {} {}.", parts.uri.path(), error);
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };
    let context = SignatureContext::from_headers(&parts.headers, &bytes);
    if let Err(rejection) = secret.verify(&context, Utc::now()) {
        log::warn!("Rejected request to {}: {}.", parts.uri.path(), rejection);
        return rejection.into_response();
    }
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}
