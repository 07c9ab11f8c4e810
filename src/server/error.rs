use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

pub type AppResult<T> = Result<T, Error>;

/// errors are split between the http facing ones and the per-source pipeline
/// ones. The pipeline variants never abort a whole resolution, they're
/// swallowed at the source boundary - only the initial title page fetch can
/// surface one of these to a client
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    // transport level failure towards the upstream site, timeouts included
    #[error("upstream request failed: {0}")]
    Upstream(String),

    // the anti-bot interstitial was detected but the solver couldn't (or
    // wasn't configured to) produce a clean response
    #[error("challenge bypass failed: {0}")]
    ChallengeBypass(String),

    // the per-id endpoint answered but there was no iframe to follow,
    // expected for dead sources
    #[error("no embed frame found in video response")]
    NoEmbedFound,

    // the player page loaded but carried no packed payload, some sources
    // legitimately have nothing playable
    #[error("no decodable link in player page")]
    NoDecodableLink,

    // the packed payload was malformed at one of the decode stages
    #[error("failed to decode packed url: {0}")]
    Decode(String),

    #[error("internal server error")]
    InternalServerError,

    #[error("{0}")]
    InternalServerErrorWithContext(String),
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) | Self::NoEmbedFound | Self::NoDecodableLink => {
                StatusCode::NOT_FOUND
            }
            Self::Upstream(_) | Self::ChallengeBypass(_) | Self::Decode(_) => {
                StatusCode::BAD_GATEWAY
            }
            Self::InternalServerError | Self::InternalServerErrorWithContext(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}
