use crate::types::HttpResponse;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid header name: {0}")]
    InvalidHeaderName(#[from] http::header::InvalidHeaderName),

    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with a status outside the request's accepted range.
    #[error("HTTP {} {}", .response.status, .response.status_text)]
    Status { response: Box<HttpResponse> },

    #[error("Transport error: {message}")]
    Transport { message: String },
}

impl Error {
    /// Status code of the rejected response, if this is a status error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { response } => Some(response.status),
            _ => None,
        }
    }
}
