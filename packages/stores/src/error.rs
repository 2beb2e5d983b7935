#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Errors from the HTTP client, passed through untouched.
    #[error(transparent)]
    Http(#[from] storefront_http::Error),

    #[error("Invalid endpoint: {message}")]
    InvalidEndpoint { message: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Config error: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Status code when the server rejected the request.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http(e) => e.status(),
            _ => None,
        }
    }
}
