use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("The login response did not contain an auth token")]
    NotAuthenticated,

    #[error("Value cannot be sent as a header: {0}")]
    InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Failed to parse response body: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport failures and non-2xx responses alike. The status of a non-2xx response is available from
    /// [reqwest::Error::status].
    #[error(transparent)]
    HttpError(#[from] reqwest::Error),
}

impl Error {
    /// The HTTP status code of the response that caused this error, if the error came from a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpError(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}
