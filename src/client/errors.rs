use thiserror::Error;

/// Failures surfaced by [`super::UsersClient`].
///
/// The display text is what the console shows in its banner, so variants
/// carry user-facing wording rather than transport detail.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("User not found")]
    NotFound,

    #[error("Email already exists")]
    DuplicateEmail,

    #[error("{message}")]
    Request { status: u16, message: String },

    #[error("Unable to reach the server: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
