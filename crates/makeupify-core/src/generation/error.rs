use thiserror::Error;

/// Generation failures as shown to the user.
///
/// `Display` is the user-facing message; the wrapped detail is the raw
/// failure text and only goes to logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Our servers are currently busy. Please wait about a minute and try again.")]
    RateLimited(String),

    #[error("System configuration error (Missing API Key).")]
    MissingCredential(String),

    #[error("Please check your internet connection and try again.")]
    NetworkUnavailable(String),

    #[error("The model could not generate an image. Please try another photo or look.")]
    NoImageReturned(String),

    #[error("Something went wrong. Please try again.")]
    Generic(String),
}

const RATE_LIMIT_MARKERS: [&str; 3] = ["429", "quota", "exhausted"];
const CREDENTIAL_MARKERS: [&str; 2] = ["api key not found", "missing api key"];
const NETWORK_MARKERS: [&str; 4] = ["network", "online", "connect", "timed out"];

impl GenerationError {
    /// Categorize a raw failure message by case-insensitive substring match.
    #[must_use]
    pub fn classify(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let lower = raw.to_lowercase();
        let has = |markers: &[&str]| markers.iter().any(|m| lower.contains(m));

        if has(&RATE_LIMIT_MARKERS) {
            Self::RateLimited(raw)
        } else if has(&CREDENTIAL_MARKERS) {
            Self::MissingCredential(raw)
        } else if has(&NETWORK_MARKERS) {
            Self::NetworkUnavailable(raw)
        } else {
            Self::Generic(raw)
        }
    }

    /// Message rendered verbatim by the wizard
    #[must_use]
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Raw failure text for logs
    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            Self::RateLimited(d)
            | Self::MissingCredential(d)
            | Self::NetworkUnavailable(d)
            | Self::NoImageReturned(d)
            | Self::Generic(d) => d,
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::NetworkUnavailable(err.to_string())
        } else {
            Self::classify(err.to_string())
        }
    }
}
