use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;
pub type ConfigError = Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("Failed to fetch URL: {0}")]
    Fetch(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl Error {
    /// Rejection used when a request carries no usable URL.
    pub fn missing_url() -> Self {
        Error::Validation("No URL provided".to_string())
    }

    pub fn is_temporary(&self) -> bool {
        matches!(self, Error::Fetch(_) | Error::Io(_))
    }

    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::Validation(_) | Error::Config(_)
        )
    }

    /// Status code reported by the JSON API for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            _ => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Validation(_) => "VALIDATION",
            Error::Fetch(_) => "FETCH",
            Error::Extraction(_) => "EXTRACTION",
            Error::Io(_) => "IO_ERROR",
            Error::Serialization(_) => "SERIALIZATION",
            Error::Config(_) => "CONFIG",
            Error::NotFound(_) => "NOT_FOUND",
            Error::AlreadyExists(_) => "ALREADY_EXISTS",
        }
    }
}
