use std::fmt;

#[derive(Debug)]
pub enum ImageFxError {
    MissingArgument(String),
    ConfigError(String),
    AuthError(String),
    RequestError(String),
    ResponseError(String),
    UnsupportedClient(String),
    SaveError(String),
}

impl fmt::Display for ImageFxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageFxError::MissingArgument(name) => {
                write!(f, "Missing required argument: --{}", name)
            }
            ImageFxError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ImageFxError::AuthError(msg) => write!(f, "Authentication error: {}", msg),
            ImageFxError::RequestError(msg) => write!(f, "Request error: {}", msg),
            ImageFxError::ResponseError(msg) => write!(f, "Response error: {}", msg),
            ImageFxError::UnsupportedClient(msg) => write!(f, "Unsupported client: {}", msg),
            ImageFxError::SaveError(msg) => write!(f, "Save error: {}", msg),
        }
    }
}

impl std::error::Error for ImageFxError {}

pub type Result<T> = std::result::Result<T, ImageFxError>;
