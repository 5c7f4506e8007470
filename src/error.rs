use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocalizationError {
    #[error("landmark id {0} appears more than once in the map")]
    DuplicateLandmarkId(u32),

    #[error("landmark id {0} is not in the map")]
    UnknownLandmark(u32),

    #[error("innovation covariance is singular while fusing landmark {0}")]
    SingularInnovationCovariance(u32),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for LocalizationError {
    fn from(e: toml::de::Error) -> Self {
        LocalizationError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LocalizationError>;
