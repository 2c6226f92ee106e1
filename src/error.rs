use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Track sample ({x}, {y}) is outside the {width}x{height} surface")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },

    #[error("Invalid vehicle geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid track: {0}")]
    InvalidTrack(String),

    #[error("Expected {expected} actions for the batch, got {actual}")]
    ActionCountMismatch { expected: usize, actual: usize },

    #[error("Expected {expected} policies for the batch, got {actual}")]
    PolicyCountMismatch { expected: usize, actual: usize },

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
