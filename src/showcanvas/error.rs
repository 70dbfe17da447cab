use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShowCanvasError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to load shows: {0}")]
    Fetch(String),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Canvas error: {0}")]
    Canvas(String),

    #[error("Not connected to Dragvertising (run `showcanvas login`)")]
    NotAuthenticated,

    #[error("Show not found: {0}")]
    ShowNotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("{cause} (images skipped before it: {})", .skipped.join(", "))]
    InsertAborted {
        cause: Box<ShowCanvasError>,
        skipped: Vec<String>,
    },

    #[error("{0}")]
    ActionFailed(String),
}

pub type Result<T> = std::result::Result<T, ShowCanvasError>;
