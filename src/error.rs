use serde_json::error::Category;

/// Errors raised while converting or plotting
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl ConvertError {
    pub fn schema(message: impl Into<String>) -> Self {
        ConvertError::Schema(message.into())
    }
}

/// Split serde_json failures into syntax problems and shape problems
impl From<serde_json::Error> for ConvertError {
    fn from(e: serde_json::Error) -> Self {
        match e.classify() {
            Category::Io => ConvertError::Io(e.into()),
            Category::Syntax | Category::Eof => ConvertError::Parse(e),
            Category::Data => ConvertError::Schema(e.to_string()),
        }
    }
}
