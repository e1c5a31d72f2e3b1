use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Central directory size is off by an unexpected amount: {delta}")]
    UnrepairableArchive { delta: i64 },
    #[error("Unsupported resource {id} (tag {tag})")]
    UnsupportedResource { id: u16, tag: u8 },
    #[error("Malformed rule: {0}")]
    MalformedRule(String),
    #[error("Resource {0} not found")]
    MissingResource(u16),
    #[error("Texture {0} not found")]
    MissingTexture(usize),
    #[error("Media item {0} not found")]
    MissingMedia(String),
    #[error("Movie clip {clip} references missing bind {bind}")]
    InvalidBind { clip: u16, bind: usize },
    #[error("Matrix bank {bank} has no {kind} at index {index}")]
    MissingMatrix {
        bank: usize,
        kind: &'static str,
        index: u16,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<walkdir::Error> for ConvertError {
    fn from(error: walkdir::Error) -> Self {
        ConvertError::Io(error.into())
    }
}

pub type ConvertResult<T> = Result<T, ConvertError>;

#[cfg(test)]
#[path = "tests/errors_tests.rs"]
mod tests;
