use std::fmt;

/// Errors produced while decoding, compositing or encoding images
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Image has no pixels, or pixel buffer does not match requested size
    InvalidDimensions { width: usize, height: usize },
    /// Input is not in any of the supported image formats
    UnsupportedFormat,
    /// Input looks like a supported format but can not be decoded
    CorruptData { reason: String },
    /// Image encoder failed to produce an output
    EncodeFailure { reason: String },
    /// Gradient parameters record is malformed
    ParamsError { reason: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDimensions { width, height } => {
                write!(f, "Invalid image dimensions {}x{}", width, height)
            }
            Error::UnsupportedFormat => write!(f, "Unsupported image format"),
            Error::CorruptData { reason } => write!(f, "Corrupt image data: {}", reason),
            Error::EncodeFailure { reason } => write!(f, "Failed to encode image: {}", reason),
            Error::ParamsError { reason } => write!(f, "Invalid gradient parameters: {}", reason),
        }
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::ParamsError {
            reason: error.to_string(),
        }
    }
}

impl From<Error> for std::io::Error {
    fn from(error: Error) -> Self {
        Self::new(std::io::ErrorKind::InvalidData, error)
    }
}

impl std::error::Error for Error {}
