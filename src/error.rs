use alloc::string::String;
use enough::StopReason;

/// Errors from BMP decoding, encoding, and the transform pipeline.
///
/// Every error is fatal to the operation that produced it; nothing is
/// retried internally and no output bytes are produced on failure. The
/// caller owns retry and exit policy.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    /// Input does not start with the `BM` signature.
    #[error("unrecognized format magic bytes")]
    UnrecognizedFormat,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// Short read: the input ended before the header or a pixel row did.
    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("buffer too small: need {needed} pixels, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    /// A geometric argument fell outside the image bounds.
    #[error("{param} {value} exceeds image bound {bound}")]
    OutOfBounds {
        param: &'static str,
        value: i64,
        bound: u32,
    },

    /// An argument is invalid regardless of image dimensions.
    #[error("invalid {param}: {value}")]
    InvalidArgument { param: &'static str, value: i64 },

    /// An operation token is not in the fixed vocabulary.
    #[error("unknown {kind}: {token:?}")]
    UnknownToken { kind: &'static str, token: String },

    /// The pipeline was given an empty operation list.
    #[error("no operations specified")]
    NoOperations,

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BmpError {
    fn from(r: StopReason) -> Self {
        BmpError::Cancelled(r)
    }
}
