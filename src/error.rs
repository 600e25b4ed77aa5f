use thiserror::Error;

pub type BridgeResult<T> = Result<T, BridgeError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BridgeError {
    #[error("index out of bounds: index={index}, len={len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("unable to create container element without a factory")]
    MissingFactory,

    #[error("unable to materialize element at index {index}")]
    UnmappedElement { index: usize },

    #[error("unsupported operation `{operation}`: unable to copy into an array")]
    Unsupported { operation: &'static str },

    #[error("field `{name}` is not configurable")]
    NonConfigurable { name: String },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
