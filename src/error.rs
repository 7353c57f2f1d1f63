use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, RnnErr>;

/// The crate's error type.
#[derive(Debug)]
pub enum RnnErr {
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    EmptyBatch,
    NonBinary {
        row: usize,
        col: usize,
        value: f64,
    },
    InvalidConfig(String),
    Io(io::Error),
    Json(serde_json::Error),
}

impl Display for RnnErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RnnErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch in {what}, got {got} and expected {expected}"
            ),
            RnnErr::EmptyBatch => write!(f, "The batch must contain at least one sample"),
            RnnErr::NonBinary { row, col, value } => write!(
                f,
                "Expected a binary value at ({row}, {col}) but got {value}"
            ),
            RnnErr::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            RnnErr::Io(e) => write!(f, "io error: {e}"),
            RnnErr::Json(e) => write!(f, "json error: {e}"),
        }
    }
}

impl Error for RnnErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RnnErr::Io(e) => Some(e),
            RnnErr::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for RnnErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for RnnErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
