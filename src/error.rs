use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Runtime data did not hold exactly `rows * columns` values.
    ShapeMismatch { rows: usize, columns: usize, found: usize },
    InvalidConfig(String),
    EmptyDataset,
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ShapeMismatch { rows, columns, found } => {
                write!(f, "shape mismatch: a {rows} x {columns} matrix needs {} values, found {found}", rows * columns)
            }
            Error::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Error::EmptyDataset => write!(f, "cannot train on an empty dataset"),
        }
    }
}

impl std::error::Error for Error {}
