use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog file error: {0}")]
    Catalog(#[from] toml::de::Error),

    #[error("unknown city: {0}")]
    UnknownCity(String),

    #[error("malformed record at line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("invalid input '{value}', expected one of: {expected}")]
    InvalidInput { value: String, expected: String },

    #[error("configuration error: {message}")]
    Config { message: String },
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
