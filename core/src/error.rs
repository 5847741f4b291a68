use thiserror::Error;

#[derive(Error, Debug)]
pub enum MorseError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Dictionary table error: {0}")]
    Dictionary(String),
}

pub type MorseResult<T> = Result<T, MorseError>;
