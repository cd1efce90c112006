use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MobilityError {
    #[error("walking speed must be positive and finite, got {0}")]
    InvalidSpeed(f32),
}

pub type MobilityResult<T> = Result<T, MobilityError>;
