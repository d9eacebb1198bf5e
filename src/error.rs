use thiserror::Error;

#[derive(Error, Debug)]
pub enum WindowError {
    #[error("bad arguments :: {0}")]
    Argument(String),
    #[error("bad value :: {0}")]
    ValueConstraint(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WindowError {
    pub fn is_argument(&self) -> bool {
        matches!(self, Self::Argument(_))
    }

    pub fn is_value_constraint(&self) -> bool {
        matches!(self, Self::ValueConstraint(_))
    }
}

pub type WindowResult<T> = Result<T, WindowError>;
