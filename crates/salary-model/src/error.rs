use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("invalid role key: {0:?}")]
    InvalidRoleKey(String),
    #[error("invalid level key: {0:?}")]
    InvalidLevelKey(String),
    #[error("invalid skill key: {0:?}")]
    InvalidSkillKey(String),
    #[error("blend weight `{name}` must be a finite value in [0, 1], got {value}")]
    InvalidWeight { name: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, ModelError>;
