use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Client-correctable input failures; carries every message collected
    /// during validation, in the order the checks ran.
    #[error("validation error: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("database error: {0}")]
    Db(String),
}
