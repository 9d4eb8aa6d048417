#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    InvalidDate(String),
    DocumentWrite(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::InvalidDate(value) => {
                write!(f, "Invalid date: {}", value)
            }
            DomainError::DocumentWrite(msg) => {
                write!(f, "Could not write document: {}", msg)
            }
        }
    }
}

impl std::error::Error for DomainError {}

pub type DomainResult<T> = Result<T, DomainError>;
