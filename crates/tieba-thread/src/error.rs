use tieba_gate::ValidationError;
use tieba_types::CommentId;

/// Errors produced by comment thread operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThreadError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("comment not found: {0}")]
    UnknownComment(CommentId),
}

impl ThreadError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result alias for thread operations.
pub type ThreadResult<T> = Result<T, ThreadError>;
