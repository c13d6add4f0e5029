//! Error types for the chat session.

use shield_core::error::ShieldError;

use crate::session::SessionState;

/// Errors from the chat session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("a reply is already in progress")]
    Busy,
    #[error("reply for turn {0} does not match the turn in flight")]
    StaleReply(u64),
    #[error("invalid session transition: {from} -> {to}")]
    InvalidTransition { from: SessionState, to: SessionState },
}

impl From<ChatError> for ShieldError {
    fn from(err: ChatError) -> Self {
        ShieldError::Chat(err.to_string())
    }
}
