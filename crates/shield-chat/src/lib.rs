//! Keyword chat assistant for Desert Shield Auto Paint.
//!
//! Classifies free-text questions against a fixed, ordered rule table and
//! drives one conversation per [`ChatSession`], including photo turns and the
//! simulated thinking delay.

pub mod classifier;
pub mod error;
pub mod knowledge;
pub mod markup;
pub mod session;

pub use classifier::{MessageClassifier, ResponseCategory};
pub use error::ChatError;
pub use knowledge::{FALLBACK_REPLY, IMAGE_ACK, WELCOME};
pub use markup::{render_html, render_plain};
pub use session::{
    ChatSession, ConversationTurn, Reply, ReplyTicket, Role, SessionState, ThinkingDelay,
    Transcript,
};
