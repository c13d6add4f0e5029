//! Conversation session: turn-taking, the thinking delay and reply selection.
//!
//! A turn moves through the session states in a fixed cycle:
//! - Idle -> Composing (user submits text and/or photos)
//! - Composing -> Dispatched (user turn appended, tray cleared)
//! - Dispatched -> AwaitingReply (thinking delay running)
//! - AwaitingReply -> Idle (assistant turn appended)
//!
//! Only one turn is in flight at a time. The delay runs on a [`ReplyTicket`]
//! that does not borrow the session, so a host can keep rendering while it
//! waits and then hand the result back through [`ChatSession::deliver`].
//! Dropping the ticket (or its [`Reply`]) before delivery abandons the turn
//! and the session returns to idle.

use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;

use rand::Rng;
use shield_core::config::{ChatConfig, ShieldConfig};
use shield_core::types::{PendingImage, Timestamp};
use shield_intake::{ImageTray, IntakeLimits, IntakePipeline, IntakeRejection, RawFile};

use crate::classifier::MessageClassifier;
use crate::error::ChatError;
use crate::knowledge::{IMAGE_ACK, WELCOME};

// =============================================================================
// State
// =============================================================================

/// Where the session is in the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No turn in flight. Accepts new input.
    Idle,
    /// Building the user turn from text and pending photos.
    Composing,
    /// User turn recorded, reply not yet started.
    Dispatched,
    /// Thinking delay running.
    AwaitingReply,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "Idle"),
            SessionState::Composing => write!(f, "Composing"),
            SessionState::Dispatched => write!(f, "Dispatched"),
            SessionState::AwaitingReply => write!(f, "AwaitingReply"),
        }
    }
}

impl SessionState {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &SessionState) -> bool {
        matches!(
            (self, target),
            (SessionState::Idle, SessionState::Composing)
                | (SessionState::Composing, SessionState::Dispatched)
                | (SessionState::Dispatched, SessionState::AwaitingReply)
                | (SessionState::AwaitingReply, SessionState::Idle)
        )
    }
}

// =============================================================================
// Transcript
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Assistant,
}

/// One message in the transcript.
#[derive(Debug)]
pub struct ConversationTurn {
    pub id: u64,
    pub role: Role,
    pub text: Option<String>,
    pub images: Vec<PendingImage>,
    pub timestamp: Timestamp,
}

impl ConversationTurn {
    /// A user turn. Needs non-empty text or at least one image.
    pub fn user(id: u64, text: &str, images: Vec<PendingImage>) -> Result<Self, ChatError> {
        let text = text.trim();
        if text.is_empty() && images.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        Ok(Self {
            id,
            role: Role::User,
            text: (!text.is_empty()).then(|| text.to_string()),
            images,
            timestamp: Timestamp::now(),
        })
    }

    /// An assistant turn. Text must be non-empty.
    pub fn assistant(id: u64, text: &str) -> Result<Self, ChatError> {
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        Ok(Self {
            id,
            role: Role::Assistant,
            text: Some(text.to_string()),
            images: Vec::new(),
            timestamp: Timestamp::now(),
        })
    }

    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }
}

/// Append-only list of turns.
#[derive(Debug, Default)]
pub struct Transcript {
    turns: Vec<ConversationTurn>,
}

impl Transcript {
    fn push(&mut self, turn: ConversationTurn) -> &ConversationTurn {
        self.turns.push(turn);
        &self.turns[self.turns.len() - 1]
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }
}

// =============================================================================
// Thinking delay
// =============================================================================

/// Range the simulated thinking delay is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThinkingDelay {
    min: Duration,
    max: Duration,
}

impl Default for ThinkingDelay {
    fn default() -> Self {
        Self::from(&ChatConfig::default())
    }
}

impl From<&ChatConfig> for ThinkingDelay {
    fn from(config: &ChatConfig) -> Self {
        Self::new(
            Duration::from_millis(config.min_delay_ms),
            Duration::from_millis(config.max_delay_ms),
        )
    }
}

impl ThinkingDelay {
    /// Bounds are swapped if given in the wrong order.
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// No delay at all.
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    /// Draw one delay uniformly from `[min, max]`.
    pub fn sample(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let mut rng = rand::rng();
        let nanos = rng.random_range(self.min.as_nanos()..=self.max.as_nanos());
        Duration::from_nanos(nanos as u64)
    }
}

// =============================================================================
// Reply ticket
// =============================================================================

/// The selected reply for an in-flight turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub turn_id: u64,
    pub text: &'static str,
    /// Matched rule key. `None` for the photo acknowledgment and the fallback.
    pub category: Option<&'static str>,
    claim: Arc<()>,
}

/// A pending reply for one user turn.
///
/// Dropping the ticket abandons the turn: the reply is discarded, the
/// transcript is left untouched and the session accepts input again.
#[derive(Debug)]
pub struct ReplyTicket {
    turn_id: u64,
    claim: Arc<()>,
    text: Option<String>,
    had_images: bool,
    delay: Duration,
    classifier: Arc<MessageClassifier>,
}

impl ReplyTicket {
    pub fn turn_id(&self) -> u64 {
        self.turn_id
    }

    /// The delay this ticket will sleep for.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Sleep for the thinking delay, then pick the reply.
    pub async fn wait(self) -> Reply {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.select()
    }

    fn select(&self) -> Reply {
        if self.had_images {
            return Reply {
                turn_id: self.turn_id,
                text: IMAGE_ACK,
                category: None,
                claim: Arc::clone(&self.claim),
            };
        }
        let text = self.text.as_deref().unwrap_or_default();
        let category = self.classifier.classify_category(text).map(|c| c.key);
        Reply {
            turn_id: self.turn_id,
            text: self.classifier.classify(text),
            category,
            claim: Arc::clone(&self.claim),
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// The turn awaiting a reply. The claim dies with the ticket and its reply.
#[derive(Debug)]
struct InFlight {
    turn_id: u64,
    claim: Weak<()>,
}

impl InFlight {
    fn abandoned(&self) -> bool {
        self.claim.strong_count() == 0
    }
}

/// One chat widget instance: transcript, pending photos and turn state.
#[derive(Debug)]
pub struct ChatSession {
    state: SessionState,
    transcript: Transcript,
    tray: ImageTray,
    pipeline: IntakePipeline,
    classifier: Arc<MessageClassifier>,
    delay: ThinkingDelay,
    in_flight: Option<InFlight>,
    next_turn_id: u64,
}

impl ChatSession {
    pub fn new(
        classifier: Arc<MessageClassifier>,
        pipeline: IntakePipeline,
        delay: ThinkingDelay,
    ) -> Self {
        Self {
            state: SessionState::Idle,
            transcript: Transcript::default(),
            tray: pipeline.tray(),
            pipeline,
            classifier,
            delay,
            in_flight: None,
            next_turn_id: 1,
        }
    }

    /// A session using the `[intake]` and `[chat]` sections of `config`.
    pub fn from_config(config: &ShieldConfig, classifier: Arc<MessageClassifier>) -> Self {
        Self::new(
            classifier,
            IntakePipeline::new(IntakeLimits::from(&config.intake)),
            ThinkingDelay::from(&config.chat),
        )
    }

    /// Current state. An abandoned turn reads as idle.
    pub fn state(&self) -> SessionState {
        if self.in_flight.as_ref().is_some_and(InFlight::abandoned) {
            SessionState::Idle
        } else {
            self.state
        }
    }

    pub fn is_busy(&self) -> bool {
        self.state() != SessionState::Idle
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn tray(&self) -> &ImageTray {
        &self.tray
    }

    pub fn pending_images(&self) -> &[PendingImage] {
        self.tray.images()
    }

    fn transition(&mut self, target: SessionState) -> Result<(), ChatError> {
        if self.state.can_transition_to(&target) {
            tracing::debug!("Chat session state: {} -> {}", self.state, target);
            self.state = target;
            Ok(())
        } else {
            Err(ChatError::InvalidTransition {
                from: self.state,
                to: target,
            })
        }
    }

    /// Return to idle if the in-flight turn's ticket and reply are gone.
    fn release_abandoned(&mut self) {
        let Some(turn_id) = self
            .in_flight
            .as_ref()
            .filter(|f| f.abandoned())
            .map(|f| f.turn_id)
        else {
            return;
        };
        self.in_flight = None;
        if self.transition(SessionState::Idle).is_ok() {
            tracing::info!(turn = turn_id, "Reply abandoned, session released");
        }
    }

    fn allocate_turn_id(&mut self) -> u64 {
        let id = self.next_turn_id;
        self.next_turn_id += 1;
        id
    }

    /// Append the opening assistant message to an empty transcript.
    pub fn greet(&mut self) -> Option<&ConversationTurn> {
        self.release_abandoned();
        if !self.transcript.is_empty() || self.is_busy() {
            return None;
        }
        let id = self.allocate_turn_id();
        let turn = ConversationTurn::assistant(id, WELCOME).ok()?;
        Some(self.transcript.push(turn))
    }

    /// Validate files and add the accepted ones to the pending photos.
    pub async fn attach(&mut self, files: Vec<RawFile>) -> Vec<IntakeRejection> {
        self.tray.attach(&self.pipeline, files).await
    }

    /// Remove one pending photo.
    pub fn remove_image(&mut self, index: usize) -> Option<PendingImage> {
        self.tray.remove(index)
    }

    /// Record a user turn and start its reply.
    ///
    /// The pending photos move into the turn. Fails with [`ChatError::Busy`]
    /// while another turn is in flight and with [`ChatError::EmptyMessage`]
    /// when there is neither text nor a photo; neither failure changes state.
    pub fn submit(&mut self, text: &str) -> Result<ReplyTicket, ChatError> {
        self.release_abandoned();
        if self.is_busy() {
            tracing::debug!(state = %self.state, "Submission ignored, session busy");
            return Err(ChatError::Busy);
        }
        if text.trim().is_empty() && self.tray.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        self.transition(SessionState::Composing)?;
        let id = self.allocate_turn_id();
        let images = self.tray.take_all();
        let turn = ConversationTurn::user(id, text, images)?;
        let had_images = turn.has_images();
        let turn_text = turn.text.clone();
        self.transcript.push(turn);
        self.transition(SessionState::Dispatched)?;

        let delay = self.delay.sample();
        self.transition(SessionState::AwaitingReply)?;
        let claim = Arc::new(());
        self.in_flight = Some(InFlight {
            turn_id: id,
            claim: Arc::downgrade(&claim),
        });

        tracing::info!(
            turn = id,
            images = had_images,
            delay_ms = delay.as_millis() as u64,
            "User turn dispatched"
        );

        Ok(ReplyTicket {
            turn_id: id,
            claim,
            text: turn_text,
            had_images,
            delay,
            classifier: Arc::clone(&self.classifier),
        })
    }

    /// Append the assistant turn for the in-flight turn and return to idle.
    pub fn deliver(&mut self, reply: Reply) -> Result<&ConversationTurn, ChatError> {
        if self.in_flight.as_ref().map(|f| f.turn_id) != Some(reply.turn_id) {
            tracing::warn!(turn = reply.turn_id, "Discarding stale reply");
            return Err(ChatError::StaleReply(reply.turn_id));
        }
        let id = self.allocate_turn_id();
        let turn = ConversationTurn::assistant(id, reply.text)?;
        self.transition(SessionState::Idle)?;
        self.in_flight = None;
        tracing::info!(
            turn = reply.turn_id,
            category = reply.category.unwrap_or("none"),
            "Assistant reply delivered"
        );
        Ok(self.transcript.push(turn))
    }

    /// Submit, wait out the thinking delay and deliver the reply.
    pub async fn send(&mut self, text: &str) -> Result<&ConversationTurn, ChatError> {
        let ticket = self.submit(text)?;
        let reply = ticket.wait().await;
        self.deliver(reply)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::FALLBACK_REPLY;

    fn session() -> ChatSession {
        ChatSession::new(
            Arc::new(MessageClassifier::new()),
            IntakePipeline::default(),
            ThinkingDelay::none(),
        )
    }

    fn jpeg(name: &str) -> RawFile {
        RawFile::new(name, "image/jpeg", vec![0xFF, 0xD8])
    }

    #[test]
    fn test_state_display() {
        assert_eq!(SessionState::Idle.to_string(), "Idle");
        assert_eq!(SessionState::Composing.to_string(), "Composing");
        assert_eq!(SessionState::Dispatched.to_string(), "Dispatched");
        assert_eq!(SessionState::AwaitingReply.to_string(), "AwaitingReply");
    }

    #[test]
    fn test_valid_transitions() {
        assert!(SessionState::Idle.can_transition_to(&SessionState::Composing));
        assert!(SessionState::Composing.can_transition_to(&SessionState::Dispatched));
        assert!(SessionState::Dispatched.can_transition_to(&SessionState::AwaitingReply));
        assert!(SessionState::AwaitingReply.can_transition_to(&SessionState::Idle));
    }

    #[test]
    fn test_invalid_transitions() {
        assert!(!SessionState::Idle.can_transition_to(&SessionState::AwaitingReply));
        assert!(!SessionState::Composing.can_transition_to(&SessionState::Idle));
        assert!(!SessionState::AwaitingReply.can_transition_to(&SessionState::Composing));
        assert!(!SessionState::Idle.can_transition_to(&SessionState::Idle));
    }

    #[test]
    fn test_thinking_delay_bounds() {
        let delay = ThinkingDelay::default();
        assert_eq!(delay.min(), Duration::from_millis(600));
        assert_eq!(delay.max(), Duration::from_millis(1400));
        for _ in 0..100 {
            let d = delay.sample();
            assert!(d >= delay.min() && d <= delay.max());
        }
    }

    #[test]
    fn test_thinking_delay_swapped_bounds() {
        let delay = ThinkingDelay::new(Duration::from_millis(50), Duration::from_millis(10));
        assert_eq!(delay.min(), Duration::from_millis(10));
        assert_eq!(delay.max(), Duration::from_millis(50));
        assert_eq!(ThinkingDelay::none().sample(), Duration::ZERO);
    }

    #[test]
    fn test_turn_invariants() {
        assert_eq!(
            ConversationTurn::user(1, "  ", Vec::new()).unwrap_err(),
            ChatError::EmptyMessage
        );
        assert_eq!(
            ConversationTurn::assistant(1, "").unwrap_err(),
            ChatError::EmptyMessage
        );
        let turn = ConversationTurn::user(1, "  hi  ", Vec::new()).unwrap();
        assert_eq!(turn.text.as_deref(), Some("hi"));
        assert_eq!(turn.role, Role::User);
    }

    #[test]
    fn test_greet_only_once() {
        let mut s = session();
        assert!(s.greet().is_some());
        assert!(s.greet().is_none());
        assert_eq!(s.transcript().len(), 1);
        assert_eq!(s.transcript().turns()[0].text.as_deref(), Some(WELCOME));
    }

    #[test]
    fn test_empty_submit_rejected_without_state_change() {
        let mut s = session();
        assert_eq!(s.submit("   ").unwrap_err(), ChatError::EmptyMessage);
        assert_eq!(s.state(), SessionState::Idle);
        assert!(s.transcript().is_empty());
    }

    #[test]
    fn test_busy_while_awaiting_reply() {
        let mut s = session();
        let ticket = s.submit("hello").unwrap();
        assert_eq!(s.state(), SessionState::AwaitingReply);
        assert!(s.is_busy());

        assert_eq!(s.submit("another").unwrap_err(), ChatError::Busy);
        assert_eq!(s.transcript().len(), 1);

        let reply = ticket.select();
        s.deliver(reply).unwrap();
        assert_eq!(s.state(), SessionState::Idle);
        assert_eq!(s.transcript().len(), 2);
    }

    #[test]
    fn test_stale_reply_rejected() {
        let mut s = session();
        let ticket = s.submit("hello").unwrap();
        let stale = Reply {
            turn_id: ticket.turn_id() + 100,
            text: FALLBACK_REPLY,
            category: None,
            claim: Arc::new(()),
        };
        assert_eq!(
            s.deliver(stale).unwrap_err(),
            ChatError::StaleReply(ticket.turn_id() + 100)
        );
        assert_eq!(s.state(), SessionState::AwaitingReply);
        assert_eq!(s.transcript().len(), 1);
    }

    #[test]
    fn test_dropped_ticket_leaves_no_partial_turn() {
        let mut s = session();
        drop(s.submit("hello").unwrap());
        assert_eq!(s.transcript().len(), 1);
        assert_eq!(s.transcript().last().unwrap().role, Role::User);

        assert!(!s.is_busy());
        assert_eq!(s.state(), SessionState::Idle);
        let ticket = s.submit("what are your hours?").unwrap();
        assert_eq!(s.transcript().len(), 2);
        s.deliver(ticket.select()).unwrap();
        assert_eq!(s.transcript().len(), 3);
        assert_eq!(s.transcript().last().unwrap().role, Role::Assistant);
    }

    #[test]
    fn test_held_reply_keeps_turn_in_flight() {
        let mut s = session();
        let ticket = s.submit("hello").unwrap();
        let reply = ticket.select();
        drop(ticket);
        assert!(s.is_busy());
        assert_eq!(s.submit("again").unwrap_err(), ChatError::Busy);
        s.deliver(reply).unwrap();
        assert_eq!(s.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_cancelled_send_releases_session() {
        let mut s = ChatSession::new(
            Arc::new(MessageClassifier::new()),
            IntakePipeline::default(),
            ThinkingDelay::new(Duration::from_millis(200), Duration::from_millis(200)),
        );
        let timed_out = tokio::time::timeout(Duration::from_millis(10), s.send("hello"))
            .await
            .is_err();
        assert!(timed_out);
        assert_eq!(s.state(), SessionState::Idle);
        assert_eq!(s.transcript().len(), 1);

        let ticket = s.submit("what are your hours?").unwrap();
        s.deliver(ticket.select()).unwrap();
        assert_eq!(s.transcript().len(), 3);
    }

    #[tokio::test]
    async fn test_send_text_turn() {
        let mut s = session();
        let turn = s.send("who owns the shop?").await.unwrap();
        assert_eq!(turn.role, Role::Assistant);
        assert!(turn.text.as_deref().unwrap().contains("Ryan Graham"));
        assert_eq!(s.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_photo_turn_moves_images_and_acks() {
        let mut s = session();
        assert!(s.attach(vec![jpeg("a.jpg")]).await.is_empty());
        assert_eq!(s.pending_images().len(), 1);

        let reply = s.send("how much for a dent?").await.unwrap();
        assert_eq!(reply.text.as_deref(), Some(IMAGE_ACK));
        assert!(s.pending_images().is_empty());

        let user = &s.transcript().turns()[0];
        assert_eq!(user.images.len(), 1);
        assert_eq!(user.text.as_deref(), Some("how much for a dent?"));
    }

    #[tokio::test]
    async fn test_ticket_sleeps_for_delay() {
        let mut s = ChatSession::new(
            Arc::new(MessageClassifier::new()),
            IntakePipeline::default(),
            ThinkingDelay::new(Duration::from_millis(20), Duration::from_millis(20)),
        );
        let ticket = s.submit("hello").unwrap();
        assert_eq!(ticket.delay(), Duration::from_millis(20));
        let start = std::time::Instant::now();
        let reply = ticket.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(20));
        assert_eq!(reply.category, Some("greeting"));
    }

    #[tokio::test]
    async fn test_remove_image_before_send() {
        let mut s = session();
        s.attach(vec![jpeg("a.jpg"), jpeg("b.jpg")]).await;
        let removed = s.remove_image(0).unwrap();
        assert_eq!(removed.name, "a.jpg");
        assert_eq!(s.pending_images()[0].name, "b.jpg");
        assert!(s.remove_image(5).is_none());
    }
}
