//! Quote request form and best-effort submission dispatch.
//!
//! [`QuoteForm`] validates the customer's fields and owns the form's photo
//! tray. [`SubmissionDispatcher`] hands a finished [`QuoteSubmission`] to the
//! EmailJS transport and falls back to a local JSON log when that fails.

pub mod dispatcher;
pub mod error;
pub mod form;
pub mod store;
pub mod submission;
pub mod transport;

pub use dispatcher::{DispatchOutcome, SubmissionDispatcher};
pub use error::{DispatchError, FieldError, QuoteField, ValidationErrors};
pub use form::{QuoteFields, QuoteForm};
pub use store::LocalSubmissionLog;
pub use submission::{EncodedImage, FallbackRecord, ImageRef, QuoteSubmission, TemplateParams};
pub use transport::{EmailJsTransport, NotificationTransport};
