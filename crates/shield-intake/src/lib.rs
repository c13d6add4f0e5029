//! Photo intake for the chat widget and the quote form.
//!
//! Validates user-selected files against type, size and count limits,
//! encodes accepted files into data URIs, and keeps each session's pending
//! photos in an ordered, capacity-bounded tray.

pub mod error;
pub mod file;
pub mod pipeline;
pub mod tray;

pub use error::IntakeRejection;
pub use file::RawFile;
pub use pipeline::{retain_accepted_types, IntakeLimits, IntakeOutcome, IntakePipeline};
pub use tray::ImageTray;
