//! Rejection notices from the intake pipeline.

use shield_core::error::ShieldError;

const MIB: u64 = 1024 * 1024;

/// Why a selected file did not make it into the tray.
///
/// The `Display` text is the user-facing notice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeRejection {
    #[error("Please upload JPG or PNG images only.")]
    UnsupportedType { name: String, media_type: String },
    #[error("Image must be under {}MB.", .limit / MIB)]
    TooLarge { name: String, size: u64, limit: u64 },
    #[error("Maximum {max} images allowed.")]
    CapacityExceeded { max: usize },
    #[error("Could not read {name}.")]
    DecodeFailed { name: String },
}

impl IntakeRejection {
    /// The file the rejection refers to, if it concerns a single file.
    pub fn file_name(&self) -> Option<&str> {
        match self {
            IntakeRejection::UnsupportedType { name, .. }
            | IntakeRejection::TooLarge { name, .. }
            | IntakeRejection::DecodeFailed { name } => Some(name),
            IntakeRejection::CapacityExceeded { .. } => None,
        }
    }
}

impl From<IntakeRejection> for ShieldError {
    fn from(err: IntakeRejection) -> Self {
        ShieldError::Intake(err.to_string())
    }
}
