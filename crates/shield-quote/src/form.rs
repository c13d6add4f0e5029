//! The quote request form: field validation and the form's photo tray.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use shield_core::config::ShieldConfig;
use shield_core::types::PendingImage;
use shield_intake::{
    retain_accepted_types, ImageTray, IntakeLimits, IntakePipeline, IntakeRejection, RawFile,
};

use crate::error::{FieldError, QuoteField, ValidationErrors};
use crate::submission::{EncodedImage, QuoteSubmission};

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s\-\(\)\+]{7,}$").expect("Invalid phone regex"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

/// Raw field values as typed by the customer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteFields {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub vehicle: String,
    pub color: String,
    pub service_type: String,
    pub description: String,
}

impl QuoteFields {
    /// Check every field and collect all failures in form order.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        let mut required = |field: QuoteField, value: &str| {
            let value = value.trim();
            if value.is_empty() {
                errors.push((field, FieldError::Required));
                None
            } else {
                Some(value.to_string())
            }
        };

        required(QuoteField::Name, &self.name);
        let phone = required(QuoteField::Phone, &self.phone);
        required(QuoteField::Vehicle, &self.vehicle);
        required(QuoteField::ServiceType, &self.service_type);

        if let Some(phone) = phone {
            if !PHONE_RE.is_match(&phone) {
                errors.push((QuoteField::Phone, FieldError::InvalidPhone));
            }
        }

        let email = self.email.trim();
        if !email.is_empty() && !EMAIL_RE.is_match(email) {
            errors.push((QuoteField::Email, FieldError::InvalidEmail));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            errors.sort_by_key(|(field, _)| *field as u8);
            Err(ValidationErrors { errors })
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// One quote form: its fields and the photos attached to it.
#[derive(Debug)]
pub struct QuoteForm {
    pub fields: QuoteFields,
    tray: ImageTray,
    pipeline: IntakePipeline,
}

impl Default for QuoteForm {
    fn default() -> Self {
        Self::new(IntakePipeline::default())
    }
}

impl QuoteForm {
    pub fn new(pipeline: IntakePipeline) -> Self {
        Self {
            fields: QuoteFields::default(),
            tray: pipeline.tray(),
            pipeline,
        }
    }

    pub fn from_config(config: &ShieldConfig) -> Self {
        Self::new(IntakePipeline::new(IntakeLimits::from(&config.intake)))
    }

    pub fn images(&self) -> &[PendingImage] {
        self.tray.images()
    }

    /// Upload hint for the drop zone.
    pub fn hint(&self) -> String {
        self.tray.hint()
    }

    /// Photos picked through the file chooser.
    pub async fn attach(&mut self, files: Vec<RawFile>) -> Vec<IntakeRejection> {
        self.tray.attach(&self.pipeline, files).await
    }

    /// Photos dropped on the upload zone. Files of other types are skipped
    /// without a notice.
    pub async fn drop_files(&mut self, files: Vec<RawFile>) -> Vec<IntakeRejection> {
        let files = retain_accepted_types(files, self.pipeline.limits());
        self.tray.attach(&self.pipeline, files).await
    }

    pub fn remove_image(&mut self, index: usize) -> Option<PendingImage> {
        self.tray.remove(index)
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.fields.validate()
    }

    /// Validate and build the submission.
    ///
    /// On success the form's photos move into the submission and the tray is
    /// left empty. On failure nothing changes.
    pub fn submit(&mut self) -> Result<QuoteSubmission, ValidationErrors> {
        if let Err(errors) = self.validate() {
            tracing::debug!(fields = ?errors.fields(), "Quote form failed validation");
            return Err(errors);
        }

        let f = &self.fields;
        let submission = QuoteSubmission {
            name: f.name.trim().to_string(),
            phone: f.phone.trim().to_string(),
            email: optional(&f.email),
            vehicle: f.vehicle.trim().to_string(),
            color: optional(&f.color),
            service_type: f.service_type.trim().to_string(),
            description: optional(&f.description),
            images: self
                .tray
                .take_all()
                .into_iter()
                .map(EncodedImage::from)
                .collect(),
            timestamp: Utc::now(),
        };
        tracing::info!(
            images = submission.images.len(),
            service = %submission.service_type,
            "Quote submission built"
        );
        Ok(submission)
    }
}
