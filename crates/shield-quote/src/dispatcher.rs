//! Best-effort delivery of quote submissions.
//!
//! [`SubmissionDispatcher::send`] never returns an error. The customer sees a
//! confirmation whatever happens; the returned [`DispatchOutcome`] says
//! where the data actually ended up.

use std::fmt;
use std::path::Path;

use chrono::Utc;
use chrono_tz::Tz;
use shield_core::config::{NotificationConfig, ShieldConfig};

use crate::store::LocalSubmissionLog;
use crate::submission::QuoteSubmission;
use crate::transport::{EmailJsTransport, NotificationTransport};

/// Where a submission was captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The remote transport accepted it.
    Delivered,
    /// Remote delivery was unavailable or failed; written to the local log.
    SavedLocally,
    /// Neither the transport nor the local log took it.
    NotCaptured,
}

impl DispatchOutcome {
    pub fn is_captured(&self) -> bool {
        !matches!(self, DispatchOutcome::NotCaptured)
    }
}

impl fmt::Display for DispatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchOutcome::Delivered => write!(f, "Delivered"),
            DispatchOutcome::SavedLocally => write!(f, "Saved locally"),
            DispatchOutcome::NotCaptured => write!(f, "Not captured"),
        }
    }
}

/// Sends submissions to the transport, falling back to the local log.
pub struct SubmissionDispatcher {
    transport: Option<Box<dyn NotificationTransport>>,
    log: LocalSubmissionLog,
    timezone: Tz,
}

impl SubmissionDispatcher {
    pub fn new(
        transport: Option<Box<dyn NotificationTransport>>,
        log: LocalSubmissionLog,
        timezone: Tz,
    ) -> Self {
        Self {
            transport,
            log,
            timezone,
        }
    }

    /// Wire up the EmailJS transport (when credentials are present) and the
    /// local log under `data_dir`.
    pub fn from_config(config: &ShieldConfig, data_dir: &Path) -> Self {
        let notifications = &config.notifications;
        let transport = match EmailJsTransport::from_config(notifications) {
            Ok(t) => {
                tracing::info!("EmailJS transport configured");
                Some(Box::new(t) as Box<dyn NotificationTransport>)
            }
            Err(_) => {
                tracing::info!("EmailJS not configured, submissions will be saved locally");
                None
            }
        };
        Self::new(
            transport,
            LocalSubmissionLog::in_dir(data_dir, &notifications.fallback_file),
            parse_timezone(notifications),
        )
    }

    pub fn log(&self) -> &LocalSubmissionLog {
        &self.log
    }

    /// Deliver `submission`, or capture it locally. Never fails.
    pub async fn send(&self, submission: &QuoteSubmission) -> DispatchOutcome {
        tracing::info!(
            name = %submission.name,
            vehicle = %submission.vehicle,
            service = %submission.service_type,
            images = submission.images.len(),
            "Quote request submitted"
        );

        if let Some(transport) = &self.transport {
            let params = submission.template_params(self.timezone, Utc::now());
            match transport.send(&params).await {
                Ok(()) => {
                    tracing::info!(transport = transport.name(), "Notification sent");
                    return DispatchOutcome::Delivered;
                }
                Err(e) => {
                    tracing::error!(transport = transport.name(), error = %e, "Notification failed, saving locally");
                }
            }
        }

        let record = submission.to_fallback_record(Utc::now());
        match self.log.append(&record).await {
            Ok(count) => {
                tracing::info!(path = %self.log.path().display(), count, "Quote saved to local log");
                DispatchOutcome::SavedLocally
            }
            Err(e) => {
                tracing::error!(path = %self.log.path().display(), error = %e, "Failed to save quote locally");
                DispatchOutcome::NotCaptured
            }
        }
    }
}

fn parse_timezone(config: &NotificationConfig) -> Tz {
    config.timezone.parse::<Tz>().unwrap_or_else(|_| {
        tracing::warn!(timezone = %config.timezone, "Unknown timezone, using America/Los_Angeles");
        chrono_tz::America::Los_Angeles
    })
}
