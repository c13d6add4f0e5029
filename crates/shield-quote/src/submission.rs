//! Quote payloads: the submission itself, the transport's template
//! parameters and the record kept in the local log.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use shield_core::types::{MediaType, PendingImage};

const NOT_PROVIDED: &str = "Not provided";
const NOT_SPECIFIED: &str = "Not specified";
const NO_DESCRIPTION: &str = "No description provided";
const NO_PHOTOS: &str = "No photos uploaded";

/// A photo as carried by a submission: name, type and base64 payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImage {
    pub name: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub base64: String,
}

impl From<PendingImage> for EncodedImage {
    fn from(image: PendingImage) -> Self {
        let base64 = image.base64_payload().to_string();
        Self {
            name: image.name,
            media_type: image.media_type,
            base64,
        }
    }
}

/// A validated quote request. Built once per submit, never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSubmission {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub vehicle: String,
    pub color: Option<String>,
    pub service_type: String,
    pub description: Option<String>,
    pub images: Vec<EncodedImage>,
    pub timestamp: DateTime<Utc>,
}

impl QuoteSubmission {
    /// `"N photo(s) attached"` or `"No photos uploaded"`.
    pub fn image_summary(&self) -> String {
        if self.images.is_empty() {
            NO_PHOTOS.to_string()
        } else {
            format!("{} photo(s) attached", self.images.len())
        }
    }

    /// Parameters for the email template, with placeholders for blank
    /// optional fields and `sent_at` rendered in `tz`.
    pub fn template_params(&self, tz: Tz, sent_at: DateTime<Utc>) -> TemplateParams {
        TemplateParams {
            customer_name: self.name.clone(),
            customer_phone: self.phone.clone(),
            customer_email: self.email.clone().unwrap_or_else(|| NOT_PROVIDED.to_string()),
            vehicle_info: self.vehicle.clone(),
            vehicle_color: self.color.clone().unwrap_or_else(|| NOT_SPECIFIED.to_string()),
            service_type: self.service_type.clone(),
            damage_description: self
                .description
                .clone()
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            image_count: self.image_summary(),
            submission_time: format_submission_time(sent_at, tz),
            image_1: self.images.first().map(|img| img.base64.clone()),
        }
    }

    /// The local-log form of this submission, stamped with `saved_at`.
    pub fn to_fallback_record(&self, saved_at: DateTime<Utc>) -> FallbackRecord {
        FallbackRecord {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone().unwrap_or_default(),
            vehicle: self.vehicle.clone(),
            color: self.color.clone().unwrap_or_default(),
            service_type: self.service_type.clone(),
            description: self.description.clone().unwrap_or_default(),
            images: self
                .images
                .iter()
                .map(|img| ImageRef {
                    name: img.name.clone(),
                    media_type: img.media_type,
                })
                .collect(),
            timestamp: self.timestamp,
            saved_at,
        }
    }
}

/// Medium date plus short time, e.g. `Oct 18, 2026, 3:04 PM`.
pub fn format_submission_time(at: DateTime<Utc>, tz: Tz) -> String {
    at.with_timezone(&tz).format("%b %-d, %Y, %-I:%M %p").to_string()
}

/// Variables substituted into the notification email template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateParams {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub vehicle_info: String,
    pub vehicle_color: String,
    pub service_type: String,
    pub damage_description: String,
    pub image_count: String,
    pub submission_time: String,
    /// First photo's base64 payload; the transport takes one attachment.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image_1: Option<String>,
}

/// Photo reference kept in the local log. No pixel data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub name: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
}

/// One entry of the local fallback log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackRecord {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    pub vehicle: String,
    #[serde(default)]
    pub color: String,
    pub service_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<ImageRef>,
    pub timestamp: DateTime<Utc>,
    pub saved_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn submission(images: usize) -> QuoteSubmission {
        QuoteSubmission {
            name: "Dana Ruiz".to_string(),
            phone: "(760) 555-0123".to_string(),
            email: None,
            vehicle: "2019 Toyota Tacoma".to_string(),
            color: None,
            service_type: "mobile".to_string(),
            description: None,
            images: (0..images)
                .map(|i| EncodedImage {
                    name: format!("{i}.jpg"),
                    media_type: MediaType::Jpeg,
                    base64: format!("payload{i}"),
                })
                .collect(),
            timestamp: Utc.with_ymd_and_hms(2026, 10, 18, 22, 4, 0).unwrap(),
        }
    }

    #[test]
    fn test_encoded_image_from_pending() {
        let pending = PendingImage::encode("door.png", MediaType::Png, b"hello");
        let encoded = EncodedImage::from(pending);
        assert_eq!(encoded.name, "door.png");
        assert_eq!(encoded.media_type, MediaType::Png);
        assert_eq!(encoded.base64, "aGVsbG8=");
    }

    #[test]
    fn test_image_summary() {
        assert_eq!(submission(0).image_summary(), "No photos uploaded");
        assert_eq!(submission(1).image_summary(), "1 photo(s) attached");
        assert_eq!(submission(3).image_summary(), "3 photo(s) attached");
    }

    #[test]
    fn test_template_params_placeholders() {
        let sub = submission(0);
        let params = sub.template_params(chrono_tz::America::Los_Angeles, sub.timestamp);
        assert_eq!(params.customer_email, "Not provided");
        assert_eq!(params.vehicle_color, "Not specified");
        assert_eq!(params.damage_description, "No description provided");
        assert_eq!(params.image_count, "No photos uploaded");
        assert!(params.image_1.is_none());

        let json = serde_json::to_value(&params).unwrap();
        assert!(json.get("image_1").is_none());
        assert_eq!(json["customer_name"], "Dana Ruiz");
    }

    #[test]
    fn test_template_params_carry_first_image_only() {
        let mut sub = submission(2);
        sub.email = Some("dana@example.com".to_string());
        let params = sub.template_params(chrono_tz::America::Los_Angeles, sub.timestamp);
        assert_eq!(params.customer_email, "dana@example.com");
        assert_eq!(params.image_1.as_deref(), Some("payload0"));
        assert_eq!(params.image_count, "2 photo(s) attached");
    }

    #[test]
    fn test_submission_time_in_los_angeles() {
        // 22:04 UTC is 15:04 PDT
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 22, 4, 0).unwrap();
        assert_eq!(
            format_submission_time(at, chrono_tz::America::Los_Angeles),
            "Oct 18, 2026, 3:04 PM"
        );
        // Winter time, single-digit day
        let at = Utc.with_ymd_and_hms(2026, 1, 5, 17, 30, 0).unwrap();
        assert_eq!(
            format_submission_time(at, chrono_tz::America::Los_Angeles),
            "Jan 5, 2026, 9:30 AM"
        );
    }

    #[test]
    fn test_fallback_record_drops_pixels() {
        let sub = submission(2);
        let saved_at = Utc.with_ymd_and_hms(2026, 10, 18, 22, 5, 0).unwrap();
        let record = sub.to_fallback_record(saved_at);
        assert_eq!(record.email, "");
        assert_eq!(record.images.len(), 2);

        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("payload"));
        assert!(json.contains("\"savedAt\""));
        assert!(json.contains("\"serviceType\":\"mobile\""));
        assert!(json.contains("\"type\":\"image/jpeg\""));

        let back: FallbackRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
