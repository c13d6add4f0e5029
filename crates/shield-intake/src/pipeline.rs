//! Validation and encoding of selected files.
//!
//! Files are checked in the order presented. Accepted files are encoded on
//! the blocking pool concurrently; each one reserves its output slot at
//! validation time so the accepted list always follows input order, however
//! the encode tasks finish.

use shield_core::config::IntakeConfig;
use shield_core::types::{MediaType, PendingImage};
use tokio::task::JoinSet;

use crate::error::IntakeRejection;
use crate::file::RawFile;
use crate::tray::ImageTray;

/// Count, size and type limits applied to every intake batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeLimits {
    pub max_images: usize,
    pub max_file_size_bytes: u64,
    pub accepted_types: Vec<MediaType>,
}

impl Default for IntakeLimits {
    fn default() -> Self {
        Self::from(&IntakeConfig::default())
    }
}

impl From<&IntakeConfig> for IntakeLimits {
    fn from(config: &IntakeConfig) -> Self {
        let mut accepted_types = Vec::new();
        for mime in &config.accepted_types {
            match MediaType::from_mime(mime) {
                Some(mt) if !accepted_types.contains(&mt) => accepted_types.push(mt),
                Some(_) => {}
                None => tracing::warn!(media_type = %mime, "Ignoring unsupported accepted type"),
            }
        }
        Self {
            max_images: config.max_images,
            max_file_size_bytes: config.max_file_size_bytes,
            accepted_types,
        }
    }
}

impl IntakeLimits {
    /// The media type for `declared`, if it is one of the accepted types.
    pub fn accepts(&self, declared: &str) -> Option<MediaType> {
        MediaType::from_mime(declared).filter(|mt| self.accepted_types.contains(mt))
    }
}

/// Result of one intake batch.
#[derive(Debug, Default)]
pub struct IntakeOutcome {
    /// Encoded images in input order.
    pub accepted: Vec<PendingImage>,
    pub rejections: Vec<IntakeRejection>,
}

/// Output positions reserved at validation time and filled on completion.
struct OrderedSlots<T> {
    slots: Vec<Option<T>>,
}

impl<T> OrderedSlots<T> {
    fn new() -> Self {
        Self { slots: Vec::new() }
    }

    fn len(&self) -> usize {
        self.slots.len()
    }

    fn reserve(&mut self) -> usize {
        self.slots.push(None);
        self.slots.len() - 1
    }

    fn fill(&mut self, slot: usize, value: T) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = Some(value);
        }
    }

    /// Filled values in reservation order, plus the indices left empty.
    fn into_ordered(self) -> (Vec<T>, Vec<usize>) {
        let mut filled = Vec::with_capacity(self.slots.len());
        let mut empty = Vec::new();
        for (idx, slot) in self.slots.into_iter().enumerate() {
            match slot {
                Some(value) => filled.push(value),
                None => empty.push(idx),
            }
        }
        (filled, empty)
    }
}

/// Turns an accepted file's bytes into a pending image. Runs on the
/// blocking pool.
type Encoder = fn(String, MediaType, &[u8]) -> PendingImage;

fn encode_image(name: String, media_type: MediaType, bytes: &[u8]) -> PendingImage {
    PendingImage::encode(name, media_type, bytes)
}

/// Validates and encodes user-selected files.
#[derive(Debug, Clone)]
pub struct IntakePipeline {
    limits: IntakeLimits,
    encode: Encoder,
}

impl Default for IntakePipeline {
    fn default() -> Self {
        Self::new(IntakeLimits::default())
    }
}

impl IntakePipeline {
    pub fn new(limits: IntakeLimits) -> Self {
        Self {
            limits,
            encode: encode_image,
        }
    }

    #[cfg(test)]
    fn with_encoder(limits: IntakeLimits, encode: Encoder) -> Self {
        Self { limits, encode }
    }

    pub fn limits(&self) -> &IntakeLimits {
        &self.limits
    }

    /// An empty tray sized to this pipeline's limits.
    pub fn tray(&self) -> ImageTray {
        ImageTray::new(self.limits.clone())
    }

    /// Validate `candidates` against the limits, given `current_count`
    /// images already held by the caller's session.
    ///
    /// Once the session would be full, processing stops and a single
    /// `CapacityExceeded` rejection is emitted for the whole batch. Type and
    /// size rejections skip just the offending file.
    pub async fn submit_files(&self, candidates: Vec<RawFile>, current_count: usize) -> IntakeOutcome {
        let mut rejections = Vec::new();
        let mut slots = OrderedSlots::new();
        let mut names = Vec::new();
        let mut tasks = JoinSet::new();

        for file in candidates {
            if current_count + slots.len() >= self.limits.max_images {
                tracing::debug!(
                    current = current_count,
                    accepted = slots.len(),
                    "Image capacity reached, ignoring remaining files"
                );
                rejections.push(IntakeRejection::CapacityExceeded {
                    max: self.limits.max_images,
                });
                break;
            }

            let Some(media_type) = self.limits.accepts(&file.declared_type) else {
                tracing::debug!(file = %file.name, media_type = %file.declared_type, "Rejected image type");
                rejections.push(IntakeRejection::UnsupportedType {
                    name: file.name,
                    media_type: file.declared_type,
                });
                continue;
            };

            if file.size() > self.limits.max_file_size_bytes {
                tracing::debug!(file = %file.name, size = file.size(), "Rejected oversized image");
                rejections.push(IntakeRejection::TooLarge {
                    size: file.size(),
                    limit: self.limits.max_file_size_bytes,
                    name: file.name,
                });
                continue;
            }

            let slot = slots.reserve();
            names.push(file.name.clone());
            let encode = self.encode;
            tasks.spawn_blocking(move || {
                let image = encode(file.name, media_type, &file.bytes);
                (slot, image)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((slot, image)) => slots.fill(slot, image),
                Err(e) => tracing::warn!(error = %e, "Image encode task failed"),
            }
        }

        let (accepted, failed) = slots.into_ordered();
        for idx in failed {
            rejections.push(IntakeRejection::DecodeFailed {
                name: names[idx].clone(),
            });
        }

        tracing::info!(
            accepted = accepted.len(),
            rejected = rejections.len(),
            "Image intake batch processed"
        );

        IntakeOutcome {
            accepted,
            rejections,
        }
    }
}

/// Drop files whose declared type is not accepted, without notices.
///
/// Used for drag-and-drop, where stray non-image files are filtered out
/// before the batch reaches the pipeline.
pub fn retain_accepted_types(files: Vec<RawFile>, limits: &IntakeLimits) -> Vec<RawFile> {
    files
        .into_iter()
        .filter(|f| limits.accepts(&f.declared_type).is_some())
        .collect()
}
