//! Per-session collection of pending photos.

use shield_core::types::PendingImage;

use crate::error::IntakeRejection;
use crate::file::RawFile;
use crate::pipeline::{IntakeLimits, IntakePipeline};

const MIB: u64 = 1024 * 1024;

/// Ordered, capacity-bounded set of images owned by one chat session or
/// one quote form.
#[derive(Debug)]
pub struct ImageTray {
    images: Vec<PendingImage>,
    limits: IntakeLimits,
}

impl Default for ImageTray {
    fn default() -> Self {
        Self::new(IntakeLimits::default())
    }
}

impl ImageTray {
    pub fn new(limits: IntakeLimits) -> Self {
        Self {
            images: Vec::new(),
            limits,
        }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.limits.max_images
    }

    /// How many more images fit.
    pub fn remaining(&self) -> usize {
        self.limits.max_images.saturating_sub(self.images.len())
    }

    pub fn images(&self) -> &[PendingImage] {
        &self.images
    }

    /// Run `files` through `pipeline` and keep whatever it accepts.
    ///
    /// Returns the notices to show the user.
    pub async fn attach(
        &mut self,
        pipeline: &IntakePipeline,
        files: Vec<RawFile>,
    ) -> Vec<IntakeRejection> {
        let outcome = pipeline.submit_files(files, self.images.len()).await;
        let mut rejections = outcome.rejections;
        let mut overflowed = false;

        for image in outcome.accepted {
            if self.images.len() >= self.limits.max_images {
                overflowed = true;
                continue;
            }
            self.images.push(image);
        }

        // A pipeline with a larger limit than this tray cannot push it past capacity.
        if overflowed
            && !rejections
                .iter()
                .any(|r| matches!(r, IntakeRejection::CapacityExceeded { .. }))
        {
            rejections.push(IntakeRejection::CapacityExceeded {
                max: self.limits.max_images,
            });
        }

        tracing::debug!(held = self.images.len(), "Image tray updated");
        rejections
    }

    /// Remove the image at `index`, keeping the others in order.
    pub fn remove(&mut self, index: usize) -> Option<PendingImage> {
        if index < self.images.len() {
            Some(self.images.remove(index))
        } else {
            None
        }
    }

    /// Empty the tray, handing its images to the caller.
    pub fn take_all(&mut self) -> Vec<PendingImage> {
        std::mem::take(&mut self.images)
    }

    /// Upload hint shown under the drop zone.
    pub fn hint(&self) -> String {
        let remaining = self.remaining();
        if remaining > 0 {
            format!(
                "JPG or PNG, up to {}MB each \u{2022} {} more allowed",
                self.limits.max_file_size_bytes / MIB,
                remaining
            )
        } else {
            format!("Maximum {} images reached", self.limits.max_images)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jpeg(name: &str) -> RawFile {
        RawFile::new(name, "image/jpeg", vec![1, 2, 3])
    }

    fn batch(prefix: &str, n: usize) -> Vec<RawFile> {
        (0..n).map(|i| jpeg(&format!("{prefix}{i}.jpg"))).collect()
    }

    fn names(tray: &ImageTray) -> Vec<&str> {
        tray.images().iter().map(|i| i.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_attach_fills_tray() {
        let pipeline = IntakePipeline::default();
        let mut tray = pipeline.tray();
        let rejections = tray.attach(&pipeline, batch("a", 3)).await;
        assert!(rejections.is_empty());
        assert_eq!(tray.len(), 3);
        assert_eq!(tray.remaining(), 2);
    }

    #[tokio::test]
    async fn test_sixth_image_rejected_first_five_kept() {
        let pipeline = IntakePipeline::default();
        let mut tray = pipeline.tray();
        tray.attach(&pipeline, batch("a", 5)).await;
        let before: Vec<String> = names(&tray).iter().map(|s| s.to_string()).collect();

        let rejections = tray.attach(&pipeline, vec![jpeg("sixth.jpg")]).await;

        assert_eq!(rejections, vec![IntakeRejection::CapacityExceeded { max: 5 }]);
        assert_eq!(tray.len(), 5);
        assert_eq!(names(&tray), before);
    }

    #[tokio::test]
    async fn test_attach_in_two_batches_keeps_order() {
        let pipeline = IntakePipeline::default();
        let mut tray = pipeline.tray();
        tray.attach(&pipeline, batch("a", 2)).await;
        let rejections = tray.attach(&pipeline, batch("b", 4)).await;
        assert_eq!(rejections.len(), 1);
        assert_eq!(names(&tray), vec!["a0.jpg", "a1.jpg", "b0.jpg", "b1.jpg", "b2.jpg"]);
    }

    #[tokio::test]
    async fn test_tray_smaller_than_pipeline_never_overflows() {
        let pipeline = IntakePipeline::default();
        let mut tray = ImageTray::new(IntakeLimits {
            max_images: 2,
            ..IntakeLimits::default()
        });
        let rejections = tray.attach(&pipeline, batch("a", 4)).await;
        assert_eq!(tray.len(), 2);
        assert_eq!(rejections, vec![IntakeRejection::CapacityExceeded { max: 2 }]);
    }

    #[tokio::test]
    async fn test_remove_keeps_order() {
        let pipeline = IntakePipeline::default();
        let mut tray = pipeline.tray();
        tray.attach(&pipeline, batch("a", 4)).await;

        let removed = tray.remove(1).unwrap();
        assert_eq!(removed.name, "a1.jpg");
        assert_eq!(names(&tray), vec!["a0.jpg", "a2.jpg", "a3.jpg"]);
        assert!(tray.remove(3).is_none());
        assert_eq!(tray.len(), 3);
    }

    #[tokio::test]
    async fn test_take_all_clears() {
        let pipeline = IntakePipeline::default();
        let mut tray = pipeline.tray();
        tray.attach(&pipeline, batch("a", 2)).await;
        let taken = tray.take_all();
        assert_eq!(taken.len(), 2);
        assert!(tray.is_empty());
        assert_eq!(tray.remaining(), 5);
    }

    #[tokio::test]
    async fn test_hint_text() {
        let pipeline = IntakePipeline::default();
        let mut tray = pipeline.tray();
        assert_eq!(tray.hint(), "JPG or PNG, up to 10MB each \u{2022} 5 more allowed");
        tray.attach(&pipeline, batch("a", 5)).await;
        assert_eq!(tray.hint(), "Maximum 5 images reached");
    }
}
