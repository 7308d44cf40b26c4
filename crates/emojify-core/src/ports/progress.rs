//! Progress reporting port for UI integration.

use crate::domain::{EmojifyReport, Notice};

/// Events emitted while emojifying a batch.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Processing started for an image.
    Started {
        /// Path to the image.
        path: String,
        /// Index in the batch (0-based).
        index: usize,
        /// Total images in batch, if known.
        total: Option<usize>,
    },
    /// An informational notice for the user.
    Notice {
        /// Path to the image.
        path: String,
        /// The notice.
        notice: Notice,
    },
    /// Processing completed for an image.
    Completed {
        /// The per-image report.
        report: EmojifyReport,
    },
    /// An image was skipped due to an error.
    Skipped {
        /// Path to the image.
        path: String,
        /// Reason for skipping.
        reason: String,
    },
    /// All images have been processed.
    Finished {
        /// Total images processed successfully.
        processed: usize,
        /// Total images skipped.
        skipped: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}
