//! One loaded radiograph, its working buffer, and the committed history.

use roentgen_pipeline::{
    AnomalyParams, AnomalyReport, BrightnessContrast, CannyParams, DecodeError, EqualizeParams,
    GrayImage, HighlightParams,
};
use tracing::{debug, info};

use crate::history::HistoryLog;

/// A single-image enhancement session.
///
/// The session owns the pristine ingest buffer (`original`), the working
/// buffer every transform reads (`current`), and the bounded history of
/// committed states. Operations invoked before a successful
/// [`load`](Self::load) are silent no-ops, so a host can wire its
/// controls without guarding each call. After every mutating operation
/// the working buffer equals the history entry under the cursor.
#[derive(Debug, Clone, Default)]
pub struct PipelineSession {
    original: Option<GrayImage>,
    current: Option<GrayImage>,
    history: HistoryLog,
}

impl PipelineSession {
    /// Create an unloaded session with the default history capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unloaded session holding at most `capacity` history
    /// snapshots.
    #[must_use]
    pub fn with_history_capacity(capacity: usize) -> Self {
        Self {
            original: None,
            current: None,
            history: HistoryLog::with_capacity(capacity),
        }
    }

    /// Decode image bytes, run the one-time ingest denoise, and make the
    /// result the session original and the first history entry.
    ///
    /// Loading replaces any previously loaded image along with its
    /// history. On error the session keeps the state it had.
    ///
    /// # Errors
    ///
    /// Propagates [`DecodeError`] from
    /// [`roentgen_pipeline::decode_and_denoise`].
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), DecodeError> {
        let ingested = roentgen_pipeline::decode_and_denoise(bytes)?;
        info!(
            "Loaded image {}x{} from {} input bytes",
            ingested.width(),
            ingested.height(),
            bytes.len()
        );
        self.history.clear();
        self.history.push(ingested.clone());
        self.original = Some(ingested.clone());
        self.current = Some(ingested);
        Ok(())
    }

    /// Rebuild the working buffer from the original with the given
    /// brightness offset and raw contrast percentage (100 = unchanged).
    ///
    /// Adjustment always restates the original rather than stacking on a
    /// previous adjustment, so host slider positions stay absolute.
    pub fn set_brightness_contrast(&mut self, brightness: i32, contrast_raw: i32) {
        let Some(original) = self.original.as_ref() else {
            return;
        };
        let params = BrightnessContrast::from_raw(brightness, contrast_raw);
        let adjusted = roentgen_pipeline::adjust(original, &params);
        self.commit("adjust", adjusted);
    }

    /// Sharpen the working buffer.
    pub fn sharpen(&mut self) {
        let Some(current) = self.current.as_ref() else {
            return;
        };
        let sharpened = roentgen_pipeline::sharpen(current);
        self.commit("sharpen", sharpened);
    }

    /// Replace the working buffer with its binary Canny edge map.
    pub fn canny(&mut self, params: &CannyParams) {
        let Some(current) = self.current.as_ref() else {
            return;
        };
        let edges = roentgen_pipeline::canny(current, params.low, params.high);
        self.commit("canny", edges);
    }

    /// Apply contrast-limited adaptive equalization to the working
    /// buffer.
    pub fn adaptive_equalize(&mut self, params: &EqualizeParams) {
        let Some(current) = self.current.as_ref() else {
            return;
        };
        let equalized = roentgen_pipeline::adaptive_equalize(current, params);
        self.commit("equalize", equalized);
    }

    /// Ring sufficiently large edge-bounded regions of the working
    /// buffer.
    pub fn highlight(&mut self, params: &HighlightParams) {
        let Some(current) = self.current.as_ref() else {
            return;
        };
        let marked = roentgen_pipeline::highlight(current, params);
        self.commit("highlight", marked);
    }

    /// Discard enhancements by committing a fresh copy of the original.
    ///
    /// Reset is an ordinary history entry, so it can itself be undone.
    pub fn reset(&mut self) {
        let Some(original) = self.original.clone() else {
            return;
        };
        self.commit("reset", original);
    }

    /// Step back one committed state. No-op when no older state exists.
    pub fn undo(&mut self) {
        if let Some(entry) = self.history.undo() {
            self.current = Some(entry.clone());
            debug!("Undo: cursor {:?}", self.history.cursor());
        }
    }

    /// Step forward one committed state. No-op when no newer state
    /// exists.
    pub fn redo(&mut self) {
        if let Some(entry) = self.history.redo() {
            self.current = Some(entry.clone());
            debug!("Redo: cursor {:?}", self.history.cursor());
        }
    }

    /// Run the exposure anomaly check against the original buffer.
    ///
    /// Analysis reads the ingest state, not the enhancement in progress,
    /// and never touches history. Returns `None` before a successful
    /// load.
    #[must_use]
    pub fn check_anomaly(&self, params: &AnomalyParams) -> Option<AnomalyReport> {
        let original = self.original.as_ref()?;
        let report = roentgen_pipeline::check_anomaly(original, params);
        debug!(
            "Anomaly check: dark {}, bright {}, anomalous {}",
            report.dark_count, report.bright_count, report.anomalous
        );
        Some(report)
    }

    /// Returns `true` once an image is loaded.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    /// The working buffer, if an image is loaded.
    #[must_use]
    pub const fn current(&self) -> Option<&GrayImage> {
        self.current.as_ref()
    }

    /// The pristine ingest buffer, if an image is loaded.
    #[must_use]
    pub const fn original(&self) -> Option<&GrayImage> {
        self.original.as_ref()
    }

    /// Read-only view of the committed history.
    #[must_use]
    pub const fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Returns `true` if undo would change the working buffer.
    #[must_use]
    pub const fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns `true` if redo would change the working buffer.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Push a transformed buffer into history and make it current.
    fn commit(&mut self, op: &str, image: GrayImage) {
        self.history.push(image.clone());
        self.current = Some(image);
        debug!(
            "Committed {op}: {} entries, cursor {:?}",
            self.history.len(),
            self.history.cursor()
        );
    }
}
