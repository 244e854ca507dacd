//! Integration tests: drive a session the way a host application would,
//! from raw PNG bytes through enhancement, undo, and redo.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use image::Luma;
use roentgen_pipeline::{AnomalyParams, CannyParams, DecodeError, GrayImage};
use roentgen_session::PipelineSession;

/// Encode a grayscale buffer as PNG bytes.
fn png_bytes(img: &GrayImage) -> Vec<u8> {
    let mut buf = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut buf);
    image::ImageEncoder::write_image(
        encoder,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ExtendedColorType::L8,
    )
    .unwrap();
    buf
}

fn uniform_png(width: u32, height: u32, value: u8) -> Vec<u8> {
    png_bytes(&GrayImage::from_pixel(width, height, Luma([value])))
}

fn all_eq(img: &GrayImage, value: u8) -> bool {
    img.pixels().all(|p| p[0] == value)
}

/// The working buffer must equal the history entry under the cursor.
fn assert_cursor_invariant(session: &PipelineSession) {
    let cursor = session.history().cursor().expect("history is empty");
    assert_eq!(
        session.current().unwrap(),
        session.history().get(cursor).unwrap(),
        "working buffer drifted from the history entry under the cursor"
    );
}

#[test]
fn load_adjust_undo_round_trip() {
    let mut session = PipelineSession::new();
    session.load(&uniform_png(100, 100, 128)).unwrap();
    assert!(session.is_loaded());
    assert!(all_eq(session.current().unwrap(), 128));
    assert_eq!(session.history().len(), 1);

    // Doubling contrast around zero then dropping 50: 128 * 2 - 50 = 206.
    session.set_brightness_contrast(-50, 200);
    assert!(all_eq(session.current().unwrap(), 206));
    assert_eq!(session.history().len(), 2);
    assert_cursor_invariant(&session);

    session.undo();
    assert!(all_eq(session.current().unwrap(), 128));
    assert_eq!(session.history().len(), 2, "undo must not drop entries");
    assert_cursor_invariant(&session);

    session.redo();
    assert!(all_eq(session.current().unwrap(), 206));
    assert_cursor_invariant(&session);
}

#[test]
fn operations_before_load_are_silent_noops() {
    let mut session = PipelineSession::new();
    session.set_brightness_contrast(-50, 200);
    session.sharpen();
    session.canny(&CannyParams::default());
    session.reset();
    session.undo();
    session.redo();

    assert!(!session.is_loaded());
    assert!(session.current().is_none());
    assert!(session.history().is_empty());
    assert!(session.check_anomaly(&AnomalyParams::default()).is_none());
}

#[test]
fn failed_load_leaves_the_session_untouched() {
    let mut session = PipelineSession::new();
    session.load(&uniform_png(50, 50, 128)).unwrap();
    session.set_brightness_contrast(-50, 200);
    let before = session.current().unwrap().clone();

    let empty = session.load(&[]);
    assert!(matches!(empty, Err(DecodeError::EmptyInput)));
    let corrupt = session.load(&[0xFF, 0x00, 0x7A]);
    assert!(matches!(corrupt, Err(DecodeError::ImageDecode(_))));

    assert_eq!(session.current().unwrap(), &before);
    assert_eq!(session.history().len(), 2);
    assert_cursor_invariant(&session);
}

#[test]
fn editing_after_undo_discards_the_redo_branch() {
    let mut session = PipelineSession::new();
    session.load(&uniform_png(32, 32, 128)).unwrap();
    session.set_brightness_contrast(10, 100); // 138
    session.sharpen(); // uniform, stays 138
    assert_eq!(session.history().len(), 3);

    session.undo();
    session.undo();
    assert!(all_eq(session.current().unwrap(), 128));

    session.set_brightness_contrast(-50, 200); // 206, forks the timeline
    assert_eq!(session.history().len(), 2);
    assert!(all_eq(session.history().get(0).unwrap(), 128));
    assert!(all_eq(session.current().unwrap(), 206));
    assert!(!session.can_redo(), "the old branch must be unreachable");
    session.redo();
    assert!(all_eq(session.current().unwrap(), 206));
    assert_cursor_invariant(&session);
}

#[test]
fn capacity_eviction_keeps_the_original_safe() {
    let mut session = PipelineSession::with_history_capacity(3);
    session.load(&uniform_png(16, 16, 128)).unwrap();
    session.set_brightness_contrast(1, 100); // 129
    session.set_brightness_contrast(2, 100); // 130
    session.set_brightness_contrast(3, 100); // 131

    // The load entry was evicted, but the original lives outside history.
    assert_eq!(session.history().len(), 3);
    assert!(all_eq(session.history().get(0).unwrap(), 129));

    session.reset();
    assert!(all_eq(session.current().unwrap(), 128));
    assert!(all_eq(session.original().unwrap(), 128));
    assert_cursor_invariant(&session);
}

#[test]
fn anomaly_check_reads_without_writing_history() {
    let mut session = PipelineSession::new();
    session.load(&uniform_png(40, 40, 0)).unwrap();

    let report = session.check_anomaly(&AnomalyParams::default()).unwrap();
    assert!(report.anomalous, "1600 black pixels exceed the threshold");
    assert_eq!(report.dark_count, 1600);
    assert_eq!(session.history().len(), 1, "analysis must not commit");
}

#[test]
fn structural_transforms_commit_and_undo() {
    // A two-tone plate gives Canny a real boundary to find.
    let img = GrayImage::from_fn(40, 40, |x, _y| {
        if x < 20 { Luma([40]) } else { Luma([210]) }
    });
    let mut session = PipelineSession::new();
    session.load(&png_bytes(&img)).unwrap();
    let ingested = session.current().unwrap().clone();
    assert_eq!(
        ingested,
        roentgen_pipeline::decode_and_denoise(&png_bytes(&img)).unwrap(),
        "load must produce the same buffer as direct ingest"
    );

    session.canny(&CannyParams::default());
    let edges = session.current().unwrap();
    assert!(edges.pixels().all(|p| p[0] == 0 || p[0] == 255));
    assert!(edges.pixels().any(|p| p[0] == 255));
    assert_cursor_invariant(&session);

    session.undo();
    assert_eq!(session.current().unwrap(), &ingested);
}
