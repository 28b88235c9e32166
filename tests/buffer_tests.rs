use gpui_chart_sync::buffer::{ChartBuffer, IngestOutcome};
use gpui_chart_sync::data_types::Sample;

fn series(tag: f64, n: i64) -> Vec<Sample> {
    (0..n).map(|i| Sample::new(i).with_value("fps", tag)).collect()
}

#[test]
fn test_display_frozen_while_interacting() {
    let mut buf = ChartBuffer::new(series(1.0, 3));
    let before = buf.display().to_vec();

    for tag in 2..10 {
        assert_eq!(
            buf.ingest(series(tag as f64, 3 + tag), true),
            IngestOutcome::Deferred
        );
        assert_eq!(buf.display(), before.as_slice());
    }

    // Only the most recent arrival is kept.
    let pending = buf.pending().unwrap();
    assert_eq!(pending.len(), 12);
    assert_eq!(pending[0].finite_value("fps"), Some(9.0));
}

#[test]
fn test_flush_applies_once_and_clears() {
    let mut buf = ChartBuffer::new(series(1.0, 3));
    buf.ingest(series(2.0, 5), true);

    assert!(buf.flush());
    assert_eq!(buf.display().len(), 5);
    assert!(buf.pending().is_none());

    assert!(!buf.flush());
    assert_eq!(buf.display().len(), 5);
}

#[test]
fn test_idle_ingest_leaves_no_pending() {
    let mut buf = ChartBuffer::default();
    assert_eq!(buf.ingest(series(1.0, 4), false), IngestOutcome::Applied);
    assert_eq!(buf.display().len(), 4);
    assert!(!buf.has_pending());
}
