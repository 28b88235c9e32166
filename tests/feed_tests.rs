use gpui_chart_sync::data_types::{MetricKey, Sample};
use gpui_chart_sync::MetricFeed;
use std::thread;

#[test]
fn test_publish_from_collector_thread() {
    let feed = MetricFeed::new(100);
    let producer = feed.clone();

    let handle = thread::spawn(move || {
        for i in 0..50_i64 {
            producer
                .publish_snapshot_json(i * 1000, &format!(r#"{{"fps": {}, "cpu": 12.5}}"#, i))
                .unwrap();
        }
    });
    handle.join().unwrap();

    let (revision, history) = feed.read_since(0).unwrap();
    assert_eq!(revision, 50);
    assert_eq!(history.len(), 50);
    assert_eq!(history[49].finite_value(MetricKey::Fps.as_str()), Some(49.0));
    assert_eq!(history[0].finite_value("cpu"), Some(12.5));
}

#[test]
fn test_bad_snapshot_is_not_published() {
    let feed = MetricFeed::new(10);
    assert!(feed.publish_snapshot_json(0, "not json").is_err());
    assert!(feed.is_empty());
    assert_eq!(feed.revision(), 0);
}

#[test]
fn test_clear_bumps_revision() {
    let feed = MetricFeed::new(10);
    feed.publish(Sample::new(0_i64).with_value("fps", 60.0));
    let (rev, _) = feed.read_since(0).unwrap();

    feed.clear();
    let (next, history) = feed.read_since(rev).unwrap();
    assert!(next > rev);
    assert!(history.is_empty());
}
