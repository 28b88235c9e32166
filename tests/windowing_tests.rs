use gpui_chart_sync::data_types::Viewport;
use gpui_chart_sync::windowing::{
    index_to_percent, percent_to_index, viewport_from_indices, visible_window, VisibleWindow,
};
use rand::Rng;

#[test]
fn test_indices_stay_ordered_and_in_bounds() {
    let mut rng = rand::rng();
    for _ in 0..2000 {
        let len = rng.random_range(0..500usize);
        let a = rng.random_range(-50.0..150.0);
        let b = rng.random_range(-50.0..150.0);
        let w = visible_window(Viewport::new(a, b), len);

        assert!(w.start_index <= w.end_index, "{:?} for len {}", w, len);
        assert!(w.end_index <= len.saturating_sub(1));
    }
}

#[test]
fn test_index_percent_round_trip() {
    let mut rng = rand::rng();
    for _ in 0..2000 {
        let len = rng.random_range(2..1000usize);
        let index = rng.random_range(0..len);
        let back = percent_to_index(index_to_percent(index, len), len);
        assert!(
            back.abs_diff(index) <= 1,
            "index {} came back as {} (len {})",
            index,
            back,
            len
        );
    }
}

#[test]
fn test_full_viewport_covers_series() {
    let w = visible_window(Viewport::FULL, 3);
    assert_eq!(w, VisibleWindow::new(0, 2));
    assert_eq!(w.range(3), 0..3);
}

#[test]
fn test_half_viewport_picks_middle() {
    // maxIndex = 2, index(50) = round(1) = 1
    let w = visible_window(Viewport::new(50.0, 50.0), 3);
    assert_eq!(w, VisibleWindow::new(1, 1));
}

#[test]
fn test_rounding_of_partial_window() {
    // 101 samples: one index per percent
    let w = visible_window(Viewport::new(25.4, 74.6), 101);
    assert_eq!((w.start_index, w.end_index), (25, 75));
}

#[test]
fn test_viewport_from_indices() {
    let v = viewport_from_indices(2, 8, 11);
    assert!((v.start - 20.0).abs() < 1e-9);
    assert!((v.end - 80.0).abs() < 1e-9);
    assert_eq!(visible_window(v, 11), VisibleWindow::new(2, 8));
}

#[test]
fn test_out_of_range_drag_indices_clamp_to_full() {
    let v = viewport_from_indices(0, 40, 5);
    assert_eq!(v, Viewport::FULL);
}

#[test]
fn test_single_sample_drag_is_degenerate() {
    for (a, b) in [(0, 0), (0, 3), (7, 2)] {
        let v = viewport_from_indices(a, b, 1);
        assert_eq!(v, Viewport::new(0.0, 0.0));
        assert_eq!(visible_window(v, 1), VisibleWindow::new(0, 0));
    }
}
