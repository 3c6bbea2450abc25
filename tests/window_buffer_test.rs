//! Windowed reconstruction buffer properties

mod common;

use nalgebra::DMatrix;
use proptest::prelude::*;
use tomovis_rs::{ProjectionWindow, TomoVisError};

fn tagged(tag: f64) -> DMatrix<f64> {
    DMatrix::from_element(1, 8, tag)
}

/// Scenario: window_size 3, sequence indices 0..=4; the view at index 4
/// must contain events {2, 3, 4} in that order.
#[test]
fn view_at_index_four_holds_last_three_events() {
    let mut win = ProjectionWindow::new(3).unwrap();

    let mut last = None;
    for s in 0..5usize {
        last = Some(win.put(s, tagged(s as f64), s as f64 / 10.0).unwrap());
    }

    let view = last.unwrap();
    let tags: Vec<f64> = view.projections.iter().map(|p| p[(0, 0)]).collect();
    assert_eq!(tags, vec![2.0, 3.0, 4.0]);
    assert_eq!(view.angles, vec![0.2, 0.3, 0.4]);
}

/// Scenario: window_size 1; every view holds exactly the most recent pair.
#[test]
fn unit_window_always_sees_only_latest() {
    let mut win = ProjectionWindow::new(1).unwrap();

    for s in 0..5usize {
        let view = win.put(s, tagged(s as f64), s as f64).unwrap();
        assert_eq!(view.len(), 1);
        assert_eq!(view.projections[0][(0, 0)], s as f64);
        assert_eq!(view.angles, vec![s as f64]);
    }
}

/// After k+1 inserts into a window of size k, the first event is excluded
/// and events 2..=k+1 are present.
#[test]
fn overwrite_evicts_oldest_event() {
    let k = 4usize;
    let mut win = ProjectionWindow::new(k).unwrap();

    let mut last = None;
    for s in 0..=k {
        last = Some(win.put(s, tagged(s as f64), 0.0).unwrap());
    }

    let view = last.unwrap();
    let tags: Vec<f64> = view.projections.iter().map(|p| p[(0, 0)]).collect();
    let expected: Vec<f64> = (1..=k).map(|s| s as f64).collect();
    assert_eq!(tags, expected);
}

#[test]
fn gap_is_a_sequence_order_violation() {
    let mut win = ProjectionWindow::new(3).unwrap();
    win.put(0, tagged(0.0), 0.0).unwrap();
    win.put(1, tagged(1.0), 0.0).unwrap();

    match win.put(3, tagged(3.0), 0.0) {
        Err(TomoVisError::SequenceOrder { expected, got }) => {
            assert_eq!(expected, 2);
            assert_eq!(got, 3);
        }
        other => panic!("expected sequence order violation, got {:?}", other.map(|v| v.len())),
    }
}

proptest! {
    /// For any window size k and event count n, the view at event index s
    /// holds exactly min(s+1, k) entries, in chronological insertion order.
    #[test]
    fn view_is_chronological_and_bounded(k in 1usize..8, n in 1usize..40) {
        let mut win = ProjectionWindow::new(k).unwrap();

        for s in 0..n {
            let view = win.put(s, tagged(s as f64), s as f64 * 0.01).unwrap();

            let expected_len = (s + 1).min(k);
            prop_assert_eq!(view.len(), expected_len);

            let oldest = s + 1 - expected_len;
            for (i, seq) in (oldest..=s).enumerate() {
                prop_assert_eq!(view.projections[i][(0, 0)], seq as f64);
                prop_assert!((view.angles[i] - seq as f64 * 0.01).abs() < 1e-12);
            }
        }
    }

    /// Angles and projections stay paired under any wrap pattern.
    #[test]
    fn angles_track_their_projection(k in 1usize..6, n in 1usize..30) {
        let mut win = ProjectionWindow::new(k).unwrap();

        for s in 0..n {
            let view = win.put(s, tagged(s as f64 * 2.0), s as f64 * 3.0).unwrap();
            for i in 0..view.len() {
                // tag/2 and angle/3 both recover the sequence index
                let from_proj = view.projections[i][(0, 0)] / 2.0;
                let from_angle = view.angles[i] / 3.0;
                prop_assert!((from_proj - from_angle).abs() < 1e-9);
            }
        }
    }
}
