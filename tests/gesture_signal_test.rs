//! Tests for gesture signal smoothing, normalization and tracking loss


use hand_particle_morph::{
    config::GestureSettings,
    gesture::{normalize_expansion, GestureProcessor, GestureSignal, Position},
    landmarks::Landmark,
};
use test_helpers::{hand_with_distance, hand_with_reach};

fn processor() -> GestureProcessor {
    GestureProcessor::new(&GestureSettings::default()).unwrap()
}

#[test]
fn test_normalization_table() {
    let cases = [
        (0.1, 0.0),
        (0.4, 1.0),
        (0.25, 0.5),
        (0.05, 0.0),
        (0.7, 1.0),
        (0.175, 0.25),
    ];
    for (distance, expected) in cases {
        let value = normalize_expansion(distance, 0.1, 0.3);
        assert!(
            (value - expected).abs() < 1e-5,
            "normalize({distance}) = {value}, expected {expected}"
        );
    }
}

#[test]
fn test_first_steps_from_rest() {
    let mut processor = processor();

    // avgDist 0.1 -> normalized 0 -> expansion stays 0
    let signal = processor.update(Some(hand_with_distance(0.1).as_slice()));
    assert!(signal.expansion.abs() < 1e-6);

    // avgDist 0.4 -> normalized 1 -> 0 * 0.8 + 1 * 0.2
    let signal = processor.update(Some(hand_with_distance(0.4).as_slice()));
    assert!((signal.expansion - 0.2).abs() < 1e-5, "got {}", signal.expansion);
}

#[test]
fn test_ema_converges_geometrically() {
    let mut processor = processor();
    let hand = hand_with_distance(0.25);
    let target = 0.5_f32;

    for k in 1..=30 {
        let signal = processor.update(Some(hand.as_slice()));
        let expected_gap = 0.8_f32.powi(k) * target;
        assert!(
            ((target - signal.expansion) - expected_gap).abs() < 1e-5,
            "step {k}: expansion {}",
            signal.expansion
        );
    }
}

#[test]
fn test_position_mapping_and_smoothing() {
    let mut processor = processor();
    let hand = hand_with_reach(0.2, 0.7, 0.2);
    let (target_x, target_y) = ((0.5 - 0.2) * 12.0, (0.5 - 0.7) * 8.0);

    let first = processor.update(Some(hand.as_slice()));
    assert!((first.position.x - target_x * 0.2).abs() < 1e-5);
    assert!((first.position.y - target_y * 0.2).abs() < 1e-5);

    for _ in 0..200 {
        processor.update(Some(hand.as_slice()));
    }
    let settled = processor.signal();
    assert!((settled.position.x - target_x).abs() < 1e-4);
    assert!((settled.position.y - target_y).abs() < 1e-4);
}

#[test]
fn test_centered_palm_stays_at_origin() {
    let mut processor = processor();
    for _ in 0..10 {
        let signal = processor.update(Some(hand_with_distance(0.3).as_slice()));
        assert_eq!(signal.position, Position::new(0.0, 0.0));
    }
}

#[test]
fn test_tracking_loss_freezes_signal() {
    let mut processor = processor();
    let hand = hand_with_reach(0.3, 0.6, 0.35);
    for _ in 0..5 {
        processor.update(Some(hand.as_slice()));
    }
    assert!(processor.is_tracking());
    let before = processor.signal();

    for _ in 0..50 {
        assert_eq!(processor.update(None), before);
    }
    assert!(!processor.is_tracking());

    // Reacquiring continues from the held state rather than from zero
    let resumed = processor.update(Some(hand.as_slice()));
    assert!(processor.is_tracking());
    assert!(resumed.expansion >= before.expansion);
}

#[test]
fn test_malformed_frames_are_dropped() {
    let mut processor = processor();
    processor.update(Some(hand_with_distance(0.4).as_slice()));
    let before = processor.signal();

    // Wrong count
    let short = hand_with_distance(0.1);
    assert_eq!(processor.update(Some(&short[..20])), before);

    // Out of range
    let mut outside = hand_with_distance(0.1);
    outside[12] = Landmark::new(1.5, 0.5, 0.0);
    assert_eq!(processor.update(Some(outside.as_slice())), before);

    // Non-finite
    let mut broken = hand_with_distance(0.1);
    broken[0].x = f32::NAN;
    assert_eq!(processor.update(Some(broken.as_slice())), before);

    assert!(processor.is_tracking(), "dropped frames leave tracking untouched");
    assert_eq!(processor.dropped_frames(), 3);
}

#[test]
fn test_expansion_stays_bounded() {
    let mut processor = processor();
    let wide = hand_with_reach(0.5, 1.0, 1.0);
    for _ in 0..100 {
        let signal = processor.update(Some(wide.as_slice()));
        assert!((0.0..=1.0).contains(&signal.expansion));
    }
    let closed = hand_with_distance(0.0);
    for _ in 0..100 {
        let signal = processor.update(Some(closed.as_slice()));
        assert!((0.0..=1.0).contains(&signal.expansion));
    }
}

#[test]
fn test_reset_restores_startup_state() {
    let mut processor = processor();
    processor.update(Some(hand_with_reach(0.1, 0.1, 0.05).as_slice()));
    processor.update(Some(&[][..]));
    processor.reset();
    assert_eq!(processor.signal(), GestureSignal::default());
    assert!(!processor.is_tracking());
    assert_eq!(processor.dropped_frames(), 0);
}

#[test]
fn test_pass_through_filter() {
    let settings = GestureSettings {
        filter: "none".to_string(),
        ..GestureSettings::default()
    };
    let mut processor = GestureProcessor::new(&settings).unwrap();
    let signal = processor.update(Some(hand_with_distance(0.25).as_slice()));
    assert!((signal.expansion - 0.5).abs() < 1e-5);
}

#[test]
fn test_custom_alpha() {
    let settings = GestureSettings {
        filter: "exponential:0.5".to_string(),
        ..GestureSettings::default()
    };
    let mut processor = GestureProcessor::new(&settings).unwrap();
    let signal = processor.update(Some(hand_with_distance(0.25).as_slice()));
    assert!((signal.expansion - 0.25).abs() < 1e-5);
}

#[test]
fn test_invalid_settings_rejected() {
    let settings = GestureSettings {
        distance_range: 0.0,
        ..GestureSettings::default()
    };
    assert!(GestureProcessor::new(&settings).is_err());
}
