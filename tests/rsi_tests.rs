use ticker_dashboard::indicator::rsi::Rsi;

#[test]
fn hand_computed_period_two() {
    // deltas 0, +1, -1 with alpha = 0.5:
    // gains 0 -> 0.5 -> 0.25, losses 0 -> 0 -> 0.5
    let mut rsi = Rsi::new(2);
    assert_eq!(rsi.push(10.0), None);
    assert_eq!(rsi.push(11.0), Some(100.0));
    let v = rsi.push(10.0).unwrap();
    assert!((v - 100.0 / 3.0).abs() < 1e-9);
    assert_eq!(rsi.value(), Some(v));
}

#[test]
fn first_thirteen_values_undefined() {
    let mut rsi = Rsi::new(14);
    for i in 0..13 {
        assert_eq!(rsi.push(100.0 + i as f64), None, "row {}", i);
    }
    assert!(rsi.push(120.0).is_some());
}

#[test]
fn rising_prices_pin_at_hundred() {
    let mut rsi = Rsi::new(14);
    let mut last = None;
    for i in 0..40 {
        last = rsi.push(50.0 + i as f64);
    }
    assert_eq!(last, Some(100.0));
}

#[test]
fn stays_within_bounds_on_mixed_moves() {
    let mut rsi = Rsi::new(14);
    for i in 0..200 {
        let close = 100.0 + ((i * 7) % 11) as f64 - 5.0;
        if let Some(v) = rsi.push(close) {
            assert!((0.0..=100.0).contains(&v), "rsi out of range: {}", v);
        }
    }
}
