use ticker_dashboard::indicator::macd::Macd;

#[test]
fn hand_computed_small_windows() {
    let mut macd = Macd::new(2, 3, 2);
    let points: Vec<_> = [1.0, 2.0, 3.0, 4.0].iter().map(|c| macd.push(*c)).collect();

    assert_eq!(points[0].macd, None);
    assert_eq!(points[1].macd, None);
    assert!((points[2].macd.unwrap() - 11.0 / 36.0).abs() < 1e-12);
    assert_eq!(points[2].signal, None);
    assert!((points[3].macd.unwrap() - 85.0 / 216.0).abs() < 1e-12);
    assert!((points[3].signal.unwrap() - 236.0 / 648.0).abs() < 1e-12);
}

#[test]
fn default_warm_up_lengths() {
    let mut macd = Macd::default();
    let points: Vec<_> = (0..60).map(|i| macd.push(100.0 + i as f64)).collect();

    assert!(points[..25].iter().all(|p| p.macd.is_none()));
    assert!(points[25..].iter().all(|p| p.macd.is_some()));
    assert!(points[..33].iter().all(|p| p.signal.is_none()));
    assert!(points[33..].iter().all(|p| p.signal.is_some()));
}

#[test]
fn flat_prices_give_zero_lines() {
    let mut macd = Macd::default();
    let last = (0..50).map(|_| macd.push(42.0)).last().unwrap();
    assert!(last.macd.unwrap().abs() < 1e-12);
    assert!(last.signal.unwrap().abs() < 1e-12);
}

#[test]
#[should_panic(expected = "MACD fast period must be shorter than slow period")]
fn rejects_inverted_periods() {
    Macd::new(26, 12, 9);
}
