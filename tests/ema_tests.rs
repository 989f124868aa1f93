use ticker_dashboard::indicator::ema::Ema;

#[test]
fn seeded_with_first_value_and_masked_until_period() {
    // alpha = 2 / (3 + 1) = 0.5
    let mut ema = Ema::new(3);
    assert_eq!(ema.push(2.0), None);
    assert_eq!(ema.push(5.0), None);
    assert!(!ema.is_ready());

    let v = ema.push(8.0).unwrap();
    assert!((v - 5.75).abs() < 1e-12);
    assert!(ema.is_ready());

    let v = ema.push(11.0).unwrap();
    assert!((v - 8.375).abs() < 1e-12);
}

#[test]
fn single_period_tracks_input() {
    let mut ema = Ema::new(1);
    let v = ema.push(42.0).unwrap();
    assert!((v - 42.0).abs() < f64::EPSILON);

    let v = ema.push(99.0).unwrap();
    assert!((v - 99.0).abs() < f64::EPSILON);
}

#[test]
fn wilder_alpha() {
    let mut ema = Ema::with_alpha(2, 0.25);
    ema.push(4.0);
    let v = ema.push(8.0).unwrap();
    assert!((v - 5.0).abs() < 1e-12);
    assert_eq!(ema.period(), 2);
}

#[test]
fn non_finite_input_propagates() {
    let mut ema = Ema::new(2);
    ema.push(1.0);
    assert!(ema.push(f64::NAN).unwrap().is_nan());
}

#[test]
#[should_panic(expected = "EMA period must be > 0")]
fn zero_period_panics() {
    Ema::new(0);
}
