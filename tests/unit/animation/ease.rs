use super::*;

#[test]
fn endpoints_are_stable() {
    let cp = ControlPoints::default();
    for interp in Interpolation::ALL {
        assert!(interp.reshape(0.0, &cp).abs() < 1e-9, "{interp} at 0");
        assert!((interp.reshape(1.0, &cp) - 1.0).abs() < 2e-3, "{interp} at 1");
    }
}

#[test]
fn quadratic_laws_match_closed_forms() {
    let cp = ControlPoints::default();
    assert_eq!(Interpolation::EaseIn.reshape(0.5, &cp), 0.25);
    assert_eq!(Interpolation::EaseOut.reshape(0.5, &cp), 0.75);
    assert_eq!(Interpolation::EaseInOut.reshape(0.25, &cp), 0.125);
    assert_eq!(Interpolation::EaseInOut.reshape(0.75, &cp), 0.875);
    assert_eq!(Interpolation::Linear.reshape(0.3, &cp), 0.3);
}

#[test]
fn linear_control_points_give_identity_curve() {
    let cp = ControlPoints::new(1.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0);
    for i in 1..10 {
        let p = f64::from(i) / 10.0;
        assert!((solve_bezier(p, &cp) - p).abs() < 2e-3);
    }
}

#[test]
fn bezier_output_is_bounded_for_overshooting_points() {
    let cps = [
        ControlPoints::new(0.5, -2.0, 0.5, 3.0),
        ControlPoints::new(0.0, 5.0, 1.0, -5.0),
        ControlPoints::new(2.0, 0.0, -1.0, 1.0),
    ];
    for cp in cps {
        for i in 0..=20 {
            let y = solve_bezier(f64::from(i) / 20.0, &cp);
            assert!((0.0..=1.0).contains(&y));
        }
    }
}

#[test]
fn css_ease_is_monotonic_spot_check() {
    let cp = ControlPoints::default();
    let a = solve_bezier(0.25, &cp);
    let b = solve_bezier(0.5, &cp);
    let c = solve_bezier(0.75, &cp);
    assert!(a < b && b < c);
}

#[test]
fn names_roundtrip_and_are_lenient() {
    for interp in Interpolation::ALL {
        assert_eq!(Interpolation::from_name(interp.name()), Some(interp));
    }
    assert_eq!(
        Interpolation::from_name("Ease-In-Out"),
        Some(Interpolation::EaseInOut)
    );
    assert_eq!(Interpolation::from_name("sproing"), None);
}

#[test]
fn unknown_interpolation_deserializes_as_linear() {
    let i: Interpolation = serde_json::from_str("\"elastic\"").unwrap();
    assert_eq!(i, Interpolation::Linear);
    let i: Interpolation = serde_json::from_str("\"hold\"").unwrap();
    assert_eq!(i, Interpolation::Hold);
    assert_eq!(serde_json::to_string(&Interpolation::EaseOut).unwrap(), "\"ease_out\"");
}

#[test]
fn numeric_and_bool_interpolation_fall_back_to_linear() {
    for text in ["3", "-1", "0.5", "true", "null"] {
        let i: Interpolation = serde_json::from_str(text).unwrap();
        assert_eq!(i, Interpolation::Linear, "{text}");
    }
}

#[test]
fn control_points_persist_as_nested_arrays() {
    let cp = ControlPoints::new(0.1, 0.2, 0.3, 0.4);
    let s = serde_json::to_string(&cp).unwrap();
    assert_eq!(s, "[[0.1,0.2],[0.3,0.4]]");
    let back: ControlPoints = serde_json::from_str(&s).unwrap();
    assert_eq!(back, cp);
}
