use super::*;

#[test]
fn scalars_blend_linearly() {
    let v = PropertyValue::interpolate(&0.0.into(), &100.0.into(), 0.25);
    assert_eq!(v, PropertyValue::Scalar(25.0));
}

#[test]
fn equal_length_lists_blend_per_element() {
    let a = PropertyValue::from([0.0, 10.0]);
    let b = PropertyValue::from([50.0, 20.0]);
    assert_eq!(
        PropertyValue::interpolate(&a, &b, 0.5),
        PropertyValue::from([25.0, 15.0])
    );
}

#[test]
fn mixed_list_elements_hard_cut() {
    let a = PropertyValue::List(vec![0.0.into(), "left".into()]);
    let b = PropertyValue::List(vec![10.0.into(), "right".into()]);
    assert_eq!(
        PropertyValue::interpolate(&a, &b, 0.4),
        PropertyValue::List(vec![4.0.into(), "left".into()])
    );
    assert_eq!(
        PropertyValue::interpolate(&a, &b, 0.5),
        PropertyValue::List(vec![5.0.into(), "right".into()])
    );
}

#[test]
fn mismatched_shapes_hard_cut_at_half() {
    let a = PropertyValue::from([1.0, 2.0]);
    let b = PropertyValue::from([1.0, 2.0, 3.0]);
    assert_eq!(PropertyValue::interpolate(&a, &b, 0.49), a);
    assert_eq!(PropertyValue::interpolate(&a, &b, 0.5), b);

    let s = PropertyValue::Scalar(1.0);
    let t = PropertyValue::Flag(true);
    assert_eq!(PropertyValue::interpolate(&s, &t, 0.2), s);
    assert_eq!(PropertyValue::interpolate(&s, &t, 0.8), t);
}

#[test]
fn untagged_json_shapes() {
    let v: PropertyValue = serde_json::from_str("[1, 2.5]").unwrap();
    assert_eq!(v, PropertyValue::from([1.0, 2.5]));
    let v: PropertyValue = serde_json::from_str("true").unwrap();
    assert_eq!(v, PropertyValue::Flag(true));
    let v: PropertyValue = serde_json::from_str("\"x\"").unwrap();
    assert_eq!(v.as_f64(), None);
    assert_eq!(serde_json::to_string(&PropertyValue::Scalar(2.5)).unwrap(), "2.5");
}
