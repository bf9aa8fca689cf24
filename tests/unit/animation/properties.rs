use super::*;

#[test]
fn transform_and_color_properties_are_cataloged() {
    for name in TRANSFORM_PROPERTIES {
        assert_eq!(
            property_info(name).unwrap().category,
            PropertyCategory::Transform
        );
    }
    for name in COLOR_PROPERTIES {
        assert_eq!(property_info(name).unwrap().category, PropertyCategory::Color);
    }
    assert!(property_info("wobble").is_none());
}

#[test]
fn defaults_lie_within_ranges() {
    for p in ANIMATABLE_PROPERTIES {
        assert!(p.min <= p.default && p.default <= p.max, "{}", p.name);
    }
}

#[test]
fn clamp_uses_range() {
    let opacity = property_info("opacity").unwrap();
    assert_eq!(opacity.clamp(140.0), 100.0);
    assert_eq!(opacity.clamp(-1.0), 0.0);
    assert_eq!(opacity.clamp(42.0), 42.0);
}
