use tracks_animation_core::Functions;

#[test]
fn every_easing_pins_its_endpoints() {
    for f in Functions::ALL {
        let start = f.interpolate(0.0);
        let end = f.interpolate(1.0);
        assert!(start.abs() < 1e-4, "{f}: f(0) = {start}");
        assert!((end - 1.0).abs() < 1e-4, "{f}: f(1) = {end}");
    }
}

#[test]
fn names_round_trip_through_parsing() {
    for f in Functions::ALL {
        assert_eq!(f.name().parse::<Functions>().expect("parse"), f);
        assert_eq!(Functions::from_index(f.index()), f);
    }
    assert_eq!(Functions::COUNT, 32);
}

#[test]
fn out_of_range_indices_fall_back_to_linear() {
    assert_eq!(Functions::from_index(-1), Functions::EaseLinear);
    assert_eq!(Functions::from_index(Functions::COUNT as i32), Functions::EaseLinear);
}

#[test]
fn step_holds_until_the_end() {
    assert_eq!(Functions::EaseStep.interpolate(0.0), 0.0);
    assert_eq!(Functions::EaseStep.interpolate(0.99), 0.0);
    assert_eq!(Functions::EaseStep.interpolate(1.0), 1.0);
}

#[test]
fn symmetric_in_out_curves_cross_the_midpoint() {
    for f in [
        Functions::EaseInOutQuad,
        Functions::EaseInOutCubic,
        Functions::EaseInOutSine,
        Functions::EaseInOutQuint,
    ] {
        assert!((f.interpolate(0.5) - 0.5).abs() < 1e-5, "{f}");
    }
}
