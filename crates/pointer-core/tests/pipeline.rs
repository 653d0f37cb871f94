use approx::assert_abs_diff_eq;
use glam::Quat;
use pointer_core::calibration::CalibrationMode;
use pointer_core::convention::QuaternionConvention;
use pointer_core::{PointerCore, ScreenGeometry};

fn aim(yaw: f32, pitch: f32) -> Quat {
    Quat::from_rotation_y(yaw) * Quat::from_rotation_x(-pitch)
}

#[test]
fn default_instance_points_at_screen_center() {
    let mut core = PointerCore::new();
    let r = core.process([0.0, 0.0, 0.0, 1.0]);

    assert!(r.is_valid);
    assert_abs_diff_eq!(r.direction.x, 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(r.direction.y, 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(r.direction.z, 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(r.uv.x, 0.5, epsilon = 1e-6);
    assert_abs_diff_eq!(r.uv.y, 0.5, epsilon = 1e-6);
    assert_abs_diff_eq!(r.yaw_degrees, 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(r.pitch_degrees, 0.0, epsilon = 1e-6);
}

#[test]
fn center_calibration_is_self_consistent() {
    let mut core = PointerCore::new();
    core.configure(ScreenGeometry::new(1.2, 0.9, 1.5), 0.0).unwrap();

    let q = aim(0.7, -0.25).to_array();
    core.calibrate_center(q);
    let r = core.process(q);

    assert!(r.is_valid);
    assert_abs_diff_eq!(r.direction.z, 1.0, epsilon = 1e-5);
    assert_abs_diff_eq!(r.yaw_degrees, 0.0, epsilon = 1e-3);
    assert_abs_diff_eq!(r.pitch_degrees, 0.0, epsilon = 1e-3);
    assert_abs_diff_eq!(r.uv.x, 0.5, epsilon = 1e-5);
    assert_abs_diff_eq!(r.uv.y, 0.5, epsilon = 1e-5);
}

#[test]
fn symmetric_corners_center_straight_ahead() {
    let mut core = PointerCore::new();
    core.calibrate_corners(aim(-0.35, 0.2).to_array(), aim(0.35, -0.2).to_array())
        .unwrap();
    assert_eq!(core.mode(), CalibrationMode::Corners);

    let r = core.process(Quat::IDENTITY.to_array());
    assert!(r.is_valid);
    assert_abs_diff_eq!(r.uv.x, 0.5, epsilon = 1e-4);
    assert_abs_diff_eq!(r.uv.y, 0.5, epsilon = 1e-4);
    assert_abs_diff_eq!(r.world.z, 1.0, epsilon = 1e-6);
}

#[test]
fn corners_map_to_window_edges() {
    let mut core = PointerCore::new();
    let tl = aim(-0.35, 0.2);
    let br = aim(0.35, -0.2);
    core.calibrate_corners(tl.to_array(), br.to_array()).unwrap();

    let r = core.process(tl.to_array());
    assert_abs_diff_eq!(r.uv.x, 0.0, epsilon = 1e-4);
    assert_abs_diff_eq!(r.uv.y, 1.0, epsilon = 1e-4);

    let r = core.process(br.to_array());
    assert_abs_diff_eq!(r.uv.x, 1.0, epsilon = 1e-4);
    assert_abs_diff_eq!(r.uv.y, 0.0, epsilon = 1e-4);
}

#[test]
fn facing_away_is_invalid() {
    let mut core = PointerCore::new();
    for yaw in [1.6_f32, 2.5, std::f32::consts::PI, -2.0] {
        let r = core.process(aim(yaw, 0.0).to_array());
        assert!(!r.is_valid, "yaw {yaw} should be invalid");
        assert!(r.yaw_degrees.abs() > 89.0);
    }
}

#[test]
fn rejected_configuration_keeps_previous_geometry() {
    let mut core = PointerCore::new();
    core.configure(ScreenGeometry::new(2.0, 2.0, 1.0), 0.0).unwrap();
    assert!(core.configure(ScreenGeometry::new(0.0, 2.0, 1.0), 0.0).is_err());

    // 45 degrees right hits x = 1 on the plane at distance 1: u = 1/2 + 0.5.
    let r = core.process(aim(std::f32::consts::FRAC_PI_4, 0.0).to_array());
    assert!(r.is_valid);
    assert_abs_diff_eq!(r.uv.x, 1.0, epsilon = 1e-5);
    assert_eq!(core.screen().width, 2.0);
}

#[test]
fn w_first_input_matches_w_last() {
    let q = aim(0.3, 0.1);

    let mut last = PointerCore::new();
    let a = last.process(QuaternionConvention::WLast.serialize(q));

    let mut first = PointerCore::new();
    first.set_convention_code(0).unwrap();
    let b = first.process(QuaternionConvention::WFirst.serialize(q));

    assert_abs_diff_eq!(a.uv.x, b.uv.x, epsilon = 1e-6);
    assert_abs_diff_eq!(a.uv.y, b.uv.y, epsilon = 1e-6);
}

#[test]
fn invalid_convention_code_keeps_current() {
    let mut core = PointerCore::new();
    assert!(core.set_convention_code(2).is_err());
    assert_eq!(core.convention(), QuaternionConvention::WLast);
}

#[test]
fn smoothing_converges_on_steady_input() {
    let mut core = PointerCore::new();
    core.configure(ScreenGeometry::default(), 0.8).unwrap();
    core.process(Quat::IDENTITY.to_array());

    let target = aim(0.4, 0.0);
    let first = core.process(target.to_array());
    assert!(first.yaw_degrees < 0.4_f32.to_degrees() - 1.0);

    let mut last = first;
    for _ in 0..200 {
        last = core.process(target.to_array());
    }
    assert_abs_diff_eq!(last.yaw_degrees, 0.4_f32.to_degrees(), epsilon = 1e-2);
}

#[test]
fn negated_quaternion_points_the_same_way() {
    let mut core = PointerCore::new();
    core.configure(ScreenGeometry::default(), 0.5).unwrap();
    let q = aim(0.2, 0.1);
    let a = core.process(q.to_array());
    // Same rotation, opposite hemisphere: smoothing must not swing through it.
    let b = core.process((-q).to_array());
    assert_abs_diff_eq!(a.uv.x, b.uv.x, epsilon = 1e-5);
    assert_abs_diff_eq!(a.uv.y, b.uv.y, epsilon = 1e-5);
}

#[test]
fn pixel_mapping_flips_v() {
    let mut core = PointerCore::new();
    let r = core.process([0.0, 0.0, 0.0, 1.0]);
    let px = r.to_pixels(1280.0, 720.0).unwrap();
    assert_abs_diff_eq!(px.x, 640.0, epsilon = 1e-3);
    assert_abs_diff_eq!(px.y, 360.0, epsilon = 1e-3);

    let away = core.process(aim(std::f32::consts::PI, 0.0).to_array());
    assert!(away.to_pixels(1280.0, 720.0).is_none());
}
