use approx::assert_abs_diff_eq;
use glam::Quat;
use pointer_config::AppConfig;
use pointer_input::room::Wall;
use pointer_input::{PointerEvent, PointerSession, SensorMessage, SessionStatus, WireQuat};

fn aim(yaw: f32, pitch: f32) -> Quat {
    Quat::from_rotation_y(yaw) * Quat::from_rotation_x(-pitch)
}

fn move_to(session: &mut PointerSession, q: Quat) {
    session.handle(SensorMessage::Move {
        q: WireQuat::from(q),
        roll: None,
    });
}

fn unsmoothed() -> AppConfig {
    let mut config = AppConfig::default();
    config.screen.smoothing = 0.0;
    config
}

#[test]
fn new_session_is_center_calibrated() {
    let mut session = PointerSession::new(&AppConfig::default()).unwrap();
    assert_eq!(session.status(), SessionStatus::Center);
    assert_eq!(session.core().smoothing(), 0.8);

    let (result, event) = session.tick();
    assert!(result.is_valid);
    assert_abs_diff_eq!(result.uv.x, 0.5, epsilon = 1e-6);
    let PointerEvent::Move { wall, z, .. } = event;
    assert_eq!(wall, Wall::Front);
    assert_abs_diff_eq!(z, -1.5, epsilon = 1e-6);
}

#[test]
fn center_calibration_uses_latest_sample() {
    let mut session = PointerSession::new(&unsmoothed()).unwrap();
    let q = aim(0.5, 0.2);
    move_to(&mut session, q);
    session.handle_json(r#"{"type":"calibrate"}"#).unwrap();

    let (result, _) = session.tick();
    assert_abs_diff_eq!(result.uv.x, 0.5, epsilon = 1e-5);
    assert_abs_diff_eq!(result.uv.y, 0.5, epsilon = 1e-5);
}

#[test]
fn two_step_corner_calibration() {
    let mut session = PointerSession::new(&unsmoothed()).unwrap();

    move_to(&mut session, aim(-0.3, 0.2));
    session.handle(SensorMessage::CalibrateTl);
    assert_eq!(session.status(), SessionStatus::AwaitingBottomRight);

    move_to(&mut session, aim(0.3, -0.2));
    session.handle(SensorMessage::CalibrateBr);
    assert_eq!(session.status(), SessionStatus::Corners);

    move_to(&mut session, Quat::IDENTITY);
    let (result, _) = session.tick();
    assert_abs_diff_eq!(result.uv.x, 0.5, epsilon = 1e-4);
    assert_abs_diff_eq!(result.uv.y, 0.5, epsilon = 1e-4);
}

#[test]
fn bottom_right_without_top_left_is_ignored() {
    let mut session = PointerSession::new(&unsmoothed()).unwrap();
    session.handle(SensorMessage::CalibrateBr);
    assert_eq!(session.status(), SessionStatus::Center);
}

#[test]
fn failed_corner_calibration_clears_pending() {
    let mut session = PointerSession::new(&unsmoothed()).unwrap();
    move_to(&mut session, aim(0.3, -0.2));
    session.handle(SensorMessage::CalibrateTl);
    move_to(&mut session, aim(-0.3, 0.2));
    session.handle(SensorMessage::CalibrateBr);
    assert_eq!(session.status(), SessionStatus::Center);
}

#[test]
fn config_update_is_partial() {
    let mut session = PointerSession::new(&unsmoothed()).unwrap();
    session
        .handle_json(r#"{"type":"config","distance":3.0,"smooth":0.5}"#)
        .unwrap();
    assert_eq!(session.screen().distance, 3.0);
    assert_eq!(session.screen().width, 1.2);
    assert_eq!(session.core().screen().distance, 3.0);
    assert_eq!(session.core().smoothing(), 0.5);
}

#[test]
fn invalid_config_update_keeps_screen() {
    let mut session = PointerSession::new(&unsmoothed()).unwrap();
    session.handle_json(r#"{"type":"config","distance":-1.0}"#).unwrap();
    assert_eq!(session.screen().distance, 1.5);
    assert_eq!(session.core().screen().distance, 1.5);
}

#[test]
fn set_mode_changes_interpretation() {
    let mut session = PointerSession::new(&unsmoothed()).unwrap();
    // A W-first sensor sending the identity puts the scalar in the first slot.
    session.handle(SensorMessage::SetMode { mode: 0 });
    session
        .handle_json(r#"{"type":"move","q":{"x":1.0,"y":0.0,"z":0.0,"w":0.0}}"#)
        .unwrap();
    let (result, _) = session.tick();
    assert!(result.is_valid);
    assert_abs_diff_eq!(result.uv.x, 0.5, epsilon = 1e-5);
    assert_abs_diff_eq!(result.uv.y, 0.5, epsilon = 1e-5);
}

#[test]
fn roll_is_remembered() {
    let mut session = PointerSession::new(&unsmoothed()).unwrap();
    session
        .handle_json(r#"{"type":"move","q":{"x":0.0,"y":0.0,"z":0.0,"w":1.0},"roll":30.0}"#)
        .unwrap();
    assert_eq!(session.roll(), Some(30.0));

    move_to(&mut session, Quat::IDENTITY);
    let (_, event) = session.tick();
    let PointerEvent::Move { roll, .. } = event;
    assert_eq!(roll, Some(30.0));
}

#[test]
fn non_utf8_line_is_skipped() {
    let mut session = PointerSession::new(&unsmoothed()).unwrap();
    let q = aim(0.5, 0.2);
    move_to(&mut session, q);

    assert!(session.handle_bytes(b"\xff\xfe").is_err());
    assert_eq!(session.latest(), WireQuat::from(q));

    session.handle_bytes(br#"{"type":"calibrate"}"#).unwrap();
    let (result, _) = session.tick();
    assert_abs_diff_eq!(result.uv.x, 0.5, epsilon = 1e-5);
    assert_abs_diff_eq!(result.uv.y, 0.5, epsilon = 1e-5);
}

#[test]
fn malformed_line_is_an_error() {
    let mut session = PointerSession::new(&unsmoothed()).unwrap();
    assert!(session.handle_json("{").is_err());
    assert!(session.handle_json(r#"{"type":"dance"}"#).is_err());
}

#[test]
fn looking_down_hits_the_floor() {
    let mut session = PointerSession::new(&unsmoothed()).unwrap();
    move_to(&mut session, aim(0.0, -1.2));
    let (_, event) = session.tick();
    let PointerEvent::Move { wall, y, .. } = event;
    assert_eq!(wall, Wall::Floor);
    assert_abs_diff_eq!(y, -1.5, epsilon = 1e-4);
}
