// Host-side tests for frame sampling, uniform packing, dilation geometry and
// the emanation schedule.

use glam::Vec2;
use trail_core::{
    center_clear_rect, dilate_uv, normalize_degrees, BlendMode, EmanationTimer, FrameDrawState,
    InterpolatorConfig, ManualClock, ParamId, ParameterInterpolator, PostParams, PostUniforms,
    ShapeParams, ShapeUniforms, TargetOptions,
};

#[test]
fn uniform_structs_match_shader_layout() {
    assert_eq!(std::mem::size_of::<ShapeUniforms>(), 48);
    assert_eq!(std::mem::size_of::<PostUniforms>(), 48);
}

#[test]
fn shape_uniforms_carry_rotation_in_radians() {
    let shape = ShapeParams {
        rotation: 180.0,
        ..ShapeParams::default()
    };
    let u = ShapeUniforms::new([800.0, 600.0], 1.5, &shape);
    assert!((u.rotation - std::f32::consts::PI).abs() < 1e-6);
    assert_eq!(u.resolution, [800.0, 600.0]);
    assert_eq!(u.hue, shape.hue);
}

#[test]
fn zero_expansion_is_replaced_by_identity() {
    let post = PostParams {
        expansion: 0.0,
        ..PostParams::default()
    };
    assert_eq!(PostUniforms::new([1.0, 1.0], 0.0, &post).expansion, 1.0);
    let blit = PostUniforms::blit([4.0, 4.0], 2.0);
    assert_eq!(blit.expansion, 1.0);
    assert_eq!(blit.fade, 0.0);
    assert_eq!(blit.hue_shift, 0.0);
}

#[test]
fn dilation_pulls_samples_toward_center() {
    let center = Vec2::splat(0.5);
    assert_eq!(dilate_uv(center, 1.3), center);

    let uv = Vec2::new(0.9, 0.2);
    assert!((dilate_uv(uv, 1.0) - uv).length() < 1e-6);

    let sampled = dilate_uv(uv, 1.25);
    assert!((sampled - center).length() < (uv - center).length());
    let expected = (uv - center) / 1.25 + center;
    assert!((sampled - expected).length() < 1e-6);
}

#[test]
fn center_clear_rect_is_two_pixels_at_midpoint() {
    assert_eq!(center_clear_rect(64, 64), (31, 31, 2, 2));
    assert_eq!(center_clear_rect(801, 600), (399, 299, 2, 2));
    assert_eq!(center_clear_rect(1, 1), (0, 0, 1, 1));
}

#[test]
fn normalize_degrees_wraps_into_one_turn() {
    assert_eq!(normalize_degrees(370.0), 10.0);
    assert_eq!(normalize_degrees(-90.0), 270.0);
    assert_eq!(normalize_degrees(720.0), 0.0);
    let tiny = normalize_degrees(-1e-7);
    assert!((0.0..360.0).contains(&tiny));
}

#[test]
fn live_rotation_combines_manual_and_auto() {
    let frame = FrameDrawState {
        manual_rotation: 30.0,
        auto_rotation_speed: 20.0,
        elapsed_sec: 2.5,
        ..FrameDrawState::default()
    };
    assert_eq!(frame.live_rotation(), 80.0);
    assert_eq!(frame.overlay_shape().rotation, 80.0);
}

#[test]
fn sample_uses_defaults_for_untracked_params() {
    let interp = ParameterInterpolator::new(InterpolatorConfig::default(), ManualClock::new());
    let frame = FrameDrawState::sample(&interp, BlendMode::Screen, 0.0, false);
    assert_eq!(frame.shape.hue, ParamId::Hue.default_value());
    assert_eq!(frame.post.expansion, ParamId::ExpansionFactor.default_value());
    assert_eq!(frame.blend_mode, BlendMode::Screen);
    assert!(!frame.capture);
}

#[test]
fn sample_reads_current_values_and_live_rotation() {
    let clock = ManualClock::new();
    let mut interp = ParameterInterpolator::new(InterpolatorConfig::default(), clock.clone());
    interp.snap_to(ParamId::Hue, 10.0);
    interp.snap_to(ParamId::FadeAmount, 0.1);
    interp.snap_to(ParamId::Rotation, 45.0);
    interp.snap_to(ParamId::AutoRotationSpeed, 10.0);
    interp.set_target(ParamId::Scale, 0.5, TargetOptions::default());

    let frame = FrameDrawState::sample(&interp, BlendMode::Additive, 1.5, true);
    assert_eq!(frame.shape.hue, 10.0);
    assert_eq!(frame.shape.scale, 0.5);
    assert_eq!(frame.post.fade, 0.1);
    assert_eq!(frame.manual_rotation, 45.0);
    assert_eq!(frame.shape.rotation, 60.0, "captured shape uses the live rotation");
    assert!(frame.capture);
}

#[test]
fn emanation_fires_at_the_requested_rate() {
    let mut timer = EmanationTimer::new();
    let fired = (0..60).filter(|_| timer.tick(1.0 / 60.0, 4.0)).count();
    assert!((3..=4).contains(&fired), "fired {fired} times in one second");
}

#[test]
fn emanation_never_fires_twice_for_one_stall() {
    let mut timer = EmanationTimer::new();
    assert!(timer.tick(2.0, 4.0));
    assert!(!timer.tick(0.0, 4.0));
}

#[test]
fn emanation_ignores_invalid_rates() {
    let mut timer = EmanationTimer::new();
    assert!(!timer.tick(1.0, 0.0));
    assert!(!timer.tick(1.0, -3.0));
    assert!(!timer.tick(1.0, f32::NAN));
    timer.reset();
    assert!(!timer.tick(0.1, 4.0));
    assert!(timer.tick(0.2, 4.0));
}
