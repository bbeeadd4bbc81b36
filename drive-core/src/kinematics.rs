//! Heading and position integration — the turning model.
//!
//! The supported model integrates angular velocity directly: a linear step
//! `ds = speed_mps * unit_scale / fps` yaws the heading by
//! `(ds / chassis_length) * steering_angle` and advances the position
//! along the new heading. The equivalent alternative the car went through
//! during development relocates the body's rotation pivot laterally by
//! `chassis_length * tan(steering_angle)` each tick and lets the rotation
//! of the transform produce the arc; only [`pivot_offset`] survives from
//! it, feeding the debug pivot marker in the viewer. Both models agree
//! that zero steering means straight-line motion and that the turning
//! radius is about `chassis_length / tan(steering_angle)`.

use glam::Vec3;

use crate::geometry::ChassisGeometry;
use crate::tuning::VehicleTuning;

/// What one tick of motion did, for observers.
#[derive(Clone, Copy, Debug, Default)]
pub struct MotionStep {
    /// Distance covered this tick, in scene units.
    pub ds: f32,
    /// Heading change this tick, radians about the vertical axis.
    pub angular_step: f32,
}

/// Unit forward vector in the ground plane for a heading angle.
pub fn forward(heading: f32) -> Vec3 {
    Vec3::new(heading.sin(), 0.0, heading.cos())
}

/// Advance position and heading by one tick.
///
/// Returns `None` when `fps` is zero, negative or non-finite: the step
/// would divide by it, so the tick contributes no motion instead of
/// propagating a non-finite value into state. Nothing accumulates; the
/// next tick gets a fresh chance.
pub fn advance(
    position: &mut Vec3,
    heading: &mut f32,
    speed_mps: f32,
    steering_angle: f32,
    geometry: &ChassisGeometry,
    tuning: &VehicleTuning,
    fps: f32,
) -> Option<MotionStep> {
    if !fps.is_finite() || fps <= 0.0 {
        tracing::debug!(fps, "unusable frame rate, no motion this tick");
        return None;
    }

    let ds = speed_mps * tuning.unit_scale / fps;
    let angular_step = (ds / geometry.length) * steering_angle;
    *heading += angular_step;
    *position += forward(*heading) * ds;

    Some(MotionStep { ds, angular_step })
}

/// Approximate turning radius for a steering angle, in scene units.
/// Infinite for straight-ahead steering.
pub fn turning_radius(chassis_length: f32, steering_angle: f32) -> f32 {
    if steering_angle == 0.0 {
        f32::INFINITY
    } else {
        (chassis_length / steering_angle.tan()).abs()
    }
}

/// Lateral offset of the rotation pivot in the pivot-relocation model.
pub fn pivot_offset(chassis_length: f32, steering_angle: f32) -> f32 {
    chassis_length * steering_angle.tan()
}

#[cfg(test)]
mod tests {
    use super::{advance, forward, pivot_offset, turning_radius};
    use crate::geometry::ChassisGeometry;
    use crate::tuning::VehicleTuning;
    use glam::Vec3;

    fn geometry() -> ChassisGeometry {
        ChassisGeometry {
            length: 460.0,
            width: 180.0,
            height: 120.0,
            wheel_diameter: 60.0,
        }
    }

    #[test]
    fn zero_steering_moves_straight_without_yaw() {
        let tuning = VehicleTuning::default();
        let mut position = Vec3::ZERO;
        let mut heading = 0.0;

        let step = advance(
            &mut position,
            &mut heading,
            10.0,
            0.0,
            &geometry(),
            &tuning,
            60.0,
        )
        .expect("valid fps");

        assert_eq!(heading, 0.0);
        assert_eq!(step.angular_step, 0.0);
        // 10 m/s at 100 units/m over 1/60 s.
        assert!((step.ds - 16.6667).abs() < 1e-3);
        assert_eq!(position.x, 0.0);
        assert!((position.z - step.ds).abs() < 1e-6);
    }

    #[test]
    fn steering_yaws_the_heading_and_bends_the_path() {
        let tuning = VehicleTuning::default();
        let geometry = geometry();
        let mut position = Vec3::ZERO;
        let mut heading = 0.0;

        for _ in 0..60 {
            advance(
                &mut position,
                &mut heading,
                10.0,
                0.3,
                &geometry,
                &tuning,
                60.0,
            )
            .expect("valid fps");
        }

        // One second at 10 m/s: heading = (1000 / 460) * 0.3.
        assert!((heading - 0.652_17).abs() < 1e-3);
        assert!(position.x > 0.0, "positive steering bends toward +x");
    }

    #[test]
    fn larger_angle_turns_tighter_at_fixed_speed() {
        let tuning = VehicleTuning::default();
        let geometry = geometry();

        let yaw_for = |angle: f32| {
            let mut position = Vec3::ZERO;
            let mut heading = 0.0;
            advance(
                &mut position,
                &mut heading,
                10.0,
                angle,
                &geometry,
                &tuning,
                60.0,
            )
            .expect("valid fps");
            heading
        };

        assert!(yaw_for(0.3) > yaw_for(0.1));
        assert!(turning_radius(geometry.length, 0.1) > turning_radius(geometry.length, 0.3));
        assert_eq!(turning_radius(geometry.length, 0.0), f32::INFINITY);
    }

    #[test]
    fn unusable_fps_leaves_state_untouched() {
        let tuning = VehicleTuning::default();
        let geometry = geometry();
        let mut position = Vec3::new(1.0, 0.0, 2.0);
        let mut heading = 0.25;

        for fps in [0.0, -60.0, f32::NAN, f32::INFINITY] {
            let step = advance(
                &mut position,
                &mut heading,
                10.0,
                0.3,
                &geometry,
                &tuning,
                fps,
            );
            assert!(step.is_none());
            assert_eq!(position, Vec3::new(1.0, 0.0, 2.0));
            assert_eq!(heading, 0.25);
        }
    }

    #[test]
    fn pivot_offset_grows_with_the_steering_angle() {
        let length = 460.0;
        assert_eq!(pivot_offset(length, 0.0), 0.0);
        assert!(pivot_offset(length, 0.3) > pivot_offset(length, 0.1));
        assert!(pivot_offset(length, -0.2) < 0.0);
    }

    #[test]
    fn forward_vector_is_unit_length() {
        for heading in [0.0, 0.7, -2.1, 3.9] {
            assert!((forward(heading).length() - 1.0).abs() < 1e-6);
        }
    }
}
