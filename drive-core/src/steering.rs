//! Steering integration: discrete per-tick increments under a hard clamp.

use crate::input::DirectionMask;
use crate::tuning::VehicleTuning;

/// Advance the steering angle by one tick of held-key input.
///
/// Returns `(clamped_angle, raw_delta)`. The clamped angle is the state
/// the kinematic model reads and never exceeds `max_steer` in magnitude;
/// when a delta would overshoot, the angle saturates to the ceiling whose
/// sign matches the attempted delta. The raw delta is what the front
/// wheels' visual yaw accumulates — once the clamp engages the two drift
/// apart, which is the behaviour the vehicle has always shipped with.
pub fn integrate(angle: f32, mask: DirectionMask, tuning: &VehicleTuning) -> (f32, f32) {
    let step = tuning.steer_step;
    let delta = if mask.contains(DirectionMask::LEFT) {
        step
    } else if mask.contains(DirectionMask::RIGHT) {
        -step
    } else if tuning.self_center && angle != 0.0 {
        // Step back toward zero without overshooting it.
        if angle > 0.0 {
            (-step).max(-angle)
        } else {
            step.min(-angle)
        }
    } else {
        0.0
    };

    let mut next = angle + delta;
    if next.abs() > tuning.max_steer {
        next = if delta < 0.0 {
            -tuning.max_steer
        } else {
            tuning.max_steer
        };
    }
    (next, delta)
}

#[cfg(test)]
mod tests {
    use super::integrate;
    use crate::input::DirectionMask;
    use crate::tuning::VehicleTuning;

    fn tuning() -> VehicleTuning {
        VehicleTuning {
            steer_step: 0.01,
            ..VehicleTuning::default()
        }
    }

    #[test]
    fn left_increments_and_right_decrements() {
        let tuning = tuning();
        let (angle, delta) = integrate(0.0, DirectionMask::LEFT, &tuning);
        assert_eq!(angle, 0.01);
        assert_eq!(delta, 0.01);

        let (angle, delta) = integrate(angle, DirectionMask::RIGHT, &tuning);
        assert_eq!(angle, 0.0);
        assert_eq!(delta, -0.01);
    }

    #[test]
    fn holding_left_never_exceeds_the_ceiling() {
        let tuning = tuning();
        let mut angle = 0.0;
        for _ in 0..200 {
            let (next, _) = integrate(angle, DirectionMask::LEFT, &tuning);
            angle = next;
            assert!(angle.abs() <= tuning.max_steer);
        }
        assert_eq!(angle, tuning.max_steer);
    }

    #[test]
    fn one_opposite_tick_steps_down_from_the_clamp() {
        let tuning = tuning();
        let (angle, _) = integrate(tuning.max_steer, DirectionMask::RIGHT, &tuning);
        assert!((angle - (tuning.max_steer - tuning.steer_step)).abs() < 1e-6);
    }

    #[test]
    fn saturation_sign_follows_the_attempted_delta() {
        let tuning = tuning();
        let (angle, _) = integrate(-tuning.max_steer, DirectionMask::RIGHT, &tuning);
        assert_eq!(angle, -tuning.max_steer);

        let (angle, _) = integrate(tuning.max_steer, DirectionMask::LEFT, &tuning);
        assert_eq!(angle, tuning.max_steer);
    }

    #[test]
    fn without_self_center_the_angle_holds_while_coasting() {
        let tuning = tuning();
        let (angle, delta) = integrate(0.2, DirectionMask::NONE, &tuning);
        assert_eq!(angle, 0.2);
        assert_eq!(delta, 0.0);
    }

    #[test]
    fn self_center_steps_toward_zero_without_overshoot() {
        let tuning = VehicleTuning {
            self_center: true,
            ..tuning()
        };
        let (angle, _) = integrate(0.025, DirectionMask::NONE, &tuning);
        assert!((angle - 0.015).abs() < 1e-6);

        // Final partial step lands exactly on zero.
        let (angle, _) = integrate(0.004, DirectionMask::NONE, &tuning);
        assert_eq!(angle, 0.0);
        let (angle, _) = integrate(-0.004, DirectionMask::NONE, &tuning);
        assert_eq!(angle, 0.0);
    }
}
