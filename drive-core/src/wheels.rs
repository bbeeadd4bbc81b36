//! Wheel spin and front-wheel steer animation state.

use std::f32::consts::PI;

use crate::geometry::WheelRole;

/// Per-wheel animation state the renderer poses its wheel nodes from.
#[derive(Clone, Copy, Debug)]
pub struct WheelState {
    pub role: WheelRole,
    /// Accumulated rolling rotation about the axle, radians.
    pub spin_angle: f32,
    /// Accumulated visual yaw of a front wheel. Integrates the raw
    /// steering deltas, not the clamped angle, and so can drift from the
    /// steering state once the clamp engages.
    pub steer_yaw: f32,
}

impl WheelState {
    pub fn new(role: WheelRole) -> Self {
        Self {
            role,
            spin_angle: 0.0,
            steer_yaw: 0.0,
        }
    }

    /// Mount rotation applied at setup: right-side wheels face outward,
    /// so their local frame is half a turn around the vertical axis.
    pub fn mount_yaw(&self) -> f32 {
        if self.role.is_right_side() { PI } else { 0.0 }
    }
}

/// Rolling angular frequency (rad/s) for a speed and wheel diameter.
///
/// Zero speed short-circuits to zero: the common standstill case must not
/// feed a `0 * inf`-shaped product into downstream math. The diameter is
/// positive by construction ([`crate::geometry::ChassisGeometry`]).
pub fn angular_frequency(speed_mps: f32, wheel_diameter_m: f32) -> f32 {
    if speed_mps == 0.0 {
        return 0.0;
    }
    2.0 * speed_mps / wheel_diameter_m
}

/// Spin all four wheels for one tick. Right-side wheels take the mirrored
/// sign so both sides visually roll the same way despite the flipped
/// local frame.
pub fn spin(wheels: &mut [WheelState; 4], speed_mps: f32, wheel_diameter_m: f32, fps: f32) {
    let spin_delta = angular_frequency(speed_mps, wheel_diameter_m) / fps;
    for wheel in wheels {
        if wheel.role.is_right_side() {
            wheel.spin_angle -= spin_delta;
        } else {
            wheel.spin_angle += spin_delta;
        }
    }
}

/// Apply one tick's raw steering delta to the front pair's visual yaw.
pub fn steer_front(wheels: &mut [WheelState; 4], raw_delta: f32) {
    if raw_delta == 0.0 {
        return;
    }
    for wheel in wheels {
        if wheel.role.is_front() {
            wheel.steer_yaw += raw_delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{WheelState, angular_frequency, spin, steer_front};
    use crate::geometry::WheelRole;
    use std::f32::consts::PI;

    fn wheels() -> [WheelState; 4] {
        WheelRole::ALL.map(WheelState::new)
    }

    #[test]
    fn zero_speed_short_circuits_to_zero_frequency() {
        for diameter in [0.1, 0.6, 2.0] {
            assert_eq!(angular_frequency(0.0, diameter), 0.0);
        }
    }

    #[test]
    fn sixty_cm_wheel_at_ten_mps_spins_a_third_of_pi_per_frame() {
        // 36 km/h = 10 m/s, diameter 0.6 m: ω = 2 * 10 / 0.6 ≈ 33.33 rad/s,
        // so one 60 fps frame turns the wheel ≈ 0.5556 rad.
        let freq = angular_frequency(10.0, 0.6);
        assert!((freq - 33.333).abs() < 1e-2);

        let mut wheels = wheels();
        spin(&mut wheels, 10.0, 0.6, 60.0);
        let front_left = wheels[0];
        assert_eq!(front_left.role, WheelRole::FrontLeft);
        assert!((front_left.spin_angle - 0.5556).abs() < 1e-3);
    }

    #[test]
    fn right_side_wheels_spin_mirrored() {
        let mut wheels = wheels();
        spin(&mut wheels, 5.0, 0.6, 60.0);
        for wheel in &wheels {
            if wheel.role.is_right_side() {
                assert!(wheel.spin_angle < 0.0);
            } else {
                assert!(wheel.spin_angle > 0.0);
            }
            assert!((wheel.spin_angle.abs() - wheels[0].spin_angle.abs()).abs() < 1e-6);
        }
    }

    #[test]
    fn reverse_speed_spins_the_other_way() {
        let mut wheels = wheels();
        spin(&mut wheels, -5.0, 0.6, 60.0);
        assert!(wheels[0].spin_angle < 0.0);
    }

    #[test]
    fn only_front_wheels_take_steer_yaw() {
        let mut wheels = wheels();
        steer_front(&mut wheels, 0.01);
        steer_front(&mut wheels, 0.01);
        for wheel in &wheels {
            if wheel.role.is_front() {
                assert!((wheel.steer_yaw - 0.02).abs() < 1e-6);
            } else {
                assert_eq!(wheel.steer_yaw, 0.0);
            }
        }
    }

    #[test]
    fn mount_yaw_flips_the_right_side() {
        for wheel in wheels() {
            if wheel.role.is_right_side() {
                assert_eq!(wheel.mount_yaw(), PI);
            } else {
                assert_eq!(wheel.mount_yaw(), 0.0);
            }
        }
    }
}
