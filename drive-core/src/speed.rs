//! Speed integration: one branch per tick, forward wins.

use crate::input::DirectionMask;
use crate::tuning::VehicleTuning;

/// Advance the signed speed (km/h) by one tick of held-key input.
///
/// Holding forward always accelerates, even if backward is held too.
/// Holding backward brakes (and eventually reverses). With neither held
/// the car coasts toward zero, and speeds within `snap_threshold` of zero
/// snap to exactly zero so no residual creep survives.
///
/// There is deliberately no top-speed clamp here: `max_speed_kph` is an
/// advertised capability, not an enforced limit.
pub fn integrate(speed_kph: f32, mask: DirectionMask, tuning: &VehicleTuning) -> f32 {
    if mask.contains(DirectionMask::FORWARD) {
        return speed_kph + tuning.accel_delta;
    }

    let mut v = speed_kph;
    if mask.contains(DirectionMask::BACKWARD) {
        v -= tuning.brake_delta;
    } else if v < 0.0 {
        v += tuning.roll_down_delta;
    } else {
        v -= tuning.roll_down_delta;
    }

    if v.abs() <= tuning.snap_threshold {
        v = 0.0;
    }
    v
}

/// Signed speed in metres per second.
pub fn kph_to_mps(speed_kph: f32) -> f32 {
    speed_kph * 1000.0 / 3600.0
}
