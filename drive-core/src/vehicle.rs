//! The vehicle: owned state, the per-tick pipeline and the published
//! snapshot observers pull from.

use glam::Vec3;

use crate::geometry::{
    ChassisGeometry, GeometryError, GeometryResolver, ResolvedWheels, WheelNodeMap, WheelRole,
    resolve_geometry,
};
use crate::input::DirectionMask;
use crate::tuning::VehicleTuning;
use crate::wheels::WheelState;
use crate::{kinematics, speed, steering, wheels};

/// The motion state the core owns exclusively. External collaborators
/// write only the direction mask (via [`Vehicle::set_direction_mask`]) and
/// read everything else through [`Vehicle::snapshot`].
#[derive(Clone, Copy, Debug, Default)]
pub struct VehicleState {
    /// Signed speed, km/h. Positive is forward.
    pub speed_kph: f32,
    /// Clamped steering angle, radians. Never exceeds `max_steer`.
    pub steering_angle: f32,
    /// Yaw about the vertical axis, radians.
    pub heading: f32,
    /// World position, scene units.
    pub position: Vec3,
    /// Last input snapshot.
    pub direction_mask: DirectionMask,
}

/// Published per-tick values. Observers (HUD, camera, renderer) pull the
/// latest snapshot after a tick instead of subscribing to a push stream;
/// the values are always current and never buffered.
#[derive(Clone, Copy, Debug)]
pub struct VehicleSnapshot {
    pub speed_kph: f32,
    pub speed_mps: f32,
    pub steering_angle: f32,
    pub heading: f32,
    pub position: Vec3,
    /// Lateral pivot offset of the alternative turning model, for the
    /// debug pivot marker.
    pub pivot_offset: f32,
    pub wheels: [WheelPose; 4],
}

/// Pose of one wheel node, everything the renderer needs to orient it.
#[derive(Clone, Copy, Debug)]
pub struct WheelPose {
    pub role: WheelRole,
    pub spin_angle: f32,
    pub steer_yaw: f32,
    /// Setup-time mount rotation (180° on the right side).
    pub mount_yaw: f32,
}

/// A drivable car. Geometry is resolved once at construction; after that
/// the host calls [`Vehicle::tick`] once per rendered frame.
///
/// `H` is the host's wheel-transform handle type (an entity id, a node
/// pointer — the core only stores and hands them back).
#[derive(Debug)]
pub struct Vehicle<H> {
    tuning: VehicleTuning,
    geometry: ChassisGeometry,
    wheel_handles: ResolvedWheels<H>,
    wheels: [WheelState; 4],
    state: VehicleState,
}

impl<H> Vehicle<H> {
    /// Resolve the chassis geometry and wheel nodes and build the vehicle.
    ///
    /// Fails with a [`GeometryError`] before any tick runs if a required
    /// node is absent — the core never runs with partial wheel data.
    pub fn new<R>(
        resolver: &R,
        map: &WheelNodeMap,
        tuning: VehicleTuning,
    ) -> Result<Self, GeometryError>
    where
        R: GeometryResolver<Handle = H>,
    {
        let (geometry, wheel_handles) = resolve_geometry(resolver, map)?;
        tracing::debug!(
            length = geometry.length,
            width = geometry.width,
            height = geometry.height,
            wheel_diameter = geometry.wheel_diameter,
            "vehicle geometry resolved"
        );
        Ok(Self {
            tuning,
            geometry,
            wheel_handles,
            wheels: WheelRole::ALL.map(WheelState::new),
            state: VehicleState::default(),
        })
    }

    /// Latest input snapshot from the external collector.
    pub fn set_direction_mask(&mut self, mask: DirectionMask) {
        self.state.direction_mask = mask;
    }

    /// Advance the simulation by one tick.
    ///
    /// `fps` is this frame's rate, treated as a snapshot for the whole
    /// tick. Stage order is fixed: speed, then steering, then kinematics,
    /// then wheel animation — later stages read this tick's values.
    /// An unusable `fps` skips the stages that divide by it (no motion,
    /// no spin this tick); speed and steering still integrate.
    pub fn tick(&mut self, fps: f32) {
        let mask = self.state.direction_mask;

        self.state.speed_kph = speed::integrate(self.state.speed_kph, mask, &self.tuning);

        let (angle, raw_delta) = steering::integrate(self.state.steering_angle, mask, &self.tuning);
        self.state.steering_angle = angle;
        wheels::steer_front(&mut self.wheels, raw_delta);

        let speed_mps = speed::kph_to_mps(self.state.speed_kph);
        let moved = kinematics::advance(
            &mut self.state.position,
            &mut self.state.heading,
            speed_mps,
            self.state.steering_angle,
            &self.geometry,
            &self.tuning,
            fps,
        );
        if moved.is_none() {
            tracing::warn!(fps, "skipping motion and wheel spin for this tick");
            return;
        }

        wheels::spin(
            &mut self.wheels,
            speed_mps,
            self.geometry.wheel_diameter_m(),
            fps,
        );
    }

    /// Publish the current values for pull-style observers.
    pub fn snapshot(&self) -> VehicleSnapshot {
        VehicleSnapshot {
            speed_kph: self.state.speed_kph,
            speed_mps: speed::kph_to_mps(self.state.speed_kph),
            steering_angle: self.state.steering_angle,
            heading: self.state.heading,
            position: self.state.position,
            pivot_offset: kinematics::pivot_offset(self.geometry.length, self.state.steering_angle),
            wheels: self.wheels.map(|wheel| WheelPose {
                role: wheel.role,
                spin_angle: wheel.spin_angle,
                steer_yaw: wheel.steer_yaw,
                mount_yaw: wheel.mount_yaw(),
            }),
        }
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    pub fn geometry(&self) -> &ChassisGeometry {
        &self.geometry
    }

    pub fn wheel_handles(&self) -> &ResolvedWheels<H> {
        &self.wheel_handles
    }

    /// Advertised top speed, km/h. Not enforced during integration.
    pub fn max_speed_kph(&self) -> f32 {
        self.tuning.max_speed_kph
    }

    /// Wheel diameter in scene units.
    pub fn wheel_diameter(&self) -> f32 {
        self.geometry.wheel_diameter
    }
}
