//! Vehicle motion core: turns the currently-held movement keys into a
//! continuously evolving speed, steering angle, heading, position and
//! wheel-spin state, one tick per rendered frame.
//!
//! The crate knows nothing about rendering. A host (see `drive-viewer`)
//! resolves the car's geometry once through [`GeometryResolver`], feeds a
//! [`DirectionMask`] snapshot plus the frame rate into [`Vehicle::tick`],
//! and pulls the published values back out of [`Vehicle::snapshot`].

pub mod geometry;
pub mod input;
pub mod kinematics;
pub mod speed;
pub mod steering;
pub mod tuning;
pub mod vehicle;
pub mod wheels;

pub use geometry::{
    ChassisGeometry, GeometryError, GeometryResolver, NodeBounds, ResolvedWheels, WheelNodeMap,
    WheelRole,
};
pub use input::DirectionMask;
pub use tuning::{TuningError, VehicleTuning};
pub use vehicle::{Vehicle, VehicleSnapshot, VehicleState, WheelPose};
