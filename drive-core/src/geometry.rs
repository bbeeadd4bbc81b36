//! The one-time geometry resolution step that turns a chassis scene graph
//! into the numbers the motion core needs.
//!
//! The core never walks a scene itself: the host implements
//! [`GeometryResolver`] over whatever node store it has, and
//! [`resolve_geometry`] runs once at vehicle construction. Any missing
//! node is fatal there; the core never ticks with partial wheel data.

use glam::Vec3;
use thiserror::Error;

/// Logical position of a wheel on the chassis.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum WheelRole {
    FrontLeft,
    FrontRight,
    BackLeft,
    BackRight,
}

impl WheelRole {
    pub const ALL: [WheelRole; 4] = [
        WheelRole::FrontLeft,
        WheelRole::FrontRight,
        WheelRole::BackLeft,
        WheelRole::BackRight,
    ];

    /// Front wheels respond to the steering angle.
    pub fn is_front(self) -> bool {
        matches!(self, WheelRole::FrontLeft | WheelRole::FrontRight)
    }

    /// Right-side wheels are mounted with their local frame rotated 180°,
    /// so their spin runs with the opposite sign.
    pub fn is_right_side(self) -> bool {
        matches!(self, WheelRole::FrontRight | WheelRole::BackRight)
    }
}

/// Wheel-role → node-id mapping plus the id patterns used to find the
/// chassis shell and the reference wheel mesh.
#[derive(Clone, Debug)]
pub struct WheelNodeMap {
    front_left: String,
    front_right: String,
    back_left: String,
    back_right: String,
    /// Appended to a wheel node id to form its mesh id.
    pub mesh_id_suffix: String,
    /// Mesh whose bounding box gives the chassis dimensions.
    pub chassis_node_id: String,
}

impl Default for WheelNodeMap {
    fn default() -> Self {
        Self {
            front_left: "wheel.020".to_string(),
            front_right: "wheel.028".to_string(),
            back_left: "wheel.004".to_string(),
            back_right: "wheel.012".to_string(),
            mesh_id_suffix: "_Material.033_0".to_string(),
            chassis_node_id: "object.001_Material.001_0".to_string(),
        }
    }
}

impl WheelNodeMap {
    pub fn node_id(&self, role: WheelRole) -> &str {
        match role {
            WheelRole::FrontLeft => &self.front_left,
            WheelRole::FrontRight => &self.front_right,
            WheelRole::BackLeft => &self.back_left,
            WheelRole::BackRight => &self.back_right,
        }
    }

    /// Id of the mesh child that carries a wheel's bounding box.
    pub fn mesh_id(&self, role: WheelRole) -> String {
        format!("{}{}", self.node_id(role), self.mesh_id_suffix)
    }

    /// Replace the node id for one role (builder style).
    pub fn with_node(mut self, role: WheelRole, node_id: impl Into<String>) -> Self {
        let id = node_id.into();
        match role {
            WheelRole::FrontLeft => self.front_left = id,
            WheelRole::FrontRight => self.front_right = id,
            WheelRole::BackLeft => self.back_left = id,
            WheelRole::BackRight => self.back_right = id,
        }
        self
    }
}

/// Axis-aligned bounding box of a scene node, in the chassis frame.
#[derive(Clone, Copy, Debug)]
pub struct NodeBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl NodeBounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    // Sum of absolute extremes, matching how the source model is rooted
    // (the chassis origin sits between min and max on each axis).
    fn size_on(&self, min: f32, max: f32) -> f32 {
        max.abs() + min.abs()
    }

    pub fn size(&self) -> Vec3 {
        Vec3::new(
            self.size_on(self.min.x, self.max.x),
            self.size_on(self.min.y, self.max.y),
            self.size_on(self.min.z, self.max.z),
        )
    }
}

/// Host-side lookup the core resolves its geometry through, once.
pub trait GeometryResolver {
    /// Handle to a wheel's transform node, kept by the vehicle so the host
    /// can apply spin/steer poses after each tick.
    type Handle;

    /// Bounding box of the chassis reference mesh, if present.
    fn chassis_bounds(&self, node_id: &str) -> Option<NodeBounds>;

    /// Transform handle of a wheel node, if present.
    fn wheel_node(&self, node_id: &str) -> Option<Self::Handle>;

    /// Bounding box of a wheel mesh, if present.
    fn mesh_bounds(&self, mesh_id: &str) -> Option<NodeBounds>;
}

/// Transform handles for the four resolved wheels.
#[derive(Clone, Copy, Debug)]
pub struct ResolvedWheels<H> {
    pub front_left: H,
    pub front_right: H,
    pub back_left: H,
    pub back_right: H,
}

impl<H> ResolvedWheels<H> {
    pub fn get(&self, role: WheelRole) -> &H {
        match role {
            WheelRole::FrontLeft => &self.front_left,
            WheelRole::FrontRight => &self.front_right,
            WheelRole::BackLeft => &self.back_left,
            WheelRole::BackRight => &self.back_right,
        }
    }
}

/// Chassis dimensions and wheel diameter, in scene units. Immutable after
/// construction.
#[derive(Clone, Copy, Debug)]
pub struct ChassisGeometry {
    pub length: f32,
    pub width: f32,
    pub height: f32,
    pub wheel_diameter: f32,
}

impl ChassisGeometry {
    /// Derive the geometry from the chassis and reference-wheel bounding
    /// boxes. Fails if the wheel box is degenerate: there is no physical
    /// car without a measurable wheel.
    pub fn from_bounds(chassis: NodeBounds, wheel: NodeBounds) -> Result<Self, GeometryError> {
        let chassis_size = chassis.size();
        let wheel_diameter = wheel.size().y;
        if wheel_diameter <= 0.0 {
            return Err(GeometryError::InvalidWheelDiameter {
                diameter: wheel_diameter,
            });
        }
        Ok(Self {
            length: chassis_size.z,
            width: chassis_size.x,
            height: chassis_size.y,
            wheel_diameter,
        })
    }

    /// Wheel diameter in metres (scene units are centimetres).
    pub fn wheel_diameter_m(&self) -> f32 {
        self.wheel_diameter / 100.0
    }
}

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("chassis reference mesh {node_id:?} not found")]
    MissingChassis { node_id: String },
    #[error("{role:?} wheel node {node_id:?} not found")]
    MissingNode { role: WheelRole, node_id: String },
    #[error("reference wheel mesh {mesh_id:?} not found")]
    MissingWheelMesh { mesh_id: String },
    #[error("wheel diameter must be positive, got {diameter}")]
    InvalidWheelDiameter { diameter: f32 },
}

/// Resolve everything the vehicle needs from the host scene, in one pass.
///
/// The wheel diameter is read off the back-left wheel's mesh; the other
/// wheels only need transform handles.
pub fn resolve_geometry<R: GeometryResolver>(
    resolver: &R,
    map: &WheelNodeMap,
) -> Result<(ChassisGeometry, ResolvedWheels<R::Handle>), GeometryError> {
    let chassis = resolver
        .chassis_bounds(&map.chassis_node_id)
        .ok_or_else(|| GeometryError::MissingChassis {
            node_id: map.chassis_node_id.clone(),
        })?;

    let resolve_wheel = |role: WheelRole| {
        let node_id = map.node_id(role);
        resolver
            .wheel_node(node_id)
            .ok_or_else(|| GeometryError::MissingNode {
                role,
                node_id: node_id.to_string(),
            })
    };
    let wheels = ResolvedWheels {
        front_left: resolve_wheel(WheelRole::FrontLeft)?,
        front_right: resolve_wheel(WheelRole::FrontRight)?,
        back_left: resolve_wheel(WheelRole::BackLeft)?,
        back_right: resolve_wheel(WheelRole::BackRight)?,
    };

    let reference_mesh_id = map.mesh_id(WheelRole::BackLeft);
    let wheel_bounds = resolver.mesh_bounds(&reference_mesh_id).ok_or_else(|| {
        GeometryError::MissingWheelMesh {
            mesh_id: reference_mesh_id.clone(),
        }
    })?;

    let geometry = ChassisGeometry::from_bounds(chassis, wheel_bounds)?;
    Ok((geometry, wheels))
}
