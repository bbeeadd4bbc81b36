//! Car assembly: spawns the chassis and wheel entities under the
//! convention node ids, resolves them through the core's geometry
//! contract and attaches the simulation.

use std::collections::HashMap;
use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use drive_core::{
    GeometryResolver, NodeBounds, Vehicle, WheelNodeMap, WheelRole,
};

use crate::Tuning;

// Placeholder chassis dimensions, centimetres.
const CHASSIS_LENGTH: f32 = 460.0;
const CHASSIS_WIDTH: f32 = 180.0;
const CHASSIS_HEIGHT: f32 = 120.0;
const WHEEL_DIAMETER: f32 = 60.0;
const WHEEL_THICKNESS: f32 = 24.0;
const AXLE_INSET: f32 = 80.0;

/// Marker for the car body root entity.
#[derive(Component)]
pub struct CarBody;

/// Marker for a wheel transform node.
#[derive(Component)]
pub struct WheelNode {
    pub role: WheelRole,
}

/// The motion core driving this car.
#[derive(Component)]
pub struct CarSim {
    pub vehicle: Vehicle<Entity>,
}

/// Index of the spawned car nodes, implementing the core's geometry
/// lookup. Built once during spawn and discarded after construction.
struct SceneNodes {
    chassis_node_id: String,
    chassis: NodeBounds,
    wheel_nodes: HashMap<String, Entity>,
    mesh_bounds: HashMap<String, NodeBounds>,
}

impl GeometryResolver for SceneNodes {
    type Handle = Entity;

    fn chassis_bounds(&self, node_id: &str) -> Option<NodeBounds> {
        (self.chassis_node_id == node_id).then_some(self.chassis)
    }

    fn wheel_node(&self, node_id: &str) -> Option<Entity> {
        self.wheel_nodes.get(node_id).copied()
    }

    fn mesh_bounds(&self, mesh_id: &str) -> Option<NodeBounds> {
        self.mesh_bounds.get(mesh_id).copied()
    }
}

/// Wheel attach point in the chassis frame (axle height is the origin).
fn wheel_offset(role: WheelRole) -> Vec3 {
    let x = if role.is_right_side() {
        CHASSIS_WIDTH / 2.0
    } else {
        -CHASSIS_WIDTH / 2.0
    };
    let z = if role.is_front() {
        CHASSIS_LENGTH / 2.0 - AXLE_INSET
    } else {
        -(CHASSIS_LENGTH / 2.0 - AXLE_INSET)
    };
    Vec3::new(x, WHEEL_DIAMETER / 2.0, z)
}

/// Pick a part's material from the palette. An unmapped part id is a
/// visual-only problem: log it and keep the fallback, never fail.
fn part_material(
    palette: &HashMap<&str, Handle<StandardMaterial>>,
    part_id: &str,
    fallback: &Handle<StandardMaterial>,
) -> Handle<StandardMaterial> {
    match palette.get(part_id) {
        Some(handle) => handle.clone(),
        None => {
            warn!("no material mapped for part {part_id:?}, keeping the default");
            fallback.clone()
        }
    }
}

pub fn spawn_car(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    tuning: Res<Tuning>,
) {
    let map = WheelNodeMap::default();

    let fallback = materials.add(StandardMaterial::default());
    let mut palette: HashMap<&str, Handle<StandardMaterial>> = HashMap::new();
    palette.insert(
        "body",
        materials.add(StandardMaterial {
            base_color: Color::srgb(0.1, 0.3, 0.8),
            metallic: 0.6,
            perceptual_roughness: 0.3,
            ..default()
        }),
    );
    palette.insert(
        "wheel",
        materials.add(StandardMaterial {
            base_color: Color::srgb(0.05, 0.05, 0.05),
            perceptual_roughness: 0.9,
            ..default()
        }),
    );

    let chassis_mesh = meshes.add(Cuboid::new(CHASSIS_WIDTH, CHASSIS_HEIGHT, CHASSIS_LENGTH));
    let wheel_mesh = meshes.add(Cylinder::new(WHEEL_DIAMETER / 2.0, WHEEL_THICKNESS));

    let mut wheel_nodes = HashMap::new();
    let body = commands
        .spawn((Transform::default(), Visibility::default(), CarBody))
        .id();

    commands.entity(body).with_children(|parent| {
        parent.spawn((
            Mesh3d(chassis_mesh),
            MeshMaterial3d(part_material(&palette, "body", &fallback)),
            // Chassis sits above the axle line.
            Transform::from_xyz(0.0, WHEEL_DIAMETER / 2.0 + CHASSIS_HEIGHT / 2.0 - 20.0, 0.0),
            Name::new(map.chassis_node_id.clone()),
        ));

        for role in WheelRole::ALL {
            let node_id = map.node_id(role).to_string();
            let wheel = parent
                .spawn((
                    Transform::from_translation(wheel_offset(role)),
                    Visibility::default(),
                    WheelNode { role },
                    Name::new(node_id.clone()),
                ))
                .with_children(|wheel| {
                    // Cylinder axis is Y; lay it over so the axle runs
                    // along the wheel node's X.
                    wheel.spawn((
                        Mesh3d(wheel_mesh.clone()),
                        MeshMaterial3d(part_material(&palette, "wheel", &fallback)),
                        Transform::from_rotation(Quat::from_rotation_z(FRAC_PI_2)),
                        Name::new(map.mesh_id(role)),
                    ));
                })
                .id();
            wheel_nodes.insert(node_id, wheel);
        }
    });

    let half_wheel = WHEEL_DIAMETER / 2.0;
    let nodes = SceneNodes {
        chassis_node_id: map.chassis_node_id.clone(),
        chassis: NodeBounds::new(
            glam_vec(-CHASSIS_WIDTH / 2.0, -CHASSIS_HEIGHT / 2.0, -CHASSIS_LENGTH / 2.0),
            glam_vec(CHASSIS_WIDTH / 2.0, CHASSIS_HEIGHT / 2.0, CHASSIS_LENGTH / 2.0),
        ),
        wheel_nodes,
        mesh_bounds: HashMap::from([(
            map.mesh_id(WheelRole::BackLeft),
            NodeBounds::new(
                glam_vec(-WHEEL_THICKNESS / 2.0, -half_wheel, -half_wheel),
                glam_vec(WHEEL_THICKNESS / 2.0, half_wheel, half_wheel),
            ),
        )]),
    };

    let vehicle = Vehicle::new(&nodes, &map, tuning.0)
        .unwrap_or_else(|err| panic!("Failed to assemble car: {err}"));
    commands.entity(body).insert(CarSim { vehicle });
}

fn glam_vec(x: f32, y: f32, z: f32) -> glam::Vec3 {
    glam::Vec3::new(x, y, z)
}

/// Pose every wheel node from the latest snapshot: mount yaw (right side
/// is flipped half a turn at setup), accumulated visual steer yaw, then
/// spin about the axle.
pub fn apply_wheel_poses(
    car_query: Query<&CarSim>,
    mut wheel_query: Query<&mut Transform, With<WheelNode>>,
) {
    for sim in &car_query {
        let snapshot = sim.vehicle.snapshot();
        for pose in snapshot.wheels {
            let entity = *sim.vehicle.wheel_handles().get(pose.role);
            if let Ok(mut transform) = wheel_query.get_mut(entity) {
                transform.rotation = Quat::from_rotation_y(pose.mount_yaw + pose.steer_yaw)
                    * Quat::from_rotation_x(pose.spin_angle);
            }
        }
    }
}
