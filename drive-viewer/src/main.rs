use std::path::Path;

use bevy::{
    color::palettes::css::RED,
    diagnostic::FrameTimeDiagnosticsPlugin,
    input::mouse::MouseWheel,
    prelude::*,
};

use drive_core::{DirectionMask, VehicleTuning};

mod car;
mod hud;

use car::{CarBody, CarSim};

fn main() {
    let tuning_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "drive-viewer/assets/tuning.toml".to_string());
    let tuning = VehicleTuning::load(Path::new(&tuning_path))
        .unwrap_or_else(|err| panic!("Failed to load tuning file {tuning_path}: {err}"));

    App::new()
        .add_plugins((DefaultPlugins, FrameTimeDiagnosticsPlugin::default()))
        .insert_resource(Tuning(tuning))
        .insert_resource(DirectionInput::default())
        .insert_resource(CameraRig::default())
        .add_systems(
            Startup,
            (setup_scene, car::spawn_car.after(setup_scene), hud::setup),
        )
        .add_systems(
            Update,
            (
                collect_direction_input,
                tick_vehicles.after(collect_direction_input),
                car::apply_wheel_poses.after(tick_vehicles),
                hud::update_speedometer.after(tick_vehicles),
                hud::update_fps_counter,
                update_camera.after(tick_vehicles),
                update_light.after(update_camera),
                draw_debug_gizmos.after(tick_vehicles),
            ),
        )
        .run();
}

/// Vehicle tuning loaded at startup, shared with the car spawner.
#[derive(Resource, Clone, Copy)]
pub struct Tuning(pub VehicleTuning);

/// The current movement-key bitmask, written by the keyboard collector
/// and read by the simulation tick.
#[derive(Resource, Default)]
pub struct DirectionInput(pub DirectionMask);

#[derive(Resource)]
struct CameraRig {
    distance: f32,
    height: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            distance: 1200.0,
            height: 500.0,
        }
    }
}

/// Marker: the point light that trails the camera.
#[derive(Component)]
struct SceneLight;

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Green ground plane (scene units are centimetres).
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(100_000.0, 100_000.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.2, 0.6, 0.2),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));

    // Point light, repositioned to the camera every frame.
    commands.spawn((
        PointLight {
            intensity: 2_000_000_000_000.0,
            range: 200_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(0.0, 30_000.0, 0.0),
        SceneLight,
    ));

    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 500.0, -1200.0).looking_at(Vec3::ZERO, Vec3::Y),
        Projection::Perspective(PerspectiveProjection {
            near: 1.0,
            far: 1_000_000.0,
            ..Default::default()
        }),
    ));
}

/// Keyboard collector: set a direction bit on key-down, clear it on
/// key-up. The mask is a snapshot the core reads as-is; W and S can be
/// held together.
fn collect_direction_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut input: ResMut<DirectionInput>,
) {
    let bindings = [
        (KeyCode::KeyW, DirectionMask::FORWARD),
        (KeyCode::KeyS, DirectionMask::BACKWARD),
        (KeyCode::KeyA, DirectionMask::LEFT),
        (KeyCode::KeyD, DirectionMask::RIGHT),
    ];

    for (key, bit) in bindings {
        if keyboard.just_pressed(key) {
            input.0.set(bit);
        }
        if keyboard.just_released(key) {
            input.0.clear(bit);
        }
    }
}

/// Advance every car by one tick with this frame's rate. The rate is
/// sampled once here and used for the whole tick; a zero delta (first
/// frame) is passed through as an unusable rate the core absorbs.
fn tick_vehicles(
    time: Res<Time>,
    input: Res<DirectionInput>,
    mut car_query: Query<(&mut CarSim, &mut Transform), With<CarBody>>,
) {
    let dt = time.delta_secs();
    let fps = if dt > 0.0 { 1.0 / dt } else { 0.0 };

    for (mut sim, mut transform) in &mut car_query {
        sim.vehicle.set_direction_mask(input.0);
        sim.vehicle.tick(fps);

        let snapshot = sim.vehicle.snapshot();
        transform.translation.x = snapshot.position.x;
        transform.translation.z = snapshot.position.z;
        transform.rotation = Quat::from_rotation_y(snapshot.heading);
    }
}

/// Trail the car from behind its heading; mouse wheel zooms the rig.
fn update_camera(
    car_query: Query<&Transform, With<CarBody>>,
    mut camera_query: Query<&mut Transform, (With<Camera3d>, Without<CarBody>)>,
    mut scroll_events: MessageReader<MouseWheel>,
    mut rig: ResMut<CameraRig>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    for event in scroll_events.read() {
        let zoom_delta = match event.unit {
            bevy::input::mouse::MouseScrollUnit::Line => event.y * 0.1,
            bevy::input::mouse::MouseScrollUnit::Pixel => event.y * 0.001,
        };
        rig.distance *= 1.0 - zoom_delta;
        rig.distance = rig.distance.clamp(300.0, 20_000.0);
    }

    let Ok(car_transform) = car_query.single() else {
        return;
    };

    let target = car_transform.translation;
    let behind = car_transform.rotation * Vec3::Z * -rig.distance;
    camera_transform.translation = target + behind + Vec3::Y * rig.height;
    camera_transform.look_at(target, Vec3::Y);
}

/// Keep the point light on the camera, as the city scene always has.
fn update_light(
    camera_query: Query<&Transform, With<Camera3d>>,
    mut light_query: Query<&mut Transform, (With<SceneLight>, Without<Camera3d>)>,
) {
    let Ok(camera_transform) = camera_query.single() else {
        return;
    };
    for mut light_transform in &mut light_query {
        light_transform.translation = camera_transform.translation;
    }
}

/// Body axes plus the red pivot marker of the pivot-relocation turning
/// model, sitting on the lateral axis at the current pivot offset.
fn draw_debug_gizmos(car_query: Query<(&Transform, &CarSim), With<CarBody>>, mut gizmos: Gizmos) {
    for (transform, sim) in &car_query {
        gizmos.axes(*transform, 500.0);

        let snapshot = sim.vehicle.snapshot();
        let lateral = transform.rotation * Vec3::X;
        let rear = transform.rotation * Vec3::Z * -(sim.vehicle.geometry().length / 2.0);
        let pivot = transform.translation + lateral * snapshot.pivot_offset + rear;
        gizmos.sphere(Isometry3d::from_translation(pivot), 15.0, RED);
    }
}
