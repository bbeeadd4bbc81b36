//! HUD overlays: the speedometer label and an FPS counter.

use bevy::{
    color::palettes::css::WHITE,
    diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin},
    prelude::*,
};

use crate::car::CarSim;

#[derive(Component)]
pub struct SpeedometerText;

#[derive(Component)]
pub struct FpsCounterText;

pub fn setup(mut commands: Commands) {
    // Speedometer: black rounded label, top centre.
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Percent(10.0),
            justify_self: JustifySelf::Center,
            padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
            border_radius: BorderRadius::all(Val::Px(20.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
        Text::new("0 km/h"),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(WHITE.into()),
        SpeedometerText,
    ));

    // FPS counter, top left.
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(8.0),
            left: Val::Px(8.0),
            padding: UiRect::axes(Val::Px(8.0), Val::Px(4.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.55)),
        Text::new("FPS: --"),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(WHITE.into()),
        FpsCounterText,
    ));
}

/// Show the published speed, rounded up to whole km/h.
pub fn update_speedometer(
    car_query: Query<&CarSim>,
    mut text_query: Query<&mut Text, With<SpeedometerText>>,
) {
    let Ok(mut text) = text_query.single_mut() else {
        return;
    };
    let Ok(sim) = car_query.single() else {
        return;
    };

    let speed_kph = sim.vehicle.snapshot().speed_kph;
    text.0 = format!("{} km/h", speed_kph.ceil());
}

pub fn update_fps_counter(
    diagnostics: Res<DiagnosticsStore>,
    mut text_query: Query<&mut Text, With<FpsCounterText>>,
) {
    let Ok(mut text) = text_query.single_mut() else {
        return;
    };

    if let Some(fps) = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|value| value.smoothed())
    {
        text.0 = format!("FPS: {fps:>3.0}");
    }
}
