//! Item pickup — overlap contract между item actor и pawn'ом
//!
//! Контракт (как в оригинальном level design):
//! - Overlap begin: на pawn зеркалится in_range=true + weak back-reference
//! - Overlap end: оба поля сбрасываются
//! - Pick input в радиусе: item уничтожается, pawn играет pickup montage
//!
//! Items создаются на загрузке уровня, уничтожаются при подборе.

use bevy::prelude::*;

use crate::combat::Ragdoll;
use crate::components::Player;
use crate::input::PlayerInput;
use crate::player::AnimationCue;

/// Item actor с overlap-боксом (axis-aligned, вокруг Transform)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct ItemPickup {
    pub half_extents: Vec3,
}

impl Default for ItemPickup {
    fn default() -> Self {
        Self {
            half_extents: Vec3::splat(1.0),
        }
    }
}

impl ItemPickup {
    /// Точка внутри overlap-бокса?
    pub fn contains(&self, item_position: Vec3, point: Vec3) -> bool {
        let offset = (point - item_position).abs();
        offset.x <= self.half_extents.x
            && offset.y <= self.half_extents.y
            && offset.z <= self.half_extents.z
    }
}

/// Pickup sensor pawn'а (зеркало overlap state)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PickupSensor {
    pub in_range: bool,
    /// Weak back-reference на item в радиусе
    pub item: Option<Entity>,
}

/// Event: pawn вошёл в pickup range
#[derive(Event, Debug, Clone, Copy)]
pub struct PickupRangeEntered {
    pub actor: Entity,
    pub item: Entity,
}

/// Event: pawn вышел из pickup range (или item пропал)
#[derive(Event, Debug, Clone, Copy)]
pub struct PickupRangeExited {
    pub actor: Entity,
    pub item: Entity,
}

/// Event: item подобран и уничтожен
#[derive(Event, Debug, Clone, Copy)]
pub struct ItemPickedUp {
    pub actor: Entity,
    pub item: Entity,
}

/// Система: overlap begin/end transitions
///
/// Состояние сенсора меняется только на ПЕРЕХОДАХ (как
/// OnComponentBegin/EndOverlap), чтобы не спамить events каждый тик.
pub fn update_pickup_overlap(
    items: Query<(Entity, &Transform, &ItemPickup)>,
    mut sensors: Query<(Entity, &Transform, &mut PickupSensor), With<Player>>,
    mut entered: EventWriter<PickupRangeEntered>,
    mut exited: EventWriter<PickupRangeExited>,
) {
    for (actor, actor_transform, mut sensor) in sensors.iter_mut() {
        let overlapping = items.iter().find_map(|(item, item_transform, pickup)| {
            pickup
                .contains(item_transform.translation, actor_transform.translation)
                .then_some(item)
        });

        match (sensor.item, overlapping) {
            (None, Some(item)) => {
                sensor.in_range = true;
                sensor.item = Some(item);
                entered.write(PickupRangeEntered { actor, item });
            }
            (Some(item), None) => {
                sensor.in_range = false;
                sensor.item = None;
                exited.write(PickupRangeExited { actor, item });
            }
            (Some(previous), Some(current)) if previous != current => {
                // Перешли в бокс другого item'а за один тик
                exited.write(PickupRangeExited {
                    actor,
                    item: previous,
                });
                sensor.item = Some(current);
                entered.write(PickupRangeEntered {
                    actor,
                    item: current,
                });
            }
            _ => {}
        }
    }
}

/// Система: Pick input → подбор item'а в радиусе
pub fn handle_pick_input(
    mut commands: Commands,
    mut inputs: EventReader<PlayerInput>,
    mut sensors: Query<(Entity, &mut PickupSensor, Option<&Ragdoll>), With<Player>>,
    items: Query<(), With<ItemPickup>>,
    mut picked: EventWriter<ItemPickedUp>,
    mut animation_cues: EventWriter<AnimationCue>,
) {
    for input in inputs.read() {
        if *input != PlayerInput::Pick {
            continue;
        }
        for (actor, mut sensor, ragdoll) in sensors.iter_mut() {
            if ragdoll.is_some() || !sensor.in_range {
                continue;
            }
            let Some(item) = sensor.item else {
                continue;
            };
            // Item мог быть уже уничтожен (double-pick в одном тике)
            if items.get(item).is_err() {
                sensor.in_range = false;
                sensor.item = None;
                continue;
            }

            commands.entity(item).despawn();
            sensor.in_range = false;
            sensor.item = None;

            picked.write(ItemPickedUp { actor, item });
            animation_cues.write(AnimationCue::PickUp { actor });

            crate::logger::log_info(&format!("Pawn {:?} picked up item {:?}", actor, item));
        }
    }
}

/// Pickup Plugin
pub struct PickupPlugin;

impl Plugin for PickupPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PickupRangeEntered>()
            .add_event::<PickupRangeExited>()
            .add_event::<ItemPickedUp>();

        app.add_systems(
            FixedUpdate,
            (update_pickup_overlap, handle_pick_input)
                .chain()
                .after(crate::player::integrate_pawns),
        );
    }
}
