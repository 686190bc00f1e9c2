//! Game mode — правила матча сведены к выбору дефолтного pawn'а
//!
//! Вся суть режима: какой pawn спавнить и где. Никаких score/win
//! conditions — lifecycle гранат и акторов живёт в своих подсистемах.

use bevy::prelude::*;

use crate::components::{Actor, CameraRig, MoveIntent, Player};
use crate::physics::PhysicsBody;
use crate::pickup::PickupSensor;
use crate::player::PawnMovement;
use crate::throw::{ThrowGate, TrajectoryPrediction};

/// Параметры дефолтного pawn'а режима
#[derive(Resource, Debug, Clone)]
pub struct GameMode {
    pub spawn_point: Vec3,
    pub move_speed: f32,
    pub camera_arm_length: f32,
    pub player_faction: u64,
}

impl Default for GameMode {
    fn default() -> Self {
        Self {
            spawn_point: Vec3::ZERO,
            move_speed: 5.0,
            camera_arm_length: 4.0,
            player_faction: 0,
        }
    }
}

/// Спавнит дефолтный player pawn со всем обвесом
/// (Health/Damageable приезжают через require на Actor)
pub fn spawn_default_pawn(commands: &mut Commands, mode: &GameMode) -> Entity {
    let pawn = commands
        .spawn((
            Player,
            Actor {
                faction_id: mode.player_faction,
            },
            CameraRig {
                arm_length: mode.camera_arm_length,
                ..Default::default()
            },
            MoveIntent::default(),
            PawnMovement {
                move_speed: mode.move_speed,
                ..Default::default()
            },
            PhysicsBody::default(),
            ThrowGate::default(),
            TrajectoryPrediction::default(),
            PickupSensor::default(),
            Transform::from_translation(mode.spawn_point),
        ))
        .id();

    crate::logger::log_info(&format!(
        "🎮 Default pawn {:?} spawned at {:?}",
        pawn, mode.spawn_point
    ));

    pawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Health;

    #[test]
    fn test_spawned_pawn_has_full_kit() {
        let mut world = World::new();
        let mode = GameMode::default();

        let pawn = {
            let mut commands = world.commands();
            spawn_default_pawn(&mut commands, &mode)
        };
        world.flush();

        assert!(world.get::<Player>(pawn).is_some());
        assert!(world.get::<ThrowGate>(pawn).is_some());
        assert!(world.get::<PickupSensor>(pawn).is_some());
        // Health через require-цепочку Actor
        assert!(world.get::<Health>(pawn).is_some());
        assert_eq!(
            world.get::<Transform>(pawn).map(|t| t.translation),
            Some(Vec3::ZERO)
        );
    }
}
