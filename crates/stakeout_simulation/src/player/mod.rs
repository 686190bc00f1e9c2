//! Player pawn системы: input routing, kinematic движение, ragdoll gate
//!
//! Архитектура:
//! - PlayerInput events → MoveIntent/CameraRig (strategic)
//! - Kinematic интеграция velocity → Transform (наша, без физдвижка)
//! - Ragdoll: marker-компонент; ragdolled pawn не двигается и не бросает,
//!   сама ragdoll-физика — в presentation layer

use bevy::prelude::*;

use crate::combat::Ragdoll;
use crate::components::{CameraRig, MoveIntent, Player};
use crate::input::PlayerInput;
use crate::physics::{PhysicsBody, GRAVITY};

/// Fire-and-forget animation montage cues для presentation layer
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum AnimationCue {
    Throw { actor: Entity },
    PickUp { actor: Entity },
}

/// Kinematic контроллер pawn'а
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PawnMovement {
    /// Скорость движения (m/s)
    pub move_speed: f32,
    /// Вертикальная скорость прыжка (m/s)
    pub jump_speed: f32,
    /// На земле ли pawn
    pub grounded: bool,
}

impl Default for PawnMovement {
    fn default() -> Self {
        Self {
            move_speed: 5.0, // было 500 cm/s MaxWalkSpeed
            jump_speed: 7.0, // было 700 cm/s JumpZVelocity
            grounded: true,
        }
    }
}

/// Система: routing PlayerInput events в pawn state
///
/// Move/Jump блокируются ragdoll'ом; Look работает всегда
/// (камера живёт и после смерти). Die вставляет Ragdoll marker.
pub fn apply_player_input(
    mut commands: Commands,
    mut inputs: EventReader<PlayerInput>,
    mut players: Query<
        (
            Entity,
            &mut CameraRig,
            &mut MoveIntent,
            &mut PhysicsBody,
            &PawnMovement,
            Option<&Ragdoll>,
        ),
        With<Player>,
    >,
) {
    for input in inputs.read() {
        for (entity, mut rig, mut intent, mut body, movement, ragdoll) in players.iter_mut() {
            match input {
                PlayerInput::Look { delta } => rig.apply_look(*delta),
                PlayerInput::Move { axes } => {
                    if ragdoll.is_none() {
                        intent.axes = *axes;
                    }
                }
                PlayerInput::Jump => {
                    if ragdoll.is_none() && movement.grounded {
                        body.velocity.y = movement.jump_speed;
                    }
                }
                PlayerInput::Die => {
                    if ragdoll.is_none() {
                        crate::logger::log_info(&format!("Pawn {:?} ragdolled (Die input)", entity));
                        commands.entity(entity).insert(Ragdoll);
                    }
                }
                // Throw*/Pick обрабатывают свои подсистемы
                _ => {}
            }
        }
    }
}

/// Система: MoveIntent → горизонтальная velocity (camera-relative)
pub fn apply_move_intent(
    mut players: Query<
        (
            &CameraRig,
            &mut MoveIntent,
            &mut PhysicsBody,
            &PawnMovement,
            Option<&Ragdoll>,
        ),
        With<Player>,
    >,
) {
    for (rig, mut intent, mut body, movement, ragdoll) in players.iter_mut() {
        if ragdoll.is_some() {
            body.velocity.x = 0.0;
            body.velocity.z = 0.0;
            intent.axes = Vec2::ZERO;
            continue;
        }

        if intent.axes.length_squared() > 0.01 {
            let axes = intent.axes.clamp_length_max(1.0);
            let direction = rig.ground_forward() * axes.y + rig.ground_right() * axes.x;
            body.velocity.x = direction.x * movement.move_speed;
            body.velocity.z = direction.z * movement.move_speed;
        } else {
            // Мгновенное торможение (braking)
            body.velocity.x = 0.0;
            body.velocity.z = 0.0;
        }

        // Intent живёт один тик
        intent.axes = Vec2::ZERO;
    }
}

/// Система: gravity + интеграция velocity → Transform + ground clamp
pub fn integrate_pawns(
    mut players: Query<(&mut Transform, &mut PhysicsBody, &mut PawnMovement), With<Player>>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (mut transform, mut body, mut movement) in players.iter_mut() {
        if !movement.grounded {
            body.velocity.y += GRAVITY * delta;
        }

        transform.translation += body.velocity * delta;

        // Пол на y=0 (capsule bottom)
        if transform.translation.y <= 0.0 {
            transform.translation.y = 0.0;
            body.velocity.y = body.velocity.y.max(0.0);
            movement.grounded = true;
        } else {
            movement.grounded = false;
        }
    }
}

/// Plugin для player pawn
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AnimationCue>();

        app.add_systems(
            FixedUpdate,
            (apply_player_input, apply_move_intent, integrate_pawns).chain(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_intent_logic() {
        // Тестируем движение напрямую (без App schedule)
        let rig = CameraRig::default();
        let movement = PawnMovement::default();
        let axes = Vec2::new(0.0, 1.0); // forward

        let direction = rig.ground_forward() * axes.y + rig.ground_right() * axes.x;
        let velocity = direction * movement.move_speed;

        // Default rig смотрит в -Z: forward движение = -Z * 5 m/s
        assert!((velocity.z + 5.0).abs() < 1e-4, "velocity.z = {}", velocity.z);
        assert!(velocity.x.abs() < 1e-4);
    }

    #[test]
    fn test_gravity_only_in_air() {
        let mut body = PhysicsBody::default();
        let delta = 1.0 / 60.0;

        let grounded = false;
        if !grounded {
            body.velocity.y += GRAVITY * delta;
        }
        assert!(body.velocity.y < 0.0);

        let mut body = PhysicsBody::default();
        let grounded = true;
        if !grounded {
            body.velocity.y += GRAVITY * delta;
        }
        assert_eq!(body.velocity.y, 0.0);
    }
}
