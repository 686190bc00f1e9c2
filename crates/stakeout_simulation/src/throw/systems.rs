//! Throw gate системы: cooldowns, input handling, aim prediction

use bevy::prelude::*;

use crate::combat::Ragdoll;
use crate::components::{CameraRig, Player};
use crate::config::SimConfig;
use crate::grenade::{Grenade, GrenadeThrown};
use crate::input::PlayerInput;
use crate::physics::{CollisionWorld, PhysicsBody};
use crate::player::AnimationCue;
use crate::throw::components::{ThrowGate, TrajectoryPrediction};
use crate::throw::trajectory;

/// Система: тик cooldown + charge таймеров всех throw gates
pub fn tick_throw_gates(
    mut gates: Query<&mut ThrowGate>,
    config: Res<SimConfig>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();
    for mut gate in gates.iter_mut() {
        gate.tick_cooldown(delta);
        gate.tick_charge(delta, &config.throw.impulse);
    }
}

/// Система: ThrowStart/ThrowRelease → gate transitions + спавн гранаты
///
/// ThrowStart в ragdoll/dead состоянии или на cooldown'е — silent no-op.
/// Release при закрытом gate — no-op (гранаты нет, state не меняется).
pub fn handle_throw_input(
    mut commands: Commands,
    mut inputs: EventReader<PlayerInput>,
    mut throwers: Query<
        (
            Entity,
            &Transform,
            &CameraRig,
            &mut ThrowGate,
            &mut TrajectoryPrediction,
            Option<&Ragdoll>,
        ),
        With<Player>,
    >,
    config: Res<SimConfig>,
    mut thrown_events: EventWriter<GrenadeThrown>,
    mut animation_cues: EventWriter<AnimationCue>,
) {
    for input in inputs.read() {
        match input {
            PlayerInput::ThrowStart => {
                for (entity, _, _, mut gate, _, ragdoll) in throwers.iter_mut() {
                    // Permission-denied: мёртвый pawn не взводит gate
                    if ragdoll.is_some() {
                        continue;
                    }
                    if gate.start_hold(config.throw.impulse.initial_strength()) {
                        crate::logger::log(&format!("Pawn {:?} aiming grenade", entity));
                    }
                }
            }
            PlayerInput::ThrowRelease => {
                for (entity, transform, rig, mut gate, mut prediction, ragdoll) in
                    throwers.iter_mut()
                {
                    if ragdoll.is_some() {
                        continue;
                    }
                    let Some(strength) = gate.release(config.throw.cooldown) else {
                        continue;
                    };

                    // Aiming кончился — прогноз мгновенно инвалиден
                    prediction.valid = false;

                    // Spawn у arrow/muzzle anchor'а с текущим aim rotation
                    let anchor = transform.translation + config.throw.spawn_offset();
                    let velocity = rig.aim_direction() * config.throw.launch_speed;

                    let grenade = commands
                        .spawn((
                            Transform::from_translation(anchor),
                            PhysicsBody {
                                velocity,
                                mass: 1.0,
                            },
                            Grenade::new(&config.grenade, strength, entity),
                        ))
                        .id();

                    thrown_events.write(GrenadeThrown {
                        grenade,
                        thrower: entity,
                        velocity,
                    });
                    animation_cues.write(AnimationCue::Throw { actor: entity });

                    crate::logger::log_info(&format!(
                        "Pawn {:?} threw grenade {:?} (strength {})",
                        entity, grenade, strength
                    ));
                }
            }
            _ => {}
        }
    }
}

/// Система: predictor каждый тик пока aiming активен
///
/// Miss (нет hit в окне) ⇒ valid=false, marker не показываем.
pub fn update_trajectory(
    mut throwers: Query<
        (&Transform, &CameraRig, &ThrowGate, &mut TrajectoryPrediction),
        With<Player>,
    >,
    collision: Res<CollisionWorld>,
    config: Res<SimConfig>,
) {
    for (transform, rig, gate, mut prediction) in throwers.iter_mut() {
        if !gate.is_holding {
            prediction.valid = false;
            continue;
        }

        let start = transform.translation + config.throw.spawn_offset();
        let velocity = rig.aim_direction() * config.throw.launch_speed;

        prediction.start_point = start;
        prediction.launch_velocity = velocity;

        match trajectory::predict(start, velocity, &collision) {
            Some(impact) => {
                prediction.impact_point = impact.point;
                prediction.impact_normal = impact.normal;
                prediction.valid = true;
            }
            None => prediction.valid = false,
        }
    }
}
