//! Grenade системы: полёт + fuse/contact, детонация с exactly-once dispatch

use bevy::prelude::*;

use crate::combat::{DamageDealt, DamageSource};
use crate::components::{Damageable, Health};
use crate::grenade::components::{Grenade, GrenadeState};
use crate::grenade::dispatch::{dispatch, BlastCandidate};
use crate::grenade::events::{
    AudioCue, DetonationStarted, GrenadeDetonated, RadialImpulse, VfxKind, VfxSpawn,
};
use crate::physics::{CollisionWorld, DynamicBody, PhysicsBody, GRAVITY};

/// Небольшой зазор при укладке гранаты на поверхность
const REST_OFFSET: f32 = 0.05;

/// Система: projectile motion + fuse + contact detection
///
/// Каждый тик для каждой живой гранаты:
/// - gravity-интеграция velocity → Transform, rest-on-surface через
///   collision context (граната ложится, fuse продолжает тикать)
/// - поиск первого qualifying контакта (damageable в contact_radius,
///   не в ignore set)
/// - state machine advance; вход в Detonating → DetonationStarted event
pub fn tick_grenades(
    mut grenades: Query<(Entity, &mut Grenade, &mut PhysicsBody, &mut Transform)>,
    damageables: Query<(Entity, &Transform), (With<Damageable>, Without<Grenade>)>,
    collision: Res<CollisionWorld>,
    time: Res<Time>,
    mut detonations: EventWriter<DetonationStarted>,
) {
    let delta = time.delta_secs();

    for (entity, mut grenade, mut body, mut transform) in grenades.iter_mut() {
        if matches!(
            grenade.state,
            GrenadeState::Detonating | GrenadeState::Destroyed
        ) {
            continue;
        }

        // Projectile motion
        body.velocity.y += GRAVITY * delta;
        let from = transform.translation;
        let to = from + body.velocity * delta;
        if let Some(hit) = collision.raycast(from, to) {
            transform.translation = hit.point + hit.normal * REST_OFFSET;
            body.velocity = Vec3::ZERO;
        } else {
            transform.translation = to;
        }

        // Первый qualifying контакт этого тика
        let position = transform.translation;
        let contact = damageables.iter().find_map(|(target, target_transform)| {
            let in_range =
                target_transform.translation.distance(position) <= grenade.contact_radius;
            (in_range && !grenade.ignores(target)).then_some(target)
        });

        if let Some(trigger) = grenade.advance(delta, contact) {
            crate::logger::log(&format!(
                "Grenade {:?} detonating at {:?} ({:?})",
                entity, position, trigger
            ));
            detonations.write(DetonationStarted {
                grenade: entity,
                position,
                trigger,
            });
        }
    }
}

/// Система: detonation effect dispatch, ровно один раз на гранату
///
/// На входе в Detonating атомарно: snapshot кандидатов в радиусе →
/// урон с linear falloff → radial impulse по динамическим телам →
/// one-shot audio + VFX в эпицентре. Затем Destroyed + despawn в тот же
/// тик — детонация никогда не оставляет entity живым, даже если
/// consumers effects'ов отсутствуют.
pub fn detonate_grenades(
    mut commands: Commands,
    mut detonations: EventReader<DetonationStarted>,
    mut grenades: Query<&mut Grenade>,
    mut targets: Query<
        (Entity, &Transform, Option<&mut Health>, Option<&DynamicBody>),
        Or<(With<Damageable>, With<DynamicBody>)>,
    >,
    mut detonated_events: EventWriter<GrenadeDetonated>,
    mut damage_events: EventWriter<DamageDealt>,
    mut impulse_events: EventWriter<RadialImpulse>,
    mut audio_cues: EventWriter<AudioCue>,
    mut vfx_spawns: EventWriter<VfxSpawn>,
) {
    for detonation in detonations.read() {
        let Ok(mut grenade) = grenades.get_mut(detonation.grenade) else {
            continue; // форсированный despawn (world teardown) мог опередить
        };
        if grenade.state != GrenadeState::Detonating {
            continue;
        }

        // Snapshot мира на момент detonation tick
        let candidates: Vec<BlastCandidate> = targets
            .iter()
            .map(|(target, transform, health, dynamic)| BlastCandidate {
                entity: target,
                position: transform.translation,
                damageable: health.is_some(),
                dynamic: dynamic.is_some(),
            })
            .collect();

        let affected = dispatch(
            detonation.position,
            grenade.blast_radius,
            grenade.impulse_strength,
            &grenade.ignore,
            &candidates,
        );

        for actor in &affected {
            if actor.damage > 0 {
                if let Ok((_, _, Some(mut health), _)) = targets.get_mut(actor.entity) {
                    health.take_damage(actor.damage);
                    damage_events.write(DamageDealt {
                        attacker: Some(grenade.instigator),
                        target: actor.entity,
                        damage: actor.damage,
                        source: DamageSource::Explosion,
                    });
                }
            }
            if actor.impulse != Vec3::ZERO {
                impulse_events.write(RadialImpulse {
                    target: actor.entity,
                    impulse: actor.impulse,
                });
            }
        }

        // One-shot звук + партиклы в эпицентре
        audio_cues.write(AudioCue::Explosion {
            position: detonation.position,
        });
        vfx_spawns.write(VfxSpawn {
            effect: VfxKind::Explosion,
            position: detonation.position,
        });

        grenade.mark_destroyed();
        commands.entity(detonation.grenade).despawn();

        detonated_events.write(GrenadeDetonated {
            grenade: detonation.grenade,
            position: detonation.position,
            trigger: detonation.trigger,
            affected: affected.len() as u32,
        });

        crate::logger::log_info(&format!(
            "💥 Grenade {:?} detonated: {} affected",
            detonation.grenade,
            affected.len()
        ));
    }
}
