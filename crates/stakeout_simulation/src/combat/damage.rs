//! Damage events и death/ragdoll системы

use bevy::prelude::*;

use crate::components::Health;

/// Источник урона
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageSource {
    /// Radial damage от взрыва гранаты
    Explosion,
    /// Скриптовый урон (debug/level logic)
    Script,
}

/// Event: урон нанесён (для presentation layer + death handling)
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageDealt {
    /// Кто вызвал (instigator гранаты); None для скриптового урона
    pub attacker: Option<Entity>,
    pub target: Entity,
    pub damage: u32,
    pub source: DamageSource,
}

/// Компонент-маркер: entity мертв (Health == 0)
///
/// Деспавн не автоматический — тела остаются на месте.
#[derive(Component, Debug)]
pub struct Dead;

/// Компонент-маркер: pawn в ragdoll-состоянии
///
/// Входим по Die input или radial damage. Ragdolled pawn не двигается,
/// не бросает и не подбирает; сама физика тряпичной куклы — снаружи.
/// Состояние односторонее: ragdoll не снимается.
#[derive(Component, Debug)]
pub struct Ragdoll;

/// Система: Health == 0 → Dead marker
pub fn mark_dead(
    mut commands: Commands,
    actors: Query<(Entity, &Health), (Changed<Health>, Without<Dead>)>,
) {
    for (entity, health) in actors.iter() {
        if !health.is_alive() {
            crate::logger::log_info(&format!("Entity {:?} died", entity));
            commands.entity(entity).insert(Dead);
        }
    }
}

/// Система: radial damage → ragdoll (аналог TakeDamage у character)
///
/// Любой Explosion-hit по живому актору валит его в ragdoll,
/// независимо от того, убил ли урон.
pub fn ragdoll_on_radial_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageDealt>,
    targets: Query<Entity, (With<Health>, Without<Ragdoll>)>,
) {
    for event in damage_events.read() {
        if event.source != DamageSource::Explosion {
            continue;
        }
        if targets.get(event.target).is_ok() {
            crate::logger::log(&format!(
                "💥 Entity {:?} ragdolled by explosion ({} dmg)",
                event.target, event.damage
            ));
            commands.entity(event.target).insert(Ragdoll);
        }
    }
}
