//! Grenade events — исходящие контракты для presentation layer
//!
//! ECS решает (урон, импульсы, lifecycle), presentation layer исполняет
//! (звук, партиклы, физика толчка). Все сервисы смоделированы events'ами:
//! недоступный consumer просто не читает — sub-effect тихо пропадает,
//! lifecycle гранаты от этого не зависает.

use bevy::prelude::*;

use super::components::DetonationTrigger;

/// Event: граната заспавнена броском
#[derive(Event, Debug, Clone, Copy)]
pub struct GrenadeThrown {
    pub grenade: Entity,
    pub thrower: Entity,
    pub velocity: Vec3,
}

/// Internal event: state machine вошла в Detonating (tick_grenades →
/// detonate_grenades, тот же тик)
#[derive(Event, Debug, Clone, Copy)]
pub struct DetonationStarted {
    pub grenade: Entity,
    pub position: Vec3,
    pub trigger: DetonationTrigger,
}

/// Event: детонация завершена (effects раздали, entity уничтожен)
#[derive(Event, Debug, Clone, Copy)]
pub struct GrenadeDetonated {
    pub grenade: Entity,
    pub position: Vec3,
    pub trigger: DetonationTrigger,
    /// Сколько акторов затронуто (damage и/или impulse)
    pub affected: u32,
}

/// Event: radial impulse для динамического тела (physics service contract)
#[derive(Event, Debug, Clone, Copy)]
pub struct RadialImpulse {
    pub target: Entity,
    pub impulse: Vec3,
}

/// Event: one-shot audio playback
#[derive(Event, Debug, Clone, Copy)]
pub enum AudioCue {
    Explosion { position: Vec3 },
}

/// Виды партикл-эффектов
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VfxKind {
    Explosion,
}

/// Event: спавн партикл-эффекта в точке
#[derive(Event, Debug, Clone, Copy)]
pub struct VfxSpawn {
    pub effect: VfxKind,
    pub position: Vec3,
}
