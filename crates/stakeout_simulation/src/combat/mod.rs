//! Combat module — урон и смерть
//!
//! ECS ответственность:
//! - Game state: Health, Dead/Ragdoll markers
//! - Events: DamageDealt (для presentation layer: hit VFX, ragdoll физика)
//!
//! Radial damage от гранат приходит из grenade::detonate_grenades.

use bevy::prelude::*;

pub mod damage;

// Re-export основных типов
pub use damage::{DamageDealt, DamageSource, Dead, Ragdoll};

/// Combat Plugin
///
/// Порядок выполнения (после grenade-систем, см. SimulationPlugin):
/// 1. mark_dead — Health == 0 → Dead marker
/// 2. ragdoll_on_radial_damage — radial hit → Ragdoll (как TakeDamage у pawn)
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DamageDealt>();

        app.add_systems(
            FixedUpdate,
            (damage::mark_dead, damage::ragdoll_on_radial_damage)
                .chain()
                .after(crate::grenade::detonate_grenades),
        );
    }
}
