//! Grenade lifecycle — state machine + detonation effect dispatch
//!
//! Lifecycle одной гранаты (monotonic, one-directional):
//! Armed → Flying → Detonating → Destroyed
//!
//! Порядок выполнения за тик:
//! 1. tick_grenades — projectile motion, fuse, contact detection,
//!    state transitions (Armed/Flying → Detonating)
//! 2. detonate_grenades — radial damage/impulse/audio/VFX exactly once,
//!    Detonating → Destroyed + despawn в тот же тик

use bevy::prelude::*;

pub mod components;
pub mod dispatch;
pub mod events;
pub mod systems;

// Re-export основных типов
pub use components::{DetonationTrigger, Grenade, GrenadeState};
pub use dispatch::{dispatch, AffectedActor, BlastCandidate};
pub use events::{
    AudioCue, DetonationStarted, GrenadeDetonated, GrenadeThrown, RadialImpulse, VfxKind,
    VfxSpawn,
};
pub use systems::{detonate_grenades, tick_grenades};

/// Grenade Plugin
pub struct GrenadePlugin;

impl Plugin for GrenadePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<GrenadeThrown>()
            .add_event::<DetonationStarted>()
            .add_event::<GrenadeDetonated>()
            .add_event::<RadialImpulse>()
            .add_event::<AudioCue>()
            .add_event::<VfxSpawn>();

        app.add_systems(FixedUpdate, (tick_grenades, detonate_grenades).chain());
    }
}
