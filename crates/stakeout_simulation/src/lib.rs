//! STAKEOUT Simulation Core
//!
//! Headless ECS-симуляция gameplay-слоя на Bevy 0.16:
//! - Grenade lifecycle state machine (throw gate → arc prediction →
//!   fuse/contact detonation → radial effect dispatch)
//! - Player pawn (movement intent, camera rig, ragdoll)
//! - Item pickup overlap contract
//! - Session wrapper (create/find/join как command/result events)
//!
//! HYBRID ARCHITECTURE:
//! - ECS = strategic layer (game state, lifecycle rules, damage math)
//! - Engine/presentation layer = tactical (рендер, звук, партиклы, netcode) —
//!   получает от нас AudioCue/VfxSpawn/AnimationCue/RadialImpulse events

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod combat;
pub mod components;
pub mod config;
pub mod game_mode;
pub mod grenade;
pub mod input;
pub mod logger;
pub mod physics;
pub mod pickup;
pub mod player;
pub mod session;
pub mod throw;

// Re-export базовых типов для удобства
pub use combat::{CombatPlugin, DamageDealt, DamageSource, Dead, Ragdoll};
pub use components::*;
pub use config::{DetonationPolicy, GrenadeConfig, ImpulseMode, SimConfig, ThrowConfig};
pub use game_mode::{spawn_default_pawn, GameMode};
pub use grenade::{
    AudioCue, DetonationTrigger, Grenade, GrenadeDetonated, GrenadePlugin, GrenadeState,
    RadialImpulse, VfxSpawn,
};
pub use input::PlayerInput;
pub use logger::init_logger;
pub use physics::{CollisionWorld, DynamicBody, PhysicsBody, GRAVITY};
pub use pickup::{ItemPickedUp, ItemPickup, PickupPlugin, PickupSensor};
pub use player::{AnimationCue, PlayerPlugin};
pub use session::{SessionCommand, SessionPlugin, SessionResult};
pub use throw::{ThrowGate, ThrowPlugin, TrajectoryPrediction};

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick (легче считать интервалы)
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Детерминистичный RNG (seed по умолчанию)
            .insert_resource(DeterministicRng::new(42))
            // Конфиг и collision context — дефолтные, если снаружи не вставили
            .init_resource::<SimConfig>()
            .init_resource::<CollisionWorld>()
            // Input events (external layer пишет, системы читают раз за тик)
            .add_event::<PlayerInput>()
            // Подсистемы (порядок plugins не важен, порядок систем — внутри)
            .add_plugins((
                PlayerPlugin,
                ThrowPlugin,
                GrenadePlugin,
                CombatPlugin,
                PickupPlugin,
                SessionPlugin,
            ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Snapshot мира для сравнения детерминизма
///
/// Собирает все компоненты типа T в детерминированный byte-формат
/// (сортировка по Entity ID, сериализация через Debug).
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
