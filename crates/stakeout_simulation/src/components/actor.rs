//! Базовые компоненты акторов: Actor, Health, capability markers

use bevy::prelude::*;

/// Актор (NPC, игрок) — базовый компонент для живых существ
///
/// Автоматически добавляет Health и Damageable через Required Components.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Health, Damageable)]
pub struct Actor {
    /// Stable ID фракции (для будущих reputation-правил)
    pub faction_id: u64,
}

/// Capability marker: entity получает урон (участвует в radial damage query)
///
/// Закрытый capability-набор вместо virtual dispatch:
/// Damageable / DynamicBody (physics) / ItemPickup (interactable).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Damageable;

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100) // Default 100 HP
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.current = (self.current + amount).min(self.max);
    }
}
