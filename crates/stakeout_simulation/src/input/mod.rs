//! Input events — дискретные named actions от presentation layer
//!
//! Вместо delegate-based input binding: external layer пишет PlayerInput
//! events, системы читают их один раз за simulation tick.

use bevy::prelude::*;

/// Именованные input actions с analog payload где нужно
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum PlayerInput {
    /// Movement axes: x = strafe, y = forward (нормализуем сами)
    Move { axes: Vec2 },
    /// Look delta (пиксели/единицы устройства)
    Look { delta: Vec2 },
    Jump,
    /// Debug-ввод: мгновенный ragdoll
    Die,
    /// Начало удержания броска (взводит throw gate + aiming)
    ThrowStart,
    /// Отпускание броска (спавн гранаты, если gate разрешает)
    ThrowRelease,
    /// Подобрать item в радиусе
    Pick,
}
