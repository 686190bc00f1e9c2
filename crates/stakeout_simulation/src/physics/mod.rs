//! Минимальная физика симуляции: velocity интеграция + collision query context
//!
//! Архитектура:
//! - Custom velocity integration в FixedUpdate (никакого физдвижка)
//! - CollisionWorld — explicit context object для всех collision queries
//!   (trajectory prediction, grenade rest-on-surface); передаётся как
//!   Resource вместо глобальной physics scene
//!
//! Детерминизм: fixed timestep (60Hz), чистая f32-математика

use bevy::prelude::*;

/// Гравитация (m/s²)
pub const GRAVITY: f32 = -9.81;

/// Тело с custom velocity (интегрируем сами)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PhysicsBody {
    pub velocity: Vec3,
    pub mass: f32,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            mass: 70.0,
        }
    }
}

/// Capability marker: динамическое тело, получает radial impulse при взрыве
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct DynamicBody;

/// Результат raycast по статической геометрии
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub normal: Vec3,
    /// Параметр вдоль сегмента [0, 1]
    pub fraction: f32,
}

/// Статический box-коллайдер (axis-aligned)
#[derive(Debug, Clone, Copy)]
pub struct StaticBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl StaticBox {
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }
}

/// Collision query context: ground plane (y=0) + статические боксы
///
/// Заменяет ad hoc доступ к глобальной physics scene — все queries идут
/// через этот объект синхронно (pure query, без side effects).
#[derive(Resource, Debug, Clone)]
pub struct CollisionWorld {
    /// Есть ли бесконечный пол на y=0
    pub ground_plane: bool,
    pub boxes: Vec<StaticBox>,
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self {
            ground_plane: true,
            boxes: Vec::new(),
        }
    }
}

impl CollisionWorld {
    /// Segment raycast from→to, ближайший hit по статической геометрии
    ///
    /// Miss ⇒ None (не ошибка: caller просто не показывает marker).
    pub fn raycast(&self, from: Vec3, to: Vec3) -> Option<RayHit> {
        let mut best: Option<RayHit> = None;

        if self.ground_plane {
            if let Some(hit) = raycast_ground_plane(from, to) {
                best = Some(hit);
            }
        }

        for aabb in &self.boxes {
            if let Some(hit) = raycast_aabb(from, to, aabb) {
                if best.map_or(true, |b| hit.fraction < b.fraction) {
                    best = Some(hit);
                }
            }
        }

        best
    }
}

/// Пересечение сегмента с плоскостью y=0 (hit только сверху вниз)
fn raycast_ground_plane(from: Vec3, to: Vec3) -> Option<RayHit> {
    if from.y < 0.0 || to.y >= 0.0 {
        return None;
    }
    let span = from.y - to.y;
    if span <= f32::EPSILON {
        return None;
    }
    let fraction = from.y / span;
    Some(RayHit {
        point: from.lerp(to, fraction),
        normal: Vec3::Y,
        fraction,
    })
}

/// Slab-тест сегмента против AABB, возвращает entry point + face normal
fn raycast_aabb(from: Vec3, to: Vec3, aabb: &StaticBox) -> Option<RayHit> {
    let dir = to - from;
    let mut t_min = 0.0f32;
    let mut t_max = 1.0f32;
    let mut entry_axis = 0usize;
    let mut entry_sign = 0.0f32;

    for axis in 0..3 {
        let origin = from[axis];
        let d = dir[axis];
        let (lo, hi) = (aabb.min[axis], aabb.max[axis]);

        if d.abs() < f32::EPSILON {
            // Параллельно slab: если вне — промах
            if origin < lo || origin > hi {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t0 = (lo - origin) * inv;
        let mut t1 = (hi - origin) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        if t0 > t_min {
            t_min = t0;
            entry_axis = axis;
            entry_sign = -d.signum();
        }
        if t1 < t_max {
            t_max = t1;
        }
        if t_min > t_max {
            return None;
        }
    }

    // Старт внутри бокса — считаем промахом (сегмент уже "внутри" геометрии)
    if t_min <= 0.0 {
        return None;
    }

    let mut normal = Vec3::ZERO;
    normal[entry_axis] = entry_sign;

    Some(RayHit {
        point: from + dir * t_min,
        normal,
        fraction: t_min,
    })
}
