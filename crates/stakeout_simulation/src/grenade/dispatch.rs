//! Detonation Effect Dispatcher — pure orchestration
//!
//! Вход: snapshot кандидатов на момент detonation tick.
//! Выход: кто затронут и с каким уроном/импульсом. Никаких side effects —
//! применение (Health, events) делает calling system. Идемпотентно per
//! call; caller (grenade latch) гарантирует максимум один вызов на entity.

use bevy::prelude::*;

/// Масштаб урона от impulse strength (2000 strength → 100 dmg в эпицентре)
pub const DAMAGE_PER_STRENGTH: f32 = 0.05;

/// Кандидат в радиусе запроса (snapshot мира)
#[derive(Debug, Clone, Copy)]
pub struct BlastCandidate {
    pub entity: Entity,
    pub position: Vec3,
    /// Получает урон (есть Health)
    pub damageable: bool,
    /// Получает radial impulse (динамическое тело)
    pub dynamic: bool,
}

/// Затронутый актор: урон и импульс считаются ровно один раз
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffectedActor {
    pub entity: Entity,
    pub damage: u32,
    pub impulse: Vec3,
}

/// Radial dispatch: фильтр по радиусу и ignore set, linear distance
/// falloff, дедупликация кандидатов (double-hit protection).
pub fn dispatch(
    center: Vec3,
    radius: f32,
    strength: f32,
    ignore: &[Entity],
    candidates: &[BlastCandidate],
) -> Vec<AffectedActor> {
    let mut affected = Vec::new();
    let mut seen: Vec<Entity> = Vec::new();

    if radius <= 0.0 {
        return affected;
    }

    for candidate in candidates {
        if ignore.contains(&candidate.entity) || seen.contains(&candidate.entity) {
            continue;
        }

        let offset = candidate.position - center;
        let distance = offset.length();
        if distance > radius {
            continue;
        }
        seen.push(candidate.entity);

        // Linear falloff: 1.0 в эпицентре → 0.0 на границе радиуса
        let falloff = 1.0 - distance / radius;

        let damage = if candidate.damageable {
            (strength * DAMAGE_PER_STRENGTH * falloff).round() as u32
        } else {
            0
        };

        let impulse = if candidate.dynamic {
            let direction = if distance > 1e-4 {
                offset / distance
            } else {
                Vec3::Y // эпицентр: толкаем вверх
            };
            direction * strength * falloff
        } else {
            Vec3::ZERO
        };

        if damage == 0 && impulse == Vec3::ZERO {
            continue;
        }

        affected.push(AffectedActor {
            entity: candidate.entity,
            damage,
            impulse,
        });
    }

    affected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(index: u32, position: Vec3) -> BlastCandidate {
        BlastCandidate {
            entity: Entity::from_raw(index),
            position,
            damageable: true,
            dynamic: true,
        }
    }

    #[test]
    fn test_ignore_set_protects_thrower() {
        let thrower = Entity::from_raw(1);
        let victim = candidate(2, Vec3::new(2.0, 0.0, 0.0));
        let self_candidate = candidate(1, Vec3::new(1.0, 0.0, 0.0));

        let affected = dispatch(
            Vec3::ZERO,
            5.0,
            2000.0,
            &[thrower],
            &[self_candidate, victim],
        );

        assert_eq!(affected.len(), 1);
        assert_eq!(affected[0].entity, victim.entity);
    }

    #[test]
    fn test_outside_radius_untouched() {
        let far = candidate(2, Vec3::new(10.0, 0.0, 0.0));
        assert!(dispatch(Vec3::ZERO, 5.0, 2000.0, &[], &[far]).is_empty());
    }

    #[test]
    fn test_falloff_monotonic() {
        let near = candidate(2, Vec3::new(1.0, 0.0, 0.0));
        let far = candidate(3, Vec3::new(4.0, 0.0, 0.0));
        let affected = dispatch(Vec3::ZERO, 5.0, 2000.0, &[], &[near, far]);

        assert_eq!(affected.len(), 2);
        assert!(affected[0].damage > affected[1].damage);
        assert!(affected[0].impulse.length() > affected[1].impulse.length());
    }

    #[test]
    fn test_duplicate_candidate_hit_once() {
        let victim = candidate(2, Vec3::new(2.0, 0.0, 0.0));
        let affected = dispatch(Vec3::ZERO, 5.0, 2000.0, &[], &[victim, victim]);
        assert_eq!(affected.len(), 1);
    }

    #[test]
    fn test_epicenter_pushes_up() {
        let at_center = candidate(2, Vec3::ZERO);
        let affected = dispatch(Vec3::ZERO, 5.0, 2000.0, &[], &[at_center]);
        assert_eq!(affected.len(), 1);
        assert!(affected[0].impulse.y > 0.0);
        // Полный урон в эпицентре: 2000 * 0.05
        assert_eq!(affected[0].damage, 100);
    }

    #[test]
    fn test_impulse_points_away_from_center() {
        let victim = candidate(2, Vec3::new(3.0, 0.0, 0.0));
        let affected = dispatch(Vec3::ZERO, 5.0, 2000.0, &[], &[victim]);
        assert!(affected[0].impulse.x > 0.0);
        assert_eq!(affected[0].impulse.y, 0.0);
    }

    #[test]
    fn test_non_damageable_dynamic_gets_impulse_only() {
        let crate_body = BlastCandidate {
            entity: Entity::from_raw(5),
            position: Vec3::new(2.0, 0.0, 0.0),
            damageable: false,
            dynamic: true,
        };
        let affected = dispatch(Vec3::ZERO, 5.0, 2000.0, &[], &[crate_body]);
        assert_eq!(affected.len(), 1);
        assert_eq!(affected[0].damage, 0);
        assert!(affected[0].impulse.length() > 0.0);
    }
}
