//! Trajectory Predictor — gravity-parabolic arc projection
//!
//! Pure query: сэмплируем параболу фиксированным числом шагов и
//! прогоняем сегменты через collision context. Side effects нет;
//! caller рисует marker по возвращённой точке/нормали.

use bevy::prelude::*;

use crate::physics::{CollisionWorld, GRAVITY};

/// Количество сэмплов дуги
pub const PREDICT_STEPS: usize = 15;
/// Окно симуляции дуги (сек)
pub const PREDICT_WINDOW: f32 = 2.0;

/// Предсказанная точка удара
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictedImpact {
    pub point: Vec3,
    pub normal: Vec3,
}

/// Проекция дуги: первый hit по статической геометрии в окне предсказания
///
/// Thrower в static context не входит, поэтому отдельного ignore не нужно.
/// Non-hit ⇒ None (marker suppressed) — error path отсутствует.
pub fn predict(
    origin: Vec3,
    launch_velocity: Vec3,
    world: &CollisionWorld,
) -> Option<PredictedImpact> {
    let step_dt = PREDICT_WINDOW / PREDICT_STEPS as f32;
    let gravity = Vec3::new(0.0, GRAVITY, 0.0);

    let mut prev = origin;
    for step in 1..=PREDICT_STEPS {
        let t = step_dt * step as f32;
        // Аналитическая парабола (без накопления интеграционной ошибки)
        let next = origin + launch_velocity * t + gravity * (0.5 * t * t);

        if let Some(hit) = world.raycast(prev, next) {
            return Some(PredictedImpact {
                point: hit.point,
                normal: hit.normal,
            });
        }
        prev = next;
    }

    None
}
