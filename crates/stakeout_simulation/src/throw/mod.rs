//! Throw domain — gate, предсказание дуги, спавн гранаты
//!
//! Control flow за тик:
//! 1. tick_throw_gates — cooldown/charge таймеры
//! 2. handle_throw_input — ThrowStart/ThrowRelease из PlayerInput
//! 3. update_trajectory — predictor каждый тик пока held (aim marker)

use bevy::prelude::*;

pub mod components;
pub mod systems;
pub mod trajectory;

// Re-export основных типов
pub use components::{ThrowGate, TrajectoryPrediction};
pub use systems::{handle_throw_input, tick_throw_gates, update_trajectory};
pub use trajectory::{predict, PredictedImpact, PREDICT_STEPS, PREDICT_WINDOW};

/// Throw Plugin
pub struct ThrowPlugin;

impl Plugin for ThrowPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (tick_throw_gates, handle_throw_input, update_trajectory)
                .chain()
                .before(crate::grenade::tick_grenades),
        );
    }
}
