//! Конфигурация симуляции (explicit config struct вместо editor-tunable полей)
//!
//! Все tunable-значения грузятся из RON или берутся из hardcoded Default.
//! Единицы: метры / секунды (исходные cm-значения движка сконвертированы).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Ошибки загрузки конфига
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config io: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Детонационная политика гранаты (выбирается конфигом)
///
/// Варианты расходились по версиям (pure timer / contact-or-timer /
/// contact-only), поэтому все три — именованные.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Reflect)]
pub enum DetonationPolicy {
    /// Только fuse timer, контакты игнорируются
    TimerOnly,
    /// Что сработает раньше: fuse или первый qualifying контакт
    ContactOrTimer,
    /// Только контакт (sphere trigger), fuse не взводится
    ContactOnly,
}

/// Режим силы броска (mutually exclusive варианты)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ImpulseMode {
    /// Фиксированная сила
    Fixed { strength: f32 },
    /// "Burst": пока держим кнопку, каждые step_interval сила растёт
    /// на gain и клампится в [min, max]
    Charged {
        min: f32,
        max: f32,
        gain: f32,
        step_interval: f32,
    },
}

impl ImpulseMode {
    /// Стартовое значение силы при начале удержания
    pub fn initial_strength(&self) -> f32 {
        match self {
            ImpulseMode::Fixed { strength } => *strength,
            ImpulseMode::Charged { min, .. } => *min,
        }
    }
}

/// Параметры throw gate + предсказания дуги
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThrowConfig {
    /// Cooldown после release (сек)
    pub cooldown: f32,
    /// Начальная скорость гранаты (m/s)
    pub launch_speed: f32,
    /// Anchor точки спавна относительно pawn (локальный offset, метры)
    pub spawn_offset: [f32; 3],
    /// Режим силы броска
    pub impulse: ImpulseMode,
}

impl ThrowConfig {
    pub fn spawn_offset(&self) -> Vec3 {
        Vec3::from_array(self.spawn_offset)
    }
}

/// Параметры гранаты
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrenadeConfig {
    /// Fuse (сек) до детонации
    pub fuse_duration: f32,
    /// Радиус поражения (метры)
    pub blast_radius: f32,
    /// Радиус contact-триггера (метры)
    pub contact_radius: f32,
    /// Детонационная политика
    pub policy: DetonationPolicy,
}

/// Главный конфиг симуляции (resource)
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    pub throw: ThrowConfig,
    pub grenade: GrenadeConfig,
}

impl Default for SimConfig {
    /// Hardcoded значения (оригинальные cm → метры)
    fn default() -> Self {
        Self {
            throw: ThrowConfig {
                cooldown: 2.0,
                launch_speed: 20.0, // было 2000 cm/s
                spawn_offset: [0.0, 1.5, 0.0],
                impulse: ImpulseMode::Fixed { strength: 2000.0 },
            },
            grenade: GrenadeConfig {
                fuse_duration: 3.0,
                blast_radius: 5.0, // было 500 cm
                contact_radius: 0.5,
                policy: DetonationPolicy::ContactOrTimer,
            },
        }
    }
}

impl SimConfig {
    /// Парсит конфиг из RON-строки
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    /// Грузит конфиг из файла; при ошибке caller решает (обычно Default)
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_ron_str(&source)
    }

    /// Default + charged burst режим (второй спек-вариант)
    pub fn with_charged_impulse() -> Self {
        let mut config = Self::default();
        config.throw.impulse = ImpulseMode::Charged {
            min: 100.0,
            max: 2000.0,
            gain: 200.0,
            step_interval: 0.2,
        };
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = SimConfig::default();
        assert_eq!(config.grenade.fuse_duration, 3.0);
        assert_eq!(config.grenade.blast_radius, 5.0);
        assert_eq!(config.throw.cooldown, 2.0);
        assert_eq!(config.grenade.policy, DetonationPolicy::ContactOrTimer);
        assert_eq!(config.throw.impulse.initial_strength(), 2000.0);
    }

    #[test]
    fn test_charged_initial_strength_is_min() {
        let config = SimConfig::with_charged_impulse();
        assert_eq!(config.throw.impulse.initial_strength(), 100.0);
    }

    #[test]
    fn test_parse_ron() {
        let source = r#"
            SimConfig(
                throw: ThrowConfig(
                    cooldown: 1.5,
                    launch_speed: 18.0,
                    spawn_offset: (0.0, 1.2, 0.0),
                    impulse: Fixed(strength: 1500.0),
                ),
                grenade: GrenadeConfig(
                    fuse_duration: 2.5,
                    blast_radius: 4.0,
                    contact_radius: 0.4,
                    policy: TimerOnly,
                ),
            )
        "#;
        let config = SimConfig::from_ron_str(source).expect("valid ron");
        assert_eq!(config.throw.cooldown, 1.5);
        assert_eq!(config.grenade.policy, DetonationPolicy::TimerOnly);
        assert_eq!(config.throw.impulse.initial_strength(), 1500.0);
    }

    #[test]
    fn test_parse_ron_rejects_garbage() {
        assert!(SimConfig::from_ron_str("not a config").is_err());
    }

    #[test]
    fn test_bundled_asset_parses() {
        let config = SimConfig::from_ron_str(include_str!("../assets/simulation.ron"))
            .expect("bundled config");
        assert_eq!(config.throw.impulse.initial_strength(), 100.0);
    }
}
