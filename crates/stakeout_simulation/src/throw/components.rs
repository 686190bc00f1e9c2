//! ThrowGate + TrajectoryPrediction компоненты

use bevy::prelude::*;

use crate::config::ImpulseMode;

/// Gate бросков: когда можно начать/держать/отпустить бросок
///
/// Инварианты:
/// - can_throw == false пока cooldown_remaining > 0
/// - максимум одна граната на завершённый бросок (release() одноразовый)
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct ThrowGate {
    pub is_holding: bool,
    pub can_throw: bool,
    /// Аккумулятор charged-режима (сек с последнего шага)
    pub charge_timer: f32,
    pub cooldown_remaining: f32,
    /// Текущая сила броска (fixed или накопленная charged)
    pub charge_strength: f32,
}

impl Default for ThrowGate {
    fn default() -> Self {
        Self {
            is_holding: false,
            can_throw: true,
            charge_timer: 0.0,
            cooldown_remaining: 0.0,
            charge_strength: 0.0,
        }
    }
}

impl ThrowGate {
    /// Начать удержание броска
    ///
    /// Silent no-op (false) если уже держим, на cooldown'е или gate закрыт.
    /// Ragdoll/dead-проверку делает caller (у gate нет доступа к marker'ам).
    pub fn start_hold(&mut self, initial_strength: f32) -> bool {
        if self.is_holding || !self.can_throw || self.cooldown_remaining > 0.0 {
            return false;
        }
        self.is_holding = true;
        self.charge_timer = 0.0;
        self.charge_strength = initial_strength;
        true
    }

    /// Отпустить бросок
    ///
    /// None если не держим или gate не разрешает (граната не спавнится,
    /// state не меняется). Иначе — заканчивает aiming, стартует cooldown
    /// и возвращает силу броска.
    pub fn release(&mut self, cooldown: f32) -> Option<f32> {
        if !self.is_holding || !self.can_throw {
            return None;
        }
        self.is_holding = false;
        self.can_throw = false;
        self.cooldown_remaining = cooldown;
        Some(self.charge_strength)
    }

    /// Тик cooldown'а; при нуле открывает gate и сбрасывает charge state
    pub fn tick_cooldown(&mut self, dt: f32) {
        if self.cooldown_remaining > 0.0 {
            self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
            if self.cooldown_remaining == 0.0 {
                self.can_throw = true;
                self.charge_timer = 0.0;
                self.charge_strength = 0.0;
            }
        }
    }

    /// Charged ("burst") режим: пока держим, каждые step_interval сила
    /// растёт на gain с клампом в [min, max]. Fixed режим — no-op.
    pub fn tick_charge(&mut self, dt: f32, mode: &ImpulseMode) {
        if !self.is_holding {
            return;
        }
        if let ImpulseMode::Charged {
            min,
            max,
            gain,
            step_interval,
        } = mode
        {
            self.charge_timer += dt;
            while self.charge_timer >= *step_interval {
                self.charge_timer -= *step_interval;
                self.charge_strength = (self.charge_strength + *gain).clamp(*min, *max);
            }
        }
    }
}

/// Предсказанная точка падения (aim marker mirror)
///
/// Валидно только пока aiming активен; recomputed каждый тик,
/// инвалидируется в момент конца aiming'а. Transient, не персистится.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct TrajectoryPrediction {
    pub start_point: Vec3,
    pub launch_velocity: Vec3,
    pub impact_point: Vec3,
    pub impact_normal: Vec3,
    /// false ⇒ marker не показываем (miss или не целимся)
    pub valid: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOLDOWN: f32 = 2.0;

    #[test]
    fn test_hold_release_cycle() {
        let mut gate = ThrowGate::default();
        assert!(gate.start_hold(2000.0));
        assert!(gate.is_holding);

        let strength = gate.release(COOLDOWN);
        assert_eq!(strength, Some(2000.0));
        assert!(!gate.is_holding);
        assert!(!gate.can_throw);
        assert_eq!(gate.cooldown_remaining, COOLDOWN);
    }

    #[test]
    fn test_release_without_hold_is_noop() {
        let mut gate = ThrowGate::default();
        assert_eq!(gate.release(COOLDOWN), None);
        assert!(gate.can_throw); // state не изменился
        assert_eq!(gate.cooldown_remaining, 0.0);
    }

    #[test]
    fn test_start_hold_denied_during_cooldown() {
        let mut gate = ThrowGate::default();
        gate.start_hold(2000.0);
        gate.release(COOLDOWN);

        // Вторая попытка внутри cooldown окна — silent no-op
        assert!(!gate.start_hold(2000.0));
        assert!(!gate.can_throw);

        gate.tick_cooldown(1.0);
        assert!(!gate.start_hold(2000.0)); // ещё 1 сек осталась

        gate.tick_cooldown(1.0);
        assert!(gate.can_throw); // cooldown истёк
        assert!(gate.start_hold(2000.0));
    }

    #[test]
    fn test_one_grenade_per_completed_throw() {
        let mut gate = ThrowGate::default();
        gate.start_hold(2000.0);
        assert!(gate.release(COOLDOWN).is_some());
        // Повторный release без нового hold — ничего
        assert!(gate.release(COOLDOWN).is_none());
    }

    #[test]
    fn test_charge_accumulates_and_clamps() {
        let mode = ImpulseMode::Charged {
            min: 100.0,
            max: 2000.0,
            gain: 200.0,
            step_interval: 0.2,
        };
        let mut gate = ThrowGate::default();
        gate.start_hold(mode.initial_strength());
        assert_eq!(gate.charge_strength, 100.0);

        // 0.2 сек → один шаг
        gate.tick_charge(0.2, &mode);
        assert_eq!(gate.charge_strength, 300.0);

        // Долгое удержание: clamp на max
        for _ in 0..100 {
            gate.tick_charge(0.2, &mode);
        }
        assert_eq!(gate.charge_strength, 2000.0);
    }

    #[test]
    fn test_charge_noop_for_fixed_mode() {
        let mode = ImpulseMode::Fixed { strength: 1500.0 };
        let mut gate = ThrowGate::default();
        gate.start_hold(mode.initial_strength());
        gate.tick_charge(1.0, &mode);
        assert_eq!(gate.charge_strength, 1500.0);
    }

    #[test]
    fn test_cooldown_resets_charge_state() {
        let mode = ImpulseMode::Charged {
            min: 100.0,
            max: 2000.0,
            gain: 200.0,
            step_interval: 0.2,
        };
        let mut gate = ThrowGate::default();
        gate.start_hold(mode.initial_strength());
        gate.tick_charge(0.4, &mode);
        gate.release(COOLDOWN);

        gate.tick_cooldown(COOLDOWN);
        assert_eq!(gate.charge_strength, 0.0);
        assert_eq!(gate.charge_timer, 0.0);
        assert!(gate.can_throw);
    }
}
