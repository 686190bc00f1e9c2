//! Grenade entity state machine (component FSM)

use bevy::prelude::*;

use crate::config::{DetonationPolicy, GrenadeConfig};

/// Состояния гранаты
///
/// Переходы monotonic и one-directional, state не ревизитится:
/// Armed → Flying → Detonating → Destroyed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum GrenadeState {
    /// Начальное: entity существует, physics активна, timer взведён.
    /// Выход в Flying implicit на первом тике.
    Armed,
    /// В полёте; fuse копится, контакты проверяются
    Flying,
    /// Детонация: effect dispatch ровно один раз на входе
    Detonating,
    /// Terminal: entity убирается из симуляции, per-tick updates прекращаются
    Destroyed,
}

/// Что именно сработало
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetonationTrigger {
    /// fuse_elapsed достиг fuse_duration
    FuseExpired,
    /// Первый qualifying контакт с damageable актором вне ignore set
    Contact(Entity),
}

/// Брошенная граната
#[derive(Component, Debug, Clone, Reflect)]
pub struct Grenade {
    pub state: GrenadeState,
    pub fuse_elapsed: f32,
    pub fuse_duration: f32,
    pub blast_radius: f32,
    pub contact_radius: f32,
    /// Caller-assigned сила (fixed или charged на release)
    pub impulse_strength: f32,
    pub policy: DetonationPolicy,
    /// Instigator — для attacker поля в DamageDealt
    pub instigator: Entity,
    /// Акторы, исключённые из урона/импульса (self-protection)
    pub ignore: Vec<Entity>,
    /// Latch: детонация ровно один раз, даже если оба триггера в одном тике
    detonated: bool,
}

impl Grenade {
    pub fn new(config: &GrenadeConfig, impulse_strength: f32, instigator: Entity) -> Self {
        Self {
            state: GrenadeState::Armed,
            fuse_elapsed: 0.0,
            fuse_duration: config.fuse_duration,
            blast_radius: config.blast_radius,
            contact_radius: config.contact_radius,
            impulse_strength,
            policy: config.policy,
            instigator,
            ignore: vec![instigator],
            detonated: false,
        }
    }

    pub fn ignores(&self, entity: Entity) -> bool {
        self.ignore.contains(&entity)
    }

    pub fn has_detonated(&self) -> bool {
        self.detonated
    }

    /// Один simulation tick state machine
    ///
    /// `contact` — первый qualifying контакт этого тика (caller уже
    /// отфильтровал ignore set и damageable-требование), или None.
    ///
    /// Возвращает триггер ровно один раз за lifetime: latch гасит
    /// повторные вызовы и одновременный двойной триггер (first-wins).
    pub fn advance(&mut self, dt: f32, contact: Option<Entity>) -> Option<DetonationTrigger> {
        match self.state {
            GrenadeState::Armed => self.state = GrenadeState::Flying,
            GrenadeState::Flying => {}
            // Никаких updates после детонации
            GrenadeState::Detonating | GrenadeState::Destroyed => return None,
        }

        if self.policy != DetonationPolicy::ContactOnly {
            self.fuse_elapsed += dt;
        }

        let fuse_expired = self.fuse_elapsed >= self.fuse_duration;
        let trigger = match self.policy {
            DetonationPolicy::TimerOnly => fuse_expired.then_some(DetonationTrigger::FuseExpired),
            DetonationPolicy::ContactOnly => contact.map(DetonationTrigger::Contact),
            DetonationPolicy::ContactOrTimer => contact
                .map(DetonationTrigger::Contact)
                .or_else(|| fuse_expired.then_some(DetonationTrigger::FuseExpired)),
        };

        if trigger.is_some() {
            if self.detonated {
                return None; // latch
            }
            self.detonated = true;
            self.state = GrenadeState::Detonating;
        }

        trigger
    }

    /// Detonating → Destroyed (после effect dispatch, тот же тик)
    pub fn mark_destroyed(&mut self) {
        debug_assert_eq!(self.state, GrenadeState::Detonating);
        self.state = GrenadeState::Destroyed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn config(policy: DetonationPolicy) -> GrenadeConfig {
        GrenadeConfig {
            fuse_duration: 3.0,
            blast_radius: 5.0,
            contact_radius: 0.5,
            policy,
        }
    }

    fn ticks_until_trigger(grenade: &mut Grenade, max_ticks: usize) -> Option<(usize, DetonationTrigger)> {
        for tick in 0..max_ticks {
            if let Some(trigger) = grenade.advance(DT, None) {
                return Some((tick, trigger));
            }
        }
        None
    }

    #[test]
    fn test_armed_exits_to_flying_first_tick() {
        let mut grenade = Grenade::new(&config(DetonationPolicy::ContactOrTimer), 2000.0, Entity::PLACEHOLDER);
        assert_eq!(grenade.state, GrenadeState::Armed);
        grenade.advance(DT, None);
        assert_eq!(grenade.state, GrenadeState::Flying);
    }

    #[test]
    fn test_fuse_detonates_at_duration() {
        // Для всех F >= 0: Detonating не позже T+F (± один тик)
        let mut grenade = Grenade::new(&config(DetonationPolicy::TimerOnly), 2000.0, Entity::PLACEHOLDER);
        let (tick, trigger) = ticks_until_trigger(&mut grenade, 600).expect("fuse должен сработать");

        assert_eq!(trigger, DetonationTrigger::FuseExpired);
        assert_eq!(grenade.state, GrenadeState::Detonating);
        // 3.0 сек при 60Hz = 180 тиков, ± один
        assert!((179..=181).contains(&tick), "tick = {}", tick);
    }

    #[test]
    fn test_zero_fuse_detonates_first_tick() {
        let mut cfg = config(DetonationPolicy::TimerOnly);
        cfg.fuse_duration = 0.0;
        let mut grenade = Grenade::new(&cfg, 2000.0, Entity::PLACEHOLDER);
        assert_eq!(
            grenade.advance(DT, None),
            Some(DetonationTrigger::FuseExpired)
        );
    }

    #[test]
    fn test_contact_beats_fuse() {
        // Контакт на t=0.8 (fuse=3.0) → детонация на t=0.8, не 3.0
        let mut grenade = Grenade::new(&config(DetonationPolicy::ContactOrTimer), 2000.0, Entity::PLACEHOLDER);
        let other = Entity::from_raw(7);

        let contact_tick = (0.8 / DT) as usize;
        for _ in 0..contact_tick {
            assert_eq!(grenade.advance(DT, None), None);
        }
        assert_eq!(
            grenade.advance(DT, Some(other)),
            Some(DetonationTrigger::Contact(other))
        );
        assert!(grenade.fuse_elapsed < grenade.fuse_duration);
    }

    #[test]
    fn test_timer_only_ignores_contact() {
        let mut grenade = Grenade::new(&config(DetonationPolicy::TimerOnly), 2000.0, Entity::PLACEHOLDER);
        let other = Entity::from_raw(7);
        assert_eq!(grenade.advance(DT, Some(other)), None);
        assert_eq!(grenade.state, GrenadeState::Flying);
    }

    #[test]
    fn test_contact_only_never_fuses() {
        let mut grenade = Grenade::new(&config(DetonationPolicy::ContactOnly), 2000.0, Entity::PLACEHOLDER);
        assert!(ticks_until_trigger(&mut grenade, 1000).is_none());
        assert_eq!(grenade.state, GrenadeState::Flying);

        let other = Entity::from_raw(7);
        assert_eq!(
            grenade.advance(DT, Some(other)),
            Some(DetonationTrigger::Contact(other))
        );
    }

    #[test]
    fn test_latch_double_trigger_same_tick() {
        // Оба триггера в одном тике: first-wins, второй раз не стреляет
        let mut cfg = config(DetonationPolicy::ContactOrTimer);
        cfg.fuse_duration = 0.0;
        let mut grenade = Grenade::new(&cfg, 2000.0, Entity::PLACEHOLDER);
        let other = Entity::from_raw(7);

        let first = grenade.advance(DT, Some(other));
        assert_eq!(first, Some(DetonationTrigger::Contact(other)));

        // Симулируем race: повторный advance с обоими триггерами
        assert_eq!(grenade.advance(DT, Some(other)), None);
        assert_eq!(grenade.advance(DT, None), None);
        assert!(grenade.has_detonated());
    }

    #[test]
    fn test_transitions_monotonic() {
        let mut grenade = Grenade::new(&config(DetonationPolicy::TimerOnly), 2000.0, Entity::PLACEHOLDER);
        ticks_until_trigger(&mut grenade, 600).expect("fuse");
        assert_eq!(grenade.state, GrenadeState::Detonating);

        grenade.mark_destroyed();
        assert_eq!(grenade.state, GrenadeState::Destroyed);

        // Destroyed — terminal: advance ничего не делает
        assert_eq!(grenade.advance(DT, None), None);
        assert_eq!(grenade.state, GrenadeState::Destroyed);
    }

    #[test]
    fn test_ignore_set_contains_instigator() {
        let thrower = Entity::from_raw(3);
        let grenade = Grenade::new(&config(DetonationPolicy::ContactOrTimer), 2000.0, thrower);
        assert!(grenade.ignores(thrower));
        assert!(!grenade.ignores(Entity::from_raw(4)));
    }
}
