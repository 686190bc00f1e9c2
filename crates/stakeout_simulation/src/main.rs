//! Headless симуляция STAKEOUT
//!
//! Запускает Bevy App без рендера: спавнит pawn и пару targets,
//! скриптует бросок гранаты и прокручивает детонацию.

use std::time::Duration;

use bevy::time::TimeUpdateStrategy;
use bevy::prelude::*;
use stakeout_simulation::{
    create_headless_app, spawn_default_pawn, Actor, GameMode, GrenadeDetonated, Health,
    PlayerInput, SimulationPlugin,
};

fn main() {
    let seed = 42;
    println!("Starting STAKEOUT headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);
    // Ручной тик 60Hz вместо wall clock — прогон детерминистичен
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        1.0 / 60.0,
    )));

    let mode = GameMode::default();
    let pawn = {
        let world = app.world_mut();
        let mut commands = world.commands();
        spawn_default_pawn(&mut commands, &mode)
    };
    app.world_mut().flush();

    // Пара targets перед pawn'ом (default камера смотрит в -Z)
    for offset in [Vec3::new(-1.0, 0.0, -6.0), Vec3::new(1.5, 0.0, -5.0)] {
        app.world_mut()
            .spawn((Actor { faction_id: 1 }, Transform::from_translation(offset)));
    }

    // Скриптованный бросок: зажали на тике 10, отпустили на тике 40
    for tick in 0..400u32 {
        if tick == 10 {
            app.world_mut().send_event(PlayerInput::ThrowStart);
        }
        if tick == 40 {
            app.world_mut().send_event(PlayerInput::ThrowRelease);
        }

        app.update();

        let detonations: Vec<GrenadeDetonated> = app
            .world_mut()
            .resource_mut::<Events<GrenadeDetonated>>()
            .drain()
            .collect();
        for detonation in detonations {
            println!(
                "Tick {}: grenade detonated at {:?}, {} affected",
                tick, detonation.position, detonation.affected
            );
        }

        if tick % 100 == 0 {
            let entity_count = app.world().entities().len();
            println!("Tick {}: {} entities", tick, entity_count);
        }
    }

    // Итог по здоровью targets
    let mut query = app.world_mut().query::<(Entity, &Health)>();
    for (entity, health) in query.iter(app.world()) {
        if entity != pawn {
            println!("Target {:?}: {}/{} hp", entity, health.current, health.max);
        }
    }

    println!("Simulation complete!");
}
