use std::time::Duration;

use anyhow::{Context, Result};
use log::info;

use platformer_controller::engine::game_loop::GameLoop;
use platformer_controller::engine::input::{InputSnapshot, InputSource, ScriptedInput};
use platformer_controller::engine::physics::{body::presets, PhysicsWorld};
use platformer_controller::game::characters::{
    CharacterId, CharacterManager, ControllerConfig, GROUND_TAG,
};

/// Display refresh the headless run pretends to render at
const FRAME_TIME: Duration = Duration::from_micros(16_667);

/// Tick on which the hero gets hit (while hanging on the ladder)
const HURT_AT_TICK: u64 = 270;

/// Extra ticks after the script ends so the hero comes to rest
const SETTLE_TICKS: u64 = 120;

/// Ladder position: a climbable region right of the spawn point
const LADDER_X: f32 = 6.0;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting platformer controller demo...");

    let mut physics = PhysicsWorld::new();
    let config = ControllerConfig::default();
    build_level(&mut physics, &config.climb_region_tag);

    let mut manager = CharacterManager::new();
    let hero = manager
        .spawn_character("Hero", config, &mut physics, 0.0, 1.5)
        .context("failed to spawn hero")?;

    let mut script = ScriptedInput::new()
        .then(30, InputSnapshot::idle())
        .then(90, InputSnapshot::new(0.0, 0.0, true)) // jump, then fall back down
        .then(70, InputSnapshot::new(1.0, 0.0, false)) // walk into the ladder
        .then(60, InputSnapshot::new(0.0, 1.0, false)) // climb
        .then(30, InputSnapshot::idle()) // hang on (hit lands here)
        .then(60, InputSnapshot::idle()) // hurt, fall
        .then(60, InputSnapshot::new(1.0, 0.0, false)); // walk away

    let total_ticks = u64::from(script.remaining_ticks()) + SETTLE_TICKS;
    let mut game_loop = GameLoop::new();
    let dt = game_loop.fixed_timestep();
    let mut tick: u64 = 0;

    while tick < total_ticks {
        for _ in 0..game_loop.advance(FRAME_TIME) {
            tick += 1;

            manager.set_input(hero, script.poll());
            manager.update(&mut physics, dt);

            if tick == HURT_AT_TICK {
                manager
                    .get_mut(hero)
                    .context("hero disappeared")?
                    .hurt(&mut physics);
            }
            physics.step();
            manager.handle_collision_events(&mut physics);

            report_transition(&manager, &physics, hero, tick)?;
        }
    }

    info!(
        "Finished after {} ticks ({:.2}s simulated)",
        tick,
        game_loop.simulated_time().as_secs_f32()
    );

    manager.remove(hero, &mut physics);
    Ok(())
}

/// Ground slab along the x axis (top at y = 0.5) and a tall ladder
fn build_level(physics: &mut PhysicsWorld, climb_tag: &str) {
    let ground = physics.add_rigid_body(presets::ground_body(0.0, 0.0));
    physics.add_tagged_collider(presets::ground_collider(60.0, 1.0), ground, GROUND_TAG);

    let ladder = physics.add_rigid_body(presets::ground_body(LADDER_X, 4.5));
    physics.add_tagged_collider(presets::climb_region_collider(1.0, 8.0), ladder, climb_tag);

    info!("Level built: ground + ladder at x = {}", LADDER_X);
}

/// Log the hero's state on the tick it changes
fn report_transition(
    manager: &CharacterManager,
    physics: &PhysicsWorld,
    hero: CharacterId,
    tick: u64,
) -> Result<()> {
    let character = manager.get(hero).context("hero disappeared")?;
    let machine = character.controller.state_machine();

    if machine.state_just_changed() {
        let (x, y) = character.position(physics).unwrap_or_default();
        info!(
            "tick {:>4}: {:?} -> {:?} at ({:.2}, {:.2}), pose {}",
            tick,
            machine.previous_state(),
            machine.state(),
            x,
            y,
            character.animation.current_animation()
        );
    }

    Ok(())
}
