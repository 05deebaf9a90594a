//! AStar Learner main entry point.
//!
//! A picture matching game for young learners built on:
//! - **raylib** for windowing, graphics, and audio
//! - **bevy_ecs** for entity-component-system architecture
//!
//! Each round shows four pictures from one item set in the screen corners and
//! a copy of the one to find at the top. Touching the right picture with a
//! hand (the mouse, or the keyboard cursor) plays a sound, bursts sparkles and
//! starts the next round.
//!
//! # Project Structure
//!
//! - [`components`] – sprites, game objects, spawners, timers
//! - [`events`] – audio commands, round solved, debug toggle
//! - [`game`] – one-shot setup (assets, entities, first round)
//! - [`resources`] – config, round controller, item catalog, hands, stores
//! - [`systems`] – input, hands, round, spawners, audio bridge, rendering
//!
//! # Main Loop
//!
//! 1. Parse the command line and load `config.ini`
//! 2. Initialize the raylib window, ECS world, resources and audio thread
//! 3. Run [`game::setup`] once; a missing or empty sets folder is fatal
//! 4. Every frame: input, hands, round, effects, audio, render
//! 5. Stop the audio thread on exit
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --seed 42
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod components;
mod events;
mod game;
mod resources;
mod systems;

use crate::events::round::round_solved_observer;
use crate::events::switchdebug::switch_debug_observer;
use crate::resources::audio::{setup_audio, shutdown_audio};
use crate::resources::gameconfig::{DEFAULT_CONFIG_PATH, GameConfig};
use crate::resources::hands::{KeyboardCursor, TrackedHands};
use crate::resources::input::InputState;
use crate::resources::round::RoundState;
use crate::resources::screensize::ScreenSize;
use crate::resources::worldtime::WorldTime;
use crate::systems::audio::{
    forward_audio_cmds, log_audio_messages, poll_audio_messages, update_bevy_audio_cmds,
    update_bevy_audio_messages,
};
use crate::systems::gameobject::game_object_system;
use crate::systems::hands::{hand_marker_system, keyboard_hand_system, mouse_hand_system};
use crate::systems::input::update_input_state;
use crate::systems::render::render_system;
use crate::systems::round::round_system;
use crate::systems::spawner::spawner_system;
use crate::systems::time::update_world_time;
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use bevy_ecs::system::RunSystemOnce;
use clap::Parser;
use log::{error, info, warn};
use raylib::prelude::Vector2;
use std::path::PathBuf;

/// AStar Learner
#[derive(Parser)]
#[command(
    version,
    about = "Find the matching picture! A touch-the-picture game for young learners."
)]
struct Cli {
    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Seed the round generator for a reproducible sequence of rounds.
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Print the item sets found with the current configuration and exit.
    #[arg(long)]
    list_sets: bool,

    /// Write the default configuration to the config path and exit.
    #[arg(long)]
    write_config: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = GameConfig::with_path(&cli.config);

    // Early-exit: write defaults and quit (no window/audio needed)
    if cli.write_config {
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Default config written to {}", cli.config.display());
        return;
    }

    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }

    // Early-exit: list item sets and quit
    if cli.list_sets {
        match game::find_sets(&config) {
            Ok(sets) => {
                for set in sets {
                    let names: Vec<&str> = set.items.iter().map(|i| i.name.as_str()).collect();
                    println!("{} ({} items): {}", set.name, set.items.len(), names.join(", "));
                }
            }
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    // --------------- Raylib window ---------------
    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .title("AStar Learner")
        .build();
    rl.set_target_fps(config.target_fps);
    // Esc is handled through InputState
    rl.set_exit_key(None);
    if config.fullscreen {
        rl.toggle_fullscreen();
    }
    let screen = ScreenSize {
        w: rl.get_screen_width(),
        h: rl.get_screen_height(),
    };

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(screen);
    world.insert_resource(InputState::default());
    world.insert_resource(TrackedHands::default());
    world.insert_resource(KeyboardCursor::new(Vector2::new(
        screen.w as f32 * 0.75,
        screen.h as f32 * 0.5,
    )));

    let round = match cli.seed {
        Some(seed) => {
            info!("Rounds seeded with {}", seed);
            RoundState::with_seed(screen.w as f32, seed)
        }
        None => RoundState::new(screen.w as f32),
    };
    world.insert_resource(
        round
            .with_probe_size(config.probe_size)
            .with_slot_spacing(config.slot_spacing),
    );
    world.insert_resource(config);

    // Must go before the game setup, which queues audio commands
    if let Err(e) = setup_audio(&mut world) {
        error!("{}", e);
        std::process::exit(1);
    }

    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    world.spawn(Observer::new(switch_debug_observer));
    world.spawn(Observer::new(round_solved_observer));
    // Ensure the observers are registered before we run any systems that may trigger events.
    world.flush();

    let setup_result = world
        .run_system_once(game::setup)
        .map_err(|e| e.to_string())
        .and_then(|result| result);
    if let Err(e) = setup_result {
        error!("Setup failed: {}", e);
        shutdown_audio(&mut world);
        std::process::exit(1);
    }

    let mut update = Schedule::default();
    update.add_systems(update_input_state);
    update.add_systems(mouse_hand_system.after(update_input_state));
    update.add_systems(keyboard_hand_system.after(update_input_state));
    update.add_systems(
        hand_marker_system
            .after(mouse_hand_system)
            .after(keyboard_hand_system),
    );
    update.add_systems(game_object_system.after(hand_marker_system));
    update.add_systems(
        round_system
            .after(mouse_hand_system)
            .after(keyboard_hand_system),
    );
    // After round_system so a burst triggered this tick moves on its spawn frame
    update.add_systems(spawner_system.after(round_system));
    update.add_systems(
        // audio systems must be together
        (
            update_bevy_audio_cmds,
            forward_audio_cmds,
            poll_audio_messages,
            update_bevy_audio_messages,
            log_audio_messages,
        )
            .chain()
            .after(round_system),
    );
    update.add_systems(
        render_system
            .after(spawner_system)
            .after(game_object_system),
    );

    if let Err(e) = update.initialize(&mut world) {
        error!("Failed to initialize schedule: {}", e);
        shutdown_audio(&mut world);
        std::process::exit(1);
    }

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
        && !world.resource::<InputState>().action_back.just_pressed
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers();

        let (w, h) = {
            let rl = world.non_send_resource::<raylib::RaylibHandle>();
            (rl.get_screen_width(), rl.get_screen_height())
        };
        let mut screen = world.resource_mut::<ScreenSize>();
        screen.w = w;
        screen.h = h;
    }

    info!(
        "Bye! {} rounds completed",
        world.resource::<RoundState>().rounds_completed()
    );
    shutdown_audio(&mut world);
}
