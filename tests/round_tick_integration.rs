//! Game tick integration tests for the round, hands, spawners and observers.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;
use raylib::prelude::Vector2;

use astarlearner::components::animatedsprite::AnimatedSprite;
use astarlearner::components::gameobject::{GameObject, KeepOnScreen};
use astarlearner::components::handmarker::HandMarker;
use astarlearner::components::spawner::{CelebrationSpawner, ObjectSpawner};
use astarlearner::events::audio::AudioCmd;
use astarlearner::events::round::{CORRECT_FX_ID, RoundSolvedEvent, round_solved_observer};
use astarlearner::events::switchdebug::{SwitchDebugEvent, switch_debug_observer};
use astarlearner::resources::audio::AudioBridge;
use astarlearner::resources::debugmode::DebugMode;
use astarlearner::resources::gameconfig::GameConfig;
use astarlearner::resources::hands::{Hand, KeyboardCursor, TrackedHands};
use astarlearner::resources::input::InputState;
use astarlearner::resources::itemcatalog::{ItemCatalog, ItemImage};
use astarlearner::resources::round::RoundState;
use astarlearner::resources::screensize::ScreenSize;
use astarlearner::resources::worldtime::WorldTime;
use astarlearner::systems::audio::{forward_audio_cmds, update_bevy_audio_cmds};
use astarlearner::systems::gameobject::game_object_system;
use astarlearner::systems::hands::{hand_marker_system, keyboard_hand_system};
use astarlearner::systems::round::round_system;
use astarlearner::systems::spawner::spawner_system;
use astarlearner::systems::time::update_world_time;

const EPSILON: f32 = 1e-6;
const SCREEN_W: i32 = 640;
const SCREEN_H: i32 = 480;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn ten_item_catalog() -> ItemCatalog {
    let mut catalog = ItemCatalog::new();
    let items = (0..10)
        .map(|i| ItemImage {
            name: format!("item{}", i),
            tex_key: format!("Set1/item{}", i),
            width: 64.0,
            height: 64.0,
        })
        .collect();
    catalog.insert_set("Set1", items);
    catalog
}

fn make_world() -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(ScreenSize {
        w: SCREEN_W,
        h: SCREEN_H,
    });
    world.insert_resource(GameConfig::new());
    world.insert_resource(InputState::default());
    world.insert_resource(TrackedHands::default());
    world.init_resource::<Messages<AudioCmd>>();
    world
}

/// World with a generated round, the celebration spawner and its observer.
fn make_round_world(seed: u64) -> World {
    let mut world = make_world();
    let catalog = ten_item_catalog();
    let mut round = RoundState::with_seed(SCREEN_W as f32, seed);
    round.generate_round(&catalog).unwrap();
    world.insert_resource(round);
    world.insert_resource(catalog);

    let sparkle = AnimatedSprite::new("sparkle", 8.0, 8.0, 1, 6)
        .with_speed(0.2)
        .with_looping(false);
    world.spawn((
        ObjectSpawner::new(sparkle)
            .with_max_alive(10)
            .destroy_on_animation_end(true),
        CelebrationSpawner,
    ));
    world.spawn(Observer::new(round_solved_observer));
    world.flush();
    world
}

fn tick_round(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(round_system);
    schedule.run(world);
}

fn tick_spawners(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(spawner_system);
    schedule.run(world);
}

fn tick_hands(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems((keyboard_hand_system, hand_marker_system).chain());
    schedule.run(world);
}

fn tick_game_objects(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(game_object_system);
    schedule.run(world);
}

fn solution_center(world: &World) -> Vector2 {
    world
        .resource::<RoundState>()
        .solution()
        .unwrap()
        .bounding_box()
        .center()
}

fn celebration_alive(world: &mut World) -> usize {
    let mut query = world.query_filtered::<&ObjectSpawner, With<CelebrationSpawner>>();
    query.single(world).unwrap().alive_count()
}

fn read_audio_cmds(world: &mut World) -> Vec<AudioCmd> {
    world.resource_mut::<Messages<AudioCmd>>().update();
    let mut state = SystemState::<MessageReader<AudioCmd>>::new(world);
    let mut reader = state.get_mut(world);
    reader.read().cloned().collect()
}

// =============================================================================
// Round
// =============================================================================

#[test]
fn hand_on_solution_solves_and_celebrates() {
    let mut world = make_round_world(7);
    let center = solution_center(&world);
    world.resource_mut::<TrackedHands>().set(Hand::Left, center);

    tick_round(&mut world);

    assert_eq!(world.resource::<RoundState>().rounds_completed(), 1);
    assert_eq!(celebration_alive(&mut world), 10);
    let cmds = read_audio_cmds(&mut world);
    assert_eq!(
        cmds,
        vec![AudioCmd::PlayFx {
            id: CORRECT_FX_ID.to_string()
        }]
    );
}

#[test]
fn both_hands_on_solution_regenerate_once() {
    let mut world = make_round_world(8);
    let center = solution_center(&world);
    {
        let mut hands = world.resource_mut::<TrackedHands>();
        hands.set(Hand::Left, center);
        hands.set(Hand::Right, Vector2::new(center.x + 2.0, center.y));
    }

    tick_round(&mut world);

    assert_eq!(world.resource::<RoundState>().rounds_completed(), 1);
    assert_eq!(read_audio_cmds(&mut world).len(), 1);
}

#[test]
fn hand_far_away_changes_nothing() {
    let mut world = make_round_world(9);
    let before = world.resource::<RoundState>().item_names().to_vec();
    world
        .resource_mut::<TrackedHands>()
        .set(Hand::Left, Vector2::new(320.0, 5000.0));

    tick_round(&mut world);

    let round = world.resource::<RoundState>();
    assert_eq!(round.rounds_completed(), 0);
    assert_eq!(round.item_names(), before.as_slice());
    assert_eq!(celebration_alive(&mut world), 0);
    assert!(read_audio_cmds(&mut world).is_empty());
}

#[test]
fn no_hands_is_a_miss() {
    let mut world = make_round_world(10);
    tick_round(&mut world);
    assert_eq!(world.resource::<RoundState>().rounds_completed(), 0);
}

#[test]
fn repeated_solves_count_rounds() {
    let mut world = make_round_world(11);
    for expected in 1..=5 {
        let center = solution_center(&world);
        world.resource_mut::<TrackedHands>().set(Hand::Left, center);
        tick_round(&mut world);
        assert_eq!(world.resource::<RoundState>().rounds_completed(), expected);
    }
}

// =============================================================================
// Celebration spawner
// =============================================================================

#[test]
fn celebration_respects_alive_cap_and_centres_on_hand() {
    let mut world = make_round_world(12);
    world.trigger(RoundSolvedEvent {
        position: Vector2::new(100.0, 200.0),
        sparkles: 50,
    });
    world.flush();

    let mut query = world.query_filtered::<&ObjectSpawner, With<CelebrationSpawner>>();
    let spawner = query.single(&world).unwrap();
    assert_eq!(spawner.alive_count(), 10);
    for object in spawner.objects() {
        assert!(approx_eq(object.position.x, 96.0));
        assert!(approx_eq(object.position.y, 196.0));
        assert!(object.velocity.y < 0.0);
    }
}

#[test]
fn sparkles_die_when_their_animation_ends_and_get_compacted() {
    let mut world = make_round_world(13);
    world.trigger(RoundSolvedEvent {
        position: Vector2::new(320.0, 240.0),
        sparkles: 5,
    });
    world.flush();

    // 6 frames at 0.2 frames per tick
    for _ in 0..40 {
        tick_spawners(&mut world);
    }
    assert_eq!(celebration_alive(&mut world), 0);

    // Dead entries are gone after the next cleanup
    for _ in 0..30 {
        tick_spawners(&mut world);
    }
    let mut query = world.query_filtered::<&ObjectSpawner, With<CelebrationSpawner>>();
    assert!(query.single(&world).unwrap().is_empty());
}

#[test]
fn spawner_system_culls_objects_leaving_the_screen() {
    let mut world = make_world();
    let dot = AnimatedSprite::still("dot", 4.0, 4.0);
    let mut spawner = ObjectSpawner::new(dot);
    spawner.spawn_object_with_velocity(Vector2::new(320.0, 240.0), Vector2::new(0.0, 0.0));
    spawner.spawn_object_with_velocity(Vector2::new(10.0, 470.0), Vector2::new(0.0, 20.0));
    let entity = world.spawn(spawner).id();

    tick_spawners(&mut world);

    let spawner = world.get::<ObjectSpawner>(entity).unwrap();
    assert!(spawner.objects()[0].is_alive());
    assert!(!spawner.objects()[1].is_alive());
}

// =============================================================================
// Hands and free-standing objects
// =============================================================================

#[test]
fn keyboard_hand_moves_cursor_and_publishes_right_hand() {
    let mut world = make_world();
    world.insert_resource(KeyboardCursor::new(Vector2::new(100.0, 100.0)));
    world.resource_mut::<InputState>().maindirection_right.active = true;

    tick_hands(&mut world);

    let expected = Vector2::new(100.0 + KeyboardCursor::DEFAULT_SPEED, 100.0);
    assert_eq!(world.resource::<KeyboardCursor>().position, expected);
    assert_eq!(world.resource::<TrackedHands>().get(Hand::Right), Some(expected));
}

#[test]
fn keyboard_hand_disabled_publishes_nothing() {
    let mut world = make_world();
    world.resource_mut::<GameConfig>().keyboard_hand = false;
    world.insert_resource(KeyboardCursor::new(Vector2::new(100.0, 100.0)));

    tick_hands(&mut world);

    assert!(world.resource::<TrackedHands>().is_empty());
}

#[test]
fn hand_marker_follows_hand_and_hides_when_untracked() {
    let mut world = make_world();
    world.insert_resource(KeyboardCursor::new(Vector2::new(0.0, 0.0)));
    world.resource_mut::<GameConfig>().keyboard_hand = false;
    let sprite = AnimatedSprite::still("hand_left", 20.0, 20.0);
    let marker = world
        .spawn((
            GameObject::new(&sprite, Vector2::zero()),
            HandMarker { hand: Hand::Left },
        ))
        .id();

    world
        .resource_mut::<TrackedHands>()
        .set(Hand::Left, Vector2::new(200.0, 150.0));
    tick_hands(&mut world);
    let object = world.get::<GameObject>(marker).unwrap();
    assert!(object.is_alive());
    assert!(approx_eq(object.position.x, 190.0));
    assert!(approx_eq(object.position.y, 140.0));

    world.resource_mut::<TrackedHands>().clear();
    tick_hands(&mut world);
    assert!(!world.get::<GameObject>(marker).unwrap().is_alive());

    world
        .resource_mut::<TrackedHands>()
        .set(Hand::Left, Vector2::new(50.0, 50.0));
    tick_hands(&mut world);
    assert!(world.get::<GameObject>(marker).unwrap().is_alive());
}

#[test]
fn keep_on_screen_objects_are_clamped() {
    let mut world = make_world();
    let sprite = AnimatedSprite::still("box", 10.0, 10.0);
    let kept = world
        .spawn((
            GameObject::with_velocity(&sprite, Vector2::new(630.0, 5.0), Vector2::new(50.0, -50.0)),
            KeepOnScreen,
        ))
        .id();
    let free = world
        .spawn(GameObject::with_velocity(
            &sprite,
            Vector2::new(630.0, 5.0),
            Vector2::new(50.0, -50.0),
        ))
        .id();

    tick_game_objects(&mut world);

    let kept = world.get::<GameObject>(kept).unwrap();
    assert!(approx_eq(kept.position.x, (SCREEN_W - 10) as f32));
    assert!(approx_eq(kept.position.y, 0.0));
    let free = world.get::<GameObject>(free).unwrap();
    assert!(approx_eq(free.position.x, 680.0));
    assert!(approx_eq(free.position.y, -45.0));
}

// =============================================================================
// Ambient: time, debug toggle, audio bridge
// =============================================================================

#[test]
fn world_time_counts_ticks() {
    let mut world = make_world();
    update_world_time(&mut world, 0.5);
    update_world_time(&mut world, 0.25);
    let time = world.resource::<WorldTime>();
    assert_eq!(time.frame_count, 2);
    assert!(approx_eq(time.elapsed, 0.75));
    assert!(approx_eq(time.delta, 0.25));
}

#[test]
fn switch_debug_toggles_debug_mode() {
    let mut world = make_world();
    world.spawn(Observer::new(switch_debug_observer));
    world.flush();

    world.trigger(SwitchDebugEvent {});
    world.flush();
    assert!(world.contains_resource::<DebugMode>());

    world.trigger(SwitchDebugEvent {});
    world.flush();
    assert!(!world.contains_resource::<DebugMode>());
}

#[test]
fn audio_cmds_are_forwarded_to_the_bridge() {
    let mut world = make_world();
    let (tx_cmd, rx_cmd) = crossbeam_channel::unbounded::<AudioCmd>();
    let (_tx_msg, rx_msg) = crossbeam_channel::unbounded();
    world.insert_resource(AudioBridge {
        tx_cmd,
        rx_msg,
        handle: std::thread::spawn(|| {}),
    });

    world.write_message(AudioCmd::PlayFx {
        id: "correct".to_string(),
    });
    let mut schedule = Schedule::default();
    schedule.add_systems((update_bevy_audio_cmds, forward_audio_cmds).chain());
    schedule.run(&mut world);

    let sent: Vec<AudioCmd> = rx_cmd.try_iter().collect();
    assert_eq!(
        sent,
        vec![AudioCmd::PlayFx {
            id: "correct".to_string()
        }]
    );
}
