//! Rendering.
//!
//! Draw order: round items, the replica, free-standing objects (hand
//! markers), spawner pools (sparkles), then the HUD. With [`DebugMode`]
//! present the overlay adds bounding boxes, hand probes and FPS.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::gameobject::GameObject;
use crate::components::spawner::ObjectSpawner;
use crate::resources::debugmode::DebugMode;
use crate::resources::gameconfig::GameConfig;
use crate::resources::hands::TrackedHands;
use crate::resources::round::RoundState;
use crate::resources::screensize::ScreenSize;
use crate::resources::texturestore::TextureStore;

const BACKGROUND: Color = Color::SKYBLUE;

fn draw_object(d: &mut RaylibDrawHandle, textures: &TextureStore, object: &GameObject) {
    if !object.is_alive() {
        return;
    }
    let Some(tex) = textures.get(&object.sprite.tex_key) else {
        return;
    };
    let dest = object.bounding_box().to_rectangle();
    d.draw_texture_pro(
        tex,
        object.sprite.source_rect(),
        dest,
        Vector2::zero(),
        0.0,
        Color::WHITE,
    );
}

fn draw_box_lines(d: &mut RaylibDrawHandle, object: &GameObject, color: Color) {
    let b = object.bounding_box();
    d.draw_rectangle_lines(
        b.x as i32,
        b.y as i32,
        b.width as i32,
        b.height as i32,
        color,
    );
}

#[allow(clippy::too_many_arguments)]
pub fn render_system(
    mut rl: NonSendMut<raylib::RaylibHandle>,
    th: NonSend<raylib::RaylibThread>,
    textures: Res<TextureStore>,
    round: Res<RoundState>,
    hands: Res<TrackedHands>,
    config: Res<GameConfig>,
    screen: Res<ScreenSize>,
    spawners: Query<&ObjectSpawner>,
    objects: Query<&GameObject>,
    debug: Option<Res<DebugMode>>,
) {
    let mut d = rl.begin_drawing(&th);
    d.clear_background(BACKGROUND);

    for object in round.current_set() {
        draw_object(&mut d, &textures, object);
    }
    if let Some(replica) = round.replica() {
        draw_object(&mut d, &textures, replica);
    }
    for object in objects.iter() {
        draw_object(&mut d, &textures, object);
    }
    for spawner in spawners.iter() {
        for object in spawner.objects() {
            draw_object(&mut d, &textures, object);
        }
    }

    if let Some(name) = round.solution_name() {
        d.draw_text(&format!("Find: {}", name), 10, screen.h - 30, 20, Color::WHITE);
    }
    let score = format!("Rounds: {}", round.rounds_completed());
    let score_w = measure_text(&score, 20);
    d.draw_text(&score, screen.w - score_w - 10, screen.h - 30, 20, Color::WHITE);

    if debug.is_none() {
        return;
    }

    for object in round.current_set() {
        let color = if object.is_solution_object {
            Color::GREEN
        } else {
            Color::RED
        };
        draw_box_lines(&mut d, object, color);
    }
    for spawner in spawners.iter() {
        for object in spawner.objects().iter().filter(|o| o.is_alive()) {
            draw_box_lines(&mut d, object, Color::YELLOW);
        }
    }
    let half = config.probe_size / 2.0;
    for hand in hands.hands.iter() {
        d.draw_rectangle_lines(
            (hand.position.x - half) as i32,
            (hand.position.y - half) as i32,
            config.probe_size as i32,
            config.probe_size as i32,
            Color::HOTPINK,
        );
    }

    let fps = d.get_fps();
    let alive: usize = spawners.iter().map(|s| s.alive_count()).sum();
    let text = format!(
        "DEBUG MODE (press F11 to toggle) | FPS: {} | set: {} | sparkles: {}",
        fps,
        round.set_name().unwrap_or("-"),
        alive
    );
    d.draw_text(&text, 10, screen.h / 2, 10, Color::BLACK);
}
