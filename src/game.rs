//! Game setup.
//!
//! [`setup`] runs once before the main loop: it scans the item sets, loads
//! every picture into the [`TextureStore`], generates the sparkle and hand
//! marker textures, spawns the celebration spawner and the hand markers,
//! queues the audio assets and starts the first round.

use bevy_ecs::prelude::*;
use log::{info, warn};
use raylib::prelude::*;

use crate::components::animatedsprite::AnimatedSprite;
use crate::components::gameobject::{GameObject, KeepOnScreen};
use crate::components::handmarker::HandMarker;
use crate::components::spawner::{CelebrationSpawner, ObjectSpawner};
use crate::events::audio::AudioCmd;
use crate::events::round::CORRECT_FX_ID;
use crate::resources::gameconfig::GameConfig;
use crate::resources::hands::Hand;
use crate::resources::itemcatalog::{
    ItemCatalog, ItemImage, SetFolder, SetsManifest, discover_sets,
};
use crate::resources::round::RoundState;
use crate::resources::texturestore::TextureStore;

const SPARKLE_TEX: &str = "sparkle";
const SPARKLE_FRAME: i32 = 8;
const SPARKLE_FRAMES: i32 = 6;
/// Frames advanced per tick; a sparkle lives `SPARKLE_FRAMES / speed` ticks.
const SPARKLE_SPEED: f32 = 0.2;
const HAND_MARKER_SIZE: i32 = 20;
const MUSIC_ID: &str = "background";

/// Set folders selected by the config: the manifest when present, otherwise
/// every sub-folder of `sets_dir`.
pub fn find_sets(config: &GameConfig) -> Result<Vec<SetFolder>, String> {
    let manifest_path = config.manifest_path();
    let manifest = if manifest_path.is_file() {
        info!("Using sets manifest {}", manifest_path.display());
        Some(SetsManifest::load(&manifest_path)?)
    } else {
        None
    };
    discover_sets(&config.sets_dir, manifest.as_ref())
}

/// Horizontal strip of shrinking squares, one per frame.
fn sparkle_sheet() -> Image {
    let mut image =
        Image::gen_image_color(SPARKLE_FRAME * SPARKLE_FRAMES, SPARKLE_FRAME, Color::BLANK);
    for frame in 0..SPARKLE_FRAMES {
        let inset = frame * (SPARKLE_FRAME / 2) / SPARKLE_FRAMES;
        let side = SPARKLE_FRAME - 2 * inset;
        let color = if frame % 2 == 0 { Color::GOLD } else { Color::WHITE };
        image.draw_rectangle(frame * SPARKLE_FRAME + inset, inset, side, side, color);
    }
    image
}

fn load_item_sets(
    rl: &mut RaylibHandle,
    th: &RaylibThread,
    folders: Vec<SetFolder>,
    tex_store: &mut TextureStore,
    catalog: &mut ItemCatalog,
) {
    for folder in folders {
        let mut items = Vec::with_capacity(folder.items.len());
        for file in folder.items {
            let path = file.path.to_string_lossy().to_string();
            match rl.load_texture(th, &path) {
                Ok(tex) => {
                    let tex_key = format!("{}/{}", folder.name, file.name);
                    items.push(ItemImage {
                        name: file.name,
                        tex_key: tex_key.clone(),
                        width: tex.width as f32,
                        height: tex.height as f32,
                    });
                    tex_store.insert(tex_key, tex);
                }
                Err(e) => warn!("Skipping item {}: {}", path, e),
            }
        }
        info!("Loaded set '{}' ({} items)", folder.name, items.len());
        catalog.insert_set(folder.name, items);
    }
}

pub fn setup(
    mut commands: Commands,
    mut rl: NonSendMut<raylib::RaylibHandle>,
    th: NonSend<raylib::RaylibThread>,
    config: Res<GameConfig>,
    mut round: ResMut<RoundState>,
    mut audio_cmd_writer: MessageWriter<AudioCmd>,
) -> Result<(), String> {
    let mut tex_store = TextureStore::new();
    let mut catalog = ItemCatalog::new();

    let folders = find_sets(&config)?;
    load_item_sets(&mut rl, &th, folders, &mut tex_store, &mut catalog);

    // Sparkles
    let sparkle_tex = rl
        .load_texture_from_image(&th, &sparkle_sheet())
        .map_err(|e| format!("Failed to create sparkle texture: {}", e))?;
    tex_store.insert(SPARKLE_TEX, sparkle_tex);
    let sparkle = AnimatedSprite::new(
        SPARKLE_TEX,
        SPARKLE_FRAME as f32,
        SPARKLE_FRAME as f32,
        1,
        SPARKLE_FRAMES as usize,
    )
    .with_speed(SPARKLE_SPEED)
    .with_looping(false);
    commands.spawn((
        ObjectSpawner::new(sparkle)
            .with_max_alive(config.sparkle_max as usize)
            .with_gravity(config.sparkle_gravity)
            .with_cleanup_frames(config.cleanup_frames)
            .destroy_on_animation_end(true),
        CelebrationSpawner,
    ));

    // Hand markers
    let mut markers = vec![(Hand::Left, "hand_left", Color::VIOLET)];
    if config.keyboard_hand {
        markers.push((Hand::Right, "hand_right", Color::ORANGE));
    }
    for (hand, tex_key, color) in markers {
        let image = Image::gen_image_color(HAND_MARKER_SIZE, HAND_MARKER_SIZE, color);
        let tex = rl
            .load_texture_from_image(&th, &image)
            .map_err(|e| format!("Failed to create hand marker texture: {}", e))?;
        tex_store.insert(tex_key, tex);
        let sprite = AnimatedSprite::still(
            tex_key,
            HAND_MARKER_SIZE as f32,
            HAND_MARKER_SIZE as f32,
        );
        commands.spawn((
            GameObject::new(&sprite, Vector2::zero()),
            HandMarker { hand },
            KeepOnScreen,
        ));
    }

    // Audio
    audio_cmd_writer.write(AudioCmd::LoadFx {
        id: CORRECT_FX_ID.to_string(),
        path: config.correct_fx.to_string_lossy().to_string(),
    });
    if let Some(music) = &config.music {
        audio_cmd_writer.write(AudioCmd::LoadMusic {
            id: MUSIC_ID.to_string(),
            path: music.to_string_lossy().to_string(),
        });
        audio_cmd_writer.write(AudioCmd::PlayMusic {
            id: MUSIC_ID.to_string(),
            looped: true,
        });
    }

    round.generate_round(&catalog)?;

    info!(
        "Setup done: {} sets, {} textures",
        catalog.sets().len(),
        tex_store.len()
    );
    commands.insert_resource(tex_store);
    commands.insert_resource(catalog);
    Ok(())
}
