//! Audio system implementation backed by a dedicated thread and Raylib.
//!
//! - [`audio_thread`] runs on its own OS thread, owns the Raylib audio device,
//!   and processes [`AudioCmd`] messages, replying with [`AudioMessage`]s.
//! - [`update_bevy_audio_cmds`] and [`forward_audio_cmds`] move commands
//!   written by gameplay systems onto the channel.
//! - [`poll_audio_messages`] and [`update_bevy_audio_messages`] bring replies
//!   back into the ECS, where [`log_audio_messages`] reports them.
//!
//! Audio is fire-and-forget: nothing in the round logic waits on a reply.
//! The thread is created by [`crate::resources::audio::setup_audio`] and
//! joined by [`crate::resources::audio::shutdown_audio`].

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::AudioBridge;
use bevy_ecs::prelude::{MessageReader, MessageWriter, Messages, Res, ResMut};
use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, info, warn};
use raylib::core::audio::{Music, RaylibAudio, Sound};
use rustc_hash::{FxHashMap, FxHashSet};

/// Drain pending replies from the audio thread into `Messages<AudioMessage>`.
pub fn poll_audio_messages(bridge: Res<AudioBridge>, mut writer: MessageWriter<AudioMessage>) {
    writer.write_batch(bridge.rx_msg.try_iter());
}

/// Advance the ECS message queue for [`AudioMessage`]. Run after [`poll_audio_messages`].
pub fn update_bevy_audio_messages(mut msgs: ResMut<Messages<AudioMessage>>) {
    msgs.update();
}

/// Forward ECS AudioCmd messages to the audio thread via the AudioBridge sender.
pub fn forward_audio_cmds(bridge: Res<AudioBridge>, mut reader: MessageReader<AudioCmd>) {
    for cmd in reader.read() {
        // Send error only happens after shutdown
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Advance the ECS message queue for AudioCmd so same-frame readers can observe writes.
pub fn update_bevy_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

/// Report audio thread replies. Load failures are warnings, the game keeps
/// running without the missing sound.
pub fn log_audio_messages(mut reader: MessageReader<AudioMessage>) {
    for msg in reader.read() {
        match msg {
            AudioMessage::MusicLoadFailed { id, error } => {
                warn!("Music '{}' could not be loaded: {}", id, error)
            }
            AudioMessage::FxLoadFailed { id, error } => {
                warn!("Sound '{}' could not be loaded: {}", id, error)
            }
            AudioMessage::DeviceUnavailable { error } => {
                warn!("Playing without sound: {}", error)
            }
            other => debug!("audio: {:?}", other),
        }
    }
}

/// Entry point of the dedicated audio thread.
///
/// Owns every `Music` and `Sound` handle, pumps music streams, restarts
/// looped tracks and reports finished ones. Blocks until it receives
/// [`AudioCmd::Shutdown`].
///
/// When the device cannot be opened the thread reports
/// [`AudioMessage::DeviceUnavailable`] and then ignores commands until
/// shutdown.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_msg: Sender<AudioMessage>) {
    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => device,
        Err(e) => {
            error!("[audio] failed to initialize audio device: {}", e);
            let _ = tx_msg.send(AudioMessage::DeviceUnavailable {
                error: e.to_string(),
            });
            for cmd in rx_cmd.iter() {
                if cmd == AudioCmd::Shutdown {
                    break;
                }
            }
            return;
        }
    };

    info!(
        "[audio] thread starting (id={:?})",
        std::thread::current().id()
    );

    let mut musics: FxHashMap<String, Music> = FxHashMap::default();
    let mut playing: FxHashSet<String> = FxHashSet::default();
    let mut looped: FxHashSet<String> = FxHashSet::default();
    let mut sounds: FxHashMap<String, Sound> = FxHashMap::default();

    'run: loop {
        // 1) Drain commands
        for cmd in rx_cmd.try_iter() {
            match cmd {
                AudioCmd::LoadMusic { id, path } => match audio.new_music(&path) {
                    Ok(music) => {
                        debug!("[audio] loaded id='{}' path='{}'", id, path);
                        musics.insert(id.clone(), music);
                        let _ = tx_msg.send(AudioMessage::MusicLoaded { id });
                    }
                    Err(e) => {
                        let _ = tx_msg.send(AudioMessage::MusicLoadFailed {
                            id,
                            error: format!("{}: {}", path, e),
                        });
                    }
                },
                AudioCmd::PlayMusic {
                    id,
                    looped: want_loop,
                } => {
                    if let Some(music) = musics.get(&id) {
                        debug!("[audio] play start id='{}' looped={}", id, want_loop);
                        music.seek_stream(0.0);
                        music.play_stream();
                        playing.insert(id.clone());
                        if want_loop {
                            looped.insert(id.clone());
                        } else {
                            looped.remove(&id);
                        }
                        let _ = tx_msg.send(AudioMessage::MusicPlayStarted { id });
                    }
                }
                AudioCmd::StopMusic { id } => {
                    if let Some(music) = musics.get(&id) {
                        debug!("[audio] stop id='{}'", id);
                        music.stop_stream();
                        playing.remove(&id);
                        looped.remove(&id);
                        let _ = tx_msg.send(AudioMessage::MusicStopped { id });
                    }
                }
                AudioCmd::LoadFx { id, path } => match audio.new_sound(&path) {
                    Ok(sound) => {
                        debug!("[audio] fx loaded id='{}' path='{}'", id, path);
                        sounds.insert(id.clone(), sound);
                        let _ = tx_msg.send(AudioMessage::FxLoaded { id });
                    }
                    Err(e) => {
                        let _ = tx_msg.send(AudioMessage::FxLoadFailed {
                            id,
                            error: format!("{}: {}", path, e),
                        });
                    }
                },
                AudioCmd::PlayFx { id } => match sounds.get(&id) {
                    Some(sound) => sound.play(),
                    None => debug!("[audio] fx '{}' not loaded", id),
                },
                AudioCmd::Shutdown => {
                    info!("[audio] shutdown requested");
                    musics.clear();
                    sounds.clear();
                    break 'run;
                }
            }
        }

        // 2) Pump streaming + detect ends
        let mut ended: Vec<String> = Vec::new();
        for id in playing.iter() {
            if let Some(music) = musics.get(id) {
                if music.is_stream_playing() {
                    music.update_stream();
                } else if music.get_time_played() >= music.get_time_length() - 0.01 {
                    ended.push(id.clone());
                }
            }
        }
        for id in ended {
            if looped.contains(&id) {
                if let Some(music) = musics.get(&id) {
                    music.seek_stream(0.0);
                    music.play_stream();
                }
            } else {
                debug!("[audio] finished id='{}'", id);
                playing.remove(&id);
                let _ = tx_msg.send(AudioMessage::MusicFinished { id });
            }
        }

        std::thread::sleep(std::time::Duration::from_millis(10));
    } // 'run

    info!(
        "[audio] thread exiting (id={:?})",
        std::thread::current().id()
    );
}
