use bevy_ecs::prelude::*;

use crate::components::spawner::ObjectSpawner;
use crate::resources::screensize::ScreenSize;

/// Advance every spawner pool one tick, killing objects that left the screen.
pub fn spawner_system(mut spawners: Query<&mut ObjectSpawner>, screen: Res<ScreenSize>) {
    let viewport = screen.viewport();
    for mut spawner in spawners.iter_mut() {
        spawner.update_culled(&viewport);
    }
}
