use bevy_ecs::prelude::*;

use crate::components::gameobject::{GameObject, KeepOnScreen};
use crate::resources::screensize::ScreenSize;

/// Advance every free-standing [`GameObject`] one tick.
///
/// Objects tagged [`KeepOnScreen`] are pushed back inside the screen.
pub fn game_object_system(
    mut objects: Query<(&mut GameObject, Has<KeepOnScreen>)>,
    screen: Res<ScreenSize>,
) {
    let viewport = screen.viewport();
    for (mut object, keep_on_screen) in objects.iter_mut() {
        if keep_on_screen {
            object.update_clamped(&viewport);
        } else {
            object.update();
        }
    }
}
