use bevy::prelude::*;
use crate::ecs::plugins::player::components::*;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerLifecycleEvent>();
    }
}
