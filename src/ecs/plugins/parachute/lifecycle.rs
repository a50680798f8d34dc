/*!
# Flight Lifecycle

Keeps the flight table in step with the host's connection lifecycle. Records
are created on connect, reset on spawn, stripped of their prop on death and
destroyed on disconnect. Disabling the feature cancels every active flight
through the `ParachuteDisabled` observer, outside the fixed tick.
*/

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::ecs::plugins::attachment::{Attachments, PropHandle};
use crate::ecs::plugins::config::FlightConfig;
use crate::ecs::plugins::parachute::components::*;
use crate::ecs::plugins::permission::Permissions;
use crate::ecs::plugins::player::{GravityScale, Player};

#[derive(SystemParam)]
pub struct FlightLifecycle<'w, 's> {
    table: ResMut<'w, FlightTable>,
    attachments: Attachments<'w, 's>,
    permissions: Res<'w, Permissions>,
    config: Res<'w, FlightConfig>,
    pawns: Query<'w, 's, (&'static Player, &'static mut GravityScale)>,
}

impl FlightLifecycle<'_, '_> {
    fn has_permission(&self, steam_id: u64) -> bool {
        self.permissions
            .resolve(steam_id, self.config.admin_flag.as_deref())
    }

    fn reset_gravity(&mut self, slot: usize) {
        for (player, mut gravity) in self.pawns.iter_mut() {
            if player.slot == slot {
                gravity.0 = DEFAULT_GRAVITY_SCALE;
            }
        }
    }
}

impl LifecycleSink for FlightLifecycle<'_, '_> {
    fn on_connect(&mut self, slot: usize, steam_id: u64) {
        if !self.table.in_bounds(slot) {
            debug!("Ignoring connect for out-of-range slot {slot}");
            return;
        }
        if self.table.contains(slot) {
            return;
        }

        let has_permission = self.has_permission(steam_id);
        self.table
            .insert_if_vacant(slot, PlayerFlightState::new(has_permission));
        debug!("Tracking slot {slot} (steam id {steam_id}, permitted: {has_permission})");
    }

    fn on_spawn(&mut self, slot: usize, steam_id: u64) {
        if !self.table.contains(slot) {
            // A spawn without a prior connect is treated as a late connect.
            self.on_connect(slot, steam_id);
            return;
        }

        let has_permission = self.has_permission(steam_id);
        let mut prop = None;
        if let Some(state) = self.table.get_mut(slot) {
            prop = state.take_prop();
            state.flying = false;
            state.has_permission = has_permission;
        }
        self.attachments.detach(prop);
        self.reset_gravity(slot);
    }

    fn on_death(&mut self, slot: usize) {
        let prop = self.table.get_mut(slot).and_then(PlayerFlightState::take_prop);
        self.attachments.detach(prop);
    }

    fn on_disconnect(&mut self, slot: usize) {
        if let Some(state) = self.table.remove(slot) {
            self.attachments.detach(state.prop);
            debug!("Released slot {slot}");
        }
    }

    fn on_toggle_disabled(&mut self) {
        let mut cancelled = Vec::new();
        let mut props: Vec<Option<PropHandle>> = Vec::new();
        for (slot, state) in self.table.iter_mut() {
            if !state.flying {
                continue;
            }
            props.push(state.take_prop());
            state.flying = false;
            cancelled.push(slot);
        }

        for prop in props {
            self.attachments.detach(prop);
        }
        for (player, mut gravity) in self.pawns.iter_mut() {
            if cancelled.contains(&player.slot) {
                gravity.0 = DEFAULT_GRAVITY_SCALE;
            }
        }

        if !cancelled.is_empty() {
            info!("Parachute disabled, cancelled {} active flights", cancelled.len());
        }
    }
}
