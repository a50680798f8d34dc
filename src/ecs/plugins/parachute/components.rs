use bevy::prelude::*;

use crate::ecs::plugins::attachment::PropHandle;
use crate::ecs::plugins::player::PlayerLifecycleEvent;

/// Gravity scale while the parachute is slowing the pawn.
pub const PARACHUTE_GRAVITY_SCALE: f32 = 0.1;
pub const DEFAULT_GRAVITY_SCALE: f32 = 1.0;

/// Per-slot parachute state.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PlayerFlightState {
    pub flying: bool,
    pub prop: Option<PropHandle>,
    pub has_permission: bool,
}

impl PlayerFlightState {
    pub fn new(has_permission: bool) -> Self {
        Self {
            flying: false,
            prop: None,
            has_permission,
        }
    }

    pub fn take_prop(&mut self) -> Option<PropHandle> {
        self.prop.take()
    }
}

/// Fixed-capacity table of flight states indexed by connection slot.
///
/// Every accessor is bounds checked; an out-of-range slot behaves like an
/// empty one.
#[derive(Resource, Debug)]
pub struct FlightTable {
    slots: Box<[Option<PlayerFlightState>]>,
}

impl FlightTable {
    pub fn new(max_players: usize) -> Self {
        Self {
            slots: (0..max_players).map(|_| None).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn in_bounds(&self, slot: usize) -> bool {
        slot < self.slots.len()
    }

    pub fn contains(&self, slot: usize) -> bool {
        self.get(slot).is_some()
    }

    pub fn get(&self, slot: usize) -> Option<&PlayerFlightState> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut PlayerFlightState> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    /// Creates a record for the slot unless one exists. Returns false when the
    /// slot is out of range or already occupied.
    pub fn insert_if_vacant(&mut self, slot: usize, state: PlayerFlightState) -> bool {
        let Some(entry) = self.slots.get_mut(slot) else {
            return false;
        };
        if entry.is_some() {
            return false;
        }
        *entry = Some(state);
        true
    }

    /// Frees the slot, handing back its record so the caller can release the prop.
    pub fn remove(&mut self, slot: usize) -> Option<PlayerFlightState> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &PlayerFlightState)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, state)| state.as_ref().map(|state| (slot, state)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut PlayerFlightState)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(slot, state)| state.as_mut().map(|state| (slot, state)))
    }

    pub fn occupied(&self) -> usize {
        self.iter().count()
    }
}

/// Global on/off switch, mirrored from the `sv_parachute` console variable.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParachuteToggle {
    pub enabled: bool,
}

impl Default for ParachuteToggle {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl ParachuteToggle {
    pub const CONVAR_NAME: &'static str = "sv_parachute";

    /// Applies a console value as the host reports it. Returns false and leaves
    /// the toggle untouched if the value is not a boolean.
    pub fn set_from_convar(&mut self, value: &str) -> bool {
        let enabled = match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => true,
            "false" | "0" => false,
            _ => return false,
        };
        self.enabled = enabled;
        true
    }
}

/// Fired when the global switch turns off.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParachuteDisabled;

/// Receiver for host lifecycle callbacks, one method per event.
pub trait LifecycleSink {
    fn on_connect(&mut self, slot: usize, steam_id: u64);
    fn on_spawn(&mut self, slot: usize, steam_id: u64);
    fn on_death(&mut self, slot: usize);
    fn on_disconnect(&mut self, slot: usize);
    fn on_toggle_disabled(&mut self);

    fn handle(&mut self, event: &PlayerLifecycleEvent) {
        match *event {
            PlayerLifecycleEvent::Connected { slot, steam_id } => self.on_connect(slot, steam_id),
            PlayerLifecycleEvent::Spawned { slot, steam_id } => self.on_spawn(slot, steam_id),
            PlayerLifecycleEvent::Died { slot } => self.on_death(slot),
            PlayerLifecycleEvent::Disconnected { slot } => self.on_disconnect(slot),
        }
    }
}
