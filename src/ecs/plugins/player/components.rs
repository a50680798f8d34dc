use bevy::prelude::*;

// ============================================================================
// PAWN COMPONENTS
// ============================================================================
//
// These are written by the host simulation. The parachute systems only read
// them, except for `Velocity::z` and `GravityScale`.

/// A connected player's pawn. `slot` is the host's connection index and is
/// reused once the player disconnects.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub slot: usize,
    pub steam_id: u64,
}

/// Absolute velocity of the pawn. `z` is the vertical axis, negative when falling.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Velocity {
    pub fn vertical(z: f32) -> Self {
        Self { x: 0.0, y: 0.0, z }
    }
}

/// Multiplier the host applies to world gravity for this pawn.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct GravityScale(pub f32);

impl Default for GravityScale {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Entity the pawn is standing on, if any.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroundEntity(pub Option<Entity>);

impl GroundEntity {
    pub fn is_grounded(&self) -> bool {
        self.0.is_some()
    }
}

bitflags::bitflags! {
    /// Button mask reported by the host for the current tick.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct GameButtons: u64 {
        const ATTACK = 1 << 0;
        const JUMP = 1 << 1;
        const DUCK = 1 << 2;
        const FORWARD = 1 << 3;
        const BACK = 1 << 4;
        const USE = 1 << 5;
        const MOVE_LEFT = 1 << 9;
        const MOVE_RIGHT = 1 << 10;
        const ATTACK2 = 1 << 11;
        const RELOAD = 1 << 13;
        const SPEED = 1 << 17;
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressedButtons(pub GameButtons);

impl Default for PressedButtons {
    fn default() -> Self {
        Self(GameButtons::empty())
    }
}

impl PressedButtons {
    pub fn is_pressed(&self, button: GameButtons) -> bool {
        self.0.contains(button)
    }
}

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LifeState {
    #[default]
    Alive,
    Dying,
    Dead,
}

/// Hostage prop currently carried by the pawn.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarriedHostage(pub Option<Entity>);

impl CarriedHostage {
    pub fn is_carrying(&self) -> bool {
        self.0.is_some()
    }
}

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: Player,
    pub transform: Transform,
    pub velocity: Velocity,
    pub gravity_scale: GravityScale,
    pub ground: GroundEntity,
    pub buttons: PressedButtons,
    pub life_state: LifeState,
    pub hostage: CarriedHostage,
}

impl PlayerBundle {
    pub fn new(slot: usize, steam_id: u64) -> Self {
        Self {
            player: Player { slot, steam_id },
            transform: Transform::default(),
            velocity: Velocity::default(),
            gravity_scale: GravityScale::default(),
            ground: GroundEntity::default(),
            buttons: PressedButtons::default(),
            life_state: LifeState::Alive,
            hostage: CarriedHostage::default(),
        }
    }
}

// ============================================================================
// EVENTS
// ============================================================================

/// Connection lifecycle as reported by the host, in dispatch order.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerLifecycleEvent {
    Connected { slot: usize, steam_id: u64 },
    Spawned { slot: usize, steam_id: u64 },
    Died { slot: usize },
    Disconnected { slot: usize },
}
