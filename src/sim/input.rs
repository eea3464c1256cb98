//! Input mapping
//!
//! Raw key and pointer events are queued by the platform layer, turned into
//! [`Intent`]s by the pure [`map_event`], and applied to the simulation by
//! [`apply_intent`] once per frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::controls;
use super::error::SimError;
use super::state::{Bucket, Grab, Sign, Simulation};
use crate::consts::PAN_STEP;
use crate::renderer::Presenter;

/// Keys the game responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// A
    TiltUp,
    /// D
    TiltDown,
    /// S
    ElevateUp,
    /// F
    ElevateDown,
    /// Space
    Fire,
    /// N
    SpeedUp,
    /// M
    SpeedDown,
    /// Up arrow
    ZoomIn,
    /// Down arrow
    ZoomOut,
    Left,
    Right,
    /// K
    PanUp,
    /// L
    PanDown,
    /// Escape or Q
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAction {
    Press,
    Release,
    Repeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self { ctrl: false, alt: false };
    pub const CTRL: Self = Self { ctrl: true, alt: false };
    pub const ALT: Self = Self { ctrl: false, alt: true };

    pub fn any(self) -> bool {
        self.ctrl || self.alt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Left,
    Right,
}

/// Input event as delivered by the platform. Pointer positions are window
/// pixels with the origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Key {
        key: Key,
        action: KeyAction,
        mods: Modifiers,
    },
    PointerMove {
        x: f32,
        y: f32,
    },
    PointerButton {
        button: PointerButton,
        pressed: bool,
    },
    Scroll {
        dy: f32,
    },
}

impl InputEvent {
    pub fn key(key: Key, action: KeyAction) -> Self {
        Self::Key {
            key,
            action,
            mods: Modifiers::NONE,
        }
    }
}

/// Events waiting to be applied on the next frame
#[derive(Debug, Clone)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take every pending event, leaving the queue empty
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// What the player asked for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    TiltGun(Sign),
    ElevateGun(Sign),
    Fire,
    BrickSpeed(Sign),
    MoveBucket(Bucket, Sign),
    ZoomIn,
    ZoomOut,
    /// Move the camera by a world-space step
    Pan(Vec2),
    /// Left button down at the current pointer position
    Grab,
    /// Left button up
    Release,
    BeginPanDrag,
    EndPanDrag,
    /// Pointer moved to this window pixel
    PointerMoved(Vec2),
    Quit,
}

impl Intent {
    /// Intents that only touch the view or the session keep working after
    /// the game has ended.
    fn is_gameplay(&self) -> bool {
        !matches!(
            self,
            Intent::ZoomIn
                | Intent::ZoomOut
                | Intent::Pan(_)
                | Intent::BeginPanDrag
                | Intent::EndPanDrag
                | Intent::PointerMoved(_)
                | Intent::Quit
        )
    }
}

fn map_key(key: Key, action: KeyAction, mods: Modifiers) -> Option<Intent> {
    let sign = |plus: bool| if plus { Sign::Plus } else { Sign::Minus };

    if matches!(key, Key::Left | Key::Right) && mods.any() {
        if action == KeyAction::Release {
            return None;
        }
        let bucket = if mods.ctrl { Bucket::Red } else { Bucket::Blue };
        return Some(Intent::MoveBucket(bucket, sign(key == Key::Right)));
    }

    if key == Key::Quit {
        return (action == KeyAction::Press).then_some(Intent::Quit);
    }

    if action != KeyAction::Release {
        return None;
    }

    let intent = match key {
        Key::TiltUp => Intent::TiltGun(Sign::Plus),
        Key::TiltDown => Intent::TiltGun(Sign::Minus),
        Key::ElevateUp => Intent::ElevateGun(Sign::Plus),
        Key::ElevateDown => Intent::ElevateGun(Sign::Minus),
        Key::Fire => Intent::Fire,
        Key::SpeedUp => Intent::BrickSpeed(Sign::Plus),
        Key::SpeedDown => Intent::BrickSpeed(Sign::Minus),
        Key::ZoomIn => Intent::ZoomIn,
        Key::ZoomOut => Intent::ZoomOut,
        Key::Left => Intent::Pan(Vec2::new(-PAN_STEP, 0.0)),
        Key::Right => Intent::Pan(Vec2::new(PAN_STEP, 0.0)),
        Key::PanUp => Intent::Pan(Vec2::new(0.0, PAN_STEP)),
        Key::PanDown => Intent::Pan(Vec2::new(0.0, -PAN_STEP)),
        Key::Quit => return None,
    };
    Some(intent)
}

/// Translate one raw event. Returns `None` for events the game ignores.
pub fn map_event(event: &InputEvent) -> Option<Intent> {
    match *event {
        InputEvent::Key { key, action, mods } => map_key(key, action, mods),
        InputEvent::PointerMove { x, y } => Some(Intent::PointerMoved(Vec2::new(x, y))),
        InputEvent::PointerButton { button, pressed } => Some(match (button, pressed) {
            (PointerButton::Left, true) => Intent::Grab,
            (PointerButton::Left, false) => Intent::Release,
            (PointerButton::Right, true) => Intent::BeginPanDrag,
            (PointerButton::Right, false) => Intent::EndPanDrag,
        }),
        InputEvent::Scroll { dy } if dy > 0.0 => Some(Intent::ZoomIn),
        InputEvent::Scroll { dy } if dy < 0.0 => Some(Intent::ZoomOut),
        InputEvent::Scroll { .. } => None,
    }
}

fn pointer_moved(sim: &mut Simulation, pixel: Vec2) -> Result<(), SimError> {
    let state = &mut sim.state;
    state.pointer = pixel;

    if state.game_over {
        return Ok(());
    }

    let world = state.pointer_world();
    let grab = state.grab;
    match grab {
        Grab::None => {}
        Grab::RedBucket => controls::set_bucket_x(sim, Bucket::Red, world.x)?,
        Grab::BlueBucket => controls::set_bucket_x(sim, Bucket::Blue, world.x)?,
        Grab::GunElevation => controls::set_gun_elevation(sim, world.y),
        Grab::ArmAim => {
            controls::aim_arm_at(sim, world)?;
        }
    }
    Ok(())
}

/// Apply one intent to the simulation at wall-clock time `now`
pub fn apply_intent(
    sim: &mut Simulation,
    gfx: &mut impl Presenter,
    intent: Intent,
    now: f64,
) -> Result<(), SimError> {
    if sim.state.game_over && intent.is_gameplay() {
        if intent == Intent::Release {
            sim.state.grab = Grab::None;
        }
        return Ok(());
    }

    match intent {
        Intent::TiltGun(sign) => controls::tilt_gun(sim, sign)?,
        Intent::ElevateGun(sign) => controls::elevate_gun(sim, sign)?,
        Intent::Fire => {
            controls::fire(sim, gfx, now)?;
        }
        Intent::BrickSpeed(sign) => {
            sim.state.step_brick_speed(sign);
            log::debug!("Brick speed level {}", sim.state.brick_speed);
        }
        Intent::MoveBucket(bucket, sign) => controls::move_bucket(sim, bucket, sign)?,
        Intent::ZoomIn => sim.state.camera.zoom_in(),
        Intent::ZoomOut => sim.state.camera.zoom_out(),
        Intent::Pan(delta) => sim.state.camera.pan(delta),
        Intent::Grab => {
            let at = sim.state.pointer_world();
            sim.state.grab = controls::grab_at(sim, at)?;
        }
        Intent::Release => {
            let released = std::mem::take(&mut sim.state.grab);
            if released == Grab::ArmAim {
                controls::fire(sim, gfx, now)?;
            }
        }
        Intent::BeginPanDrag => sim.state.pan_anchor = Some(sim.state.pointer),
        Intent::EndPanDrag => sim.state.pan_anchor = None,
        Intent::PointerMoved(pixel) => pointer_moved(sim, pixel)?,
        Intent::Quit => {
            log::info!("Quit requested");
            sim.state.quit_requested = true;
        }
    }
    Ok(())
}

/// Drain the queue, mapping and applying every event in arrival order
pub fn handle_events(
    sim: &mut Simulation,
    gfx: &mut impl Presenter,
    queue: &mut InputQueue,
    now: f64,
) -> Result<(), SimError> {
    for event in queue.drain() {
        if let Some(intent) = map_event(&event) {
            apply_intent(sim, gfx, intent, now)?;
        }
    }
    Ok(())
}
