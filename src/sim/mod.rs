//! Simulation core
//!
//! All gameplay lives here. Nothing in this module knows about windows or GPU
//! resources; drawing goes through the [`Presenter`](crate::renderer::Presenter)
//! trait and every session owns its own seeded RNG.

pub mod collision;
pub mod controls;
pub mod entity;
pub mod error;
pub mod input;
pub mod layout;
pub mod state;
pub mod tick;

pub use collision::{MirrorContact, Rect, mirror_contact, reflect_heading};
pub use entity::{Activity, Category, Color, EntityStore, GameObject};
pub use error::SimError;
pub use input::{
    InputEvent, InputQueue, Intent, Key, KeyAction, Modifiers, PointerButton, apply_intent,
    handle_events, map_event,
};
pub use state::{Bucket, Camera, GameState, Grab, Sign, Simulation};
pub use tick::{FrameTime, TickReport, tick};
