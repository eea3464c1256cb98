//! Playfield fixtures created once at startup

use super::entity::{Category, Color, EntityStore, GameObject};
use super::error::SimError;
use crate::consts::*;
use crate::renderer::Presenter;
use crate::renderer::digits::{PLACES, Segment};

pub const RED_BUCKET: &str = "red_bucket";
pub const BLUE_BUCKET: &str = "blue_bucket";
pub const RED_BUCKET_LIGHT: &str = "red_bucket_light";
pub const BLUE_BUCKET_LIGHT: &str = "blue_bucket_light";

pub const GUN_BASE: &str = "gun_base";
pub const GUN_ROTATOR: &str = "gun_rotator";
pub const GUN_ARM: &str = "gun_arm";

/// Life icon names, first to last
pub const LIFE_ICONS: [&str; STARTING_LIVES as usize] = ["life1", "life2", "life3"];

const GUN_BASE_SIZE: f32 = 75.0;
const GUN_ARM_LENGTH: f32 = 150.0;
const GUN_ARM_THICKNESS: f32 = 10.0;

const MIRROR_LENGTH: f32 = 50.0;
const MIRROR_THICKNESS: f32 = 3.0;
const MIRROR_BACK_THICKNESS: f32 = 2.0;

/// (name, angle, x, y); each mirror gets a dark backing plate behind it.
/// Backings are named `<mirror>_back` so they sort right after their face.
const MIRRORS: [(&str, f32, f32, f32); 4] = [
    ("mirror1", 135.0, 0.0, 135.0),
    ("mirror2", 45.0, 165.0, 70.0),
    ("mirror3", 45.0, 165.0, -135.0),
    ("mirror4", 315.0, -110.0, -25.0),
];

const LIFE_ICON_SIZE: f32 = 10.0;
const LIFE_ICON_Y: f32 = 200.0;
const LIFE_ICON_XS: [f32; 3] = [310.0, 340.0, 370.0];

const HIGHLIGHT_MARGIN: f32 = 5.0;

/// Offset of a mirror's backing plate: two units behind the reflective face
fn backing_offset(angle: f32) -> (f32, f32) {
    let back = crate::heading(angle - 90.0) * 2.0_f32.sqrt() * 2.0;
    (back.x.round(), back.y.round())
}

/// Create every fixture: buckets, gun, mirrors, score segments, life icons,
/// and the bucket highlight frames.
pub fn populate(store: &mut EntityStore, gfx: &mut impl Presenter) -> Result<(), SimError> {
    for (name, color, x) in [(RED_BUCKET, Color::Red, 200.0), (BLUE_BUCKET, Color::Blue, -200.0)] {
        store.create(
            gfx,
            Category::Buckets,
            GameObject::new(name, color, x, BUCKET_Y, BUCKET_HEIGHT, BUCKET_WIDTH),
        )?;
    }

    // Gun parts are positioned relative to the pivot at GUN_PIVOT_X
    store.create(
        gfx,
        Category::GunParts,
        GameObject::new(GUN_BASE, Color::Black, 0.0, 0.0, GUN_BASE_SIZE, GUN_BASE_SIZE),
    )?;
    store.create(
        gfx,
        Category::GunParts,
        GameObject::new(GUN_ROTATOR, Color::Black, 0.0, 0.0, GUN_BASE_SIZE, GUN_BASE_SIZE)
            .rotated(ROTATOR_OFFSET),
    )?;
    store.create(
        gfx,
        Category::GunParts,
        GameObject::new(GUN_ARM, Color::Black, 0.0, 0.0, GUN_ARM_THICKNESS, GUN_ARM_LENGTH),
    )?;

    for (name, angle, x, y) in MIRRORS {
        store.create(
            gfx,
            Category::Mirrors,
            GameObject::new(name, Color::Grey, x, y, MIRROR_THICKNESS, MIRROR_LENGTH)
                .rotated(angle)
                .reflecting(),
        )?;
        let (bx, by) = backing_offset(angle);
        store.create(
            gfx,
            Category::Mirrors,
            GameObject::new(
                format!("{name}_back"),
                Color::Black,
                x + bx,
                y + by,
                MIRROR_BACK_THICKNESS,
                MIRROR_LENGTH,
            )
            .rotated(angle),
        )?;
    }

    for place in 0..PLACES {
        for segment in Segment::ALL {
            let offset = segment.offset();
            let (height, width) = segment.size();
            store.create(
                gfx,
                Category::ScoreDigitSegments,
                GameObject::new(
                    segment.fixture_name(place),
                    Color::Black,
                    offset.x,
                    offset.y,
                    height,
                    width,
                ),
            )?;
        }
    }

    for (name, x) in LIFE_ICONS.iter().zip(LIFE_ICON_XS) {
        store.create(
            gfx,
            Category::LifeIcons,
            GameObject::new(*name, Color::Purple, x, LIFE_ICON_Y, LIFE_ICON_SIZE, LIFE_ICON_SIZE)
                .rotated(45.0),
        )?;
    }

    for (name, x) in [(RED_BUCKET_LIGHT, 200.0), (BLUE_BUCKET_LIGHT, -200.0)] {
        store.create(
            gfx,
            Category::Highlights,
            GameObject::new(
                name,
                Color::Yellow,
                x,
                BUCKET_Y,
                BUCKET_HEIGHT + HIGHLIGHT_MARGIN,
                BUCKET_WIDTH + HIGHLIGHT_MARGIN,
            ),
        )?;
    }

    Ok(())
}
