//! Per-frame simulation step
//!
//! Spawns bricks on a timer, advances bricks and beams, resolves catches,
//! hits and mirror bounces, then sweeps removed entities.

use glam::Vec2;
use rand::Rng;

use super::collision::{MirrorContact, lands_in, mirror_contact};
use super::entity::{Activity, Category, Color, GameObject};
use super::error::SimError;
use super::layout::{BLUE_BUCKET, RED_BUCKET};
use super::state::Simulation;
use crate::consts::*;
use crate::heading;
use crate::renderer::Presenter;

/// Timing for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Wall-clock seconds, sampled once per frame
    pub now: f64,
    /// Number of movement advances to apply this frame
    pub steps: u32,
}

impl FrameTime {
    /// One advance per frame
    pub fn single(now: f64) -> Self {
        Self { now, steps: 1 }
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub spawned: u32,
    /// Bricks that landed in the bucket of their own color
    pub caught: u32,
    /// Bricks that crossed the catch line without being caught
    pub missed: u32,
    pub shot_black: u32,
    pub shot_colored: u32,
    /// Beams that left the world
    pub beams_expired: u32,
    /// Beams absorbed by the back of a mirror
    pub passed_through: u32,
    pub reflections: u32,
    /// Entities dropped by the end-of-tick sweep
    pub swept: usize,
    /// Set when this tick ended the game
    pub game_over: bool,
}

/// Advance the simulation by one frame.
///
/// Nothing but the camera moves once the game is over.
pub fn tick(
    sim: &mut Simulation,
    gfx: &mut impl Presenter,
    frame: FrameTime,
) -> Result<TickReport, SimError> {
    let mut report = TickReport::default();
    sim.state.hold_pan();
    if sim.state.game_over {
        return Ok(report);
    }
    sim.state.frames += 1;

    spawn_brick_if_due(sim, gfx, frame.now, &mut report)?;

    if frame.now - sim.state.last_beam_time >= FIRE_COOLDOWN {
        sim.state.weapon_ready = true;
    }

    for _ in 0..frame.steps {
        advance_bricks(sim, &mut report)?;
        if sim.state.game_over {
            break;
        }
        advance_beams(sim, &mut report)?;
        if sim.state.game_over {
            break;
        }
    }

    report.swept = sim.store.sweep(gfx);

    if report.game_over {
        log::info!(
            "Game over after {} frames, final score {}",
            sim.state.frames,
            sim.state.score
        );
    }
    Ok(report)
}

/// Color for a 1-10 draw: 40% red, 40% blue, 20% black
pub(crate) fn brick_color(draw: u8) -> Color {
    match draw {
        1..=4 => Color::Red,
        5..=8 => Color::Blue,
        _ => Color::Black,
    }
}

fn spawn_brick_if_due(
    sim: &mut Simulation,
    gfx: &mut impl Presenter,
    now: f64,
    report: &mut TickReport,
) -> Result<(), SimError> {
    if now - sim.state.last_spawn_time < sim.state.spawn_interval() {
        return Ok(());
    }

    let rng = sim.rng_mut();
    let x = rng.random_range(BRICK_SPAWN_X_MIN..=BRICK_SPAWN_X_MAX) as f32;
    let color = brick_color(rng.random_range(1..=10u8));

    let name = format!("brick{}", sim.state.brick_index);
    log::debug!("Spawning {} ({:?}) at x = {}", name, color, x);
    sim.store.create(
        gfx,
        Category::Bricks,
        GameObject::new(name, color, x, BRICK_SPAWN_Y, BRICK_HEIGHT, BRICK_WIDTH),
    )?;

    sim.state.brick_index += 1;
    sim.state.last_spawn_time = now;
    report.spawned += 1;
    Ok(())
}

fn advance_bricks(sim: &mut Simulation, report: &mut TickReport) -> Result<(), SimError> {
    let red = sim.store.get(Category::Buckets, RED_BUCKET)?.rect();
    let blue = sim.store.get(Category::Buckets, BLUE_BUCKET)?.rect();
    let speed = f32::from(sim.state.brick_speed);

    for brick in sim.store.iter_mut(Category::Bricks) {
        if sim.state.game_over {
            break;
        }
        if brick.is_removed() {
            continue;
        }

        brick.y -= speed;

        if brick.is_active() && brick.y < CATCH_LINE_Y {
            let rect = brick.rect();
            match brick.color {
                Color::Black if lands_in(&rect, &red) || lands_in(&rect, &blue) => {
                    log::debug!("{} caught a black brick", brick.name);
                    brick.activity = Activity::Removed;
                    sim.state.game_over = true;
                    report.game_over = true;
                }
                Color::Red if lands_in(&rect, &red) => {
                    brick.activity = Activity::Removed;
                    sim.state.award(CATCH_POINTS);
                    report.caught += 1;
                }
                Color::Blue if lands_in(&rect, &blue) => {
                    brick.activity = Activity::Removed;
                    sim.state.award(CATCH_POINTS);
                    report.caught += 1;
                }
                _ => {
                    brick.activity = Activity::Resolved;
                    report.missed += 1;
                }
            }
        }

        if brick.y < OFFSCREEN_Y {
            brick.activity = Activity::Removed;
        }
    }
    Ok(())
}

fn advance_beams(sim: &mut Simulation, report: &mut TickReport) -> Result<(), SimError> {
    let mirrors: Vec<(Vec2, f32)> = sim
        .store
        .live(Category::Mirrors)
        .filter(|m| m.reflective)
        .map(|m| (m.pos(), m.angle))
        .collect();
    let names: Vec<String> = sim
        .store
        .live(Category::Beams)
        .map(|b| b.name.clone())
        .collect();

    for name in names {
        if sim.state.game_over {
            break;
        }

        let beam = sim.store.get_mut(Category::Beams, &name)?;
        let direction = heading(beam.angle);
        beam.x += direction.x * BEAM_SPEED;
        beam.y += direction.y * BEAM_SPEED;

        if beam.x.abs() > WORLD_HALF_WIDTH || beam.y.abs() > WORLD_HALF_HEIGHT {
            beam.activity = Activity::Removed;
            report.beams_expired += 1;
            continue;
        }

        let tip = beam.pos() + direction * (BEAM_LENGTH / 2.0);
        let beam_angle = beam.angle;

        let hit = sim
            .store
            .iter_mut(Category::Bricks)
            .find(|b| b.is_active() && b.rect().contains(tip));
        if let Some(brick) = hit {
            brick.activity = Activity::Removed;
            let color = brick.color;
            sim.store.get_mut(Category::Beams, &name)?.activity = Activity::Removed;

            if color == Color::Black {
                sim.state.award(BLACK_HIT_POINTS);
                report.shot_black += 1;
                log::debug!("{} hit a black brick", name);
            } else {
                report.shot_colored += 1;
                log::debug!("{} hit a {:?} brick", name, color);
                if sim.state.penalize() {
                    report.game_over = true;
                }
            }
            continue;
        }

        for &(center, mirror_angle) in &mirrors {
            match mirror_contact(center, mirror_angle, tip, beam_angle) {
                Some(MirrorContact::Reflect { heading }) => {
                    sim.store.get_mut(Category::Beams, &name)?.angle = heading;
                    report.reflections += 1;
                    log::debug!("{} reflected to {:.1} deg", name, heading);
                    break;
                }
                Some(MirrorContact::PassThrough) => {
                    sim.store.get_mut(Category::Beams, &name)?.activity = Activity::Removed;
                    report.passed_through += 1;
                    break;
                }
                None => {}
            }
        }
    }
    Ok(())
}
