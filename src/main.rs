//! Beam Breaker - native entry point
//!
//! Runs a headless session: a simple autopilot feeds input events, the
//! simulation ticks at a fixed frame rate, and every frame is recorded into a
//! [`DrawList`]. Settings come from `BEAM_BREAKER_SETTINGS` if set.

use beam_breaker::consts::{BUCKET_STEP, CATCH_LINE_Y};
use beam_breaker::renderer::{DrawList, draw_frame};
use beam_breaker::sim::{
    Bucket, Category, Color, FrameTime, GameObject, InputEvent, InputQueue, Key, KeyAction,
    Modifiers, PointerButton, SimError, Simulation, handle_events, tick,
};
use beam_breaker::Settings;

/// Black bricks are only worth shooting while they are well above the buckets
const SHOOT_ABOVE_Y: f32 = CATCH_LINE_Y + 100.0;

/// Plays the game through the same input events a window would deliver
#[derive(Debug, Default)]
struct Autopilot {
    /// Left button is held on an aim point
    aiming: bool,
}

impl Autopilot {
    fn lowest<'a>(sim: &'a Simulation, color: Color) -> Option<&'a GameObject> {
        sim.store
            .live(Category::Bricks)
            .filter(|b| b.is_active() && b.color == color)
            .min_by(|a, b| a.y.total_cmp(&b.y))
    }

    fn plan(&mut self, sim: &Simulation, queue: &mut InputQueue) -> Result<(), SimError> {
        if self.aiming {
            queue.push(InputEvent::PointerButton {
                button: PointerButton::Left,
                pressed: false,
            });
            self.aiming = false;
        }

        for (bucket, color, mods) in [
            (Bucket::Red, Color::Red, Modifiers::CTRL),
            (Bucket::Blue, Color::Blue, Modifiers::ALT),
        ] {
            let x = sim.store.get(Category::Buckets, bucket.name())?.x;
            let Some(brick) = Self::lowest(sim, color) else {
                continue;
            };
            let dx = brick.x - x;
            if dx.abs() >= BUCKET_STEP {
                let key = if dx > 0.0 { Key::Right } else { Key::Left };
                queue.push(InputEvent::Key {
                    key,
                    action: KeyAction::Press,
                    mods,
                });
            }
        }

        if sim.state.weapon_ready
            && let Some(target) = Self::lowest(sim, Color::Black).filter(|b| b.y > SHOOT_ABOVE_Y)
        {
            let pixel = sim.state.camera.project(target.pos());
            queue.push(InputEvent::PointerMove {
                x: pixel.x,
                y: pixel.y,
            });
            queue.push(InputEvent::PointerButton {
                button: PointerButton::Left,
                pressed: true,
            });
            self.aiming = true;
        }
        Ok(())
    }
}

fn run(settings: &Settings) -> Result<u32, SimError> {
    let mut gfx = DrawList::new();
    let mut sim = Simulation::new(&mut gfx, settings, 0.0)?;
    let mut queue = InputQueue::new();
    let mut pilot = Autopilot::default();

    let mut frame: u64 = 0;
    while !sim.state.quit_requested {
        let now = frame as f64 / settings.frame_rate;

        if frame >= settings.session_frames || sim.state.game_over {
            queue.push(InputEvent::key(Key::Quit, KeyAction::Press));
        } else {
            pilot.plan(&sim, &mut queue)?;
        }

        handle_events(&mut sim, &mut gfx, &mut queue, now)?;
        let report = tick(&mut sim, &mut gfx, FrameTime::single(now))?;
        draw_frame(&sim, &mut gfx)?;

        if report.caught + report.shot_black + report.shot_colored > 0 {
            log::debug!(
                "Frame {}: score {}, lives {}",
                frame,
                sim.state.score,
                sim.state.lives
            );
        }
        frame += 1;
    }

    log::info!(
        "Session ended after {} frames ({} draw frames, {} meshes)",
        sim.state.frames,
        gfx.frames_drawn(),
        gfx.mesh_count()
    );
    Ok(sim.state.score)
}

fn main() {
    env_logger::init();
    log::info!("Beam Breaker (headless) starting...");

    let settings = Settings::load();
    match run(&settings) {
        Ok(score) => println!("Final score: {score}"),
        Err(err) => {
            log::error!("Session aborted: {err}");
            std::process::exit(1);
        }
    }
}
