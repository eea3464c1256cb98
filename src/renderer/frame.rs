//! Per-frame draw submission
//!
//! Walks the entity store in layer order and hands each visible object to the
//! presenter with its model transform.

use glam::{Mat4, Vec2, Vec3};

use super::Presenter;
use super::digits::{self, Glyph, MESSAGE_ORIGINS, SCORE_ORIGINS};
use crate::consts::GUN_PIVOT_X;
use crate::sim::{Bucket, Category, GameObject, Grab, SimError, Simulation};

/// Translate to `at`, then rotate by `angle_deg` about Z
pub fn model_matrix(at: Vec2, angle_deg: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(at.x, at.y, 0.0))
        * Mat4::from_rotation_z(angle_deg.to_radians())
}

fn draw_object(gfx: &mut impl Presenter, object: &GameObject, at: Vec2) {
    gfx.render(object.handle, model_matrix(at, object.angle));
}

fn draw_category(sim: &Simulation, gfx: &mut impl Presenter, category: Category) {
    for object in sim.store.live(category) {
        draw_object(gfx, object, object.pos());
    }
}

fn draw_glyph(
    sim: &Simulation,
    gfx: &mut impl Presenter,
    place: usize,
    glyph: Glyph,
    origin: Vec2,
) -> Result<(), SimError> {
    for segment in glyph.lit_segments() {
        let bar = sim
            .store
            .get(Category::ScoreDigitSegments, &segment.fixture_name(place))?;
        draw_object(gfx, bar, origin + bar.pos());
    }
    Ok(())
}

/// Draw one frame of the current simulation state.
///
/// Once the game is over only the end message is shown.
pub fn draw_frame(sim: &Simulation, gfx: &mut impl Presenter) -> Result<(), SimError> {
    gfx.begin_frame(sim.state.camera.view_projection());

    if sim.state.game_over {
        for (place, glyph) in digits::end_message() {
            draw_glyph(sim, gfx, place, glyph, MESSAGE_ORIGINS[place])?;
        }
        return Ok(());
    }

    let grabbed = match sim.state.grab {
        Grab::RedBucket => Some(Bucket::Red),
        Grab::BlueBucket => Some(Bucket::Blue),
        _ => None,
    };
    if let Some(bucket) = grabbed {
        let frame = sim.store.get(Category::Highlights, bucket.highlight_name())?;
        let under = sim.store.get(Category::Buckets, bucket.name())?;
        draw_object(gfx, frame, under.pos());
    }

    draw_category(sim, gfx, Category::Bricks);
    draw_category(sim, gfx, Category::Beams);
    draw_category(sim, gfx, Category::Mirrors);
    draw_category(sim, gfx, Category::Buckets);

    // Gun parts are stored relative to the pivot
    for part in sim.store.live(Category::GunParts) {
        draw_object(gfx, part, part.pos() + Vec2::new(GUN_PIVOT_X, 0.0));
    }

    for (place, digit) in digits::score_digits(sim.state.score) {
        draw_glyph(sim, gfx, place, Glyph::Digit(digit), SCORE_ORIGINS[place])?;
    }

    for icon in sim.store.live(Category::LifeIcons).take(usize::from(sim.state.lives)) {
        draw_object(gfx, icon, icon.pos());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawList;
    use crate::renderer::vertex::colors;
    use crate::settings::Settings;
    use crate::sim::Activity;

    fn sim() -> (Simulation, DrawList) {
        let mut gfx = DrawList::new();
        let settings = Settings {
            seed: Some(11),
            ..Settings::default()
        };
        let sim = Simulation::new(&mut gfx, &settings, 0.0).unwrap();
        (sim, gfx)
    }

    fn lit_count(glyph: Glyph) -> usize {
        glyph.lit_segments().count()
    }

    #[test]
    fn fresh_game_frame() {
        let (sim, mut gfx) = sim();
        draw_frame(&sim, &mut gfx).unwrap();

        // 8 mirror pieces + 2 buckets + 3 gun parts + "0" + 3 lives
        let expected = 8 + 2 + 3 + lit_count(Glyph::Digit(0)) + 3;
        assert_eq!(gfx.calls().len(), expected);
        assert_eq!(gfx.calls_with_color(colors::YELLOW).count(), 0);
        assert_eq!(gfx.calls_with_color(colors::PURPLE).count(), 3);
        assert_eq!(gfx.frames_drawn(), 1);
    }

    #[test]
    fn gun_is_drawn_at_the_pivot() {
        let (sim, mut gfx) = sim();
        draw_frame(&sim, &mut gfx).unwrap();
        let arm = sim.store.get(Category::GunParts, crate::sim::layout::GUN_ARM).unwrap();
        let call = gfx.calls().iter().find(|c| c.handle == arm.handle).unwrap();
        assert_eq!(call.position(), Vec2::new(GUN_PIVOT_X, 0.0));
    }

    #[test]
    fn lives_and_score_follow_state() {
        let (mut sim, mut gfx) = sim();
        sim.state.lives = 1;
        sim.state.score = 1234;
        draw_frame(&sim, &mut gfx).unwrap();
        assert_eq!(gfx.calls_with_color(colors::PURPLE).count(), 1);

        // Only the last three digits: 2, 3, 4
        let bars: usize = [2, 3, 4].map(|d| lit_count(Glyph::Digit(d))).iter().sum();
        assert_eq!(gfx.calls().len(), 8 + 2 + 3 + bars + 1);
    }

    #[test]
    fn grabbed_bucket_gets_a_highlight() {
        let (mut sim, mut gfx) = sim();
        sim.state.grab = Grab::BlueBucket;
        draw_frame(&sim, &mut gfx).unwrap();
        let lights: Vec<_> = gfx.calls_with_color(colors::YELLOW).collect();
        assert_eq!(lights.len(), 1);
        assert_eq!(lights[0].position(), Vec2::new(-200.0, -275.0));
        // Highlight goes first so the bucket covers it
        assert_eq!(gfx.calls()[0].handle, lights[0].handle);
    }

    #[test]
    fn removed_objects_are_not_drawn() {
        let (mut sim, mut gfx) = sim();
        sim.store
            .get_mut(Category::Mirrors, "mirror1")
            .unwrap()
            .activity = Activity::Removed;
        draw_frame(&sim, &mut gfx).unwrap();
        let expected = 7 + 2 + 3 + lit_count(Glyph::Digit(0)) + 3;
        assert_eq!(gfx.calls().len(), expected);
    }

    #[test]
    fn game_over_shows_only_the_end_message() {
        let (mut sim, mut gfx) = sim();
        sim.state.game_over = true;
        draw_frame(&sim, &mut gfx).unwrap();
        let expected = lit_count(Glyph::E) + lit_count(Glyph::N) + lit_count(Glyph::D);
        assert_eq!(gfx.calls().len(), expected);
        // The E sits left of center
        assert!(gfx.calls().iter().any(|c| c.position().x < -20.0));
    }
}
