//! Collision detection and beam reflection
//!
//! Everything here is closed-form 2D geometry on axis-aligned boxes and
//! infinite mirror lines. Angles are degrees.

use glam::Vec2;

use crate::consts::{MIRROR_LINE_TOLERANCE, MIRROR_REACH};
use crate::{heading, normalize_degrees};

/// Axis-aligned box given by center and full size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub half: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            half: Vec2::new(width / 2.0, height / 2.0),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.half.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.half.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y + self.half.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y - self.half.y
    }

    /// Strict containment: points on the border are outside
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.left()
            && point.x < self.right()
            && point.y > self.bottom()
            && point.y < self.top()
    }
}

/// Whether a falling box has dropped into a catcher.
///
/// The faller's bottom edge must be below the catcher's top edge and the
/// faller must sit strictly inside the catcher's horizontal extent.
pub fn lands_in(faller: &Rect, catcher: &Rect) -> bool {
    faller.bottom() < catcher.top()
        && faller.right() < catcher.right()
        && faller.left() > catcher.left()
}

/// Mirror-line reflection of a heading: `2m - a`, normalized to [0, 360)
#[inline]
pub fn reflect_heading(mirror_angle: f32, beam_angle: f32) -> f32 {
    normalize_degrees(2.0 * mirror_angle - beam_angle)
}

/// Whether a beam travelling at `approach` hits the back of a mirror at `mirror_angle`.
///
/// The reflective face looks towards headings in `[m + 180, m + 360]`; a beam
/// whose heading lies strictly inside `(m, m + 180)` comes from behind.
pub fn approaches_from_behind(mirror_angle: f32, approach: f32) -> bool {
    let rel = normalize_degrees(approach - mirror_angle);
    rel > 0.0 && rel < 180.0
}

/// What a mirror does to a beam whose tip is touching it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MirrorContact {
    /// Bounced off the reflective face with this new heading
    Reflect { heading: f32 },
    /// Came in from behind; the beam is absorbed
    PassThrough,
}

/// Test a beam tip against one mirror.
///
/// The tip touches the mirror when it is within [`MIRROR_LINE_TOLERANCE`] of
/// the mirror's infinite line and within [`MIRROR_REACH`] of its center.
pub fn mirror_contact(
    mirror_center: Vec2,
    mirror_angle: f32,
    tip: Vec2,
    beam_angle: f32,
) -> Option<MirrorContact> {
    let along = heading(mirror_angle);
    let rel = tip - mirror_center;
    let perpendicular = along.perp_dot(rel).abs();
    if perpendicular >= MIRROR_LINE_TOLERANCE || rel.length() >= MIRROR_REACH {
        return None;
    }

    let approach = normalize_degrees(beam_angle);
    if approaches_from_behind(mirror_angle, approach) {
        Some(MirrorContact::PassThrough)
    } else {
        Some(MirrorContact::Reflect {
            heading: reflect_heading(mirror_angle, beam_angle),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_strict() {
        let r = Rect::new(Vec2::ZERO, 10.0, 20.0);
        assert!(r.contains(Vec2::new(4.9, 9.9)));
        assert!(!r.contains(Vec2::new(5.0, 0.0)));
        assert!(!r.contains(Vec2::new(0.0, -10.0)));
    }

    #[test]
    fn lands_in_requires_full_horizontal_overlap() {
        let bucket = Rect::new(Vec2::new(0.0, -275.0), 100.0, 50.0);
        let inside = Rect::new(Vec2::new(0.0, -241.0), 10.0, 20.0);
        assert!(lands_in(&inside, &bucket));

        // Straddling the rim does not count
        let straddling = Rect::new(Vec2::new(48.0, -241.0), 10.0, 20.0);
        assert!(!lands_in(&straddling, &bucket));

        // Still above the rim
        let above = Rect::new(Vec2::new(0.0, -230.0), 10.0, 20.0);
        assert!(!lands_in(&above, &bucket));
    }

    #[test]
    fn reflection_formula() {
        assert!((reflect_heading(45.0, 0.0) - 90.0).abs() < 1e-4);
        assert!((reflect_heading(135.0, 90.0) - 180.0).abs() < 1e-4);
        // 2*315 - 10 = 620 -> 260
        assert!((reflect_heading(315.0, 10.0) - 260.0).abs() < 1e-4);
    }

    #[test]
    fn behind_arcs_match_fixed_orientations() {
        // 45 degree mirror: (45, 225) is behind
        assert!(approaches_from_behind(45.0, 90.0));
        assert!(!approaches_from_behind(45.0, 0.0));
        assert!(!approaches_from_behind(45.0, 225.0));
        // 135 degree mirror: (135, 315) is behind
        assert!(approaches_from_behind(135.0, 200.0));
        assert!(!approaches_from_behind(135.0, 90.0));
        // 315 degree mirror: above 315 or below 135 is behind
        assert!(approaches_from_behind(315.0, 320.0));
        assert!(approaches_from_behind(315.0, 100.0));
        assert!(!approaches_from_behind(315.0, 135.0));
        assert!(!approaches_from_behind(315.0, 200.0));
    }

    #[test]
    fn mirror_contact_reflects_from_the_front() {
        // Beam heading right into a 45 degree mirror bounces straight up
        let contact = mirror_contact(Vec2::ZERO, 45.0, Vec2::new(-2.0, 0.0), 0.0);
        match contact {
            Some(MirrorContact::Reflect { heading }) => assert!((heading - 90.0).abs() < 1e-4),
            other => panic!("expected reflection, got {other:?}"),
        }
    }

    #[test]
    fn mirror_contact_from_behind_passes_through() {
        let contact = mirror_contact(Vec2::ZERO, 45.0, Vec2::new(0.0, -2.0), 90.0);
        assert_eq!(contact, Some(MirrorContact::PassThrough));
    }

    #[test]
    fn mirror_contact_misses_far_tips() {
        // On the mirror line but past its reach
        let far_along = heading(45.0) * 40.0;
        assert_eq!(mirror_contact(Vec2::ZERO, 45.0, far_along, 0.0), None);
        // Near the center but too far off the line
        assert_eq!(mirror_contact(Vec2::ZERO, 45.0, Vec2::new(-10.0, 10.0), 0.0), None);
    }
}
