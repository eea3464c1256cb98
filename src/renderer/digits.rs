//! Seven-segment score display
//!
//! The score is shown with three digit places, each built from seven
//! rectangle fixtures. The same fixtures spell out "End" when the game is over.

use glam::Vec2;

/// Number of digit places on the display (units, tens, hundreds)
pub const PLACES: usize = 3;

/// Where each score place sits (index 0 = units)
pub const SCORE_ORIGINS: [Vec2; PLACES] = [
    Vec2::new(370.0, 250.0),
    Vec2::new(340.0, 250.0),
    Vec2::new(310.0, 250.0),
];

/// Where each place sits while the end message is shown
pub const MESSAGE_ORIGINS: [Vec2; PLACES] = [
    Vec2::new(30.0, 0.0),
    Vec2::new(0.0, 0.0),
    Vec2::new(-30.0, 0.0),
];

/// One bar of a seven-segment digit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Top,
    TopRight,
    TopLeft,
    Middle,
    BottomRight,
    BottomLeft,
    Bottom,
}

impl Segment {
    pub const ALL: [Segment; 7] = [
        Segment::Top,
        Segment::TopRight,
        Segment::TopLeft,
        Segment::Middle,
        Segment::BottomRight,
        Segment::BottomLeft,
        Segment::Bottom,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Segment::Top => "top",
            Segment::TopRight => "topright",
            Segment::TopLeft => "topleft",
            Segment::Middle => "middle",
            Segment::BottomRight => "botright",
            Segment::BottomLeft => "botleft",
            Segment::Bottom => "bottom",
        }
    }

    /// Offset of the bar from the digit origin
    pub fn offset(self) -> Vec2 {
        match self {
            Segment::Top => Vec2::new(0.0, 15.0),
            Segment::TopRight => Vec2::new(7.5, 7.5),
            Segment::TopLeft => Vec2::new(-7.5, 7.5),
            Segment::Middle => Vec2::new(0.0, 0.0),
            Segment::BottomRight => Vec2::new(7.5, -7.5),
            Segment::BottomLeft => Vec2::new(-7.5, -7.5),
            Segment::Bottom => Vec2::new(0.0, -15.0),
        }
    }

    /// Bar size as (height, width)
    pub fn size(self) -> (f32, f32) {
        match self {
            Segment::Top | Segment::Middle | Segment::Bottom => (5.0, 20.0),
            _ => (20.0, 5.0),
        }
    }

    /// Entity name of this bar's fixture at the given place
    pub fn fixture_name(self, place: usize) -> String {
        format!("{}{}", self.as_str(), place)
    }
}

/// Something the display can show in one place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Digit(u8),
    /// Capital E
    E,
    /// Lowercase n
    N,
    /// Lowercase d
    D,
}

// Bit i is lit when `Segment::ALL[i]` is: bottom, botleft, botright, middle,
// topleft, topright, top (most significant first).
const DIGIT_MASKS: [u8; 10] = [
    0b111_0111, // 0
    0b001_0010, // 1
    0b110_1011, // 2
    0b101_1011, // 3
    0b001_1110, // 4
    0b101_1101, // 5
    0b111_1101, // 6
    0b001_0011, // 7
    0b111_1111, // 8
    0b101_1111, // 9
];
const E_MASK: u8 = 0b110_1101;
const N_MASK: u8 = 0b011_1000;
const D_MASK: u8 = 0b111_1010;

impl Glyph {
    fn mask(self) -> u8 {
        match self {
            Glyph::Digit(d) => DIGIT_MASKS[(d % 10) as usize],
            Glyph::E => E_MASK,
            Glyph::N => N_MASK,
            Glyph::D => D_MASK,
        }
    }

    pub fn lights(self, segment: Segment) -> bool {
        self.mask() & segment.bit() != 0
    }

    /// Lit segments in display order
    pub fn lit_segments(self) -> impl Iterator<Item = Segment> {
        Segment::ALL.into_iter().filter(move |s| self.lights(*s))
    }
}

/// Split a score into (place, digit) pairs, units first.
///
/// Leading zeros are not shown; a zero score shows a single "0". Only
/// [`PLACES`] places exist, so higher digits are dropped.
pub fn score_digits(score: u32) -> Vec<(usize, u8)> {
    if score == 0 {
        return vec![(0, 0)];
    }
    let mut digits = Vec::with_capacity(PLACES);
    let mut rest = score;
    let mut place = 0;
    while rest > 0 && place < PLACES {
        digits.push((place, (rest % 10) as u8));
        rest /= 10;
        place += 1;
    }
    digits
}

/// The end-of-game message as (place, glyph) pairs
pub fn end_message() -> [(usize, Glyph); PLACES] {
    [(2, Glyph::E), (1, Glyph::N), (0, Glyph::D)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(glyph: Glyph) -> Vec<Segment> {
        glyph.lit_segments().collect()
    }

    #[test]
    fn one_and_eight() {
        assert_eq!(lit(Glyph::Digit(1)), vec![Segment::TopRight, Segment::BottomRight]);
        assert_eq!(lit(Glyph::Digit(8)).len(), 7);
    }

    #[test]
    fn zero_has_no_middle_bar() {
        let zero = Glyph::Digit(0);
        assert!(!zero.lights(Segment::Middle));
        assert_eq!(zero.lit_segments().count(), 6);
    }

    #[test]
    fn seven_is_top_and_right_side() {
        assert_eq!(
            lit(Glyph::Digit(7)),
            vec![Segment::Top, Segment::TopRight, Segment::BottomRight]
        );
    }

    #[test]
    fn end_letters() {
        assert_eq!(
            lit(Glyph::E),
            vec![
                Segment::Top,
                Segment::TopLeft,
                Segment::Middle,
                Segment::BottomLeft,
                Segment::Bottom
            ]
        );
        assert_eq!(
            lit(Glyph::N),
            vec![Segment::Middle, Segment::BottomRight, Segment::BottomLeft]
        );
        assert!(!Glyph::D.lights(Segment::TopLeft));
        assert!(!Glyph::D.lights(Segment::Top));
    }

    #[test]
    fn score_digits_units_first() {
        assert_eq!(score_digits(0), vec![(0, 0)]);
        assert_eq!(score_digits(5), vec![(0, 5)]);
        assert_eq!(score_digits(105), vec![(0, 5), (1, 0), (2, 1)]);
        // Only three places exist
        assert_eq!(score_digits(1234).len(), 3);
    }

    #[test]
    fn fixture_names_are_per_place() {
        assert_eq!(Segment::Top.fixture_name(0), "top0");
        assert_eq!(Segment::BottomLeft.fixture_name(2), "botleft2");
    }
}
