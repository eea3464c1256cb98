//! Shape generation for 2D primitives

use super::vertex::Vertex;

/// Generate vertices for an axis-aligned rectangle centered on the origin.
///
/// Two triangles; rotation and placement are applied later through the
/// model transform, so every game object shares this local layout.
pub fn rectangle(width: f32, height: f32, color: [f32; 3]) -> Vec<Vertex> {
    let hw = width / 2.0;
    let hh = height / 2.0;
    vec![
        Vertex::new(-hw, hh, color),
        Vertex::new(-hw, -hh, color),
        Vertex::new(hw, hh, color),
        Vertex::new(hw, hh, color),
        Vertex::new(hw, -hh, color),
        Vertex::new(-hw, -hh, color),
    ]
}
