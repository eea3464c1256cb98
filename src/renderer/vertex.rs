//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Flat-colored vertex: position (z is always 0 for this game) and RGB color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 3]) -> Self {
        Self {
            position: [x, y, 0.0],
            color,
        }
    }

    /// Byte stride of one vertex in an interleaved buffer
    pub const fn stride() -> usize {
        std::mem::size_of::<Vertex>()
    }
}

/// Colors for game elements
pub mod colors {
    pub const RED: [f32; 3] = [1.0, 0.0, 0.0];
    /// The "blue" bucket and bricks are drawn cyan
    pub const BLUE: [f32; 3] = [0.0, 1.0, 1.0];
    pub const BLACK: [f32; 3] = [0.0, 0.0, 0.0];
    pub const GREY: [f32; 3] = [168.0 / 255.0, 168.0 / 255.0, 168.0 / 255.0];
    pub const PURPLE: [f32; 3] = [0.5, 0.0, 1.0];
    pub const YELLOW: [f32; 3] = [1.0, 1.0, 0.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(Vertex::stride(), 6 * std::mem::size_of::<f32>());
        let v = Vertex::new(1.0, 2.0, colors::RED);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), Vertex::stride());
    }
}
